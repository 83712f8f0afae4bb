//! In-process fake hub for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;

/// Serve `routes` as `(path, status, body)` on an ephemeral port.
pub async fn spawn_hub(routes: Vec<(&'static str, StatusCode, String)>) -> SocketAddr {
    serve(hub_router(routes)).await
}

/// Like [`spawn_hub`], but `stalled` answers only after `delay`.
pub async fn spawn_stalling_hub(
    routes: Vec<(&'static str, StatusCode, String)>,
    stalled: &'static str,
    delay: Duration,
) -> SocketAddr {
    let router = hub_router(routes).route(
        stalled,
        get(move || async move {
            tokio::time::sleep(delay).await;
            (StatusCode::OK, "{}")
        }),
    );
    serve(router).await
}

fn hub_router(routes: Vec<(&'static str, StatusCode, String)>) -> Router {
    let mut router = Router::new();
    for (path, status, body) in routes {
        router = router.route(
            path,
            get(move || {
                let body = body.clone();
                async move { (status, body) }
            }),
        );
    }
    router
}

async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    addr
}

/// An address nothing is listening on.
pub async fn closed_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

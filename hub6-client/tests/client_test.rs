//! Integration tests for the hub client against a fake hub.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use hub6_client::{Downstream, FetchErrorKind, Hub6Client, ServiceFlows, State, Upstream};

use common::{closed_addr, spawn_hub, spawn_stalling_hub};

const DOWNSTREAM: &str = r#"{
    "downstream": {
        "channels": [{
            "channelId": 1,
            "channelType": "sc_qam",
            "frequency": 650000000,
            "power": 4.2,
            "modulation": "256qam",
            "snr": 38,
            "rxMer": 40,
            "correctedErrors": 0,
            "uncorrectedErrors": 0,
            "lockStatus": true
        }]
    }
}"#;

fn client_for(addr: std::net::SocketAddr) -> Hub6Client {
    Hub6Client::new(addr.to_string(), Duration::from_secs(2)).unwrap()
}

#[tokio::test]
async fn test_fetch_downstream() {
    let addr = spawn_hub(vec![(
        "/rest/v1/cablemodem/downstream",
        StatusCode::OK,
        DOWNSTREAM.to_string(),
    )])
    .await;

    let ds: Downstream = client_for(addr).downstream().await.unwrap();

    assert_eq!(ds.downstream.channels.len(), 1);
    assert_eq!(ds.downstream.channels[0].modulation, "256qam");
}

#[tokio::test]
async fn test_fetch_accepts_added_fields() {
    let body = DOWNSTREAM.replace(
        r#""lockStatus": true"#,
        r#""lockStatus": true, "ofdmProfile": "A""#,
    );
    let addr = spawn_hub(vec![("/rest/v1/cablemodem/downstream", StatusCode::OK, body)]).await;

    let ds = client_for(addr).downstream().await.unwrap();

    assert_eq!(ds.downstream.channels[0].channel_id, 1);
}

#[tokio::test]
async fn test_non_success_status() {
    let addr = spawn_hub(vec![(
        "/rest/v1/cablemodem/upstream",
        StatusCode::INTERNAL_SERVER_ERROR,
        "oops".to_string(),
    )])
    .await;

    let err = client_for(addr).fetch::<Upstream>().await.unwrap_err();

    assert_eq!(err.kind(), FetchErrorKind::Status);
    assert!(err.url().ends_with("/rest/v1/cablemodem/upstream"));
}

#[tokio::test]
async fn test_missing_route_is_status_error() {
    let addr = spawn_hub(vec![]).await;

    let err = client_for(addr).state().await.unwrap_err();

    assert_eq!(err.kind(), FetchErrorKind::Status);
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let addr = spawn_hub(vec![(
        "/rest/v1/cablemodem/serviceflows",
        StatusCode::OK,
        r#"{"serviceFlows": {"serviceFlow": [{"serviceFlowId": 1}]}}"#.to_string(),
    )])
    .await;

    let err = client_for(addr).fetch::<ServiceFlows>().await.unwrap_err();

    assert_eq!(err.kind(), FetchErrorKind::Decode);
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let addr = closed_addr().await;

    let err = client_for(addr).fetch::<State>().await.unwrap_err();

    assert_eq!(err.kind(), FetchErrorKind::Transport);
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let addr = spawn_stalling_hub(
        Vec::new(),
        "/rest/v1/cablemodem/downstream",
        Duration::from_secs(10),
    )
    .await;
    let client = Hub6Client::new(addr.to_string(), Duration::from_millis(300)).unwrap();

    let started = std::time::Instant::now();
    let err = client.downstream().await.unwrap_err();

    assert_eq!(err.kind(), FetchErrorKind::Transport);
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_invalid_address_is_request_error() {
    let client = Hub6Client::new("not a host", Duration::from_secs(1)).unwrap();

    let err = client.downstream().await.unwrap_err();

    assert_eq!(err.kind(), FetchErrorKind::Request);
}

#[test]
fn test_url_for() {
    let client = Hub6Client::new("192.168.100.1", Duration::from_secs(1)).unwrap();
    assert_eq!(
        client.url_for("/rest/v1/cablemodem/state_"),
        "http://192.168.100.1/rest/v1/cablemodem/state_"
    );
}

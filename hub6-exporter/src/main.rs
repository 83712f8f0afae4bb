//! Prometheus exporter for the Virgin Media Hub 6.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tokio::sync::watch;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

use hub6_client::Hub6Client;
use hub6_exporter::config::{ExporterConfig, LogFormat, LoggingConfig};
use hub6_exporter::{AppState, DescriptorTable, HttpServer, HubCollector};

/// Prometheus exporter for the Virgin Media Hub 6 cable modem.
///
/// Every flag can also be set through a `VM_HUB6_EXPORTER_*` environment
/// variable; flags given on the command line win.
#[derive(Parser, Debug)]
#[command(name = "virginmedia_hub6_exporter")]
#[command(version, arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the exporter HTTP server.
    Server(ServerArgs),
    /// Print every exported metric without contacting the hub.
    Describe,
}

#[derive(Args, Debug, Default)]
struct ServerArgs {
    /// Path to configuration file (JSON5 format).
    #[arg(short, long, env = "VM_HUB6_EXPORTER_CONFIG")]
    config: Option<PathBuf>,

    /// Address of the hub (overrides config).
    #[arg(long, env = "VM_HUB6_EXPORTER_ADDRESS")]
    address: Option<String>,

    /// HTTP listen address (overrides config).
    #[arg(long, env = "VM_HUB6_EXPORTER_LISTEN")]
    listen: Option<String>,

    /// HTTP listen port; replaces the port of the listen address.
    #[arg(long, env = "VM_HUB6_EXPORTER_PORT")]
    port: Option<u16>,

    /// Timeout for each request to the hub, in seconds.
    #[arg(long, env = "VM_HUB6_EXPORTER_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, env = "VM_HUB6_EXPORTER_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log output format.
    #[arg(long, value_enum, env = "VM_HUB6_EXPORTER_LOG_FORMAT")]
    log_format: Option<LogFormat>,
}

impl ServerArgs {
    /// Load the config file (or defaults) and apply command-line overrides.
    fn resolve(&self) -> anyhow::Result<ExporterConfig> {
        let mut config = match &self.config {
            Some(path) => ExporterConfig::load_from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => ExporterConfig::default(),
        };

        if let Some(address) = &self.address {
            config.hub.address = address.clone();
        }
        if let Some(listen) = &self.listen {
            config.server.listen = listen.clone();
        }
        if let Some(port) = self.port {
            let mut addr: SocketAddr = config
                .server
                .listen
                .parse()
                .with_context(|| format!("Invalid listen address: {}", config.server.listen))?;
            addr.set_port(port);
            config.server.listen = addr.to_string();
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.hub.timeout_secs = timeout_secs;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = self.log_format {
            config.logging.format = format;
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_logging(logging: &LoggingConfig) -> anyhow::Result<()> {
    let level: Level = logging
        .level
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid log level: {}", logging.level))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "virginmedia_hub6_exporter={level},hub6_exporter={level},hub6_client={level},hyper=warn,reqwest=warn",
            level = level
        ))
    });

    let result = match logging.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).try_init(),
    };
    result.map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

fn describe() {
    let table = DescriptorTable::default();
    for d in table.iter() {
        println!(
            "{} {} [{}] {}",
            d.name,
            d.metric_type,
            d.label_names.join(","),
            d.help
        );
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate());
        match sigterm {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => info!("Received Ctrl+C, shutting down..."),
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
                }
                return;
            }
            Err(e) => error!("Failed to install SIGTERM handler: {}", e),
        }
    }

    let _ = tokio::signal::ctrl_c().await;
    info!("Received Ctrl+C, shutting down...");
}

async fn serve(args: ServerArgs) -> anyhow::Result<()> {
    let config = args.resolve()?;
    init_logging(&config.logging)?;

    info!(
        hub = %config.hub.address,
        timeout_secs = config.hub.timeout_secs,
        "Starting Virgin Media Hub 6 exporter"
    );

    let listen_addr: SocketAddr = config
        .server
        .listen
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid listen address: {}", e))?;

    let descriptors = Arc::new(DescriptorTable::default());
    let client = Hub6Client::new(config.hub.address.clone(), config.hub.timeout())?;
    let state = AppState::new(HubCollector::new(client, descriptors), config.hub.timeout());

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let http_server = HttpServer::new(
        state,
        listen_addr,
        config.server.metrics_path.clone(),
        config.server.probe_path.clone(),
    );
    let mut http_task = tokio::spawn(http_server.run(shutdown_rx));

    tokio::select! {
        _ = shutdown_signal() => {}
        result = &mut http_task => {
            // The server only returns early on a startup failure such as a bind error.
            return result?;
        }
    }

    shutdown_tx.send(true)?;
    match tokio::time::timeout(Duration::from_secs(5), http_task).await {
        Ok(result) => result??,
        Err(_) => error!("HTTP server did not stop within 5s"),
    }

    info!("Exporter stopped");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Server(args) => serve(args).await,
        Command::Describe => {
            describe();
            Ok(())
        }
    }
}

mod http;

use blastify_core::dispatch::{DispatchEngine, RetryPolicy};
use blastify_core::recorder::BaseRecorder;
use blastify_core::session::Session;
use blastify_core::transport::TransportRegistry;
use blastify_transports::all_transports;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
struct Args {
    #[clap(long, env = "BLASTIFY_BIND", default_value = "[::]:8000")]
    bind: SocketAddr,
    /// Upper bound on outbound message length, in characters. Unbounded when unset.
    #[clap(long)]
    max_message_len: Option<usize>,
    /// Attempts each per-recipient send gets before its failure is recorded.
    #[clap(long, default_value_t = 1)]
    send_attempts: u32,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }

    let args = Args::parse();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    debug!("Config: {:#?}", args);

    let session = Arc::new(RwLock::new(Session::new(args.max_message_len)));

    let mut transport_registry = TransportRegistry::new();
    for transport in all_transports() {
        transport_registry.register(transport);
    }
    let channels: Vec<String> = transport_registry
        .supported_channels()
        .map(|c| c.to_string())
        .collect();
    info!("Registered transports: {}", channels.join(", "));

    let engine = Arc::new(DispatchEngine::new(
        transport_registry,
        Arc::new(BaseRecorder::new()),
        RetryPolicy {
            attempts: args.send_attempts,
        },
    ));

    info!("Starting HTTP server on {}", args.bind);
    let ext = http::HttpExtensions { session, engine };
    http::start(args.bind, ext).await;

    let _ = tokio::signal::ctrl_c().await;
}

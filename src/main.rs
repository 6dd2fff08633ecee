use clap::Parser;
use miette::{IntoDiagnostic, Result};
use paytrack::application::service::PaymentService;
use paytrack::domain::ports::PaymentStoreRef;
use paytrack::infrastructure::in_memory::InMemoryPaymentStore;
use paytrack::interfaces::rest;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to bind the HTTP server to
    #[arg(long, default_value = "127.0.0.1:8080")]
    listen: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let store: PaymentStoreRef = Arc::new(InMemoryPaymentStore::new());
    let service = Arc::new(PaymentService::new(store));
    let app = rest::router(service);

    let listener = tokio::net::TcpListener::bind(cli.listen)
        .await
        .into_diagnostic()?;
    tracing::info!(addr = %cli.listen, "payment service listening");
    axum::serve(listener, app).await.into_diagnostic()?;

    Ok(())
}

//! Payment service entry point

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use paymentservice::{
    FileClaimStore, HttpGatewayClient, InMemoryClaimStore, PaymentResult, PaymentService, Settings,
};

#[derive(Parser, Debug)]
#[command(name = "paymentservice")]
#[command(about = "Unemployment-insurance payment processing service")]
struct Args {
    /// Port for the HTTP server (dashboard and confirmation actions)
    #[arg(long, default_value = "6000")]
    port: u16,

    /// Upstream gateway base URL (falls back to GATEWAY_URL, then localhost)
    #[arg(long)]
    gateway_url: Option<String>,

    /// Seconds between claim-feed polls
    #[arg(long, default_value = "30")]
    poll_interval_secs: u64,

    /// Directory for persisted payment records; in-memory storage when unset
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> PaymentResult<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    shared::logging::init_tracing(Some(&args.log_level));

    info!("🚀 Starting payment service...");

    let settings = Settings::resolve(
        args.port,
        args.gateway_url,
        args.poll_interval_secs,
        args.data_dir,
    )?;

    info!(
        "⚙️ Benefit parameters: cap ${}, replacement rate {}, {} weeks",
        settings.max_weekly_benefit, settings.replacement_rate, settings.benefit_weeks
    );
    info!("🔗 Upstream gateway: {}", settings.gateway_url);

    let gateway = Arc::new(HttpGatewayClient::new(
        settings.gateway_url.clone(),
        settings.service_name.clone(),
    ));

    match settings.data_dir.clone() {
        Some(dir) => {
            info!("💾 Persisting payment calculations under {}", dir.display());
            let store = Arc::new(FileClaimStore::new(&dir)?);
            PaymentService::new(settings, gateway, store).run().await?;
        }
        None => {
            info!("💾 Using in-memory payment store");
            let store = Arc::new(InMemoryClaimStore::new());
            PaymentService::new(settings, gateway, store).run().await?;
        }
    }

    info!("✅ Payment service stopped gracefully");
    Ok(())
}

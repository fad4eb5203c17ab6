use paperdesk_core::{init_tracing, PaperdeskConfig};
use paperdesk_server::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = PaperdeskConfig::load("dev")?.with_typed::<AppConfig>()?;
    init_tracing(config.log_format);
    tracing::info!(profile = config.profile(), "Starting paperdesk");

    paperdesk_server::run(config).await
}

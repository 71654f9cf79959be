use std::error::Error;

use dotenv::dotenv;
use etfportfolio::{
    api::KisClient,
    config::Config,
    structs::{Persistable, PortfolioManager},
    utils::init_logging,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    init_logging();

    let config = Config::from_env()?;
    let mut portfolio_manager = PortfolioManager::new(Some(config.portfolio_path.clone()))?;
    info!(
        path = %config.portfolio_path,
        holdings = portfolio_manager.holdings().len(),
        "Portfolio loaded"
    );

    match config.kis {
        Some(kis) => {
            let client = KisClient::new(kis)?;
            let report = portfolio_manager.refresh_prices(&client).await;
            if !report.is_complete() {
                warn!(failed = ?report.failed, "Summary uses stale prices");
            }
        }
        None => info!("KIS_APP_KEY not set, summary uses the last known prices"),
    }

    let summary = portfolio_manager.recompute();
    println!("{}", serde_json::to_string_pretty(summary.as_ref())?);
    Ok(())
}

use std::sync::Arc;

use checker::{check_balances, CheckerSettings, HttpBalanceApi};
use config::Config;
use constants::REQUEST_TIMEOUT;
use logger::init_default_logger;
use report::{print_summary, save_balances_to_excel};
use utils::files::{read_addresses, read_proxies};

mod checker;
mod config;
mod constants;
mod logger;
mod report;
mod utils;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    init_default_logger();
    log::info!("Starting balance checker");

    let config = Config::read_default().await?;

    let addresses = read_addresses(&config.addresses_file).await;
    let proxies = read_proxies(&config.proxies_file).await;

    let api = Arc::new(HttpBalanceApi::new(config.api_base_url.clone(), REQUEST_TIMEOUT));
    let settings = CheckerSettings {
        max_concurrent_requests: config.max_concurrent_requests,
        ..Default::default()
    };

    let results = check_balances(api, addresses, &proxies, settings).await?;

    match save_balances_to_excel(&results, &config.output_file) {
        Ok(()) => crate::success!("Results saved to {}", config.output_file.display()),
        Err(e) => log::error!("Failed to save results to Excel: {e}"),
    }

    print_summary(&results);

    log::info!("Balance checker finished");

    Ok(())
}

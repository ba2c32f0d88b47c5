use std::time::Duration;

pub const CONFIG_FILE_PATH: &str = "config.json";

// FILES
pub const ADDRESSES_FILE_PATH: &str = "addresses.txt";
pub const PROXIES_FILE_PATH: &str = "proxies.txt";
pub const OUTPUT_FILE_PATH: &str = "commonwealth_checker.xlsx";

pub const API_BASE_URL: &str = "https://api.commonwealth4.com/airdrop_balance?user=";

pub const MAX_CONCURRENT_REQUESTS: usize = 10;

pub const MAX_ATTEMPTS: u32 = 3;
pub const RETRY_DELAY: Duration = Duration::from_secs(5);
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

pub const OUTPUT_HEADERS: [&str; 3] = ["Wallet", "Balance", "Claim"];

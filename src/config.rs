use std::{num::NonZeroUsize, path::Path, path::PathBuf};

use eyre::WrapErr;
use serde::Deserialize;

use crate::constants::{
    ADDRESSES_FILE_PATH, API_BASE_URL, CONFIG_FILE_PATH, MAX_CONCURRENT_REQUESTS,
    OUTPUT_FILE_PATH, PROXIES_FILE_PATH,
};

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    pub max_concurrent_requests: NonZeroUsize,
    pub addresses_file: PathBuf,
    pub proxies_file: PathBuf,
    pub output_file: PathBuf,
    pub api_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_requests: NonZeroUsize::new(MAX_CONCURRENT_REQUESTS)
                .unwrap_or(NonZeroUsize::MIN),
            addresses_file: ADDRESSES_FILE_PATH.into(),
            proxies_file: PROXIES_FILE_PATH.into(),
            output_file: OUTPUT_FILE_PATH.into(),
            api_base_url: API_BASE_URL.to_owned(),
        }
    }
}

impl Config {
    /// Reads the config at `path`.
    ///
    /// A missing file is not an error: it is logged and every setting falls
    /// back to its default. A file that exists but does not parse is.
    pub async fn read_from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();

        let cfg_str = match tokio::fs::read_to_string(path).await {
            Ok(cfg_str) => cfg_str,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::error!("Config file {} not found, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).wrap_err_with(|| format!("Failed to read {}", path.display()))
            }
        };

        let config = serde_json::from_str(&cfg_str)
            .wrap_err_with(|| format!("Malformed config file {}", path.display()))?;

        log::info!("Config loaded from {}", path.display());

        Ok(config)
    }

    pub async fn read_default() -> eyre::Result<Self> {
        Self::read_from_file(CONFIG_FILE_PATH).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let config = Config::read_from_file(dir.path().join("config.json"))
            .await
            .unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.max_concurrent_requests.get(), 10);
        assert_eq!(config.output_file, PathBuf::from("commonwealth_checker.xlsx"));
    }

    #[tokio::test]
    async fn absent_keys_keep_their_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        tokio::fs::write(
            &path,
            r#"{"max_concurrent_requests": 3, "proxies_file": "data/proxies.txt", "unknown": 1}"#,
        )
        .await
        .unwrap();

        let config = Config::read_from_file(&path).await.unwrap();

        assert_eq!(config.max_concurrent_requests.get(), 3);
        assert_eq!(config.proxies_file, PathBuf::from("data/proxies.txt"));
        assert_eq!(config.addresses_file, PathBuf::from("addresses.txt"));
        assert_eq!(config.api_base_url, API_BASE_URL);
    }

    #[tokio::test]
    async fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        tokio::fs::write(&path, "{ max_concurrent_requests: ").await.unwrap();

        assert!(Config::read_from_file(&path).await.is_err());
    }

    #[tokio::test]
    async fn zero_concurrency_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        tokio::fs::write(&path, r#"{"max_concurrent_requests": 0}"#)
            .await
            .unwrap();

        assert!(Config::read_from_file(&path).await.is_err());
    }
}

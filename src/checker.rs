use std::{future::Future, num::NonZeroUsize, sync::Arc, time::Duration};

use rand::{seq::SliceRandom, thread_rng};
use serde_json::Value;
use tokio::{sync::Semaphore, task::JoinSet, time::Instant};

use crate::{
    constants::{MAX_ATTEMPTS, MAX_CONCURRENT_REQUESTS, RETRY_DELAY},
    success,
    utils::{
        fetch::{send_http_request, RequestError, RequestParams},
        progress_bar,
    },
};

#[derive(Debug, thiserror::Error)]
pub enum CheckerError {
    #[error("proxy list is empty, cannot check {0} addresses")]
    NoProxies(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    pub address: String,
    pub balance: Option<Value>,
    pub claim: Option<Value>,
}

impl FetchOutcome {
    fn failed(address: String) -> Self {
        Self {
            address,
            balance: None,
            claim: None,
        }
    }

    /// Pulls `data.balance` and `data.claim` out of an API response. Anything
    /// that does not have that shape, including JSON `null`, becomes `None`.
    fn from_response(address: String, body: &Value) -> Self {
        let field = |name: &str| {
            body.get("data")
                .and_then(|data| data.get(name))
                .filter(|value| !value.is_null())
                .cloned()
        };

        Self {
            balance: field("balance"),
            claim: field("claim"),
            address,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            retry_delay: RETRY_DELAY,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CheckerSettings {
    pub max_concurrent_requests: NonZeroUsize,
    pub retry: RetryPolicy,
}

impl Default for CheckerSettings {
    fn default() -> Self {
        Self {
            max_concurrent_requests: NonZeroUsize::new(MAX_CONCURRENT_REQUESTS)
                .unwrap_or(NonZeroUsize::MIN),
            retry: RetryPolicy::default(),
        }
    }
}

/// Source of raw balance responses for a single address.
pub trait BalanceApi: Send + Sync + 'static {
    fn get_balance(
        &self,
        address: &str,
        proxy: &str,
    ) -> impl Future<Output = Result<Value, RequestError>> + Send;
}

pub struct HttpBalanceApi {
    base_url: String,
    timeout: Duration,
}

impl HttpBalanceApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
        }
    }
}

impl BalanceApi for HttpBalanceApi {
    async fn get_balance(&self, address: &str, proxy: &str) -> Result<Value, RequestError> {
        let url = format!("{}{address}", self.base_url);

        let request_params = RequestParams {
            url: &url,
            proxy: Some(proxy),
            timeout: self.timeout,
        };

        send_http_request(request_params).await
    }
}

#[derive(Debug, Clone)]
pub struct FetchJob {
    pub index: usize,
    pub total: usize,
    pub address: String,
    pub proxy: String,
}

/// Fetches the balance for one address, retrying transient failures.
///
/// The gate permit is held for the whole attempt sequence, retry delays
/// included. Exhausting every attempt is not an error: it yields an outcome
/// with no balance and no claim. Only non-transient request errors are
/// returned as `Err`.
pub async fn fetch_balance<A: BalanceApi>(
    api: &A,
    job: FetchJob,
    gate: &Semaphore,
    policy: RetryPolicy,
) -> eyre::Result<FetchOutcome> {
    let FetchJob {
        index,
        total,
        address,
        proxy,
    } = job;

    let _permit = gate.acquire().await?;
    let start = Instant::now();

    for attempt in 1..=policy.max_attempts {
        log::debug!("[{index}/{total}] Attempt {attempt} to fetch balance for {address}");

        match api.get_balance(&address, &proxy).await {
            Ok(body) => {
                let outcome = FetchOutcome::from_response(address, &body);
                success!(
                    "[{index}/{total}] Got balance for {}: {}, claim: {}, took {:.2}s",
                    outcome.address,
                    display_value(outcome.balance.as_ref()),
                    display_value(outcome.claim.as_ref()),
                    start.elapsed().as_secs_f64()
                );
                return Ok(outcome);
            }
            Err(e) if e.is_transient() => {
                log::warn!("[{index}/{total}] Request for {address} failed: {e}");

                if attempt < policy.max_attempts {
                    log::info!(
                        "[{index}/{total}] Retrying in {} seconds...",
                        policy.retry_delay.as_secs_f64()
                    );
                    tokio::time::sleep(policy.retry_delay).await;
                }
            }
            Err(e) => return Err(e.into()),
        }
    }

    log::error!(
        "[{index}/{total}] Max attempts reached for {address}, took {:.2}s",
        start.elapsed().as_secs_f64()
    );

    Ok(FetchOutcome::failed(address))
}

/// Checks every address through a randomly chosen proxy and returns the
/// outcomes that came back with a balance, in completion order.
pub async fn check_balances<A: BalanceApi>(
    api: Arc<A>,
    addresses: Vec<String>,
    proxies: &[String],
    settings: CheckerSettings,
) -> eyre::Result<Vec<FetchOutcome>> {
    let total = addresses.len();

    if total == 0 {
        log::warn!("No addresses to check");
        return Ok(vec![]);
    }

    let jobs = {
        let mut rng = thread_rng();

        addresses
            .into_iter()
            .enumerate()
            .map(|(i, address)| -> Result<FetchJob, CheckerError> {
                let proxy = proxies
                    .choose(&mut rng)
                    .ok_or(CheckerError::NoProxies(total))?;

                Ok(FetchJob {
                    index: i + 1,
                    total,
                    address,
                    proxy: proxy.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?
    };

    let gate = Arc::new(Semaphore::new(settings.max_concurrent_requests.get()));
    let mut handles = JoinSet::new();

    for job in jobs {
        let api = api.clone();
        let gate = gate.clone();

        handles.spawn(async move {
            let address = job.address.clone();
            let outcome = fetch_balance(api.as_ref(), job, &gate, settings.retry).await;
            (address, outcome)
        });
    }

    let pb = progress_bar(total as u64, "Processing wallets");
    let mut results = vec![];

    while let Some(res) = handles.join_next().await {
        pb.inc(1);

        match res {
            Ok((_, Ok(outcome))) if outcome.balance.is_some() => results.push(outcome),
            Ok((_, Ok(_))) => {}
            Ok((address, Err(e))) => {
                log::error!("Balance check for {address} aborted: {e}");
            }
            Err(e) => log::error!("Balance check task failed: {e}"),
        }
    }

    pb.finish_and_clear();
    log::info!("{}/{total} addresses returned a balance", results.len());

    Ok(results)
}

pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None => "-".to_owned(),
        Some(Value::String(s)) => s.clone(),
        Some(value) => value.to_string(),
    }
}

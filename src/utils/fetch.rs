use std::time::Duration;

use reqwest::{Client, Proxy, StatusCode};
use serde::de::DeserializeOwned;

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("request timed out")]
    Timeout,

    #[error("request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("non-successful status code: {0}")]
    Status(StatusCode),

    #[error("invalid proxy `{proxy}`: {source}")]
    InvalidProxy {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },
}

impl RequestError {
    /// Whether another attempt through the same proxy could succeed.
    pub fn is_transient(&self) -> bool {
        !matches!(self, Self::InvalidProxy { .. })
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return Self::Timeout;
        }

        match e.status() {
            Some(status) => Self::Status(status),
            None => Self::Network(e),
        }
    }
}

#[derive(Clone, Debug)]
pub struct RequestParams<'a> {
    pub url: &'a str,
    pub proxy: Option<&'a str>,
    pub timeout: Duration,
}

/// Proxy lines usually come as bare `host:port`; those go through as plain HTTP.
pub fn proxy_url(proxy: &str) -> String {
    if proxy.contains("://") {
        proxy.to_owned()
    } else {
        format!("http://{proxy}")
    }
}

fn build_client(request_params: &RequestParams<'_>) -> Result<Client, RequestError> {
    let mut builder = Client::builder().timeout(request_params.timeout);

    if let Some(proxy) = request_params.proxy {
        let invalid_proxy = |source| RequestError::InvalidProxy {
            proxy: proxy.to_owned(),
            source,
        };

        builder = builder.proxy(Proxy::all(proxy_url(proxy)).map_err(invalid_proxy)?);
        return builder.build().map_err(invalid_proxy);
    }

    Ok(builder.build()?)
}

pub async fn send_http_request<T: DeserializeOwned>(
    request_params: RequestParams<'_>,
) -> Result<T, RequestError> {
    let client = build_client(&request_params)?;

    let response = client
        .get(request_params.url)
        .send()
        .await?
        .error_for_status()?;

    Ok(response.json::<T>().await?)
}

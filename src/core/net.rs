// src/core/net.rs
// Blocking HTTP GET. No retry here; callers decide what a failed page means.

use std::time::Duration;

use reqwest::blocking::Client;
use thiserror::Error;

use crate::config::consts::{BASE_URL, TIMEOUT_SECS, USER_AGENT};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },
}

pub fn client() -> Result<Client, FetchError> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(TIMEOUT_SECS))
        .build()
        .map_err(|source| FetchError::Transport { url: s!(BASE_URL), source })
}

pub fn page_url(id: u32) -> String {
    format!("{BASE_URL}{id}")
}

pub fn http_get(client: &Client, url: &str) -> Result<String, FetchError> {
    let transport = |source: reqwest::Error| FetchError::Transport { url: s!(url), source };

    let resp = client.get(url).send().map_err(transport)?;
    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status { url: s!(url), status: status.as_u16() });
    }
    resp.text().map_err(transport)
}

use std::future::Future;
use std::time::Duration;

use serde::Deserialize;

use super::SearchEndpoint;
use crate::error::{Result, SearchError};
use crate::state::{QueryField, ResultRecord};
use crate::util::percent_encode;

/// Default AUR web root.
pub const AUR_BASE_URL: &str = "https://aur.archlinux.org";

/// Envelope returned by `/rpc/v5/search`.
#[derive(Debug, Deserialize)]
struct RpcEnvelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    results: Vec<ResultRecord>,
}

/// What: Decode an AUR RPC search response body.
///
/// Inputs:
/// - `body`: Raw JSON text
///
/// Output:
/// - Records in response order, records without a name dropped
///
/// # Errors
/// - `Endpoint(msg)` when the envelope has `"type": "error"`
/// - `Transport` when the body is not a valid envelope
pub fn parse_search_response(body: &str) -> Result<Vec<ResultRecord>> {
    let envelope: RpcEnvelope = serde_json::from_str(body)
        .map_err(|e| SearchError::Transport(format!("Invalid RPC response: {e}")))?;
    if envelope.kind == "error" {
        return Err(SearchError::Endpoint(envelope.error.unwrap_or_default()));
    }
    let total = envelope.results.len();
    let records: Vec<ResultRecord> = envelope
        .results
        .into_iter()
        .filter(|r| !r.name.trim().is_empty())
        .collect();
    if records.len() != total {
        tracing::debug!(
            dropped = total - records.len(),
            "[Rpc] Dropped results without a package name"
        );
    }
    Ok(records)
}

/// AUR RPC v5 client.
#[derive(Clone, Debug)]
pub struct AurRpc {
    client: reqwest::Client,
    base_url: String,
}

impl AurRpc {
    /// What: Build a client for the given AUR root.
    ///
    /// Inputs:
    /// - `base_url`: Web root such as [`AUR_BASE_URL`]; a trailing `/` is ignored
    /// - `timeout`: Whole-request timeout
    ///
    /// Output:
    /// - Ready client
    ///
    /// # Errors
    /// - `Http` when the underlying `reqwest` client cannot be built
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("aurquery/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SearchError::Http(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Search URL for `field` and `query`.
    #[must_use]
    pub fn search_url(&self, field: QueryField, query: &str) -> String {
        format!(
            "{}/rpc/v5/search?by={}&arg={}",
            self.base_url,
            field.as_rpc_param(),
            percent_encode(query)
        )
    }
}

impl SearchEndpoint for AurRpc {
    fn search(
        &self,
        field: QueryField,
        query: &str,
    ) -> impl Future<Output = Result<Vec<ResultRecord>>> + Send {
        let url = self.search_url(field, query);
        let client = self.client.clone();
        async move {
            tracing::debug!(url = %url, "[Rpc] Sending search request");
            let response = client
                .get(&url)
                .send()
                .await
                .map_err(|e| SearchError::Transport(format!("Network error: {e}")))?;
            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| SearchError::Transport(format!("Failed to read response: {e}")))?;
            tracing::debug!(
                status = status.as_u16(),
                bytes = body.len(),
                "[Rpc] Search response received"
            );
            // Error envelopes can arrive with a 4xx status; prefer their text.
            match parse_search_response(&body) {
                Err(SearchError::Endpoint(msg)) => Err(SearchError::Endpoint(msg)),
                _ if !status.is_success() => {
                    Err(SearchError::Transport(format!("HTTP status {status}")))
                }
                other => other,
            }
        }
    }
}

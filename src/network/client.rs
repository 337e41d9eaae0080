use log::{debug, warn};
use reqwest::Client;
use std::time::Duration;

use super::PeerChain;
use crate::error::LedgerError;

/// HTTP client used to pull peer chains.
pub fn build_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            warn!(
                "CONSENSUS - peer client without {:?} timeout: {}",
                timeout, e
            );
            Client::new()
        })
}

/// `GET http://{peer}/chain`.
pub async fn fetch_chain(client: &Client, peer: &str) -> Result<PeerChain, LedgerError> {
    let url = format!("http://{peer}/chain");
    debug!("CONSENSUS - fetching {}", url);

    let resp = client
        .get(&url)
        .send()
        .await
        .map_err(|e| LedgerError::PeerUnreachable {
            peer: peer.to_string(),
            reason: e.to_string(),
        })?;

    if !resp.status().is_success() {
        return Err(LedgerError::PeerError {
            peer: peer.to_string(),
            reason: format!("status {}", resp.status()),
        });
    }

    resp.json::<PeerChain>()
        .await
        .map_err(|e| LedgerError::PeerError {
            peer: peer.to_string(),
            reason: e.to_string(),
        })
}

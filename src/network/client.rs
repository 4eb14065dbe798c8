//! HTTP access - executes the page fetch and the reachability probes

use std::time::Instant;

use tokio::sync::{mpsc, oneshot};
use tokio::time::MissedTickBehavior;

use crate::constants::{POLL_INTERVAL, PROBE_TIMEOUT, PROBE_URL, SHELL_URL};
use crate::messages::NetworkResponse;

/// Create an HTTP client with default configuration
pub fn create_client() -> reqwest::Client {
    use std::time::Duration;

    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Fetch the shell page once and report the outcome
///
/// Any HTTP status is a completed load (the page decides what it shows);
/// only transport failures count as a failed load.
pub async fn fetch_page(client: &reqwest::Client, fetch_id: u64) -> NetworkResponse {
    let start = Instant::now();
    let result = client.get(SHELL_URL).send().await;
    let elapsed = start.elapsed().as_millis() as u64;

    match result {
        Ok(resp) => {
            let status = resp.status().as_u16();
            match resp.text().await {
                Ok(body) => NetworkResponse::ContentLoaded {
                    id: fetch_id,
                    status,
                    body,
                    time_ms: elapsed,
                },
                Err(e) => NetworkResponse::ContentFailed {
                    id: fetch_id,
                    message: format!("Error reading body: {}", e),
                    time_ms: elapsed,
                },
            }
        }
        Err(e) => {
            let msg = if e.is_timeout() {
                "Request timed out (30s)".to_string()
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                format!("Request failed: {}", e)
            };
            NetworkResponse::ContentFailed {
                id: fetch_id,
                message: msg,
                time_ms: elapsed,
            }
        }
    }
}

/// Ask whether the page origin is reachable right now
///
/// Any HTTP response counts as reachable; only transport failures count
/// against the link. The query itself never surfaces an error.
pub async fn probe_reachability(client: &reqwest::Client) -> bool {
    client
        .head(PROBE_URL)
        .timeout(PROBE_TIMEOUT)
        .send()
        .await
        .is_ok()
}

/// Probe reachability on a fixed period until cancelled
pub async fn poll_reachability(
    client: reqwest::Client,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    mut cancel_rx: oneshot::Receiver<()>,
) {
    let mut ticker = tokio::time::interval(POLL_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;

            _ = &mut cancel_rx => {
                tracing::info!("Reachability poll cancelled");
                return;
            }
            _ = ticker.tick() => {
                let reachable = probe_reachability(&client).await;
                tracing::debug!(reachable, "Reachability probe");
                if response_tx.send(NetworkResponse::Connectivity { reachable }).is_err() {
                    return;
                }
            }
        }
    }
}

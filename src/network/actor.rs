//! Network actor - runs the reachability poll and page fetches in the
//! Tokio async runtime

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::{create_client, fetch_page, poll_reachability, probe_reachability};

/// Network actor that services fetch and probe commands
pub struct NetworkActor {
    client: reqwest::Client,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    tasks: JoinSet<()>,
    poll_cancel: Option<oneshot::Sender<()>>,
}

impl NetworkActor {
    pub fn new(response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client: create_client(),
            response_tx,
            tasks: JoinSet::new(),
            poll_cancel: None,
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        // The reachability poll runs for the life of the actor
        let (cancel_tx, cancel_rx) = oneshot::channel();
        self.poll_cancel = Some(cancel_tx);
        self.tasks.spawn(poll_reachability(
            self.client.clone(),
            self.response_tx.clone(),
            cancel_rx,
        ));

        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::FetchContent { id }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            self.tasks.spawn(async move {
                                tracing::info!(id, "Fetching page");
                                let result = fetch_page(&client, id).await;
                                tracing::info!(id = ?result.fetch_id(), "Fetch completed");
                                let _ = response_tx.send(result);
                            });
                        }

                        Some(NetworkCommand::ProbeNow) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            self.tasks.spawn(async move {
                                let reachable = probe_reachability(&client).await;
                                tracing::info!(reachable, "On-demand reachability probe");
                                let _ = response_tx.send(NetworkResponse::Connectivity { reachable });
                            });
                        }

                        Some(NetworkCommand::Shutdown) => {
                            // Stop the poll so no tick fires after teardown
                            if let Some(cancel) = self.poll_cancel.take() {
                                let _ = cancel.send(());
                            }
                            break;
                        }

                        None => break,
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.tasks.join_next() => {}
            }
        }
    }
}

//! Background bridge between the async client and the synchronous UI loop.
//!
//! The UI never blocks on the network. Commands go through a channel to a
//! dispatcher task, which spawns one task per request, so overlapping calls
//! are allowed. Every request carries a sequence number and its response
//! carries the same number back; the app discards any response older than
//! the newest request of its kind, so a slow response can never overwrite a
//! newer result.

use tokio::sync::mpsc;

use super::error::ClientError;
use super::VitalsClient;
use crate::data::{VitalsReading, VitalsReport};

/// A request for the client worker.
#[derive(Debug)]
pub enum ClientCommand {
    /// Publish a single reading.
    Submit { seq: u64, reading: VitalsReading },
    /// Parse and publish a batch from raw text.
    SubmitBatch { seq: u64, raw: String },
    /// Fetch the latest report.
    Fetch { seq: u64, months_back: u32 },
}

/// The outcome of a worker request, tagged with its sequence number.
#[derive(Debug)]
pub enum ClientResponse {
    /// Outcome of a submit or batch submit; the count is readings published.
    Submitted { seq: u64, outcome: Result<usize, ClientError> },
    /// Outcome of a fetch.
    Fetched { seq: u64, outcome: Result<VitalsReport, ClientError> },
}

/// Sending half used by the app to dispatch requests.
///
/// Sends never block; if the worker is gone the command is dropped and the
/// operation simply never resolves, which the UI already tolerates.
#[derive(Debug, Clone)]
pub struct ClientHandle {
    tx: mpsc::UnboundedSender<ClientCommand>,
}

impl ClientHandle {
    pub(crate) fn new(tx: mpsc::UnboundedSender<ClientCommand>) -> Self {
        Self { tx }
    }

    pub fn submit(&self, seq: u64, reading: VitalsReading) {
        let _ = self.tx.send(ClientCommand::Submit { seq, reading });
    }

    pub fn submit_batch(&self, seq: u64, raw: String) {
        let _ = self.tx.send(ClientCommand::SubmitBatch { seq, raw });
    }

    pub fn fetch(&self, seq: u64, months_back: u32) {
        let _ = self.tx.send(ClientCommand::Fetch { seq, months_back });
    }
}

/// Receiving half polled by the UI loop.
#[derive(Debug)]
pub struct ResponseFeed {
    rx: mpsc::UnboundedReceiver<ClientResponse>,
}

impl ResponseFeed {
    pub(crate) fn new(rx: mpsc::UnboundedReceiver<ClientResponse>) -> Self {
        Self { rx }
    }

    /// Take the next response if one is ready. Non-blocking.
    pub fn poll(&mut self) -> Option<ClientResponse> {
        self.rx.try_recv().ok()
    }
}

/// Spawn the worker onto the current tokio runtime.
///
/// Must be called from within a runtime context; the runtime has to outlive
/// the UI loop for in-flight requests to resolve.
pub fn spawn(client: VitalsClient) -> (ClientHandle, ResponseFeed) {
    let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel::<ClientCommand>();
    let (resp_tx, resp_rx) = mpsc::unbounded_channel::<ClientResponse>();

    tokio::spawn(async move {
        while let Some(command) = cmd_rx.recv().await {
            let client = client.clone();
            let resp_tx = resp_tx.clone();
            tokio::spawn(async move {
                let response = run_command(&client, command).await;
                let _ = resp_tx.send(response);
            });
        }
    });

    (ClientHandle::new(cmd_tx), ResponseFeed::new(resp_rx))
}

async fn run_command(client: &VitalsClient, command: ClientCommand) -> ClientResponse {
    match command {
        ClientCommand::Submit { seq, reading } => {
            let outcome = client.submit(&reading).await.map(|_| 1);
            if let Err(e) = &outcome {
                tracing::warn!(error = %e, seq, "publish failed");
            }
            ClientResponse::Submitted { seq, outcome }
        }
        ClientCommand::SubmitBatch { seq, raw } => {
            let outcome = client.submit_batch(&raw).await;
            if let Err(e) = &outcome {
                tracing::warn!(error = %e, seq, "batch publish failed");
            }
            ClientResponse::Submitted { seq, outcome }
        }
        ClientCommand::Fetch { seq, months_back } => {
            let outcome = client.fetch_latest(months_back).await;
            if let Err(e) = &outcome {
                tracing::warn!(error = %e, seq, "fetch failed");
            }
            ClientResponse::Fetched { seq, outcome }
        }
    }
}

use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use sov_election::{CallMessage, Candidate};
use sov_modules_api::default_context::DefaultContext;
use sov_modules_api::Address;
use tokio::sync::broadcast::error::TryRecvError;

use crate::Sequencer;

/// A call together with its sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Address the call is applied on behalf of.
    pub sender: Address,
    /// The call itself.
    pub call: CallMessage<DefaultContext>,
}

/// Outcome of a batch of transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Phase after the last transaction.
    pub phase: String,
    /// Number of transactions the election accepted.
    pub accepted: usize,
    /// Number of transactions the election rejected.
    pub rejected: usize,
    /// Number of accepted votes.
    pub number_of_votes: u64,
    /// Every candidate with its tally, in id order.
    pub tallies: Vec<Candidate>,
}

/// Reads a JSON array of transactions.
pub fn read_transactions<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Transaction>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

impl Sequencer {
    /// Applies `txs` in order and reports the resulting state.
    /// Rejected transactions are counted and skipped.
    pub async fn run_batch(&self, txs: Vec<Transaction>) -> anyhow::Result<Report> {
        let mut events = self.subscribe();

        let (mut accepted, mut rejected) = (0, 0);
        for Transaction { sender, call } in txs {
            match self.submit(sender, call).await {
                Ok(()) => accepted += 1,
                Err(_) => rejected += 1,
            }
        }

        loop {
            match events.try_recv() {
                Ok(event) => tracing::info!(?event, "Committed event"),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Event buffer overflowed, some events were skipped")
                }
                Err(_) => break,
            }
        }

        Ok(Report {
            phase: self.phase().await.to_string(),
            accepted,
            rejected,
            number_of_votes: self.number_of_votes().await,
            tallies: self.results().await?,
        })
    }
}

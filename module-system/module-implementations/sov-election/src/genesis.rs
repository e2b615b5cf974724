use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use sov_modules_api::{Context, WorkingSet};

use super::types::{Candidate, Phase};
use super::Election;

/// Candidates seeded at genesis when the configuration lists none.
pub const DEFAULT_CANDIDATES: [&str; 2] = ["Candidate 1", "Candidate 2"];

fn default_candidates() -> Vec<String> {
    DEFAULT_CANDIDATES.iter().map(|name| name.to_string()).collect()
}

/// Initial configuration of the election.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "C::Address: Serialize + serde::de::DeserializeOwned")]
pub struct ElectionConfig<C: Context> {
    /// The admin for the whole lifetime of the election.
    pub admin: C::Address,
    /// Candidates registered at ids `0..n`, in order.
    #[serde(default = "default_candidates")]
    pub candidates: Vec<String>,
}

impl<C: Context> ElectionConfig<C> {
    /// Configuration with the default candidates.
    pub fn new(admin: C::Address) -> Self {
        Self {
            admin,
            candidates: default_candidates(),
        }
    }
}

impl<C: Context> Election<C> {
    pub(crate) fn init_module(
        &self,
        config: &ElectionConfig<C>,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<()> {
        ensure!(
            self.admin.get(working_set).is_none(),
            "Election is already initialized"
        );

        self.admin.set(&config.admin, working_set);
        self.phase.set(&Phase::NotStarted, working_set);
        self.voters_count.set(&0, working_set);
        self.number_of_votes.set(&0, working_set);

        for (id, name) in config.candidates.iter().enumerate() {
            self.candidates
                .push(&Candidate::new(id, name.clone()), working_set);
        }

        tracing::info!(
            admin = %config.admin,
            candidates = config.candidates.len(),
            "Election initialized"
        );
        Ok(())
    }
}

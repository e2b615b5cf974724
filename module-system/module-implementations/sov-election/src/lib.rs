//! A permissioned election.
//!
//! The admin fixed at genesis registers candidates and voters while the election has not
//! started, then opens it. Every registered voter may vote once while the election is in
//! progress. Tallies are readable by anyone at any time; no winner is computed.

#![deny(missing_docs)]

mod call;
mod error;
mod event;
mod genesis;
mod query;
#[cfg(test)]
mod tests;
mod types;

pub use call::CallMessage;
pub use error::{ElectionError, ErrorKind};
pub use event::{Event, EVENT_KEY};
pub use genesis::{ElectionConfig, DEFAULT_CANDIDATES};
use sov_modules_api::{
    Context, ModuleError, ModulePrefix, StateMap, StateValue, StateVec, WorkingSet,
};
pub use types::{Candidate, Phase, Role};
use types::Voter;

/// The election state machine.
#[derive(Clone)]
pub struct Election<C: Context> {
    /// The caller allowed to register and to move the phase forward.
    pub(crate) admin: StateValue<C::Address>,

    pub(crate) phase: StateValue<Phase>,

    /// Candidates indexed by their id.
    pub(crate) candidates: StateVec<Candidate>,

    /// Registered voters. A key is present iff the address may vote,
    /// the value records whether it already did.
    pub(crate) allowed_voters: StateMap<C::Address, Voter>,

    /// Set to zero at genesis and never incremented.
    pub(crate) voters_count: StateValue<u64>,

    /// Number of accepted votes.
    pub(crate) number_of_votes: StateValue<u64>,
}

impl<C: Context> Default for Election<C> {
    fn default() -> Self {
        let prefix = |storage_name: &'static str| {
            ModulePrefix::new_storage(module_path!(), "Election", storage_name)
        };

        Self {
            admin: StateValue::new(prefix("admin").into()),
            phase: StateValue::new(prefix("phase").into()),
            candidates: StateVec::new(prefix("candidates").into()),
            allowed_voters: StateMap::new(prefix("allowed_voters").into()),
            voters_count: StateValue::new(prefix("voters_count").into()),
            number_of_votes: StateValue::new(prefix("number_of_votes").into()),
        }
    }
}

impl<C: Context> sov_modules_api::Module for Election<C> {
    type Context = C;

    type Config = ElectionConfig<C>;

    type CallMessage = CallMessage<C>;

    type Event = Event;

    fn genesis(
        &self,
        config: &Self::Config,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<(), ModuleError> {
        Ok(self.init_module(config, working_set)?)
    }

    fn call(
        &self,
        msg: Self::CallMessage,
        context: &Self::Context,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<sov_modules_api::CallResponse, ModuleError> {
        match msg {
            CallMessage::RegisterCandidate { name } => {
                Ok(self.register_candidate(name, context, working_set)?)
            }

            CallMessage::RegisterVoter(voter_address) => {
                Ok(self.register_voter(voter_address, context, working_set)?)
            }

            CallMessage::StartElection => Ok(self.start_election(context, working_set)?),

            CallMessage::EndElection => Ok(self.end_election(context, working_set)?),

            CallMessage::Vote(candidate_id) => {
                Ok(self.make_vote(candidate_id, context, working_set)?)
            }
        }
    }
}

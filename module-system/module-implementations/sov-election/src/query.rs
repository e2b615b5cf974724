//! Read-only accessors. None of them require a role and all work in every phase.

use sov_modules_api::{Context, StateVecError, WorkingSet};

use super::types::{Candidate, Phase, Role, Voter};
use super::Election;
use crate::error::ElectionError;

impl<C: Context> Election<C> {
    /// Returns the admin, or `None` before genesis.
    pub fn admin(&self, working_set: &mut WorkingSet<C::Storage>) -> Option<C::Address> {
        self.admin.get(working_set)
    }

    /// Returns the current phase.
    pub fn phase(&self, working_set: &mut WorkingSet<C::Storage>) -> Phase {
        self.phase.get(working_set).unwrap_or_default()
    }

    /// Number of registered candidates, including the ones seeded at genesis.
    pub fn candidates_count(&self, working_set: &mut WorkingSet<C::Storage>) -> usize {
        self.candidates.len(working_set)
    }

    /// Returns the name and the tally of a candidate.
    pub fn candidate(
        &self,
        candidate_id: usize,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<(String, u64), ElectionError> {
        tracing::debug!(candidate_id, "Candidate queried");

        self.candidates
            .get(candidate_id, working_set)
            .map(|candidate| (candidate.name, candidate.count))
            .ok_or_else(|| ElectionError::CandidateOutOfRange {
                candidate_id,
                candidates_count: self.candidates.len(working_set),
            })
    }

    /// Classifies `address`. The admin stays [`Role::Administrator`] even if registered as voter.
    pub fn resolve_role(
        &self,
        address: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Role {
        if self.admin.get(working_set).as_ref() == Some(address) {
            Role::Administrator
        } else if self.allowed_voters.get(address, working_set).is_some() {
            Role::AuthorizedVoter
        } else {
            Role::Unrecognized
        }
    }

    /// The stored voter counter. Registration does not increment it,
    /// so it stays at its genesis value.
    pub fn voters_count(&self, working_set: &mut WorkingSet<C::Storage>) -> u64 {
        self.voters_count.get(working_set).unwrap_or_default()
    }

    /// Number of accepted votes.
    pub fn number_of_votes(&self, working_set: &mut WorkingSet<C::Storage>) -> u64 {
        self.number_of_votes.get(working_set).unwrap_or_default()
    }

    /// Returns `true` if `address` already voted.
    pub fn has_voted(&self, address: &C::Address, working_set: &mut WorkingSet<C::Storage>) -> bool {
        self.allowed_voters.get(address, working_set) == Some(Voter::Voted)
    }

    /// All candidates with their tallies, in id order.
    pub fn results(
        &self,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<Vec<Candidate>, StateVecError> {
        self.candidates.values(working_set)
    }
}

use anyhow::{ensure, Result};
use sov_modules_api::{CallResponse, Context, WorkingSet};

use super::types::{Candidate, Phase, Voter};
use super::Election;
use crate::error::ElectionError;
use crate::event::{Event, EVENT_KEY};

/// Call actions supported by the module.
#[derive(
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
    serde::Serialize,
    serde::Deserialize,
    Debug,
    PartialEq,
    Eq,
    Clone,
)]
#[serde(bound = "C::Address: serde::Serialize + serde::de::DeserializeOwned")]
#[serde(rename_all = "snake_case")]
pub enum CallMessage<C: Context> {
    /// Appends a candidate. Admin only, before the election starts.
    RegisterCandidate {
        /// Candidate name, accepted as is.
        name: String,
    },
    /// Allows an address to vote. Admin only, before the election starts.
    RegisterVoter(C::Address),
    /// Opens the election. Admin only.
    StartElection,
    /// Closes the election. Admin only.
    EndElection,
    /// Votes for the candidate with the given id. Registered voters only, once.
    Vote(usize),
}

impl<C: Context> Election<C> {
    /// Appends a candidate. Must be called by the Admin.
    pub(crate) fn register_candidate(
        &self,
        name: String,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse> {
        self.exit_if_not_admin(context, working_set)?;
        self.exit_if_not_in_phase(Phase::NotStarted, working_set)?;

        let candidate_id = self.candidates.len(working_set);
        self.candidates
            .push(&Candidate::new(candidate_id, name), working_set);

        working_set.emit_event(EVENT_KEY, &Event::CandidateRegistered { candidate_id });
        tracing::info!(candidate_id, "Candidate registered");

        Ok(CallResponse::default())
    }

    /// Adds voter to the allow list. Must be called by the Admin.
    pub(crate) fn register_voter(
        &self,
        voter_address: C::Address,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse> {
        self.exit_if_not_admin(context, working_set)?;
        self.exit_if_voter_already_set(&voter_address, working_set)?;
        self.exit_if_not_in_phase(Phase::NotStarted, working_set)?;

        // `voters_count` is not touched by registration.
        self.allowed_voters
            .set(&voter_address, &Voter::fresh(), working_set);

        working_set.emit_event(EVENT_KEY, &Event::VoterRegistered);
        tracing::info!(voter = %voter_address, "Voter registered");

        Ok(CallResponse::default())
    }

    /// Opens the election for voting.
    pub(crate) fn start_election(
        &self,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse> {
        self.exit_if_not_admin(context, working_set)?;
        self.exit_if_not_in_phase(Phase::NotStarted, working_set)?;

        self.phase.set(&Phase::InProgress, working_set);

        working_set.emit_event(EVENT_KEY, &Event::ElectionStarted);
        tracing::info!("Election started");

        Ok(CallResponse::default())
    }

    /// Closes the election. Tallies stay readable.
    pub(crate) fn end_election(
        &self,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse> {
        self.exit_if_not_admin(context, working_set)?;
        self.exit_if_not_in_phase(Phase::InProgress, working_set)?;

        self.phase.set(&Phase::Ended, working_set);

        working_set.emit_event(EVENT_KEY, &Event::ElectionEnded);
        tracing::info!("Election ended");

        Ok(CallResponse::default())
    }

    /// Votes for a candidate. Must be called by a registered Voter.
    pub(crate) fn make_vote(
        &self,
        candidate_id: usize,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<CallResponse> {
        self.exit_if_not_in_phase(Phase::InProgress, working_set)?;

        let voter = self
            .allowed_voters
            .get(context.sender(), working_set)
            .ok_or(ElectionError::NotEligible)?;

        ensure!(voter == Voter::Fresh, ElectionError::AlreadyVoted);

        let mut candidate =
            self.candidates
                .get(candidate_id, working_set)
                .ok_or_else(|| ElectionError::CandidateOutOfRange {
                    candidate_id,
                    candidates_count: self.candidates.len(working_set),
                })?;

        candidate.count = candidate
            .count
            .checked_add(1)
            .ok_or(ElectionError::CountOverflow)?;

        let number_of_votes = self
            .number_of_votes
            .get(working_set)
            .unwrap_or_default()
            .checked_add(1)
            .ok_or(ElectionError::CountOverflow)?;

        // Checks are done, writes start here.
        self.candidates.set(candidate_id, &candidate, working_set)?;
        self.allowed_voters
            .set(context.sender(), &Voter::voted(), working_set);
        self.number_of_votes.set(&number_of_votes, working_set);

        working_set.emit_event(EVENT_KEY, &Event::Voted { candidate_id });
        tracing::info!(candidate_id, "Vote accepted");

        Ok(CallResponse::default())
    }

    fn exit_if_not_admin(
        &self,
        context: &C,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<()> {
        let admin = self.admin.get_or_err(working_set)?;

        ensure!(&admin == context.sender(), ElectionError::NotAdmin);
        Ok(())
    }

    fn exit_if_not_in_phase(
        &self,
        expected: Phase,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<()> {
        let actual = self.phase.get_or_err(working_set)?;

        ensure!(
            actual == expected,
            ElectionError::WrongPhase { expected, actual }
        );
        Ok(())
    }

    fn exit_if_voter_already_set(
        &self,
        voter_address: &C::Address,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<()> {
        ensure!(
            self.allowed_voters
                .get(voter_address, working_set)
                .is_none(),
            ElectionError::VoterAlreadyRegistered
        );
        Ok(())
    }
}

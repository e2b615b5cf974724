use thiserror::Error;

use crate::types::Phase;

/// Reasons a call to the election is rejected. A rejected call changes nothing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ElectionError {
    /// The caller is not the admin.
    #[error("Only admin can trigger this action.")]
    NotAdmin,
    /// The caller was never registered as a voter.
    #[error("Only registered voters can vote.")]
    NotEligible,
    /// The election is not in the phase the operation requires.
    #[error("Election is {actual}, this action requires it to be {expected}.")]
    WrongPhase {
        /// Phase the operation requires.
        expected: Phase,
        /// Phase the election is in.
        actual: Phase,
    },
    /// The voter is already registered.
    #[error("Voter already has the right to vote.")]
    VoterAlreadyRegistered,
    /// The voter already voted.
    #[error("Voter tried voting a second time!")]
    AlreadyVoted,
    /// No candidate has this id.
    #[error("Candidate {candidate_id} doesn't exist, there are {candidates_count} candidates.")]
    CandidateOutOfRange {
        /// Requested id.
        candidate_id: usize,
        /// Current number of candidates.
        candidates_count: usize,
    },
    /// A counter would exceed `u64::MAX`.
    #[error("Vote count overflow")]
    CountOverflow,
}

/// Coarse classification of an [`ElectionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller does not hold the required role.
    Authorization,
    /// The operation does not fit the current state.
    State,
    /// A candidate id is out of bounds.
    Range,
}

impl ElectionError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ElectionError::NotAdmin | ElectionError::NotEligible => ErrorKind::Authorization,
            ElectionError::WrongPhase { .. }
            | ElectionError::VoterAlreadyRegistered
            | ElectionError::AlreadyVoted
            | ElectionError::CountOverflow => ErrorKind::State,
            ElectionError::CandidateOutOfRange { .. } => ErrorKind::Range,
        }
    }
}

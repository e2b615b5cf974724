use std::fmt;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// A registered candidate and its tally.
#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize, Debug, Eq, PartialEq, Clone)]
pub struct Candidate {
    /// Position of the candidate in registration order.
    pub id: usize,
    /// Name given at registration, not validated.
    pub name: String,
    /// Number of accepted votes.
    pub count: u64,
}

impl Candidate {
    pub(crate) fn new(id: usize, name: String) -> Self {
        Self { id, name, count: 0 }
    }
}

/// Lifecycle stage of the election. Only ever moves `NotStarted -> InProgress -> Ended`.
#[derive(
    BorshDeserialize,
    BorshSerialize,
    Serialize,
    Deserialize,
    Debug,
    Default,
    Eq,
    PartialEq,
    Clone,
    Copy,
)]
pub enum Phase {
    /// Candidates and voters can be registered.
    #[default]
    NotStarted,
    /// Registered voters can vote.
    InProgress,
    /// Terminal, read-only.
    Ended,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = match self {
            Phase::NotStarted => "not started",
            Phase::InProgress => "in progress",
            Phase::Ended => "ended",
        };
        f.write_str(phase)
    }
}

/// Classification of an address with respect to the election.
#[derive(Serialize, Deserialize, Debug, Eq, PartialEq, Clone, Copy)]
pub enum Role {
    /// The address is the admin.
    Administrator,
    /// The address was registered as a voter.
    AuthorizedVoter,
    /// Anyone else.
    Unrecognized,
}

/// Represents a voter.
#[derive(BorshDeserialize, BorshSerialize, Debug, Eq, PartialEq, Clone)]
pub(crate) enum Voter {
    Fresh,
    Voted,
}

impl Voter {
    pub(crate) fn fresh() -> Self {
        Self::Fresh
    }

    pub(crate) fn voted() -> Self {
        Self::Voted
    }
}

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Key under which the election records its events in the working set.
pub const EVENT_KEY: &str = "Election";

/// Events emitted by accepted calls.
#[derive(BorshDeserialize, BorshSerialize, Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub enum Event {
    /// A candidate was appended.
    CandidateRegistered {
        /// Id of the new candidate.
        candidate_id: usize,
    },
    /// A voter was added to the allow list.
    VoterRegistered,
    /// The election moved to [`Phase::InProgress`](crate::Phase::InProgress).
    ElectionStarted,
    /// The election moved to [`Phase::Ended`](crate::Phase::Ended).
    ElectionEnded,
    /// A vote was accepted. Carries no voter identity.
    Voted {
        /// Candidate the vote went to.
        candidate_id: usize,
    },
}

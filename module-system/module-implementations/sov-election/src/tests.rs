use sov_modules_api::default_context::DefaultContext;
use sov_modules_api::{Address, Context, MemoryStorage, Module, ModuleError, WorkingSet};

use super::call::CallMessage;
use super::error::ElectionError;
use super::event::{Event, EVENT_KEY};
use super::genesis::ElectionConfig;
use super::types::{Phase, Voter};
use super::Election;

type C = DefaultContext;

const ADMIN: Address = Address::new([1; 32]);
const VOTER: Address = Address::new([2; 32]);

fn setup() -> (Election<C>, WorkingSet<MemoryStorage>) {
    let election = Election::<C>::default();
    let mut working_set = WorkingSet::new(MemoryStorage::new());
    election
        .genesis(&ElectionConfig::new(ADMIN), &mut working_set)
        .unwrap();
    (election, working_set)
}

fn election_error(err: &ModuleError) -> ElectionError {
    err.downcast_ref::<ElectionError>()
        .cloned()
        .unwrap_or_else(|| panic!("Unexpected error: {err}"))
}

#[test]
fn test_genesis_seeds_default_state() {
    let (election, mut working_set) = setup();

    assert_eq!(election.admin(&mut working_set), Some(ADMIN));
    assert_eq!(election.phase(&mut working_set), Phase::NotStarted);
    assert_eq!(election.candidates_count(&mut working_set), 2);
    assert_eq!(
        election.candidate(0, &mut working_set).unwrap(),
        ("Candidate 1".to_owned(), 0)
    );
    assert_eq!(
        election.candidate(1, &mut working_set).unwrap(),
        ("Candidate 2".to_owned(), 0)
    );
    assert_eq!(election.voters_count(&mut working_set), 0);
    assert_eq!(election.number_of_votes(&mut working_set), 0);
}

#[test]
fn test_genesis_uses_configured_candidates() {
    let election = Election::<C>::default();
    let mut working_set = WorkingSet::new(MemoryStorage::new());
    let config = ElectionConfig::<C> {
        admin: ADMIN,
        candidates: vec!["Alice".to_owned()],
    };

    election.genesis(&config, &mut working_set).unwrap();

    assert_eq!(election.candidates_count(&mut working_set), 1);
    assert_eq!(
        election.candidate(0, &mut working_set).unwrap(),
        ("Alice".to_owned(), 0)
    );
}

#[test]
fn test_genesis_accepts_empty_candidates() {
    let election = Election::<C>::default();
    let mut working_set = WorkingSet::new(MemoryStorage::new());
    let config = ElectionConfig::<C> {
        admin: ADMIN,
        candidates: Vec::new(),
    };

    election.genesis(&config, &mut working_set).unwrap();
    assert_eq!(election.candidates_count(&mut working_set), 0);

    let admin = C::new(ADMIN);
    election
        .call(CallMessage::RegisterVoter(VOTER), &admin, &mut working_set)
        .unwrap();
    election
        .call(CallMessage::StartElection, &admin, &mut working_set)
        .unwrap();

    let err = election
        .call(CallMessage::Vote(0), &C::new(VOTER), &mut working_set)
        .unwrap_err();
    assert_eq!(
        election_error(&err),
        ElectionError::CandidateOutOfRange {
            candidate_id: 0,
            candidates_count: 0,
        }
    );
    assert!(election.results(&mut working_set).unwrap().is_empty());
}

#[test]
fn test_genesis_runs_once() {
    let (election, mut working_set) = setup();
    let other_admin = Address::new([9; 32]);

    assert!(election
        .genesis(&ElectionConfig::new(other_admin), &mut working_set)
        .is_err());
    assert_eq!(election.admin(&mut working_set), Some(ADMIN));
}

#[test]
fn test_admin_is_checked_before_duplicate_voter() {
    let (election, mut working_set) = setup();
    let admin_context = C::new(ADMIN);

    election
        .call(CallMessage::RegisterVoter(VOTER), &admin_context, &mut working_set)
        .unwrap();

    let err = election
        .call(
            CallMessage::RegisterVoter(VOTER),
            &C::new(VOTER),
            &mut working_set,
        )
        .unwrap_err();
    assert_eq!(election_error(&err), ElectionError::NotAdmin);
}

#[test]
fn test_duplicate_voter_is_checked_before_phase() {
    let (election, mut working_set) = setup();
    let admin_context = C::new(ADMIN);

    election
        .call(CallMessage::RegisterVoter(VOTER), &admin_context, &mut working_set)
        .unwrap();
    election
        .call(CallMessage::StartElection, &admin_context, &mut working_set)
        .unwrap();

    let err = election
        .call(CallMessage::RegisterVoter(VOTER), &admin_context, &mut working_set)
        .unwrap_err();
    assert_eq!(election_error(&err), ElectionError::VoterAlreadyRegistered);

    let err = election
        .call(
            CallMessage::RegisterVoter(Address::new([3; 32])),
            &admin_context,
            &mut working_set,
        )
        .unwrap_err();
    assert_eq!(
        election_error(&err),
        ElectionError::WrongPhase {
            expected: Phase::NotStarted,
            actual: Phase::InProgress,
        }
    );
}

#[test]
fn test_registration_does_not_touch_voters_count() {
    let (election, mut working_set) = setup();

    election
        .call(
            CallMessage::RegisterVoter(VOTER),
            &C::new(ADMIN),
            &mut working_set,
        )
        .unwrap();

    assert_eq!(election.voters_count(&mut working_set), 0);
    assert_eq!(
        election.allowed_voters.get(&VOTER, &mut working_set),
        Some(Voter::Fresh)
    );
}

#[test]
fn test_vote_phase_is_checked_before_eligibility() {
    let (election, mut working_set) = setup();

    let err = election
        .call(CallMessage::Vote(0), &C::new(VOTER), &mut working_set)
        .unwrap_err();
    assert_eq!(
        election_error(&err),
        ElectionError::WrongPhase {
            expected: Phase::InProgress,
            actual: Phase::NotStarted,
        }
    );
}

#[test]
fn test_vote_overflow_leaves_state_untouched() {
    let (election, mut working_set) = setup();
    let admin_context = C::new(ADMIN);

    election
        .call(CallMessage::RegisterVoter(VOTER), &admin_context, &mut working_set)
        .unwrap();
    election
        .call(CallMessage::StartElection, &admin_context, &mut working_set)
        .unwrap();
    election.number_of_votes.set(&u64::MAX, &mut working_set);

    let err = election
        .call(CallMessage::Vote(0), &C::new(VOTER), &mut working_set)
        .unwrap_err();

    assert_eq!(election_error(&err), ElectionError::CountOverflow);
    assert_eq!(election.candidate(0, &mut working_set).unwrap().1, 0);
    assert!(!election.has_voted(&VOTER, &mut working_set));
}

#[test]
fn test_accepted_calls_emit_events() {
    let (election, mut working_set) = setup();
    let admin_context = C::new(ADMIN);

    let calls = vec![
        CallMessage::RegisterCandidate {
            name: "Candidate 3".to_owned(),
        },
        CallMessage::RegisterVoter(VOTER),
        CallMessage::StartElection,
    ];
    for call in calls {
        election
            .call(call, &admin_context, &mut working_set)
            .unwrap();
    }
    election
        .call(CallMessage::Vote(2), &C::new(VOTER), &mut working_set)
        .unwrap();
    election
        .call(CallMessage::EndElection, &admin_context, &mut working_set)
        .unwrap();

    let events = working_set
        .take_events()
        .iter()
        .filter(|event| event.key().inner() == EVENT_KEY.as_bytes())
        .map(|event| event.decode_value::<Event>().unwrap())
        .collect::<Vec<_>>();

    assert_eq!(
        events,
        vec![
            Event::CandidateRegistered { candidate_id: 2 },
            Event::VoterRegistered,
            Event::ElectionStarted,
            Event::Voted { candidate_id: 2 },
            Event::ElectionEnded,
        ]
    );
}

#[test]
fn test_call_message_json() {
    let json = serde_json::to_string(&CallMessage::<C>::Vote(1)).unwrap();
    assert_eq!(json, r#"{"vote":1}"#);

    let message: CallMessage<C> =
        serde_json::from_str(r#"{"register_candidate":{"name":"Carol"}}"#).unwrap();
    assert_eq!(
        message,
        CallMessage::RegisterCandidate {
            name: "Carol".to_owned()
        }
    );

    let message: CallMessage<C> = serde_json::from_str(r#""start_election""#).unwrap();
    assert_eq!(message, CallMessage::StartElection);
}

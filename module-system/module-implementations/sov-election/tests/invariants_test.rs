use helpers::{generate_address, ElectionHarness};
use proptest::prelude::*;
use sov_election::{CallMessage, Phase, Role};
use sov_modules_api::Address;

mod helpers;

const ACTORS: usize = 4;

#[derive(Debug, Clone)]
enum Op {
    RegisterCandidate { by_admin: bool },
    RegisterVoter { by_admin: bool, voter: usize },
    Start { by_admin: bool },
    End { by_admin: bool },
    Vote { voter: usize, candidate_id: usize },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<bool>().prop_map(|by_admin| Op::RegisterCandidate { by_admin }),
        (any::<bool>(), 0..ACTORS).prop_map(|(by_admin, voter)| Op::RegisterVoter { by_admin, voter }),
        any::<bool>().prop_map(|by_admin| Op::Start { by_admin }),
        any::<bool>().prop_map(|by_admin| Op::End { by_admin }),
        (0..ACTORS, 0usize..5).prop_map(|(voter, candidate_id)| Op::Vote { voter, candidate_id }),
    ]
}

fn actor(index: usize) -> Address {
    generate_address(&format!("actor_{index}"))
}

/// Everything a rejected call must leave untouched.
#[derive(Debug, PartialEq)]
struct Snapshot {
    phase: Phase,
    candidates_count: usize,
    tallies: Vec<(String, u64)>,
    number_of_votes: u64,
    actors: Vec<(Role, bool)>,
}

fn snapshot(harness: &mut ElectionHarness) -> Snapshot {
    let tallies = harness.tallies();
    harness.query(|election, ws| Snapshot {
        phase: election.phase(ws),
        candidates_count: election.candidates_count(ws),
        tallies,
        number_of_votes: election.number_of_votes(ws),
        actors: (0..ACTORS)
            .map(|index| {
                let address = actor(index);
                (election.resolve_role(&address, ws), election.has_voted(&address, ws))
            })
            .collect(),
    })
}

fn phase_rank(phase: Phase) -> u8 {
    match phase {
        Phase::NotStarted => 0,
        Phase::InProgress => 1,
        Phase::Ended => 2,
    }
}

proptest! {
    #[test]
    fn tallies_match_cast_votes(ops in proptest::collection::vec(op_strategy(), 0..64)) {
        let mut harness = ElectionHarness::new();
        let admin = harness.admin;
        let stranger = generate_address("stranger");
        let caller = |by_admin: bool| if by_admin { admin } else { stranger };

        let mut phase = Phase::NotStarted;
        let mut candidates_count = 2;

        for op in ops {
            let (sender, message) = match op {
                Op::RegisterCandidate { by_admin } => (
                    caller(by_admin),
                    CallMessage::RegisterCandidate { name: format!("Candidate {}", candidates_count + 1) },
                ),
                Op::RegisterVoter { by_admin, voter } => {
                    (caller(by_admin), CallMessage::RegisterVoter(actor(voter)))
                }
                Op::Start { by_admin } => (caller(by_admin), CallMessage::StartElection),
                Op::End { by_admin } => (caller(by_admin), CallMessage::EndElection),
                Op::Vote { voter, candidate_id } => (actor(voter), CallMessage::Vote(candidate_id)),
            };
            let before = snapshot(&mut harness);
            let accepted = harness.execute(sender, message).is_ok();

            if !accepted {
                prop_assert_eq!(snapshot(&mut harness), before);
            }

            let tallies = harness.tallies();
            let total: u64 = tallies.iter().map(|(_, count)| count).sum();
            let voted = (0..ACTORS)
                .filter(|index| harness.query(|election, ws| election.has_voted(&actor(*index), ws)))
                .count() as u64;
            prop_assert_eq!(total, voted);
            prop_assert_eq!(total, harness.query(|election, ws| election.number_of_votes(ws)));

            let next_phase = harness.query(|election, ws| election.phase(ws));
            let step = phase_rank(next_phase).checked_sub(phase_rank(phase));
            prop_assert!(matches!(step, Some(0) | Some(1)));
            phase = next_phase;

            candidates_count = tallies.len();
            prop_assert_eq!(candidates_count, harness.query(|election, ws| election.candidates_count(ws)));
        }
    }
}

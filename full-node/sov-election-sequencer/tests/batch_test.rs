use std::io::Write;

use sov_election::Candidate;
use sov_election_sequencer::{from_toml_path, read_transactions, Report, Sequencer, SequencerConfig};
use sov_modules_api::Address;
use tempfile::NamedTempFile;

fn write_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn batch_from_files_reports_tallies() {
    let admin = Address::from([11; 32]);
    let alice = Address::from([21; 32]);
    let bob = Address::from([22; 32]);

    let config = write_file(&format!(
        r#"
        [election]
        admin = "{admin}"
        candidates = ["Alice", "Bob"]
    "#
    ));
    let txs = write_file(&format!(
        r#"[
            {{ "sender": "{admin}", "call": {{ "register_voter": "{alice}" }} }},
            {{ "sender": "{admin}", "call": {{ "register_voter": "{bob}" }} }},
            {{ "sender": "{alice}", "call": "start_election" }},
            {{ "sender": "{admin}", "call": "start_election" }},
            {{ "sender": "{alice}", "call": {{ "vote": 1 }} }},
            {{ "sender": "{alice}", "call": {{ "vote": 0 }} }},
            {{ "sender": "{bob}", "call": {{ "vote": 1 }} }},
            {{ "sender": "{admin}", "call": "end_election" }}
        ]"#
    ));

    let config: SequencerConfig = from_toml_path(config.path()).unwrap();
    let txs = read_transactions(txs.path()).unwrap();

    let sequencer = Sequencer::new(&config).unwrap();
    let report = sequencer.run_batch(txs).await.unwrap();

    assert_eq!(
        report,
        Report {
            phase: "ended".to_owned(),
            accepted: 6,
            rejected: 2,
            number_of_votes: 2,
            tallies: vec![
                Candidate {
                    id: 0,
                    name: "Alice".to_owned(),
                    count: 0,
                },
                Candidate {
                    id: 1,
                    name: "Bob".to_owned(),
                    count: 2,
                },
            ],
        }
    );
}

#[tokio::test]
async fn empty_batch_reports_genesis_state() {
    let admin = Address::from([11; 32]);
    let config = write_file(&format!(
        r#"
        [election]
        admin = "{admin}"
    "#
    ));

    let config: SequencerConfig = from_toml_path(config.path()).unwrap();
    let sequencer = Sequencer::new(&config).unwrap();
    let report = sequencer.run_batch(Vec::new()).await.unwrap();

    assert_eq!(report.phase, "not started");
    assert_eq!((report.accepted, report.rejected), (0, 0));
    assert_eq!(report.number_of_votes, 0);
    assert_eq!(report.tallies.len(), 2);
    assert!(report.tallies.iter().all(|candidate| candidate.count == 0));
}

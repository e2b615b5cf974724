#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

mod batch;
mod config;

pub use batch::{read_transactions, Report, Transaction};
pub use config::{from_toml_path, SequencerConfig};
use sov_election::{Candidate, CallMessage, Election, ElectionError, Event, Phase, Role, EVENT_KEY};
use sov_modules_api::default_context::DefaultContext;
use sov_modules_api::{
    Address, Context, MemoryStorage, Module, ModuleError, StateVecError, Storage, WorkingSet,
};
use tokio::sync::{broadcast, Mutex};

type C = DefaultContext;

struct ElectionState {
    election: Election<C>,
    storage: MemoryStorage,
}

/// Hosts a single election and applies calls to it one at a time.
///
/// Every call runs on its own working set: its writes are committed to the storage when it
/// succeeds and dropped when it fails. Events of committed calls are then published to
/// subscribers, in commit order.
pub struct Sequencer {
    state: Mutex<ElectionState>,
    events_sender: broadcast::Sender<Event>,
}

impl Sequencer {
    /// Runs genesis of the election and commits it.
    pub fn new(config: &SequencerConfig) -> anyhow::Result<Self> {
        let election = Election::<C>::default();
        let storage = MemoryStorage::new();

        let mut working_set = WorkingSet::new(storage.clone());
        election.genesis(&config.election, &mut working_set)?;
        storage.commit(&working_set.checkpoint().freeze());

        let (events_sender, _) = broadcast::channel(config.events_channel_capacity.get());

        Ok(Self {
            state: Mutex::new(ElectionState { election, storage }),
            events_sender,
        })
    }

    /// Subscribes to events of committed calls.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events_sender.subscribe()
    }

    /// Applies `message` on behalf of `sender`. A rejected call leaves no trace.
    pub async fn submit(&self, sender: Address, message: CallMessage<C>) -> Result<(), ModuleError> {
        let state = self.state.lock().await;
        let mut working_set = WorkingSet::new(state.storage.clone());

        tracing::debug!(%sender, ?message, "Applying call");
        if let Err(e) = state
            .election
            .call(message, &C::new(sender), &mut working_set)
        {
            tracing::warn!(%sender, error = %e, "Call rejected");
            working_set.revert();
            return Err(e);
        }

        let events = working_set.take_events();
        state.storage.commit(&working_set.checkpoint().freeze());

        for event in events
            .iter()
            .filter(|event| event.key().inner() == EVENT_KEY.as_bytes())
        {
            match event.decode_value::<Event>() {
                Ok(event) => self.publish(event),
                Err(e) => tracing::error!(error = %e, "Unable to decode committed event"),
            }
        }

        Ok(())
    }

    fn publish(&self, event: Event) {
        // Sending only fails when nobody is subscribed.
        if self.events_sender.send(event).is_err() {
            tracing::trace!("No event subscribers");
        }
    }

    async fn query<T>(&self, f: impl FnOnce(&Election<C>, &mut WorkingSet<MemoryStorage>) -> T) -> T {
        let state = self.state.lock().await;
        let mut working_set = WorkingSet::new(state.storage.clone());
        f(&state.election, &mut working_set)
    }

    /// See [`Election::admin`].
    pub async fn admin(&self) -> Option<Address> {
        self.query(|election, ws| election.admin(ws)).await
    }

    /// See [`Election::phase`].
    pub async fn phase(&self) -> Phase {
        self.query(|election, ws| election.phase(ws)).await
    }

    /// See [`Election::candidates_count`].
    pub async fn candidates_count(&self) -> usize {
        self.query(|election, ws| election.candidates_count(ws)).await
    }

    /// See [`Election::candidate`].
    pub async fn candidate(&self, candidate_id: usize) -> Result<(String, u64), ElectionError> {
        self.query(|election, ws| election.candidate(candidate_id, ws))
            .await
    }

    /// See [`Election::resolve_role`].
    pub async fn resolve_role(&self, address: Address) -> Role {
        self.query(|election, ws| election.resolve_role(&address, ws))
            .await
    }

    /// See [`Election::voters_count`].
    pub async fn voters_count(&self) -> u64 {
        self.query(|election, ws| election.voters_count(ws)).await
    }

    /// See [`Election::number_of_votes`].
    pub async fn number_of_votes(&self) -> u64 {
        self.query(|election, ws| election.number_of_votes(ws)).await
    }

    /// See [`Election::has_voted`].
    pub async fn has_voted(&self, address: Address) -> bool {
        self.query(|election, ws| election.has_voted(&address, ws))
            .await
    }

    /// See [`Election::results`].
    pub async fn results(&self) -> Result<Vec<Candidate>, StateVecError> {
        self.query(|election, ws| election.results(ws)).await
    }
}

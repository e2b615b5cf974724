use sov_election::{Election, ElectionConfig, ElectionError};
use sov_modules_api::default_context::DefaultContext;
use sov_modules_api::{
    Address, Context, MemoryStorage, Module, ModuleError, StateCheckpoint, WorkingSet,
};

pub type C = DefaultContext;

pub fn generate_address(key: &str) -> Address {
    let mut addr = [0u8; 32];
    for (byte, key_byte) in addr.iter_mut().zip(key.bytes()) {
        *byte = key_byte;
    }
    Address::from(addr)
}

/// Runs every call on its own revertable working set, the way a host does:
/// accepted calls are checkpointed, rejected ones reverted.
pub struct ElectionHarness {
    pub election: Election<C>,
    pub admin: Address,
    checkpoint: Option<StateCheckpoint<MemoryStorage>>,
}

impl ElectionHarness {
    pub fn new() -> Self {
        Self::with_config(ElectionConfig::new(generate_address("admin")))
    }

    pub fn with_config(config: ElectionConfig<C>) -> Self {
        let election = Election::<C>::default();
        let mut working_set = WorkingSet::new(MemoryStorage::new());
        election.genesis(&config, &mut working_set).unwrap();

        Self {
            election,
            admin: config.admin,
            checkpoint: Some(working_set.checkpoint()),
        }
    }

    pub fn execute(
        &mut self,
        sender: Address,
        message: sov_election::CallMessage<C>,
    ) -> Result<(), ModuleError> {
        let mut working_set = self.take_checkpoint().to_revertable();
        let result = self.election.call(message, &C::new(sender), &mut working_set);

        self.checkpoint = Some(match result {
            Ok(_) => working_set.checkpoint(),
            Err(_) => working_set.revert(),
        });
        result.map(|_| ())
    }

    #[allow(dead_code)]
    pub fn execute_as_admin(
        &mut self,
        message: sov_election::CallMessage<C>,
    ) -> Result<(), ModuleError> {
        self.execute(self.admin, message)
    }

    pub fn query<T>(&mut self, f: impl FnOnce(&Election<C>, &mut WorkingSet<MemoryStorage>) -> T) -> T {
        let mut working_set = self.take_checkpoint().to_revertable();
        let result = f(&self.election, &mut working_set);
        self.checkpoint = Some(working_set.revert());
        result
    }

    #[allow(dead_code)]
    pub fn tallies(&mut self) -> Vec<(String, u64)> {
        self.query(|election, working_set| {
            election
                .results(working_set)
                .unwrap()
                .into_iter()
                .map(|candidate| (candidate.name, candidate.count))
                .collect()
        })
    }

    fn take_checkpoint(&mut self) -> StateCheckpoint<MemoryStorage> {
        self.checkpoint
            .take()
            .expect("Checkpoint is restored after every operation")
    }
}

#[allow(dead_code)]
pub fn election_error(err: ModuleError) -> ElectionError {
    err.downcast_ref::<ElectionError>()
        .cloned()
        .unwrap_or_else(|| panic!("Unexpected error: {err}"))
}

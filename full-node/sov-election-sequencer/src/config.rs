use std::fs::File;
use std::io::Read;
use std::num::NonZeroUsize;
use std::path::Path;

use anyhow::Context as _;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use sov_election::ElectionConfig;
use sov_modules_api::default_context::DefaultContext;

const DEFAULT_EVENTS_CHANNEL_CAPACITY: NonZeroUsize = match NonZeroUsize::new(100) {
    Some(capacity) => capacity,
    None => unreachable!(),
};

fn default_events_channel_capacity() -> NonZeroUsize {
    DEFAULT_EVENTS_CHANNEL_CAPACITY
}

/// Sequencer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SequencerConfig {
    /// Number of committed events buffered for slow subscribers. Must not be zero.
    #[serde(default = "default_events_channel_capacity")]
    pub events_channel_capacity: NonZeroUsize,
    /// Genesis configuration of the hosted election.
    pub election: ElectionConfig<DefaultContext>,
}

/// Reads a TOML file and deserializes it into `R`.
pub fn from_toml_path<P: AsRef<Path>, R: DeserializeOwned>(path: P) -> anyhow::Result<R> {
    let path = path.as_ref();
    let mut contents = String::new();
    {
        let mut file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        file.read_to_string(&mut contents)?;
    }

    let result: R = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    Ok(result)
}

mod scratchpad;
mod storage;

use std::fmt::Display;
use std::str;

use borsh::{BorshDeserialize, BorshSerialize};
pub use scratchpad::{StateCheckpoint, WorkingSet};
pub use storage::{MemoryStorage, OrderedWrites, Storage, StorageKey, StorageValue};

/// A prefix prepended to each key before insertion and retrieval from the storage.
///
/// All state containers of a module share the same working set, so every container
/// gets its own prefix to avoid key collisions.
#[derive(
    BorshDeserialize,
    BorshSerialize,
    Debug,
    PartialEq,
    Eq,
    Clone,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Prefix {
    prefix: Vec<u8>,
}

impl Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match str::from_utf8(&self.prefix) {
            Ok(s) => write!(f, "{:?}", s),
            Err(_) => write!(f, "0x{}", hex::encode(&self.prefix)),
        }
    }
}

impl Prefix {
    /// Creates a new prefix from a byte vector.
    pub fn new(prefix: Vec<u8>) -> Self {
        Self { prefix }
    }

    /// Returns the prefix bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.prefix
    }

    /// Returns the length in bytes of the prefix.
    pub fn len(&self) -> usize {
        self.prefix.len()
    }

    /// Returns `true` if the prefix is empty, `false` otherwise.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty()
    }
}

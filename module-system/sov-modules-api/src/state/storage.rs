use std::collections::BTreeMap;
use std::fmt::Display;
use std::sync::{Arc, RwLock};

use borsh::BorshSerialize;

use super::Prefix;

/// `Key` type for the [`Storage`].
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct StorageKey {
    key: Arc<Vec<u8>>,
}

impl StorageKey {
    /// Creates a new `StorageKey` that combines a prefix and a borsh encoded key.
    pub fn new<K: BorshSerialize + ?Sized>(prefix: &Prefix, key: &K) -> Self {
        let mut full_key = prefix.as_bytes().to_vec();
        key.serialize(&mut full_key)
            .unwrap_or_else(|e| panic!("Writing into a Vec cannot fail: {e:?}"));

        Self {
            key: Arc::new(full_key),
        }
    }

    /// Returns the raw key bytes.
    pub fn key(&self) -> Arc<Vec<u8>> {
        self.key.clone()
    }
}

impl AsRef<Vec<u8>> for StorageKey {
    fn as_ref(&self) -> &Vec<u8> {
        &self.key
    }
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.key.as_ref()))
    }
}

/// `Value` type for the [`Storage`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct StorageValue {
    value: Arc<Vec<u8>>,
}

impl StorageValue {
    /// Creates a new storage value holding the borsh encoding of `value`.
    pub fn new<V: BorshSerialize + ?Sized>(value: &V) -> Self {
        let mut encoded = Vec::new();
        value
            .serialize(&mut encoded)
            .unwrap_or_else(|e| panic!("Writing into a Vec cannot fail: {e:?}"));

        Self {
            value: Arc::new(encoded),
        }
    }

    /// Returns the raw value bytes.
    pub fn value(&self) -> &[u8] {
        &self.value
    }
}

/// Writes of a frozen [`StateCheckpoint`](super::StateCheckpoint), sorted by key.
/// `None` marks a deleted key.
pub type OrderedWrites = Vec<(StorageKey, Option<StorageValue>)>;

/// An interface for the state storage underneath all working sets.
///
/// Implementations share their backing data between clones, the way a database
/// handle does.
pub trait Storage: Clone {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &StorageKey) -> Option<StorageValue>;

    /// Applies the writes atomically.
    fn commit(&self, writes: &OrderedWrites);
}

/// [`Storage`] that keeps the whole state in memory.
#[derive(Clone, Default, Debug)]
pub struct MemoryStorage {
    db: Arc<RwLock<BTreeMap<StorageKey, StorageValue>>>,
}

impl MemoryStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of keys currently stored.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` if nothing has been committed yet.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<StorageKey, StorageValue>> {
        // A poisoned lock still holds a consistent map: commits never panic half way.
        self.db.read().unwrap_or_else(|e| e.into_inner())
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &StorageKey) -> Option<StorageValue> {
        self.read().get(key).cloned()
    }

    fn commit(&self, writes: &OrderedWrites) {
        let mut db = self.db.write().unwrap_or_else(|e| e.into_inner());
        for (key, value) in writes {
            match value {
                Some(value) => db.insert(key.clone(), value.clone()),
                None => db.remove(key),
            };
        }
        tracing::debug!(writes = writes.len(), "Committed writes to storage");
    }
}

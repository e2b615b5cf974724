use std::collections::BTreeMap;
use std::fmt::Debug;
use std::mem;

use borsh::{BorshDeserialize, BorshSerialize};

use super::storage::{OrderedWrites, Storage, StorageKey, StorageValue};
use super::Prefix;
use crate::events::Event;

/// Writes accumulated on top of the underlying storage.
struct Delta<S: Storage> {
    inner: S,
    writes: BTreeMap<StorageKey, Option<StorageValue>>,
}

impl<S: Storage> Debug for Delta<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Delta")
            .field("writes", &self.writes.len())
            .finish()
    }
}

impl<S: Storage> Delta<S> {
    fn new(inner: S) -> Self {
        Self {
            inner,
            writes: Default::default(),
        }
    }

    fn get(&self, key: &StorageKey) -> Option<StorageValue> {
        match self.writes.get(key) {
            Some(value) => value.clone(),
            None => self.inner.get(key),
        }
    }

    fn freeze(&mut self) -> OrderedWrites {
        mem::take(&mut self.writes).into_iter().collect()
    }
}

/// A wrapper that adds additional writes on top of an underlying [`Delta`].
/// Dropping the wrapper discards exactly the writes of the operation that failed,
/// without touching what the delta already holds.
struct RevertableDelta<S: Storage> {
    inner: Delta<S>,
    writes: BTreeMap<StorageKey, Option<StorageValue>>,
}

impl<S: Storage> RevertableDelta<S> {
    fn get(&self, key: &StorageKey) -> Option<StorageValue> {
        match self.writes.get(key) {
            Some(value) => value.clone(),
            None => self.inner.get(key),
        }
    }

    fn set(&mut self, key: StorageKey, value: StorageValue) {
        self.writes.insert(key, Some(value));
    }

    fn delete(&mut self, key: StorageKey) {
        self.writes.insert(key, None);
    }

    fn commit(self) -> Delta<S> {
        let mut inner = self.inner;
        inner.writes.extend(self.writes);
        inner
    }

    fn revert(self) -> Delta<S> {
        self.inner
    }
}

/// Committed-so-far state layered on top of the [`Storage`].
/// Obtained from a [`WorkingSet`] by either [`WorkingSet::checkpoint`] or [`WorkingSet::revert`].
pub struct StateCheckpoint<S: Storage> {
    delta: Delta<S>,
}

impl<S: Storage> StateCheckpoint<S> {
    /// Creates an empty checkpoint over `inner`.
    pub fn new(inner: S) -> Self {
        Self {
            delta: Delta::new(inner),
        }
    }

    /// Opens a new revertable layer for the next operation.
    pub fn to_revertable(self) -> WorkingSet<S> {
        WorkingSet {
            delta: RevertableDelta {
                inner: self.delta,
                writes: Default::default(),
            },
            events: Default::default(),
        }
    }

    /// Extracts the accumulated writes, leaving the checkpoint empty.
    /// Pass them to [`Storage::commit`] to persist them.
    pub fn freeze(&mut self) -> OrderedWrites {
        self.delta.freeze()
    }
}

/// This structure contains the pending writes and the events collected during the execution of a call.
/// There are two ways to convert it into a [`StateCheckpoint`]:
/// 1. [`WorkingSet::checkpoint`], where all the changes are added to the underlying checkpoint.
/// 2. [`WorkingSet::revert`], where the pending changes and events are dropped.
pub struct WorkingSet<S: Storage> {
    delta: RevertableDelta<S>,
    events: Vec<Event>,
}

impl<S: Storage> WorkingSet<S> {
    /// Creates a new [`WorkingSet`] instance backed by the given [`Storage`].
    pub fn new(inner: S) -> Self {
        StateCheckpoint::new(inner).to_revertable()
    }

    /// Keeps the pending changes.
    pub fn checkpoint(self) -> StateCheckpoint<S> {
        StateCheckpoint {
            delta: self.delta.commit(),
        }
    }

    /// Drops the pending changes and events.
    pub fn revert(self) -> StateCheckpoint<S> {
        StateCheckpoint {
            delta: self.delta.revert(),
        }
    }

    /// Records the borsh encoded `event` under `key`.
    pub fn emit_event<E: BorshSerialize>(&mut self, key: &str, event: &E) {
        match Event::new(key, event) {
            Ok(event) => self.events.push(event),
            Err(e) => tracing::error!(key, error = %e, "Unable to encode event"),
        }
    }

    /// Extracts all events from this working set.
    pub fn take_events(&mut self) -> Vec<Event> {
        mem::take(&mut self.events)
    }

    /// Returns all events recorded so far.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub(crate) fn set_value<K, V>(&mut self, prefix: &Prefix, storage_key: &K, value: &V)
    where
        K: BorshSerialize + ?Sized,
        V: BorshSerialize,
    {
        let storage_key = StorageKey::new(prefix, storage_key);
        let storage_value = StorageValue::new(value);
        self.delta.set(storage_key, storage_value);
    }

    pub(crate) fn get_value<K, V>(&mut self, prefix: &Prefix, storage_key: &K) -> Option<V>
    where
        K: BorshSerialize + ?Sized,
        V: BorshDeserialize,
    {
        let storage_key = StorageKey::new(prefix, storage_key);
        self.get_decoded(&storage_key)
    }

    pub(crate) fn delete_value<K>(&mut self, prefix: &Prefix, storage_key: &K)
    where
        K: BorshSerialize + ?Sized,
    {
        let storage_key = StorageKey::new(prefix, storage_key);
        self.delta.delete(storage_key);
    }

    fn get_decoded<V: BorshDeserialize>(&mut self, storage_key: &StorageKey) -> Option<V> {
        let storage_value = self.delta.get(storage_key)?;

        // It is ok to panic here. Deserialization problem means that something is terribly wrong.
        Some(
            V::try_from_slice(storage_value.value())
                .unwrap_or_else(|e| panic!("Unable to deserialize storage value {e:?}")),
        )
    }
}

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// A key-value pair emitted by a module while executing a call.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct Event {
    key: EventKey,
    value: EventValue,
}

impl Event {
    /// Creates an event whose value is the borsh encoding of `value`.
    pub fn new<V: BorshSerialize>(key: &str, value: &V) -> std::io::Result<Self> {
        Ok(Self {
            key: EventKey(key.as_bytes().to_vec()),
            value: EventValue(value.try_to_vec()?),
        })
    }

    /// Returns the event key.
    pub fn key(&self) -> &EventKey {
        &self.key
    }

    /// Returns the raw event value.
    pub fn value(&self) -> &EventValue {
        &self.value
    }

    /// Decodes the event value as `V`.
    pub fn decode_value<V: BorshDeserialize>(&self) -> std::io::Result<V> {
        V::try_from_slice(&self.value.0)
    }
}

/// Key of an [`Event`], used by observers to pick the events they understand.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub struct EventKey(Vec<u8>);

impl EventKey {
    /// Returns the raw key bytes.
    pub fn inner(&self) -> &Vec<u8> {
        &self.0
    }
}

/// Borsh encoded payload of an [`Event`].
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct EventValue(Vec<u8>);

impl EventValue {
    /// Returns the raw value bytes.
    pub fn inner(&self) -> &Vec<u8> {
        &self.0
    }
}

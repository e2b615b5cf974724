//! Interfaces and state primitives of the module system.
//!
//! A module is a struct of state containers ([`StateValue`], [`StateMap`],
//! [`StateVec`]) implementing [`Module`]. Every call runs against a revertable
//! [`WorkingSet`]: the host either commits it into a [`StateCheckpoint`] or
//! reverts it, so a failed call never leaves partial writes behind.

#![deny(missing_docs)]

mod address;
mod containers;
pub mod default_context;
mod error;
mod events;
mod module;
mod prefix;
mod state;

use core::fmt::{Debug, Display};
use core::hash::Hash;
use core::str::FromStr;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use crate::address::{Address, AddressBech32};
pub use crate::containers::{
    StateMap, StateMapError, StateValue, StateValueError, StateVec, StateVecError,
};
pub use crate::error::{Bech32ParseError, ModuleError};
pub use crate::events::{Event, EventKey, EventValue};
pub use crate::module::{CallResponse, Module};
pub use crate::prefix::ModulePrefix;
pub use crate::state::{
    MemoryStorage, OrderedWrites, Prefix, StateCheckpoint, Storage, StorageKey, StorageValue,
    WorkingSet,
};

/// The `Spec` trait configures the primitives used by a particular instance of the module system.
/// It is almost always implemented on a [`Context`] object, so modules generic over a context can
/// swap their address and storage types without touching their own code.
pub trait Spec {
    /// The address type identifying callers.
    type Address: Debug
        + Display
        + Clone
        + PartialEq
        + Eq
        + Hash
        + BorshSerialize
        + BorshDeserialize
        + Serialize
        + DeserializeOwned
        + FromStr<Err = anyhow::Error>
        + Send
        + Sync
        + 'static;

    /// State storage the working sets are layered on.
    type Storage: Storage + Send + Sync;
}

/// A context contains information passed to modules during call execution.
/// Currently, the context only carries the sender of the call.
pub trait Context: Spec + Clone + Debug + PartialEq + 'static {
    /// Sender of the call.
    fn sender(&self) -> &Self::Address;

    /// Constructor for the Context.
    fn new(sender: Self::Address) -> Self;
}

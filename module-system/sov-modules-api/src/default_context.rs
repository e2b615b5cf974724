//! The context used by native hosts of the module system.

use serde::{Deserialize, Serialize};

use crate::{Address, Context, MemoryStorage, Spec};

/// Context carrying the caller address, backed by [`MemoryStorage`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultContext {
    /// The caller of the current operation.
    pub sender: Address,
}

impl Spec for DefaultContext {
    type Address = Address;
    type Storage = MemoryStorage;
}

impl Context for DefaultContext {
    fn sender(&self) -> &Self::Address {
        &self.sender
    }

    fn new(sender: Self::Address) -> Self {
        Self { sender }
    }
}

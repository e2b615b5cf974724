use core::fmt::Debug;

use borsh::{BorshDeserialize, BorshSerialize};

use crate::error::ModuleError;
use crate::state::WorkingSet;
use crate::{Context, Spec};

/// Response type for the `Module::call` method.
#[derive(Default, Debug, PartialEq, Eq)]
pub struct CallResponse {}

/// A module owns a set of state containers and mutates them only through [`Module::call`].
pub trait Module {
    /// Execution context.
    type Context: Context;

    /// Configuration for the genesis method.
    type Config;

    /// Module defined argument to the call method.
    type CallMessage: Debug;

    /// Module defined event resulting from a call method.
    type Event: Debug + BorshSerialize + BorshDeserialize;

    /// Genesis is called once when the module is deployed and sets initial state values.
    fn genesis(
        &self,
        _config: &Self::Config,
        _working_set: &mut WorkingSet<<Self::Context as Spec>::Storage>,
    ) -> Result<(), ModuleError> {
        Ok(())
    }

    /// Call allows interaction with the module and invokes state changes.
    /// It takes a module defined type and a context as parameters.
    fn call(
        &self,
        message: Self::CallMessage,
        context: &Self::Context,
        working_set: &mut WorkingSet<<Self::Context as Spec>::Storage>,
    ) -> Result<CallResponse, ModuleError>;
}

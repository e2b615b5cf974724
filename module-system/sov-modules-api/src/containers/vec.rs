use std::marker::PhantomData;

use borsh::{BorshDeserialize, BorshSerialize};
use thiserror::Error;

use crate::state::{Prefix, Storage, WorkingSet};

/// An append-friendly sequence of values addressed by position.
///
/// The length lives under index key `0` and element `i` under key `i + 1`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct StateVec<V> {
    _phantom: PhantomData<V>,
    prefix: Prefix,
}

/// Error type for `StateVec` get method.
#[derive(Debug, Error)]
pub enum Error {
    /// The index is not below the current length.
    #[error("Index out of bounds for index: {0}")]
    IndexOutOfBounds(usize),
    /// The index is in bounds but nothing is stored there.
    #[error("Value not found for prefix: {0} and index: {1}")]
    MissingValue(Prefix, usize),
}

#[derive(Debug, BorshSerialize)]
struct IndexKey(u64);

impl IndexKey {
    fn len() -> Self {
        Self(0)
    }

    fn elem(index: usize) -> Self {
        Self(index as u64 + 1)
    }
}

impl<V> StateVec<V>
where
    V: BorshSerialize + BorshDeserialize,
{
    /// Creates a new [`StateVec`] with the given prefix.
    pub fn new(prefix: Prefix) -> Self {
        Self {
            _phantom: PhantomData,
            prefix,
        }
    }

    /// Returns the prefix used when this [`StateVec`] was created.
    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    fn set_len<S: Storage>(&self, length: usize, working_set: &mut WorkingSet<S>) {
        working_set.set_value(self.prefix(), &IndexKey::len(), &(length as u64));
    }

    /// Sets a value in the [`StateVec`].
    /// If the index is out of bounds, returns an error.
    /// To push a value to the end of the StateVec, use [`StateVec::push`].
    pub fn set<S: Storage>(
        &self,
        index: usize,
        value: &V,
        working_set: &mut WorkingSet<S>,
    ) -> Result<(), Error> {
        let len = self.len(working_set);

        if index < len {
            working_set.set_value(self.prefix(), &IndexKey::elem(index), value);
            Ok(())
        } else {
            Err(Error::IndexOutOfBounds(index))
        }
    }

    /// Returns the value for the given index, or None if the index is out of bounds.
    pub fn get<S: Storage>(&self, index: usize, working_set: &mut WorkingSet<S>) -> Option<V> {
        if index < self.len(working_set) {
            working_set.get_value(self.prefix(), &IndexKey::elem(index))
        } else {
            None
        }
    }

    /// Returns the value for the given index.
    /// If the index is out of bounds, returns an error.
    /// If the value is absent, returns an error.
    pub fn get_or_err<S: Storage>(
        &self,
        index: usize,
        working_set: &mut WorkingSet<S>,
    ) -> Result<V, Error> {
        let len = self.len(working_set);

        if index < len {
            working_set
                .get_value(self.prefix(), &IndexKey::elem(index))
                .ok_or_else(|| Error::MissingValue(self.prefix().clone(), index))
        } else {
            Err(Error::IndexOutOfBounds(index))
        }
    }

    /// Returns the length of the [`StateVec`].
    pub fn len<S: Storage>(&self, working_set: &mut WorkingSet<S>) -> usize {
        working_set
            .get_value::<_, u64>(self.prefix(), &IndexKey::len())
            .unwrap_or_default() as usize
    }

    /// Pushes a value to the end of the [`StateVec`].
    pub fn push<S: Storage>(&self, value: &V, working_set: &mut WorkingSet<S>) {
        let len = self.len(working_set);

        working_set.set_value(self.prefix(), &IndexKey::elem(len), value);
        self.set_len(len + 1, working_set);
    }

    /// Collects all values in index order.
    /// If an index below the length holds no value, returns an error.
    pub fn values<S: Storage>(&self, working_set: &mut WorkingSet<S>) -> Result<Vec<V>, Error> {
        let len = self.len(working_set);

        (0..len)
            .map(|index| {
                working_set
                    .get_value(self.prefix(), &IndexKey::elem(index))
                    .ok_or_else(|| Error::MissingValue(self.prefix().clone(), index))
            })
            .collect()
    }
}

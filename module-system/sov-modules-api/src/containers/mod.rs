mod map;
mod value;
mod vec;

pub use map::{Error as StateMapError, StateMap};
pub use value::{Error as StateValueError, StateValue};
pub use vec::{Error as StateVecError, StateVec};

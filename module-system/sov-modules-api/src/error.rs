/// General error type in the Module System.
#[derive(Debug, thiserror::Error)]
pub enum ModuleError {
    /// Custom error thrown by a module.
    #[error(transparent)]
    ModuleError(#[from] anyhow::Error),
}

impl ModuleError {
    /// Returns the typed error raised by the module, if it has type `E`.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: core::fmt::Display + core::fmt::Debug + Send + Sync + 'static,
    {
        match self {
            ModuleError::ModuleError(err) => err.downcast_ref::<E>(),
        }
    }
}

/// Failure to parse a bech32 address string.
#[derive(Debug, thiserror::Error)]
pub enum Bech32ParseError {
    /// The string is not valid bech32.
    #[error("Bech32 error: {0}")]
    Bech32(#[from] bech32::Error),
    /// The human readable part is not `sov`.
    #[error("Wrong HRP: {0}")]
    WrongHRP(String),
    /// The payload does not decode to 32 bytes.
    #[error("Wrong address length: {0}, should be 32")]
    WrongLength(usize),
}

use std::collections::TryReserveError;

/// The error type for engine operations.
///
/// Every fallible operation on a [`HashEngine`][crate::HashEngine] reports
/// its outcome through this type; none of the error conditions are fatal to
/// the process. Multi-step operations (engine construction, resizing) roll
/// back fully before returning an error, leaving the engine in its prior
/// state.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineError {
    /// A caller-supplied argument was rejected before any work was done:
    /// an empty key, an empty value, a zero capacity hint, or a resize
    /// target outside the configured bucket-count bounds.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Memory for a bucket array or an entry payload could not be
    /// reserved. The operation that hit this has already been rolled back.
    #[error("memory allocation failed")]
    AllocationFailed,

    /// A probe visited every bucket without finding a reusable slot. The
    /// table is logically full of live entries and is already at its
    /// maximum bucket count, so it cannot grow to make room.
    #[error("table capacity exhausted")]
    CapacityExhausted,

    /// The key is not present in the table.
    #[error("key not found")]
    NotFound,
}

impl From<TryReserveError> for EngineError {
    fn from(_: TryReserveError) -> Self {
        Self::AllocationFailed
    }
}

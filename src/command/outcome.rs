//! Result of a host-facing operation.

use thiserror::Error;

/// Why an operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FailKind {
    /// Nothing cached and the upstream is not being queried.
    #[error("stats unavailable")]
    Unavailable,
    /// The operation aborted unexpectedly. State is unchanged.
    #[error("operation failed")]
    Internal,
}

/// Outcome of a read or stat call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// Data to hand back.
    Ok(T),
    /// Not an error, but nothing to serve (unknown or malformed name).
    Skip,
    /// The operation failed for this call only.
    Fail(FailKind),
}

impl<T> Outcome<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Ok(value) => Outcome::Ok(f(value)),
            Outcome::Skip => Outcome::Skip,
            Outcome::Fail(kind) => Outcome::Fail(kind),
        }
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Outcome::Ok(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, Outcome::Skip)
    }
}

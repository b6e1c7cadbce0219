//! Error types for windowed queries and the deque they run on.
//!
//! - [`WindowError`]: the caller passed a window that does not fit the input,
//!   or an algorithm hit an empty deque (which means an invariant broke).
//! - [`DequeError`]: a removal or peek on an empty [`Deque`](crate::deque::Deque).
//! - [`InvariantError`]: returned by the `check_*` diagnostics.

use std::fmt;

/// Error returned when a deque operation needs an element but there is none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DequeError {
    /// The named operation was called on an empty deque.
    Empty { op: &'static str },
}

impl fmt::Display for DequeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DequeError::Empty { op } => write!(f, "{op} called on an empty deque"),
        }
    }
}

impl std::error::Error for DequeError {}

/// Error returned by the windowed maximum and minimum functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowError {
    /// The input sequence has no elements, so no window exists.
    EmptyInput,
    /// The window width is zero.
    ZeroWidth,
    /// The window width is larger than the input.
    InvalidWidth { k: usize, len: usize },
    /// The algorithm read from an empty deque.
    Deque(DequeError),
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowError::EmptyInput => f.write_str("input sequence is empty"),
            WindowError::ZeroWidth => f.write_str("window width must be at least 1"),
            WindowError::InvalidWidth { k, len } => {
                write!(f, "window width k={k} must satisfy 1 <= k <= {len}")
            }
            WindowError::Deque(e) => write!(f, "monotone deque invariant broken: {e}"),
        }
    }
}

impl std::error::Error for WindowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WindowError::Deque(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DequeError> for WindowError {
    fn from(e: DequeError) -> Self {
        WindowError::Deque(e)
    }
}

/// Error returned when a monotone deque violates its ordering or window invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

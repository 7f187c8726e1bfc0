//! Errors raised by misusing a wrapper, as opposed to the business failures
//! a wrapper carries.
//!
//! A [`UsageError`] is returned immediately by the accessor that was misused
//! (for example [`Try::get_cause`](crate::Try::get_cause) on a success). It is
//! never stored as the cause of a `Try` or `AsyncTry`.

use std::fmt;

/// Which side of an [`Either`](crate::Either) was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The left side
    Left,
    /// The right side
    Right,
}

impl Side {
    /// The opposite side.
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// Contract violation when using one of the wrappers.
///
/// # Examples
///
/// ```rust
/// use tryable::{Try, UsageError};
///
/// let t = Try::<_, String>::success(1);
/// assert_eq!(t.get_cause(), Err(UsageError::CauseOfSuccess));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// Asked for the cause of a successful `Try` or `AsyncTry`.
    CauseOfSuccess,
    /// Asked for the value of an empty `Optional`.
    EmptyOptional,
    /// Asked for a side of an `Either` that is not populated.
    WrongSide {
        /// The side that was requested.
        requested: Side,
    },
    /// Construction was attempted with both parts present.
    Conflicting {
        /// Name of the container being built.
        container: &'static str,
    },
    /// Construction was attempted with neither part present.
    Missing {
        /// Name of the container being built.
        container: &'static str,
    },
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsageError::CauseOfSuccess => f.write_str("cannot get cause of a successful Try"),
            UsageError::EmptyOptional => f.write_str("cannot get value of an empty Optional"),
            UsageError::WrongSide { requested } => write!(
                f,
                "cannot get {} of a {} Either",
                requested,
                requested.opposite()
            ),
            UsageError::Conflicting { container } => {
                write!(f, "{} cannot be constructed with both parts present", container)
            }
            UsageError::Missing { container } => {
                write!(f, "{} must be constructed with exactly one part present", container)
            }
        }
    }
}

impl std::error::Error for UsageError {}

//! Error types shared across the lanesim workspace.

use std::error::Error;
use std::fmt;

/// An integer lane-change code outside `{-1, 0, 1}`.
///
/// Returned by `Direction::try_from(i32)`. Callers holding codes from
/// trusted internal logic should treat this as a programming error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirectionCodeError {
    /// The rejected code.
    pub code: i32,
}

impl fmt::Display for DirectionCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid lane-change code {}: expected -1 (right), 0 (none) or 1 (left)",
            self.code
        )
    }
}

impl Error for DirectionCodeError {}

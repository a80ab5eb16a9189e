use std::fmt;

use gridpath_core::Point;

use crate::engine::SearchStatus;

/// Errors raised by graph construction, queue access and engine stepping.
///
/// An exhausted frontier is not an error: it ends a run with
/// [`SearchStatus::Failed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The grid width or height is not positive.
    InvalidDimensions { width: i32, height: i32 },
    /// A coordinate lies outside the grid.
    OutOfBounds(Point),
    /// `step` was called while the engine was not running.
    InvalidState(SearchStatus),
    /// `dequeue` or `peek` on an empty priority queue.
    EmptyQueue,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid grid dimensions {width}x{height}")
            }
            Self::OutOfBounds(p) => write!(f, "coordinate {p} is outside the grid"),
            Self::InvalidState(status) => {
                write!(f, "search cannot step while {status}")
            }
            Self::EmptyQueue => write!(f, "priority queue is empty"),
        }
    }
}

impl std::error::Error for SearchError {}

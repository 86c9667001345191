//! Text buffer engine for zygote.
//!
//! A [`Buffer`] is a line-oriented text store addressed by index expressions
//! such as `"3.7"`, `"end"`, `"c -1"` or `"2.end +4"`. Named marks follow
//! the text they point at across every edit, and the undo/redo history merges
//! adjacent edits so that a burst of keystrokes undoes as one step.
//!
//! The buffer is safe to share between threads; every operation locks the
//! whole state for its own duration.

mod buffer;
mod history;
mod index;
mod marks;
mod position;
mod store;

pub use buffer::Buffer;
pub use position::Position;

/// Errors produced while resolving index expressions or naming marks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    /// The expression is empty or one of its words is malformed.
    #[error("Bad index: {0:?}")]
    InvalidIndex(String),

    /// The expression refers to a mark that is not set.
    #[error("Unknown mark: {0:?}")]
    UnknownMark(String),

    /// Mark names must be non-empty and free of whitespace.
    #[error("Invalid mark name: {0:?}")]
    InvalidMarkName(String),
}

/// Result type used throughout the text engine.
pub type Result<T> = std::result::Result<T, TextError>;

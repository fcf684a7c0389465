//! Line Tokenizer
//!
//! Splits a line on a separator *string* (not on the individual characters
//! of the separator). The edge-case handling is asymmetric and kept that
//! way on purpose, since existing command scripts rely on it:
//!
//! - A separator at absolute position 0 does not emit a token.
//! - Every later separator emits the span before it, even when empty.
//! - The remainder after the last separator is emitted only if non-empty.

use thiserror::Error;
use tracing::trace;

/// Separator used by the console when tokenizing input lines.
pub const TOKEN_SEPARATOR: &str = " ";

/// Errors that can occur while splitting a line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SplitError {
    /// The string to split is empty
    #[error("no string passed in")]
    EmptyInput,

    /// The separator is empty
    #[error("no separator passed in")]
    EmptySeparator,
}

/// Result type for tokenizing operations.
pub type SplitResult<T> = Result<T, SplitError>;

/// Splits `input` into tokens on every occurrence of `separator`.
///
/// The returned tokens borrow from `input`.
///
/// # Errors
///
/// Returns [`SplitError::EmptyInput`] or [`SplitError::EmptySeparator`]
/// when either argument is empty.
pub fn split<'a>(input: &'a str, separator: &str) -> SplitResult<Vec<&'a str>> {
    if input.is_empty() {
        return Err(SplitError::EmptyInput);
    }
    if separator.is_empty() {
        return Err(SplitError::EmptySeparator);
    }

    let mut tokens = Vec::new();
    let mut prev = 0;

    while let Some(offset) = input[prev..].find(separator) {
        let pos = prev + offset;
        if pos != 0 {
            tokens.push(&input[prev..pos]);
        }
        prev = pos + separator.len();
    }

    let last = &input[prev..];
    if !last.is_empty() {
        tokens.push(last);
    }

    trace!(input = input, count = tokens.len(), "Tokenized line");
    Ok(tokens)
}

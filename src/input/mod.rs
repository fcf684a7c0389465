//! Input Tokenizer Module
//!
//! Raw console lines are split into tokens before the console resolves the
//! command name and hands the remaining tokens to the argument parser.
//!
//! ## Splitting Rules
//!
//! ```text
//! "a b c"  ──>  ["a", "b", "c"]
//! " a b"   ──>  ["a", "b"]          separator at position 0 is skipped
//! "a b "   ──>  ["a", "b"]          empty remainder is dropped
//! "a  b"   ──>  ["a", "", "b"]      internal runs are NOT collapsed
//! ```
//!
//! ## Example
//!
//! ```
//! use cmdconsole::input::split;
//!
//! let tokens = split("call -b 512 host", " ").unwrap();
//! assert_eq!(tokens, vec!["call", "-b", "512", "host"]);
//! ```

pub mod tokenizer;

pub use tokenizer::{split, SplitError, SplitResult, TOKEN_SEPARATOR};

//! # cmdconsole - An Interactive Command Console
//!
//! cmdconsole hosts a fixed set of named commands behind a prompt. Each
//! command has a long name, a single-letter alias, a description and a
//! declared argument list; input lines are tokenized, resolved against the
//! registry and dispatched to the command's handler.
//!
//! ## Features
//!
//! - **Lettered Aliases**: `c 10.0.0.1` and `call 10.0.0.1` are the same command
//! - **Validated Registry**: duplicate names or letters are rejected up front
//! - **Argument Parsing**: flags, options with defaults, required values,
//!   positionals and enumerated value domains
//! - **Built-ins**: `help` (`h`) and `quit` (`q`) are always available
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                              Console                                    │
//! │                                                                         │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐                  │
//! │  │  Read Loop  │───>│  Tokenizer  │───>│  Registry   │                  │
//! │  │  (stdin)    │    │  split()    │    │ name/letter │                  │
//! │  └─────────────┘    └─────────────┘    └──────┬──────┘                  │
//! │                                               │                         │
//! │                                               ▼                         │
//! │                     ┌──────────────────────────────────────────────┐    │
//! │                     │                  Command                     │    │
//! │                     │   ┌────────────┐          ┌────────────┐     │    │
//! │                     │   │    Args    │────────> │  handler   │     │    │
//! │                     │   │  parse()   │ success  │  (closure) │     │    │
//! │                     │   └────────────┘          └────────────┘     │    │
//! │                     └──────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use cmdconsole::args::Arg;
//! use cmdconsole::commands::Command;
//! use cmdconsole::console::Console;
//!
//! fn main() -> anyhow::Result<()> {
//!     let call = Command::with_args(
//!         "call",
//!         "c",
//!         "create new call",
//!         vec![
//!             Arg::positional("address", "Remote address"),
//!             Arg::option("bitrate", "b", "Call bitrate", "1024"),
//!         ],
//!     )?
//!     .handler(|args| {
//!         println!("Calling {} at {}", args.get("address")?, args.get("bitrate")?);
//!         Ok(())
//!     });
//!
//!     let mut console = Console::new("phone", "1.0.0", vec![call])?;
//!
//!     // Returns once "quit" or "q" is entered
//!     console.run()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Overview
//!
//! - [`input`]: Line tokenizer
//! - [`args`]: Argument declarations and the per-command parser
//! - [`commands`]: The command wrapper binding arguments to a handler
//! - [`console`]: Registry, dispatch, help and the read loop
//!
//! ## Error Handling
//!
//! Configuration mistakes ([`ConfigError`]) make a console impossible to
//! construct. Unknown commands and argument errors at run time are reported
//! on the error channel and never stop the read loop; handler failures come
//! back from [`Console::handle`] as [`ConsoleError`] and are reported by the
//! loop.

pub mod args;
pub mod commands;
pub mod console;
pub mod input;

// Re-export commonly used types for convenience
pub use args::{Arg, ArgKind, Args, ArgsError};
pub use commands::{Command, CommandHandler};
pub use console::{ConfigError, Console, ConsoleError, HELP_COMMAND, QUIT_COMMAND};
pub use input::{split, SplitError};

/// Version of cmdconsole
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

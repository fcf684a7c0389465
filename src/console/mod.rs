//! Console Module
//!
//! The console owns the command registry, resolves input lines to
//! commands and runs the interactive read loop.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          Console                            │
//! │                                                             │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐      │
//! │  │   split()   │───>│  resolve()  │───>│  dispatch   │      │
//! │  └─────────────┘    └─────────────┘    └──────┬──────┘      │
//! │                            │                  │             │
//! │                            ▼                  ▼             │
//! │                     ┌─────────────┐    ┌─────────────┐      │
//! │                     │  Registry   │    │   Command   │      │
//! │                     │ name/letter │    │ Args+handler│      │
//! │                     └─────────────┘    └─────────────┘      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Loop States
//!
//! `Idle` (waiting for a line) → `Resolving` (alias and name lookup) →
//! `Dispatching` (handing tokens to the command) → back to `Idle`. The loop
//! stops once the most recently resolved command is `quit`.
//!
//! ## Example
//!
//! ```
//! use cmdconsole::commands::Command;
//! use cmdconsole::console::Console;
//!
//! let mut console = Console::new(
//!     "phone",
//!     "1.0.0",
//!     vec![Command::new("disconnect", "d", "disconnect a call")],
//! )
//! .unwrap();
//!
//! assert!(console.handle("d").unwrap());
//! assert_eq!(console.current_command(), "disconnect");
//!
//! // Reads until "quit" (or "q")
//! console.run_with("disconnect\nq\n".as_bytes()).unwrap();
//! ```

pub mod handler;
pub mod registry;

pub use handler::{Console, ConsoleError, DEFAULT_NAME_WIDTH};
pub use registry::{ConfigError, Registry, HELP_COMMAND, QUIT_COMMAND};

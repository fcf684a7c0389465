//! Command Module
//!
//! A [`Command`] is one registrable unit of console functionality: a long
//! name, a single-letter alias, a description, an argument parser and an
//! optional handler.
//!
//! ## Flow
//!
//! ```text
//! remaining tokens
//!       │
//!       ▼
//! ┌─────────────────┐   failure
//! │  Args::parse()  │──────────────> Ok(false)
//! └────────┬────────┘
//!          │ success
//!          ▼
//! ┌─────────────────┐   Err(e)
//! │    handler()    │──────────────> ConsoleError::Handler
//! └────────┬────────┘
//!          ▼
//!       Ok(true)
//! ```
//!
//! ## Example
//!
//! ```
//! use cmdconsole::args::Arg;
//! use cmdconsole::commands::Command;
//!
//! let mut command = Command::with_args(
//!     "change-source",
//!     "s",
//!     "change video source",
//!     vec![Arg::positional("source", "New video source")],
//! )
//! .unwrap()
//! .handler(|args| {
//!     println!("Changing source to: {}", args.get("source")?);
//!     Ok(())
//! });
//!
//! assert!(command.handle(&["test-media/2.mp4"]).unwrap());
//! assert!(!command.handle::<&str>(&[]).unwrap());
//! ```

pub mod command;

pub use command::{Command, CommandHandler};

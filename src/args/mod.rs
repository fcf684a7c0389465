//! Argument Parsing Module
//!
//! Every console command owns a small argument parser built from an ordered
//! list of declarations. The console hands the tokens that follow the
//! command name to this parser and only invokes the command's handler when
//! parsing succeeds.
//!
//! ## Declaration Kinds
//!
//! ```text
//! ┌──────────────┬──────────────────────┬───────────┬──────────────────┐
//! │ Kind         │ Syntax               │ Letter    │ When absent      │
//! ├──────────────┼──────────────────────┼───────────┼──────────────────┤
//! │ Flag         │ -d / --debug         │ required  │ "false"          │
//! │ Option       │ -b 512 / --bitrate 5 │ required  │ default value    │
//! │ Required     │ -c 7 / --call 7      │ required  │ parse failure    │
//! │ Positional   │ host                 │ none      │ failure/default  │
//! └──────────────┴──────────────────────┴───────────┴──────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use cmdconsole::args::{Arg, Args};
//!
//! let mut args = Args::new(vec![
//!     Arg::positional("address", "Remote address"),
//!     Arg::option("bitrate", "b", "Call bitrate", "1024"),
//! ])
//! .unwrap();
//!
//! assert!(args.parse(&["10.0.0.1", "-b", "512"]));
//! assert_eq!(args.get("address").unwrap(), "10.0.0.1");
//! assert_eq!(args.get_as::<u32>("bitrate").unwrap(), 512);
//! ```

pub mod parser;
pub mod declaration;

pub use parser::{Args, ArgsError, ArgsResult};
pub use declaration::{Arg, ArgKind};

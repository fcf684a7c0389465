//! Console Handler
//!
//! Resolves input lines against the registry, dispatches them to commands,
//! prints help and runs the blocking read loop.
//!
//! ## Read Loop
//!
//! ```text
//! ┌──────────────────────────────────┐
//! │  print "<name>>"                 │
//! │         │                        │
//! │         ▼                        │
//! │  read one line                   │──── end of input ───> return
//! │         │                        │
//! │         ▼                        │
//! │  handle(line)                    │──── Err(e) ──> report, continue
//! │         │                        │
//! │         ▼                        │
//! │  current command == "quit" ?     │──── yes ─────> return
//! │         │ no                     │
//! │         └──── loop back          │
//! └──────────────────────────────────┘
//! ```
//!
//! Unknown commands and argument errors are reported on the error channel
//! and make [`Console::handle`] return `Ok(false)`; they never stop the loop.

use super::registry::{ConfigError, Registry, HELP_COMMAND, HELP_TOPIC, QUIT_COMMAND};
use crate::commands::Command;
use crate::input::{split, TOKEN_SEPARATOR};
use regex::Regex;
use std::io::{self, BufRead, Write};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, info};

/// Default width of the command name column in the help listing
pub const DEFAULT_NAME_WIDTH: usize = 20;

/// Errors raised while handling a line.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// A command's handler returned an error
    #[error("command '{command}' failed: {source}")]
    Handler {
        command: String,
        source: anyhow::Error,
    },

    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d+\.\d+\.\d+$").expect("version pattern is valid"))
}

/// An interactive command console.
pub struct Console {
    /// Shown in the prompt and the help banner
    name: String,
    /// `major.minor.patch`, shown in the help banner
    version: String,
    /// Registered commands, built-ins first
    registry: Registry,
    /// Name most recently resolved by `handle`
    current_command: String,
    /// Output channel (prompt, help)
    out: Box<dyn Write>,
    /// Error channel (diagnostics)
    err: Box<dyn Write>,
    /// Width of the name column in the help listing
    name_width: usize,
}

impl Console {
    /// Creates a console hosting `commands` in addition to `help` and `quit`.
    ///
    /// # Errors
    ///
    /// Fails if the name or version is empty, if the version is not of the
    /// form `major.minor.patch`, or if any command collides with one
    /// registered before it.
    pub fn new(name: &str, version: &str, commands: Vec<Command>) -> Result<Self, ConfigError> {
        if name.is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if version.is_empty() {
            return Err(ConfigError::EmptyVersion);
        }
        if !version_pattern().is_match(version) {
            return Err(ConfigError::InvalidVersion(version.to_string()));
        }

        let registry = Registry::new(commands)?;
        debug!(console = name, commands = registry.len(), "Console created");

        Ok(Self {
            name: name.to_string(),
            version: version.to_string(),
            registry,
            current_command: String::new(),
            out: Box::new(io::stdout()),
            err: Box::new(io::stderr()),
            name_width: DEFAULT_NAME_WIDTH,
        })
    }

    /// Redirects the output and error channels.
    pub fn with_output(mut self, out: impl Write + 'static, err: impl Write + 'static) -> Self {
        self.out = Box::new(out);
        self.err = Box::new(err);
        self
    }

    /// Sets the width of the name column in the help listing.
    pub fn with_name_width(mut self, width: usize) -> Self {
        self.name_width = width;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The name most recently resolved by [`Console::handle`], whether or
    /// not a command by that name exists.
    pub fn current_command(&self) -> &str {
        &self.current_command
    }

    /// Handles one input line.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` - the line was empty, or the command ran
    /// - `Ok(false)` - unknown command or bad arguments (reported on the
    ///   error channel)
    /// - `Err(e)` - a handler failed, or the channels could not be written
    pub fn handle(&mut self, line: &str) -> Result<bool, ConsoleError> {
        // Only an empty line fails to split; just hitting enter is ok, do nothing
        let tokens = split(line, TOKEN_SEPARATOR).unwrap_or_default();
        let Some((first, rest)) = tokens.split_first() else {
            return Ok(true);
        };

        let name = self.registry.resolve(first).to_string();
        debug!(token = *first, command = %name, "Resolved command");
        self.current_command = name.clone();

        let Some(command) = self.registry.get_mut(&name) else {
            debug!(command = *first, "Command not found");
            writeln!(self.err, "Could not find command: {}", first)?;
            return Ok(false);
        };

        if !command.handle(rest)? {
            let reason = command
                .args()
                .last_error()
                .map(ToString::to_string)
                .unwrap_or_default();
            writeln!(self.err, "Could not parse arguments for {}: {}", name, reason)?;
            return Ok(false);
        }

        if name == HELP_COMMAND {
            let topic = command.args().get(HELP_TOPIC).unwrap_or_default().to_string();
            return if topic.is_empty() {
                self.help()?;
                Ok(true)
            } else {
                self.help_command(&topic)
            };
        }

        Ok(true)
    }

    /// Writes the banner and one line per registered command.
    pub fn help(&mut self) -> io::Result<()> {
        writeln!(self.out, "{} {} commands", self.name, self.version)?;
        writeln!(self.out)?;
        writeln!(self.out, "\"{} <command>\" for more info", HELP_COMMAND)?;
        writeln!(self.out)?;
        for command in self.registry.iter() {
            writeln!(
                self.out,
                "{:<width$}{}",
                command.name(),
                command.description(),
                width = self.name_width
            )?;
        }
        writeln!(self.out)?;
        self.out.flush()
    }

    /// Writes the usage of one command, given by name or letter.
    ///
    /// Returns `Ok(false)` if no such command is registered.
    pub fn help_command(&mut self, topic: &str) -> Result<bool, ConsoleError> {
        let name = self.registry.resolve(topic);
        let Some(command) = self.registry.get(name) else {
            writeln!(self.err, "Could not find command: {}", topic)?;
            return Ok(false);
        };

        writeln!(
            self.out,
            "{} ({}): {}",
            command.name(),
            command.letter(),
            command.description()
        )?;
        writeln!(self.out)?;
        for arg in command.args().declarations() {
            let mut line = format!(
                "  {:<width$}{}",
                arg.to_string(),
                arg.description(),
                width = self.name_width + 6
            );
            if let Some(default) = arg
                .default_value()
                .filter(|default| arg.kind().takes_value() && !default.is_empty())
            {
                line.push_str(&format!(" [default: {}]", default));
            }
            if let Some(allowed) = arg.allowed_values() {
                line.push_str(&format!(" [values: {}]", allowed.join(", ")));
            }
            writeln!(self.out, "{}", line)?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(true)
    }

    /// Runs the read loop on standard input until `quit` is handled.
    pub fn run(&mut self) -> Result<(), ConsoleError> {
        let stdin = io::stdin();
        self.run_with(stdin.lock())
    }

    /// Runs the read loop on `input` until `quit` is handled or the input
    /// ends.
    pub fn run_with<R: BufRead>(&mut self, mut input: R) -> Result<(), ConsoleError> {
        info!(console = %self.name, "Console started");

        let mut buf = Vec::new();
        while self.current_command != QUIT_COMMAND {
            write!(self.out, "{}>", self.name)?;
            self.out.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                debug!(console = %self.name, "End of input");
                break;
            }

            // Invalid UTF-8 is replaced rather than ending the loop
            let line = String::from_utf8_lossy(&buf);
            let trimmed = line.trim_end_matches(['\n', '\r']);
            if let Err(e) = self.handle(trimmed) {
                debug!(error = %e, "Command failed");
                writeln!(self.err, "Could not process command: {}", e)?;
            }
        }

        info!(console = %self.name, "Console stopped");
        Ok(())
    }
}

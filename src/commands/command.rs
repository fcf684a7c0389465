//! Console Command
//!
//! Wraps an argument parser and a handler. The handler runs only after the
//! parser accepts the tokens, and its errors are returned to the caller
//! instead of being folded into the parse result.

use crate::args::{Arg, Args, ArgsResult};
use crate::console::ConsoleError;
use std::fmt;
use tracing::debug;

/// Callback invoked with the parsed arguments of a command.
pub type CommandHandler = Box<dyn FnMut(&Args) -> anyhow::Result<()>>;

/// A single console command, e.g. `call -b <bitrate> <address>`.
pub struct Command {
    name: String,
    letter: String,
    description: String,
    args: Args,
    handler: Option<CommandHandler>,
}

impl Command {
    /// Creates a command that takes no arguments.
    pub fn new(name: &str, letter: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            letter: letter.to_string(),
            description: description.to_string(),
            args: Args::none(),
            handler: None,
        }
    }

    /// Creates a command that accepts the declared arguments.
    ///
    /// # Errors
    ///
    /// Fails if the declarations do not form a valid parser.
    pub fn with_args(
        name: &str,
        letter: &str,
        description: &str,
        args: Vec<Arg>,
    ) -> ArgsResult<Self> {
        let mut command = Self::new(name, letter, description);
        command.args = Args::new(args)?;
        Ok(command)
    }

    /// Binds the handler invoked after a successful parse.
    pub fn handler<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&Args) -> anyhow::Result<()> + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Parses `tokens` and, on success, runs the handler.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` - the tokens parsed (and the handler, if any, succeeded)
    /// - `Ok(false)` - the tokens did not parse; see [`Args::last_error`]
    /// - `Err(e)` - the handler failed
    pub fn handle<S: AsRef<str>>(&mut self, tokens: &[S]) -> Result<bool, ConsoleError> {
        if !self.args.parse(tokens) {
            return Ok(false);
        }

        if let Some(handler) = self.handler.as_mut() {
            debug!(command = %self.name, "Invoking handler");
            handler(&self.args).map_err(|source| ConsoleError::Handler {
                command: self.name.clone(),
                source,
            })?;
        }

        Ok(true)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn letter(&self) -> &str {
        &self.letter
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The argument parser, holding the values of the most recent parse.
    pub fn args(&self) -> &Args {
        &self.args
    }

    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("letter", &self.letter)
            .field("description", &self.description)
            .field("args", &self.args)
            .field("handler", &self.handler.is_some())
            .finish()
    }
}

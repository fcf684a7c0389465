//! Command Registry
//!
//! Maps command names to commands (in registration order) and letters to
//! command names. The registry is built once, seeded with the `help` and
//! `quit` built-ins, and is never modified afterwards.

use crate::args::{Arg, ArgsError};
use crate::commands::Command;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// Name of the built-in help command
pub const HELP_COMMAND: &str = "help";

/// Name of the built-in quit command; resolving it stops the read loop
pub const QUIT_COMMAND: &str = "quit";

/// Positional argument of `help` naming the command to describe
pub const HELP_TOPIC: &str = "command";

/// Errors that prevent a console from being constructed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("console name cannot be empty")]
    EmptyName,

    #[error("console version cannot be empty")]
    EmptyVersion,

    #[error("console version must be in the form major.minor.patch, got '{0}'")]
    InvalidVersion(String),

    #[error("command name cannot be empty")]
    EmptyCommandName,

    #[error("command '{command}' must have a single character letter, got '{letter}'")]
    InvalidLetter { command: String, letter: String },

    #[error("cannot have two commands with the same name: {0}")]
    DuplicateName(String),

    #[error("cannot have two commands with the same letter: {0}")]
    DuplicateLetter(String),

    #[error("'{0}' is used both as a command name and as a letter")]
    AmbiguousAlias(String),

    #[error("invalid argument declaration: {0}")]
    InvalidArgument(#[from] ArgsError),
}

/// Name → command and letter → name lookup tables.
#[derive(Debug, Default)]
pub struct Registry {
    /// Commands in registration order
    commands: Vec<Command>,
    /// Command name to position in `commands`
    index: HashMap<String, usize>,
    /// Letter to command name
    letters: HashMap<String, String>,
}

impl Registry {
    /// Builds a registry holding the built-ins followed by `commands`.
    ///
    /// # Errors
    ///
    /// Fails on the first command whose name or letter collides with one
    /// registered before it, or whose letter is not a single character.
    pub fn new(commands: Vec<Command>) -> Result<Self, ConfigError> {
        let mut registry = Self::default();

        let help = Command::with_args(
            HELP_COMMAND,
            "h",
            "display help",
            vec![Arg::positional(HELP_TOPIC, "Command to describe").with_default("")],
        )?;
        registry.insert(help)?;
        registry.insert(Command::new(QUIT_COMMAND, "q", "quit console"))?;

        for command in commands {
            registry.insert(command)?;
        }

        Ok(registry)
    }

    fn insert(&mut self, command: Command) -> Result<(), ConfigError> {
        let name = command.name();
        let letter = command.letter();

        if letter.chars().count() != 1 {
            return Err(ConfigError::InvalidLetter {
                command: name.to_string(),
                letter: letter.to_string(),
            });
        }
        if name.is_empty() {
            return Err(ConfigError::EmptyCommandName);
        }
        if self.index.contains_key(name) {
            return Err(ConfigError::DuplicateName(name.to_string()));
        }
        if self.letters.contains_key(letter) {
            return Err(ConfigError::DuplicateLetter(letter.to_string()));
        }
        if self.letters.contains_key(name) {
            return Err(ConfigError::AmbiguousAlias(name.to_string()));
        }
        if self.index.contains_key(letter) || name == letter {
            return Err(ConfigError::AmbiguousAlias(letter.to_string()));
        }

        debug!(command = name, letter = letter, "Registered command");
        self.letters.insert(letter.to_string(), name.to_string());
        self.index.insert(name.to_string(), self.commands.len());
        self.commands.push(command);
        Ok(())
    }

    /// Maps a letter to its command name; any other token is returned as-is.
    pub fn resolve<'a>(&'a self, token: &'a str) -> &'a str {
        self.letters.get(token).map(String::as_str).unwrap_or(token)
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.index.get(name).map(|&i| &self.commands[i])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Command> {
        self.index.get(name).map(|&i| &mut self.commands[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterates over the commands in registration order, built-ins first.
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(registry: &Registry) -> Vec<&str> {
        registry.iter().map(Command::name).collect()
    }

    #[test]
    fn test_builtins_seeded_first() {
        let registry = Registry::new(vec![Command::new("call", "c", "create new call")]).unwrap();
        assert_eq!(names(&registry), vec!["help", "quit", "call"]);
        assert_eq!(registry.len(), 3);
        assert!(registry.contains("help"));
        assert!(registry.contains("quit"));
    }

    #[test]
    fn test_resolve_letters() {
        let registry = Registry::new(vec![Command::new("call", "c", "create new call")]).unwrap();
        assert_eq!(registry.resolve("h"), "help");
        assert_eq!(registry.resolve("q"), "quit");
        assert_eq!(registry.resolve("c"), "call");
        assert_eq!(registry.resolve("call"), "call");
        assert_eq!(registry.resolve("nonexistent"), "nonexistent");
    }

    #[test]
    fn test_duplicate_name() {
        let result = Registry::new(vec![
            Command::new("call", "c", "create new call"),
            Command::new("call", "x", "another call"),
        ]);
        assert_eq!(
            result.unwrap_err(),
            ConfigError::DuplicateName("call".to_string())
        );
    }

    #[test]
    fn test_duplicate_builtin_name() {
        let result = Registry::new(vec![Command::new("quit", "x", "leave")]);
        assert_eq!(
            result.unwrap_err(),
            ConfigError::DuplicateName("quit".to_string())
        );
    }

    #[test]
    fn test_duplicate_letter() {
        let result = Registry::new(vec![
            Command::new("call", "c", "create new call"),
            Command::new("connect", "c", "connect"),
        ]);
        assert_eq!(
            result.unwrap_err(),
            ConfigError::DuplicateLetter("c".to_string())
        );
    }

    #[test]
    fn test_duplicate_builtin_letter() {
        let result = Registry::new(vec![Command::new("hangup", "h", "hang up")]);
        assert_eq!(
            result.unwrap_err(),
            ConfigError::DuplicateLetter("h".to_string())
        );
    }

    #[test]
    fn test_letter_length() {
        for letter in ["", "ca"] {
            let result = Registry::new(vec![Command::new("call", letter, "create new call")]);
            assert!(matches!(
                result,
                Err(ConfigError::InvalidLetter { .. })
            ));
        }
    }

    #[test]
    fn test_empty_command_name() {
        let result = Registry::new(vec![Command::new("", "e", "empty")]);
        assert_eq!(result.unwrap_err(), ConfigError::EmptyCommandName);
    }

    #[test]
    fn test_name_letter_collisions() {
        // A name equal to an existing letter
        let result = Registry::new(vec![Command::new("q", "x", "quick")]);
        assert_eq!(
            result.unwrap_err(),
            ConfigError::AmbiguousAlias("q".to_string())
        );

        // A letter equal to an existing name
        let result = Registry::new(vec![
            Command::new("x", "y", "ex"),
            Command::new("xray", "x", "x-ray"),
        ]);
        assert_eq!(
            result.unwrap_err(),
            ConfigError::AmbiguousAlias("x".to_string())
        );
    }

    #[test]
    fn test_get_mut_dispatches() {
        let mut registry = Registry::new(vec![]).unwrap();
        let quit = registry.get_mut("quit").unwrap();
        assert!(quit.handle::<&str>(&[]).unwrap());
        assert!(registry.get("missing").is_none());
    }
}

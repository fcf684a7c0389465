//! Argument Parser
//!
//! [`Args`] validates a list of declarations once, then parses token lists
//! against them as many times as needed. Each parse starts from the
//! declared defaults, so values never leak from one invocation of a
//! command into the next.
//!
//! ## Token Grammar
//!
//! - `--<name>` or `-<letter>` selects a named declaration. Flags take no
//!   value; every other named kind consumes the following token.
//! - Any other token fills the next unfilled positional.
//! - Empty tokens are skipped.

use super::declaration::{Arg, ArgKind};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Errors raised by argument declarations, parsing and value access.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArgsError {
    // Declaration errors
    #[error("no arguments declared")]
    NoArguments,

    #[error("argument name cannot be empty")]
    EmptyName,

    #[error("argument '{name}' must have a single character letter, got '{letter}'")]
    InvalidLetter { name: String, letter: String },

    #[error("argument '{0}' has the same name and letter")]
    NameIsLetter(String),

    #[error("default value '{default}' for argument '{name}' is not an allowed value")]
    DefaultNotAllowed { name: String, default: String },

    #[error("flag '{0}' cannot restrict its values")]
    DomainOnFlag(String),

    #[error("cannot have two arguments with the same name: {0}")]
    DuplicateName(String),

    #[error("cannot have two arguments with the same letter: {0}")]
    DuplicateLetter(String),

    // Parse errors
    #[error("unknown argument: {0}")]
    UnknownArgument(String),

    #[error("missing value for argument '{0}'")]
    MissingValue(String),

    #[error("value '{value}' for argument '{name}' must be one of: {allowed}")]
    ValueNotAllowed {
        name: String,
        value: String,
        allowed: String,
    },

    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),

    #[error("missing required argument '{0}'")]
    MissingRequired(String),

    // Access errors
    #[error("no argument named '{0}' was declared")]
    UnknownName(String),

    #[error("invalid value '{value}' for argument '{name}': {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },
}

/// Result type for argument operations.
pub type ArgsResult<T> = Result<T, ArgsError>;

/// A validated set of argument declarations and the most recently parsed
/// values.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Declarations in the order they were given
    decls: Vec<Arg>,
    /// Parsed (or default) values keyed by argument name
    values: HashMap<String, String>,
    /// Failure of the most recent parse, if it failed
    last_error: Option<ArgsError>,
}

impl Args {
    /// Builds a parser from a non-empty list of declarations.
    ///
    /// # Errors
    ///
    /// Fails if the list is empty, if any declaration is invalid on its own,
    /// or if two declarations share a name or a letter.
    pub fn new(decls: Vec<Arg>) -> ArgsResult<Self> {
        if decls.is_empty() {
            return Err(ArgsError::NoArguments);
        }

        let mut names = HashSet::new();
        let mut letters = HashSet::new();
        for decl in &decls {
            decl.validate()?;
            if !names.insert(decl.name()) {
                return Err(ArgsError::DuplicateName(decl.name().to_string()));
            }
            if let Some(letter) = decl.letter() {
                if !letters.insert(letter) {
                    return Err(ArgsError::DuplicateLetter(letter.to_string()));
                }
            }
        }

        let mut args = Self {
            decls,
            values: HashMap::new(),
            last_error: None,
        };
        args.reset();
        Ok(args)
    }

    /// A parser that declares nothing and rejects every token.
    pub(crate) fn none() -> Self {
        Self::default()
    }

    /// Parses `tokens`, returning true on success.
    ///
    /// On failure the reason is available from [`Args::last_error`].
    pub fn parse<S: AsRef<str>>(&mut self, tokens: &[S]) -> bool {
        match self.try_parse(tokens) {
            Ok(()) => {
                self.last_error = None;
                true
            }
            Err(e) => {
                debug!(error = %e, "Argument parsing failed");
                self.last_error = Some(e);
                false
            }
        }
    }

    /// Parses `tokens`, returning the failure reason on error.
    pub fn try_parse<S: AsRef<str>>(&mut self, tokens: &[S]) -> ArgsResult<()> {
        self.reset();

        let mut tokens = tokens
            .iter()
            .map(|token| token.as_ref())
            .filter(|token: &&str| !token.is_empty());
        let mut positionals = self
            .decls
            .iter()
            .filter(|decl| decl.kind() == ArgKind::Positional);

        while let Some(token) = tokens.next() {
            let decl = match named_target(token) {
                Some(target) => Some(find_named(&self.decls, target, token)?),
                None => None,
            };

            match decl {
                Some(decl) if decl.kind() == ArgKind::Flag => {
                    self.values.insert(decl.name().to_string(), "true".to_string());
                }
                Some(decl) => {
                    let value = tokens
                        .next()
                        .ok_or_else(|| ArgsError::MissingValue(decl.name().to_string()))?;
                    store(&mut self.values, decl, value)?;
                }
                None => {
                    let decl = positionals
                        .next()
                        .ok_or_else(|| ArgsError::UnexpectedArgument(token.to_string()))?;
                    store(&mut self.values, decl, token)?;
                }
            }
        }

        if let Some(missing) = self
            .decls
            .iter()
            .find(|decl| !self.values.contains_key(decl.name()))
        {
            return Err(ArgsError::MissingRequired(missing.name().to_string()));
        }

        debug!(values = self.values.len(), "Parsed arguments");
        Ok(())
    }

    /// Returns the value of `name`.
    pub fn get(&self, name: &str) -> ArgsResult<&str> {
        if self.find(name).is_none() {
            return Err(ArgsError::UnknownName(name.to_string()));
        }
        self.values
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| ArgsError::MissingRequired(name.to_string()))
    }

    /// Returns true if the flag `name` was given.
    pub fn flag(&self, name: &str) -> ArgsResult<bool> {
        Ok(self.get(name)? == "true")
    }

    /// Returns the value of `name` converted with [`FromStr`].
    pub fn get_as<T>(&self, name: &str) -> ArgsResult<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let value = self.get(name)?;
        value.parse().map_err(|e: T::Err| ArgsError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
    }

    /// Returns the declarations in declaration order.
    pub fn declarations(&self) -> &[Arg] {
        &self.decls
    }

    /// Returns the failure of the most recent parse, if it failed.
    pub fn last_error(&self) -> Option<&ArgsError> {
        self.last_error.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    fn find(&self, name: &str) -> Option<&Arg> {
        self.decls.iter().find(|decl| decl.name() == name)
    }

    /// Drops parsed values and restores the declared defaults.
    fn reset(&mut self) {
        self.values.clear();
        for decl in &self.decls {
            if let Some(default) = decl.default_value() {
                self.values
                    .insert(decl.name().to_string(), default.to_string());
            }
        }
    }
}

/// What a named token refers to.
#[derive(Clone, Copy)]
enum Target<'a> {
    Name(&'a str),
    Letter(&'a str),
}

/// Classifies `token` as `--name`, `-l`, or neither.
///
/// A lone `-` or `--` is treated as a value.
fn named_target(token: &str) -> Option<Target<'_>> {
    if let Some(name) = token.strip_prefix("--") {
        return (!name.is_empty()).then_some(Target::Name(name));
    }
    token
        .strip_prefix('-')
        .filter(|letter| !letter.is_empty())
        .map(Target::Letter)
}

fn find_named<'d>(decls: &'d [Arg], target: Target<'_>, token: &str) -> ArgsResult<&'d Arg> {
    decls
        .iter()
        .filter(|decl| decl.kind().is_named())
        .find(|decl| match target {
            Target::Name(name) => decl.name() == name,
            Target::Letter(letter) => decl.letter() == Some(letter),
        })
        .ok_or_else(|| ArgsError::UnknownArgument(token.to_string()))
}

fn store(values: &mut HashMap<String, String>, decl: &Arg, value: &str) -> ArgsResult<()> {
    if !decl.accepts(value) {
        return Err(ArgsError::ValueNotAllowed {
            name: decl.name().to_string(),
            value: value.to_string(),
            allowed: decl.allowed_values().unwrap_or_default().join(", "),
        });
    }
    values.insert(decl.name().to_string(), value.to_string());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call_args() -> Args {
        Args::new(vec![
            Arg::positional("address", "Remote address"),
            Arg::option("bitrate", "b", "Call bitrate", "1024"),
            Arg::option("codec", "c", "Video codec", "h264").with_values(["h264", "vp8"]),
            Arg::flag("debug", "d", "Debug output"),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_rejects_empty_list() {
        assert_eq!(Args::new(vec![]).unwrap_err(), ArgsError::NoArguments);
    }

    #[test]
    fn test_new_rejects_invalid_declaration() {
        let result = Args::new(vec![Arg::option("bitrate", "bb", "Bitrate", "1")]);
        assert!(matches!(result, Err(ArgsError::InvalidLetter { .. })));
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let result = Args::new(vec![
            Arg::flag("debug", "d", "Debug"),
            Arg::flag("debug", "x", "Debug again"),
        ]);
        assert_eq!(result.unwrap_err(), ArgsError::DuplicateName("debug".to_string()));

        let result = Args::new(vec![
            Arg::flag("debug", "d", "Debug"),
            Arg::flag("detach", "d", "Detach"),
        ]);
        assert_eq!(result.unwrap_err(), ArgsError::DuplicateLetter("d".to_string()));
    }

    #[test]
    fn test_defaults_before_parse() {
        let args = call_args();
        assert_eq!(args.get("bitrate").unwrap(), "1024");
        assert!(!args.flag("debug").unwrap());
        assert_eq!(
            args.get("address"),
            Err(ArgsError::MissingRequired("address".to_string()))
        );
    }

    #[test]
    fn test_parse_positional_and_defaults() {
        let mut args = call_args();
        assert!(args.parse(&["10.0.0.1"]));
        assert_eq!(args.get("address").unwrap(), "10.0.0.1");
        assert_eq!(args.get("bitrate").unwrap(), "1024");
        assert_eq!(args.get("codec").unwrap(), "h264");
        assert!(!args.flag("debug").unwrap());
        assert!(args.last_error().is_none());
    }

    #[test]
    fn test_parse_letters_and_names() {
        let mut args = call_args();
        assert!(args.parse(&["-b", "512", "--codec", "vp8", "-d", "host"]));
        assert_eq!(args.get_as::<u32>("bitrate").unwrap(), 512);
        assert_eq!(args.get("codec").unwrap(), "vp8");
        assert!(args.flag("debug").unwrap());
        assert_eq!(args.get("address").unwrap(), "host");
    }

    #[test]
    fn test_parse_skips_empty_tokens() {
        let mut args = call_args();
        assert!(args.parse(&["host", "", "-b", "", "256"]));
        assert_eq!(args.get("bitrate").unwrap(), "256");
    }

    #[test]
    fn test_parse_missing_required() {
        let mut args = call_args();
        assert!(!args.parse(&["-d"]));
        assert_eq!(
            args.last_error(),
            Some(&ArgsError::MissingRequired("address".to_string()))
        );
    }

    #[test]
    fn test_parse_missing_value() {
        let mut args = call_args();
        assert!(!args.parse(&["host", "-b"]));
        assert_eq!(
            args.last_error(),
            Some(&ArgsError::MissingValue("bitrate".to_string()))
        );
    }

    #[test]
    fn test_parse_unknown_argument() {
        let mut args = call_args();
        assert!(!args.parse(&["host", "-z"]));
        assert_eq!(
            args.last_error(),
            Some(&ArgsError::UnknownArgument("-z".to_string()))
        );
    }

    #[test]
    fn test_parse_value_outside_domain() {
        let mut args = call_args();
        assert!(!args.parse(&["host", "-c", "av1"]));
        assert!(matches!(
            args.last_error(),
            Some(ArgsError::ValueNotAllowed { .. })
        ));
    }

    #[test]
    fn test_parse_unexpected_positional() {
        let mut args = call_args();
        assert!(!args.parse(&["host", "other"]));
        assert_eq!(
            args.last_error(),
            Some(&ArgsError::UnexpectedArgument("other".to_string()))
        );
    }

    #[test]
    fn test_parse_resets_previous_values() {
        let mut args = call_args();
        assert!(args.parse(&["host", "-b", "512", "-d"]));
        assert!(args.parse(&["other"]));
        assert_eq!(args.get("bitrate").unwrap(), "1024");
        assert!(!args.flag("debug").unwrap());
    }

    #[test]
    fn test_parse_error_cleared_on_success() {
        let mut args = call_args();
        assert!(!args.parse::<&str>(&[]));
        assert!(args.last_error().is_some());
        assert!(args.parse(&["host"]));
        assert!(args.last_error().is_none());
    }

    #[test]
    fn test_optional_positional() {
        let mut args =
            Args::new(vec![Arg::positional("command", "Command").with_default("")]).unwrap();
        assert!(args.parse::<&str>(&[]));
        assert_eq!(args.get("command").unwrap(), "");
        assert!(args.parse(&["call"]));
        assert_eq!(args.get("command").unwrap(), "call");
    }

    #[test]
    fn test_get_unknown_name() {
        let args = call_args();
        assert_eq!(
            args.get("missing"),
            Err(ArgsError::UnknownName("missing".to_string()))
        );
    }

    #[test]
    fn test_get_as_invalid_value() {
        let mut args = call_args();
        assert!(args.parse(&["host", "-b", "fast"]));
        assert!(matches!(
            args.get_as::<u32>("bitrate"),
            Err(ArgsError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_none_rejects_tokens() {
        let mut args = Args::none();
        assert!(args.is_empty());
        assert!(args.parse::<&str>(&[]));
        assert!(!args.parse(&["extra"]));
    }

    #[test]
    fn test_dash_is_positional_value() {
        let mut args = Args::new(vec![Arg::positional("source", "Source")]).unwrap();
        assert!(args.parse(&["-"]));
        assert_eq!(args.get("source").unwrap(), "-");
    }
}

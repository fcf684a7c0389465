//! Argument Declarations
//!
//! An [`Arg`] describes one accepted argument of a command. Declarations
//! are plain values; they are validated when an [`Args`](super::Args)
//! parser is built from them.

use super::parser::{ArgsError, ArgsResult};
use std::fmt;

/// The kind of an argument declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// Boolean switch, `"true"` when present and `"false"` otherwise
    Flag,
    /// Valued argument that falls back to a default when absent
    Option,
    /// Valued argument that must be supplied
    Required,
    /// Value identified by its position rather than by a name or letter
    Positional,
}

impl ArgKind {
    /// Returns true if this kind is selected with `-<letter>` / `--<name>`.
    pub fn is_named(&self) -> bool {
        !matches!(self, ArgKind::Positional)
    }

    /// Returns true if this kind consumes a value.
    pub fn takes_value(&self) -> bool {
        !matches!(self, ArgKind::Flag)
    }
}

/// A single argument declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg {
    kind: ArgKind,
    name: String,
    letter: Option<String>,
    description: String,
    default: Option<String>,
    allowed: Option<Vec<String>>,
}

impl Arg {
    fn new(
        kind: ArgKind,
        name: &str,
        letter: Option<&str>,
        description: &str,
        default: Option<&str>,
    ) -> Self {
        Self {
            kind,
            name: name.to_string(),
            letter: letter.map(str::to_string),
            description: description.to_string(),
            default: default.map(str::to_string),
            allowed: None,
        }
    }

    /// Declares a boolean flag, e.g. `-d` / `--debug`.
    pub fn flag(name: &str, letter: &str, description: &str) -> Self {
        Self::new(ArgKind::Flag, name, Some(letter), description, Some("false"))
    }

    /// Declares an optional valued argument with a default.
    pub fn option(name: &str, letter: &str, description: &str, default: &str) -> Self {
        Self::new(ArgKind::Option, name, Some(letter), description, Some(default))
    }

    /// Declares a valued argument that must be supplied.
    pub fn required(name: &str, letter: &str, description: &str) -> Self {
        Self::new(ArgKind::Required, name, Some(letter), description, None)
    }

    /// Declares a positional argument. Positionals are filled in
    /// declaration order and are required unless given a default.
    pub fn positional(name: &str, description: &str) -> Self {
        Self::new(ArgKind::Positional, name, None, description, None)
    }

    /// Restricts the accepted values to an enumerated domain.
    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the value used when the argument is not supplied.
    pub fn with_default(mut self, default: &str) -> Self {
        self.default = Some(default.to_string());
        self
    }

    pub fn kind(&self) -> ArgKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn letter(&self) -> Option<&str> {
        self.letter.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn allowed_values(&self) -> Option<&[String]> {
        self.allowed.as_deref()
    }

    /// Returns true if parsing fails when this argument is absent.
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }

    /// Checks `value` against the enumerated domain, if any.
    pub fn accepts(&self, value: &str) -> bool {
        match &self.allowed {
            Some(allowed) => allowed.iter().any(|v| v == value),
            None => true,
        }
    }

    /// Validates this declaration on its own.
    ///
    /// Cross-declaration checks (duplicate names and letters) are done by
    /// the parser.
    pub fn validate(&self) -> ArgsResult<()> {
        if self.name.is_empty() {
            return Err(ArgsError::EmptyName);
        }

        if self.kind.is_named() {
            let letter = self.letter.as_deref().unwrap_or_default();
            if letter.chars().count() != 1 {
                return Err(ArgsError::InvalidLetter {
                    name: self.name.clone(),
                    letter: letter.to_string(),
                });
            }
            if letter == self.name {
                return Err(ArgsError::NameIsLetter(self.name.clone()));
            }
        }

        if self.allowed.is_some() {
            if !self.kind.takes_value() {
                return Err(ArgsError::DomainOnFlag(self.name.clone()));
            }
            if let Some(default) = &self.default {
                if !self.accepts(default) {
                    return Err(ArgsError::DefaultNotAllowed {
                        name: self.name.clone(),
                        default: default.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Formats the usage form of the declaration, e.g. `-b, --bitrate <bitrate>`.
impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, &self.letter) {
            (ArgKind::Positional, _) => write!(f, "<{}>", self.name),
            (ArgKind::Flag, Some(letter)) => write!(f, "-{}, --{}", letter, self.name),
            (_, Some(letter)) => write!(f, "-{}, --{} <{}>", letter, self.name, self.name),
            (_, None) => write!(f, "--{} <{}>", self.name, self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_defaults_to_false() {
        let arg = Arg::flag("debug", "d", "Debug output");
        assert_eq!(arg.default_value(), Some("false"));
        assert!(!arg.is_required());
        assert!(arg.validate().is_ok());
    }

    #[test]
    fn test_required_and_positional_are_required() {
        assert!(Arg::required("call", "c", "Call id").is_required());
        assert!(Arg::positional("address", "Remote").is_required());
        assert!(!Arg::positional("address", "Remote")
            .with_default("localhost")
            .is_required());
    }

    #[test]
    fn test_validate_empty_name() {
        assert_eq!(
            Arg::option("", "b", "Bitrate", "1").validate(),
            Err(ArgsError::EmptyName)
        );
        assert_eq!(
            Arg::positional("", "Remote").validate(),
            Err(ArgsError::EmptyName)
        );
    }

    #[test]
    fn test_validate_letter_length() {
        assert!(matches!(
            Arg::flag("debug", "", "Debug").validate(),
            Err(ArgsError::InvalidLetter { .. })
        ));
        assert!(matches!(
            Arg::option("bitrate", "br", "Bitrate", "1").validate(),
            Err(ArgsError::InvalidLetter { .. })
        ));
        // One character, two bytes
        assert!(Arg::flag("eclair", "é", "Pastry").validate().is_ok());
    }

    #[test]
    fn test_validate_name_equals_letter() {
        assert_eq!(
            Arg::flag("v", "v", "Verbose").validate(),
            Err(ArgsError::NameIsLetter("v".to_string()))
        );
    }

    #[test]
    fn test_validate_default_in_domain() {
        let ok = Arg::option("codec", "c", "Codec", "h264").with_values(["h264", "vp8"]);
        assert!(ok.validate().is_ok());

        let bad = Arg::option("codec", "c", "Codec", "av1").with_values(["h264", "vp8"]);
        assert_eq!(
            bad.validate(),
            Err(ArgsError::DefaultNotAllowed {
                name: "codec".to_string(),
                default: "av1".to_string(),
            })
        );
    }

    #[test]
    fn test_validate_domain_on_flag() {
        let arg = Arg::flag("debug", "d", "Debug").with_values(["yes"]);
        assert_eq!(
            arg.validate(),
            Err(ArgsError::DomainOnFlag("debug".to_string()))
        );
    }

    #[test]
    fn test_usage_display() {
        assert_eq!(Arg::flag("debug", "d", "").to_string(), "-d, --debug");
        assert_eq!(
            Arg::option("bitrate", "b", "", "1").to_string(),
            "-b, --bitrate <bitrate>"
        );
        assert_eq!(Arg::positional("address", "").to_string(), "<address>");
    }
}

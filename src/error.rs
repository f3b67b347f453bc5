//! Custom error types for ducky-encoder.
//!
//! This module provides structured error types using `thiserror`. Most of
//! these never escape a compilation run: the line dispatcher turns them into
//! [`Diagnostic`](crate::compiler::Diagnostic) records and moves on.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for ducky-encoder operations.
#[derive(Error, Debug)]
pub enum EncodeError {
    /// A character inside a string has no entry in the symbol tables.
    #[error("unknown character '{ch}' (0x{code:02x}), skipping")]
    UnmappableChar { ch: char, code: u32 },

    /// A key name inside a modifier combination could not be resolved.
    #[error("unknown key '{0}'")]
    UnknownKey(String),

    /// A command that requires an argument was given none.
    #[error("{command} requires an argument")]
    MissingArgument { command: String },

    /// A numeric argument could not be parsed.
    #[error("invalid number '{value}' for {command}: {reason}")]
    InvalidNumber {
        command: String,
        value: String,
        reason: String,
    },

    /// A line would grow the payload beyond what can be allocated.
    #[error("{what} is too large: {reason}")]
    TooLarge { what: String, reason: String },

    /// The line matches none of the known command forms.
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// The script to compile does not exist.
    #[error("input file '{}' not found", .0.display())]
    InputNotFound(PathBuf),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for ducky-encoder operations.
pub type Result<T> = std::result::Result<T, EncodeError>;

impl EncodeError {
    /// Create a new UnmappableChar error.
    pub fn unmappable_char(ch: char) -> Self {
        Self::UnmappableChar {
            ch,
            code: ch as u32,
        }
    }

    /// Create a new UnknownKey error.
    pub fn unknown_key(key: impl Into<String>) -> Self {
        Self::UnknownKey(key.into())
    }

    /// Create a new MissingArgument error.
    pub fn missing_argument(command: impl Into<String>) -> Self {
        Self::MissingArgument {
            command: command.into(),
        }
    }

    /// Create a new InvalidNumber error.
    pub fn invalid_number(
        command: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidNumber {
            command: command.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a new TooLarge error.
    pub fn too_large(what: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TooLarge {
            what: what.into(),
            reason: reason.into(),
        }
    }

    /// Create a new UnknownCommand error.
    pub fn unknown_command(line: impl Into<String>) -> Self {
        Self::UnknownCommand(line.into())
    }

    /// Create a new InputNotFound error.
    pub fn input_not_found(path: impl Into<PathBuf>) -> Self {
        Self::InputNotFound(path.into())
    }
}

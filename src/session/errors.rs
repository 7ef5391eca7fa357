//! Errors surfaced by the session controller

use crate::interpreter::errors::RuntimeError;
use crate::persistence::CodecError;
use std::fmt;
use std::io;

/// Anything a command can fail with
#[derive(Debug)]
pub enum SessionError {
    /// The engine reported an error while stepping
    Runtime(RuntimeError),

    /// A program image could not be encoded or decoded
    Codec(CodecError),

    /// Storage read or write failed (including timeouts)
    Io(io::Error),
}

impl SessionError {
    /// Short label for the status bar
    pub fn kind(&self) -> &'static str {
        match self {
            SessionError::Runtime(_) => "runtime",
            SessionError::Codec(_) => "format",
            SessionError::Io(_) => "io",
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Runtime(e) => write!(f, "{}", e),
            SessionError::Codec(e) => write!(f, "{}", e),
            SessionError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Runtime(e) => Some(e),
            SessionError::Codec(e) => Some(e),
            SessionError::Io(e) => Some(e),
        }
    }
}

impl From<RuntimeError> for SessionError {
    fn from(e: RuntimeError) -> Self {
        SessionError::Runtime(e)
    }
}

impl From<CodecError> for SessionError {
    fn from(e: CodecError) -> Self {
        SessionError::Codec(e)
    }
}

impl From<io::Error> for SessionError {
    fn from(e: io::Error) -> Self {
        SessionError::Io(e)
    }
}

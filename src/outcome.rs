use miette::Diagnostic;
use std::{error::Error as StdError, fmt, io, path::Path};
use thiserror::Error;

/// Message carried by every [`FailureKind::DecodeError`].
pub const DECODE_ERROR_MESSAGE: &str = "failed to parse config";

pub type Outcome<T, E = Failure> = std::result::Result<T, E>;

type Cause = Box<dyn StdError + Send + Sync + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The path is missing, unreadable, or the OS refused to open or read it.
    ResourceUnavailable,
    /// The content is not valid structured text or does not match the schema.
    DecodeError,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::ResourceUnavailable => write!(f, "resource unavailable"),
            FailureKind::DecodeError => write!(f, "decode error"),
        }
    }
}

/// Why a fallible step stopped.
///
/// Built once where the problem is detected and moved, untouched, to whoever
/// ends up handling it. The optional cause is only there for diagnostics and
/// never changes the kind or the message.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Failure {
    kind: FailureKind,
    message: String,
    #[source]
    cause: Option<Cause>,
}

impl Failure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: None,
        }
    }

    pub fn resource_unavailable(path: &Path, err: io::Error) -> Self {
        Self {
            kind: FailureKind::ResourceUnavailable,
            message: format!("cannot open {}: {err}", path.display()),
            cause: Some(Box::new(err)),
        }
    }

    pub fn unreadable(path: &Path, err: io::Error) -> Self {
        Self {
            kind: FailureKind::ResourceUnavailable,
            message: format!("cannot read {}: {err}", path.display()),
            cause: Some(Box::new(err)),
        }
    }

    pub fn decode_error(cause: impl StdError + Send + Sync + 'static) -> Self {
        Self {
            kind: FailureKind::DecodeError,
            message: DECODE_ERROR_MESSAGE.to_string(),
            cause: Some(Box::new(cause)),
        }
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_resource_unavailable(&self) -> bool {
        self.kind == FailureKind::ResourceUnavailable
    }

    pub fn is_decode_error(&self) -> bool {
        self.kind == FailureKind::DecodeError
    }
}

impl Diagnostic for Failure {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.kind {
            FailureKind::ResourceUnavailable => "confload::resource_unavailable",
            FailureKind::DecodeError => "confload::decode_error",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.kind {
            FailureKind::ResourceUnavailable => "check that the path exists and is readable",
            FailureKind::DecodeError => "fix the file so it matches the expected fields and types",
        };
        Some(Box::new(help))
    }
}

/// Runs `step` on the success value, or hands the failure back as-is.
///
/// `step` is never called once `input` holds a failure.
pub fn chain<A, B, E>(
    input: Outcome<A, E>,
    step: impl FnOnce(A) -> Outcome<B, E>,
) -> Outcome<B, E> {
    match input {
        Ok(value) => step(value),
        Err(failure) => Err(failure),
    }
}

/// Transforms the success value; failures pass through unchanged.
pub fn map_success<A, B, E>(input: Outcome<A, E>, f: impl FnOnce(A) -> B) -> Outcome<B, E> {
    match input {
        Ok(value) => Ok(f(value)),
        Err(failure) => Err(failure),
    }
}

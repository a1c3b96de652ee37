use std::fmt;

use timeline_core::{RequestId, TimelineEntry};

use crate::decode::DecodeError;
use crate::validate::EntryDefect;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// A load finished. Loads that were cancelled by a newer request emit nothing.
    DocumentLoaded {
        request_id: RequestId,
        source: String,
        result: Result<Vec<TimelineEntry>, LoadError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub redirect_count: usize,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Coarse error taxonomy used for logging; presentation only sees the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    TransportFailure,
    InvalidDocumentFormat,
    MalformedStructuredData,
    UnexpectedShape,
    MalformedEntry,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::TransportFailure => "TransportFailure",
            ErrorKind::InvalidDocumentFormat => "InvalidDocumentFormat",
            ErrorKind::MalformedStructuredData => "MalformedStructuredData",
            ErrorKind::UnexpectedShape => "UnexpectedShape",
            ErrorKind::MalformedEntry => "MalformedEntry",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to fetch document: {0}")]
    Transport(#[from] FetchError),
    #[error("Failed to fetch document: {0}")]
    Decode(#[from] DecodeError),
    #[error("Invalid Markdown format: Missing YAML front matter.")]
    InvalidDocumentFormat,
    #[error("Invalid YAML front matter: {message}")]
    MalformedStructuredData {
        message: String,
        /// 1-based line within the document, when the decoder reports one.
        line: Option<usize>,
        column: Option<usize>,
    },
    #[error("Invalid data format: Expected an array of timeline entries.")]
    UnexpectedShape { found: &'static str },
    #[error("Invalid timeline entry at index {index}: {defect}")]
    MalformedEntry { index: usize, defect: EntryDefect },
    #[error("Failed to fetch document: {0}")]
    Engine(#[from] EngineError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(String),
    #[error("engine stopped")]
    Stopped,
}

impl LoadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoadError::Transport(_) | LoadError::Decode(_) | LoadError::Engine(_) => {
                ErrorKind::TransportFailure
            }
            LoadError::InvalidDocumentFormat => ErrorKind::InvalidDocumentFormat,
            LoadError::MalformedStructuredData { .. } => ErrorKind::MalformedStructuredData,
            LoadError::UnexpectedShape { .. } => ErrorKind::UnexpectedShape,
            LoadError::MalformedEntry { .. } => ErrorKind::MalformedEntry,
        }
    }
}

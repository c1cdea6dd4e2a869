use std::fmt;

use thiserror::Error;

/// Backend operation a request failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Health,
    Cases,
    Timeline,
    Trace,
    Chat,
    Ingest,
    Upload,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Cases => "cases",
            Self::Timeline => "timeline",
            Self::Trace => "trace",
            Self::Chat => "chat",
            Self::Ingest => "ingest",
            Self::Upload => "upload",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("backend unreachable: {0}")]
    Connectivity(String),
    #[error("{operation} request failed: {reason}")]
    Request { operation: Operation, reason: String },
    #[error("query must not be empty")]
    EmptyQuery,
    #[error("a query is already being answered")]
    ChatPending,
    #[error("only plain-text evidence can be uploaded (got {declared})")]
    UnsupportedUploadType { declared: String },
    #[error("an upload is already in progress")]
    UploadInProgress,
    #[error("unknown case '{0}'")]
    UnknownCase(String),
    #[error("session has been shut down")]
    SessionClosed,
}

impl ClientError {
    pub fn request(operation: Operation, source: &anyhow::Error) -> Self {
        Self::Request {
            operation,
            reason: format!("{source:#}"),
        }
    }

    /// Reason text suitable for showing in the conversation.
    pub fn reason(&self) -> String {
        match self {
            Self::Request { reason, .. } => reason.clone(),
            other => other.to_string(),
        }
    }
}

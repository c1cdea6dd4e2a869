//! Completions posted back to the session controller by spawned backend calls.

use anyhow::Result;
use shared::{
    domain::CaseScope,
    protocol::{ChatResponse, TimelineItem, TraceResponse},
};

use crate::{
    cases::{FetchKind, RequestToken},
    connectivity::ConnectivityStatus,
    conversation::TurnId,
    error::Operation,
};

pub enum SessionEvent {
    Connectivity(ConnectivityStatus),
    CasesLoaded {
        token: RequestToken,
        result: Result<Vec<String>>,
    },
    TimelineLoaded {
        token: RequestToken,
        scope: CaseScope,
        result: Result<Vec<TimelineItem>>,
    },
    TraceLoaded {
        token: RequestToken,
        scope: CaseScope,
        result: Result<TraceResponse>,
    },
    ChatCompleted {
        turn: TurnId,
        result: Result<ChatResponse>,
    },
    IngestCompleted {
        result: Result<()>,
    },
    UploadCompleted {
        filename: String,
        result: Result<()>,
    },
}

/// What applying one event changed, for callers deciding what to redraw.
/// A probe that repeats the current connectivity status yields `Ignored`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Connectivity(ConnectivityStatus),
    Cases { selection_reset: bool },
    Timeline,
    Trace,
    ChatReply,
    ChatFailed,
    Ingested,
    Uploaded { filename: String },
    UploadFailed { filename: String },
    Discarded(FetchKind),
    RequestFailed(Operation),
    Ignored,
}

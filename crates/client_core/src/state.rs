use crate::{
    board::EvidenceBoard,
    cases::{ActiveView, CaseRegistry},
    connectivity::ConnectivityStatus,
    conversation::ConversationSession,
    timeline::TimelineView,
    trace::TraceGraph,
};

/// Everything a session shows. Owned by [`crate::SessionController`]; views
/// only ever see `&SessionState`.
#[derive(Debug, Default)]
pub struct SessionState {
    pub(crate) connectivity: ConnectivityStatus,
    pub(crate) conversation: ConversationSession,
    pub(crate) board: EvidenceBoard,
    pub(crate) cases: CaseRegistry,
    pub(crate) view: ActiveView,
    pub(crate) timeline: TimelineView,
    pub(crate) trace: TraceGraph,
    pub(crate) uploading: bool,
}

impl SessionState {
    pub fn new(greeting: &str) -> Self {
        Self {
            conversation: ConversationSession::with_greeting(greeting),
            ..Self::default()
        }
    }

    pub fn connectivity(&self) -> ConnectivityStatus {
        self.connectivity
    }

    pub fn conversation(&self) -> &ConversationSession {
        &self.conversation
    }

    pub fn board(&self) -> &EvidenceBoard {
        &self.board
    }

    pub fn cases(&self) -> &CaseRegistry {
        &self.cases
    }

    pub fn view(&self) -> ActiveView {
        self.view
    }

    pub fn timeline(&self) -> &TimelineView {
        &self.timeline
    }

    pub fn trace(&self) -> &TraceGraph {
        &self.trace
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }
}

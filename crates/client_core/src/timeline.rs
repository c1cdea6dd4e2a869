use shared::{
    domain::{CaseScope, SourceId},
    protocol::TimelineItem,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    pub time: String,
    pub event: String,
    pub source_id: SourceId,
}

impl From<TimelineItem> for TimelineEntry {
    fn from(value: TimelineItem) -> Self {
        Self {
            time: value.time,
            event: value.event,
            source_id: value.source,
        }
    }
}

/// Events for one case scope, in the order the backend returned them.
#[derive(Debug, Default)]
pub struct TimelineView {
    scope: Option<CaseScope>,
    entries: Vec<TimelineEntry>,
}

impl TimelineView {
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    /// Scope of the last applied fetch; `None` until one has landed.
    pub fn scope(&self) -> Option<&CaseScope> {
        self.scope.as_ref()
    }

    pub fn replace(&mut self, scope: CaseScope, entries: Vec<TimelineEntry>) {
        self.scope = Some(scope);
        self.entries = entries;
    }
}

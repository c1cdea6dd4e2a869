use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{CaseScope, NodeId, NodeKind, SourceId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(default)]
    pub sources: Vec<SourceExcerpt>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceExcerpt {
    pub source: SourceId,
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CasesResponse {
    #[serde(default)]
    pub cases: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseQuery {
    pub case_id: String,
}

impl From<&CaseScope> for CaseQuery {
    fn from(scope: &CaseScope) -> Self {
        Self {
            case_id: scope.as_query_value().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimelineResponse {
    #[serde(default)]
    pub timeline: Vec<TimelineItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineItem {
    pub time: String,
    pub event: String,
    pub source: SourceId,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceResponse {
    #[serde(default)]
    pub nodes: Vec<TraceNode>,
    /// Kept as raw JSON; see [`TraceResponse::parsed_links`].
    #[serde(default)]
    pub links: Vec<Value>,
}

impl TraceResponse {
    /// Links shaped as `{source, target}`; anything else is skipped.
    pub fn parsed_links(&self) -> Vec<TraceLink> {
        self.links.iter().filter_map(TraceLink::from_value).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceNode {
    pub id: NodeId,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceLink {
    pub source: NodeId,
    pub target: NodeId,
}

impl TraceLink {
    pub fn from_value(value: &Value) -> Option<Self> {
        Self::deserialize(value).ok()
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;

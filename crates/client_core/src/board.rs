use std::collections::HashSet;

use shared::{domain::SourceId, protocol::SourceExcerpt};

pub const BOARD_CAPACITY: usize = 9;
const PREVIEW_CHARS: usize = 150;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceSnippet {
    pub source_id: SourceId,
    pub content: String,
}

impl EvidenceSnippet {
    pub fn new(source_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            source_id: SourceId::new(source_id),
            content: content.into(),
        }
    }

    /// Card label: file name without `.txt`, first underscore shown as a space.
    pub fn tag(&self) -> String {
        let name = self.source_id.as_str();
        name.replacen(".txt", "", 1).replacen('_', " ", 1)
    }

    pub fn preview(&self) -> String {
        let mut preview: String = self.content.chars().take(PREVIEW_CHARS).collect();
        preview.push_str("...");
        preview
    }
}

impl From<SourceExcerpt> for EvidenceSnippet {
    fn from(value: SourceExcerpt) -> Self {
        Self {
            source_id: value.source,
            content: value.content,
        }
    }
}

/// Bounded, deduplicated set of evidence snippets, most recently introduced first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvidenceBoard {
    snippets: Vec<EvidenceSnippet>,
}

impl EvidenceBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snippets(&self) -> &[EvidenceSnippet] {
        &self.snippets
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    pub fn contains(&self, source_id: &SourceId) -> bool {
        self.snippets.iter().any(|s| &s.source_id == source_id)
    }

    pub fn merge(&mut self, incoming: Vec<EvidenceSnippet>) {
        if incoming.is_empty() {
            return;
        }
        let current = std::mem::take(&mut self.snippets);
        self.snippets = merge_snippets(incoming, current);
    }
}

/// New snippets first, then the existing board; first occurrence of a source id
/// wins and the result is cut to [`BOARD_CAPACITY`].
pub fn merge_snippets(
    incoming: Vec<EvidenceSnippet>,
    current: Vec<EvidenceSnippet>,
) -> Vec<EvidenceSnippet> {
    let mut seen = HashSet::with_capacity(incoming.len() + current.len());
    incoming
        .into_iter()
        .chain(current)
        .filter(|snippet| seen.insert(snippet.source_id.clone()))
        .take(BOARD_CAPACITY)
        .collect()
}

#[cfg(test)]
#[path = "tests/board_tests.rs"]
mod tests;

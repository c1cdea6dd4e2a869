//! Case selection, active view, and the request tokens that order case-scoped fetches.

use std::{collections::HashMap, fmt, str::FromStr};

use serde::Deserialize;
use shared::domain::CaseScope;

use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActiveView {
    #[default]
    Board,
    Timeline,
    Trace,
}

impl ActiveView {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Board => "board",
            Self::Timeline => "timeline",
            Self::Trace => "trace",
        }
    }

    /// Fetch needed to populate this view, if it is backed by case-scoped data.
    pub fn fetch_kind(self) -> Option<FetchKind> {
        match self {
            Self::Board => None,
            Self::Timeline => Some(FetchKind::Timeline),
            Self::Trace => Some(FetchKind::Trace),
        }
    }
}

impl FromStr for ActiveView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "board" => Ok(Self::Board),
            "timeline" => Ok(Self::Timeline),
            "trace" => Ok(Self::Trace),
            other => Err(format!("unknown view '{other}' (expected board, timeline or trace)")),
        }
    }
}

impl fmt::Display for ActiveView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Default)]
pub struct CaseRegistry {
    names: Vec<String>,
    selected: CaseScope,
}

impl CaseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn selected(&self) -> &CaseScope {
        &self.selected
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|known| known == name)
    }

    pub fn select(&mut self, name: &str) -> Result<&CaseScope, ClientError> {
        let scope = CaseScope::from_name(name);
        if let CaseScope::Named(case) = &scope {
            if !self.contains(case) {
                return Err(ClientError::UnknownCase(case.clone()));
            }
        }
        self.selected = scope;
        Ok(&self.selected)
    }

    /// Replaces the known case names, keeping server order and dropping
    /// duplicates. Returns true when the selection no longer existed and was
    /// reset to `All`.
    pub fn replace_names(&mut self, names: Vec<String>) -> bool {
        let mut unique: Vec<String> = Vec::with_capacity(names.len());
        for name in names {
            let name = name.trim().to_string();
            if name.is_empty() || name == CaseScope::ALL_LABEL || unique.contains(&name) {
                continue;
            }
            unique.push(name);
        }
        self.names = unique;

        if let CaseScope::Named(case) = &self.selected {
            if !self.contains(case) {
                self.selected = CaseScope::All;
                return true;
            }
        }
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchKind {
    Cases,
    Timeline,
    Trace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// Monotonic tokens, one latest value tracked per fetch kind.
#[derive(Debug, Default)]
pub struct RequestTokens {
    next: u64,
    latest: HashMap<FetchKind, RequestToken>,
}

impl RequestTokens {
    pub fn issue(&mut self, kind: FetchKind) -> RequestToken {
        self.next += 1;
        let token = RequestToken(self.next);
        self.latest.insert(kind, token);
        token
    }

    pub fn is_latest(&self, kind: FetchKind, token: RequestToken) -> bool {
        self.latest.get(&kind) == Some(&token)
    }
}

/// How responses to overlapping case-scoped fetches are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalePolicy {
    /// Apply only the newest issued fetch, and only while its case is still selected.
    #[default]
    LatestOnly,
    /// Apply every response as it arrives; a slow old response can overwrite newer data.
    ArrivalOrder,
}

impl FromStr for StalePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "latest_only" => Ok(Self::LatestOnly),
            "arrival_order" => Ok(Self::ArrivalOrder),
            other => Err(format!("unknown stale policy '{other}'")),
        }
    }
}

#[cfg(test)]
#[path = "tests/cases_tests.rs"]
mod tests;

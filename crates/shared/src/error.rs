use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error body returned by the retrieval backend, e.g. `{"detail": "Only .txt files"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub detail: Value,
}

impl ApiError {
    pub fn from_body(body: &str) -> Option<Self> {
        serde_json::from_str::<Self>(body).ok()
    }

    pub fn message(&self) -> String {
        match &self.detail {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
#[path = "tests/error_tests.rs"]
mod tests;

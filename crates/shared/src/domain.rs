use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

macro_rules! key_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                RawKey::deserialize(deserializer).map(|raw| Self(raw.into_string()))
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

/// Wire form of a key: backends send ids as strings or as bare numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawKey {
    Text(String),
    Number(serde_json::Number),
}

impl RawKey {
    fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

key_newtype!(SourceId);
key_newtype!(NodeId);

/// Case filter sent as `case_id` on case-scoped endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CaseScope {
    #[default]
    All,
    Named(String),
}

impl CaseScope {
    pub const ALL_LABEL: &'static str = "All";

    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        if name == Self::ALL_LABEL {
            Self::All
        } else {
            Self::Named(name.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// The case name, or `None` for the all-cases scope.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Named(name) => Some(name),
        }
    }

    pub fn as_query_value(&self) -> &str {
        match self {
            Self::All => Self::ALL_LABEL,
            Self::Named(name) => name,
        }
    }
}

impl fmt::Display for CaseScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query_value())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Root,
    #[serde(other)]
    Leaf,
}

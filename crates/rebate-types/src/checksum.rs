use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque audit value supplied alongside an allocation
/// Stored and emitted, never interpreted
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Checksum(String);

impl Checksum {
    pub fn new(value: impl Into<String>) -> Self {
        Checksum(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Checksum {
    fn from(s: &str) -> Self {
        Checksum(s.to_string())
    }
}

impl From<String> for Checksum {
    fn from(s: String) -> Self {
        Checksum(s)
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Privileged role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Reassigns operator and payer
    Owner,
    /// Submits allocations for the current epoch
    Operator,
    /// Funds ended epochs
    Payer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Owner => "owner",
            Role::Operator => "operator",
            Role::Payer => "payer",
        };
        write!(f, "{}", name)
    }
}

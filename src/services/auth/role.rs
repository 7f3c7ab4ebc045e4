use std::fmt;

use serde::{Deserialize, Serialize};

/// Caller role as carried in the `role` claim.
///
/// Unknown role strings are kept verbatim in `Other` so they round-trip
/// unchanged; only `Admin` carries the administrator capability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Intervenant,
    Etudiant,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Intervenant => "intervenant",
            Role::Etudiant => "etudiant",
            Role::Other(raw) => raw,
        }
    }

    pub fn is_administrator(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl From<&str> for Role {
    fn from(raw: &str) -> Self {
        match raw {
            "admin" => Role::Admin,
            "intervenant" => Role::Intervenant,
            "etudiant" => Role::Etudiant,
            other => Role::Other(other.to_string()),
        }
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "admin" | "intervenant" | "etudiant" => Role::from(raw.as_str()),
            _ => Role::Other(raw),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

mod candidate;
mod election;

pub use candidate::{Candidate, NewCandidate, UsersResponse};
pub use election::{Election, ElectionRef, Post};

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// An opaque identifier as issued by the API. Never inspected, only
/// compared and echoed back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

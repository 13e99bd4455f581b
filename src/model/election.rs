use serde::{Deserialize, Serialize};

use super::Id;

/// An election as returned by `/api/admin/elections`. Read-only in this
/// panel; elections are created and modified elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Election {
    /// Election unique ID.
    #[serde(rename = "_id")]
    pub id: Id,
    /// Election title.
    pub title: String,
    /// The admin who owns this election.
    #[serde(rename = "createdBy")]
    pub created_by: Id,
    /// Contestable posts, in server order.
    #[serde(default)]
    pub posts: Vec<Post>,
}

/// A contestable role within an election. Posts have no identity of their
/// own; the title is unique within its election.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
}

/// A candidate's reference to its election. The API is inconsistent here:
/// depending on whether the server populated the relation, the field is
/// either a bare election ID or the full embedded election.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElectionRef {
    Full(Box<Election>),
    Id(Id),
}

impl ElectionRef {
    /// The election ID, regardless of representation.
    pub fn id(&self) -> &Id {
        match self {
            Self::Id(id) => id,
            Self::Full(election) => &election.id,
        }
    }

    /// Find the full election this reference points at, either embedded in
    /// the reference itself or by ID lookup in `elections`.
    pub fn resolve<'a>(&'a self, elections: &'a [Election]) -> Option<&'a Election> {
        match self {
            Self::Full(election) => Some(election),
            Self::Id(id) => elections.iter().find(|e| e.id == *id),
        }
    }
}

impl From<Election> for ElectionRef {
    fn from(election: Election) -> Self {
        Self::Full(Box::new(election))
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ElectionRef, Id};

/// A registered candidate, as returned by the users API. Passwords are
/// write-only: they appear in [`NewCandidate`] and never come back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Candidate unique ID.
    #[serde(rename = "_id")]
    pub id: Id,
    /// Candidate full name.
    pub name: String,
    /// Candidate email address.
    pub email: String,
    /// URL of the hosted profile picture.
    #[serde(rename = "profilePicture")]
    pub profile_picture: Option<String>,
    /// The post this candidate is running for.
    #[serde(rename = "electionPost")]
    pub election_post: Option<String>,
    /// The election this candidate belongs to, if any. Either a bare ID or
    /// a populated election, depending on the endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub election: Option<ElectionRef>,
    /// Server-side creation timestamp.
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Registration payload for `/api/register-candidate`. Field names match
/// the wire format exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCandidate {
    pub name: String,
    pub email: String,
    pub password: String,
    pub election_id: Id,
    pub election_post: String,
    pub profile_picture: String,
}

/// Response shape of `/api/users`. The endpoint returns other user kinds
/// alongside candidates; everything else is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct UsersResponse {
    pub candidates: Vec<Candidate>,
}

//! The manage-candidates page: owns the candidate and election lists and
//! mediates between the registration form, the table, and the delete
//! confirmation step.

mod form;

pub use form::{FormStatus, RegistrationForm};

use std::collections::HashSet;

use log::{error, info};

use crate::api::AdminApi;
use crate::error::Result;
use crate::model::{Candidate, Election, ElectionRef, Id};

/// The delete flow. Clicking delete only records intent; the DELETE request
/// fires on explicit confirmation and the flow always returns to `Idle`
/// afterwards, success or not.
#[derive(Debug, Clone, PartialEq, Eq)]
enum DeleteFlow {
    Idle,
    PendingConfirmation(Id),
}

/// In-memory state of the candidate-management view for one admin.
///
/// Only candidates belonging to an election owned by that admin are kept;
/// the raw users endpoint is unscoped, so the intersection is computed here
/// regardless of what the server claims to filter.
#[derive(Debug)]
pub struct ManageCandidates {
    candidates: Vec<Candidate>,
    elections: Vec<Election>,
    delete: DeleteFlow,
}

impl ManageCandidates {
    /// Fetch users and the admin's elections concurrently and build the
    /// view. The admin identity must already be resolved by the session
    /// provider; there is nothing to show without it.
    ///
    /// The two fetches succeed or fail as a pair: nothing partial is kept.
    pub async fn load<A: AdminApi>(api: &A, admin_id: &Id) -> Result<Self> {
        info!("loading candidates for admin {admin_id}");
        let (users, elections) =
            futures::try_join!(api.fetch_users(), api.fetch_admin_elections(admin_id))?;

        let owned: HashSet<&Id> = elections.iter().map(|e| &e.id).collect();
        let candidates: Vec<Candidate> = users
            .candidates
            .into_iter()
            .filter(|candidate| {
                candidate
                    .election
                    .as_ref()
                    .map_or(false, |reference| owned.contains(reference.id()))
            })
            .collect();
        info!(
            "loaded {} candidates across {} elections",
            candidates.len(),
            elections.len()
        );

        Ok(Self {
            candidates,
            elections,
            delete: DeleteFlow::Idle,
        })
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn elections(&self) -> &[Election] {
        &self.elections
    }

    /// Prepend a freshly registered candidate without re-fetching. Its
    /// election reference is upgraded to the full election when the id is
    /// known locally, so the table can show the title straight away.
    pub fn candidate_added(&mut self, mut candidate: Candidate) {
        if let Some(full) = candidate
            .election
            .as_ref()
            .and_then(|reference| reference.resolve(&self.elections))
        {
            candidate.election = Some(ElectionRef::from(full.clone()));
        }
        self.candidates.insert(0, candidate);
    }

    /// Record the intent to delete a candidate. The list is untouched until
    /// [`confirm_delete`](Self::confirm_delete).
    pub fn request_delete(&mut self, id: Id) {
        self.delete = DeleteFlow::PendingConfirmation(id);
    }

    /// The candidate awaiting confirmation, if any. The front end shows its
    /// confirmation dialog while this is `Some`.
    pub fn pending_delete(&self) -> Option<&Id> {
        match &self.delete {
            DeleteFlow::PendingConfirmation(id) => Some(id),
            DeleteFlow::Idle => None,
        }
    }

    /// Abandon the pending delete; the held id is discarded.
    pub fn cancel_delete(&mut self) {
        self.delete = DeleteFlow::Idle;
    }

    /// Issue the DELETE for the pending candidate. On success the candidate
    /// leaves the list; on failure the list is unchanged and the error is
    /// returned for the front end to display. Either way the confirmation
    /// flow closes and the intent is cleared.
    pub async fn confirm_delete<A: AdminApi>(&mut self, api: &A) -> Result<()> {
        let DeleteFlow::PendingConfirmation(id) =
            std::mem::replace(&mut self.delete, DeleteFlow::Idle)
        else {
            return Ok(());
        };

        match api.delete_user(&id).await {
            Ok(()) => {
                self.candidates.retain(|candidate| candidate.id != id);
                info!("deleted candidate {id}");
                Ok(())
            }
            Err(err) => {
                error!("failed to delete candidate {id}: {err}");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;
    use crate::api::stub::StubApi;
    use crate::model::{Post, UsersResponse};

    fn election(id: &str, admin: &str, titles: &[&str]) -> Election {
        Election {
            id: Id::from(id),
            title: format!("Election {id}"),
            created_by: Id::from(admin),
            posts: titles
                .iter()
                .map(|t| Post {
                    title: t.to_string(),
                })
                .collect(),
        }
    }

    fn candidate(id: &str, election: Option<ElectionRef>) -> Candidate {
        Candidate {
            id: Id::from(id),
            name: format!("Candidate {id}"),
            email: format!("{id}@example.com"),
            profile_picture: None,
            election_post: Some("President".to_string()),
            election,
            created_at: None,
        }
    }

    fn users(candidates: Vec<Candidate>) -> UsersResponse {
        UsersResponse { candidates }
    }

    #[tokio::test]
    async fn load_keeps_only_candidates_in_owned_elections() {
        let api = StubApi::new()
            .with_users(Ok(users(vec![
                candidate("c1", Some(ElectionRef::Id(Id::from("e1")))),
                candidate("c2", Some(ElectionRef::Id(Id::from("other")))),
                candidate("c3", Some(election("e1", "a1", &[]).into())),
                candidate("c4", None),
            ])))
            .with_elections(Ok(vec![election("e1", "a1", &["President"])]));

        let page = ManageCandidates::load(&api, &Id::from("a1")).await.unwrap();
        let ids: Vec<&str> = page.candidates().iter().map(|c| c.id.as_str()).collect();
        // Flat and nested references both count; foreign and missing ones don't.
        assert_eq!(ids, vec!["c1", "c3"]);
        assert_eq!(
            api.calls(),
            vec![
                "GET /api/users".to_string(),
                "GET /api/admin/elections?adminId=a1".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn load_fails_as_a_pair() {
        let api = StubApi::new()
            .with_users(Ok(users(vec![])))
            .with_elections(Err(StubApi::api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Could not fetch required data.",
            )));

        let err = ManageCandidates::load(&api, &Id::from("a1"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Could not fetch required data.");
    }

    #[tokio::test]
    async fn candidate_added_prepends_with_resolved_election() {
        let api = StubApi::new()
            .with_users(Ok(users(vec![candidate(
                "c1",
                Some(ElectionRef::Id(Id::from("e1"))),
            )])))
            .with_elections(Ok(vec![election("e1", "a1", &["President"])]));
        let mut page = ManageCandidates::load(&api, &Id::from("a1")).await.unwrap();

        page.candidate_added(candidate("c2", Some(ElectionRef::Id(Id::from("e1")))));

        assert_eq!(page.candidates().len(), 2);
        let first = &page.candidates()[0];
        assert_eq!(first.id, Id::from("c2"));
        // The bare id was upgraded to the full election.
        match first.election.as_ref().unwrap() {
            ElectionRef::Full(full) => assert_eq!(full.title, "Election e1"),
            ElectionRef::Id(_) => panic!("election reference was not resolved"),
        }
    }

    #[tokio::test]
    async fn delete_needs_confirmation() {
        let api = StubApi::new()
            .with_users(Ok(users(vec![candidate(
                "c1",
                Some(ElectionRef::Id(Id::from("e1"))),
            )])))
            .with_elections(Ok(vec![election("e1", "a1", &[])]))
            .with_delete(Ok(()));
        let mut page = ManageCandidates::load(&api, &Id::from("a1")).await.unwrap();

        page.request_delete(Id::from("c1"));
        // Intent alone changes nothing and sends nothing.
        assert_eq!(page.candidates().len(), 1);
        assert_eq!(page.pending_delete(), Some(&Id::from("c1")));
        assert_eq!(api.calls().len(), 2);

        page.confirm_delete(&api).await.unwrap();
        assert!(page.candidates().is_empty());
        assert!(page.pending_delete().is_none());
        assert_eq!(api.calls().last().unwrap(), "DELETE /api/users/c1");
    }

    #[tokio::test]
    async fn cancelled_delete_discards_the_intent() {
        let api = StubApi::new()
            .with_users(Ok(users(vec![candidate(
                "c1",
                Some(ElectionRef::Id(Id::from("e1"))),
            )])))
            .with_elections(Ok(vec![election("e1", "a1", &[])]));
        let mut page = ManageCandidates::load(&api, &Id::from("a1")).await.unwrap();

        page.request_delete(Id::from("c1"));
        page.cancel_delete();
        assert!(page.pending_delete().is_none());
        assert_eq!(page.candidates().len(), 1);

        // Confirming with no pending intent is a no-op.
        page.confirm_delete(&api).await.unwrap();
        assert_eq!(api.calls().len(), 2);
    }

    #[tokio::test]
    async fn failed_delete_is_surfaced_and_leaves_the_list_unchanged() {
        let api = StubApi::new()
            .with_users(Ok(users(vec![candidate(
                "c1",
                Some(ElectionRef::Id(Id::from("e1"))),
            )])))
            .with_elections(Ok(vec![election("e1", "a1", &[])]))
            .with_delete(Err(StubApi::api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to delete candidate.",
            )));
        let mut page = ManageCandidates::load(&api, &Id::from("a1")).await.unwrap();

        page.request_delete(Id::from("c1"));
        let err = page.confirm_delete(&api).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to delete candidate.");
        // The stale item stays visible, but the dialog still closes.
        assert_eq!(page.candidates().len(), 1);
        assert!(page.pending_delete().is_none());
    }
}

use log::warn;

use crate::api::{AdminApi, ImageFile};
use crate::error::{Error, Result};
use crate::model::{Candidate, Election, Id, NewCandidate, Post};

/// Status of the registration form, for rendering. `Submitting` is what a
/// front end uses to disable the submit control and show its processing
/// indicator; `&mut self` on [`RegistrationForm::submit`] is what actually
/// prevents overlapping submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Submitting,
    /// Submission succeeded; carries the confirmation message.
    Succeeded(String),
    /// Submission failed; carries the error message. Entered fields are
    /// kept for correction.
    Failed(String),
}

/// State of the candidate-registration form.
///
/// Submission is two-phase: the profile picture is uploaded first, and only
/// on success is the candidate registered with the returned URL.
#[derive(Debug)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    picture: Option<ImageFile>,
    election: Option<Id>,
    post: Option<String>,
    status: FormStatus,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            password: String::new(),
            picture: None,
            election: None,
            post: None,
            status: FormStatus::Idle,
        }
    }

    /// Attach (or detach) the profile picture.
    pub fn set_picture(&mut self, picture: Option<ImageFile>) {
        self.picture = picture;
    }

    pub fn picture(&self) -> Option<&ImageFile> {
        self.picture.as_ref()
    }

    /// Select an election. Changing the election invalidates the post
    /// selection, so it is cleared rather than left pointing at a post the
    /// new election may not have.
    pub fn select_election(&mut self, election: Option<Id>) {
        if election != self.election {
            self.post = None;
        }
        self.election = election;
    }

    pub fn election(&self) -> Option<&Id> {
        self.election.as_ref()
    }

    /// Select a post by title. Only meaningful once an election is chosen.
    pub fn select_post(&mut self, post: Option<String>) {
        self.post = post;
    }

    pub fn post(&self) -> Option<&str> {
        self.post.as_deref()
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    /// The posts selectable for the currently chosen election. Empty when
    /// no election is selected, or the selected one is unknown or postless.
    pub fn available_posts<'a>(&self, elections: &'a [Election]) -> &'a [Post] {
        self.election
            .as_ref()
            .and_then(|id| elections.iter().find(|e| e.id == *id))
            .map(|e| e.posts.as_slice())
            .unwrap_or(&[])
    }

    /// Submit the form: validate, upload the picture, then register the
    /// candidate with the uploaded URL.
    ///
    /// On success all fields are cleared and the created candidate is
    /// returned so the caller can append it to its list. On failure the
    /// fields are left intact and the error doubles as the form's
    /// [`FormStatus::Failed`] message.
    pub async fn submit<A: AdminApi>(&mut self, api: &A) -> Result<Candidate> {
        let Some(picture) = self.picture.clone() else {
            return Err(self.fail(Error::validation("Profile picture is required.")));
        };
        let Some(election_id) = self.election.clone() else {
            return Err(self.fail(Error::validation("Please select an election.")));
        };
        let Some(post) = self.post.clone() else {
            return Err(self.fail(Error::validation("Please select a post.")));
        };

        self.status = FormStatus::Submitting;

        let uploaded = match api.upload_image(&picture).await {
            Ok(uploaded) => uploaded,
            Err(err) => return Err(self.fail(err)),
        };

        let payload = NewCandidate {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            election_id,
            election_post: post,
            profile_picture: uploaded.url.clone(),
        };
        let candidate = match api.register_candidate(&payload).await {
            Ok(candidate) => candidate,
            Err(err) => {
                // The image is already hosted and there is no delete-image
                // endpoint, so it is now orphaned.
                warn!("registration failed after upload; orphaned image at {}", uploaded.url);
                return Err(self.fail(err));
            }
        };

        self.status =
            FormStatus::Succeeded(format!("Candidate {} registered successfully!", self.name));
        self.clear_fields();
        Ok(candidate)
    }

    fn fail(&mut self, err: Error) -> Error {
        self.status = FormStatus::Failed(err.to_string());
        err
    }

    fn clear_fields(&mut self) {
        self.name.clear();
        self.email.clear();
        self.password.clear();
        self.picture = None;
        self.election = None;
        self.post = None;
    }
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self::new()
    }
}

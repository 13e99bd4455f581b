use async_trait::async_trait;
use log::debug;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::{AdminApi, ImageFile, UploadedImage};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{Candidate, Election, Id, NewCandidate, UsersResponse};

/// The real, reqwest-backed API client.
pub struct HttpApi {
    base_url: String,
    client: Client,
}

impl HttpApi {
    pub fn new(config: &Config) -> Result<Self> {
        let timeout = config
            .request_timeout()
            .to_std()
            .map_err(|_| Error::Config("request timeout out of range".to_string()))?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: config.api_url().to_string(),
            client,
        })
    }

    /// Join the base URL and a path, tolerating slashes on either side.
    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl AdminApi for HttpApi {
    async fn fetch_users(&self) -> Result<UsersResponse> {
        let url = self.endpoint("api/users");
        debug!("GET {url}");
        let response = self.client.get(url).send().await?;
        check_json(response, "Could not fetch required data.").await
    }

    async fn fetch_admin_elections(&self, admin_id: &Id) -> Result<Vec<Election>> {
        let url = self.endpoint("api/admin/elections");
        debug!("GET {url}?adminId={admin_id}");
        let response = self
            .client
            .get(url)
            .query(&[("adminId", admin_id.as_str())])
            .send()
            .await?;
        check_json(response, "Could not fetch required data.").await
    }

    async fn upload_image(&self, image: &ImageFile) -> Result<UploadedImage> {
        let url = self.endpoint("api/upload-image");
        debug!("POST {url} ({} bytes)", image.bytes.len());
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)?;
        let form = Form::new().part("file", part);
        let response = self.client.post(url).multipart(form).send().await?;
        check_json(response, "Image upload failed.").await
    }

    async fn register_candidate(&self, candidate: &NewCandidate) -> Result<Candidate> {
        let url = self.endpoint("api/register-candidate");
        debug!("POST {url}");
        let response = self.client.post(url).json(candidate).send().await?;
        check_json(response, "Failed to register candidate.").await
    }

    async fn delete_user(&self, id: &Id) -> Result<()> {
        let url = self.endpoint(&format!("api/users/{id}"));
        debug!("DELETE {url}");
        let response = self.client.delete(url).send().await?;
        check_ok(response, "Failed to delete candidate.").await
    }
}

/// Turn a successful response into `T`, or a non-OK one into an
/// [`Error::Api`] carrying the server's message.
async fn check_json<T: DeserializeOwned>(response: Response, fallback: &str) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        Ok(response.json().await?)
    } else {
        let body = response.bytes().await.unwrap_or_default();
        Err(api_error(status, &body, fallback))
    }
}

/// Like [`check_json`] for endpoints whose success body we don't care about.
async fn check_ok(response: Response, fallback: &str) -> Result<()> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        let body = response.bytes().await.unwrap_or_default();
        Err(api_error(status, &body, fallback))
    }
}

/// Extract the human-readable message from an error body. The API is not
/// consistent about the field name: uploads use `error`, registration uses
/// `message`. Anything unparseable falls back to the generic text.
fn api_error(status: StatusCode, body: &[u8], fallback: &str) -> Error {
    let message = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .or_else(|| value.get("message"))
                .and_then(|field| field.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| fallback.to_string());
    Error::Api { status, message }
}

//! The transport seam between the panel and the election API.
//!
//! All orchestration code talks to the [`AdminApi`] trait; the real
//! implementation is [`HttpApi`], and tests script an in-memory double.

mod http;

pub use http::HttpApi;

use std::fs;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::Result;
use crate::model::{Candidate, Election, Id, NewCandidate, UsersResponse};

/// The slice of the election API this panel consumes.
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// GET `/api/users`.
    async fn fetch_users(&self) -> Result<UsersResponse>;

    /// GET `/api/admin/elections?adminId=<id>`.
    async fn fetch_admin_elections(&self, admin_id: &Id) -> Result<Vec<Election>>;

    /// POST `/api/upload-image` with the file as multipart field `file`.
    async fn upload_image(&self, image: &ImageFile) -> Result<UploadedImage>;

    /// POST `/api/register-candidate`.
    async fn register_candidate(&self, candidate: &NewCandidate) -> Result<Candidate>;

    /// DELETE `/api/users/:id`.
    async fn delete_user(&self, id: &Id) -> Result<()>;
}

/// An image read into memory, ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    /// Build an image from raw bytes, guessing the content type from the
    /// file extension.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = guess_content_type(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Read an image off disk. The multipart file name is the path's final
    /// component.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload");
        Ok(Self::new(file_name, bytes))
    }
}

/// Success body of the image-upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadedImage {
    pub url: String,
}

fn guess_content_type(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

use std::env;

use chrono::Duration;

use crate::error::{Error, Result};
use crate::model::Id;

/// Default API base URL when `ADMIN_PANEL_API_URL` is unset.
const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Default per-request timeout in seconds when `ADMIN_PANEL_TIMEOUT` is unset.
const DEFAULT_TIMEOUT: u32 = 30;

/// Application configuration, derived from `ADMIN_PANEL_*` environment
/// variables. Command-line flags may override individual fields after
/// loading.
#[derive(Debug, Clone)]
pub struct Config {
    api_url: String,
    admin_id: Option<Id>,
    request_timeout: u32,
}

impl Config {
    /// Load the configuration from the environment.
    pub fn from_env() -> Result<Self> {
        let api_url = env::var("ADMIN_PANEL_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        let admin_id = env::var("ADMIN_PANEL_ADMIN_ID")
            .ok()
            .filter(|id| !id.is_empty())
            .map(Id::from);
        let request_timeout = match env::var("ADMIN_PANEL_TIMEOUT") {
            Ok(raw) => raw.parse().map_err(|_| {
                Error::Config(format!("ADMIN_PANEL_TIMEOUT is not a number: {raw:?}"))
            })?,
            Err(_) => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            api_url,
            admin_id,
            request_timeout,
        })
    }

    /// Base URL of the election API.
    /// Configured via `ADMIN_PANEL_API_URL`.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// The authenticated admin's identity, as resolved by the session
    /// provider. `None` means the session has not resolved; the panel must
    /// stay inert and issue no requests.
    /// Configured via `ADMIN_PANEL_ADMIN_ID`.
    pub fn admin_id(&self) -> Option<&Id> {
        self.admin_id.as_ref()
    }

    /// Timeout applied to every API request.
    /// Configured via `ADMIN_PANEL_TIMEOUT` (seconds).
    pub fn request_timeout(&self) -> Duration {
        Duration::seconds(self.request_timeout.into())
    }

    /// Replace the API base URL (command-line override).
    pub fn set_api_url(&mut self, url: String) {
        self.api_url = url;
    }

    /// Replace the admin identity (command-line override).
    pub fn set_admin_id(&mut self, id: Id) {
        self.admin_id = Some(id);
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            admin_id: None,
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

//! GitHub connection.
//!
//! The OAuth dance happens entirely between the browser, the backend and
//! GitHub. The client only opens [`PulseClient::github_authorize_url`] and,
//! once redirected back, reads the outcome with [`OAuthCallback::from_url`].

use pulse_types::{Acknowledgement, ClientError, GithubProfile, GithubStatus};
use reqwest::Url;

use crate::client::PulseClient;

impl PulseClient {
    /// Backend endpoint that redirects the browser to GitHub's consent page.
    #[must_use]
    pub fn github_authorize_url(&self) -> String {
        self.url("/v1/auth/github")
    }

    /// `GET /v1/auth/users/me/github-status`.
    pub async fn github_status(&self) -> Result<GithubStatus, ClientError> {
        self.get("/v1/auth/users/me/github-status").await
    }

    /// `GET /v1/auth/users/me/github-profile`.
    pub async fn github_profile(&self) -> Result<GithubProfile, ClientError> {
        self.get("/v1/auth/users/me/github-profile").await
    }

    /// `DELETE /v1/auth/users/me/github-connection`.
    pub async fn disconnect_github(&self) -> Result<Acknowledgement, ClientError> {
        self.delete("/v1/auth/users/me/github-connection").await
    }
}

/// Outcome of the OAuth redirect back to the settings page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OAuthCallback {
    /// `?github_connected=true&username=...`
    Connected {
        /// GitHub login, when the backend passed it along.
        username: Option<String>,
    },
    /// `?error=...`
    Failed {
        /// Reason given by the backend.
        error: String,
    },
}

impl OAuthCallback {
    /// Read the outcome from the redirect URL. `None` when the URL carries
    /// no OAuth result.
    pub fn from_url(url: &str) -> Result<Option<Self>, ClientError> {
        let url = Url::parse(url).map_err(|e| ClientError::InvalidInput(format!("invalid URL: {e}")))?;
        let mut connected = false;
        let mut username = None;
        let mut error = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "github_connected" => connected = value == "true",
                "username" => username = Some(value.into_owned()).filter(|u| !u.is_empty()),
                "error" => error = Some(value.into_owned()),
                _ => {}
            }
        }
        Ok(match (error, connected) {
            (Some(error), _) => Some(Self::Failed { error }),
            (None, true) => Some(Self::Connected { username }),
            (None, false) => None,
        })
    }
}

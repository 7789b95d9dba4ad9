//! System and API settings.

use pulse_types::{ApiSettings, ClientError, ConnectionTest, SettingsResponse, SystemSettings};

use crate::client::PulseClient;

impl PulseClient {
    /// `GET /v1/settings/`: system and API settings together.
    pub async fn settings(&self) -> Result<SettingsResponse, ClientError> {
        self.get("/v1/settings/").await
    }

    /// `GET /v1/settings/system`.
    pub async fn system_settings(&self) -> Result<SystemSettings, ClientError> {
        self.get("/v1/settings/system").await
    }

    /// `PUT /v1/settings/system`. Rejected locally when an interval is zero.
    pub async fn update_system_settings(
        &self,
        settings: &SystemSettings,
    ) -> Result<SystemSettings, ClientError> {
        settings.validate()?;
        self.put("/v1/settings/system", settings).await
    }

    /// `GET /v1/settings/api`. Secrets come back masked.
    pub async fn api_settings(&self) -> Result<ApiSettings, ClientError> {
        self.get("/v1/settings/api").await
    }

    /// `PUT /v1/settings/api`. Rejected locally when a key has the wrong
    /// prefix.
    pub async fn update_api_settings(
        &self,
        settings: &ApiSettings,
    ) -> Result<ApiSettings, ClientError> {
        settings.validate()?;
        self.put("/v1/settings/api", settings).await
    }

    /// `POST /v1/settings/test-openai`.
    pub async fn test_openai(&self) -> Result<ConnectionTest, ClientError> {
        self.post_empty("/v1/settings/test-openai").await
    }

    /// `POST /v1/settings/test-github`.
    pub async fn test_github(&self) -> Result<ConnectionTest, ClientError> {
        self.post_empty("/v1/settings/test-github").await
    }
}

//! Notifications.

use pulse_types::{Acknowledgement, ClientError, Notification, NotificationCreate, NotificationQuery};

use crate::client::PulseClient;

impl PulseClient {
    /// `GET /v1/notifications/`, newest first.
    pub async fn notifications(
        &self,
        query: &NotificationQuery,
    ) -> Result<Vec<Notification>, ClientError> {
        self.get_query("/v1/notifications/", query).await
    }

    /// `POST /v1/notifications/`.
    pub async fn create_notification(
        &self,
        notification: &NotificationCreate,
    ) -> Result<Notification, ClientError> {
        if notification.title.trim().is_empty() {
            return Err(ClientError::InvalidInput("notification title is empty".into()));
        }
        self.post("/v1/notifications/", notification).await
    }

    /// `PUT /v1/notifications/{id}/read`.
    pub async fn mark_notification_read(&self, id: i64) -> Result<Acknowledgement, ClientError> {
        self.put_empty(&format!("/v1/notifications/{id}/read")).await
    }

    /// `PUT /v1/notifications/read-all`.
    pub async fn mark_all_notifications_read(&self) -> Result<Acknowledgement, ClientError> {
        self.put_empty("/v1/notifications/read-all").await
    }

    /// `DELETE /v1/notifications/{id}`.
    pub async fn delete_notification(&self, id: i64) -> Result<Acknowledgement, ClientError> {
        self.delete(&format!("/v1/notifications/{id}")).await
    }
}

//! Monitoring runs, activities and dashboard counters.

use pulse_types::{
    Activity, ActivityQuery, ClientError, DashboardStats, MonitoringResult,
    ProfileMonitoringResult,
};

use crate::client::PulseClient;

impl PulseClient {
    /// `POST /v1/monitoring/run-monitoring`: poll every active profile now.
    pub async fn run_monitoring(&self) -> Result<MonitoringResult, ClientError> {
        self.post_empty("/v1/monitoring/run-monitoring").await
    }

    /// `POST /v1/monitoring/monitor-profile/{id}`: poll one profile now.
    pub async fn monitor_profile(
        &self,
        profile_id: i64,
    ) -> Result<ProfileMonitoringResult, ClientError> {
        self.post_empty(&format!("/v1/monitoring/monitor-profile/{profile_id}"))
            .await
    }

    /// `GET /v1/monitoring/stats`.
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ClientError> {
        self.get("/v1/monitoring/stats").await
    }

    /// `GET /v1/monitoring/activities`.
    pub async fn activities(&self, query: &ActivityQuery) -> Result<Vec<Activity>, ClientError> {
        self.get_query("/v1/monitoring/activities", query).await
    }

    /// `GET /v1/monitoring/activities/{id}`.
    pub async fn activity(&self, id: i64) -> Result<Activity, ClientError> {
        self.get(&format!("/v1/monitoring/activities/{id}")).await
    }
}

//! Live data provider backed by the portal API.

use std::sync::Arc;

use crate::api::{ApiClient, ApiError};
use crate::models::{
    Appointment, LabResult, LabResultPage, Notification, NotificationPage, Prescription,
};

use super::DataProvider;

/// Fetches widget data over the authenticated API client. The client's
/// global unauthorized policy applies to every call made here.
pub struct LiveProvider {
    api: Arc<ApiClient>,
}

impl LiveProvider {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

impl DataProvider for LiveProvider {
    async fn appointments(&self) -> Result<Vec<Appointment>, ApiError> {
        self.api.get_json("/api/appointments/appointments").await
    }

    async fn prescriptions(&self) -> Result<Vec<Prescription>, ApiError> {
        self.api.get_json("/api/prescriptions/prescriptions").await
    }

    async fn lab_results(&self, patient_id: &str) -> Result<Vec<LabResult>, ApiError> {
        let page: LabResultPage = self
            .api
            .get_json(&format!("/api/labs/results/{patient_id}"))
            .await?;
        Ok(page.results)
    }

    async fn notifications(&self) -> Result<Vec<Notification>, ApiError> {
        let page: NotificationPage = self.api.get_json("/api/notifications").await?;
        Ok(page.notifications)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PortalConfig;
    use crate::token_store::TokenStore;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    fn stub_router() -> Router {
        Router::new()
            .route(
                "/api/appointments/appointments",
                get(|| async {
                    Json(json!([{
                        "id": "apt_1",
                        "patient_id": "p_1",
                        "patient_name": "Jean Paul Uwimana",
                        "doctor_id": "d_1",
                        "doctor_name": "Dr. Sarah Johnson",
                        "doctor_specialization": "General Medicine",
                        "hospital_name": "Kigali Central Hospital",
                        "appointment_type": "consultation",
                        "status": "pending",
                        "preferred_date": "2024-02-01T10:00:00Z",
                        "preferred_time_slot": "10:00 AM"
                    }]))
                }),
            )
            .route(
                "/api/labs/results/p_1",
                get(|| async {
                    Json(json!({
                        "patient_id": "p_1",
                        "results": [{
                            "id": "lab_1",
                            "patient_id": "p_1",
                            "test_name": "Complete Blood Count (CBC)",
                            "test_type": "hematology",
                            "order_date": "2024-01-12T08:00:00Z",
                            "status": "pending",
                            "priority": "normal",
                            "ordered_by": "Dr. Sarah Johnson"
                        }]
                    }))
                }),
            )
            .route(
                "/api/notifications",
                get(|| async {
                    Json(json!({
                        "notifications": [{
                            "id": "notif_1",
                            "patient_id": "p_1",
                            "type": "lab_result",
                            "title": "Lab Results Available",
                            "message": "Your blood test results are ready",
                            "priority": "normal",
                            "timestamp": "2024-01-15T13:00:00Z",
                            "read": false
                        }]
                    }))
                }),
            )
    }

    async fn provider_for_stub(dir: &tempfile::TempDir) -> LiveProvider {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, stub_router()).await.unwrap();
        });

        let mut config = PortalConfig::new(format!("http://{addr}"));
        config.data_dir = dir.path().to_path_buf();
        let tokens = Arc::new(TokenStore::new(config.token_path()));
        LiveProvider::new(Arc::new(ApiClient::new(&config, tokens)))
    }

    #[tokio::test]
    async fn appointments_decode_from_plain_list() {
        let dir = tempfile::tempdir().unwrap();
        let provider = provider_for_stub(&dir).await;

        let appointments = provider.appointments().await.unwrap();
        assert_eq!(appointments.len(), 1);
        assert_eq!(appointments[0].patient_name, "Jean Paul Uwimana");
    }

    #[tokio::test]
    async fn lab_results_unwrap_the_page_envelope() {
        let dir = tempfile::tempdir().unwrap();
        let provider = provider_for_stub(&dir).await;

        let results = provider.lab_results("p_1").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].test_type, "hematology");
    }

    #[tokio::test]
    async fn notifications_unwrap_the_page_envelope() {
        let dir = tempfile::tempdir().unwrap();
        let provider = provider_for_stub(&dir).await;

        let notifications = provider.notifications().await.unwrap();
        assert_eq!(notifications.len(), 1);
        assert!(!notifications[0].read);
    }
}

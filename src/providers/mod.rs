//! Data provider seam for dashboard widgets.
//!
//! Widgets consume one interface; the composition root picks the
//! implementation: [`LiveProvider`] over the API client, or
//! [`FixtureProvider`] serving the embedded demo data. This replaces
//! per-widget try/catch-with-hardcoded-object fallback with a single
//! swap point.

pub mod fixture;
pub mod live;

use std::future::Future;

use crate::api::ApiError;
use crate::models::{Appointment, LabResult, Notification, Prescription};

pub use fixture::FixtureProvider;
pub use live::LiveProvider;

/// Read surface the role dashboards are built on.
pub trait DataProvider: Send + Sync {
    /// Appointments visible to the signed-in user.
    fn appointments(&self) -> impl Future<Output = Result<Vec<Appointment>, ApiError>> + Send;

    /// Prescriptions visible to the signed-in user.
    fn prescriptions(&self) -> impl Future<Output = Result<Vec<Prescription>, ApiError>> + Send;

    /// Lab results for one patient.
    fn lab_results(
        &self,
        patient_id: &str,
    ) -> impl Future<Output = Result<Vec<LabResult>, ApiError>> + Send;

    /// Notifications for the signed-in user.
    fn notifications(&self) -> impl Future<Output = Result<Vec<Notification>, ApiError>> + Send;
}

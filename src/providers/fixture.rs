//! Fixture data provider.
//!
//! Serves the demo dataset the portal ships for offline use and UI
//! work: one patient with a follow-up appointment, an antibiotic
//! prescription, a completed CBC panel, and the standard reminder
//! notifications. Infallible by construction.

use chrono::{Duration, Utc};

use crate::api::ApiError;
use crate::models::enums::{
    AbnormalFlag, AppointmentStatus, AppointmentType, LabResultStatus, NotificationKind,
    PrescriptionStatus, Priority,
};
use crate::models::{
    Appointment, LabParameter, LabResult, Notification, PrescribedMedication, Prescription,
};

use super::DataProvider;

const DEMO_PATIENT_ID: &str = "demo_1";
const DEMO_PATIENT_NAME: &str = "Jean Paul Uwimana";
const DEMO_DOCTOR_NAME: &str = "Dr. Sarah Johnson";

/// Demo dataset provider, selected at composition time instead of the
/// live API.
#[derive(Default)]
pub struct FixtureProvider;

impl FixtureProvider {
    pub fn new() -> Self {
        Self
    }
}

impl DataProvider for FixtureProvider {
    async fn appointments(&self) -> Result<Vec<Appointment>, ApiError> {
        Ok(vec![Appointment {
            id: "apt_demo_1".into(),
            patient_id: DEMO_PATIENT_ID.into(),
            patient_name: DEMO_PATIENT_NAME.into(),
            doctor_id: "doc_demo_1".into(),
            doctor_name: DEMO_DOCTOR_NAME.into(),
            doctor_specialization: "General Medicine".into(),
            hospital_name: "Kigali Central Hospital".into(),
            appointment_type: AppointmentType::FollowUp,
            status: AppointmentStatus::Confirmed,
            preferred_date: Utc::now() + Duration::days(1),
            preferred_time_slot: "10:00 AM".into(),
            symptoms: Some("Persistent cough, mild fever".into()),
            notes: None,
        }])
    }

    async fn prescriptions(&self) -> Result<Vec<Prescription>, ApiError> {
        Ok(vec![Prescription {
            id: "rx_demo_1".into(),
            patient_id: DEMO_PATIENT_ID.into(),
            patient_name: DEMO_PATIENT_NAME.into(),
            doctor_id: "doc_demo_1".into(),
            doctor_name: DEMO_DOCTOR_NAME.into(),
            status: PrescriptionStatus::Prescribed,
            diagnosis: Some("Upper respiratory tract infection".into()),
            medications: vec![
                PrescribedMedication {
                    name: "Amoxicillin".into(),
                    dosage: "500mg".into(),
                    frequency: "3x daily".into(),
                    duration: "7 days".into(),
                    instructions: Some("Complete the full course".into()),
                },
                PrescribedMedication {
                    name: "Paracetamol".into(),
                    dosage: "500mg".into(),
                    frequency: "Every 6-8 hours".into(),
                    duration: "As needed".into(),
                    instructions: Some("For fever or pain".into()),
                },
            ],
            notes: Some("Return if fever persists more than 3 days".into()),
            follow_up_date: Some(Utc::now() + Duration::days(7)),
            created_at: Utc::now() - Duration::days(1),
        }])
    }

    async fn lab_results(&self, patient_id: &str) -> Result<Vec<LabResult>, ApiError> {
        Ok(vec![LabResult {
            id: "lab_demo_1".into(),
            patient_id: patient_id.into(),
            test_name: "Complete Blood Count (CBC)".into(),
            test_type: "hematology".into(),
            order_date: Utc::now() - Duration::days(3),
            completed_date: Some(Utc::now() - Duration::days(2)),
            status: LabResultStatus::Completed,
            priority: Priority::Normal,
            ordered_by: DEMO_DOCTOR_NAME.into(),
            results: vec![
                LabParameter {
                    parameter: "White Blood Cells".into(),
                    value: "7.2".into(),
                    unit: "10^3/μL".into(),
                    range: "4.5-11.0".into(),
                    status: AbnormalFlag::Normal,
                },
                LabParameter {
                    parameter: "Hemoglobin".into(),
                    value: "14.2".into(),
                    unit: "g/dL".into(),
                    range: "12.0-15.5".into(),
                    status: AbnormalFlag::Normal,
                },
                LabParameter {
                    parameter: "Platelets".into(),
                    value: "280".into(),
                    unit: "10^3/μL".into(),
                    range: "150-450".into(),
                    status: AbnormalFlag::Normal,
                },
            ],
            interpretation: Some(
                "All blood parameters are within normal limits. No signs of infection or anemia."
                    .into(),
            ),
            resistance_detected: false,
        }])
    }

    async fn notifications(&self) -> Result<Vec<Notification>, ApiError> {
        let now = Utc::now();
        Ok(vec![
            Notification {
                id: "notif_demo_1".into(),
                patient_id: DEMO_PATIENT_ID.into(),
                kind: NotificationKind::Medication,
                title: "Medication Reminder".into(),
                message: "Time to take your Amoxicillin 500mg (2:00 PM dose)".into(),
                priority: Priority::High,
                timestamp: now - Duration::hours(1),
                read: false,
                action_url: Some("/patient/reminders".into()),
            },
            Notification {
                id: "notif_demo_2".into(),
                patient_id: DEMO_PATIENT_ID.into(),
                kind: NotificationKind::Appointment,
                title: "Appointment".into(),
                message: "Follow-up visit tomorrow at 10:00 AM".into(),
                priority: Priority::Normal,
                timestamp: now - Duration::hours(4),
                read: false,
                action_url: None,
            },
            Notification {
                id: "notif_demo_3".into(),
                patient_id: DEMO_PATIENT_ID.into(),
                kind: NotificationKind::LabResult,
                title: "Lab Results".into(),
                message: "Blood test results are ready".into(),
                priority: Priority::Normal,
                timestamp: now - Duration::days(1),
                read: true,
                action_url: None,
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_is_infallible_and_consistent() {
        let provider = FixtureProvider::new();

        let appointments = provider.appointments().await.unwrap();
        assert_eq!(appointments[0].patient_name, DEMO_PATIENT_NAME);

        let prescriptions = provider.prescriptions().await.unwrap();
        assert_eq!(prescriptions[0].medications.len(), 2);
        assert_eq!(prescriptions[0].medications[0].name, "Amoxicillin");

        let labs = provider.lab_results("p_42").await.unwrap();
        assert_eq!(labs[0].patient_id, "p_42");
        assert_eq!(labs[0].status, LabResultStatus::Completed);
    }

    #[tokio::test]
    async fn notifications_cover_the_standard_reminders() {
        let provider = FixtureProvider::new();
        let notifications = provider.notifications().await.unwrap();

        assert_eq!(notifications.len(), 3);
        let kinds: Vec<_> = notifications.iter().map(|n| n.kind).collect();
        assert!(kinds.contains(&NotificationKind::Medication));
        assert!(kinds.contains(&NotificationKind::Appointment));
        assert!(kinds.contains(&NotificationKind::LabResult));
        assert_eq!(notifications.iter().filter(|n| !n.read).count(), 2);
    }
}

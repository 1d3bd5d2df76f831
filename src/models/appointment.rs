use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{AppointmentStatus, AppointmentType};

/// A booked appointment, as listed by `GET /api/appointments/appointments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub doctor_id: String,
    pub doctor_name: String,
    pub doctor_specialization: String,
    pub hospital_name: String,
    pub appointment_type: AppointmentType,
    pub status: AppointmentStatus,
    pub preferred_date: DateTime<Utc>,
    pub preferred_time_slot: String,
    #[serde(default)]
    pub symptoms: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_listing() {
        let json = r#"{
            "id": "apt_1",
            "patient_id": "p_1",
            "patient_name": "Jean Paul Uwimana",
            "doctor_id": "d_1",
            "doctor_name": "Dr. Sarah Johnson",
            "doctor_specialization": "General Medicine",
            "hospital_name": "Kigali Central Hospital",
            "appointment_type": "follow_up",
            "status": "confirmed",
            "preferred_date": "2024-02-01T10:00:00Z",
            "preferred_time_slot": "10:00 AM"
        }"#;
        let apt: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(apt.appointment_type, AppointmentType::FollowUp);
        assert_eq!(apt.status, AppointmentStatus::Confirmed);
        assert!(apt.symptoms.is_none());
    }
}

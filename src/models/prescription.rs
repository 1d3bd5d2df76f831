use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::PrescriptionStatus;

/// One prescribed medication line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrescribedMedication {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
    #[serde(default)]
    pub instructions: Option<String>,
}

/// A prescription, as listed by `GET /api/prescriptions/prescriptions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prescription {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub doctor_id: String,
    pub doctor_name: String,
    pub status: PrescriptionStatus,
    #[serde(default)]
    pub diagnosis: Option<String>,
    pub medications: Vec<PrescribedMedication>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub follow_up_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_medication_lines() {
        let json = r#"{
            "id": "rx_1",
            "patient_id": "p_1",
            "patient_name": "Jean Paul Uwimana",
            "doctor_id": "d_1",
            "doctor_name": "Dr. Sarah Johnson",
            "status": "prescribed",
            "diagnosis": "Upper respiratory tract infection",
            "medications": [
                {
                    "name": "Amoxicillin",
                    "dosage": "500mg",
                    "frequency": "3x daily",
                    "duration": "7 days",
                    "instructions": "Take with food"
                }
            ],
            "created_at": "2024-01-15T09:30:00Z"
        }"#;
        let rx: Prescription = serde_json::from_str(json).unwrap();
        assert_eq!(rx.status, PrescriptionStatus::Prescribed);
        assert_eq!(rx.medications.len(), 1);
        assert_eq!(rx.medications[0].name, "Amoxicillin");
        assert!(rx.follow_up_date.is_none());
    }
}

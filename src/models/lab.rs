use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{AbnormalFlag, LabResultStatus, Priority};

/// One measured parameter inside a lab result panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabParameter {
    pub parameter: String,
    pub value: String,
    pub unit: String,
    pub range: String,
    pub status: AbnormalFlag,
}

/// A lab result, as returned by `GET /api/labs/results/{patient_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabResult {
    pub id: String,
    pub patient_id: String,
    pub test_name: String,
    pub test_type: String,
    pub order_date: DateTime<Utc>,
    #[serde(default)]
    pub completed_date: Option<DateTime<Utc>>,
    pub status: LabResultStatus,
    pub priority: Priority,
    pub ordered_by: String,
    #[serde(default)]
    pub results: Vec<LabParameter>,
    #[serde(default)]
    pub interpretation: Option<String>,
    #[serde(default)]
    pub resistance_detected: bool,
}

/// Envelope around a patient's lab results.
#[derive(Debug, Clone, Deserialize)]
pub struct LabResultPage {
    pub patient_id: String,
    pub results: Vec<LabResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_completed_panel() {
        let json = r#"{
            "id": "lab_1",
            "patient_id": "p_1",
            "test_name": "Complete Blood Count (CBC)",
            "test_type": "hematology",
            "order_date": "2024-01-12T08:00:00Z",
            "completed_date": "2024-01-13T08:00:00Z",
            "status": "completed",
            "priority": "normal",
            "ordered_by": "Dr. Sarah Johnson",
            "results": [
                {"parameter": "Hemoglobin", "value": "14.2", "unit": "g/dL", "range": "12.0-15.5", "status": "normal"},
                {"parameter": "Organism", "value": "E. coli", "unit": "", "range": "No growth expected", "status": "abnormal"}
            ],
            "interpretation": "All blood parameters are within normal limits."
        }"#;
        let lab: LabResult = serde_json::from_str(json).unwrap();
        assert_eq!(lab.status, LabResultStatus::Completed);
        assert_eq!(lab.results.len(), 2);
        assert_eq!(lab.results[0].status, AbnormalFlag::Normal);
        assert_eq!(lab.results[1].status, AbnormalFlag::Abnormal);
        assert!(!lab.resistance_detected);
    }
}

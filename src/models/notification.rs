use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{NotificationKind, Priority};

/// A user-facing notification, as listed by `GET /api/notifications`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub patient_id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub priority: Priority,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    #[serde(default)]
    pub action_url: Option<String>,
}

/// Envelope around a notification listing.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationPage {
    pub notifications: Vec<Notification>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_type_field_into_kind() {
        let json = r#"{
            "id": "notif_1",
            "patient_id": "p_1",
            "type": "medication",
            "title": "Medication Reminder",
            "message": "Time to take your Amoxicillin 500mg (2:00 PM dose)",
            "priority": "high",
            "timestamp": "2024-01-15T13:00:00Z",
            "read": false,
            "action_url": "/patient/reminders"
        }"#;
        let n: Notification = serde_json::from_str(json).unwrap();
        assert_eq!(n.kind, NotificationKind::Medication);
        assert_eq!(n.priority, Priority::High);
        assert!(!n.read);
    }
}

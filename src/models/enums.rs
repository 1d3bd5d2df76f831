use serde::{Deserialize, Serialize};

/// Error for string → enum conversions.
#[derive(Debug, thiserror::Error)]
#[error("Invalid {field} value: '{value}'")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// Serialized form on the wire is the lowercase string literal.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Role {
    Patient => "patient",
    Doctor => "doctor",
    Admin => "admin",
    Ai => "ai",
});

str_enum!(UserStatus {
    Active => "active",
    Inactive => "inactive",
    Pending => "pending",
    Suspended => "suspended",
});

str_enum!(AppointmentStatus {
    Pending => "pending",
    Confirmed => "confirmed",
    Cancelled => "cancelled",
    Completed => "completed",
    NoShow => "no_show",
});

str_enum!(AppointmentType {
    Consultation => "consultation",
    FollowUp => "follow_up",
    Emergency => "emergency",
    Checkup => "checkup",
    PrescriptionReview => "prescription_review",
});

str_enum!(PrescriptionStatus {
    Draft => "draft",
    Prescribed => "prescribed",
    Dispensed => "dispensed",
    Completed => "completed",
    Cancelled => "cancelled",
});

str_enum!(LabResultStatus {
    Pending => "pending",
    Completed => "completed",
});

str_enum!(AbnormalFlag {
    Normal => "normal",
    Abnormal => "abnormal",
});

str_enum!(NotificationKind {
    Appointment => "appointment",
    Medication => "medication",
    LabResult => "lab_result",
    AiInsight => "ai_insight",
    System => "system",
});

str_enum!(Priority {
    Low => "low",
    Normal => "normal",
    High => "high",
});

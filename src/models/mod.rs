//! Wire-level data models shared across the portal client.

pub mod appointment;
pub mod chat;
pub mod enums;
pub mod lab;
pub mod notification;
pub mod prescription;
pub mod user;

pub use appointment::Appointment;
pub use chat::{ChatMessage, ChatSender};
pub use enums::{
    AbnormalFlag, AppointmentStatus, AppointmentType, InvalidEnum, LabResultStatus,
    NotificationKind, Priority, PrescriptionStatus, Role, UserStatus,
};
pub use lab::{LabParameter, LabResult, LabResultPage};
pub use notification::{Notification, NotificationPage};
pub use prescription::{PrescribedMedication, Prescription};
pub use user::User;

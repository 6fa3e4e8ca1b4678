//! Domain types for the home-safety service

pub mod alert;
pub mod hazard;
pub mod records;

pub use alert::{ActiveAlert, PopupNotification};
pub use hazard::{HazardKind, HazardProfile, Severity};
pub use records::{
    AddressInput, AlertRecord, AttomSnapshotRecord, ContactRecord, EmergencyContactInput,
    HomeInput, HomeRecord, MockDataSet, PropertyDetails, PropertySource, TaskCompletionRecord,
    TaskRecord, UserRecord,
};

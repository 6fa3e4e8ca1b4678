//! In-memory alert and notification lifecycle

mod center;

pub use center::{
    AlertCenter, NOTIFICATION_TTL, SIMULATION_SCRIPT, SIMULATION_WINDOW,
};

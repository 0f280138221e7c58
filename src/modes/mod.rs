pub mod maintenance;

pub use maintenance::{ExitReason, MaintenanceMode};

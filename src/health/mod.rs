//! Health probing and aggregation across connected servers.

pub mod monitor;
pub mod report;

pub use self::monitor::{check_all, ping_server};
pub use self::report::{HealthReport, HealthSummary, OverallStatus, ServerHealth, ServerStatus};

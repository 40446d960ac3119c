//! Permission identifiers, groups, statuses, and dialog copy.

pub mod id;
pub mod group;
pub mod status;
pub mod rationale;

pub use id::PermissionId;
pub use group::{PermissionGroup, RequestUnit, BLUETOOTH};
pub use status::PermissionStatus;
pub use rationale::{rationale_for, RationaleContent};

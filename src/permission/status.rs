//! Three-valued permission status.

use serde::{Deserialize, Serialize};

/// Grant state of a single permission as the flows see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PermissionStatus {
    /// The platform reports the permission as granted.
    Granted,
    /// Denied, but the platform would still show its prompt again.
    DeniedSoft,
    /// Denied with the prompt exhausted; only the system settings screen
    /// can change it now.
    DeniedPermanent,
}

impl PermissionStatus {
    pub fn is_granted(self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }

    pub fn is_permanent(self) -> bool {
        matches!(self, PermissionStatus::DeniedPermanent)
    }
}

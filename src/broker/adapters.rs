use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::FlowResult;
use crate::permission::PermissionId;

/// Correlates a launched platform request with its eventual outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-permission results of one completed platform request, in request
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOutcome {
    pub request: RequestId,
    pub results: Vec<(PermissionId, bool)>,
}

impl RequestOutcome {
    /// Result for one permission, if it was part of the request.
    pub fn granted(&self, id: PermissionId) -> Option<bool> {
        self.results
            .iter()
            .find(|(result_id, _)| *result_id == id)
            .map(|(_, granted)| *granted)
    }

    /// Whether every permission in the request was granted.
    pub fn all_granted(&self) -> bool {
        self.results.iter().all(|(_, granted)| *granted)
    }
}

/// Host-side seam to the platform permission machinery.
///
/// Queries are synchronous. `launch_request` is fire-and-forget: exactly one
/// [`RequestOutcome`] carrying the same [`RequestId`] is delivered back per
/// invocation, pumped by the host's event loop. A broker that never answers
/// leaves the flows in their prior state, which is not an error.
pub trait PermissionBroker: Send + Sync {
    /// Current grant state, straight from the platform.
    fn is_granted(&self, id: PermissionId) -> bool;

    /// Whether the platform would still show its own prompt for this
    /// permission. `false` once the user has exhausted the prompt.
    fn rationale_eligible(&self, id: PermissionId) -> bool;

    /// Fire the native request for `ids`.
    fn launch_request(&mut self, request: RequestId, ids: &[PermissionId]);
}

/// Opens the system settings page where the user can change grants by hand.
pub trait SettingsLauncher: Send + Sync {
    fn open_permission_settings(&self) -> FlowResult<()>;
}

/// Settings launcher for hosts without a settings surface.
#[derive(Debug, Default)]
pub struct NullSettingsLauncher;

impl SettingsLauncher for NullSettingsLauncher {
    fn open_permission_settings(&self) -> FlowResult<()> {
        tracing::info!("settings launch requested; no settings surface on this host");
        Ok(())
    }
}

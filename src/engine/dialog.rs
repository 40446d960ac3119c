//! Dialog targeting and the follow-up action.

use serde::{Deserialize, Serialize};

use crate::broker::RequestOutcome;
use crate::permission::{PermissionId, PermissionStatus, RequestUnit};

use super::ledger::StatusLedger;

/// What the dialog's affirmative button should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogAction {
    /// Launch the platform request again.
    RequestAgain,
    /// Send the user to the system settings screen.
    OpenSettings,
}

/// Pick the permission a dialog should talk about after a request outcome.
///
/// For a group this is the first member, in declaration order, that was not
/// granted; for a single permission it is that permission if denied. `None`
/// means everything was granted and no dialog is needed.
pub fn decide_dialog(unit: &RequestUnit, outcome: &RequestOutcome) -> Option<PermissionId> {
    unit.ids()
        .iter()
        .copied()
        .find(|&id| !outcome.granted(id).unwrap_or(false))
}

/// Resolve what the affirmative button does for a dialog target.
///
/// `OpenSettings` iff the target is permanently denied; `RequestAgain`
/// otherwise, including targets that are granted or unchecked.
pub fn resolve_action(target: PermissionId, ledger: &StatusLedger) -> DialogAction {
    match ledger.status(target) {
        Some(PermissionStatus::DeniedPermanent) => DialogAction::OpenSettings,
        _ => DialogAction::RequestAgain,
    }
}

/// The at-most-one permission dialog a screen may show.
///
/// Owned by the presenting controller, never ambient. Showing a new target
/// replaces the previous one (last write wins).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DialogState {
    active: Option<PermissionId>,
}

impl DialogState {
    pub fn new() -> Self {
        Self { active: None }
    }

    /// Currently displayed target, if any.
    pub fn active(&self) -> Option<PermissionId> {
        self.active
    }

    /// Show a dialog for `target`, returning the target it replaced.
    pub fn show(&mut self, target: PermissionId) -> Option<PermissionId> {
        self.active.replace(target)
    }

    /// Dismiss the dialog, returning the target that was showing.
    pub fn dismiss(&mut self) -> Option<PermissionId> {
        self.active.take()
    }
}

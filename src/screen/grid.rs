//! Controller for the grid of optional, on-demand permissions.

use std::time::SystemTime;

use uuid::Uuid;

use crate::broker::{PermissionBroker, RequestId, RequestOutcome, SettingsLauncher};
use crate::engine::{decide_dialog, resolve_action, DialogAction, DialogState, StatusLedger};
use crate::error::{FlowError, FlowResult};
use crate::events::{FlowEvent, FlowLog};
use crate::permission::{rationale_for, PermissionId, RequestUnit, BLUETOOTH};

/// Everything the host needs to render the permission dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogView {
    pub target: PermissionId,
    pub title: &'static str,
    pub description: String,
    pub confirm_label: &'static str,
    pub cancel_label: &'static str,
    pub action: DialogAction,
}

/// Tile table of the demo grid, in declaration order.
pub fn default_tiles() -> Vec<RequestUnit> {
    vec![
        RequestUnit::Single(PermissionId::Camera),
        RequestUnit::Group(&BLUETOOTH),
        RequestUnit::Single(PermissionId::FineLocation),
        RequestUnit::Single(PermissionId::Notifications),
    ]
}

/// Headless controller for a grid of feature tiles, each backed by one
/// request unit.
///
/// Tapping a tile launches its unit's request. An outcome either unlocks
/// the tile's feature or opens the rationale dialog for the first
/// non-granted permission. At most one dialog shows at a time; a later
/// outcome replaces or clears the earlier target.
pub struct PermissionGrid {
    tiles: Vec<RequestUnit>,
    ledger: StatusLedger,
    dialog: DialogState,
    in_flight: Vec<(RequestId, RequestUnit)>,
    log: FlowLog,
}

impl PermissionGrid {
    pub fn new(tiles: Vec<RequestUnit>) -> Self {
        Self {
            tiles,
            ledger: StatusLedger::new(),
            dialog: DialogState::new(),
            in_flight: Vec::new(),
            log: FlowLog::new(),
        }
    }

    /// Grid with the built-in tile table.
    pub fn with_default_tiles() -> Self {
        Self::new(default_tiles())
    }

    pub fn tiles(&self) -> &[RequestUnit] {
        &self.tiles
    }

    pub fn ledger(&self) -> &StatusLedger {
        &self.ledger
    }

    pub fn log(&self) -> &FlowLog {
        &self.log
    }

    /// Currently displayed dialog target, if any.
    pub fn dialog_target(&self) -> Option<PermissionId> {
        self.dialog.active()
    }

    /// Copy and action for the currently displayed dialog.
    pub fn dialog_view(&self) -> Option<DialogView> {
        let target = self.dialog.active()?;
        let content = rationale_for(target);
        let action = resolve_action(target, &self.ledger);
        let permanent = action == DialogAction::OpenSettings;
        Some(DialogView {
            target,
            title: content.title,
            description: content.description(permanent),
            confirm_label: content.confirm_label(permanent),
            cancel_label: content.cancel_label,
            action,
        })
    }

    /// Tap a tile: launch the platform request for its whole unit.
    pub fn tap(&mut self, index: usize, broker: &mut dyn PermissionBroker) -> FlowResult<()> {
        let unit = *self
            .tiles
            .get(index)
            .ok_or_else(|| FlowError::InvalidInput(format!("no tile at index {index}")))?;
        self.launch_unit(unit, broker);
        Ok(())
    }

    /// Absorb a pumped request outcome: unlock the feature when everything
    /// was granted, otherwise open the dialog for the first non-granted
    /// permission. Outcomes with unknown request ids are ignored.
    pub fn handle_outcome(&mut self, outcome: &RequestOutcome, broker: &dyn PermissionBroker) {
        let position = self
            .in_flight
            .iter()
            .position(|(request, _)| *request == outcome.request);
        let unit = match position {
            Some(position) => self.in_flight.remove(position).1,
            None => {
                tracing::warn!("ignoring outcome for unknown request {}", outcome.request);
                return;
            }
        };

        self.ledger.absorb_outcome(outcome, broker);
        self.log.append(FlowEvent::ResultDelivered {
            id: Uuid::new_v4(),
            timestamp: SystemTime::now(),
            request: outcome.request,
            results: outcome.results.clone(),
        });

        match decide_dialog(&unit, outcome) {
            None => {
                // Last write wins: an all-granted result also clears a
                // dialog left over from an earlier tile.
                if let Some(replaced) = self.dialog.dismiss() {
                    self.log.append(FlowEvent::DialogDismissed {
                        id: Uuid::new_v4(),
                        timestamp: SystemTime::now(),
                        target: replaced,
                    });
                }
                self.log.append(FlowEvent::FeatureUnlocked {
                    id: Uuid::new_v4(),
                    timestamp: SystemTime::now(),
                    feature: unit.label().to_string(),
                });
            }
            Some(target) => self.open_dialog(target),
        }
    }

    /// Run the dialog's affirmative button: re-request the whole unit the
    /// target belongs to when the denial is soft, open the system settings
    /// when it is permanent. The dialog is dismissed either way.
    pub fn confirm_dialog(
        &mut self,
        broker: &mut dyn PermissionBroker,
        settings: &dyn SettingsLauncher,
    ) -> FlowResult<()> {
        let target = match self.dialog.active() {
            Some(target) => target,
            None => return Ok(()),
        };

        let result = match resolve_action(target, &self.ledger) {
            DialogAction::RequestAgain => {
                let unit = self.unit_for(target);
                self.launch_unit(unit, broker);
                Ok(())
            }
            DialogAction::OpenSettings => {
                self.log.append(FlowEvent::SettingsOpened {
                    id: Uuid::new_v4(),
                    timestamp: SystemTime::now(),
                    target,
                });
                settings.open_permission_settings()
            }
        };

        self.dialog.dismiss();
        self.log.append(FlowEvent::DialogDismissed {
            id: Uuid::new_v4(),
            timestamp: SystemTime::now(),
            target,
        });
        result
    }

    /// Dismiss the dialog without acting (cancel or outside tap).
    pub fn dismiss_dialog(&mut self) {
        if let Some(target) = self.dialog.dismiss() {
            self.log.append(FlowEvent::DialogDismissed {
                id: Uuid::new_v4(),
                timestamp: SystemTime::now(),
                target,
            });
        }
    }

    fn launch_unit(&mut self, unit: RequestUnit, broker: &mut dyn PermissionBroker) {
        let request = RequestId::new();
        let ids = unit.ids().to_vec();
        self.in_flight.push((request, unit));
        tracing::debug!("tile '{unit}' request {request} launched for {ids:?}");
        self.log.append(FlowEvent::RequestLaunched {
            id: Uuid::new_v4(),
            timestamp: SystemTime::now(),
            request,
            permissions: ids.clone(),
        });
        broker.launch_request(request, &ids);
    }

    fn open_dialog(&mut self, target: PermissionId) {
        let permanent = resolve_action(target, &self.ledger) == DialogAction::OpenSettings;
        if let Some(replaced) = self.dialog.show(target) {
            tracing::debug!("dialog for {replaced} replaced by {target}");
        }
        self.log.append(FlowEvent::DialogOpened {
            id: Uuid::new_v4(),
            timestamp: SystemTime::now(),
            target,
            permanent,
        });
    }

    /// The tile unit a permission belongs to; a grouped permission maps to
    /// its whole group so the re-request covers every member.
    fn unit_for(&self, target: PermissionId) -> RequestUnit {
        self.tiles
            .iter()
            .copied()
            .find(|unit| unit.contains(target))
            .unwrap_or(RequestUnit::Single(target))
    }
}

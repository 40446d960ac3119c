//! Gate evaluation for screens that require permissions up front.

use serde::{Deserialize, Serialize};

use crate::permission::{PermissionId, PermissionStatus, RequestUnit};

use super::ledger::StatusLedger;

/// What a gated screen should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateDecision {
    /// Every required permission is granted; render the gated content.
    Granted,
    /// Render the denial view for the first offending permission.
    Denied {
        offender: PermissionId,
        permanent: bool,
    },
    /// No verdict yet for the first non-granted permission; render neither
    /// content nor denial. Re-launching the request is fine, a dialog is
    /// not.
    AwaitingFirstCheck,
}

/// Declarative gate policy: the permission units a screen requires.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScreenGate {
    required: Vec<RequestUnit>,
}

impl ScreenGate {
    pub fn new(required: Vec<RequestUnit>) -> Self {
        Self { required }
    }

    /// Required units in declaration order.
    pub fn required(&self) -> &[RequestUnit] {
        &self.required
    }

    /// Every identifier covered by the gate, in declaration order.
    pub fn ids(&self) -> Vec<PermissionId> {
        self.required
            .iter()
            .flat_map(|unit| unit.ids().iter().copied())
            .collect()
    }
}

/// Evaluate a gate against the current statuses.
///
/// The first offender is the first identifier, in declaration order across
/// units and within groups, that is not granted. An offender with no
/// completed request cycle yields [`GateDecision::AwaitingFirstCheck`]. An
/// empty gate is trivially granted. Pure: same inputs, same decision.
pub fn evaluate_gate(gate: &ScreenGate, ledger: &StatusLedger) -> GateDecision {
    for unit in gate.required() {
        for &id in unit.ids() {
            match ledger.status(id) {
                Some(PermissionStatus::Granted) => {}
                Some(status) => {
                    return GateDecision::Denied {
                        offender: id,
                        permanent: status.is_permanent(),
                    }
                }
                None => return GateDecision::AwaitingFirstCheck,
            }
        }
    }
    GateDecision::Granted
}

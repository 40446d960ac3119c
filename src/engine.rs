//! Pure decision logic for permission gates and dialogs.

pub mod ledger;
pub mod gate;
pub mod dialog;

pub use ledger::StatusLedger;
pub use gate::{evaluate_gate, GateDecision, ScreenGate};
pub use dialog::{decide_dialog, resolve_action, DialogAction, DialogState};

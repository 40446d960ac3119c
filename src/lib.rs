pub mod error;
pub mod permission;

pub mod broker;
pub mod engine;
pub mod events;
pub mod screen;

pub use crate::broker::{PermissionBroker, RequestId, RequestOutcome, SettingsLauncher};
pub use crate::engine::{
    decide_dialog, evaluate_gate, resolve_action, DialogAction, DialogState, GateDecision,
    ScreenGate, StatusLedger,
};
pub use crate::error::{FlowError, FlowResult};
pub use crate::events::{FlowEvent, FlowLog};
pub use crate::permission::{
    rationale_for, PermissionGroup, PermissionId, PermissionStatus, RationaleContent, RequestUnit,
    BLUETOOTH,
};
pub use crate::screen::{GatedScreen, LifecyclePhase, PermissionGrid};

//! Controller for a screen gated on required permissions.

use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::broker::{PermissionBroker, RequestId, RequestOutcome, SettingsLauncher};
use crate::engine::{
    evaluate_gate, resolve_action, DialogAction, GateDecision, ScreenGate, StatusLedger,
};
use crate::error::FlowResult;
use crate::events::{FlowEvent, FlowLog};

/// Whether the screen is currently visible to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecyclePhase {
    Foreground,
    Background,
}

/// Headless controller for a screen whose entire content requires a set of
/// permissions.
///
/// The host forwards lifecycle transitions and pumped request outcomes; the
/// controller keeps the ledger and the denial-view state and answers
/// [`GatedScreen::decision`] for rendering. Entering the screen counts as a
/// foreground transition.
pub struct GatedScreen {
    gate: ScreenGate,
    ledger: StatusLedger,
    in_flight: Option<RequestId>,
    denial_visible: bool,
    log: FlowLog,
}

impl GatedScreen {
    /// Controller for the given gate. No platform work happens until the
    /// first foreground transition.
    pub fn new(gate: ScreenGate) -> Self {
        Self {
            gate,
            ledger: StatusLedger::new(),
            in_flight: None,
            denial_visible: false,
            log: FlowLog::new(),
        }
    }

    pub fn gate(&self) -> &ScreenGate {
        &self.gate
    }

    pub fn ledger(&self) -> &StatusLedger {
        &self.ledger
    }

    pub fn log(&self) -> &FlowLog {
        &self.log
    }

    /// Forward a lifecycle transition.
    ///
    /// Foreground refreshes the ledger from the platform and unconditionally
    /// re-issues the request for every required permission; this is how
    /// grants changed in the system settings are picked up. Background
    /// clears the denial view so a stale one cannot flash on re-entry.
    pub fn handle_lifecycle(&mut self, phase: LifecyclePhase, broker: &mut dyn PermissionBroker) {
        self.log.append(FlowEvent::LifecycleChanged {
            id: Uuid::new_v4(),
            timestamp: SystemTime::now(),
            phase,
        });
        match phase {
            LifecyclePhase::Foreground => {
                self.ledger.refresh(broker, self.gate.ids());
                self.launch(broker);
            }
            LifecyclePhase::Background => {
                self.denial_visible = false;
            }
        }
    }

    /// Absorb a pumped request outcome. Outcomes that do not match the
    /// in-flight request are ignored.
    pub fn handle_outcome(&mut self, outcome: &RequestOutcome, broker: &dyn PermissionBroker) {
        if self.in_flight != Some(outcome.request) {
            tracing::warn!("ignoring outcome for unknown request {}", outcome.request);
            return;
        }
        self.in_flight = None;
        self.ledger.absorb_outcome(outcome, broker);
        self.denial_visible = true;
        self.log.append(FlowEvent::ResultDelivered {
            id: Uuid::new_v4(),
            timestamp: SystemTime::now(),
            request: outcome.request,
            results: outcome.results.clone(),
        });
    }

    /// What the screen should render right now.
    ///
    /// A denial is only rendered once a request outcome has confirmed it
    /// since the last background transition; until then the verdict is
    /// [`GateDecision::AwaitingFirstCheck`].
    pub fn decision(&self) -> GateDecision {
        match evaluate_gate(&self.gate, &self.ledger) {
            GateDecision::Denied { .. } if !self.denial_visible => GateDecision::AwaitingFirstCheck,
            decision => decision,
        }
    }

    /// The action behind the denial view's button, if a denial is showing.
    pub fn denied_action(&self) -> Option<DialogAction> {
        match self.decision() {
            GateDecision::Denied { offender, .. } => Some(resolve_action(offender, &self.ledger)),
            _ => None,
        }
    }

    /// Run the denial view's button: re-request every required permission
    /// when the denial is soft, open the system settings when it is
    /// permanent. Does nothing when no denial is showing.
    pub fn confirm_denied(
        &mut self,
        broker: &mut dyn PermissionBroker,
        settings: &dyn SettingsLauncher,
    ) -> FlowResult<()> {
        let offender = match self.decision() {
            GateDecision::Denied { offender, .. } => offender,
            _ => return Ok(()),
        };
        match resolve_action(offender, &self.ledger) {
            DialogAction::RequestAgain => {
                self.launch(broker);
                Ok(())
            }
            DialogAction::OpenSettings => {
                self.log.append(FlowEvent::SettingsOpened {
                    id: Uuid::new_v4(),
                    timestamp: SystemTime::now(),
                    target: offender,
                });
                settings.open_permission_settings()
            }
        }
    }

    fn launch(&mut self, broker: &mut dyn PermissionBroker) {
        let ids = self.gate.ids();
        if ids.is_empty() {
            return;
        }
        let request = RequestId::new();
        self.in_flight = Some(request);
        tracing::debug!("gate request {request} launched for {ids:?}");
        self.log.append(FlowEvent::RequestLaunched {
            id: Uuid::new_v4(),
            timestamp: SystemTime::now(),
            request,
            permissions: ids.clone(),
        });
        broker.launch_request(request, &ids);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broker::{PromptAnswer, RecordingSettingsLauncher, ScriptedBroker};
    use crate::permission::{PermissionId, RequestUnit};

    fn camera_location_gate() -> ScreenGate {
        ScreenGate::new(vec![
            RequestUnit::Single(PermissionId::Camera),
            RequestUnit::Single(PermissionId::FineLocation),
        ])
    }

    fn pump(screen: &mut GatedScreen, broker: &mut ScriptedBroker) {
        while let Some(outcome) = broker.poll_delivery() {
            screen.handle_outcome(&outcome, &*broker);
        }
    }

    #[test]
    fn foreground_launches_one_request_for_all_required() {
        let mut broker = ScriptedBroker::new();
        let mut screen = GatedScreen::new(camera_location_gate());

        screen.handle_lifecycle(LifecyclePhase::Foreground, &mut broker);

        assert_eq!(broker.launched().len(), 1);
        assert_eq!(
            broker.launched()[0].1,
            vec![PermissionId::Camera, PermissionId::FineLocation]
        );
    }

    #[test]
    fn awaiting_first_check_before_any_outcome() {
        let mut broker = ScriptedBroker::new();
        broker.push_answer(PermissionId::Camera, PromptAnswer::Ignore);

        let mut screen = GatedScreen::new(camera_location_gate());
        screen.handle_lifecycle(LifecyclePhase::Foreground, &mut broker);

        // The broker never answered; the screen must not claim a denial.
        assert_eq!(screen.decision(), GateDecision::AwaitingFirstCheck);
    }

    #[test]
    fn already_granted_renders_content_without_waiting() {
        let mut broker = ScriptedBroker::new();
        broker.seed(PermissionId::Camera, true, 0);
        broker.seed(PermissionId::FineLocation, true, 0);

        let mut screen = GatedScreen::new(camera_location_gate());
        screen.handle_lifecycle(LifecyclePhase::Foreground, &mut broker);

        assert_eq!(screen.decision(), GateDecision::Granted);
    }

    #[test]
    fn soft_denial_shows_first_offender_after_outcome() {
        let mut broker = ScriptedBroker::new();
        broker.push_answer(PermissionId::Camera, PromptAnswer::Grant);
        broker.push_answer(PermissionId::FineLocation, PromptAnswer::Deny);

        let mut screen = GatedScreen::new(camera_location_gate());
        screen.handle_lifecycle(LifecyclePhase::Foreground, &mut broker);
        pump(&mut screen, &mut broker);

        assert_eq!(
            screen.decision(),
            GateDecision::Denied {
                offender: PermissionId::FineLocation,
                permanent: false,
            }
        );
        assert_eq!(screen.denied_action(), Some(DialogAction::RequestAgain));
    }

    #[test]
    fn exhausted_prompt_shows_permanent_denial() {
        let mut broker = ScriptedBroker::new();
        broker.seed(PermissionId::Camera, false, 2);
        broker.push_answer(PermissionId::FineLocation, PromptAnswer::Grant);

        let mut screen = GatedScreen::new(camera_location_gate());
        screen.handle_lifecycle(LifecyclePhase::Foreground, &mut broker);
        pump(&mut screen, &mut broker);

        assert_eq!(
            screen.decision(),
            GateDecision::Denied {
                offender: PermissionId::Camera,
                permanent: true,
            }
        );
        assert_eq!(screen.denied_action(), Some(DialogAction::OpenSettings));
    }

    #[test]
    fn confirm_denied_soft_relaunches_everything() {
        let mut broker = ScriptedBroker::new();
        broker.push_answer(PermissionId::Camera, PromptAnswer::Deny);
        broker.push_answer(PermissionId::FineLocation, PromptAnswer::Deny);

        let mut screen = GatedScreen::new(camera_location_gate());
        screen.handle_lifecycle(LifecyclePhase::Foreground, &mut broker);
        pump(&mut screen, &mut broker);

        let settings = RecordingSettingsLauncher::new();
        screen
            .confirm_denied(&mut broker, &settings)
            .expect("confirm");

        assert_eq!(broker.launched().len(), 2);
        assert_eq!(
            broker.launched()[1].1,
            vec![PermissionId::Camera, PermissionId::FineLocation]
        );
        assert_eq!(settings.opened(), 0);
    }

    #[test]
    fn confirm_denied_permanent_opens_settings() {
        let mut broker = ScriptedBroker::new();
        broker.seed(PermissionId::Camera, false, 2);
        broker.push_answer(PermissionId::FineLocation, PromptAnswer::Grant);

        let mut screen = GatedScreen::new(camera_location_gate());
        screen.handle_lifecycle(LifecyclePhase::Foreground, &mut broker);
        pump(&mut screen, &mut broker);

        let settings = RecordingSettingsLauncher::new();
        screen
            .confirm_denied(&mut broker, &settings)
            .expect("confirm");

        assert_eq!(settings.opened(), 1);
        assert_eq!(broker.launched().len(), 1);
        assert!(screen.log().events().iter().any(|event| matches!(
            event,
            FlowEvent::SettingsOpened { target: PermissionId::Camera, .. }
        )));
    }

    #[test]
    fn background_clears_denial_view() {
        let mut broker = ScriptedBroker::new();
        broker.push_answer(PermissionId::Camera, PromptAnswer::Deny);
        broker.push_answer(PermissionId::FineLocation, PromptAnswer::Deny);

        let mut screen = GatedScreen::new(camera_location_gate());
        screen.handle_lifecycle(LifecyclePhase::Foreground, &mut broker);
        pump(&mut screen, &mut broker);
        assert!(matches!(screen.decision(), GateDecision::Denied { .. }));

        screen.handle_lifecycle(LifecyclePhase::Background, &mut broker);
        assert_eq!(screen.decision(), GateDecision::AwaitingFirstCheck);
    }

    #[test]
    fn foreground_after_background_reissues_request() {
        let mut broker = ScriptedBroker::new();
        broker.push_answer(PermissionId::Camera, PromptAnswer::Deny);
        broker.push_answer(PermissionId::FineLocation, PromptAnswer::Deny);
        broker.push_answer(PermissionId::Camera, PromptAnswer::Deny);
        broker.push_answer(PermissionId::FineLocation, PromptAnswer::Deny);

        let mut screen = GatedScreen::new(camera_location_gate());
        screen.handle_lifecycle(LifecyclePhase::Foreground, &mut broker);
        pump(&mut screen, &mut broker);

        screen.handle_lifecycle(LifecyclePhase::Background, &mut broker);
        screen.handle_lifecycle(LifecyclePhase::Foreground, &mut broker);
        assert_eq!(broker.launched().len(), 2);

        // Denial view stays hidden until the fresh outcome lands.
        assert_eq!(screen.decision(), GateDecision::AwaitingFirstCheck);
        pump(&mut screen, &mut broker);
        assert!(matches!(screen.decision(), GateDecision::Denied { .. }));
    }

    #[test]
    fn settings_grant_is_picked_up_on_reentry() {
        let mut broker = ScriptedBroker::new();
        broker.seed(PermissionId::Camera, false, 2);
        broker.push_answer(PermissionId::FineLocation, PromptAnswer::Grant);

        let mut screen = GatedScreen::new(camera_location_gate());
        screen.handle_lifecycle(LifecyclePhase::Foreground, &mut broker);
        pump(&mut screen, &mut broker);
        assert!(matches!(screen.decision(), GateDecision::Denied { .. }));

        // Granted by hand in the system settings while backgrounded.
        screen.handle_lifecycle(LifecyclePhase::Background, &mut broker);
        broker.seed(PermissionId::Camera, true, 2);
        screen.handle_lifecycle(LifecyclePhase::Foreground, &mut broker);

        assert_eq!(screen.decision(), GateDecision::Granted);
    }

    #[test]
    fn stale_outcome_is_ignored() {
        let mut broker = ScriptedBroker::new();
        let mut screen = GatedScreen::new(camera_location_gate());
        screen.handle_lifecycle(LifecyclePhase::Foreground, &mut broker);

        let stale = RequestOutcome {
            request: RequestId::new(),
            results: vec![(PermissionId::Camera, false)],
        };
        screen.handle_outcome(&stale, &broker);

        assert_eq!(screen.decision(), GateDecision::AwaitingFirstCheck);
        assert_eq!(screen.ledger().status(PermissionId::Camera), None);
    }

    #[test]
    fn empty_gate_is_granted_and_launches_nothing() {
        let mut broker = ScriptedBroker::new();
        let mut screen = GatedScreen::new(ScreenGate::new(Vec::new()));

        screen.handle_lifecycle(LifecyclePhase::Foreground, &mut broker);

        assert_eq!(screen.decision(), GateDecision::Granted);
        assert!(broker.launched().is_empty());
    }
}

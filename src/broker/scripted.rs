//! Deterministic broker for tests and the walkthrough binary.

use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::{FlowError, FlowResult};
use crate::permission::PermissionId;

use super::adapters::{PermissionBroker, RequestId, RequestOutcome, SettingsLauncher};

/// Prompts a permission survives before the platform stops asking.
const PROMPT_LIMIT: u8 = 2;

/// How the scripted user answers one native prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PromptAnswer {
    /// Grant the permission.
    Grant,
    /// Deny it once; the platform counts the denial.
    Deny,
    /// Never deliver the outcome of the request this prompt belongs to.
    Ignore,
}

/// Platform-side seed state for one permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedEntry {
    pub permission: PermissionId,
    #[serde(default)]
    pub granted: bool,
    /// Denials recorded in earlier app runs. Two means the prompt is
    /// exhausted and requests auto-deny without asking.
    #[serde(default)]
    pub denials: u8,
}

/// A queued prompt answer for one permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerEntry {
    pub permission: PermissionId,
    pub answer: PromptAnswer,
}

/// A replayable scenario: platform seed state plus the user's prompt
/// answers, consumed per permission in order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub seed: Vec<SeedEntry>,
    #[serde(default)]
    pub answers: Vec<AnswerEntry>,
}

impl Script {
    /// Load a script from a JSON file.
    pub fn from_path(path: &Path) -> FlowResult<Script> {
        let data = std::fs::read_to_string(path).map_err(|error| {
            FlowError::InvalidInput(format!(
                "failed to read script {}: {error}",
                path.display()
            ))
        })?;
        serde_json::from_str(&data).map_err(|error| {
            FlowError::InvalidInput(format!(
                "failed to parse script {}: {error}",
                path.display()
            ))
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct PlatformState {
    granted: bool,
    denials: u8,
}

impl PlatformState {
    fn prompt_exhausted(self) -> bool {
        !self.granted && self.denials >= PROMPT_LIMIT
    }
}

/// In-memory stand-in for the platform permission machinery.
///
/// Models the native prompt lifecycle: granted permissions answer `true`
/// without prompting, a permission denied [`PROMPT_LIMIT`] times auto-denies
/// without prompting, and everything else consumes the next scripted
/// [`PromptAnswer`] for that permission. A queue with no answer left counts
/// as a denial. Outcomes sit in a delivery queue until the host pumps
/// [`ScriptedBroker::poll_delivery`].
#[derive(Default)]
pub struct ScriptedBroker {
    state: HashMap<PermissionId, PlatformState>,
    answers: HashMap<PermissionId, VecDeque<PromptAnswer>>,
    pending: VecDeque<RequestOutcome>,
    launched: Vec<(RequestId, Vec<PermissionId>)>,
}

impl ScriptedBroker {
    /// Broker with nothing granted and no answers queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Broker seeded and scripted from a [`Script`]. Later seed entries for
    /// the same permission overwrite earlier ones.
    pub fn from_script(script: &Script) -> Self {
        let mut broker = Self::new();
        for entry in &script.seed {
            broker.seed(entry.permission, entry.granted, entry.denials);
        }
        for entry in &script.answers {
            broker.push_answer(entry.permission, entry.answer);
        }
        broker
    }

    /// Set the platform state for one permission directly.
    pub fn seed(&mut self, id: PermissionId, granted: bool, denials: u8) {
        self.state.insert(id, PlatformState { granted, denials });
    }

    /// Queue the next prompt answer for a permission.
    pub fn push_answer(&mut self, id: PermissionId, answer: PromptAnswer) {
        self.answers.entry(id).or_default().push_back(answer);
    }

    /// Hand the next queued outcome to the host loop, if any.
    pub fn poll_delivery(&mut self) -> Option<RequestOutcome> {
        self.pending.pop_front()
    }

    /// Requests launched so far, in order.
    pub fn launched(&self) -> &[(RequestId, Vec<PermissionId>)] {
        &self.launched
    }

    fn state_of(&self, id: PermissionId) -> PlatformState {
        self.state.get(&id).copied().unwrap_or_default()
    }

    fn next_answer(&mut self, id: PermissionId) -> PromptAnswer {
        self.answers
            .get_mut(&id)
            .and_then(|queue| queue.pop_front())
            .unwrap_or(PromptAnswer::Deny)
    }
}

impl PermissionBroker for ScriptedBroker {
    fn is_granted(&self, id: PermissionId) -> bool {
        self.state_of(id).granted
    }

    fn rationale_eligible(&self, id: PermissionId) -> bool {
        let state = self.state_of(id);
        !state.granted && state.denials == 1
    }

    fn launch_request(&mut self, request: RequestId, ids: &[PermissionId]) {
        self.launched.push((request, ids.to_vec()));

        let mut results = Vec::with_capacity(ids.len());
        for &id in ids {
            let state = self.state_of(id);
            if state.granted {
                results.push((id, true));
                continue;
            }
            if state.prompt_exhausted() {
                results.push((id, false));
                continue;
            }
            match self.next_answer(id) {
                PromptAnswer::Grant => {
                    self.state.entry(id).or_default().granted = true;
                    results.push((id, true));
                }
                PromptAnswer::Deny => {
                    let state = self.state.entry(id).or_default();
                    state.denials = state.denials.saturating_add(1);
                    results.push((id, false));
                }
                PromptAnswer::Ignore => {
                    tracing::debug!("request {request} left unanswered by script");
                    return;
                }
            }
        }

        self.pending.push_back(RequestOutcome { request, results });
    }
}

/// Settings launcher that records invocations instead of opening anything.
#[derive(Debug, Default)]
pub struct RecordingSettingsLauncher {
    opened: AtomicUsize,
}

impl RecordingSettingsLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times the settings screen was opened.
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::Relaxed)
    }
}

impl SettingsLauncher for RecordingSettingsLauncher {
    fn open_permission_settings(&self) -> FlowResult<()> {
        self.opened.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

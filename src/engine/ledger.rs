//! Session-scoped permission status ledger.

use std::collections::HashMap;

use crate::broker::{PermissionBroker, RequestOutcome};
use crate::permission::{PermissionId, PermissionStatus};

#[derive(Debug, Clone, Copy, Default)]
struct Entry {
    granted: bool,
    rationale_eligible: bool,
    requested: bool,
}

/// Status snapshot for the current screen.
///
/// Grant and rationale answers come straight from the broker; the ledger
/// additionally tracks whether a request cycle has completed this session,
/// because a permanent denial can only be told apart from a never-asked
/// permission after at least one completed cycle. Rebuilt from the broker
/// whenever a screen comes to the foreground; never persisted.
#[derive(Debug, Clone, Default)]
pub struct StatusLedger {
    entries: HashMap<PermissionId, Entry>,
}

impl StatusLedger {
    /// Create an empty ledger; every permission starts unchecked.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Pull current grant and rationale answers for `ids` from the broker.
    /// Request-cycle history is kept.
    pub fn refresh(
        &mut self,
        broker: &dyn PermissionBroker,
        ids: impl IntoIterator<Item = PermissionId>,
    ) {
        for id in ids {
            let entry = self.entries.entry(id).or_default();
            entry.granted = broker.is_granted(id);
            entry.rationale_eligible = broker.rationale_eligible(id);
        }
    }

    /// Record one completed request cycle and re-query rationale
    /// eligibility, which the platform may have just changed.
    pub fn absorb_outcome(&mut self, outcome: &RequestOutcome, broker: &dyn PermissionBroker) {
        for &(id, granted) in &outcome.results {
            let entry = self.entries.entry(id).or_default();
            entry.granted = granted;
            entry.requested = true;
            entry.rationale_eligible = broker.rationale_eligible(id);
        }
    }

    /// Derived status, or `None` for a permission that is not granted and
    /// has not completed a request cycle yet.
    pub fn status(&self, id: PermissionId) -> Option<PermissionStatus> {
        let entry = self.entries.get(&id).copied().unwrap_or_default();
        if entry.granted {
            return Some(PermissionStatus::Granted);
        }
        if !entry.requested {
            return None;
        }
        if entry.rationale_eligible {
            Some(PermissionStatus::DeniedSoft)
        } else {
            Some(PermissionStatus::DeniedPermanent)
        }
    }

    /// Whether the permission is currently granted.
    pub fn is_granted(&self, id: PermissionId) -> bool {
        matches!(self.status(id), Some(PermissionStatus::Granted))
    }

    /// Force a derived status directly. Hosts with their own status source
    /// can build a ledger without a broker; both denial statuses imply a
    /// completed request cycle.
    pub fn set_status(&mut self, id: PermissionId, status: PermissionStatus) {
        let entry = match status {
            PermissionStatus::Granted => Entry {
                granted: true,
                ..Entry::default()
            },
            PermissionStatus::DeniedSoft => Entry {
                requested: true,
                rationale_eligible: true,
                ..Entry::default()
            },
            PermissionStatus::DeniedPermanent => Entry {
                requested: true,
                ..Entry::default()
            },
        };
        self.entries.insert(id, entry);
    }
}

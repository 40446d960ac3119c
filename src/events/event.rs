//! Canonical event types for the permission flow stream.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use uuid::Uuid;

use crate::broker::RequestId;
use crate::permission::PermissionId;
use crate::screen::LifecyclePhase;

/// A notable moment in a permission flow.
///
/// Each event has a unique ID and timestamp. The stream is append-only and
/// is what tests and transcripts observe instead of rendered UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FlowEvent {
    /// A platform permission request was launched.
    RequestLaunched {
        id: Uuid,
        timestamp: SystemTime,
        request: RequestId,
        permissions: Vec<PermissionId>,
    },
    /// A platform request completed with per-permission results.
    ResultDelivered {
        id: Uuid,
        timestamp: SystemTime,
        request: RequestId,
        results: Vec<(PermissionId, bool)>,
    },
    /// A rationale dialog was opened for a permission.
    DialogOpened {
        id: Uuid,
        timestamp: SystemTime,
        target: PermissionId,
        permanent: bool,
    },
    /// The rationale dialog was dismissed.
    DialogDismissed {
        id: Uuid,
        timestamp: SystemTime,
        target: PermissionId,
    },
    /// The system settings screen was opened for a permission.
    SettingsOpened {
        id: Uuid,
        timestamp: SystemTime,
        target: PermissionId,
    },
    /// Every permission behind a tile was granted and its feature ran.
    FeatureUnlocked {
        id: Uuid,
        timestamp: SystemTime,
        feature: String,
    },
    /// The screen moved between foreground and background.
    LifecycleChanged {
        id: Uuid,
        timestamp: SystemTime,
        phase: LifecyclePhase,
    },
}

impl FlowEvent {
    /// Returns the unique ID of this event.
    pub fn id(&self) -> Uuid {
        match self {
            FlowEvent::RequestLaunched { id, .. }
            | FlowEvent::ResultDelivered { id, .. }
            | FlowEvent::DialogOpened { id, .. }
            | FlowEvent::DialogDismissed { id, .. }
            | FlowEvent::SettingsOpened { id, .. }
            | FlowEvent::FeatureUnlocked { id, .. }
            | FlowEvent::LifecycleChanged { id, .. } => *id,
        }
    }

    /// Returns the timestamp of this event.
    pub fn timestamp(&self) -> SystemTime {
        match self {
            FlowEvent::RequestLaunched { timestamp, .. }
            | FlowEvent::ResultDelivered { timestamp, .. }
            | FlowEvent::DialogOpened { timestamp, .. }
            | FlowEvent::DialogDismissed { timestamp, .. }
            | FlowEvent::SettingsOpened { timestamp, .. }
            | FlowEvent::FeatureUnlocked { timestamp, .. }
            | FlowEvent::LifecycleChanged { timestamp, .. } => *timestamp,
        }
    }
}

/// RFC 3339 rendering of an event timestamp.
pub fn timestamp_rfc3339(timestamp: SystemTime) -> String {
    let datetime: chrono::DateTime<chrono::Utc> = timestamp.into();
    datetime.to_rfc3339()
}

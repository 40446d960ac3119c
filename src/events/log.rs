//! Append-only in-memory flow log.

use super::event::FlowEvent;

/// An append-only, ordered log of flow events.
///
/// Events are stored in insertion order, in memory only.
pub struct FlowLog {
    events: Vec<FlowEvent>,
}

impl FlowLog {
    /// Create a new empty log.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Append an event to the log.
    pub fn append(&mut self, event: FlowEvent) {
        self.events.push(event);
    }

    /// Returns a slice of all events in insertion order.
    pub fn events(&self) -> &[FlowEvent] {
        &self.events
    }

    /// Returns the number of events in the log.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if the log contains no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns a slice of events starting from the given index.
    ///
    /// If `index` is beyond the end, returns an empty slice.
    pub fn events_since(&self, index: usize) -> &[FlowEvent] {
        if index >= self.events.len() {
            &[]
        } else {
            &self.events[index..]
        }
    }
}

impl Default for FlowLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permission::PermissionId;
    use std::time::SystemTime;
    use uuid::Uuid;

    fn make_feature_unlocked(feature: &str) -> FlowEvent {
        FlowEvent::FeatureUnlocked {
            id: Uuid::new_v4(),
            timestamp: SystemTime::now(),
            feature: feature.to_string(),
        }
    }

    fn make_settings_opened(target: PermissionId) -> FlowEvent {
        FlowEvent::SettingsOpened {
            id: Uuid::new_v4(),
            timestamp: SystemTime::now(),
            target,
        }
    }

    #[test]
    fn new_log_is_empty() {
        let log = FlowLog::new();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
        assert!(log.events().is_empty());
    }

    #[test]
    fn append_preserves_order() {
        let mut log = FlowLog::new();
        let e1 = make_feature_unlocked("camera");
        let e2 = make_settings_opened(PermissionId::Camera);
        let e3 = make_feature_unlocked("bluetooth");

        let id1 = e1.id();
        let id2 = e2.id();
        let id3 = e3.id();

        log.append(e1);
        log.append(e2);
        log.append(e3);

        assert_eq!(log.len(), 3);
        assert!(!log.is_empty());
        assert_eq!(log.events()[0].id(), id1);
        assert_eq!(log.events()[1].id(), id2);
        assert_eq!(log.events()[2].id(), id3);
    }

    #[test]
    fn events_since_returns_tail() {
        let mut log = FlowLog::new();
        log.append(make_feature_unlocked("camera"));
        log.append(make_feature_unlocked("notifications"));
        log.append(make_settings_opened(PermissionId::BluetoothConnect));

        assert_eq!(log.events_since(1).len(), 2);
        assert!(log.events_since(3).is_empty());
        assert!(log.events_since(100).is_empty());
    }

    #[test]
    fn events_since_zero_returns_all() {
        let mut log = FlowLog::new();
        log.append(make_feature_unlocked("camera"));
        log.append(make_feature_unlocked("bluetooth"));

        assert_eq!(log.events_since(0).len(), 2);
    }

    #[test]
    fn default_is_empty() {
        let log = FlowLog::default();
        assert!(log.is_empty());
    }
}

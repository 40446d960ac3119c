//! Static dialog copy for each permission.

use super::id::PermissionId;

const REQUEST_LABEL: &str = "Grant permission";
const SETTINGS_LABEL: &str = "Open settings";
const CANCEL_LABEL: &str = "Cancel";

/// Hint appended to the rationale once the platform prompt is exhausted.
const SETTINGS_HINT: &str = "You can enable it anytime from the app settings.";

/// Text bundle a permission dialog renders from.
///
/// All copy is static: the catalog is a total function of the closed
/// identifier set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RationaleContent {
    pub title: &'static str,
    pub rationale: &'static str,
    pub request_label: &'static str,
    pub settings_label: &'static str,
    pub cancel_label: &'static str,
}

impl RationaleContent {
    /// Dialog body text. When the denial is permanent the settings hint is
    /// appended.
    pub fn description(&self, permanent: bool) -> String {
        if permanent {
            format!("{} {}", self.rationale, SETTINGS_HINT)
        } else {
            self.rationale.to_string()
        }
    }

    /// Label of the affirmative button for the given denial kind.
    pub fn confirm_label(&self, permanent: bool) -> &'static str {
        if permanent {
            self.settings_label
        } else {
            self.request_label
        }
    }
}

/// Look up the dialog copy for an identifier.
pub fn rationale_for(id: PermissionId) -> RationaleContent {
    let (title, rationale) = match id {
        PermissionId::Camera => (
            "Camera",
            "The camera is used to capture photos and scan codes.",
        ),
        PermissionId::FineLocation => (
            "Precise location",
            "Precise location is used to show nearby devices on the map.",
        ),
        PermissionId::Notifications => (
            "Notifications",
            "Notifications let you know when a background task finishes.",
        ),
        PermissionId::BluetoothAdvertise => (
            "Bluetooth advertising",
            "Bluetooth advertising makes this device discoverable to others.",
        ),
        PermissionId::BluetoothConnect => (
            "Bluetooth connections",
            "Bluetooth connections are used to pair with nearby devices.",
        ),
        PermissionId::BluetoothScan => (
            "Bluetooth scanning",
            "Bluetooth scanning is used to discover nearby devices.",
        ),
    };

    RationaleContent {
        title,
        rationale,
        request_label: REQUEST_LABEL,
        settings_label: SETTINGS_LABEL,
        cancel_label: CANCEL_LABEL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_id_has_copy() {
        for id in PermissionId::ALL {
            let content = rationale_for(id);
            assert!(!content.title.is_empty());
            assert!(!content.rationale.is_empty());
        }
    }

    #[test]
    fn description_appends_hint_when_permanent() {
        let content = rationale_for(PermissionId::Camera);
        assert_eq!(content.description(false), content.rationale);
        let permanent = content.description(true);
        assert!(permanent.starts_with(content.rationale));
        assert!(permanent.ends_with(SETTINGS_HINT));
    }

    #[test]
    fn confirm_label_switches_on_permanent() {
        let content = rationale_for(PermissionId::BluetoothConnect);
        assert_eq!(content.confirm_label(false), REQUEST_LABEL);
        assert_eq!(content.confirm_label(true), SETTINGS_LABEL);
    }
}

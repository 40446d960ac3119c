//! Permission groups and request units.

use std::fmt;

use super::id::PermissionId;

/// A named set of permissions that is always requested atomically.
///
/// Member order is the declaration order used when picking which member a
/// denial should be reported for.
#[derive(Debug, PartialEq, Eq)]
pub struct PermissionGroup {
    name: &'static str,
    members: &'static [PermissionId],
}

impl PermissionGroup {
    /// Stable group name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Members in declaration order.
    pub const fn members(&self) -> &'static [PermissionId] {
        self.members
    }

    /// Whether `id` belongs to this group.
    pub fn contains(&self, id: PermissionId) -> bool {
        self.members.contains(&id)
    }
}

/// The bluetooth trio, requested as one unit.
pub const BLUETOOTH: PermissionGroup = PermissionGroup {
    name: "bluetooth",
    members: &[
        PermissionId::BluetoothAdvertise,
        PermissionId::BluetoothConnect,
        PermissionId::BluetoothScan,
    ],
};

/// The unit of one platform permission request: a single identifier or a
/// whole group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestUnit {
    Single(PermissionId),
    Group(&'static PermissionGroup),
}

impl RequestUnit {
    /// Identifiers covered by this unit, in declaration order.
    pub fn ids(&self) -> &[PermissionId] {
        match self {
            RequestUnit::Single(id) => std::slice::from_ref(id),
            RequestUnit::Group(group) => group.members(),
        }
    }

    /// Display label for logs and feature events.
    pub fn label(&self) -> &'static str {
        match self {
            RequestUnit::Single(id) => id.name(),
            RequestUnit::Group(group) => group.name(),
        }
    }

    /// Whether `id` is covered by this unit.
    pub fn contains(&self, id: PermissionId) -> bool {
        self.ids().contains(&id)
    }
}

impl fmt::Display for RequestUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bluetooth_members_in_declaration_order() {
        assert_eq!(
            BLUETOOTH.members(),
            &[
                PermissionId::BluetoothAdvertise,
                PermissionId::BluetoothConnect,
                PermissionId::BluetoothScan,
            ]
        );
    }

    #[test]
    fn single_unit_covers_one_id() {
        let unit = RequestUnit::Single(PermissionId::Camera);
        assert_eq!(unit.ids(), &[PermissionId::Camera]);
        assert!(unit.contains(PermissionId::Camera));
        assert!(!unit.contains(PermissionId::FineLocation));
    }

    #[test]
    fn group_unit_covers_all_members() {
        let unit = RequestUnit::Group(&BLUETOOTH);
        assert_eq!(unit.ids().len(), 3);
        assert!(unit.contains(PermissionId::BluetoothConnect));
        assert!(!unit.contains(PermissionId::Camera));
    }

    #[test]
    fn labels() {
        assert_eq!(RequestUnit::Single(PermissionId::Camera).label(), "camera");
        assert_eq!(RequestUnit::Group(&BLUETOOTH).label(), "bluetooth");
    }
}

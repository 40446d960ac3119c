//! Closed set of permission identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FlowError, FlowResult};

/// A capability the application can request at runtime.
///
/// The set is closed: every identifier the flows can touch is a variant
/// here, so rationale and group lookups are infallible. Mapping from
/// external identifier strings happens only at [`PermissionId::from_native`]
/// and [`FromStr`], which fail loudly on anything unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PermissionId {
    Camera,
    FineLocation,
    Notifications,
    BluetoothAdvertise,
    BluetoothConnect,
    BluetoothScan,
}

impl PermissionId {
    /// All supported identifiers.
    pub const ALL: [PermissionId; 6] = [
        PermissionId::Camera,
        PermissionId::FineLocation,
        PermissionId::Notifications,
        PermissionId::BluetoothAdvertise,
        PermissionId::BluetoothConnect,
        PermissionId::BluetoothScan,
    ];

    /// Stable machine-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            PermissionId::Camera => "camera",
            PermissionId::FineLocation => "fine-location",
            PermissionId::Notifications => "notifications",
            PermissionId::BluetoothAdvertise => "bluetooth-advertise",
            PermissionId::BluetoothConnect => "bluetooth-connect",
            PermissionId::BluetoothScan => "bluetooth-scan",
        }
    }

    /// The platform manifest key this identifier maps to.
    pub const fn native_key(self) -> &'static str {
        match self {
            PermissionId::Camera => "android.permission.CAMERA",
            PermissionId::FineLocation => "android.permission.ACCESS_FINE_LOCATION",
            PermissionId::Notifications => "android.permission.POST_NOTIFICATIONS",
            PermissionId::BluetoothAdvertise => "android.permission.BLUETOOTH_ADVERTISE",
            PermissionId::BluetoothConnect => "android.permission.BLUETOOTH_CONNECT",
            PermissionId::BluetoothScan => "android.permission.BLUETOOTH_SCAN",
        }
    }

    /// Map a platform manifest key back to an identifier.
    ///
    /// An unknown key is a wiring bug in the embedding host, not a runtime
    /// condition; it is reported as [`FlowError::UnknownPermission`] and
    /// callers are expected to treat it as fatal.
    pub fn from_native(key: &str) -> FlowResult<PermissionId> {
        PermissionId::ALL
            .into_iter()
            .find(|id| id.native_key() == key)
            .ok_or_else(|| FlowError::UnknownPermission(key.to_string()))
    }
}

impl fmt::Display for PermissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PermissionId {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PermissionId::ALL
            .into_iter()
            .find(|id| id.name() == s)
            .ok_or_else(|| FlowError::UnknownPermission(s.to_string()))
    }
}

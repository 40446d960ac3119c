//! Headless controllers for the permission flow screens.

pub mod gated;
pub mod grid;

pub use gated::{GatedScreen, LifecyclePhase};
pub use grid::{default_tiles, DialogView, PermissionGrid};

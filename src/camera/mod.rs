//! Camera state for viewing the molecule scene.
//!
//! The host renderer owns projection and drawing; this module keeps the
//! orbit pose it should render from, so the orchestrator can reset the
//! view whenever a new molecule is installed.

/// Orbit controls: rotation, panning, zoom with damping and reset.
pub mod controller;
/// Core perspective camera.
pub mod core;

pub use controller::ViewControls;
pub use self::core::Camera;

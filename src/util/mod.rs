//! Shared utilities for the scene engine.
//!
//! Helpers for vector geometry on top of `glam`, packed colors, and frame
//! timing for the host loop.

/// Packed RGB colors.
pub mod color;
/// Frame clock with smoothed FPS.
pub mod frame_timing;
/// Vector helpers on top of `glam`.
pub mod vector;

use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::scene::PrimitiveStyle;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Particles", inline)]
#[serde(default)]
/// Idle particle pool and convergence choreography.
pub struct ParticleOptions {
    /// Pool size, fixed for the session.
    #[schemars(title = "Count", range(min = 0, max = 500))]
    pub count: usize,
    /// Edge lengths of the box particles spawn in, centered on the origin.
    #[schemars(skip)]
    pub spawn_extent: [f32; 3],
    /// Half-extents of the wrap box (lateral, vertical, depth).
    #[schemars(skip)]
    pub wrap_bounds: [f32; 3],
    /// Maximum per-axis drift speed per tick.
    #[schemars(skip)]
    pub max_drift: f32,
    /// Per-axis spread of convergence targets around the center.
    #[schemars(title = "Converge Spread", range(min = 0.0, max = 10.0), extend("step" = 0.1))]
    pub spread_radius: f32,
    /// Fraction of the remaining distance covered per converging tick.
    #[schemars(title = "Converge Speed", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub converge_lerp: f32,
    /// Distance to target below which a particle starts fading.
    #[schemars(skip)]
    pub fade_distance: f32,
    /// Opacity removed per tick while fading.
    #[schemars(skip)]
    pub fade_step: f32,
    /// Delay between `converge` and the hard hide, in milliseconds.
    #[schemars(title = "Hide Delay (ms)", range(min = 0, max = 10000))]
    pub hide_delay_ms: u64,
    /// Sphere material for particles; its opacity is the resting opacity.
    #[schemars(skip)]
    pub style: PrimitiveStyle,
}

impl ParticleOptions {
    /// Delay between `converge` and the hard hide.
    #[must_use]
    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.hide_delay_ms)
    }

    /// Resting opacity restored on reset.
    #[must_use]
    pub fn base_opacity(&self) -> f32 {
        self.style.opacity
    }
}

impl Default for ParticleOptions {
    fn default() -> Self {
        Self {
            count: 60,
            spawn_extent: [40.0, 30.0, 20.0],
            wrap_bounds: [25.0, 20.0, 15.0],
            max_drift: 0.01,
            spread_radius: 3.0,
            converge_lerp: 0.08,
            fade_distance: 0.1,
            fade_step: 0.05,
            hide_delay_ms: 2000,
            style: PrimitiveStyle {
                metalness: 0.3,
                roughness: 0.4,
                emissive_intensity: 0.0,
                opacity: 0.8,
                transparent: true,
                segments: 16,
            },
        }
    }
}

use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Presentation", inline)]
#[serde(default)]
/// Timing and framing of a freshly installed molecule.
pub struct PresentationOptions {
    /// Delay between a molecule arriving and its group being attached,
    /// in milliseconds.
    #[schemars(title = "Install Delay (ms)", range(min = 0, max = 10000))]
    pub install_delay_ms: u64,
    /// Largest bounding dimension after fit-to-view scaling.
    #[schemars(title = "Fit Extent", range(min = 1.0, max = 20.0), extend("step" = 0.5))]
    pub fit_extent: f32,
    /// Upper bound on the fit-to-view scale.
    #[schemars(title = "Max Scale", range(min = 0.5, max = 5.0), extend("step" = 0.1))]
    pub max_scale: f32,
    /// Turntable rotation of the displayed molecule, radians per frame.
    #[schemars(title = "Auto Rotate", range(min = 0.0, max = 0.02), extend("step" = 0.001))]
    pub auto_rotate_speed: f32,
}

impl PresentationOptions {
    /// Delay between a molecule arriving and its group being attached.
    #[must_use]
    pub fn install_delay(&self) -> Duration {
        Duration::from_millis(self.install_delay_ms)
    }
}

impl Default for PresentationOptions {
    fn default() -> Self {
        Self {
            install_delay_ms: 1500,
            fit_extent: 8.0,
            max_scale: 2.0,
            auto_rotate_speed: 0.002,
        }
    }
}

//! Centralized engine options with TOML preset support.
//!
//! Every tunable (bond geometry, particle choreography, presentation
//! timing, camera limits) lives here. Options serialize to/from TOML so
//! hosts can ship presets and let users override single sections.

mod camera;
mod geometry;
mod particles;
mod presentation;

use std::path::Path;

pub use camera::CameraOptions;
pub use geometry::GeometryOptions;
pub use particles::ParticleOptions;
pub use presentation::PresentationOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::MolsceneError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[particles]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Ball-and-stick geometry.
    pub geometry: GeometryOptions,
    /// Idle particle field.
    pub particles: ParticleOptions,
    /// Molecule install timing and framing.
    pub presentation: PresentationOptions,
    /// Camera projection and orbit controls.
    pub camera: CameraOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(text: &str) -> Result<Self, MolsceneError> {
        toml::from_str(text)
            .map_err(|e| MolsceneError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, MolsceneError> {
        let content = std::fs::read_to_string(path).map_err(MolsceneError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), MolsceneError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MolsceneError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(MolsceneError::Io)?;
        }
        std::fs::write(path, content).map_err(MolsceneError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[particles]
count = 12
hide_delay_ms = 500
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.particles.count, 12);
        assert_eq!(opts.particles.hide_delay().as_millis(), 500);
        // Everything else should be default
        assert_eq!(opts.particles.converge_lerp, 0.08);
        assert_eq!(opts.presentation.install_delay().as_millis(), 1500);
        assert_eq!(opts.geometry.bond_radius, 0.08);
    }

    #[test]
    fn nested_style_overrides() {
        let toml_str = r"
[geometry.bond_style]
segments = 12
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.geometry.bond_style.segments, 12);
        // Unspecified style fields fall back to the style default.
        assert_eq!(opts.geometry.bond_style.opacity, 1.0);
    }

    #[test]
    fn invalid_toml_is_an_options_error() {
        let err = Options::from_toml("[particles\ncount = ").unwrap_err();
        assert!(matches!(err, MolsceneError::OptionsParse(_)));
    }

    #[test]
    fn save_load_and_list_presets() {
        let dir = std::env::temp_dir()
            .join(format!("molscene-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.presentation.auto_rotate_speed = 0.0;
        opts.save(&dir.join("still.toml")).unwrap();
        Options::default().save(&dir.join("default.toml")).unwrap();

        let loaded = Options::load(&dir.join("still.toml")).unwrap();
        assert_eq!(loaded, opts);
        assert_eq!(Options::list_presets(&dir), vec!["default", "still"]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("geometry"));
        assert!(props.contains_key("particles"));
        assert!(props.contains_key("presentation"));
        assert!(props.contains_key("camera"));

        let particles = &props["particles"]["properties"];
        assert!(particles.get("count").is_some());
        assert!(particles.get("hide_delay_ms").is_some());
        assert!(particles.get("style").is_none());
    }
}

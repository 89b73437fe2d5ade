use crate::molecule::MoleculeSummary;

/// UI-side listener for molecule loads.
///
/// Both callbacks default to doing nothing, so hosts implement only what
/// they display.
pub trait SceneObserver {
    /// A record parsed successfully; `summary` describes the molecule.
    fn on_molecule_parsed(&mut self, _summary: &MoleculeSummary) {}

    /// A record failed to parse; the scene was left untouched.
    fn on_parse_error(&mut self, _message: &str) {}
}

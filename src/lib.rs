// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Molecular scene construction engine.
//!
//! Molscene turns compound records from a remote structure database into
//! positioned, styled ball-and-stick primitives, and choreographs an idle
//! "floating particles" field that collapses into the origin whenever a
//! new molecule is presented.
//!
//! # Key entry points
//!
//! - [`molecule::parser::parse`] - structure record to [`molecule::Molecule`]
//! - [`geometry::GeometryBuilder`] - molecule to centered atom/bond
//!   primitives with a bounding extent
//! - [`particles::ParticleField`] - free-float / converge / hide state
//!   machine for the idle scene
//! - [`orchestrator::SceneOrchestrator`] - sequences parsing, convergence,
//!   delayed installation, fit-to-view scaling and disposal
//! - [`options::Options`] - tunables with TOML preset support
//!
//! # Architecture
//!
//! The rendering runtime is an external collaborator reached through the
//! [`scene::SceneGraph`] trait. Everything runs on the host's frame
//! callback: [`orchestrator::SceneOrchestrator::frame`] advances the
//! orchestrator clock, fires generation-tagged deferred tasks, ticks the
//! particle field, and mirrors particle state into scene nodes.
//! [`scene::RetainedScene`] is an in-memory graph for headless hosts and
//! tests.

pub mod camera;
pub mod error;
pub mod geometry;
pub mod molecule;
pub mod options;
pub mod orchestrator;
pub mod particles;
pub mod scene;
pub mod util;

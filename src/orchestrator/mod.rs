//! Sequencing of molecule swaps against the particle field.
//!
//! [`SceneOrchestrator`] owns the scene graph, the particle field, the
//! view controls and the displayed molecule group. Presenting a molecule
//! disposes whatever is on screen, collapses the particles toward the
//! origin, builds the new geometry, and installs it after the
//! presentation delay. Every mutation happens inside
//! [`SceneOrchestrator::frame`] or the call that triggered it; deferred
//! work goes through a generation-tagged [`Scheduler`] so a newer request
//! silently voids older pending installs.

mod observer;
mod schedule;

use std::f32::consts::TAU;
use std::time::Duration;

use glam::{Quat, Vec3};
pub use observer::SceneObserver;
pub use schedule::Scheduler;

use crate::camera::ViewControls;
use crate::error::MolsceneError;
use crate::geometry::{GeometryBuilder, MoleculeGeometry};
use crate::molecule::{self, Molecule, MoleculeSummary, StructureRecord};
use crate::options::Options;
use crate::particles::ParticleField;
use crate::scene::{NodeId, SceneGraph, Transform};

/// Aspect ratio used until the host reports a viewport size.
const DEFAULT_ASPECT: f32 = 1.0;

/// What the orchestrator is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    /// No molecule; particles float freely.
    Empty,
    /// A molecule is built and waiting for the presentation delay.
    Building,
    /// A molecule group is attached to the scene.
    Displayed,
}

/// Handle for one in-flight structure fetch.
///
/// Tokens are ordered by issue time; a response carrying a token older
/// than the last applied one is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// Deferred orchestrator work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    Install,
}

/// The molecule group currently attached to the scene.
#[derive(Debug)]
struct DisplayedGroup {
    root: NodeId,
    primitives: Vec<NodeId>,
    angle: f32,
    scale: f32,
}

impl DisplayedGroup {
    fn transform(&self) -> Transform {
        let rotation = Quat::from_rotation_y(self.angle);
        Transform::from_rotation_scale(rotation, self.scale)
    }
}

/// Owns the scene and drives molecule presentation.
pub struct SceneOrchestrator<G: SceneGraph> {
    graph: G,
    options: Options,
    builder: GeometryBuilder,
    particles: ParticleField,
    particle_nodes: Vec<NodeId>,
    controls: ViewControls,
    scheduler: Scheduler<Task>,
    observer: Option<Box<dyn SceneObserver>>,

    molecule: Option<Molecule>,
    pending: Option<MoleculeGeometry>,
    displayed: Option<DisplayedGroup>,

    clock: Duration,
    generation: u64,
    next_request: u64,
    applied_request: Option<u64>,
}

impl<G: SceneGraph> SceneOrchestrator<G> {
    /// Orchestrator over `graph` with an OS-seeded particle pool.
    pub fn new(graph: G, options: Options) -> Self {
        let particles = ParticleField::new(options.particles.clone());
        Self::with_particles(graph, options, particles)
    }

    /// Orchestrator with a reproducible particle pool.
    pub fn with_seed(graph: G, options: Options, seed: u64) -> Self {
        let particles =
            ParticleField::with_seed(options.particles.clone(), seed);
        Self::with_particles(graph, options, particles)
    }

    fn with_particles(
        mut graph: G,
        options: Options,
        particles: ParticleField,
    ) -> Self {
        let style = options.particles.style;
        let particle_nodes = particles
            .particles()
            .iter()
            .map(|p| {
                let color = p.element.cpk_color();
                let node = graph.create_sphere(p.radius(), color, &style);
                let transform = Transform::from_translation(p.position);
                graph.set_transform(node, &transform);
                graph.add_node(node);
                node
            })
            .collect();

        Self {
            builder: GeometryBuilder::new(options.geometry.clone()),
            controls: ViewControls::new(&options.camera, DEFAULT_ASPECT),
            graph,
            options,
            particles,
            particle_nodes,
            scheduler: Scheduler::new(),
            observer: None,
            molecule: None,
            pending: None,
            displayed: None,
            clock: Duration::ZERO,
            generation: 0,
            next_request: 0,
            applied_request: None,
        }
    }

    /// Register the UI listener, replacing any previous one.
    pub fn set_observer(&mut self, observer: Box<dyn SceneObserver>) {
        self.observer = Some(observer);
    }

    /// Issue a token for a fetch about to start.
    pub fn begin_request(&mut self) -> RequestToken {
        self.next_request += 1;
        RequestToken(self.next_request)
    }

    /// Present the response to a fetch, unless a newer response has
    /// already been applied. Returns `Ok(None)` for discarded responses.
    pub fn apply_response(
        &mut self,
        token: RequestToken,
        record: &StructureRecord,
    ) -> Result<Option<MoleculeSummary>, MolsceneError> {
        if self.applied_request.is_some_and(|applied| token.0 <= applied) {
            log::debug!(
                "discarding response {} (already applied {:?})",
                token.0,
                self.applied_request
            );
            return Ok(None);
        }
        self.applied_request = Some(token.0);
        self.show_molecule(record).map(Some)
    }

    /// Parse `record` and present it. On failure nothing in the scene
    /// changes and the observer is told.
    pub fn show_molecule(
        &mut self,
        record: &StructureRecord,
    ) -> Result<MoleculeSummary, MolsceneError> {
        let parsed = molecule::parse(record);
        self.accept(parsed)
    }

    /// Decode and present a JSON structure record.
    pub fn show_json(
        &mut self,
        json: &str,
    ) -> Result<MoleculeSummary, MolsceneError> {
        let parsed = molecule::parse_json(json);
        self.accept(parsed)
    }

    fn accept(
        &mut self,
        parsed: Result<Molecule, MolsceneError>,
    ) -> Result<MoleculeSummary, MolsceneError> {
        match parsed {
            Ok(molecule) => {
                let summary = molecule.summary();
                if let Some(observer) = self.observer.as_mut() {
                    observer.on_molecule_parsed(&summary);
                }
                self.present(molecule);
                Ok(summary)
            }
            Err(err) => {
                log::warn!("structure rejected: {err}");
                if let Some(observer) = self.observer.as_mut() {
                    observer.on_parse_error(&err.to_string());
                }
                Err(err)
            }
        }
    }

    /// Swap in a parsed molecule: dispose the current group, collapse the
    /// particles, build the geometry, and queue the install.
    pub fn present(&mut self, molecule: Molecule) {
        self.generation += 1;
        self.dispose_current();

        self.particles
            .converge(Vec3::ZERO, self.options.particles.spread_radius);

        self.pending = Some(self.builder.build(&molecule));
        self.molecule = Some(molecule);
        self.scheduler.schedule(
            self.clock
                .saturating_add(self.options.presentation.install_delay()),
            self.generation,
            Task::Install,
        );
    }

    /// Remove the displayed molecule and bring the particles back.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.scheduler.cancel_all();
        self.dispose_current();
        self.molecule = None;
        self.particles.reset();
        self.sync_particles();
        log::info!("scene cleared");
    }

    /// Advance one frame: fire due tasks, tick particles, apply damped
    /// camera motion, and auto-rotate the displayed group.
    pub fn frame(&mut self, dt: Duration) {
        self.clock += dt;

        for task in self.scheduler.drain_due(self.clock, self.generation) {
            match task {
                Task::Install => self.install(),
            }
        }

        self.particles.tick(dt, self.clock);
        self.sync_particles();
        self.controls.update();

        let speed = self.options.presentation.auto_rotate_speed;
        if let Some(group) = self.displayed.as_mut() {
            group.angle = (group.angle + speed) % TAU;
            self.graph.set_transform(group.root, &group.transform());
        }
    }

    /// Realize the pending geometry as scene nodes and attach it.
    fn install(&mut self) {
        let Some(geometry) = self.pending.take() else {
            return;
        };
        self.dispose_current();

        let graph = &mut self.graph;
        let opts = &self.options.geometry;
        let root = graph.create_group();
        let mut primitives = Vec::with_capacity(geometry.primitive_count());

        for atom in &geometry.atoms {
            let node =
                graph.create_sphere(atom.radius, atom.color, &opts.atom_style);
            graph.set_transform(node, &atom.transform());
            graph.add_child(root, node);
            primitives.push(node);
        }
        for cylinder in geometry.bonds.iter().flat_map(|b| &b.cylinders) {
            let node = graph.create_cylinder(
                cylinder.radius,
                cylinder.length,
                opts.bond_color,
                &opts.bond_style,
            );
            graph.set_transform(node, &cylinder.transform());
            graph.add_child(root, node);
            primitives.push(node);
        }

        graph.add_node(root);
        self.controls.reset();

        let presentation = &self.options.presentation;
        let group = DisplayedGroup {
            root,
            primitives,
            angle: 0.0,
            scale: geometry
                .fit_scale(presentation.fit_extent, presentation.max_scale),
        };
        self.graph.set_transform(root, &group.transform());

        log::info!(
            "installed molecule: {} primitives, scale {:.3}",
            group.primitives.len(),
            group.scale
        );
        self.displayed = Some(group);
    }

    /// Release and detach the current group, and drop any pending build.
    fn dispose_current(&mut self) {
        self.pending = None;
        let Some(group) = self.displayed.take() else {
            return;
        };
        for &node in &group.primitives {
            self.graph.dispose_geometry(node);
            self.graph.dispose_material(node);
        }
        self.graph.remove_node(group.root);
    }

    fn sync_particles(&mut self) {
        let nodes = &self.particle_nodes;
        for (p, &node) in self.particles.particles().iter().zip(nodes) {
            self.graph
                .set_transform(node, &Transform::from_translation(p.position));
            self.graph.set_opacity(node, p.opacity);
            self.graph.set_visible(node, p.visible);
        }
    }

    /// Current presentation phase.
    #[must_use]
    pub fn display_state(&self) -> DisplayState {
        if self.displayed.is_some() {
            DisplayState::Displayed
        } else if self.pending.is_some() {
            DisplayState::Building
        } else {
            DisplayState::Empty
        }
    }

    /// Root node of the displayed group.
    #[must_use]
    pub fn displayed_root(&self) -> Option<NodeId> {
        self.displayed.as_ref().map(|g| g.root)
    }

    /// Fit-to-view scale of the displayed group.
    #[must_use]
    pub fn display_scale(&self) -> Option<f32> {
        self.displayed.as_ref().map(|g| g.scale)
    }

    /// Most recently presented molecule.
    #[must_use]
    pub fn molecule(&self) -> Option<&Molecule> {
        self.molecule.as_ref()
    }

    /// The owned scene graph.
    #[must_use]
    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Mutable access to the scene graph, for host-side nodes.
    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.graph
    }

    /// Idle particle field.
    #[must_use]
    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    /// Scene nodes mirroring the particles, in particle order.
    #[must_use]
    pub fn particle_nodes(&self) -> &[NodeId] {
        &self.particle_nodes
    }

    /// View controls.
    #[must_use]
    pub fn controls(&self) -> &ViewControls {
        &self.controls
    }

    /// Mutable view controls, for input handling and resizes.
    pub fn controls_mut(&mut self) -> &mut ViewControls {
        &mut self.controls
    }

    /// Options the orchestrator was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Request generation; bumped by every present and clear.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Sum of every `dt` passed to [`frame`](Self::frame).
    #[must_use]
    pub fn clock(&self) -> Duration {
        self.clock
    }
}

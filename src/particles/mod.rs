//! Idle "floating atoms" field and its converge/hide/reset choreography.
//!
//! The field owns a fixed pool of [`Particle`]s created once. While free
//! they bob and drift inside a wrap box. [`ParticleField::converge`] pulls
//! every particle toward a jittered target around a center and schedules a
//! hard hide on the field clock; [`ParticleField::reset`] puts everything
//! back where it spawned.

mod particle;

use std::f32::consts::TAU;
use std::time::Duration;

use glam::Vec3;
pub use particle::{Particle, ParticleState, PARTICLE_RADIUS_SCALE};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::molecule::Symbol;
use crate::options::ParticleOptions;

/// Elements the idle pool is drawn from.
const SPAWN_ELEMENTS: [Symbol; 6] = [
    Symbol::C,
    Symbol::H,
    Symbol::O,
    Symbol::N,
    Symbol::S,
    Symbol::Cl,
];

/// Field-wide phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldState {
    /// Particles float freely.
    #[default]
    Free,
    /// Particles are closing in on their targets.
    Converging,
    /// Every particle is invisible; ticks do nothing.
    Hidden,
}

/// Pool of idle particles.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    state: FieldState,
    options: ParticleOptions,
    rng: StdRng,
    /// Sum of every `dt` passed to `tick`.
    clock: Duration,
    hide_deadline: Option<Duration>,
}

impl ParticleField {
    /// Spawn a pool seeded from the OS.
    #[must_use]
    pub fn new(options: ParticleOptions) -> Self {
        Self::from_rng(options, StdRng::from_os_rng())
    }

    /// Spawn a reproducible pool.
    #[must_use]
    pub fn with_seed(options: ParticleOptions, seed: u64) -> Self {
        Self::from_rng(options, StdRng::seed_from_u64(seed))
    }

    fn from_rng(options: ParticleOptions, mut rng: StdRng) -> Self {
        let extent = Vec3::from(options.spawn_extent);
        let base_opacity = options.base_opacity();
        let drift = options.max_drift;

        let particles = (0..options.count)
            .map(|_| {
                let element =
                    SPAWN_ELEMENTS[rng.random_range(0..SPAWN_ELEMENTS.len())];
                let position = centered_sample(&mut rng) * extent;
                let velocity = centered_sample(&mut rng) * (2.0 * drift);
                Particle {
                    element,
                    position,
                    original_position: position,
                    velocity,
                    phase: rng.random::<f32>() * TAU,
                    float_speed: 0.5 + rng.random::<f32>() * 0.5,
                    state: ParticleState::Free,
                    target: None,
                    opacity: base_opacity,
                    visible: true,
                }
            })
            .collect();

        Self {
            particles,
            state: FieldState::Free,
            options,
            rng,
            clock: Duration::ZERO,
            hide_deadline: None,
        }
    }

    /// All particles, in spawn order.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Current field phase.
    #[must_use]
    pub fn state(&self) -> FieldState {
        self.state
    }

    /// Whether the hard hide has fired.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.state == FieldState::Hidden
    }

    /// Options the pool was spawned with.
    #[must_use]
    pub fn options(&self) -> &ParticleOptions {
        &self.options
    }

    /// Time left until the scheduled hide, if one is pending.
    #[must_use]
    pub fn hide_remaining(&self) -> Option<Duration> {
        self.hide_deadline
            .map(|deadline| deadline.saturating_sub(self.clock))
    }

    /// Advance the field by one frame.
    ///
    /// `dt` drives the hide deadline; `elapsed` is the absolute time used
    /// for the bobbing phase.
    pub fn tick(&mut self, dt: Duration, elapsed: Duration) {
        if self.is_hidden() {
            return;
        }
        self.clock += dt;
        if self.hide_deadline.is_some_and(|deadline| self.clock >= deadline) {
            self.hide();
            return;
        }

        let time = elapsed.as_secs_f32();
        let bounds = Vec3::from(self.options.wrap_bounds);
        let lerp = self.options.converge_lerp;
        let fade_distance = self.options.fade_distance;
        let fade_step = self.options.fade_step;

        for p in &mut self.particles {
            match p.state {
                ParticleState::Free => p.float_step(time, bounds),
                ParticleState::Converging => {
                    p.converge_step(lerp, fade_distance, fade_step);
                }
            }
        }
    }

    /// Send every particle toward a jittered target around `center` and
    /// schedule the hard hide. Replaces any pending hide.
    pub fn converge(&mut self, center: Vec3, spread: f32) {
        for p in &mut self.particles {
            let jitter = centered_sample(&mut self.rng) * spread;
            p.state = ParticleState::Converging;
            p.target = Some(center + jitter);
        }
        // An already hidden field stays hidden; nothing left to schedule.
        if self.is_hidden() {
            return;
        }
        self.state = FieldState::Converging;
        self.hide_deadline =
            Some(self.clock.saturating_add(self.options.hide_delay()));
        log::debug!(
            "particles converging on {center}, hide in {:?}",
            self.options.hide_delay()
        );
    }

    /// Return every particle to its spawn position, free and visible.
    /// Cancels any pending hide.
    pub fn reset(&mut self) {
        let base_opacity = self.options.base_opacity();
        for p in &mut self.particles {
            p.restore(base_opacity);
        }
        self.state = FieldState::Free;
        self.hide_deadline = None;
    }

    fn hide(&mut self) {
        for p in &mut self.particles {
            p.visible = false;
        }
        self.state = FieldState::Hidden;
        self.hide_deadline = None;
        log::debug!("particle field hidden");
    }
}

/// Uniform sample in `[-0.5, 0.5)` per axis.
fn centered_sample(rng: &mut StdRng) -> Vec3 {
    Vec3::new(
        rng.random::<f32>() - 0.5,
        rng.random::<f32>() - 0.5,
        rng.random::<f32>() - 0.5,
    )
}

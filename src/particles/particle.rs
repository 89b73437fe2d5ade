use glam::Vec3;

use crate::molecule::Symbol;
use crate::util::vector::{lerp_vec3, wrap_position};

/// Sphere radius multiplier applied to the element radius.
pub const PARTICLE_RADIUS_SCALE: f32 = 0.5;

/// Per-particle motion mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParticleState {
    /// Bobbing and drifting inside the wrap box.
    #[default]
    Free,
    /// Closing in on a convergence target and fading out.
    Converging,
}

/// One decorative atom in the idle field.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Element, deciding color and size.
    pub element: Symbol,
    /// Current position.
    pub position: Vec3,
    /// Spawn position, restored on reset.
    pub original_position: Vec3,
    /// Constant drift added every free tick.
    pub velocity: Vec3,
    /// Bobbing phase offset in radians.
    pub phase: f32,
    /// Bobbing frequency multiplier.
    pub float_speed: f32,
    /// Motion mode.
    pub state: ParticleState,
    /// Convergence target while converging.
    pub target: Option<Vec3>,
    /// Material opacity.
    pub opacity: f32,
    /// Whether the particle is drawn.
    pub visible: bool,
}

impl Particle {
    /// Sphere radius for this particle's element.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.element.vdw_radius() * PARTICLE_RADIUS_SCALE
    }

    /// Bob along a per-axis sinusoid, drift, then wrap at `bounds`.
    pub(crate) fn float_step(&mut self, time: f32, bounds: Vec3) {
        let t = time * self.float_speed;
        let bob = Vec3::new(
            (t + self.phase).sin() * 0.01,
            (t * 0.7 + self.phase).cos() * 0.015,
            (t * 0.5 + self.phase).sin() * 0.008,
        );
        let next = self.position + bob + self.velocity;
        self.position = wrap_position(next, bounds);
    }

    /// Close a fraction of the distance to the target; fade once near it.
    pub(crate) fn converge_step(
        &mut self,
        lerp: f32,
        fade_distance: f32,
        fade_step: f32,
    ) {
        let Some(target) = self.target else {
            return;
        };
        self.position = lerp_vec3(lerp, self.position, target);
        if self.position.distance(target) < fade_distance {
            self.opacity = (self.opacity - fade_step).max(0.0);
        }
    }

    /// Back to the spawn position, free and fully shown.
    pub(crate) fn restore(&mut self, base_opacity: f32) {
        self.state = ParticleState::Free;
        self.target = None;
        self.position = self.original_position;
        self.opacity = base_opacity;
        self.visible = true;
    }
}

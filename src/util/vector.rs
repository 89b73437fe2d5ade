//! Vector helpers layered over `glam` for bond and particle geometry.
//!
//! `glam` supplies the arithmetic (add, subtract, scale, normalize, length,
//! dot, cross). This module adds the derived operations the scene needs:
//! perpendicular derivation for multi-bond offsets, shortest-arc cylinder
//! orientation, centroid/extent reductions, and boundary wrapping.

use glam::{Quat, Vec3};

/// Axis that unrotated cylinder primitives are aligned with.
pub const CYLINDER_UP: Vec3 = Vec3::Y;

/// |dot| with +X above which +X is too close to parallel to serve as the
/// cross-product reference.
const PARALLEL_THRESHOLD: f32 = 0.9;

/// Linear interpolation between two Vec3 positions.
#[inline]
pub fn lerp_vec3(t: f32, start: Vec3, end: Vec3) -> Vec3 {
    start + (end - start) * t
}

/// Unit vector perpendicular to `direction`.
///
/// Crosses the normalized direction with +X, or with +Y when the direction
/// lies within `PARALLEL_THRESHOLD` of the X axis. A zero-length
/// direction yields +X.
#[must_use]
pub fn find_perpendicular(direction: Vec3) -> Vec3 {
    let v = direction.normalize_or_zero();
    if v == Vec3::ZERO {
        return Vec3::X;
    }
    let reference = if v.dot(Vec3::X).abs() > PARALLEL_THRESHOLD {
        Vec3::Y
    } else {
        Vec3::X
    };
    v.cross(reference).normalize()
}

/// Shortest-arc rotation taking [`CYLINDER_UP`] onto `direction`.
///
/// Zero-length directions yield the identity rotation.
#[must_use]
pub fn rotation_from_up(direction: Vec3) -> Quat {
    let dir = direction.normalize_or_zero();
    if dir == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    Quat::from_rotation_arc(CYLINDER_UP, dir)
}

/// Arithmetic mean of `points`, or the origin when empty.
#[must_use]
pub fn centroid(points: &[Vec3]) -> Vec3 {
    if points.is_empty() {
        return Vec3::ZERO;
    }
    points.iter().copied().sum::<Vec3>() / points.len() as f32
}

/// Component-wise `max - min` over `points`, or zero when empty.
#[must_use]
pub fn extent(points: &[Vec3]) -> Vec3 {
    let Some(&first) = points.first() else {
        return Vec3::ZERO;
    };
    let (min, max) = points
        .iter()
        .fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
    max - min
}

/// Re-enter a coordinate through the opposite face once it leaves
/// `[-bound, bound]`.
#[inline]
pub fn wrap_coordinate(value: f32, bound: f32) -> f32 {
    if value > bound {
        -bound
    } else if value < -bound {
        bound
    } else {
        value
    }
}

/// Apply [`wrap_coordinate`] per axis with half-extents `bounds`.
#[inline]
pub fn wrap_position(position: Vec3, bounds: Vec3) -> Vec3 {
    Vec3::new(
        wrap_coordinate(position.x, bounds.x),
        wrap_coordinate(position.y, bounds.y),
        wrap_coordinate(position.z, bounds.z),
    )
}

//! Scene-graph capability consumed by the engine.
//!
//! The renderer (camera, lights, meshes, materials) lives outside this
//! crate. The engine only needs to create sphere/cylinder/group nodes,
//! place them, attach and detach them, and release their GPU-side
//! resources; [`SceneGraph`] is that contract. [`RetainedScene`] is an
//! in-memory implementation for headless hosts and tests.

pub mod instance;
mod retained;

use glam::{Mat4, Quat, Vec3};
pub use retained::{NodeKind, RetainedNode, RetainedScene};
use serde::{Deserialize, Serialize};

use crate::util::color::Color;

/// Opaque handle to a node owned by a [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// Translation, rotation, and scale of a node relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position relative to the parent.
    pub translation: Vec3,
    /// Orientation relative to the parent.
    pub rotation: Quat,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Transform {
    /// No translation, rotation, or scale.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Pure translation.
    #[must_use]
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Translation plus rotation, unit scale.
    #[must_use]
    pub fn from_translation_rotation(
        translation: Vec3,
        rotation: Quat,
    ) -> Self {
        Self {
            translation,
            rotation,
            scale: Vec3::ONE,
        }
    }

    /// Uniform scale about the origin, with a rotation.
    #[must_use]
    pub fn from_rotation_scale(rotation: Quat, scale: f32) -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation,
            scale: Vec3::splat(scale),
        }
    }

    /// Local-to-parent matrix (scale, then rotate, then translate).
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            self.rotation,
            self.translation,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Surface and tessellation parameters for a primitive's material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimitiveStyle {
    /// PBR metalness in [0, 1].
    pub metalness: f32,
    /// PBR roughness in [0, 1].
    pub roughness: f32,
    /// Self-illumination in the base color, in [0, 1].
    pub emissive_intensity: f32,
    /// Initial opacity in [0, 1].
    pub opacity: f32,
    /// Whether the material blends with what is behind it.
    pub transparent: bool,
    /// Radial segment count for the generated mesh.
    pub segments: u32,
}

impl Default for PrimitiveStyle {
    fn default() -> Self {
        Self {
            metalness: 0.2,
            roughness: 0.3,
            emissive_intensity: 0.0,
            opacity: 1.0,
            transparent: false,
            segments: 16,
        }
    }
}

/// Scene-graph operations the engine relies on.
///
/// Newly created nodes are detached. Disposal releases the node's
/// geometry or material; callers dispose a primitive before detaching the
/// group that holds it, and never touch a node after removing it.
pub trait SceneGraph {
    /// Create an empty grouping node.
    fn create_group(&mut self) -> NodeId;

    /// Create a sphere mesh centered on its local origin.
    fn create_sphere(
        &mut self,
        radius: f32,
        color: Color,
        style: &PrimitiveStyle,
    ) -> NodeId;

    /// Create a cylinder mesh centered on its local origin and running
    /// along local +Y.
    fn create_cylinder(
        &mut self,
        radius: f32,
        height: f32,
        color: Color,
        style: &PrimitiveStyle,
    ) -> NodeId;

    /// Attach a node to the scene root.
    fn add_node(&mut self, node: NodeId);

    /// Attach `child` under `parent`.
    fn add_child(&mut self, parent: NodeId, child: NodeId);

    /// Detach a node (and its subtree) from the scene. The handle is dead
    /// afterwards.
    fn remove_node(&mut self, node: NodeId);

    /// Release a mesh node's geometry.
    fn dispose_geometry(&mut self, node: NodeId);

    /// Release a mesh node's material.
    fn dispose_material(&mut self, node: NodeId);

    /// Replace a node's local transform.
    fn set_transform(&mut self, node: NodeId, transform: &Transform);

    /// Set a mesh node's material opacity.
    fn set_opacity(&mut self, node: NodeId, opacity: f32);

    /// Show or hide a node.
    fn set_visible(&mut self, node: NodeId, visible: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_matrix_applies_scale_then_rotation_then_translation() {
        let t = Transform {
            translation: Vec3::new(1.0, 0.0, 0.0),
            rotation: Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
            scale: Vec3::splat(2.0),
        };
        let p = t.to_matrix().transform_point3(Vec3::X);
        // X scaled to 2X, rotated onto 2Y, then shifted by +X.
        assert!(p.abs_diff_eq(Vec3::new(1.0, 2.0, 0.0), 1e-5));
    }

    #[test]
    fn identity_is_default() {
        assert_eq!(Transform::default(), Transform::IDENTITY);
        assert_eq!(Transform::IDENTITY.to_matrix(), Mat4::IDENTITY);
    }
}

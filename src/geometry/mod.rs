//! Ball-and-stick primitives derived from a [`Molecule`].
//!
//! [`GeometryBuilder`] turns atoms into spheres and bonds into one to
//! three cylinders, all centered on the molecule's centroid. The result is
//! plain data; realizing it as scene nodes is the orchestrator's job.
//!
//! [`Molecule`]: crate::molecule::Molecule

/// Atom spheres and bond cylinders from parsed molecules.
pub mod builder;

pub use builder::GeometryBuilder;
use glam::{Quat, Vec3};

use crate::molecule::{BondOrder, Symbol};
use crate::scene::Transform;
use crate::util::color::Color;

/// Sphere for one atom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtomPrimitive {
    /// Index into the source molecule's atoms.
    pub atom_index: usize,
    /// Element, for picking and labels.
    pub element: Symbol,
    /// Centroid-relative position.
    pub position: Vec3,
    /// Sphere radius.
    pub radius: f32,
    /// CPK color.
    pub color: Color,
}

impl AtomPrimitive {
    /// Node transform placing the sphere.
    #[must_use]
    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position)
    }
}

/// One cylinder of a bond, running along local +Y before rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BondCylinder {
    /// Centroid-relative center.
    pub center: Vec3,
    /// Rotation taking +Y onto the bond axis.
    pub rotation: Quat,
    /// Cylinder height (the bond length).
    pub length: f32,
    /// Cylinder radius.
    pub radius: f32,
}

impl BondCylinder {
    /// Node transform placing the cylinder.
    #[must_use]
    pub fn transform(&self) -> Transform {
        Transform::from_translation_rotation(self.center, self.rotation)
    }
}

/// All cylinders drawn for one bond.
#[derive(Debug, Clone, PartialEq)]
pub struct BondPrimitive {
    /// Index into the source molecule's bonds.
    pub bond_index: usize,
    /// Bond order; equals the number of cylinders.
    pub order: BondOrder,
    /// One, two, or three cylinders.
    pub cylinders: Vec<BondCylinder>,
}

/// Positioned primitives for a whole molecule.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MoleculeGeometry {
    /// One sphere per atom, in atom order.
    pub atoms: Vec<AtomPrimitive>,
    /// Bond cylinders, in bond order.
    pub bonds: Vec<BondPrimitive>,
    /// Mean of the original atom positions.
    pub centroid: Vec3,
    /// Component-wise `max - min` of the centered atom positions.
    pub bounding_extent: Vec3,
}

impl MoleculeGeometry {
    /// Total sphere and cylinder count.
    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.atoms.len()
            + self.bonds.iter().map(|b| b.cylinders.len()).sum::<usize>()
    }

    /// Whether there is nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty() && self.bonds.is_empty()
    }

    /// Uniform scale fitting this geometry into `target` units, capped.
    #[must_use]
    pub fn fit_scale(&self, target: f32, cap: f32) -> f32 {
        fit_scale(self.bounding_extent, target, cap)
    }
}

/// `min(target / max component of extent, cap)`.
///
/// A zero (or non-finite) extent yields `cap`.
#[must_use]
pub fn fit_scale(extent: Vec3, target: f32, cap: f32) -> f32 {
    let largest = extent.max_element();
    if !largest.is_finite() || largest <= 0.0 {
        return cap;
    }
    (target / largest).min(cap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn large_molecules_fit_to_target() {
        let scale = fit_scale(Vec3::new(16.0, 4.0, 2.0), 8.0, 2.0);
        assert_eq!(scale, 0.5);
        assert_eq!(16.0 * scale, 8.0);
    }

    #[test]
    fn small_molecules_hit_the_cap_exactly() {
        assert_eq!(fit_scale(Vec3::new(1.0, 0.5, 0.0), 8.0, 2.0), 2.0);
        assert_eq!(fit_scale(Vec3::splat(4.0), 8.0, 2.0), 2.0);
    }

    #[test]
    fn zero_extent_yields_cap() {
        assert_eq!(fit_scale(Vec3::ZERO, 8.0, 2.0), 2.0);
        assert_eq!(MoleculeGeometry::default().fit_scale(8.0, 2.0), 2.0);
    }

    #[test]
    fn transforms_place_primitives() {
        let atom = AtomPrimitive {
            atom_index: 0,
            element: Symbol::C,
            position: Vec3::new(1.0, 2.0, 3.0),
            radius: 0.38,
            color: Symbol::C.cpk_color(),
        };
        assert_eq!(atom.transform().translation, atom.position);

        let cyl = BondCylinder {
            center: Vec3::X,
            rotation: Quat::from_rotation_arc(Vec3::Y, Vec3::X),
            length: 2.0,
            radius: 0.08,
        };
        let top = cyl
            .transform()
            .to_matrix()
            .transform_point3(Vec3::new(0.0, 1.0, 0.0));
        assert!(top.abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), 1e-5));
    }
}

//! Sphere and cylinder placement for atoms and bonds.

use glam::Vec3;

use super::{AtomPrimitive, BondCylinder, BondPrimitive, MoleculeGeometry};
use crate::molecule::{BondOrder, Molecule};
use crate::options::GeometryOptions;
use crate::util::vector::{
    centroid, extent, find_perpendicular, rotation_from_up,
};

/// Builds centered ball-and-stick geometry from molecules.
#[derive(Debug, Clone, Default)]
pub struct GeometryBuilder {
    options: GeometryOptions,
}

impl GeometryBuilder {
    /// Builder with the given sizing options.
    #[must_use]
    pub fn new(options: GeometryOptions) -> Self {
        Self { options }
    }

    /// Current sizing options.
    #[must_use]
    pub fn options(&self) -> &GeometryOptions {
        &self.options
    }

    /// Replace the sizing options for subsequent builds.
    pub fn set_options(&mut self, options: GeometryOptions) {
        self.options = options;
    }

    /// Spheres and cylinders for every atom and bond, centered on the
    /// molecule's centroid.
    #[must_use]
    pub fn build(&self, molecule: &Molecule) -> MoleculeGeometry {
        let positions = molecule.positions();
        let center = centroid(&positions);

        let atoms: Vec<AtomPrimitive> = molecule
            .atoms()
            .iter()
            .enumerate()
            .map(|(i, atom)| AtomPrimitive {
                atom_index: i,
                element: atom.element,
                position: atom.position - center,
                radius: atom.element.vdw_radius()
                    * self.options.atom_radius_scale,
                color: atom.element.cpk_color(),
            })
            .collect();

        let mut bonds = Vec::with_capacity(molecule.bonds().len());
        for (i, bond) in molecule.bonds().iter().enumerate() {
            let (Some(a), Some(b)) =
                (atoms.get(bond.atom_a), atoms.get(bond.atom_b))
            else {
                continue;
            };
            bonds.push(BondPrimitive {
                bond_index: i,
                order: bond.order,
                cylinders: self.build_bond(a.position, b.position, bond.order),
            });
        }

        let centered: Vec<Vec3> = atoms.iter().map(|a| a.position).collect();

        MoleculeGeometry {
            atoms,
            bonds,
            centroid: center,
            bounding_extent: extent(&centered),
        }
    }

    /// Cylinders for a bond between `pos_a` and `pos_b`.
    ///
    /// Double bonds draw two thinner cylinders offset either side of the
    /// axis; triple bonds add a third on the axis itself. Offsets follow a
    /// perpendicular derived from the bond direction.
    #[must_use]
    pub fn build_bond(
        &self,
        pos_a: Vec3,
        pos_b: Vec3,
        order: BondOrder,
    ) -> Vec<BondCylinder> {
        let direction = pos_b - pos_a;
        let length = direction.length();
        let midpoint = (pos_a + pos_b) * 0.5;
        let rotation = rotation_from_up(direction);
        let base_radius = self.options.bond_radius;

        let cylinder = |center: Vec3, radius: f32| BondCylinder {
            center,
            rotation,
            length,
            radius,
        };

        match order {
            BondOrder::Single => vec![cylinder(midpoint, base_radius)],
            BondOrder::Double => {
                let offset =
                    find_perpendicular(direction) * self.options.bond_offset;
                let radius =
                    base_radius * self.options.double_bond_radius_factor;
                vec![
                    cylinder(midpoint + offset, radius),
                    cylinder(midpoint - offset, radius),
                ]
            }
            BondOrder::Triple => {
                let offset =
                    find_perpendicular(direction) * self.options.bond_offset;
                let radius =
                    base_radius * self.options.triple_bond_radius_factor;
                vec![
                    cylinder(midpoint, radius),
                    cylinder(midpoint + offset, radius),
                    cylinder(midpoint - offset, radius),
                ]
            }
        }
    }
}

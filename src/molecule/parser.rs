//! Structure record → [`Molecule`] normalization.
//!
//! Graceful-degradation policy:
//! - missing z array (2D layout) → every z is 0; a short z array pads
//!   with 0
//! - missing order array or a 0 entry → single bond
//! - orders above 3 → single bond, with a warning
//! - atom ids of 0 or past the atom list → bond dropped, with a warning
//!
//! Missing elements, a missing conformer, or x/y arrays shorter than the
//! element list are [`MolsceneError::MalformedStructure`].

use glam::Vec3;

use super::record::{BondTable, StructureRecord};
use super::{Atom, Bond, BondOrder, Molecule, Symbol};
use crate::error::MolsceneError;

/// Parse a structure record into a [`Molecule`].
///
/// Pure and deterministic: atoms and bonds keep record order.
pub fn parse(record: &StructureRecord) -> Result<Molecule, MolsceneError> {
    let elements = record
        .atoms
        .as_ref()
        .map(|table| table.element.as_slice())
        .filter(|elements| !elements.is_empty())
        .ok_or_else(|| {
            MolsceneError::malformed("record has no atom element list")
        })?;

    let conformer = record.first_conformer().ok_or_else(|| {
        MolsceneError::malformed("record has no coordinate conformer")
    })?;

    let atom_count = elements.len();
    if conformer.x.len() < atom_count || conformer.y.len() < atom_count {
        return Err(MolsceneError::malformed(format!(
            "conformer has {} x / {} y coordinates for {atom_count} atoms",
            conformer.x.len(),
            conformer.y.len()
        )));
    }

    let z = conformer.z.as_deref().unwrap_or_default();
    let atoms = elements
        .iter()
        .enumerate()
        .map(|(i, &number)| Atom {
            element: Symbol::from_atomic_number(number),
            position: Vec3::new(
                conformer.x[i],
                conformer.y[i],
                z.get(i).copied().unwrap_or(0.0),
            ),
        })
        .collect();

    let bonds = record.bonds.as_ref().map(read_bonds).unwrap_or_default();

    Ok(Molecule::new(atoms, bonds))
}

/// Decode JSON (bare record or response envelope) and parse it.
pub fn parse_json(json: &str) -> Result<Molecule, MolsceneError> {
    parse(&StructureRecord::from_json(json)?)
}

/// Convert 1-based id pairs to 0-based bonds. Range checks against the
/// atom list happen in [`Molecule::new`].
fn read_bonds(table: &BondTable) -> Vec<Bond> {
    if table.aid1.len() != table.aid2.len() {
        log::warn!(
            "bond table has {} aid1 and {} aid2 entries; extra entries ignored",
            table.aid1.len(),
            table.aid2.len()
        );
    }

    table
        .aid1
        .iter()
        .zip(&table.aid2)
        .enumerate()
        .filter_map(|(i, (&aid1, &aid2))| {
            let (Some(atom_a), Some(atom_b)) =
                (aid1.checked_sub(1), aid2.checked_sub(1))
            else {
                log::warn!("dropping bond {i}: atom id 0 ({aid1}-{aid2})");
                return None;
            };
            let raw_order = table
                .order
                .as_ref()
                .and_then(|orders| orders.get(i))
                .copied()
                .unwrap_or(1);
            Some(Bond {
                atom_a: atom_a as usize,
                atom_b: atom_b as usize,
                order: bond_order(raw_order),
            })
        })
        .collect()
}

fn bond_order(raw: u32) -> BondOrder {
    if raw == 0 {
        return BondOrder::Single;
    }
    BondOrder::from_raw(raw).unwrap_or_else(|| {
        log::warn!("unsupported bond order {raw}; drawing as single");
        BondOrder::Single
    })
}

//! Normalized molecule model: atoms, bonds, and the element histogram.
//!
//! A [`Molecule`] is built once per successful parse and never mutated.
//! Its constructor drops bonds whose atom indices fall outside the atom
//! list, so every bond in a `Molecule` references a real atom.

pub mod element;
pub mod parser;
pub mod record;

use std::collections::BTreeMap;

pub use element::Symbol;
use glam::Vec3;
pub use parser::{parse, parse_json};
pub use record::StructureRecord;
use serde::Serialize;

/// One atom: element and position in record coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atom {
    /// Element symbol.
    pub element: Symbol,
    /// Position as given by the conformer.
    pub position: Vec3,
}

/// Bond multiplicity; decides how many cylinders a bond draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum BondOrder {
    /// One shared electron pair.
    #[default]
    Single,
    /// Two shared electron pairs.
    Double,
    /// Three shared electron pairs.
    Triple,
}

impl BondOrder {
    /// Order from its numeric form (1, 2, 3).
    #[must_use]
    pub const fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            1 => Some(Self::Single),
            2 => Some(Self::Double),
            3 => Some(Self::Triple),
            _ => None,
        }
    }

    /// Numeric form (1, 2, 3).
    #[must_use]
    pub const fn value(self) -> u32 {
        match self {
            Self::Single => 1,
            Self::Double => 2,
            Self::Triple => 3,
        }
    }
}

/// A bond between two atoms, by 0-based index into [`Molecule::atoms`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bond {
    /// First atom index.
    pub atom_a: usize,
    /// Second atom index.
    pub atom_b: usize,
    /// Bond multiplicity.
    pub order: BondOrder,
}

/// Per-element atom counts, ordered by symbol.
pub type ElementCounts = BTreeMap<Symbol, usize>;

/// Parsed molecule.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Molecule {
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    element_counts: ElementCounts,
}

/// Counts reported to the UI layer once a molecule has been parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoleculeSummary {
    /// Number of atoms.
    pub atom_count: usize,
    /// Number of bonds kept after dropping dangling references.
    pub bond_count: usize,
    /// Atom tally per element.
    pub element_counts: ElementCounts,
}

impl Molecule {
    /// Assemble a molecule, tallying elements and dropping bonds that
    /// reference missing atoms.
    #[must_use]
    pub fn new(atoms: Vec<Atom>, bonds: Vec<Bond>) -> Self {
        let mut element_counts = ElementCounts::new();
        for atom in &atoms {
            *element_counts.entry(atom.element).or_insert(0) += 1;
        }

        let atom_count = atoms.len();
        let bonds = bonds
            .into_iter()
            .filter(|bond| {
                let in_range =
                    bond.atom_a < atom_count && bond.atom_b < atom_count;
                if !in_range {
                    log::warn!(
                        "dropping bond {}-{}: molecule has {atom_count} atoms",
                        bond.atom_a,
                        bond.atom_b
                    );
                }
                in_range
            })
            .collect();

        Self {
            atoms,
            bonds,
            element_counts,
        }
    }

    /// Atoms in record order.
    #[must_use]
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Bonds in record order.
    #[must_use]
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Atom tally per element.
    #[must_use]
    pub fn element_counts(&self) -> &ElementCounts {
        &self.element_counts
    }

    /// Whether the molecule has no atoms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Atom positions in record order.
    #[must_use]
    pub fn positions(&self) -> Vec<Vec3> {
        self.atoms.iter().map(|a| a.position).collect()
    }

    /// Counts for the UI info panel.
    #[must_use]
    pub fn summary(&self) -> MoleculeSummary {
        MoleculeSummary {
            atom_count: self.atoms.len(),
            bond_count: self.bonds.len(),
            element_counts: self.element_counts.clone(),
        }
    }

    /// Hill-system formula: carbon first, hydrogen second, the rest
    /// alphabetically. Without carbon every element is alphabetical.
    #[must_use]
    pub fn formula(&self) -> String {
        let has_carbon = self.element_counts.contains_key(&Symbol::C);
        let mut symbols: Vec<Symbol> =
            self.element_counts.keys().copied().collect();
        symbols.sort_by_key(|sym| {
            let rank = match sym {
                Symbol::C if has_carbon => 0,
                Symbol::H if has_carbon => 1,
                _ => 2,
            };
            (rank, sym.as_str())
        });

        let mut formula = String::new();
        for sym in symbols {
            let count = self.element_counts[&sym];
            formula.push_str(sym.as_str());
            if count > 1 {
                formula.push_str(&count.to_string());
            }
        }
        formula
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(element: Symbol, x: f32) -> Atom {
        Atom {
            element,
            position: Vec3::new(x, 0.0, 0.0),
        }
    }

    fn single(a: usize, b: usize) -> Bond {
        Bond {
            atom_a: a,
            atom_b: b,
            order: BondOrder::Single,
        }
    }

    #[test]
    fn counts_match_atoms() {
        let mol = Molecule::new(
            vec![
                atom(Symbol::O, 0.0),
                atom(Symbol::H, 1.0),
                atom(Symbol::H, -1.0),
            ],
            vec![single(0, 1), single(0, 2)],
        );
        assert_eq!(mol.element_counts()[&Symbol::H], 2);
        assert_eq!(mol.element_counts()[&Symbol::O], 1);
        assert_eq!(mol.element_counts().len(), 2);
    }

    #[test]
    fn out_of_range_bonds_are_dropped() {
        let mol = Molecule::new(
            vec![atom(Symbol::C, 0.0), atom(Symbol::O, 1.2)],
            vec![single(0, 1), single(1, 2), single(5, 0)],
        );
        assert_eq!(mol.bonds(), &[single(0, 1)]);
    }

    #[test]
    fn summary_reports_counts() {
        let mol = Molecule::new(
            vec![atom(Symbol::Na, 0.0), atom(Symbol::Cl, 2.4)],
            Vec::new(),
        );
        let summary = mol.summary();
        assert_eq!(summary.atom_count, 2);
        assert_eq!(summary.bond_count, 0);
        assert_eq!(summary.element_counts, *mol.element_counts());
    }

    #[test]
    fn hill_formula_ordering() {
        let ethanol = Molecule::new(
            vec![
                atom(Symbol::O, 0.0),
                atom(Symbol::C, 0.0),
                atom(Symbol::C, 0.0),
                atom(Symbol::H, 0.0),
                atom(Symbol::H, 0.0),
                atom(Symbol::H, 0.0),
                atom(Symbol::H, 0.0),
                atom(Symbol::H, 0.0),
                atom(Symbol::H, 0.0),
            ],
            Vec::new(),
        );
        assert_eq!(ethanol.formula(), "C2H6O");

        let salt = Molecule::new(
            vec![atom(Symbol::Na, 0.0), atom(Symbol::Cl, 0.0)],
            Vec::new(),
        );
        assert_eq!(salt.formula(), "ClNa");

        let water = Molecule::new(
            vec![
                atom(Symbol::H, 0.0),
                atom(Symbol::O, 0.0),
                atom(Symbol::H, 0.0),
            ],
            Vec::new(),
        );
        assert_eq!(water.formula(), "H2O");
    }

    #[test]
    fn bond_order_round_trip() {
        for raw in 1..=3 {
            assert_eq!(BondOrder::from_raw(raw).unwrap().value(), raw);
        }
        assert_eq!(BondOrder::from_raw(0), None);
        assert_eq!(BondOrder::from_raw(4), None);
    }
}

//! Raw compound records as delivered by the structure database.
//!
//! Every field is optional on the wire; the parser decides which gaps are
//! fatal and which degrade gracefully.

use serde::{Deserialize, Serialize};

use crate::error::MolsceneError;

/// One compound record: element list, coordinate sets, optional bond table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureRecord {
    /// Per-atom data (parallel arrays).
    pub atoms: Option<AtomTable>,
    /// Coordinate sets; only the first set's first conformer is used.
    pub coords: Vec<CoordinateSet>,
    /// Bond connectivity, absent for lone atoms and ions.
    pub bonds: Option<BondTable>,
}

/// Atom table with atomic numbers in atom-id order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtomTable {
    /// 1-based atom ids (informational).
    pub aid: Vec<u32>,
    /// Atomic numbers.
    pub element: Vec<u32>,
}

/// A group of conformers sharing atom ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinateSet {
    /// Coordinate layouts.
    pub conformers: Vec<Conformer>,
}

/// One coordinate layout as parallel arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conformer {
    /// X coordinates.
    pub x: Vec<f32>,
    /// Y coordinates.
    pub y: Vec<f32>,
    /// Z coordinates; absent for 2D layouts.
    pub z: Option<Vec<f32>>,
}

/// Bond table as parallel arrays of 1-based atom ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BondTable {
    /// First atom id of each bond.
    pub aid1: Vec<u32>,
    /// Second atom id of each bond.
    pub aid2: Vec<u32>,
    /// Bond orders; absent means every bond is single.
    pub order: Option<Vec<u32>>,
}

/// Response envelope wrapping one or more compounds.
#[derive(Debug, Deserialize)]
struct CompoundEnvelope {
    #[serde(rename = "PC_Compounds")]
    compounds: Vec<StructureRecord>,
}

const ENVELOPE_KEY: &str = "PC_Compounds";

impl StructureRecord {
    /// Decode a record from JSON.
    ///
    /// Accepts either a bare compound object or the database's response
    /// envelope (`{"PC_Compounds": [...]}`), in which case the first
    /// compound is used.
    pub fn from_json(json: &str) -> Result<Self, MolsceneError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Decode a record from an already-parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, MolsceneError> {
        if value.get(ENVELOPE_KEY).is_some() {
            let envelope: CompoundEnvelope = serde_json::from_value(value)?;
            return envelope.compounds.into_iter().next().ok_or_else(|| {
                MolsceneError::malformed("response envelope has no compounds")
            });
        }
        Ok(serde_json::from_value(value)?)
    }

    /// The conformer the parser reads from.
    #[must_use]
    pub fn first_conformer(&self) -> Option<&Conformer> {
        self.coords.first().and_then(|set| set.conformers.first())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn bare_record_decodes() {
        let record = StructureRecord::from_value(json!({
            "atoms": { "aid": [1, 2], "element": [8, 1] },
            "coords": [{ "conformers": [{ "x": [0.0, 1.0], "y": [0.0, 0.0] }] }]
        }))
        .unwrap();
        assert_eq!(record.atoms.as_ref().unwrap().element, vec![8, 1]);
        let conformer = record.first_conformer().unwrap();
        assert_eq!(conformer.x, vec![0.0, 1.0]);
        assert!(conformer.z.is_none());
        assert!(record.bonds.is_none());
    }

    #[test]
    fn envelope_uses_first_compound() {
        let json = r#"{
            "PC_Compounds": [
                { "atoms": { "element": [6] },
                  "coords": [{ "conformers": [{
                      "x": [0], "y": [0], "z": [0]
                  }] }] },
                { "atoms": { "element": [7] } }
            ]
        }"#;
        let record = StructureRecord::from_json(json).unwrap();
        assert_eq!(record.atoms.unwrap().element, vec![6]);
    }

    #[test]
    fn empty_envelope_is_malformed() {
        let err = StructureRecord::from_json(r#"{"PC_Compounds": []}"#)
            .unwrap_err();
        assert!(matches!(err, MolsceneError::MalformedStructure(_)));
    }

    #[test]
    fn invalid_json_is_reported() {
        let err = StructureRecord::from_json("{not json").unwrap_err();
        assert!(matches!(err, MolsceneError::Json(_)));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let record = StructureRecord::from_value(json!({
            "id": { "id": { "cid": 241 } },
            "charge": 0,
            "bonds": { "aid1": [1], "aid2": [2] }
        }))
        .unwrap();
        let bonds = record.bonds.unwrap();
        assert_eq!(bonds.aid1, vec![1]);
        assert!(bonds.order.is_none());
    }
}

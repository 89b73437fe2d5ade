//! Closed element enumeration with CPK colors and van der Waals radii.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::util::color::Color;

/// Radius used for elements outside the radius table.
pub const DEFAULT_VDW_RADIUS: f32 = 0.8;

/// Color used for elements outside the CPK palette (pink).
pub const DEFAULT_CPK_COLOR: Color = Color::from_hex(0xFF_69_B4);

/// Element symbols the scene knows how to draw.
///
/// Anything else collapses to [`Symbol::Unknown`], which renders with
/// [`DEFAULT_VDW_RADIUS`] and [`DEFAULT_CPK_COLOR`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
pub enum Symbol {
    /// Hydrogen
    H,
    /// Carbon
    C,
    /// Nitrogen
    N,
    /// Oxygen
    O,
    /// Fluorine
    F,
    /// Chlorine
    Cl,
    /// Bromine
    Br,
    /// Iodine
    I,
    /// Sulfur
    S,
    /// Phosphorus
    P,
    /// Boron
    B,
    /// Silicon
    Si,
    /// Iron
    Fe,
    /// Sodium
    Na,
    /// Potassium
    K,
    /// Calcium
    Ca,
    /// Magnesium
    Mg,
    /// Zinc
    Zn,
    /// Copper
    Cu,
    /// Any element outside the table.
    Unknown,
}

impl Symbol {
    /// Map an atomic number to its symbol; numbers outside the table give
    /// [`Symbol::Unknown`].
    #[must_use]
    pub const fn from_atomic_number(number: u32) -> Self {
        match number {
            1 => Self::H,
            5 => Self::B,
            6 => Self::C,
            7 => Self::N,
            8 => Self::O,
            9 => Self::F,
            11 => Self::Na,
            12 => Self::Mg,
            14 => Self::Si,
            15 => Self::P,
            16 => Self::S,
            17 => Self::Cl,
            19 => Self::K,
            20 => Self::Ca,
            26 => Self::Fe,
            29 => Self::Cu,
            30 => Self::Zn,
            35 => Self::Br,
            53 => Self::I,
            _ => Self::Unknown,
        }
    }

    /// Periodic-table symbol; `"X"` for [`Symbol::Unknown`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::H => "H",
            Self::C => "C",
            Self::N => "N",
            Self::O => "O",
            Self::F => "F",
            Self::Cl => "Cl",
            Self::Br => "Br",
            Self::I => "I",
            Self::S => "S",
            Self::P => "P",
            Self::B => "B",
            Self::Si => "Si",
            Self::Fe => "Fe",
            Self::Na => "Na",
            Self::K => "K",
            Self::Ca => "Ca",
            Self::Mg => "Mg",
            Self::Zn => "Zn",
            Self::Cu => "Cu",
            Self::Unknown => "X",
        }
    }

    /// Standard CPK color.
    #[must_use]
    pub const fn cpk_color(self) -> Color {
        let hex = match self {
            Self::H => 0xFF_FF_FF,
            Self::C => 0x90_90_90,
            Self::N => 0x30_50_F8,
            Self::O => 0xFF_0D_0D,
            Self::F => 0x90_E0_50,
            Self::Cl => 0x1F_F0_1F,
            Self::Br => 0xA6_29_29,
            Self::I => 0x94_00_94,
            Self::S => 0xFF_FF_30,
            Self::P => 0xFF_80_00,
            Self::B => 0xFF_B5_B5,
            Self::Si => 0xF0_C8_A0,
            Self::Fe => 0xE0_66_33,
            Self::Na => 0xAB_5C_F2,
            Self::K => 0x8F_40_D4,
            Self::Ca => 0x3D_FF_00,
            Self::Mg => 0x8A_FF_00,
            Self::Zn => 0x7D_80_B0,
            Self::Cu => 0xC8_80_33,
            Self::Unknown => return DEFAULT_CPK_COLOR,
        };
        Color::from_hex(hex)
    }

    /// Van der Waals radius in scene units, before the sphere scale factor.
    #[must_use]
    pub const fn vdw_radius(self) -> f32 {
        match self {
            Self::H => 0.31,
            Self::C => 0.76,
            Self::N => 0.71,
            Self::O => 0.66,
            Self::F => 0.57,
            Self::Cl => 0.99,
            Self::Br => 1.14,
            Self::I => 1.33,
            Self::S => 1.05,
            Self::P => 1.07,
            _ => DEFAULT_VDW_RADIUS,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_number_table() {
        assert_eq!(Symbol::from_atomic_number(1), Symbol::H);
        assert_eq!(Symbol::from_atomic_number(6), Symbol::C);
        assert_eq!(Symbol::from_atomic_number(17), Symbol::Cl);
        assert_eq!(Symbol::from_atomic_number(53), Symbol::I);
        assert_eq!(Symbol::from_atomic_number(29), Symbol::Cu);
    }

    #[test]
    fn numbers_outside_table_are_unknown() {
        for n in [0, 2, 3, 10, 92, 255, u32::MAX] {
            assert_eq!(Symbol::from_atomic_number(n), Symbol::Unknown);
        }
    }

    #[test]
    fn unknown_uses_defaults() {
        assert_eq!(Symbol::Unknown.cpk_color(), DEFAULT_CPK_COLOR);
        assert_eq!(Symbol::Unknown.vdw_radius(), DEFAULT_VDW_RADIUS);
        assert_eq!(Symbol::Unknown.to_string(), "X");
    }

    #[test]
    fn palette_and_radii_spot_checks() {
        assert_eq!(Symbol::O.cpk_color().hex(), 0xFF0D0D);
        assert_eq!(Symbol::Zn.cpk_color().hex(), 0x7D80B0);
        assert_eq!(Symbol::C.vdw_radius(), 0.76);
        // Colored but outside the radius table.
        assert_eq!(Symbol::Fe.vdw_radius(), DEFAULT_VDW_RADIUS);
        assert_ne!(Symbol::Fe.cpk_color(), DEFAULT_CPK_COLOR);
    }
}

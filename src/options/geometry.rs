use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::scene::PrimitiveStyle;
use crate::util::color::Color;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Geometry", inline)]
#[serde(default)]
/// Ball-and-stick sizing, offsets, and materials.
pub struct GeometryOptions {
    /// Multiplier applied to element radii for atom spheres.
    #[schemars(title = "Atom Scale", range(min = 0.1, max = 1.5), extend("step" = 0.05))]
    pub atom_radius_scale: f32,
    /// Radius of a single-bond cylinder.
    #[schemars(title = "Bond Radius", range(min = 0.02, max = 0.3), extend("step" = 0.01))]
    pub bond_radius: f32,
    /// Distance of the outer cylinders of double/triple bonds from the
    /// bond axis.
    #[schemars(title = "Bond Offset", range(min = 0.05, max = 0.5), extend("step" = 0.01))]
    pub bond_offset: f32,
    /// Radius multiplier for each cylinder of a double bond.
    #[schemars(skip)]
    pub double_bond_radius_factor: f32,
    /// Radius multiplier for each cylinder of a triple bond.
    #[schemars(skip)]
    pub triple_bond_radius_factor: f32,
    /// Bond cylinder color.
    #[schemars(skip)]
    pub bond_color: Color,
    /// Atom sphere material and tessellation.
    #[schemars(skip)]
    pub atom_style: PrimitiveStyle,
    /// Bond cylinder material and tessellation.
    #[schemars(skip)]
    pub bond_style: PrimitiveStyle,
}

impl Default for GeometryOptions {
    fn default() -> Self {
        Self {
            atom_radius_scale: 0.5,
            bond_radius: 0.08,
            bond_offset: 0.2,
            double_bond_radius_factor: 0.8,
            triple_bond_radius_factor: 0.7,
            bond_color: Color::from_hex(0x88_88_88),
            atom_style: PrimitiveStyle {
                metalness: 0.2,
                roughness: 0.3,
                emissive_intensity: 0.1,
                opacity: 1.0,
                transparent: false,
                segments: 32,
            },
            bond_style: PrimitiveStyle {
                metalness: 0.3,
                roughness: 0.5,
                emissive_intensity: 0.0,
                opacity: 1.0,
                transparent: false,
                segments: 8,
            },
        }
    }
}

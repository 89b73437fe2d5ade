//! GPU-ready per-instance records for sphere and cylinder primitives.
//!
//! Layouts are plain `[f32; 4]` rows so a host renderer can upload them
//! with `bytemuck::cast_slice` into an instanced impostor pass.

/// Per-instance data for a sphere.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SphereInstance {
    /// xyz = world position, w = world radius
    pub center: [f32; 4],
    /// xyz = RGB color, w = opacity
    pub color: [f32; 4],
}

/// Per-instance data for a cylinder.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CylinderInstance {
    /// xyz = world position of the first cap, w = world radius
    pub endpoint_a: [f32; 4],
    /// xyz = world position of the second cap, w = unused
    pub endpoint_b: [f32; 4],
    /// xyz = RGB color, w = opacity
    pub color: [f32; 4],
}

/// Instances collected from every visible, attached mesh node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneInstances {
    /// Sphere instances.
    pub spheres: Vec<SphereInstance>,
    /// Cylinder instances.
    pub cylinders: Vec<CylinderInstance>,
}

impl SceneInstances {
    /// Raw bytes of the sphere instances.
    #[must_use]
    pub fn sphere_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.spheres)
    }

    /// Raw bytes of the cylinder instances.
    #[must_use]
    pub fn cylinder_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.cylinders)
    }
}

#[cfg(test)]
mod tests {
    use bytemuck::Zeroable;

    use super::*;

    #[test]
    fn byte_views_match_layout() {
        let instances = SceneInstances {
            spheres: vec![SphereInstance::zeroed(); 3],
            cylinders: vec![CylinderInstance::zeroed(); 2],
        };
        assert_eq!(instances.sphere_bytes().len(), 3 * 32);
        assert_eq!(instances.cylinder_bytes().len(), 2 * 48);
    }
}

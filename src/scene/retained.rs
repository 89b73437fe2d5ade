//! In-memory [`SceneGraph`] for headless hosts and tests.
//!
//! Keeps every node's kind, transform, and material state, tracks which
//! nodes are attached to the root, and counts contract violations:
//! operations on removed handles, double disposal, and detaching meshes
//! whose geometry or material was never released.

use glam::{Mat4, Vec3};
use rustc_hash::FxHashMap;

use super::instance::{CylinderInstance, SceneInstances, SphereInstance};
use super::{NodeId, PrimitiveStyle, SceneGraph, Transform};
use crate::util::color::Color;

/// What a retained node draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind {
    /// Grouping node with no geometry of its own.
    Group,
    /// Sphere mesh.
    Sphere {
        /// Sphere radius.
        radius: f32,
    },
    /// Cylinder mesh along local +Y.
    Cylinder {
        /// Cylinder radius.
        radius: f32,
        /// Cylinder length.
        height: f32,
    },
}

/// One node in a [`RetainedScene`].
#[derive(Debug, Clone, PartialEq)]
pub struct RetainedNode {
    /// Primitive kind.
    pub kind: NodeKind,
    /// Base color (unused for groups).
    pub color: Color,
    /// Material and tessellation parameters.
    pub style: PrimitiveStyle,
    /// Local transform.
    pub transform: Transform,
    /// Current material opacity.
    pub opacity: f32,
    /// Visibility flag; hidden nodes hide their subtree.
    pub visible: bool,
    /// Whether the geometry is still allocated.
    pub geometry_live: bool,
    /// Whether the material is still allocated.
    pub material_live: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl RetainedNode {
    fn new(kind: NodeKind, color: Color, style: &PrimitiveStyle) -> Self {
        let is_mesh = kind != NodeKind::Group;
        Self {
            kind,
            color,
            style: *style,
            transform: Transform::IDENTITY,
            opacity: style.opacity,
            visible: true,
            geometry_live: is_mesh,
            material_live: is_mesh,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Parent node, if attached under a group.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes in insertion order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Retained scene graph with misuse accounting.
#[derive(Debug, Default)]
pub struct RetainedScene {
    nodes: FxHashMap<NodeId, RetainedNode>,
    roots: Vec<NodeId>,
    next_id: u64,
    misuse: usize,
    leaked: usize,
}

impl RetainedScene {
    /// Empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a live node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&RetainedNode> {
        self.nodes.get(&id)
    }

    /// Number of live (not yet removed) nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes attached directly to the root, in attachment order.
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Whether `id` is reachable from the root.
    #[must_use]
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if self.roots.contains(&current) {
                return true;
            }
            match self.nodes.get(&current).and_then(|n| n.parent) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Meshes whose geometry has not been released.
    #[must_use]
    pub fn live_geometry_count(&self) -> usize {
        self.nodes.values().filter(|n| n.geometry_live).count()
    }

    /// Meshes whose material has not been released.
    #[must_use]
    pub fn live_material_count(&self) -> usize {
        self.nodes.values().filter(|n| n.material_live).count()
    }

    /// Operations that hit a removed handle or released a resource twice.
    #[must_use]
    pub fn misuse_count(&self) -> usize {
        self.misuse
    }

    /// Meshes removed while their geometry or material was still live.
    #[must_use]
    pub fn leaked_count(&self) -> usize {
        self.leaked
    }

    /// World-space instances of every visible, attached mesh.
    #[must_use]
    pub fn instances(&self) -> SceneInstances {
        let mut out = SceneInstances::default();
        for &root in &self.roots {
            self.collect_instances(root, Mat4::IDENTITY, &mut out);
        }
        out
    }

    fn collect_instances(
        &self,
        id: NodeId,
        parent_world: Mat4,
        out: &mut SceneInstances,
    ) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        if !node.visible {
            return;
        }
        let world = parent_world * node.transform.to_matrix();
        let (scale, _, _) = world.to_scale_rotation_translation();
        let [r, g, b] = node.color.to_rgb();
        let color = [r, g, b, node.opacity];

        match node.kind {
            NodeKind::Group => {}
            NodeKind::Sphere { radius } => {
                let c = world.transform_point3(Vec3::ZERO);
                out.spheres.push(SphereInstance {
                    center: [c.x, c.y, c.z, radius * scale.max_element()],
                    color,
                });
            }
            NodeKind::Cylinder { radius, height } => {
                let half = Vec3::new(0.0, height * 0.5, 0.0);
                let a = world.transform_point3(-half);
                let b = world.transform_point3(half);
                out.cylinders.push(CylinderInstance {
                    endpoint_a: [a.x, a.y, a.z, radius * scale.max_element()],
                    endpoint_b: [b.x, b.y, b.z, 0.0],
                    color,
                });
            }
        }

        for &child in &node.children {
            self.collect_instances(child, world, out);
        }
    }

    fn insert(&mut self, node: RetainedNode) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let _ = self.nodes.insert(id, node);
        id
    }

    fn flag(&mut self, op: &str, id: NodeId) {
        self.misuse += 1;
        log::warn!("scene graph misuse: {op} on {id:?}");
    }

    /// Mutable access, counting a misuse when the handle is dead.
    fn live_mut(&mut self, op: &str, id: NodeId) -> Option<&mut RetainedNode> {
        if !self.nodes.contains_key(&id) {
            self.flag(op, id);
            return None;
        }
        self.nodes.get_mut(&id)
    }

    /// Unlink a node from the root list and from its parent.
    fn detach(&mut self, id: NodeId) {
        self.roots.retain(|r| *r != id);
        let parent = self.nodes.get_mut(&id).and_then(|n| n.parent.take());
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|c| *c != id);
        }
    }

    /// Whether `ancestor` lies on the parent chain above `id`.
    fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = self.nodes.get(&id).and_then(|n| n.parent);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.nodes.get(&node).and_then(|n| n.parent);
        }
        false
    }

    fn collect_subtree(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        if let Some(node) = self.nodes.get(&id) {
            for &child in &node.children {
                self.collect_subtree(child, out);
            }
        }
    }
}

impl SceneGraph for RetainedScene {
    fn create_group(&mut self) -> NodeId {
        self.insert(RetainedNode::new(
            NodeKind::Group,
            Color::WHITE,
            &PrimitiveStyle::default(),
        ))
    }

    fn create_sphere(
        &mut self,
        radius: f32,
        color: Color,
        style: &PrimitiveStyle,
    ) -> NodeId {
        let kind = NodeKind::Sphere { radius };
        self.insert(RetainedNode::new(kind, color, style))
    }

    fn create_cylinder(
        &mut self,
        radius: f32,
        height: f32,
        color: Color,
        style: &PrimitiveStyle,
    ) -> NodeId {
        self.insert(RetainedNode::new(
            NodeKind::Cylinder { radius, height },
            color,
            style,
        ))
    }

    fn add_node(&mut self, node: NodeId) {
        if self.live_mut("add_node", node).is_none() {
            return;
        }
        self.detach(node);
        self.roots.push(node);
    }

    fn add_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || !self.nodes.contains_key(&parent) {
            self.flag("add_child (parent)", parent);
            return;
        }
        if self.live_mut("add_child", child).is_none() {
            return;
        }
        if self.is_ancestor(child, parent) {
            self.flag("add_child (cycle)", child);
            return;
        }
        self.detach(child);
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
    }

    fn remove_node(&mut self, node: NodeId) {
        if self.live_mut("remove_node", node).is_none() {
            return;
        }
        self.detach(node);

        let mut subtree = Vec::new();
        self.collect_subtree(node, &mut subtree);
        for id in subtree {
            if let Some(removed) = self.nodes.remove(&id) {
                if removed.geometry_live || removed.material_live {
                    self.leaked += 1;
                    log::warn!("removed {id:?} with live GPU resources");
                }
            }
        }
    }

    fn dispose_geometry(&mut self, node: NodeId) {
        let released = self
            .live_mut("dispose_geometry", node)
            .map(|n| std::mem::replace(&mut n.geometry_live, false));
        if released == Some(false) {
            self.flag("dispose_geometry (not live)", node);
        }
    }

    fn dispose_material(&mut self, node: NodeId) {
        let released = self
            .live_mut("dispose_material", node)
            .map(|n| std::mem::replace(&mut n.material_live, false));
        if released == Some(false) {
            self.flag("dispose_material (not live)", node);
        }
    }

    fn set_transform(&mut self, node: NodeId, transform: &Transform) {
        if let Some(n) = self.live_mut("set_transform", node) {
            n.transform = *transform;
        }
    }

    fn set_opacity(&mut self, node: NodeId, opacity: f32) {
        if let Some(n) = self.live_mut("set_opacity", node) {
            n.opacity = opacity;
        }
    }

    fn set_visible(&mut self, node: NodeId, visible: bool) {
        if let Some(n) = self.live_mut("set_visible", node) {
            n.visible = visible;
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Quat;

    use super::*;

    fn style() -> PrimitiveStyle {
        PrimitiveStyle::default()
    }

    #[test]
    fn new_nodes_are_detached() {
        let mut scene = RetainedScene::new();
        let s = scene.create_sphere(1.0, Color::WHITE, &style());
        assert!(!scene.is_attached(s));
        assert!(scene.roots().is_empty());
        assert_eq!(scene.live_geometry_count(), 1);
    }

    #[test]
    fn children_are_attached_through_their_root() {
        let mut scene = RetainedScene::new();
        let group = scene.create_group();
        let s = scene.create_sphere(1.0, Color::WHITE, &style());
        scene.add_child(group, s);
        assert!(!scene.is_attached(s));
        scene.add_node(group);
        assert!(scene.is_attached(s));
        assert_eq!(scene.node(s).unwrap().parent(), Some(group));
        assert_eq!(scene.node(group).unwrap().children(), &[s]);
    }

    #[test]
    fn dispose_then_remove_is_clean() {
        let mut scene = RetainedScene::new();
        let group = scene.create_group();
        let s = scene.create_sphere(1.0, Color::WHITE, &style());
        let c = scene.create_cylinder(0.1, 1.0, Color::WHITE, &style());
        scene.add_child(group, s);
        scene.add_child(group, c);
        scene.add_node(group);

        for node in [s, c] {
            scene.dispose_geometry(node);
            scene.dispose_material(node);
        }
        scene.remove_node(group);

        assert!(scene.is_empty());
        assert!(scene.roots().is_empty());
        assert_eq!(scene.misuse_count(), 0);
        assert_eq!(scene.leaked_count(), 0);
    }

    #[test]
    fn removing_live_meshes_counts_leaks() {
        let mut scene = RetainedScene::new();
        let group = scene.create_group();
        let s = scene.create_sphere(1.0, Color::WHITE, &style());
        scene.add_child(group, s);
        scene.add_node(group);
        scene.remove_node(group);
        assert_eq!(scene.leaked_count(), 1);
    }

    #[test]
    fn use_after_remove_and_double_dispose_are_flagged() {
        let mut scene = RetainedScene::new();
        let s = scene.create_sphere(1.0, Color::WHITE, &style());
        scene.dispose_geometry(s);
        scene.dispose_geometry(s);
        assert_eq!(scene.misuse_count(), 1);

        scene.dispose_material(s);
        scene.remove_node(s);
        scene.set_opacity(s, 0.5);
        scene.remove_node(s);
        assert_eq!(scene.misuse_count(), 3);
        assert_eq!(scene.leaked_count(), 0);
    }

    #[test]
    fn instances_use_world_transforms() {
        let mut scene = RetainedScene::new();
        let group = scene.create_group();
        let s = scene.create_sphere(0.5, Color::from_hex(0xFF0000), &style());
        let c = scene.create_cylinder(0.1, 2.0, Color::WHITE, &style());
        scene.set_transform(s, &Transform::from_translation(Vec3::X));
        scene.set_transform(
            c,
            &Transform::from_translation_rotation(
                Vec3::ZERO,
                Quat::from_rotation_arc(Vec3::Y, Vec3::Z),
            ),
        );
        scene.add_child(group, s);
        scene.add_child(group, c);
        let scaled = Transform::from_rotation_scale(Quat::IDENTITY, 2.0);
        scene.set_transform(group, &scaled);
        scene.add_node(group);

        let inst = scene.instances();
        assert_eq!(inst.spheres.len(), 1);
        let sphere = inst.spheres[0];
        assert!((sphere.center[0] - 2.0).abs() < 1e-5);
        assert!((sphere.center[3] - 1.0).abs() < 1e-5);
        assert_eq!(sphere.color, [1.0, 0.0, 0.0, 1.0]);

        let cyl = inst.cylinders[0];
        assert!((cyl.endpoint_a[2] + 2.0).abs() < 1e-5);
        assert!((cyl.endpoint_b[2] - 2.0).abs() < 1e-5);
        assert!((cyl.endpoint_a[3] - 0.2).abs() < 1e-5);
    }

    #[test]
    fn hidden_and_detached_nodes_produce_no_instances() {
        let mut scene = RetainedScene::new();
        let shown = scene.create_sphere(1.0, Color::WHITE, &style());
        let hidden = scene.create_sphere(1.0, Color::WHITE, &style());
        let _detached = scene.create_sphere(1.0, Color::WHITE, &style());
        scene.add_node(shown);
        scene.add_node(hidden);
        scene.set_visible(hidden, false);
        assert_eq!(scene.instances().spheres.len(), 1);
    }

    #[test]
    fn reattaching_moves_node_between_parents() {
        let mut scene = RetainedScene::new();
        let a = scene.create_group();
        let b = scene.create_group();
        let s = scene.create_sphere(1.0, Color::WHITE, &style());
        scene.add_child(a, s);
        scene.add_child(b, s);
        assert!(scene.node(a).unwrap().children().is_empty());
        assert_eq!(scene.node(s).unwrap().parent(), Some(b));
        scene.add_node(s);
        assert!(scene.node(b).unwrap().children().is_empty());
        assert_eq!(scene.roots(), &[s]);
    }

    #[test]
    fn cyclic_add_child_is_rejected() {
        let mut scene = RetainedScene::new();
        let a = scene.create_group();
        let b = scene.create_group();
        let s = scene.create_sphere(1.0, Color::WHITE, &style());
        scene.add_child(a, b);
        scene.add_child(b, s);

        scene.add_child(b, a);
        assert_eq!(scene.misuse_count(), 1);
        scene.add_child(s, a);
        assert_eq!(scene.misuse_count(), 2);
        assert_eq!(scene.node(a).unwrap().parent(), None);
        assert_eq!(scene.node(b).unwrap().parent(), Some(a));
        assert!(!scene.is_attached(a));

        scene.add_node(a);
        assert!(scene.is_attached(s));
        assert_eq!(scene.instances().spheres.len(), 1);

        scene.dispose_geometry(s);
        scene.dispose_material(s);
        scene.remove_node(a);
        assert!(scene.is_empty());
        assert_eq!(scene.leaked_count(), 0);
        assert_eq!(scene.misuse_count(), 2);
    }

    #[test]
    fn ids_stay_unique_past_u32_range() {
        let mut scene = RetainedScene::new();
        scene.next_id = u64::from(u32::MAX);
        let first = scene.create_group();
        let second = scene.create_group();
        assert_eq!(first, NodeId(u64::from(u32::MAX)));
        assert_eq!(second, NodeId(u64::from(u32::MAX) + 1));
        assert_eq!(scene.len(), 2);
    }
}

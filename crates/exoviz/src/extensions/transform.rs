// extensions/transform.rs
//
// Transform hierarchy: tracks parent-child relationships by EntityId.
// Each planetary system is a group node with its star (carrying its
// light), planet and orbit ring as children. Animating a child's local
// transform and calling `propagate` moves it in world space.

use std::collections::HashMap;
use glam::{EulerRot, Quat, Vec3};
use crate::api::types::EntityId;
use crate::core::scene::Scene;

/// Local transform data for entities in a hierarchy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    /// Position relative to parent (or world if no parent).
    pub offset: Vec3,
    /// Euler rotation (XYZ) relative to parent.
    pub rotation: Vec3,
    /// Scale multiplier relative to parent.
    pub scale: Vec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            offset: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

fn euler_quat(rotation: Vec3) -> Quat {
    Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z)
}

impl LocalTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }
}

/// Node in the transform hierarchy.
#[derive(Debug, Clone, Default)]
struct TransformNode {
    parent: Option<EntityId>,
    children: Vec<EntityId>,
    local: LocalTransform,
}

/// Transform hierarchy graph. Manages parent-child relationships.
///
/// Exists separately from Scene; the owner keeps both in step.
#[derive(Debug, Default)]
pub struct TransformGraph {
    nodes: HashMap<EntityId, TransformNode>,
    /// Entities with no parent (top-level).
    roots: Vec<EntityId>,
    /// Set when hierarchy or local transforms change, cleared after propagate.
    dirty: bool,
}

impl TransformGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity with a specific local transform.
    pub fn register_with(&mut self, id: EntityId, local: LocalTransform) {
        let node = self.nodes.entry(id).or_default();
        node.local = local;
        if node.parent.is_none() && !self.roots.contains(&id) {
            self.roots.push(id);
        }
        self.dirty = true;
    }

    /// Register `child` under `parent` in one go.
    pub fn attach(&mut self, child: EntityId, parent: EntityId, local: LocalTransform) {
        self.register_with(child, local);
        self.set_parent(child, Some(parent));
    }

    /// Set the parent of an entity. Pass `None` to make it a root.
    pub fn set_parent(&mut self, child: EntityId, parent: Option<EntityId>) {
        self.nodes.entry(child).or_default();
        if let Some(p) = parent {
            self.nodes.entry(p).or_default();
        }

        // Detach from old parent
        if let Some(old_parent) = self.nodes.get(&child).and_then(|n| n.parent) {
            if let Some(old_node) = self.nodes.get_mut(&old_parent) {
                old_node.children.retain(|&c| c != child);
            }
        }

        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = parent;
        }

        match parent {
            Some(p) => {
                if let Some(parent_node) = self.nodes.get_mut(&p) {
                    if !parent_node.children.contains(&child) {
                        parent_node.children.push(child);
                    }
                }
                self.roots.retain(|&r| r != child);
            }
            None => {
                if !self.roots.contains(&child) {
                    self.roots.push(child);
                }
            }
        }

        self.dirty = true;
    }

    /// Get the local transform for an entity.
    pub fn get_local(&self, id: EntityId) -> Option<&LocalTransform> {
        self.nodes.get(&id).map(|n| &n.local)
    }

    /// Get the local transform mutably. Marks the graph dirty.
    pub fn get_local_mut(&mut self, id: EntityId) -> Option<&mut LocalTransform> {
        self.dirty = true;
        self.nodes.get_mut(&id).map(|n| &mut n.local)
    }

    pub fn get_parent(&self, id: EntityId) -> Option<EntityId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    pub fn get_children(&self, id: EntityId) -> Option<&[EntityId]> {
        self.nodes.get(&id).map(|n| n.children.as_slice())
    }

    /// Remove an entity and all of its descendants.
    /// Returns every removed id, root first.
    pub fn remove_subtree(&mut self, id: EntityId) -> Vec<EntityId> {
        if let Some(parent) = self.get_parent(id) {
            if let Some(parent_node) = self.nodes.get_mut(&parent) {
                parent_node.children.retain(|&c| c != id);
            }
        }

        let mut removed = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                stack.extend(node.children);
                removed.push(next);
            }
        }

        self.roots.retain(|r| !removed.contains(r));
        self.dirty = true;
        removed
    }

    /// Propagate transforms from roots down through the hierarchy.
    /// Updates Entity.pos/rotation/scale based on parent transforms.
    pub fn propagate(&mut self, scene: &mut Scene) {
        if !self.dirty {
            return;
        }

        for &root in &self.roots {
            self.propagate_recursive(root, Vec3::ZERO, Vec3::ZERO, Vec3::ONE, scene);
        }

        self.dirty = false;
    }

    fn propagate_recursive(
        &self,
        id: EntityId,
        parent_pos: Vec3,
        parent_rot: Vec3,
        parent_scale: Vec3,
        scene: &mut Scene,
    ) {
        let Some(node) = self.nodes.get(&id) else { return };
        let local = &node.local;

        // Scale, rotate, then translate the offset into the parent's frame
        let world_pos = parent_pos + euler_quat(parent_rot) * (local.offset * parent_scale);
        // Euler angles add per axis. Exact for spins about a single axis,
        // and keeps unbounded spin angles readable by the renderer.
        let world_rot = parent_rot + local.rotation;
        let world_scale = parent_scale * local.scale;

        if let Some(entity) = scene.get_mut(id) {
            entity.pos = world_pos;
            entity.rotation = world_rot;
            entity.scale = world_scale;
        }

        for &child in &node.children {
            self.propagate_recursive(child, world_pos, world_rot, world_scale, scene);
        }
    }

    /// Check if the hierarchy has pending changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of entities in the hierarchy.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the hierarchy is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Clear all hierarchy data.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.roots.clear();
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;

    #[test]
    fn parent_child_relationship() {
        let mut graph = TransformGraph::new();
        let parent = EntityId(1);
        let child = EntityId(2);

        graph.register_with(parent, LocalTransform::new());
        graph.attach(child, parent, LocalTransform::new());

        assert_eq!(graph.get_parent(child), Some(parent));
        assert_eq!(graph.get_children(parent), Some([child].as_slice()));
        assert!(!graph.roots.contains(&child));
    }

    #[test]
    fn propagate_updates_positions() {
        let mut graph = TransformGraph::new();
        let mut scene = Scene::new();

        let parent = EntityId(1);
        let child = EntityId(2);

        scene.spawn(Entity::new(parent));
        scene.spawn(Entity::new(child));

        graph.register_with(parent, LocalTransform::new().with_offset(Vec3::new(10.0, 0.0, 0.0)));
        graph.attach(child, parent, LocalTransform::new().with_offset(Vec3::new(0.0, 0.0, 5.0)));

        graph.propagate(&mut scene);

        let child_entity = scene.get(child).unwrap();
        assert_eq!(child_entity.pos, Vec3::new(10.0, 0.0, 5.0));
        assert!(!graph.is_dirty());
    }

    #[test]
    fn parent_rotation_carries_children() {
        let mut graph = TransformGraph::new();
        let mut scene = Scene::new();
        let parent = EntityId(1);
        let child = EntityId(2);
        scene.spawn(Entity::new(parent));
        scene.spawn(Entity::new(child));

        let quarter_turn = Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0);
        graph.register_with(parent, LocalTransform::new().with_rotation(quarter_turn));
        graph.attach(child, parent, LocalTransform::new().with_offset(Vec3::X));
        graph.propagate(&mut scene);

        let pos = scene.get(child).unwrap().pos;
        assert!((pos - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5, "got {pos}");
    }

    #[test]
    fn spin_angle_survives_propagation() {
        let mut graph = TransformGraph::new();
        let mut scene = Scene::new();
        let root = EntityId(1);
        let star = EntityId(2);
        scene.spawn(Entity::new(root));
        scene.spawn(Entity::new(star));
        graph.register_with(root, LocalTransform::new());
        graph.attach(star, root, LocalTransform::new().with_rotation(Vec3::new(0.0, 2.5, 0.0)));
        graph.propagate(&mut scene);

        assert!((scene.get(star).unwrap().rotation.y - 2.5).abs() < 1e-6);
    }

    #[test]
    fn remove_subtree_drops_descendants() {
        let mut graph = TransformGraph::new();
        let root = EntityId(1);
        graph.register_with(root, LocalTransform::new());
        graph.attach(EntityId(2), root, LocalTransform::new());
        graph.attach(EntityId(3), EntityId(2), LocalTransform::new());
        graph.register_with(EntityId(4), LocalTransform::new());

        let removed = graph.remove_subtree(root);
        assert_eq!(removed.len(), 3);
        assert_eq!(removed[0], root);
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.roots, vec![EntityId(4)]);
    }
}

use super::*;
use crate::collision_detection::{self, validate_rect, validate_shape};
use crate::error::QuadtreeResult;
use crate::shapes::{Rectangle, ShapeEnum};
use smallvec::smallvec;

impl<K> QuadTree<K>
where
    K: Copy + Eq + Hash,
{
    pub(crate) fn view(&self, id: NodeId) -> NodeView<'_, K> {
        NodeView {
            id,
            node: self.node_ref(id),
        }
    }

    /// Pruned depth-first walk. The root is always entered; every other node
    /// is entered only if `predicate` accepts it, and rejected subtrees are
    /// skipped entirely. Children are visited top-left, top-right,
    /// bottom-left, bottom-right, and `on_leaf` sees the accepted leaves in
    /// that order.
    pub(crate) fn visit_leaves<'s, P, F>(&'s self, mut predicate: P, mut on_leaf: F)
    where
        P: FnMut(&NodeInfo) -> bool,
        F: FnMut(NodeView<'s, K>),
    {
        let mut stack: NodeStack = smallvec![NodeId::ROOT];
        let mut is_root = true;
        while let Some(id) = stack.pop() {
            let node = self.node_ref(id);
            if !is_root && !predicate(&NodeInfo::of(id, node)) {
                continue;
            }
            is_root = false;
            match node.children {
                Some(children) => stack.extend(children.iter().rev().copied()),
                None => on_leaf(self.view(id)),
            }
        }
    }

    /// Collects the entities of every leaf reached by a pruned walk (see
    /// [`QuadTree::filter_leaves`]). Entities come out in insertion order within
    /// a leaf, leaves in traversal order.
    pub fn filter<P>(&self, predicate: P) -> Vec<K>
    where
        P: FnMut(&NodeInfo) -> bool,
    {
        let mut objects = Vec::new();
        self.filter_into(predicate, &mut objects);
        objects
    }

    pub fn filter_into<P>(&self, predicate: P, objects: &mut Vec<K>)
    where
        P: FnMut(&NodeInfo) -> bool,
    {
        self.visit_leaves(predicate, |leaf| objects.extend(leaf.keys()));
    }

    /// The leaves reached by a pruned walk. The predicate is evaluated on
    /// child nodes only; when the root is a leaf it is returned unconditionally.
    pub fn filter_leaves<P>(&self, predicate: P) -> Vec<NodeView<'_, K>>
    where
        P: FnMut(&NodeInfo) -> bool,
    {
        let mut leaves = Vec::new();
        self.visit_leaves(predicate, |leaf| leaves.push(leaf));
        leaves
    }

    /// Entities of every leaf overlapping `rect`. Coarse: leaf members are not
    /// tested individually.
    pub fn query_rect(&self, rect: &Rectangle) -> QuadtreeResult<Vec<K>> {
        validate_rect(rect)?;
        Ok(self.filter(|node| collision_detection::rectangle_rectangle(&node.bounds, rect)))
    }

    /// Entities whose stored position lies inside `rect`, edges included.
    pub fn query_rect_exact(&self, rect: &Rectangle, collisions: &mut Vec<K>) -> QuadtreeResult<()> {
        validate_rect(rect)?;
        self.visit_leaves(
            |node| collision_detection::rectangle_rectangle(&node.bounds, rect),
            |leaf| {
                collisions.extend(
                    leaf.entities()
                        .filter(|(_, p)| collision_detection::rectangle_point(rect, p.x, p.y))
                        .map(|(key, _)| key),
                )
            },
        );
        Ok(())
    }

    /// Entities whose stored position lies inside `shape`.
    pub fn collisions(&self, shape: &ShapeEnum, collisions: &mut Vec<K>) -> QuadtreeResult<()> {
        validate_shape(shape)?;
        self.visit_leaves(
            |node| collision_detection::shape_rectangle(shape, &node.bounds),
            |leaf| {
                collisions.extend(
                    leaf.entities()
                        .filter(|(_, p)| collision_detection::shape_point(shape, p.x, p.y))
                        .map(|(key, _)| key),
                )
            },
        );
        Ok(())
    }

    pub fn collisions_batch(&self, shapes: &[ShapeEnum]) -> QuadtreeResult<Vec<Vec<K>>> {
        shapes
            .iter()
            .map(|shape| {
                let mut collisions = Vec::new();
                self.collisions(shape, &mut collisions)?;
                Ok(collisions)
            })
            .collect()
    }
}

use super::*;
use crate::shapes::Rectangle;
use smallvec::smallvec;

impl<K> QuadTree<K>
where
    K: Copy + Eq + Hash,
{
    pub fn bounds(&self) -> Rectangle {
        self.node_ref(NodeId::ROOT).bounds
    }

    /// View of a live node. Ids of released nodes yield `None`.
    pub fn node(&self, id: NodeId) -> Option<NodeView<'_, K>> {
        let node = self.nodes.get(id.index()).filter(|node| node.live)?;
        Some(NodeView { id, node })
    }

    /// Bounds of every node, parents before children.
    pub fn all_node_bounding_boxes(&self, bounding_boxes: &mut Vec<Rectangle>) {
        let mut stack: NodeStack = smallvec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            let node = self.node_ref(id);
            bounding_boxes.push(node.bounds);
            if let Some(children) = node.children {
                stack.extend(children.iter().rev().copied());
            }
        }
    }

    /// Every leaf, in traversal order.
    pub fn leaves(&self) -> Vec<NodeView<'_, K>> {
        self.filter_leaves(|_| true)
    }

    /// Bounds of the leaf owning `value` followed by those of its ancestors up
    /// to the root. Empty for unknown keys.
    pub fn branch(&self, value: K) -> Vec<Rectangle> {
        let mut bounding_boxes = Vec::new();
        let mut current = self.owner_lookup(value);
        while let Some(id) = current {
            let node = self.node_ref(id);
            bounding_boxes.push(node.bounds);
            current = node.parent;
        }
        bounding_boxes
    }

    /// Deepest level currently in use.
    pub fn depth(&self) -> u32 {
        let mut deepest = 0;
        self.visit_leaves(|_| true, |leaf| deepest = deepest.max(leaf.depth()));
        deepest
    }
}

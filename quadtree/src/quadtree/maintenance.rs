use super::config::{can_collapse, should_split};
use super::*;
use crate::error::{QuadtreeError, QuadtreeResult};
use crate::shapes::Point;
use fxhash::FxHashSet;
use tracing::debug;

impl<K> QuadTree<K>
where
    K: Copy + Eq + Hash,
{
    /// Removes `value` and returns its last recorded position.
    ///
    /// Unknown keys are a no-op and return `None`. After removal the owning
    /// leaf and its ancestors are considered for merging.
    ///
    /// Finding the key inside its leaf is a linear scan, so removal costs
    /// O(depth + leaf size). Leaves only outgrow `max_objects` at `max_depth`.
    pub fn remove(&mut self, value: K) -> Option<Point> {
        let leaf = self.owner_lookup(value)?;
        let point = self.detach(leaf, value)?;
        self.merge(leaf);
        Some(point)
    }

    /// Takes `value` out of `leaf` without any merge evaluation. Leaves the tree
    /// untouched when the leaf does not hold the key.
    pub(crate) fn detach(&mut self, leaf: NodeId, value: K) -> Option<Point> {
        let slot = self.node_ref(leaf).slot_of(&value)?;
        let entry = self.node_mut(leaf).objects.remove(slot);
        self.owner_map.remove(&value);
        self.shrink_path(leaf);
        Some(Point::new(entry.x, entry.y))
    }

    /// Collapses the subtree around `node` if it became sparse.
    ///
    /// Walks upward while the parent's subtree also holds fewer than
    /// `max_objects` entities, then collapses the highest such node.
    pub(crate) fn merge(&mut self, node: NodeId) {
        if !can_collapse(self.node_ref(node).len, self.max_objects) {
            return;
        }
        let mut target = node;
        while let Some(parent) = self.node_ref(target).parent {
            if !can_collapse(self.node_ref(parent).len, self.max_objects) {
                break;
            }
            target = parent;
        }
        if !self.node_ref(target).is_leaf() {
            self.collapse(target);
        }
    }

    /// Pulls every entity of the subtree below `node` into `node` itself, in
    /// depth-first quadrant order, and frees the descendants.
    fn collapse(&mut self, node: NodeId) {
        let Some(children) = self.node_mut(node).children.take() else {
            return;
        };
        let mut gathered = std::mem::take(&mut self.node_mut(node).objects);
        let mut stack: NodeStack = children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let child = self.node_mut(id);
            gathered.append(&mut child.objects);
            if let Some(grandchildren) = child.children.take() {
                stack.extend(grandchildren.iter().rev().copied());
            }
            self.release_node(id);
        }

        for entry in &gathered {
            self.owner_map.insert(entry.key, node);
        }
        debug!(
            node = node.raw(),
            depth = self.node_ref(node).depth,
            entities = gathered.len(),
            "merged subtree"
        );
        self.node_mut(node).objects = gathered;
    }

    /// Drops every entity and collapses the tree back to its root leaf.
    pub fn clear(&mut self) {
        let bounds = self.node_ref(NodeId::ROOT).bounds;
        self.nodes.truncate(1);
        self.nodes[0].initialize(bounds, 0, None);
        self.free_nodes.clear();
        self.owner_map.clear();
    }

    /// Walks the whole tree and checks its structural invariants: internal
    /// nodes hold no entities, every entity sits in exactly one leaf and the
    /// location index agrees, depth stays within `max_depth`, no leaf below
    /// `max_depth` is over capacity, no internal node is sparse enough to
    /// collapse, and cached subtree counts are exact.
    pub fn check_invariants(&self) -> QuadtreeResult<()> {
        let violation = |node: NodeId, reason: String| QuadtreeError::InvariantViolated {
            node: node.raw(),
            reason,
        };

        let mut seen: FxHashSet<K> = FxHashSet::default();
        let mut stack: NodeStack = smallvec::smallvec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            let node = self.node_ref(id);
            if node.depth > self.max_depth {
                return Err(violation(id, format!("depth {} exceeds max", node.depth)));
            }
            match node.children {
                Some(children) => {
                    if !node.objects.is_empty() {
                        return Err(violation(id, "internal node holds entities".into()));
                    }
                    if can_collapse(node.len, self.max_objects) {
                        return Err(violation(
                            id,
                            format!("internal node with {} entities not merged", node.len),
                        ));
                    }
                    let mut total = 0;
                    for (index, &child) in children.iter().enumerate() {
                        let child_node = self.node_ref(child);
                        if !child_node.live {
                            return Err(violation(child, "child slot is on the free list".into()));
                        }
                        if child_node.parent != Some(id) {
                            return Err(violation(child, "parent link mismatch".into()));
                        }
                        if child_node.depth != node.depth + 1 {
                            return Err(violation(child, "child depth mismatch".into()));
                        }
                        if child_node.bounds != node.bounds.quadrant(index) {
                            return Err(violation(child, "child bounds mismatch".into()));
                        }
                        total += child_node.len;
                        stack.push(child);
                    }
                    if total != node.len {
                        return Err(violation(
                            id,
                            format!("count {} but children hold {}", node.len, total),
                        ));
                    }
                }
                None => {
                    if node.len != node.objects.len() {
                        return Err(violation(
                            id,
                            format!("count {} but leaf holds {}", node.len, node.objects.len()),
                        ));
                    }
                    if should_split(node.objects.len(), node.depth, self.max_objects, self.max_depth)
                    {
                        return Err(violation(id, "leaf over capacity was not split".into()));
                    }
                    for entry in &node.objects {
                        if !seen.insert(entry.key) {
                            return Err(violation(id, "entity stored twice".into()));
                        }
                        if self.owner_lookup(entry.key) != Some(id) {
                            return Err(violation(id, "location index points elsewhere".into()));
                        }
                    }
                }
            }
        }

        if seen.len() != self.owner_map.len() {
            return Err(violation(
                NodeId::ROOT,
                format!(
                    "location index tracks {} entities but leaves hold {}",
                    self.owner_map.len(),
                    seen.len()
                ),
            ));
        }
        Ok(())
    }
}

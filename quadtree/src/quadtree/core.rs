use super::config::should_split;
use super::*;
use crate::collision_detection::validate_rect;
use crate::error::QuadtreeResult;
use crate::shapes::{Point, Rectangle};
use super::types::LeafEntry;
use smallvec::smallvec;
use tracing::debug;

impl<K> QuadTree<K>
where
    K: Copy + Eq + Hash,
{
    /// Builds a tree over `bounding_box`. Out-of-range thresholds are clamped
    /// (see [`Config::sanitized`]) and the clamped values are what
    /// [`QuadTree::config`] reports.
    pub fn new_with_config(bounding_box: Rectangle, config: Config) -> Self {
        let config = config.sanitized();
        let max_objects = config.max_objects;
        let max_depth = u32::try_from(config.max_depth).unwrap_or(u32::MAX);
        let mut nodes = Vec::with_capacity(config.pool_size.max(1));
        nodes.push(Node::new_leaf(bounding_box, 0, None));
        Self {
            nodes,
            free_nodes: Vec::new(),
            owner_map: FxHashMap::default(),
            max_objects,
            max_depth,
            config,
        }
    }

    pub fn new(bounding_box: Rectangle) -> Self {
        Self::new_with_config(bounding_box, Config::default())
    }

    /// Like [`QuadTree::new_with_config`], but rejects non-finite or negative
    /// bounds, a zero `max_objects` and an oversized `max_depth` instead of
    /// sanitising them.
    pub fn try_new_with_config(bounding_box: Rectangle, config: Config) -> QuadtreeResult<Self> {
        validate_rect(&bounding_box)?;
        config.validate()?;
        Ok(Self::new_with_config(bounding_box, config))
    }

    pub(crate) fn owner_lookup(&self, value: K) -> Option<NodeId> {
        self.owner_map.get(&value).copied()
    }

    /// Leaf currently owning `value`.
    pub fn leaf_of(&self, value: K) -> Option<NodeId> {
        self.owner_lookup(value)
    }

    /// Last position recorded for `value` by `insert` or `displace`.
    pub fn position_of(&self, value: K) -> Option<Point> {
        let leaf = self.owner_lookup(value)?;
        let node = self.node_ref(leaf);
        let slot = node.slot_of(&value)?;
        let entry = node.objects[slot];
        Some(Point::new(entry.x, entry.y))
    }

    /// Inserts `value` at `(x, y)`. Inserting a key that is already tracked
    /// replaces its previous entry.
    pub fn insert(&mut self, value: K, x: f32, y: f32) {
        if self.owner_lookup(value).is_some() {
            self.remove(value);
        }
        self.insert_into(NodeId::ROOT, LeafEntry { key: value, x, y });
    }

    /// Routes `entry` down from `start` to a leaf, appends it there and splits
    /// the leaf if it became full. Returns the leaf that ends up owning it.
    pub(crate) fn insert_into(&mut self, start: NodeId, entry: LeafEntry<K>) -> NodeId {
        let mut node = start;
        while let Some(children) = self.node_ref(node).children {
            let index = self.node_ref(node).bounds.quadrant_index(entry.x, entry.y);
            node = children[index];
        }

        self.add(node, entry);
        self.grow_path(node);

        let leaf = self.node_ref(node);
        if should_split(leaf.objects.len(), leaf.depth, self.max_objects, self.max_depth) {
            self.subdivide(node);
            return self.owner_lookup(entry.key).unwrap_or(node);
        }
        node
    }

    #[inline(always)]
    fn add(&mut self, node: NodeId, entry: LeafEntry<K>) {
        self.node_mut(node).objects.push(entry);
        self.owner_map.insert(entry.key, node);
    }

    /// Adds one to the entity count of `node` and every ancestor.
    fn grow_path(&mut self, node: NodeId) {
        let mut current = Some(node);
        while let Some(id) = current {
            let node = self.node_mut(id);
            node.len += 1;
            current = node.parent;
        }
    }

    /// Subtracts one from the entity count of `node` and every ancestor.
    pub(crate) fn shrink_path(&mut self, node: NodeId) {
        let mut current = Some(node);
        while let Some(id) = current {
            let node = self.node_mut(id);
            node.len = node.len.saturating_sub(1);
            current = node.parent;
        }
    }

    fn alloc_node(&mut self, bounds: Rectangle, depth: u32, parent: NodeId) -> NodeId {
        if let Some(id) = self.free_nodes.pop() {
            self.node_mut(id).initialize(bounds, depth, Some(parent));
            return id;
        }
        self.nodes.push(Node::new_leaf(bounds, depth, Some(parent)));
        NodeId::from_index(self.nodes.len() - 1)
    }

    pub(crate) fn release_node(&mut self, id: NodeId) {
        debug_assert!(id != NodeId::ROOT, "the root node is never released");
        self.node_mut(id).reset();
        self.free_nodes.push(id);
    }

    /// Turns the leaf `node` into an internal node and redistributes its
    /// entities. Children that fill up during redistribution are split in turn;
    /// ancestors are never revisited.
    pub(crate) fn subdivide(&mut self, node: NodeId) {
        let mut pending: NodeStack = smallvec![node];
        while let Some(node) = pending.pop() {
            let (bounds, depth) = {
                let node = self.node_ref(node);
                (node.bounds, node.depth)
            };
            let children = [0, 1, 2, 3].map(|index| {
                self.alloc_node(bounds.quadrant(index), depth + 1, node)
            });

            let mut objects = std::mem::take(&mut self.node_mut(node).objects);
            debug!(
                node = node.raw(),
                depth,
                entities = objects.len(),
                "splitting leaf"
            );
            self.node_mut(node).children = Some(children);
            for entry in objects.drain(..) {
                let child = children[bounds.quadrant_index(entry.x, entry.y)];
                self.add(child, entry);
                self.node_mut(child).len += 1;
            }
            // Hand the emptied buffer back so the slot keeps its allocation.
            self.node_mut(node).objects = objects;

            for child in children {
                let child_node = self.node_ref(child);
                if should_split(
                    child_node.objects.len(),
                    child_node.depth,
                    self.max_objects,
                    self.max_depth,
                ) {
                    pending.push(child);
                }
            }
        }
    }
}

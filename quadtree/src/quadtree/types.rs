use crate::shapes::{Point, Rectangle};
use smallvec::SmallVec;
use std::fmt;

/// Index of a node in the tree's arena.
///
/// Ids of collapsed nodes are recycled, so an id is only meaningful until the
/// next mutation of the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) const ROOT: NodeId = NodeId(0);

    #[inline(always)]
    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize);
        NodeId(index as u32)
    }

    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct LeafEntry<K> {
    pub(crate) key: K,
    pub(crate) x: f32,
    pub(crate) y: f32,
}

#[derive(Clone, Debug)]
pub(crate) struct Node<K> {
    pub(crate) bounds: Rectangle,
    pub(crate) depth: u32,
    pub(crate) parent: Option<NodeId>,
    /// Top-left, top-right, bottom-left, bottom-right.
    pub(crate) children: Option<[NodeId; 4]>,
    /// Only populated on leaves, in insertion order.
    pub(crate) objects: Vec<LeafEntry<K>>,
    /// Entities held anywhere in this subtree.
    pub(crate) len: usize,
    /// False while the slot sits on the free list.
    pub(crate) live: bool,
}

impl<K> Node<K> {
    pub(crate) fn new_leaf(bounds: Rectangle, depth: u32, parent: Option<NodeId>) -> Self {
        Self {
            bounds,
            depth,
            parent,
            children: None,
            objects: Vec::new(),
            len: 0,
            live: true,
        }
    }

    /// Reuses the slot, keeping the object buffer's allocation.
    pub(crate) fn initialize(&mut self, bounds: Rectangle, depth: u32, parent: Option<NodeId>) {
        self.bounds = bounds;
        self.depth = depth;
        self.parent = parent;
        self.children = None;
        self.objects.clear();
        self.len = 0;
        self.live = true;
    }

    pub(crate) fn reset(&mut self) {
        self.parent = None;
        self.children = None;
        self.objects.clear();
        self.len = 0;
        self.live = false;
    }

    #[inline(always)]
    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Linear in the number of entities held by the leaf.
    pub(crate) fn slot_of(&self, key: &K) -> Option<usize>
    where
        K: PartialEq,
    {
        self.objects.iter().position(|entry| entry.key == *key)
    }
}

pub(crate) type NodeStack = SmallVec<[NodeId; 32]>;

/// Snapshot of a node handed to region predicates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeInfo {
    pub id: NodeId,
    pub bounds: Rectangle,
    pub depth: u32,
    /// Entities held anywhere below the node.
    pub len: usize,
    pub is_leaf: bool,
}

impl NodeInfo {
    pub(crate) fn of<K>(id: NodeId, node: &Node<K>) -> Self {
        Self {
            id,
            bounds: node.bounds,
            depth: node.depth,
            len: node.len,
            is_leaf: node.is_leaf(),
        }
    }
}

/// Read-only view of a node and the entities it holds.
pub struct NodeView<'a, K> {
    pub(crate) id: NodeId,
    pub(crate) node: &'a Node<K>,
}

impl<K> Clone for NodeView<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for NodeView<'_, K> {}

impl<'a, K: Copy + 'a> NodeView<'a, K> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn info(&self) -> NodeInfo {
        NodeInfo::of(self.id, self.node)
    }

    pub fn bounds(&self) -> &'a Rectangle {
        &self.node.bounds
    }

    pub fn depth(&self) -> u32 {
        self.node.depth
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.node.parent
    }

    pub fn children(&self) -> Option<[NodeId; 4]> {
        self.node.children
    }

    pub fn is_leaf(&self) -> bool {
        self.node.is_leaf()
    }

    /// Entities held anywhere below this node.
    pub fn len(&self) -> usize {
        self.node.len
    }

    pub fn is_empty(&self) -> bool {
        self.node.len == 0
    }

    /// Entities held directly by this node with their last known position.
    /// Always empty for internal nodes.
    pub fn entities(&self) -> impl ExactSizeIterator<Item = (K, Point)> + 'a {
        self.node
            .objects
            .iter()
            .map(|entry| (entry.key, Point::new(entry.x, entry.y)))
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = K> + 'a {
        self.node.objects.iter().map(|entry| entry.key)
    }
}

impl<K: fmt::Debug> fmt::Debug for NodeView<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeView")
            .field("id", &self.id)
            .field("bounds", &self.node.bounds)
            .field("depth", &self.node.depth)
            .field("len", &self.node.len)
            .field("leaf", &self.node.is_leaf())
            .finish()
    }
}

/// What a call to `displace` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Displacement {
    /// The key is not in the tree; nothing happened.
    Untracked,
    /// The owning leaf still contains the new position. Only the stored
    /// position was refreshed.
    Retained,
    /// The entity left its leaf and was re-inserted from the root.
    Reinserted,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RelocationRequest<K = u32> {
    pub value: K,
    pub x: f32,
    pub y: f32,
}

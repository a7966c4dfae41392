//! Dynamic point quadtree.
//!
//! Nodes live in an arena and refer to each other by [`NodeId`]: a node owns
//! its four children through a child-id array and points back at its parent
//! with a plain id. Entities are only ever stored on leaves. A side-table maps
//! every entity key to the leaf that currently owns it, so removal and
//! displacement never have to search the tree.
//!
//! Leaves split when they reach `max_objects` entities (unless they sit at
//! `max_depth`), and subtrees collapse back into a single leaf once their total
//! drops below `max_objects`. The collapse is performed by the highest ancestor
//! that qualifies.
//!
//! Entities outside the root bounds are accepted: they are routed by the same
//! midpoint comparisons as everything else and end up in a leaf that does not
//! geometrically contain them. Displacing such an entity therefore always
//! re-inserts it.

mod api;
mod config;
mod core;
mod extents;
mod maintenance;
mod query_circle;
mod query_rect;
mod types;
mod update_entities;

pub use self::api::Entity;
pub use self::config::Config;
pub use self::types::{Displacement, NodeId, NodeInfo, NodeView, RelocationRequest};

use self::types::{Node, NodeStack};
use fxhash::FxHashMap;
use std::hash::Hash;

/// A depth-bounded point quadtree keyed by `K`.
///
/// All mutation goes through `&mut self`; queries only need `&self`.
#[derive(Debug, Clone)]
pub struct QuadTree<K = u32> {
    nodes: Vec<Node<K>>,
    free_nodes: Vec<NodeId>,
    owner_map: FxHashMap<K, NodeId>,
    max_objects: usize,
    max_depth: u32,
    config: Config,
}

impl<K> QuadTree<K>
where
    K: Copy + Eq + Hash,
{
    /// Id of the root node. The root is never freed.
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of entities currently tracked.
    pub fn len(&self) -> usize {
        self.owner_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owner_map.is_empty()
    }

    pub fn contains(&self, key: K) -> bool {
        self.owner_map.contains_key(&key)
    }

    /// Number of live nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free_nodes.len()
    }

    #[inline(always)]
    fn node_ref(&self, id: NodeId) -> &Node<K> {
        &self.nodes[id.index()]
    }

    #[inline(always)]
    fn node_mut(&mut self, id: NodeId) -> &mut Node<K> {
        &mut self.nodes[id.index()]
    }
}

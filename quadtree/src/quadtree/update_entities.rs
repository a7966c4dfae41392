use super::types::LeafEntry;
use super::*;
use tracing::trace;

impl<K> QuadTree<K>
where
    K: Copy + Eq + Hash,
{
    /// Tells the tree that `value` moved to `(x, y)`.
    ///
    /// If the owning leaf still contains the new position (edges inclusive)
    /// only the stored position changes. Otherwise the entity is removed from
    /// its leaf, the leaf is considered for merging, and the entity is
    /// re-inserted from the root. Keys that were never inserted are ignored.
    pub fn displace(&mut self, value: K, x: f32, y: f32) -> Displacement {
        let Some(leaf) = self.owner_lookup(value) else {
            return Displacement::Untracked;
        };
        let node = self.node_mut(leaf);
        let Some(slot) = node.slot_of(&value) else {
            return Displacement::Untracked;
        };
        if node.bounds.contains_point(x, y) {
            let entry = &mut node.objects[slot];
            entry.x = x;
            entry.y = y;
            return Displacement::Retained;
        }

        if self.detach(leaf, value).is_none() {
            return Displacement::Untracked;
        }
        self.merge(leaf);
        let owner = self.insert_into(NodeId::ROOT, LeafEntry { key: value, x, y });
        trace!(from = leaf.raw(), to = owner.raw(), x, y, "entity re-inserted");
        Displacement::Reinserted
    }

    pub fn relocate_batch<I>(&mut self, relocation_requests: I)
    where
        I: IntoIterator<Item = RelocationRequest<K>>,
    {
        for request in relocation_requests {
            self.displace(request.value, request.x, request.y);
        }
    }
}

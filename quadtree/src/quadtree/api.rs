use super::*;
use crate::shapes::Point;

/// A caller-owned record the tree can track by key.
///
/// The tree copies the key and the position; it never holds on to the entity
/// itself.
pub trait Entity {
    type Key: Copy + Eq + Hash;

    fn key(&self) -> Self::Key;
    fn x(&self) -> f32;
    fn y(&self) -> f32;
}

impl<K> QuadTree<K>
where
    K: Copy + Eq + Hash,
{
    pub fn insert_entity<E>(&mut self, entity: &E)
    where
        E: Entity<Key = K>,
    {
        self.insert(entity.key(), entity.x(), entity.y());
    }

    pub fn displace_entity<E>(&mut self, entity: &E) -> Displacement
    where
        E: Entity<Key = K>,
    {
        self.displace(entity.key(), entity.x(), entity.y())
    }

    pub fn remove_entity<E>(&mut self, entity: &E) -> Option<Point>
    where
        E: Entity<Key = K>,
    {
        self.remove(entity.key())
    }

    /// Displaces every entity in `entities`, e.g. once per simulation step.
    pub fn displace_entities<'e, E, I>(&mut self, entities: I)
    where
        E: Entity<Key = K> + 'e,
        I: IntoIterator<Item = &'e E>,
    {
        for entity in entities {
            self.displace_entity(entity);
        }
    }
}

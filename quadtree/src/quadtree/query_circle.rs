use super::*;
use crate::collision_detection::{self, validate_circle};
use crate::error::QuadtreeResult;
use crate::shapes::Circle;

impl<K> QuadTree<K>
where
    K: Copy + Eq + Hash,
{
    /// Entities of every leaf touching `circle`. Coarse, like
    /// [`QuadTree::query_rect`].
    pub fn query_circle(&self, circle: &Circle) -> QuadtreeResult<Vec<K>> {
        validate_circle(circle)?;
        Ok(self.filter(|node| collision_detection::circle_rectangle(circle, &node.bounds)))
    }

    /// Entities strictly closer than `circle.radius` to its centre.
    pub fn query_circle_exact(&self, circle: &Circle, collisions: &mut Vec<K>) -> QuadtreeResult<()> {
        validate_circle(circle)?;
        self.visit_leaves(
            |node| collision_detection::circle_rectangle(circle, &node.bounds),
            |leaf| {
                collisions.extend(
                    leaf.entities()
                        .filter(|(_, p)| collision_detection::circle_point(circle, p.x, p.y))
                        .map(|(key, _)| key),
                )
            },
        );
        Ok(())
    }

    /// Leaves touching `circle`, e.g. for highlighting the quadrants around a
    /// cursor.
    pub fn leaves_in_circle(&self, circle: &Circle) -> QuadtreeResult<Vec<NodeView<'_, K>>> {
        validate_circle(circle)?;
        Ok(self.filter_leaves(|node| collision_detection::circle_rectangle(circle, &node.bounds)))
    }
}

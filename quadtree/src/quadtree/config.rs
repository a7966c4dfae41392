use crate::error::{QuadtreeError, QuadtreeResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Config {
    /// Node slots reserved up front.
    pub pool_size: usize,
    /// A leaf splits once it holds this many entities; a subtree collapses once
    /// it holds fewer.
    pub max_objects: usize,
    /// At most [`Config::MAX_DEPTH`]. Deeper nodes would have bounds too small
    /// for `f32` halving to tell coincident points apart.
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            // With a max depth of 6, there could be up to 5461 nodes.
            pool_size: 4000,
            max_objects: 4,
            max_depth: 6,
        }
    }
}

impl Config {
    pub const MAX_DEPTH: usize = 100;

    pub fn validate(&self) -> QuadtreeResult<()> {
        if self.max_objects == 0 {
            return Err(QuadtreeError::InvalidNodeCapacity);
        }
        if self.max_depth > Self::MAX_DEPTH {
            return Err(QuadtreeError::InvalidMaxDepth {
                max_depth: self.max_depth,
                limit: Self::MAX_DEPTH,
            });
        }
        Ok(())
    }

    /// Clamps `max_objects` to at least 1 and `max_depth` to
    /// [`Config::MAX_DEPTH`].
    pub fn sanitized(self) -> Self {
        Config {
            max_objects: self.max_objects.max(1),
            max_depth: self.max_depth.min(Self::MAX_DEPTH),
            ..self
        }
    }
}

/// Whether a leaf holding `count` entities at `depth` has to split.
#[inline(always)]
pub(crate) fn should_split(count: usize, depth: u32, max_objects: usize, max_depth: u32) -> bool {
    count >= max_objects && depth < max_depth
}

/// Whether a subtree holding `total` entities may collapse into one leaf.
#[inline(always)]
pub(crate) fn can_collapse(total: usize, max_objects: usize) -> bool {
    total < max_objects
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_needs_threshold_and_depth_room() {
        assert!(!should_split(3, 0, 4, 6));
        assert!(should_split(4, 0, 4, 6));
        assert!(should_split(9, 5, 4, 6));
        assert!(!should_split(9, 6, 4, 6));
        assert!(!should_split(100, 0, 4, 0));
    }

    #[test]
    fn collapse_below_threshold_only() {
        assert!(can_collapse(3, 4));
        assert!(!can_collapse(4, 4));
        assert!(can_collapse(0, 1));
        assert!(!can_collapse(1, 1));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let config = Config {
            max_objects: 0,
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(QuadtreeError::InvalidNodeCapacity));
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn depth_beyond_limit_is_rejected() {
        let config = Config {
            max_depth: Config::MAX_DEPTH + 1,
            ..Config::default()
        };
        assert_eq!(
            config.validate(),
            Err(QuadtreeError::InvalidMaxDepth {
                max_depth: Config::MAX_DEPTH + 1,
                limit: Config::MAX_DEPTH,
            })
        );
        let limit = Config {
            max_depth: Config::MAX_DEPTH,
            ..Config::default()
        };
        assert!(limit.validate().is_ok());
    }

    #[test]
    fn sanitized_clamps_both_thresholds() {
        let config = Config {
            pool_size: 16,
            max_objects: 0,
            max_depth: usize::MAX,
        }
        .sanitized();
        assert_eq!(config.pool_size, 16);
        assert_eq!(config.max_objects, 1);
        assert_eq!(config.max_depth, Config::MAX_DEPTH);
        assert_eq!(Config::default().sanitized(), Config::default());
    }
}

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuadtreeError {
    #[error("rectangle width/height must be finite and non-negative (width: {width}, height: {height})")]
    InvalidRectangleDims { width: f32, height: f32 },

    #[error("rectangle origin must be finite (x: {x}, y: {y})")]
    InvalidRectangleOrigin { x: f32, y: f32 },

    #[error("circle radius must be finite and non-negative (radius: {radius})")]
    InvalidCircleRadius { radius: f32 },

    #[error("max_objects must be at least 1")]
    InvalidNodeCapacity,

    #[error("max_depth {max_depth} exceeds the supported limit of {limit}")]
    InvalidMaxDepth { max_depth: usize, limit: usize },

    #[error("invariant violated at node {node}: {reason}")]
    InvariantViolated { node: u32, reason: String },
}

pub type QuadtreeResult<T> = Result<T, QuadtreeError>;

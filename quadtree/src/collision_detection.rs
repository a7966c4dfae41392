use crate::error::{QuadtreeError, QuadtreeResult};
use crate::shapes::{Circle, Rectangle, ShapeEnum};

pub fn validate_rect(rect: &Rectangle) -> QuadtreeResult<()> {
    if !rect.x.is_finite() || !rect.y.is_finite() {
        return Err(QuadtreeError::InvalidRectangleOrigin {
            x: rect.x,
            y: rect.y,
        });
    }
    if !rect.width.is_finite() || !rect.height.is_finite() || rect.width < 0.0 || rect.height < 0.0
    {
        return Err(QuadtreeError::InvalidRectangleDims {
            width: rect.width,
            height: rect.height,
        });
    }
    Ok(())
}

pub fn validate_circle(circle: &Circle) -> QuadtreeResult<()> {
    if !circle.x.is_finite() || !circle.y.is_finite() {
        return Err(QuadtreeError::InvalidRectangleOrigin {
            x: circle.x,
            y: circle.y,
        });
    }
    if !circle.radius.is_finite() || circle.radius < 0.0 {
        return Err(QuadtreeError::InvalidCircleRadius {
            radius: circle.radius,
        });
    }
    Ok(())
}

pub fn validate_shape(shape: &ShapeEnum) -> QuadtreeResult<()> {
    match shape {
        ShapeEnum::Circle(circle) => validate_circle(circle),
        ShapeEnum::Rectangle(rectangle) => validate_rect(rectangle),
    }
}

// Node pruning tests. Touching counts as overlapping so that points lying on a
// node edge are never pruned away.
pub fn rectangle_rectangle(a: &Rectangle, b: &Rectangle) -> bool {
    a.intersects(b)
}

pub fn circle_rectangle(circle: &Circle, rectangle: &Rectangle) -> bool {
    rectangle.intersects_circle(circle.x, circle.y, circle.radius)
}

pub fn shape_rectangle(shape: &ShapeEnum, rectangle: &Rectangle) -> bool {
    shape.intersects_rectangle(rectangle)
}

// Entity tests.
pub fn rectangle_point(rectangle: &Rectangle, x: f32, y: f32) -> bool {
    rectangle.contains_point(x, y)
}

pub fn circle_point(circle: &Circle, x: f32, y: f32) -> bool {
    circle.contains_point(x, y)
}

pub fn shape_point(shape: &ShapeEnum, x: f32, y: f32) -> bool {
    shape.contains_point(x, y)
}

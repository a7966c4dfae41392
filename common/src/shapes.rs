use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl Circle {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self { x, y, radius }
    }

    /// Strictly inside: a point at exactly `radius` from the centre is outside.
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        let dx = x - self.x;
        let dy = y - self.y;
        dx * dx + dy * dy < self.radius * self.radius
    }
}

/// Axis-aligned rectangle anchored at its top-left corner. `y` grows downwards.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn mid_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn mid_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Quadrant a point falls into: 0 top-left, 1 top-right, 2 bottom-left,
    /// 3 bottom-right.
    ///
    /// Comparisons against the midpoint are strict, so a point lying exactly on
    /// the vertical midline belongs to the left half and a point on the
    /// horizontal midline to the top half. Points outside the rectangle still
    /// get an index from the same comparisons.
    #[inline(always)]
    pub fn quadrant_index(&self, x: f32, y: f32) -> usize {
        let right_half = x > self.mid_x();
        let bottom_half = y > self.mid_y();
        right_half as usize + 2 * bottom_half as usize
    }

    /// The sub-rectangle covering quadrant `index` (same numbering as
    /// [`Rectangle::quadrant_index`]).
    pub fn quadrant(&self, index: usize) -> Rectangle {
        let half_width = self.width / 2.0;
        let half_height = self.height / 2.0;
        let x = if index & 1 == 0 {
            self.x
        } else {
            self.x + half_width
        };
        let y = if index & 2 == 0 {
            self.y
        } else {
            self.y + half_height
        };
        Rectangle::new(x, y, half_width, half_height)
    }

    /// Squared distance from the point to the nearest point of the rectangle.
    pub fn distance_to_point(&self, x: f32, y: f32) -> f32 {
        let nearest_x = x.clamp(self.left(), self.right());
        let nearest_y = y.clamp(self.top(), self.bottom());
        let dx = x - nearest_x;
        let dy = y - nearest_y;
        dx * dx + dy * dy
    }

    /// True when the circle overlaps or touches the rectangle.
    pub fn intersects_circle(&self, x: f32, y: f32, radius: f32) -> bool {
        self.distance_to_point(x, y) <= radius * radius
    }

    /// Inclusive of all four edges.
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.left() && x <= self.right() && y >= self.top() && y <= self.bottom()
    }

    /// True when the rectangles overlap or share an edge.
    pub fn intersects(&self, other: &Rectangle) -> bool {
        self.left() <= other.right()
            && self.right() >= other.left()
            && self.top() <= other.bottom()
            && self.bottom() >= other.top()
    }

    pub fn get_random_point_inside<R: Rng>(&self, rng: &mut R) -> Point {
        Point::new(
            Self::safe_randf32(rng, self.left(), self.right()),
            Self::safe_randf32(rng, self.top(), self.bottom()),
        )
    }

    fn safe_randf32<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
        if min >= max {
            return min;
        }
        rng.gen_range(min..=max)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ShapeEnum {
    Circle(Circle),
    Rectangle(Rectangle),
}

impl ShapeEnum {
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        match self {
            ShapeEnum::Circle(circle) => circle.contains_point(x, y),
            ShapeEnum::Rectangle(rectangle) => rectangle.contains_point(x, y),
        }
    }

    pub fn intersects_rectangle(&self, rect: &Rectangle) -> bool {
        match self {
            ShapeEnum::Circle(circle) => rect.intersects_circle(circle.x, circle.y, circle.radius),
            ShapeEnum::Rectangle(rectangle) => rect.intersects(rectangle),
        }
    }
}

//! Scene geometry
//!
//! Plain 2D value types shared by the chain, route and branch modules.
//! Coordinates are scene units with `+y` pointing up, so a node "above"
//! another has the larger `y`.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Points and vectors
// ─────────────────────────────────────────────────────────────────────────────

/// 2D point in scene units
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Keep the component along `axis` and zero every other one.
    ///
    /// Summing `a.only(Axis::X) + b.only(Axis::Y)` merges the x of one point
    /// with the y of another, which is how L-shaped routes get their corner.
    pub fn only(&self, axis: Axis) -> Point {
        match axis {
            Axis::X => Point::new(self.x, 0.0),
            Axis::Y => Point::new(0.0, self.y),
        }
    }

    /// Offset the point by a delta
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Point::new(self.x + dx, self.y + dy)
    }

    pub fn midpoint(&self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Add<Vec2> for Point {
    type Output = Point;

    fn add(self, rhs: Vec2) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Vec2;

    fn sub(self, rhs: Point) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// 2D vector
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sizes and rectangles
// ─────────────────────────────────────────────────────────────────────────────

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Extent of the size along `axis`
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }
}

/// Axis-aligned rectangle, stored as its minimum corner plus size
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn from_center(center: Point, size: Size) -> Self {
        Self {
            origin: Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0),
            size,
        }
    }

    pub fn min_x(&self) -> f32 {
        self.origin.x
    }

    pub fn max_x(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn min_y(&self) -> f32 {
        self.origin.y
    }

    pub fn max_y(&self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    /// Midpoint of the given side
    pub fn edge(&self, side: Side) -> Point {
        let c = self.center();
        match side {
            Side::Left => Point::new(self.min_x(), c.y),
            Side::Right => Point::new(self.max_x(), c.y),
            Side::Top => Point::new(c.x, self.max_y()),
            Side::Bottom => Point::new(c.x, self.min_y()),
        }
    }

    /// Inclusive containment test
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x()
            && point.x <= self.max_x()
            && point.y >= self.min_y()
            && point.y <= self.max_y()
    }

    /// Whether the axis-aligned segment `a..b` touches this rectangle.
    ///
    /// Only meaningful for segments that vary along a single axis.
    pub fn intersects_segment(&self, a: Point, b: Point) -> bool {
        let (lo_x, hi_x) = (a.x.min(b.x), a.x.max(b.x));
        let (lo_y, hi_y) = (a.y.min(b.y), a.y.max(b.y));
        lo_x <= self.max_x() && hi_x >= self.min_x() && lo_y <= self.max_y() && hi_y >= self.min_y()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Directions
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// The other axis
    pub fn cross(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// A side of a rectangle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    /// Unit vector pointing away from the rectangle through this side
    pub fn outward(self) -> Vec2 {
        match self {
            Side::Left => Vec2::new(-1.0, 0.0),
            Side::Right => Vec2::new(1.0, 0.0),
            Side::Top => Vec2::new(0.0, 1.0),
            Side::Bottom => Vec2::new(0.0, -1.0),
        }
    }

    /// Axis the outward normal lies on
    pub fn axis(self) -> Axis {
        match self {
            Side::Left | Side::Right => Axis::X,
            Side::Top | Side::Bottom => Axis::Y,
        }
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_zeroes_other_axis() {
        let p = Point::new(3.0, -2.0);
        assert_eq!(p.only(Axis::X), Point::new(3.0, 0.0));
        assert_eq!(p.only(Axis::Y), Point::new(0.0, -2.0));
    }

    #[test]
    fn recombined_axes_form_a_corner() {
        let a = Point::new(-4.0, -6.0);
        let b = Point::new(-1.5, 2.0);
        assert_eq!(a.only(Axis::X) + b.only(Axis::Y), Point::new(-4.0, 2.0));
    }

    #[test]
    fn rect_edges_use_y_up() {
        let r = Rect::from_center(Point::new(0.0, 0.0), Size::new(4.0, 2.0));
        assert_eq!(r.edge(Side::Left), Point::new(-2.0, 0.0));
        assert_eq!(r.edge(Side::Right), Point::new(2.0, 0.0));
        assert_eq!(r.edge(Side::Top), Point::new(0.0, 1.0));
        assert_eq!(r.edge(Side::Bottom), Point::new(0.0, -1.0));
    }

    #[test]
    fn segment_intersection_is_axis_aligned() {
        let r = Rect::new(0.0, 0.0, 2.0, 2.0);
        assert!(r.intersects_segment(Point::new(-1.0, 1.0), Point::new(3.0, 1.0)));
        assert!(!r.intersects_segment(Point::new(-1.0, -3.0), Point::new(-1.0, 3.0)));
        assert!(!r.intersects_segment(Point::new(-3.0, 2.5), Point::new(3.0, 2.5)));
    }

    #[test]
    fn contains_includes_the_boundary() {
        let r = Rect::new(0.0, 0.0, 2.0, 1.0);
        assert!(r.contains(r.center()));
        assert!(r.contains(r.edge(Side::Top)));
        assert!(!r.contains(r.edge(Side::Left).offset(-0.01, 0.0)));
    }

    #[test]
    fn side_normals_match_axes() {
        for side in [Side::Left, Side::Right, Side::Top, Side::Bottom] {
            let n = side.outward();
            assert!((n.length() - 1.0).abs() < 1e-6);
            assert_eq!(n.x != 0.0, side.axis() == Axis::X);
            assert_eq!(side.opposite().opposite(), side);
        }
    }
}

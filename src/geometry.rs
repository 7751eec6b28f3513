//! Planar geometry kernel for path queries.
//!
//! Value types plus pure functions; no state anywhere. Everything is `f64`
//! so repeated subtraction and cross-product chains stay numerically stable.

use std::ops::{Add, Div, Mul, Sub};

use serde::{Deserialize, Serialize};

/// A 2D point, doubling as a vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, p: Point) -> Point {
        Point::new(self.x + p.x, self.y + p.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, p: Point) -> Point {
        Point::new(self.x - p.x, self.y - p.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, val: f64) -> Point {
        Point::new(self.x * val, self.y * val)
    }
}

impl Div<f64> for Point {
    type Output = Point;
    fn div(self, val: f64) -> Point {
        Point::new(self.x / val, self.y / val)
    }
}

/// Rotation by 90 degrees counter-clockwise.
#[inline]
pub fn perp(p: Point) -> Point {
    Point::new(-p.y, p.x)
}

/// Squared magnitude.
#[inline]
pub fn sq(p: Point) -> f64 {
    p.x * p.x + p.y * p.y
}

/// Euclidean magnitude.
#[inline]
pub fn norm(p: Point) -> f64 {
    sq(p).sqrt()
}

/// Dot product.
#[inline]
pub fn dot(v: Point, w: Point) -> f64 {
    v.x * w.x + v.y * w.y
}

/// 2D scalar cross product.
#[inline]
pub fn cross(v: Point, w: Point) -> f64 {
    v.x * w.y - w.x * v.y
}

/// Unsigned angle between two vectors, in `[0, pi]`.
///
/// The cosine is clamped before `acos` so round-off on near-parallel vectors
/// cannot leave the domain.
pub fn angle(v: Point, w: Point) -> f64 {
    let cos_theta = dot(v, w) / norm(v) / norm(w);
    cos_theta.clamp(-1.0, 1.0).acos()
}

/// Orientation of `c` relative to the directed line `a -> b`:
/// positive when `c` is to the left, zero when collinear.
#[inline]
pub fn orient(a: Point, b: Point, c: Point) -> f64 {
    cross(b - a, c - a)
}

/// Angle `b`-`a`-`c` measured counter-clockwise, in `[0, 2*pi)`.
pub fn oriented_angle(a: Point, b: Point, c: Point) -> f64 {
    if orient(a, b, c) >= 0.0 {
        angle(b - a, c - a)
    } else {
        2.0 * std::f64::consts::PI - angle(b - a, c - a)
    }
}

/// A line in direction/offset form: the points `p` with `cross(v, p) = c`.
#[derive(Debug, Clone, Copy)]
pub struct Line {
    /// Direction vector.
    pub v: Point,
    /// Offset.
    pub c: f64,
}

impl Line {
    /// Line through two points.
    pub fn through(p: Point, q: Point) -> Self {
        let v = q - p;
        Self { v, c: cross(v, p) }
    }

    /// Line from the implicit equation `ax + by = c`.
    pub fn implicit(a: f64, b: f64, c: f64) -> Self {
        Self {
            v: Point::new(b, -a),
            c,
        }
    }

    /// Signed side of `p`: zero on the line, sign tells the half-plane.
    pub fn side(&self, p: Point) -> f64 {
        cross(self.v, p) - self.c
    }

    /// Distance from `p` to the line.
    pub fn dist(&self, p: Point) -> f64 {
        self.side(p).abs() / norm(self.v)
    }

    /// Whether `a` projects strictly before `b` along the line direction.
    pub fn cmp_proj(&self, a: Point, b: Point) -> bool {
        dot(self.v, a) < dot(self.v, b)
    }

    /// The perpendicular line through `p`.
    pub fn perp_through(&self, p: Point) -> Line {
        Line::through(p, p + perp(self.v))
    }
}

/// Intersection point of two lines; `None` when the direction vectors are
/// parallel (zero cross product).
pub fn intersect(a: &Line, b: &Line) -> Option<Point> {
    let d = cross(a.v, b.v);
    if d == 0.0 {
        return None;
    }
    Some((b.v * a.c - a.v * b.c) / d)
}

/// Distance from point `p` to the segment `[a, b]`.
///
/// Perpendicular distance to the carrier line when `p` projects strictly
/// between the endpoints, otherwise the nearer endpoint distance.
pub fn seg_point(a: Point, b: Point, p: Point) -> f64 {
    if a != b {
        let l = Line::through(a, b);
        if l.cmp_proj(a, p) && l.cmp_proj(p, b) {
            return l.dist(p);
        }
    }
    norm(p - a).min(norm(p - b))
}

/// A circle; models the robot footprint and every obstacle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Whether `p` lies inside or on the circle.
    pub fn contains(&self, p: Point) -> bool {
        norm(p - self.center) <= self.radius
    }
}

//! Axis-aligned bounding box, shared by the broad phases and the world bounds.

use crate::math::vec2::Vec2;

/// An Axis-Aligned Bounding Box defined by its minimum and maximum corner points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Creates a new AABB. The corners are sorted so that `min <= max` holds.
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Aabb {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn from_center_half_extents(center: Vec2, half_extents: Vec2) -> Self {
        let half = half_extents.abs();
        Aabb {
            min: center - half,
            max: center + half,
        }
    }

    /// Smallest AABB containing every point, or `None` for an empty slice.
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)));
        Some(Aabb { min, max })
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap: boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let x_overlap = self.max.x > other.min.x && self.min.x < other.max.x;
        let y_overlap = self.max.y > other.min.y && self.min.y < other.max.y;
        x_overlap && y_overlap
    }

    /// Inclusive overlap: touching boxes count. Used by the broad phases so
    /// that no pair the narrow phase could accept is ever culled.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.max.x >= other.min.x
            && self.min.x <= other.max.x
            && self.max.y >= other.min.y
            && self.min.y <= other.max.y
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    pub fn contains(&self, other: &Aabb) -> bool {
        self.contains_point(other.min) && self.contains_point(other.max)
    }

    /// Expands this AABB to also contain `other`.
    pub fn merge(&mut self, other: &Aabb) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        let mut merged = *self;
        merged.merge(other);
        merged
    }

    /// Splits the box into its four quadrants: bottom-left, bottom-right,
    /// top-left, top-right.
    pub fn quadrants(&self) -> [Aabb; 4] {
        let c = self.center();
        [
            Aabb::new(self.min, c),
            Aabb::new(Vec2::new(c.x, self.min.y), Vec2::new(self.max.x, c.y)),
            Aabb::new(Vec2::new(self.min.x, c.y), Vec2::new(c.x, self.max.y)),
            Aabb::new(c, self.max),
        ]
    }

    /// Wraps a point around the box so it reappears on the opposite edge.
    ///
    /// Each coordinate is reduced modulo the box size into `[min, max)`.
    /// A box with zero extent on an axis leaves that coordinate alone.
    pub fn wrap(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            wrap_scalar(point.x, self.min.x, self.max.x),
            wrap_scalar(point.y, self.min.y, self.max.y),
        )
    }
}

fn wrap_scalar(value: f64, min: f64, max: f64) -> f64 {
    let size = max - min;
    if size <= 0.0 || (value >= min && value < max) {
        return value;
    }
    min + (value - min).rem_euclid(size)
}

use smallvec::SmallVec;

use crate::math::vec2::Vec2;

/// World-space contact points of a manifold. Two at most in 2D.
pub type ContactPoints = SmallVec<[Vec2; 2]>;

/// Geometry of an overlap between two shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactManifold {
    /// Unit normal pointing from body A towards body B.
    pub normal: Vec2,
    /// Penetration depth along the normal, never negative.
    pub depth: f64,
    pub points: ContactPoints,
}

impl ContactManifold {
    /// The same manifold seen from the other body.
    pub fn flipped(mut self) -> Self {
        self.normal = -self.normal;
        self
    }
}

/// A colliding (or possibly colliding) pair of bodies for one tick.
///
/// The broad phase produces provisional contacts with no geometry. The
/// narrow phase keeps the ones that really overlap, and contact-info
/// resolution fills in normal, depth and points.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    /// Index of the first body involved in the collision.
    pub body_a: usize,
    /// Index of the second body involved in the collision.
    pub body_b: usize,
    /// The collision normal, pointing from body A towards body B.
    pub normal: Vec2,
    pub depth: f64,
    pub points: ContactPoints,
}

impl Contact {
    pub fn provisional(body_a: usize, body_b: usize) -> Self {
        Self {
            body_a,
            body_b,
            normal: Vec2::ZERO,
            depth: 0.0,
            points: ContactPoints::new(),
        }
    }

    /// True once contact info has been computed.
    pub fn is_resolved(&self) -> bool {
        !self.points.is_empty()
    }

    pub fn set_manifold(&mut self, manifold: ContactManifold) {
        self.normal = manifold.normal;
        self.depth = manifold.depth;
        self.points = manifold.points;
    }

    /// The same contact with the bodies exchanged and the normal negated.
    pub fn swapped(&self) -> Self {
        Self {
            body_a: self.body_b,
            body_b: self.body_a,
            normal: -self.normal,
            depth: self.depth,
            points: self.points.clone(),
        }
    }

    /// Midpoint of the contact points, the single point used when a manifold
    /// is reduced to one application point.
    pub fn center(&self) -> Option<Vec2> {
        if self.points.is_empty() {
            return None;
        }
        let sum = self.points.iter().fold(Vec2::ZERO, |acc, p| acc + *p);
        Some(sum / self.points.len() as f64)
    }
}

use super::ForceSource;
use crate::math::Vec2;
use crate::objects::{get_mutable_body_pair, Body};

/// Damped spring joining the centers of two bodies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub body_a: usize,
    pub body_b: usize,
    pub rest_length: f64,
    pub stiffness: f64,
    pub damping: f64,
}

impl Spring {
    pub fn new(body_a: usize, body_b: usize, rest_length: f64, stiffness: f64, damping: f64) -> Self {
        Self {
            body_a,
            body_b,
            rest_length: rest_length.max(0.0),
            stiffness,
            damping,
        }
    }

    /// World positions of both ends, for drawing.
    pub fn endpoints(&self, bodies: &[Body]) -> Option<(Vec2, Vec2)> {
        let a = bodies.get(self.body_a)?;
        let b = bodies.get(self.body_b)?;
        Some((a.position, b.position))
    }

    /// Adjusts the body indices after the body at `removed` left the list.
    ///
    /// Returns `false` when the spring was attached to that body and must be
    /// dropped.
    pub fn reindex_after_removal(&mut self, removed: usize) -> bool {
        if self.body_a == removed || self.body_b == removed {
            return false;
        }
        if self.body_a > removed {
            self.body_a -= 1;
        }
        if self.body_b > removed {
            self.body_b -= 1;
        }
        true
    }
}

impl ForceSource for Spring {
    /// Hooke force plus damping along the spring axis, equal and opposite.
    fn apply_force(&self, bodies: &mut [Body]) {
        let Some((body_a, body_b)) = get_mutable_body_pair(bodies, self.body_a, self.body_b) else {
            return;
        };

        let delta = body_b.position - body_a.position;
        let length = delta.magnitude();
        if length < 1e-10 || !length.is_finite() {
            return;
        }
        let direction = delta / length;

        let stretch = length - self.rest_length;
        let closing_speed = (body_b.velocity - body_a.velocity).dot(direction);
        let force = direction * (self.stiffness * stretch + self.damping * closing_speed);

        body_a.apply_force(force);
        body_b.apply_force(-force);
    }
}

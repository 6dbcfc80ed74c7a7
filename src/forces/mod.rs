//! Force sources applied once per host frame, before the fixed-step loop.

pub mod spring;

pub use spring::Spring;

use crate::math::Vec2;
use crate::objects::{get_mutable_body_pair, Body};

/// Something that pushes on bodies.
///
/// Sources accumulate into the bodies' force, torque or acceleration. The
/// world clears those accumulators at the end of every host frame.
pub trait ForceSource {
    fn apply_force(&self, bodies: &mut [Body]);
}

/// Constant acceleration on every dynamic body, independent of mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformGravity {
    pub acceleration: Vec2,
}

impl UniformGravity {
    /// Vertical gravity of the given signed magnitude, `(0, gravity)`.
    pub fn vertical(gravity: f64) -> Self {
        Self {
            acceleration: Vec2::new(0.0, gravity),
        }
    }
}

impl ForceSource for UniformGravity {
    fn apply_force(&self, bodies: &mut [Body]) {
        for body in bodies.iter_mut().filter(|b| !b.is_static()) {
            body.apply_acceleration(self.acceleration);
        }
    }
}

/// Newtonian attraction between every pair of dynamic bodies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gravitation {
    /// Gravitational constant.
    pub g: f64,
    /// Distances below this are clamped, so overlapping bodies do not
    /// receive unbounded forces.
    pub min_distance: f64,
}

impl Gravitation {
    pub fn new(g: f64) -> Self {
        Self {
            g,
            min_distance: 1.0,
        }
    }
}

impl ForceSource for Gravitation {
    fn apply_force(&self, bodies: &mut [Body]) {
        if self.g == 0.0 {
            return;
        }
        let min_dist_sq = self.min_distance * self.min_distance;

        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                let Some((body_a, body_b)) = get_mutable_body_pair(bodies, i, j) else {
                    continue;
                };
                if body_a.is_static() || body_b.is_static() {
                    continue;
                }

                let offset = body_b.position - body_a.position;
                let dist_sq = offset.magnitude_squared();
                if dist_sq == 0.0 || !dist_sq.is_finite() {
                    continue;
                }

                let magnitude = self.g * body_a.mass * body_b.mass / dist_sq.max(min_dist_sq);
                let force = offset / dist_sq.sqrt() * magnitude;
                body_a.apply_force(force);
                body_b.apply_force(-force);
            }
        }
    }
}

/// Force given by a closure of world position, applied to dynamic bodies.
pub struct VectorField<F>
where
    F: Fn(Vec2) -> Vec2,
{
    field: F,
}

impl<F> VectorField<F>
where
    F: Fn(Vec2) -> Vec2,
{
    pub fn new(field: F) -> Self {
        Self { field }
    }

    /// Field value at `point`.
    pub fn sample(&self, point: Vec2) -> Vec2 {
        (self.field)(point)
    }
}

impl<F> ForceSource for VectorField<F>
where
    F: Fn(Vec2) -> Vec2,
{
    fn apply_force(&self, bodies: &mut [Body]) {
        for body in bodies.iter_mut().filter(|b| !b.is_static()) {
            let force = (self.field)(body.position);
            body.apply_force(force);
        }
    }
}

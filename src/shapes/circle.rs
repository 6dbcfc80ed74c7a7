use std::f64::consts::PI;

use crate::error::ShapeError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub radius: f64,
}

impl Circle {
    pub fn new(radius: f64) -> Result<Self, ShapeError> {
        if !radius.is_finite() {
            return Err(ShapeError::NonFinite);
        }
        if radius <= 0.0 {
            return Err(ShapeError::NegativeRadius(radius));
        }
        Ok(Self { radius })
    }

    pub fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }

    /// Moment of inertia of a solid disc about its center.
    pub fn inertia(&self, mass: f64) -> f64 {
        0.5 * mass * self.radius * self.radius
    }
}

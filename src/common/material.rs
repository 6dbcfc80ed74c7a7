//! Surface properties used by the contact solver.

use serde::{Deserialize, Serialize};

/// Restitution and friction of a body's surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Coefficient of restitution, clamped to [0, 1].
    /// 0 = perfectly inelastic (no bounce), 1 = perfectly elastic.
    pub restitution: f64,
    /// Coulomb friction coefficient, at least 0.
    pub friction: f64,
}

impl Material {
    pub fn new(restitution: f64, friction: f64) -> Self {
        Material {
            restitution: restitution.clamp(0.0, 1.0),
            friction: friction.max(0.0),
        }
    }

    /// Restitution used for a contact: the less bouncy surface wins.
    pub fn combined_restitution(&self, other: &Material) -> f64 {
        self.restitution.min(other.restitution)
    }

    /// Friction used for a contact: geometric mean, so a frictionless surface
    /// makes the contact frictionless.
    pub fn combined_friction(&self, other: &Material) -> f64 {
        (self.friction * other.friction).sqrt()
    }
}

impl Default for Material {
    fn default() -> Self {
        Material {
            restitution: 0.2,
            friction: 0.5,
        }
    }
}

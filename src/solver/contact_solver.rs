use serde::{Deserialize, Serialize};

use crate::collision::Contact;
use crate::error::ConfigError;
use crate::math::Vec2;
use crate::objects::{get_mutable_body_pair, Body};

/// Tuning for [`ContactSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Velocity passes over the contact list per tick. One pass is the
    /// baseline; more passes help stacks settle.
    pub iterations: usize,
    /// Fraction of the penetration beyond `slop` removed per tick.
    pub percent: f64,
    /// Penetration allowed without positional correction.
    pub slop: f64,
}

impl SolverConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 {
            return Err(ConfigError::InvalidSolver("iterations must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.percent) {
            return Err(ConfigError::InvalidSolver("percent must lie in [0, 1]"));
        }
        if !(self.slop >= 0.0 && self.slop.is_finite()) {
            return Err(ConfigError::InvalidSolver("slop must be finite and not negative"));
        }
        Ok(())
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            iterations: 1,
            percent: 0.2,
            slop: 0.01,
        }
    }
}

/// Sequential-impulse contact resolution.
///
/// Each contact is resolved at the midpoint of its contact points. Restitution
/// and Coulomb friction are applied in the velocity passes, then a single
/// positional pass pushes the bodies apart along the normal.
#[derive(Debug, Clone, Default)]
pub struct ContactSolver {
    config: SolverConfig,
}

impl ContactSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn resolve(&self, bodies: &mut [Body], contacts: &[Contact]) {
        for _ in 0..self.config.iterations {
            for contact in contacts {
                if let Some((body_a, body_b)) = get_mutable_body_pair(bodies, contact.body_a, contact.body_b) {
                    apply_impulse(body_a, body_b, contact);
                }
            }
        }

        for contact in contacts {
            if let Some((body_a, body_b)) = get_mutable_body_pair(bodies, contact.body_a, contact.body_b) {
                self.apply_positional_correction(body_a, body_b, contact);
            }
        }
    }

    fn apply_positional_correction(&self, body_a: &mut Body, body_b: &mut Body, contact: &Contact) {
        let total_inv_mass = body_a.inv_mass + body_b.inv_mass;
        if total_inv_mass <= 0.0 {
            return;
        }

        let magnitude =
            self.config.percent * (contact.depth - self.config.slop).max(0.0) / total_inv_mass;
        if magnitude <= 0.0 {
            return;
        }

        let correction = contact.normal * magnitude;
        body_a.position -= correction * body_a.inv_mass;
        body_b.position += correction * body_b.inv_mass;
    }
}

/// Effective inverse mass of the pair along `direction` at the given offsets.
fn effective_inv_mass(body_a: &Body, body_b: &Body, r_a: Vec2, r_b: Vec2, direction: Vec2) -> f64 {
    let ra_cross = r_a.cross(direction);
    let rb_cross = r_b.cross(direction);
    body_a.inv_mass
        + body_b.inv_mass
        + ra_cross * ra_cross * body_a.inv_inertia
        + rb_cross * rb_cross * body_b.inv_inertia
}

fn apply_impulse(body_a: &mut Body, body_b: &mut Body, contact: &Contact) {
    if body_a.is_static() && body_b.is_static() {
        return;
    }
    let Some(point) = contact.center() else {
        return;
    };

    let normal = contact.normal;
    let r_a = point - body_a.position;
    let r_b = point - body_b.position;

    let relative_velocity = body_b.velocity_at(r_b) - body_a.velocity_at(r_a);
    let velocity_along_normal = relative_velocity.dot(normal);

    // Already separating
    if velocity_along_normal > 0.0 {
        return;
    }

    let k_normal = effective_inv_mass(body_a, body_b, r_a, r_b, normal);
    if k_normal <= 0.0 {
        return;
    }

    let e = body_a.material.combined_restitution(&body_b.material);
    let j = -(1.0 + e) * velocity_along_normal / k_normal;
    let impulse = normal * j;
    body_a.apply_impulse(-impulse, r_a);
    body_b.apply_impulse(impulse, r_b);

    // Friction works on the post-impulse velocities.
    let relative_velocity = body_b.velocity_at(r_b) - body_a.velocity_at(r_a);
    let tangent_velocity = relative_velocity - normal * relative_velocity.dot(normal);
    if tangent_velocity.magnitude_squared() < 1e-18 {
        return;
    }
    let tangent = tangent_velocity.normalize();

    let k_tangent = effective_inv_mass(body_a, body_b, r_a, r_b, tangent);
    if k_tangent <= 0.0 {
        return;
    }

    let mu = body_a.material.combined_friction(&body_b.material);
    let jt = (-relative_velocity.dot(tangent) / k_tangent).clamp(-mu * j, mu * j);
    let friction_impulse = tangent * jt;
    body_a.apply_impulse(-friction_impulse, r_a);
    body_b.apply_impulse(friction_impulse, r_b);
}

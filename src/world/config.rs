use serde::{Deserialize, Serialize};

use crate::broad_phase::{BroadPhaseKind, QuadtreeConfig};
use crate::error::ConfigError;
use crate::solver::SolverConfig;

/// Tunables of a [`World`](super::World).
///
/// Every field has a default, so a JSON document only needs the values it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// When off, `tick` only updates the frame timer.
    pub simulate: bool,
    /// When off, bodies integrate but never collide.
    pub collision: bool,
    /// Wrap dynamic bodies that leave the world bounds to the opposite edge.
    pub wrap: bool,
    /// Tag contacting bodies and expose broad-phase rectangles.
    pub collision_debug: bool,
    /// Signed vertical gravity; the applied acceleration is `(0, gravity)`.
    pub gravity: f64,
    /// Gravitational constant for body-to-body attraction, 0 disables it.
    pub gravitation: f64,
    /// Fixed simulation rate in Hz.
    pub fixed_fps: f64,
    pub broad_phase: BroadPhaseKind,
    /// Most fixed steps run in one host frame.
    pub max_substeps: usize,
    pub solver: SolverConfig,
    pub quadtree: QuadtreeConfig,
}

impl SimulationConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fixed_fps > 0.0 && self.fixed_fps.is_finite()) {
            return Err(ConfigError::NonPositiveRate(self.fixed_fps));
        }
        if self.max_substeps == 0 {
            return Err(ConfigError::InvalidSubstepCap);
        }
        self.quadtree.validate()?;
        self.solver.validate()?;
        Ok(())
    }

    /// Length of one fixed step in seconds.
    pub fn fixed_dt(&self) -> f64 {
        1.0 / self.fixed_fps
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            simulate: true,
            collision: true,
            wrap: false,
            collision_debug: false,
            gravity: -9.81,
            gravitation: 0.0,
            fixed_fps: 60.0,
            broad_phase: BroadPhaseKind::default(),
            max_substeps: 8,
            solver: SolverConfig::default(),
            quadtree: QuadtreeConfig::default(),
        }
    }
}

//! Error types for the physics core.
//!
//! Only construction-time problems surface as errors. The per-tick pipeline
//! never returns `Err` to the caller; it drops bad contacts and counts them.

use thiserror::Error;

/// Rejected simulation configuration. Raised before the first tick.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Fixed-step rate must be a finite number above zero.
    #[error("fixed step rate must be positive, got {0} Hz")]
    NonPositiveRate(f64),

    /// Broad-phase selector does not name a known strategy.
    #[error("unknown broad phase selector: {0}")]
    UnknownBroadPhase(String),

    /// At least one sub-step per frame is needed to make progress.
    #[error("max_substeps must be at least 1")]
    InvalidSubstepCap,

    #[error("quadtree capacity must be at least 1")]
    InvalidQuadtree,

    /// Solver parameters out of range.
    #[error("invalid solver setting: {0}")]
    InvalidSolver(&'static str),

    /// Configuration text could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Rejected shape geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("circle radius must be positive, got {0}")]
    NegativeRadius(f64),

    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("polygon has zero area")]
    ZeroArea,

    #[error("polygon is not convex")]
    NonConvex,

    /// An edge is too short to define an outward normal.
    #[error("polygon has a degenerate edge at vertex {0}")]
    DegenerateEdge(usize),

    #[error("shape contains non-finite coordinates")]
    NonFinite,
}

/// Contact geometry that could not be resolved into a usable normal.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("degenerate contact between bodies {body_a} and {body_b}")]
pub struct DegenerateContact {
    pub body_a: usize,
    pub body_b: usize,
}

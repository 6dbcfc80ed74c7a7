//! A 2D rigid-body physics core.
//!
//! Bodies are advanced with a semi-implicit Euler integrator at a fixed
//! timestep. Each step runs a selectable broad phase (null, quadtree or BVH),
//! an exact narrow phase over circles and convex polygons, and a
//! sequential-impulse contact solver. [`World`] ties it together under a
//! variable-rate host loop.

pub mod broad_phase;
pub mod collision;
pub mod common;
pub mod error;
pub mod forces;
pub mod integration;
pub mod math;
pub mod objects;
pub mod shapes;
pub mod solver;
pub mod world;

// Re-export key types for easier use
pub use broad_phase::{BroadPhase, BroadPhaseKind};
pub use collision::{Aabb, Contact};
pub use common::Material;
pub use error::{ConfigError, DegenerateContact, ShapeError};
pub use forces::{ForceSource, Spring};
pub use math::{Transform, Vec2};
pub use objects::{Body, DebugColor};
pub use shapes::{Circle, Polygon, Shape};
pub use solver::{ContactSolver, SolverConfig};
pub use world::{FrameReport, SimulationConfig, World, WorldStats};

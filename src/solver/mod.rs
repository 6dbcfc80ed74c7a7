pub mod contact_solver;

pub use contact_solver::{ContactSolver, SolverConfig};

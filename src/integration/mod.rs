pub mod integrator;

pub use integrator::semi_implicit_euler;

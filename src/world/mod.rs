pub mod config;
pub mod physics_world;
pub mod stats;
pub mod stepper;
pub mod timer;

pub use config::SimulationConfig;
pub use physics_world::World;
pub use stats::{FrameReport, WorldStats};
pub use stepper::{FixedStepper, StepperState};
pub use timer::FrameTimer;

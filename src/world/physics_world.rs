use crate::broad_phase::{BroadPhase, BroadPhaseKind};
use crate::collision::{
    create_broad_phase_contacts, create_narrow_phase_contacts, resolve_contact_info, Aabb, Contact,
};
use crate::error::ConfigError;
use crate::forces::{ForceSource, Gravitation, Spring, UniformGravity};
use crate::integration::semi_implicit_euler;
use crate::math::Vec2;
use crate::objects::{Body, DebugColor};
use crate::solver::ContactSolver;

use super::config::SimulationConfig;
use super::stats::{FrameReport, WorldStats};
use super::stepper::{FixedStepper, StepperState};
use super::timer::FrameTimer;

/// The simulation: bodies, force sources and the per-frame pipeline.
///
/// Drive it by calling [`World::tick`] once per host frame with the real
/// elapsed time. Bodies can only be added or removed between ticks.
pub struct World {
    config: SimulationConfig,
    bounds: Aabb,
    bodies: Vec<Body>,
    forces: Vec<Box<dyn ForceSource>>,
    springs: Vec<Spring>,
    broad_phase: Box<dyn BroadPhase>,
    solver: ContactSolver,
    stepper: FixedStepper,
    timer: FrameTimer,
    stats: WorldStats,
    contacts: Vec<Contact>,
}

impl World {
    /// Creates an empty world whose bounds span `[-half_size, half_size]`.
    pub fn new(config: SimulationConfig, viewport_half_size: Vec2) -> Result<Self, ConfigError> {
        config.validate()?;

        let bounds = Aabb::from_center_half_extents(Vec2::ZERO, viewport_half_size);
        let broad_phase = config.broad_phase.create(&config.quadtree);
        let solver = ContactSolver::new(config.solver);
        let stepper = FixedStepper::new(config.fixed_dt(), config.max_substeps);

        log::debug!(
            "world created: bounds {:?}, {} Hz, broad phase {}",
            bounds,
            config.fixed_fps,
            config.broad_phase
        );

        Ok(Self {
            config,
            bounds,
            bodies: Vec::new(),
            forces: Vec::new(),
            springs: Vec::new(),
            broad_phase,
            solver,
            stepper,
            timer: FrameTimer::new(),
            stats: WorldStats::default(),
            contacts: Vec::new(),
        })
    }

    /// Adds a body and returns its index.
    pub fn add_body(&mut self, body: Body) -> usize {
        let index = self.bodies.len();
        self.bodies.push(body);
        self.stats.body_count = self.bodies.len();
        index
    }

    /// Removes the body at `index`. Later bodies shift down by one; springs
    /// attached to the removed body are dropped and the rest reindexed.
    pub fn remove_body(&mut self, index: usize) -> Option<Body> {
        if index >= self.bodies.len() {
            return None;
        }
        let body = self.bodies.remove(index);
        self.springs.retain_mut(|spring| spring.reindex_after_removal(index));
        self.contacts.clear();
        self.stats.body_count = self.bodies.len();
        Some(body)
    }

    /// Registers a force source, applied once per frame after gravity.
    pub fn add_force(&mut self, force: impl ForceSource + 'static) {
        self.forces.push(Box::new(force));
    }

    pub fn add_spring(&mut self, spring: Spring) {
        self.springs.push(spring);
    }

    /// Switches the broad-phase strategy. Does nothing if `kind` is current.
    pub fn set_broad_phase(&mut self, kind: BroadPhaseKind) {
        if kind == self.config.broad_phase {
            return;
        }
        log::debug!("broad phase {} -> {}", self.config.broad_phase, kind);
        self.broad_phase = kind.create(&self.config.quadtree);
        self.config.broad_phase = kind;
    }

    pub fn set_simulate(&mut self, simulate: bool) {
        self.config.simulate = simulate;
    }

    pub fn set_collision(&mut self, collision: bool) {
        self.config.collision = collision;
    }

    pub fn set_wrap(&mut self, wrap: bool) {
        self.config.wrap = wrap;
    }

    pub fn set_collision_debug(&mut self, collision_debug: bool) {
        self.config.collision_debug = collision_debug;
        if !collision_debug {
            for body in &mut self.bodies {
                body.color = DebugColor::Default;
            }
        }
    }

    pub fn set_gravity(&mut self, gravity: f64) {
        self.config.gravity = gravity;
    }

    /// Sets the constant for inter-body attraction; 0 disables it.
    pub fn set_gravitation(&mut self, gravitation: f64) {
        self.config.gravitation = gravitation;
    }

    /// Changes the fixed-step rate. Time already accumulated is discarded.
    pub fn set_fixed_fps(&mut self, fixed_fps: f64) -> Result<(), ConfigError> {
        let config = SimulationConfig {
            fixed_fps,
            ..self.config.clone()
        };
        config.validate()?;
        log::debug!("fixed step rate {} -> {} Hz", self.config.fixed_fps, fixed_fps);
        self.stepper = FixedStepper::new(config.fixed_dt(), config.max_substeps);
        self.config = config;
        Ok(())
    }

    /// Advances the world by one host frame of `real_dt` seconds.
    pub fn tick(&mut self, real_dt: f64) -> FrameReport {
        self.timer.update(real_dt);
        if !self.config.simulate {
            return FrameReport::default();
        }

        self.apply_forces();

        let mut report = FrameReport::default();
        self.stepper.accumulate(real_dt);
        while self.stepper.next_step() {
            report.contacts += self.step_fixed();
            report.substeps += 1;
        }

        if self.config.wrap {
            for body in self.bodies.iter_mut().filter(|b| !b.is_static()) {
                body.position = self.bounds.wrap(body.position);
            }
        }

        for body in &mut self.bodies {
            body.clear_accumulators();
        }

        self.stats.substeps = report.substeps;
        self.stats.body_count = self.bodies.len();
        report
    }

    fn apply_forces(&mut self) {
        if self.config.gravity != 0.0 {
            UniformGravity::vertical(self.config.gravity).apply_force(&mut self.bodies);
        }
        if self.config.gravitation != 0.0 {
            Gravitation::new(self.config.gravitation).apply_force(&mut self.bodies);
        }
        for force in &self.forces {
            force.apply_force(&mut self.bodies);
        }
        for spring in &self.springs {
            spring.apply_force(&mut self.bodies);
        }
    }

    /// One fixed step: integrate, then detect and resolve collisions.
    /// Returns the number of contacts solved.
    fn step_fixed(&mut self) -> usize {
        let dt = self.stepper.fixed_dt();
        for body in &mut self.bodies {
            semi_implicit_euler(body, dt);
        }

        if !self.config.collision {
            self.contacts.clear();
            self.stats.potential_collisions = 0;
            self.stats.contacts = 0;
            return 0;
        }

        for body in &mut self.bodies {
            body.color = DebugColor::Default;
        }

        self.broad_phase.build(&self.bounds, &self.bodies);
        let potential = self.broad_phase.potential_collision_count();

        let contacts = create_broad_phase_contacts(self.broad_phase.as_ref(), &self.bodies);
        let contacts = create_narrow_phase_contacts(contacts, &self.bodies);
        let (contacts, dropped) = resolve_contact_info(contacts, &self.bodies);

        self.record_degenerate_contacts(dropped);

        self.solver.resolve(&mut self.bodies, &contacts);

        if self.config.collision_debug {
            for contact in &contacts {
                self.bodies[contact.body_a].color = DebugColor::Contact;
                self.bodies[contact.body_b].color = DebugColor::Contact;
            }
        }

        log::trace!(
            "{}: {} candidate pairs, {} contacts",
            self.broad_phase.name(),
            potential,
            contacts.len()
        );

        self.stats.potential_collisions = potential;
        self.stats.total_potential_collisions += potential as u64;
        self.stats.contacts = contacts.len();

        let solved = contacts.len();
        self.contacts = contacts;
        solved
    }

    /// Counts dropped contacts. Only the first drop in the world's lifetime
    /// is logged; returns true when this call logged it.
    fn record_degenerate_contacts(&mut self, dropped: usize) -> bool {
        if dropped == 0 {
            return false;
        }
        let first = self.stats.degenerate_contacts == 0;
        if first {
            log::warn!("dropped {dropped} degenerate contact(s); later drops are only counted");
        }
        self.stats.degenerate_contacts += dropped as u64;
        first
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Mutable access to body state. The list itself can only change through
    /// [`World::add_body`] and [`World::remove_body`].
    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn body(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn springs(&self) -> &[Spring] {
        &self.springs
    }

    /// Contacts solved in the last fixed step.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn broad_phase_kind(&self) -> BroadPhaseKind {
        self.config.broad_phase
    }

    pub fn stats(&self) -> &WorldStats {
        &self.stats
    }

    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    /// Real time waiting to be simulated.
    pub fn accumulator(&self) -> f64 {
        self.stepper.accumulator()
    }

    pub fn stepper_state(&self) -> StepperState {
        self.stepper.state()
    }

    /// Broad-phase rectangles from the last build, empty unless
    /// `collision_debug` is on.
    pub fn debug_bounds(&self) -> Vec<Aabb> {
        if self.config.collision_debug {
            self.broad_phase.debug_bounds()
        } else {
            Vec::new()
        }
    }

    /// One-line summary for on-screen text.
    pub fn status_line(&self) -> String {
        format!(
            "BODIES: {} BP: {}",
            self.bodies.len(),
            self.stats.potential_collisions
        )
    }
}

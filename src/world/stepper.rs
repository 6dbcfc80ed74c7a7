//! Accumulator-driven fixed timestep under a variable-rate host loop.

/// Whether the stepper is inside a frame's fixed-step loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepperState {
    #[default]
    Idle,
    Stepping,
}

/// Turns variable host frame times into whole fixed steps.
///
/// ```
/// use physics2d::world::FixedStepper;
///
/// let mut stepper = FixedStepper::new(1.0 / 60.0, 8);
/// stepper.accumulate(1.0 / 30.0);
/// let mut steps = 0;
/// while stepper.next_step() {
///     steps += 1;
/// }
/// assert_eq!(steps, 2);
/// ```
#[derive(Debug, Clone)]
pub struct FixedStepper {
    fixed_dt: f64,
    max_substeps: usize,
    accumulator: f64,
    substeps: usize,
    state: StepperState,
}

impl FixedStepper {
    pub fn new(fixed_dt: f64, max_substeps: usize) -> Self {
        Self {
            fixed_dt,
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
            substeps: 0,
            state: StepperState::Idle,
        }
    }

    /// Starts a host frame by adding its elapsed real time.
    ///
    /// Negative or non-finite deltas add nothing.
    pub fn accumulate(&mut self, real_dt: f64) {
        self.substeps = 0;
        if real_dt > 0.0 && real_dt.is_finite() {
            self.accumulator += real_dt;
        } else if real_dt != 0.0 {
            log::debug!("ignoring frame delta {real_dt}");
        }
        self.state = StepperState::Stepping;
    }

    /// Consumes one fixed step if enough time has accumulated.
    ///
    /// Returns `false` once the frame is done. When the frame ends because
    /// the sub-step cap was reached, the leftover time is clamped below one
    /// fixed step so the next frame does not start behind.
    pub fn next_step(&mut self) -> bool {
        if self.accumulator >= self.fixed_dt {
            if self.substeps < self.max_substeps {
                self.accumulator -= self.fixed_dt;
                self.substeps += 1;
                return true;
            }

            let surplus = self.accumulator;
            self.accumulator %= self.fixed_dt;
            log::warn!(
                "fixed step cap of {} reached, dropping {:.4}s of simulation time",
                self.max_substeps,
                surplus - self.accumulator
            );
        }
        self.state = StepperState::Idle;
        false
    }

    pub fn fixed_dt(&self) -> f64 {
        self.fixed_dt
    }

    pub fn max_substeps(&self) -> usize {
        self.max_substeps
    }

    /// Real time not yet simulated.
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Fixed steps taken since the last `accumulate`.
    pub fn substeps(&self) -> usize {
        self.substeps
    }

    pub fn state(&self) -> StepperState {
        self.state
    }

    /// Fraction of a fixed step left in the accumulator, for render
    /// interpolation.
    pub fn alpha(&self) -> f64 {
        self.accumulator / self.fixed_dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-12;

    fn run_frame(stepper: &mut FixedStepper, real_dt: f64) -> usize {
        stepper.accumulate(real_dt);
        let mut steps = 0;
        while stepper.next_step() {
            assert_eq!(stepper.state(), StepperState::Stepping);
            steps += 1;
        }
        steps
    }

    #[test]
    fn test_two_steps_for_double_frame() {
        let mut stepper = FixedStepper::new(1.0 / 60.0, 8);
        assert_eq!(run_frame(&mut stepper, 1.0 / 30.0), 2);
        assert_eq!(stepper.accumulator(), 0.0);
        assert_eq!(stepper.state(), StepperState::Idle);
    }

    #[test]
    fn test_short_frame_carries_remainder() {
        let mut stepper = FixedStepper::new(1.0 / 60.0, 8);
        assert_eq!(run_frame(&mut stepper, 1.0 / 600.0), 0);
        assert!((stepper.accumulator() - 1.0 / 600.0).abs() < EPSILON);

        // Ten short frames add up to one step.
        let steps: usize = (0..9).map(|_| run_frame(&mut stepper, 1.0 / 600.0)).sum();
        assert!(steps <= 1);
        assert!((stepper.accumulator() + steps as f64 / 60.0 - 10.0 / 600.0).abs() < EPSILON);
    }

    #[test]
    fn test_cap_clamps_surplus() {
        let mut stepper = FixedStepper::new(0.1, 3);
        assert_eq!(run_frame(&mut stepper, 1.05), 3);
        assert!(stepper.accumulator() < stepper.fixed_dt());
        assert!((stepper.accumulator() - 0.05).abs() < 1e-9);
        assert_eq!(stepper.substeps(), 3);
    }

    #[test]
    fn test_bad_delta_ignored() {
        let mut stepper = FixedStepper::new(0.1, 3);
        assert_eq!(run_frame(&mut stepper, -1.0), 0);
        assert_eq!(run_frame(&mut stepper, f64::NAN), 0);
        assert_eq!(run_frame(&mut stepper, f64::INFINITY), 0);
        assert_eq!(stepper.accumulator(), 0.0);
    }

    #[test]
    fn test_alpha() {
        let mut stepper = FixedStepper::new(0.1, 3);
        run_frame(&mut stepper, 0.025);
        assert!((stepper.alpha() - 0.25).abs() < EPSILON);
    }

    #[test]
    fn test_zero_cap_is_raised_to_one() {
        let stepper = FixedStepper::new(0.1, 0);
        assert_eq!(stepper.max_substeps(), 1);
    }
}

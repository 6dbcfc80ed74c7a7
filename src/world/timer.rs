/// Frames averaged into one FPS reading.
pub const FPS_WINDOW: u32 = 100;

/// Host frame clock: last frame time, total time and a windowed FPS.
#[derive(Debug, Clone, Default)]
pub struct FrameTimer {
    dt: f64,
    time: f64,
    fps: f64,
    window_frames: u32,
    window_time: f64,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one host frame of length `real_dt` seconds.
    pub fn update(&mut self, real_dt: f64) {
        let dt = if real_dt.is_finite() { real_dt.max(0.0) } else { 0.0 };
        self.dt = dt;
        self.time += dt;

        self.window_frames += 1;
        self.window_time += dt;
        if self.window_frames >= FPS_WINDOW {
            if self.window_time > 0.0 {
                self.fps = f64::from(self.window_frames) / self.window_time;
            }
            self.window_frames = 0;
            self.window_time = 0.0;
        }
    }

    /// Length of the last frame.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Sum of all frame times so far.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Average frames per second over the last complete window, 0 before the
    /// first window completes.
    pub fn fps(&self) -> f64 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-6;

    #[test]
    fn test_fps_after_full_window() {
        let mut timer = FrameTimer::new();
        for _ in 0..FPS_WINDOW - 1 {
            timer.update(1.0 / 50.0);
        }
        assert_eq!(timer.fps(), 0.0);
        timer.update(1.0 / 50.0);
        assert!((timer.fps() - 50.0).abs() < EPSILON);
        assert!((timer.time() - 2.0).abs() < EPSILON);
        assert!((timer.dt() - 0.02).abs() < EPSILON);
    }

    #[test]
    fn test_fps_tracks_latest_window() {
        let mut timer = FrameTimer::new();
        for _ in 0..FPS_WINDOW {
            timer.update(0.01);
        }
        for _ in 0..FPS_WINDOW {
            timer.update(0.02);
        }
        assert!((timer.fps() - 50.0).abs() < EPSILON);
    }

    #[test]
    fn test_invalid_delta_counts_as_zero() {
        let mut timer = FrameTimer::new();
        timer.update(f64::NAN);
        timer.update(-1.0);
        assert_eq!(timer.time(), 0.0);
        assert_eq!(timer.dt(), 0.0);
    }
}

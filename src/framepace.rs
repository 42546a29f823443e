use std::time::{Duration, Instant};

/// Paces the animation loop to a fixed tick rate and tracks the measured
/// frame time.
pub struct FrameClock {
    frame_start: Instant,
    last_frame_time: f32,
    target: Option<Duration>,
}

impl FrameClock {
    /// A `target_fps` of 0 leaves the loop uncapped.
    pub fn new(target_fps: u32) -> Self {
        Self {
            frame_start: Instant::now(),
            last_frame_time: 0.0,
            target: (target_fps > 0).then(|| Duration::from_secs(1) / target_fps),
        }
    }

    pub fn frame_time(&self) -> f32 {
        self.last_frame_time
    }

    pub fn framerate(&self) -> f32 {
        if self.last_frame_time > f32::EPSILON {
            1.0 / self.last_frame_time
        } else {
            0.0
        }
    }

    pub fn begin_frame(&mut self) {
        self.frame_start = Instant::now();
    }

    /// Sleeps out the remainder of the frame budget, spinning the last
    /// stretch because `sleep` overshoots by more than a frame can spare.
    pub fn end_frame(&mut self) {
        if let Some(target) = self.target {
            const SPIN_MARGIN: Duration = Duration::from_micros(100);

            let elapsed = self.frame_start.elapsed();
            if elapsed + SPIN_MARGIN < target {
                std::thread::sleep(target - elapsed - SPIN_MARGIN);
            }
            while self.frame_start.elapsed() < target {
                std::thread::yield_now();
            }
        }

        self.last_frame_time = self.frame_start.elapsed().as_secs_f32();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paced_frame_takes_at_least_the_budget() {
        let mut clock = FrameClock::new(100);
        clock.begin_frame();
        clock.end_frame();
        assert!(clock.frame_time() >= 0.01);
        assert!(clock.framerate() > 0.0);
    }

    #[test]
    fn uncapped_clock_does_not_sleep() {
        let mut clock = FrameClock::new(0);
        clock.begin_frame();
        clock.end_frame();
        assert!(clock.frame_time() < 0.01);
    }
}

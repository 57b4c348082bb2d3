use std::time::{Duration, Instant};

/// Most steps replayed in one frame before the clock gives up catching up
pub const MAX_STEPS_PER_FRAME: u32 = 64;

/// Fixed-step game clock.
///
/// Game time advances in whole steps of `step_interval`, independent of how
/// often frames are drawn: a late frame runs every step it missed.
#[derive(Debug, Clone)]
pub struct StepClock {
    step_interval: Duration,
    last_step: Instant,
}

impl StepClock {
    pub fn new(step_interval: Duration, now: Instant) -> Self {
        Self {
            step_interval,
            last_step: now,
        }
    }

    pub fn step_interval(&self) -> Duration {
        self.step_interval
    }

    /// Number of steps due at `now`. Each one moves the clock forward by
    /// exactly one interval, so leftover time carries into the next frame.
    pub fn due_steps(&mut self, now: Instant) -> u32 {
        let mut steps = 0;

        while now.saturating_duration_since(self.last_step) >= self.step_interval {
            self.last_step += self.step_interval;
            steps += 1;

            if steps == MAX_STEPS_PER_FRAME {
                // Too far behind (suspended terminal); drop the backlog
                self.last_step = now;
                break;
            }
        }

        steps
    }
}

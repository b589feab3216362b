use std::time::{Duration, Instant};

/// What one displayed frame advances by.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTick {
    /// Seconds since the previous tick.
    pub delta: f32,
    /// Seconds since scene start; the value shaders see as `u_time`.
    pub time: f32,
}

/// Scene clock advanced once per redraw.
///
/// Time is the running sum of frame deltas, so it never decreases and never
/// resets. The first tick has a zero delta.
pub struct FrameClock {
    last_tick: Option<Instant>,
    elapsed: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_tick: None,
            elapsed: Duration::ZERO,
        }
    }

    pub fn tick(&mut self, now: Instant) -> FrameTick {
        let delta = match self.last_tick {
            Some(previous) => now.saturating_duration_since(previous),
            None => Duration::ZERO,
        };
        self.last_tick = Some(self.last_tick.map_or(now, |previous| previous.max(now)));
        self.elapsed += delta;

        FrameTick {
            delta: delta.as_secs_f32(),
            time: self.elapsed.as_secs_f32(),
        }
    }

    pub fn tick_now(&mut self) -> FrameTick {
        self.tick(Instant::now())
    }

    pub fn time(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

use std::collections::VecDeque;

/// Turns host timestamps into per-frame delta times.
///
/// The first tick yields `0.0` so a game never starts with a spike. After that
/// the delta is the raw gap between consecutive timestamps; a timestamp that
/// goes backwards yields `0.0`.
#[derive(Debug, Default, Clone)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a timestamp in seconds (any monotonic origin) and get the delta.
    pub fn tick(&mut self, now_secs: f64) -> f32 {
        let dt = match self.last {
            Some(prev) => (now_secs - prev).max(0.0),
            None => 0.0,
        };
        self.last = Some(now_secs);
        dt as f32
    }

    /// Forget the previous timestamp; the next tick yields `0.0` again.
    pub fn restart(&mut self) {
        self.last = None;
    }
}

/// Rolling window of recent frame deltas for reporting.
#[derive(Debug, Clone)]
pub struct FrameStats {
    window: VecDeque<f32>,
    capacity: usize,
    frames: u64,
}

impl FrameStats {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
            frames: 0,
        }
    }

    pub fn record(&mut self, dt: f32) {
        if self.window.len() == self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(dt);
        self.frames += 1;
    }

    /// Total frames recorded, including ones that left the window.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn average(&self) -> f32 {
        if self.window.is_empty() {
            return 0.0;
        }
        self.window.iter().sum::<f32>() / self.window.len() as f32
    }

    pub fn max(&self) -> f32 {
        self.window.iter().copied().fold(0.0, f32::max)
    }

    /// Frames per second over the window, or `0.0` without timing data.
    pub fn fps(&self) -> f32 {
        let avg = self.average();
        if avg > 0.0 { 1.0 / avg } else { 0.0 }
    }
}

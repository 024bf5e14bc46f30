use std::time::Instant;

/// Longest step fed to the simulation; stalls (window drags, breakpoints) are clamped
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// Interval between FPS samples, in seconds
pub const FPS_UPDATE_INTERVAL: f32 = 1.0;

/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    /// Seconds since the clock started
    pub time: f32,
    /// Seconds since the previous frame, clamped to `MAX_FRAME_DELTA`
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self { number, time, delta }
    }
}

/// Frame counter that measures time between ticks and averages FPS
pub struct FrameClock {
    frame_number: u64,
    start_time: Instant,
    last_frame_time: Instant,
    fps: FpsCounter,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            frame_number: 0,
            start_time: now,
            last_frame_time: now,
            fps: FpsCounter::default(),
        }
    }

    /// Advance one frame
    pub fn tick(&mut self) -> FrameInfo {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame_time).as_secs_f32();
        let time = now.duration_since(self.start_time).as_secs_f32();
        self.last_frame_time = now;

        let info = FrameInfo::new(self.frame_number, time, delta.min(MAX_FRAME_DELTA));
        self.frame_number += 1;

        if let Some(fps) = self.fps.record(delta) {
            log::info!("FPS: {:.1}", fps);
        }
        info
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    pub fn fps(&self) -> f32 {
        self.fps.fps()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Averages frame count over `FPS_UPDATE_INTERVAL` windows
#[derive(Debug, Clone, Copy, Default)]
pub struct FpsCounter {
    frames: u32,
    elapsed: f32,
    fps: f32,
}

impl FpsCounter {
    /// Returns the new average when a window completes
    pub fn record(&mut self, delta: f32) -> Option<f32> {
        self.frames += 1;
        self.elapsed += delta;

        if self.elapsed >= FPS_UPDATE_INTERVAL {
            self.fps = self.frames as f32 / self.elapsed;
            self.frames = 0;
            self.elapsed = 0.0;
            Some(self.fps)
        } else {
            None
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

//! Frame timing.
//!
//! [`FrameClock`] produces per-frame timestamps; [`FramePacer`] decides when
//! the next frame is due so the event loop can sleep until then instead of
//! spinning on the clock.

use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the clock was created.
    pub elapsed: f32,
    /// Seconds since the previous tick, clamped.
    pub dt: f32,
    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Monotonic clock for the render loop.
///
/// Delta time is clamped so a stall (debugger, minimized window) does not
/// produce a huge step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame_index: u64,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            last: start,
            frame_index: 0,
            dt_max: Duration::from_millis(250),
        }
    }

    /// Advances the clock to `now` and returns the frame snapshot.
    pub fn tick(&mut self, now: Instant) -> FrameTime {
        let dt = now.saturating_duration_since(self.last).min(self.dt_max);
        self.last = now;

        let frame = FrameTime {
            elapsed: now.saturating_duration_since(self.start).as_secs_f32(),
            dt: dt.as_secs_f32(),
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        frame
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-cadence frame scheduler.
///
/// Each frame is due `interval` after the previous frame started. Without an
/// interval every frame is due immediately.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Option<Duration>,
    next_deadline: Option<Instant>,
}

impl FramePacer {
    pub fn new(interval: Option<Duration>) -> Self {
        Self {
            interval,
            next_deadline: None,
        }
    }

    /// Records the start of a frame and schedules the next one.
    pub fn begin_frame(&mut self, frame_start: Instant) {
        self.next_deadline = self.interval.map(|interval| frame_start + interval);
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_deadline
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.next_deadline.map_or(true, |deadline| now >= deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_reports_elapsed_and_clamped_dt() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);

        let first = clock.tick(start + Duration::from_millis(20));
        assert_eq!(first.frame_index, 0);
        assert!((first.elapsed - 0.02).abs() < 1e-4);
        assert!((first.dt - 0.02).abs() < 1e-4);

        let second = clock.tick(start + Duration::from_secs(5));
        assert_eq!(second.frame_index, 1);
        assert!((second.elapsed - 5.0).abs() < 1e-4);
        assert!((second.dt - 0.25).abs() < 1e-4);
    }

    #[test]
    fn pacer_schedules_from_frame_start() {
        let start = Instant::now();
        let mut pacer = FramePacer::new(Some(Duration::from_millis(20)));
        assert!(pacer.is_due(start));

        pacer.begin_frame(start);
        assert_eq!(pacer.next_deadline(), Some(start + Duration::from_millis(20)));
        assert!(!pacer.is_due(start + Duration::from_millis(5)));
        assert!(pacer.is_due(start + Duration::from_millis(20)));
    }

    #[test]
    fn late_frame_is_due_immediately() {
        let start = Instant::now();
        let mut pacer = FramePacer::new(Some(Duration::from_millis(20)));
        pacer.begin_frame(start);
        assert!(pacer.is_due(start + Duration::from_millis(100)));
    }

    #[test]
    fn unpaced_frames_are_always_due() {
        let start = Instant::now();
        let mut pacer = FramePacer::new(None);
        pacer.begin_frame(start);
        assert_eq!(pacer.next_deadline(), None);
        assert!(pacer.is_due(start));
    }
}

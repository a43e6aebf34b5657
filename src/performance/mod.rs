//! # Frame Statistics
//!
//! Rolling frame-time statistics shown in the HUD overlay.
//!
//! ## Usage
//!
//! ```rust
//! use std::time::Duration;
//! use raster_lab::performance::FrameStats;
//!
//! let mut stats = FrameStats::new();
//! stats.record_frame(Duration::from_millis(20), 413);
//! assert_eq!(stats.draw_calls(), 413);
//! ```

use std::collections::VecDeque;
use std::time::Duration;

/// Rolling frame-time window plus the draw count of the last frame
#[derive(Debug, Clone)]
pub struct FrameStats {
    /// Ring buffer of recent frame times for averaging
    frame_times: VecDeque<Duration>,
    /// Maximum number of frame times to keep for averaging
    max_samples: usize,
    draw_calls: usize,
    total_frames: u64,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::with_capacity(120) // ~2 seconds at 60fps
    }

    pub fn with_capacity(max_samples: usize) -> Self {
        let max_samples = max_samples.max(1);
        Self {
            frame_times: VecDeque::with_capacity(max_samples),
            max_samples,
            draw_calls: 0,
            total_frames: 0,
        }
    }

    /// Record the duration between two presented frames
    pub fn record_frame(&mut self, frame_time: Duration, draw_calls: usize) {
        if self.frame_times.len() >= self.max_samples {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(frame_time);
        self.draw_calls = draw_calls;
        self.total_frames += 1;
    }

    /// Average frame time over the window, in milliseconds
    pub fn frame_time_ms(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        let total: Duration = self.frame_times.iter().sum();
        total.as_secs_f32() * 1000.0 / self.frame_times.len() as f32
    }

    pub fn fps(&self) -> f32 {
        let frame_time_ms = self.frame_time_ms();
        if frame_time_ms > 0.0 {
            1000.0 / frame_time_ms
        } else {
            0.0
        }
    }

    pub fn max_frame_time_ms(&self) -> f32 {
        self.frame_times
            .iter()
            .max()
            .map(|d| d.as_secs_f32() * 1000.0)
            .unwrap_or(0.0)
    }

    pub fn draw_calls(&self) -> usize {
        self.draw_calls
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Lines for the HUD overlay
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!("FPS: {:.0}", self.fps()),
            format!("Frame: {:.2}ms (max {:.2}ms)", self.frame_time_ms(), self.max_frame_time_ms()),
            format!("Draw calls: {}", self.draw_calls),
        ]
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_over_window() {
        let mut stats = FrameStats::with_capacity(2);
        stats.record_frame(Duration::from_millis(100), 1);
        stats.record_frame(Duration::from_millis(20), 2);
        stats.record_frame(Duration::from_millis(20), 3);

        assert!((stats.frame_time_ms() - 20.0).abs() < 1e-3);
        assert!((stats.fps() - 50.0).abs() < 1e-2);
        assert_eq!(stats.draw_calls(), 3);
        assert_eq!(stats.total_frames(), 3);
    }

    #[test]
    fn empty_stats_report_zero() {
        let stats = FrameStats::new();
        assert_eq!(stats.fps(), 0.0);
        assert_eq!(stats.max_frame_time_ms(), 0.0);
    }
}

//! Frame pacing

use std::time::{Duration, Instant};

/// Menu keys are sampled this often so a held key cycles at a readable rate
pub const MENU_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Sleeps out the remainder of each frame to hold a fixed rate
#[derive(Debug, Clone)]
pub struct FramePacer {
    frame_time: Option<Duration>,
    last: Instant,
}

impl FramePacer {
    /// Pacer for `fps` frames per second; 0 disables pacing
    pub fn new(fps: u32) -> Self {
        Self {
            frame_time: (fps > 0).then(|| Duration::from_secs_f64(1.0 / fps as f64)),
            last: Instant::now(),
        }
    }

    /// Pacer with an explicit period (used for menu polling)
    pub fn with_period(period: Duration) -> Self {
        Self {
            frame_time: Some(period),
            last: Instant::now(),
        }
    }

    /// Pacer that never sleeps
    pub fn unpaced() -> Self {
        Self {
            frame_time: None,
            last: Instant::now(),
        }
    }

    pub fn is_paced(&self) -> bool {
        self.frame_time.is_some()
    }

    /// Block until the current frame's time slice is used up
    pub fn wait(&mut self) {
        if let Some(frame_time) = self.frame_time {
            let elapsed = self.last.elapsed();
            if elapsed < frame_time {
                std::thread::sleep(frame_time - elapsed);
            }
        }
        self.last = Instant::now();
    }
}

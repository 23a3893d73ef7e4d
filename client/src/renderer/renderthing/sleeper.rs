use std::time::{Duration, Instant};

/// Caps the redraw loop at a target frame time.
pub struct Sleeper {
    pub target_delta_time: Duration,
    pub last_instant: Option<Instant>,
}

impl Sleeper {
    pub fn new(target_delta_time: Duration) -> Self {
        Self {
            target_delta_time,
            last_instant: None,
        }
    }

    /// Sleeps out whatever is left of the current frame. Returns whether it slept at all.
    pub fn sleep(&mut self) -> bool {
        let elapsed = self.last_instant.map(|last_instant| last_instant.elapsed());

        let slept = match elapsed {
            Some(elapsed) if elapsed < self.target_delta_time => {
                spin_sleep::sleep(self.target_delta_time - elapsed);
                true
            }
            // First frame, or we're already late.
            _ => false,
        };

        self.last_instant = Some(Instant::now());
        slept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_never_sleeps() {
        let mut sleeper = Sleeper::new(Duration::from_millis(5));
        assert!(!sleeper.sleep());
        assert!(sleeper.last_instant.is_some());
    }

    #[test]
    fn fast_frames_are_padded() {
        let mut sleeper = Sleeper::new(Duration::from_millis(20));
        sleeper.sleep();

        let start = Instant::now();
        assert!(sleeper.sleep());
        assert!(start.elapsed() >= Duration::from_millis(10));
    }
}

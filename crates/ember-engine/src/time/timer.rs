use std::time::{Duration, Instant};

/// Stopwatch measuring from its last start or reset.
#[derive(Debug, Copy, Clone)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn reset(&mut self) {
        self.start = Instant::now();
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed().as_secs_f32()
    }

    pub fn elapsed_millis(&self) -> f32 {
        self.elapsed().as_secs_f32() * 1000.0
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_grows_and_reset_restarts() {
        let mut timer = Timer::start();
        std::thread::sleep(Duration::from_millis(5));
        let first = timer.elapsed();
        assert!(first >= Duration::from_millis(5));

        timer.reset();
        assert!(timer.elapsed() < first);
        assert!(timer.elapsed_millis() >= 0.0);
    }
}

use std::time::{SystemTime, UNIX_EPOCH};

/// Source of wall-clock time in seconds since the Unix epoch.
pub trait Clock: Send {
    fn now_seconds(&self) -> f64;
}

/// Reads the system clock. A clock set before the epoch reads as 0.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_seconds(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0)
    }
}

/// Always reports the same instant. Used for replay and tests.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub f64);

impl Clock for FixedClock {
    fn now_seconds(&self) -> f64 {
        self.0
    }
}

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

pub const MAX_ATTEMPTS: usize = 5;
pub const WINDOW: Duration = Duration::from_secs(15 * 60);

/// Sliding-window login throttle keyed by source address. State is
/// process-local: it resets on restart and is not shared across replicas.
#[derive(Default)]
pub struct LoginRateLimiter {
    attempts: Mutex<HashMap<IpAddr, Vec<Instant>>>,
}

impl LoginRateLimiter {
    /// Records an attempt and reports whether it is within the window
    /// budget. Counted before credential checks, so failed and successful
    /// logins spend the budget alike.
    pub fn allow(&self, addr: IpAddr) -> bool {
        self.allow_at(addr, Instant::now())
    }

    fn allow_at(&self, addr: IpAddr, now: Instant) -> bool {
        let mut attempts = self
            .attempts
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let window = attempts.entry(addr).or_default();
        window.retain(|at| now.duration_since(*at) < WINDOW);

        if window.len() >= MAX_ATTEMPTS {
            return false;
        }
        window.push(now);
        true
    }
}

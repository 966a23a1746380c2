//! Per-client request throttle.
//!
//! Each client identifier keeps the instant of its last accepted request.
//! A new request is accepted only when at least `60s / per_minute` has
//! elapsed since then. There is no burst allowance and nothing is counted.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::num::NonZeroU32;
use std::time::{Duration, Instant};
use tracing::debug;

const MINUTE: Duration = Duration::from_secs(60);

pub struct RateLimiter {
    name: &'static str,
    last_accepted: DashMap<String, Instant>, // identifier -> last accepted request
    interval: Duration,
}

impl RateLimiter {
    pub fn per_minute(name: &'static str, max_requests: NonZeroU32) -> Self {
        Self {
            name,
            last_accepted: DashMap::new(),
            interval: MINUTE / max_requests.get(),
        }
    }

    /// Minimum spacing between two accepted requests from one client.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn allow(&self, identifier: &str) -> bool {
        self.allow_at(identifier, Instant::now())
    }

    /// Decide as if the request arrived at `now`.
    ///
    /// The entry lock is held across the check and the update, so two racing
    /// requests from the same client cannot both be accepted.
    pub fn allow_at(&self, identifier: &str, now: Instant) -> bool {
        // get_mut first so repeat clients don't allocate a key
        if let Some(mut last) = self.last_accepted.get_mut(identifier) {
            if now.saturating_duration_since(*last) < self.interval {
                debug!(limiter = self.name, identifier, "request throttled");
                return false;
            }
            *last = now;
            return true;
        }

        match self.last_accepted.entry(identifier.to_string()) {
            Entry::Occupied(mut entry) => {
                // lost a race with another first request from this client
                if now.saturating_duration_since(*entry.get()) < self.interval {
                    debug!(limiter = self.name, identifier, "request throttled");
                    return false;
                }
                entry.insert(now);
                true
            }
            Entry::Vacant(entry) => {
                entry.insert(now);
                true
            }
        }
    }

    /// Drop clients whose last accepted request is at least one interval old.
    ///
    /// Such entries can no longer reject anything, so removing them never
    /// changes a decision. Returns how many entries were removed.
    pub fn sweep(&self, now: Instant) -> usize {
        let before = self.last_accepted.len();
        self.last_accepted
            .retain(|_, last| now.saturating_duration_since(*last) < self.interval);
        before.saturating_sub(self.last_accepted.len())
    }

    /// Number of clients currently tracked.
    pub fn tracked(&self) -> usize {
        self.last_accepted.len()
    }
}

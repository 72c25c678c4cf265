//! A cached value with an optional expiry instant.

use std::time::{Duration, Instant};

/// Value that stops being usable at a fixed instant
///
/// Values created without a lifetime never expire on their own.
#[derive(Debug, Clone)]
pub struct Expiring<T> {
    value: T,
    expires_at: Option<Instant>,
}

impl<T> Expiring<T> {
    /// Wrap `value`, expiring `ttl` from now.
    ///
    /// A `ttl` too large to represent as an instant never expires.
    pub fn new(value: T, ttl: Duration) -> Self {
        match Instant::now().checked_add(ttl) {
            Some(expires_at) => Self::at(value, expires_at),
            None => Self::never(value),
        }
    }

    /// Wrap `value`, expiring at `expires_at`.
    pub fn at(value: T, expires_at: Instant) -> Self {
        Self { value, expires_at: Some(expires_at) }
    }

    /// Wrap `value` without an expiry.
    pub fn never(value: T) -> Self {
        Self { value, expires_at: None }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }

    /// The value, if it has not expired.
    pub fn get(&self) -> Option<&T> {
        (!self.is_expired()).then_some(&self.value)
    }

    /// The value regardless of expiry.
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }

    /// Time left before expiry; `None` when the value never expires.
    pub fn remaining(&self) -> Option<Duration> {
        self.expires_at.map(|expires_at| expires_at.saturating_duration_since(Instant::now()))
    }
}

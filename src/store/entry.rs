//! Keyspace entries: a value plus an optional deadline.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

// == Stored Value ==
/// What a key holds.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredValue {
    /// Byte string written by SET / SET EX / INCR
    Bytes(Vec<u8>),
    /// List built by RPUSH, oldest element first
    List(Vec<Vec<u8>>),
}

// == Key Entry ==
#[derive(Debug, Clone)]
pub struct KeyEntry {
    pub value: StoredValue,
    /// Deadline in Unix milliseconds; `None` for persistent keys
    pub expires_at: Option<u64>,
}

impl KeyEntry {
    /// Wraps `value`, arming a deadline `ttl` from now when given.
    pub fn new(value: StoredValue, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.map(|ttl| now_ms().saturating_add(ttl.as_millis() as u64));
        Self { value, expires_at }
    }

    /// A key is gone from the moment its deadline is reached.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|deadline| now_ms() >= deadline)
    }

    /// Milliseconds until the deadline, saturating at zero.
    pub fn remaining_ttl(&self) -> Option<u64> {
        self.expires_at
            .map(|deadline| deadline.saturating_sub(now_ms()))
    }
}

/// Wall clock in Unix milliseconds.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

//! Keyspace Module
//!
//! In-memory keyspace combining HashMap storage with TTL expiration and
//! Redis-compatible string, counter and list commands.

use std::collections::HashMap;
use std::time::Duration;

use crate::error::{CacheError, Result};
use crate::store::{KeyEntry, StoredValue};

// == Keyspace ==
/// Key-value storage with per-key TTL support.
///
/// Expired keys are dropped lazily by any command that touches them and in
/// bulk by [`Keyspace::purge_expired`].
#[derive(Debug, Default)]
pub struct Keyspace {
    entries: HashMap<String, KeyEntry>,
}

impl Keyspace {
    // == Constructor ==
    /// Creates an empty keyspace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry for `key`, removing it first if it has expired.
    fn live_entry(&mut self, key: &str) -> Option<&mut KeyEntry> {
        if self.entries.get(key).is_some_and(KeyEntry::is_expired) {
            self.entries.remove(key);
            return None;
        }
        self.entries.get_mut(key)
    }

    // == Flush ==
    /// Removes every key. Returns the number of keys removed.
    pub fn flush(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    // == Set ==
    /// Stores a byte string, replacing any previous value and TTL.
    pub fn set(&mut self, key: &str, value: &[u8], ttl: Option<Duration>) {
        let entry = KeyEntry::new(StoredValue::Bytes(value.to_vec()), ttl);
        self.entries.insert(key.to_string(), entry);
    }

    // == Get ==
    /// Retrieves a byte string. Missing and expired keys yield `None`.
    pub fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>> {
        match self.live_entry(key) {
            Some(entry) => match &entry.value {
                StoredValue::Bytes(raw) => Ok(Some(raw.clone())),
                StoredValue::List(_) => Err(CacheError::WrongType(key.to_string())),
            },
            None => Ok(None),
        }
    }

    // == Incr ==
    /// Increments the integer stored at `key` by one and returns the new value.
    ///
    /// A missing key counts as zero. The key's TTL, if any, is preserved.
    pub fn incr(&mut self, key: &str) -> Result<i64> {
        let current = match self.live_entry(key) {
            Some(entry) => match &entry.value {
                StoredValue::Bytes(raw) => parse_integer(raw)?,
                StoredValue::List(_) => return Err(CacheError::WrongType(key.to_string())),
            },
            None => 0,
        };

        let next = current
            .checked_add(1)
            .ok_or_else(|| CacheError::Store("increment would overflow".to_string()))?;
        let encoded = StoredValue::Bytes(next.to_string().into_bytes());

        match self.entries.get_mut(key) {
            Some(entry) => entry.value = encoded,
            None => {
                self.entries
                    .insert(key.to_string(), KeyEntry::new(encoded, None));
            }
        }

        Ok(next)
    }

    // == Rpush ==
    /// Appends `value` to the list at `key`, creating it if needed.
    ///
    /// Returns the list length after the push.
    pub fn rpush(&mut self, key: &str, value: &[u8]) -> Result<usize> {
        match self.live_entry(key) {
            Some(entry) => match &mut entry.value {
                StoredValue::List(items) => {
                    items.push(value.to_vec());
                    Ok(items.len())
                }
                StoredValue::Bytes(_) => Err(CacheError::WrongType(key.to_string())),
            },
            None => {
                let entry = KeyEntry::new(StoredValue::List(vec![value.to_vec()]), None);
                self.entries.insert(key.to_string(), entry);
                Ok(1)
            }
        }
    }

    // == Lrange ==
    /// Returns the list elements between `start` and `stop`, both inclusive.
    ///
    /// Negative indices count from the end of the list (`-1` is the last
    /// element). Out-of-range indices are clamped.
    pub fn lrange(&mut self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>> {
        let items = match self.live_entry(key) {
            Some(entry) => match &entry.value {
                StoredValue::List(items) => items,
                StoredValue::Bytes(_) => return Err(CacheError::WrongType(key.to_string())),
            },
            None => return Ok(Vec::new()),
        };

        let len = items.len() as isize;
        let start = if start < 0 { (len + start).max(0) } else { start };
        let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };

        if start > stop || start >= len {
            return Ok(Vec::new());
        }

        Ok(items[start as usize..=stop as usize].to_vec())
    }

    // == PTTL ==
    /// Remaining TTL of a live key in milliseconds, `None` if the key is
    /// missing or never expires.
    pub fn pttl(&mut self, key: &str) -> Option<u64> {
        self.live_entry(key).and_then(|entry| entry.remaining_ttl())
    }

    // == Purge Expired ==
    /// Removes all expired entries. Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        before - self.entries.len()
    }

    // == Length ==
    /// Returns the number of keys currently held, including expired keys not
    /// yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_integer(raw: &[u8]) -> Result<i64> {
    std::str::from_utf8(raw)
        .ok()
        .and_then(|text| text.parse::<i64>().ok())
        .ok_or_else(|| CacheError::Store("value is not an integer or out of range".to_string()))
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_keyspace_new() {
        let keyspace = Keyspace::new();
        assert_eq!(keyspace.len(), 0);
        assert!(keyspace.is_empty());
    }

    #[test]
    fn test_set_and_get() {
        let mut keyspace = Keyspace::new();

        keyspace.set("key1", b"value1", None);

        assert_eq!(keyspace.get("key1").unwrap(), Some(b"value1".to_vec()));
        assert_eq!(keyspace.len(), 1);
    }

    #[test]
    fn test_get_nonexistent() {
        let mut keyspace = Keyspace::new();
        assert_eq!(keyspace.get("nonexistent").unwrap(), None);
    }

    #[test]
    fn test_overwrite_clears_ttl() {
        let mut keyspace = Keyspace::new();

        keyspace.set("key1", b"value1", Some(Duration::from_secs(60)));
        keyspace.set("key1", b"value2", None);

        assert_eq!(keyspace.get("key1").unwrap(), Some(b"value2".to_vec()));
        assert_eq!(keyspace.pttl("key1"), None);
        assert_eq!(keyspace.len(), 1);
    }

    #[test]
    fn test_ttl_expiration() {
        let mut keyspace = Keyspace::new();

        keyspace.set("key1", b"value1", Some(Duration::from_millis(100)));
        assert!(keyspace.get("key1").unwrap().is_some());

        sleep(Duration::from_millis(150));

        assert_eq!(keyspace.get("key1").unwrap(), None);
        assert!(keyspace.is_empty(), "expired key should be dropped on access");
    }

    #[test]
    fn test_flush() {
        let mut keyspace = Keyspace::new();

        keyspace.set("a", b"1", None);
        keyspace.rpush("b", b"x").unwrap();

        assert_eq!(keyspace.flush(), 2);
        assert!(keyspace.is_empty());
    }

    #[test]
    fn test_incr_missing_key_starts_at_one() {
        let mut keyspace = Keyspace::new();

        assert_eq!(keyspace.incr("counter").unwrap(), 1);
        assert_eq!(keyspace.incr("counter").unwrap(), 2);
        assert_eq!(keyspace.get("counter").unwrap(), Some(b"2".to_vec()));
    }

    #[test]
    fn test_incr_existing_integer() {
        let mut keyspace = Keyspace::new();

        keyspace.set("counter", b"41", None);
        assert_eq!(keyspace.incr("counter").unwrap(), 42);
    }

    #[test]
    fn test_incr_preserves_ttl() {
        let mut keyspace = Keyspace::new();

        keyspace.set("counter", b"1", Some(Duration::from_secs(60)));
        keyspace.incr("counter").unwrap();

        assert!(keyspace.pttl("counter").is_some());
    }

    #[test]
    fn test_incr_non_integer_fails() {
        let mut keyspace = Keyspace::new();

        keyspace.set("text", b"hello", None);
        assert!(matches!(keyspace.incr("text"), Err(CacheError::Store(_))));
    }

    #[test]
    fn test_incr_overflow_fails() {
        let mut keyspace = Keyspace::new();

        keyspace.set("big", i64::MAX.to_string().as_bytes(), None);
        assert!(matches!(keyspace.incr("big"), Err(CacheError::Store(_))));
    }

    #[test]
    fn test_rpush_and_lrange_preserve_order() {
        let mut keyspace = Keyspace::new();

        assert_eq!(keyspace.rpush("list", b"a").unwrap(), 1);
        assert_eq!(keyspace.rpush("list", b"b").unwrap(), 2);
        assert_eq!(keyspace.rpush("list", b"c").unwrap(), 3);

        let all = keyspace.lrange("list", 0, -1).unwrap();
        assert_eq!(all, vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);
    }

    #[test]
    fn test_lrange_index_handling() {
        let mut keyspace = Keyspace::new();
        for item in ["a", "b", "c", "d"] {
            keyspace.rpush("list", item.as_bytes()).unwrap();
        }

        assert_eq!(
            keyspace.lrange("list", 1, 2).unwrap(),
            vec![b"b".to_vec(), b"c".to_vec()]
        );
        assert_eq!(keyspace.lrange("list", -2, -1).unwrap().len(), 2);
        assert_eq!(keyspace.lrange("list", 0, 100).unwrap().len(), 4);
        assert_eq!(keyspace.lrange("list", -100, 0).unwrap(), vec![b"a".to_vec()]);
        assert!(keyspace.lrange("list", 3, 1).unwrap().is_empty());
        assert!(keyspace.lrange("list", 10, 20).unwrap().is_empty());
        assert!(keyspace.lrange("missing", 0, -1).unwrap().is_empty());
    }

    #[test]
    fn test_wrong_type_errors() {
        let mut keyspace = Keyspace::new();

        keyspace.set("string", b"value", None);
        keyspace.rpush("list", b"item").unwrap();

        assert!(matches!(keyspace.rpush("string", b"x"), Err(CacheError::WrongType(_))));
        assert!(matches!(keyspace.lrange("string", 0, -1), Err(CacheError::WrongType(_))));
        assert!(matches!(keyspace.get("list"), Err(CacheError::WrongType(_))));
        assert!(matches!(keyspace.incr("list"), Err(CacheError::WrongType(_))));
    }

    #[test]
    fn test_purge_expired() {
        let mut keyspace = Keyspace::new();

        keyspace.set("key1", b"value1", Some(Duration::from_millis(100)));
        keyspace.set("key2", b"value2", Some(Duration::from_secs(10)));

        sleep(Duration::from_millis(150));

        assert_eq!(keyspace.purge_expired(), 1);
        assert_eq!(keyspace.len(), 1);
        assert!(keyspace.get("key2").unwrap().is_some());
    }
}

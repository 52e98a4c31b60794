//! In-memory Known HSTS Host map (C4).
//!
//! Deliberately a plain `HashMap` with no internal locking: this core is
//! single-threaded cooperative, so there is nothing here for `DashMap`
//! (the client's choice for its existing, concurrently-shared
//! `HstsStore`) to earn its keep over. A caller embedding this in a
//! multi-threaded client wraps an `HstsStore` in a `Mutex` at the
//! integration boundary.

use std::collections::HashMap;

use crate::hsts::info::HostInfo;
use crate::hsts::key::HostKey;

/// The store: a map from `HostKey` to `HostInfo`, plus the file mtime
/// observed at the last successful `open`/merge.
#[derive(Debug, Default)]
pub struct HstsStore {
    pub(crate) entries: HashMap<HostKey, HostInfo>,
    pub(crate) last_mtime: i64,
}

impl HstsStore {
    /// An empty store with no on-disk association.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
            last_mtime: 0,
        }
    }

    pub fn get(&self, key: &HostKey) -> Option<&HostInfo> {
        self.entries.get(key)
    }

    pub(crate) fn put(&mut self, key: HostKey, info: HostInfo) {
        self.entries.insert(key, info);
    }

    pub fn remove(&mut self, key: &HostKey) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn contains(&self, key: &HostKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HostKey, &HostInfo)> {
        self.entries.iter()
    }

    /// File mtime observed at the last successful load or merge; `0` if
    /// the store has never been associated with a file.
    pub fn last_mtime(&self) -> i64 {
        self.last_mtime
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hsts::key::Scheme;

    #[test]
    fn put_get_remove_roundtrip() {
        let mut store = HstsStore::empty();
        let key = HostKey::build("example.com", 443, Scheme::Https);
        let info = HostInfo::new(1000, 100, true);

        assert!(store.get(&key).is_none());
        store.put(key.clone(), info);
        assert_eq!(store.get(&key), Some(&info));
        assert_eq!(store.count(), 1);
        assert!(store.remove(&key));
        assert!(store.get(&key).is_none());
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn contains_reflects_membership() {
        let mut store = HstsStore::empty();
        let key = HostKey::build("example.com", 443, Scheme::Https);
        assert!(!store.contains(&key));
        store.put(key.clone(), HostInfo::new(0, 1, false));
        assert!(store.contains(&key));
    }
}

//! Hash collections used across Dockyard.
//!
//! Item ids are hashed on every pointer move and every telemetry sample, so
//! the engine uses AHash instead of SipHash.

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashmap_ahash() {
        let mut map = HashMap::new();
        map.insert("firefox", 3usize);
        assert_eq!(map.get("firefox"), Some(&3));
    }

    #[test]
    fn test_hashset_ahash() {
        let mut set = HashSet::new();
        assert!(set.insert("terminal"));
        assert!(!set.insert("terminal"));
    }
}

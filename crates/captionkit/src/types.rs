//! # Common Types

/// Integer identifier of an image, as carried by the annotation file.
pub type ImageId = i64;

cfg_if::cfg_if! {
    if #[cfg(feature = "ahash")] {
        /// Type Alias for hash maps in this crate.
        pub type CKHashMap<K, V> = ahash::AHashMap<K, V>;

        /// Create a new empty hash map.
        pub fn hash_map_new<K, V>() -> CKHashMap<K, V> {
            CKHashMap::new()
        }

        /// Type Alias for hash sets in this crate.
        pub type CKHashSet<V> = ahash::AHashSet<V>;

    } else {
        /// Type Alias for hash maps in this crate.
        pub type CKHashMap<K, V> = std::collections::HashMap<K, V>;

        /// Create a new empty hash map.
        pub fn hash_map_new<K, V>() -> CKHashMap<K, V> {
            CKHashMap::new()
        }

        /// Type Alias for hash sets in this crate.
        pub type CKHashSet<V> = std::collections::HashSet<V>;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_aliases() {
        let mut map: CKHashMap<String, usize> = hash_map_new();
        *map.entry("dog".to_string()).or_default() += 2;
        assert_eq!(map.get("dog"), Some(&2));

        let set: CKHashSet<&str> = ["a", "b", "a"].into_iter().collect();
        assert_eq!(set.len(), 2);
    }
}

//! Hashing of strings into compact identifiers.

use bytemuck::{Pod, Zeroable};
use lazy_static::lazy_static;
use parking_lot::Mutex;
use std::{collections::HashMap, fmt};

/// A 64-bit hash.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Zeroable, Pod)]
pub struct Hash64(u64);

/// A 64-bit hash of a string.
///
/// The hashed string is kept in a global registry so that the hash can be
/// formatted back into it by means of the [`Display`](fmt::Display) trait.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Zeroable, Pod)]
pub struct StringHash64(Hash64);

lazy_static! {
    static ref STRING_HASH_64_REGISTRY: Mutex<HashMap<Hash64, String>> =
        Mutex::new(HashMap::new());
}

impl From<Hash64> for u64 {
    fn from(hash: Hash64) -> Self {
        hash.0
    }
}

impl StringHash64 {
    /// Creates a new [`StringHash64`] for the given string.
    ///
    /// # Concurrency
    /// The method temporarily locks the global string registry in order to
    /// record the hash and string pair.
    pub fn new<S: ToString>(string: S) -> Self {
        let string = string.to_string();
        let hash = compute_hash_str_64(&string);
        Self::new_with_hash(string, hash)
    }

    /// Creates a new [`StringHash64`] for the given string with the given
    /// precomputed hash.
    ///
    /// # Concurrency
    /// The method temporarily locks the global string registry in order to
    /// record the hash and string pair.
    pub fn new_with_hash<S: ToString>(string: S, hash: Hash64) -> Self {
        STRING_HASH_64_REGISTRY
            .lock()
            .entry(hash)
            .or_insert_with(|| string.to_string());
        Self(hash)
    }

    /// The 64-bit hash value.
    pub fn hash(&self) -> Hash64 {
        self.0
    }
}

/// Computes a 64-bit hash of the given string.
pub const fn compute_hash_str_64(string: &str) -> Hash64 {
    Hash64(const_fnv1a_hash::fnv1a_hash_str_64(string))
}

impl fmt::Display for Hash64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for StringHash64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match STRING_HASH_64_REGISTRY.lock().get(&self.0) {
            Some(string) => write!(f, "{string}"),
            None => write!(f, "<unknown string with hash {}>", self.0),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn string_hash_displays_as_hashed_string() {
        let hash = StringHash64::new("Material.DiffuseValue");
        assert_eq!(hash.to_string(), "Material.DiffuseValue");
    }

    #[test]
    fn string_hash_of_literal_matches_hash_of_owned_string() {
        let from_literal = hash64!("glass");
        let from_owned = StringHash64::new(String::from("glass"));
        assert_eq!(from_literal, from_owned);
    }

    #[test]
    fn different_strings_give_different_hashes() {
        assert_ne!(StringHash64::new("base"), StringHash64::new("coat"));
    }

    #[test]
    fn zeroed_hash_without_registered_string_still_formats() {
        let hash = StringHash64::zeroed();
        assert!(!hash.to_string().is_empty());
    }
}

//! Key files: the on-disk envelope around an exported pool
//!
//! A key file wraps the mapping-object sequence with a format version and a
//! fingerprint so a reader can tell a truncated or hand-edited file from a
//! genuine export. The sequence inside is exactly what `CharMask::load`
//! accepts.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::mapping::MappingObject;

/// Current key-file format version.
pub const KEY_FILE_VERSION: u32 = 1;

/// An exported pool plus integrity metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyFile {
    /// Format version of this file.
    pub version: u32,
    /// Hex sha256 over the id-sorted pool.
    pub fingerprint: String,
    /// The pool itself, in its original order.
    pub objects: Vec<MappingObject>,
}

impl KeyFile {
    /// Wrap a pool, computing its fingerprint.
    pub fn new(objects: Vec<MappingObject>) -> Self {
        let fingerprint = fingerprint(&objects);
        Self {
            version: KEY_FILE_VERSION,
            fingerprint,
            objects,
        }
    }

    /// Recompute the fingerprint and compare it to the stored one.
    pub fn verify(&self) -> bool {
        self.fingerprint == fingerprint(&self.objects)
    }
}

/// Fingerprint a pool: sha256 over each object's id, permutation snapshot
/// and sorted forward table, with objects visited in id order so the digest
/// is independent of pool ordering.
pub fn fingerprint(objects: &[MappingObject]) -> String {
    let mut hasher = Sha256::new();

    let mut sorted: Vec<&MappingObject> = objects.iter().collect();
    sorted.sort_by(|a, b| a.id.cmp(&b.id));

    let mut buf = [0u8; 4];
    for object in sorted {
        hasher.update(object.id.as_bytes());

        let snapshot: String = object.characters.iter().collect();
        hasher.update(snapshot.as_bytes());

        let mut pairs: Vec<(char, char)> = object
            .encrypt
            .iter()
            .map(|(symbol, mapped)| (*symbol, *mapped))
            .collect();
        pairs.sort();

        for (symbol, mapped) in pairs {
            hasher.update(symbol.encode_utf8(&mut buf).as_bytes());
            hasher.update(mapped.encode_utf8(&mut buf).as_bytes());
        }
    }

    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_pool() -> Vec<MappingObject> {
        let characters: Vec<char> = "abcdefghij".chars().collect();
        mapping::build_pool_with_rng(&characters, 4, &mut StdRng::seed_from_u64(21))
    }

    #[test]
    fn test_key_file_verifies_its_own_pool() {
        let key_file = KeyFile::new(test_pool());
        assert_eq!(key_file.version, KEY_FILE_VERSION);
        assert!(key_file.verify());
    }

    #[test]
    fn test_fingerprint_ignores_pool_order() {
        let pool = test_pool();
        let mut reversed = pool.clone();
        reversed.reverse();

        assert_eq!(fingerprint(&pool), fingerprint(&reversed));
    }

    #[test]
    fn test_tampered_pool_fails_verification() {
        let mut key_file = KeyFile::new(test_pool());
        key_file.objects[0].id.push('9');
        assert!(!key_file.verify());

        let mut key_file = KeyFile::new(test_pool());
        // 'z' is outside the pool, so this always changes the table.
        key_file.objects[1].encrypt.insert('z', 'z');
        assert!(!key_file.verify());
    }

    #[test]
    fn test_yaml_round_trip() {
        let key_file = KeyFile::new(test_pool());
        let yaml = serde_yaml::to_string(&key_file).unwrap();
        let reloaded: KeyFile = serde_yaml::from_str(&yaml).unwrap();

        assert!(reloaded.verify());
        assert_eq!(reloaded.objects, key_file.objects);
    }
}

//! Mapping objects and the pool builder
//!
//! A mapping object is one substitution table: a forward table, its exact
//! inverse, the permutation snapshot both were derived from, and a unique
//! numeric-string id. The builder produces an ordered pool of them, each
//! shuffled independently from the same canonical character pool.

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Upper bound (inclusive) of the id draw. Ids are decimal renderings of a
/// uniform draw from `0..=ID_SPACE`, retried on collision within one build.
pub const ID_SPACE: u64 = 23_422_166_453;

/// One substitution table with its permutation snapshot and id.
///
/// `decrypt` is constructed as the exact inverse of `encrypt`. If the pool
/// the object was built from contains duplicate symbols, later mirror
/// pairings overwrite earlier table entries for that symbol; callers that
/// need full round-trip correctness must dedupe their character pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingObject {
    /// Unique within the owning pool.
    pub id: String,
    /// Symbol -> symbol forward table.
    pub encrypt: HashMap<char, char>,
    /// Symbol -> symbol inverse table.
    pub decrypt: HashMap<char, char>,
    /// The permutation snapshot the tables were derived from. Owned by this
    /// object alone, never shared with another object or the canonical pool.
    pub characters: Vec<char>,
}

impl MappingObject {
    /// Derive both tables from a permutation by pairing position `j` with
    /// mirror position `n - 1 - j`.
    pub fn from_permutation(id: String, characters: Vec<char>) -> Self {
        let n = characters.len();
        let mut encrypt = HashMap::with_capacity(n);
        let mut decrypt = HashMap::with_capacity(n);

        for j in 0..n {
            let symbol = characters[j];
            let mapped = characters[n - 1 - j];
            encrypt.insert(symbol, mapped);
            decrypt.insert(mapped, symbol);
        }

        Self {
            id,
            encrypt,
            decrypt,
            characters,
        }
    }
}

/// Build a pool of `size` mapping objects from `characters` using the
/// process-wide RNG.
pub fn build_pool(characters: &[char], size: usize) -> Vec<MappingObject> {
    build_pool_with_rng(characters, size, &mut rand::thread_rng())
}

/// Build a pool with a specific RNG (for reproducible tests).
pub fn build_pool_with_rng<R: Rng>(
    characters: &[char],
    size: usize,
    rng: &mut R,
) -> Vec<MappingObject> {
    let mut objects: Vec<MappingObject> = Vec::with_capacity(size);

    for _ in 0..size {
        let id = draw_unique_id(&objects, rng);

        // Every shuffle starts from a fresh copy of the canonical pool,
        // never from the previous object's permutation.
        let mut working = characters.to_vec();
        shuffle(&mut working, rng);

        objects.push(MappingObject::from_permutation(id, working));
    }

    objects
}

/// Draw an id not yet present in `objects`. The draw space dwarfs realistic
/// pool sizes, so the retry loop terminates almost immediately in practice.
fn draw_unique_id<R: Rng>(objects: &[MappingObject], rng: &mut R) -> String {
    loop {
        let candidate = rng.gen_range(0..=ID_SPACE).to_string();
        if !objects.iter().any(|object| object.id == candidate) {
            return candidate;
        }
    }
}

/// In-place shuffle. Not a textbook Fisher-Yates: the swap target is drawn
/// from `[0, len - 2]`, so the last index is never a target. Pools exported
/// by earlier builds were produced with this distribution; keep it.
fn shuffle<R: Rng>(symbols: &mut [char], rng: &mut R) {
    if symbols.len() < 2 {
        return;
    }
    let last = symbols.len() - 1;
    for j in 0..symbols.len() {
        let r = rng.gen_range(0..last);
        symbols.swap(j, r);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pool_chars() -> Vec<char> {
        "abcdefghijklmnopqrstuvwxyz".chars().collect()
    }

    #[test]
    fn test_build_pool_size_and_unique_ids() {
        let mut rng = StdRng::seed_from_u64(7);
        let pool = build_pool_with_rng(&pool_chars(), 25, &mut rng);

        assert_eq!(pool.len(), 25);

        let mut ids: Vec<&String> = pool.iter().map(|o| &o.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 25);
    }

    #[test]
    fn test_ids_are_numeric_strings() {
        let mut rng = StdRng::seed_from_u64(8);
        let pool = build_pool_with_rng(&pool_chars(), 5, &mut rng);

        for object in &pool {
            let value: u64 = object.id.parse().expect("id parses as u64");
            assert!(value <= ID_SPACE);
        }
    }

    #[test]
    fn test_characters_is_a_permutation_of_the_pool() {
        let mut rng = StdRng::seed_from_u64(9);
        let canonical = pool_chars();
        let pool = build_pool_with_rng(&canonical, 10, &mut rng);

        let mut expected = canonical.clone();
        expected.sort();

        for object in &pool {
            let mut snapshot = object.characters.clone();
            snapshot.sort();
            assert_eq!(snapshot, expected);
        }
    }

    #[test]
    fn test_tables_are_exact_inverses() {
        let mut rng = StdRng::seed_from_u64(10);
        let pool = build_pool_with_rng(&pool_chars(), 3, &mut rng);

        for object in &pool {
            assert_eq!(object.encrypt.len(), object.decrypt.len());
            for (symbol, mapped) in &object.encrypt {
                assert_eq!(object.decrypt.get(mapped), Some(symbol));
            }
        }
    }

    #[test]
    fn test_mirror_pairing_rule() {
        let characters: Vec<char> = "abcd".chars().collect();
        let object = MappingObject::from_permutation("1".to_string(), characters.clone());

        let n = characters.len();
        for j in 0..n {
            assert_eq!(
                object.encrypt.get(&characters[j]),
                Some(&characters[n - 1 - j])
            );
        }
    }

    #[test]
    fn test_duplicate_symbols_overwrite_earlier_pairings() {
        // 'a' appears twice; the later pairing wins and the tables shrink.
        let characters: Vec<char> = "aba".chars().collect();
        let object = MappingObject::from_permutation("1".to_string(), characters);

        assert!(object.encrypt.len() < 3);
        assert!(object.decrypt.len() < 3);
    }

    #[test]
    fn test_single_symbol_pool_maps_to_itself() {
        let mut rng = StdRng::seed_from_u64(11);
        let pool = build_pool_with_rng(&['x'], 2, &mut rng);

        assert_eq!(pool.len(), 2);
        for object in &pool {
            assert_eq!(object.encrypt.get(&'x'), Some(&'x'));
            assert_eq!(object.decrypt.get(&'x'), Some(&'x'));
        }
    }

    #[test]
    fn test_snapshots_are_independently_owned() {
        let mut rng = StdRng::seed_from_u64(12);
        let canonical = pool_chars();
        let mut pool = build_pool_with_rng(&canonical, 2, &mut rng);

        // Mutating one snapshot must not leak into the other or the canonical pool.
        pool[0].characters[0] = '#';
        assert_ne!(pool[1].characters[0], '#');
        assert_eq!(canonical, pool_chars());
    }

    #[test]
    fn test_same_seed_reproduces_the_pool() {
        let chars = pool_chars();
        let a = build_pool_with_rng(&chars, 5, &mut StdRng::seed_from_u64(42));
        let b = build_pool_with_rng(&chars, 5, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let chars = pool_chars();
        let a = build_pool_with_rng(&chars, 5, &mut StdRng::seed_from_u64(1));
        let b = build_pool_with_rng(&chars, 5, &mut StdRng::seed_from_u64(2));

        let ids_a: Vec<&String> = a.iter().map(|o| &o.id).collect();
        let ids_b: Vec<&String> = b.iter().map(|o| &o.id).collect();
        assert_ne!(ids_a, ids_b);
        assert_ne!(a[0].characters, b[0].characters);
    }

    #[test]
    fn test_wire_format_field_names() {
        let object = MappingObject::from_permutation("17".to_string(), "ab".chars().collect());
        let value = serde_json::to_value(&object).unwrap();

        assert_eq!(value["id"], "17");
        assert!(value["encrypt"].is_object());
        assert!(value["decrypt"].is_object());
        assert!(value["characters"].is_array());
    }
}

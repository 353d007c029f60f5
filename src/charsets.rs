//! Character-set registry: named, ordered symbol sequences
//!
//! Maps a set name to the symbols it contains. The registry is static data;
//! unknown names resolve to `None` and the caller decides how to react.

/// English letters, lowercase then uppercase.
const EN: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Turkish letters, lowercase then uppercase.
const TR: &str = "abcçdefgğhıijklmnoöprsştuüvyzABCÇDEFGĞHIİJKLMNOÖPRSŞTUÜVYZ";

/// Decimal digits.
const NUMBER: &str = "0123456789";

/// Common ASCII punctuation.
const SYMBOL: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

const SETS: &[(&str, &str)] = &[
    ("en", EN),
    ("tr", TR),
    ("number", NUMBER),
    ("symbol", SYMBOL),
];

/// Look up a character set by name.
pub fn lookup(name: &str) -> Option<&'static str> {
    SETS.iter()
        .find(|(key, _)| *key == name)
        .map(|(_, symbols)| *symbols)
}

/// Names of all registered sets, in registry order.
pub fn names() -> impl Iterator<Item = &'static str> {
    SETS.iter().map(|(key, _)| *key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_sets() {
        assert_eq!(lookup("en").unwrap().chars().count(), 52);
        assert_eq!(lookup("tr").unwrap().chars().count(), 58);
        assert_eq!(lookup("number").unwrap(), "0123456789");
        assert!(lookup("symbol").is_some());
    }

    #[test]
    fn test_lookup_unknown_set() {
        assert!(lookup("nope").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn test_names_cover_registry() {
        let names: Vec<_> = names().collect();
        assert_eq!(names, vec!["en", "tr", "number", "symbol"]);
    }

    #[test]
    fn test_sets_have_no_duplicate_symbols() {
        for name in names() {
            let symbols: Vec<char> = lookup(name).unwrap().chars().collect();
            let mut deduped = symbols.clone();
            deduped.sort();
            deduped.dedup();
            assert_eq!(symbols.len(), deduped.len(), "duplicates in set '{}'", name);
        }
    }
}

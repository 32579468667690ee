// file: src/storage/list_codec.rs
// description: delimited string encoding for set valued columns
// reference: flat tabular storage of list fields

use crate::utils::patterns::LIST_DECORATION;
use std::collections::BTreeSet;

pub const LIST_SEPARATOR: &str = ", ";

pub fn join_list(items: &BTreeSet<String>) -> String {
    items
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

/// Also accepts the bracketed `"['a', 'b']"` form written by older exports.
pub fn parse_list(raw: &str) -> BTreeSet<String> {
    let cleaned = LIST_DECORATION.replace_all(raw, "");
    cleaned
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_round_trip_preserves_set() {
        let original = set(&["чип", "плата", "электроника"]);
        assert_eq!(parse_list(&join_list(&original)), original);
    }

    #[test]
    fn test_empty_set_encodes_to_empty_string() {
        let empty = BTreeSet::new();
        assert_eq!(join_list(&empty), "");
        assert!(parse_list("").is_empty());
        assert!(parse_list("[]").is_empty());
    }

    #[test]
    fn test_parse_legacy_bracketed_form() {
        assert_eq!(parse_list("['китай', \"тайвань\"]"), set(&["китай", "тайвань"]));
    }

    #[test]
    fn test_parse_drops_blank_items_and_duplicates() {
        assert_eq!(parse_list(" чип, , чип ,плата"), set(&["чип", "плата"]));
    }

    #[test]
    fn test_multiword_items_survive() {
        let original = set(&["южная корея", "сша"]);
        assert_eq!(parse_list(&join_list(&original)), original);
    }
}

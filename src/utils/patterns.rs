// file: src/utils/patterns.rs
// description: compiled regex patterns shared by storage and validation
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Table and column names interpolated into sqlite queries
    pub static ref SQL_IDENTIFIER: Regex = Regex::new(
        r"^[A-Za-z_][A-Za-z0-9_]*$"
    ).expect("SQL_IDENTIFIER regex is valid");

    // Brackets and quotes left by bracketed list literals ("['a', 'b']")
    pub static ref LIST_DECORATION: Regex = Regex::new(
        r#"[\[\]'"]"#
    ).expect("LIST_DECORATION regex is valid");
}

pub fn is_sql_identifier(name: &str) -> bool {
    SQL_IDENTIFIER.is_match(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_identifier_pattern() {
        assert!(is_sql_identifier("companies"));
        assert!(is_sql_identifier("name_short"));
        assert!(is_sql_identifier("_col1"));
        assert!(!is_sql_identifier("1col"));
        assert!(!is_sql_identifier("companies; drop"));
        assert!(!is_sql_identifier(""));
    }

    #[test]
    fn test_list_decoration_pattern() {
        let cleaned = LIST_DECORATION.replace_all("['чип', \"плата\"]", "");
        assert_eq!(cleaned, "чип, плата");
    }
}

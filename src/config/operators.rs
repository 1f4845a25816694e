//! Operator allow-list loaded from environment variables.
//!
//! `OPERATOR_USER_IDS` holds a comma-separated list of Discord user IDs allowed
//! to run commands. When it is unset or empty, everyone in the server may.

use std::collections::HashSet;

/// Parses a comma-separated id list, ignoring blanks and surrounding whitespace.
#[must_use]
pub fn parse_operator_ids(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Reads the allow-list from `OPERATOR_USER_IDS`.
#[must_use]
pub fn get_operator_ids() -> HashSet<String> {
    std::env::var("OPERATOR_USER_IDS")
        .map(|raw| parse_operator_ids(&raw))
        .unwrap_or_default()
}

/// Whether `user_id` may operate the shop given an allow-list.
#[must_use]
pub fn is_operator(allowed: &HashSet<String>, user_id: &str) -> bool {
    allowed.is_empty() || allowed.contains(user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_operator_ids() {
        let ids = parse_operator_ids(" 123, 456 ,,789 ");
        assert_eq!(ids.len(), 3);
        assert!(ids.contains("456"));
    }

    #[test]
    fn test_empty_allow_list_admits_everyone() {
        let allowed = parse_operator_ids("");
        assert!(is_operator(&allowed, "anyone"));
    }

    #[test]
    fn test_allow_list_rejects_strangers() {
        let allowed = parse_operator_ids("123");
        assert!(is_operator(&allowed, "123"));
        assert!(!is_operator(&allowed, "999"));
    }
}

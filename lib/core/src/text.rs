//! Text normalization for schema artifacts
//!
//! Table and column names arrive in many shapes (`CUSTOMER_ID`, `order-date`,
//! `dim.customer`). Every signal works on the same canonical form: lowercase,
//! separators turned into single spaces, trimmed.

use ahash::AHashSet;

/// Characters treated as word separators in raw identifiers
pub const SEPARATORS: &[char] = &['_', '-', '.', '/'];

/// Canonicalize a raw label or column string.
///
/// Never fails; empty input yields an empty string.
pub fn normalize(text: &str) -> String {
    let replaced: String = text
        .chars()
        .map(|c| if SEPARATORS.contains(&c) { ' ' } else { c })
        .collect();

    replaced
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Tokens of the normalized text, in order
pub fn tokens(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Distinct tokens of the normalized text
pub fn token_set(text: &str) -> AHashSet<String> {
    tokens(text).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_identifiers() {
        assert_eq!(normalize("CUSTOMER_ID"), "customer id");
        assert_eq!(normalize("  order-date "), "order date");
        assert_eq!(normalize("dim.customer/name"), "dim customer name");
        assert_eq!(normalize("email__address"), "email address");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("___"), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize("Customer_Name");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_tokens() {
        assert_eq!(tokens("user_id"), vec!["user", "id"]);
        assert!(tokens("").is_empty());

        let set = token_set("id_id_key");
        assert_eq!(set.len(), 2);
        assert!(set.contains("id"));
        assert!(set.contains("key"));
    }
}

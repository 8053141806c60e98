//! Order Numbering
//!
//! Suggests the next order number from the numbers already on file.

/// Next free order number in the `ORD-NNNN` series.
///
/// Scans existing numbers for `ORD-<digits>` or `ORDER-<digits>`, takes the
/// highest suffix and adds one. Anything else ("DRAFT-5", free-form notes)
/// is ignored. Starts at `ORD-0001`; the counter keeps growing past four
/// digits.
pub fn next_order_number(existing: &[String]) -> String {
    let next = existing
        .iter()
        .filter_map(|value| order_suffix(value))
        .max()
        .map_or(1, |max| max + 1);
    format!("ORD-{next:04}")
}

/// Numeric suffix of an `ORD-`/`ORDER-` number, None for anything else
fn order_suffix(value: &str) -> Option<i64> {
    let digits = value
        .strip_prefix("ORDER-")
        .or_else(|| value.strip_prefix("ORD-"))?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_first_number() {
        assert_eq!(next_order_number(&[]), "ORD-0001");
    }

    #[test]
    fn test_increments_highest_suffix() {
        let existing = strings(&["ORD-0001", "ORD-0017", "ORD-0005"]);
        assert_eq!(next_order_number(&existing), "ORD-0018");
    }

    #[test]
    fn test_long_prefix_counts_too() {
        let existing = strings(&["ORDER-0042", "ORD-0007"]);
        assert_eq!(next_order_number(&existing), "ORD-0043");
    }

    #[test]
    fn test_ignores_non_matching_numbers() {
        let existing = strings(&["DRAFT-5", "ORD-12X", "ord-3", "ORD-", "misc"]);
        assert_eq!(next_order_number(&existing), "ORD-0001");
    }

    #[test]
    fn test_leading_zeros_parse() {
        let existing = strings(&["ORD-0009"]);
        assert_eq!(next_order_number(&existing), "ORD-0010");
    }

    #[test]
    fn test_grows_past_four_digits() {
        let existing = strings(&["ORD-9999"]);
        assert_eq!(next_order_number(&existing), "ORD-10000");
    }
}

//! Key ordering: numeric when every key is a number, otherwise lexicographic.

/// Which ordering [`sort_keys`] applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Numeric,
    Lexicographic,
}

/// Parse the longest leading number of a key, `strtod` style.
///
/// Leading ASCII whitespace is skipped and trailing text is ignored, so
/// `"12_left"` reads as 12. `None` when no number starts the key.
fn parse_key(key: &str) -> Option<f64> {
    let s = key.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let b = s.as_bytes();
    let sign = usize::from(matches!(b.first(), Some(b'+' | b'-')));

    for word in ["infinity", "inf", "nan"] {
        let end = sign + word.len();
        if b.len() >= end && b[sign..end].eq_ignore_ascii_case(word.as_bytes()) {
            return s[..end].parse().ok();
        }
    }

    let digits = |from: usize| b[from..].iter().take_while(|c| c.is_ascii_digit()).count();
    let int = digits(sign);
    let mut end = sign + int;
    if b.get(end) == Some(&b'.') {
        let frac = digits(end + 1);
        if int + frac > 0 {
            end += 1 + frac;
        }
    }
    if end == sign {
        return None;
    }
    if matches!(b.get(end), Some(b'e' | b'E')) {
        let exp_sign = usize::from(matches!(b.get(end + 1), Some(b'+' | b'-')));
        let exp = digits(end + 1 + exp_sign);
        if exp > 0 {
            end += 1 + exp_sign + exp;
        }
    }
    s[..end].parse().ok()
}

/// Sort keys in place.
///
/// One pass parses every key. If all of them are numbers the keys are ordered
/// by value, with equal values (`"1"`, `"01"`, `"1.0"`) ordered by text. If any
/// key fails to parse, all keys are ordered by text instead.
pub fn sort_keys<S: AsRef<str>>(keys: &mut [S]) -> SortOrder {
    let parsed: Option<Vec<f64>> = keys.iter().map(|k| parse_key(k.as_ref())).collect();

    match parsed {
        Some(values) => {
            let mut order: Vec<usize> = (0..keys.len()).collect();
            order.sort_by(|&a, &b| {
                values[a]
                    .total_cmp(&values[b])
                    .then_with(|| keys[a].as_ref().cmp(keys[b].as_ref()))
            });
            apply_permutation(keys, order);
            SortOrder::Numeric
        }
        None => {
            keys.sort_by(|a, b| a.as_ref().cmp(b.as_ref()));
            SortOrder::Lexicographic
        }
    }
}

/// Reorder `items` so that position `i` holds the element previously at `order[i]`.
fn apply_permutation<T>(items: &mut [T], mut order: Vec<usize>) {
    for i in 0..items.len() {
        let mut current = i;
        while order[current] != i {
            let next = order[current];
            items.swap(current, next);
            order[current] = current;
            current = next;
        }
        order[current] = current;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric() {
        let mut keys = vec!["3", "1", "2"];
        assert_eq!(sort_keys(&mut keys), SortOrder::Numeric);
        assert_eq!(keys, ["1", "2", "3"]);
    }

    #[test]
    fn test_numeric_not_lexicographic() {
        let mut keys = vec!["10", "9", "100", "0.5"];
        assert_eq!(sort_keys(&mut keys), SortOrder::Numeric);
        assert_eq!(keys, ["0.5", "9", "10", "100"]);
    }

    #[test]
    fn test_single_bad_key_falls_back() {
        let mut keys = vec!["3", "abc", "2"];
        assert_eq!(sort_keys(&mut keys), SortOrder::Lexicographic);
        assert_eq!(keys, ["2", "3", "abc"]);

        // Lexicographic, so "10" sorts before "9"
        let mut keys = vec!["9", "10", "x"];
        sort_keys(&mut keys);
        assert_eq!(keys, ["10", "9", "x"]);
    }

    #[test]
    fn test_leading_number_is_numeric() {
        let mut keys = vec!["2", "10", "1_left"];
        assert_eq!(sort_keys(&mut keys), SortOrder::Numeric);
        assert_eq!(keys, ["1_left", "2", "10"]);
    }

    #[test]
    fn test_parse_key_prefix() {
        assert_eq!(parse_key("12_left"), Some(12.0));
        assert_eq!(parse_key("  -0.5e2x"), Some(-50.0));
        assert_eq!(parse_key("3e"), Some(3.0));
        assert_eq!(parse_key("1.5.2"), Some(1.5));
        assert_eq!(parse_key(".25"), Some(0.25));
        assert_eq!(parse_key("7."), Some(7.0));
        assert_eq!(parse_key("inf_frame"), Some(f64::INFINITY));
        assert!(parse_key("nan").is_some_and(f64::is_nan));
        assert_eq!(parse_key("abc"), None);
        assert_eq!(parse_key("-"), None);
        assert_eq!(parse_key("."), None);
        assert_eq!(parse_key("_1"), None);
        assert_eq!(parse_key(""), None);
    }

    #[test]
    fn test_numeric_ties_ordered_by_text() {
        let mut keys = vec!["1.0".to_string(), "01".to_string(), "1".to_string()];
        sort_keys(&mut keys);
        assert_eq!(keys, ["01", "1", "1.0"]);
    }

    #[test]
    fn test_empty() {
        let mut keys: Vec<&str> = Vec::new();
        assert_eq!(sort_keys(&mut keys), SortOrder::Numeric);
    }

    #[test]
    fn test_permutation_long_cycle() {
        let mut keys: Vec<String> = (0..50).rev().map(|i| i.to_string()).collect();
        sort_keys(&mut keys);
        let expected: Vec<String> = (0..50).map(|i| i.to_string()).collect();
        assert_eq!(keys, expected);
    }
}

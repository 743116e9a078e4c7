use super::params::Parameters;

/// Parse a form-encoded query string into a multi-valued parameter mapping
///
/// A single leading `?` is ignored. Pairs are separated by `&`; the value is
/// everything after the first `=` and defaults to an empty string when `=` is
/// missing. `+` decodes to a space before percent-decoding, for keys and
/// values alike. Repeated keys append rather than overwrite. Empty fragments
/// (`a=1&&b=2`) are skipped. Leading `=` signs of a fragment are dropped, so
/// `=x` and `==x` both yield `x` with an empty value.
///
/// Malformed input never fails: invalid percent escapes (`%zz`) are kept
/// verbatim, and escapes that decode to invalid UTF-8 (`%FF`) become U+FFFD.
///
/// # Example
///
/// ```rust
/// use fluroute::router::parse_query;
///
/// let q = parse_query("a=1&b=2&b=3");
/// assert_eq!(q.get_all("b"), ["2", "3"]);
/// assert_eq!(parse_query("k%20ey=va+l").get("k ey"), Some("va l"));
/// ```
#[must_use]
pub fn parse_query(raw: &str) -> Parameters {
    let raw = raw.strip_prefix('?').unwrap_or(raw);
    let mut params = Parameters::new();
    for fragment in raw.split('&') {
        let fragment = fragment.trim_start_matches('=');
        if fragment.is_empty() {
            continue;
        }
        for (key, value) in url::form_urlencoded::parse(fragment.as_bytes()) {
            params.append(key.into_owned(), value.into_owned());
        }
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_repeated_keys() {
        let q = parse_query("a=1&b=2&b=3");
        assert_eq!(q.get_all("a"), ["1"]);
        assert_eq!(q.get_all("b"), ["2", "3"]);
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn test_parse_query_missing_value() {
        let q = parse_query("a");
        assert_eq!(q.get_all("a"), [""]);
    }

    #[test]
    fn test_parse_query_decodes_plus_and_percent() {
        let q = parse_query("k%20ey=va+l");
        assert_eq!(q.get_all("k ey"), ["va l"]);
    }

    #[test]
    fn test_parse_query_encoded_plus_stays_plus() {
        let q = parse_query("expr=1%2B1");
        assert_eq!(q.get("expr"), Some("1+1"));
    }

    #[test]
    fn test_parse_query_leading_question_mark() {
        let q = parse_query("?x=1&y=2");
        assert_eq!(q.get("x"), Some("1"));
        assert_eq!(q.get("y"), Some("2"));
    }

    #[test]
    fn test_parse_query_value_keeps_later_equals() {
        let q = parse_query("filter=a=b");
        assert_eq!(q.get("filter"), Some("a=b"));
    }

    #[test]
    fn test_parse_query_tolerates_garbage() {
        let q = parse_query("&&=&bad%zz=1&");
        assert!(!q.contains_key(""));
        assert_eq!(q.get("bad%zz"), Some("1"));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_parse_query_leading_equals_keeps_key() {
        let q = parse_query("=x&==a&b=1");
        assert_eq!(q.get_all("x"), [""]);
        assert_eq!(q.get_all("a"), [""]);
        assert_eq!(q.get("b"), Some("1"));
        assert_eq!(q.keys().collect::<Vec<_>>(), ["x", "a", "b"]);
    }

    #[test]
    fn test_parse_query_invalid_utf8_escape_is_replaced() {
        let q = parse_query("%FF=1");
        assert_eq!(q.get("\u{FFFD}"), Some("1"));
    }

    #[test]
    fn test_parse_query_empty() {
        assert!(parse_query("").is_empty());
        assert!(parse_query("?").is_empty());
    }
}

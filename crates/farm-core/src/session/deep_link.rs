//! Token hand-off through the URL
//!
//! Links sent from other Farm Mall surfaces carry `?token=...`. The token is
//! taken out of the query string so it can be persisted and the address bar
//! rewritten without it.

use percent_encoding::percent_decode_str;

/// Remove `name` from a `location.search` string.
///
/// Returns the decoded value (if present and non-empty) and the remaining
/// search string, `""` or starting with `?`.
pub fn take_query_param(search: &str, name: &str) -> (Option<String>, String) {
    let query = search.strip_prefix('?').unwrap_or(search);
    let mut found = None;
    let mut rest = Vec::new();

    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if key == name {
            let decoded = percent_decode_str(&value.replace('+', " "))
                .decode_utf8_lossy()
                .into_owned();
            if found.is_none() && !decoded.is_empty() {
                found = Some(decoded);
            }
        } else {
            rest.push(pair);
        }
    }

    let remaining = if rest.is_empty() {
        String::new()
    } else {
        format!("?{}", rest.join("&"))
    };
    (found, remaining)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_takes_token_and_keeps_other_params() {
        let (token, rest) = take_query_param("?tab=cycles&token=abc%2E123&x=1", "token");
        assert_eq!(token.as_deref(), Some("abc.123"));
        assert_eq!(rest, "?tab=cycles&x=1");
    }

    #[test]
    fn test_only_param_leaves_empty_search() {
        let (token, rest) = take_query_param("?token=jwt", "token");
        assert_eq!(token.as_deref(), Some("jwt"));
        assert_eq!(rest, "");
    }

    #[test]
    fn test_missing_or_empty_param() {
        assert_eq!(take_query_param("", "token"), (None, String::new()));
        assert_eq!(take_query_param("?a=1", "token"), (None, "?a=1".to_string()));
        assert_eq!(take_query_param("?token=", "token"), (None, String::new()));
    }
}

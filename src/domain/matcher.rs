use std::sync::LazyLock;

use regex::Regex;

// 500-599 with whitespace or a line edge on both sides. Digits in URL paths,
// query strings or `key=value` pairs ("/orders/503", "code=503") are not statuses.
static SERVER_ERROR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)5[0-9]{2}(?:\s|$)").unwrap());

/// Returns true when the line carries an HTTP 5xx status token.
pub fn is_server_error(line: &str) -> bool {
    SERVER_ERROR.is_match(line)
}

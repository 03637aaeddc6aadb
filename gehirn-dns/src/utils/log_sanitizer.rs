//! Log sanitization utilities
//!
//! Response bodies can be large (full zone listings) and may carry TXT payloads such as
//! DKIM keys, so they are cut down before being written to debug/error logs.

/// Maximum number of bytes of a body included in a log line.
const TRUNCATE_LIMIT: usize = 256;

/// Truncate a string for logging on a UTF-8 boundary.
///
/// Strings within the limit are returned unchanged; longer ones keep their first
/// `TRUNCATE_LIMIT` bytes (rounded down to a char boundary) and note the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }

    let cut = s
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= TRUNCATE_LIMIT)
        .last()
        .unwrap_or(0);

    format!("{}... [truncated, total {} bytes]", &s[..cut], s.len())
}

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Escape set for OAuth parameter encoding.
///
/// Everything outside the unreserved set (ASCII letters, digits, `-`, `.`,
/// `_`, `~`) is escaped as `%XX` with uppercase hex digits. Note that this
/// is stricter than form encoding: a space becomes `%20`, never `+`.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode `input` for use in a signature base string, a signing key
/// or an `Authorization` header value.
pub(crate) fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, OAUTH_ENCODE_SET).to_string()
}

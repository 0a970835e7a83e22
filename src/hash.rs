//! Content hashing helpers.
//!
//! Every stable identifier in glossa (chunk ids, scope ids, bucket file keys,
//! lockfile checksums) is an MD5 hex digest of content. MD5 is fixed by the
//! lockfile wire format; it is used as a content fingerprint, not for security.

/// Lowercase hex MD5 digest of a string.
pub fn md5_hex(content: &str) -> String {
    format!("{:x}", md5::compute(content.as_bytes()))
}

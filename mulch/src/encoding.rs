//! Charset-name resolution and byte decoding, delegated to encoding_rs.
//!
//! This is the only module that interprets encoding labels or raw bytes.
//! The rest of the crate works on already-decoded text plus the resolved
//! encoding handle.

use std::borrow::Cow;

use encoding_rs::Encoding;

/// Resolve an IANA-style charset label ("utf-8", "us-ascii",
/// "windows-1252", "gb_2312-80", ...) against encoding_rs's label table.
pub(crate) fn resolve(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
}

/// Decode a byte buffer with the given encoding, with lossy replacement
/// for malformed sequences.
pub(crate) fn decode<'a>(bytes: &'a [u8], encoding: &'static Encoding) -> Cow<'a, str> {
    let (text, _, _) = encoding.decode(bytes);
    text
}

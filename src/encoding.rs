//! Decoding raw bytes into text using chardetng and `encoding_rs`.
//!
//! The core parser and detectors operate on already-decoded `&str`; this
//! module is the front door that turns file bytes into that text.

use std::borrow::Cow;

use chardetng::EncodingDetector;
use simdutf8::basic::from_utf8;

/// Check if the given bytes are valid UTF-8.
///
/// Uses SIMD-accelerated validation for performance.
pub fn is_utf8(data: &[u8]) -> bool {
    from_utf8(data).is_ok()
}

/// Check if the data starts with a UTF-8 BOM (Byte Order Mark).
///
/// The UTF-8 BOM is the byte sequence: EF BB BF
pub fn has_utf8_bom(data: &[u8]) -> bool {
    data.len() >= 3 && data[0] == 0xEF && data[1] == 0xBB && data[2] == 0xBF
}

/// Skip the UTF-8 BOM if present and return the remaining data.
pub fn skip_bom(data: &[u8]) -> &[u8] {
    if has_utf8_bom(data) { &data[3..] } else { data }
}

/// Information about how input bytes were decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingInfo {
    /// Whether the input was already valid UTF-8.
    pub is_utf8: bool,
    /// Whether a UTF-8 BOM was present.
    pub has_bom: bool,
    /// Whether the bytes had to be transcoded to produce the text.
    pub transcoded: bool,
}

/// Decode raw bytes into UTF-8 text.
///
/// Handles, in order: UTF-16 LE/BE BOMs (chardetng does not detect these
/// well), a UTF-8 BOM, already-valid UTF-8 (returned borrowed, zero-copy),
/// and finally a chardetng guess transcoded through `encoding_rs`. Decoding
/// is lossy: undecodable sequences become U+FFFD rather than failing, in
/// keeping with the crate's recover-don't-abort posture.
pub fn decode_lossy(data: &[u8]) -> (Cow<'_, str>, EncodingInfo) {
    // UTF-16 LE BOM: FF FE / UTF-16 BE BOM: FE FF
    if data.len() >= 2 {
        if data[0] == 0xFF && data[1] == 0xFE {
            let (decoded, _, _) = encoding_rs::UTF_16LE.decode(data);
            let info = EncodingInfo {
                is_utf8: false,
                has_bom: true,
                transcoded: true,
            };
            return (Cow::Owned(decoded.into_owned()), info);
        }
        if data[0] == 0xFE && data[1] == 0xFF {
            let (decoded, _, _) = encoding_rs::UTF_16BE.decode(data);
            let info = EncodingInfo {
                is_utf8: false,
                has_bom: true,
                transcoded: true,
            };
            return (Cow::Owned(decoded.into_owned()), info);
        }
    }

    let has_bom = has_utf8_bom(data);
    let data = skip_bom(data);

    if let Ok(text) = from_utf8(data) {
        let info = EncodingInfo {
            is_utf8: true,
            has_bom,
            transcoded: false,
        };
        return (Cow::Borrowed(text), info);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(data, true);
    let encoding = detector.guess(None, true);

    let (decoded, _, _) = encoding.decode(data);
    let info = EncodingInfo {
        is_utf8: false,
        has_bom,
        transcoded: true,
    };
    (Cow::Owned(decoded.into_owned()), info)
}

//! Charset handling for pages that arrive as raw bytes.
//!
//! A byte-order mark wins over everything else. Without one, the first
//! kilobyte is scanned for a `<meta charset>` or `http-equiv` declaration.
//! Declared UTF-16 and replacement labels read as UTF-8, and anything
//! unrecognised falls back to UTF-8.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// How much of the document is scanned for a charset declaration.
const SNIFF_LIMIT: usize = 1024;

/// `<meta charset="...">`
#[allow(clippy::expect_used)]
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s/>;]+)"#).expect("valid regex")
});

/// `<meta http-equiv="Content-Type" content="text/html; charset=...">`
#[allow(clippy::expect_used)]
static HTTP_EQUIV_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#)
        .expect("valid regex")
});

/// The encoding `html` declares, UTF-8 if it declares none we know.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return encoding;
    }

    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LIMIT)]);

    [&*HTTP_EQUIV_CHARSET, &*META_CHARSET]
        .into_iter()
        .filter_map(|re| declared_label(re, &head))
        .find_map(|label| Encoding::for_label(label.as_bytes()))
        // A declared UTF-16 or replacement label means UTF-8; only a BOM selects UTF-16
        .map_or(UTF_8, Encoding::output_encoding)
}

fn declared_label(re: &Regex, head: &str) -> Option<String> {
    re.captures(head)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Decode `html` to a UTF-8 string.
///
/// Malformed sequences become U+FFFD; this never fails.
///
/// ```
/// use rs_bcl_blocks::encoding::transcode_to_utf8;
///
/// let page = b"<meta charset=\"windows-1252\"><p>Caf\xE9</p>";
/// assert!(transcode_to_utf8(page).contains("Café"));
/// ```
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> String {
    let encoding = detect_encoding(html);
    // `decode` strips a matching BOM itself
    let (decoded, _, _) = encoding.decode(html);
    decoded.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{UTF_16LE, WINDOWS_1252};

    #[test]
    fn test_meta_charset() {
        let html = br#"<html><head><meta charset="windows-1252"></head></html>"#;
        assert_eq!(detect_encoding(html), WINDOWS_1252);
    }

    #[test]
    fn test_latin1_label_maps_to_windows_1252() {
        let html = br#"<meta charset='ISO-8859-1'>"#;
        assert_eq!(detect_encoding(html).name(), "windows-1252");
    }

    #[test]
    fn test_http_equiv_charset() {
        let html = br#"<META HTTP-EQUIV="content-type" CONTENT="text/html; CHARSET=iso-8859-1">"#;
        assert_eq!(detect_encoding(html), WINDOWS_1252);
    }

    #[test]
    fn test_unknown_label_falls_back() {
        assert_eq!(detect_encoding(br#"<meta charset="klingon">"#), UTF_8);
        assert_eq!(detect_encoding(b"<p>no declaration</p>"), UTF_8);
    }

    #[test]
    fn test_declared_utf16_reads_as_utf8() {
        assert_eq!(detect_encoding(br#"<meta charset="utf-16">"#), UTF_8);
        assert_eq!(detect_encoding(br#"<meta charset="UTF-16BE">"#), UTF_8);
        assert_eq!(detect_encoding(br#"<meta charset="iso-2022-kr">"#), UTF_8);
    }

    #[test]
    fn test_bom_beats_declaration() {
        let mut html = vec![0xFF, 0xFE];
        for unit in "<meta charset=\"windows-1252\">ok".encode_utf16() {
            html.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(detect_encoding(&html), UTF_16LE);
        assert_eq!(transcode_to_utf8(&html), "<meta charset=\"windows-1252\">ok");
    }

    #[test]
    fn test_declaration_past_sniff_limit_is_ignored() {
        let mut html = " ".repeat(SNIFF_LIMIT).into_bytes();
        html.extend_from_slice(b"<meta charset=\"windows-1252\">");
        assert_eq!(detect_encoding(&html), UTF_8);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let decoded = transcode_to_utf8(b"<p>bad \xFF byte</p>");
        assert!(decoded.contains('\u{FFFD}'));
        assert!(decoded.contains("byte"));
    }
}

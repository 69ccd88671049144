//! Doxygen search-key obfuscation and HTML entity decoding
//!
//! Doxygen derives each search key from the symbol label: lowercase ASCII
//! alphanumerics pass through, everything else becomes `_` plus two lowercase
//! hex digits of the byte (`operator!=` -> `operator_21_3d`). Uppercase
//! letters are folded to lowercase first because the search is
//! case-insensitive. Non-ASCII labels are escaped byte-wise over their UTF-8
//! encoding.

/// Compute the obfuscated key for a symbol label
pub fn obfuscate(label: &str) -> String {
    let mut key = String::with_capacity(label.len());
    for ch in label.chars().flat_map(|c| c.to_lowercase()) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            key.push(ch);
        } else {
            let mut buf = [0u8; 4];
            for byte in ch.encode_utf8(&mut buf).bytes() {
                key.push_str(&format!("_{:02x}", byte));
            }
        }
    }
    key
}

/// Recover the (lowercased) label from an obfuscated key
///
/// Returns `None` for truncated or non-hex escapes. The original case is not
/// recoverable; callers compare against `obfuscate(label)` instead when they
/// need an exact match.
pub fn deobfuscate(key: &str) -> Option<String> {
    let bytes = key.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'_' {
            if i + 2 >= bytes.len() {
                return None; // lone '_' or single hex digit at end
            }
            let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok()?;
            let byte = u8::from_str_radix(hex, 16).ok()?;
            out.push(byte);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(out).ok()
}

/// Decode the HTML entities Doxygen emits inside label and description text
pub fn decode_entities(s: &str) -> String {
    // Longest-first so &amp; does not eat the start of &amp;lt;
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Re-encode text for emission into a searchData chunk
pub fn encode_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obfuscate_operators() {
        assert_eq!(obfuscate("operator!="), "operator_21_3d");
        assert_eq!(obfuscate("operator*"), "operator_2a");
        assert_eq!(obfuscate("operator()"), "operator_28_29");
        assert_eq!(obfuscate("operator[]"), "operator_5b_5d");
        assert_eq!(obfuscate("operator<<"), "operator_3c_3c");
    }

    #[test]
    fn test_obfuscate_folds_case() {
        assert_eq!(obfuscate("Matrix"), "matrix");
        assert_eq!(obfuscate("at"), "at");
    }

    #[test]
    fn test_deobfuscate_round_trip() {
        for label in ["operator!=", "operator*", "operator[]", "begin", "size"] {
            let key = obfuscate(label);
            assert_eq!(deobfuscate(&key).as_deref(), Some(label));
        }
    }

    #[test]
    fn test_deobfuscate_rejects_malformed() {
        assert_eq!(deobfuscate("operator_"), None);
        assert_eq!(deobfuscate("operator_2"), None);
        assert_eq!(deobfuscate("operator_zz"), None);
    }

    #[test]
    fn test_entities_round_trip() {
        let raw = "operator<<(const Matrix<_Tp, _Nr, _Nc> &lhs)";
        let encoded = encode_entities(raw);
        assert_eq!(
            encoded,
            "operator&lt;&lt;(const Matrix&lt;_Tp, _Nr, _Nc&gt; &amp;lhs)"
        );
        assert_eq!(decode_entities(&encoded), raw);
    }

    #[test]
    fn test_apostrophe_round_trip() {
        assert_eq!(encode_entities("it's"), "it&#39;s");
        assert_eq!(decode_entities("it&#39;s"), "it's");
    }
}

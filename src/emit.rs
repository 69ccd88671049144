//! Deterministic re-serialization of searchData chunks
//!
//! Emission mirrors the generator's layout exactly (2-space indent, one entry
//! per line, `];` terminator) so a parse/emit cycle of a well-formed chunk is
//! byte-identical.

use crate::index::{SearchEntry, Target};
use crate::keys::encode_entities;

/// Escape a string for embedding in a single-quoted JS literal
///
/// Entity encoding has already replaced bare apostrophes, so only backslashes
/// and any apostrophe that survived (pre-encoded input) need escaping.
pub fn escape_js_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

fn emit_target(target: &Target) -> String {
    let link = if target.fragment.is_empty() {
        target.url.clone()
    } else {
        format!("{}#{}", target.url, target.fragment)
    };

    let description = if target.owner.is_empty() {
        target.description.clone()
    } else if target.description.is_empty() {
        target.owner.clone()
    } else {
        format!("{}::{}", target.owner, target.description)
    };

    format!(
        "['{}',1,'{}']",
        escape_js_string(&link),
        escape_js_string(&encode_entities(&description))
    )
}

fn emit_entry(entry: &SearchEntry) -> String {
    let mut line = format!(
        "  ['{}',['{}'",
        escape_js_string(&entry.key),
        escape_js_string(&encode_entities(&entry.label))
    );
    for target in &entry.targets {
        line.push(',');
        line.push_str(&emit_target(target));
    }
    line.push_str("]]");
    line
}

/// Serialize entries back to the searchData JS shape
pub fn emit_chunk(entries: &[SearchEntry]) -> String {
    let mut out = String::from("var searchData=\n[\n");
    for (idx, entry) in entries.iter().enumerate() {
        out.push_str(&emit_entry(entry));
        if idx + 1 < entries.len() {
            out.push(',');
        }
        out.push('\n');
    }
    out.push_str("];\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_chunk;

    #[test]
    fn test_round_trip_is_byte_identical() {
        let chunk = "var searchData=\n[\n  ['operator_21_3d',['operator!=',['../classestl_1_1matrix_1_1Matrix.html#a8546987c',1,'estl::matrix::Matrix::operator!=()'],['../classestl_1_1vector_1_1Vector.html#a5bd6f83e',1,'estl::vector::Vector::operator!=()']]],\n  ['operator_2a',['operator*',['../classestl_1_1vector_1_1Vector.html#a86b5833b',1,'estl::vector::Vector::operator*(const estl::vector::Vector&lt; _TpA, _NA &gt; &amp;lhs)']]]\n];\n";
        let entries = parse_chunk(chunk).expect("chunk should parse");
        assert_eq!(emit_chunk(&entries), chunk);
    }

    #[test]
    fn test_empty_chunk() {
        assert_eq!(emit_chunk(&[]), "var searchData=\n[\n];\n");
    }

    #[test]
    fn test_emit_is_deterministic() {
        let chunk = "var searchData=\n[\n  ['size',['size',['../classestl_1_1vector_1_1Vector.html#a1111',1,'estl::vector::Vector::size()']]]\n];\n";
        let entries = parse_chunk(chunk).unwrap();
        assert_eq!(emit_chunk(&entries), emit_chunk(&entries));
    }

    #[test]
    fn test_emit_re_encodes_entities() {
        let entries = parse_chunk(
            "var searchData=\n[\n  ['at',['at',['p.html#a2',1,'Vector&lt; _Tp &gt;::at(size_type i)']]]\n];\n",
        )
        .unwrap();
        let emitted = emit_chunk(&entries);
        assert!(emitted.contains("Vector&lt; _Tp &gt;::at(size_type i)"));
        assert!(!emitted.contains("Vector< _Tp >"));
    }
}

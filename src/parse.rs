//! Parser for Doxygen searchData chunk files
//!
//! A chunk is a JS file of the shape:
//!
//! ```text
//! var searchData=
//! [
//!   ['operator_2a',['operator*',['../classFoo.html#a1b2c',1,'Foo::operator*(int rhs)']]],
//!   ...
//! ];
//! ```
//!
//! This is not JavaScript evaluation: the generator only ever emits nested
//! single-quoted string arrays, so a small cursor-based reader over that
//! structure is enough.

use crate::index::{SearchEntry, Target};
use crate::keys::decode_entities;

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(text: &'a str) -> Self {
        Reader {
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn expect(&mut self, byte: u8) -> Result<(), String> {
        self.skip_whitespace();
        match self.peek() {
            Some(b) if b == byte => {
                self.pos += 1;
                Ok(())
            }
            Some(b) => Err(format!(
                "expected '{}' at byte {}, found '{}'",
                byte as char, self.pos, b as char
            )),
            None => Err(format!(
                "expected '{}' at byte {}, found end of input",
                byte as char, self.pos
            )),
        }
    }

    /// Consume `token` if it appears at the cursor (after whitespace)
    fn eat(&mut self, token: &str) -> bool {
        self.skip_whitespace();
        if self.bytes[self.pos..].starts_with(token.as_bytes()) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    /// Read a single-quoted string, handling `\'` and `\\` escapes
    fn read_string(&mut self) -> Result<String, String> {
        self.expect(b'\'')?;
        let mut out = Vec::new();

        loop {
            match self.peek() {
                Some(b'\'') => {
                    self.pos += 1;
                    let text = String::from_utf8(out)
                        .map_err(|_| format!("invalid UTF-8 in string ending at byte {}", self.pos))?;
                    return Ok(text);
                }
                Some(b'\\') => {
                    let escaped = self.bytes.get(self.pos + 1).copied().ok_or_else(|| {
                        format!("unterminated escape at byte {}", self.pos)
                    })?;
                    out.push(escaped);
                    self.pos += 2;
                }
                Some(b) => {
                    out.push(b);
                    self.pos += 1;
                }
                None => return Err(format!("unterminated string at byte {}", self.pos)),
            }
        }
    }

    /// Read the integer flag field between url and description
    fn read_int(&mut self) -> Result<u64, String> {
        self.skip_whitespace();
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(format!("expected integer at byte {}", start));
        }
        std::str::from_utf8(&self.bytes[start..self.pos])
            .expect("digits are ASCII")
            .parse()
            .map_err(|e| format!("bad integer at byte {}: {}", start, e))
    }
}

/// Split `url#fragment` into its parts; the fragment is empty when no `#` is
/// present (lint reports that, it is not a parse failure)
fn split_link(link: &str) -> (String, String) {
    match link.split_once('#') {
        Some((url, fragment)) => (url.to_string(), fragment.to_string()),
        None => (link.to_string(), String::new()),
    }
}

/// Split a decoded description into owning class and member text at the last
/// `::` before the first `(`. A description with no `::` there is owner-less
/// (free symbol).
fn split_description(desc: &str) -> (String, String) {
    let scope_end = desc.find('(').unwrap_or(desc.len());
    match desc[..scope_end].rfind("::") {
        Some(pos) => (desc[..pos].to_string(), desc[pos + 2..].to_string()),
        None => (String::new(), desc.to_string()),
    }
}

/// Parse one target triple: `['url#fragment',1,'description']`
fn parse_target(reader: &mut Reader) -> Result<Target, String> {
    reader.expect(b'[')?;
    let link = reader.read_string()?;
    reader.expect(b',')?;
    reader.read_int()?;
    reader.expect(b',')?;
    let raw_desc = reader.read_string()?;
    reader.expect(b']')?;

    let (url, fragment) = split_link(&link);
    let (owner, description) = split_description(&decode_entities(&raw_desc));

    Ok(Target {
        url,
        fragment,
        owner,
        description,
    })
}

/// Parse one entry: `['key',['label',target,target,...]]`
fn parse_entry(reader: &mut Reader) -> Result<SearchEntry, String> {
    reader.expect(b'[')?;
    let key = reader.read_string()?;
    reader.expect(b',')?;
    reader.expect(b'[')?;
    let label = decode_entities(&reader.read_string()?);

    let mut targets = Vec::new();
    while reader.eat(",") {
        targets.push(parse_target(reader)?);
    }

    reader.expect(b']')?;
    reader.expect(b']')?;

    Ok(SearchEntry {
        key,
        label,
        targets,
    })
}

/// Parse a whole searchData chunk file
pub fn parse_chunk(text: &str) -> Result<Vec<SearchEntry>, String> {
    let mut reader = Reader::new(text);

    if !reader.eat("var searchData=") {
        return Err("missing 'var searchData=' preamble".to_string());
    }

    reader.expect(b'[')?;
    let mut entries = Vec::new();

    reader.skip_whitespace();
    if reader.peek() != Some(b']') {
        entries.push(parse_entry(&mut reader)?);
        while reader.eat(",") {
            entries.push(parse_entry(&mut reader)?);
        }
    }

    reader.expect(b']')?;
    reader.eat(";");
    reader.skip_whitespace();

    if reader.pos != reader.bytes.len() {
        return Err(format!("trailing content at byte {}", reader.pos));
    }

    Ok(entries)
}

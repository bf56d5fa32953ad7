//! JSON encoding for documents that end up embedded in HTML pages.
//!
//! Unicode is written as-is; the characters `"`, `<`, `>`, `&` and `'` inside
//! strings are written as `\u00XX` escapes so the output is safe to inline.

use std::io;

use serde::Serialize;
use serde_json::ser::{CharEscape, CompactFormatter, Formatter, Serializer};

#[derive(Debug, Default, Clone, Copy)]
pub struct HexEscapeFormatter;

impl Formatter for HexEscapeFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let bytes = fragment.as_bytes();
        let mut start = 0;
        for (idx, ch) in fragment.char_indices() {
            let escaped: &[u8] = match ch {
                '<' => b"\\u003C",
                '>' => b"\\u003E",
                '&' => b"\\u0026",
                '\'' => b"\\u0027",
                _ => continue,
            };
            writer.write_all(&bytes[start..idx])?;
            writer.write_all(escaped)?;
            start = idx + ch.len_utf8();
        }
        writer.write_all(&bytes[start..])
    }

    fn write_char_escape<W>(&mut self, writer: &mut W, char_escape: CharEscape) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        match char_escape {
            CharEscape::Quote => writer.write_all(b"\\u0022"),
            other => CompactFormatter.write_char_escape(writer, other),
        }
    }
}

/// Serializes `value` with [`HexEscapeFormatter`].
///
/// # Errors
///
/// Returns the `serde_json` error if `value` fails to serialize.
pub fn to_embeddable_vec<T>(value: &T) -> serde_json::Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, HexEscapeFormatter);
    value.serialize(&mut serializer)?;
    Ok(out)
}

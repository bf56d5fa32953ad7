//! Entity-escaping for text that ends up in static-site front matter.
//!
//! The site generator chokes on raw unicode and markup in front matter, so
//! descriptions and names are reduced to ASCII: markup characters become
//! named entities, everything outside ASCII becomes a numeric reference.

/// Escapes `text` for front matter.
///
/// Existing entities are decoded first, so running the function twice gives
/// the same result as running it once.
#[must_use]
pub fn sanitize_text(text: &str) -> String {
    let decoded = html_escape::decode_html_entities(text);
    let mut out = String::with_capacity(decoded.len());
    for ch in decoded.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\\' => out.push_str("&#92;"),
            c if c.is_ascii() => out.push(c),
            c => out.push_str(&format!("&#{};", u32::from(c))),
        }
    }
    out
}

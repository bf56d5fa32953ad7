use quick_xml::events::Event;
use quick_xml::Reader;

/// Counts `<entry>` elements in an Atom activity feed.
///
/// # Errors
///
/// Returns the `quick_xml` error for malformed XML.
pub(crate) fn count_entries(xml: &str) -> Result<usize, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut entries = 0;
    loop {
        match reader.read_event()? {
            Event::Start(e) if e.local_name().as_ref() == b"entry" => entries += 1,
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(entries)
}

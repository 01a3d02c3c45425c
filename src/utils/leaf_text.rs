use crate::error::{FingerprintError, Result};
use quick_xml::events::Event;
use quick_xml::reader::Reader;

/// Flattens a small XML fragment to its character content.
///
/// Text and CDATA are accumulated in document order and the accumulator is
/// trimmed every time an element closes, so `<node> 'x' </node>` yields `'x'`.
/// Text outside the root element (a trailing newline, say) is ignored.
pub fn extract_leaf_text(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut data = String::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::Text(_)) | Ok(Event::CData(_)) if depth == 0 => {}
            Ok(Event::Text(text)) => {
                let unescaped = text
                    .unescape()
                    .map_err(|e| FingerprintError::Xml(e.to_string()))?;
                data.push_str(&unescaped);
            }
            Ok(Event::CData(cdata)) => {
                data.push_str(&String::from_utf8_lossy(&cdata.into_inner()));
            }
            Ok(event @ (Event::End(_) | Event::Empty(_))) => {
                if matches!(event, Event::End(_)) {
                    depth = depth.saturating_sub(1);
                }
                let trimmed = data.trim();
                if trimmed.len() != data.len() {
                    data = trimmed.to_string();
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(FingerprintError::Xml(format!(
                    "at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
        }
    }

    Ok(data)
}

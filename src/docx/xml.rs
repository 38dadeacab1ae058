//! Small helpers over the quick-xml event reader.

use crate::error::{Error, Result};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Reader;

/// Gets the local name of an element (without namespace prefix).
pub(crate) fn local_name(e: &BytesStart) -> String {
    std::str::from_utf8(e.local_name().as_ref())
        .unwrap_or("")
        .to_string()
}

pub(crate) fn local_name_end(e: &BytesEnd) -> String {
    std::str::from_utf8(e.local_name().as_ref())
        .unwrap_or("")
        .to_string()
}

/// Gets an attribute value by local name, ignoring its prefix.
pub(crate) fn attr(e: &BytesStart, name: &str) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == name.as_bytes())
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// Gets a namespaced attribute value (`r:id`, not a bare `id`).
pub(crate) fn prefixed_attr(e: &BytesStart, name: &str) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.prefix().is_some() && a.key.local_name().as_ref() == name.as_bytes())
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// Reads an OOXML on/off property such as `<w:b/>` or `<w:b w:val="0"/>`.
pub(crate) fn on_off(e: &BytesStart) -> bool {
    attr(e, "val").map_or(true, |v| is_on(&v))
}

/// Interprets an OOXML boolean attribute value.
pub(crate) fn is_on(value: &str) -> bool {
    !matches!(value, "0" | "false" | "off" | "none")
}

/// Skips an element and all its children. Call right after its Start event.
pub(crate) fn skip_element(reader: &mut Reader<&[u8]>) -> Result<()> {
    let mut depth = 1;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_start(xml: &str) -> BytesStart<'static> {
        let mut reader = Reader::from_str(xml);
        loop {
            match reader.read_event().unwrap() {
                Event::Start(e) | Event::Empty(e) => return e.into_owned(),
                Event::Eof => panic!("no element in {xml}"),
                _ => {}
            }
        }
    }

    #[test]
    fn test_local_name_and_attr() {
        let e = first_start(r#"<w:pStyle w:val="Heading1"/>"#);
        assert_eq!(local_name(&e), "pStyle");
        assert_eq!(attr(&e, "val").as_deref(), Some("Heading1"));
        assert_eq!(attr(&e, "missing"), None);
    }

    #[test]
    fn test_prefixed_attr_requires_prefix() {
        let e = first_start(r#"<v:imagedata id="shape1" r:id="rId8"/>"#);
        assert_eq!(prefixed_attr(&e, "id").as_deref(), Some("rId8"));
    }

    #[test]
    fn test_on_off_values() {
        assert!(on_off(&first_start("<w:b/>")));
        assert!(on_off(&first_start(r#"<w:b w:val="true"/>"#)));
        assert!(on_off(&first_start(r#"<w:b w:val="1"/>"#)));
        assert!(!on_off(&first_start(r#"<w:b w:val="0"/>"#)));
        assert!(!on_off(&first_start(r#"<w:i w:val="false"/>"#)));
    }

    #[test]
    fn test_skip_element() {
        let mut reader = Reader::from_str("<a><b><c/></b><d>text</d></a><after/>");
        let mut buf = Vec::new();
        // consume <a>
        reader.read_event_into(&mut buf).unwrap();
        skip_element(&mut reader).unwrap();
        buf.clear();
        match reader.read_event_into(&mut buf).unwrap() {
            Event::Empty(e) => assert_eq!(local_name(&e), "after"),
            other => panic!("unexpected event {other:?}"),
        }
    }
}

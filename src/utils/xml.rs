//! XML writing helpers built on `quick-xml`.

use anyhow::{Context, Result};
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use std::{borrow::Cow, io::Cursor};

pub type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// Whether `c` is allowed in an XML 1.0 document (the `Char` production).
const fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

/// Drop characters XML 1.0 cannot represent, even escaped.
///
/// quick-xml escapes markup characters but passes control characters
/// through, which leaves the document malformed.
pub fn xml_safe(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.chars().filter(|&c| is_xml_char(c)).collect())
}

fn push_attrs(elem: &mut BytesStart<'_>, attrs: &[(&str, &str)]) {
    for (k, v) in attrs {
        elem.push_attribute((*k, xml_safe(v).as_ref()));
    }
}

/// Create an indenting writer with the `<?xml ...?>` declaration already written.
pub fn create_xml_writer() -> Result<XmlWriter> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    Ok(writer)
}

/// Consume the writer and return the document.
pub fn finish_xml_writer(writer: XmlWriter) -> Result<String> {
    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).context("xml output is not valid utf-8")
}

/// Write a start tag with attributes: `<tag attr1="val1" ...>`.
#[inline]
pub fn write_start_elem(writer: &mut XmlWriter, tag: &str, attrs: &[(&str, &str)]) -> Result<()> {
    let mut elem = BytesStart::new(tag);
    push_attrs(&mut elem, attrs);
    writer.write_event(Event::Start(elem))?;
    Ok(())
}

/// Write an end tag: `</tag>`.
#[inline]
pub fn write_end_elem(writer: &mut XmlWriter, tag: &str) -> Result<()> {
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// Write a text element: `<tag>text</tag>`. Text is escaped and passed through [`xml_safe`].
#[inline]
pub fn write_text_element(writer: &mut XmlWriter, tag: &str, text: &str) -> Result<()> {
    write_text_element_with_attrs(writer, tag, &[], text)
}

/// Write a text element with attributes: `<tag attr="val">text</tag>`.
pub fn write_text_element_with_attrs(
    writer: &mut XmlWriter,
    tag: &str,
    attrs: &[(&str, &str)],
    text: &str,
) -> Result<()> {
    write_start_elem(writer, tag, attrs)?;
    writer.write_event(Event::Text(BytesText::new(&xml_safe(text))))?;
    write_end_elem(writer, tag)
}

/// Write an empty element with attributes: `<tag attr1="val1" ... />`.
#[inline]
pub fn write_empty_elem(writer: &mut XmlWriter, tag: &str, attrs: &[(&str, &str)]) -> Result<()> {
    let mut elem = BytesStart::new(tag);
    push_attrs(&mut elem, attrs);
    writer.write_event(Event::Empty(elem))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_text_element_escapes() {
        let mut writer = create_xml_writer().unwrap();
        write_text_element(&mut writer, "title", "a < b & c").unwrap();
        let xml = finish_xml_writer(writer).unwrap();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="utf-8"?>"#));
        assert!(xml.contains("<title>a &lt; b &amp; c</title>"));
    }

    #[test]
    fn test_write_empty_elem_attrs() {
        let mut writer = create_xml_writer().unwrap();
        write_empty_elem(&mut writer, "link", &[("href", "https://x/?a=1&b=2")]).unwrap();
        let xml = finish_xml_writer(writer).unwrap();

        assert!(xml.contains(r#"<link href="https://x/?a=1&amp;b=2"/>"#));
    }

    #[test]
    fn test_nested_elements() {
        let mut writer = create_xml_writer().unwrap();
        write_start_elem(&mut writer, "author", &[]).unwrap();
        write_text_element(&mut writer, "name", "alice").unwrap();
        write_end_elem(&mut writer, "author").unwrap();
        let xml = finish_xml_writer(writer).unwrap();

        assert!(xml.contains("<author>"));
        assert!(xml.contains("<name>alice</name>"));
        assert!(xml.contains("</author>"));
    }

    #[test]
    fn test_xml_safe() {
        assert!(matches!(xml_safe("plain\ttext\n"), Cow::Borrowed(_)));
        assert_eq!(xml_safe("a\u{1}b\u{1F}c\u{FFFE}"), "abc");
        assert_eq!(xml_safe("caf\u{e9} \u{1F600}"), "caf\u{e9} \u{1F600}");
    }

    #[test]
    fn test_control_chars_dropped_from_text_and_attrs() {
        let mut writer = create_xml_writer().unwrap();
        write_text_element_with_attrs(&mut writer, "content", &[("type", "ht\u{0}ml")], "x\u{1}y").unwrap();
        let xml = finish_xml_writer(writer).unwrap();

        assert!(xml.contains(r#"<content type="html">xy</content>"#));
        assert!(!xml.contains(['\u{0}', '\u{1}']));
    }
}

//! XHTML snapshot reader using quick-xml.

use std::borrow::Cow;
use std::io::Read;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, Result};
use crate::model::{Document, NodeId};

use super::options::ParseOptions;

/// XHTML snapshot parser.
///
/// Reads a well-formed XHTML serialization of a rendered page into a
/// [`Document`]. Whitespace is kept exactly as written so that text runs
/// reach the segmenter unchanged.
pub struct XhtmlParser {
    source: String,
    options: ParseOptions,
}

impl XhtmlParser {
    /// Open an XHTML file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open an XHTML file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Ok(Self { source, options })
    }

    /// Parse XHTML from a string.
    pub fn from_string(source: impl Into<String>) -> Self {
        Self::from_string_with_options(source, ParseOptions::default())
    }

    /// Parse XHTML from a string with custom options.
    pub fn from_string_with_options(source: impl Into<String>, options: ParseOptions) -> Self {
        Self {
            source: source.into(),
            options,
        }
    }

    /// Parse XHTML from UTF-8 bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse XHTML from UTF-8 bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let source = match std::str::from_utf8(data) {
            Ok(s) => s.to_string(),
            Err(e) if options.is_lenient() => {
                log::warn!("Input is not valid UTF-8 ({}), decoding lossily", e);
                String::from_utf8_lossy(data).into_owned()
            }
            Err(e) => return Err(Error::parse(e.valid_up_to() as u64, e.to_string())),
        };
        Ok(Self { source, options })
    }

    /// Parse XHTML from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse XHTML from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Parse the snapshot into a document tree.
    pub fn parse(&self) -> Result<Document> {
        let mut reader = Reader::from_str(&self.source);
        let config = reader.config_mut();
        config.trim_text(false);
        config.check_end_names = !self.options.is_lenient();

        let mut doc: Option<Document> = None;
        let mut doctype: Option<String> = None;
        let mut stack: Vec<NodeId> = Vec::new();

        loop {
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(e) => {
                    return Err(Error::parse(
                        reader.buffer_position() as u64,
                        e.to_string(),
                    ))
                }
            };

            match event {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    let is_empty = matches!(event, Event::Empty(_));
                    let (tag, attrs) = self.read_start(e, reader.buffer_position() as u64)?;

                    let parent = stack.last().copied();
                    let node = if let Some(d) = doc.as_mut() {
                        let Some(parent) = parent else {
                            if self.options.is_lenient() {
                                log::warn!("Ignoring second root element <{}>", tag);
                                continue;
                            }
                            return Err(Error::parse(
                                reader.buffer_position() as u64,
                                format!("second root element <{}>", tag),
                            ));
                        };
                        let id = d.create_element(tag);
                        for (name, value) in attrs {
                            d.set_attr(id, &name, &value);
                        }
                        d.append_child(parent, id);
                        id
                    } else {
                        let mut root = Document::new(tag);
                        let root_id = root.root();
                        for (name, value) in attrs {
                            root.set_attr(root_id, &name, &value);
                        }
                        doc = Some(root);
                        root_id
                    };

                    if !is_empty {
                        stack.push(node);
                    }
                }
                Event::End(_) => {
                    stack.pop();
                }
                Event::Text(ref e) => {
                    let text = match e.unescape_with(|ent| self.resolve_entity(ent)) {
                        Ok(text) => text,
                        Err(err) if self.options.is_lenient() => {
                            log::debug!("Keeping undecodable text verbatim: {}", err);
                            String::from_utf8_lossy(e)
                        }
                        Err(err) => {
                            return Err(Error::parse(
                                reader.buffer_position() as u64,
                                err.to_string(),
                            ))
                        }
                    };
                    push_text(doc.as_mut(), stack.last().copied(), &text);
                }
                Event::CData(ref e) => {
                    let text = String::from_utf8_lossy(e);
                    push_text(doc.as_mut(), stack.last().copied(), &text);
                }
                Event::Comment(ref e) => {
                    if !self.options.keep_comments {
                        continue;
                    }
                    if let (Some(d), Some(&parent)) = (doc.as_mut(), stack.last()) {
                        let comment = d.create_comment(String::from_utf8_lossy(e));
                        d.append_child(parent, comment);
                    }
                }
                Event::DocType(ref e) => {
                    doctype = Some(String::from_utf8_lossy(e).trim().to_string());
                }
                Event::Decl(_) | Event::PI(_) => {}
                Event::Eof => break,
            }
        }

        if !stack.is_empty() && !self.options.is_lenient() {
            return Err(Error::parse(
                reader.buffer_position() as u64,
                format!("{} unclosed element(s) at end of input", stack.len()),
            ));
        }

        let mut doc = doc.ok_or(Error::EmptyDocument)?;
        doc.set_doctype(doctype);
        Ok(doc)
    }

    fn read_start(
        &self,
        e: &BytesStart<'_>,
        position: u64,
    ) -> Result<(String, Vec<(String, String)>)> {
        let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
        let mut attrs = Vec::new();

        for attr in e.attributes() {
            let attr = match attr {
                Ok(attr) => attr,
                Err(err) if self.options.is_lenient() => {
                    log::warn!("Skipping malformed attribute on <{}>: {}", tag, err);
                    continue;
                }
                Err(err) => return Err(Error::parse(position, err.to_string())),
            };

            let name = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = match attr.unescape_value() {
                Ok(value) => value.into_owned(),
                Err(_) if self.options.is_lenient() => {
                    String::from_utf8_lossy(&attr.value).into_owned()
                }
                Err(err) => return Err(Error::parse(position, err.to_string())),
            };
            attrs.push((name, value));
        }

        Ok((tag, attrs))
    }

    fn resolve_entity(&self, entity: &str) -> Option<&'static str> {
        if !self.options.html_entities {
            return None;
        }
        let resolved = match entity {
            "nbsp" => "\u{00A0}",
            "copy" => "\u{00A9}",
            "reg" => "\u{00AE}",
            "trade" => "\u{2122}",
            "mdash" => "\u{2014}",
            "ndash" => "\u{2013}",
            "hellip" => "\u{2026}",
            "lsquo" => "\u{2018}",
            "rsquo" => "\u{2019}",
            "ldquo" => "\u{201C}",
            "rdquo" => "\u{201D}",
            "laquo" => "\u{00AB}",
            "raquo" => "\u{00BB}",
            "middot" => "\u{00B7}",
            "bull" => "\u{2022}",
            _ => return None,
        };
        Some(resolved)
    }
}

/// Append text under `parent`, merging with a preceding text sibling so each
/// run of character data stays a single node.
fn push_text(doc: Option<&mut Document>, parent: Option<NodeId>, text: &Cow<'_, str>) {
    let (Some(doc), Some(parent)) = (doc, parent) else {
        return;
    };
    if text.is_empty() {
        return;
    }

    if let Some(&last) = doc.children(parent).last() {
        if let Some(existing) = doc.text_mut(last) {
            existing.push_str(text);
            return;
        }
    }

    let node = doc.create_text(text.as_ref());
    doc.append_child(parent, node);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_document() {
        let doc = XhtmlParser::from_string(
            "<!DOCTYPE html><html><head></head><body><p class=\"x\">Hello <em>world</em></p></body></html>",
        )
        .parse()
        .unwrap();

        assert_eq!(doc.doctype(), Some("html"));
        let p = doc.query_tags(&["p"])[0];
        assert_eq!(doc.attr(p, "class"), Some("x"));
        assert_eq!(doc.text_content(p), "Hello world");
    }

    #[test]
    fn test_whitespace_is_preserved() {
        let doc = XhtmlParser::from_string("<p>  a \n\t b  </p>")
            .parse()
            .unwrap();
        assert_eq!(doc.text_content(doc.root()), "  a \n\t b  ");
        assert_eq!(doc.children(doc.root()).len(), 1);
    }

    #[test]
    fn test_entities_are_resolved() {
        let doc = XhtmlParser::from_string("<p>a&nbsp;b &amp; c&#8212;d</p>")
            .parse()
            .unwrap();
        assert_eq!(doc.text_content(doc.root()), "a\u{00A0}b & c\u{2014}d");
    }

    #[test]
    fn test_unknown_entity_strict_fails() {
        let result = XhtmlParser::from_string("<p>&bogus;</p>").parse();
        assert!(matches!(result, Err(Error::Parse { .. })));
    }

    #[test]
    fn test_unknown_entity_lenient_kept() {
        let doc =
            XhtmlParser::from_string_with_options("<p>&bogus;</p>", ParseOptions::new().lenient())
                .parse()
                .unwrap();
        assert_eq!(doc.text_content(doc.root()), "&bogus;");
    }

    #[test]
    fn test_mismatched_end_tag() {
        let strict = XhtmlParser::from_string("<p><b>x</i></p>").parse();
        assert!(strict.is_err());

        let lenient =
            XhtmlParser::from_string_with_options("<p><b>x</i></p>", ParseOptions::new().lenient())
                .parse();
        assert!(lenient.is_ok());
    }

    #[test]
    fn test_empty_input() {
        let result = XhtmlParser::from_string("   ").parse();
        assert!(matches!(result, Err(Error::EmptyDocument)));
    }

    #[test]
    fn test_comments_dropped_on_request() {
        let source = "<p>a<!-- note -->b</p>";
        let kept = XhtmlParser::from_string(source).parse().unwrap();
        assert_eq!(kept.children(kept.root()).len(), 3);

        let dropped =
            XhtmlParser::from_string_with_options(source, ParseOptions::new().with_comments(false))
                .parse()
                .unwrap();
        // Text on both sides of the dropped comment merges into one run
        assert_eq!(dropped.children(dropped.root()).len(), 1);
        assert_eq!(dropped.text_content(dropped.root()), "ab");
    }

    #[test]
    fn test_self_closing_elements() {
        let doc = XhtmlParser::from_string("<p>a<br/>b</p>").parse().unwrap();
        let br = doc.query_tags(&["br"])[0];
        assert!(doc.children(br).is_empty());
        assert_eq!(doc.children(doc.root()).len(), 3);
    }
}

//! Pull-style token cursor over a quick-xml event stream.
//!
//! The decoders in this crate consume XML one token at a time, bounded by
//! the depth of the element they were entered on. [`XmlTokens`] adapts
//! [`quick_xml::Reader`] to that model: it owns the current token, tracks
//! nesting depth the way a pull parser reports it, and folds non-structural
//! events (declarations, comments, processing instructions) away.
//!
//! Depth semantics: reading a start tag raises the depth; the matching end
//! tag is reported *at the depth of its element*, and the decrement takes
//! effect on the following [`XmlTokens::advance`]. Empty elements are
//! expanded into a start/end pair so that `<chat/>` and `<chat></chat>`
//! stream identically.

use std::io::BufRead;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;

use crate::error::{CodecError, Result};

/// A single structural token of the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Start of an element. Names are local names; namespace declarations
    /// are stripped from the attribute list and attribute values are
    /// unescaped.
    Start {
        name: String,
        /// Default namespace declared on this element, when present.
        namespace: Option<String>,
        attributes: Vec<(String, String)>,
    },
    /// End of an element.
    End { name: String },
    /// Character data, unescaped. Whitespace-only runs never surface.
    Text(String),
    /// End of input.
    Eof,
}

/// Forward-only cursor with pull-parser depth semantics.
///
/// A cursor is single-pass: each decoder invocation needs its own cursor
/// over its own input. Nothing is shared between cursors.
pub struct XmlTokens<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    current: Option<Token>,
    /// Synthesized end token for an empty element.
    pending: Option<Token>,
    depth: usize,
}

impl<'a> XmlTokens<&'a [u8]> {
    /// Creates a cursor over a complete in-memory document.
    pub fn from_str(xml: &'a str) -> Self {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(false);
        Self::new(reader)
    }
}

impl<R: BufRead> XmlTokens<R> {
    /// Creates a cursor over buffered input.
    pub fn from_reader(input: R) -> Self {
        let mut reader = Reader::from_reader(input);
        reader.config_mut().trim_text(false);
        Self::new(reader)
    }

    fn new(reader: Reader<R>) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            current: None,
            pending: None,
            depth: 0,
        }
    }

    /// Current nesting depth. Zero before the first element and after the
    /// root element has been left.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The token the cursor is positioned on, or `None` before the first
    /// call to [`XmlTokens::advance`].
    pub fn token(&self) -> Option<&Token> {
        self.current.as_ref()
    }

    /// Moves one structural token forward.
    ///
    /// Reaching end of input while an element is still open is a protocol
    /// violation (premature stream exhaustion).
    pub fn advance(&mut self) -> Result<&Token> {
        if let Some(Token::End { .. }) = self.current {
            self.depth -= 1;
        }

        if let Some(token) = self.pending.take() {
            return Ok(self.current.insert(token));
        }

        let token = loop {
            self.buf.clear();
            match self.reader.read_event_into(&mut self.buf)? {
                Event::Start(start) => {
                    self.depth += 1;
                    break start_token(&start)?;
                }
                Event::Empty(start) => {
                    // expand to a start/end pair, like `<chat></chat>`
                    self.depth += 1;
                    let token = start_token(&start)?;
                    if let Token::Start { name, .. } = &token {
                        self.pending = Some(Token::End { name: name.clone() });
                    }
                    break token;
                }
                Event::End(end) => {
                    break Token::End {
                        name: local_name(end.name()),
                    };
                }
                Event::Text(text) => {
                    // Literal character data. quick-xml reports entity and
                    // character references as separate `GeneralRef` events, so
                    // a text segment never carries escapes of its own and
                    // decoding is charset-only. Whitespace-only runs (e.g.
                    // inter-element indentation) never surface as tokens.
                    let value = text.decode().map_err(quick_xml::Error::from)?;
                    if value.trim().is_empty() {
                        continue;
                    }
                    break Token::Text(value.into_owned());
                }
                Event::GeneralRef(reference) => {
                    // An entity or character reference (`&amp;`, `&#60;`,
                    // `&#x3e;`). Resolve it to the character it denotes and
                    // surface it as text so it reattaches to the surrounding
                    // run.
                    let name = reference.decode().map_err(quick_xml::Error::from)?;
                    let escaped = format!("&{name};");
                    let value = quick_xml::escape::unescape(&escaped)
                        .map_err(quick_xml::Error::from)?
                        .into_owned();
                    break Token::Text(value);
                }
                Event::CData(data) => {
                    break Token::Text(String::from_utf8_lossy(&data).into_owned());
                }
                Event::Eof => {
                    if self.depth > 0 {
                        return Err(CodecError::protocol(
                            "unexpected end of stream inside an open element",
                        ));
                    }
                    break Token::Eof;
                }
                // declarations, comments, PIs and doctype carry no archive
                // content
                _ => continue,
            }
        };

        Ok(self.current.insert(token))
    }

    /// True when the cursor is positioned on an element start tag.
    pub fn is_start(&self) -> bool {
        matches!(self.current, Some(Token::Start { .. }))
    }

    /// Local name of the current start or end tag.
    pub fn local_name(&self) -> Option<&str> {
        match &self.current {
            Some(Token::Start { name, .. }) | Some(Token::End { name }) => Some(name),
            _ => None,
        }
    }

    /// Default namespace declared on the current start tag.
    pub fn namespace(&self) -> Option<&str> {
        match &self.current {
            Some(Token::Start { namespace, .. }) => namespace.as_deref(),
            _ => None,
        }
    }

    /// Attributes of the current start tag, in document order.
    pub fn attributes(&self) -> &[(String, String)] {
        match &self.current {
            Some(Token::Start { attributes, .. }) => attributes,
            _ => &[],
        }
    }

    /// Number of attributes on the current start tag.
    pub fn attribute_count(&self) -> usize {
        self.attributes().len()
    }

    /// Attribute name at position `i` of the current start tag.
    pub fn attribute_name(&self, i: usize) -> Option<&str> {
        self.attributes().get(i).map(|(name, _)| name.as_str())
    }

    /// Attribute value at position `i` of the current start tag.
    pub fn attribute_value(&self, i: usize) -> Option<&str> {
        self.attributes().get(i).map(|(_, value)| value.as_str())
    }

    /// Value of the named attribute of the current start tag.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes()
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value.as_str())
    }

    /// Advances until the cursor sits on an element start tag.
    pub fn skip_to_start(&mut self) -> Result<()> {
        loop {
            match self.advance()? {
                Token::Start { .. } => return Ok(()),
                Token::Eof => {
                    return Err(CodecError::protocol(
                        "expected an element start tag, found end of input",
                    ));
                }
                _ => {}
            }
        }
    }

    /// Guarded lookahead: asserts that the next structural token is the
    /// start of the named child element and positions the cursor on it.
    ///
    /// Anything else (the enclosing element closing, a differently named
    /// child, stray text) is a protocol violation.
    pub fn expect_child(&mut self, expected: &str) -> Result<()> {
        match self.advance()? {
            Token::Start { name, .. } if name == expected => Ok(()),
            Token::Start { name, .. } => Err(CodecError::protocol(format!(
                "expected <{expected}> child, found <{name}>"
            ))),
            Token::End { name } => Err(CodecError::protocol(format!(
                "expected <{expected}> child, found </{name}>"
            ))),
            Token::Text(_) => Err(CodecError::protocol(format!(
                "expected <{expected}> child, found text content"
            ))),
            Token::Eof => Err(CodecError::protocol(format!(
                "expected <{expected}> child, found end of input"
            ))),
        }
    }

    /// Reads the text content of the element the cursor sits on, consuming
    /// tokens up to and including the matching end tag.
    ///
    /// Returns the empty string for an element without content. A child
    /// element is a protocol violation: archive text elements never nest.
    pub fn read_text(&mut self) -> Result<String> {
        let element = match &self.current {
            Some(Token::Start { name, .. }) => name.clone(),
            _ => {
                return Err(CodecError::protocol(
                    "text content can only be read from a start tag",
                ));
            }
        };

        let mut content = String::new();
        loop {
            match self.advance()? {
                Token::Text(text) => content.push_str(text),
                Token::End { name } if *name == element => return Ok(content),
                Token::End { name } => {
                    return Err(CodecError::protocol(format!(
                        "mismatched end tag </{name}> inside <{element}>"
                    )));
                }
                Token::Start { name, .. } => {
                    return Err(CodecError::protocol(format!(
                        "unexpected <{name}> inside <{element}>"
                    )));
                }
                Token::Eof => {
                    return Err(CodecError::protocol(format!(
                        "end of input while reading <{element}> text"
                    )));
                }
            }
        }
    }
}

fn start_token(start: &BytesStart<'_>) -> Result<Token> {
    let mut namespace = None;
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = attr.key.as_ref();
        let value = attr
            .unescape_value()
            .map_err(quick_xml::Error::from)?
            .into_owned();
        if key == b"xmlns" {
            namespace = Some(value);
            continue;
        }
        // prefixed namespace declarations are not archive data either
        if key.starts_with(b"xmlns:") {
            continue;
        }
        let name = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        attributes.push((name, value));
    }
    Ok(Token::Start {
        name: local_name(start.name()),
        namespace,
        attributes,
    })
}

fn local_name(name: QName<'_>) -> String {
    String::from_utf8_lossy(name.local_name().as_ref()).into_owned()
}

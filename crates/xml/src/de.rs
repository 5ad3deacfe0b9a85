//! Streaming decoders for archive response stanzas.
//!
//! A decoder consumes a token cursor bounded by the depth of the element it
//! was entered on, the way an XMPP stanza parser hands a payload provider
//! exactly the element it is responsible for. Decoding ends when the cursor
//! depth returns to the entry depth; on success the cursor rests on the
//! enclosing end tag and the surrounding stanza parser can continue.

use std::io::BufRead;
use std::str::FromStr;

use tracing::{debug, trace};

use muninn_archive::{ChatList, Direction, ResultSetPage, Transcript};

use crate::error::{CodecError, Result};
use crate::stream::XmlTokens;
use crate::utils::{
    ARCHIVE_NS, BODY_TAG, CHAT_ELEMENT, COUNT_TAG, FIRST_TAG, LAST_TAG, LIST_ELEMENT, SECS_ATTR,
    START_ATTR, SUBJECT_ATTR, VERSION_ATTR, WITH_ATTR,
};

/// A stanza payload that can be decoded from a depth-bounded token stream.
pub trait FromXml: Sized {
    /// Local name of the enclosing element.
    const ELEMENT: &'static str;

    /// Namespace the enclosing element is defined in.
    const NAMESPACE: &'static str = ARCHIVE_NS;

    /// Decodes the payload from a cursor positioned on the enclosing
    /// element's start tag; `start_depth` is the cursor depth at that
    /// position.
    fn decode<R: BufRead>(tokens: &mut XmlTokens<R>, start_depth: usize) -> Result<Self>;
}

/// Decodes a payload from a complete XML document in memory.
pub fn from_xml_str<T: FromXml>(xml: &str) -> Result<T> {
    decode_root(&mut XmlTokens::from_str(xml))
}

/// Decodes a payload from buffered XML input.
pub fn from_xml_reader<T: FromXml, R: BufRead>(input: R) -> Result<T> {
    decode_root(&mut XmlTokens::from_reader(input))
}

fn decode_root<T: FromXml, R: BufRead>(tokens: &mut XmlTokens<R>) -> Result<T> {
    tokens.skip_to_start()?;
    if let Some(name) = tokens.local_name() {
        if name != T::ELEMENT {
            return Err(CodecError::protocol(format!(
                "expected <{}>, found <{}>",
                T::ELEMENT,
                name
            )));
        }
    }
    if let Some(namespace) = tokens.namespace() {
        if namespace != T::NAMESPACE {
            return Err(CodecError::protocol(format!(
                "expected <{}> in namespace {}, found {}",
                T::ELEMENT,
                T::NAMESPACE,
                namespace
            )));
        }
    }
    let start_depth = tokens.depth();
    T::decode(tokens, start_depth)
}

/// Explicit decoder state. Scanning ends exactly when the stream depth
/// returns to the depth the enclosing element started at, after at least
/// one traversal step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecoderState {
    Scanning,
    Done,
}

fn check_entry<R: BufRead>(tokens: &XmlTokens<R>, start_depth: usize, element: &str) -> Result<()> {
    if !tokens.is_start() || tokens.depth() != start_depth {
        return Err(CodecError::protocol(format!(
            "decoder for <{element}> must be entered on the element's start tag"
        )));
    }
    Ok(())
}

fn parse_number<T: FromStr>(raw: &str, field: &'static str) -> Result<T> {
    raw.trim().parse().map_err(|_| CodecError::Format {
        field,
        value: raw.to_string(),
        expected: "non-negative integer",
    })
}

/// Collects the RSM paging children as they stream past and assembles the
/// final paging state once the enclosing element closes.
#[derive(Debug, Default)]
struct PageBuilder {
    first_index: Option<u64>,
    first: Option<String>,
    last: Option<String>,
    count: Option<u64>,
}

impl PageBuilder {
    fn record_first<R: BufRead>(&mut self, tokens: &mut XmlTokens<R>) -> Result<()> {
        let index = match tokens.attribute_value(0) {
            Some(raw) => parse_number(raw, "index")?,
            None => {
                return Err(CodecError::protocol(
                    "<first> is missing its index attribute",
                ));
            }
        };
        self.first_index = Some(index);
        self.first = Some(tokens.read_text()?);
        Ok(())
    }

    fn record_last<R: BufRead>(&mut self, tokens: &mut XmlTokens<R>) -> Result<()> {
        self.last = Some(tokens.read_text()?);
        Ok(())
    }

    fn record_count<R: BufRead>(&mut self, tokens: &mut XmlTokens<R>) -> Result<()> {
        let text = tokens.read_text()?;
        self.count = Some(parse_number(&text, "count")?);
        Ok(())
    }

    fn finish(self) -> Result<Option<ResultSetPage>> {
        match (self.first_index, self.first, self.last, self.count) {
            (Some(first_index), Some(first), Some(last), Some(count)) => {
                Ok(Some(ResultSetPage {
                    first_index,
                    first,
                    last,
                    count,
                }))
            }
            (None, None, None, None) => Ok(None),
            _ => Err(CodecError::protocol(
                "incomplete result-set paging: <first>, <last> and <count> must appear together",
            )),
        }
    }
}

impl FromXml for ChatList {
    const ELEMENT: &'static str = LIST_ELEMENT;

    fn decode<R: BufRead>(tokens: &mut XmlTokens<R>, start_depth: usize) -> Result<Self> {
        check_entry(tokens, start_depth, Self::ELEMENT)?;

        let mut list = ChatList::new();
        let mut page = PageBuilder::default();
        let mut state = DecoderState::Scanning;

        while state == DecoderState::Scanning {
            if tokens.is_start() {
                let name = tokens.local_name().unwrap_or_default().to_string();
                match name.as_str() {
                    CHAT_ELEMENT => {
                        let with = match tokens.attribute_value(0) {
                            Some(value) => value.to_string(),
                            None => {
                                return Err(CodecError::protocol(
                                    "<chat> is missing its peer attribute",
                                ));
                            }
                        };
                        let start = match tokens.attribute_value(1) {
                            Some(value) => value.to_string(),
                            None => {
                                return Err(CodecError::protocol(
                                    "<chat> is missing its start attribute",
                                ));
                            }
                        };
                        list.push_chat(with, start);
                    }
                    FIRST_TAG => page.record_first(tokens)?,
                    LAST_TAG => page.record_last(tokens)?,
                    COUNT_TAG => page.record_count(tokens)?,
                    _ => {}
                }
            }

            tokens.advance()?;
            if tokens.depth() == start_depth {
                state = DecoderState::Done;
            }
        }

        list.paging = page.finish()?;
        debug!(chats = list.len(), paged = list.paging.is_some(), "decoded chat list");
        Ok(list)
    }
}

impl FromXml for Transcript {
    const ELEMENT: &'static str = CHAT_ELEMENT;

    fn decode<R: BufRead>(tokens: &mut XmlTokens<R>, start_depth: usize) -> Result<Self> {
        check_entry(tokens, start_depth, Self::ELEMENT)?;

        let mut transcript = Transcript::default();
        let mut page = PageBuilder::default();
        let mut state = DecoderState::Scanning;

        while state == DecoderState::Scanning {
            if tokens.is_start() {
                let name = tokens.local_name().unwrap_or_default().to_string();
                match name.as_str() {
                    CHAT_ELEMENT => decode_chat_attributes(&mut transcript, tokens)?,
                    FIRST_TAG => page.record_first(tokens)?,
                    LAST_TAG => page.record_last(tokens)?,
                    COUNT_TAG => page.record_count(tokens)?,
                    other => {
                        // `from` and `to` carry the direction in the tag name
                        if let Some(direction) = Direction::from_wire_name(other) {
                            decode_message(&mut transcript, tokens, direction, other)?;
                        }
                    }
                }
            }

            tokens.advance()?;
            if tokens.depth() == start_depth {
                state = DecoderState::Done;
            }
        }

        transcript.paging = page.finish()?;
        debug!(
            messages = transcript.len(),
            paged = transcript.paging.is_some(),
            "decoded transcript"
        );
        Ok(transcript)
    }
}

fn decode_chat_attributes<R: BufRead>(
    transcript: &mut Transcript,
    tokens: &XmlTokens<R>,
) -> Result<()> {
    for (name, value) in tokens.attributes() {
        match name.as_str() {
            WITH_ATTR => transcript.with = Some(value.clone()),
            START_ATTR => transcript.start = Some(value.clone()),
            SUBJECT_ATTR => transcript.subject = Some(value.clone()),
            VERSION_ATTR => transcript.version = parse_number(value, "version")?,
            _ => {}
        }
    }
    Ok(())
}

fn decode_message<R: BufRead>(
    transcript: &mut Transcript,
    tokens: &mut XmlTokens<R>,
    direction: Direction,
    tag: &str,
) -> Result<()> {
    let secs = match tokens.attribute(SECS_ATTR) {
        Some(raw) => parse_number(raw, "secs")?,
        None => {
            return Err(CodecError::protocol(format!(
                "<{tag}> is missing its 'secs' attribute"
            )));
        }
    };
    tokens.expect_child(BODY_TAG)?;
    let body = tokens.read_text()?;
    trace!(?direction, secs, "archived message decoded");
    transcript.push_message(direction, secs, body);
    Ok(())
}

//! XML encoders for archive entities and outbound queries.
//!
//! Encoding is a pure, deterministic function of entity state: the same
//! entity always renders to the same bytes. The fragments produced here are
//! complete stanza payloads; the surrounding protocol stack wraps them in
//! its own IQ envelope.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use muninn_archive::{ChatList, ListQuery, ResultSetPage, RetrieveQuery, Transcript};

use crate::error::{CodecError, Result};
use crate::utils::{
    ARCHIVE_NS, BODY_TAG, CHAT_ELEMENT, COUNT_TAG, END_ATTR, FIRST_TAG, INDEX_ATTR, LAST_TAG,
    LIST_ELEMENT, MAX_TAG, RETRIEVE_ELEMENT, RSM_NS, SECS_ATTR, SET_TAG, START_ATTR, SUBJECT_ATTR,
    VERSION_ATTR, WITH_ATTR,
};

/// A stanza payload that can be rendered to its wire XML form.
pub trait ToXml {
    /// Writes the payload as an XML fragment.
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> Result<()>;
}

/// Renders a payload to an XML string.
pub fn to_xml_string<T>(value: &T) -> Result<String>
where
    T: ToXml + ?Sized,
{
    let buffer = to_xml_vec(value)?;
    String::from_utf8(buffer)
        .map_err(|e| CodecError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Renders a payload to an XML byte vector.
pub fn to_xml_vec<T>(value: &T) -> Result<Vec<u8>>
where
    T: ToXml + ?Sized,
{
    let mut buffer = Vec::new();
    to_xml_writer(value, &mut buffer)?;
    Ok(buffer)
}

/// Renders a payload into an arbitrary writer.
pub fn to_xml_writer<T, W>(value: &T, writer: W) -> Result<()>
where
    T: ToXml + ?Sized,
    W: Write,
{
    let mut writer = Writer::new(writer);
    value.write_xml(&mut writer)
}

impl ToXml for ChatList {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut root = BytesStart::new(LIST_ELEMENT);
        root.push_attribute(("xmlns", ARCHIVE_NS));

        // empty-result shorthand: no paging, no body
        let Some(page) = &self.paging else {
            writer.write_event(Event::Empty(root))?;
            return Ok(());
        };

        writer.write_event(Event::Start(root))?;
        for chat in &self.chats {
            let mut row = BytesStart::new(CHAT_ELEMENT);
            row.push_attribute(("xmlns", ARCHIVE_NS));
            row.push_attribute((WITH_ATTR, chat.with.as_str()));
            row.push_attribute((START_ATTR, chat.start.as_str()));
            writer.write_event(Event::Empty(row))?;
        }
        write_rsm_set(writer, page, false)?;
        writer.write_event(Event::End(BytesEnd::new(LIST_ELEMENT)))?;
        Ok(())
    }
}

impl ToXml for Transcript {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        // required attributes are checked before any byte is produced
        let with = self.with.as_deref().ok_or(CodecError::Precondition {
            entity: "Transcript",
            field: "with",
        })?;
        let start = self.start.as_deref().ok_or(CodecError::Precondition {
            entity: "Transcript",
            field: "start",
        })?;

        let mut root = BytesStart::new(CHAT_ELEMENT);
        root.push_attribute(("xmlns", ARCHIVE_NS));
        root.push_attribute((WITH_ATTR, with));
        root.push_attribute((START_ATTR, start));
        if let Some(subject) = &self.subject {
            root.push_attribute((SUBJECT_ATTR, subject.as_str()));
        }
        if self.version > 0 {
            let version = self.version.to_string();
            root.push_attribute((VERSION_ATTR, version.as_str()));
        }

        // empty retrieval result: close the element with no body
        let Some(page) = &self.paging else {
            writer.write_event(Event::Empty(root))?;
            return Ok(());
        };

        writer.write_event(Event::Start(root))?;
        for message in &self.messages {
            let tag = message.direction.wire_name();
            let mut envelope = BytesStart::new(tag);
            envelope.push_attribute(("xmlns", ARCHIVE_NS));
            let secs = message.secs.to_string();
            envelope.push_attribute((SECS_ATTR, secs.as_str()));
            writer.write_event(Event::Start(envelope))?;
            write_text_element(writer, BODY_TAG, &message.body, Some(ARCHIVE_NS))?;
            writer.write_event(Event::End(BytesEnd::new(tag)))?;
        }
        write_rsm_set(writer, page, true)?;
        writer.write_event(Event::End(BytesEnd::new(CHAT_ELEMENT)))?;
        Ok(())
    }
}

impl ToXml for ListQuery {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut root = BytesStart::new(LIST_ELEMENT);
        root.push_attribute(("xmlns", ARCHIVE_NS));
        if let Some(with) = &self.with {
            root.push_attribute((WITH_ATTR, with.as_str()));
        }
        if let Some(start) = &self.start {
            root.push_attribute((START_ATTR, start.as_str()));
        }
        if let Some(end) = &self.end {
            root.push_attribute((END_ATTR, end.as_str()));
        }
        write_query_body(writer, root, LIST_ELEMENT, self.max)
    }
}

impl ToXml for RetrieveQuery {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut root = BytesStart::new(RETRIEVE_ELEMENT);
        root.push_attribute(("xmlns", ARCHIVE_NS));
        root.push_attribute((WITH_ATTR, self.with.as_str()));
        root.push_attribute((START_ATTR, self.start.as_str()));
        write_query_body(writer, root, RETRIEVE_ELEMENT, self.max)
    }
}

/// Writes the RSM `set` block of a response.
///
/// The list response leaves the children unqualified (they inherit the
/// set's namespace); the retrieve response qualifies every child
/// explicitly. Deployed archiving services expect exactly this asymmetry,
/// so both layouts are kept.
fn write_rsm_set<W: Write>(
    writer: &mut Writer<W>,
    page: &ResultSetPage,
    qualify_children: bool,
) -> Result<()> {
    let child_ns = if qualify_children { Some(RSM_NS) } else { None };

    let mut set = BytesStart::new(SET_TAG);
    set.push_attribute(("xmlns", RSM_NS));
    writer.write_event(Event::Start(set))?;

    let mut first = BytesStart::new(FIRST_TAG);
    if let Some(ns) = child_ns {
        first.push_attribute(("xmlns", ns));
    }
    let index = page.first_index.to_string();
    first.push_attribute((INDEX_ATTR, index.as_str()));
    writer.write_event(Event::Start(first))?;
    writer.write_event(Event::Text(BytesText::new(&page.first)))?;
    writer.write_event(Event::End(BytesEnd::new(FIRST_TAG)))?;

    write_text_element(writer, LAST_TAG, &page.last, child_ns)?;
    let count = page.count.to_string();
    write_text_element(writer, COUNT_TAG, &count, child_ns)?;

    writer.write_event(Event::End(BytesEnd::new(SET_TAG)))?;
    Ok(())
}

/// Writes the optional `set`/`max` block of an outbound query, or an empty
/// element when there is nothing to page.
fn write_query_body<W: Write>(
    writer: &mut Writer<W>,
    root: BytesStart<'_>,
    name: &str,
    max: Option<u32>,
) -> Result<()> {
    let Some(max) = max else {
        writer.write_event(Event::Empty(root))?;
        return Ok(());
    };

    writer.write_event(Event::Start(root))?;
    let mut set = BytesStart::new(SET_TAG);
    set.push_attribute(("xmlns", RSM_NS));
    writer.write_event(Event::Start(set))?;
    let max = max.to_string();
    write_text_element(writer, MAX_TAG, &max, None)?;
    writer.write_event(Event::End(BytesEnd::new(SET_TAG)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
    xmlns: Option<&str>,
) -> Result<()> {
    let mut element = BytesStart::new(name);
    if let Some(ns) = xmlns {
        element.push_attribute(("xmlns", ns));
    }
    writer.write_event(Event::Start(element))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

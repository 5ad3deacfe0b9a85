//! # Muninn XML Codec
//!
//! Bidirectional mapping between the `muninn-archive` entities and their
//! XEP-0136 wire XML form.
//!
//! ## Architecture
//!
//! - **Decoding**: a pull-style token cursor ([`XmlTokens`]) wraps
//!   `quick_xml::Reader`; the [`FromXml`] decoders consume it one token at
//!   a time, bounded by the depth of the element they were entered on, and
//!   rebuild the paged result entities. Termination is an explicit state
//!   machine with a depth exit predicate, so a decoder can be driven by any
//!   buffered input without a live connection.
//!
//! - **Encoding**: the [`ToXml`] implementations write `quick_xml` events
//!   directly, branching on the empty-result versus populated-result
//!   layouts. Output is deterministic.
//!
//! Decoding and encoding are synchronous, CPU-only operations. Errors
//! ([`CodecError`]) distinguish malformed numeric fields, structural
//! protocol violations and encode-time precondition failures, and
//! propagate parser errors unmodified.
//!
//! ## Example
//!
//! ```
//! use muninn_archive::ChatList;
//! use muninn_xml::{from_xml_str, to_xml_string};
//!
//! let xml = "<list xmlns='urn:xmpp:archive'>\
//!            <chat with='mary@example.com' start='2024-03-02T14:00:00Z'/>\
//!            <set xmlns='http://jabber.org/protocol/rsm'>\
//!            <first index='0'>hash-a</first><last>hash-a</last><count>1</count>\
//!            </set></list>";
//! let list: ChatList = from_xml_str(xml)?;
//! assert_eq!(list.len(), 1);
//!
//! let rendered = to_xml_string(&list)?;
//! let again: ChatList = from_xml_str(&rendered)?;
//! assert_eq!(list, again);
//! # Ok::<(), muninn_xml::CodecError>(())
//! ```

pub mod de;
pub mod error;
pub mod ser;
pub mod stream;
mod utils;

pub use de::{FromXml, from_xml_reader, from_xml_str};
pub use error::{CodecError, Result};
pub use ser::{ToXml, to_xml_string, to_xml_vec, to_xml_writer};
pub use stream::{Token, XmlTokens};
pub use utils::{ARCHIVE_NS, RSM_NS};

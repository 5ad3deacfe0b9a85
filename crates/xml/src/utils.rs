//! Namespaces and wire names shared by both directions of the codec.

/// Message-archiving namespace (XEP-0136).
pub const ARCHIVE_NS: &str = "urn:xmpp:archive";

/// Result-Set-Management namespace (XEP-0059).
pub const RSM_NS: &str = "http://jabber.org/protocol/rsm";

/// Local name of the list response (and list request) element.
pub(crate) const LIST_ELEMENT: &str = "list";

/// Local name of the retrieve response element; also the name of the chat
/// rows inside a list response.
pub(crate) const CHAT_ELEMENT: &str = "chat";

/// Local name of the retrieve request element.
pub(crate) const RETRIEVE_ELEMENT: &str = "retrieve";

pub(crate) const SET_TAG: &str = "set";
pub(crate) const FIRST_TAG: &str = "first";
pub(crate) const LAST_TAG: &str = "last";
pub(crate) const COUNT_TAG: &str = "count";
pub(crate) const MAX_TAG: &str = "max";
pub(crate) const BODY_TAG: &str = "body";

pub(crate) const WITH_ATTR: &str = "with";
pub(crate) const START_ATTR: &str = "start";
pub(crate) const END_ATTR: &str = "end";
pub(crate) const SUBJECT_ATTR: &str = "subject";
pub(crate) const VERSION_ATTR: &str = "version";
pub(crate) const SECS_ATTR: &str = "secs";
pub(crate) const INDEX_ATTR: &str = "index";

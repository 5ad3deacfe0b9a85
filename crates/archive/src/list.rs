//! Chat-list summary entities.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::paging::ResultSetPage;
use crate::timestamp;

/// One row of a chat-list summary: a conversation partner and the moment
/// the conversation started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEntry {
    /// JID of the peer the conversation was held with.
    pub with: String,

    /// Conversation start, a XEP-0082 date/time profile string.
    pub start: String,
}

impl ChatEntry {
    /// Builds an entry from its two wire attributes.
    pub fn new(with: impl Into<String>, start: impl Into<String>) -> Self {
        Self {
            with: with.into(),
            start: start.into(),
        }
    }

    /// Parses the start timestamp into a concrete instant.
    pub fn start_datetime(&self) -> chrono::ParseResult<DateTime<FixedOffset>> {
        timestamp::parse_timestamp(&self.start)
    }
}

/// Response to a "list available chats" query.
///
/// Rows keep document order; duplicates are allowed. The number of rows on
/// this page is [`ChatList::len`]; the server-side total of the full result
/// set, when the peer reports one, lives in `paging.count`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatList {
    /// Chat rows in document order.
    pub chats: Vec<ChatEntry>,

    /// Result-set paging, absent for the empty-result shorthand.
    pub paging: Option<ResultSetPage>,
}

impl ChatList {
    /// Constructs an empty chat list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a chat row, preserving document order.
    pub fn push_chat(&mut self, with: impl Into<String>, start: impl Into<String>) {
        self.chats.push(ChatEntry::new(with, start));
    }

    /// Number of chat rows on this page.
    pub fn len(&self) -> usize {
        self.chats.len()
    }

    /// True when the page carries no chat rows.
    pub fn is_empty(&self) -> bool {
        self.chats.is_empty()
    }
}

//! Retrieved chat transcript entities.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::paging::ResultSetPage;
use crate::timestamp;

/// Direction of an archived message relative to the archive owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Sent by the peer; carried in a `from` element on the wire.
    Incoming,
    /// Sent by the archive owner; carried in a `to` element on the wire.
    Outgoing,
}

impl Direction {
    /// Wire element name for this direction.
    pub fn wire_name(self) -> &'static str {
        match self {
            Direction::Incoming => "from",
            Direction::Outgoing => "to",
        }
    }

    /// Maps a wire element name back to a direction.
    pub fn from_wire_name(name: &str) -> Option<Self> {
        match name {
            "from" => Some(Direction::Incoming),
            "to" => Some(Direction::Outgoing),
            _ => None,
        }
    }
}

/// A single archived message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedMessage {
    /// Who sent the message.
    pub direction: Direction,

    /// Seconds elapsed since the start of the conversation.
    pub secs: u32,

    /// Message text.
    pub body: String,
}

/// Response to a "retrieve one chat" query: the archived conversation with
/// one peer, in conversation order.
///
/// `with` and `start` identify the collection and are mandatory on the
/// wire; the encoder refuses a transcript that lacks either. A `version`
/// of zero means the collection is unversioned and the attribute is
/// omitted when re-encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    /// JID of the conversation peer. Required when encoding.
    pub with: Option<String>,

    /// Conversation start, XEP-0082 date/time profile. Required when
    /// encoding.
    pub start: Option<String>,

    /// Human-readable conversation subject.
    pub subject: Option<String>,

    /// Collection version; zero means unversioned.
    pub version: u32,

    /// Messages in conversation order.
    pub messages: Vec<ArchivedMessage>,

    /// Result-set paging, absent for the empty-result shorthand.
    pub paging: Option<ResultSetPage>,
}

impl Transcript {
    /// Constructs a transcript for the given collection.
    pub fn new(with: impl Into<String>, start: impl Into<String>) -> Self {
        Self {
            with: Some(with.into()),
            start: Some(start.into()),
            ..Self::default()
        }
    }

    /// Appends a message, preserving conversation order.
    pub fn push_message(&mut self, direction: Direction, secs: u32, body: impl Into<String>) {
        self.messages.push(ArchivedMessage {
            direction,
            secs,
            body: body.into(),
        });
    }

    /// Number of messages in the transcript.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// True when the transcript carries no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Parses the collection start timestamp, when one is set.
    pub fn start_datetime(&self) -> Option<chrono::ParseResult<DateTime<FixedOffset>>> {
        self.start.as_deref().map(timestamp::parse_timestamp)
    }
}

//! Outbound archive query parameters.
//!
//! These are the request halves of the list/retrieve exchange. They carry
//! only trivial state; the interesting work happens on the response path.

use serde::{Deserialize, Serialize};

/// Parameters of a "list available chats" request.
///
/// All filters are optional; an empty query asks for every collection the
/// archive holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Restrict the listing to conversations with this JID.
    pub with: Option<String>,

    /// Only collections starting at or after this instant.
    pub start: Option<String>,

    /// Only collections starting before this instant.
    pub end: Option<String>,

    /// Result-set page size limit.
    pub max: Option<u32>,
}

impl ListQuery {
    /// Constructs an unfiltered listing query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a listing query restricted to one peer.
    pub fn for_peer(with: impl Into<String>) -> Self {
        Self {
            with: Some(with.into()),
            ..Self::default()
        }
    }
}

/// Parameters of a "retrieve one chat" request. The target collection is
/// identified by peer JID and start timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrieveQuery {
    /// JID of the conversation peer.
    pub with: String,

    /// Start timestamp of the collection to retrieve.
    pub start: String,

    /// Result-set page size limit.
    pub max: Option<u32>,
}

impl RetrieveQuery {
    /// Constructs a retrieval query for the given collection.
    pub fn new(with: impl Into<String>, start: impl Into<String>) -> Self {
        Self {
            with: with.into(),
            start: start.into(),
            max: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_peer_sets_only_the_peer() {
        let query = ListQuery::for_peer("mary@example.com");
        assert_eq!(query.with.as_deref(), Some("mary@example.com"));
        assert!(query.start.is_none());
        assert!(query.end.is_none());
        assert!(query.max.is_none());
    }

    #[test]
    fn test_retrieve_query_new() {
        let mut query = RetrieveQuery::new("mary@example.com", "2024-03-02T14:00:00Z");
        assert_eq!(query.with, "mary@example.com");
        query.max = Some(30);
        assert_eq!(query.max, Some(30));
    }
}

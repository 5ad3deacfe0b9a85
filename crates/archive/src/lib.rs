//! # Muninn Archive Entities
//!
//! Passive data holders for the XEP-0136 message-archiving exchange:
//!
//! - [`ChatList`]: the response to a "list available chats" query, a
//!   sequence of [`ChatEntry`] rows plus optional result-set paging.
//! - [`Transcript`]: the response to a "retrieve one chat" query, the
//!   archived conversation with direction-tagged [`ArchivedMessage`] bodies.
//! - [`ResultSetPage`]: XEP-0059 Result-Set-Management paging metadata,
//!   carried by both response kinds.
//! - [`ListQuery`] / [`RetrieveQuery`]: outbound request parameters.
//!
//! Entities know nothing about XML or transport. They are constructed
//! empty, populated by a decoder or by the producing caller, and handed to
//! consumers read-only; the wire codec lives in the `muninn-xml` crate and
//! the surrounding protocol stack adapts entities to its own stanza types
//! at the boundary.

pub mod list;
pub mod paging;
pub mod query;
pub mod timestamp;
pub mod transcript;

pub use list::{ChatEntry, ChatList};
pub use paging::ResultSetPage;
pub use query::{ListQuery, RetrieveQuery};
pub use transcript::{ArchivedMessage, Direction, Transcript};

//! Result-Set-Management paging metadata.

use serde::{Deserialize, Serialize};

/// Position of a returned page within the full, ordered result set
/// (XEP-0059 Result-Set-Management).
///
/// Paging travels as a whole or not at all: an archive response either
/// carries the complete `first`/`last`/`count` triple inside a `set` block
/// or omits the block entirely. Entities therefore hold an
/// `Option<ResultSetPage>`: a partially populated page cannot be
/// represented, and the decoders reject stanzas that ship one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSetPage {
    /// Zero-based index of the first returned item within the full set.
    pub first_index: u64,

    /// Key identifying the first item of this page.
    pub first: String,

    /// Key identifying the last item of this page.
    pub last: String,

    /// Total number of items in the full, unpaged result set. This is the
    /// server-side total and may exceed the number of items on the page.
    pub count: u64,
}

impl ResultSetPage {
    /// Builds a page descriptor from its four wire components.
    pub fn new(
        first_index: u64,
        first: impl Into<String>,
        last: impl Into<String>,
        count: u64,
    ) -> Self {
        Self {
            first_index,
            first: first.into(),
            last: last.into(),
            count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_populates_all_fields() {
        let page = ResultSetPage::new(3, "k3", "k12", 40);
        assert_eq!(page.first_index, 3);
        assert_eq!(page.first, "k3");
        assert_eq!(page.last, "k12");
        assert_eq!(page.count, 40);
    }
}

//! Cache entry with its position in the recency list.

/// Stable handle to a slot in the entry arena.
///
/// Handles stay valid until the entry is unlinked and its slot freed; they
/// never leave the storage layer.
pub(crate) type Handle = usize;

/// A single cache entry: the key/value pair plus its recency links.
///
/// `prev` points towards the most recently used end of the list, `next`
/// towards the least recently used end.
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    /// The key this entry is indexed under. Never empty.
    pub(crate) key: String,

    /// The stored value.
    pub(crate) value: String,

    pub(crate) prev: Option<Handle>,
    pub(crate) next: Option<Handle>,
}

impl Entry {
    /// Create a detached entry (no neighbours).
    pub fn new(key: String, value: String) -> Self {
        Self {
            key,
            value,
            prev: None,
            next: None,
        }
    }

    /// Clear both links.
    pub fn detach(&mut self) {
        self.prev = None;
        self.next = None;
    }
}

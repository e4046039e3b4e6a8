//! Bidirectional node index.

use std::collections::HashMap;

use crate::types::NetworkError;

/// Bijection between point ids and dense positions `[0, N)`.
///
/// Positions are assigned in order of first appearance, so the index built
/// from the same flow list is always identical.
///
/// # Examples
///
/// ```
/// use gravity_core::network::NodeIndex;
///
/// let mut index = NodeIndex::new();
/// assert_eq!(index.insert("B"), 0);
/// assert_eq!(index.insert("A"), 1);
/// assert_eq!(index.insert("B"), 0);
///
/// assert_eq!(index.position("A").unwrap(), 1);
/// assert_eq!(index.id(0), Some("B"));
/// assert!(index.position("C").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeIndex {
    ids: Vec<String>,
    positions: HashMap<String, usize>,
}

impl NodeIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from ids in iteration order, skipping repeats.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::new();
        for id in ids {
            index.insert(id.as_ref());
        }
        index
    }

    /// Insert an id, returning its position. Existing ids keep their position.
    pub fn insert(&mut self, id: &str) -> usize {
        if let Some(&pos) = self.positions.get(id) {
            return pos;
        }
        let pos = self.ids.len();
        self.ids.push(id.to_string());
        self.positions.insert(id.to_string(), pos);
        pos
    }

    /// Position of an id.
    ///
    /// # Errors
    ///
    /// `NetworkError::UnknownNode` if the id is not indexed.
    pub fn position(&self, id: &str) -> Result<usize, NetworkError> {
        self.get(id).ok_or_else(|| NetworkError::unknown_node(id))
    }

    /// Position of an id, if indexed.
    #[inline]
    pub fn get(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Id stored at a position.
    #[inline]
    pub fn id(&self, position: usize) -> Option<&str> {
        self.ids.get(position).map(String::as_str)
    }

    /// All ids in position order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Number of indexed nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate `(position, id)` in position order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.ids.iter().enumerate().map(|(i, id)| (i, id.as_str()))
    }
}

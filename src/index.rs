use std::collections::BTreeMap;

use tracing::warn;

use crate::Node;

/// Maps record pointers to the position of their top-level record.
#[derive(Debug, Clone, Default)]
pub struct PointerIndex {
    index: BTreeMap<String, usize>,
}

impl PointerIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the pointers of the given top-level records.
    ///
    /// When a pointer is used twice the first record keeps it.
    pub fn from_nodes(nodes: &[Node]) -> Self {
        let mut index = Self::new();

        for (position, node) in nodes.iter().enumerate() {
            if !node.has_pointer() {
                continue;
            }
            if index.contains(node.pointer()) {
                warn!("Duplicate record pointer @{}@", node.pointer());
                continue;
            }
            index.insert(node.pointer(), position);
        }

        index
    }

    pub fn insert(&mut self, pointer: &str, position: usize) -> Option<usize> {
        self.index.insert(pointer.to_owned(), position)
    }

    pub fn get(&self, pointer: &str) -> Option<usize> {
        self.index.get(pointer).copied()
    }

    pub fn contains(&self, pointer: &str) -> bool {
        self.index.contains_key(pointer)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Pointers in sorted order.
    pub fn pointers(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }
}

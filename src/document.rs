use std::str::FromStr;

use crate::{
    codec::{self, Decoder, Encoder},
    compare::{deep_equal_nodes, is_pointer},
    display::Outline,
    error::ParseError,
    hash::FingerprintIndex,
    index::PointerIndex,
    iterator::NodeIter,
    node::{normalize_pointer, typed::FamilyNode, typed::IndividualNode},
    Node,
};

/// An ordered collection of top-level records, as read from one file.
///
/// Record order is kept as inserted and is significant for comparison and
/// rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Decode a document with a configured [`Decoder`].
    pub fn decode(text: &str, decoder: &Decoder) -> Result<Self, ParseError> {
        decoder.decode(text).map(Self::from_nodes)
    }

    /// Append an `INDI` record with the given pointer and children.
    ///
    /// ```
    /// use pedigree::{Document, Node};
    ///
    /// let document = Document::new().add_individual(
    ///     "P1",
    ///     [
    ///         Node::name("Elliot /Chance/"),
    ///         Node::birth("").with_children([Node::date("6 MAY 1989")]),
    ///     ],
    /// );
    ///
    /// assert_eq!(
    ///     document.to_string(),
    ///     "0 @P1@ INDI\n1 NAME Elliot /Chance/\n1 BIRT\n2 DATE 6 MAY 1989\n"
    /// );
    /// ```
    pub fn add_individual(
        mut self,
        pointer: impl AsRef<str>,
        children: impl IntoIterator<Item = Node>,
    ) -> Self {
        self.nodes
            .push(Node::individual(pointer).with_children(children));
        self
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth-first iterator over every node in file order.
    pub fn iter(&self) -> NodeIter<'_> {
        NodeIter::new(&self.nodes)
    }

    pub fn individuals(&self) -> impl Iterator<Item = IndividualNode<'_>> {
        self.nodes.iter().filter_map(Node::as_individual)
    }

    pub fn families(&self) -> impl Iterator<Item = FamilyNode<'_>> {
        self.nodes.iter().filter_map(Node::as_family)
    }

    /// Build an index from pointer to top-level position.
    pub fn pointer_index(&self) -> PointerIndex {
        PointerIndex::from_nodes(&self.nodes)
    }

    /// Top-level record with the given pointer, with or without `@` delimiters.
    pub fn record(&self, pointer: &str) -> Option<&Node> {
        let pointer = normalize_pointer(pointer);
        self.nodes.iter().find(|node| node.pointer() == pointer)
    }

    /// Follow a pointer-valued node, such as `FAMS @F1@`, to its record.
    pub fn resolve(&self, node: &Node) -> Option<&Node> {
        if !is_pointer(node.value()) {
            return None;
        }
        self.record(node.value())
    }

    /// Render with default options.
    pub fn render(&self) -> String {
        codec::render_nodes(&self.nodes)
    }

    pub fn render_with(&self, encoder: &Encoder) -> String {
        encoder.encode(&self.nodes)
    }

    /// Pointer-tolerant comparison of every top-level record, in order.
    pub fn deep_equals(&self, other: &Document) -> bool {
        deep_equal_nodes(&self.nodes, &other.nodes)
    }

    /// Records of each document that have no equivalent in the other.
    pub fn diff<'a>(&'a self, other: &'a Document) -> RecordDiff<'a> {
        let left = FingerprintIndex::new(&self.nodes);
        let right = FingerprintIndex::new(&other.nodes);

        RecordDiff {
            only_left: left.unmatched(&right),
            only_right: right.unmatched(&left),
        }
    }

    /// Box-drawn outline of the tree, for display.
    pub fn outline(&self) -> Outline<'_> {
        Outline::new(self)
    }
}

impl FromStr for Document {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        codec::parse_str(s)
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<Vec<Node>> for Document {
    fn from(nodes: Vec<Node>) -> Self {
        Self::from_nodes(nodes)
    }
}

impl Extend<Node> for Document {
    fn extend<T: IntoIterator<Item = Node>>(&mut self, iter: T) {
        self.nodes.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// Result of [`Document::diff`].
///
/// Matching is by content: a record matches if the other document contains
/// any deep-equal record. Repeated identical records all match a single
/// counterpart.
#[derive(Debug, Clone, Default)]
pub struct RecordDiff<'a> {
    pub only_left: Vec<&'a Node>,
    pub only_right: Vec<&'a Node>,
}

impl RecordDiff<'_> {
    pub fn is_empty(&self) -> bool {
        self.only_left.is_empty() && self.only_right.is_empty()
    }
}

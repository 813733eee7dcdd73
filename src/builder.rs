//! Builders for constructing documents and nodes.
//!
//! The `DocumentBuilder` and `NodeBuilder` types build record trees in a
//! composable way, mirroring the nesting of the text format.
//!

use std::marker::PhantomData;

use tracing::{debug, debug_span};

use crate::{Document, Node, Tag};

/// A builder for adding children to a node.
///
/// Handed to the closures passed to [`DocumentBuilder::record`] and
/// [`NodeBuilder::child`].
pub struct NodeBuilder<'a, E> {
    node: &'a mut Node,
    depth: usize,
    _phantom: PhantomData<E>,
}

impl<'a, E> NodeBuilder<'a, E> {
    fn new(node: &'a mut Node, depth: usize) -> Self {
        Self {
            node,
            depth,
            _phantom: PhantomData,
        }
    }

    /// Adds a child to the current node.
    ///
    /// # Arguments
    ///
    /// * `tag`: Tag of the child.
    /// * `value`: Value of the child, may be empty.
    /// * `f`: A closure that takes the child builder and adds its own children.
    pub fn child<F>(&mut self, tag: impl Into<Tag>, value: impl Into<String>, f: F) -> Result<(), E>
    where
        F: FnOnce(&mut NodeBuilder<'_, E>) -> Result<(), E>,
    {
        self.push(Node::new(tag, value, ""), f)
    }

    /// Adds a child without children of its own.
    pub fn leaf(&mut self, tag: impl Into<Tag>, value: impl Into<String>) -> Result<(), E> {
        self.child(tag, value, |_| Ok(()))
    }

    /// Adds an already constructed subtree.
    pub fn subtree(&mut self, node: Node) {
        self.node.push_child(node);
    }

    fn push<F>(&mut self, mut child: Node, f: F) -> Result<(), E>
    where
        F: FnOnce(&mut NodeBuilder<'_, E>) -> Result<(), E>,
    {
        let depth = self.depth + 1;
        let mut child_builder = NodeBuilder::new(&mut child, depth);

        // Call the supplied closure with the NodeBuilder to add this node's children
        f(&mut child_builder)?;

        debug!("Add {} at depth {}", child.tag(), depth);
        self.node.push_child(child);

        Ok(())
    }

    pub fn node(&self) -> &Node {
        self.node
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// A builder for constructing documents.
///
/// Each call to [`record`](Self::record) appends a top-level record and calls
/// the provided closure with a NodeBuilder for its children. The closures
/// return `Result<(), E>` where E is your error type, so errors within them
/// propagate out of the builder.
///
/// # Examples
///
/// ```
/// use pedigree::{DocumentBuilder, Tag};
///
/// let document = DocumentBuilder::<()>::new()
///     .individual("P1", |indi| {
///         indi.leaf(Tag::NAME, "Elliot /Chance/")?;
///         indi.child(Tag::BIRTH, "", |birth| birth.leaf(Tag::DATE, "6 MAY 1989"))
///     })
///     .and_then(|builder| builder.done())
///     .unwrap();
///
/// assert_eq!(document.len(), 1);
/// ```
#[derive(Debug)]
pub struct DocumentBuilder<E> {
    nodes: Vec<Node>,
    debug_span: tracing::Span,
    _phantom: PhantomData<E>,
}

impl<E> Default for DocumentBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> DocumentBuilder<E> {
    /// Creates a new `DocumentBuilder` instance.
    pub fn new() -> Self {
        let debug_span = debug_span!("DocumentBuilder");
        debug_span.in_scope(|| debug!("Created new DocumentBuilder"));

        Self {
            nodes: Vec::new(),
            debug_span,
            _phantom: PhantomData,
        }
    }

    /// Adds a top-level record and returns the updated builder.
    ///
    /// # Arguments
    ///
    /// * `tag`: Tag of the record, e.g. `INDI`.
    /// * `pointer`: Record identifier, with or without the `@` delimiters.
    /// * `value`: Record value, usually empty.
    /// * `f`: A closure that takes the record builder and adds its children.
    pub fn record<F>(
        mut self,
        tag: impl Into<Tag>,
        pointer: impl AsRef<str>,
        value: impl Into<String>,
        f: F,
    ) -> Result<Self, E>
    where
        F: FnOnce(&mut NodeBuilder<'_, E>) -> Result<(), E>,
    {
        let mut node = Node::new(tag, value, pointer);

        self.debug_span.in_scope(|| -> Result<(), E> {
            let mut node_builder = NodeBuilder::new(&mut node, 0);
            f(&mut node_builder)?;

            debug!("Added record {} @{}@", node.tag(), node.pointer());
            Ok(())
        })?;

        self.nodes.push(node);
        Ok(self)
    }

    pub fn individual<F>(self, pointer: impl AsRef<str>, f: F) -> Result<Self, E>
    where
        F: FnOnce(&mut NodeBuilder<'_, E>) -> Result<(), E>,
    {
        self.record(Tag::INDIVIDUAL, pointer, "", f)
    }

    pub fn family<F>(self, pointer: impl AsRef<str>, f: F) -> Result<Self, E>
    where
        F: FnOnce(&mut NodeBuilder<'_, E>) -> Result<(), E>,
    {
        self.record(Tag::FAMILY, pointer, "", f)
    }

    /// Returns the constructed document when finished building it.
    pub fn done(self) -> Result<Document, E> {
        self.debug_span.in_scope(|| {
            debug!("Finished building document");
            Ok(Document::from_nodes(self.nodes))
        })
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;
    use crate::test::sample_document;

    #[derive(Debug, PartialEq)]
    enum MyError {
        Fail(String),
    }

    #[traced_test]
    #[test]
    fn test_builder() {
        let document = DocumentBuilder::<MyError>::new()
            .individual("P1", |indi| {
                indi.leaf(Tag::NAME, "Elliot /Chance/")?;
                indi.child(Tag::BIRTH, "", |birth| birth.leaf(Tag::DATE, "6 MAY 1989"))?;
                Ok(())
            })
            .unwrap()
            .done()
            .unwrap();

        assert_eq!(document, sample_document());
        assert!(logs_contain("Added record INDI @P1@"));
    }

    #[test]
    fn test_depths() {
        let document = DocumentBuilder::<MyError>::new()
            .record(Tag::HEADER, "", "", |head| {
                assert_eq!(head.depth(), 0);
                head.child(Tag::GEDCOM, "", |gedc| {
                    assert_eq!(gedc.depth(), 1);
                    gedc.child(Tag::VERSION, "5.5.1", |vers| {
                        assert_eq!(vers.depth(), 2);
                        assert_eq!(vers.node().value(), "5.5.1");
                        Ok(())
                    })
                })
            })
            .unwrap()
            .family("F1", |fam| {
                fam.leaf(Tag::HUSBAND, "@P1@")?;
                fam.subtree(Node::new(Tag::CHILD, "@P2@", ""));
                Ok(())
            })
            .unwrap()
            .done()
            .unwrap();

        assert_eq!(
            document.render(),
            "0 HEAD\n1 GEDC\n2 VERS 5.5.1\n0 @F1@ FAM\n1 HUSB @P1@\n1 CHIL @P2@\n"
        );
    }

    #[test]
    fn test_error_propagates() {
        let result = DocumentBuilder::<MyError>::new().individual("P1", |indi| {
            indi.child(Tag::BIRTH, "", |_| Err(MyError::Fail("no date".into())))
        });

        assert_eq!(result.err(), Some(MyError::Fail("no date".into())));
    }
}

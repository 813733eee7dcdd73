use std::{collections::VecDeque, ops::Deref};

use crate::Node;

/// A node yielded by [`NodeIter`], with its depth relative to the start of iteration.
#[derive(Debug, Clone, Copy)]
pub struct IterNode<'iter> {
    depth: usize,
    node: &'iter Node,
}

impl<'iter> IterNode<'iter> {
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn node(&self) -> &'iter Node {
        self.node
    }
}

impl Deref for IterNode<'_> {
    type Target = Node;

    fn deref(&self) -> &Self::Target {
        self.node
    }
}

/// Depth-first pre-order iterator over a sequence of sibling trees.
///
/// Nodes are yielded in file order: a parent before its children, children in
/// their stored order, and each top-level tree after the previous one is exhausted.
pub struct NodeIter<'iter> {
    stack: VecDeque<(usize, &'iter Node)>,
}

impl<'iter> NodeIter<'iter> {
    pub fn new(nodes: &'iter [Node]) -> Self {
        Self {
            stack: nodes.iter().map(|node| (0, node)).collect(),
        }
    }
}

impl<'iter> Iterator for NodeIter<'iter> {
    type Item = IterNode<'iter>;

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop_front()?;

        node.children()
            .iter()
            .rev()
            .for_each(|child| self.stack.push_front((depth + 1, child)));

        Some(IterNode { depth, node })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tag;

    #[test]
    fn pre_order_with_depths() {
        let nodes = vec![
            Node::individual("P1").with_children([
                Node::name("Elliot /Chance/"),
                Node::birth("").with_children([Node::date("6 MAY 1989")]),
            ]),
            Node::individual("P2"),
        ];

        let visited: Vec<(usize, &str)> = NodeIter::new(&nodes)
            .map(|n| (n.depth(), n.node().tag().as_str()))
            .collect();

        assert_eq!(
            visited,
            vec![
                (0, "INDI"),
                (1, "NAME"),
                (1, "BIRT"),
                (2, "DATE"),
                (0, "INDI"),
            ]
        );
    }

    #[test]
    fn empty_sequence() {
        assert_eq!(NodeIter::new(&[]).count(), 0);
    }

    #[test]
    fn single_node_iter() {
        let node = Node::new(Tag::NOTE, "hello", "");
        let all: Vec<_> = node.iter().collect();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].value(), "hello");
        assert_eq!(all[0].depth(), 0);
    }
}

use std::{
    collections::HashMap,
    hash::{Hash as _, Hasher},
};

use xxhash_rust::xxh64::Xxh64;

use crate::{compare::is_pointer, deep_equal, Node};

// Written before a value so that a plain value can never hash like a pointer
const PLAIN_VALUE: u8 = 0;
const POINTER_VALUE: u8 = 1;

/// Content hash of a tree, consistent with [`deep_equal`].
///
/// Node pointers are skipped and every pointer-shaped value hashes the same,
/// so trees that are deep-equal always share a fingerprint. Child order is
/// significant.
pub fn fingerprint(node: &Node) -> u64 {
    let mut hasher = Xxh64::new(0);
    hash_content(node, &mut hasher);
    hasher.finish()
}

// Pre-order over the tree, so each child list follows its parent's count
fn hash_content(node: &Node, state: &mut impl Hasher) {
    for node in node.iter() {
        node.tag().hash(state);

        if is_pointer(node.value()) {
            state.write_u8(POINTER_VALUE);
        } else {
            state.write_u8(PLAIN_VALUE);
            node.value().hash(state);
        }

        state.write_usize(node.num_children());
    }
}

/// Fingerprints of a sequence of top-level records, for finding records with
/// equivalent content in another sequence.
#[derive(Debug)]
pub struct FingerprintIndex<'a> {
    nodes: &'a [Node],
    buckets: HashMap<u64, Vec<usize>>,
}

impl<'a> FingerprintIndex<'a> {
    pub fn new(nodes: &'a [Node]) -> Self {
        let mut buckets: HashMap<u64, Vec<usize>> = HashMap::new();
        for (position, node) in nodes.iter().enumerate() {
            buckets.entry(fingerprint(node)).or_default().push(position);
        }

        Self { nodes, buckets }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of distinct fingerprints.
    pub fn unique(&self) -> usize {
        self.buckets.len()
    }

    /// First indexed record deep-equal to `node`.
    ///
    /// The fingerprint only narrows the candidates; each is confirmed with
    /// [`deep_equal`].
    pub fn find(&self, node: &Node) -> Option<&'a Node> {
        let nodes = self.nodes;
        self.buckets
            .get(&fingerprint(node))?
            .iter()
            .map(|&position| &nodes[position])
            .find(|candidate| deep_equal(Some(*candidate), Some(node)))
    }

    /// Records in this index with no equivalent in `other`, in order.
    pub fn unmatched(&self, other: &FingerprintIndex<'_>) -> Vec<&'a Node> {
        self.nodes
            .iter()
            .filter(|node| other.find(node).is_none())
            .collect()
    }
}

//! Pointer-tolerant tree comparison.
//!
//! Two exports of the same data assign unrelated record identifiers, so the
//! comparison skips a node's own pointer and treats any two pointer-shaped
//! values as equal. Tags, plain values and child order must match exactly.

use colored::Colorize;
use tracing::{debug, trace};

use crate::Node;

/// Whether a value has the `@identifier@` form of a record reference.
pub fn is_pointer(value: &str) -> bool {
    value.len() >= 3 && value.starts_with('@') && value.ends_with('@')
}

/// Value equality where any two pointer-shaped values are equal.
///
/// A plain value that happens to look like a pointer is also treated as a
/// wildcard; the format gives no way to tell the two apart.
pub fn values_equal(a: &str, b: &str) -> bool {
    (is_pointer(a) && is_pointer(b)) || a == b
}

/// Compare two possibly absent trees.
///
/// Two absent nodes are equal and an absent node never equals a present one.
/// Otherwise see [`deep_equal_nodes`] for the rules applied at every level.
pub fn deep_equal(a: Option<&Node>, b: Option<&Node>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => node_equal(a, b),
        _ => {
            trace!("{}", "Only one side is present".yellow());
            false
        }
    }
}

/// Compare two sibling sequences pairwise, in order.
///
/// Sequences must have the same length. For each pair the tags must match,
/// values must match under [`values_equal`], node pointers are ignored and the
/// children are compared recursively by the same rules.
pub fn deep_equal_nodes(a: &[Node], b: &[Node]) -> bool {
    if !same_len(a, b) {
        return false;
    }

    a.iter().zip(b).all(|(a, b)| node_equal(a, b))
}

fn same_len(a: &[Node], b: &[Node]) -> bool {
    if a.len() != b.len() {
        debug!(
            "{} {} != {}",
            "Child count mismatch".bright_blue(),
            a.len(),
            b.len()
        );
        return false;
    }
    true
}

// Walks both trees with an explicit stack so nesting depth is not bounded by
// the thread stack.
fn node_equal(a: &Node, b: &Node) -> bool {
    let mut pending = vec![(a, b)];

    while let Some((a, b)) = pending.pop() {
        if a.tag() != b.tag() {
            debug!("{} {} != {}", "Tag mismatch".yellow(), a.tag(), b.tag());
            return false;
        }

        if !values_equal(a.value(), b.value()) {
            debug!(
                "{} on {}: {:?} != {:?}",
                "Value mismatch".yellow(),
                a.tag(),
                a.value(),
                b.value()
            );
            return false;
        }

        if !same_len(a.children(), b.children()) {
            return false;
        }

        // Reversed so the first child is compared first
        pending.extend(a.children().iter().zip(b.children()).rev());
    }

    true
}

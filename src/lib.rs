//! # Pedigree
//!
//! Record trees for GEDCOM-style genealogy files.
//!
//! ## Overview
//!
//! Each line of a file carries a nesting depth, an optional record pointer,
//! a tag and an optional value:
//!
//! ```text
//! 0 @P1@ INDI
//! 1 NAME Elliot /Chance/
//! 1 BIRT
//! 2 DATE 6 MAY 1989
//! ```
//!
//! Pedigree provides a [`Node`] tree for these records, a line codec that
//! reads and writes the text exactly, and [`deep_equal`], a structural
//! comparison that ignores the arbitrary pointers each export assigns, so two
//! exports of the same data compare equal.

mod builder;
mod codec;
mod compare;
mod config;
mod display;
mod document;
mod error;
mod hash;
mod index;
mod iterator;
mod tag;

pub mod node;
pub mod registry;

#[cfg(test)]
mod test;

pub use builder::{DocumentBuilder, NodeBuilder};
pub use codec::{parse_line, parse_str, render_line, render_nodes, Decoder, Encoder, Line};
pub use compare::{deep_equal, deep_equal_nodes, is_pointer, values_equal};
pub use config::{DecodeOptions, EncodeOptions, LineEnding, DEFAULT_MAX_DEPTH};
pub use display::Outline;
pub use document::{Document, RecordDiff};
pub use error::{DateError, NodeError, ParseError, Result};
pub use hash::{fingerprint, FingerprintIndex};
pub use index::PointerIndex;
pub use iterator::{IterNode, NodeIter};
pub use node::{is_nil, shallow_equal, MaybeNode, Node, TypedNode};
pub use registry::{NodeKind, NodeKindDescriptor};
pub use tag::Tag;

//! Kind-specific views over [`Node`].
//!
//! A view borrows a node whose kind matches and adds helpers for that kind.
//! Views deref to the underlying node, so the shared accessors stay available.

use std::ops::Deref;

use crate::{
    compare::is_pointer,
    node::{date::Date, strip_pointer, Node},
    registry::NodeKind,
    Tag,
};

macro_rules! node_view {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name<'a>(&'a Node);

        impl<'a> $name<'a> {
            pub fn node(&self) -> &'a Node {
                self.0
            }
        }

        impl Deref for $name<'_> {
            type Target = Node;

            fn deref(&self) -> &Self::Target {
                self.0
            }
        }
    };
}

node_view!(
    /// An `INDI` record.
    IndividualNode
);
node_view!(
    /// A `FAM` record.
    FamilyNode
);
node_view!(
    /// A `NAME` line, `Given /Surname/`.
    NameNode
);
node_view!(
    /// Any event such as `BIRT`, `DEAT` or `RESI`.
    EventNode
);
node_view!(DateNode);
node_view!(PlaceNode);
node_view!(SexNode);
node_view!(SourceNode);

/// A node dispatched on its kind.
#[derive(Debug, Clone, Copy)]
pub enum TypedNode<'a> {
    Individual(IndividualNode<'a>),
    Family(FamilyNode<'a>),
    Name(NameNode<'a>),
    Event(EventNode<'a>),
    Date(DateNode<'a>),
    Place(PlaceNode<'a>),
    Sex(SexNode<'a>),
    Source(SourceNode<'a>),
    Other(&'a Node),
}

impl<'a> TypedNode<'a> {
    pub fn node(&self) -> &'a Node {
        match self {
            TypedNode::Individual(n) => n.node(),
            TypedNode::Family(n) => n.node(),
            TypedNode::Name(n) => n.node(),
            TypedNode::Event(n) => n.node(),
            TypedNode::Date(n) => n.node(),
            TypedNode::Place(n) => n.node(),
            TypedNode::Sex(n) => n.node(),
            TypedNode::Source(n) => n.node(),
            TypedNode::Other(n) => *n,
        }
    }
}

impl Node {
    pub fn typed(&self) -> TypedNode<'_> {
        match self.kind() {
            NodeKind::Individual => TypedNode::Individual(IndividualNode(self)),
            NodeKind::Family => TypedNode::Family(FamilyNode(self)),
            NodeKind::Name => TypedNode::Name(NameNode(self)),
            NodeKind::Date => TypedNode::Date(DateNode(self)),
            NodeKind::Place => TypedNode::Place(PlaceNode(self)),
            NodeKind::Sex => TypedNode::Sex(SexNode(self)),
            NodeKind::Source => TypedNode::Source(SourceNode(self)),
            kind if kind.is_event() => TypedNode::Event(EventNode(self)),
            _ => TypedNode::Other(self),
        }
    }

    pub fn as_individual(&self) -> Option<IndividualNode<'_>> {
        (self.kind() == NodeKind::Individual).then_some(IndividualNode(self))
    }

    pub fn as_family(&self) -> Option<FamilyNode<'_>> {
        (self.kind() == NodeKind::Family).then_some(FamilyNode(self))
    }

    pub fn as_name(&self) -> Option<NameNode<'_>> {
        (self.kind() == NodeKind::Name).then_some(NameNode(self))
    }

    pub fn as_event(&self) -> Option<EventNode<'_>> {
        self.kind().is_event().then_some(EventNode(self))
    }

    pub fn as_date(&self) -> Option<DateNode<'_>> {
        (self.kind() == NodeKind::Date).then_some(DateNode(self))
    }

    pub fn as_place(&self) -> Option<PlaceNode<'_>> {
        (self.kind() == NodeKind::Place).then_some(PlaceNode(self))
    }

    pub fn as_sex(&self) -> Option<SexNode<'_>> {
        (self.kind() == NodeKind::Sex).then_some(SexNode(self))
    }

    pub fn as_source(&self) -> Option<SourceNode<'_>> {
        (self.kind() == NodeKind::Source).then_some(SourceNode(self))
    }
}

/// Values of pointer-valued children, without the `@` delimiters.
fn child_pointers<'a>(node: &'a Node, tag: &Tag) -> impl Iterator<Item = &'a str> + 'a {
    node.children_with_tag(tag)
        .map(Node::value)
        .filter(|value| is_pointer(value))
        .map(strip_pointer)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
    Unknown,
}

impl<'a> IndividualNode<'a> {
    pub fn names(&self) -> impl Iterator<Item = NameNode<'a>> + 'a {
        let node = self.0;
        node.children_with_tag(&Tag::NAME).map(NameNode)
    }

    /// The first name, usually the preferred one.
    pub fn name(&self) -> Option<NameNode<'a>> {
        self.0.first_child(&Tag::NAME).map(NameNode)
    }

    pub fn sex(&self) -> Sex {
        self.0
            .first_child(&Tag::SEX)
            .map(|node| SexNode(node).sex())
            .unwrap_or(Sex::Unknown)
    }

    pub fn birth(&self) -> Option<EventNode<'a>> {
        self.0.first_child(&Tag::BIRTH).map(EventNode)
    }

    pub fn death(&self) -> Option<EventNode<'a>> {
        self.0.first_child(&Tag::DEATH).map(EventNode)
    }

    pub fn events(&self) -> impl Iterator<Item = EventNode<'a>> + 'a {
        self.0.children().iter().filter_map(Node::as_event)
    }

    pub fn spouse_family_pointers(&self) -> Vec<&'a str> {
        child_pointers(self.0, &Tag::FAMILY_SPOUSE).collect()
    }

    pub fn child_family_pointers(&self) -> Vec<&'a str> {
        child_pointers(self.0, &Tag::FAMILY_CHILD).collect()
    }
}

impl<'a> FamilyNode<'a> {
    pub fn husband_pointer(&self) -> Option<&'a str> {
        child_pointers(self.0, &Tag::HUSBAND).next()
    }

    pub fn wife_pointer(&self) -> Option<&'a str> {
        child_pointers(self.0, &Tag::WIFE).next()
    }

    pub fn child_pointers(&self) -> Vec<&'a str> {
        child_pointers(self.0, &Tag::CHILD).collect()
    }
}

impl<'a> NameNode<'a> {
    /// `GIVN` when present, otherwise the text before the first `/`.
    pub fn given_name(&self) -> &'a str {
        if let Some(given) = self.0.first_child(&Tag::GIVEN_NAME) {
            return given.value();
        }
        self.0.value().split('/').next().unwrap_or_default().trim()
    }

    /// `SURN` when present, otherwise the text between the slashes.
    pub fn surname(&self) -> &'a str {
        if let Some(surname) = self.0.first_child(&Tag::SURNAME) {
            return surname.value();
        }
        self.0.value().split('/').nth(1).unwrap_or_default().trim()
    }

    /// The name with slashes removed and whitespace collapsed.
    pub fn full_name(&self) -> String {
        self.0
            .value()
            .replace('/', " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<'a> EventNode<'a> {
    pub fn date(&self) -> Option<DateNode<'a>> {
        self.0.first_child(&Tag::DATE).map(DateNode)
    }

    pub fn place(&self) -> Option<PlaceNode<'a>> {
        self.0.first_child(&Tag::PLACE).map(PlaceNode)
    }

    pub fn sources(&self) -> impl Iterator<Item = SourceNode<'a>> + 'a {
        let node = self.0;
        node.children_with_tag(&Tag::SOURCE).map(SourceNode)
    }
}

impl DateNode<'_> {
    /// Parse the value. `None` if it is not a recognised date.
    pub fn parse(&self) -> Option<Date> {
        self.0.value().parse().ok()
    }
}

impl<'a> PlaceNode<'a> {
    /// Comma separated parts, smallest jurisdiction first.
    pub fn jurisdictions(&self) -> Vec<&'a str> {
        self.0
            .value()
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect()
    }
}

impl SexNode<'_> {
    pub fn sex(&self) -> Sex {
        match self.0.value().trim() {
            "M" | "m" => Sex::Male,
            "F" | "f" => Sex::Female,
            _ => Sex::Unknown,
        }
    }
}

impl<'a> SourceNode<'a> {
    /// Whether this is a citation pointing at a source record.
    pub fn is_citation(&self) -> bool {
        is_pointer(self.0.value())
    }

    pub fn page(&self) -> Option<&'a str> {
        self.0.first_child(&Tag::PAGE).map(Node::value)
    }

    pub fn title(&self) -> Option<&'a str> {
        self.0.first_child(&Tag::TITLE).map(Node::value)
    }
}

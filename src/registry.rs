//! Process-wide tag registry.
//!
//! Maps the tag text of a record line to a [`NodeKindDescriptor`]. The table is
//! static and read-only; the lookup map is built once on first use. Unknown
//! tags resolve to [`NodeKind::Generic`], which is not an error since the
//! format is open to extension.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::Tag;

/// Kind of a node, used to dispatch to kind-specific helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Header,
    Trailer,
    Submitter,
    Individual,
    Family,
    Name,
    GivenName,
    Surname,
    NamePrefix,
    NameSuffix,
    Nickname,
    Sex,
    Birth,
    Death,
    Baptism,
    Christening,
    Burial,
    Marriage,
    Divorce,
    Residence,
    Event,
    Type,
    Date,
    Place,
    Occupation,
    Source,
    Page,
    Title,
    Author,
    Publication,
    Repository,
    Note,
    Text,
    Continued,
    Concatenation,
    FamilySpouse,
    FamilyChild,
    Husband,
    Wife,
    Child,
    Version,
    Format,
    CharacterSet,
    Gedcom,
    Object,
    File,
    /// Fallback for any tag the registry does not know
    Generic,
}

impl NodeKind {
    pub fn descriptor(self) -> &'static NodeKindDescriptor {
        BY_KIND.get(&self).copied().unwrap_or(&GENERIC)
    }

    pub fn is_event(self) -> bool {
        self.descriptor().is_event()
    }
}

/// Static description of a node kind.
#[derive(Debug)]
pub struct NodeKindDescriptor {
    kind: NodeKind,
    tag: Tag,
    name: &'static str,
    event: bool,
}

impl NodeKindDescriptor {
    const fn new(kind: NodeKind, tag: Tag, name: &'static str) -> Self {
        Self {
            kind,
            tag,
            name,
            event: false,
        }
    }

    const fn event(kind: NodeKind, tag: Tag, name: &'static str) -> Self {
        Self {
            kind,
            tag,
            name,
            event: true,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Canonical tag. Empty for the generic kind.
    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    /// Human readable name, e.g. "Birth"
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_event(&self) -> bool {
        self.event
    }
}

static GENERIC: NodeKindDescriptor = NodeKindDescriptor::new(NodeKind::Generic, Tag::EMPTY, "Generic");

static KNOWN: &[NodeKindDescriptor] = &[
    NodeKindDescriptor::new(NodeKind::Header, Tag::HEADER, "Header"),
    NodeKindDescriptor::new(NodeKind::Trailer, Tag::TRAILER, "Trailer"),
    NodeKindDescriptor::new(NodeKind::Submitter, Tag::SUBMITTER, "Submitter"),
    NodeKindDescriptor::new(NodeKind::Individual, Tag::INDIVIDUAL, "Individual"),
    NodeKindDescriptor::new(NodeKind::Family, Tag::FAMILY, "Family"),
    NodeKindDescriptor::new(NodeKind::Name, Tag::NAME, "Name"),
    NodeKindDescriptor::new(NodeKind::GivenName, Tag::GIVEN_NAME, "Given Name"),
    NodeKindDescriptor::new(NodeKind::Surname, Tag::SURNAME, "Surname"),
    NodeKindDescriptor::new(NodeKind::NamePrefix, Tag::NAME_PREFIX, "Name Prefix"),
    NodeKindDescriptor::new(NodeKind::NameSuffix, Tag::NAME_SUFFIX, "Name Suffix"),
    NodeKindDescriptor::new(NodeKind::Nickname, Tag::NICKNAME, "Nickname"),
    NodeKindDescriptor::new(NodeKind::Sex, Tag::SEX, "Sex"),
    NodeKindDescriptor::event(NodeKind::Birth, Tag::BIRTH, "Birth"),
    NodeKindDescriptor::event(NodeKind::Death, Tag::DEATH, "Death"),
    NodeKindDescriptor::event(NodeKind::Baptism, Tag::BAPTISM, "Baptism"),
    NodeKindDescriptor::event(NodeKind::Christening, Tag::CHRISTENING, "Christening"),
    NodeKindDescriptor::event(NodeKind::Burial, Tag::BURIAL, "Burial"),
    NodeKindDescriptor::event(NodeKind::Marriage, Tag::MARRIAGE, "Marriage"),
    NodeKindDescriptor::event(NodeKind::Divorce, Tag::DIVORCE, "Divorce"),
    NodeKindDescriptor::event(NodeKind::Residence, Tag::RESIDENCE, "Residence"),
    NodeKindDescriptor::event(NodeKind::Event, Tag::EVENT, "Event"),
    NodeKindDescriptor::new(NodeKind::Type, Tag::TYPE, "Type"),
    NodeKindDescriptor::new(NodeKind::Date, Tag::DATE, "Date"),
    NodeKindDescriptor::new(NodeKind::Place, Tag::PLACE, "Place"),
    NodeKindDescriptor::new(NodeKind::Occupation, Tag::OCCUPATION, "Occupation"),
    NodeKindDescriptor::new(NodeKind::Source, Tag::SOURCE, "Source"),
    NodeKindDescriptor::new(NodeKind::Page, Tag::PAGE, "Page"),
    NodeKindDescriptor::new(NodeKind::Title, Tag::TITLE, "Title"),
    NodeKindDescriptor::new(NodeKind::Author, Tag::AUTHOR, "Author"),
    NodeKindDescriptor::new(NodeKind::Publication, Tag::PUBLICATION, "Publication"),
    NodeKindDescriptor::new(NodeKind::Repository, Tag::REPOSITORY, "Repository"),
    NodeKindDescriptor::new(NodeKind::Note, Tag::NOTE, "Note"),
    NodeKindDescriptor::new(NodeKind::Text, Tag::TEXT, "Text"),
    NodeKindDescriptor::new(NodeKind::Continued, Tag::CONTINUED, "Continued"),
    NodeKindDescriptor::new(NodeKind::Concatenation, Tag::CONCATENATION, "Concatenation"),
    NodeKindDescriptor::new(NodeKind::FamilySpouse, Tag::FAMILY_SPOUSE, "Spouse in Family"),
    NodeKindDescriptor::new(NodeKind::FamilyChild, Tag::FAMILY_CHILD, "Child in Family"),
    NodeKindDescriptor::new(NodeKind::Husband, Tag::HUSBAND, "Husband"),
    NodeKindDescriptor::new(NodeKind::Wife, Tag::WIFE, "Wife"),
    NodeKindDescriptor::new(NodeKind::Child, Tag::CHILD, "Child"),
    NodeKindDescriptor::new(NodeKind::Version, Tag::VERSION, "Version"),
    NodeKindDescriptor::new(NodeKind::Format, Tag::FORMAT, "Format"),
    NodeKindDescriptor::new(NodeKind::CharacterSet, Tag::CHARACTER_SET, "Character Set"),
    NodeKindDescriptor::new(NodeKind::Gedcom, Tag::GEDCOM, "GEDCOM"),
    NodeKindDescriptor::new(NodeKind::Object, Tag::OBJECT, "Object"),
    NodeKindDescriptor::new(NodeKind::File, Tag::FILE, "File"),
];

static BY_TAG: Lazy<HashMap<&'static str, &'static NodeKindDescriptor>> =
    Lazy::new(|| KNOWN.iter().map(|d| (d.tag.as_str(), d)).collect());

static BY_KIND: Lazy<HashMap<NodeKind, &'static NodeKindDescriptor>> =
    Lazy::new(|| KNOWN.iter().map(|d| (d.kind, d)).collect());

/// Look up the descriptor for a tag. Never fails.
pub fn lookup(tag: &str) -> &'static NodeKindDescriptor {
    BY_TAG.get(tag).copied().unwrap_or(&GENERIC)
}

/// Whether the registry has a dedicated kind for this tag.
pub fn is_known(tag: &str) -> bool {
    BY_TAG.contains_key(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_known() {
        let birth = lookup("BIRT");
        assert_eq!(birth.kind(), NodeKind::Birth);
        assert_eq!(birth.tag(), &Tag::BIRTH);
        assert_eq!(birth.name(), "Birth");
        assert!(birth.is_event());

        assert!(!lookup("DATE").is_event());
    }

    #[test]
    fn lookup_unknown_falls_back() {
        for tag in ["_APID", "XYZ", "", "name"] {
            let descriptor = lookup(tag);
            assert_eq!(descriptor.kind(), NodeKind::Generic);
            assert!(descriptor.tag().is_empty());
            assert!(!is_known(tag));
        }
    }

    #[test]
    fn kind_round_trips_through_descriptor() {
        for descriptor in KNOWN {
            assert_eq!(descriptor.kind().descriptor().tag(), descriptor.tag());
            assert_eq!(lookup(descriptor.tag().as_str()).kind(), descriptor.kind());
        }
        assert_eq!(NodeKind::Generic.descriptor().name(), "Generic");
    }
}

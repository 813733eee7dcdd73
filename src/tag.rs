use std::borrow::Cow;

use crate::registry::{self, NodeKind};

/// The field name token of a record line, such as `NAME` or `BIRT`.
///
/// Known tags are backed by static strings from the registry. Unknown and
/// vendor tags (`_APID`, `_UID`, ...) keep their text verbatim so they can be
/// written back out unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(Cow<'static, str>);

impl Tag {
    /// The empty tag. Returned for absent nodes.
    pub const EMPTY: Tag = Tag::from_static("");

    pub const HEADER: Tag = Tag::from_static("HEAD");
    pub const TRAILER: Tag = Tag::from_static("TRLR");
    pub const SUBMITTER: Tag = Tag::from_static("SUBM");
    pub const INDIVIDUAL: Tag = Tag::from_static("INDI");
    pub const FAMILY: Tag = Tag::from_static("FAM");

    pub const NAME: Tag = Tag::from_static("NAME");
    pub const GIVEN_NAME: Tag = Tag::from_static("GIVN");
    pub const SURNAME: Tag = Tag::from_static("SURN");
    pub const NAME_PREFIX: Tag = Tag::from_static("NPFX");
    pub const NAME_SUFFIX: Tag = Tag::from_static("NSFX");
    pub const NICKNAME: Tag = Tag::from_static("NICK");
    pub const SEX: Tag = Tag::from_static("SEX");

    pub const BIRTH: Tag = Tag::from_static("BIRT");
    pub const DEATH: Tag = Tag::from_static("DEAT");
    pub const BAPTISM: Tag = Tag::from_static("BAPM");
    pub const CHRISTENING: Tag = Tag::from_static("CHR");
    pub const BURIAL: Tag = Tag::from_static("BURI");
    pub const MARRIAGE: Tag = Tag::from_static("MARR");
    pub const DIVORCE: Tag = Tag::from_static("DIV");
    pub const RESIDENCE: Tag = Tag::from_static("RESI");
    pub const EVENT: Tag = Tag::from_static("EVEN");
    pub const TYPE: Tag = Tag::from_static("TYPE");
    pub const DATE: Tag = Tag::from_static("DATE");
    pub const PLACE: Tag = Tag::from_static("PLAC");
    pub const OCCUPATION: Tag = Tag::from_static("OCCU");

    pub const SOURCE: Tag = Tag::from_static("SOUR");
    pub const PAGE: Tag = Tag::from_static("PAGE");
    pub const TITLE: Tag = Tag::from_static("TITL");
    pub const AUTHOR: Tag = Tag::from_static("AUTH");
    pub const PUBLICATION: Tag = Tag::from_static("PUBL");
    pub const REPOSITORY: Tag = Tag::from_static("REPO");
    pub const NOTE: Tag = Tag::from_static("NOTE");
    pub const TEXT: Tag = Tag::from_static("TEXT");
    pub const CONTINUED: Tag = Tag::from_static("CONT");
    pub const CONCATENATION: Tag = Tag::from_static("CONC");

    pub const FAMILY_SPOUSE: Tag = Tag::from_static("FAMS");
    pub const FAMILY_CHILD: Tag = Tag::from_static("FAMC");
    pub const HUSBAND: Tag = Tag::from_static("HUSB");
    pub const WIFE: Tag = Tag::from_static("WIFE");
    pub const CHILD: Tag = Tag::from_static("CHIL");

    pub const VERSION: Tag = Tag::from_static("VERS");
    pub const FORMAT: Tag = Tag::from_static("FORM");
    pub const CHARACTER_SET: Tag = Tag::from_static("CHAR");
    pub const GEDCOM: Tag = Tag::from_static("GEDC");
    pub const OBJECT: Tag = Tag::from_static("OBJE");
    pub const FILE: Tag = Tag::from_static("FILE");

    pub const fn from_static(text: &'static str) -> Self {
        Tag(Cow::Borrowed(text))
    }

    /// Creates a tag from its text form.
    ///
    /// Registered tags resolve to their static canonical instance; anything
    /// else is kept as given. No case folding is applied.
    pub fn new(text: impl AsRef<str>) -> Self {
        let text = text.as_ref();
        let descriptor = registry::lookup(text);

        if descriptor.kind() == NodeKind::Generic {
            Tag(Cow::Owned(text.to_owned()))
        } else {
            descriptor.tag().clone()
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Vendor extension tags start with an underscore.
    pub fn is_vendor(&self) -> bool {
        self.0.starts_with('_')
    }

    /// Kind the registry associates with this tag.
    pub fn kind(&self) -> NodeKind {
        registry::lookup(self.as_str()).kind()
    }
}

impl Default for Tag {
    fn default() -> Self {
        Tag::EMPTY
    }
}

impl From<&str> for Tag {
    fn from(text: &str) -> Self {
        Tag::new(text)
    }
}

impl From<String> for Tag {
    fn from(text: String) -> Self {
        Tag::new(text)
    }
}

impl From<&Tag> for Tag {
    fn from(tag: &Tag) -> Self {
        tag.clone()
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tag_resolves_to_canonical() {
        assert_eq!(Tag::new("BIRT"), Tag::BIRTH);
        assert_eq!(Tag::from("DATE").kind(), NodeKind::Date);
    }

    #[test]
    fn unknown_tag_passes_through() {
        let tag = Tag::new("_APID");
        assert_eq!(tag.as_str(), "_APID");
        assert!(tag.is_vendor());
        assert_eq!(tag.kind(), NodeKind::Generic);
    }

    #[test]
    fn tags_are_case_sensitive() {
        assert_ne!(Tag::new("birt"), Tag::BIRTH);
        assert_eq!(Tag::new("birt").kind(), NodeKind::Generic);
    }

    #[test]
    fn empty_tag_is_default() {
        assert_eq!(Tag::default(), Tag::EMPTY);
        assert!(Tag::EMPTY.is_empty());
        assert_eq!(Tag::new(""), Tag::EMPTY);
    }
}

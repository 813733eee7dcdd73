use crate::{
    codec,
    error::NodeError,
    iterator::NodeIter,
    registry::{self, NodeKind, NodeKindDescriptor},
    Tag,
};

pub mod date;
pub mod typed;

pub use typed::TypedNode;

static EMPTY_TAG: Tag = Tag::EMPTY;

/// A single record line together with the lines nested beneath it.
///
/// Every kind of node shares this one representation. The kind is derived
/// from the tag through the registry and only selects which typed helpers
/// (see [`TypedNode`]) apply; serialization and equivalence never look at it.
///
/// The derived `PartialEq` is strict: tag, value, pointer and children must all
/// match exactly. Use [`Node::equals`] for the shallow check and
/// [`crate::deep_equal`] for the pointer-tolerant comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    kind: NodeKind,
    tag: Tag,
    value: String,
    pointer: String,
    children: Vec<Node>,
}

impl Node {
    /// Creates a node, normalising anything that could not be written back
    /// as the same tree.
    ///
    /// The pointer is stored without its surrounding `@` characters, so both
    /// `"P1"` and `"@P1@"` produce a node whose pointer is `P1`. Repeated
    /// delimiters are trimmed too and whitespace inside a pointer becomes `_`.
    ///
    /// A value spanning several lines keeps its first line and gets one
    /// `CONT` child per following line, so [`Node::text`] returns the
    /// original text. `\r\n`, `\r` and `\n` all count as line breaks.
    ///
    /// Use [`Node::try_new`] to reject such input instead.
    pub fn new(tag: impl Into<Tag>, value: impl Into<String>, pointer: impl AsRef<str>) -> Self {
        let tag = tag.into();
        let value = value.into();
        let pointer = normalize_pointer(pointer.as_ref());

        if !value.contains(is_line_break) {
            return Self::from_parts(tag, value, pointer);
        }

        let text = value.replace("\r\n", "\n").replace('\r', "\n");
        let mut lines = text.split('\n');
        let first = lines.next().unwrap_or_default().to_owned();

        Self::from_parts(tag, first, pointer).with_children(
            lines.map(|line| Self::from_parts(Tag::CONTINUED, line.to_owned(), String::new())),
        )
    }

    /// Creates a node, rejecting a tag, value or pointer that would not
    /// survive being written as a line and read back.
    pub fn try_new(
        tag: impl Into<Tag>,
        value: impl Into<String>,
        pointer: impl AsRef<str>,
    ) -> Result<Self, NodeError> {
        let tag = tag.into();
        if !is_valid_tag(tag.as_str()) {
            return Err(NodeError::InvalidTag(tag.to_string()));
        }

        let pointer = pointer.as_ref();
        let inner = strip_pointer(pointer);
        if (inner.is_empty() && !pointer.is_empty()) || !is_valid_pointer(inner) {
            return Err(NodeError::InvalidPointer(pointer.to_owned()));
        }

        let value = value.into();
        if value.contains(is_line_break) {
            return Err(NodeError::InvalidValue(value));
        }

        Ok(Self::from_parts(tag, value, inner.to_owned()))
    }

    /// Fields taken as given. The codec uses this for lines it has already split.
    pub(crate) fn from_parts(tag: Tag, value: String, pointer: String) -> Self {
        Self {
            kind: tag.kind(),
            tag,
            value,
            pointer,
            children: Vec::new(),
        }
    }

    /// Appends children and returns the node, for construction chains.
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn individual(pointer: impl AsRef<str>) -> Self {
        Self::new(Tag::INDIVIDUAL, "", pointer)
    }

    pub fn family(pointer: impl AsRef<str>) -> Self {
        Self::new(Tag::FAMILY, "", pointer)
    }

    pub fn name(value: impl Into<String>) -> Self {
        Self::new(Tag::NAME, value, "")
    }

    pub fn sex(value: impl Into<String>) -> Self {
        Self::new(Tag::SEX, value, "")
    }

    pub fn birth(value: impl Into<String>) -> Self {
        Self::new(Tag::BIRTH, value, "")
    }

    pub fn death(value: impl Into<String>) -> Self {
        Self::new(Tag::DEATH, value, "")
    }

    pub fn date(value: impl Into<String>) -> Self {
        Self::new(Tag::DATE, value, "")
    }

    pub fn place(value: impl Into<String>) -> Self {
        Self::new(Tag::PLACE, value, "")
    }

    pub fn source(value: impl Into<String>) -> Self {
        Self::new(Tag::SOURCE, value, "")
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn descriptor(&self) -> &'static NodeKindDescriptor {
        registry::lookup(self.tag.as_str())
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Record identifier without the `@` delimiters. Empty when not set.
    pub fn pointer(&self) -> &str {
        &self.pointer
    }

    pub fn has_pointer(&self) -> bool {
        !self.pointer.is_empty()
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    /// Replace the child list. An empty iterator leaves the node without children.
    pub fn set_children(&mut self, children: impl IntoIterator<Item = Node>) {
        self.children = children.into_iter().collect();
    }

    /// Append a child after the existing ones.
    pub fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Remove all children and return them in order.
    pub fn take_children(&mut self) -> Vec<Node> {
        std::mem::take(&mut self.children)
    }

    pub fn first_child(&self, tag: &Tag) -> Option<&Node> {
        self.children.iter().find(|child| child.tag == *tag)
    }

    pub fn children_with_tag<'a>(&'a self, tag: &Tag) -> impl Iterator<Item = &'a Node> + 'a {
        let tag = tag.clone();
        self.children.iter().filter(move |child| child.tag == tag)
    }

    /// Shallow equality: tag, value and pointer. Children are not compared.
    pub fn equals(&self, other: &Node) -> bool {
        self.tag == other.tag && self.value == other.value && self.pointer == other.pointer
    }

    /// Render this node alone as a record line. See [`codec::render_line`].
    pub fn render_line(&self, depth: i32) -> String {
        codec::render_line(self, depth)
    }

    /// Render this node and its descendants, starting at `depth`.
    pub fn render_tree(&self, depth: usize) -> String {
        let options = crate::EncodeOptions::new().with_start_depth(depth);
        codec::Encoder::new(options).encode(std::slice::from_ref(self))
    }

    /// Depth-first iterator over this node and its descendants.
    pub fn iter(&self) -> NodeIter<'_> {
        NodeIter::new(std::slice::from_ref(self))
    }

    /// The value with `CONT` children appended on new lines and `CONC`
    /// children appended directly.
    pub fn text(&self) -> String {
        let mut text = self.value.clone();
        for child in &self.children {
            match child.kind {
                NodeKind::Continued => {
                    text.push('\n');
                    text.push_str(&child.value);
                }
                NodeKind::Concatenation => text.push_str(&child.value),
                _ => {}
            }
        }
        text
    }
}

// Nodes can nest as deep as the input does, so children are released from a
// flat list instead of recursively.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

/// Returns true when no node is present.
///
/// There is one node representation, so absence is the same for every kind.
pub fn is_nil(node: Option<&Node>) -> bool {
    node.is_none()
}

/// Shallow equality over possibly absent nodes. False if either side is absent.
pub fn shallow_equal(a: Option<&Node>, b: Option<&Node>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.equals(b),
        _ => false,
    }
}

fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

fn is_valid_tag(tag: &str) -> bool {
    !tag.is_empty() && !tag.starts_with('@') && !tag.chars().any(char::is_whitespace)
}

/// Whether a pointer without its delimiters can be written as `@pointer@` and
/// read back unchanged. The empty pointer means no pointer.
pub(crate) fn is_valid_pointer(pointer: &str) -> bool {
    !pointer.starts_with('@') && !pointer.ends_with('@') && !pointer.chars().any(char::is_whitespace)
}

pub(crate) fn normalize_pointer(pointer: &str) -> String {
    pointer
        .trim_matches('@')
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

pub(crate) fn strip_pointer(pointer: &str) -> &str {
    pointer
        .strip_prefix('@')
        .and_then(|p| p.strip_suffix('@'))
        .unwrap_or(pointer)
}

/// Accessors for a node that may be absent.
///
/// Every accessor returns its zero value when the node is missing, so a chain
/// like `indi.first_child(&Tag::BIRTH).first_child(&Tag::DATE).value()` needs no
/// presence checks.
pub trait MaybeNode<'a> {
    fn is_nil(&self) -> bool;
    fn tag(&self) -> &'a Tag;
    fn value(&self) -> &'a str;
    fn pointer(&self) -> &'a str;
    fn children(&self) -> &'a [Node];
    fn first_child(&self, tag: &Tag) -> Option<&'a Node>;
    fn equals(&self, other: Option<&Node>) -> bool;
    fn to_display_string(&self) -> String;
}

impl<'a> MaybeNode<'a> for Option<&'a Node> {
    fn is_nil(&self) -> bool {
        is_nil(*self)
    }

    fn tag(&self) -> &'a Tag {
        self.map(Node::tag).unwrap_or(&EMPTY_TAG)
    }

    fn value(&self) -> &'a str {
        self.map(Node::value).unwrap_or_default()
    }

    fn pointer(&self) -> &'a str {
        self.map(Node::pointer).unwrap_or_default()
    }

    fn children(&self) -> &'a [Node] {
        self.map(Node::children).unwrap_or_default()
    }

    fn first_child(&self, tag: &Tag) -> Option<&'a Node> {
        self.and_then(|node| node.first_child(tag))
    }

    fn equals(&self, other: Option<&Node>) -> bool {
        shallow_equal(*self, other)
    }

    fn to_display_string(&self) -> String {
        self.map(ToString::to_string).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_kinds() -> Vec<Node> {
        vec![
            Node::new(Tag::TEXT, "", ""),
            Node::new("_APID", "1,61406::6159341", ""),
            Node::individual("P1"),
            Node::family("F1"),
            Node::name("Elliot /Chance/"),
            Node::birth(""),
            Node::death(""),
            Node::date("6 MAY 1989"),
            Node::source("@S1@"),
        ]
    }

    #[test]
    fn new_node_has_no_children() {
        let node = Node::new(Tag::TEXT, "", "");
        assert_eq!(node.children().len(), 0);
        assert_eq!(node.kind(), NodeKind::Text);
    }

    #[test]
    fn nil_accessors_return_zero_values() {
        let nil: Option<&Node> = None;
        assert!(nil.is_nil());
        assert!(is_nil(nil));
        assert_eq!(nil.tag(), &Tag::EMPTY);
        assert_eq!(nil.value(), "");
        assert_eq!(nil.pointer(), "");
        assert!(nil.children().is_empty());
        assert!(nil.first_child(&Tag::DATE).is_nil());
        assert_eq!(nil.to_display_string(), "");
    }

    #[test]
    fn present_nodes_are_not_nil() {
        for node in all_kinds() {
            assert!(!is_nil(Some(&node)), "{:?}", node.tag());
        }
    }

    #[test]
    fn nil_navigation_chain() {
        let birth = Node::birth("").with_children([Node::date("6 MAY 1989")]);
        let indi = Node::individual("P1").with_children([birth]);

        let present = Some(&indi).first_child(&Tag::BIRTH).first_child(&Tag::DATE);
        assert_eq!(present.value(), "6 MAY 1989");

        let missing = Some(&indi).first_child(&Tag::DEATH).first_child(&Tag::DATE);
        assert!(missing.is_nil());
        assert_eq!(missing.value(), "");
    }

    #[test]
    fn shallow_equality_grid() {
        let left: Vec<Option<Node>> = vec![
            None,
            Some(Node::new(Tag::VERSION, "", "")),
            Some(Node::new(Tag::VERSION, "a", "")),
            Some(Node::new(Tag::VERSION, "", "b")),
            Some(Node::new(Tag::VERSION, "a", "b")),
        ];
        let mut right = left.clone();
        right.push(Some(Node::name("")));

        for (i, l) in left.iter().enumerate() {
            for (j, r) in right.iter().enumerate() {
                let expected = i == j && i != 0;
                assert_eq!(
                    l.as_ref().equals(r.as_ref()),
                    expected,
                    "left {i} right {j}"
                );
            }
        }
    }

    #[test]
    fn shallow_equality_ignores_children() {
        let a = Node::birth("").with_children([Node::date("1900")]);
        let b = Node::birth("");
        assert!(a.equals(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn set_children_replaces_and_clears() {
        let mut birth = Node::birth("foo");
        assert!(birth.children().is_empty());

        birth.set_children([Node::date("3 SEP 1945")]);
        assert_eq!(birth.children(), &[Node::date("3 SEP 1945")]);

        birth.set_children(Vec::<Node>::new());
        assert!(birth.children().is_empty());
        assert_eq!(birth, Node::birth("foo"));
    }

    #[test]
    fn pointer_is_stored_without_delimiters() {
        assert_eq!(Node::individual("@P1@").pointer(), "P1");
        assert_eq!(Node::individual("P1").pointer(), "P1");
        assert!(!Node::name("x").has_pointer());
    }

    #[test]
    fn new_normalises_pointers() {
        assert_eq!(Node::individual("@@X@@").pointer(), "X");
        assert_eq!(Node::individual("P 1").pointer(), "P_1");
        assert_eq!(Node::individual("P@1").pointer(), "P@1");
        assert!(!Node::individual("@@").has_pointer());
    }

    #[test]
    fn new_splits_lines_into_continuations() {
        let note = Node::new(Tag::NOTE, "one\ntwo\r\nthree", "");
        assert_eq!(note.value(), "one");
        assert_eq!(
            note.children(),
            &[
                Node::new(Tag::CONTINUED, "two", ""),
                Node::new(Tag::CONTINUED, "three", ""),
            ]
        );
        assert_eq!(note.text(), "one\ntwo\nthree");

        let note = note.with_children([Node::source("@S1@")]);
        assert_eq!(note.num_children(), 3);
        assert_eq!(note.text(), "one\ntwo\nthree");
    }

    #[test]
    fn try_new_rejects_unwritable_fields() {
        assert_eq!(
            Node::try_new(Tag::INDIVIDUAL, "", "@P1@"),
            Ok(Node::individual("P1"))
        );
        assert_eq!(
            Node::try_new(Tag::INDIVIDUAL, "", "P 1"),
            Err(NodeError::InvalidPointer("P 1".into()))
        );
        assert_eq!(
            Node::try_new(Tag::INDIVIDUAL, "", "@@X@@"),
            Err(NodeError::InvalidPointer("@@X@@".into()))
        );
        assert_eq!(
            Node::try_new(Tag::INDIVIDUAL, "", "@@"),
            Err(NodeError::InvalidPointer("@@".into()))
        );
        assert_eq!(
            Node::try_new(Tag::NOTE, "x\r", ""),
            Err(NodeError::InvalidValue("x\r".into()))
        );
        assert_eq!(
            Node::try_new("BIR T", "", ""),
            Err(NodeError::InvalidTag("BIR T".into()))
        );
        assert_eq!(Node::try_new("", "", ""), Err(NodeError::InvalidTag(String::new())));
    }

    #[test]
    fn deep_trees_drop_without_recursion() {
        let mut node = Node::new(Tag::NOTE, "x", "");
        for _ in 0..100_000 {
            node = Node::new(Tag::NOTE, "x", "").with_children([node]);
        }
        assert_eq!(node.iter().count(), 100_001);
        drop(node);
    }

    #[test]
    fn display_renders_value_only() {
        let node = Node::new(Tag::BIRTH, "foo", "72");
        assert_eq!(node.to_string(), "foo");
        assert_eq!(Some(&node).to_display_string(), "foo");
    }

    #[test]
    fn text_joins_continuations() {
        let note = Node::new(Tag::NOTE, "First line", "").with_children([
            Node::new(Tag::CONTINUED, "Second", ""),
            Node::new(Tag::CONCATENATION, " line", ""),
            Node::new(Tag::SOURCE, "@S1@", ""),
        ]);
        assert_eq!(note.text(), "First line\nSecond line");
    }

    #[test]
    fn children_with_tag_keeps_order() {
        let indi = Node::individual("P1").with_children([
            Node::name("A /B/"),
            Node::sex("M"),
            Node::name("C /D/"),
        ]);
        let names: Vec<&str> = indi.children_with_tag(&Tag::NAME).map(Node::value).collect();
        assert_eq!(names, vec!["A /B/", "C /D/"]);
    }
}

//! Line codec for the record text format.
//!
//! One line per node:
//!
//! ```text
//! <depth> [@<pointer>@ ]<TAG>[ <value>]
//! ```
//!
//! Trees are written depth-first with each child one level below its parent,
//! and read back by attaching each line to the most recent line one level up.

use tracing::{debug, debug_span, trace};

use crate::{
    config::{DecodeOptions, EncodeOptions},
    error::{ParseError, Result},
    iterator::NodeIter,
    node::is_valid_pointer,
    registry, Document, Node, Tag,
};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Render a single node as one line, without a line terminator.
///
/// The pointer segment is omitted when the node has no pointer and the value
/// segment when the value is empty. A negative `depth` omits the depth field
/// and its trailing space.
///
/// ```
/// use pedigree::{Node, Tag};
///
/// let node = Node::new(Tag::BIRTH, "foo", "72");
/// assert_eq!(pedigree::render_line(&node, 0), "0 @72@ BIRT foo");
/// assert_eq!(pedigree::render_line(&node, -1), "@72@ BIRT foo");
/// ```
pub fn render_line(node: &Node, depth: i32) -> String {
    let mut line = String::new();
    write_line(&mut line, node, usize::try_from(depth).ok());
    line
}

fn write_line(out: &mut String, node: &Node, depth: Option<usize>) {
    out.reserve(node.tag().as_str().len() + node.value().len() + node.pointer().len() + 8);

    if let Some(depth) = depth {
        out.push_str(&depth.to_string());
        out.push(' ');
    }

    if node.has_pointer() {
        out.push('@');
        out.push_str(node.pointer());
        out.push_str("@ ");
    }

    out.push_str(node.tag().as_str());

    if !node.value().is_empty() {
        out.push(' ');
        out.push_str(node.value());
    }
}

/// Render nodes and all their descendants with default options.
pub fn render_nodes(nodes: &[Node]) -> String {
    Encoder::default().encode(nodes)
}

/// Parse record text into a [`Document`] with default options.
pub fn parse_str(text: &str) -> Result<Document> {
    Decoder::default().decode(text).map(Document::from_nodes)
}

/// Writes node trees as record text.
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    options: EncodeOptions,
}

impl Encoder {
    pub fn new(options: EncodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    /// Render every node depth-first, one terminated line per node.
    pub fn encode(&self, nodes: &[Node]) -> String {
        let line_ending = self.options.line_ending().as_str();
        let mut out = String::new();

        for node in NodeIter::new(nodes) {
            let depth = self.options.start_depth().saturating_add(node.depth());
            write_line(&mut out, &node, Some(depth));
            out.push_str(line_ending);
        }

        out
    }
}

/// One decoded line before it is attached to the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    pub depth: usize,
    pub pointer: Option<&'a str>,
    pub tag: &'a str,
    pub value: &'a str,
}

impl Line<'_> {
    fn into_node(self) -> Node {
        Node::from_parts(
            Tag::new(self.tag),
            self.value.to_owned(),
            self.pointer.unwrap_or_default().to_owned(),
        )
    }
}

/// Split one line into its fields.
///
/// `line_no` is only used for error reporting. The value is everything after
/// the single space following the tag, kept verbatim.
pub fn parse_line(line: &str, line_no: usize) -> Result<Line<'_>> {
    let (depth_text, rest) = split_token(line);

    let depth = depth_text
        .parse::<usize>()
        .ok()
        .filter(|_| depth_text.bytes().all(|b| b.is_ascii_digit()))
        .ok_or_else(|| ParseError::InvalidDepth {
            line: line_no,
            text: depth_text.to_owned(),
        })?;

    let rest = rest.trim_start_matches(' ');
    let (pointer, rest) = if rest.starts_with('@') {
        let (token, rest) = split_token(rest);
        if !crate::is_pointer(token) || !is_valid_pointer(&token[1..token.len() - 1]) {
            return Err(ParseError::MalformedPointer {
                line: line_no,
                text: token.to_owned(),
            });
        }
        (Some(&token[1..token.len() - 1]), rest.trim_start_matches(' '))
    } else {
        (None, rest)
    };

    let (tag, rest) = split_token(rest);
    if tag.is_empty() {
        return Err(ParseError::MissingTag { line: line_no });
    }

    let value = rest.strip_prefix(' ').unwrap_or(rest);

    Ok(Line {
        depth,
        pointer,
        tag,
        value,
    })
}

/// Split at the first space. The space itself is not part of either half.
fn split_token(text: &str) -> (&str, &str) {
    match text.find(' ') {
        Some(idx) => (&text[..idx], &text[idx..]),
        None => (text, ""),
    }
}

/// Reads record text into node trees.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decode a whole text. Accepts `\n` and `\r\n` line endings.
    pub fn decode(&self, text: &str) -> Result<Vec<Node>> {
        self.decode_lines(text.lines())
    }

    /// Decode a sequence of lines into top-level nodes.
    ///
    /// Blank lines are skipped. A line nested more than one level below the
    /// previous line is a [`ParseError::DepthJump`].
    pub fn decode_lines<'a, I>(&self, lines: I) -> Result<Vec<Node>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        debug_span!("decode").in_scope(|| -> Result<Vec<Node>> {
            let mut roots = Vec::new();

            // stack[d] is the open node at depth d
            let mut stack: Vec<Node> = Vec::new();

            for (idx, raw) in lines.into_iter().enumerate() {
                let line_no = idx + 1;
                let mut text = raw.strip_suffix('\r').unwrap_or(raw);
                if idx == 0 && self.options.strip_bom() {
                    text = text.trim_start_matches(BYTE_ORDER_MARK);
                }
                if self.options.trim_whitespace() {
                    text = text.trim_start();
                }
                if text.trim().is_empty() {
                    continue;
                }

                let line = parse_line(text, line_no)?;

                if let Some(limit) = self.options.max_depth() {
                    if line.depth > limit {
                        return Err(ParseError::DepthLimit {
                            line: line_no,
                            depth: line.depth,
                            limit,
                        });
                    }
                }

                if line.depth > stack.len() {
                    return Err(ParseError::DepthJump {
                        line: line_no,
                        depth: line.depth,
                        allowed: stack.len(),
                    });
                }

                if !registry::is_known(line.tag) && !line.tag.starts_with('_') {
                    debug!("Line {line_no}: unknown tag {}", line.tag);
                }

                close_to_depth(&mut stack, &mut roots, line.depth);
                stack.push(line.into_node());
            }

            close_to_depth(&mut stack, &mut roots, 0);
            debug!("Decoded {} top-level records", roots.len());

            Ok(roots)
        })
    }
}

/// Pop open nodes until only `depth` remain, attaching each to its parent.
fn close_to_depth(stack: &mut Vec<Node>, roots: &mut Vec<Node>, depth: usize) {
    while stack.len() > depth {
        let Some(node) = stack.pop() else {
            break;
        };
        match stack.last_mut() {
            Some(parent) => parent.push_child(node),
            None => {
                trace!("Closed record {} {}", node.tag(), node.pointer());
                roots.push(node);
            }
        }
    }
}

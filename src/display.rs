use std::fmt::Write;

use crate::{codec::render_line, Document};

/// Box-drawn outline of a document, one node per row.
///
/// Each row shows the node's line without its depth, e.g. `@P1@ INDI`.
pub struct Outline<'a> {
    document: &'a Document,
}

impl<'a> Outline<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }
}

impl std::fmt::Display for Outline<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let column_width = 2;
        let mut iter = self.document.iter().peekable();

        while let Some(node) = iter.next() {
            // Peek at the next node to see if there are siblings
            let has_siblings = iter
                .peek()
                .is_some_and(|next| next.depth() == node.depth());
            let has_children = node.num_children() > 0;

            if node.depth() == 0 {
                if has_children || has_siblings {
                    f.write_char('┏')?;
                } else {
                    f.write_char('━')?;
                }
            } else {
                for i in 0..node.depth() * column_width {
                    if i % column_width == 0 {
                        f.write_char('┃')?;
                    } else {
                        f.write_char(' ')?;
                    }
                }

                if has_children || has_siblings {
                    f.write_char('┣')?;
                } else {
                    f.write_char('┗')?;
                }
            }

            f.write_char(' ')?;
            f.write_str(&render_line(&node, -1))?;
            f.write_char('\n')?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{test::sample_document, Document, Node};

    #[test]
    fn outline_of_sample() {
        let document = sample_document();
        assert_eq!(
            document.outline().to_string(),
            "┏ @P1@ INDI\n┃ ┣ NAME Elliot /Chance/\n┃ ┣ BIRT\n┃ ┃ ┗ DATE 6 MAY 1989\n"
        );
    }

    #[test]
    fn outline_of_single_leaf() {
        let document = Document::from_nodes(vec![Node::new("TRLR", "", "")]);
        assert_eq!(document.outline().to_string(), "━ TRLR\n");
    }

    #[test]
    fn outline_of_empty_document() {
        assert_eq!(Document::new().outline().to_string(), "");
    }
}

//! Whitespace collapsing.
//!
//! Runs once per render, before any box is laid out, and yields the text
//! each text node displays. Outside preformatted text, runs of whitespace
//! become one space, a space is dropped when the text before it on the
//! same line already ends in one, and spaces at the start and end of a
//! line are removed. Line boundaries are block boxes, `br`, and the edges
//! of inline blocks, which collapse their content on their own.

use std::collections::HashMap;

use crate::document::{Document, NodeId, PseudoKind};

/// Where collapsing stands within one line context.
#[derive(Clone, Copy, Debug)]
struct Line {
    at_start: bool,
    after_space: bool,
    /// The last text node on the line; trimmed when the line ends.
    pending: Option<NodeId>,
}

impl Line {
    fn new() -> Self {
        Self {
            at_start: true,
            after_space: false,
            pending: None,
        }
    }
}

struct Collapser<'a> {
    doc: &'a Document,
    texts: HashMap<NodeId, String>,
}

/// Collapses the whitespace of every text node in the document.
pub(crate) fn collapse(doc: &Document) -> HashMap<NodeId, String> {
    let mut collapser = Collapser {
        doc,
        texts: HashMap::new(),
    };
    let mut line = Line::new();
    collapser.walk(doc.root(), &mut line);
    collapser.end_line(&mut line);
    collapser.texts
}

impl Collapser<'_> {
    fn walk(&mut self, id: NodeId, line: &mut Line) {
        let doc = self.doc;
        let before = doc.pseudo(id, PseudoKind::Before);
        let after = doc.pseudo(id, PseudoKind::After);
        let children = before.into_iter().chain(doc.children(id).iter().copied()).chain(after);
        for child in children {
            let theme = doc.theme(child);
            if theme.skip() {
                continue;
            }
            if doc.is_text(child) {
                self.text(child, theme.preformatted(), line);
            } else if theme.pseudo.is_some() {
                let content = theme.content().unwrap_or_default();
                if !content.is_empty() {
                    line.at_start = false;
                    line.after_space = content.ends_with(' ');
                    line.pending = None;
                }
            } else if doc.name(child) == Some("br") {
                self.end_line(line);
            } else if theme.is_blocky() {
                self.end_line(line);
                let mut inner = Line::new();
                self.walk(child, &mut inner);
                self.end_line(&mut inner);
            } else if theme.is_inline_block() || !theme.in_flow() {
                let mut inner = Line::new();
                self.walk(child, &mut inner);
                self.end_line(&mut inner);
                if theme.in_flow() {
                    line.at_start = false;
                    line.after_space = false;
                    line.pending = None;
                }
            } else {
                self.walk(child, line);
            }
        }
    }

    fn text(&mut self, id: NodeId, preformatted: bool, line: &mut Line) {
        let raw = self.doc.text_of(id).unwrap_or_default();
        if preformatted {
            let mut text = raw.replace('\t', "    ");
            if self.is_last_child(id) && text.ends_with('\n') {
                text.pop();
            }
            line.at_start = text.ends_with('\n');
            line.after_space = false;
            line.pending = None;
            self.texts.insert(id, text);
            return;
        }

        let mut text = String::with_capacity(raw.len());
        let mut space = line.at_start || line.after_space;
        for c in raw.chars() {
            if c.is_ascii_whitespace() {
                if !space {
                    text.push(' ');
                    space = true;
                }
            } else {
                text.push(c);
                space = false;
            }
        }
        if !text.is_empty() {
            line.at_start = false;
            line.after_space = space;
            line.pending = Some(id);
        }
        self.texts.insert(id, text);
    }

    fn end_line(&mut self, line: &mut Line) {
        if let Some(text) = line.pending.and_then(|id| self.texts.get_mut(&id)) {
            let trimmed = text.trim_end_matches(' ').len();
            text.truncate(trimmed);
        }
        *line = Line::new();
    }

    fn is_last_child(&self, id: NodeId) -> bool {
        self.doc
            .parent(id)
            .is_some_and(|parent| self.doc.children(parent).last() == Some(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::parse_markup;

    fn collapsed(source: &str) -> Vec<String> {
        let doc = parse_markup(source).unwrap();
        let texts = collapse(&doc);
        doc.descendants(doc.root())
            .into_iter()
            .filter_map(|id| texts.get(&id).cloned())
            .collect()
    }

    #[test]
    fn test_runs_collapse_to_one_space() {
        assert_eq!(collapsed("<p>  a \n\t b  </p>"), ["a b"]);
    }

    #[test]
    fn test_space_between_inline_elements_is_kept_once() {
        assert_eq!(collapsed("<p>one <b> two</b> three</p>"), ["one ", "two", " three"]);
    }

    #[test]
    fn test_block_boundaries_trim() {
        assert_eq!(collapsed("<div>a <p> b </p> c</div>"), ["a", "b", "c"]);
    }

    #[test]
    fn test_br_ends_the_line() {
        assert_eq!(collapsed("<p>a <br> b</p>"), ["a", "b"]);
    }

    #[test]
    fn test_preformatted_text_is_kept() {
        assert_eq!(collapsed("<pre>a\tb\n  c\n</pre>"), ["a    b\n  c"]);
    }
}

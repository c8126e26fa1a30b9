//! List markers and disclosure widgets.

use std::collections::HashMap;

use cellcss::types::{ListStylePosition, ListStyleType};

use super::{Layout, Space};
use crate::document::{Document, NodeId, PseudoKind};
use crate::strip::Strip;
use crate::theme::Theme;

const LIST_ELEMENTS: &[&str] = &["ol", "ul", "menu", "dir"];

/// Numbers the items of every list. `ol[start]` sets the first number and
/// `li[value]` restarts the count from its own.
pub(crate) fn number_items(doc: &Document) -> HashMap<NodeId, i64> {
    let mut ordinals = HashMap::new();
    for list in doc.descendants(doc.root()) {
        let Some(name) = doc.name(list).filter(|name| LIST_ELEMENTS.contains(name)) else {
            continue;
        };
        let mut count = match name {
            "ol" => parse_number(doc.attribute(list, "start")).unwrap_or(1) - 1,
            _ => 0,
        };
        for item in doc.element_children(list).filter(|item| doc.name(*item) == Some("li")) {
            count = parse_number(doc.attribute(item, "value")).unwrap_or(count + 1);
            ordinals.insert(item, count);
        }
    }
    ordinals
}

fn parse_number(value: Option<&str>) -> Option<i64> {
    value?.trim().parse().ok()
}

/// Marker text for a list style; `ordinal` is the item number.
pub(crate) fn bullet(style: ListStyleType, ordinal: i64) -> String {
    match style {
        ListStyleType::None => String::new(),
        ListStyleType::Disc => "•".to_string(),
        ListStyleType::Circle => "○".to_string(),
        ListStyleType::Square => "■".to_string(),
        ListStyleType::Triangle => "▲".to_string(),
        ListStyleType::DisclosureOpen => "▼".to_string(),
        ListStyleType::DisclosureClosed => "▶".to_string(),
        ListStyleType::Decimal => format!("{ordinal}."),
        ListStyleType::LowerAlpha => format!("{}.", alphabetic(ordinal).to_lowercase()),
        ListStyleType::UpperAlpha => format!("{}.", alphabetic(ordinal)),
        ListStyleType::LowerRoman => format!("{}.", roman(ordinal).to_lowercase()),
        ListStyleType::UpperRoman => format!("{}.", roman(ordinal)),
    }
}

/// 1 → A, 26 → Z, 27 → AA. Falls back to decimal below 1.
fn alphabetic(mut n: i64) -> String {
    if n < 1 {
        return n.to_string();
    }
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }
    letters.iter().rev().collect()
}

/// Roman numerals for 1..=3999; decimal outside that range.
fn roman(n: i64) -> String {
    const NUMERALS: [(i64, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    if !(1..4000).contains(&n) {
        return n.to_string();
    }
    let mut rest = n;
    let mut out = String::new();
    for (value, numeral) in NUMERALS {
        while rest >= value {
            out.push_str(numeral);
            rest -= value;
        }
    }
    out
}

impl Layout<'_> {
    /// The bullet or number shown for a list item.
    pub(crate) fn marker_text(&self, item: NodeId) -> String {
        let theme = self.doc.theme(item);
        let ordinal = self.ordinals.get(&item).copied().unwrap_or(1);
        bullet(theme.list_style_type(), ordinal)
    }

    /// Puts an inside marker at the start of the item's flow.
    pub(super) fn insert_inside_marker(&self, item: NodeId, theme: &Theme, children: &mut Vec<NodeId>) {
        if theme.list_style_position() != ListStylePosition::Inside {
            return;
        }
        if let Some(marker) = self.doc.pseudo(item, PseudoKind::Marker) {
            children.insert(0, marker);
        }
    }

    /// The marker hung in the margin left of an outside list item.
    pub(super) fn outside_marker(&mut self, item: NodeId, theme: &Theme) -> Option<Strip> {
        if !theme.is_list_item() || theme.list_style_position() != ListStylePosition::Outside {
            return None;
        }
        let marker = self.doc.pseudo(item, PseudoKind::Marker)?;
        let space = Space {
            width: usize::MAX / 2,
            height: self.config.height,
        };
        let lines = self.render_box(marker, space);
        lines.into_iter().next().filter(|line| !line.is_empty())
    }

    /// `details` shows its first `summary`, and the rest only when open.
    pub(super) fn render_details(&mut self, id: NodeId, theme: &Theme, space: Space) -> Vec<Strip> {
        let mut children = self.flow_children(id);
        if self.doc.attribute(id, "open").is_none() {
            let summary = children.iter().copied().find(|c| self.doc.name(*c) == Some("summary"));
            children = summary.into_iter().collect();
        }
        self.render_flow(id, theme, &children, space)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::markup::parse_markup;

    fn render(source: &str) -> Vec<String> {
        let mut doc = parse_markup(source).unwrap();
        let output = doc.render(&RenderConfig::default().with_viewport(20, 10));
        output.plain_lines().iter().map(|l| l.trim_end().to_string()).collect()
    }

    #[test]
    fn test_numbering_honours_start_and_value() {
        let doc = parse_markup(r#"<ol start="3"><li>a</li><li value="10">b</li><li>c</li></ol>"#).unwrap();
        let ordinals = number_items(&doc);
        let items = doc.find_all("li");
        let numbers: Vec<i64> = items.iter().map(|li| ordinals[li]).collect();
        assert_eq!(numbers, [3, 10, 11]);
    }

    #[test]
    fn test_bullets() {
        assert_eq!(bullet(ListStyleType::Disc, 1), "•");
        assert_eq!(bullet(ListStyleType::Decimal, 12), "12.");
        assert_eq!(bullet(ListStyleType::UpperAlpha, 28), "AB.");
        assert_eq!(bullet(ListStyleType::LowerRoman, 14), "xiv.");
        assert_eq!(bullet(ListStyleType::None, 1), "");
    }

    #[test]
    fn test_outside_markers_hang_in_the_padding() {
        assert_eq!(render("<ol><li>one</li><li>two</li></ol>"), ["", " 1. one", " 2. two", ""]);
    }

    #[test]
    fn test_nested_lists_change_bullets() {
        let lines = render("<ul><li>a<ul><li>b</li></ul></li></ul>");
        assert_eq!(lines, ["", " • a", "    ○ b", ""]);
    }

    #[test]
    fn test_closed_details_show_only_the_summary() {
        let closed = render("<details><summary>More</summary><p>hidden</p></details>");
        assert_eq!(closed, ["▶ More"]);
        let open = render("<details open><summary>More</summary><div>shown</div></details>");
        assert_eq!(open, ["▼ More", "shown"]);
    }
}

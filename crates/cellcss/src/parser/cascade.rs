//! CSS cascade and style computation.
//!
//! This module implements the cascade for document elements:
//!
//! - [`ElementMeta`]: element metadata for selector matching
//! - [`collect_declarations`]: the matching declarations of a set of style
//!   sheets, in the order they must be applied
//! - [`compute_style`]: folds one sheet's declarations into a
//!   [`ComputedStyle`]
//!
//! ## Cascade Algorithm
//!
//! 1. Find all rules whose selectors match the element and whose `@media`
//!    condition holds
//! 2. Sort by specificity (IDs > classes > types), then source order
//! 3. Apply the normal declarations in that order (later ones override)
//! 4. Apply the `!important` declarations in the same order
//!
//! ## Selector Matching
//!
//! The rightmost compound must match the element itself; each compound to
//! its left must match an ancestor further up the chain, with `>` requiring
//! the very next ancestor. Matching backtracks, so `div p` finds the `div`
//! even when a nearer ancestor also satisfies an earlier compound.
//!
//! Pseudo-element boxes (`::before`, `::after`, `::marker`) are matched as
//! elements named after the pseudo-element whose parent is the originating
//! element.

use std::collections::BTreeMap;

use log::trace;

use crate::{
    parser::{
        Combinator, ComplexSelector, CompoundSelector, NthChild, PseudoClass, Rule, SelectorPart,
        Selector, Specificity, StyleSheet, media::MediaContext,
    },
    types::{ComputedStyle, Declaration},
};

/// Metadata about an element used for selector matching.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementMeta {
    /// Lower-case tag name; pseudo-element boxes use `::before` and so on.
    pub name: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    /// Position among the parent's element children, from 0.
    pub index: usize,
    /// Number of element children of the parent.
    pub sibling_count: usize,
}

/// A rule that matched an element, bundled with its priority information.
#[derive(Debug)]
struct MatchedRule<'a> {
    specificity: Specificity,
    source_order: usize,
    rule: &'a Rule,
}

/// The declarations that apply to one element, in application order.
#[derive(Debug, Default)]
pub struct MatchedDeclarations<'a> {
    pub normal: Vec<&'a Declaration>,
    pub important: Vec<&'a Declaration>,
}

impl ElementMeta {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            sibling_count: 1,
            ..Self::default()
        }
    }

    /// Sets the attributes, deriving `id` and `classes` from them.
    pub fn with_attributes(mut self, attributes: BTreeMap<String, String>) -> Self {
        self.id = attributes.get("id").cloned();
        self.classes = attributes
            .get("class")
            .map(|c| c.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();
        self.attributes = attributes;
        self
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        let mut attributes = std::mem::take(&mut self.attributes);
        attributes.insert(name.to_ascii_lowercase(), value.to_string());
        self.with_attributes(attributes)
    }

    pub fn at_position(mut self, index: usize, sibling_count: usize) -> Self {
        self.index = index;
        self.sibling_count = sibling_count.max(index + 1);
        self
    }

    /// Whether this is a generated pseudo-element box.
    pub fn is_pseudo(&self) -> bool {
        self.name.starts_with("::")
    }

    /// Checks if this element matches a simple selector.
    pub fn matches_selector(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Type(name) => self.name == *name,
            Selector::Id(id) => self.id.as_ref() == Some(id),
            Selector::Class(class) => self.classes.contains(class),
            Selector::Universal => !self.is_pseudo(),
            Selector::PseudoElement(name) => self.name.strip_prefix("::") == Some(name.as_str()),
            Selector::PseudoClass(pseudo) => match pseudo {
                PseudoClass::FirstChild => self.index == 0,
                PseudoClass::LastChild => self.index + 1 == self.sibling_count,
                PseudoClass::OnlyChild => self.sibling_count == 1,
                PseudoClass::NthChild(NthChild::Odd) => self.index % 2 == 0,
                PseudoClass::NthChild(NthChild::Even) => self.index % 2 == 1,
                PseudoClass::NthChild(NthChild::Index(n)) => self.index + 1 == usize::from(*n),
                PseudoClass::Link => self.name == "a" && self.attributes.contains_key("href"),
            },
            Selector::Attribute { name, op, value } => self
                .attributes
                .get(name)
                .is_some_and(|actual| op.test(actual, value)),
        }
    }

    fn matches_compound(&self, compound: &CompoundSelector) -> bool {
        if self.is_pseudo() && compound.pseudo_element().is_none() {
            return false;
        }
        compound.selectors.iter().all(|s| self.matches_selector(s))
    }

    /// Checks if this element matches a complex selector given its ancestors.
    /// Ancestors should be ordered from immediate parent to root.
    pub fn matches_complex(&self, complex: &ComplexSelector, ancestors: &[ElementMeta]) -> bool {
        let Some((subject, rest)) = complex.parts.split_last() else {
            return false;
        };

        match subject.compound.pseudo_element() {
            Some(pseudo) => {
                // `li.x::marker`: the marker box itself, then `li.x` on its parent.
                if self.name.strip_prefix("::") != Some(pseudo) {
                    return false;
                }
                let Some(origin) = ancestors.first() else {
                    return false;
                };
                let matches_origin = subject
                    .compound
                    .selectors
                    .iter()
                    .filter(|s| !matches!(s, Selector::PseudoElement(_)))
                    .all(|s| origin.matches_selector(s));
                matches_origin && match_parts(rest, ancestors, 1)
            }
            None => self.matches_compound(&subject.compound) && match_parts(rest, ancestors, 0),
        }
    }
}

/// Matches `parts` (right to left) against `ancestors[pos..]`.
fn match_parts(parts: &[SelectorPart], ancestors: &[ElementMeta], pos: usize) -> bool {
    let Some((part, rest)) = parts.split_last() else {
        return true;
    };
    match part.combinator {
        Combinator::Child => ancestors
            .get(pos)
            .is_some_and(|a| a.matches_compound(&part.compound) && match_parts(rest, ancestors, pos + 1)),
        Combinator::Descendant | Combinator::None => (pos..ancestors.len()).any(|k| {
            ancestors[k].matches_compound(&part.compound) && match_parts(rest, ancestors, k + 1)
        }),
    }
}

/// Collects the declarations of every rule in `sheets` that applies to the
/// element.
///
/// Source order runs through the sheets in the order given, so a later sheet
/// wins ties against an earlier one.
pub fn collect_declarations<'a>(
    element: &ElementMeta,
    ancestors: &[ElementMeta],
    sheets: impl IntoIterator<Item = &'a StyleSheet>,
    media: &MediaContext,
) -> MatchedDeclarations<'a> {
    let mut matched_rules = Vec::new();

    // 1. Find all matching rules
    let rules = sheets.into_iter().flat_map(|sheet| sheet.rules.iter());
    for (idx, rule) in rules.enumerate() {
        if rule.media.as_ref().is_some_and(|m| !m.evaluate(media)) {
            continue;
        }
        let specificity = rule
            .selectors
            .selectors
            .iter()
            .filter(|complex| element.matches_complex(complex, ancestors))
            .map(ComplexSelector::specificity)
            .max();
        if let Some(specificity) = specificity {
            matched_rules.push(MatchedRule {
                specificity,
                source_order: idx,
                rule,
            });
        }
    }

    // 2. Sort by Specificity, then Source Order
    matched_rules.sort_by(|a, b| {
        a.specificity
            .cmp(&b.specificity)
            .then(a.source_order.cmp(&b.source_order))
    });

    trace!(
        "<{}> matched {} rule(s)",
        element.name,
        matched_rules.len()
    );

    let mut matched = MatchedDeclarations::default();
    for m in &matched_rules {
        matched.normal.extend(m.rule.declarations.iter());
    }
    for m in &matched_rules {
        matched.important.extend(m.rule.important.iter());
    }
    matched
}

/// The core cascade function for a single style sheet.
///
/// `parent` supplies inherited values and resolves `inherit`.
pub fn compute_style(
    element: &ElementMeta,
    ancestors: &[ElementMeta],
    stylesheet: &StyleSheet,
    media: &MediaContext,
    parent: Option<&ComputedStyle>,
) -> ComputedStyle {
    let matched = collect_declarations(element, ancestors, [stylesheet], media);

    let mut computed = ComputedStyle::default();
    for decl in matched.normal.iter().chain(matched.important.iter()) {
        computed.apply(decl, parent);
    }
    if let Some(parent) = parent {
        // An `unset` declaration blocks inheritance of that property.
        let unset: Vec<_> = matched
            .normal
            .iter()
            .chain(matched.important.iter())
            .filter_map(|d| match d {
                Declaration::Unset(p) => Some(*p),
                _ => None,
            })
            .collect();
        computed.inherit_from(parent, |p| !unset.contains(&p));
    }
    computed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_stylesheet;
    use crate::types::{Display, RgbaColor, Scalar, Unit};

    fn chain(names: &[&str]) -> Vec<ElementMeta> {
        names.iter().map(|n| ElementMeta::new(*n)).collect()
    }

    #[test]
    fn test_id_selector_overrides_type_selector() {
        let css = r#"
div {
    width: 1fr;
    height: 1fr;
}

#vertical-layout {
    height: auto;
}
"#;

        let stylesheet = parse_stylesheet(css).expect("Failed to parse CSS");
        let element = ElementMeta::new("div").with_attribute("id", "vertical-layout");

        let style = compute_style(&element, &[], &stylesheet, &MediaContext::default(), None);

        // ID selector should override type selector
        assert_eq!(style.height.map(|h| h.unit), Some(Unit::Auto));
        assert_eq!(style.width, Some(Scalar::new(1.0, Unit::Fraction)));
    }

    #[test]
    fn descendant_matching_backtracks() {
        let sheet = parse_stylesheet("div > p span { display: none; }").unwrap();
        let complex = &sheet.rules[0].selectors.selectors[0];
        let span = ElementMeta::new("span");
        // span < b < p < div: `p` is not the nearest ancestor
        assert!(span.matches_complex(complex, &chain(&["b", "p", "div"])));
        // the `p` must be a direct child of the `div`
        assert!(!span.matches_complex(complex, &chain(&["p", "section", "div"])));
        // and the first `p` tried may fail while a later one succeeds
        assert!(span.matches_complex(complex, &chain(&["p", "em", "p", "div"])));
    }

    #[test]
    fn pseudo_elements_match_through_their_origin() {
        let sheet = parse_stylesheet("ol > li::marker { color: red; } ::marker { display: inline; }").unwrap();
        let marker = ElementMeta::new("::marker");
        let ancestors = chain(&["li", "ol"]);
        let style = compute_style(&marker, &ancestors, &sheet, &MediaContext::default(), None);
        assert_eq!(style.color, Some(RgbaColor::rgb(255, 0, 0)));
        assert_eq!(style.display, Some(Display::Inline));

        // `*` never selects generated boxes
        let universal = parse_stylesheet("* { display: none; }").unwrap();
        let style = compute_style(&marker, &ancestors, &universal, &MediaContext::default(), None);
        assert_eq!(style.display, None);
    }

    #[test]
    fn structural_pseudo_classes() {
        let first = ElementMeta::new("li").at_position(0, 3);
        let last = ElementMeta::new("li").at_position(2, 3);
        let sheet = parse_stylesheet(
            "li:first-child { order: 1; } li:last-child { order: 3; } li:nth-child(odd) { z-index: 7; }",
        )
        .unwrap();
        let media = MediaContext::default();
        let style = compute_style(&first, &[], &sheet, &media, None);
        assert_eq!((style.order, style.z_index), (Some(1), Some(7)));
        let style = compute_style(&last, &[], &sheet, &media, None);
        assert_eq!((style.order, style.z_index), (Some(3), Some(7)));
    }

    #[test]
    fn media_guards_rules() {
        let sheet = parse_stylesheet(
            "p { order: 1; } @media (min-width: 100) { p { order: 2; } }",
        )
        .unwrap();
        let p = ElementMeta::new("p");
        let narrow = compute_style(&p, &[], &sheet, &MediaContext::new(80.0, 24.0), None);
        let wide = compute_style(&p, &[], &sheet, &MediaContext::new(120.0, 24.0), None);
        assert_eq!(narrow.order, Some(1));
        assert_eq!(wide.order, Some(2));
    }

    #[test]
    fn unset_blocks_inheritance() {
        let sheet = parse_stylesheet("td { text-align: unset; }").unwrap();
        let mut parent = ComputedStyle::default();
        parent.apply(&Declaration::TextAlign(crate::types::TextAlign::Center), None);
        parent.apply(&Declaration::Color(RgbaColor::white()), None);

        let td = ElementMeta::new("td");
        let style = compute_style(&td, &chain(&["tr"]), &sheet, &MediaContext::default(), Some(&parent));
        assert_eq!(style.text_align, None);
        assert_eq!(style.color, Some(RgbaColor::white()));
    }
}

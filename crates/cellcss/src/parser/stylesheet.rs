use crate::parser::media::MediaQuery;
use crate::types::Declaration;

/// CSS specificity for determining rule precedence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Specificity {
    pub ids: u32,
    pub classes: u32,
    pub types: u32,
}

impl std::ops::Add for Specificity {
    type Output = Specificity;

    fn add(self, other: Specificity) -> Specificity {
        Specificity {
            ids: self.ids + other.ids,
            classes: self.classes + other.classes,
            types: self.types + other.types,
        }
    }
}

/// Which siblings an `:nth-child()` pseudo-class selects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NthChild {
    Odd,
    Even,
    /// A 1-based position.
    Index(u16),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PseudoClass {
    FirstChild,
    LastChild,
    OnlyChild,
    NthChild(NthChild),
    /// An `a` element with an `href`.
    Link,
}

/// How an attribute selector compares the attribute value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttrOp {
    /// `[name]`
    Exists,
    /// `[name=value]`
    Equals,
    /// `[name*=value]`
    Contains,
    /// `[name^=value]`
    Prefix,
    /// `[name$=value]`
    Suffix,
    /// `[name~=value]`: one of the whitespace separated words.
    Includes,
    /// `[name|=value]`: exactly `value` or starting with `value-`.
    DashMatch,
}

impl AttrOp {
    pub fn test(self, actual: &str, expected: &str) -> bool {
        match self {
            AttrOp::Exists => true,
            AttrOp::Equals => actual == expected,
            AttrOp::Contains => actual.contains(expected),
            AttrOp::Prefix => actual.starts_with(expected),
            AttrOp::Suffix => actual.ends_with(expected),
            AttrOp::Includes => actual.split_whitespace().any(|word| word == expected),
            AttrOp::DashMatch => {
                actual == expected
                    || actual
                        .strip_prefix(expected)
                        .is_some_and(|rest| rest.starts_with('-'))
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    Type(String),
    Class(String),
    Id(String),
    Universal,
    PseudoClass(PseudoClass),
    /// `::before`, `::after` or `::marker`, stored without the colons.
    PseudoElement(String),
    Attribute {
        name: String,
        op: AttrOp,
        value: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompoundSelector {
    pub selectors: Vec<Selector>,
}

impl CompoundSelector {
    pub fn new(selectors: Vec<Selector>) -> Self {
        Self { selectors }
    }

    pub fn specificity(&self) -> Specificity {
        let mut spec = Specificity::default();
        for s in &self.selectors {
            match s {
                Selector::Id(_) => spec.ids += 1,
                // Attributes have the same specificity as classes and pseudo-classes
                Selector::Class(_) | Selector::PseudoClass(_) | Selector::Attribute { .. } => {
                    spec.classes += 1;
                }
                Selector::Type(_) | Selector::PseudoElement(_) => spec.types += 1,
                Selector::Universal => {}
            }
        }
        spec
    }

    /// The pseudo-element this compound selects, if any.
    pub fn pseudo_element(&self) -> Option<&str> {
        self.selectors.iter().find_map(|s| match s {
            Selector::PseudoElement(name) => Some(name.as_str()),
            _ => None,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    None,
    Descendant,
    Child,
}

/// A compound selector and its relation to the part on its right.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorPart {
    pub compound: CompoundSelector,
    pub combinator: Combinator,
}

impl SelectorPart {
    pub fn new(compound: CompoundSelector, combinator: Combinator) -> Self {
        Self {
            compound,
            combinator,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComplexSelector {
    pub parts: Vec<SelectorPart>,
}

impl ComplexSelector {
    pub fn new(parts: Vec<SelectorPart>) -> Self {
        Self { parts }
    }

    pub fn specificity(&self) -> Specificity {
        self.parts
            .iter()
            .map(|p| p.compound.specificity())
            .fold(Specificity::default(), |acc, x| acc + x)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

impl SelectorList {
    pub fn new(selectors: Vec<ComplexSelector>) -> Self {
        Self { selectors }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    pub selectors: SelectorList,
    pub declarations: Vec<Declaration>,
    /// Declarations marked `!important`.
    pub important: Vec<Declaration>,
    /// The `@media` condition guarding the rule.
    pub media: Option<MediaQuery>,
}

impl Rule {
    pub fn new(
        selectors: SelectorList,
        declarations: Vec<Declaration>,
        important: Vec<Declaration>,
    ) -> Self {
        Self {
            selectors,
            declarations,
            important,
            media: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleSheet {
    pub rules: Vec<Rule>,
}

impl StyleSheet {
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Appends the rules of `other`, which then come later in source order.
    pub fn extend(&mut self, other: StyleSheet) {
        self.rules.extend(other.rules);
    }
}

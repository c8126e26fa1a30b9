//! Document arena.
//!
//! Nodes live in a flat `Vec` and refer to each other by [`NodeId`]; a child
//! knows its parent by index, so there are no ownership cycles. Every element
//! owns three generated boxes (`::before`, `::after`, `::marker`) that are not
//! part of its child list and so never shift sibling positions.
//!
//! ```
//! use cellbox::Document;
//!
//! let mut doc = Document::new();
//! let p = doc.element("p", [("class", "lead")]);
//! let text = doc.text("Hello");
//! doc.append(p, text).unwrap();
//! doc.append(doc.root(), p).unwrap();
//!
//! assert_eq!(doc.text_content(p), "Hello");
//! assert_eq!(doc.attribute(p, "class"), Some("lead"));
//! ```

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use cellcss::parser::{StyleSheet, parse_stylesheet};
use cellcss::ElementMeta;
use log::{trace, warn};

use crate::config::RenderConfig;
use crate::error::{CellboxError, Result};
use crate::theme::Theme;

/// Index of a node in its [`Document`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Generated boxes attached to every element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PseudoKind {
    Before,
    After,
    Marker,
}

impl PseudoKind {
    /// The element name used to match `::before` style selectors.
    pub fn selector_name(self) -> &'static str {
        match self {
            PseudoKind::Before => "::before",
            PseudoKind::After => "::after",
            PseudoKind::Marker => "::marker",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Element {
        name: String,
        attributes: BTreeMap<String, String>,
    },
    Text(String),
    Pseudo(PseudoKind),
}

#[derive(Clone, Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub before: Option<NodeId>,
    pub after: Option<NodeId>,
    pub marker: Option<NodeId>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            before: None,
            after: None,
            marker: None,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element { .. })
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text(_))
    }

    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { name, .. } => Some(name),
            NodeKind::Pseudo(kind) => Some(kind.selector_name()),
            NodeKind::Text(_) => None,
        }
    }
}

/// Elements that never have content or generated `::before`/`::after` boxes.
pub const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "meta", "link", "input", "wbr"];

pub(crate) const ROOT_NAME: &str = "::root";

/// Whether an `img` source loaded, and what it converted to.
#[derive(Clone, Debug, PartialEq)]
pub enum AssetState {
    Loaded {
        data: Arc<Vec<u8>>,
        /// Text from the media converter, when a route to `ansi` exists.
        rendered: Option<String>,
    },
    Missing(String),
}

/// Memoised style state, valid for a single generation.
#[derive(Default)]
pub(crate) struct StyleCache {
    generation: Option<u64>,
    pub(crate) themes: HashMap<NodeId, Arc<Theme>>,
    pub(crate) embedded: Arc<Vec<StyleSheet>>,
}

/// A document tree plus the style sheets and assets it renders with.
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    sheets: Vec<StyleSheet>,
    pub(crate) assets: HashMap<String, AssetState>,
    config: RenderConfig,
    generation: u64,
    pub(crate) cache: RefCell<StyleCache>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.nodes.len())
            .field("root", &self.root)
            .field("sheets", &self.sheets.len())
            .field("assets", &self.assets.keys().collect::<Vec<_>>())
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            sheets: Vec::new(),
            assets: HashMap::new(),
            config: RenderConfig::default(),
            generation: 0,
            cache: RefCell::new(StyleCache::default()),
        };
        doc.root = doc.element(ROOT_NAME, Vec::<(String, String)>::new());
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Incremented by every edit that can change a theme or a layout.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub(crate) fn bump_generation(&mut self) {
        self.generation += 1;
        trace!("document generation -> {}", self.generation);
    }

    /// Adopts a new configuration, invalidating themes when it differs.
    pub fn set_config(&mut self, config: &RenderConfig) {
        if self.config != *config {
            self.config = config.clone();
            self.bump_generation();
        }
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Creates a detached element.
    pub fn element<K, V>(&mut self, name: &str, attributes: impl IntoIterator<Item = (K, V)>) -> NodeId
    where
        K: Into<String>,
        V: Into<String>,
    {
        let name = name.to_ascii_lowercase();
        let attributes = attributes
            .into_iter()
            .map(|(k, v)| (k.into().to_ascii_lowercase(), v.into()))
            .collect();
        let void = VOID_ELEMENTS.contains(&name.as_str());
        let id = self.push(Node::new(NodeKind::Element { name, attributes }));

        let pseudo = |doc: &mut Self, kind| {
            let mut node = Node::new(NodeKind::Pseudo(kind));
            node.parent = Some(id);
            doc.push(node)
        };
        let marker = pseudo(self, PseudoKind::Marker);
        self.nodes[id.0].marker = Some(marker);
        if !void {
            let before = pseudo(self, PseudoKind::Before);
            let after = pseudo(self, PseudoKind::After);
            self.nodes[id.0].before = Some(before);
            self.nodes[id.0].after = Some(after);
        }
        self.bump_generation();
        id
    }

    /// Creates a detached text node.
    pub fn text(&mut self, text: impl Into<String>) -> NodeId {
        let id = self.push(Node::new(NodeKind::Text(text.into())));
        self.bump_generation();
        id
    }

    fn check(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.0).ok_or(CellboxError::UnknownNode(id))
    }

    /// Moves `child` to the end of `parent`'s children.
    pub fn append(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let parent_node = self.check(parent)?;
        self.check(child)?;
        if !parent_node.is_element() {
            return Err(CellboxError::InvalidTree(format!(
                "{parent:?} is not an element and cannot have children"
            )));
        }
        if matches!(self.nodes[child.0].kind, NodeKind::Pseudo(_)) || child == self.root {
            return Err(CellboxError::InvalidTree(format!("{child:?} cannot be moved")));
        }
        if self.ancestors(parent).any(|a| a == child) || parent == child {
            return Err(CellboxError::InvalidTree(format!(
                "{child:?} cannot be appended inside itself"
            )));
        }

        if let Some(old) = self.nodes[child.0].parent.take() {
            self.nodes[old.0].children.retain(|c| *c != child);
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        self.bump_generation();
        Ok(())
    }

    /// Creates an element and appends it to `parent`.
    pub fn append_element<K, V>(
        &mut self,
        parent: NodeId,
        name: &str,
        attributes: impl IntoIterator<Item = (K, V)>,
    ) -> Result<NodeId>
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.check(parent)?;
        let id = self.element(name, attributes);
        self.append(parent, id)?;
        Ok(id)
    }

    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) -> Result<NodeId> {
        self.check(parent)?;
        let id = self.text(text);
        self.append(parent, id)?;
        Ok(id)
    }

    /// Detaches `id` from its parent. The node stays in the arena.
    pub fn detach(&mut self, id: NodeId) -> Result<()> {
        self.check(id)?;
        if matches!(self.nodes[id.0].kind, NodeKind::Pseudo(_)) {
            return Ok(());
        }
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != id);
            self.bump_generation();
        }
        Ok(())
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: impl Into<String>) -> Result<()> {
        self.check(id)?;
        match &mut self.nodes[id.0].kind {
            NodeKind::Element { attributes, .. } => {
                attributes.insert(name.to_ascii_lowercase(), value.into());
            }
            _ => {
                return Err(CellboxError::InvalidTree(format!("{id:?} has no attributes")));
            }
        }
        self.bump_generation();
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<Option<String>> {
        self.check(id)?;
        let removed = match &mut self.nodes[id.0].kind {
            NodeKind::Element { attributes, .. } => attributes.remove(&name.to_ascii_lowercase()),
            _ => None,
        };
        if removed.is_some() {
            self.bump_generation();
        }
        Ok(removed)
    }

    /// Replaces the text of a text node.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> Result<()> {
        self.check(id)?;
        match &mut self.nodes[id.0].kind {
            NodeKind::Text(old) => *old = text.into(),
            _ => return Err(CellboxError::InvalidTree(format!("{id:?} is not a text node"))),
        }
        self.bump_generation();
        Ok(())
    }

    /// Adds an author style sheet after those already present.
    pub fn add_stylesheet(&mut self, sheet: StyleSheet) {
        self.sheets.push(sheet);
        self.bump_generation();
    }

    /// Parses and adds an author style sheet.
    pub fn add_css(&mut self, source: &str) -> Result<()> {
        let sheet = parse_stylesheet(source)?;
        self.add_stylesheet(sheet);
        Ok(())
    }

    pub fn stylesheets(&self) -> &[StyleSheet] {
        &self.sheets
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes[self.root.0].children.is_empty()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id.0).map_or(&[], |n| n.children.as_slice())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    /// Ancestors from the parent up to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |p| self.parent(*p))
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id.0).and_then(Node::name)
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.nodes.get(id.0)?.kind {
            NodeKind::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            _ => None,
        }
    }

    pub fn attributes(&self, id: NodeId) -> Option<&BTreeMap<String, String>> {
        match &self.nodes.get(id.0)?.kind {
            NodeKind::Element { attributes, .. } => Some(attributes),
            _ => None,
        }
    }

    pub fn is_pseudo(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.0)
            .is_some_and(|n| matches!(n.kind, NodeKind::Pseudo(_)))
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        self.nodes.get(id.0).is_some_and(Node::is_text)
    }

    /// The text of a text node, or `None` for anything else.
    pub fn text_of(&self, id: NodeId) -> Option<&str> {
        match &self.nodes.get(id.0)?.kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(text) = self.text_of(id) {
            out.push_str(text);
        }
        for d in self.descendants(id) {
            if let Some(text) = self.text_of(d) {
                out.push_str(text);
            }
        }
        out
    }

    /// Descendants of `id` in document order, not including `id`.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev());
        }
        out
    }

    /// The first element named `name` in document order.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|d| self.name(*d) == Some(name))
    }

    pub fn find_all(&self, name: &str) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|d| self.name(*d) == Some(name))
            .collect()
    }

    /// The generated box of `kind` for element `id`.
    pub fn pseudo(&self, id: NodeId, kind: PseudoKind) -> Option<NodeId> {
        let node = self.nodes.get(id.0)?;
        match kind {
            PseudoKind::Before => node.before,
            PseudoKind::After => node.after,
            PseudoKind::Marker => node.marker,
        }
    }

    pub fn pseudo_kind(&self, id: NodeId) -> Option<PseudoKind> {
        match self.nodes.get(id.0)?.kind {
            NodeKind::Pseudo(kind) => Some(kind),
            _ => None,
        }
    }

    /// Element children only, in order.
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.nodes[c.0].is_element())
    }

    /// Selector-matching metadata for an element or generated box.
    pub fn element_meta(&self, id: NodeId) -> Option<ElementMeta> {
        let node = self.nodes.get(id.0)?;
        match &node.kind {
            NodeKind::Element { name, attributes } => {
                let mut attributes = attributes.clone();
                if name == "img" && !self.image_loaded(id) {
                    attributes.insert("_missing".to_string(), String::new());
                }
                let (index, count) = match node.parent {
                    Some(parent) => {
                        let siblings: Vec<_> = self.element_children(parent).collect();
                        let index = siblings.iter().position(|s| *s == id).unwrap_or(0);
                        (index, siblings.len())
                    }
                    None => (0, 1),
                };
                Some(
                    ElementMeta::new(name.as_str())
                        .with_attributes(attributes)
                        .at_position(index, count),
                )
            }
            NodeKind::Pseudo(kind) => Some(ElementMeta::new(kind.selector_name())),
            NodeKind::Text(_) => None,
        }
    }

    /// Metadata of the element ancestors, nearest first, excluding the root.
    pub fn ancestor_metas(&self, id: NodeId) -> Vec<ElementMeta> {
        self.ancestors(id)
            .filter(|a| *a != self.root)
            .filter_map(|a| self.element_meta(a))
            .collect()
    }

    /// The resolved `src` of an `img`, if it has one.
    pub fn image_source(&self, id: NodeId) -> Option<String> {
        let src = self.attribute(id, "src")?.trim();
        (!src.is_empty()).then(|| self.config.resolve_uri(src))
    }

    pub fn asset(&self, uri: &str) -> Option<&AssetState> {
        self.assets.get(uri)
    }

    pub(crate) fn image_loaded(&self, id: NodeId) -> bool {
        self.image_source(id)
            .and_then(|uri| self.assets.get(&uri))
            .is_some_and(|state| matches!(state, AssetState::Loaded { .. }))
    }

    pub(crate) fn set_asset(&mut self, uri: String, state: AssetState) {
        self.assets.insert(uri, state);
        self.bump_generation();
    }

    /// Style sheets from `<style>` elements, in document order.
    fn collect_embedded(&self) -> Vec<StyleSheet> {
        self.find_all("style")
            .into_iter()
            .filter_map(|style| {
                let source = self.text_content(style);
                match parse_stylesheet(&source) {
                    Ok(sheet) => Some(sheet),
                    Err(err) => {
                        warn!("skipping <style> element {style:?}: {err}");
                        None
                    }
                }
            })
            .collect()
    }

    /// Drops memoised themes if the document changed since they were made.
    pub(crate) fn refresh_cache(&self) {
        let stale = self.cache.borrow().generation != Some(self.generation);
        if stale {
            let embedded = Arc::new(self.collect_embedded());
            let mut cache = self.cache.borrow_mut();
            cache.generation = Some(self.generation);
            cache.themes.clear();
            cache.embedded = embedded;
        }
    }

    pub(crate) fn embedded_sheets(&self) -> Arc<Vec<StyleSheet>> {
        self.refresh_cache();
        Arc::clone(&self.cache.borrow().embedded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, NodeId, NodeId) {
        let mut doc = Document::new();
        let ul = doc.append_element(doc.root(), "ul", [("id", "list")]).unwrap();
        let first = doc.append_element(ul, "li", Vec::<(&str, &str)>::new()).unwrap();
        doc.append_text(first, "one").unwrap();
        let second = doc.append_element(ul, "LI", [("CLASS", "b c")]).unwrap();
        doc.append_text(second, "two").unwrap();
        (doc, ul, second)
    }

    #[test]
    fn test_debug_summarises_the_arena() {
        let (doc, _, _) = sample();
        let debug = format!("{doc:?}");
        assert!(debug.starts_with("Document {"));
        assert!(debug.contains(&format!("nodes: {}", doc.len())));
    }

    #[test]
    fn test_builder_links_parents() {
        let (doc, ul, second) = sample();
        assert_eq!(doc.parent(second), Some(ul));
        assert_eq!(doc.children(ul).len(), 2);
        assert_eq!(doc.name(second), Some("li"));
        assert_eq!(doc.attribute(second, "class"), Some("b c"));
        assert_eq!(doc.text_content(ul), "onetwo");
        assert_eq!(doc.find("li"), doc.children(ul).first().copied());
    }

    #[test]
    fn test_pseudo_boxes_stay_out_of_children() {
        let (doc, ul, second) = sample();
        let marker = doc.pseudo(second, PseudoKind::Marker).unwrap();
        assert_eq!(doc.parent(marker), Some(second));
        assert!(!doc.children(second).contains(&marker));
        assert!(doc.descendants(ul).iter().all(|d| !doc.is_pseudo(*d)));

        let mut doc = Document::new();
        let br = doc.element("br", Vec::<(&str, &str)>::new());
        assert!(doc.pseudo(br, PseudoKind::Before).is_none());
        assert!(doc.pseudo(br, PseudoKind::Marker).is_some());
    }

    #[test]
    fn test_element_meta_positions() {
        let (doc, ul, second) = sample();
        let meta = doc.element_meta(second).unwrap();
        assert_eq!(meta.index, 1);
        assert_eq!(meta.sibling_count, 2);
        assert_eq!(meta.classes, vec!["b", "c"]);

        let ancestors = doc.ancestor_metas(second);
        assert_eq!(ancestors.len(), 1);
        assert_eq!(ancestors[0].id.as_deref(), Some("list"));
        assert_eq!(doc.ancestor_metas(ul).len(), 0);
    }

    #[test]
    fn test_append_moves_and_rejects_cycles() {
        let (mut doc, ul, second) = sample();
        let root = doc.root();
        doc.append(root, second).unwrap();
        assert_eq!(doc.children(ul).len(), 1);
        assert_eq!(doc.parent(second), Some(root));

        assert!(matches!(doc.append(second, root), Err(CellboxError::InvalidTree(_))));
        let text = doc.children(second)[0];
        assert!(doc.append(text, ul).is_err());
        assert!(matches!(
            doc.append(root, NodeId(9999)),
            Err(CellboxError::UnknownNode(NodeId(9999)))
        ));
    }

    #[test]
    fn test_edits_bump_generation() {
        let (mut doc, _, second) = sample();
        let start = doc.generation();
        doc.set_attribute(second, "title", "x").unwrap();
        assert!(doc.generation() > start);

        let after_attr = doc.generation();
        doc.set_config(&RenderConfig::default());
        assert_eq!(doc.generation(), after_attr);
        doc.set_config(&RenderConfig::default().with_viewport(40, 10));
        assert!(doc.generation() > after_attr);

        let before_css = doc.generation();
        doc.add_css("li { color: red }").unwrap();
        assert!(doc.generation() > before_css);
        assert!(doc.add_css("li { color: red").is_err());
    }

    #[test]
    fn test_missing_image_meta() {
        let mut doc = Document::new();
        let img = doc.append_element(doc.root(), "img", [("src", "a.png")]).unwrap();
        let meta = doc.element_meta(img).unwrap();
        assert!(meta.attributes.contains_key("_missing"));

        doc.set_asset(
            "a.png".into(),
            AssetState::Loaded {
                data: Arc::new(vec![1, 2, 3]),
                rendered: None,
            },
        );
        let meta = doc.element_meta(img).unwrap();
        assert!(!meta.attributes.contains_key("_missing"));
    }

    #[test]
    fn test_embedded_style_sheets() {
        let mut doc = Document::new();
        let style = doc.append_element(doc.root(), "style", Vec::<(&str, &str)>::new()).unwrap();
        doc.append_text(style, "p { color: red }").unwrap();
        let broken = doc.append_element(doc.root(), "style", Vec::<(&str, &str)>::new()).unwrap();
        doc.append_text(broken, "p { color: ").unwrap();
        assert_eq!(doc.embedded_sheets().len(), 1);
    }
}

// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core document implementation: structure, attributes, style, focus.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::Rect;

use crate::focusable::is_focusable;
use crate::node::NodeId;

/// A recorded change of the focused element.
///
/// The document does not dispatch events itself. Every successful focus change is
/// appended to an internal log that an event loop drains with
/// [`Document::take_focus_moves`] to deliver blur/focus notifications.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FocusMove {
    /// Element that lost focus, if any.
    pub from: Option<NodeId>,
    /// Element that gained focus, or `None` when focus returned to the body.
    pub to: Option<NodeId>,
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attributes: Vec<(String, String)>,
    style: Vec<(String, String)>,
    bounds: Rect,
}

impl Node {
    fn new(generation: u32, tag: String) -> Self {
        Self {
            generation,
            tag,
            parent: None,
            children: Vec::new(),
            attributes: Vec::new(),
            style: Vec::new(),
            bounds: Rect::ZERO,
        }
    }
}

/// An arena-backed element tree standing in for a live DOM.
///
/// The document always has an `html` root with a `body` child. Elements are
/// created detached and become part of the document once appended beneath the
/// root. Attribute names and tag names are stored lowercase.
///
/// ## Example
///
/// ```rust
/// use twine_dom::Document;
///
/// let mut doc = Document::new();
/// let button = doc.create_element("button");
/// doc.append_child(doc.body(), button);
/// doc.set_attribute(button, "aria-expanded", "false");
///
/// assert!(doc.is_connected(button));
/// assert_eq!(doc.attribute(button, "aria-expanded"), Some("false"));
/// assert!(doc.focus(button));
/// assert_eq!(doc.active_element(), Some(button));
/// ```
pub struct Document {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    root: NodeId,
    body: NodeId,
    active: Option<NodeId>,
    focus_moves: Vec<FocusMove>,
    scrolled: Option<NodeId>,
}

impl core::fmt::Debug for Document {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Document")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document containing only `html` and `body`.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: NodeId::new(0, 0),
            body: NodeId::new(0, 0),
            active: None,
            focus_moves: Vec::new(),
            scrolled: None,
        };
        let root = doc.create_element("html");
        let body = doc.create_element("body");
        doc.root = root;
        doc.body = body;
        doc.append_child(root, body);
        doc
    }

    /// The `html` element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The `body` element.
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Create a detached element with the given tag.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let tag = tag.to_ascii_lowercase();
        if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx] + 1;
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, tag));
            NodeId::new(idx as u32, generation)
        } else {
            let idx = self.nodes.len();
            self.nodes.push(Some(Node::new(1, tag)));
            self.generations.push(1);
            NodeId::new(idx as u32, 1)
        }
    }

    /// Returns `true` if `id` refers to a live element.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes
            .get(id.idx())
            .and_then(Option::as_ref)
            .filter(|n| n.generation == id.generation())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes
            .get_mut(id.idx())
            .and_then(Option::as_mut)
            .filter(|n| n.generation == id.generation())
    }

    /// Lowercase tag name of the element.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(|n| n.tag.as_str())
    }

    /// Returns `true` if the element exists and has the given tag.
    pub fn is_tag(&self, id: NodeId, tag: &str) -> bool {
        self.tag(id).is_some_and(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Parent element, if attached.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Children in document order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Append `child` as the last child of `parent`, moving it if already attached.
    ///
    /// Appending an ancestor beneath one of its own descendants is ignored.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.insert_before(parent, child, None);
    }

    /// Insert `child` into `parent` before `reference`, or last when `reference` is `None`
    /// or not a child of `parent`.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        if !self.is_alive(parent) || !self.is_alive(child) || self.contains(child, parent) {
            debug_assert!(
                self.is_alive(parent) && self.is_alive(child),
                "insert_before called with a stale node"
            );
            return;
        }
        self.unlink(child);
        let Some(p) = self.node_mut(parent) else {
            return;
        };
        let at = reference
            .and_then(|r| p.children.iter().position(|&c| c == r))
            .unwrap_or(p.children.len());
        p.children.insert(at, child);
        if let Some(c) = self.node_mut(child) {
            c.parent = Some(parent);
        }
    }

    fn unlink(&mut self, child: NodeId) {
        let Some(parent) = self.parent(child) else {
            return;
        };
        if let Some(p) = self.node_mut(parent) {
            p.children.retain(|&c| c != child);
        }
        if let Some(c) = self.node_mut(child) {
            c.parent = None;
        }
    }

    /// Detach an element (and its subtree) from its parent. The handle stays alive.
    ///
    /// If the focused element lives in the detached subtree, focus is dropped
    /// without a recorded [`FocusMove`], matching how browsers silently reset
    /// focus on removal.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(active) = self.active
            && self.contains(id, active)
        {
            self.active = None;
        }
        self.unlink(id);
    }

    /// Detach and free an element and its whole subtree. All handles into the subtree become stale.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) || id == self.root || id == self.body {
            return;
        }
        self.detach(id);
        let mut stack = alloc::vec![id];
        while let Some(n) = stack.pop() {
            stack.extend_from_slice(self.children(n));
            let idx = n.idx();
            self.nodes[idx] = None;
            self.free_list.push(idx);
        }
    }

    /// Returns `true` if the element is attached beneath the document root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.ancestors(id).last() == Some(self.root)
    }

    /// Iterate the element and its ancestors, innermost first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.is_alive(id).then_some(id),
        }
    }

    /// Iterate the strict descendants of an element in document (pre-)order.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        Descendants { doc: self, stack }
    }

    /// Returns `true` if `node` is `ancestor` or lives beneath it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).any(|n| n == ancestor)
    }

    /// Nearest inclusive ancestor matching `predicate`.
    pub fn closest(&self, id: NodeId, mut predicate: impl FnMut(NodeId) -> bool) -> Option<NodeId> {
        self.ancestors(id).find(|&n| predicate(n))
    }

    /// Nearest inclusive ancestor with the given tag.
    pub fn closest_tag(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        self.closest(id, |n| self.is_tag(n, tag))
    }

    /// Number of ancestors above the element.
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count().saturating_sub(1)
    }

    /// Root→element path, inclusive.
    pub fn path(&self, id: NodeId) -> Vec<NodeId> {
        let mut path: Vec<NodeId> = self.ancestors(id).collect();
        path.reverse();
        path
    }

    /// First connected element in document order whose `id` attribute equals `id`.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.descendants(self.root)
            .find(|&n| self.attribute(n, "id") == Some(id))
    }

    /// Strict descendants of `scope` with the given tag, in document order.
    pub fn elements_by_tag<'a>(
        &'a self,
        scope: NodeId,
        tag: &'a str,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.descendants(scope).filter(move |&n| self.is_tag(n, tag))
    }

    /// Attribute value.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id)?
            .attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` if the attribute is present (with any value).
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    /// Returns `true` if the whitespace-separated token list in `name` contains `token`.
    pub fn has_token(&self, id: NodeId, name: &str, token: &str) -> bool {
        self.attribute(id, name)
            .is_some_and(|v| v.split_ascii_whitespace().any(|t| t == token))
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        let Some(node) = self.node_mut(id) else {
            debug_assert!(false, "set_attribute on a stale node");
            return;
        };
        match node
            .attributes
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
        {
            Some((_, v)) => {
                if v != value {
                    *v = value.to_string();
                }
            }
            None => node
                .attributes
                .push((name.to_ascii_lowercase(), value.to_string())),
        }
    }

    /// Set an attribute only if the element does not already carry it.
    ///
    /// Author-provided values win, so markup can pin ids and initial states.
    pub fn set_attribute_if_absent(&mut self, id: NodeId, name: &str, value: &str) {
        if !self.has_attribute(id, name) {
            self.set_attribute(id, name, value);
        }
    }

    /// Remove an attribute if present.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        if let Some(node) = self.node_mut(id) {
            node.attributes.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        }
    }

    /// Set (as an empty value) or remove a boolean attribute.
    pub fn toggle_attribute(&mut self, id: NodeId, name: &str, on: bool) {
        if on {
            self.set_attribute_if_absent(id, name, "");
        } else {
            self.remove_attribute(id, name);
        }
    }

    /// Inline style property value.
    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.node(id)?
            .style
            .iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v.as_str())
    }

    /// Set an inline style property. An empty value removes it, as `element.style.x = ''` does.
    pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) {
        if value.is_empty() {
            self.remove_style(id, property);
            return;
        }
        let Some(node) = self.node_mut(id) else {
            return;
        };
        match node.style.iter_mut().find(|(k, _)| k == property) {
            Some((_, v)) => *v = value.to_string(),
            None => node.style.push((property.to_string(), value.to_string())),
        }
    }

    /// Remove an inline style property.
    pub fn remove_style(&mut self, id: NodeId, property: &str) {
        if let Some(node) = self.node_mut(id) {
            node.style.retain(|(k, _)| k != property);
        }
    }

    /// Viewport-space bounds of the element, as last supplied by the embedder.
    pub fn bounds(&self, id: NodeId) -> Option<Rect> {
        self.node(id).map(|n| n.bounds)
    }

    /// Supply the viewport-space bounds of an element.
    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) {
        if let Some(node) = self.node_mut(id) {
            node.bounds = bounds;
        }
    }

    /// Ask the embedder to scroll the element into view.
    pub fn scroll_into_view(&mut self, id: NodeId) {
        if self.is_alive(id) {
            self.scrolled = Some(id);
        }
    }

    /// The element most recently scrolled into view.
    pub fn last_scrolled_into_view(&self) -> Option<NodeId> {
        self.scrolled
    }

    /// The focused element, or `None` when the body has focus.
    pub fn active_element(&self) -> Option<NodeId> {
        self.active.filter(|&n| self.is_connected(n))
    }

    /// Move focus to `id` if it is connected and focusable.
    ///
    /// Returns `true` when `id` holds focus afterwards.
    pub fn focus(&mut self, id: NodeId) -> bool {
        if !self.is_connected(id) || !is_focusable(self, id) {
            return false;
        }
        let from = self.active_element();
        if from != Some(id) {
            log::trace!("focus {from:?} -> {id:?}");
            self.active = Some(id);
            self.focus_moves.push(FocusMove { from, to: Some(id) });
        }
        true
    }

    /// Drop focus back to the body.
    pub fn blur(&mut self) {
        if let Some(from) = self.active_element() {
            self.active = None;
            self.focus_moves.push(FocusMove {
                from: Some(from),
                to: None,
            });
        }
    }

    /// Drain the recorded focus moves, oldest first.
    pub fn take_focus_moves(&mut self) -> Vec<FocusMove> {
        core::mem::take(&mut self.focus_moves)
    }
}

/// Iterator over an element and its ancestors. See [`Document::ancestors`].
#[derive(Debug)]
pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.doc.parent(current);
        Some(current)
    }
}

/// Pre-order iterator over strict descendants. See [`Document::descendants`].
#[derive(Debug)]
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(current).iter().rev().copied());
        Some(current)
    }
}

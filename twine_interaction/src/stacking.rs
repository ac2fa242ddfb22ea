// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registry of open popups, used to close unrelated ones when another opens.

use alloc::vec::Vec;

use twine_dom::{Document, NodeId};

/// Open instances in the order they were opened.
#[derive(Clone, Debug, Default)]
pub struct StackingRegistry {
    open: Vec<NodeId>,
}

impl StackingRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `host` as open. Duplicate insertions are ignored.
    pub fn insert(&mut self, host: NodeId) {
        if !self.open.contains(&host) {
            self.open.push(host);
        }
    }

    /// Record `host` as closed.
    pub fn remove(&mut self, host: NodeId) -> bool {
        let before = self.open.len();
        self.open.retain(|&h| h != host);
        before != self.open.len()
    }

    /// Whether `host` is recorded as open.
    pub fn contains(&self, host: NodeId) -> bool {
        self.open.contains(&host)
    }

    /// Open instances, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.open.iter().copied()
    }

    /// Open instances that neither are `host` nor contain it, most recent first.
    ///
    /// These are the instances to close when `host` opens.
    pub fn unrelated(&self, doc: &Document, host: NodeId) -> Vec<NodeId> {
        self.open
            .iter()
            .rev()
            .copied()
            .filter(|&h| h != host && !doc.contains(h, host))
            .collect()
    }

    /// Open instances strictly inside `host`, deepest first.
    ///
    /// These are the instances to close when `host` closes.
    pub fn nested_in(&self, doc: &Document, host: NodeId) -> Vec<NodeId> {
        let mut out: Vec<NodeId> = self
            .open
            .iter()
            .copied()
            .filter(|&h| h != host && doc.contains(host, h))
            .collect();
        out.sort_by_key(|&h| core::cmp::Reverse(doc.depth(h)));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn ancestors_survive_and_descendants_cascade() {
        let mut doc = Document::new();
        let outer = doc.create_element("div");
        let inner = doc.create_element("div");
        let innermost = doc.create_element("div");
        let sibling = doc.create_element("div");
        doc.append_child(doc.body(), outer);
        doc.append_child(outer, inner);
        doc.append_child(inner, innermost);
        doc.append_child(doc.body(), sibling);

        let mut reg = StackingRegistry::new();
        for h in [sibling, outer, inner, innermost] {
            reg.insert(h);
        }
        assert_eq!(reg.unrelated(&doc, inner), vec![innermost, sibling]);
        assert_eq!(reg.nested_in(&doc, outer), vec![innermost, inner]);
        assert!(reg.remove(inner));
        assert!(!reg.remove(inner));
        assert!(!reg.contains(inner));
    }
}

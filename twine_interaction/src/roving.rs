// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Roving activation over an ordered list of items.
//!
//! Menus and tab lists keep exactly one item marked through the
//! `data-headlessui-state` attribute. Arrow keys move that mark with [`cycle`],
//! skipping items that are not interactable and wrapping at either end.

use alloc::vec::Vec;

use twine_dom::focusable::is_disabled;
use twine_dom::{Document, NodeId};

/// Attribute holding the roving marker.
pub const STATE_ATTRIBUTE: &str = "data-headlessui-state";

/// Direction of travel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Towards the end of the list.
    Next,
    /// Towards the start of the list.
    Previous,
}

/// Next enabled item from `current` in `direction`, wrapping around.
///
/// With no current item (or one not in `items`) this is the first enabled item for
/// [`Direction::Next`] and the last one for [`Direction::Previous`]. When `current`
/// is the only enabled item it is returned again. `None` means nothing is enabled.
///
/// ```
/// use twine_interaction::roving::{cycle, Direction};
///
/// let items = ['a', 'b', 'c'];
/// let enabled = |c: char| c != 'b';
/// assert_eq!(cycle(&items, Some('a'), Direction::Next, enabled), Some('c'));
/// assert_eq!(cycle(&items, Some('c'), Direction::Next, enabled), Some('a'));
/// ```
pub fn cycle<T: Copy + PartialEq>(
    items: &[T],
    current: Option<T>,
    direction: Direction,
    mut enabled: impl FnMut(T) -> bool,
) -> Option<T> {
    let len = items.len();
    let Some(start) = current.and_then(|c| items.iter().position(|&i| i == c)) else {
        return match direction {
            Direction::Next => items.iter().copied().find(|&i| enabled(i)),
            Direction::Previous => items.iter().rev().copied().find(|&i| enabled(i)),
        };
    };
    (1..=len)
        .map(|step| match direction {
            Direction::Next => (start + step) % len,
            Direction::Previous => (start + len - step) % len,
        })
        .map(|idx| items[idx])
        .find(|&i| enabled(i))
}

/// Which marker value an activated item carries.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Marker {
    /// `data-headlessui-state="active"` (menu items).
    Active,
    /// `data-headlessui-state="selected"` (tabs).
    Selected,
}

impl Marker {
    /// Attribute value for marked items.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Selected => "selected",
        }
    }
}

/// An ordered item list with at most one marked item.
#[derive(Clone, Debug)]
pub struct RovingList {
    container: NodeId,
    items: Vec<NodeId>,
    marker: Marker,
    reference: Option<&'static str>,
    scroll: bool,
}

impl RovingList {
    /// Create an empty list owned by `container`.
    pub fn new(container: NodeId, marker: Marker) -> Self {
        Self {
            container,
            items: Vec::new(),
            marker,
            reference: None,
            scroll: false,
        }
    }

    /// Mirror the marked item's id into this attribute on the container
    /// (for example `aria-activedescendant`).
    #[must_use]
    pub fn with_reference(mut self, attribute: &'static str) -> Self {
        self.reference = Some(attribute);
        self
    }

    /// Scroll activated items into view.
    #[must_use]
    pub fn with_scroll(mut self, scroll: bool) -> Self {
        self.scroll = scroll;
        self
    }

    /// The owning container.
    pub fn container(&self) -> NodeId {
        self.container
    }

    /// Replace the item list, for example after children changed.
    pub fn set_items(&mut self, items: Vec<NodeId>) {
        self.items = items;
    }

    /// All items in order.
    pub fn items(&self) -> &[NodeId] {
        &self.items
    }

    /// Whether `item` belongs to the list.
    pub fn contains(&self, item: NodeId) -> bool {
        self.items.contains(&item)
    }

    /// Whether an item can be marked (alive and not disabled).
    pub fn is_interactable(doc: &Document, item: NodeId) -> bool {
        doc.is_alive(item) && !is_disabled(doc, item)
    }

    /// Interactable items in order.
    pub fn interactable<'a>(&'a self, doc: &'a Document) -> impl Iterator<Item = NodeId> + 'a {
        self.items
            .iter()
            .copied()
            .filter(move |&i| Self::is_interactable(doc, i))
    }

    /// First interactable item.
    pub fn first(&self, doc: &Document) -> Option<NodeId> {
        self.interactable(doc).next()
    }

    /// Last interactable item.
    pub fn last(&self, doc: &Document) -> Option<NodeId> {
        self.interactable(doc).last()
    }

    /// [`cycle`] over this list's interactable items.
    pub fn cycle(
        &self,
        doc: &Document,
        current: Option<NodeId>,
        direction: Direction,
    ) -> Option<NodeId> {
        cycle(&self.items, current, direction, |i| {
            Self::is_interactable(doc, i)
        })
    }

    /// Whether `item` carries the marker.
    pub fn is_marked(&self, doc: &Document, item: NodeId) -> bool {
        doc.attribute(item, STATE_ATTRIBUTE) == Some(self.marker.as_str())
    }

    /// The marked item.
    pub fn marked(&self, doc: &Document) -> Option<NodeId> {
        self.items.iter().copied().find(|&i| self.is_marked(doc, i))
    }

    /// Mark `item` and unmark every other item.
    pub fn activate(&self, doc: &mut Document, item: NodeId) {
        self.activate_with(doc, item, |_, _, _| {});
    }

    /// Like [`RovingList::activate`], calling `sync(doc, item, marked)` for every
    /// item so callers can mirror the selection into further attributes.
    pub fn activate_with(
        &self,
        doc: &mut Document,
        item: NodeId,
        mut sync: impl FnMut(&mut Document, NodeId, bool),
    ) {
        for &i in &self.items {
            let marked = i == item;
            doc.set_attribute(
                i,
                STATE_ATTRIBUTE,
                if marked { self.marker.as_str() } else { "" },
            );
            sync(doc, i, marked);
        }
        if let Some(attr) = self.reference {
            match doc.attribute(item, "id").map(alloc::string::ToString::to_string) {
                Some(id) => doc.set_attribute(self.container, attr, &id),
                None => doc.remove_attribute(self.container, attr),
            }
        }
        if self.scroll {
            doc.scroll_into_view(item);
        }
    }

    /// Unmark `item` if it is marked.
    pub fn deactivate(&self, doc: &mut Document, item: NodeId) {
        if self.is_marked(doc, item) {
            doc.set_attribute(item, STATE_ATTRIBUTE, "");
            if let Some(attr) = self.reference {
                doc.remove_attribute(self.container, attr);
            }
        }
    }

    /// Unmark every item.
    pub fn deactivate_all(&self, doc: &mut Document) {
        for &i in &self.items {
            doc.set_attribute(i, STATE_ATTRIBUTE, "");
        }
        if let Some(attr) = self.reference {
            doc.remove_attribute(self.container, attr);
        }
    }
}

// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Twine DOM: the element tree the Twine widgets operate on.
//!
//! ## Overview
//!
//! The widgets in `twine_elements` are written against a live document: they read
//! and write attributes, move focus, query containment, and look up elements by id.
//! This crate provides that document as a plain data structure, so the behavior can
//! be driven and inspected without a browser.
//!
//! - [`Document`]: an arena of elements with attributes, inline style, embedder-supplied
//!   bounds, and focus bookkeeping.
//! - [`NodeId`]: a generational handle into the arena.
//! - [`focusable`]: the focusability rules used for focus traps, sequential navigation,
//!   and outside-click dismissal.
//! - [`input`]: keys, modifiers, and the [`InputEvent`] routed through widgets.
//! - [`path`]: enter/leave transitions over root→target paths.
//!
//! The document performs no dispatch. Focus changes are recorded as [`FocusMove`]s that
//! an event loop drains and turns into blur/focus events.
//!
//! ## Example
//!
//! ```rust
//! use twine_dom::{Document, focusable};
//!
//! let mut doc = Document::new();
//! let panel = doc.create_element("div");
//! let close = doc.create_element("button");
//! doc.append_child(doc.body(), panel);
//! doc.append_child(panel, close);
//!
//! assert_eq!(focusable::tabbable_descendants(&doc, panel), vec![close]);
//! assert!(doc.contains(panel, close));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod document;
pub mod focusable;
pub mod input;
mod node;
pub mod path;

pub use document::{Ancestors, Descendants, Document, FocusMove};
pub use input::{InputEvent, InputKind, Key, Modifiers};
pub use node::NodeId;

pub use kurbo::{Point, Rect};

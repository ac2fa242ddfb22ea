// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Twine Interaction: shared services the Twine widgets are built from.
//!
//! ## Overview
//!
//! Each service is a small piece of state plus operations against a
//! [`twine_dom::Document`]. None of them dispatch events; the runtime in
//! `twine_elements` decides when to call them.
//!
//! - [`IdGenerator`]: unique ids for `aria-controls`/`aria-labelledby` wiring.
//! - [`FocusTraps`]: a stack of focus traps with restore-on-release.
//! - [`OutsideClicks`]: detection of pointer presses and focus landing outside
//!   registered boundaries, reported innermost owner first.
//! - [`ScrollLock`]: a reference-counted body scroll lock.
//! - [`roving`]: [`roving::cycle`] and [`RovingList`] for single-marker item lists.
//! - [`StackingRegistry`]: open popups, for closing unrelated ones.
//!
//! ## Example
//!
//! ```rust
//! use twine_dom::Document;
//! use twine_interaction::FocusTraps;
//!
//! let mut doc = Document::new();
//! let open = doc.create_element("button");
//! let panel = doc.create_element("div");
//! let close = doc.create_element("button");
//! doc.append_child(doc.body(), open);
//! doc.append_child(doc.body(), panel);
//! doc.append_child(panel, close);
//! doc.focus(open);
//!
//! let mut traps = FocusTraps::new();
//! let trap = traps.acquire(&mut doc, panel);
//! assert_eq!(doc.active_element(), Some(close));
//! traps.release(&mut doc, trap);
//! assert_eq!(doc.active_element(), Some(open));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod focus_trap;
mod ids;
pub mod outside;
pub mod roving;
mod scroll_lock;
mod stacking;

pub use focus_trap::{FocusTrapHandle, FocusTraps};
pub use ids::IdGenerator;
pub use outside::{Interest, OutsideClicks, OutsideHandle, Violation};
pub use roving::{Direction, Marker, RovingList};
pub use scroll_lock::{ScrollLock, ScrollLockToken};
pub use stacking::StackingRegistry;

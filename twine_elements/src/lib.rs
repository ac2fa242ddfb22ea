// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Twine Elements: headless, accessible UI primitives over a [`twine_dom::Document`].
//!
//! ## Overview
//!
//! Elements attach to host nodes by tag and find their parts through
//! `data-target="tag.name"` attributes. Mounted hosts keep ARIA attributes and the
//! `data-headlessui-state` attribute in sync with their state, react to routed
//! input, and emit [`CustomEvent`]s such as `twc-popover:show`.
//!
//! | Tag | Parts |
//! | --- | --- |
//! | `twc-accordion` | `trigger`, `panel` |
//! | `twc-dialog` | `dialog` |
//! | `twc-dropdown` | `trigger`, `menu`, `menuItems` |
//! | `twc-floating-panel` | `panel`, optional `trigger` |
//! | `twc-popover` | `trigger`, `panel` |
//! | `twc-switch` | `trigger` |
//! | `twc-tabs`, `twc-tabs-list` | `triggers`, `panels` |
//! | `twc-tooltip` | `trigger`, `panel` |
//!
//! User-initiated transitions emit a cancelable pre-event (`show`, `hide`,
//! `change`) and a post-event (`shown`, `hidden`, `changed`). Property writes
//! through [`Ui`] are silent.
//!
//! ## Example
//!
//! ```rust
//! use twine_dom::Document;
//! use twine_elements::{EventKind, Ui};
//!
//! let mut doc = Document::new();
//! let host = doc.create_element("twc-popover");
//! let trigger = doc.create_element("button");
//! let panel = doc.create_element("div");
//! doc.append_child(doc.body(), host);
//! doc.append_child(host, trigger);
//! doc.append_child(host, panel);
//! doc.set_attribute(trigger, "data-target", "twc-popover.trigger");
//! doc.set_attribute(panel, "data-target", "twc-popover.panel");
//!
//! let mut ui = Ui::with_document(doc);
//! ui.mount_all().unwrap();
//! ui.mouse_click(trigger);
//! assert!(ui.is_open(host));
//! assert_eq!(ui.document().attribute(trigger, "aria-expanded"), Some("true"));
//!
//! let names: Vec<_> = ui.take_events().iter().map(|e| e.name()).collect();
//! assert_eq!(names, ["twc-popover:show", "twc-popover:shown"]);
//!
//! // Property writes do not emit.
//! ui.set_open(host, false).unwrap();
//! assert!(!ui.is_open(host));
//! assert!(ui.events().iter().all(|e| e.kind != EventKind::Hidden));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod binding;
mod config;
mod context;
mod disclosure;
pub mod dispatch;
mod error;
pub mod event;
mod ui;
mod widgets;

pub use config::UiConfig;
pub use error::ElementError;
pub use event::{CustomEvent, EventBus, EventKind, Listener, ListenerId};
pub use ui::Ui;
pub use widgets::floating_panel::FrameSignal;
pub use widgets::tabs::Orientation;

// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runtime configuration.

use alloc::string::String;

use kurbo::Rect;

/// Settings for a [`Ui`](crate::Ui).
#[derive(Clone, Debug, PartialEq)]
pub struct UiConfig {
    /// Visible area that floating panels are kept inside, in viewport coordinates.
    pub viewport: Rect,
    /// Prefix of generated element ids.
    pub id_prefix: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            viewport: Rect::new(0.0, 0.0, 1024.0, 768.0),
            id_prefix: "twc".into(),
        }
    }
}

impl UiConfig {
    /// Default settings with a different viewport.
    #[must_use]
    pub fn with_viewport(mut self, viewport: Rect) -> Self {
        self.viewport = viewport;
        self
    }

    /// Default settings with a different id prefix.
    #[must_use]
    pub fn with_id_prefix(mut self, prefix: &str) -> Self {
        self.id_prefix = prefix.into();
        self
    }
}

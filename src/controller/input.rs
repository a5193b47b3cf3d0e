//! Search input
//!
//! Validates typed text into submit events and reports whether the input
//! should be accepting text right now.

use crate::controller::state::RequestState;

pub const PLACEHOLDER: &str = "Where can I eat ramen near Blok M?";

/// The query box and its submit button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryInput {
    disabled: bool,
}

impl QueryInput {
    /// Input as it should appear for a given request state
    pub fn for_state(state: &RequestState) -> Self {
        Self {
            disabled: state.is_loading(),
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn button_label(&self) -> &'static str {
        if self.disabled {
            "Searching..."
        } else {
            "Search"
        }
    }

    /// Turn raw text into a submit event
    ///
    /// Returns the trimmed query, or `None` for blank text or while disabled.
    pub fn accept(&self, raw: &str) -> Option<String> {
        let query = raw.trim();
        if self.disabled || query.is_empty() {
            return None;
        }
        Some(query.to_string())
    }
}

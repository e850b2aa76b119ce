//! The search box.
//!
//! The control owns its input buffer. Submitting consumes the control,
//! the navigation it returns re-creates a fresh one from the new URL.

use url::Url;

use crate::navigation::{NavigationAction, navigate};
use crate::query::{NAME_PARAM, RawParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    /// Showing the committed value.
    Idle,
    /// The buffer was edited since the control was created.
    Editing,
}

#[derive(Debug)]
pub struct SearchControl {
    committed: String,
    buffer: String,
    state: ControlState,
}

impl SearchControl {
    pub fn new(initial: impl Into<String>) -> Self {
        let committed = initial.into();
        Self {
            buffer: committed.clone(),
            committed,
            state: ControlState::Idle,
        }
    }

    /// Initialize from the `name` parameter of `url`.
    pub fn from_url(url: &Url) -> Self {
        Self::new(RawParams::from_url(url).get(NAME_PARAM).unwrap_or_default())
    }

    /// Replace the buffer with the current input value.
    pub fn input(&mut self, value: impl Into<String>) {
        self.buffer = value.into();
        self.state = ControlState::Editing;
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn committed(&self) -> &str {
        &self.committed
    }

    pub fn state(&self) -> ControlState {
        self.state
    }

    /// The action a submit performs, the buffer is trimmed first.
    pub fn submit_action(&self) -> NavigationAction {
        let term = self.buffer.trim();
        if term.is_empty() {
            NavigationAction::ClearSearchTerm
        } else {
            NavigationAction::SetSearchTerm(term.to_string())
        }
    }

    /// Submit the buffer, returning the URL to navigate to from `current`.
    ///
    /// The page parameter is always dropped, even if the term is unchanged.
    pub fn submit(self, current: &Url) -> Url {
        navigate(current, &self.submit_action())
    }
}

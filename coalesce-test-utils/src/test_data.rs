// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::fmt::{self, Display};

/// A snapshot of UI state, the typical payload coalesced into one render per frame.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ViewState {
    pub revision: u32,
    pub title: String,
}

impl ViewState {
    #[must_use]
    pub fn new(revision: u32, title: impl Into<String>) -> Self {
        Self {
            revision,
            title: title.into(),
        }
    }
}

impl Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ViewState[revision={}, title={}]", self.revision, self.title)
    }
}

pub fn state_loading() -> ViewState {
    ViewState::new(1, "Loading")
}

pub fn state_loaded() -> ViewState {
    ViewState::new(2, "Loaded")
}

pub fn state_filtered() -> ViewState {
    ViewState::new(3, "Filtered")
}

pub fn state_sorted() -> ViewState {
    ViewState::new(4, "Sorted")
}

pub fn state_saved() -> ViewState {
    ViewState::new(5, "Saved")
}

/// `count` consecutive revisions starting at 1, as produced by a burst of edits.
pub fn revisions(count: u32) -> Vec<ViewState> {
    (1..=count)
        .map(|revision| ViewState::new(revision, format!("Edit {revision}")))
        .collect()
}

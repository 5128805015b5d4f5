//! Top-level view state shared by the gallery and upload tabs

use crate::types::ActiveView;
use tracing::debug;

/// Holds the refresh counter and the selected tab.
///
/// The counter only means "changed since last observed"; the gallery reacts to
/// the delta, never to the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shell {
    refresh_counter: u64,
    active_view: ActiveView,
}

impl Shell {
    pub fn new(active_view: ActiveView) -> Self {
        Self {
            refresh_counter: 0,
            active_view,
        }
    }

    pub fn refresh_counter(&self) -> u64 {
        self.refresh_counter
    }

    pub fn active_view(&self) -> ActiveView {
        self.active_view
    }

    pub fn select_view(&mut self, view: ActiveView) {
        self.active_view = view;
    }

    /// Called by the upload view after the server accepted an image
    pub fn on_submission_succeeded(&mut self) {
        self.refresh_counter = self.refresh_counter.wrapping_add(1);
        debug!(counter = self.refresh_counter, "Refresh signal bumped");
    }
}

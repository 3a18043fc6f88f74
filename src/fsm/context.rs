//! Context threaded through every menu state handler.
//!
//! Inputs (debounced button actions for this pass) go in; requests
//! (clear the display, step the threshold) come out.  The
//! [`AppService`](crate::app::service::AppService) resets the context at
//! the top of each pass and applies the requests after the tick.

use crate::drivers::button::InputEvents;

/// Side effects requested by menu handlers during one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuRequests {
    /// Blank the display before the next render.
    pub clear_display: bool,
    /// Net threshold adjustment: +1 per increase fire, −1 per decrease.
    pub threshold_step: i8,
}

#[derive(Debug, Default)]
pub struct MenuContext {
    /// Debounced actions sampled this pass.
    pub input: InputEvents,
    /// Requests accumulated by handlers this pass.
    pub requests: MenuRequests,
}

impl MenuContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load this pass's inputs and drop last pass's requests.
    pub fn begin_pass(&mut self, input: InputEvents) {
        self.input = input;
        self.requests = MenuRequests::default();
    }

    /// Take the accumulated requests, leaving the context clean.
    pub fn take_requests(&mut self) -> MenuRequests {
        core::mem::take(&mut self.requests)
    }
}

//! Function-pointer finite state machine engine for the front-panel menu.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  StateTable                                              │
//! │  ┌──────────┬───────────┬──────────┬───────────────────┐ │
//! │  │ MenuState│ on_enter  │ on_exit  │ on_update         │ │
//! │  ├──────────┼───────────┼──────────┼───────────────────┤ │
//! │  │ Inactive │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │ │
//! │  │ Editing  │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │ │
//! │  └──────────┴───────────┴──────────┴───────────────────┘ │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine calls `on_update` for the **current** state.
//! If it returns `Some(next_id)`, the engine runs `on_exit` for the
//! current state, then `on_enter` for the next.  Handlers never touch
//! the threshold or the display directly: they write requests into
//! [`MenuContext`](context::MenuContext), which the caller applies.

pub mod context;
pub mod states;

use context::MenuContext;
use log::info;
use serde::Serialize;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Menu states.  Must stay in sync with [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum MenuState {
    /// Normal operation; increase/decrease buttons are inert.
    Inactive = 0,
    /// Threshold edit; increase/decrease adjust the threshold.
    Editing = 1,
}

impl MenuState {
    /// Total number of states, used to size the table array.
    pub const COUNT: usize = 2;

    /// Convert a table index back to `MenuState`.  Out-of-range indices
    /// fall back to `Inactive` (buttons inert) in release builds.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Inactive,
            1 => Self::Editing,
            _ => {
                debug_assert!(false, "invalid menu state index: {idx}");
                Self::Inactive
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
pub type StateActionFn = fn(&mut MenuContext);

/// Per-tick update handler.  Returns `Some(next)` to transition.
pub type StateUpdateFn = fn(&mut MenuContext) -> Option<MenuState>;

/// Static descriptor for a single menu state.
pub struct StateDescriptor {
    pub id: MenuState,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

pub struct Fsm {
    table: [StateDescriptor; MenuState::COUNT],
    current: usize,
    transitions: u32,
}

impl Fsm {
    pub fn new(table: [StateDescriptor; MenuState::COUNT], initial: MenuState) -> Self {
        Self {
            table,
            current: initial as usize,
            transitions: 0,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut MenuContext) {
        info!("Menu starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Advance the FSM by one tick with the inputs already in `ctx`.
    pub fn tick(&mut self, ctx: &mut MenuContext) {
        let next = (self.table[self.current].on_update)(ctx);
        if let Some(next_id) = next {
            self.transition(next_id, ctx);
        }
    }

    pub fn current_state(&self) -> MenuState {
        MenuState::from_index(self.current)
    }

    /// Number of transitions taken since construction.
    pub fn transitions(&self) -> u32 {
        self.transitions
    }

    fn transition(&mut self, next_id: MenuState, ctx: &mut MenuContext) {
        let next_idx = next_id as usize;

        info!(
            "Menu transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;
        self.transitions = self.transitions.wrapping_add(1);

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}

//! Concrete menu state handlers and table builder.
//!
//! ```text
//!  INACTIVE ──[menu press]──▶ EDITING
//!     ▲                          │
//!     └──────[menu press]────────┘
//!
//!  EDITING: increase fire → +1, decrease fire → −1
//! ```
//!
//! No timeout: the operator leaves `Editing` with another menu press.

use super::context::MenuContext;
use super::{MenuState, StateDescriptor};
use log::info;

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; MenuState::COUNT] {
    [
        // Index 0: Inactive
        StateDescriptor {
            id: MenuState::Inactive,
            name: "Inactive",
            on_enter: Some(inactive_enter),
            on_exit: None,
            on_update: inactive_update,
        },
        // Index 1: Editing
        StateDescriptor {
            id: MenuState::Editing,
            name: "Editing",
            on_enter: Some(editing_enter),
            on_exit: Some(editing_exit),
            on_update: editing_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  INACTIVE state
// ═══════════════════════════════════════════════════════════════════════════

fn inactive_enter(ctx: &mut MenuContext) {
    ctx.requests.clear_display = true;
}

fn inactive_update(ctx: &mut MenuContext) -> Option<MenuState> {
    if ctx.input.menu_pressed {
        return Some(MenuState::Editing);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  EDITING state: increase/decrease are captured here
// ═══════════════════════════════════════════════════════════════════════════

fn editing_enter(ctx: &mut MenuContext) {
    ctx.requests.clear_display = true;
    info!("MENU: threshold edit opened");
}

fn editing_update(ctx: &mut MenuContext) -> Option<MenuState> {
    if ctx.input.menu_pressed {
        return Some(MenuState::Inactive);
    }

    let mut step = 0i8;
    if ctx.input.increase_fired {
        step += 1;
    }
    if ctx.input.decrease_fired {
        step -= 1;
    }
    ctx.requests.threshold_step = ctx.requests.threshold_step.saturating_add(step);
    None
}

fn editing_exit(_ctx: &mut MenuContext) {
    info!("MENU: threshold edit closed");
}

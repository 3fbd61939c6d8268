/// Silent Depths — an incremental fishing game for the browser.
pub mod actions;
pub mod logic;
pub mod offline;
pub mod render;
pub mod save;
pub mod state;

#[cfg(test)]
mod simulator;

use state::{GameState, Panel, UpgradeKind};

/// Dispatch a click/tap that hit a registered target. `pos` is the tapped
/// terminal cell — only the cast action cares, for ripple placement.
pub fn handle_click(state: &mut GameState, action: u16, pos: (u16, u16), now_ms: f64) {
    // An open offline report swallows every tap until acknowledged.
    if state.offline_report.is_some() {
        state.offline_report = None;
        return;
    }

    match action {
        actions::CAST => {
            logic::cast(state, Some(pos));
        }
        actions::DISMISS_REPORT => {} // handled by the guard above
        actions::TAB_OCEAN => switch_panel(state, Panel::Ocean),
        actions::TAB_UPGRADES => switch_panel(state, Panel::Upgrades),
        actions::TAB_INVENTORY => switch_panel(state, Panel::Inventory),
        actions::TAB_MENU => switch_panel(state, Panel::Menu),
        actions::MENU_SAVE => save_now(state, now_ms),
        actions::MENU_EXPORT => export_now(state),
        actions::MENU_RESET => reset_step(state),
        id if id >= actions::BUY_UPGRADE_BASE => {
            let idx = (id - actions::BUY_UPGRADE_BASE) as usize;
            if let Some(kind) = UpgradeKind::all().get(idx) {
                logic::buy_upgrade(state, *kind, now_ms);
            }
        }
        _ => {}
    }
}

/// Dispatch a keyboard key. Keys mirror what the panels display.
pub fn handle_key(state: &mut GameState, key: char, now_ms: f64) {
    if state.offline_report.is_some() {
        state.offline_report = None;
        return;
    }

    match key {
        'c' | ' ' => {
            logic::cast(state, None);
        }
        'o' => switch_panel(state, Panel::Ocean),
        'u' => switch_panel(state, Panel::Upgrades),
        'i' => switch_panel(state, Panel::Inventory),
        'm' => switch_panel(state, Panel::Menu),
        '1'..='4' if state.panel == Panel::Upgrades => {
            let idx = key as usize - '1' as usize;
            if let Some(kind) = UpgradeKind::all().get(idx) {
                logic::buy_upgrade(state, *kind, now_ms);
            }
        }
        's' if state.panel == Panel::Menu => save_now(state, now_ms),
        'e' if state.panel == Panel::Menu => export_now(state),
        'r' if state.panel == Panel::Menu => reset_step(state),
        _ => {}
    }
}

/// Switching panels also disarms a pending reset confirmation.
fn switch_panel(state: &mut GameState, panel: Panel) {
    state.panel = panel;
    state.confirm_reset = false;
}

fn save_now(state: &mut GameState, now_ms: f64) {
    state.last_save = now_ms;
    state.ticks_since_save = 0;
    #[cfg(target_arch = "wasm32")]
    save::save_game(state);
    state.push_notification("Game saved.", false);
}

fn export_now(state: &mut GameState) {
    #[cfg(target_arch = "wasm32")]
    save::export_save(state);
    state.push_notification("Save exported.", false);
}

/// Destructive reset asks twice. The second activation wipes the save slot
/// and reloads the page (in the browser); the in-memory state restarts
/// either way.
fn reset_step(state: &mut GameState) {
    if !state.confirm_reset {
        state.confirm_reset = true;
        state.push_notification("Tap reset again to wipe all progress.", true);
        return;
    }
    #[cfg(target_arch = "wasm32")]
    {
        save::delete_save();
        save::reload_page();
    }
    *state = GameState::new();
}

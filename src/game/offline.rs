//! Offline catch-up: the nets keep working while the tab is closed.
//!
//! Computed once at load, before the first tick, from the persisted save
//! timestamp. The resulting report is shown until the player dismisses it
//! and is never written back to storage.

use super::state::GameState;

/// Absences shorter than a minute earn nothing.
const MIN_ABSENCE_MS: f64 = 60_000.0;
/// The nets fill up after eight hours; longer absences earn no more.
const MAX_ABSENCE_HOURS: f64 = 8.0;
/// Base passive catch rate per offline hour.
const FISH_PER_HOUR: f64 = 20.0;

/// One-shot summary of what happened while the player was away.
#[derive(Clone, Debug, PartialEq)]
pub struct OfflineReport {
    /// Hours credited (clamped; fractional).
    pub hours: f64,
    /// Fish added to the balance.
    pub fish: f64,
}

/// Work out the catch-up grant for a reload at `now_ms` against the
/// persisted `last_save_ms`. Returns `None` when there is nothing to
/// report — short absences, or a save timestamp in the future (clock skew).
pub fn compute_catchup(last_save_ms: f64, now_ms: f64, nets_level: u32) -> Option<OfflineReport> {
    let elapsed = now_ms - last_save_ms;
    if elapsed < MIN_ABSENCE_MS {
        return None;
    }
    let hours = (elapsed / 3_600_000.0).min(MAX_ABSENCE_HOURS);
    let fish = (hours * FISH_PER_HOUR * (1.0 + nets_level as f64 * 0.2)).floor();
    Some(OfflineReport { hours, fish })
}

/// Credit the catch-up to a freshly loaded state and surface the report.
pub fn apply_catchup(state: &mut GameState, now_ms: f64) {
    if let Some(report) = compute_catchup(state.last_save, now_ms, state.upgrades.nets) {
        state.fish += report.fish;
        state.total_fish_caught += report.fish;
        state.offline_report = Some(report);
    }
}

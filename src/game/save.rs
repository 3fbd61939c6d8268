//! Save/load for Silent Depths.
//!
//! ## Versioning policy
//!
//! - `SAVE_VERSION`: current save format version. Increment when adding
//!   fields.
//! - `MIN_COMPATIBLE_VERSION`: oldest version that still loads. Additive
//!   changes leave it alone (missing fields are default-filled via
//!   `#[serde(default)]`); only breaking changes — removed fields, changed
//!   meanings — bump it.
//!
//! Corrupt or incompatibly old entries are removed from storage and the
//! game falls back to a fresh state; there is no user-visible error.

#[cfg(any(target_arch = "wasm32", test))]
use serde::{Deserialize, Serialize};

#[cfg(any(target_arch = "wasm32", test))]
use super::state::{GameState, ZONES};

/// Current save format version.
#[cfg(any(target_arch = "wasm32", test))]
const SAVE_VERSION: u32 = 1;

/// Oldest save version that still loads.
#[cfg(any(target_arch = "wasm32", test))]
const MIN_COMPATIBLE_VERSION: u32 = 1;

/// localStorage slot.
#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "silent_depths_save";

/// Filename for the export download.
#[cfg(target_arch = "wasm32")]
const EXPORT_FILENAME: &str = "silent_depths_save.json";

/// Autosave every 30 seconds: 10 ticks/sec × 30 s.
pub const AUTOSAVE_INTERVAL: u32 = 300;

/// Serialized save blob. Transient UI state (ripples, notifications, the
/// offline report, panel selection) never round-trips.
#[cfg(any(target_arch = "wasm32", test))]
#[derive(Serialize, Deserialize)]
struct SaveData {
    version: u32,
    game: GameSave,
}

#[cfg(any(target_arch = "wasm32", test))]
#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
struct GameSave {
    fish: f64,
    pearls: f64,
    artifacts: f64,

    current_zone: usize,
    // Upgrade levels; the catalog is fixed.
    nets: u32,
    oysters: u32,
    lanterns: u32,
    spirit: u32,

    fishing_power: f64,
    pearl_chance: f64,
    boat_energy: f64,
    depth: u32,

    active_multiplier: f64,
    multiplier_end_time: f64,

    total_fish_caught: f64,
    total_pearls_caught: f64,
    total_artifacts_found: f64,

    /// Unlock flags in `create_achievements()` order.
    achievements_unlocked: Vec<bool>,

    rng_state: u32,
    last_save: f64,
}

/// Pull the persistent slice out of a live state.
#[cfg(any(target_arch = "wasm32", test))]
fn extract_save(state: &GameState) -> SaveData {
    SaveData {
        version: SAVE_VERSION,
        game: GameSave {
            fish: state.fish,
            pearls: state.pearls,
            artifacts: state.artifacts,
            current_zone: state.current_zone,
            nets: state.upgrades.nets,
            oysters: state.upgrades.oysters,
            lanterns: state.upgrades.lanterns,
            spirit: state.upgrades.spirit,
            fishing_power: state.fishing_power,
            pearl_chance: state.pearl_chance,
            boat_energy: state.boat_energy,
            depth: state.depth,
            active_multiplier: state.active_multiplier,
            multiplier_end_time: state.multiplier_end_time,
            total_fish_caught: state.total_fish_caught,
            total_pearls_caught: state.total_pearls_caught,
            total_artifacts_found: state.total_artifacts_found,
            achievements_unlocked: state.achievements.iter().map(|a| a.unlocked).collect(),
            rng_state: state.rng_state,
            last_save: state.last_save,
        },
    }
}

/// Restore a save into a fresh state. Out-of-range values are clamped back
/// into their invariants rather than trusted — the blob is user-editable.
#[cfg(any(target_arch = "wasm32", test))]
fn apply_save(state: &mut GameState, save: &GameSave) {
    state.fish = save.fish.max(0.0);
    state.pearls = save.pearls.max(0.0);
    state.artifacts = save.artifacts.max(0.0);

    state.current_zone = save.current_zone.min(ZONES.len() - 1);
    state.upgrades.nets = save.nets;
    state.upgrades.oysters = save.oysters;
    state.upgrades.lanterns = save.lanterns;
    state.upgrades.spirit = save.spirit;

    state.fishing_power = save.fishing_power.max(1.0);
    state.pearl_chance = save.pearl_chance.max(0.01);
    state.boat_energy = save.boat_energy.clamp(0.0, 100.0);
    state.depth = save.depth;

    state.active_multiplier = save.active_multiplier.max(1.0);
    state.multiplier_end_time = save.multiplier_end_time.max(0.0);

    state.total_fish_caught = save.total_fish_caught.max(0.0);
    state.total_pearls_caught = save.total_pearls_caught.max(0.0);
    state.total_artifacts_found = save.total_artifacts_found.max(0.0);

    // Catalog may have grown since the save; extra flags are ignored and
    // missing ones stay locked.
    for (i, &unlocked) in save.achievements_unlocked.iter().enumerate() {
        if let Some(a) = state.achievements.get_mut(i) {
            a.unlocked = unlocked;
        }
    }

    // xorshift must never sit at zero.
    state.rng_state = save.rng_state.max(1);
    state.last_save = save.last_save;
}

/// Access localStorage. WASM only.
#[cfg(target_arch = "wasm32")]
fn get_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Persist the game. Failures are logged to the console and swallowed.
#[cfg(target_arch = "wasm32")]
pub fn save_game(state: &GameState) {
    let save_data = extract_save(state);
    let json = match serde_json::to_string(&save_data) {
        Ok(j) => j,
        Err(e) => {
            web_sys::console::warn_1(&format!("silent-depths: save serialization failed: {e}").into());
            return;
        }
    };

    if let Some(storage) = get_storage() {
        if let Err(e) = storage.set_item(STORAGE_KEY, &json) {
            web_sys::console::warn_1(
                &format!("silent-depths: localStorage write failed: {e:?}").into(),
            );
        }
    }
}

/// Restore from localStorage. Returns `false` (leaving `state` fresh) when
/// there is no entry, it fails to parse, or it predates
/// `MIN_COMPATIBLE_VERSION` — broken entries are removed on the way out.
#[cfg(target_arch = "wasm32")]
pub fn load_game(state: &mut GameState) -> bool {
    let storage = match get_storage() {
        Some(s) => s,
        None => return false,
    };

    let json = match storage.get_item(STORAGE_KEY) {
        Ok(Some(j)) => j,
        _ => return false,
    };

    let save_data: SaveData = match serde_json::from_str(&json) {
        Ok(d) => d,
        Err(e) => {
            web_sys::console::warn_1(
                &format!("silent-depths: save parse failed, discarding: {e}").into(),
            );
            let _ = storage.remove_item(STORAGE_KEY);
            return false;
        }
    };

    if save_data.version < MIN_COMPATIBLE_VERSION {
        web_sys::console::log_1(
            &format!(
                "silent-depths: save too old (saved={}, min={}), starting fresh",
                save_data.version, MIN_COMPATIBLE_VERSION
            )
            .into(),
        );
        let _ = storage.remove_item(STORAGE_KEY);
        return false;
    }

    apply_save(state, &save_data.game);
    true
}

/// Wipe the save slot (progress reset).
#[cfg(target_arch = "wasm32")]
pub fn delete_save() {
    if let Some(storage) = get_storage() {
        let _ = storage.remove_item(STORAGE_KEY);
    }
}

/// Reload the page after a reset so the app restarts from defaults.
#[cfg(target_arch = "wasm32")]
pub fn reload_page() {
    if let Some(window) = web_sys::window() {
        let _ = window.location().reload();
    }
}

/// Download the current save as a JSON file via a synthetic anchor click.
#[cfg(target_arch = "wasm32")]
pub fn export_save(state: &GameState) {
    use wasm_bindgen::JsCast;

    let save_data = extract_save(state);
    let json = match serde_json::to_string(&save_data) {
        Ok(j) => j,
        Err(e) => {
            web_sys::console::warn_1(&format!("silent-depths: export failed: {e}").into());
            return;
        }
    };

    let parts = js_sys::Array::new();
    parts.push(&json.into());
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("application/json");

    let blob = match web_sys::Blob::new_with_str_sequence_and_options(&parts, &options) {
        Ok(b) => b,
        Err(e) => {
            web_sys::console::warn_1(&format!("silent-depths: blob creation failed: {e:?}").into());
            return;
        }
    };
    let url = match web_sys::Url::create_object_url_with_blob(&blob) {
        Ok(u) => u,
        Err(_) => return,
    };

    let document = match web_sys::window().and_then(|w| w.document()) {
        Some(d) => d,
        None => return,
    };
    if let Ok(element) = document.create_element("a") {
        if let Ok(anchor) = element.dyn_into::<web_sys::HtmlAnchorElement>() {
            anchor.set_href(&url);
            anchor.set_download(EXPORT_FILENAME);
            anchor.click();
        }
    }
    let _ = web_sys::Url::revoke_object_url(&url);
}

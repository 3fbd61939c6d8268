//! Semantic action IDs for click targets.
//!
//! Registered during render, dispatched through `game::handle_click`.
//! Keyboard hotkeys map onto the same actions.

// ── Ocean ───────────────────────────────────────────────────────
/// Tap the water: cast the line.
pub const CAST: u16 = 0;
/// Acknowledge the offline catch-up report.
pub const DISMISS_REPORT: u16 = 1;

// ── Tab navigation ──────────────────────────────────────────────
pub const TAB_OCEAN: u16 = 10;
pub const TAB_UPGRADES: u16 = 11;
pub const TAB_INVENTORY: u16 = 12;
pub const TAB_MENU: u16 = 13;

// ── Menu ────────────────────────────────────────────────────────
pub const MENU_SAVE: u16 = 20;
pub const MENU_EXPORT: u16 = 21;
/// First tap arms the confirmation, second tap wipes.
pub const MENU_RESET: u16 = 22;

// ── Upgrade purchase (base + catalog index) ─────────────────────
pub const BUY_UPGRADE_BASE: u16 = 100;

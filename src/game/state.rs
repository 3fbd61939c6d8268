/// Silent Depths game state definitions and static catalogs.
use super::offline::OfflineReport;

/// The currency an upgrade is priced in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Currency {
    Fish,
    Pearls,
    Artifacts,
}

impl Currency {
    pub fn name(&self) -> &'static str {
        match self {
            Currency::Fish => "fish",
            Currency::Pearls => "pearls",
            Currency::Artifacts => "artifacts",
        }
    }
}

/// The fixed upgrade catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpgradeKind {
    /// +0.2 fishing power per level.
    Nets,
    /// +1% pearl chance per level.
    Oysters,
    /// First purchase unlocks the next zone.
    Lanterns,
    /// ×2 yield for ten minutes.
    Spirit,
}

impl UpgradeKind {
    /// All upgrades in display order.
    pub fn all() -> &'static [UpgradeKind] {
        &[
            UpgradeKind::Nets,
            UpgradeKind::Oysters,
            UpgradeKind::Lanterns,
            UpgradeKind::Spirit,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            UpgradeKind::Nets => "New Nets",
            UpgradeKind::Oysters => "Pearl Oysters",
            UpgradeKind::Lanterns => "Deep Lanterns",
            UpgradeKind::Spirit => "Ocean Spirit",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            UpgradeKind::Nets => "+20% catch per cast",
            UpgradeKind::Oysters => "+1% pearl chance",
            UpgradeKind::Lanterns => "Opens new zones",
            UpgradeKind::Spirit => "x2 yield for 10 min",
        }
    }

    /// Price at level 0; each level multiplies it by 1.5.
    pub fn base_price(&self) -> f64 {
        match self {
            UpgradeKind::Nets => 30.0,
            UpgradeKind::Oysters => 5.0,
            UpgradeKind::Lanterns => 100.0,
            UpgradeKind::Spirit => 1.0,
        }
    }

    pub fn currency(&self) -> Currency {
        match self {
            UpgradeKind::Nets => Currency::Fish,
            UpgradeKind::Oysters => Currency::Pearls,
            UpgradeKind::Lanterns => Currency::Fish,
            UpgradeKind::Spirit => Currency::Artifacts,
        }
    }

    /// Hotkey to buy this upgrade while the panel is open.
    pub fn key(&self) -> char {
        match self {
            UpgradeKind::Nets => '1',
            UpgradeKind::Oysters => '2',
            UpgradeKind::Lanterns => '3',
            UpgradeKind::Spirit => '4',
        }
    }
}

/// Per-upgrade purchase levels. Levels only ever go up.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpgradeLevels {
    pub nets: u32,
    pub oysters: u32,
    pub lanterns: u32,
    pub spirit: u32,
}

impl UpgradeLevels {
    pub fn level(&self, kind: UpgradeKind) -> u32 {
        match kind {
            UpgradeKind::Nets => self.nets,
            UpgradeKind::Oysters => self.oysters,
            UpgradeKind::Lanterns => self.lanterns,
            UpgradeKind::Spirit => self.spirit,
        }
    }

    pub fn level_mut(&mut self, kind: UpgradeKind) -> &mut u32 {
        match kind {
            UpgradeKind::Nets => &mut self.nets,
            UpgradeKind::Oysters => &mut self.oysters,
            UpgradeKind::Lanterns => &mut self.lanterns,
            UpgradeKind::Spirit => &mut self.spirit,
        }
    }
}

/// A cosmetic depth zone. Zones gate flavor only — the lanterns upgrade
/// advances through them, and artifacts need the deepest one.
pub struct Zone {
    pub name: &'static str,
    pub min_depth: u32,
    pub fauna: [&'static str; 3],
}

pub const ZONES: &[Zone] = &[
    Zone {
        name: "Quiet Shoal",
        min_depth: 0,
        fauna: ["roach", "crab", "mussel"],
    },
    Zone {
        name: "Song of the Reefs",
        min_depth: 100,
        fauna: ["coral", "pearl", "seahorse"],
    },
    Zone {
        name: "Jellyfish Light",
        min_depth: 500,
        fauna: ["jellyfish", "glowworm", "phosphor"],
    },
    Zone {
        name: "Silent Abyss",
        min_depth: 2000,
        fauna: ["ancient relic", "deep fish", "eye of the deep"],
    },
];

/// What a single achievement waits for. Thresholds compare against
/// lifetime totals, so spending a currency never re-locks anything.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AchievementCondition {
    FishCaught(f64),
    PearlsFound(f64),
    ArtifactsFound(f64),
    DepthReached(u32),
    ZoneReached(usize),
}

#[derive(Clone, Debug)]
pub struct Achievement {
    pub name: &'static str,
    pub description: &'static str,
    pub condition: AchievementCondition,
    pub unlocked: bool,
}

fn create_achievements() -> Vec<Achievement> {
    let def = |name, description, condition| Achievement {
        name,
        description,
        condition,
        unlocked: false,
    };
    vec![
        def(
            "First Catch",
            "Catch your first fish",
            AchievementCondition::FishCaught(1.0),
        ),
        def(
            "A Hundred Fish",
            "Catch 100 fish",
            AchievementCondition::FishCaught(100.0),
        ),
        def(
            "Pearl Diver",
            "Find your first pearl",
            AchievementCondition::PearlsFound(1.0),
        ),
        def(
            "Keeper of Relics",
            "Find an ancient artifact",
            AchievementCondition::ArtifactsFound(1.0),
        ),
        def(
            "A Thousand Casts",
            "Cast the line 1000 times",
            AchievementCondition::DepthReached(1000),
        ),
        def(
            "Into the Abyss",
            "Reach the Silent Abyss",
            AchievementCondition::ZoneReached(3),
        ),
    ]
}

/// A transient ring spreading on the water where a cast landed.
/// Removed from the working set once `life` reaches zero.
#[derive(Clone, Debug)]
pub struct Ripple {
    pub id: u64,
    /// Terminal cell of the tap (clamped into the water when drawn).
    pub col: u16,
    pub row: u16,
    /// Remaining lifetime in ticks.
    pub life: u32,
    pub max_life: u32,
}

/// A short-lived message in the top-right corner.
#[derive(Clone, Debug)]
pub struct Notification {
    pub id: u64,
    pub text: String,
    /// Remaining lifetime in ticks.
    pub life: u32,
    pub is_important: bool,
}

/// Which panel the player is looking at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Panel {
    Ocean,
    Upgrades,
    Inventory,
    Menu,
}

/// Notifications live for 3 seconds (30 ticks at 10 ticks/sec).
pub const NOTIFICATION_LIFE: u32 = 30;

const MAX_NOTIFICATIONS: usize = 5;
const MAX_RIPPLES: usize = 16;

/// Full state of a Silent Depths run.
///
/// Everything above the "transient UI" divider round-trips through the
/// save blob (see `save.rs`); everything below it is rebuilt each session.
pub struct GameState {
    // Currencies. Displayed floored, stored fractional.
    pub fish: f64,
    pub pearls: f64,
    pub artifacts: f64,

    /// Index into [`ZONES`]; never decreases.
    pub current_zone: usize,
    pub upgrades: UpgradeLevels,

    /// Fish per cast before the multiplier (starts at 1.0).
    pub fishing_power: f64,
    /// Base pearl probability per cast (starts at 0.01).
    pub pearl_chance: f64,

    /// Boat energy in [0, 100]; a cast costs 10, regen is +0.5/sec.
    pub boat_energy: f64,

    /// Total casts performed — the "depth" the boat has worked through.
    pub depth: u32,

    /// Timed yield multiplier. `multiplier_end_time` is an epoch-ms
    /// timestamp; 0 means no window is active.
    pub active_multiplier: f64,
    pub multiplier_end_time: f64,

    // Lifetime totals, never reduced by spending. Drive achievements.
    pub total_fish_caught: f64,
    pub total_pearls_caught: f64,
    pub total_artifacts_found: f64,

    pub achievements: Vec<Achievement>,

    /// Epoch-ms timestamp of the last persisted save.
    pub last_save: f64,

    /// xorshift32 state; persisted so reloading does not replay luck.
    pub rng_state: u32,

    // ── Transient UI state (not persisted) ─────────────────────────
    pub panel: Panel,
    pub ripples: Vec<Ripple>,
    pub notifications: Vec<Notification>,
    pub offline_report: Option<OfflineReport>,
    /// Reset asks twice; the first tap arms this.
    pub confirm_reset: bool,
    pub anim_frame: u32,
    /// Ticks since the last passive-income grant.
    pub ticks_since_income: u32,
    /// Ticks since the last save (autosave trigger).
    pub ticks_since_save: u32,
    next_popup_id: u64,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            fish: 0.0,
            pearls: 0.0,
            artifacts: 0.0,
            current_zone: 0,
            upgrades: UpgradeLevels::default(),
            fishing_power: 1.0,
            pearl_chance: 0.01,
            boat_energy: 100.0,
            depth: 0,
            active_multiplier: 1.0,
            multiplier_end_time: 0.0,
            total_fish_caught: 0.0,
            total_pearls_caught: 0.0,
            total_artifacts_found: 0.0,
            achievements: create_achievements(),
            last_save: 0.0,
            rng_state: 42,
            panel: Panel::Ocean,
            ripples: Vec::new(),
            notifications: Vec::new(),
            offline_report: None,
            confirm_reset: false,
            anim_frame: 0,
            ticks_since_income: 0,
            ticks_since_save: 0,
            next_popup_id: 0,
        }
    }

    /// xorshift32 step. The state word lives in the save blob, so a
    /// reloaded game continues the same sequence.
    pub fn next_random(&mut self) -> u32 {
        let mut x = self.rng_state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.rng_state = x;
        x
    }

    /// Uniform draw in [0, 1).
    pub fn next_unit(&mut self) -> f64 {
        self.next_random() as f64 / (u32::MAX as f64 + 1.0)
    }

    /// Fresh ID for ripples and notifications.
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_popup_id;
        self.next_popup_id += 1;
        id
    }

    pub fn push_notification(&mut self, text: &str, is_important: bool) {
        let id = self.next_id();
        self.notifications.push(Notification {
            id,
            text: text.to_string(),
            life: NOTIFICATION_LIFE,
            is_important,
        });
        if self.notifications.len() > MAX_NOTIFICATIONS {
            self.notifications.remove(0);
        }
    }

    pub fn push_ripple(&mut self, ripple: Ripple) {
        self.ripples.push(ripple);
        if self.ripples.len() > MAX_RIPPLES {
            self.ripples.remove(0);
        }
    }

    /// Current price of an upgrade: `floor(base * 1.5^level)`.
    pub fn upgrade_price(&self, kind: UpgradeKind) -> f64 {
        (kind.base_price() * 1.5f64.powi(self.upgrades.level(kind) as i32)).floor()
    }

    pub fn currency_balance(&self, currency: Currency) -> f64 {
        match currency {
            Currency::Fish => self.fish,
            Currency::Pearls => self.pearls,
            Currency::Artifacts => self.artifacts,
        }
    }

    pub fn currency_balance_mut(&mut self, currency: Currency) -> &mut f64 {
        match currency {
            Currency::Fish => &mut self.fish,
            Currency::Pearls => &mut self.pearls,
            Currency::Artifacts => &mut self.artifacts,
        }
    }

    pub fn zone(&self) -> &'static Zone {
        &ZONES[self.current_zone.min(ZONES.len() - 1)]
    }
}

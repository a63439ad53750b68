//! Shared components, resources, events, and states for Brawlvale.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE — top-level state machine
// ═══════════════════════════════════════════════════════════════════════

/// Exactly one scene/mode is active at a time. Movement, survival decay,
/// the clock and proximity checks all run only in `Playing`; every modal
/// state freezes them by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    CharacterSelect,
    Playing,
    Shop,
    Notice,
    Inventory,
    Battle,
    GameOver,
}

// ═══════════════════════════════════════════════════════════════════════
// GAME CLOCK
// ═══════════════════════════════════════════════════════════════════════

/// Session speed multiplier. Scales the clock, survival decay, movement
/// and energy drain alike.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameSpeed {
    #[default]
    Normal,
    Double,
    Triple,
}

impl GameSpeed {
    pub fn multiplier(self) -> f32 {
        match self {
            GameSpeed::Normal => 1.0,
            GameSpeed::Double => 2.0,
            GameSpeed::Triple => 3.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GameSpeed::Normal => "1x",
            GameSpeed::Double => "2x",
            GameSpeed::Triple => "3x",
        }
    }
}

/// In-game time. One game-minute passes per real second, scaled by
/// `GameSpeed`. Paused whenever the session leaves `Playing`.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct GameClock {
    pub day: u32,
    pub hour: u8,   // 0-23
    pub minute: u8, // 0-59
    pub time_paused: bool,
    pub elapsed_real_seconds: f32, // accumulator for sub-minute ticks
}

impl Default for GameClock {
    fn default() -> Self {
        Self {
            day: 1,
            hour: 8,
            minute: 0,
            time_paused: false,
            elapsed_real_seconds: 0.0,
        }
    }
}

impl GameClock {
    pub fn advance_minutes(&mut self, minutes: u32) {
        let total = self.minute as u32 + minutes;
        self.minute = (total % 60) as u8;
        self.advance_hours(total / 60);
    }

    pub fn advance_hours(&mut self, hours: u32) {
        let total = self.hour as u32 + hours;
        self.hour = (total % 24) as u8;
        self.day += total / 24;
    }

    /// Display form, e.g. "Day 3, 08:05".
    pub fn label(&self) -> String {
        format!("Day {}, {:02}:{:02}", self.day, self.hour, self.minute)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER SHEET
// ═══════════════════════════════════════════════════════════════════════

/// A survival gauge. `current` is clamped to `[0, max]` by every mutator,
/// so call sites cannot produce an out-of-range value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vital {
    pub current: f32,
    pub max: f32,
}

impl Vital {
    pub fn full(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn add(&mut self, amount: f32) {
        self.current = (self.current + amount).clamp(0.0, self.max);
    }

    pub fn drain(&mut self, amount: f32) {
        self.add(-amount);
    }

    pub fn restore_full(&mut self) {
        self.current = self.max;
    }

    /// Raises the ceiling and tops the gauge up by the same amount.
    pub fn raise_max(&mut self, amount: f32) {
        self.max += amount;
        self.add(amount);
    }

    pub fn is_empty(&self) -> bool {
        self.current <= 0.0
    }

    pub fn ratio(&self) -> f32 {
        if self.max > 0.0 {
            self.current / self.max
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VitalKind {
    Health,
    Hunger,
    Thirst,
    Energy,
}

impl VitalKind {
    pub fn label(self) -> &'static str {
        match self {
            VitalKind::Health => "Health",
            VitalKind::Hunger => "Hunger",
            VitalKind::Thirst => "Thirst",
            VitalKind::Energy => "Energy",
        }
    }
}

/// One inventory row. Rows are unique by item id; buying an owned item
/// bumps the quantity instead of appending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item_id: ItemId,
    pub quantity: u32,
}

/// Ordered item collection. Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    pub stacks: Vec<ItemStack>,
}

impl Inventory {
    pub fn add(&mut self, item_id: &str) {
        if let Some(stack) = self.stacks.iter_mut().find(|s| s.item_id == item_id) {
            stack.quantity = stack.quantity.saturating_add(1);
        } else {
            self.stacks.push(ItemStack {
                item_id: item_id.to_string(),
                quantity: 1,
            });
        }
    }

    pub fn count(&self, item_id: &str) -> u32 {
        self.stacks
            .iter()
            .find(|s| s.item_id == item_id)
            .map(|s| s.quantity)
            .unwrap_or(0)
    }

    pub fn total_items(&self) -> u32 {
        self.stacks.iter().map(|s| s.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }
}

/// The whole session-owned player resource: identity, vitals, purse,
/// combat stats and inventory. Battle works on a clone of this and hands
/// it back through `BattleResolvedEvent`.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSheet {
    pub nickname: String,
    pub name: String,
    pub portrait: String,
    pub health: Vital,
    pub hunger: Vital,
    pub thirst: Vital,
    pub energy: Vital,
    pub money: u32,
    pub base_damage: u32,
    pub damage_bonus: u32,
    pub inventory: Inventory,
}

impl Default for PlayerSheet {
    fn default() -> Self {
        Self {
            nickname: String::new(),
            name: String::new(),
            portrait: String::new(),
            health: Vital::full(100.0),
            hunger: Vital::full(100.0),
            thirst: Vital::full(100.0),
            energy: Vital::full(100.0),
            money: 0,
            base_damage: 5,
            damage_bonus: 0,
            inventory: Inventory::default(),
        }
    }
}

impl PlayerSheet {
    pub fn from_template(template: &FighterTemplate, nickname: &str) -> Self {
        Self {
            nickname: nickname.trim().to_string(),
            name: template.name.clone(),
            portrait: template.portrait.clone(),
            health: Vital::full(template.max_health),
            hunger: Vital::full(template.max_hunger),
            thirst: Vital::full(template.max_thirst),
            energy: Vital::full(template.max_energy),
            money: template.starting_money,
            base_damage: template.base_damage,
            damage_bonus: 0,
            inventory: Inventory::default(),
        }
    }

    /// Effective per-round damage in the arena.
    pub fn attack_damage(&self) -> u32 {
        self.base_damage.saturating_add(self.damage_bonus)
    }

    pub fn vital_mut(&mut self, kind: VitalKind) -> &mut Vital {
        match kind {
            VitalKind::Health => &mut self.health,
            VitalKind::Hunger => &mut self.hunger,
            VitalKind::Thirst => &mut self.thirst,
            VitalKind::Energy => &mut self.energy,
        }
    }

    pub fn vital(&self, kind: VitalKind) -> &Vital {
        match kind {
            VitalKind::Health => &self.health,
            VitalKind::Hunger => &self.hunger,
            VitalKind::Thirst => &self.thirst,
            VitalKind::Energy => &self.energy,
        }
    }
}

/// Marker for the roaming player entity.
#[derive(Component, Debug, Clone, Default)]
pub struct Player;

/// Logical position in map pixels: the sprite's top-left corner, y down,
/// origin at the map's top-left (the render layer converts to world
/// transforms). Clamped so the footprint stays inside the map.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct MapPosition(pub Vec2);

/// On-map collision/render box in pixels. Defaults to a square until the
/// portrait's aspect ratio is known.
#[derive(Component, Debug, Clone, Copy)]
pub struct Footprint(pub Vec2);

impl Default for Footprint {
    fn default() -> Self {
        Self(Vec2::splat(PLAYER_DISPLAY_SIZE))
    }
}

impl Footprint {
    /// Proximity reach is measured from the smaller half-extent.
    pub fn half_reach(&self) -> f32 {
        self.0.x.min(self.0.y) / 2.0
    }
}

/// Convert a top-left map position plus footprint into a Bevy world
/// translation (sprite anchored at its center, map centered on the origin,
/// y flipped).
pub fn map_to_world(pos: Vec2, footprint: Vec2, z: f32) -> Vec3 {
    Vec3::new(
        pos.x + footprint.x / 2.0 - MAP_WIDTH / 2.0,
        MAP_HEIGHT / 2.0 - (pos.y + footprint.y / 2.0),
        z,
    )
}

/// Center of an entity's footprint in map pixels, used for proximity math.
pub fn footprint_center(pos: Vec2, footprint: Vec2) -> Vec2 {
    pos + footprint / 2.0
}

// ═══════════════════════════════════════════════════════════════════════
// FIGHTER TEMPLATES
// ═══════════════════════════════════════════════════════════════════════

/// A selectable starting character. Template stats become both max and
/// current values of a fresh sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FighterTemplate {
    pub name: String,
    pub tagline: String,
    pub portrait: String,
    pub max_health: f32,
    pub max_hunger: f32,
    pub max_thirst: f32,
    pub max_energy: f32,
    pub starting_money: u32,
    pub base_damage: u32,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct FighterRoster {
    pub templates: Vec<FighterTemplate>,
}

// ═══════════════════════════════════════════════════════════════════════
// STATIONS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StationKind {
    FoodShop,
    WeaponShop,
    Heal,
    Rest,
    Battle,
    /// Plain flavor stop: interaction shows the greeting and nothing else.
    Landmark,
}

#[derive(Debug, Clone)]
pub struct StationDef {
    pub id: String,
    pub name: String,
    pub kind: StationKind,
    pub center: Vec2,
    pub radius: f32,
    /// Prompt/opener line. Empty means a default is built from the name.
    pub greeting: String,
    pub sprite: String,
    pub display_size: Vec2,
}

impl StationDef {
    pub fn greeting_or_default(&self) -> String {
        if self.greeting.is_empty() {
            format!("Welcome to the {}.", self.name)
        } else {
            self.greeting.clone()
        }
    }
}

/// Definition order is authoritative: proximity scans stop at the first
/// station in range.
#[derive(Resource, Debug, Clone, Default)]
pub struct StationRegistry {
    pub stations: Vec<StationDef>,
}

/// Which station the player currently stands near, if any
/// (index into `StationRegistry`).
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NearbyStation(pub Option<usize>);

/// Marker for spawned station sprites.
#[derive(Component, Debug, Clone)]
pub struct Station {
    pub index: usize,
}

// ═══════════════════════════════════════════════════════════════════════
// ITEMS & SHOPS
// ═══════════════════════════════════════════════════════════════════════

/// Unique identifier for every item type in the game.
/// Using string IDs for data-driven flexibility.
pub type ItemId = String;

/// What buying an item does to the sheet, applied atomically with the
/// payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemEffect {
    /// Permanent damage bonus, stacks across purchases.
    Weapon { damage_bonus: u32 },
    /// Tops up current hunger/thirst, clamped to max.
    Restore { hunger: f32, thirst: f32 },
    /// Raises a vital's max and tops the current value up by the same
    /// amount, never past the new max.
    Fortify { vital: VitalKind, amount: f32 },
}

impl ItemEffect {
    /// One-line description for shop listings.
    pub fn describe(&self) -> String {
        match self {
            ItemEffect::Weapon { damage_bonus } => format!("+{} damage", damage_bonus),
            ItemEffect::Restore { hunger, thirst } => match (*hunger > 0.0, *thirst > 0.0) {
                (true, true) => format!("+{:.0} hunger, +{:.0} thirst", hunger, thirst),
                (true, false) => format!("+{:.0} hunger", hunger),
                (false, true) => format!("+{:.0} thirst", thirst),
                (false, false) => String::from("no effect"),
            },
            ItemEffect::Fortify { vital, amount } => {
                format!("+{:.0} max {}", amount, vital.label().to_lowercase())
            }
        }
    }

    pub fn is_weapon(&self) -> bool {
        matches!(self, ItemEffect::Weapon { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub price: u32,
    pub effect: ItemEffect,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct ItemRegistry {
    pub items: HashMap<ItemId, ItemDef>,
}

impl ItemRegistry {
    pub fn get(&self, id: &str) -> Option<&ItemDef> {
        self.items.get(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShopId {
    FoodStall,
    WeaponSmith,
}

impl ShopId {
    pub fn title(self) -> &'static str {
        match self {
            ShopId::FoodStall => "FOOD STALL",
            ShopId::WeaponSmith => "WEAPON SMITH",
        }
    }
}

/// Catalog order per shop; prices live on the item defs.
#[derive(Resource, Debug, Clone, Default)]
pub struct ShopData {
    pub listings: HashMap<ShopId, Vec<ItemId>>,
}

// ═══════════════════════════════════════════════════════════════════════
// ENEMIES & BATTLE CONTRACT
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Extreme,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Extreme => "Extreme",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyDef {
    pub id: String,
    pub name: String,
    pub max_health: f32,
    pub damage_min: u32,
    pub damage_max: u32,
    pub reward_min: u32,
    pub reward_max: u32,
    pub difficulty: Difficulty,
    pub sprite: String,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct EnemyRoster {
    pub enemies: Vec<EnemyDef>,
}

/// How an arena visit ended, as far as the town is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Win,
    LosePlayerDefeated,
    ReturnedWithoutBattle,
}

/// Inserted by the town right before transitioning into `Battle`:
/// the validated sheet snapshot plus the damage it fights with.
#[derive(Resource, Debug, Clone)]
pub struct BattleHandoff {
    pub sheet: PlayerSheet,
    pub damage: u32,
}

// ═══════════════════════════════════════════════════════════════════════
// SESSION BOOKKEEPING
// ═══════════════════════════════════════════════════════════════════════

/// Running tallies for the current session, shown on the game-over screen.
#[derive(Resource, Debug, Clone, Default)]
pub struct SessionStats {
    pub money_spent: u64,
    pub money_earned: u64,
    pub purchases: u32,
    pub battles_won: u32,
    pub battles_lost: u32,
}

/// Inserted right before transitioning into `GameOver`.
#[derive(Resource, Debug, Clone)]
pub struct GameOverReport {
    pub cause: String,
    pub final_time: String,
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — cross-domain communication
// ═══════════════════════════════════════════════════════════════════════

/// Town → economy/UI: open a shop modal.
#[derive(Event, Debug, Clone)]
pub struct OpenShopEvent {
    pub shop_id: ShopId,
    pub greeting: String,
}

/// Anyone → UI: open a dismissible one-line notice modal.
#[derive(Event, Debug, Clone)]
pub struct NoticeEvent {
    pub text: String,
}

/// Purse change notification. The sender has already mutated the sheet;
/// listeners persist and tally, they never re-apply the amount.
#[derive(Event, Debug, Clone)]
pub struct MoneyChangedEvent {
    pub amount: i32, // positive = gain, negative = spend
    pub reason: String,
    pub balance: u32,
}

/// Economy → UI/audio: a purchase went through.
#[derive(Event, Debug, Clone)]
pub struct PurchaseEvent {
    pub shop_id: ShopId,
    pub item_id: ItemId,
    pub price: u32,
}

/// Battle → town: the typed return channel. Carries the final sheet and
/// how the visit ended; the town re-hydrates from it verbatim.
#[derive(Event, Debug, Clone)]
pub struct BattleResolvedEvent {
    pub sheet: PlayerSheet,
    pub outcome: BattleOutcome,
}

#[derive(Event, Debug, Clone)]
pub struct PlaySfxEvent {
    pub sfx_id: String,
}

/// Toast notification for player feedback.
#[derive(Event, Debug, Clone)]
pub struct ToastEvent {
    pub message: String,
    pub duration_secs: f32,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const MAP_WIDTH: f32 = 800.0;
pub const MAP_HEIGHT: f32 = 600.0;

pub const PLAYER_DISPLAY_SIZE: f32 = 70.0;
pub const STATION_DISPLAY_SIZE: f32 = 120.0;

/// Spawn point: map center, top-left anchored.
pub const SPAWN_POINT: Vec2 = Vec2::new(
    (MAP_WIDTH - PLAYER_DISPLAY_SIZE) / 2.0,
    (MAP_HEIGHT - PLAYER_DISPLAY_SIZE) / 2.0,
);

pub const NORMAL_SPEED: f32 = 400.0; // px per second
pub const SLOWED_SPEED: f32 = 100.0; // px per second once energy is empty

/// Real frame deltas are clamped to this many seconds before use.
pub const MAX_FRAME_DELTA: f32 = 0.1;

pub const HUNGER_DECAY_PER_SECOND: f32 = 2.5;
pub const THIRST_DECAY_PER_SECOND: f32 = 2.5;
pub const ENERGY_DRAIN_PER_SECOND: f32 = 5.0;
pub const CRITICAL_HEALTH_DECAY_PER_SECOND: f32 = 1.66;

pub const REST_HOURS: u32 = 8;

pub const BATTLE_LOG_LINES: usize = 5;

pub const MINIMAP_SIZE: f32 = 230.0;

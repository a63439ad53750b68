//! Data layer — populates every registry at startup.
//!
//! This plugin runs in OnEnter(GameState::Loading), fills the registries
//! (FighterRoster, ItemRegistry, ShopData, EnemyRoster, StationRegistry)
//! from the hard-coded game-design data defined in submodules, then
//! transitions the game into GameState::CharacterSelect.
//!
//! No other domain needs to seed these resources. All domain plugins can
//! safely read them once GameState has advanced past Loading.

mod enemies;
mod fighters;
mod items;
mod shops;
mod stations;

use bevy::prelude::*;

use crate::shared::*;

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Loading), load_all_data);
    }
}

/// Single system that populates every registry and then moves on to
/// character select.
fn load_all_data(
    mut fighter_roster: ResMut<FighterRoster>,
    mut item_registry: ResMut<ItemRegistry>,
    mut shop_data: ResMut<ShopData>,
    mut enemy_roster: ResMut<EnemyRoster>,
    mut station_registry: ResMut<StationRegistry>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    info!("DataPlugin: populating registries…");

    fighters::populate_fighters(&mut fighter_roster);
    info!("  Fighters loaded: {}", fighter_roster.templates.len());

    items::populate_items(&mut item_registry);
    info!("  Items loaded: {}", item_registry.items.len());

    shops::populate_shops(&mut shop_data);
    let total_listings: usize = shop_data.listings.values().map(|v| v.len()).sum();
    info!(
        "  Shop listings loaded: {} across {} shops",
        total_listings,
        shop_data.listings.len()
    );

    enemies::populate_enemies(&mut enemy_roster);
    info!("  Enemies loaded: {}", enemy_roster.enemies.len());

    stations::populate_stations(&mut station_registry);
    info!("  Stations loaded: {}", station_registry.stations.len());

    info!("DataPlugin: all registries populated. Transitioning to CharacterSelect.");
    next_state.set(GameState::CharacterSelect);
}

use bevy::prelude::*;

use crate::shared::*;

/// Populate the town square's five stations.
///
/// The vec order is authoritative: when interaction circles overlap, the
/// earliest entry wins, so the roster doubles as the tiebreak table.
pub fn populate_stations(registry: &mut StationRegistry) {
    registry.stations = vec![
        StationDef {
            id: "food_stall".into(),
            name: "Food Stall".into(),
            kind: StationKind::FoodShop,
            center: Vec2::new(70.0, 75.0),
            radius: 70.0,
            greeting: "Hungry? Step right up!".into(),
            sprite: "stations/food_stall.png".into(),
            display_size: Vec2::splat(STATION_DISPLAY_SIZE),
        },
        StationDef {
            id: "clinic".into(),
            name: "Clinic".into(),
            kind: StationKind::Heal,
            center: Vec2::new(400.0, 75.0),
            radius: 75.0,
            greeting: String::new(),
            sprite: "stations/clinic.png".into(),
            display_size: Vec2::splat(STATION_DISPLAY_SIZE),
        },
        StationDef {
            id: "weapon_smith".into(),
            name: "Weapon Smith".into(),
            kind: StationKind::WeaponShop,
            center: Vec2::new(730.0, 75.0),
            radius: 70.0,
            greeting: "Looking for new steel?".into(),
            sprite: "stations/weapon_smith.png".into(),
            display_size: Vec2::splat(STATION_DISPLAY_SIZE),
        },
        StationDef {
            id: "rest_spot".into(),
            name: "Rest Spot".into(),
            kind: StationKind::Rest,
            center: Vec2::new(70.0, 520.0),
            radius: 70.0,
            greeting: String::new(),
            sprite: "stations/rest_spot.png".into(),
            display_size: Vec2::splat(STATION_DISPLAY_SIZE),
        },
        StationDef {
            id: "battle_gate".into(),
            name: "Battle Gate".into(),
            kind: StationKind::Battle,
            center: Vec2::new(730.0, 520.0),
            radius: 70.0,
            greeting: "Ready to rumble?!".into(),
            sprite: "stations/battle_gate.png".into(),
            display_size: Vec2::splat(STATION_DISPLAY_SIZE),
        },
    ];
}

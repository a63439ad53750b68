use crate::shared::*;

/// Populate the arena roster, easiest first.
///
/// The Landlord is the joke ceiling: six-figure health, a damage roll
/// that can one-shot anyone, and a payout to match. The list order is
/// the order the arena menu shows.
pub fn populate_enemies(roster: &mut EnemyRoster) {
    roster.enemies = vec![
        EnemyDef {
            id: "scrap_hound".into(),
            name: "Scrap Hound".into(),
            max_health: 50.0,
            damage_min: 5,
            damage_max: 10,
            reward_min: 500,
            reward_max: 1000,
            difficulty: Difficulty::Easy,
            sprite: "enemies/scrap_hound.png".into(),
        },
        EnemyDef {
            id: "bog_howler".into(),
            name: "Bog Howler".into(),
            max_health: 250.0,
            damage_min: 15,
            damage_max: 25,
            reward_min: 200,
            reward_max: 400,
            difficulty: Difficulty::Medium,
            sprite: "enemies/bog_howler.png".into(),
        },
        EnemyDef {
            id: "iron_colossus".into(),
            name: "Iron Colossus".into(),
            max_health: 5000.0,
            damage_min: 50,
            damage_max: 100,
            reward_min: 1000,
            reward_max: 2000,
            difficulty: Difficulty::Hard,
            sprite: "enemies/iron_colossus.png".into(),
        },
        EnemyDef {
            id: "the_landlord".into(),
            name: "The Landlord".into(),
            max_health: 100000.0,
            damage_min: 1,
            damage_max: 100000,
            reward_min: 10000,
            reward_max: 100000,
            difficulty: Difficulty::Extreme,
            sprite: "enemies/the_landlord.png".into(),
        },
    ];
}

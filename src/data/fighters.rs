use crate::shared::*;

/// Populate the selectable fighter roster.
///
/// The four of them trade durability against wallet: Garrod is the
/// balanced brick, Pip starts rich and brittle. Everyone punches the
/// same until they buy steel.
pub fn populate_fighters(roster: &mut FighterRoster) {
    roster.templates = vec![
        FighterTemplate {
            name: "Garrod".into(),
            tagline: "Retired dock hand. Still unloads.".into(),
            portrait: "fighters/garrod.png".into(),
            max_health: 100.0,
            max_hunger: 100.0,
            max_thirst: 100.0,
            max_energy: 100.0,
            starting_money: 50,
            base_damage: 5,
        },
        FighterTemplate {
            name: "Tessa".into(),
            tagline: "Runs everywhere. Eats on the move.".into(),
            portrait: "fighters/tessa.png".into(),
            max_health: 80.0,
            max_hunger: 90.0,
            max_thirst: 90.0,
            max_energy: 120.0,
            starting_money: 70,
            base_damage: 5,
        },
        FighterTemplate {
            name: "Pip".into(),
            tagline: "Small, loud, surprisingly wealthy.".into(),
            portrait: "fighters/pip.png".into(),
            max_health: 70.0,
            max_hunger: 80.0,
            max_thirst: 80.0,
            max_energy: 150.0,
            starting_money: 100,
            base_damage: 5,
        },
        FighterTemplate {
            name: "Olga".into(),
            tagline: "Forged horseshoes. Now forges reputations.".into(),
            portrait: "fighters/olga.png".into(),
            max_health: 90.0,
            max_hunger: 100.0,
            max_thirst: 90.0,
            max_energy: 110.0,
            starting_money: 60,
            base_damage: 5,
        },
    ];
}

use crate::shared::*;

/// Populate the ItemRegistry with everything either counter sells.
pub fn populate_items(registry: &mut ItemRegistry) {
    let defs = vec![
        // ── Food stall ────────────────────────────────────────────
        ItemDef {
            id: "barley_loaf".into(),
            name: "Barley Loaf".into(),
            description: "Dense, honest bread. Sits in the stomach like ballast.".into(),
            price: 20,
            effect: ItemEffect::Restore {
                hunger: 30.0,
                thirst: 0.0,
            },
        },
        ItemDef {
            id: "spring_water".into(),
            name: "Spring Water".into(),
            description: "Cold enough to hurt your teeth.".into(),
            price: 15,
            effect: ItemEffect::Restore {
                hunger: 0.0,
                thirst: 30.0,
            },
        },
        ItemDef {
            id: "stew_platter".into(),
            name: "Stew Platter".into(),
            description: "A bit of everything the cook could reach.".into(),
            price: 40,
            effect: ItemEffect::Restore {
                hunger: 20.0,
                thirst: 20.0,
            },
        },
        ItemDef {
            id: "hunger_tonic".into(),
            name: "Hunger Tonic".into(),
            description: "Stretches the stomach for good.".into(),
            price: 50,
            effect: ItemEffect::Fortify {
                vital: VitalKind::Hunger,
                amount: 20.0,
            },
        },
        ItemDef {
            id: "thirst_tonic".into(),
            name: "Thirst Tonic".into(),
            description: "Teaches the body to hold its water.".into(),
            price: 50,
            effect: ItemEffect::Fortify {
                vital: VitalKind::Thirst,
                amount: 20.0,
            },
        },
        // ── Weapon smith ──────────────────────────────────────────
        ItemDef {
            id: "rusty_sword".into(),
            name: "Rusty Sword".into(),
            description: "The rust adds character. And tetanus.".into(),
            price: 50,
            effect: ItemEffect::Weapon { damage_bonus: 10 },
        },
        ItemDef {
            id: "woodsman_axe".into(),
            name: "Woodsman Axe".into(),
            description: "Balanced for trees. Works on everything else.".into(),
            price: 80,
            effect: ItemEffect::Weapon { damage_bonus: 15 },
        },
        ItemDef {
            id: "health_elixir".into(),
            name: "Health Elixir".into(),
            description: "Thickens the blood, the smith claims.".into(),
            price: 30,
            effect: ItemEffect::Fortify {
                vital: VitalKind::Health,
                amount: 20.0,
            },
        },
        ItemDef {
            id: "energy_elixir".into(),
            name: "Energy Elixir".into(),
            description: "Tastes like lightning and regret.".into(),
            price: 30,
            effect: ItemEffect::Fortify {
                vital: VitalKind::Energy,
                amount: 20.0,
            },
        },
        ItemDef {
            id: "vitality_apple".into(),
            name: "Vitality Apple".into(),
            description: "Polished daily. Nobody knows by whom.".into(),
            price: 75,
            effect: ItemEffect::Fortify {
                vital: VitalKind::Health,
                amount: 10.0,
            },
        },
    ];

    for def in defs {
        registry.items.insert(def.id.clone(), def);
    }
}

use bevy::prelude::*;

use crate::input::PlayerInput;
use crate::shared::*;

#[derive(Component)]
pub struct InventoryScreenRoot;

/// Opens the bag from free roam. Like every other modal this freezes the
/// session until dismissed.
pub fn open_inventory(input: Res<PlayerInput>, mut next_state: ResMut<NextState<GameState>>) {
    if input.open_inventory {
        next_state.set(GameState::Inventory);
    }
}

pub fn close_inventory(input: Res<PlayerInput>, mut next_state: ResMut<NextState<GameState>>) {
    if input.dismiss {
        next_state.set(GameState::Playing);
    }
}

/// One row per owned stack, weapons listed first, then everything else in
/// purchase order.
pub fn spawn_inventory_screen(
    mut commands: Commands,
    sheet: Res<PlayerSheet>,
    item_registry: Res<ItemRegistry>,
) {
    let mut weapons: Vec<String> = Vec::new();
    let mut goods: Vec<String> = Vec::new();

    for stack in &sheet.inventory.stacks {
        let (name, is_weapon) = match item_registry.get(&stack.item_id) {
            Some(def) => (def.name.clone(), def.effect.is_weapon()),
            None => (stack.item_id.clone(), false),
        };
        let line = format!("{} x{}", name, stack.quantity);
        if is_weapon {
            weapons.push(line);
        } else {
            goods.push(line);
        }
    }

    commands
        .spawn((
            InventoryScreenRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        width: Val::Px(380.0),
                        flex_direction: FlexDirection::Column,
                        padding: UiRect::all(Val::Px(16.0)),
                        row_gap: Val::Px(6.0),
                        border: UiRect::all(Val::Px(3.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.12, 0.1, 0.08, 0.95)),
                    BorderColor(Color::srgb(0.5, 0.4, 0.25)),
                ))
                .with_children(|panel| {
                    panel.spawn((
                        Text::new(format!("{}'S BAG", sheet.nickname.to_uppercase())),
                        TextFont {
                            font_size: 22.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.95, 0.85, 0.45)),
                    ));

                    if weapons.is_empty() && goods.is_empty() {
                        panel.spawn((
                            Text::new("Nothing but lint."),
                            TextFont {
                                font_size: 15.0,
                                ..default()
                            },
                            TextColor(Color::srgb(0.6, 0.6, 0.6)),
                        ));
                    }

                    for line in weapons.iter().chain(goods.iter()) {
                        panel.spawn((
                            Text::new(line.clone()),
                            TextFont {
                                font_size: 15.0,
                                ..default()
                            },
                            TextColor(Color::srgb(0.9, 0.9, 0.9)),
                        ));
                    }

                    panel.spawn((
                        Text::new(format!(
                            "Damage {} (+{} from gear)",
                            sheet.attack_damage(),
                            sheet.damage_bonus
                        )),
                        TextFont {
                            font_size: 13.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.7, 0.75, 0.7)),
                    ));
                    panel.spawn((
                        Text::new("[E / Esc] Close"),
                        TextFont {
                            font_size: 12.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.55, 0.6, 0.55)),
                    ));
                });
        });
}

pub fn despawn_inventory_screen(
    mut commands: Commands,
    query: Query<Entity, With<InventoryScreenRoot>>,
) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

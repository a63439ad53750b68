use bevy::prelude::*;

use crate::economy::shop::{ActiveShop, BuyRequestEvent};
use crate::input::PlayerInput;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct ShopScreenRoot;

#[derive(Component)]
pub struct ShopRow {
    pub index: usize,
}

#[derive(Component)]
pub struct ShopRowText {
    pub index: usize,
}

#[derive(Component)]
pub struct ShopMoneyText;

// ═══════════════════════════════════════════════════════════════════════
// SPAWN / DESPAWN
// ═══════════════════════════════════════════════════════════════════════

/// Builds the counter from the listings the economy prepared. Row entities
/// are fixed for the life of the modal; only colors and the money line
/// change per frame.
pub fn spawn_shop_screen(mut commands: Commands, active_shop: Res<ActiveShop>) {
    let title = active_shop
        .shop_id
        .map(|id| id.title())
        .unwrap_or("SHOP");

    commands
        .spawn((
            ShopScreenRoot,
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
                        width: Val::Px(520.0),
                        flex_direction: FlexDirection::Column,
                        padding: UiRect::all(Val::Px(16.0)),
                        row_gap: Val::Px(8.0),
                        border: UiRect::all(Val::Px(3.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.12, 0.1, 0.08, 0.95)),
                    BorderColor(Color::srgb(0.5, 0.4, 0.25)),
                ))
                .with_children(|panel| {
                    panel.spawn((
                        Text::new(title),
                        TextFont {
                            font_size: 24.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.95, 0.85, 0.45)),
                    ));
                    panel.spawn((
                        Text::new(active_shop.greeting.clone()),
                        TextFont {
                            font_size: 13.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.7, 0.7, 0.65)),
                    ));
                    panel.spawn((
                        ShopMoneyText,
                        Text::new(""),
                        TextFont {
                            font_size: 15.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.95, 0.85, 0.45)),
                    ));

                    for (index, listing) in active_shop.listings.iter().enumerate() {
                        panel
                            .spawn((
                                ShopRow { index },
                                Node {
                                    width: Val::Percent(100.0),
                                    flex_direction: FlexDirection::Column,
                                    padding: UiRect::all(Val::Px(6.0)),
                                    ..default()
                                },
                                BackgroundColor(Color::NONE),
                            ))
                            .with_children(|row| {
                                row.spawn((
                                    ShopRowText { index },
                                    Text::new(format!(
                                        "{} — ${} ({})",
                                        listing.display_name, listing.price, listing.effect_text
                                    )),
                                    TextFont {
                                        font_size: 16.0,
                                        ..default()
                                    },
                                    TextColor(Color::WHITE),
                                ));
                                row.spawn((
                                    Text::new(listing.description.clone()),
                                    TextFont {
                                        font_size: 12.0,
                                        ..default()
                                    },
                                    TextColor(Color::srgb(0.6, 0.6, 0.6)),
                                ));
                            });
                    }

                    panel.spawn((
                        Text::new("Up/Down to browse, Enter to buy, Esc to leave"),
                        TextFont {
                            font_size: 12.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.55, 0.6, 0.55)),
                    ));
                });
        });
}

pub fn despawn_shop_screen(mut commands: Commands, query: Query<Entity, With<ShopScreenRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

// ═══════════════════════════════════════════════════════════════════════
// NAVIGATION & DISPLAY
// ═══════════════════════════════════════════════════════════════════════

/// Moves the cursor in the shared `ActiveShop` and fires buy requests; the
/// economy decides whether the purchase goes through. Escape is handled by
/// the economy's close system.
pub fn shop_navigation(
    input: Res<PlayerInput>,
    mut active_shop: ResMut<ActiveShop>,
    mut buy_writer: EventWriter<BuyRequestEvent>,
    mut sfx_writer: EventWriter<PlaySfxEvent>,
) {
    let count = active_shop.listings.len();
    if count == 0 {
        return;
    }

    if input.ui_down {
        active_shop.selected = (active_shop.selected + 1) % count;
        sfx_writer.send(PlaySfxEvent {
            sfx_id: String::from("menu_move"),
        });
    }
    if input.ui_up {
        active_shop.selected = (active_shop.selected + count - 1) % count;
        sfx_writer.send(PlaySfxEvent {
            sfx_id: String::from("menu_move"),
        });
    }

    if input.ui_confirm {
        let item_id = active_shop.listings[active_shop.selected].item_id.clone();
        buy_writer.send(BuyRequestEvent { item_id });
    }
}

pub fn update_shop_display(
    sheet: Res<PlayerSheet>,
    active_shop: Res<ActiveShop>,
    mut rows: Query<(&ShopRow, &mut BackgroundColor)>,
    mut row_texts: Query<(&ShopRowText, &mut TextColor)>,
    mut money_query: Query<&mut Text, With<ShopMoneyText>>,
) {
    for (row, mut bg) in &mut rows {
        bg.0 = if row.index == active_shop.selected {
            Color::srgba(0.35, 0.3, 0.2, 0.9)
        } else {
            Color::NONE
        };
    }

    for (row_text, mut color) in &mut row_texts {
        let affordable = active_shop
            .listings
            .get(row_text.index)
            .map(|l| l.can_afford)
            .unwrap_or(false);
        color.0 = if affordable {
            Color::WHITE
        } else {
            Color::srgb(0.75, 0.4, 0.4)
        };
    }

    if let Ok(mut text) = money_query.get_single_mut() {
        text.0 = format!("You carry ${}", sheet.money);
    }
}

//! Minimap — a scaled-down view of the square in the top-right corner:
//! one fixed dot per station, one moving dot for the player. M toggles it.

use bevy::prelude::*;

use crate::input::PlayerInput;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// COMPONENTS & RESOURCES
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct MinimapRoot;

#[derive(Component)]
pub struct MinimapPlayerDot;

/// Survives the HUD teardown on modal transitions, so the map stays the
/// way the player left it.
#[derive(Resource, Debug, Clone, Copy)]
pub struct MinimapVisible(pub bool);

impl Default for MinimapVisible {
    fn default() -> Self {
        Self(true)
    }
}

const DOT: f32 = 8.0;

fn to_minimap(map_point: Vec2) -> Vec2 {
    Vec2::new(
        map_point.x / MAP_WIDTH * MINIMAP_SIZE,
        map_point.y / MAP_HEIGHT * MINIMAP_SIZE,
    )
}

fn station_color(kind: StationKind) -> Color {
    match kind {
        StationKind::FoodShop => Color::srgb(0.85, 0.6, 0.2),
        StationKind::WeaponShop => Color::srgb(0.7, 0.7, 0.75),
        StationKind::Heal => Color::srgb(0.85, 0.3, 0.3),
        StationKind::Rest => Color::srgb(0.3, 0.5, 0.85),
        StationKind::Battle => Color::srgb(0.8, 0.25, 0.6),
        StationKind::Landmark => Color::srgb(0.6, 0.6, 0.5),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_minimap(
    mut commands: Commands,
    registry: Res<StationRegistry>,
    visible: Res<MinimapVisible>,
) {
    commands
        .spawn((
            MinimapRoot,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(8.0),
                right: Val::Px(8.0),
                width: Val::Px(MINIMAP_SIZE),
                height: Val::Px(MINIMAP_SIZE),
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.45)),
            BorderColor(Color::srgba(0.5, 0.45, 0.3, 0.8)),
            if visible.0 {
                Visibility::Visible
            } else {
                Visibility::Hidden
            },
        ))
        .with_children(|map| {
            for def in &registry.stations {
                let dot = to_minimap(def.center) - Vec2::splat(DOT / 2.0);
                map.spawn((
                    Node {
                        position_type: PositionType::Absolute,
                        left: Val::Px(dot.x),
                        top: Val::Px(dot.y),
                        width: Val::Px(DOT),
                        height: Val::Px(DOT),
                        ..default()
                    },
                    BackgroundColor(station_color(def.kind)),
                ));
            }

            map.spawn((
                MinimapPlayerDot,
                Node {
                    position_type: PositionType::Absolute,
                    width: Val::Px(DOT),
                    height: Val::Px(DOT),
                    ..default()
                },
                BackgroundColor(Color::WHITE),
            ));
        });
}

pub fn despawn_minimap(mut commands: Commands, query: Query<Entity, With<MinimapRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

pub fn toggle_minimap(
    input: Res<PlayerInput>,
    mut visible: ResMut<MinimapVisible>,
    mut query: Query<&mut Visibility, With<MinimapRoot>>,
) {
    if !input.toggle_minimap {
        return;
    }
    visible.0 = !visible.0;
    for mut visibility in &mut query {
        *visibility = if visible.0 {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}

/// Follows the player's footprint center around the scaled map.
pub fn update_minimap(
    player_query: Query<(&MapPosition, &Footprint), With<Player>>,
    mut dot_query: Query<&mut Node, With<MinimapPlayerDot>>,
) {
    let Ok((pos, footprint)) = player_query.get_single() else {
        return;
    };
    let Ok(mut node) = dot_query.get_single_mut() else {
        return;
    };

    let dot = to_minimap(footprint_center(pos.0, footprint.0)) - Vec2::splat(DOT / 2.0);
    node.left = Val::Px(dot.x);
    node.top = Val::Px(dot.y);
}

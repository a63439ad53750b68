//! Town square domain for Brawlvale.
//!
//! Responsible for:
//! - Spawning the plaza ground and the five stations when play begins
//! - Tracking which station the player is standing close enough to use
//! - Dispatching the interact key to the station's behavior
//! - Tearing the whole square down when a run ends

use bevy::prelude::*;

use crate::player::{validate_for_battle, SurvivalTimers};
use crate::input::PlayerInput;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Playing), spawn_town)
            .add_systems(OnEnter(GameState::CharacterSelect), reset_session)
            .add_systems(
                Update,
                // Proximity must see this frame's post-movement position,
                // so the whole chain runs after the movement step.
                (track_nearby_station, handle_interact)
                    .chain()
                    .after(crate::player::movement::player_movement)
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

/// Marker for plaza scenery entities (for bulk despawn).
#[derive(Component, Debug)]
pub struct TownGround;

// ═══════════════════════════════════════════════════════════════════════
// TOWN SPAWNING
// ═══════════════════════════════════════════════════════════════════════

/// Build the square: ground, plaza inlay, one sprite and one label per
/// station. Guarded so returning from the arena or a modal does not stack
/// a second copy on top.
fn spawn_town(
    mut commands: Commands,
    registry: Res<StationRegistry>,
    asset_server: Res<AssetServer>,
    existing: Query<Entity, With<Station>>,
) {
    if !existing.is_empty() {
        return;
    }

    // Ground slab covering the whole map.
    commands.spawn((
        TownGround,
        Sprite {
            color: Color::srgb(0.36, 0.42, 0.33),
            custom_size: Some(Vec2::new(MAP_WIDTH, MAP_HEIGHT)),
            ..default()
        },
        Transform::from_translation(Vec3::new(0.0, 0.0, 0.0)),
    ));

    // Lighter cobble inlay around the spawn point.
    commands.spawn((
        TownGround,
        Sprite {
            color: Color::srgb(0.47, 0.49, 0.44),
            custom_size: Some(Vec2::new(300.0, 220.0)),
            ..default()
        },
        Transform::from_translation(Vec3::new(0.0, 0.0, 1.0)),
    ));

    for (index, def) in registry.stations.iter().enumerate() {
        let size = def.display_size;
        let top_left = def.center - size / 2.0;

        commands.spawn((
            Station { index },
            Sprite {
                image: asset_server.load(def.sprite.clone()),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(map_to_world(top_left, size, 5.0)),
        ));

        // Name plate floating above the sprite.
        let label_pos = map_to_world(top_left, size, 6.0) + Vec3::new(0.0, size.y / 2.0 + 14.0, 0.0);
        commands.spawn((
            TownGround,
            Text2d::new(def.name.clone()),
            TextFont {
                font_size: 16.0,
                ..default()
            },
            TextColor(Color::srgb(0.95, 0.93, 0.85)),
            Transform::from_translation(label_pos),
        ));
    }

    info!("[World] Town square ready with {} stations", registry.stations.len());
}

/// Fresh run: clear every play entity and put the session resources back
/// to their defaults. Runs when we land on the character select screen,
/// including after a game over.
fn reset_session(
    mut commands: Commands,
    mut clock: ResMut<GameClock>,
    mut speed: ResMut<GameSpeed>,
    mut stats: ResMut<SessionStats>,
    mut nearby: ResMut<NearbyStation>,
    mut timers: ResMut<SurvivalTimers>,
    entities: Query<Entity, Or<(With<Station>, With<TownGround>, With<Player>)>>,
) {
    for entity in entities.iter() {
        commands.entity(entity).despawn_recursive();
    }

    *clock = GameClock::default();
    *speed = GameSpeed::default();
    *stats = SessionStats::default();
    nearby.0 = None;
    *timers = SurvivalTimers::default();

    commands.remove_resource::<GameOverReport>();
    commands.remove_resource::<BattleHandoff>();

    info!("[World] Session reset");
}

// ═══════════════════════════════════════════════════════════════════════
// PROXIMITY
// ═══════════════════════════════════════════════════════════════════════

/// First station (in roster order) whose interaction circle contains the
/// player's footprint center. The comparison is strictly `<`, so standing
/// exactly on the rim does not count.
pub fn nearest_station_index(
    registry: &StationRegistry,
    player_center: Vec2,
    half_reach: f32,
) -> Option<usize> {
    registry
        .stations
        .iter()
        .position(|def| player_center.distance(def.center) < def.radius + half_reach)
}

pub fn track_nearby_station(
    registry: Res<StationRegistry>,
    mut nearby: ResMut<NearbyStation>,
    query: Query<(&MapPosition, &Footprint), With<Player>>,
) {
    let Ok((pos, footprint)) = query.get_single() else {
        return;
    };

    let center = footprint_center(pos.0, footprint.0);
    let hit = nearest_station_index(&registry, center, footprint.half_reach());

    if nearby.0 != hit {
        nearby.0 = hit;
    }
}

// ═══════════════════════════════════════════════════════════════════════
// INTERACT DISPATCH
// ═══════════════════════════════════════════════════════════════════════

/// The interact key, routed by the kind of the station under the player.
/// Shops and notices hand off through events; the arena gate validates the
/// sheet and freezes a copy of it before the state flips.
#[allow(clippy::too_many_arguments)]
pub fn handle_interact(
    mut commands: Commands,
    input: Res<PlayerInput>,
    nearby: Res<NearbyStation>,
    registry: Res<StationRegistry>,
    mut sheet: ResMut<PlayerSheet>,
    mut clock: ResMut<GameClock>,
    mut next_state: ResMut<NextState<GameState>>,
    mut shop_writer: EventWriter<OpenShopEvent>,
    mut notice_writer: EventWriter<NoticeEvent>,
    mut sfx_writer: EventWriter<PlaySfxEvent>,
) {
    if !input.interact {
        return;
    }
    let Some(index) = nearby.0 else {
        return;
    };
    let Some(def) = registry.stations.get(index) else {
        return;
    };

    match def.kind {
        StationKind::FoodShop => {
            shop_writer.send(OpenShopEvent {
                shop_id: ShopId::FoodStall,
                greeting: def.greeting_or_default(),
            });
            sfx_writer.send(PlaySfxEvent {
                sfx_id: String::from("shop_open"),
            });
        }
        StationKind::WeaponShop => {
            shop_writer.send(OpenShopEvent {
                shop_id: ShopId::WeaponSmith,
                greeting: def.greeting_or_default(),
            });
            sfx_writer.send(PlaySfxEvent {
                sfx_id: String::from("shop_open"),
            });
        }
        StationKind::Heal => {
            sheet.health.restore_full();
            notice_writer.send(NoticeEvent {
                text: String::from("Patched up! You feel brand new."),
            });
            sfx_writer.send(PlaySfxEvent {
                sfx_id: String::from("heal"),
            });
            info!("[World] Healed at {}", def.name);
        }
        StationKind::Rest => {
            sheet.energy.restore_full();
            clock.advance_hours(REST_HOURS);
            notice_writer.send(NoticeEvent {
                text: format!("You slept {} hours and woke up raring to go.", REST_HOURS),
            });
            sfx_writer.send(PlaySfxEvent {
                sfx_id: String::from("rest"),
            });
            info!("[World] Rested until {}", clock.label());
        }
        StationKind::Battle => match validate_for_battle(&sheet) {
            Ok(()) => {
                // The handoff copy must be in place before the state flips.
                commands.insert_resource(BattleHandoff {
                    sheet: sheet.clone(),
                    damage: sheet.attack_damage(),
                });
                next_state.set(GameState::Battle);
                sfx_writer.send(PlaySfxEvent {
                    sfx_id: String::from("battle_start"),
                });
                info!("[World] {} steps through the arena gate", sheet.nickname);
            }
            Err(err) => {
                warn!("[World] Arena gate refused the sheet: {}", err);
                notice_writer.send(NoticeEvent {
                    text: err.to_string(),
                });
            }
        },
        StationKind::Landmark => {
            notice_writer.send(NoticeEvent {
                text: def.greeting_or_default(),
            });
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════

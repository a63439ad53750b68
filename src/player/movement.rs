use bevy::prelude::*;

use super::Portrait;
use crate::input::PlayerInput;
use crate::shared::*;

/// Move the player from the sampled input axes.
///
/// The axes are summed raw, so holding two directions covers more ground
/// per second than holding one. The town has always played that way and
/// the feel is load-bearing, so the vector is NOT normalized.
pub fn player_movement(
    time: Res<Time>,
    input: Res<PlayerInput>,
    speed: Res<GameSpeed>,
    mut sheet: ResMut<PlayerSheet>,
    mut query: Query<(&mut MapPosition, &Footprint), With<Player>>,
) {
    let Ok((mut pos, footprint)) = query.get_single_mut() else {
        return;
    };
    if input.move_axis == Vec2::ZERO {
        return;
    }

    // Long hitches (tab-out, breakpoint) must not teleport the player.
    let dt = time.delta_secs().min(MAX_FRAME_DELTA);

    let pixels_per_second = if sheet.energy.is_empty() {
        SLOWED_SPEED
    } else {
        NORMAL_SPEED
    };
    let step = pixels_per_second * speed.multiplier() * dt;

    let candidate = pos.0 + input.move_axis * step;
    let clamped = clamp_to_map(candidate, footprint.0);

    // Energy only burns on frames where the player actually went somewhere,
    // and an empty tank slows you down but never roots you.
    if clamped != pos.0 {
        pos.0 = clamped;
        if !sheet.energy.is_empty() {
            sheet
                .energy
                .drain(ENERGY_DRAIN_PER_SECOND * speed.multiplier() * dt);
        }
    }
}

/// Keep the whole footprint on the map.
pub fn clamp_to_map(pos: Vec2, footprint: Vec2) -> Vec2 {
    Vec2::new(
        pos.x.clamp(0.0, MAP_WIDTH - footprint.x),
        pos.y.clamp(0.0, MAP_HEIGHT - footprint.y),
    )
}

/// Once the portrait image has decoded, size the footprint from its aspect
/// ratio: height pinned to the display size, width following the image.
pub fn resolve_footprint(
    images: Res<Assets<Image>>,
    mut query: Query<(&mut Portrait, &mut Footprint, &mut Sprite), With<Player>>,
) {
    for (mut portrait, mut footprint, mut sprite) in query.iter_mut() {
        if portrait.resolved {
            continue;
        }
        let Some(image) = images.get(&portrait.handle) else {
            continue;
        };

        let size = image.size_f32();
        if size.y <= 0.0 {
            portrait.resolved = true;
            continue;
        }

        let aspect = size.x / size.y;
        footprint.0 = Vec2::new(PLAYER_DISPLAY_SIZE * aspect, PLAYER_DISPLAY_SIZE);
        sprite.custom_size = Some(footprint.0);
        portrait.resolved = true;

        info!(
            "[Player] Portrait decoded at {}x{}, footprint {:.0}x{:.0}",
            size.x, size.y, footprint.0.x, footprint.0.y
        );
    }
}

/// Mirror the logical map position into the render transform.
pub fn sync_player_transform(
    mut query: Query<(&MapPosition, &Footprint, &mut Transform), With<Player>>,
) {
    for (pos, footprint, mut transform) in query.iter_mut() {
        transform.translation = map_to_world(pos.0, footprint.0, 10.0);
    }
}

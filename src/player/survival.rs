use bevy::prelude::*;

use crate::shared::*;

/// Fractional-second carry for the two decay cadences. The passive timer
/// runs whenever the town clock runs; the critical timer only counts while
/// the player is starving or parched and snaps back to zero the moment
/// neither gauge is empty.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct SurvivalTimers {
    pub passive: f32,
    pub critical: f32,
}

/// One whole second of passive decay: hunger and thirst each lose their
/// per-second rate, clamped at zero. Once both gauges sit at zero there is
/// nothing left to drain and the sheet is not touched.
pub fn decay_tick(sheet: &mut PlayerSheet) {
    if sheet.hunger.is_empty() && sheet.thirst.is_empty() {
        return;
    }
    sheet.hunger.drain(HUNGER_DECAY_PER_SECOND);
    sheet.thirst.drain(THIRST_DECAY_PER_SECOND);
}

/// One whole second of critical decay while a survival gauge sits at zero.
pub fn critical_tick(sheet: &mut PlayerSheet) {
    sheet.health.drain(CRITICAL_HEALTH_DECAY_PER_SECOND);
}

pub fn is_starving(sheet: &PlayerSheet) -> bool {
    sheet.hunger.is_empty() || sheet.thirst.is_empty()
}

/// Frame driver: accumulates scaled wall-clock time and fires whole-second
/// ticks. Speeding the game up shortens the real seconds between ticks but
/// never changes the amount a tick drains.
pub fn tick_survival(
    time: Res<Time>,
    speed: Res<GameSpeed>,
    mut timers: ResMut<SurvivalTimers>,
    mut sheet: ResMut<PlayerSheet>,
) {
    let dt = time.delta_secs().min(MAX_FRAME_DELTA);
    let scaled = dt * speed.multiplier();

    timers.passive += scaled;
    while timers.passive >= 1.0 {
        timers.passive -= 1.0;
        decay_tick(&mut sheet);
    }

    if is_starving(&sheet) {
        timers.critical += scaled;
        while timers.critical >= 1.0 {
            timers.critical -= 1.0;
            critical_tick(&mut sheet);
        }
    } else {
        // Eating or drinking before the next critical tick forgives the
        // partial second already counted.
        timers.critical = 0.0;
    }
}

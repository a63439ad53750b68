//! Clock domain — session time for Brawlvale.
//!
//! Responsible for:
//! - Advancing game time (one game-minute per real second, scaled by GameSpeed)
//! - Minute → hour → day rollovers
//! - Pausing / unpausing time based on GameState
//! - Applying the speed selection (1x / 2x / 3x)

use bevy::prelude::*;

use crate::input::PlayerInput;
use crate::shared::*;

pub struct ClockPlugin;

impl Plugin for ClockPlugin {
    fn build(&self, app: &mut App) {
        app
            // Pause time whenever we leave Playing state
            .add_systems(OnEnter(GameState::Playing), resume_time)
            .add_systems(OnExit(GameState::Playing), pause_time)
            // Core time tick — only runs while Playing and NOT paused
            .add_systems(
                Update,
                tick_time
                    .run_if(in_state(GameState::Playing))
                    .run_if(time_not_paused),
            )
            .add_systems(
                Update,
                select_speed.run_if(in_state(GameState::Playing)),
            );
    }
}

// ─── Run Conditions ───────────────────────────────────────────────────────────

fn time_not_paused(clock: Res<GameClock>) -> bool {
    !clock.time_paused
}

// ─── State transition hooks ───────────────────────────────────────────────────

fn resume_time(mut clock: ResMut<GameClock>) {
    clock.time_paused = false;
    info!("[Clock] Time resumed — {}", clock.label());
}

fn pause_time(mut clock: ResMut<GameClock>) {
    clock.time_paused = true;
    info!("[Clock] Time paused");
}

// ─── Main time-tick system ────────────────────────────────────────────────────

/// Accumulates real delta-seconds; each whole second advances the clock
/// by `speed.multiplier()` game-minutes. At 1x a game-day passes in 24
/// real minutes.
fn tick_time(time: Res<Time>, speed: Res<GameSpeed>, mut clock: ResMut<GameClock>) {
    clock.elapsed_real_seconds += time.delta_secs();

    let minutes_per_tick = speed.multiplier() as u32;
    while clock.elapsed_real_seconds >= 1.0 {
        clock.elapsed_real_seconds -= 1.0;
        clock.advance_minutes(minutes_per_tick);
    }
}

/// Applies the 1/2/3 speed selection from the input snapshot.
fn select_speed(input: Res<PlayerInput>, mut speed: ResMut<GameSpeed>) {
    if let Some(selected) = input.speed_select {
        if *speed != selected {
            *speed = selected;
            info!("[Clock] Speed set to {}", selected.label());
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use crate::shared::*;

    #[test]
    fn test_minute_rollover_carries_into_hour() {
        let mut clock = GameClock::default();
        clock.minute = 59;
        clock.advance_minutes(1);
        assert_eq!(clock.minute, 0);
        assert_eq!(clock.hour, 9);
        assert_eq!(clock.day, 1);
    }

    #[test]
    fn test_hour_rollover_increments_day() {
        let mut clock = GameClock::default();
        clock.hour = 23;
        clock.minute = 59;
        clock.advance_minutes(1);
        assert_eq!(clock.minute, 0);
        assert_eq!(clock.hour, 0);
        assert_eq!(clock.day, 2);
    }

    #[test]
    fn test_rest_advance_wraps_day() {
        let mut clock = GameClock::default();
        clock.hour = 20;
        clock.minute = 17;
        clock.advance_hours(REST_HOURS);
        assert_eq!(clock.hour, 4);
        assert_eq!(clock.minute, 17, "resting leaves minutes untouched");
        assert_eq!(clock.day, 2);
    }

    #[test]
    fn test_rest_advance_without_wrap() {
        let mut clock = GameClock::default();
        clock.hour = 9;
        clock.advance_hours(REST_HOURS);
        assert_eq!(clock.hour, 17);
        assert_eq!(clock.day, 1);
    }

    #[test]
    fn test_multi_minute_tick_crosses_boundaries() {
        let mut clock = GameClock::default();
        clock.hour = 23;
        clock.minute = 58;
        // Triple speed tick right across midnight
        clock.advance_minutes(3);
        assert_eq!(clock.minute, 1);
        assert_eq!(clock.hour, 0);
        assert_eq!(clock.day, 2);
    }

    #[test]
    fn test_label_format() {
        let mut clock = GameClock::default();
        clock.day = 3;
        clock.hour = 8;
        clock.minute = 5;
        assert_eq!(clock.label(), "Day 3, 08:05");
    }

    #[test]
    fn test_speed_multipliers() {
        assert_eq!(GameSpeed::Normal.multiplier(), 1.0);
        assert_eq!(GameSpeed::Double.multiplier(), 2.0);
        assert_eq!(GameSpeed::Triple.multiplier(), 3.0);
    }
}

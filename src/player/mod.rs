pub mod movement;
pub mod survival;

use bevy::prelude::*;

use crate::shared::*;

pub use survival::{critical_tick, decay_tick, is_starving, tick_survival, SurvivalTimers};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        // -- Local resources --
        app.init_resource::<SurvivalTimers>();

        // -- Spawn player when we enter Playing --
        app.add_systems(OnEnter(GameState::Playing), spawn_player);

        // -- Systems that run every frame while Playing --
        app.add_systems(
            Update,
            (
                movement::player_movement,
                movement::resolve_footprint,
                movement::sync_player_transform.after(movement::player_movement),
                survival::tick_survival,
                check_game_over.after(survival::tick_survival),
            )
                .run_if(in_state(GameState::Playing)),
        );

        // -- Battle return handling runs regardless of state so we never miss it --
        app.add_systems(Update, handle_battle_return);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Components (player-domain only)
// ═══════════════════════════════════════════════════════════════════════════

/// Portrait image handle plus whether the footprint has been derived from
/// its aspect ratio yet.
#[derive(Component, Debug, Clone)]
pub struct Portrait {
    pub handle: Handle<Image>,
    pub resolved: bool,
}

// ═══════════════════════════════════════════════════════════════════════════
// Spawn
// ═══════════════════════════════════════════════════════════════════════════

/// Spawn the roaming player entity. Runs on `OnEnter(GameState::Playing)`;
/// guarded so coming back from a modal or the arena does not double-spawn.
fn spawn_player(
    mut commands: Commands,
    sheet: Res<PlayerSheet>,
    asset_server: Res<AssetServer>,
    existing: Query<Entity, With<Player>>,
) {
    if !existing.is_empty() {
        return;
    }

    let handle: Handle<Image> = asset_server.load(sheet.portrait.clone());

    commands.spawn((
        Player,
        MapPosition(SPAWN_POINT),
        Footprint::default(),
        Portrait {
            handle: handle.clone(),
            resolved: false,
        },
        Sprite {
            image: handle,
            custom_size: Some(Vec2::splat(PLAYER_DISPLAY_SIZE)),
            ..default()
        },
        // Z = 10 so the player draws above the ground and stations.
        Transform::from_translation(map_to_world(
            SPAWN_POINT,
            Vec2::splat(PLAYER_DISPLAY_SIZE),
            10.0,
        )),
        Visibility::default(),
    ));

    info!(
        "[Player] {} \"{}\" enters the square with {}g",
        sheet.name, sheet.nickname, sheet.money
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// Battle return & game over
// ═══════════════════════════════════════════════════════════════════════════

/// Consumes the arena's typed return message: the sheet is re-hydrated
/// verbatim and the player walks back in at the spawn point.
pub fn handle_battle_return(
    mut events: EventReader<BattleResolvedEvent>,
    mut sheet: ResMut<PlayerSheet>,
    mut stats: ResMut<SessionStats>,
    mut money_writer: EventWriter<MoneyChangedEvent>,
    mut query: Query<&mut MapPosition, With<Player>>,
) {
    for event in events.read() {
        let old_money = sheet.money;
        *sheet = event.sheet.clone();

        if let Ok(mut pos) = query.get_single_mut() {
            pos.0 = SPAWN_POINT;
        }

        match event.outcome {
            BattleOutcome::Win => {
                stats.battles_won += 1;
                let gained = sheet.money.saturating_sub(old_money);
                stats.money_earned += gained as u64;
                money_writer.send(MoneyChangedEvent {
                    amount: gained as i32,
                    reason: String::from("arena purse"),
                    balance: sheet.money,
                });
            }
            BattleOutcome::LosePlayerDefeated => {
                stats.battles_lost += 1;
            }
            BattleOutcome::ReturnedWithoutBattle => {}
        }

        info!(
            "[Player] Back from the arena ({:?}) — health {:.0}/{:.0}, {}g",
            event.outcome, sheet.health.current, sheet.health.max, sheet.money
        );
    }
}

/// Terminal check: once health hits zero in free roam the session is over.
pub fn check_game_over(
    mut commands: Commands,
    sheet: Res<PlayerSheet>,
    clock: Res<GameClock>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !sheet.health.is_empty() {
        return;
    }

    let cause = if is_starving(&sheet) {
        String::from("You collapsed from neglect.")
    } else {
        String::from("Your wounds caught up with you.")
    };

    info!("[Player] Game over on {} — {}", clock.label(), cause);

    commands.insert_resource(GameOverReport {
        cause,
        final_time: clock.label(),
    });
    next_state.set(GameState::GameOver);
}

// ═══════════════════════════════════════════════════════════════════════════
// Battle gate validation
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleGateError {
    MissingField(&'static str),
}

impl std::fmt::Display for BattleGateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BattleGateError::MissingField(name) => {
                write!(f, "Fighter data incomplete: {} is missing.", name)
            }
        }
    }
}

/// A sheet may enter the arena only when every identity string is
/// non-empty and every gauge holds finite numbers. The first offending
/// field is reported by name; an empty inventory is fine.
pub fn validate_for_battle(sheet: &PlayerSheet) -> Result<(), BattleGateError> {
    if sheet.nickname.trim().is_empty() {
        return Err(BattleGateError::MissingField("nickname"));
    }
    if sheet.name.is_empty() {
        return Err(BattleGateError::MissingField("name"));
    }
    if sheet.portrait.is_empty() {
        return Err(BattleGateError::MissingField("portrait"));
    }
    for (kind, vital) in [
        (VitalKind::Health, &sheet.health),
        (VitalKind::Hunger, &sheet.hunger),
        (VitalKind::Thirst, &sheet.thirst),
        (VitalKind::Energy, &sheet.energy),
    ] {
        if !vital.current.is_finite() || !vital.max.is_finite() || vital.max <= 0.0 {
            return Err(BattleGateError::MissingField(match kind {
                VitalKind::Health => "health",
                VitalKind::Hunger => "hunger",
                VitalKind::Thirst => "thirst",
                VitalKind::Energy => "energy",
            }));
        }
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn battle_ready_sheet() -> PlayerSheet {
        PlayerSheet {
            nickname: String::from("Knuckles"),
            name: String::from("Garrod"),
            portrait: String::from("fighters/garrod.png"),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_accepts_complete_sheet() {
        assert_eq!(validate_for_battle(&battle_ready_sheet()), Ok(()));
    }

    #[test]
    fn test_validate_accepts_empty_inventory() {
        let sheet = battle_ready_sheet();
        assert!(sheet.inventory.is_empty());
        assert_eq!(validate_for_battle(&sheet), Ok(()));
    }

    #[test]
    fn test_validate_names_blank_nickname() {
        let mut sheet = battle_ready_sheet();
        sheet.nickname = String::from("   ");
        assert_eq!(
            validate_for_battle(&sheet),
            Err(BattleGateError::MissingField("nickname"))
        );
    }

    #[test]
    fn test_validate_names_missing_portrait() {
        let mut sheet = battle_ready_sheet();
        sheet.portrait.clear();
        assert_eq!(
            validate_for_battle(&sheet),
            Err(BattleGateError::MissingField("portrait"))
        );
    }

    #[test]
    fn test_validate_rejects_non_finite_vital() {
        let mut sheet = battle_ready_sheet();
        sheet.thirst.current = f32::NAN;
        assert_eq!(
            validate_for_battle(&sheet),
            Err(BattleGateError::MissingField("thirst"))
        );
    }

    #[test]
    fn test_validate_error_message_names_the_field() {
        let err = BattleGateError::MissingField("energy");
        assert!(err.to_string().contains("energy"));
    }
}

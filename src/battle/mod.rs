//! Arena domain for Brawlvale.
//!
//! Responsible for:
//! - Receiving the frozen sheet copy handed over at the arena gate
//! - Letting the player pick an opponent or walk right back out
//! - Running rock-paper-scissors rounds until somebody drops
//! - Handing the finished sheet back to the town with a typed outcome
//!
//! The arena never touches the live `PlayerSheet` resource. It works on
//! the handoff copy and the town re-hydrates from `BattleResolvedEvent`.

use bevy::prelude::*;
use rand::Rng;

use crate::input::PlayerInput;
use crate::shared::*;

pub mod duel;

use duel::{judge, BattleLog, RoundVerdict, Throw};

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct BattlePlugin;

impl Plugin for BattlePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Battle), begin_battle)
            .add_systems(Update, drive_battle.run_if(in_state(GameState::Battle)));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// RESOURCES
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    ChoosingEnemy,
    Fighting,
    Finished,
}

/// Everything one arena visit needs: the working sheet copy, the chosen
/// opponent, the round log and where the visit stands. Removed when the
/// player walks back into the square.
#[derive(Resource, Debug, Clone)]
pub struct BattleSession {
    pub phase: BattlePhase,
    pub sheet: PlayerSheet,
    pub player_damage: u32,
    pub enemy_index: usize,
    pub enemy_health: f32,
    pub log: BattleLog,
    /// Highlighted row: an opponent while choosing, a throw while fighting.
    pub selected: usize,
    pub last_player_throw: Option<Throw>,
    pub last_enemy_throw: Option<Throw>,
    pub outcome: Option<BattleOutcome>,
    pub reward: u32,
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

/// Unpack the gate handoff into a fresh session.
fn begin_battle(mut commands: Commands, handoff: Res<BattleHandoff>) {
    let mut log = BattleLog::default();
    log.push("Pick your opponent.");

    commands.insert_resource(BattleSession {
        phase: BattlePhase::ChoosingEnemy,
        sheet: handoff.sheet.clone(),
        player_damage: handoff.damage,
        enemy_index: 0,
        enemy_health: 0.0,
        log,
        selected: 0,
        last_player_throw: None,
        last_enemy_throw: None,
        outcome: None,
        reward: 0,
    });

    info!(
        "[Battle] {} enters the arena hitting for {}",
        handoff.sheet.nickname, handoff.damage
    );
}

/// One keyboard-driven state machine for the whole arena visit.
fn drive_battle(
    mut commands: Commands,
    input: Res<PlayerInput>,
    roster: Res<EnemyRoster>,
    handoff: Res<BattleHandoff>,
    session: Option<ResMut<BattleSession>>,
    mut resolved_writer: EventWriter<BattleResolvedEvent>,
    mut sfx_writer: EventWriter<PlaySfxEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Some(mut session) = session else {
        return;
    };

    match session.phase {
        BattlePhase::ChoosingEnemy => {
            if input.ui_cancel {
                // Cold feet: the untouched gate copy goes straight back.
                resolved_writer.send(BattleResolvedEvent {
                    sheet: handoff.sheet.clone(),
                    outcome: BattleOutcome::ReturnedWithoutBattle,
                });
                leave_arena(&mut commands, &mut next_state);
                info!("[Battle] Walked out without a fight");
                return;
            }

            let count = roster.enemies.len();
            if count == 0 {
                return;
            }
            if input.ui_down {
                session.selected = (session.selected + 1) % count;
            }
            if input.ui_up {
                session.selected = (session.selected + count - 1) % count;
            }

            if input.ui_confirm {
                let index = session.selected;
                let enemy = &roster.enemies[index];
                session.enemy_index = index;
                session.enemy_health = enemy.max_health;
                session.phase = BattlePhase::Fighting;
                session.selected = 0;
                let line = format!("{} squares up!", enemy.name);
                session.log.push(line);
                sfx_writer.send(PlaySfxEvent {
                    sfx_id: String::from("battle_start"),
                });
                info!(
                    "[Battle] Opponent chosen: {} ({} hp)",
                    enemy.name, enemy.max_health
                );
            }
        }

        BattlePhase::Fighting => {
            let throws = Throw::ALL.len();
            if input.ui_right || input.ui_down {
                session.selected = (session.selected + 1) % throws;
            }
            if input.ui_left || input.ui_up {
                session.selected = (session.selected + throws - 1) % throws;
            }

            if input.ui_confirm {
                let player_throw = Throw::ALL[session.selected];
                let mut rng = rand::thread_rng();
                let enemy_throw = Throw::ALL[rng.gen_range(0..throws)];
                let enemy = &roster.enemies[session.enemy_index];
                let damage_roll = rng.gen_range(enemy.damage_min..=enemy.damage_max);

                let ended = apply_round(&mut session, enemy, player_throw, enemy_throw, damage_roll);

                match ended {
                    Some(BattleOutcome::Win) => {
                        let reward = rng.gen_range(enemy.reward_min..=enemy.reward_max);
                        session.reward = reward;
                        session.sheet.money = session.sheet.money.saturating_add(reward);
                        let line = format!("{} goes down! You pocket ${}.", enemy.name, reward);
                        session.log.push(line);
                        sfx_writer.send(PlaySfxEvent {
                            sfx_id: String::from("battle_win"),
                        });
                        info!("[Battle] Won against {} for ${}", enemy.name, reward);
                    }
                    Some(BattleOutcome::LosePlayerDefeated) => {
                        session.log.push("Everything goes dark.");
                        sfx_writer.send(PlaySfxEvent {
                            sfx_id: String::from("battle_lose"),
                        });
                        info!("[Battle] Defeated by {}", enemy.name);
                    }
                    Some(BattleOutcome::ReturnedWithoutBattle) | None => {
                        let sfx = match judge(player_throw, enemy_throw) {
                            RoundVerdict::PlayerHits => Some("battle_hit"),
                            RoundVerdict::EnemyHits => Some("battle_hurt"),
                            RoundVerdict::Draw => None,
                        };
                        if let Some(sfx_id) = sfx {
                            sfx_writer.send(PlaySfxEvent {
                                sfx_id: String::from(sfx_id),
                            });
                        }
                    }
                }
            }
        }

        BattlePhase::Finished => {
            if input.ui_confirm || input.dismiss {
                resolved_writer.send(BattleResolvedEvent {
                    sheet: session.sheet.clone(),
                    outcome: session
                        .outcome
                        .unwrap_or(BattleOutcome::ReturnedWithoutBattle),
                });
                leave_arena(&mut commands, &mut next_state);
            }
        }
    }
}

fn leave_arena(commands: &mut Commands, next_state: &mut NextState<GameState>) {
    commands.remove_resource::<BattleSession>();
    commands.remove_resource::<BattleHandoff>();
    next_state.set(GameState::Playing);
}

// ═══════════════════════════════════════════════════════════════════════
// ROUND RESOLUTION
// ═══════════════════════════════════════════════════════════════════════

/// Apply one fully-rolled round to the session: damage, log lines, and
/// the end-of-fight check. Returns the outcome when the fight just ended.
/// Takes the throws and the enemy damage roll as plain values so rounds
/// stay deterministic under test.
pub fn apply_round(
    session: &mut BattleSession,
    enemy: &EnemyDef,
    player_throw: Throw,
    enemy_throw: Throw,
    enemy_damage_roll: u32,
) -> Option<BattleOutcome> {
    session.last_player_throw = Some(player_throw);
    session.last_enemy_throw = Some(enemy_throw);

    session.log.push(format!(
        "You throw {}, {} throws {}.",
        player_throw.label(),
        enemy.name,
        enemy_throw.label()
    ));

    match judge(player_throw, enemy_throw) {
        RoundVerdict::PlayerHits => {
            session.enemy_health = (session.enemy_health - session.player_damage as f32).max(0.0);
            session
                .log
                .push(format!("You land {} damage!", session.player_damage));
        }
        RoundVerdict::EnemyHits => {
            session.sheet.health.drain(enemy_damage_roll as f32);
            session.log.push(format!(
                "{} hits you for {}!",
                enemy.name, enemy_damage_roll
            ));
        }
        RoundVerdict::Draw => {
            session.log.push("Stalemate. Nobody lands a hit.");
        }
    }

    if session.enemy_health <= 0.0 {
        session.phase = BattlePhase::Finished;
        session.outcome = Some(BattleOutcome::Win);
        return Some(BattleOutcome::Win);
    }
    if session.sheet.health.is_empty() {
        session.phase = BattlePhase::Finished;
        session.outcome = Some(BattleOutcome::LosePlayerDefeated);
        return Some(BattleOutcome::LosePlayerDefeated);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn fighter() -> PlayerSheet {
        PlayerSheet {
            nickname: String::from("Knuckles"),
            name: String::from("Garrod"),
            portrait: String::from("fighters/garrod.png"),
            ..Default::default()
        }
    }

    fn hound() -> EnemyDef {
        EnemyDef {
            id: String::from("scrap_hound"),
            name: String::from("Scrap Hound"),
            max_health: 50.0,
            damage_min: 5,
            damage_max: 10,
            reward_min: 500,
            reward_max: 1000,
            difficulty: Difficulty::Easy,
            sprite: String::from("enemies/scrap_hound.png"),
        }
    }

    fn session_against(enemy: &EnemyDef) -> BattleSession {
        BattleSession {
            phase: BattlePhase::Fighting,
            sheet: fighter(),
            player_damage: 15,
            enemy_index: 0,
            enemy_health: enemy.max_health,
            log: BattleLog::default(),
            selected: 0,
            last_player_throw: None,
            last_enemy_throw: None,
            outcome: None,
            reward: 0,
        }
    }

    #[test]
    fn test_winning_round_damages_only_the_enemy() {
        let enemy = hound();
        let mut session = session_against(&enemy);

        let ended = apply_round(&mut session, &enemy, Throw::Rock, Throw::Scissors, 7);

        assert_eq!(ended, None);
        assert_eq!(session.enemy_health, 35.0);
        assert_eq!(session.sheet.health.current, 100.0);
    }

    #[test]
    fn test_losing_round_damages_only_the_player() {
        let enemy = hound();
        let mut session = session_against(&enemy);

        apply_round(&mut session, &enemy, Throw::Rock, Throw::Paper, 9);

        assert_eq!(session.enemy_health, 50.0);
        assert_eq!(session.sheet.health.current, 91.0);
    }

    #[test]
    fn test_draw_hurts_nobody() {
        let enemy = hound();
        let mut session = session_against(&enemy);

        apply_round(&mut session, &enemy, Throw::Paper, Throw::Paper, 10);

        assert_eq!(session.enemy_health, 50.0);
        assert_eq!(session.sheet.health.current, 100.0);
        assert!(session.log.lines[0].contains("Stalemate"));
    }

    #[test]
    fn test_fight_ends_when_enemy_drops() {
        let enemy = hound();
        let mut session = session_against(&enemy);
        session.enemy_health = 15.0;

        let ended = apply_round(&mut session, &enemy, Throw::Scissors, Throw::Paper, 5);

        assert_eq!(ended, Some(BattleOutcome::Win));
        assert_eq!(session.phase, BattlePhase::Finished);
        assert_eq!(session.enemy_health, 0.0, "health floors at zero");
    }

    #[test]
    fn test_fight_ends_when_player_drops() {
        let enemy = hound();
        let mut session = session_against(&enemy);
        session.sheet.health.current = 6.0;

        let ended = apply_round(&mut session, &enemy, Throw::Scissors, Throw::Rock, 8);

        assert_eq!(ended, Some(BattleOutcome::LosePlayerDefeated));
        assert_eq!(session.sheet.health.current, 0.0);
        assert_eq!(session.phase, BattlePhase::Finished);
    }

    #[test]
    fn test_round_records_both_throws() {
        let enemy = hound();
        let mut session = session_against(&enemy);

        apply_round(&mut session, &enemy, Throw::Rock, Throw::Scissors, 5);

        assert_eq!(session.last_player_throw, Some(Throw::Rock));
        assert_eq!(session.last_enemy_throw, Some(Throw::Scissors));
    }
}

use bevy::prelude::*;

use crate::battle::{BattlePhase, BattleSession};
use crate::battle::duel::Throw;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct BattleScreenRoot;

#[derive(Component)]
pub struct BattleHeaderText;

#[derive(Component)]
pub struct BattleBodyText;

#[derive(Component)]
pub struct BattleLogText;

#[derive(Component)]
pub struct BattleHintText;

// ═══════════════════════════════════════════════════════════════════════
// SPAWN / DESPAWN
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_battle_screen(mut commands: Commands) {
    commands
        .spawn((
            BattleScreenRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(14.0),
                ..default()
            },
            BackgroundColor(Color::srgb(0.08, 0.06, 0.09)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("THE ARENA"),
                TextFont {
                    font_size: 34.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.3, 0.3)),
            ));
            parent.spawn((
                BattleHeaderText,
                Text::new(""),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.93, 0.85)),
            ));
            parent.spawn((
                BattleBodyText,
                Text::new(""),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
            parent
                .spawn((
                    Node {
                        width: Val::Px(460.0),
                        min_height: Val::Px(110.0),
                        padding: UiRect::all(Val::Px(10.0)),
                        border: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
                    BorderColor(Color::srgb(0.4, 0.35, 0.3)),
                ))
                .with_children(|log_panel| {
                    log_panel.spawn((
                        BattleLogText,
                        Text::new(""),
                        TextFont {
                            font_size: 13.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.8, 0.8, 0.75)),
                    ));
                });
            parent.spawn((
                BattleHintText,
                Text::new(""),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(Color::srgb(0.55, 0.6, 0.55)),
            ));
        });
}

pub fn despawn_battle_screen(mut commands: Commands, query: Query<Entity, With<BattleScreenRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATE
// ═══════════════════════════════════════════════════════════════════════

/// Mirrors the battle session into the four text blocks. The session is
/// the single source of truth; this never mutates it.
pub fn update_battle_screen(
    session: Option<Res<BattleSession>>,
    roster: Res<EnemyRoster>,
    mut header_query: Query<&mut Text, With<BattleHeaderText>>,
    mut body_query: Query<&mut Text, (With<BattleBodyText>, Without<BattleHeaderText>)>,
    mut log_query: Query<
        &mut Text,
        (
            With<BattleLogText>,
            Without<BattleHeaderText>,
            Without<BattleBodyText>,
        ),
    >,
    mut hint_query: Query<
        &mut Text,
        (
            With<BattleHintText>,
            Without<BattleHeaderText>,
            Without<BattleBodyText>,
            Without<BattleLogText>,
        ),
    >,
) {
    let Some(session) = session else {
        return;
    };

    let (header, body, hint) = match session.phase {
        BattlePhase::ChoosingEnemy => {
            let mut lines = String::new();
            for (index, enemy) in roster.enemies.iter().enumerate() {
                let cursor = if index == session.selected { "> " } else { "  " };
                lines.push_str(&format!(
                    "{}{} [{}] — {:.0} hp, hits {}-{}, pays ${}-${}\n",
                    cursor,
                    enemy.name,
                    enemy.difficulty.label(),
                    enemy.max_health,
                    enemy.damage_min,
                    enemy.damage_max,
                    enemy.reward_min,
                    enemy.reward_max,
                ));
            }
            (
                format!("{} looks over the roster.", session.sheet.nickname),
                lines,
                String::from("Up/Down to browse, Enter to fight, Esc to walk out"),
            )
        }

        BattlePhase::Fighting => {
            let enemy = &roster.enemies[session.enemy_index];
            let mut throws = String::new();
            for (index, throw) in Throw::ALL.iter().enumerate() {
                let cursor = if index == session.selected { "> " } else { "  " };
                throws.push_str(&format!("{}{}   ", cursor, throw.label()));
            }
            (
                format!(
                    "{}: {:.0}/{:.0} hp      {}: {:.0}/{:.0} hp",
                    session.sheet.nickname,
                    session.sheet.health.current,
                    session.sheet.health.max,
                    enemy.name,
                    session.enemy_health,
                    enemy.max_health,
                ),
                throws,
                String::from("Left/Right to pick a throw, Enter to commit"),
            )
        }

        BattlePhase::Finished => {
            let line = match session.outcome {
                Some(BattleOutcome::Win) => format!("Victory! ${} richer.", session.reward),
                Some(BattleOutcome::LosePlayerDefeated) => String::from("Knocked out cold."),
                _ => String::from("The fight is over."),
            };
            (
                line,
                String::new(),
                String::from("[Enter] Return to town"),
            )
        }
    };

    if let Ok(mut text) = header_query.get_single_mut() {
        text.0 = header;
    }
    if let Ok(mut text) = body_query.get_single_mut() {
        text.0 = body;
    }
    if let Ok(mut text) = log_query.get_single_mut() {
        text.0 = session.log.lines.join("\n");
    }
    if let Ok(mut text) = hint_query.get_single_mut() {
        text.0 = hint;
    }
}

use bevy::prelude::*;

use crate::input::PlayerInput;
use crate::shared::*;

#[derive(Component)]
pub struct GameOverRoot;

pub fn spawn_game_over(
    mut commands: Commands,
    report: Option<Res<GameOverReport>>,
    stats: Res<SessionStats>,
) {
    let (cause, final_time) = match report {
        Some(report) => (report.cause.clone(), report.final_time.clone()),
        None => (String::from("The run is over."), String::new()),
    };

    commands
        .spawn((
            GameOverRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(12.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.05, 0.02, 0.02, 0.96)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("GAME OVER"),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.25, 0.25)),
            ));
            parent.spawn((
                Text::new(cause),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.85, 0.8)),
            ));
            if !final_time.is_empty() {
                parent.spawn((
                    Text::new(final_time),
                    TextFont {
                        font_size: 14.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.65, 0.6, 0.6)),
                ));
            }
            parent.spawn((
                Text::new(format!(
                    "Fights won {}   lost {}\nSpent ${}   earned ${}   {} purchases",
                    stats.battles_won,
                    stats.battles_lost,
                    stats.money_spent,
                    stats.money_earned,
                    stats.purchases,
                )),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.7, 0.7, 0.7)),
            ));
            parent.spawn((
                Text::new("[Enter] Back to the fighter roster"),
                TextFont {
                    font_size: 13.0,
                    ..default()
                },
                TextColor(Color::srgb(0.55, 0.6, 0.55)),
            ));
        });
}

pub fn despawn_game_over(mut commands: Commands, query: Query<Entity, With<GameOverRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

/// Only way out is a fresh start; the saved wallet carries over.
pub fn game_over_input(input: Res<PlayerInput>, mut next_state: ResMut<NextState<GameState>>) {
    if input.ui_confirm {
        next_state.set(GameState::CharacterSelect);
    }
}

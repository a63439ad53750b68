use bevy::prelude::*;

use crate::input::PlayerInput;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// COMPONENTS & RESOURCES
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct NoticeBoxRoot;

/// The line the open notice shows. Inserted by the listener, removed when
/// the box is dismissed.
#[derive(Resource, Debug, Clone)]
pub struct ActiveNotice(pub String);

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

/// Turns a NoticeEvent from the town into the modal state flip. Only
/// honored while roaming, so a notice can never bury another modal.
pub fn listen_for_notices(
    mut commands: Commands,
    mut events: EventReader<NoticeEvent>,
    current_state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for ev in events.read() {
        if *current_state.get() != GameState::Playing {
            continue;
        }
        commands.insert_resource(ActiveNotice(ev.text.clone()));
        next_state.set(GameState::Notice);
    }
}

pub fn spawn_notice_box(mut commands: Commands, notice: Option<Res<ActiveNotice>>) {
    let text = notice.map(|n| n.0.clone()).unwrap_or_default();

    commands
        .spawn((
            NoticeBoxRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.4)),
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        max_width: Val::Px(440.0),
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        padding: UiRect::all(Val::Px(18.0)),
                        row_gap: Val::Px(10.0),
                        border: UiRect::all(Val::Px(3.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.12, 0.1, 0.08, 0.95)),
                    BorderColor(Color::srgb(0.5, 0.4, 0.25)),
                ))
                .with_children(|panel| {
                    panel.spawn((
                        Text::new(text),
                        TextFont {
                            font_size: 17.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.95, 0.93, 0.85)),
                    ));
                    panel.spawn((
                        Text::new("[E / Esc] Close"),
                        TextFont {
                            font_size: 12.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.55, 0.6, 0.55)),
                    ));
                });
        });
}

pub fn despawn_notice_box(mut commands: Commands, query: Query<Entity, With<NoticeBoxRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
    commands.remove_resource::<ActiveNotice>();
}

pub fn dismiss_notice(input: Res<PlayerInput>, mut next_state: ResMut<NextState<GameState>>) {
    if input.dismiss {
        next_state.set(GameState::Playing);
    }
}

use bevy::prelude::*;

use crate::save::SavedWallet;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// STATE & MARKERS
// ═══════════════════════════════════════════════════════════════════════

/// Working state of the select screen: carousel cursor, the nickname being
/// typed, and the current hint line. Lives only while the screen is up.
#[derive(Resource, Debug, Default)]
pub struct SelectScreenState {
    pub cursor: usize,
    pub nickname: String,
    pub hint: String,
}

const NICKNAME_MAX_CHARS: usize = 16;

#[derive(Component)]
pub struct SelectScreenRoot;

/// Which line of the panel a text entity renders.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectLabel {
    FighterName,
    Tagline,
    Stats,
    Nickname,
    Hint,
}

// ═══════════════════════════════════════════════════════════════════════
// SPAWN / DESPAWN
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_select_screen(mut commands: Commands) {
    commands.insert_resource(SelectScreenState::default());

    commands
        .spawn((
            SelectScreenRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgb(0.08, 0.07, 0.1)),
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        width: Val::Px(460.0),
                        flex_direction: FlexDirection::Column,
                        padding: UiRect::all(Val::Px(20.0)),
                        row_gap: Val::Px(10.0),
                        border: UiRect::all(Val::Px(3.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.12, 0.1, 0.08, 0.95)),
                    BorderColor(Color::srgb(0.5, 0.4, 0.25)),
                ))
                .with_children(|panel| {
                    panel.spawn((
                        Text::new("BRAWLVALE"),
                        TextFont {
                            font_size: 34.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.95, 0.85, 0.45)),
                    ));
                    panel.spawn((
                        Text::new("Choose your fighter"),
                        TextFont {
                            font_size: 14.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.7, 0.7, 0.65)),
                    ));

                    for (label, size, color) in [
                        (SelectLabel::FighterName, 24.0, Color::WHITE),
                        (SelectLabel::Tagline, 13.0, Color::srgb(0.6, 0.6, 0.6)),
                        (SelectLabel::Stats, 14.0, Color::srgb(0.8, 0.8, 0.75)),
                        (SelectLabel::Nickname, 16.0, Color::srgb(0.95, 0.93, 0.85)),
                        (SelectLabel::Hint, 12.0, Color::srgb(0.75, 0.5, 0.4)),
                    ] {
                        panel.spawn((
                            label,
                            Text::new(""),
                            TextFont {
                                font_size: size,
                                ..default()
                            },
                            TextColor(color),
                        ));
                    }

                    panel.spawn((
                        Text::new("Left/Right to browse, type a nickname, Enter to start"),
                        TextFont {
                            font_size: 12.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.55, 0.6, 0.55)),
                    ));
                });
        });
}

pub fn despawn_select_screen(
    mut commands: Commands,
    query: Query<Entity, With<SelectScreenRoot>>,
) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
    commands.remove_resource::<SelectScreenState>();
}

// ═══════════════════════════════════════════════════════════════════════
// INPUT
// ═══════════════════════════════════════════════════════════════════════

/// Reads the keyboard directly instead of the shared input snapshot: the
/// nickname field needs the letter keys, which the snapshot folds into
/// movement and menu intents. Arrows drive the carousel so typing never
/// collides with browsing.
pub fn select_screen_input(
    keys: Res<ButtonInput<KeyCode>>,
    roster: Res<FighterRoster>,
    saved: Res<SavedWallet>,
    mut screen: ResMut<SelectScreenState>,
    mut commands: Commands,
    mut next_state: ResMut<NextState<GameState>>,
    mut sfx_writer: EventWriter<PlaySfxEvent>,
) {
    let count = roster.templates.len();
    if count == 0 {
        return;
    }

    if keys.just_pressed(KeyCode::ArrowRight) {
        screen.cursor = (screen.cursor + 1) % count;
        sfx_writer.send(PlaySfxEvent {
            sfx_id: String::from("menu_move"),
        });
    }
    if keys.just_pressed(KeyCode::ArrowLeft) {
        screen.cursor = (screen.cursor + count - 1) % count;
        sfx_writer.send(PlaySfxEvent {
            sfx_id: String::from("menu_move"),
        });
    }

    if keys.just_pressed(KeyCode::Backspace) {
        screen.nickname.pop();
        screen.hint.clear();
    }

    let shifted = keys.pressed(KeyCode::ShiftLeft) || keys.pressed(KeyCode::ShiftRight);
    for key in keys.get_just_pressed() {
        if let Some(c) = key_to_char(*key, shifted) {
            if screen.nickname.chars().count() < NICKNAME_MAX_CHARS {
                screen.nickname.push(c);
                screen.hint.clear();
            }
        }
    }

    if keys.just_pressed(KeyCode::Enter) {
        if screen.nickname.trim().is_empty() {
            screen.hint = String::from("Name your fighter first.");
            sfx_writer.send(PlaySfxEvent {
                sfx_id: String::from("ui_deny"),
            });
            return;
        }

        let template = &roster.templates[screen.cursor];
        let mut sheet = PlayerSheet::from_template(template, &screen.nickname);
        // A saved wallet outranks the template's starting money.
        if let Some(balance) = saved.0 {
            sheet.money = balance;
        }

        info!(
            "[UI] {} \"{}\" steps up with ${}",
            sheet.name, sheet.nickname, sheet.money
        );
        commands.insert_resource(sheet);
        sfx_writer.send(PlaySfxEvent {
            sfx_id: String::from("menu_select"),
        });
        next_state.set(GameState::Playing);
    }
}

/// Letters and space only; everything else is a control key here.
fn key_to_char(key: KeyCode, shifted: bool) -> Option<char> {
    let lower = match key {
        KeyCode::KeyA => 'a',
        KeyCode::KeyB => 'b',
        KeyCode::KeyC => 'c',
        KeyCode::KeyD => 'd',
        KeyCode::KeyE => 'e',
        KeyCode::KeyF => 'f',
        KeyCode::KeyG => 'g',
        KeyCode::KeyH => 'h',
        KeyCode::KeyI => 'i',
        KeyCode::KeyJ => 'j',
        KeyCode::KeyK => 'k',
        KeyCode::KeyL => 'l',
        KeyCode::KeyM => 'm',
        KeyCode::KeyN => 'n',
        KeyCode::KeyO => 'o',
        KeyCode::KeyP => 'p',
        KeyCode::KeyQ => 'q',
        KeyCode::KeyR => 'r',
        KeyCode::KeyS => 's',
        KeyCode::KeyT => 't',
        KeyCode::KeyU => 'u',
        KeyCode::KeyV => 'v',
        KeyCode::KeyW => 'w',
        KeyCode::KeyX => 'x',
        KeyCode::KeyY => 'y',
        KeyCode::KeyZ => 'z',
        KeyCode::Space => return Some(' '),
        _ => return None,
    };
    Some(if shifted {
        lower.to_ascii_uppercase()
    } else {
        lower
    })
}

// ═══════════════════════════════════════════════════════════════════════
// DISPLAY
// ═══════════════════════════════════════════════════════════════════════

pub fn update_select_screen(
    roster: Res<FighterRoster>,
    saved: Res<SavedWallet>,
    screen: Res<SelectScreenState>,
    mut query: Query<(&SelectLabel, &mut Text)>,
) {
    let Some(template) = roster.templates.get(screen.cursor) else {
        return;
    };

    let money_line = match saved.0 {
        Some(balance) => format!("Carries over ${} from the last run", balance),
        None => format!("Starts with ${}", template.starting_money),
    };

    for (label, mut text) in &mut query {
        text.0 = match label {
            SelectLabel::FighterName => format!(
                "< {} >   ({}/{})",
                template.name,
                screen.cursor + 1,
                roster.templates.len()
            ),
            SelectLabel::Tagline => template.tagline.clone(),
            SelectLabel::Stats => format!(
                "Health {:.0}   Energy {:.0}\nHunger {:.0}   Thirst {:.0}\n{}",
                template.max_health,
                template.max_energy,
                template.max_hunger,
                template.max_thirst,
                money_line
            ),
            SelectLabel::Nickname => format!("Nickname: {}_", screen.nickname),
            SelectLabel::Hint => screen.hint.clone(),
        };
    }
}

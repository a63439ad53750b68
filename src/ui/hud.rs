use bevy::prelude::*;

use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct HudRoot;

#[derive(Component)]
pub struct VitalBarFill(pub VitalKind);

#[derive(Component)]
pub struct VitalBarLabel(pub VitalKind);

#[derive(Component)]
pub struct MoneyText;

#[derive(Component)]
pub struct ClockText;

#[derive(Component)]
pub struct InteractPrompt;

fn vital_color(kind: VitalKind) -> Color {
    match kind {
        VitalKind::Health => Color::srgb(0.8, 0.25, 0.25),
        VitalKind::Hunger => Color::srgb(0.85, 0.6, 0.2),
        VitalKind::Thirst => Color::srgb(0.25, 0.55, 0.85),
        VitalKind::Energy => Color::srgb(0.35, 0.75, 0.35),
    }
}

const HUD_VITALS: [VitalKind; 4] = [
    VitalKind::Health,
    VitalKind::Hunger,
    VitalKind::Thirst,
    VitalKind::Energy,
];

// ═══════════════════════════════════════════════════════════════════════
// SPAWN / DESPAWN
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            HudRoot,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(8.0),
                left: Val::Px(8.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                padding: UiRect::all(Val::Px(8.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.55)),
        ))
        .with_children(|panel| {
            for kind in HUD_VITALS {
                panel
                    .spawn(Node {
                        flex_direction: FlexDirection::Row,
                        align_items: AlignItems::Center,
                        column_gap: Val::Px(6.0),
                        ..default()
                    })
                    .with_children(|row| {
                        row.spawn((
                            VitalBarLabel(kind),
                            Text::new(kind.label()),
                            TextFont {
                                font_size: 12.0,
                                ..default()
                            },
                            TextColor(Color::srgb(0.9, 0.9, 0.9)),
                            Node {
                                width: Val::Px(110.0),
                                ..default()
                            },
                        ));
                        // Bar trough with the colored fill inside.
                        row.spawn((
                            Node {
                                width: Val::Px(150.0),
                                height: Val::Px(12.0),
                                border: UiRect::all(Val::Px(1.0)),
                                ..default()
                            },
                            BackgroundColor(Color::srgba(0.15, 0.15, 0.15, 0.9)),
                            BorderColor(Color::srgba(0.6, 0.6, 0.6, 0.6)),
                        ))
                        .with_children(|trough| {
                            trough.spawn((
                                VitalBarFill(kind),
                                Node {
                                    width: Val::Percent(100.0),
                                    height: Val::Percent(100.0),
                                    ..default()
                                },
                                BackgroundColor(vital_color(kind)),
                            ));
                        });
                    });
            }

            panel.spawn((
                MoneyText,
                Text::new("$0"),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.85, 0.45)),
            ));
            panel.spawn((
                ClockText,
                Text::new(""),
                TextFont {
                    font_size: 13.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.85)),
            ));
        });

    // Interaction prompt sits at the bottom center, hidden until a station
    // is in reach.
    commands.spawn((
        HudRoot,
        InteractPrompt,
        Text::new(""),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::srgb(0.95, 0.93, 0.85)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(24.0),
            left: Val::Percent(50.0),
            margin: UiRect {
                left: Val::Px(-150.0),
                ..default()
            },
            width: Val::Px(300.0),
            justify_content: JustifyContent::Center,
            ..default()
        },
        Visibility::Hidden,
    ));
}

pub fn despawn_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATE
// ═══════════════════════════════════════════════════════════════════════

pub fn update_vital_bars(
    sheet: Res<PlayerSheet>,
    mut fills: Query<(&VitalBarFill, &mut Node)>,
    mut labels: Query<(&VitalBarLabel, &mut Text)>,
) {
    for (fill, mut node) in &mut fills {
        node.width = Val::Percent(sheet.vital(fill.0).ratio() * 100.0);
    }
    for (label, mut text) in &mut labels {
        let vital = sheet.vital(label.0);
        text.0 = format!("{} {:.0}/{:.0}", label.0.label(), vital.current, vital.max);
    }
}

pub fn update_money_display(sheet: Res<PlayerSheet>, mut query: Query<&mut Text, With<MoneyText>>) {
    for mut text in &mut query {
        text.0 = format!("${}", sheet.money);
    }
}

pub fn update_clock_display(
    clock: Res<GameClock>,
    speed: Res<GameSpeed>,
    mut query: Query<&mut Text, With<ClockText>>,
) {
    for mut text in &mut query {
        text.0 = format!("{}   {}", clock.label(), speed.label());
    }
}

/// Shows "[E] Talk to …" while standing in a station's circle.
pub fn update_interact_prompt(
    nearby: Res<NearbyStation>,
    registry: Res<StationRegistry>,
    mut query: Query<(&mut Text, &mut Visibility), With<InteractPrompt>>,
) {
    let Ok((mut text, mut visibility)) = query.get_single_mut() else {
        return;
    };

    match nearby.0.and_then(|i| registry.stations.get(i)) {
        Some(def) => {
            text.0 = format!("[E] Talk to {}", def.name);
            *visibility = Visibility::Visible;
        }
        None => {
            *visibility = Visibility::Hidden;
        }
    }
}

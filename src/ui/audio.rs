use bevy::prelude::*;

use crate::shared::*;

/// Maps SFX ids (sent by other domains) to audio file paths. Unknown ids
/// and missing files are silently skipped.
fn sfx_path(sfx_id: &str) -> Option<&'static str> {
    match sfx_id {
        "menu_move" => Some("audio/sfx/menu_move.ogg"),
        "menu_select" => Some("audio/sfx/menu_select.ogg"),
        "ui_deny" => Some("audio/sfx/deny.ogg"),
        "shop_open" => Some("audio/sfx/bell.ogg"),
        "shop_buy" => Some("audio/sfx/coins.ogg"),
        "heal" => Some("audio/sfx/chime.ogg"),
        "rest" => Some("audio/sfx/yawn.ogg"),
        "battle_start" => Some("audio/sfx/gong.ogg"),
        "battle_hit" => Some("audio/sfx/punch.ogg"),
        "battle_hurt" => Some("audio/sfx/grunt.ogg"),
        "battle_win" => Some("audio/sfx/fanfare.ogg"),
        "battle_lose" => Some("audio/sfx/thud.ogg"),
        _ => None,
    }
}

/// Listen for PlaySfxEvent and spawn one-shot audio sources that
/// auto-despawn when finished.
pub fn handle_play_sfx(
    mut events: EventReader<PlaySfxEvent>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
) {
    for event in events.read() {
        if let Some(path) = sfx_path(&event.sfx_id) {
            commands.spawn((
                AudioPlayer::new(asset_server.load(path)),
                PlaybackSettings::DESPAWN,
            ));
        }
    }
}

mod audio;
mod battle_screen;
mod character_select;
mod game_over;
mod hud;
mod inventory_screen;
mod minimap;
mod notice;
mod shop_screen;
mod toast;

use bevy::prelude::*;

use crate::shared::*;

pub use minimap::MinimapVisible;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MinimapVisible>();

        // ─── TOASTS & AUDIO — always present ───
        app.add_systems(Startup, toast::spawn_toast_container);
        app.add_systems(
            Update,
            (toast::handle_toast_events, toast::update_toasts, audio::handle_play_sfx),
        );

        // ─── CHARACTER SELECT ───
        app.add_systems(
            OnEnter(GameState::CharacterSelect),
            character_select::spawn_select_screen,
        );
        app.add_systems(
            OnExit(GameState::CharacterSelect),
            character_select::despawn_select_screen,
        );
        app.add_systems(
            Update,
            (
                character_select::select_screen_input,
                character_select::update_select_screen,
            )
                .chain()
                .run_if(in_state(GameState::CharacterSelect)),
        );

        // ─── HUD — visible while roaming the square ───
        app.add_systems(OnEnter(GameState::Playing), (hud::spawn_hud, minimap::spawn_minimap));
        app.add_systems(
            OnExit(GameState::Playing),
            (hud::despawn_hud, minimap::despawn_minimap),
        );
        app.add_systems(
            Update,
            (
                hud::update_vital_bars,
                hud::update_money_display,
                hud::update_clock_display,
                hud::update_interact_prompt,
                minimap::toggle_minimap,
                minimap::update_minimap,
                inventory_screen::open_inventory,
            )
                .run_if(in_state(GameState::Playing)),
        );

        // ─── NOTICE BOX — listener runs while roaming, box while open ───
        app.add_systems(Update, notice::listen_for_notices);
        app.add_systems(OnEnter(GameState::Notice), notice::spawn_notice_box);
        app.add_systems(OnExit(GameState::Notice), notice::despawn_notice_box);
        app.add_systems(
            Update,
            notice::dismiss_notice.run_if(in_state(GameState::Notice)),
        );

        // ─── SHOP SCREEN ───
        app.add_systems(OnEnter(GameState::Shop), shop_screen::spawn_shop_screen);
        app.add_systems(OnExit(GameState::Shop), shop_screen::despawn_shop_screen);
        app.add_systems(
            Update,
            (shop_screen::shop_navigation, shop_screen::update_shop_display)
                .chain()
                .run_if(in_state(GameState::Shop)),
        );

        // ─── INVENTORY SCREEN ───
        app.add_systems(
            OnEnter(GameState::Inventory),
            inventory_screen::spawn_inventory_screen,
        );
        app.add_systems(
            OnExit(GameState::Inventory),
            inventory_screen::despawn_inventory_screen,
        );
        app.add_systems(
            Update,
            inventory_screen::close_inventory.run_if(in_state(GameState::Inventory)),
        );

        // ─── BATTLE SCREEN ───
        app.add_systems(OnEnter(GameState::Battle), battle_screen::spawn_battle_screen);
        app.add_systems(OnExit(GameState::Battle), battle_screen::despawn_battle_screen);
        app.add_systems(
            Update,
            battle_screen::update_battle_screen.run_if(in_state(GameState::Battle)),
        );

        // ─── GAME OVER ───
        app.add_systems(OnEnter(GameState::GameOver), game_over::spawn_game_over);
        app.add_systems(OnExit(GameState::GameOver), game_over::despawn_game_over);
        app.add_systems(
            Update,
            game_over::game_over_input.run_if(in_state(GameState::GameOver)),
        );
    }
}

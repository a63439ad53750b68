mod battle;
mod clock;
mod data;
mod economy;
mod input;
mod player;
mod save;
mod shared;
mod ui;
mod world;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use shared::*;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Brawlvale".into(),
                        resolution: WindowResolution::new(MAP_WIDTH, MAP_HEIGHT),
                        present_mode: PresentMode::AutoVsync,
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        // Game state
        .init_state::<GameState>()
        // Session resources
        .init_resource::<GameSpeed>()
        .init_resource::<GameClock>()
        .init_resource::<PlayerSheet>()
        .init_resource::<NearbyStation>()
        .init_resource::<SessionStats>()
        // Static data registries
        .init_resource::<FighterRoster>()
        .init_resource::<StationRegistry>()
        .init_resource::<ItemRegistry>()
        .init_resource::<ShopData>()
        .init_resource::<EnemyRoster>()
        // Events
        .add_event::<OpenShopEvent>()
        .add_event::<NoticeEvent>()
        .add_event::<MoneyChangedEvent>()
        .add_event::<PurchaseEvent>()
        .add_event::<BattleResolvedEvent>()
        .add_event::<PlaySfxEvent>()
        .add_event::<ToastEvent>()
        // Domain plugins
        .add_plugins(input::InputPlugin)
        .add_plugins(clock::ClockPlugin)
        .add_plugins(player::PlayerPlugin)
        .add_plugins(world::WorldPlugin)
        .add_plugins(economy::EconomyPlugin)
        .add_plugins(battle::BattlePlugin)
        .add_plugins(save::SavePlugin)
        .add_plugins(ui::UiPlugin)
        // Data loading
        .add_plugins(data::DataPlugin)
        // Camera
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

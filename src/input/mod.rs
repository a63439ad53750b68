use bevy::prelude::*;
use crate::shared::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerInput>();
        app.init_resource::<KeyBindings>();
        app.init_resource::<InputContext>();
        app.add_systems(
            PreUpdate,
            (reset_and_read_input, manage_input_context).chain(),
        );
    }
}

/// Per-frame input snapshot. Movement axes are level-triggered (held
/// keys); everything else is edge-triggered (just pressed this frame).
#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerInput {
    /// Raw axis sum, NOT normalized: holding two axes moves diagonally
    /// faster. That is the town's movement model, keep it.
    pub move_axis: Vec2,
    pub interact: bool,
    pub dismiss: bool,
    pub open_inventory: bool,
    pub toggle_minimap: bool,
    pub speed_select: Option<GameSpeed>,
    pub ui_up: bool,
    pub ui_down: bool,
    pub ui_left: bool,
    pub ui_right: bool,
    pub ui_confirm: bool,
    pub ui_cancel: bool,
}

#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    pub move_up: KeyCode,
    pub move_down: KeyCode,
    pub move_left: KeyCode,
    pub move_right: KeyCode,
    pub interact: KeyCode,
    pub open_inventory: KeyCode,
    pub toggle_minimap: KeyCode,
    pub ui_confirm: KeyCode,
    pub ui_cancel: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_up: KeyCode::KeyW,
            move_down: KeyCode::KeyS,
            move_left: KeyCode::KeyA,
            move_right: KeyCode::KeyD,
            interact: KeyCode::KeyE,
            open_inventory: KeyCode::KeyI,
            toggle_minimap: KeyCode::KeyM,
            ui_confirm: KeyCode::Enter,
            ui_cancel: KeyCode::Escape,
        }
    }
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputContext {
    #[default]
    Disabled,
    Gameplay,
    Menu,
}

/// The single point where hardware input becomes game actions.
fn reset_and_read_input(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    context: Res<InputContext>,
    mut input: ResMut<PlayerInput>,
) {
    *input = PlayerInput::default();

    match *context {
        InputContext::Disabled => return,

        InputContext::Gameplay => {
            let mut axis = Vec2::ZERO;
            if keys.pressed(bindings.move_up) || keys.pressed(KeyCode::ArrowUp) {
                axis.y -= 1.0;
            }
            if keys.pressed(bindings.move_down) || keys.pressed(KeyCode::ArrowDown) {
                axis.y += 1.0;
            }
            if keys.pressed(bindings.move_left) || keys.pressed(KeyCode::ArrowLeft) {
                axis.x -= 1.0;
            }
            if keys.pressed(bindings.move_right) || keys.pressed(KeyCode::ArrowRight) {
                axis.x += 1.0;
            }
            input.move_axis = axis;

            input.interact = keys.just_pressed(bindings.interact);
            input.dismiss = keys.just_pressed(bindings.ui_cancel);
            input.open_inventory = keys.just_pressed(bindings.open_inventory);
            input.toggle_minimap = keys.just_pressed(bindings.toggle_minimap);

            input.speed_select = if keys.just_pressed(KeyCode::Digit1) {
                Some(GameSpeed::Normal)
            } else if keys.just_pressed(KeyCode::Digit2) {
                Some(GameSpeed::Double)
            } else if keys.just_pressed(KeyCode::Digit3) {
                Some(GameSpeed::Triple)
            } else {
                None
            };
        }

        InputContext::Menu => {
            input.ui_up =
                keys.just_pressed(bindings.move_up) || keys.just_pressed(KeyCode::ArrowUp);
            input.ui_down =
                keys.just_pressed(bindings.move_down) || keys.just_pressed(KeyCode::ArrowDown);
            input.ui_left =
                keys.just_pressed(bindings.move_left) || keys.just_pressed(KeyCode::ArrowLeft);
            input.ui_right =
                keys.just_pressed(bindings.move_right) || keys.just_pressed(KeyCode::ArrowRight);
            input.ui_confirm = keys.just_pressed(bindings.ui_confirm);
            input.ui_cancel = keys.just_pressed(bindings.ui_cancel);
            input.dismiss =
                keys.just_pressed(bindings.ui_cancel) || keys.just_pressed(bindings.interact);
        }
    }
}

/// Derives InputContext from GameState. ONE system, replaces all
/// per-domain guards.
fn manage_input_context(game_state: Res<State<GameState>>, mut context: ResMut<InputContext>) {
    *context = match *game_state.get() {
        GameState::Playing => InputContext::Gameplay,
        GameState::CharacterSelect
        | GameState::Shop
        | GameState::Notice
        | GameState::Inventory
        | GameState::Battle
        | GameState::GameOver => InputContext::Menu,
        GameState::Loading => InputContext::Disabled,
    };
}

//! Economy domain — shop counters, the purchase engine, money formatting.
//!
//! Cross-domain communication goes through `crate::shared::*` events and
//! resources; the town opens shops with `OpenShopEvent`, the UI confirms
//! rows with `BuyRequestEvent`, and everyone else learns about money
//! through `MoneyChangedEvent`.

use bevy::prelude::*;

pub mod purse;
pub mod shop;

use crate::shared::GameState;
use shop::{close_shop, handle_buy, open_shop, refresh_shop_affordability, ActiveShop, BuyRequestEvent};

// ─────────────────────────────────────────────────────────────────────────────
// Plugin
// ─────────────────────────────────────────────────────────────────────────────

pub struct EconomyPlugin;

impl Plugin for EconomyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveShop>();

        app.add_event::<BuyRequestEvent>();

        app.add_systems(
            Update,
            (
                // Listens for the town handing a customer over. Guards its
                // own state internally.
                open_shop,
                (refresh_shop_affordability, handle_buy, close_shop)
                    .run_if(in_state(GameState::Shop)),
            ),
        );
    }
}

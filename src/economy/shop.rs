use bevy::prelude::*;

use super::purse::{apply_purchase, format_money, PurchaseError};
use crate::input::PlayerInput;
use crate::shared::*;

// ─────────────────────────────────────────────────────────────────────────────
// Resources
// ─────────────────────────────────────────────────────────────────────────────

/// Which counter the player is standing at, plus its listings prepared for
/// the UI. Cleared when the shop closes.
#[derive(Resource, Debug, Clone, Default)]
pub struct ActiveShop {
    pub shop_id: Option<ShopId>,
    pub greeting: String,
    pub listings: Vec<ActiveListing>,
    /// Row highlighted by keyboard navigation. The UI moves it, the buy
    /// handler reads it.
    pub selected: usize,
}

/// A single shop row, enriched with item info for the UI.
#[derive(Debug, Clone)]
pub struct ActiveListing {
    pub item_id: ItemId,
    pub display_name: String,
    pub description: String,
    pub effect_text: String,
    pub price: u32,
    pub can_afford: bool, // cached against current money, refreshed per frame
}

// ─────────────────────────────────────────────────────────────────────────────
// Events (internal — used to drive transactions from UI input)
// ─────────────────────────────────────────────────────────────────────────────

/// Fired by the UI when the player confirms a purchase.
#[derive(Event, Debug, Clone)]
pub struct BuyRequestEvent {
    pub item_id: ItemId,
}

// ─────────────────────────────────────────────────────────────────────────────
// Systems
// ─────────────────────────────────────────────────────────────────────────────

/// Answers OpenShopEvents from the town: populates ActiveShop and flips the
/// state to Shop. Only honored while roaming so a stray event cannot
/// re-trigger from inside another screen.
pub fn open_shop(
    mut events: EventReader<OpenShopEvent>,
    shop_data: Res<ShopData>,
    item_registry: Res<ItemRegistry>,
    sheet: Res<PlayerSheet>,
    current_state: Res<State<GameState>>,
    mut active_shop: ResMut<ActiveShop>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for ev in events.read() {
        if *current_state.get() != GameState::Playing {
            continue;
        }

        let listings = build_listings(ev.shop_id, &shop_data, &item_registry, sheet.money);

        *active_shop = ActiveShop {
            shop_id: Some(ev.shop_id),
            greeting: ev.greeting.clone(),
            listings,
            selected: 0,
        };
        next_state.set(GameState::Shop);
        info!("[Economy] Entering shop: {:?}", ev.shop_id);
    }
}

/// Refreshes the `can_afford` flag each frame while in the shop.
/// Cheap, and keeps the UI honest without event overhead.
pub fn refresh_shop_affordability(sheet: Res<PlayerSheet>, mut active_shop: ResMut<ActiveShop>) {
    if active_shop.shop_id.is_none() {
        return;
    }
    let money = sheet.money;
    for listing in active_shop.listings.iter_mut() {
        listing.can_afford = money >= listing.price;
    }
}

/// Processes BuyRequestEvents — the core purchase flow.
pub fn handle_buy(
    mut buy_events: EventReader<BuyRequestEvent>,
    mut sheet: ResMut<PlayerSheet>,
    mut stats: ResMut<SessionStats>,
    item_registry: Res<ItemRegistry>,
    active_shop: Res<ActiveShop>,
    mut money_writer: EventWriter<MoneyChangedEvent>,
    mut purchase_writer: EventWriter<PurchaseEvent>,
    mut toast_writer: EventWriter<ToastEvent>,
    mut sfx_writer: EventWriter<PlaySfxEvent>,
) {
    let Some(shop_id) = active_shop.shop_id else {
        return;
    };

    for ev in buy_events.read() {
        let item_def = match item_registry.get(&ev.item_id) {
            Some(def) => def,
            None => {
                warn!("[Economy] Buy failed, unknown item '{}'", ev.item_id);
                continue;
            }
        };

        // The item must be on this counter; the registry price is the one
        // the purchase engine charges, so it is also the one reported.
        if !active_shop.listings.iter().any(|l| l.item_id == ev.item_id) {
            warn!(
                "[Economy] Buy failed, '{}' is not on this counter",
                ev.item_id
            );
            continue;
        }
        let price = item_def.price;

        match apply_purchase(&mut sheet, item_def) {
            Ok(()) => {
                stats.purchases += 1;
                stats.money_spent += price as u64;

                // The sheet is already paid up; this event is for the
                // wallet file and tallies, nobody re-applies it.
                money_writer.send(MoneyChangedEvent {
                    amount: -(price as i32),
                    reason: format!("Bought {}", item_def.name),
                    balance: sheet.money,
                });
                purchase_writer.send(PurchaseEvent {
                    shop_id,
                    item_id: ev.item_id.clone(),
                    price,
                });
                toast_writer.send(ToastEvent {
                    message: format!("Bought {} for {}", item_def.name, format_money(price)),
                    duration_secs: 2.0,
                });
                sfx_writer.send(PlaySfxEvent {
                    sfx_id: String::from("shop_buy"),
                });

                info!(
                    "[Economy] Bought '{}' for {}. Remaining: {}",
                    ev.item_id,
                    format_money(price),
                    format_money(sheet.money)
                );
            }
            Err(err @ PurchaseError::InsufficientFunds { .. }) => {
                toast_writer.send(ToastEvent {
                    message: err.to_string(),
                    duration_secs: 2.0,
                });
                sfx_writer.send(PlaySfxEvent {
                    sfx_id: String::from("ui_deny"),
                });
                info!("[Economy] {}", err);
            }
        }
    }
}

/// Escape hands the counter back and returns to the square.
pub fn close_shop(
    input: Res<PlayerInput>,
    mut active_shop: ResMut<ActiveShop>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !input.ui_cancel {
        return;
    }
    active_shop.shop_id = None;
    active_shop.listings.clear();
    next_state.set(GameState::Playing);
    info!("[Economy] Left the shop");
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn build_listings(
    shop_id: ShopId,
    shop_data: &ShopData,
    item_registry: &ItemRegistry,
    money: u32,
) -> Vec<ActiveListing> {
    let Some(item_ids) = shop_data.listings.get(&shop_id) else {
        return Vec::new();
    };

    item_ids
        .iter()
        .filter_map(|item_id| {
            let def = item_registry.get(item_id)?;
            Some(ActiveListing {
                item_id: item_id.clone(),
                display_name: def.name.clone(),
                description: def.description.clone(),
                effect_text: def.effect.describe(),
                price: def.price,
                can_afford: money >= def.price,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn fixtures() -> (ShopData, ItemRegistry) {
        let mut items = HashMap::new();
        items.insert(
            String::from("barley_loaf"),
            ItemDef {
                id: String::from("barley_loaf"),
                name: String::from("Barley Loaf"),
                description: String::from("Dense and filling."),
                price: 20,
                effect: ItemEffect::Restore {
                    hunger: 30.0,
                    thirst: 0.0,
                },
            },
        );
        let mut listings = HashMap::new();
        listings.insert(ShopId::FoodStall, vec![String::from("barley_loaf")]);
        (ShopData { listings }, ItemRegistry { items })
    }

    #[test]
    fn test_build_listings_enriches_from_registry() {
        let (shop_data, registry) = fixtures();
        let rows = build_listings(ShopId::FoodStall, &shop_data, &registry, 25);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].display_name, "Barley Loaf");
        assert_eq!(rows[0].effect_text, "+30 hunger");
        assert!(rows[0].can_afford);
    }

    #[test]
    fn test_build_listings_flags_unaffordable_rows() {
        let (shop_data, registry) = fixtures();
        let rows = build_listings(ShopId::FoodStall, &shop_data, &registry, 19);
        assert!(!rows[0].can_afford);
    }

    #[test]
    fn test_build_listings_for_empty_counter() {
        let (shop_data, registry) = fixtures();
        let rows = build_listings(ShopId::WeaponSmith, &shop_data, &registry, 100);
        assert!(rows.is_empty(), "a shop with no stock lists nothing");
    }
}

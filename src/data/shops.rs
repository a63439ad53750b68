use crate::shared::*;

/// Populate the ShopData resource with listings for both counters.
///
/// Shops:
///   FoodStall   — meals and gauge-widening tonics
///   WeaponSmith — damage bonuses and body conditioning
pub fn populate_shops(shop_data: &mut ShopData) {
    shop_data.listings.insert(
        ShopId::FoodStall,
        vec![
            "barley_loaf".into(),
            "spring_water".into(),
            "stew_platter".into(),
            "hunger_tonic".into(),
            "thirst_tonic".into(),
        ],
    );

    shop_data.listings.insert(
        ShopId::WeaponSmith,
        vec![
            "rusty_sword".into(),
            "woodsman_axe".into(),
            "health_elixir".into(),
            "energy_elixir".into(),
            "vitality_apple".into(),
        ],
    );
}

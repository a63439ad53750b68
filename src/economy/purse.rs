use crate::shared::*;

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseError {
    InsufficientFunds { price: u32, balance: u32 },
}

impl std::fmt::Display for PurchaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PurchaseError::InsufficientFunds { price, balance } => {
                write!(
                    f,
                    "Not enough money! That costs {} and you have {}.",
                    format_money(*price),
                    format_money(*balance)
                )
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Purchase engine
// ─────────────────────────────────────────────────────────────────────────────

/// Buy one item: deduct the price, apply the effect, record it in the
/// inventory. The funds check is the only gate; once it clears, every step
/// below is infallible, so a failed purchase leaves the sheet untouched
/// and a successful one never half-commits.
pub fn apply_purchase(sheet: &mut PlayerSheet, item: &ItemDef) -> Result<(), PurchaseError> {
    if sheet.money < item.price {
        return Err(PurchaseError::InsufficientFunds {
            price: item.price,
            balance: sheet.money,
        });
    }

    sheet.money -= item.price;

    match &item.effect {
        ItemEffect::Weapon { damage_bonus } => {
            sheet.damage_bonus = sheet.damage_bonus.saturating_add(*damage_bonus);
        }
        ItemEffect::Restore { hunger, thirst } => {
            sheet.hunger.add(*hunger);
            sheet.thirst.add(*thirst);
        }
        ItemEffect::Fortify { vital, amount } => {
            sheet.vital_mut(*vital).raise_max(*amount);
        }
    }

    sheet.inventory.add(&item.id);
    Ok(())
}

/// Render a balance the way every screen prints it.
pub fn format_money(amount: u32) -> String {
    format!("${}", amount)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn buyer(money: u32) -> PlayerSheet {
        PlayerSheet {
            nickname: String::from("Tester"),
            name: String::from("Garrod"),
            portrait: String::from("fighters/garrod.png"),
            money,
            ..Default::default()
        }
    }

    fn stew() -> ItemDef {
        ItemDef {
            id: String::from("stew_platter"),
            name: String::from("Stew Platter"),
            description: String::from("A bit of everything."),
            price: 40,
            effect: ItemEffect::Restore {
                hunger: 20.0,
                thirst: 20.0,
            },
        }
    }

    fn sword() -> ItemDef {
        ItemDef {
            id: String::from("rusty_sword"),
            name: String::from("Rusty Sword"),
            description: String::from("Better than fists."),
            price: 50,
            effect: ItemEffect::Weapon { damage_bonus: 10 },
        }
    }

    fn elixir() -> ItemDef {
        ItemDef {
            id: String::from("health_elixir"),
            name: String::from("Health Elixir"),
            description: String::from("Thickens the blood."),
            price: 30,
            effect: ItemEffect::Fortify {
                vital: VitalKind::Health,
                amount: 20.0,
            },
        }
    }

    #[test]
    fn test_insufficient_funds_changes_nothing() {
        let mut sheet = buyer(39);
        let before = sheet.clone();
        let result = apply_purchase(&mut sheet, &stew());
        assert_eq!(
            result,
            Err(PurchaseError::InsufficientFunds {
                price: 40,
                balance: 39
            })
        );
        assert_eq!(sheet, before, "a denied purchase must leave no trace");
    }

    #[test]
    fn test_successful_restore_purchase() {
        let mut sheet = buyer(100);
        sheet.hunger.current = 50.0;
        sheet.thirst.current = 95.0;

        apply_purchase(&mut sheet, &stew()).unwrap();

        assert_eq!(sheet.money, 60);
        assert_eq!(sheet.hunger.current, 70.0);
        assert_eq!(sheet.thirst.current, 100.0, "restore clamps at max");
        assert_eq!(sheet.inventory.count("stew_platter"), 1);
    }

    #[test]
    fn test_weapon_purchase_stacks_damage_bonus() {
        let mut sheet = buyer(200);
        apply_purchase(&mut sheet, &sword()).unwrap();
        apply_purchase(&mut sheet, &sword()).unwrap();

        assert_eq!(sheet.damage_bonus, 20, "weapon bonuses accumulate");
        assert_eq!(sheet.attack_damage(), 25);
        assert_eq!(sheet.money, 100);
        assert_eq!(
            sheet.inventory.count("rusty_sword"),
            2,
            "repeat buys merge into one stack"
        );
        assert_eq!(sheet.inventory.stacks.len(), 1);
    }

    #[test]
    fn test_fortify_raises_max_and_current_together() {
        let mut sheet = buyer(30);
        sheet.health.current = 80.0;

        apply_purchase(&mut sheet, &elixir()).unwrap();

        assert_eq!(sheet.health.max, 120.0);
        assert_eq!(sheet.health.current, 100.0);
        assert_eq!(sheet.money, 0, "spending down to zero is allowed");
    }

    #[test]
    fn test_exact_price_is_affordable() {
        let mut sheet = buyer(40);
        assert!(apply_purchase(&mut sheet, &stew()).is_ok());
        assert_eq!(sheet.money, 0);
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0), "$0");
        assert_eq!(format_money(1250), "$1250");
    }
}

//! Wallet persistence for Brawlvale.
//!
//! Money is the one thing that outlives a run. Every balance change is
//! written straight through, and the saved balance seeds the next
//! fighter's purse instead of their template's starting money.
//!
//! Native builds keep a JSON file next to the executable; browser builds
//! use localStorage under a fixed key.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::fs;
#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// PUBLIC TYPES
// ═══════════════════════════════════════════════════════════════════════

pub const WALLET_VERSION: u32 = 1;
pub const WALLET_STORAGE_KEY: &str = "brawlvale_wallet";

/// On-disk shape of the wallet. Every field is required; a file that does
/// not parse is treated as absent rather than patched up.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WalletFile {
    version: u32,
    money: u32,
    saved_at: u64,
}

/// Balance recovered at startup, if any. Character select reads this to
/// seed the new sheet's purse.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct SavedWallet(pub Option<u32>);

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SavedWallet>()
            .add_systems(Startup, load_wallet)
            // Money can change from a shop or from the arena return, so
            // this listens in every state.
            .add_systems(Update, persist_money_changes);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// FILESYSTEM / STORAGE HELPERS
// ═══════════════════════════════════════════════════════════════════════

#[cfg(not(target_arch = "wasm32"))]
fn saves_directory() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));
    exe_dir.join("saves")
}

#[cfg(not(target_arch = "wasm32"))]
fn wallet_path() -> PathBuf {
    saves_directory().join("wallet.json")
}

#[cfg(not(target_arch = "wasm32"))]
fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn current_timestamp() -> u64 {
    0
}

#[cfg(not(target_arch = "wasm32"))]
fn write_wallet(money: u32) -> Result<(), String> {
    let dir = saves_directory();
    if !dir.exists() {
        fs::create_dir_all(&dir).map_err(|e| format!("Could not create saves directory: {}", e))?;
    }

    let file = WalletFile {
        version: WALLET_VERSION,
        money,
        saved_at: current_timestamp(),
    };
    let json =
        serde_json::to_string_pretty(&file).map_err(|e| format!("Serialization failed: {}", e))?;

    let path = wallet_path();
    // Write to a temp file first, then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, &json)
        .map_err(|e| format!("Write failed for {}: {}", tmp_path.display(), e))?;
    fs::rename(&tmp_path, &path).map_err(|e| format!("Rename failed: {}", e))?;

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn write_wallet(money: u32) -> Result<(), String> {
    let file = WalletFile {
        version: WALLET_VERSION,
        money,
        saved_at: current_timestamp(),
    };
    let json = serde_json::to_string(&file).map_err(|e| format!("Serialization failed: {}", e))?;

    let storage = web_sys::window()
        .ok_or_else(|| String::from("No window object"))?
        .local_storage()
        .map_err(|_| String::from("localStorage unavailable"))?
        .ok_or_else(|| String::from("localStorage unavailable"))?;
    storage
        .set_item(WALLET_STORAGE_KEY, &json)
        .map_err(|_| String::from("localStorage write failed"))
}

#[cfg(not(target_arch = "wasm32"))]
fn read_wallet() -> Result<Option<WalletFile>, String> {
    let path = wallet_path();
    if !path.exists() {
        return Ok(None);
    }
    let json = fs::read_to_string(&path)
        .map_err(|e| format!("Read failed for {}: {}", path.display(), e))?;
    let file = parse_wallet(&json)?;
    Ok(Some(file))
}

#[cfg(target_arch = "wasm32")]
fn read_wallet() -> Result<Option<WalletFile>, String> {
    let storage = web_sys::window()
        .ok_or_else(|| String::from("No window object"))?
        .local_storage()
        .map_err(|_| String::from("localStorage unavailable"))?
        .ok_or_else(|| String::from("localStorage unavailable"))?;
    let Some(json) = storage
        .get_item(WALLET_STORAGE_KEY)
        .map_err(|_| String::from("localStorage read failed"))?
    else {
        return Ok(None);
    };
    let file = parse_wallet(&json)?;
    Ok(Some(file))
}

fn parse_wallet(json: &str) -> Result<WalletFile, String> {
    let file: WalletFile =
        serde_json::from_str(json).map_err(|e| format!("Deserialization failed: {}", e))?;

    // Version check — future versions can add migration here
    if file.version != WALLET_VERSION {
        warn!(
            "Wallet has version {} but current version is {}. Attempting to load anyway.",
            file.version, WALLET_VERSION
        );
    }

    Ok(file)
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

/// Startup scan: a readable wallet becomes the purse seed, anything else
/// leaves the template defaults in charge.
fn load_wallet(mut saved: ResMut<SavedWallet>) {
    match read_wallet() {
        Ok(Some(file)) => {
            saved.0 = Some(file.money);
            info!("[Save] Recovered wallet: ${}", file.money);
        }
        Ok(None) => {
            info!("[Save] No saved wallet, templates decide the purse");
        }
        Err(e) => {
            warn!("[Save] Wallet load FAILED: {}", e);
        }
    }
}

/// Write-through: every money change lands on disk with the new balance
/// the sender already computed.
fn persist_money_changes(
    mut events: EventReader<MoneyChangedEvent>,
    mut saved: ResMut<SavedWallet>,
) {
    for ev in events.read() {
        saved.0 = Some(ev.balance);
        match write_wallet(ev.balance) {
            Ok(()) => {
                info!("[Save] Wallet stored: ${} ({})", ev.balance, ev.reason);
            }
            Err(e) => {
                warn!("[Save] Wallet store FAILED: {}", e);
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════

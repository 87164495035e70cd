//! Resolving player keys from the command line

use anyhow::{anyhow, Result};
use notone_core::Player;
use notone_players::{default_lineup, find, keys, roster, Entry};

/// Build the named players, or the given fallback when none are named
pub fn resolve(names: &[String], fallback: impl FnOnce() -> Vec<Entry>) -> Result<Vec<Entry>> {
    if names.is_empty() {
        return Ok(fallback());
    }

    names
        .iter()
        .map(|name| {
            keys()
                .find(|key| key == name)
                .and_then(|key| find(key).map(|player| Entry { key, player }))
                .ok_or_else(|| {
                    anyhow!(
                        "Unknown player: {} (known: {})",
                        name,
                        keys().collect::<Vec<_>>().join(", ")
                    )
                })
        })
        .collect()
}

/// The first two players of the default lineup
pub fn head_to_head() -> Vec<Entry> {
    default_lineup().into_iter().take(2).collect()
}

/// Borrow the capability handles the engines take
pub fn handles(entries: &[Entry]) -> Vec<&dyn Player> {
    entries.iter().map(|entry| entry.player.as_ref()).collect()
}

/// Print every built-in player
pub fn print_roster() {
    for entry in roster() {
        println!(
            "{:<18} {} {}",
            entry.key,
            entry.player.emblem(),
            entry.player.name()
        );
    }
}

//! Not One Players - Built-in roster
//!
//! Strategies that plug into the engine through [`notone_core::Player`]:
//! - Threshold players that stop at a turn score or roll count
//! - An opponent-aware player that remembers the other side's last score
//! - Lookup by key for the command line

mod dicerolls;
mod roster;
mod threshold;

pub use dicerolls::HarryDicerolls;
pub use roster::{default_lineup, find, keys, roster, Entry, DEFAULT_LINEUP};
pub use threshold::{Lines, Rule, Threshold};

//! Roster of built-in players, looked up by key

use notone_core::Player;

use crate::dicerolls::HarryDicerolls;
use crate::threshold::{Rule, Threshold};

/// Keys of the players entered when none are named
pub const DEFAULT_LINEUP: [&str; 5] = [
    "acey-deucy",
    "analytical-alec",
    "gangsta-gary",
    "nadire-beatrycze",
    "harry-dicerolls",
];

const NUMBERED: [(&str, &str, &[&str]); 16] = [
    ("one", "One", &["1️⃣"]),
    ("two", "Two", &["2️⃣"]),
    ("three", "Three", &["3️⃣"]),
    ("four", "Four", &["4️⃣"]),
    ("five", "Five", &["5️⃣"]),
    ("six", "Six", &["6️⃣"]),
    ("seven", "Seven", &["7️⃣"]),
    ("eight", "Eight", &["8️⃣"]),
    ("nine", "Nine", &["9️⃣"]),
    ("ten", "Ten", &["1️⃣0️⃣"]),
    ("eleven", "Eleven", &["1️⃣1️⃣"]),
    ("twelve", "Twelve", &["1️⃣2️⃣"]),
    ("thirteen", "Thirteen", &["1️⃣3️⃣"]),
    ("fourteen", "Fourteen", &["1️⃣4️⃣"]),
    ("fifteen", "Fifteen", &["1️⃣5️⃣"]),
    ("sixteen", "Sixteen", &["1️⃣6️⃣"]),
];

/// A roster player and the key it is registered under
pub struct Entry {
    pub key: &'static str,
    pub player: Box<dyn Player>,
}

/// Every built-in player, freshly constructed
pub fn roster() -> Vec<Entry> {
    keys()
        .filter_map(|key| find(key).map(|player| Entry { key, player }))
        .collect()
}

/// Registered keys, in roster order
pub fn keys() -> impl Iterator<Item = &'static str> {
    [
        "aggro-aiden",
        "cautious-carter",
        "analytical-alec",
        "gangsta-gary",
        "nadire-beatrycze",
        "acey-deucy",
        "harry-dicerolls",
    ]
    .into_iter()
    .chain(NUMBERED.iter().map(|(key, _, _)| *key))
}

/// Build the player registered under `key`
pub fn find(key: &str) -> Option<Box<dyn Player>> {
    let player: Box<dyn Player> = match key {
        "aggro-aiden" => Box::new(
            Threshold::new("Aggro Aiden", &["😤"], Rule::ScoreBelow(40))
                .with_phrases(&["I WILL DESTROY ALL WHO DARE OPPOSE ME!!!"]),
        ),
        "cautious-carter" => Box::new(
            Threshold::new("Cautious Carter", &["😳"], Rule::RollsBelow(1))
                .with_phrases(&["Oh I won? That's good, right?"]),
        ),
        "analytical-alec" => Box::new(
            Threshold::new("Analytical Alec", &["🤓"], Rule::ScoreBelow(20))
                .with_phrases(&["This was within my calculations"]),
        ),
        "gangsta-gary" => Box::new(
            Threshold::new("Gangsta Gary", &["💰💰🤬💰💰"], Rule::ScoreBelow(19)).with_phrases(&[
                "You lose, bruh!",
                "I'm just looking around to see who's gonna finish second.",
                "Pay me dat money!",
                "Get your popcorn ready, 'cause I'm gonna put on a show.",
                "I'm the best ever. I'm the most brutal and vicious, the most ruthless champion there has ever been. No one can stop me.",
                "Look, everyone's laughing at you.",
                "Next time I'll open my eyes.",
            ]),
        ),
        "nadire-beatrycze" => Box::new(
            Threshold::new(
                "Nadire Beatrycze",
                &["😃", "🤪", "😫", "😐", "😵‍💫"],
                Rule::RollsAndScoreBelow { rolls: 6, score: 16 },
            )
            .with_phrases(&[
                "UGH, AS IF!",
                "YOU CAN'T HANDLE THE TRUTH!",
                "YOU'RE KILLING ME, SMALLS!",
                "SHOW ME THE MONEY!",
                "WITH GREAT POWER, COMES GREAT RESPONSIBILITY.",
            ]),
        ),
        "acey-deucy" => Box::new(
            Threshold::new("Acey Deucy", &["😎"], Rule::RollsAndScoreBelow { rolls: 6, score: 40 })
                .with_phrases(&["I shoot to win"]),
        ),
        "harry-dicerolls" => Box::new(HarryDicerolls::new()),
        _ => {
            let &(_, name, emblem) = NUMBERED.iter().find(|(k, _, _)| *k == key)?;
            Box::new(Threshold::new(name, emblem, Rule::RollsBelow(4)))
        }
    };
    Some(player)
}

/// Players for the default lineup
pub fn default_lineup() -> Vec<Entry> {
    DEFAULT_LINEUP
        .iter()
        .filter_map(|&key| find(key).map(|player| Entry { key, player }))
        .collect()
}

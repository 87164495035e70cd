//! Threshold strategies - roll until a turn-score or turn-roll limit

use std::sync::atomic::{AtomicUsize, Ordering};

use notone_core::{GameState, Player};

/// When a threshold player keeps rolling
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    /// Roll while the turn score is below the limit
    ScoreBelow(u32),
    /// Roll while fewer than this many rolls were taken this turn
    RollsBelow(u32),
    /// Roll while both limits hold
    RollsAndScoreBelow { rolls: u32, score: u32 },
}

impl Rule {
    pub fn allows(self, state: &GameState) -> bool {
        match self {
            Rule::ScoreBelow(score) => state.turn_score() < score,
            Rule::RollsBelow(rolls) => state.turn_rolls() < rolls,
            Rule::RollsAndScoreBelow { rolls, score } => {
                state.turn_rolls() < rolls && state.turn_score() < score
            }
        }
    }
}

/// Fixed lines handed out in rotation
#[derive(Debug)]
pub struct Lines {
    lines: &'static [&'static str],
    next: AtomicUsize,
}

impl Lines {
    pub const fn new(lines: &'static [&'static str]) -> Self {
        Self {
            lines,
            next: AtomicUsize::new(0),
        }
    }

    /// Next line, wrapping around; empty when there are none
    pub fn pick(&self) -> String {
        if self.lines.is_empty() {
            return String::new();
        }
        let i = self.next.fetch_add(1, Ordering::Relaxed) % self.lines.len();
        self.lines[i].to_string()
    }
}

/// A player driven entirely by a [`Rule`]
#[derive(Debug)]
pub struct Threshold {
    name: String,
    emblems: Lines,
    phrases: Lines,
    rule: Rule,
}

impl Threshold {
    pub fn new(name: impl Into<String>, emblem: &'static [&'static str], rule: Rule) -> Self {
        Self {
            name: name.into(),
            emblems: Lines::new(emblem),
            phrases: Lines::new(&[]),
            rule,
        }
    }

    /// Set the victory phrases, used in rotation
    pub fn with_phrases(mut self, phrases: &'static [&'static str]) -> Self {
        self.phrases = Lines::new(phrases);
        self
    }

    pub fn rule(&self) -> Rule {
        self.rule
    }
}

impl Player for Threshold {
    fn name(&self) -> &str {
        &self.name
    }

    fn emblem(&self) -> String {
        self.emblems.pick()
    }

    fn victory_phrase(&self) -> String {
        let phrase = self.phrases.pick();
        if phrase.is_empty() {
            format!("{} reigns supreme.", self.name)
        } else {
            phrase
        }
    }

    fn should_roll_again(&self, state: &GameState) -> bool {
        self.rule.allows(state)
    }
}

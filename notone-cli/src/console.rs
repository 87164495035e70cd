//! Console presentation - renders bus events to stdout
//!
//! One handler is subscribed to every channel. Write failures are returned to
//! the bus, which aborts the run.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use notone_core::{Channel, Event, EventBus, GameState, Player, Slot, Standing, TournamentState};
use notone_tournament::matchup_players;

/// How much of each game to print
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameReport {
    None,
    /// One line per game
    Line,
    /// Final scoreboard, winner, and victory phrase
    Full,
}

/// What the console prints
#[derive(Clone, Copy, Debug)]
pub struct Narration {
    /// Rounds, turns, and rolls
    pub turns: bool,
    pub games: GameReport,
    /// Tournament pairings and advancement
    pub bracket: bool,
    /// Pause after each roll
    pub delay: Duration,
}

/// Subscribe the console renderer to every channel
pub fn attach(bus: &mut EventBus, narration: Narration) {
    bus.subscribe_many(&Channel::ALL, move |event| render(event, &narration));
}

fn render(event: &Event<'_>, narration: &Narration) -> Result<()> {
    let turns = narration.turns;
    match *event {
        Event::GameStarted { .. } if turns => echo("NOT ONE")?,
        Event::RoundStarted { round, .. } if turns => echo(format!("\nROUND {round}"))?,
        Event::TurnStarted { player, .. } if turns => {
            echo(format!("  {}", player.name().to_uppercase()))?;
        }
        Event::RollSucceeded { state, d1, d2 } if turns => {
            echo(format!("    🎲: {d1}+{d2} ✅ {}", state.turn_score()))?;
            pause(narration.delay);
        }
        Event::RollFailed { d1, d2, .. } if turns => {
            echo(format!("    🎲: {d1}+{d2} ❌ 0"))?;
            pause(narration.delay);
        }
        Event::TurnEnded { state, .. } if turns => {
            echo(format!("    SCORE: {}", state.active_score()))?;
        }
        Event::GameEnded { state, players } => match narration.games {
            GameReport::None => {}
            GameReport::Line => echo(result_line(state, players))?,
            GameReport::Full => print_final_score(state, players)?,
        },
        Event::TournamentStarted { players, .. } if narration.bracket => {
            echo(format!("TOURNAMENT: {} players", players.len()))?;
        }
        Event::TournamentRoundStarted {
            round,
            competitors,
            players,
            ..
        } if narration.bracket => print_pairings(round, competitors, players)?,
        Event::TournamentRoundEnded {
            competitors,
            players,
            ..
        } if narration.bracket => {
            let names: Vec<String> = competitors
                .iter()
                .map(|slot| slot_label(*slot, players))
                .collect();
            echo(format!("  ADVANCING: {}", names.join(", ")))?;
        }
        Event::TournamentEnded { state, players } => print_champion(state, players)?,
        Event::StressTestEnded { standings } => print_scoreboard(standings)?,
        _ => {}
    }
    Ok(())
}

// ============================================================================
// FORMATTING
// ============================================================================

fn print_final_score(state: &GameState, players: &[&dyn Player]) -> io::Result<()> {
    echo("\nFINAL SCORE")?;
    for (index, player) in players.iter().enumerate() {
        echo(format!(
            "{} {}: {} in {} rolls",
            player.emblem(),
            player.name(),
            state.scores()[index],
            state.rolls()[index]
        ))?;
    }

    match state.winner().and_then(|index| players.get(index)) {
        Some(winner) => {
            echo(format!("\nWINNER: {} {}", winner.emblem(), winner.name()))?;
            echo(format!("{}\n", winner.victory_phrase()))?;
            echo("GAME OVER")
        }
        None => echo("TIE! Play again."),
    }
}

fn result_line(state: &GameState, players: &[&dyn Player]) -> String {
    let [first, second] = state.scores();
    let name = |index: usize| players.get(index).map_or("?", |p| p.name());
    let outcome = match state.winner() {
        Some(index) => format!("{} wins", name(index)),
        None => "tie, replaying".to_string(),
    };
    format!("    {} {} - {} {} ({})", name(0), first, second, name(1), outcome)
}

fn print_pairings(round: u32, competitors: &[Slot], players: &[&dyn Player]) -> io::Result<()> {
    echo(format!("\nTOURNAMENT ROUND {round}"))?;
    for (first, second) in matchup_players(competitors) {
        let line = match (first, second) {
            (Slot::Empty, Slot::Empty) => continue,
            (occupied, Slot::Empty) | (Slot::Empty, occupied) => {
                format!("  {} has a bye", slot_label(occupied, players))
            }
            _ => format!(
                "  {} vs {}",
                slot_label(first, players),
                slot_label(second, players)
            ),
        };
        echo(line)?;
    }
    Ok(())
}

fn print_champion(state: &TournamentState, players: &[&dyn Player]) -> io::Result<()> {
    match state.champion().and_then(|index| players.get(index)) {
        Some(champion) => {
            echo(format!("\nCHAMPION: {} {}", champion.emblem(), champion.name()))?;
            echo(champion.victory_phrase())
        }
        None => echo(format!(
            "\nNo champion after {} rounds ({} still standing)",
            state.round(),
            state.remaining()
        )),
    }
}

fn print_scoreboard(standings: &[Standing]) -> io::Result<()> {
    echo("\nSTRESS TEST RESULTS")?;
    for (rank, standing) in standings.iter().enumerate() {
        echo(format!(
            "{:>2}. {} {:<20} {:>7.2} avg over {} games",
            rank + 1,
            standing.emblem,
            standing.name,
            standing.average_score,
            standing.games
        ))?;
    }
    Ok(())
}

fn slot_label(slot: Slot, players: &[&dyn Player]) -> String {
    match slot.entrant().and_then(|index| players.get(index)) {
        Some(player) => format!("{} {}", player.emblem(), player.name()),
        None => "(bye)".to_string(),
    }
}

fn echo(message: impl AsRef<str>) -> io::Result<()> {
    writeln!(io::stdout().lock(), "{}", message.as_ref())
}

fn pause(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}

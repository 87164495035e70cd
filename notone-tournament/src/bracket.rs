//! Single-elimination bracket
//!
//! Level 1 - Orchestration, Level 2 - Phases, Level 3 - Steps
//!
//! Entrants are shuffled into seed order (blind seeding), padded with byes to
//! a power-of-two field, and paired highest seed against lowest seed each
//! round. Tied games are replayed in full until someone wins.

use notone_core::{play_game, Event, EventBus, Player, Slot, TournamentState};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::TournamentConfig;
use crate::error::TournamentError;

// ============================================================================
// Level 1 - Orchestration
// ============================================================================

/// Run a single-elimination tournament over `players`
///
/// The champion, if any, is reported as an index into `players`. When the
/// configured rounds are fewer than the field needs, the bracket stops early
/// with several competitors left and no champion.
pub fn play_tournament<R: Rng + ?Sized>(
    players: &[&dyn Player],
    config: &TournamentConfig,
    bus: &EventBus,
    rng: &mut R,
) -> Result<TournamentState, TournamentError> {
    if players.is_empty() {
        return Err(TournamentError::EmptyField);
    }

    let needed = rounds_necessary_for_winner(players.len());
    let rounds = config.rounds.unwrap_or(needed);
    let max = most_rounds_supported(players.len());
    if rounds > max {
        return Err(TournamentError::TooManyRounds { rounds, max });
    }

    let seeded = seed_players(players, rounds, rng);
    tracing::info!(
        "Starting tournament: {} players, {} slots, {} rounds",
        players.len(),
        seeded.len(),
        rounds
    );

    let mut state = TournamentState::new(players.len())
        .to_builder()
        .competitors(seeded)
        .build();
    bus.publish(Event::TournamentStarted {
        state: &state,
        players,
    })?;

    for round in 1..=rounds {
        state = state.to_builder().round(round).build();
        bus.publish(Event::TournamentRoundStarted {
            state: &state,
            round,
            competitors: state.competitors(),
            players,
        })?;

        let winners = play_round(state.competitors(), players, config, bus, rng)?;
        tracing::debug!("Round {}: {} advance", round, winners.len());

        state = state.to_builder().competitors(winners).build();
        bus.publish(Event::TournamentRoundEnded {
            state: &state,
            round,
            competitors: state.competitors(),
            players,
        })?;
    }

    let winners = state.competitors().to_vec();
    state = crown_champion(&state, &winners);
    match state.champion() {
        Some(index) => tracing::info!("Champion: {}", players[index].name()),
        None => tracing::info!("No champion after {} rounds", state.round()),
    }
    bus.publish(Event::TournamentEnded {
        state: &state,
        players,
    })?;

    Ok(state)
}

// ============================================================================
// Level 2 - Phases
// ============================================================================

/// Resolve every matchup of one round, in pairing order
fn play_round<R: Rng + ?Sized>(
    competitors: &[Slot],
    players: &[&dyn Player],
    config: &TournamentConfig,
    bus: &EventBus,
    rng: &mut R,
) -> Result<Vec<Slot>, TournamentError> {
    let mut winners = Vec::with_capacity(competitors.len() / 2);
    for matchup in matchup_players(competitors) {
        if let Some(winner) = play_matchup(matchup, players, config, bus, rng)? {
            winners.push(winner);
        }
    }
    Ok(winners)
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Rounds a single-elimination bracket needs to reduce `num_players` to one
pub fn rounds_necessary_for_winner(num_players: usize) -> u32 {
    if num_players <= 1 {
        0
    } else {
        num_players.next_power_of_two().trailing_zeros()
    }
}

/// Most bracket rounds a field can play without two byes meeting
///
/// One round more than needed is possible only when every entrant can be
/// handed a first-round bye, which takes a field of exactly `2^(rounds - 1)`.
pub fn most_rounds_supported(num_players: usize) -> u32 {
    match num_players.checked_ilog2() {
        Some(exponent) => exponent + 1,
        None => 0,
    }
}

/// Shuffle the field into seed order and pad it with byes
///
/// Position in the returned list is the seed (index 0 is the top seed); each
/// occupied slot holds the entrant's index in `field`. The bracket holds
/// `2^rounds` slots, widened to the smallest power of two that fits the field
/// when `rounds` is too small for it, and narrowed to
/// [`most_rounds_supported`] when `rounds` is too large.
pub fn seed_players<T, R: Rng + ?Sized>(field: &[T], rounds: u32, rng: &mut R) -> Vec<Slot> {
    let mut slots: Vec<Slot> = (0..field.len()).map(Slot::Occupied).collect();
    slots.shuffle(rng);

    let needed = rounds_necessary_for_winner(field.len());
    let exponent = rounds.min(most_rounds_supported(field.len())).max(needed);
    slots.resize(1usize << exponent, Slot::Empty);
    slots
}

/// Pair the top half against the reversed bottom half
///
/// Seed 1 meets the last seed, seed 2 the second-to-last, and so on.
pub fn matchup_players(competitors: &[Slot]) -> Vec<(Slot, Slot)> {
    let (left, right) = competitors.split_at(competitors.len() / 2);
    left.iter().copied().zip(right.iter().rev().copied()).collect()
}

/// Decide who advances from a matchup
///
/// A bye advances the other side without a game. Otherwise games are played
/// until one is not tied. Two byes advance nobody.
pub fn play_matchup<R: Rng + ?Sized>(
    matchup: (Slot, Slot),
    players: &[&dyn Player],
    config: &TournamentConfig,
    bus: &EventBus,
    rng: &mut R,
) -> Result<Option<Slot>, TournamentError> {
    let (first, second) = match matchup {
        (Slot::Empty, Slot::Empty) => return Ok(None),
        (Slot::Occupied(_), Slot::Empty) => return Ok(Some(matchup.0)),
        (Slot::Empty, Slot::Occupied(_)) => return Ok(Some(matchup.1)),
        (Slot::Occupied(first), Slot::Occupied(second)) => (first, second),
    };

    let pair = [players[first], players[second]];
    let mut replays = 0;
    loop {
        let state = play_game(&pair, config.game_rounds, bus, rng)?;
        match state.winner() {
            Some(0) => return Ok(Some(Slot::Occupied(first))),
            Some(_) => return Ok(Some(Slot::Occupied(second))),
            None => {}
        }

        if config.max_replays.is_some_and(|max| replays >= max) {
            return Err(TournamentError::Unresolved { replays });
        }
        replays += 1;
        if replays > 1 {
            tracing::warn!(
                "{} vs {} tied again, replay {}",
                pair[0].name(),
                pair[1].name(),
                replays
            );
        } else {
            tracing::debug!("{} vs {} tied, replaying", pair[0].name(), pair[1].name());
        }
    }
}

/// Record a champion when exactly one entrant remains
///
/// Several survivors, or a lone bye, leave the state without a champion.
pub fn crown_champion(state: &TournamentState, winners: &[Slot]) -> TournamentState {
    match winners {
        [Slot::Occupied(index)] => state.to_builder().champion(Some(*index)).build(),
        _ => state.clone(),
    }
}

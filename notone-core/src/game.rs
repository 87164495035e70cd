//! Game engine: state transitions and the game loop
//!
//! Each transition takes the prior [`GameState`] by reference and returns a
//! new one. [`play_game`] threads a single state chain through rounds and
//! turns, consulting the players and publishing an event after every step.

use rand::Rng;

use crate::bus::EventBus;
use crate::error::GameError;
use crate::event::Event;
use crate::player::Player;
use crate::state::GameState;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Rounds in a standard game
pub const DEFAULT_ROUNDS: u32 = 10;

/// Players a game can alternate over
const MAX_PLAYERS: usize = 2;

/// Counters that [`increment`] can bump
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Counter {
    Round,
    TurnRolls,
    TurnScore,
}

/// Per-turn fields that [`reset`] can zero
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resettable {
    TurnRolls,
    TurnScore,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Roll a single six-sided die
pub fn roll_die<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.gen_range(1..=6)
}

/// Roll two dice, recording the faces and counting the roll
pub fn roll<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> GameState {
    let d1 = roll_die(rng);
    let d2 = roll_die(rng);
    increment(state, Counter::TurnRolls, 1)
        .to_builder()
        .last_roll((d1, d2))
        .build()
}

/// Whether a roll just taken ends the turn
///
/// `state` must already count the roll. The first roll of a turn is safe;
/// any later roll showing a 1 fails.
pub fn failed(state: &GameState, d1: u8, d2: u8) -> bool {
    state.turn_rolls() > 1 && (d1 == 1 || d2 == 1)
}

pub fn start_round(state: &GameState, round: u32) -> GameState {
    state.to_builder().round(round).build()
}

/// Player indices in turn order: ascending on odd rounds, reversed on even
pub fn turn_order(num_players: usize, round: u32) -> Vec<usize> {
    if round % 2 == 1 {
        (0..num_players).collect()
    } else {
        (0..num_players).rev().collect()
    }
}

/// Hand the turn to `active` with fresh turn counters
pub fn start_turn(state: &GameState, active: usize) -> GameState {
    let cleared = reset(&reset(state, Resettable::TurnRolls), Resettable::TurnScore);
    cleared.to_builder().active(active).build()
}

pub fn increment(state: &GameState, counter: Counter, amount: u32) -> GameState {
    let builder = state.to_builder();
    match counter {
        Counter::Round => builder.round(state.round() + amount),
        Counter::TurnRolls => builder.turn_rolls(state.turn_rolls() + amount),
        Counter::TurnScore => builder.turn_score(state.turn_score() + amount),
    }
    .build()
}

pub fn reset(state: &GameState, field: Resettable) -> GameState {
    let builder = state.to_builder();
    match field {
        Resettable::TurnRolls => builder.turn_rolls(0),
        Resettable::TurnScore => builder.turn_score(0),
    }
    .build()
}

/// Bank the turn's points and rolls into the active player's totals
///
/// Turn counters are left as they are; [`start_turn`] clears them.
pub fn end_turn(state: &GameState, active: usize) -> GameState {
    let mut scores = state.scores();
    let mut rolls = state.rolls();
    scores[active] += state.turn_score();
    rolls[active] += state.turn_rolls();
    state.to_builder().scores(scores).rolls(rolls).build()
}

pub fn end_round(state: &GameState) -> GameState {
    state.clone()
}

/// Decide the winner by banked score; equal scores are a tie
pub fn select_winner(state: &GameState) -> GameState {
    let [first, second] = state.scores();
    let winner = match first.cmp(&second) {
        std::cmp::Ordering::Greater => Some(0),
        std::cmp::Ordering::Less => Some(1),
        std::cmp::Ordering::Equal => None,
    };
    state.to_builder().winner(winner).build()
}

// ============================================================================
// GAME LOOP
// ============================================================================

/// Play a full game of `rounds` rounds
///
/// One player is allowed (solo trials); more than two is a configuration
/// error raised before any event is published. Handler errors abort the game.
pub fn play_game<R: Rng + ?Sized>(
    players: &[&dyn Player],
    rounds: u32,
    bus: &EventBus,
    rng: &mut R,
) -> Result<GameState, GameError> {
    if players.is_empty() || players.len() > MAX_PLAYERS {
        return Err(GameError::PlayerCount {
            count: players.len(),
        });
    }

    let mut state = GameState::new();
    bus.publish(Event::GameStarted {
        state: &state,
        players,
    })?;

    for round in 1..=rounds {
        state = start_round(&state, round);
        bus.publish(Event::RoundStarted {
            state: &state,
            round,
        })?;

        for active in turn_order(players.len(), round) {
            let player = players[active];
            state = start_turn(&state, active);
            bus.publish(Event::TurnStarted {
                state: &state,
                player,
            })?;

            state = play_turn(state, player, bus, rng)?;

            state = end_turn(&state, active);
            bus.publish(Event::TurnEnded {
                state: &state,
                player,
            })?;
        }

        state = end_round(&state);
        bus.publish(Event::RoundEnded {
            state: &state,
            round,
            players,
        })?;
    }

    state = select_winner(&state);
    tracing::debug!(
        scores = ?state.scores(),
        winner = ?state.winner(),
        "game finished after {} rounds",
        state.round()
    );
    bus.publish(Event::GameEnded {
        state: &state,
        players,
    })?;

    Ok(state)
}

/// Roll until the player declines or a roll fails
fn play_turn<R: Rng + ?Sized>(
    mut state: GameState,
    player: &dyn Player,
    bus: &EventBus,
    rng: &mut R,
) -> Result<GameState, GameError> {
    while player.should_roll_again(&state) {
        state = roll(&state, rng);
        let (d1, d2) = state.last_roll();
        tracing::trace!(
            player = player.name(),
            turn_rolls = state.turn_rolls(),
            d1,
            d2,
            "rolled"
        );
        bus.publish(Event::Rolled {
            state: &state,
            d1,
            d2,
        })?;

        if failed(&state, d1, d2) {
            state = reset(&state, Resettable::TurnScore);
            bus.publish(Event::RollFailed {
                state: &state,
                d1,
                d2,
            })?;
            break;
        }

        state = increment(&state, Counter::TurnScore, u32::from(d1 + d2));
        bus.publish(Event::RollSucceeded {
            state: &state,
            d1,
            d2,
        })?;
    }
    Ok(state)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::event::Channel;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Mutex;

    /// Strategy with a fixed rule, for driving the engine in tests
    pub(crate) enum Scripted {
        /// Roll until failure
        Always,
        /// Never roll
        Never,
        /// Roll this many times per turn
        Rolls(u32),
    }

    impl Scripted {
        pub(crate) fn declines() -> Self {
            Scripted::Never
        }
    }

    impl Player for Scripted {
        fn name(&self) -> &str {
            match self {
                Scripted::Always => "always",
                Scripted::Never => "never",
                Scripted::Rolls(_) => "rolls",
            }
        }

        fn emblem(&self) -> String {
            "?".to_string()
        }

        fn victory_phrase(&self) -> String {
            "ok".to_string()
        }

        fn should_roll_again(&self, state: &GameState) -> bool {
            match self {
                Scripted::Always => true,
                Scripted::Never => false,
                Scripted::Rolls(n) => state.turn_rolls() < *n,
            }
        }
    }

    /// Remembers the active index of every state it is asked about
    struct Witness {
        seen: Mutex<Vec<usize>>,
    }

    impl Player for Witness {
        fn name(&self) -> &str {
            "witness"
        }

        fn emblem(&self) -> String {
            "W".to_string()
        }

        fn victory_phrase(&self) -> String {
            "seen it".to_string()
        }

        fn should_roll_again(&self, state: &GameState) -> bool {
            let mut seen = self.seen.lock().unwrap();
            seen.push(state.active());
            state.turn_rolls() < 1
        }
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn record(bus: &mut EventBus) -> Rc<RefCell<Vec<Channel>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        bus.subscribe_many(&Channel::ALL, move |event| {
            sink.borrow_mut().push(event.channel());
            Ok(())
        });
        log
    }

    // ------------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------------

    #[test]
    fn test_roll_die_stays_in_range() {
        let mut rng = rng();
        for _ in 0..100 {
            let face = roll_die(&mut rng);
            assert!((1..=6).contains(&face));
        }
    }

    #[test]
    fn test_roll_counts_and_records_faces() {
        let state = roll(&GameState::new(), &mut rng());
        let (d1, d2) = state.last_roll();
        assert_eq!(state.turn_rolls(), 1);
        assert!((1..=6).contains(&d1));
        assert!((1..=6).contains(&d2));
    }

    #[test]
    fn test_first_roll_never_fails() {
        let state = GameState::builder().turn_rolls(1).build();
        for d1 in 1..=6 {
            for d2 in 1..=6 {
                assert!(!failed(&state, d1, d2), "{d1}+{d2} failed on first roll");
            }
        }
    }

    #[test]
    fn test_later_roll_fails_iff_a_one_shows() {
        let state = GameState::builder().turn_rolls(2).build();
        for d1 in 1..=6 {
            for d2 in 1..=6 {
                assert_eq!(failed(&state, d1, d2), d1 == 1 || d2 == 1);
            }
        }
    }

    #[test]
    fn test_start_round_updates_round() {
        let state = start_round(&GameState::builder().round(2).build(), 3);
        assert_eq!(state.round(), 3);
    }

    #[test]
    fn test_start_turn_resets_turn_data() {
        let prior = GameState::builder()
            .turn_rolls(2)
            .turn_score(20)
            .active(1)
            .build();
        let state = start_turn(&prior, 0);
        assert_eq!(state.turn_rolls(), 0);
        assert_eq!(state.turn_score(), 0);
        assert_eq!(state.active(), 0);
    }

    #[test]
    fn test_increment_by_amount_leaves_other_fields() {
        let prior = GameState::builder()
            .turn_rolls(2)
            .turn_score(20)
            .round(2)
            .build();
        let state = increment(&prior, Counter::TurnScore, 10);
        assert_eq!(state.turn_score(), 30);
        assert_eq!(state.round(), 2);
        assert_eq!(state.turn_rolls(), 2);

        assert_eq!(increment(&prior, Counter::Round, 1).round(), 3);
    }

    #[test]
    fn test_reset_zeroes_only_named_field() {
        let prior = GameState::builder().turn_rolls(2).turn_score(20).build();
        let state = reset(&prior, Resettable::TurnScore);
        assert_eq!(state.turn_score(), 0);
        assert_eq!(state.turn_rolls(), 2);
    }

    #[test]
    fn test_end_turn_banks_turn_score_for_active() {
        let prior = GameState::builder()
            .scores([20, 30])
            .turn_score(15)
            .active(0)
            .build();
        let state = end_turn(&prior, 0);
        assert_eq!(state.scores(), [35, 30]);
    }

    #[test]
    fn test_end_turn_banks_rolls_for_active() {
        let prior = GameState::builder().rolls([10, 20]).turn_rolls(5).build();
        let state = end_turn(&prior, 1);
        assert_eq!(state.rolls(), [10, 25]);
    }

    #[test]
    #[should_panic]
    fn test_end_turn_rejects_unknown_seat() {
        let prior = GameState::builder().scores([20, 30]).turn_score(15).build();
        end_turn(&prior, 2);
    }

    #[test]
    fn test_turn_order_alternates_by_parity() {
        assert_eq!(turn_order(2, 1), vec![0, 1]);
        assert_eq!(turn_order(2, 2), vec![1, 0]);
        assert_eq!(turn_order(2, 7), vec![0, 1]);
        assert_eq!(turn_order(1, 2), vec![0]);
    }

    #[test]
    fn test_select_winner() {
        let p1 = select_winner(&GameState::builder().scores([30, 20]).build());
        assert_eq!(p1.winner(), Some(0));

        let p2 = select_winner(&GameState::builder().scores([20, 30]).build());
        assert_eq!(p2.winner(), Some(1));

        let tie = select_winner(&GameState::builder().scores([20, 20]).build());
        assert_eq!(tie.winner(), None);
        assert!(tie.is_tie());
    }

    // ------------------------------------------------------------------------
    // Game loop
    // ------------------------------------------------------------------------

    #[test]
    fn test_game_plays_exactly_requested_rounds() {
        let bus = EventBus::new();
        let (a, b) = (Scripted::Rolls(2), Scripted::Rolls(3));
        let players: [&dyn Player; 2] = [&a, &b];
        for rounds in 0..=12 {
            let state = play_game(&players, rounds, &bus, &mut rng()).unwrap();
            assert_eq!(state.round(), rounds);
        }
    }

    #[test]
    fn test_zero_round_game_is_unplayed_tie() {
        let mut bus = EventBus::new();
        let log = record(&mut bus);
        let (a, b) = (Scripted::Always, Scripted::Rolls(1));
        let state = play_game(&[&a, &b], 0, &bus, &mut rng()).unwrap();

        assert_eq!(state.round(), 0);
        assert_eq!(state.scores(), [0, 0]);
        assert_eq!(state.rolls(), [0, 0]);
        assert_eq!(state.winner(), None);
        assert_eq!(*log.borrow(), vec![Channel::GameStarted, Channel::GameEnded]);
    }

    #[test]
    fn test_player_count_is_checked_before_any_event() {
        let mut bus = EventBus::new();
        let log = record(&mut bus);
        let p = Scripted::Rolls(1);

        let err = play_game(&[&p, &p, &p], 1, &bus, &mut rng()).unwrap_err();
        assert!(matches!(err, GameError::PlayerCount { count: 3 }));
        let err = play_game(&[], 1, &bus, &mut rng()).unwrap_err();
        assert!(matches!(err, GameError::PlayerCount { count: 0 }));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_single_roll_turns_publish_in_order() {
        let mut bus = EventBus::new();
        let log = record(&mut bus);
        let (a, b) = (Scripted::Rolls(1), Scripted::Rolls(1));
        play_game(&[&a, &b], 1, &bus, &mut rng()).unwrap();

        let turn = [
            Channel::TurnStarted,
            Channel::Rolled,
            Channel::RollSucceeded,
            Channel::TurnEnded,
        ];
        let mut expected = vec![Channel::GameStarted, Channel::RoundStarted];
        expected.extend(turn);
        expected.extend(turn);
        expected.extend([Channel::RoundEnded, Channel::GameEnded]);
        assert_eq!(*log.borrow(), expected);
    }

    #[test]
    fn test_turns_alternate_across_rounds() {
        let mut bus = EventBus::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&order);
        bus.subscribe(Channel::TurnEnded, move |event| {
            if let Some(state) = event.game_state() {
                sink.borrow_mut().push(state.active());
            }
            Ok(())
        });

        let (a, b) = (Scripted::Rolls(1), Scripted::Rolls(2));
        play_game(&[&a, &b], 3, &bus, &mut rng()).unwrap();
        assert_eq!(*order.borrow(), vec![0, 1, 1, 0, 0, 1]);
    }

    #[test]
    fn test_successful_roll_adds_to_turn_score() {
        let mut bus = EventBus::new();
        let last = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&last);
        bus.subscribe(Channel::RollSucceeded, move |event| {
            if let Event::RollSucceeded { d1, d2, .. } = *event {
                *sink.borrow_mut() = Some(u32::from(d1 + d2));
            }
            Ok(())
        });

        let cautious = Scripted::Rolls(1);
        let state = play_game(&[&cautious], 1, &bus, &mut rng()).unwrap();
        assert_eq!(Some(state.turn_score()), *last.borrow());
        assert_eq!(state.scores()[0], state.turn_score());
        assert_eq!(state.rolls()[0], 1);
    }

    #[test]
    fn test_failed_roll_zeroes_turn_score_and_ends_turn() {
        let mut bus = EventBus::new();
        let log = record(&mut bus);
        let aggressive = Scripted::Always;
        let state = play_game(&[&aggressive], 1, &bus, &mut rng()).unwrap();

        let log = log.borrow();
        assert!(log.contains(&Channel::RollFailed));
        let failed_at = log.iter().position(|c| *c == Channel::RollFailed).unwrap();
        assert_eq!(log[failed_at + 1], Channel::TurnEnded);
        assert_eq!(state.turn_score(), 0);
        assert_eq!(state.scores(), [0, 0]);
        assert!(state.rolls()[0] >= 2);
    }

    #[test]
    fn test_cautious_beats_reckless_from_either_seat() {
        let bus = EventBus::new();
        let (cautious, reckless) = (Scripted::Rolls(1), Scripted::Always);

        let state = play_game(&[&cautious, &reckless], DEFAULT_ROUNDS, &bus, &mut rng()).unwrap();
        assert_eq!(state.winner(), Some(0));

        let state = play_game(&[&reckless, &cautious], DEFAULT_ROUNDS, &bus, &mut rng()).unwrap();
        assert_eq!(state.winner(), Some(1));
    }

    #[test]
    fn test_symmetric_decliners_tie() {
        let bus = EventBus::new();
        let (a, b) = (Scripted::Never, Scripted::Never);
        let state = play_game(&[&a, &b], DEFAULT_ROUNDS, &bus, &mut rng()).unwrap();
        assert_eq!(state.winner(), None);
        assert_eq!(state.scores(), [0, 0]);
        assert_eq!(state.rolls(), [0, 0]);
    }

    #[test]
    fn test_strategy_sees_its_own_seat() {
        let bus = EventBus::new();
        let first = Witness { seen: Mutex::new(Vec::new()) };
        let second = Witness { seen: Mutex::new(Vec::new()) };
        play_game(&[&first, &second], 4, &bus, &mut rng()).unwrap();

        let first_seen = first.seen.lock().unwrap();
        let second_seen = second.seen.lock().unwrap();
        assert!(!first_seen.is_empty());
        assert!(first_seen.iter().all(|&a| a == 0));
        assert!(second_seen.iter().all(|&a| a == 1));
    }

    #[test]
    fn test_handler_error_aborts_game() {
        let mut bus = EventBus::new();
        bus.subscribe(Channel::Rolled, |_| anyhow::bail!("display unplugged"));
        let (a, b) = (Scripted::Rolls(1), Scripted::Rolls(1));

        let err = play_game(&[&a, &b], 3, &bus, &mut rng()).unwrap_err();
        match err {
            GameError::Bus(bus_err) => assert_eq!(bus_err.channel(), Channel::Rolled),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_same_seed_same_game() {
        let bus = EventBus::new();
        let (a, b) = (Scripted::Rolls(3), Scripted::Rolls(4));
        let first = play_game(&[&a, &b], DEFAULT_ROUNDS, &bus, &mut ChaCha8Rng::seed_from_u64(7)).unwrap();
        let second = play_game(&[&a, &b], DEFAULT_ROUNDS, &bus, &mut ChaCha8Rng::seed_from_u64(7)).unwrap();
        assert_eq!(first, second);
    }
}

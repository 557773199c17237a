//! Match engine integration tests.
//!
//! These tests drive full games through `MemoryGame` the way a host does:
//! reveal input followed by per-frame ticks.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use quantum_tiles::cards::{CardFace, CardId};
use quantum_tiles::core::{BoardConfig, EngineConfig, GameConfig, GameStats};
use quantum_tiles::engine::{EnginePhase, PairOutcome};
use quantum_tiles::events::GameEvent;
use quantum_tiles::game::MemoryGame;

const MEMORIZE: Duration = Duration::from_secs(3);
const REENABLE: Duration = Duration::from_secs(2);
const FRAME: Duration = Duration::from_millis(16);

fn new_game(seed: u64, rows: u32, columns: u32) -> MemoryGame {
    let mut game = MemoryGame::new(GameConfig::default().with_seed(seed));
    game.arrange(rows, columns).unwrap();
    game
}

fn id_at(game: &MemoryGame, slot: usize) -> CardId {
    game.board().cards()[slot].id()
}

fn face_at(game: &MemoryGame, slot: usize) -> CardFace {
    game.board().cards()[slot].face()
}

/// Slot of the other card sharing the id in `slot`.
fn partner(game: &MemoryGame, slot: usize) -> usize {
    let id = id_at(game, slot);
    (0..game.board().len())
        .find(|&i| i != slot && id_at(game, i) == id)
        .unwrap()
}

/// Collects every event kind emitted.
fn record(game: &mut MemoryGame) -> Rc<RefCell<Vec<GameEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    game.events_mut().subscribe(move |e| sink.borrow_mut().push(e.clone()));
    log
}

/// Tick in frame-sized steps until the engine is idle again.
fn run_until_idle(game: &mut MemoryGame) {
    for _ in 0..10_000 {
        if !game.engine().is_resolving() {
            return;
        }
        game.tick(FRAME).unwrap();
    }
    panic!("engine never returned to idle");
}

// =============================================================================
// Reveal gating
// =============================================================================

/// Revealing a face-up card again changes nothing.
#[test]
fn test_reveal_face_up_card_is_noop() {
    let mut game = new_game(1, 2, 4);
    assert!(game.reveal_slot(0));
    let before = game.state();

    assert!(!game.reveal_slot(0));
    assert_eq!(game.state(), before);
    assert_eq!(game.engine().revealed().len(), 1);
}

/// Revealing a matched card changes nothing.
#[test]
fn test_reveal_matched_card_is_noop() {
    let mut game = new_game(2, 2, 4);
    let other = partner(&game, 0);
    game.reveal_slot(0);
    game.reveal_slot(other);
    run_until_idle(&mut game);
    assert_eq!(face_at(&game, 0), CardFace::Matched);

    let before = game.state();
    assert!(!game.reveal_slot(0));
    assert!(!game.reveal_slot(other));
    assert_eq!(game.state(), before);
    assert!(game.engine().revealed().is_empty());
}

/// While a pair resolves, every reveal is refused until the cooldown ends.
#[test]
fn test_reveals_refused_until_reenabled() {
    let mut game = new_game(3, 4, 4);
    game.reveal_slot(0);
    game.reveal_slot(1);

    let mut elapsed = Duration::ZERO;
    while elapsed < MEMORIZE + REENABLE - FRAME {
        assert!(!game.reveal_slot(2), "accepted at {:?}", elapsed);
        assert_eq!(face_at(&game, 2), CardFace::FaceDown);
        game.tick(FRAME).unwrap();
        elapsed += FRAME;
    }
    run_until_idle(&mut game);
    assert!(game.reveal_slot(2));
}

/// Handles from a previous deal are ignored.
#[test]
fn test_stale_handle_after_rearrange() {
    let mut game = new_game(4, 2, 2);
    let old = game.board().slot(0).unwrap();
    game.arrange(2, 2).unwrap();

    assert!(!game.reveal(old));
    assert!(game.engine().revealed().is_empty());
    assert!(game.board().cards().iter().all(|c| c.is_face_down()));
}

// =============================================================================
// Resolution
// =============================================================================

/// A matching pair scores and counts after the memorize delay.
#[test]
fn test_matching_pair() {
    let mut game = new_game(5, 2, 4);
    let other = partner(&game, 0);
    game.reveal_slot(0);
    game.reveal_slot(other);

    let outcome = game.tick(MEMORIZE).unwrap();
    assert_eq!(outcome.resolved, Some(PairOutcome::Matched(id_at(&game, 0))));
    assert_eq!(face_at(&game, 0), CardFace::Matched);
    assert_eq!(face_at(&game, other), CardFace::Matched);

    let stats = game.stats();
    assert_eq!(stats.current_matches, 1);
    assert_eq!(stats.combo, 1);
    assert_eq!(stats.score, 10);
    assert_eq!(stats.attempts, 1);
}

/// A mismatch flips both back and resets the combo, leaving score alone.
#[test]
fn test_mismatched_pair() {
    let mut game = new_game(6, 2, 4);
    let first = partner(&game, 0);
    game.reveal_slot(0);
    game.reveal_slot(first);
    run_until_idle(&mut game);
    let before = game.stats();

    let a = (1..8).find(|&i| face_at(&game, i) == CardFace::FaceDown).unwrap();
    let b = (0..8)
        .find(|&i| face_at(&game, i) == CardFace::FaceDown && id_at(&game, i) != id_at(&game, a))
        .unwrap();
    game.reveal_slot(a);
    game.reveal_slot(b);
    let outcome = game.tick(MEMORIZE).unwrap();

    assert_eq!(outcome.resolved, Some(PairOutcome::Mismatched));
    assert_eq!(face_at(&game, a), CardFace::FaceDown);
    assert_eq!(face_at(&game, b), CardFace::FaceDown);
    let stats = game.stats();
    assert_eq!(stats.combo, 0);
    assert_eq!(stats.attempts, before.attempts + 1);
    assert_eq!(stats.score, before.score);
    assert_eq!(stats.current_matches, before.current_matches);
}

/// The 2x2 walkthrough: flip (0,0) and (0,1), then resolve.
#[test]
fn test_two_by_two_walkthrough() {
    for seed in 0..32 {
        let mut game = new_game(seed, 2, 2);
        assert_eq!(game.stats(), GameStats::new(2));
        let ids: Vec<u32> = game.board().cards().iter().map(|c| c.id().raw()).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 0, 1, 1]);

        let log = record(&mut game);
        assert!(game.reveal_at(0, 0));
        assert!(game.reveal_at(0, 1));
        game.tick(MEMORIZE).unwrap();

        let stats = game.stats();
        assert_eq!(stats.attempts, 1);
        if ids[0] == ids[1] {
            assert_eq!(stats.current_matches, 1);
            assert_eq!(stats.combo, 1);
            assert_eq!(face_at(&game, 0), CardFace::Matched);
            assert_eq!(face_at(&game, 1), CardFace::Matched);

            // The remaining pair finishes the game.
            game.tick(REENABLE).unwrap();
            game.reveal_at(1, 0);
            game.reveal_at(1, 1);
            game.tick(MEMORIZE).unwrap();
            assert!(game.stats().is_complete());
            let overs = log
                .borrow()
                .iter()
                .filter(|e| matches!(e, GameEvent::GameOver(_)))
                .count();
            assert_eq!(overs, 1);
        } else {
            assert_eq!(stats.current_matches, 0);
            assert_eq!(stats.combo, 0);
            assert_eq!(face_at(&game, 0), CardFace::FaceDown);
            assert_eq!(face_at(&game, 1), CardFace::FaceDown);
        }
    }
}

/// Clearing a board in order fires game over exactly once.
#[test]
fn test_game_over_once_per_game() {
    let mut game = new_game(7, 4, 4);
    let log = record(&mut game);

    while !game.stats().is_complete() {
        let a = (0..16).find(|&i| face_at(&game, i) == CardFace::FaceDown).unwrap();
        let b = partner(&game, a);
        assert!(game.reveal_slot(a));
        assert!(game.reveal_slot(b));
        run_until_idle(&mut game);
    }
    for _ in 0..100 {
        game.tick(FRAME).unwrap();
    }

    let events = log.borrow();
    let overs: Vec<&GameEvent> = events
        .iter()
        .filter(|e| matches!(e, GameEvent::GameOver(_)))
        .collect();
    assert_eq!(overs.len(), 1);
    assert_eq!(overs[0].stats().unwrap().score, (1..=8).map(|c| 10 * c).sum::<u32>());
    drop(events);

    // A new deal is a new game.
    game.restart().unwrap();
    assert!(!game.engine().is_game_over());
    assert_eq!(game.engine().phase(), EnginePhase::Idle);
}

/// Event order for one pair, with the queue drained by the host.
#[test]
fn test_queued_events_in_order() {
    let mut game = MemoryGame::new(GameConfig::default().with_seed(8));
    let log = record(&mut game);
    game.events_mut().enable_queue();
    game.arrange(2, 2).unwrap();

    let other = partner(&game, 0);
    game.reveal_slot(0);
    game.reveal_slot(other);
    run_until_idle(&mut game);

    let kinds: Vec<&str> = game.events_mut().drain().iter().map(GameEvent::kind).collect();
    assert_eq!(
        kinds,
        vec!["board_arranged", "flipped", "flipped", "matched", "stats_updated"]
    );
    assert!(game.events_mut().drain().is_empty());

    // The listener registered before the queue was turned on still hears everything.
    assert_eq!(log.borrow().len(), 5);
}

/// Custom delays and scoring flow through the configuration.
#[test]
fn test_custom_engine_config() {
    let mut engine = EngineConfig::default().with_delays(Duration::from_millis(500), Duration::ZERO);
    engine.points_per_combo = 25;
    let mut game = MemoryGame::new(GameConfig::default().with_seed(9).with_engine(engine));
    game.arrange(2, 2).unwrap();

    let other = partner(&game, 0);
    game.reveal_slot(0);
    game.reveal_slot(other);
    assert!(game.tick(Duration::from_millis(499)).unwrap().resolved.is_none());
    assert!(game.tick(Duration::from_millis(1)).unwrap().resolved.is_some());
    assert!(game.tick(Duration::ZERO).unwrap().reenabled);
    assert_eq!(game.stats().score, 25);
}

/// Play time runs while a game is in progress.
#[test]
fn test_play_time_accumulates() {
    let mut game = new_game(10, 2, 2);
    for _ in 0..60 {
        game.tick(FRAME).unwrap();
    }
    assert_eq!(game.play_time(), FRAME * 60);
    assert_eq!(game.state().board, Some(BoardConfig::new(2, 2)));
}

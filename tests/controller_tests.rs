//! Turn controller integration tests.
//!
//! These tests drive whole rounds and matches through `Game::drop_disc`,
//! covering phase transitions, scoring and the reentrancy guard.

use futures::executor::block_on;
use futures::future::{self, BoxFuture, FutureExt};

use connect_mods::{
    Board, DropOutcome, DropReport, FeaturePlacement, Game, GameConfig, ModKind, MoveError,
    NullBridge, Phase, Player, Position, PresentationBridge, PresentationEvent, RecordingBridge,
    RoundSave, COLS,
};

fn play(game: &mut Game, col: usize) -> Result<DropReport, MoveError> {
    block_on(game.drop_disc(col, &mut NullBridge))
}

/// Bridge whose animations never finish.
struct StuckBridge;

impl PresentationBridge for StuckBridge {
    fn present(&mut self, _event: PresentationEvent) -> BoxFuture<'_, ()> {
        future::pending().boxed()
    }
}

/// Test the horizontal win: One plays 0-3 while Two stacks column 8.
#[test]
fn test_horizontal_win_on_bottom_row() {
    let mut game = Game::new(GameConfig::default(), &[]).unwrap();

    for col in [0, 8, 1, 8, 2, 8] {
        let report = play(&mut game, col).unwrap();
        assert!(matches!(report.outcome, DropOutcome::Continue(_)));
    }
    let report = play(&mut game, 3).unwrap();

    let DropOutcome::Won {
        winner,
        cells,
        points,
        champion,
    } = report.outcome
    else {
        panic!("expected a win, got {:?}", report.outcome);
    };
    assert_eq!(winner, Player::One);
    assert_eq!(
        cells,
        vec![
            Position::new(5, 0),
            Position::new(5, 1),
            Position::new(5, 2),
            Position::new(5, 3)
        ]
    );
    assert_eq!(points, 30);
    assert!(!champion);
    assert_eq!(game.phase(), Phase::RoundWon(Player::One));
    assert_eq!(game.winning_cells(), cells.as_slice());
    assert_eq!(game.match_state().round_wins[Player::One], 1);
}

/// Test that the bridge sees each drop.
#[test]
fn test_bridge_receives_drops() {
    let mut game = Game::new(GameConfig::default(), &[]).unwrap();
    let mut bridge = RecordingBridge::new();

    block_on(game.drop_disc(4, &mut bridge)).unwrap();
    block_on(game.drop_disc(4, &mut bridge)).unwrap();

    assert_eq!(
        bridge.events(),
        &[
            PresentationEvent::DiscPlaced {
                pos: Position::new(5, 4),
                player: Player::One
            },
            PresentationEvent::DiscPlaced {
                pos: Position::new(4, 4),
                player: Player::Two
            },
        ]
    );
}

/// Test that an abandoned drop leaves the round busy until reset.
#[test]
fn test_abandoned_drop_blocks_until_reset() {
    let mut game = Game::new(GameConfig::default(), &[]).unwrap();
    let mut stuck = StuckBridge;

    let pending = game.drop_disc(2, &mut stuck).now_or_never();
    assert!(pending.is_none());

    assert_eq!(game.phase(), Phase::Resolving);
    assert_eq!(game.board().occupied_count(), 1);
    assert_eq!(play(&mut game, 3).unwrap_err(), MoveError::Busy);
    assert_eq!(game.board().occupied_count(), 1);

    game.reset_round().unwrap();
    assert_eq!(game.phase(), Phase::AwaitingMove);
    assert_eq!(game.board().occupied_count(), 0);
    assert!(play(&mut game, 3).is_ok());
}

/// Test that resetting a round leaves the same player to move.
#[test]
fn test_reset_keeps_player_to_move() {
    let mut game = Game::new(GameConfig::default(), &[]).unwrap();
    play(&mut game, 4).unwrap();
    assert_eq!(game.current_player(), Player::Two);

    game.reset_round().unwrap();

    assert_eq!(game.board().occupied_count(), 0);
    assert_eq!(game.current_player(), Player::Two);
    let report = play(&mut game, 4).unwrap();
    assert_eq!(report.player, Player::Two);
}

/// Test that a busy round can also be abandoned via continue.
#[test]
fn test_continue_recovers_busy_round() {
    let mut game = Game::new(GameConfig::default(), &[]).unwrap();
    assert!(game.drop_disc(2, &mut StuckBridge).now_or_never().is_none());

    game.continue_round().unwrap();
    assert_eq!(game.phase(), Phase::AwaitingMove);
    assert_eq!(game.round_number(), 2);
}

/// Test playing a full match to the championship score.
#[test]
fn test_match_to_championship() {
    let config = GameConfig::default().with_championship_score(120);
    let mut game = Game::new(config, &[]).unwrap();

    for round in 1..=4 {
        assert_eq!(game.round_number(), round);
        // Whoever opens plays 0-3; the other stacks column 8.
        let opener = game.current_player();
        for col in [0, 8, 1, 8, 2, 8, 3] {
            play(&mut game, col).unwrap();
        }
        assert_eq!(game.score(opener), 30 * round);

        if round < 4 {
            assert_eq!(game.phase(), Phase::RoundWon(opener));
            game.continue_round().unwrap();
            // The winner made the last drop and opens again.
            assert_eq!(game.current_player(), opener);
        }
    }

    assert_eq!(game.phase(), Phase::MatchOver(Player::One));
    assert_eq!(game.match_state().champion(), Some(Player::One));
    assert_eq!(play(&mut game, 0).unwrap_err(), MoveError::MatchOver);
}

/// Test that a finished match cannot be revived by restoring a round.
#[test]
fn test_restore_refused_after_match_over() {
    let config = GameConfig::default().with_championship_score(30);
    let mut game = Game::new(config, &[]).unwrap();
    for col in [0, 8, 1, 8, 2, 8, 3] {
        play(&mut game, col).unwrap();
    }
    assert_eq!(game.phase(), Phase::MatchOver(Player::One));

    let restored = game.restore_round(Board::new(), FeaturePlacement::new(), Player::Two);
    assert_eq!(restored, Err(MoveError::MatchOver));
    let save = game.save_round();
    assert_eq!(game.resume_round(save), Err(MoveError::MatchOver));

    assert_eq!(game.phase(), Phase::MatchOver(Player::One));
    assert_eq!(game.score(Player::Two), 0);
    assert_eq!(game.match_state().champion(), Some(Player::One));
    assert_eq!(play(&mut game, 0).unwrap_err(), MoveError::MatchOver);
}

/// Test that a board filled without a line is a draw.
#[test]
fn test_full_board_draw() {
    let mut game = Game::new(GameConfig::default(), &[]).unwrap();

    let mut last = None;
    for col in draw_order() {
        last = Some(play(&mut game, col).unwrap());
    }

    let last = last.unwrap();
    assert_eq!(last.outcome, DropOutcome::Drawn);
    assert_eq!(game.phase(), Phase::RoundDrawn);
    assert_eq!(game.match_state().draws, 1);
    assert_eq!(game.board().move_count(), (COLS * 6) as u32);
    assert_eq!(game.board().occupied_count(), COLS * 6);
}

/// Drop order that fills the board without a line.
///
/// Each column pair is filled together, swapping which column goes first
/// every two rows; the last column alternates on its own.
fn draw_order() -> Vec<usize> {
    let mut order = Vec::new();
    for pair in [(0, 1), (2, 3), (4, 5), (6, 7)] {
        for row in 0..6 {
            if (row / 2) % 2 == 0 {
                order.extend([pair.0, pair.1]);
            } else {
                order.extend([pair.1, pair.0]);
            }
        }
    }
    order.extend([8; 6]);
    order
}

/// Test that the same seed replays the same match.
#[test]
fn test_seeded_matches_are_reproducible() {
    let config = GameConfig::default().with_seed(2024);
    let drops = [4, 3, 4, 5, 2, 6, 4, 1, 0, 7, 8, 4, 3, 3, 5, 2, 6, 6, 1, 0];

    let run = || {
        let mut game = Game::new(config.clone(), &[ModKind::Bombs, ModKind::Alien]).unwrap();
        let mut bridge = RecordingBridge::new();
        for col in drops {
            if game.phase().is_round_over() {
                break;
            }
            let col = if game.board().is_column_full(col) {
                game.board().legal_columns().next().unwrap()
            } else {
                col
            };
            block_on(game.drop_disc(col, &mut bridge)).unwrap();
        }
        (game.board().clone(), bridge.take(), game.placement().clone())
    };

    assert_eq!(run(), run());
}

/// Drops `cols` until the round ends, redirecting full columns.
fn play_on(game: &mut Game, cols: &[usize]) -> Vec<DropReport> {
    let mut reports = Vec::new();
    for &col in cols {
        if game.phase().is_round_over() {
            break;
        }
        let col = if game.board().is_column_full(col) {
            game.board().legal_columns().next().unwrap()
        } else {
            col
        };
        reports.push(play(game, col).unwrap());
    }
    reports
}

/// Test that a saved round resumes with the same mod rolls in another game.
#[test]
fn test_resumed_round_replays_identically() {
    let mods = [ModKind::Bombs, ModKind::Alien];
    let mut original = Game::new(GameConfig::default().with_seed(77), &mods).unwrap();
    play_on(&mut original, &[4, 3, 4, 5, 2, 6]);
    assert!(!original.phase().is_round_over());

    let save = original.save_round();
    let bytes = bincode::serialize(&save).unwrap();
    let save: RoundSave = bincode::deserialize(&bytes).unwrap();

    let mut resumed = Game::new(GameConfig::default().with_seed(5), &mods).unwrap();
    resumed.resume_round(save).unwrap();
    assert_eq!(resumed.board(), original.board());
    assert_eq!(resumed.current_player(), original.current_player());

    let rest = [4, 1, 0, 7, 8, 4, 3, 3, 5, 2, 6, 6, 1, 0, 8, 7, 5, 2, 1, 0];
    let expected = play_on(&mut original, &rest);
    let replayed = play_on(&mut resumed, &rest);

    assert!(!expected.is_empty());
    assert_eq!(replayed, expected);
    assert_eq!(resumed.board(), original.board());
    assert_eq!(resumed.placement(), original.placement());
    assert_eq!(resumed.phase(), original.phase());
}

/// Test that mod selection is validated.
#[test]
fn test_mod_selection_limits() {
    assert!(Game::new(GameConfig::default(), &ModKind::ALL).is_err());
    assert!(Game::new(GameConfig::default(), &[ModKind::Jackpot, ModKind::Jackpot]).is_err());

    let game = Game::new(GameConfig::default(), &[ModKind::Alien, ModKind::Bombs]).unwrap();
    assert_eq!(game.active_mods(), vec![ModKind::Alien, ModKind::Bombs]);
}

//! Board model integration tests.
//!
//! These tests exercise the grid, the per-player index, the win scanner and
//! snapshots together through the public API.

use connect_mods::{
    Axis, Board, BoardError, BoardSnapshot, Cell, GameRng, Player, Position, WinScanner, COLS,
    ROWS,
};

fn p(row: usize, col: usize) -> Position {
    Position::new(row, col)
}

fn sorted_cells(board: &Board, player: Player) -> Vec<Position> {
    board.index().cells(player).sorted()
}

/// Test that the index follows every primitive.
#[test]
fn test_index_tracks_mixed_operations() {
    let mut board = Board::new();
    let mut rng = GameRng::new(17);

    for col in [0, 0, 0, 1, 1, 4] {
        board.place(col, Player::One).unwrap();
    }
    board.place(0, Player::Two).unwrap();

    board.clear(p(4, 0));
    board.clear(p(5, 1));
    board.apply_gravity(0);
    board.apply_gravity(1);
    let landed = board.relocate(Player::Two, &mut rng).unwrap();

    assert!(board.check_invariants().is_ok());
    assert_eq!(board.get(landed), Cell::Disc(Player::Two));
    assert_eq!(sorted_cells(&board, Player::Two).len(), 2);
    assert_eq!(sorted_cells(&board, Player::One).len(), 4);
    assert_eq!(board.occupied_count(), 6);
}

/// Test that a column cannot take a seventh disc.
#[test]
fn test_column_capacity() {
    let mut board = Board::new();
    for i in 0..ROWS {
        let player = if i % 2 == 0 { Player::One } else { Player::Two };
        assert_eq!(board.place(6, player), Ok(ROWS - 1 - i));
    }
    assert_eq!(board.place(6, Player::One), Err(BoardError::ColumnFull(6)));
    assert_eq!(board.legal_columns().count(), COLS - 1);
}

/// Test that the full-board scan finds a line the drop site knows nothing
/// about.
#[test]
fn test_scan_finds_remote_line() {
    let mut board = Board::new();
    for (col, fillers) in [(5, 0), (6, 1), (7, 2), (8, 3)] {
        for _ in 0..fillers {
            board.place(col, Player::One).unwrap();
        }
        board.place(col, Player::Two).unwrap();
    }
    board.place(0, Player::One).unwrap();

    assert!(WinScanner::scan_from_point(&board, p(5, 0)).is_none());
    let run = WinScanner::scan_full_board(&board).unwrap();
    assert_eq!(run.player, Player::Two);
    assert_eq!(run.axis, Axis::DiagonalDownLeft);
    assert_eq!(run.cells.as_slice(), &[p(2, 8), p(3, 7), p(4, 6), p(5, 5)]);
}

/// Test that snapshots rebuild the same per-player cells.
#[test]
fn test_snapshot_rebuilds_index() {
    let mut board = Board::new();
    let mut rng = GameRng::new(3);
    for col in [2, 2, 3, 7, 7, 7, 0] {
        board.place(col, Player::One).unwrap();
        board.place((col + 4) % COLS, Player::Two).unwrap();
    }
    board.clear(p(5, 2));
    board.apply_gravity(2);
    board.relocate(Player::One, &mut rng).unwrap();

    let restored = Board::try_from(board.snapshot()).unwrap();

    assert_eq!(restored, board);
    for player in Player::ALL {
        assert_eq!(sorted_cells(&restored, player), sorted_cells(&board, player));
    }
    assert_eq!(restored.occupancy(), board.occupancy());
}

/// Test that boards serialize as a grid of markers.
#[test]
fn test_board_serde_as_grid() {
    let mut board = Board::new();
    board.place(1, Player::Two).unwrap();

    let json = serde_json::to_value(&board).unwrap();
    assert_eq!(json["move_count"], 1);
    assert_eq!(json["grid"][ROWS - 1][1], 2);

    let back: Board = serde_json::from_value(json).unwrap();
    assert_eq!(back, board);

    let snapshot: BoardSnapshot = board.snapshot();
    let bytes = snapshot.to_bytes().unwrap();
    assert_eq!(BoardSnapshot::from_bytes(&bytes).unwrap(), snapshot);
}

/// Test that deserialization rejects floating discs.
#[test]
fn test_board_serde_rejects_gaps() {
    let mut grid = vec![vec![0u8; COLS]; ROWS];
    grid[0][0] = 1;
    let json = serde_json::json!({ "grid": grid, "move_count": 1 });

    assert!(serde_json::from_value::<Board>(json).is_err());
}

/// Test relocation on an almost full board.
#[test]
fn test_relocation_finds_last_column() {
    let mut board = Board::new();
    for col in 0..COLS {
        let depth = if col == 3 { ROWS - 1 } else { ROWS };
        for row in 0..depth {
            let player = if (row + col) % 2 == 0 { Player::One } else { Player::Two };
            board.place(col, player).unwrap();
        }
    }

    let mut rng = GameRng::new(99);
    assert_eq!(board.relocate(Player::Two, &mut rng), Ok(p(0, 3)));
    assert!(board.is_full());
    assert_eq!(board.relocate(Player::Two, &mut rng), Err(BoardError::NoSpace));
}

//! Error types for board operations, drops, configuration and snapshots.

use std::path::PathBuf;

use crate::mods::ModKind;

/// Errors raised by board primitives.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("no column has room for a relocated disc")]
    NoSpace,

    #[error("cell ({row}, {col}) is outside the grid")]
    InvalidCell { row: usize, col: usize },
}

/// Reasons a drop request is rejected. None of them change state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("column {0} does not exist")]
    InvalidColumn(usize),

    #[error("a drop is still resolving")]
    Busy,

    #[error("the round is over")]
    RoundOver,

    #[error("the round is still in progress")]
    RoundInProgress,

    #[error("the match is over")]
    MatchOver,
}

/// Errors that can occur when building or loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("at most 2 mods may be active, got {0}")]
    TooManyMods(usize),

    #[error("mod {0} selected twice")]
    DuplicateMod(ModKind),

    #[error("config validation error: {0}")]
    Validation(String),

    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Errors raised while decoding a board snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot must be {expected_rows}x{expected_cols}, got {rows} rows")]
    Dimensions {
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
    },

    #[error("row {row} has {cols} cells")]
    RowWidth { row: usize, cols: usize },

    #[error("invalid cell value {0}")]
    InvalidCellValue(u8),

    #[error("disc at ({row}, {col}) is floating above an empty cell")]
    FloatingDisc { row: usize, col: usize },

    #[error("binary encoding failed: {0}")]
    Binary(#[from] bincode::Error),
}

//! Turn and round controller.
//!
//! `Game` owns the board, the active mods and the match score, and turns a
//! column choice into a fully resolved outcome:
//!
//! 1. validate the drop (phase, column range, room)
//! 2. place the disc and present it
//! 3. run every mod's after-drop hook in order, presenting each effect
//! 4. scan the whole board for winning lines
//! 5. score a win, record a draw, or pass the turn
//!
//! ## Reentrancy
//!
//! `drop_disc` takes `&mut self`, so two drops can never overlap. The
//! `Resolving` phase covers the remaining case: a drop future dropped while
//! awaiting the bridge leaves the round `Resolving`, and further drops fail
//! with `MoveError::Busy` until the round is reset or a new one starts.

use tracing::{debug, info};

use super::scoring::round_points;
use super::state::{MatchState, MoveRecord, Phase, RoundSave, RoundState};
use crate::board::{Board, WinScanner, WinningRun};
use crate::core::{BoardError, ConfigError, GameConfig, GameRng, MoveError, Player, Position, COLS};
use crate::effects::EffectReport;
use crate::mods::{FeaturePlacement, ModKind, ModRegistry};
use crate::presentation::PresentationBridge;

/// How a drop left the round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    /// No line and room left; the given player moves next.
    Continue(Player),
    /// One player owns a line.
    Won {
        winner: Player,
        cells: Vec<Position>,
        points: u32,
        champion: bool,
    },
    /// Full board without a line, or lines for both players.
    Drawn,
}

/// Everything a resolved drop did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropReport {
    pub player: Player,
    pub landed: Position,
    pub effects: Vec<EffectReport>,
    pub outcome: DropOutcome,
}

/// A match in progress.
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    rng: GameRng,
    mods: ModRegistry,
    round: RoundState,
    score: MatchState,
}

impl Game {
    /// Start a match with the given mods (at most two, no repeats).
    pub fn new(config: GameConfig, mods: &[ModKind]) -> Result<Self, ConfigError> {
        config.validate()?;
        let registry = ModRegistry::new(mods, &config)?;

        let mut game = Self {
            rng: GameRng::new(config.seed),
            mods: registry,
            round: RoundState::new(Player::One),
            score: MatchState::new(config.championship_score),
            config,
        };
        game.start_match();
        Ok(game)
    }

    /// Drop the current player's disc into `col` and resolve everything it
    /// sets off.
    ///
    /// Rejected drops change nothing.
    pub async fn drop_disc<B>(&mut self, col: usize, bridge: &mut B) -> Result<DropReport, MoveError>
    where
        B: PresentationBridge + ?Sized,
    {
        match self.round.phase {
            Phase::AwaitingMove => {}
            Phase::Resolving => return Err(MoveError::Busy),
            Phase::MatchOver(_) => return Err(MoveError::MatchOver),
            Phase::RoundWon(_) | Phase::RoundDrawn => return Err(MoveError::RoundOver),
        }
        if col >= COLS {
            return Err(MoveError::InvalidColumn(col));
        }

        let player = self.round.current_player;
        let row = self.round.board.place(col, player).map_err(|err| match err {
            BoardError::ColumnFull(col) => MoveError::ColumnFull(col),
            BoardError::NoSpace | BoardError::InvalidCell { .. } => MoveError::InvalidColumn(col),
        })?;
        let landed = Position::new(row, col);
        self.round.phase = Phase::Resolving;
        debug!(%player, col, row, "disc dropped");

        bridge.disc_placed(landed, player).await;
        let effects = self
            .mods
            .run_after_drop(&mut self.round.board, landed, player, bridge)
            .await;

        self.round.history.push_back(MoveRecord {
            player,
            col,
            landed,
            triggered: effects.iter().map(|report| report.kind).collect(),
        });

        let outcome = self.settle_round(player);
        Ok(DropReport {
            player,
            landed,
            effects,
            outcome,
        })
    }

    /// Scan the resolved board and move to the next phase.
    fn settle_round(&mut self, dropper: Player) -> DropOutcome {
        let winners = WinScanner::scan_all_winners(&self.round.board);
        let runs: Vec<&WinningRun> = winners.iter().filter_map(|(_, run)| run.as_ref()).collect();

        match runs.as_slice() {
            [] if WinScanner::is_draw(&self.round.board, false) => {
                self.round.phase = Phase::RoundDrawn;
                self.score.draws += 1;
                info!(round = self.score.round_number, "round drawn, board full");
                DropOutcome::Drawn
            }
            [] => {
                let next = dropper.other();
                self.round.current_player = next;
                self.round.phase = Phase::AwaitingMove;
                DropOutcome::Continue(next)
            }
            [run] => {
                let winner = run.player;
                let cells = run.cells.to_vec();
                let points = round_points(self.round.move_count(), &self.config);
                let champion = self.score.award(winner, points);

                self.round.winning_cells.clone_from(&cells);
                self.round.phase = if champion {
                    Phase::MatchOver(winner)
                } else {
                    Phase::RoundWon(winner)
                };
                info!(
                    round = self.score.round_number,
                    %winner,
                    %dropper,
                    points,
                    score = self.score.scores[winner],
                    champion,
                    "round won"
                );
                DropOutcome::Won {
                    winner,
                    cells,
                    points,
                    champion,
                }
            }
            both => {
                let mut cells: Vec<Position> =
                    both.iter().flat_map(|run| run.cells.iter().copied()).collect();
                cells.sort_unstable();
                cells.dedup();

                self.round.winning_cells = cells;
                self.round.phase = Phase::RoundDrawn;
                self.score.draws += 1;
                info!(round = self.score.round_number, "round drawn, both players completed a line");
                DropOutcome::Drawn
            }
        }
    }

    /// Start the next round after a win or draw.
    ///
    /// The player who made the last drop opens it. Also recovers a round left
    /// `Resolving` by an abandoned drop.
    pub fn continue_round(&mut self) -> Result<(), MoveError> {
        match self.round.phase {
            Phase::AwaitingMove => Err(MoveError::RoundInProgress),
            Phase::MatchOver(_) => Err(MoveError::MatchOver),
            Phase::Resolving | Phase::RoundWon(_) | Phase::RoundDrawn => {
                let opener = self
                    .round
                    .history
                    .last()
                    .map_or(self.round.current_player, |record| record.player);
                self.start_round(opener);
                Ok(())
            }
        }
    }

    /// Restart the current round on an empty board with fresh features.
    ///
    /// Scores, mods and the player to move are kept.
    pub fn reset_round(&mut self) -> Result<(), MoveError> {
        if let Phase::MatchOver(_) = self.round.phase {
            return Err(MoveError::MatchOver);
        }
        let to_move = self.round.current_player;
        self.round = RoundState {
            current_player: to_move,
            ..RoundState::new(self.round.opener)
        };
        self.mods.start_round();
        info!(round = self.score.round_number, %to_move, "round reset");
        Ok(())
    }

    /// Zero the scores, switch to a new mod selection and start round one.
    ///
    /// On error the current match is left untouched.
    pub fn new_match(&mut self, mods: &[ModKind]) -> Result<(), ConfigError> {
        self.mods = ModRegistry::new(mods, &self.config)?;
        self.start_match();
        Ok(())
    }

    /// Replace the round in progress with a saved board and placement.
    ///
    /// The round resumes in `AwaitingMove` with `current_player` to move.
    /// History and the winning line are cleared. Refused once the match is
    /// over.
    pub fn restore_round(
        &mut self,
        board: Board,
        placement: FeaturePlacement,
        current_player: Player,
    ) -> Result<(), MoveError> {
        if let Phase::MatchOver(_) = self.round.phase {
            return Err(MoveError::MatchOver);
        }
        self.round = RoundState {
            board,
            ..RoundState::new(current_player)
        };
        self.mods.set_placement(placement);
        debug!(%current_player, "round restored");
        Ok(())
    }

    /// Capture the round in progress, including each mod's RNG position.
    #[must_use]
    pub fn save_round(&self) -> RoundSave {
        RoundSave {
            board: self.round.board.clone(),
            placement: self.mods.placement().clone(),
            current_player: self.round.current_player,
            mod_streams: self.mods.streams(),
        }
    }

    /// Resume a saved round. Later drops roll exactly as they would have
    /// in the game the save was taken from.
    pub fn resume_round(&mut self, save: RoundSave) -> Result<(), MoveError> {
        self.restore_round(save.board, save.placement, save.current_player)?;
        self.mods.restore_streams(&save.mod_streams);
        Ok(())
    }

    fn start_match(&mut self) {
        let match_rng = self.rng.fork();
        self.mods.activate(&match_rng);
        self.score = MatchState::new(self.config.championship_score);
        info!(mods = ?self.mods.kinds(), "match started");
        self.start_round(Player::One);
    }

    fn start_round(&mut self, opener: Player) {
        self.round = RoundState::new(opener);
        self.score.round_number += 1;
        self.mods.start_round();
        info!(round = self.score.round_number, %opener, "round started");
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.round.board
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.round.phase
    }

    #[must_use]
    pub fn current_player(&self) -> Player {
        self.round.current_player
    }

    #[must_use]
    pub fn winning_cells(&self) -> &[Position] {
        &self.round.winning_cells
    }

    #[must_use]
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    #[must_use]
    pub fn match_state(&self) -> &MatchState {
        &self.score
    }

    #[must_use]
    pub fn score(&self, player: Player) -> u32 {
        self.score.scores[player]
    }

    #[must_use]
    pub fn round_number(&self) -> u32 {
        self.score.round_number
    }

    /// Active mods in selection order.
    #[must_use]
    pub fn active_mods(&self) -> Vec<ModKind> {
        self.mods.kinds()
    }

    #[must_use]
    pub fn mods(&self) -> &ModRegistry {
        &self.mods
    }

    /// Feature cells hidden this round.
    #[must_use]
    pub fn placement(&self) -> &FeaturePlacement {
        self.mods.placement()
    }
}

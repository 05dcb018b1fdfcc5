//! Round scoring.
//!
//! Faster wins earn more: every player-move under par adds a bonus on top
//! of the minimum, capped at the maximum.

use crate::core::GameConfig;

/// Points for a round won after `move_count` placements.
///
/// Player-moves are `ceil(move_count / 2)`; fills and overrides made by mod
/// effects count as placements too.
#[must_use]
pub fn round_points(move_count: u32, config: &GameConfig) -> u32 {
    let player_moves = move_count.div_ceil(2);
    let saved = config.par_player_moves.saturating_sub(player_moves);
    let points = config
        .min_round_points
        .saturating_add(saved.saturating_mul(config.points_per_saved_move));
    points.min(config.max_round_points).max(config.min_round_points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fast_win_is_capped() {
        let config = GameConfig::default();
        assert_eq!(round_points(7, &config), 30);
        assert_eq!(round_points(8, &config), 30);
    }

    #[test]
    fn test_slow_win_hits_floor() {
        let config = GameConfig::default();
        assert_eq!(round_points(40, &config), 10);
        assert_eq!(round_points(54, &config), 10);
    }

    #[test]
    fn test_middle_of_the_curve() {
        let config = GameConfig::default();
        // 14 player-moves: 10 + 6 * 2
        assert_eq!(round_points(27, &config), 22);
        assert_eq!(round_points(28, &config), 22);
        // 15 player-moves: 10 + 5 * 2
        assert_eq!(round_points(29, &config), 20);
    }
}

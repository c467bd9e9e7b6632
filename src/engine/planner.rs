// Turn planning for the soccer game: search first, random legal move as a fallback.

use rand::seq::SliceRandom;

use crate::metrics;

use super::board::SoccerBoard;
use super::movement_tree::MovementTree;
use super::strategy::SoccerStrategy;

/// Compute the cells to play, in order, for the turn starting on `board`.
///
/// The strategy's path through the movement tree is followed only when the
/// ball has at least one safe move. Otherwise, or if the strategy picks a
/// cell that is not available, the plan is a single random legal move. An empty plan means the ball is
/// stuck.
pub fn plan_turn(board: &SoccerBoard, strategy: &dyn SoccerStrategy) -> Vec<(usize, usize)> {
    let available = board.available_moves();
    if available.is_empty() {
        tracing::warn!("Ball at {:?} has no available moves", board.current());
        return Vec::new();
    }

    if MovementTree::safe_moves_of(board).is_empty() {
        tracing::debug!("No safe move from {:?}, playing at random", board.current());
        return random_move(&available);
    }

    match MovementTree::search(board, strategy) {
        Ok(moves) if !moves.is_empty() => {
            tracing::debug!("Planned {} move(s) from {:?}", moves.len(), board.current());
            metrics::TURN_PLANS_TOTAL
                .with_label_values(&["search"])
                .inc();
            metrics::TURN_PLAN_MOVES.observe(moves.len() as f64);
            moves
        }
        Ok(_) => random_move(&available),
        Err(e) => {
            tracing::warn!("Turn search failed, playing at random: {e}");
            random_move(&available)
        }
    }
}

fn random_move(available: &[(usize, usize)]) -> Vec<(usize, usize)> {
    metrics::TURN_PLANS_TOTAL
        .with_label_values(&["fallback"])
        .inc();
    available
        .choose(&mut rand::thread_rng())
        .copied()
        .into_iter()
        .collect()
}

//! Seeded random playouts, used by consistency tests and benchmarks to
//! exercise the incremental state maintenance across long move sequences.

use rand::prelude::IndexedRandom;
use rand::Rng;

use crate::game_state::game_state::GameState;
use crate::game_state::chess_types::Move;
use crate::move_generation::legal_move_apply::make_move_in_place;
use crate::move_generation::move_generator::MoveGenResult;
use crate::move_generation::pseudo_legal::generate_legal_moves;

/// Play up to `max_moves` uniformly random legal moves, leaving them applied
/// on `game_state`. Stops early at a draw or when no legal move exists.
/// Returns the moves played, oldest first; the caller unmakes them.
pub fn random_playout<R: Rng>(
    game_state: &mut GameState,
    rng: &mut R,
    max_moves: usize,
) -> MoveGenResult<Vec<Move>> {
    let mut played = Vec::with_capacity(max_moves);

    for _ in 0..max_moves {
        if game_state.is_draw_state() {
            break;
        }
        let legal = generate_legal_moves(game_state)?;
        let Some(&mv) = legal.choose(rng) else {
            break;
        };
        make_move_in_place(game_state, mv)?;
        played.push(mv);
    }

    Ok(played)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_apply::unmake_move_in_place;
    use crate::search::board_scoring::{
        recompute_phase, recompute_piece_counts, recompute_scores,
    };
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn incremental_state_matches_recomputation_through_random_play() {
        for seed in 0..8u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut game = GameState::new_game();

            for _ in 0..40 {
                let step = random_playout(&mut game, &mut rng, 1).expect("playout should run");
                if step.is_empty() {
                    break;
                }

                assert_eq!(game.zobrist_key, game.compute_zobrist_key());
                assert_eq!(game.pawn_zobrist_key, game.compute_pawn_zobrist_key());
                let (mg, eg) = recompute_scores(&game);
                assert_eq!(game.mg_score, mg);
                assert_eq!(game.eg_score, eg);
                assert_eq!(game.phase, recompute_phase(&game));
                assert_eq!(game.piece_counts, recompute_piece_counts(&game));
            }
        }
    }

    #[test]
    fn full_unwind_restores_the_starting_position() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut game = GameState::new_game();
        let before = game.clone();

        let played = random_playout(&mut game, &mut rng, 60).expect("playout should run");
        for _ in 0..played.len() {
            unmake_move_in_place(&mut game).expect("unmake should succeed");
        }

        assert_eq!(game.zobrist_key, before.zobrist_key);
        assert_eq!(game.pawn_zobrist_key, before.pawn_zobrist_key);
        assert_eq!(game.pieces, before.pieces);
        assert_eq!(game.castling_rights, before.castling_rights);
        assert_eq!(game.en_passant_square, before.en_passant_square);
        assert_eq!(game.get_fen(), before.get_fen());
    }
}

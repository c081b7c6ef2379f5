//! Static exchange evaluation.
//!
//! Resolves the full capture sequence on one square by repeatedly applying
//! the least valuable attacker from each side, then folds the swap list
//! backward under the rule that either side may stop capturing early. The
//! result is the material outcome, in centipawns, from the mover's point of
//! view.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::attackers_to_square;
use crate::moves::move_descriptions::{move_from, move_kind, move_to, MoveKind};
use crate::search::board_scoring::{exchange_value, INF};

const SWAP_LIST_LEN: usize = 34;

/// Material swing of capturing on `to` with the piece on `from`. Pins and
/// other legality concerns are ignored; only attack geometry counts.
pub fn static_exchange_eval(game_state: &GameState, from: Square, to: Square) -> i32 {
    let Some((mover_color, mover_kind)) = game_state.piece_on_square(from) else {
        return 0;
    };

    let mut gain = [0i32; SWAP_LIST_LEN];
    let mut ply = 0usize;

    gain[0] = match game_state.piece_on_square(to) {
        Some((_, victim)) => exchange_value(victim),
        None => 0,
    };

    // Lift the mover off the board so sliders behind it see through.
    let mut occupancy = game_state.occupancy_all ^ (1u64 << from);
    let mut attackers = attackers_to_square(game_state, to, occupancy);

    let mut capturing_kind = mover_kind;
    let mut side = mover_color.opposite();

    while attackers & game_state.occupancy_by_color[side.index()] & occupancy != 0 {
        if ply + 1 >= SWAP_LIST_LEN {
            break;
        }
        ply += 1;

        // A king recapture ends the sequence: if the opponent still had an
        // attacker the capture would have been illegal, which the fold
        // expresses as an unbeatable gain.
        if capturing_kind == PieceKind::King {
            gain[ply] = INF;
            break;
        }

        gain[ply] = -gain[ply - 1] + exchange_value(capturing_kind);

        // Least valuable attacker first; ALL is ordered cheapest to king.
        let side_attackers = attackers & game_state.occupancy_by_color[side.index()] & occupancy;
        let mut picked = None;
        for kind in PieceKind::ALL {
            let candidates =
                side_attackers & game_state.pieces[side.index()][kind.index()];
            if candidates != 0 {
                occupancy ^= candidates & candidates.wrapping_neg();
                picked = Some(kind);
                break;
            }
        }
        let Some(kind) = picked else {
            break;
        };
        capturing_kind = kind;

        // Removing the capturer can expose a slider behind it.
        attackers = attackers_to_square(game_state, to, occupancy);
        side = side.opposite();
    }

    // Backward fold: at each step the side to move keeps the better of
    // stopping or continuing the exchange.
    while ply > 0 {
        gain[ply - 1] = -i32::max(-gain[ply - 1], gain[ply]);
        ply -= 1;
    }

    gain[0]
}

/// A capture is bad when a more valuable piece takes a cheaper one and the
/// exchange evaluator confirms the loss. Used by the quiescence pruning
/// filter.
pub fn is_bad_capture(game_state: &GameState, mv: Move) -> bool {
    let from = move_from(mv);
    let to = move_to(mv);

    let Some((_, attacker)) = game_state.piece_on_square(from) else {
        return false;
    };
    let victim = if move_kind(mv) == MoveKind::EnPassantCapture {
        PieceKind::Pawn
    } else {
        match game_state.piece_on_square(to) {
            Some((_, piece)) => piece,
            None => return false,
        }
    };

    if exchange_value(attacker) <= exchange_value(victim) {
        return false;
    }

    static_exchange_eval(game_state, from, to) < 0
}

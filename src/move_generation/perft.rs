//! Perft node counting over make/unmake, used to validate the move executor
//! and generator against known reference counts.

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{make_move_in_place, unmake_move_in_place};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::move_generator::MoveGenResult;
use crate::move_generation::pseudo_legal::generate_pseudo_legal_moves;

pub fn perft(game_state: &mut GameState, depth: u8) -> MoveGenResult<u64> {
    if depth == 0 {
        return Ok(1);
    }

    let side = game_state.side_to_move;
    let mut pseudo = Vec::with_capacity(64);
    generate_pseudo_legal_moves(game_state, &mut pseudo);

    let mut nodes = 0u64;
    for mv in pseudo {
        make_move_in_place(game_state, mv)?;
        if !is_king_in_check(game_state, side) {
            nodes += perft(game_state, depth - 1)?;
        }
        unmake_move_in_place(game_state)?;
    }

    Ok(nodes)
}

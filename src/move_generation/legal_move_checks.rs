//! Square-attack tests and check detection.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::attack_maps::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks,
};

#[inline]
pub fn king_square(game_state: &GameState, color: Color) -> Option<Square> {
    let kings = game_state.pieces[color.index()][PieceKind::King.index()];
    if kings == 0 {
        None
    } else {
        Some(kings.trailing_zeros() as Square)
    }
}

#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    let Some(king_sq) = king_square(game_state, color) else {
        return false;
    };
    is_square_attacked(game_state, king_sq, color.opposite())
}

pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    let them = attacker_color.index();

    // A pawn of the attacker's color attacks `square` exactly when a pawn of
    // the defender's color standing on `square` would attack it back.
    let attacker_pawns = game_state.pieces[them][PieceKind::Pawn.index()];
    if pawn_attacks(attacker_color.opposite(), square) & attacker_pawns != 0 {
        return true;
    }

    if knight_attacks(square) & game_state.pieces[them][PieceKind::Knight.index()] != 0 {
        return true;
    }

    if king_attacks(square) & game_state.pieces[them][PieceKind::King.index()] != 0 {
        return true;
    }

    let bishops_queens = game_state.pieces[them][PieceKind::Bishop.index()]
        | game_state.pieces[them][PieceKind::Queen.index()];
    if bishop_attacks(square, game_state.occupancy_all) & bishops_queens != 0 {
        return true;
    }

    let rooks_queens = game_state.pieces[them][PieceKind::Rook.index()]
        | game_state.pieces[them][PieceKind::Queen.index()];
    if rook_attacks(square, game_state.occupancy_all) & rooks_queens != 0 {
        return true;
    }

    false
}

/// Bitboard of all pieces of both colors attacking `square` under the given
/// occupancy. The occupancy parameter lets the exchange evaluator re-derive
/// attacks after simulated removals without touching the game state.
pub fn attackers_to_square(game_state: &GameState, square: Square, occupancy: u64) -> u64 {
    let light = Color::Light.index();
    let dark = Color::Dark.index();

    let mut attackers = 0u64;

    // Squares from which a pawn could capture onto `square`.
    attackers |= pawn_attacks(Color::Dark, square) & game_state.pieces[light][PieceKind::Pawn.index()];
    attackers |= pawn_attacks(Color::Light, square) & game_state.pieces[dark][PieceKind::Pawn.index()];

    let knights = game_state.pieces[light][PieceKind::Knight.index()]
        | game_state.pieces[dark][PieceKind::Knight.index()];
    attackers |= knight_attacks(square) & knights;

    let kings = game_state.pieces[light][PieceKind::King.index()]
        | game_state.pieces[dark][PieceKind::King.index()];
    attackers |= king_attacks(square) & kings;

    let bishops_queens = game_state.pieces[light][PieceKind::Bishop.index()]
        | game_state.pieces[dark][PieceKind::Bishop.index()]
        | game_state.pieces[light][PieceKind::Queen.index()]
        | game_state.pieces[dark][PieceKind::Queen.index()];
    attackers |= bishop_attacks(square, occupancy) & bishops_queens;

    let rooks_queens = game_state.pieces[light][PieceKind::Rook.index()]
        | game_state.pieces[dark][PieceKind::Rook.index()]
        | game_state.pieces[light][PieceKind::Queen.index()]
        | game_state.pieces[dark][PieceKind::Queen.index()];
    attackers |= rook_attacks(square, occupancy) & rooks_queens;

    attackers & occupancy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_has_no_checks() {
        let game = GameState::new_game();
        assert!(!is_king_in_check(&game, Color::Light));
        assert!(!is_king_in_check(&game, Color::Dark));
    }

    #[test]
    fn scholars_mate_is_detected_as_check() {
        // Qxf7# delivered; dark to move and in check.
        let game = GameState::from_fen(
            "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4",
        )
        .expect("FEN should parse");
        assert!(is_king_in_check(&game, Color::Dark));
        assert!(!is_king_in_check(&game, Color::Light));
    }

    #[test]
    fn attackers_include_both_colors_and_xrays_after_removal() {
        // Light pawn e4, dark pawn d5, light rook d1, dark queen d8.
        let game = GameState::from_fen("3q4/8/8/3p4/4P3/8/8/3RK2k w - - 0 1")
            .expect("FEN should parse");
        let d5 = 35u8;

        let attackers = attackers_to_square(&game, d5, game.occupancy_all);
        // e4 pawn, d1 rook, d8 queen all bear on d5.
        assert_ne!(attackers & (1u64 << 28), 0);
        assert_ne!(attackers & (1u64 << 3), 0);
        assert_ne!(attackers & (1u64 << 59), 0);
    }
}

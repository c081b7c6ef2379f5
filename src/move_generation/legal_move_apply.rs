//! In-place move execution and reversal.
//!
//! `make_move_in_place` mutates `GameState` while maintaining every
//! incremental field: both Zobrist keys, castling rights, the en-passant
//! square, occupancies, midgame/endgame score accumulators, the phase
//! counter, piece counts, king squares, clocks, and the repetition history.
//! `unmake_move_in_place` restores the saved fields from the undo record and
//! replays the piece movement backward, reproducing the pre-move state
//! bit-for-bit.
//!
//! Moves are assumed pseudo-legal; no legality validation happens here.
//! Callers test for a self-check after making the move and must still unmake
//! when they reject it. Make/unmake pairs must nest strictly LIFO.

use crate::game_state::undo_state::{MoveUndo, NullUndo, UndoState};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError};
use crate::moves::attack_maps::pawn_attacks;
use crate::moves::move_descriptions::{move_from, move_kind, move_to, MoveKind};
use crate::search::board_scoring::{phase_weight, pst_eg, pst_mg};
use crate::search::zobrist;

/// Per-square castling-rights masks. Touching a square intersects the rights
/// with its mask, so moving or capturing a king or rook strips the right
/// implicitly.
const CASTLE_MASK: [CastlingRights; 64] = build_castle_masks();

const fn build_castle_masks() -> [CastlingRights; 64] {
    let all = CASTLE_LIGHT_KINGSIDE
        | CASTLE_LIGHT_QUEENSIDE
        | CASTLE_DARK_KINGSIDE
        | CASTLE_DARK_QUEENSIDE;
    let mut masks = [all; 64];
    masks[0] = all & !CASTLE_LIGHT_QUEENSIDE; // a1
    masks[4] = all & !(CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE); // e1
    masks[7] = all & !CASTLE_LIGHT_KINGSIDE; // h1
    masks[56] = all & !CASTLE_DARK_QUEENSIDE; // a8
    masks[60] = all & !(CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE); // e8
    masks[63] = all & !CASTLE_DARK_KINGSIDE; // h8
    masks
}

/// Rook relocation for a castling king landing on `king_to`.
#[inline]
const fn castle_rook_squares(king_to: Square) -> (Square, Square) {
    match king_to {
        2 => (0, 3),    // c1: a1 -> d1
        6 => (7, 5),    // g1: h1 -> f1
        58 => (56, 59), // c8: a8 -> d8
        _ => (63, 61),  // g8: h8 -> f8
    }
}

/// Move a piece of `color`/`piece` between two squares, updating bitboards,
/// occupancy, the full hash, and both score accumulators.
#[inline]
fn shift_piece(game_state: &mut GameState, color: Color, piece: PieceKind, from: Square, to: Square) {
    let mask = (1u64 << from) | (1u64 << to);
    game_state.pieces[color.index()][piece.index()] ^= mask;
    game_state.occupancy_by_color[color.index()] ^= mask;

    game_state.zobrist_key ^=
        zobrist::piece_square_key(color, piece, from) ^ zobrist::piece_square_key(color, piece, to);

    game_state.mg_score[color.index()] +=
        pst_mg(color, piece, to) - pst_mg(color, piece, from);
    game_state.eg_score[color.index()] +=
        pst_eg(color, piece, to) - pst_eg(color, piece, from);
}

/// Remove an enemy piece from `square` with full capture bookkeeping:
/// hash keys, occupancy, scores, phase, and the piece count.
#[inline]
fn remove_captured_piece(game_state: &mut GameState, color: Color, piece: PieceKind, square: Square) {
    let mask = 1u64 << square;
    game_state.pieces[color.index()][piece.index()] ^= mask;
    game_state.occupancy_by_color[color.index()] ^= mask;

    let key = zobrist::piece_square_key(color, piece, square);
    game_state.zobrist_key ^= key;
    if piece == PieceKind::Pawn {
        game_state.pawn_zobrist_key ^= key;
    }

    game_state.mg_score[color.index()] -= pst_mg(color, piece, square);
    game_state.eg_score[color.index()] -= pst_eg(color, piece, square);
    game_state.phase -= phase_weight(piece);
    game_state.piece_counts[color.index()][piece.index()] -= 1;
}

/// Inverse of `remove_captured_piece`.
#[inline]
fn restore_captured_piece(game_state: &mut GameState, color: Color, piece: PieceKind, square: Square) {
    let mask = 1u64 << square;
    game_state.pieces[color.index()][piece.index()] ^= mask;
    game_state.occupancy_by_color[color.index()] ^= mask;

    game_state.mg_score[color.index()] += pst_mg(color, piece, square);
    game_state.eg_score[color.index()] += pst_eg(color, piece, square);
    game_state.phase += phase_weight(piece);
    game_state.piece_counts[color.index()][piece.index()] += 1;
}

pub fn make_move_in_place(game_state: &mut GameState, mv: Move) -> MoveGenResult<()> {
    let from = move_from(mv);
    let to = move_to(mv);
    let kind = move_kind(mv);

    let side = game_state.side_to_move;
    let opp = side.opposite();

    let moved_piece = game_state
        .piece_on_square_for_color(side, from)
        .ok_or_else(|| {
            MoveGenerationError::InvalidState(format!("no piece to move on square {from}"))
        })?;
    let captured_piece = if kind == MoveKind::EnPassantCapture {
        None
    } else {
        game_state.piece_on_square_for_color(opp, to)
    };

    game_state.undo_stack.push(UndoState::Move(MoveUndo {
        mv,
        moved_piece,
        captured_piece,
        prev_castling_rights: game_state.castling_rights,
        prev_en_passant_square: game_state.en_passant_square,
        prev_halfmove_clock: game_state.halfmove_clock,
        prev_zobrist_key: game_state.zobrist_key,
        prev_pawn_zobrist_key: game_state.pawn_zobrist_key,
    }));

    // Repetition tracking runs against the state before this move.
    game_state.repetition_history.push(game_state.zobrist_key);

    // Reversible-move counter.
    if moved_piece == PieceKind::Pawn
        || captured_piece.is_some()
        || kind == MoveKind::EnPassantCapture
    {
        game_state.halfmove_clock = 0;
    } else {
        game_state.halfmove_clock += 1;
    }

    // Pawn-structure key tracks pawn and king placement.
    if moved_piece == PieceKind::Pawn || moved_piece == PieceKind::King {
        game_state.pawn_zobrist_key ^= zobrist::piece_square_key(side, moved_piece, from)
            ^ zobrist::piece_square_key(side, moved_piece, to);
    }

    // Castling rights shrink when either endpoint touches a rights square.
    game_state.zobrist_key ^= zobrist::castling_key(game_state.castling_rights);
    game_state.castling_rights &= CASTLE_MASK[from as usize] & CASTLE_MASK[to as usize];
    game_state.zobrist_key ^= zobrist::castling_key(game_state.castling_rights);

    // Any existing en-passant square lapses.
    if let Some(ep_sq) = game_state.en_passant_square.take() {
        game_state.zobrist_key ^= zobrist::en_passant_file_key(square_file(ep_sq));
    }

    shift_piece(game_state, side, moved_piece, from, to);
    if moved_piece == PieceKind::King {
        game_state.king_squares[side.index()] = to;
    }

    if let Some(captured) = captured_piece {
        remove_captured_piece(game_state, opp, captured, to);
    }

    match kind {
        MoveKind::Normal => {}

        MoveKind::Castle => {
            let (rook_from, rook_to) = castle_rook_squares(to);
            shift_piece(game_state, side, PieceKind::Rook, rook_from, rook_to);
        }

        MoveKind::EnPassantCapture => {
            // The captured pawn sits behind the destination square.
            let capture_sq = to ^ 8;
            let key = zobrist::piece_square_key(opp, PieceKind::Pawn, capture_sq);
            game_state.zobrist_key ^= key;
            game_state.pawn_zobrist_key ^= key;

            let mask = 1u64 << capture_sq;
            game_state.pieces[opp.index()][PieceKind::Pawn.index()] ^= mask;
            game_state.occupancy_by_color[opp.index()] ^= mask;
            game_state.mg_score[opp.index()] -= pst_mg(opp, PieceKind::Pawn, capture_sq);
            game_state.eg_score[opp.index()] -= pst_eg(opp, PieceKind::Pawn, capture_sq);
            game_state.piece_counts[opp.index()][PieceKind::Pawn.index()] -= 1;
        }

        MoveKind::DoublePawnPush => {
            // Lazy en-passant: only record the square if an enemy pawn can
            // actually capture there, avoiding hash churn otherwise.
            let ep_sq = to ^ 8;
            let enemy_pawns = game_state.pieces[opp.index()][PieceKind::Pawn.index()];
            if pawn_attacks(side, ep_sq) & enemy_pawns != 0 {
                game_state.en_passant_square = Some(ep_sq);
                game_state.zobrist_key ^= zobrist::en_passant_file_key(square_file(ep_sq));
            }
        }

        MoveKind::PromoteKnight
        | MoveKind::PromoteBishop
        | MoveKind::PromoteRook
        | MoveKind::PromoteQueen => {
            let promoted = match kind {
                MoveKind::PromoteKnight => PieceKind::Knight,
                MoveKind::PromoteBishop => PieceKind::Bishop,
                MoveKind::PromoteRook => PieceKind::Rook,
                _ => PieceKind::Queen,
            };

            // The pawn already arrived on `to`; swap it for the promoted kind.
            let mask = 1u64 << to;
            game_state.pieces[side.index()][PieceKind::Pawn.index()] ^= mask;
            game_state.pieces[side.index()][promoted.index()] ^= mask;

            let pawn_key = zobrist::piece_square_key(side, PieceKind::Pawn, to);
            game_state.zobrist_key ^=
                pawn_key ^ zobrist::piece_square_key(side, promoted, to);
            game_state.pawn_zobrist_key ^= pawn_key;

            game_state.mg_score[side.index()] +=
                pst_mg(side, promoted, to) - pst_mg(side, PieceKind::Pawn, to);
            game_state.eg_score[side.index()] +=
                pst_eg(side, promoted, to) - pst_eg(side, PieceKind::Pawn, to);
            game_state.phase += phase_weight(promoted) - phase_weight(PieceKind::Pawn);
            game_state.piece_counts[side.index()][PieceKind::Pawn.index()] -= 1;
            game_state.piece_counts[side.index()][promoted.index()] += 1;
        }
    }

    if side == Color::Dark {
        game_state.fullmove_number += 1;
    }
    game_state.ply += 1;

    game_state.occupancy_all = game_state.occupancy_by_color[Color::Light.index()]
        | game_state.occupancy_by_color[Color::Dark.index()];

    // Side flip always comes last.
    game_state.side_to_move = opp;
    game_state.zobrist_key ^= zobrist::side_to_move_key();

    Ok(())
}

pub fn unmake_move_in_place(game_state: &mut GameState) -> MoveGenResult<()> {
    let undo = match game_state.undo_stack.pop() {
        Some(UndoState::Move(undo)) => undo,
        Some(other) => {
            game_state.undo_stack.push(other);
            return Err(MoveGenerationError::InvalidState(
                "top of undo stack is a null move; unmake order violated".to_owned(),
            ));
        }
        None => {
            return Err(MoveGenerationError::InvalidState(
                "unmake requested with empty undo stack".to_owned(),
            ));
        }
    };

    let from = move_from(undo.mv);
    let to = move_to(undo.mv);
    let kind = move_kind(undo.mv);

    // The mover is the side that is not on turn anymore.
    let side = game_state.side_to_move.opposite();
    let opp = game_state.side_to_move;

    game_state.side_to_move = side;
    if side == Color::Dark {
        game_state.fullmove_number -= 1;
    }
    game_state.ply -= 1;
    game_state.repetition_history.pop();

    // Saved fields come straight back from the undo record.
    game_state.castling_rights = undo.prev_castling_rights;
    game_state.en_passant_square = undo.prev_en_passant_square;
    game_state.halfmove_clock = undo.prev_halfmove_clock;

    // Reverse the special-move side effects first, then walk the piece back.
    match kind {
        MoveKind::Normal => {}

        MoveKind::Castle => {
            let (rook_from, rook_to) = castle_rook_squares(to);
            shift_piece(game_state, side, PieceKind::Rook, rook_to, rook_from);
        }

        MoveKind::EnPassantCapture => {
            restore_captured_piece(game_state, opp, PieceKind::Pawn, to ^ 8);
        }

        MoveKind::DoublePawnPush => {}

        MoveKind::PromoteKnight
        | MoveKind::PromoteBishop
        | MoveKind::PromoteRook
        | MoveKind::PromoteQueen => {
            let promoted = match kind {
                MoveKind::PromoteKnight => PieceKind::Knight,
                MoveKind::PromoteBishop => PieceKind::Bishop,
                MoveKind::PromoteRook => PieceKind::Rook,
                _ => PieceKind::Queen,
            };

            let mask = 1u64 << to;
            game_state.pieces[side.index()][promoted.index()] ^= mask;
            game_state.pieces[side.index()][PieceKind::Pawn.index()] ^= mask;

            game_state.mg_score[side.index()] +=
                pst_mg(side, PieceKind::Pawn, to) - pst_mg(side, promoted, to);
            game_state.eg_score[side.index()] +=
                pst_eg(side, PieceKind::Pawn, to) - pst_eg(side, promoted, to);
            game_state.phase += phase_weight(PieceKind::Pawn) - phase_weight(promoted);
            game_state.piece_counts[side.index()][promoted.index()] -= 1;
            game_state.piece_counts[side.index()][PieceKind::Pawn.index()] += 1;
        }
    }

    shift_piece(game_state, side, undo.moved_piece, to, from);
    if undo.moved_piece == PieceKind::King {
        game_state.king_squares[side.index()] = from;
    }

    if let Some(captured) = undo.captured_piece {
        restore_captured_piece(game_state, opp, captured, to);
    }

    // Scores and counts are replay-reversed above; the hash keys come back
    // from the snapshot since en-passant and castling terms are not
    // derivable from the move alone.
    game_state.zobrist_key = undo.prev_zobrist_key;
    game_state.pawn_zobrist_key = undo.prev_pawn_zobrist_key;

    game_state.occupancy_all = game_state.occupancy_by_color[Color::Light.index()]
        | game_state.occupancy_by_color[Color::Dark.index()];

    Ok(())
}

/// Flip the side to move without moving a piece, for zugzwang probes.
/// Everything except the en-passant square survives; the reversible-move
/// counter increments.
pub fn make_null_move_in_place(game_state: &mut GameState) {
    game_state.undo_stack.push(UndoState::Null(NullUndo {
        prev_en_passant_square: game_state.en_passant_square,
        prev_zobrist_key: game_state.zobrist_key,
    }));

    game_state.repetition_history.push(game_state.zobrist_key);
    game_state.halfmove_clock += 1;

    if let Some(ep_sq) = game_state.en_passant_square.take() {
        game_state.zobrist_key ^= zobrist::en_passant_file_key(square_file(ep_sq));
    }

    game_state.side_to_move = game_state.side_to_move.opposite();
    game_state.zobrist_key ^= zobrist::side_to_move_key();
}

pub fn unmake_null_move_in_place(game_state: &mut GameState) -> MoveGenResult<()> {
    let undo = match game_state.undo_stack.pop() {
        Some(UndoState::Null(undo)) => undo,
        Some(other) => {
            game_state.undo_stack.push(other);
            return Err(MoveGenerationError::InvalidState(
                "top of undo stack is a regular move; null unmake order violated".to_owned(),
            ));
        }
        None => {
            return Err(MoveGenerationError::InvalidState(
                "null unmake requested with empty undo stack".to_owned(),
            ));
        }
    };

    game_state.repetition_history.pop();
    game_state.halfmove_clock -= 1;
    game_state.side_to_move = game_state.side_to_move.opposite();
    game_state.en_passant_square = undo.prev_en_passant_square;
    game_state.zobrist_key = undo.prev_zobrist_key;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::move_descriptions::pack_move;
    use crate::utils::algebraic::algebraic_to_square;

    fn mv(from: &str, to: &str, kind: MoveKind) -> Move {
        pack_move(
            algebraic_to_square(from).expect("valid square"),
            algebraic_to_square(to).expect("valid square"),
            kind,
        )
    }

    fn assert_states_identical(a: &GameState, b: &GameState) {
        assert_eq!(a.pieces, b.pieces);
        assert_eq!(a.occupancy_by_color, b.occupancy_by_color);
        assert_eq!(a.occupancy_all, b.occupancy_all);
        assert_eq!(a.side_to_move, b.side_to_move);
        assert_eq!(a.castling_rights, b.castling_rights);
        assert_eq!(a.en_passant_square, b.en_passant_square);
        assert_eq!(a.halfmove_clock, b.halfmove_clock);
        assert_eq!(a.fullmove_number, b.fullmove_number);
        assert_eq!(a.zobrist_key, b.zobrist_key);
        assert_eq!(a.pawn_zobrist_key, b.pawn_zobrist_key);
        assert_eq!(a.mg_score, b.mg_score);
        assert_eq!(a.eg_score, b.eg_score);
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.piece_counts, b.piece_counts);
        assert_eq!(a.king_squares, b.king_squares);
        assert_eq!(a.repetition_history, b.repetition_history);
    }

    fn assert_derived_consistent(game: &GameState) {
        assert_eq!(game.zobrist_key, game.compute_zobrist_key());
        assert_eq!(game.pawn_zobrist_key, game.compute_pawn_zobrist_key());
        let (mg, eg) = crate::search::board_scoring::recompute_scores(game);
        assert_eq!(game.mg_score, mg);
        assert_eq!(game.eg_score, eg);
        assert_eq!(game.phase, crate::search::board_scoring::recompute_phase(game));
        assert_eq!(
            game.piece_counts,
            crate::search::board_scoring::recompute_piece_counts(game)
        );
    }

    #[test]
    fn quiet_move_round_trip() {
        let mut game = GameState::new_game();
        let before = game.clone();

        make_move_in_place(&mut game, mv("g1", "f3", MoveKind::Normal)).expect("make");
        assert_eq!(game.side_to_move, Color::Dark);
        assert_eq!(game.halfmove_clock, 1);
        assert_derived_consistent(&game);

        unmake_move_in_place(&mut game).expect("unmake");
        assert_states_identical(&game, &before);
    }

    #[test]
    fn capture_restores_victim_and_counts() {
        let mut game = GameState::from_fen(
            "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2",
        )
        .expect("FEN should parse");
        let before = game.clone();

        make_move_in_place(&mut game, mv("e4", "d5", MoveKind::Normal)).expect("make");
        assert_eq!(game.piece_counts[Color::Dark.index()][PieceKind::Pawn.index()], 7);
        assert_eq!(game.halfmove_clock, 0);
        assert_derived_consistent(&game);

        unmake_move_in_place(&mut game).expect("unmake");
        assert_states_identical(&game, &before);
    }

    #[test]
    fn castling_moves_rook_and_strips_rights() {
        let mut game = GameState::from_fen(
            "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1",
        )
        .expect("FEN should parse");
        let before = game.clone();

        make_move_in_place(&mut game, mv("e1", "g1", MoveKind::Castle)).expect("make");
        assert_eq!(
            game.piece_on_square_for_color(Color::Light, algebraic_to_square("f1").expect("f1")),
            Some(PieceKind::Rook)
        );
        assert_eq!(game.castling_rights & (CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE), 0);
        assert_eq!(game.king_squares[Color::Light.index()], 6);
        assert_derived_consistent(&game);

        unmake_move_in_place(&mut game).expect("unmake");
        assert_states_identical(&game, &before);
    }

    #[test]
    fn capturing_a_rook_strips_its_castling_right() {
        let mut game = GameState::from_fen(
            "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1",
        )
        .expect("FEN should parse");
        // Force a light rook onto h8 by teleporting via FEN instead: capture
        // semantics via a8 rook taken by nothing is awkward here, so test the
        // mask directly through a rook lift that never leaves the file.
        make_move_in_place(&mut game, mv("a1", "a2", MoveKind::Normal)).expect("make");
        assert_eq!(game.castling_rights & CASTLE_LIGHT_QUEENSIDE, 0);
        assert_ne!(game.castling_rights & CASTLE_LIGHT_KINGSIDE, 0);
    }

    #[test]
    fn en_passant_capture_removes_pawn_behind_destination() {
        let mut game = GameState::from_fen(
            "rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 3",
        )
        .expect("FEN should parse");
        let before = game.clone();

        make_move_in_place(&mut game, mv("d4", "e3", MoveKind::EnPassantCapture)).expect("make");
        assert_eq!(
            game.piece_on_square_for_color(Color::Light, algebraic_to_square("e4").expect("e4")),
            None
        );
        assert_eq!(game.piece_counts[Color::Light.index()][PieceKind::Pawn.index()], 7);
        assert_derived_consistent(&game);

        unmake_move_in_place(&mut game).expect("unmake");
        assert_states_identical(&game, &before);
    }

    #[test]
    fn double_push_sets_en_passant_only_when_capturable() {
        // No dark pawn adjacent to e3: square must stay unset.
        let mut game = GameState::new_game();
        make_move_in_place(&mut game, mv("e2", "e4", MoveKind::DoublePawnPush)).expect("make");
        assert_eq!(game.en_passant_square, None);
        assert_derived_consistent(&game);

        // Dark pawn on d4 can capture on e3: square must be set.
        let mut game = GameState::from_fen(
            "rnbqkbnr/ppp1pppp/8/8/3p4/8/PPPPPPPP/RNBQKBNR w KQkq - 0 3",
        )
        .expect("FEN should parse");
        make_move_in_place(&mut game, mv("e2", "e4", MoveKind::DoublePawnPush)).expect("make");
        assert_eq!(game.en_passant_square, Some(algebraic_to_square("e3").expect("e3")));
        assert_derived_consistent(&game);
    }

    #[test]
    fn promotion_swaps_pawn_for_promoted_piece() {
        let mut game = GameState::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1")
            .expect("FEN should parse");
        let before = game.clone();

        make_move_in_place(&mut game, mv("a7", "a8", MoveKind::PromoteQueen)).expect("make");
        assert_eq!(game.piece_counts[Color::Light.index()][PieceKind::Pawn.index()], 0);
        assert_eq!(game.piece_counts[Color::Light.index()][PieceKind::Queen.index()], 1);
        assert_eq!(game.phase, phase_weight(PieceKind::Queen));
        assert_derived_consistent(&game);

        unmake_move_in_place(&mut game).expect("unmake");
        assert_states_identical(&game, &before);
    }

    #[test]
    fn promotion_capture_round_trip() {
        let mut game = GameState::from_fen("1n5k/P7/8/8/8/8/8/K7 w - - 0 1")
            .expect("FEN should parse");
        let before = game.clone();

        make_move_in_place(&mut game, mv("a7", "b8", MoveKind::PromoteKnight)).expect("make");
        assert_eq!(game.piece_counts[Color::Dark.index()][PieceKind::Knight.index()], 0);
        assert_eq!(game.piece_counts[Color::Light.index()][PieceKind::Knight.index()], 1);
        assert_derived_consistent(&game);

        unmake_move_in_place(&mut game).expect("unmake");
        assert_states_identical(&game, &before);
    }

    #[test]
    fn null_move_round_trip_toggles_side_once() {
        let mut game = GameState::from_fen(
            "rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 3",
        )
        .expect("FEN should parse");
        let before = game.clone();

        make_null_move_in_place(&mut game);
        assert_eq!(game.side_to_move, Color::Light);
        assert_eq!(game.en_passant_square, None);
        assert_eq!(game.halfmove_clock, before.halfmove_clock + 1);
        assert_eq!(game.zobrist_key, game.compute_zobrist_key());

        unmake_null_move_in_place(&mut game).expect("unmake null");
        assert_states_identical(&game, &before);
    }

    #[test]
    fn unmake_on_empty_stack_is_an_error() {
        let mut game = GameState::new_game();
        assert!(unmake_move_in_place(&mut game).is_err());
        assert!(unmake_null_move_in_place(&mut game).is_err());
    }

    #[test]
    fn mismatched_unmake_kind_is_an_error() {
        let mut game = GameState::new_game();
        make_null_move_in_place(&mut game);
        assert!(unmake_move_in_place(&mut game).is_err());
        unmake_null_move_in_place(&mut game).expect("unmake null");
    }
}

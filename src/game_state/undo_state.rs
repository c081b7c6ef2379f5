use crate::game_state::chess_types::*;

/// Undo record pushed by `make_move_in_place` / `make_null_move_in_place`.
///
/// Captures exactly the fields that cannot be reconstructed by replaying the
/// move backward; bitboards, scores, phase, and counts are reversed
/// arithmetically instead. Records must be consumed strictly LIFO.
#[derive(Debug, Clone)]
pub enum UndoState {
    Move(MoveUndo),
    Null(NullUndo),
}

#[derive(Debug, Clone)]
pub struct MoveUndo {
    pub mv: Move,
    pub moved_piece: PieceKind,
    pub captured_piece: Option<PieceKind>,

    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_square: Option<Square>,
    pub prev_halfmove_clock: u16,

    pub prev_zobrist_key: u64,
    pub prev_pawn_zobrist_key: u64,
}

/// Null moves never capture, promote, or castle; only the en-passant square
/// and the full hash need saving.
#[derive(Debug, Clone)]
pub struct NullUndo {
    pub prev_en_passant_square: Option<Square>,
    pub prev_zobrist_key: u64,
}

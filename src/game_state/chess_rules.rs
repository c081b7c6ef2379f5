//! Canonical chess-rule constants.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Halfmove-clock threshold for the fifty-move draw rule (in half moves).
pub const FIFTY_MOVE_HALFMOVE_LIMIT: u16 = 100;

//! Pluggable board evaluation interfaces and the baseline tapered scorer.
//!
//! Search delegates static position scoring to the `BoardScorer` trait so
//! alternate heuristics can be swapped without touching search code. The
//! baseline implementation reads the incremental midgame/endgame accumulators
//! and the material phase counter straight off `GameState`, so a stand-pat
//! evaluation costs a handful of arithmetic ops.
//!
//! This module also owns the tables those accumulators are built from, plus
//! from-scratch recompute helpers used by FEN setup and the consistency tests.

use crate::game_state::chess_types::*;

pub const INF: i32 = 32767;
pub const MATE_SCORE: i32 = 32000;
pub const DRAW_SCORE: i32 = 0;

/// Material phase at the starting position; 0 means a pure endgame.
pub const TOTAL_PHASE: i32 = 24;

/// Plain material values used by the exchange evaluator and pruning margins.
#[inline]
pub const fn exchange_value(piece: PieceKind) -> i32 {
    match piece {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 325,
        PieceKind::Bishop => 325,
        PieceKind::Rook => 500,
        PieceKind::Queen => 1000,
        PieceKind::King => 0,
    }
}

/// Contribution of a piece to the game-phase counter.
#[inline]
pub const fn phase_weight(piece: PieceKind) -> i32 {
    match piece {
        PieceKind::Pawn => 0,
        PieceKind::Knight => 1,
        PieceKind::Bishop => 1,
        PieceKind::Rook => 2,
        PieceKind::Queen => 4,
        PieceKind::King => 0,
    }
}

const MG_BASE: [i32; 6] = [100, 320, 330, 500, 900, 0];
const EG_BASE: [i32; 6] = [120, 300, 320, 520, 930, 0];

// Piece-square tables, written as seen from the light side with rank 8 as the
// first source row. Index with `relative_square`.

#[rustfmt::skip]
const MG_TABLE: [[i32; 64]; 6] = [
    // Pawn
    [
          0,   0,   0,   0,   0,   0,   0,   0,
         50,  50,  50,  50,  50,  50,  50,  50,
         10,  10,  20,  30,  30,  20,  10,  10,
          5,   5,  10,  25,  25,  10,   5,   5,
          0,   0,   0,  20,  20,   0,   0,   0,
          5,  -5, -10,   0,   0, -10,  -5,   5,
          5,  10,  10, -20, -20,  10,  10,   5,
          0,   0,   0,   0,   0,   0,   0,   0,
    ],
    // Knight
    [
        -50, -40, -30, -30, -30, -30, -40, -50,
        -40, -20,   0,   0,   0,   0, -20, -40,
        -30,   0,  10,  15,  15,  10,   0, -30,
        -30,   5,  15,  20,  20,  15,   5, -30,
        -30,   0,  15,  20,  20,  15,   0, -30,
        -30,   5,  10,  15,  15,  10,   5, -30,
        -40, -20,   0,   5,   5,   0, -20, -40,
        -50, -40, -30, -30, -30, -30, -40, -50,
    ],
    // Bishop
    [
        -20, -10, -10, -10, -10, -10, -10, -20,
        -10,   0,   0,   0,   0,   0,   0, -10,
        -10,   0,   5,  10,  10,   5,   0, -10,
        -10,   5,   5,  10,  10,   5,   5, -10,
        -10,   0,  10,  10,  10,  10,   0, -10,
        -10,  10,  10,  10,  10,  10,  10, -10,
        -10,   5,   0,   0,   0,   0,   5, -10,
        -20, -10, -10, -10, -10, -10, -10, -20,
    ],
    // Rook
    [
          0,   0,   0,   0,   0,   0,   0,   0,
          5,  10,  10,  10,  10,  10,  10,   5,
         -5,   0,   0,   0,   0,   0,   0,  -5,
         -5,   0,   0,   0,   0,   0,   0,  -5,
         -5,   0,   0,   0,   0,   0,   0,  -5,
         -5,   0,   0,   0,   0,   0,   0,  -5,
         -5,   0,   0,   0,   0,   0,   0,  -5,
          0,   0,   0,   5,   5,   0,   0,   0,
    ],
    // Queen
    [
        -20, -10, -10,  -5,  -5, -10, -10, -20,
        -10,   0,   0,   0,   0,   0,   0, -10,
        -10,   0,   5,   5,   5,   5,   0, -10,
         -5,   0,   5,   5,   5,   5,   0,  -5,
          0,   0,   5,   5,   5,   5,   0,  -5,
        -10,   5,   5,   5,   5,   5,   0, -10,
        -10,   0,   5,   0,   0,   0,   0, -10,
        -20, -10, -10,  -5,  -5, -10, -10, -20,
    ],
    // King (midgame: stay castled, shelter behind pawns)
    [
        -30, -40, -40, -50, -50, -40, -40, -30,
        -30, -40, -40, -50, -50, -40, -40, -30,
        -30, -40, -40, -50, -50, -40, -40, -30,
        -30, -40, -40, -50, -50, -40, -40, -30,
        -20, -30, -30, -40, -40, -30, -30, -20,
        -10, -20, -20, -20, -20, -20, -20, -10,
         20,  20,   0,   0,   0,   0,  20,  20,
         20,  30,  10,   0,   0,  10,  30,  20,
    ],
];

#[rustfmt::skip]
const EG_TABLE: [[i32; 64]; 6] = [
    // Pawn (endgame: push toward promotion)
    [
          0,   0,   0,   0,   0,   0,   0,   0,
         80,  80,  80,  80,  80,  80,  80,  80,
         50,  50,  50,  50,  50,  50,  50,  50,
         30,  30,  30,  30,  30,  30,  30,  30,
         15,  15,  15,  15,  15,  15,  15,  15,
          5,   5,   5,   5,   5,   5,   5,   5,
          0,   0,   0,   0,   0,   0,   0,   0,
          0,   0,   0,   0,   0,   0,   0,   0,
    ],
    // Knight
    [
        -50, -40, -30, -30, -30, -30, -40, -50,
        -40, -20,   0,   0,   0,   0, -20, -40,
        -30,   0,  10,  15,  15,  10,   0, -30,
        -30,   5,  15,  20,  20,  15,   5, -30,
        -30,   0,  15,  20,  20,  15,   0, -30,
        -30,   5,  10,  15,  15,  10,   5, -30,
        -40, -20,   0,   5,   5,   0, -20, -40,
        -50, -40, -30, -30, -30, -30, -40, -50,
    ],
    // Bishop
    [
        -20, -10, -10, -10, -10, -10, -10, -20,
        -10,   0,   0,   0,   0,   0,   0, -10,
        -10,   0,   5,  10,  10,   5,   0, -10,
        -10,   5,   5,  10,  10,   5,   5, -10,
        -10,   0,  10,  10,  10,  10,   0, -10,
        -10,  10,  10,  10,  10,  10,  10, -10,
        -10,   5,   0,   0,   0,   0,   5, -10,
        -20, -10, -10, -10, -10, -10, -10, -20,
    ],
    // Rook
    [
          0,   0,   0,   0,   0,   0,   0,   0,
          5,  10,  10,  10,  10,  10,  10,   5,
         -5,   0,   0,   0,   0,   0,   0,  -5,
         -5,   0,   0,   0,   0,   0,   0,  -5,
         -5,   0,   0,   0,   0,   0,   0,  -5,
         -5,   0,   0,   0,   0,   0,   0,  -5,
         -5,   0,   0,   0,   0,   0,   0,  -5,
          0,   0,   0,   0,   0,   0,   0,   0,
    ],
    // Queen
    [
        -20, -10, -10,  -5,  -5, -10, -10, -20,
        -10,   0,   0,   0,   0,   0,   0, -10,
        -10,   0,   5,   5,   5,   5,   0, -10,
         -5,   0,   5,   5,   5,   5,   0,  -5,
          0,   0,   5,   5,   5,   5,   0,  -5,
        -10,   0,   5,   5,   5,   5,   0, -10,
        -10,   0,   0,   0,   0,   0,   0, -10,
        -20, -10, -10,  -5,  -5, -10, -10, -20,
    ],
    // King (endgame: centralize)
    [
        -50, -40, -30, -20, -20, -30, -40, -50,
        -30, -20, -10,   0,   0, -10, -20, -30,
        -30, -10,  20,  30,  30,  20, -10, -30,
        -30, -10,  30,  40,  40,  30, -10, -30,
        -30, -10,  30,  40,  40,  30, -10, -30,
        -30, -10,  20,  30,  30,  20, -10, -30,
        -30, -30,   0,   0,   0,   0, -30, -30,
        -50, -30, -30, -30, -30, -30, -30, -50,
    ],
];

/// Table index for `square` as seen from `color`'s side of the board.
#[inline]
const fn relative_square(color: Color, square: Square) -> usize {
    match color {
        Color::Light => (square ^ 56) as usize,
        Color::Dark => square as usize,
    }
}

/// Midgame value (material plus placement) of `piece` of `color` on `square`.
#[inline]
pub fn pst_mg(color: Color, piece: PieceKind, square: Square) -> i32 {
    MG_BASE[piece.index()] + MG_TABLE[piece.index()][relative_square(color, square)]
}

/// Endgame value (material plus placement) of `piece` of `color` on `square`.
#[inline]
pub fn pst_eg(color: Color, piece: PieceKind, square: Square) -> i32 {
    EG_BASE[piece.index()] + EG_TABLE[piece.index()][relative_square(color, square)]
}

/// Rebuild both score accumulators from the bitboards. Returns `(mg, eg)`
/// indexed by color. Used by FEN setup and the incremental-consistency tests.
pub fn recompute_scores(game_state: &GameState) -> ([i32; 2], [i32; 2]) {
    let mut mg = [0i32; 2];
    let mut eg = [0i32; 2];

    for color in Color::BOTH {
        for piece in PieceKind::ALL {
            let mut bb = game_state.pieces[color.index()][piece.index()];
            while bb != 0 {
                let sq = bb.trailing_zeros() as Square;
                bb &= bb - 1;
                mg[color.index()] += pst_mg(color, piece, sq);
                eg[color.index()] += pst_eg(color, piece, sq);
            }
        }
    }

    (mg, eg)
}

/// Rebuild the game-phase counter from the bitboards.
pub fn recompute_phase(game_state: &GameState) -> i32 {
    let mut phase = 0i32;
    for color in Color::BOTH {
        for piece in PieceKind::ALL {
            let count = game_state.pieces[color.index()][piece.index()].count_ones() as i32;
            phase += count * phase_weight(piece);
        }
    }
    phase
}

/// Rebuild the per-color piece-count table from the bitboards.
pub fn recompute_piece_counts(game_state: &GameState) -> [[u8; 6]; 2] {
    let mut counts = [[0u8; 6]; 2];
    for color in Color::BOTH {
        for piece in PieceKind::ALL {
            counts[color.index()][piece.index()] =
                game_state.pieces[color.index()][piece.index()].count_ones() as u8;
        }
    }
    counts
}

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of the side to move.
    fn score(&self, game_state: &GameState) -> i32;
}

/// Baseline evaluator: phase-interpolated PST accumulators.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaperedScorer;

impl BoardScorer for TaperedScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        let side = game_state.side_to_move;
        let opp = side.opposite();

        let mg = game_state.mg_score[side.index()] - game_state.mg_score[opp.index()];
        let eg = game_state.eg_score[side.index()] - game_state.eg_score[opp.index()];

        let phase = game_state.phase.clamp(0, TOTAL_PHASE);
        (mg * phase + eg * (TOTAL_PHASE - phase)) / TOTAL_PHASE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::game_state::GameState;

    #[test]
    fn starting_position_is_balanced() {
        let game = GameState::new_game();
        assert_eq!(TaperedScorer.score(&game), 0);
        assert_eq!(game.phase, TOTAL_PHASE);
    }

    #[test]
    fn pst_is_mirror_symmetric_between_colors() {
        // d4 for light mirrors d5 for dark.
        let d4 = 27u8;
        let d5 = 35u8;
        for piece in PieceKind::ALL {
            assert_eq!(
                pst_mg(Color::Light, piece, d4),
                pst_mg(Color::Dark, piece, d5)
            );
            assert_eq!(
                pst_eg(Color::Light, piece, d4),
                pst_eg(Color::Dark, piece, d5)
            );
        }
    }

    #[test]
    fn material_up_side_scores_positive() {
        // Light has an extra rook in a bare-kings position.
        let game = GameState::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1")
            .expect("FEN should parse");
        assert!(TaperedScorer.score(&game) > 400);
    }
}

//! Core incremental board state representation.
//!
//! `GameState` is the central model for the search core. It stores piece
//! bitboards, occupancy caches, turn/state flags, clocks, both incremental
//! Zobrist keys, the incremental midgame/endgame score accumulators with the
//! material phase counter, per-color piece counts, cached king squares, and
//! the history stacks used by make/unmake workflows.
//!
//! Invariant: after any mutation the redundant fields (occupancies, counts,
//! king squares, hash keys, score accumulators, phase) must agree with what a
//! from-scratch recompute over the bitboards would produce. The recompute
//! helpers in `search::board_scoring` and the `refresh_derived_state` method
//! here exist so tests can assert exactly that.

use crate::game_state::chess_rules::{FIFTY_MOVE_HALFMOVE_LIMIT, STARTING_POSITION_FEN};
use crate::game_state::chess_types::*;
use crate::search::board_scoring::{recompute_phase, recompute_piece_counts, recompute_scores};
use crate::search::zobrist;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

/// Incremental game state optimized for fast move making/unmaking.
#[derive(Debug, Clone)]
pub struct GameState {
    // --- Bitboard representation ---
    // [color][piece_kind]
    pub pieces: [[u64; 6]; 2],

    // Occupancy caches.
    pub occupancy_by_color: [u64; 2],
    pub occupancy_all: u64,

    // --- Side and state flags ---
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    // --- Clocks / move counters ---
    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    // --- Incremental hashing ---
    pub zobrist_key: u64,
    pub pawn_zobrist_key: u64,

    // --- Incremental evaluation state ---
    pub mg_score: [i32; 2],
    pub eg_score: [i32; 2],
    pub phase: i32,
    pub piece_counts: [[u8; 6]; 2],
    pub king_squares: [Square; 2],

    // --- Search / repetition support ---
    pub ply: u16,
    pub repetition_history: Vec<u64>,

    // --- Make/unmake stack ---
    pub undo_stack: Vec<UndoState>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,

            side_to_move: Color::Light,
            castling_rights: 0,
            en_passant_square: None,

            halfmove_clock: 0,
            fullmove_number: 1,

            zobrist_key: 0,
            pawn_zobrist_key: 0,

            mg_score: [0; 2],
            eg_score: [0; 2],
            phase: 0,
            piece_counts: [[0; 6]; 2],
            king_squares: [0; 2],

            ply: 0,
            repetition_history: Vec::new(),
            undo_stack: Vec::new(),
        }
    }
}

impl GameState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, String> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    /// Piece of `color` on `square`, if any.
    #[inline]
    pub fn piece_on_square_for_color(&self, color: Color, square: Square) -> Option<PieceKind> {
        let mask = 1u64 << square;
        if (self.occupancy_by_color[color.index()] & mask) == 0 {
            return None;
        }
        for piece in PieceKind::ALL {
            if (self.pieces[color.index()][piece.index()] & mask) != 0 {
                return Some(piece);
            }
        }
        None
    }

    /// Piece of either color on `square`, if any.
    #[inline]
    pub fn piece_on_square(&self, square: Square) -> Option<(Color, PieceKind)> {
        for color in Color::BOTH {
            if let Some(piece) = self.piece_on_square_for_color(color, square) {
                return Some((color, piece));
            }
        }
        None
    }

    /// Rebuild every derived/incremental field from the piece bitboards.
    /// Called after FEN setup; also the reference point for consistency tests.
    pub fn refresh_derived_state(&mut self) {
        self.occupancy_by_color[Color::Light.index()] = self.pieces[Color::Light.index()]
            .iter()
            .copied()
            .fold(0u64, |acc, bb| acc | bb);
        self.occupancy_by_color[Color::Dark.index()] = self.pieces[Color::Dark.index()]
            .iter()
            .copied()
            .fold(0u64, |acc, bb| acc | bb);
        self.occupancy_all = self.occupancy_by_color[Color::Light.index()]
            | self.occupancy_by_color[Color::Dark.index()];

        self.zobrist_key = self.compute_zobrist_key();
        self.pawn_zobrist_key = self.compute_pawn_zobrist_key();

        let (mg, eg) = recompute_scores(self);
        self.mg_score = mg;
        self.eg_score = eg;
        self.phase = recompute_phase(self);
        self.piece_counts = recompute_piece_counts(self);

        for color in Color::BOTH {
            let kings = self.pieces[color.index()][PieceKind::King.index()];
            if kings != 0 {
                self.king_squares[color.index()] = kings.trailing_zeros() as Square;
            }
        }
    }

    /// Full position key from scratch: pieces, side, castling rights,
    /// en-passant file.
    pub fn compute_zobrist_key(&self) -> u64 {
        let mut key = 0u64;

        for color in Color::BOTH {
            for piece in PieceKind::ALL {
                let mut bb = self.pieces[color.index()][piece.index()];
                while bb != 0 {
                    let sq = bb.trailing_zeros() as Square;
                    bb &= bb - 1;
                    key ^= zobrist::piece_square_key(color, piece, sq);
                }
            }
        }

        key ^= zobrist::castling_key(self.castling_rights);
        if self.side_to_move == Color::Dark {
            key ^= zobrist::side_to_move_key();
        }
        if let Some(ep_sq) = self.en_passant_square {
            key ^= zobrist::en_passant_file_key(square_file(ep_sq));
        }

        key
    }

    /// Pawn-structure key from scratch: pawns and kings only.
    pub fn compute_pawn_zobrist_key(&self) -> u64 {
        let mut key = 0u64;

        for color in Color::BOTH {
            for piece in [PieceKind::Pawn, PieceKind::King] {
                let mut bb = self.pieces[color.index()][piece.index()];
                while bb != 0 {
                    let sq = bb.trailing_zeros() as Square;
                    bb &= bb - 1;
                    key ^= zobrist::piece_square_key(color, piece, sq);
                }
            }
        }

        key
    }

    /// Fifty-move-rule or repetition draw. The repetition scan only needs to
    /// look back as far as the last irreversible move.
    pub fn is_draw_state(&self) -> bool {
        if self.halfmove_clock >= FIFTY_MOVE_HALFMOVE_LIMIT {
            return true;
        }

        let lookback = (self.halfmove_clock as usize).min(self.repetition_history.len());
        self.repetition_history
            .iter()
            .rev()
            .take(lookback)
            .any(|&key| key == self.zobrist_key)
    }
}

//! Zobrist hashing support for position identity and repetition tracking.
//!
//! The same piece-square keys feed both the full position key and the
//! pawn-structure key (which covers only pawns and kings), so the executor
//! can maintain the two incrementally with one table. Keys are generated
//! from a fixed seed so hashes are deterministic across runs, which keeps
//! tests and transposition-table debugging reproducible.

use std::sync::OnceLock;

use crate::game_state::chess_types::{CastlingRights, Color, PieceKind, Square};

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    side_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut seed: u64 = 0x9E37_79B9_7F4A_7C15;

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for color in &mut piece_square {
        for piece in color {
            for sq in piece {
                *sq = next_random_u64(&mut seed);
            }
        }
    }

    let side_to_move = next_random_u64(&mut seed);

    let mut castling = [0u64; 16];
    for key in &mut castling {
        *key = next_random_u64(&mut seed);
    }

    let mut en_passant_file = [0u64; 8];
    for key in &mut en_passant_file {
        *key = next_random_u64(&mut seed);
    }

    ZobristTables {
        piece_square,
        side_to_move,
        castling,
        en_passant_file,
    }
}

#[inline]
fn next_random_u64(state: &mut u64) -> u64 {
    // splitmix64
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Zobrist key for a `(color, piece, square)` occupancy term.
#[inline]
pub fn piece_square_key(color: Color, piece: PieceKind, square: Square) -> u64 {
    tables().piece_square[color.index()][piece.index()][square as usize]
}

/// Key contribution of a castling-rights mask (`0..=15`).
#[inline]
pub fn castling_key(castling_rights: CastlingRights) -> u64 {
    tables().castling[(castling_rights & 0x0F) as usize]
}

/// Key contribution of an en-passant file (`0..=7`).
#[inline]
pub fn en_passant_file_key(file: usize) -> u64 {
    tables().en_passant_file[file & 0x7]
}

/// Key contribution of the side to move being dark.
#[inline]
pub fn side_to_move_key() -> u64 {
    tables().side_to_move
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_deterministic_across_lookups() {
        let a = piece_square_key(Color::Light, PieceKind::Knight, 42);
        let b = piece_square_key(Color::Light, PieceKind::Knight, 42);
        assert_eq!(a, b);
        assert_ne!(a, piece_square_key(Color::Dark, PieceKind::Knight, 42));
    }

    #[test]
    fn distinct_terms_get_distinct_keys() {
        assert_ne!(castling_key(0), castling_key(0x0F));
        assert_ne!(en_passant_file_key(0), en_passant_file_key(7));
        assert_ne!(side_to_move_key(), 0);
    }
}

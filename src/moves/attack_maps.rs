//! Attack bitboard generation.
//!
//! Const-generated leaper tables (knight, king, pawn) and occupancy-aware
//! sliding attacks via ray scans. These routines back move generation, check
//! detection, and the static exchange evaluator, which re-derives sliding
//! attacks after every simulated removal.

use crate::game_state::chess_types::Color;

pub const KNIGHT_ATTACKS: [u64; 64] = generate_leaper_attacks(&KNIGHT_OFFSETS);
pub const KING_ATTACKS: [u64; 64] = generate_leaper_attacks(&KING_OFFSETS);
pub const LIGHT_PAWN_ATTACKS: [u64; 64] = generate_leaper_attacks(&LIGHT_PAWN_OFFSETS);
pub const DARK_PAWN_ATTACKS: [u64; 64] = generate_leaper_attacks(&DARK_PAWN_OFFSETS);

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_OFFSETS: [(i32, i32); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const LIGHT_PAWN_OFFSETS: [(i32, i32); 2] = [(-1, 1), (1, 1)];
const DARK_PAWN_OFFSETS: [(i32, i32); 2] = [(-1, -1), (1, -1)];

#[inline]
pub const fn knight_attacks(square: u8) -> u64 {
    KNIGHT_ATTACKS[square as usize]
}

#[inline]
pub const fn king_attacks(square: u8) -> u64 {
    KING_ATTACKS[square as usize]
}

/// Squares a pawn of `color` standing on `square` attacks.
#[inline]
pub const fn pawn_attacks(color: Color, square: u8) -> u64 {
    match color {
        Color::Light => LIGHT_PAWN_ATTACKS[square as usize],
        Color::Dark => DARK_PAWN_ATTACKS[square as usize],
    }
}

#[inline]
pub fn bishop_attacks(square: u8, occupancy: u64) -> u64 {
    trace_ray(square, 1, 1, occupancy)
        | trace_ray(square, -1, 1, occupancy)
        | trace_ray(square, 1, -1, occupancy)
        | trace_ray(square, -1, -1, occupancy)
}

#[inline]
pub fn rook_attacks(square: u8, occupancy: u64) -> u64 {
    trace_ray(square, 1, 0, occupancy)
        | trace_ray(square, -1, 0, occupancy)
        | trace_ray(square, 0, 1, occupancy)
        | trace_ray(square, 0, -1, occupancy)
}

#[inline]
pub fn queen_attacks(square: u8, occupancy: u64) -> u64 {
    bishop_attacks(square, occupancy) | rook_attacks(square, occupancy)
}

fn trace_ray(square: u8, file_step: i32, rank_step: i32, occupancy: u64) -> u64 {
    let mut file = ((square % 8) as i32) + file_step;
    let mut rank = ((square / 8) as i32) + rank_step;
    let mut attacks = 0u64;

    while (0..8).contains(&file) && (0..8).contains(&rank) {
        let bit = 1u64 << (rank * 8 + file);
        attacks |= bit;
        if (occupancy & bit) != 0 {
            break;
        }
        file += file_step;
        rank += rank_step;
    }

    attacks
}

const fn generate_leaper_attacks<const N: usize>(offsets: &[(i32, i32); N]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;
        let mut i = 0usize;

        while i < N {
            let f = file + offsets[i].0;
            let r = rank + offsets[i].1;
            if f >= 0 && f < 8 && r >= 0 && r < 8 {
                attacks |= 1u64 << (r * 8 + f);
            }
            i += 1;
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}

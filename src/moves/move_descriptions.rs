//! Packed move descriptions.
//!
//! A move is a `u32`: six bits each for origin and destination, and a
//! three-bit kind tag covering the special-move dispatch the executor needs
//! (castling, en-passant capture, double pawn push, and the four promotions).
//! Captured pieces are not encoded; the executor reads them off the board so
//! a move stays valid across transposition-table round trips.

use crate::game_state::chess_types::{Move, PieceKind, Square};

const FROM_SHIFT: u32 = 0;
const TO_SHIFT: u32 = 6;
const KIND_SHIFT: u32 = 12;

const SQUARE_MASK: u32 = 0x3F;
const KIND_MASK: u32 = 0x7;

/// Sentinel for "no move" (a1->a1 normal move is never generated).
pub const NO_MOVE: Move = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Normal,
    Castle,
    EnPassantCapture,
    DoublePawnPush,
    PromoteKnight,
    PromoteBishop,
    PromoteRook,
    PromoteQueen,
}

impl MoveKind {
    #[inline]
    pub const fn code(self) -> u32 {
        match self {
            MoveKind::Normal => 0,
            MoveKind::Castle => 1,
            MoveKind::EnPassantCapture => 2,
            MoveKind::DoublePawnPush => 3,
            MoveKind::PromoteKnight => 4,
            MoveKind::PromoteBishop => 5,
            MoveKind::PromoteRook => 6,
            MoveKind::PromoteQueen => 7,
        }
    }

    #[inline]
    pub const fn from_code(code: u32) -> MoveKind {
        match code & KIND_MASK {
            1 => MoveKind::Castle,
            2 => MoveKind::EnPassantCapture,
            3 => MoveKind::DoublePawnPush,
            4 => MoveKind::PromoteKnight,
            5 => MoveKind::PromoteBishop,
            6 => MoveKind::PromoteRook,
            7 => MoveKind::PromoteQueen,
            _ => MoveKind::Normal,
        }
    }

    /// Promoted piece kind, for the four promotion tags.
    #[inline]
    pub const fn promotion_piece(self) -> Option<PieceKind> {
        match self {
            MoveKind::PromoteKnight => Some(PieceKind::Knight),
            MoveKind::PromoteBishop => Some(PieceKind::Bishop),
            MoveKind::PromoteRook => Some(PieceKind::Rook),
            MoveKind::PromoteQueen => Some(PieceKind::Queen),
            _ => None,
        }
    }
}

#[inline]
pub const fn pack_move(from: Square, to: Square, kind: MoveKind) -> Move {
    ((from as u32) << FROM_SHIFT) | ((to as u32) << TO_SHIFT) | (kind.code() << KIND_SHIFT)
}

#[inline]
pub const fn move_from(move_description: Move) -> Square {
    ((move_description >> FROM_SHIFT) & SQUARE_MASK) as Square
}

#[inline]
pub const fn move_to(move_description: Move) -> Square {
    ((move_description >> TO_SHIFT) & SQUARE_MASK) as Square
}

#[inline]
pub const fn move_kind(move_description: Move) -> MoveKind {
    MoveKind::from_code(move_description >> KIND_SHIFT)
}

#[inline]
pub const fn move_promotion_piece(move_description: Move) -> Option<PieceKind> {
    move_kind(move_description).promotion_piece()
}

//! Algebraic square and long-algebraic move formatting helpers.

use crate::game_state::chess_types::{Move, PieceKind, Square};
use crate::moves::move_descriptions::{move_from, move_promotion_piece, move_to};

pub fn algebraic_to_square(text: &str) -> Result<Square, String> {
    let mut chars = text.chars();

    let file_ch = chars.next().ok_or_else(|| "Empty square name".to_owned())?;
    let rank_ch = chars
        .next()
        .ok_or_else(|| format!("Square name too short: {text}"))?;
    if chars.next().is_some() {
        return Err(format!("Square name too long: {text}"));
    }

    let file = match file_ch {
        'a'..='h' => file_ch as u8 - b'a',
        _ => return Err(format!("Invalid file character: {file_ch}")),
    };
    let rank = match rank_ch {
        '1'..='8' => rank_ch as u8 - b'1',
        _ => return Err(format!("Invalid rank character: {rank_ch}")),
    };

    Ok(rank * 8 + file)
}

pub fn square_to_algebraic(square: Square) -> String {
    let file = char::from(b'a' + square % 8);
    let rank = char::from(b'1' + square / 8);
    format!("{file}{rank}")
}

/// Long-algebraic form (`e2e4`, `e7e8q`) used by tests and diagnostics.
pub fn move_to_long_algebraic(move_description: Move) -> String {
    let mut out = String::with_capacity(5);
    out.push_str(&square_to_algebraic(move_from(move_description)));
    out.push_str(&square_to_algebraic(move_to(move_description)));
    if let Some(promo) = move_promotion_piece(move_description) {
        out.push(match promo {
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            _ => 'q',
        });
    }
    out
}

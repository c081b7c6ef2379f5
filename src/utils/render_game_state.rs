//! ASCII board rendering for tests and diagnostics.

use crate::game_state::{chess_types::*, game_state::GameState};

pub fn render_game_state(game_state: &GameState) -> String {
    let mut out = String::new();

    for rank in (0..8).rev() {
        out.push(char::from(b'1' + rank as u8));
        out.push(' ');
        for file in 0..8 {
            let sq = (rank * 8 + file) as Square;
            out.push(piece_char(game_state, sq));
            out.push(' ');
        }
        out.push('\n');
    }
    out.push_str("  a b c d e f g h\n");

    out
}

fn piece_char(game_state: &GameState, square: Square) -> char {
    let Some((color, piece)) = game_state.piece_on_square(square) else {
        return '.';
    };

    let ch = match piece {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };

    match color {
        Color::Light => ch.to_ascii_uppercase(),
        Color::Dark => ch,
    }
}

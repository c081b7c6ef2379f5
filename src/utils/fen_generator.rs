//! GameState-to-FEN serializer.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::square_to_algebraic;

pub fn generate_fen(game_state: &GameState) -> String {
    let board = generate_board_field(game_state);
    let side_to_move = match game_state.side_to_move {
        Color::Light => "w",
        Color::Dark => "b",
    };
    let castling = generate_castling_field(game_state.castling_rights);
    let en_passant = generate_en_passant_field(game_state.en_passant_square);

    format!(
        "{} {} {} {} {} {}",
        board,
        side_to_move,
        castling,
        en_passant,
        game_state.halfmove_clock,
        game_state.fullmove_number
    )
}

fn generate_board_field(game_state: &GameState) -> String {
    let mut out = String::new();

    for rank in (0..8).rev() {
        let mut empty_count = 0u8;

        for file in 0..8 {
            let sq = (rank * 8 + file) as Square;
            if let Some(ch) = piece_fen_char_on_square(game_state, sq) {
                if empty_count > 0 {
                    out.push(char::from(b'0' + empty_count));
                    empty_count = 0;
                }
                out.push(ch);
            } else {
                empty_count += 1;
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if rank > 0 {
            out.push('/');
        }
    }

    out
}

fn piece_fen_char_on_square(game_state: &GameState, square: Square) -> Option<char> {
    let (color, piece) = game_state.piece_on_square(square)?;

    let ch = match piece {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };

    Some(match color {
        Color::Light => ch.to_ascii_uppercase(),
        Color::Dark => ch,
    })
}

fn generate_castling_field(rights: CastlingRights) -> String {
    if rights == 0 {
        return "-".to_owned();
    }

    let mut out = String::new();
    if rights & CASTLE_LIGHT_KINGSIDE != 0 {
        out.push('K');
    }
    if rights & CASTLE_LIGHT_QUEENSIDE != 0 {
        out.push('Q');
    }
    if rights & CASTLE_DARK_KINGSIDE != 0 {
        out.push('k');
    }
    if rights & CASTLE_DARK_QUEENSIDE != 0 {
        out.push('q');
    }
    out
}

fn generate_en_passant_field(en_passant_square: Option<Square>) -> String {
    match en_passant_square {
        Some(sq) => square_to_algebraic(sq),
        None => "-".to_owned(),
    }
}

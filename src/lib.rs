//! Crate root module declarations for the Quince Chess search core.
//!
//! This file exposes all top-level subsystems (game state, move encoding,
//! move generation, search, and utility helpers) so tests, benchmarks, and
//! external tooling can import stable module paths.

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod undo_state;
}

pub mod moves {
    pub mod attack_maps;
    pub mod move_descriptions;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod move_generator;
    pub mod perft;
    pub mod pseudo_legal;
}

pub mod search {
    pub mod board_scoring;
    pub mod history;
    pub mod quiescence;
    pub mod static_exchange;
    pub mod transposition_table;
    pub mod zobrist;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod random_playout;
    pub mod render_game_state;
}

pub mod api;
pub mod bitboard;
pub mod castling;
pub mod config;
pub mod constants;
pub mod engine;
pub mod fen;
pub mod moves;
pub mod piece;
pub mod position;
pub mod search;
pub mod side;
pub mod square;
pub mod types;
pub mod uci;

//! Bitboard chess move generation.
//!
//! This crate provides:
//! - [`Bitboard`] - 64-bit square set with efficient operations
//! - [`AttackTables`] - precomputed leaper attacks and magic bitboard (or
//!   ray scan) slider attacks, shareable across threads
//! - [`Board`] - position state with validation, attack queries and
//!   make/unmake backed by an undo stack
//! - Legal move generation with a pin-aware or a naive legality filter
//! - [`perft`] for validating the generator against known node counts
//! - Check, checkmate, stalemate and draw detection
//!
//! # Architecture
//!
//! Every piece type and color combination has a 64-bit integer where each
//! bit represents a square (a1 = bit 0, h8 = bit 63). Attack tables are
//! built once and shared through an [`Arc`](std::sync::Arc); each board
//! holds a handle, so boards on different threads can read the same tables
//! without locking. A board itself is owned by one thread at a time.
//!
//! # Example
//!
//! ```
//! use chess_movegen::{perft, Board, GameStatus};
//!
//! let mut board = Board::startpos();
//! assert_eq!(board.legal_moves().len(), 20);
//!
//! let e4 = board.find_move("e2e4").unwrap();
//! board.make_move(e4);
//! assert_eq!(board.status(), GameStatus::Ongoing);
//! board.unmake_move();
//!
//! assert_eq!(perft(&mut board, 3), 8902);
//! ```

mod bitboard;
pub mod board;
pub mod config;
pub mod movegen;
mod rules;

pub use bitboard::{Bitboard, Direction};
pub use board::{Board, BoardError, CastleSide, Undo};
pub use config::{ConfigError, MagicSource, SliderBackend, TableConfig};
pub use movegen::perft::{perft, perft_divide, perft_with};
pub use movegen::{
    generate_legal, generate_legal_naive, generate_legal_with, generate_pseudo_legal,
    AttackTables, LegalityFilter, MoveList, Slider, TableError,
};
pub use rules::{DrawReason, GameStatus};

pub use chess_types::{
    CastlingRights, Color, FenError, File, Move, MoveFlag, Piece, PositionSetup, Rank, Square,
};

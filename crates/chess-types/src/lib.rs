//! Core types for chess.
//!
//! This crate provides the fundamental types used by the move generator:
//! - [`Piece`] and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Move`] for move representation
//! - [`PositionSetup`] and [`CastlingRights`] for describing a position
//! - FEN parsing and serialization of [`PositionSetup`]

mod color;
mod fen;
mod mov;
mod piece;
mod setup;
mod square;

pub use color::Color;
pub use fen::FenError;
pub use mov::{Move, MoveFlag};
pub use piece::Piece;
pub use setup::{CastlingRights, PositionSetup};
pub use square::{File, Rank, Square};

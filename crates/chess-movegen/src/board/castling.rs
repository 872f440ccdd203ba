//! Castling geometry and the per-square rights mask.

use crate::Bitboard;
use chess_types::{CastlingRights, Color, MoveFlag, Square};
use std::fmt;

/// The wing a king castles towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    /// Both sides, kingside first.
    pub const ALL: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    /// The move flag for castling on this side.
    #[inline]
    pub const fn flag(self) -> MoveFlag {
        match self {
            CastleSide::Kingside => MoveFlag::CastleKingside,
            CastleSide::Queenside => MoveFlag::CastleQueenside,
        }
    }

    /// The side a castling flag refers to.
    #[inline]
    pub const fn from_flag(flag: MoveFlag) -> Option<Self> {
        match flag {
            MoveFlag::CastleKingside => Some(CastleSide::Kingside),
            MoveFlag::CastleQueenside => Some(CastleSide::Queenside),
            _ => None,
        }
    }

    /// The castling-rights flag for `color` castling on this side.
    #[inline]
    pub const fn right(self, color: Color) -> u8 {
        match self {
            CastleSide::Kingside => CastlingRights::kingside_flag(color),
            CastleSide::Queenside => CastlingRights::queenside_flag(color),
        }
    }
}

impl fmt::Display for CastleSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CastleSide::Kingside => write!(f, "kingside"),
            CastleSide::Queenside => write!(f, "queenside"),
        }
    }
}

/// Squares involved in one castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlePath {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares between king and rook; all must be empty.
    pub must_be_empty: Bitboard,
    /// Squares the king crosses, landing square included; none may be
    /// attacked.
    pub king_path: Bitboard,
}

/// Returns the castling geometry for `color` on `side`.
pub const fn castle_path(color: Color, side: CastleSide) -> CastlePath {
    match (color, side) {
        (Color::White, CastleSide::Kingside) => CastlePath {
            king_from: Square::E1,
            king_to: Square::G1,
            rook_from: Square::H1,
            rook_to: Square::F1,
            must_be_empty: Bitboard::new(0x0000_0000_0000_0060),
            king_path: Bitboard::new(0x0000_0000_0000_0060),
        },
        (Color::White, CastleSide::Queenside) => CastlePath {
            king_from: Square::E1,
            king_to: Square::C1,
            rook_from: Square::A1,
            rook_to: Square::D1,
            must_be_empty: Bitboard::new(0x0000_0000_0000_000E),
            king_path: Bitboard::new(0x0000_0000_0000_000C),
        },
        (Color::Black, CastleSide::Kingside) => CastlePath {
            king_from: Square::E8,
            king_to: Square::G8,
            rook_from: Square::H8,
            rook_to: Square::F8,
            must_be_empty: Bitboard::new(0x6000_0000_0000_0000),
            king_path: Bitboard::new(0x6000_0000_0000_0000),
        },
        (Color::Black, CastleSide::Queenside) => CastlePath {
            king_from: Square::E8,
            king_to: Square::C8,
            rook_from: Square::A8,
            rook_to: Square::D8,
            must_be_empty: Bitboard::new(0x0E00_0000_0000_0000),
            king_path: Bitboard::new(0x0C00_0000_0000_0000),
        },
    }
}

/// Castling rights that survive a move touching each square.
const RIGHTS_MASK: [u8; 64] = compute_rights_mask();

const fn compute_rights_mask() -> [u8; 64] {
    let mut mask = [0b1111u8; 64];
    mask[Square::A1.index() as usize] = !CastlingRights::WHITE_QUEENSIDE;
    mask[Square::H1.index() as usize] = !CastlingRights::WHITE_KINGSIDE;
    mask[Square::E1.index() as usize] =
        !(CastlingRights::WHITE_KINGSIDE | CastlingRights::WHITE_QUEENSIDE);
    mask[Square::A8.index() as usize] = !CastlingRights::BLACK_QUEENSIDE;
    mask[Square::H8.index() as usize] = !CastlingRights::BLACK_KINGSIDE;
    mask[Square::E8.index() as usize] =
        !(CastlingRights::BLACK_KINGSIDE | CastlingRights::BLACK_QUEENSIDE);
    mask
}

/// Rights kept when a move leaves from or lands on `sq`.
///
/// A king or rook leaving its home square and any capture on a rook's home
/// square both clear the matching rights.
#[inline]
pub(crate) const fn rights_mask(sq: Square) -> u8 {
    RIGHTS_MASK[sq.index() as usize]
}

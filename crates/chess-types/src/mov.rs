//! Move representation.

use crate::{Piece, Square};
use std::fmt;

/// Flags for special move types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveFlag {
    /// Normal move or capture (no special action).
    Normal = 0,
    /// Pawn double push from starting rank.
    DoublePush = 1,
    /// Kingside castling (O-O).
    CastleKingside = 2,
    /// Queenside castling (O-O-O).
    CastleQueenside = 3,
    /// En passant capture.
    EnPassant = 4,
    /// Pawn promotion to knight.
    PromoteKnight = 5,
    /// Pawn promotion to bishop.
    PromoteBishop = 6,
    /// Pawn promotion to rook.
    PromoteRook = 7,
    /// Pawn promotion to queen.
    PromoteQueen = 8,
}

impl MoveFlag {
    /// Returns the promotion flag for the given piece, if it is a valid
    /// promotion target.
    #[inline]
    pub const fn promote_to(piece: Piece) -> Option<Self> {
        match piece {
            Piece::Knight => Some(MoveFlag::PromoteKnight),
            Piece::Bishop => Some(MoveFlag::PromoteBishop),
            Piece::Rook => Some(MoveFlag::PromoteRook),
            Piece::Queen => Some(MoveFlag::PromoteQueen),
            Piece::Pawn | Piece::King => None,
        }
    }

    /// Returns the promotion piece if this is a promotion move.
    #[inline]
    pub const fn promotion_piece(self) -> Option<Piece> {
        match self {
            MoveFlag::PromoteKnight => Some(Piece::Knight),
            MoveFlag::PromoteBishop => Some(Piece::Bishop),
            MoveFlag::PromoteRook => Some(Piece::Rook),
            MoveFlag::PromoteQueen => Some(Piece::Queen),
            _ => None,
        }
    }

    /// Returns true if this is a promotion move.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.promotion_piece().is_some()
    }

    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveFlag::CastleKingside | MoveFlag::CastleQueenside)
    }

    const fn from_bits(bits: u32) -> Self {
        match bits {
            1 => MoveFlag::DoublePush,
            2 => MoveFlag::CastleKingside,
            3 => MoveFlag::CastleQueenside,
            4 => MoveFlag::EnPassant,
            5 => MoveFlag::PromoteKnight,
            6 => MoveFlag::PromoteBishop,
            7 => MoveFlag::PromoteRook,
            8 => MoveFlag::PromoteQueen,
            _ => MoveFlag::Normal,
        }
    }
}

/// A chess move.
///
/// Packed into 32 bits:
///
/// | bits  | field                          |
/// |-------|--------------------------------|
/// | 0-5   | from square                    |
/// | 6-11  | to square                      |
/// | 12-14 | moved piece                    |
/// | 15-17 | captured piece (7 = none)      |
/// | 18-21 | [`MoveFlag`]                   |
///
/// Castling is encoded as the king's move (e.g. e1g1). En passant records a
/// captured pawn even though the destination square is empty.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u32);

impl Move {
    const SQUARE_MASK: u32 = 0x3F;
    const PIECE_MASK: u32 = 0x7;
    const NO_CAPTURE: u32 = 0x7;
    const TO_SHIFT: u32 = 6;
    const PIECE_SHIFT: u32 = 12;
    const CAPTURED_SHIFT: u32 = 15;
    const FLAG_SHIFT: u32 = 18;

    /// Creates a new move.
    #[inline]
    pub const fn new(
        from: Square,
        to: Square,
        piece: Piece,
        captured: Option<Piece>,
        flag: MoveFlag,
    ) -> Self {
        let captured = match captured {
            Some(p) => p as u32,
            None => Self::NO_CAPTURE,
        };
        Move(
            from.index() as u32
                | (to.index() as u32) << Self::TO_SHIFT
                | (piece as u32) << Self::PIECE_SHIFT
                | captured << Self::CAPTURED_SHIFT
                | (flag as u32) << Self::FLAG_SHIFT,
        )
    }

    /// Creates a non-capturing move without special flags.
    #[inline]
    pub const fn quiet(from: Square, to: Square, piece: Piece) -> Self {
        Self::new(from, to, piece, None, MoveFlag::Normal)
    }

    /// Creates a plain capture.
    #[inline]
    pub const fn capture(from: Square, to: Square, piece: Piece, captured: Piece) -> Self {
        Self::new(from, to, piece, Some(captured), MoveFlag::Normal)
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Square {
        // SAFETY: masked to 6 bits, always valid square index
        unsafe { Square::from_index_unchecked((self.0 & Self::SQUARE_MASK) as u8) }
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        // SAFETY: masked to 6 bits, always valid square index
        unsafe {
            Square::from_index_unchecked(((self.0 >> Self::TO_SHIFT) & Self::SQUARE_MASK) as u8)
        }
    }

    /// Returns the piece being moved (a pawn for promotions).
    #[inline]
    pub const fn piece(self) -> Piece {
        match Piece::from_index(((self.0 >> Self::PIECE_SHIFT) & Self::PIECE_MASK) as u8) {
            Some(p) => p,
            None => Piece::Pawn,
        }
    }

    /// Returns the captured piece, if any.
    #[inline]
    pub const fn captured(self) -> Option<Piece> {
        Piece::from_index(((self.0 >> Self::CAPTURED_SHIFT) & Self::PIECE_MASK) as u8)
    }

    /// Returns the move flag.
    #[inline]
    pub const fn flag(self) -> MoveFlag {
        MoveFlag::from_bits(self.0 >> Self::FLAG_SHIFT)
    }

    /// Returns the promotion piece, if any.
    #[inline]
    pub const fn promotion(self) -> Option<Piece> {
        self.flag().promotion_piece()
    }

    /// Returns true if the move removes an enemy piece.
    #[inline]
    pub const fn is_capture(self) -> bool {
        self.captured().is_some()
    }

    /// Returns true if the move is a castling move.
    #[inline]
    pub const fn is_castling(self) -> bool {
        self.flag().is_castling()
    }

    /// Returns the UCI notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_uci(self) -> String {
        let promo = match self.promotion() {
            Some(Piece::Knight) => "n",
            Some(Piece::Bishop) => "b",
            Some(Piece::Rook) => "r",
            Some(Piece::Queen) => "q",
            _ => "",
        };
        format!("{}{}{}", self.from(), self.to(), promo)
    }

    /// A null move (used as placeholder, not a legal move).
    pub const NULL: Move = Move(0);
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} {}", self.to_uci(), self.piece())?;
        if let Some(captured) = self.captured() {
            write!(f, "x{}", captured)?;
        }
        if self.flag() != MoveFlag::Normal {
            write!(f, " {:?}", self.flag())?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

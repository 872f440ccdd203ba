//! Position status: check, checkmate, stalemate and draw conditions.

use crate::board::Board;
use crate::Bitboard;
use chess_types::{Color, Piece};

/// Status of the side to move, derived from its legal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// Legal moves exist and the king is not attacked.
    Ongoing,
    /// Legal moves exist and the king is attacked.
    Check,
    /// No legal moves and the king is attacked. The side to move lost.
    Checkmate,
    /// No legal moves and the king is not attacked.
    Stalemate,
}

impl GameStatus {
    /// Returns true for checkmate and stalemate.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate)
    }
}

/// Reason a position is drawn regardless of the moves available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawReason {
    /// Neither side can possibly deliver mate.
    InsufficientMaterial,
    /// 50-move rule (100 half-moves without pawn move or capture).
    FiftyMoveRule,
}

/// Squares of one color, a1 being dark.
const DARK_SQUARES: Bitboard = Bitboard::new(0xAA55_AA55_AA55_AA55);

impl Board {
    /// Reports whether the side to move is in check, mated or stalemated.
    pub fn status(&self) -> GameStatus {
        let has_moves = !self.legal_moves().is_empty();
        match (has_moves, self.in_check()) {
            (true, false) => GameStatus::Ongoing,
            (true, true) => GameStatus::Check,
            (false, true) => GameStatus::Checkmate,
            (false, false) => GameStatus::Stalemate,
        }
    }

    /// Returns the draw condition the position meets, if any.
    ///
    /// Insufficient material is reported first. Checkmate takes precedence
    /// over the fifty-move rule, so a mated position reports no draw.
    pub fn draw_reason(&self) -> Option<DrawReason> {
        if self.is_insufficient_material() {
            return Some(DrawReason::InsufficientMaterial);
        }
        if self.halfmove_clock() >= 100 && self.status() != GameStatus::Checkmate {
            return Some(DrawReason::FiftyMoveRule);
        }
        None
    }

    /// Returns true if neither side has enough material to checkmate:
    /// bare kings, a single minor piece, or only bishops that all stand on
    /// squares of the same color.
    pub fn is_insufficient_material(&self) -> bool {
        let both =
            |piece: Piece| self.pieces(piece, Color::White) | self.pieces(piece, Color::Black);
        if (both(Piece::Pawn) | both(Piece::Rook) | both(Piece::Queen)).is_not_empty() {
            return false;
        }

        let knights = both(Piece::Knight);
        let bishops = both(Piece::Bishop);
        if (knights | bishops).count() <= 1 {
            return true;
        }
        knights.is_empty()
            && ((bishops & DARK_SQUARES).is_empty() || (bishops - DARK_SQUARES).is_empty())
    }
}

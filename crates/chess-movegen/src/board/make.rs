//! Making and unmaking moves.

use super::{castle_path, rights_mask, Board, CastleSide};
use chess_types::{CastlingRights, Color, Move, MoveFlag, Piece, Square};

/// State a move destroys, saved so the move can be undone exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Undo {
    /// The move that was made.
    pub mv: Move,
    /// Castling rights before the move.
    pub castling: CastlingRights,
    /// En passant target before the move.
    pub en_passant: Option<Square>,
    /// Halfmove clock before the move.
    pub halfmove_clock: u32,
    /// The captured piece and the square it stood on. For en passant this
    /// is not the destination square.
    pub captured: Option<(Piece, Square)>,
}

impl Board {
    /// Applies a move and pushes its [`Undo`] record.
    ///
    /// The move must come from this board's own move generator for the
    /// current position. Nothing is validated in release builds; debug
    /// builds assert that the move matches the board.
    pub fn make_move(&mut self, mv: Move) {
        let us = self.side_to_move;
        let them = us.opposite();
        let from = mv.from();
        let to = mv.to();
        let piece = mv.piece();
        debug_assert_eq!(
            self.piece_at(from),
            Some((piece, us)),
            "{mv:?} does not match the board {self}"
        );

        let captured = match mv.flag() {
            MoveFlag::EnPassant => to
                .offset(0, -us.pawn_direction())
                .map(|victim| (Piece::Pawn, victim)),
            _ => mv.captured().map(|victim| (victim, to)),
        };
        debug_assert!(
            captured.map_or(!self.occupied.contains(to), |(victim, sq)| {
                self.piece_at(sq) == Some((victim, them))
            }),
            "{mv:?} disagrees with the board about its capture in {self}"
        );

        self.history.push(Undo {
            mv,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            captured,
        });

        if let Some((victim, sq)) = captured {
            self.toggle_piece(victim, them, sq);
        }
        self.toggle_piece(piece, us, from);
        self.toggle_piece(mv.promotion().unwrap_or(piece), us, to);
        if let Some(side) = CastleSide::from_flag(mv.flag()) {
            let path = castle_path(us, side);
            self.toggle_piece(Piece::Rook, us, path.rook_from);
            self.toggle_piece(Piece::Rook, us, path.rook_to);
        }

        self.castling = self.castling.restrict(rights_mask(from) & rights_mask(to));
        self.en_passant = match mv.flag() {
            MoveFlag::DoublePush => from.offset(0, us.pawn_direction()),
            _ => None,
        };
        if piece == Piece::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if us == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = them;

        debug_assert!(self.is_consistent(), "inconsistent after {mv:?}: {self:?}");
    }

    /// Takes back the most recent move and returns it.
    ///
    /// Calling this with no move to undo is a contract violation: debug
    /// builds panic, release builds return `None` and leave the board alone.
    pub fn unmake_move(&mut self) -> Option<Move> {
        debug_assert!(!self.history.is_empty(), "unmake_move with no move to undo");
        let undo = self.history.pop()?;
        let mv = undo.mv;
        let us = self.side_to_move.opposite();
        let piece = mv.piece();

        if let Some(side) = CastleSide::from_flag(mv.flag()) {
            let path = castle_path(us, side);
            self.toggle_piece(Piece::Rook, us, path.rook_to);
            self.toggle_piece(Piece::Rook, us, path.rook_from);
        }
        self.toggle_piece(mv.promotion().unwrap_or(piece), us, mv.to());
        self.toggle_piece(piece, us, mv.from());
        if let Some((victim, sq)) = undo.captured {
            self.toggle_piece(victim, us.opposite(), sq);
        }

        self.side_to_move = us;
        if us == Color::Black {
            self.fullmove_number -= 1;
        }
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;

        debug_assert!(self.is_consistent(), "inconsistent after undoing {mv:?}: {self:?}");
        Some(mv)
    }

    /// Number of moves currently applied past the root position.
    #[inline]
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// The most recently made move that has not been undone.
    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|undo| undo.mv)
    }

    /// The undo records, oldest first.
    #[inline]
    pub fn history(&self) -> &[Undo] {
        &self.history
    }
}

//! Pin-aware legality filtering.
//!
//! Instead of making every candidate move, the filter computes once per
//! position which enemy pieces give check, which of our pieces are pinned
//! to the king and which squares block or capture a single checker. Each
//! pseudo-legal move is then accepted or rejected from those masks alone.

use super::MoveList;
use crate::board::Board;
use crate::Bitboard;
use chess_types::{Move, MoveFlag, Piece, Square};
use std::fmt;

/// How pseudo-legal moves are checked for leaving the king attacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LegalityFilter {
    /// Make each move, test the king, unmake.
    Naive,
    /// Precompute checkers, pins and evasion squares.
    #[default]
    PinAware,
}

impl fmt::Display for LegalityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LegalityFilter::Naive => write!(f, "naive"),
            LegalityFilter::PinAware => write!(f, "pin-aware"),
        }
    }
}

struct KingSafety<'a> {
    board: &'a Board,
    king: Square,
    them: Bitboard,
    checkers: Bitboard,
    pinned: Bitboard,
    /// Squares a non-king move must land on to answer a single check.
    evasions: Bitboard,
}

impl<'a> KingSafety<'a> {
    fn new(board: &'a Board) -> Self {
        let us = board.side_to_move();
        let tables = board.tables();
        let king = board.king_square(us);
        let ours = board.color(us);
        let them = board.color(us.opposite());
        let occupied = board.occupied();
        let checkers = board.checkers();

        // Sliders that would attack the king if our own pieces were lifted.
        let enemy = |piece: Piece| board.pieces(piece, us.opposite());
        let queens = enemy(Piece::Queen);
        let snipers = (tables.rook(king, them) & (enemy(Piece::Rook) | queens))
            | (tables.bishop(king, them) & (enemy(Piece::Bishop) | queens));
        let mut pinned = Bitboard::EMPTY;
        for sniper in snipers {
            let blockers = tables.between(king, sniper) & occupied;
            if !blockers.more_than_one() {
                pinned |= blockers & ours;
            }
        }

        let evasions = match checkers.lsb() {
            None => Bitboard::FULL,
            Some(_) if checkers.more_than_one() => Bitboard::EMPTY,
            Some(checker) => tables.between(king, checker).with(checker),
        };

        KingSafety {
            board,
            king,
            them,
            checkers,
            pinned,
            evasions,
        }
    }

    fn is_legal(&self, m: Move) -> bool {
        let from = m.from();
        let to = m.to();

        if m.piece() == Piece::King {
            if m.is_castling() {
                return true;
            }
            let occupied = self.board.occupied().without(from);
            return (self.board.attackers_to(to, occupied) & self.them).is_empty();
        }

        if m.flag() == MoveFlag::EnPassant {
            return self.en_passant_is_safe(from, to);
        }

        if self.checkers.more_than_one() || !self.evasions.contains(to) {
            return false;
        }
        !self.pinned.contains(from) || self.board.tables().line(self.king, from).contains(to)
    }

    /// En passant removes two pieces from one rank, which can uncover an
    /// attack no pin test sees. Recompute attackers on the resulting
    /// occupancy instead.
    fn en_passant_is_safe(&self, from: Square, to: Square) -> bool {
        let captured = match to.offset(0, -self.board.side_to_move().pawn_direction()) {
            Some(sq) => sq,
            None => return false,
        };
        let occupied = self
            .board
            .occupied()
            .without(from)
            .without(captured)
            .with(to);
        let attackers = self.board.attackers_to(self.king, occupied) & self.them.without(captured);
        attackers.is_empty()
    }
}

/// Removes moves from `moves` that would leave the side to move in check.
pub(super) fn retain_legal(board: &Board, moves: &mut MoveList) {
    let safety = KingSafety::new(board);
    moves.retain(|&m| safety.is_legal(m));
}

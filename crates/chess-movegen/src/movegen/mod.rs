//! Move generation.
//!
//! Generation runs in two phases. [`generate_pseudo_legal`] emits every move
//! that follows the piece movement rules, ignoring whether the mover's king
//! is left attacked. A legality filter then removes the moves that do leave
//! it attacked: either the pin-aware filter used by [`generate_legal`], or
//! the make/test/unmake filter used by [`generate_legal_naive`]. Both produce
//! the same move set.

mod attacks;
mod legal;
mod magics;
pub mod perft;
mod rays;

use crate::board::{castle_path, Board, CastleSide};
use crate::Bitboard;
use chess_types::{Color, Move, MoveFlag, Piece, Square};

pub use attacks::AttackTables;
pub use legal::LegalityFilter;
pub use magics::{Magic, MagicTable, TableError};
pub use rays::Slider;

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of moves the list can hold.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Iterates over the moves in generation order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    /// Returns true if `m` is in the list.
    pub fn contains(&self, m: Move) -> bool {
        self.as_slice().contains(&m)
    }

    /// Clears the move list.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(&self.moves[read]) {
                self.moves[write] = self.moves[read];
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|m| m.to_uci()))
            .finish()
    }
}

/// Generates legal moves with the pin-aware filter.
pub fn generate_legal(board: &Board) -> MoveList {
    let mut moves = MoveList::new();
    generate_pseudo_legal(board, &mut moves);
    legal::retain_legal(board, &mut moves);
    moves
}

/// Generates legal moves by making each pseudo-legal move, testing whether
/// the mover's king is attacked and unmaking it again.
///
/// The board is returned to its original state.
pub fn generate_legal_naive(board: &mut Board) -> MoveList {
    let mut moves = MoveList::new();
    generate_pseudo_legal(board, &mut moves);
    let us = board.side_to_move();
    moves.retain(|&m| {
        board.make_move(m);
        let safe = !board.is_square_attacked(board.king_square(us), us.opposite());
        board.unmake_move();
        safe
    });
    moves
}

/// Generates legal moves with the chosen legality filter.
pub fn generate_legal_with(board: &mut Board, filter: LegalityFilter) -> MoveList {
    match filter {
        LegalityFilter::PinAware => generate_legal(board),
        LegalityFilter::Naive => generate_legal_naive(board),
    }
}

/// Appends every pseudo-legal move for the side to move to `moves`.
///
/// Castling moves are only emitted when they are fully legal: the right is
/// held, the king is not in check, the squares between king and rook are
/// empty and the king neither crosses nor lands on an attacked square.
pub fn generate_pseudo_legal(board: &Board, moves: &mut MoveList) {
    generate_pawn_moves(board, moves);
    for piece in [
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ] {
        generate_piece_moves(board, piece, moves);
    }
    generate_castling_moves(board, moves);
}

const PROMOTION_FLAGS: [MoveFlag; 4] = [
    MoveFlag::PromoteQueen,
    MoveFlag::PromoteRook,
    MoveFlag::PromoteBishop,
    MoveFlag::PromoteKnight,
];

/// The piece standing on a target square, if any. Targets never hold our
/// own pieces.
#[inline]
fn victim(board: &Board, sq: Square) -> Option<Piece> {
    board.piece_at(sq).map(|(piece, _)| piece)
}

/// Square `steps` pawn moves behind `to` for `color`.
#[inline]
fn behind(to: Square, color: Color, steps: i8) -> Square {
    let index = to.index() as i8 - 8 * steps * color.pawn_direction();
    // SAFETY: only called for targets produced by shifting a pawn forward
    // `steps` ranks, so the origin is on the board.
    unsafe { Square::from_index_unchecked(index as u8) }
}

fn push_pawn_move(
    moves: &mut MoveList,
    from: Square,
    to: Square,
    captured: Option<Piece>,
    us: Color,
) {
    if to.rank() == us.promotion_rank() {
        for flag in PROMOTION_FLAGS {
            moves.push(Move::new(from, to, Piece::Pawn, captured, flag));
        }
    } else {
        moves.push(Move::new(from, to, Piece::Pawn, captured, MoveFlag::Normal));
    }
}

/// Generates pawn pushes, double pushes, captures, promotions and en
/// passant.
fn generate_pawn_moves(board: &Board, moves: &mut MoveList) {
    let us = board.side_to_move();
    let them = us.opposite();
    let tables = board.tables();
    let empty = !board.occupied();
    let their_pieces = board.color(them);
    let pawns = board.pieces(Piece::Pawn, us);

    let (single_pushes, double_pushes) = match us {
        Color::White => {
            let single = pawns.north() & empty;
            (single, (single & Bitboard::RANK_3).north() & empty)
        }
        Color::Black => {
            let single = pawns.south() & empty;
            (single, (single & Bitboard::RANK_6).south() & empty)
        }
    };

    for to in single_pushes {
        push_pawn_move(moves, behind(to, us, 1), to, None, us);
    }

    for to in double_pushes {
        moves.push(Move::new(
            behind(to, us, 2),
            to,
            Piece::Pawn,
            None,
            MoveFlag::DoublePush,
        ));
    }

    for from in pawns {
        for to in tables.pawn(from, us) & their_pieces {
            push_pawn_move(moves, from, to, victim(board, to), us);
        }
    }

    if let Some(ep) = board.en_passant() {
        // Our pawns that attack the target are the ones a pawn of theirs on
        // the target would attack.
        for from in tables.pawn(ep, them) & pawns {
            moves.push(Move::new(
                from,
                ep,
                Piece::Pawn,
                Some(Piece::Pawn),
                MoveFlag::EnPassant,
            ));
        }
    }
}

/// Generates normal moves and captures for a non-pawn piece type.
fn generate_piece_moves(board: &Board, piece: Piece, moves: &mut MoveList) {
    let us = board.side_to_move();
    let tables = board.tables();
    let occupied = board.occupied();
    let targets = !board.color(us);

    for from in board.pieces(piece, us) {
        for to in tables.attacks(piece, us, from, occupied) & targets {
            moves.push(Move::new(from, to, piece, victim(board, to), MoveFlag::Normal));
        }
    }
}

/// Generates castling moves that are fully legal.
fn generate_castling_moves(board: &Board, moves: &mut MoveList) {
    let us = board.side_to_move();
    let them = us.opposite();
    if !board.castling().has_any(us) || board.in_check() {
        return;
    }

    for side in CastleSide::ALL {
        if board.castling().raw() & side.right(us) == 0 {
            continue;
        }
        let path = castle_path(us, side);
        if (board.occupied() & path.must_be_empty).is_not_empty() {
            continue;
        }
        if path
            .king_path
            .into_iter()
            .any(|sq| board.is_square_attacked(sq, them))
        {
            continue;
        }
        moves.push(Move::new(
            path.king_from,
            path.king_to,
            Piece::King,
            None,
            side.flag(),
        ));
    }
}

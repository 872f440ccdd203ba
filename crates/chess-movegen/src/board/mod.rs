//! Bitboard position state.
//!
//! A [`Board`] holds twelve piece bitboards (one per color and piece type),
//! the per-color and total occupancy derived from them, and the scalar game
//! state. It is built from a [`PositionSetup`], validated on the way in, and
//! afterwards only changed through [`Board::make_move`] and
//! [`Board::unmake_move`].

mod castling;
mod make;

pub use castling::{castle_path, CastlePath, CastleSide};
pub(crate) use castling::rights_mask;
pub use make::Undo;

use crate::movegen::{self, AttackTables, MoveList};
use crate::Bitboard;
use chess_types::{CastlingRights, Color, FenError, Move, Piece, PositionSetup, Rank, Square};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Reasons a position description is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("{color} has {count} kings, expected exactly one")]
    KingCount { color: Color, count: u32 },

    #[error("{color} has {count} pawns, at most 8 allowed")]
    TooManyPawns { color: Color, count: u32 },

    #[error("{color} has {count} pieces, at most 16 allowed")]
    TooManyPieces { color: Color, count: u32 },

    #[error("{color} has more promoted pieces than missing pawns")]
    ImpossibleMaterial { color: Color },

    #[error("pawn on back rank at {0}")]
    PawnOnBackRank(Square),

    #[error("{color} may not castle {side}: king or rook is not on its home square")]
    InvalidCastlingRights { color: Color, side: CastleSide },

    #[error("invalid en passant target {0}")]
    InvalidEnPassant(Square),

    #[error("{0} is in check but it is not their move")]
    OpponentInCheck(Color),

    #[error("halfmove clock {0} is above {}", Board::MAX_HALFMOVE_CLOCK)]
    HalfmoveClockOutOfRange(u32),

    #[error("fullmove number {0} is outside 1..={}", Board::MAX_FULLMOVE_NUMBER)]
    InvalidFullmoveNumber(u32),
}

/// A chess position with an undo stack.
///
/// Cloning a board clones its undo history and shares its attack tables.
#[derive(Clone)]
pub struct Board {
    /// Piece bitboards indexed by [color][piece].
    pieces: [[Bitboard; 6]; 2],
    /// Occupancy per color.
    colors: [Bitboard; 2],
    occupied: Bitboard,
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
    history: Vec<Undo>,
    tables: Arc<AttackTables>,
}

impl Board {
    /// Largest halfmove clock a position may start with.
    pub const MAX_HALFMOVE_CLOCK: u32 = 10_000;
    /// Largest fullmove number a position may start with.
    pub const MAX_FULLMOVE_NUMBER: u32 = 100_000;

    /// Creates the standard starting position using the shared tables.
    pub fn startpos() -> Self {
        Self::new(AttackTables::shared())
    }

    /// Creates the standard starting position using `tables`.
    pub fn new(tables: Arc<AttackTables>) -> Self {
        Self::from_setup(&PositionSetup::startpos(), tables).expect("STARTPOS is valid")
    }

    /// Creates a board from a FEN string using the shared tables.
    pub fn from_fen(fen: &str) -> Result<Self, BoardError> {
        Self::from_fen_with(fen, AttackTables::shared())
    }

    /// Creates a board from a FEN string using `tables`.
    pub fn from_fen_with(fen: &str, tables: Arc<AttackTables>) -> Result<Self, BoardError> {
        let setup = PositionSetup::from_fen(fen)?;
        Self::from_setup(&setup, tables)
    }

    /// Builds and validates a board from a position description.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardError`] naming the first problem found: wrong king
    /// count, too many pawns or pieces, more promoted pieces than missing
    /// pawns, a pawn on the first or last rank, castling rights without king
    /// and rook at home, an impossible en passant target, the side not to
    /// move being in check, or move counters out of range.
    pub fn from_setup(setup: &PositionSetup, tables: Arc<AttackTables>) -> Result<Self, BoardError> {
        let mut board = Board {
            pieces: [[Bitboard::EMPTY; 6]; 2],
            colors: [Bitboard::EMPTY; 2],
            occupied: Bitboard::EMPTY,
            side_to_move: setup.side_to_move,
            castling: setup.castling,
            en_passant: setup.en_passant,
            halfmove_clock: setup.halfmove_clock,
            fullmove_number: setup.fullmove_number,
            history: Vec::new(),
            tables,
        };
        for (sq, piece, color) in setup.pieces() {
            board.toggle_piece(piece, color, sq);
        }

        board.validate().map_err(|e| {
            tracing::debug!(fen = %setup.to_fen(), error = %e, "rejected position");
            e
        })?;
        Ok(board)
    }

    fn validate(&self) -> Result<(), BoardError> {
        for color in Color::ALL {
            let kings = self.pieces(Piece::King, color).count();
            if kings != 1 {
                return Err(BoardError::KingCount { color, count: kings });
            }
            let pawns = self.pieces(Piece::Pawn, color).count();
            if pawns > 8 {
                return Err(BoardError::TooManyPawns { color, count: pawns });
            }
            let total = self.color(color).count();
            if total > 16 {
                return Err(BoardError::TooManyPieces { color, count: total });
            }
            if self.promoted_pieces(color) > 8 - pawns {
                return Err(BoardError::ImpossibleMaterial { color });
            }
        }

        let pawns = self.pieces[0][Piece::Pawn.index()] | self.pieces[1][Piece::Pawn.index()];
        if let Some(sq) = (pawns & (Bitboard::RANK_1 | Bitboard::RANK_8)).lsb() {
            return Err(BoardError::PawnOnBackRank(sq));
        }

        for color in Color::ALL {
            for side in CastleSide::ALL {
                if self.castling.raw() & side.right(color) == 0 {
                    continue;
                }
                let path = castle_path(color, side);
                if self.piece_at(path.king_from) != Some((Piece::King, color))
                    || self.piece_at(path.rook_from) != Some((Piece::Rook, color))
                {
                    return Err(BoardError::InvalidCastlingRights { color, side });
                }
            }
        }

        if let Some(ep) = self.en_passant {
            if !self.en_passant_is_plausible(ep) {
                return Err(BoardError::InvalidEnPassant(ep));
            }
        }

        let them = self.side_to_move.opposite();
        if self.is_square_attacked(self.king_square(them), self.side_to_move) {
            return Err(BoardError::OpponentInCheck(them));
        }

        if self.halfmove_clock > Self::MAX_HALFMOVE_CLOCK {
            return Err(BoardError::HalfmoveClockOutOfRange(self.halfmove_clock));
        }
        if self.fullmove_number == 0 || self.fullmove_number > Self::MAX_FULLMOVE_NUMBER {
            return Err(BoardError::InvalidFullmoveNumber(self.fullmove_number));
        }

        Ok(())
    }

    /// Lower bound on how many of `color`'s pieces must have come from
    /// promotions: anything beyond one queen and two of each minor piece or
    /// rook.
    fn promoted_pieces(&self, color: Color) -> u32 {
        let count = |piece: Piece| self.pieces(piece, color).count();
        count(Piece::Queen).saturating_sub(1)
            + count(Piece::Rook).saturating_sub(2)
            + count(Piece::Bishop).saturating_sub(2)
            + count(Piece::Knight).saturating_sub(2)
    }

    /// An en passant target must sit behind an enemy pawn that could just
    /// have double-pushed: target and origin squares empty, pawn in front.
    fn en_passant_is_plausible(&self, ep: Square) -> bool {
        let us = self.side_to_move;
        let them = us.opposite();
        let expected_rank = match us {
            Color::White => Rank::R6,
            Color::Black => Rank::R3,
        };
        if ep.rank() != expected_rank || self.occupied.contains(ep) {
            return false;
        }
        let dir = us.pawn_direction();
        match (ep.offset(0, -dir), ep.offset(0, dir)) {
            (Some(pawn), Some(origin)) => {
                self.pieces(Piece::Pawn, them).contains(pawn) && !self.occupied.contains(origin)
            }
            _ => false,
        }
    }

    /// Serializes the board to a position description.
    pub fn to_setup(&self) -> PositionSetup {
        let mut setup = PositionSetup::empty();
        for color in Color::ALL {
            for piece in Piece::ALL {
                for sq in self.pieces(piece, color) {
                    setup.put(sq, piece, color);
                }
            }
        }
        setup.side_to_move = self.side_to_move;
        setup.castling = self.castling;
        setup.en_passant = self.en_passant;
        setup.halfmove_clock = self.halfmove_clock;
        setup.fullmove_number = self.fullmove_number;
        setup
    }

    /// Converts the board to a FEN string.
    pub fn to_fen(&self) -> String {
        self.to_setup().to_fen()
    }

    /// Renders the board as a Unicode diagram followed by its FEN.
    pub fn pretty(&self) -> String {
        let setup = self.to_setup();
        format!("{}\n{}\n", setup.pretty(), setup.to_fen())
    }

    /// The attack tables this board uses.
    #[inline]
    pub fn tables(&self) -> &Arc<AttackTables> {
        &self.tables
    }

    /// The side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Current castling rights.
    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    /// En passant target square (if any).
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Halfmove clock for the 50-move rule.
    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Fullmove number (starts at 1, increments after Black's move).
    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Returns the piece and color at the given square, if any.
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        let color = if self.colors[Color::White.index()].contains(sq) {
            Color::White
        } else if self.colors[Color::Black.index()].contains(sq) {
            Color::Black
        } else {
            return None;
        };

        Piece::ALL
            .into_iter()
            .find(|piece| self.pieces[color.index()][piece.index()].contains(sq))
            .map(|piece| (piece, color))
    }

    /// Returns a bitboard of pieces of the given type and color.
    #[inline]
    pub fn pieces(&self, piece: Piece, color: Color) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    /// Returns a bitboard of all of one color's pieces.
    #[inline]
    pub fn color(&self, color: Color) -> Bitboard {
        self.colors[color.index()]
    }

    /// Returns a bitboard of all occupied squares.
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.occupied
    }

    /// Returns the square of `color`'s king.
    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        match self.pieces(Piece::King, color).lsb() {
            Some(sq) => sq,
            None => unreachable!("validated boards always have a {color} king"),
        }
    }

    /// Pieces of both colors attacking `sq`, with sliders blocked by
    /// `occupied` rather than the board's own occupancy.
    pub fn attackers_to(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        let t = &self.tables;
        let both = |piece: Piece| self.pieces[0][piece.index()] | self.pieces[1][piece.index()];
        let queens = both(Piece::Queen);

        (t.pawn(sq, Color::Black) & self.pieces(Piece::Pawn, Color::White))
            | (t.pawn(sq, Color::White) & self.pieces(Piece::Pawn, Color::Black))
            | (t.knight(sq) & both(Piece::Knight))
            | (t.king(sq) & both(Piece::King))
            | (t.bishop(sq, occupied) & (both(Piece::Bishop) | queens))
            | (t.rook(sq, occupied) & (both(Piece::Rook) | queens))
    }

    /// Returns true if any piece of color `by` attacks `sq`.
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        (self.attackers_to(sq, self.occupied) & self.color(by)).is_not_empty()
    }

    /// Enemy pieces giving check to the side to move.
    pub fn checkers(&self) -> Bitboard {
        let us = self.side_to_move;
        self.attackers_to(self.king_square(us), self.occupied) & self.color(us.opposite())
    }

    /// Returns true if the side to move is in check.
    #[inline]
    pub fn in_check(&self) -> bool {
        self.checkers().is_not_empty()
    }

    /// Checks the bitboard invariants: occupancies are the exact unions of
    /// the piece bitboards and no square holds two pieces.
    pub fn is_consistent(&self) -> bool {
        let mut seen = Bitboard::EMPTY;
        for color in Color::ALL {
            let mut union = Bitboard::EMPTY;
            for piece in Piece::ALL {
                let bb = self.pieces(piece, color);
                if (seen & bb).is_not_empty() {
                    return false;
                }
                seen |= bb;
                union |= bb;
            }
            if union != self.color(color) {
                return false;
            }
        }
        seen == self.occupied && (self.colors[0] & self.colors[1]).is_empty()
    }

    /// Legal moves in the current position.
    pub fn legal_moves(&self) -> MoveList {
        movegen::generate_legal(self)
    }

    /// Pseudo-legal moves in the current position.
    pub fn pseudo_legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        movegen::generate_pseudo_legal(self, &mut moves);
        moves
    }

    /// Finds the legal move written in long algebraic notation (e.g. "e2e4",
    /// "e7e8q").
    pub fn find_move(&self, uci: &str) -> Option<Move> {
        self.legal_moves().iter().copied().find(|m| m.to_uci() == uci)
    }

    /// Toggles one piece on the board, keeping occupancies in step.
    #[inline]
    fn toggle_piece(&mut self, piece: Piece, color: Color, sq: Square) {
        self.pieces[color.index()][piece.index()].toggle(sq);
        self.colors[color.index()].toggle(sq);
        self.occupied.toggle(sq);
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.pieces == other.pieces
            && self.colors == other.colors
            && self.occupied == other.occupied
            && self.side_to_move == other.side_to_move
            && self.castling == other.castling
            && self.en_passant == other.en_passant
            && self.halfmove_clock == other.halfmove_clock
            && self.fullmove_number == other.fullmove_number
            && self.history == other.history
    }
}

impl Eq for Board {}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("fen", &self.to_fen())
            .field("ply", &self.history.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

    #[test]
    fn startpos_fen_roundtrip() {
        let board = Board::startpos();
        assert_eq!(board.to_fen(), PositionSetup::STARTPOS);
        assert_eq!(board.to_setup(), PositionSetup::startpos());
        assert_eq!(format!("{}", board), PositionSetup::STARTPOS);
    }

    #[test]
    fn custom_fen_roundtrip() {
        for fen in [
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
            KIWIPETE,
            "rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 3",
        ] {
            assert_eq!(Board::from_fen(fen).unwrap().to_fen(), fen);
        }
    }

    #[test]
    fn piece_at() {
        let board = Board::startpos();
        assert_eq!(board.piece_at(Square::E1), Some((Piece::King, Color::White)));
        assert_eq!(board.piece_at(Square::E8), Some((Piece::King, Color::Black)));
        assert_eq!(board.piece_at(Square::B8), Some((Piece::Knight, Color::Black)));
        assert_eq!(board.piece_at(Square::E4), None);
    }

    #[test]
    fn occupancy() {
        let board = Board::startpos();
        assert_eq!(board.occupied().count(), 32);
        assert_eq!(board.color(Color::White), Bitboard::RANK_1 | Bitboard::RANK_2);
        assert_eq!(board.pieces(Piece::Pawn, Color::Black), Bitboard::RANK_7);
        assert_eq!(board.pieces(Piece::King, Color::White).count(), 1);
        assert!(board.is_consistent());
    }

    #[test]
    fn king_square_and_check() {
        let board = Board::startpos();
        assert_eq!(board.king_square(Color::White), Square::E1);
        assert_eq!(board.king_square(Color::Black), Square::E8);
        assert!(!board.in_check());
        assert!(board.checkers().is_empty());

        let board = Board::from_fen("4k3/8/8/8/8/3n4/8/4K2r w - - 0 1").unwrap();
        assert_eq!(
            board.checkers(),
            Bitboard::from_iter([Square::D3, Square::H1])
        );
        assert!(board.in_check());
    }

    #[test]
    fn square_attacks() {
        let board = Board::startpos();
        assert!(board.is_square_attacked(Square::F3, Color::White));
        assert!(board.is_square_attacked(Square::D3, Color::White));
        assert!(!board.is_square_attacked(Square::E4, Color::White));
        assert!(board.is_square_attacked(Square::F6, Color::Black));
        assert!(!board.is_square_attacked(Square::E5, Color::Black));
    }

    #[test]
    fn attackers_respect_custom_occupancy() {
        let board = Board::from_fen("4k3/8/8/8/4r3/8/4P3/4K3 w - - 0 1").unwrap();
        assert!(board.attackers_to(Square::E1, board.occupied()).is_empty());
        let without_pawn = board.occupied().without(Square::E2);
        assert_eq!(
            board.attackers_to(Square::E1, without_pawn),
            Bitboard::from(Square::E4)
        );
    }

    #[test]
    fn rejects_wrong_king_count() {
        assert_eq!(
            Board::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").unwrap_err(),
            BoardError::KingCount {
                color: Color::Black,
                count: 0
            }
        );
        assert_eq!(
            Board::from_fen("k7/8/8/8/8/8/8/K3K3 w - - 0 1").unwrap_err(),
            BoardError::KingCount {
                color: Color::White,
                count: 2
            }
        );
    }

    #[test]
    fn rejects_piece_counts() {
        assert!(matches!(
            Board::from_fen("4k3/8/8/8/8/P7/PPPPPPPP/4K3 w - - 0 1"),
            Err(BoardError::TooManyPawns {
                color: Color::White,
                count: 9
            })
        ));
        assert!(matches!(
            Board::from_fen("4k3/8/8/8/8/NN6/PPPPPPPP/RNBQKBNR w - - 0 1"),
            Err(BoardError::TooManyPieces {
                color: Color::White,
                count: 18
            })
        ));
    }

    #[test]
    fn rejects_more_promotions_than_missing_pawns() {
        assert_eq!(
            Board::from_fen("kb6/pp6/8/2Q1Q1Q1/Q1Q1Q1Q1/1Q1Q1Q1Q/Q1Q1Q1Q1/7K w - - 0 1")
                .unwrap_err(),
            BoardError::ImpossibleMaterial {
                color: Color::White
            }
        );
        // Nine queens need all eight pawns to have promoted.
        assert!(Board::from_fen("4k3/8/8/8/8/8/QQQQQQQQ/Q3K3 b - - 0 1").is_ok());
        assert_eq!(
            Board::from_fen("4k3/8/8/8/8/P7/QQQQQQQQ/Q3K3 b - - 0 1").unwrap_err(),
            BoardError::ImpossibleMaterial {
                color: Color::White
            }
        );
        assert_eq!(
            Board::from_fen("nnnk4/8/8/8/8/8/8/4K3 w - - 0 1").map(|_| ()),
            Ok(())
        );
    }

    #[test]
    fn rejects_pawn_on_back_rank() {
        assert_eq!(
            Board::from_fen("4k2P/8/8/8/8/8/8/4K3 w - - 0 1").unwrap_err(),
            BoardError::PawnOnBackRank(Square::H8)
        );
    }

    #[test]
    fn rejects_castling_without_rook() {
        assert_eq!(
            Board::from_fen("4k3/8/8/8/8/8/8/4K3 w K - 0 1").unwrap_err(),
            BoardError::InvalidCastlingRights {
                color: Color::White,
                side: CastleSide::Kingside
            }
        );
        assert_eq!(
            Board::from_fen("r3k3/8/8/8/8/8/8/4K3 w kq - 0 1").unwrap_err(),
            BoardError::InvalidCastlingRights {
                color: Color::Black,
                side: CastleSide::Kingside
            }
        );
        assert!(Board::from_fen("r3k3/8/8/8/8/8/8/4K3 w q - 0 1").is_ok());
    }

    #[test]
    fn rejects_impossible_en_passant() {
        // No black pawn in front of d6.
        assert_eq!(
            Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - d6 0 1").unwrap_err(),
            BoardError::InvalidEnPassant(Square::D6)
        );
        // Wrong rank for the side to move.
        assert_eq!(
            Board::from_fen("4k3/8/8/3p4/8/8/8/4K3 w - d3 0 1").unwrap_err(),
            BoardError::InvalidEnPassant(Square::D3)
        );
        assert!(Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").is_ok());
    }

    #[test]
    fn rejects_opponent_in_check() {
        assert_eq!(
            Board::from_fen("4k3/8/8/8/8/8/8/4KR2 w - - 0 1").map(|_| ()),
            Ok(())
        );
        assert_eq!(
            Board::from_fen("4k3/8/8/8/8/8/8/4R1K1 w - - 0 1").unwrap_err(),
            BoardError::OpponentInCheck(Color::Black)
        );
    }

    #[test]
    fn rejects_zero_fullmove_number() {
        assert_eq!(
            Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 0").unwrap_err(),
            BoardError::InvalidFullmoveNumber(0)
        );
    }

    #[test]
    fn rejects_move_counters_out_of_range() {
        assert_eq!(
            Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 4294967295 1").unwrap_err(),
            BoardError::HalfmoveClockOutOfRange(u32::MAX)
        );
        assert_eq!(
            Board::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 4294967295").unwrap_err(),
            BoardError::InvalidFullmoveNumber(u32::MAX)
        );
        assert_eq!(
            BoardError::HalfmoveClockOutOfRange(10_001).to_string(),
            "halfmove clock 10001 is above 10000"
        );

        // Counters at the limit still advance without overflow.
        let mut board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 10000 100000").unwrap();
        let m = board.find_move("e8d8").unwrap();
        board.make_move(m);
        assert_eq!(board.halfmove_clock(), 10_001);
        assert_eq!(board.fullmove_number(), 100_001);
        board.unmake_move();
        assert_eq!(board.to_fen(), "4k3/8/8/8/8/8/8/4K3 b - - 10000 100000");
    }

    #[test]
    fn wraps_fen_errors() {
        let err = Board::from_fen("not a fen").unwrap_err();
        assert!(matches!(err, BoardError::Fen(FenError::InvalidPartCount(3))));
        assert_eq!(err.to_string(), "invalid FEN: expected 6 parts, got 3");
        assert_eq!(err.clone(), err);
    }

    #[test]
    fn boards_compare_by_position() {
        let a = Board::startpos();
        let b = Board::new(Arc::new(AttackTables::ray_scan()));
        assert_eq!(a, b);
        assert_ne!(a, Board::from_fen(KIWIPETE).unwrap());
    }

    #[test]
    fn pretty_includes_fen() {
        let text = Board::startpos().pretty();
        assert!(text.contains("♔"));
        assert!(text.trim_end().ends_with(PositionSetup::STARTPOS));
    }

    #[test]
    fn find_move_by_uci() {
        let board = Board::startpos();
        let m = board.find_move("g1f3").unwrap();
        assert_eq!(m.piece(), Piece::Knight);
        assert_eq!(board.find_move("e2e5"), None);
    }
}

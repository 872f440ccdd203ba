//! Structured position description used to seed and snapshot a board.

use crate::{Color, File, Piece, Rank, Square};

/// Castling rights flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    /// Flag bit for kingside castling of `color`.
    #[inline]
    pub const fn kingside_flag(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        }
    }

    /// Flag bit for queenside castling of `color`.
    #[inline]
    pub const fn queenside_flag(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        }
    }

    /// Returns true if the given side can castle kingside.
    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        (self.0 & Self::kingside_flag(color)) != 0
    }

    /// Returns true if the given side can castle queenside.
    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        (self.0 & Self::queenside_flag(color)) != 0
    }

    /// Returns true if the given side holds any castling right.
    #[inline]
    pub const fn has_any(self, color: Color) -> bool {
        self.can_castle_kingside(color) || self.can_castle_queenside(color)
    }

    /// Adds the rights named by `flags`.
    #[inline]
    pub fn insert(&mut self, flags: u8) {
        self.0 |= flags & 0b1111;
    }

    /// Keeps only the rights present in `mask`.
    #[inline]
    pub const fn restrict(self, mask: u8) -> Self {
        CastlingRights(self.0 & mask)
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// The decoded fields of a position: what a board is built from and what it
/// serializes back to.
///
/// A setup is only a description; it is validated when a board is built
/// from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionSetup {
    /// Piece on each square, indexed by [`Square::index`].
    pub placement: [Option<(Piece, Color)>; Square::NUM],
    /// The side to move.
    pub side_to_move: Color,
    /// Castling rights.
    pub castling: CastlingRights,
    /// En passant target square (if any).
    pub en_passant: Option<Square>,
    /// Halfmove clock for 50-move rule.
    pub halfmove_clock: u32,
    /// Fullmove number (starts at 1, increments after Black's move).
    pub fullmove_number: u32,
}

impl PositionSetup {
    /// Creates an empty setup: no pieces, White to move, no rights.
    pub fn empty() -> Self {
        PositionSetup {
            placement: [None; Square::NUM],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Creates the standard starting setup.
    pub fn startpos() -> Self {
        const BACK_RANK: [Piece; 8] = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];

        let mut setup = Self::empty();
        for (file, piece) in File::ALL.into_iter().zip(BACK_RANK) {
            for color in Color::ALL {
                setup.put(Square::new(file, color.back_rank()), piece, color);
                setup.put(Square::new(file, color.pawn_start_rank()), Piece::Pawn, color);
            }
        }
        setup.castling = CastlingRights::ALL;
        setup
    }

    /// Returns the piece on `sq`, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        self.placement[sq.index() as usize]
    }

    /// Places a piece, replacing whatever was on the square.
    pub fn put(&mut self, sq: Square, piece: Piece, color: Color) -> &mut Self {
        self.placement[sq.index() as usize] = Some((piece, color));
        self
    }

    /// Empties a square.
    pub fn remove(&mut self, sq: Square) -> &mut Self {
        self.placement[sq.index() as usize] = None;
        self
    }

    /// Iterates over occupied squares, a1 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece, Color)> + '_ {
        Square::all().filter_map(|sq| self.piece_at(sq).map(|(piece, color)| (sq, piece, color)))
    }

    /// Renders the placement as a Unicode diagram, rank 8 first.
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        for rank in Rank::ALL.into_iter().rev() {
            out.push_str(&format!("  {} ", rank));
            for file in File::ALL {
                let c = match self.piece_at(Square::new(file, rank)) {
                    Some((piece, color)) => piece.symbol(color),
                    None => '.',
                };
                out.push(' ');
                out.push(c);
            }
            out.push('\n');
        }
        out.push_str("     a b c d e f g h\n");
        out
    }
}

impl Default for PositionSetup {
    fn default() -> Self {
        Self::startpos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn castling_rights() {
        let rights = CastlingRights::ALL;
        assert!(rights.can_castle_kingside(Color::White));
        assert!(rights.can_castle_queenside(Color::Black));

        let rights = rights.restrict(!CastlingRights::kingside_flag(Color::White));
        assert!(!rights.can_castle_kingside(Color::White));
        assert!(rights.can_castle_queenside(Color::White));

        let rights = rights.restrict(!CastlingRights::queenside_flag(Color::Black));
        assert!(rights.can_castle_kingside(Color::Black));
        assert!(!rights.can_castle_queenside(Color::Black));
        assert!(rights.has_any(Color::Black));
    }

    #[test]
    fn castling_rights_restrict_and_insert() {
        let rights = CastlingRights::ALL.restrict(!CastlingRights::WHITE_QUEENSIDE);
        assert!(!rights.can_castle_queenside(Color::White));
        assert_eq!(rights.raw(), 0b1101);

        let mut rights = CastlingRights::NONE;
        rights.insert(CastlingRights::BLACK_KINGSIDE);
        assert!(rights.can_castle_kingside(Color::Black));
        assert!(!rights.has_any(Color::White));
    }

    #[test]
    fn empty_setup() {
        let setup = PositionSetup::empty();
        assert_eq!(setup.pieces().count(), 0);
        assert_eq!(setup.side_to_move, Color::White);
        assert_eq!(setup.fullmove_number, 1);
    }

    #[test]
    fn startpos_setup() {
        let setup = PositionSetup::startpos();
        assert_eq!(setup.pieces().count(), 32);
        assert_eq!(setup.piece_at(Square::E1), Some((Piece::King, Color::White)));
        assert_eq!(setup.piece_at(Square::D8), Some((Piece::Queen, Color::Black)));
        assert_eq!(setup.piece_at(Square::C7), Some((Piece::Pawn, Color::Black)));
        assert_eq!(setup.piece_at(Square::E4), None);
        assert_eq!(setup.castling, CastlingRights::ALL);
    }

    #[test]
    fn put_and_remove() {
        let mut setup = PositionSetup::empty();
        setup
            .put(Square::E1, Piece::King, Color::White)
            .put(Square::E8, Piece::King, Color::Black);
        assert_eq!(setup.pieces().count(), 2);
        setup.remove(Square::E1);
        assert_eq!(setup.piece_at(Square::E1), None);
    }

    #[test]
    fn pretty_diagram() {
        let diagram = PositionSetup::startpos().pretty();
        let lines: Vec<&str> = diagram.lines().collect();
        assert_eq!(lines[0], "  8  ♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜");
        assert_eq!(lines[4], "  4  . . . . . . . .");
        assert_eq!(lines[8], "     a b c d e f g h");
    }
}

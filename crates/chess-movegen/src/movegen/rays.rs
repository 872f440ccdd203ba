//! Ray walking for sliding pieces.
//!
//! These loops are the reference definition of slider attacks. They seed the
//! magic tables, back the ray scan backend and the between/line tables.

use crate::bitboard::Direction;
use crate::Bitboard;
use chess_types::{Piece, Square};
use std::fmt;

/// The two sliding movement patterns. Queens combine both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slider {
    Bishop,
    Rook,
}

impl Slider {
    /// Both sliders.
    pub const ALL: [Slider; 2] = [Slider::Bishop, Slider::Rook];

    /// The four directions this slider moves in.
    #[inline]
    pub const fn directions(self) -> [Direction; 4] {
        match self {
            Slider::Bishop => [
                Direction::NorthEast,
                Direction::NorthWest,
                Direction::SouthEast,
                Direction::SouthWest,
            ],
            Slider::Rook => [
                Direction::North,
                Direction::South,
                Direction::East,
                Direction::West,
            ],
        }
    }

    /// The piece that moves only like this slider.
    #[inline]
    pub const fn piece(self) -> Piece {
        match self {
            Slider::Bishop => Piece::Bishop,
            Slider::Rook => Piece::Rook,
        }
    }

    /// Squares whose occupancy can change this slider's attacks from `sq`.
    ///
    /// The last square of every ray is left out: a piece there blocks
    /// nothing further.
    pub fn relevant_mask(self, sq: Square) -> Bitboard {
        let mut mask = Bitboard::EMPTY;
        for dir in self.directions() {
            let (df, dr) = dir.delta();
            let mut current = sq;
            while let Some(next) = current.offset(df, dr) {
                if next.offset(df, dr).is_none() {
                    break;
                }
                mask.set(next);
                current = next;
            }
        }
        mask
    }

    /// Attacks from `sq`, walking each ray until the first blocker
    /// (inclusive) or the edge of the board.
    pub fn ray_attacks(self, sq: Square, blockers: Bitboard) -> Bitboard {
        let mut attacks = Bitboard::EMPTY;
        for dir in self.directions() {
            attacks |= walk(sq, dir.delta(), blockers);
        }
        attacks
    }
}

impl fmt::Display for Slider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.piece())
    }
}

/// Squares reached from `sq` stepping by `(df, dr)`, stopping on the first
/// square in `blockers`.
fn walk(sq: Square, (df, dr): (i8, i8), blockers: Bitboard) -> Bitboard {
    let mut ray = Bitboard::EMPTY;
    let mut current = sq;
    while let Some(next) = current.offset(df, dr) {
        ray.set(next);
        if blockers.contains(next) {
            break;
        }
        current = next;
    }
    ray
}

/// The direction leading from `a` to `b`, if they share a rank, file or
/// diagonal.
fn direction_between(a: Square, b: Square) -> Option<Direction> {
    if a == b {
        return None;
    }
    Direction::ALL
        .into_iter()
        .find(|dir| walk(a, dir.delta(), Bitboard::EMPTY).contains(b))
}

/// Squares strictly between `a` and `b`, or empty if they are not aligned.
pub(crate) fn between(a: Square, b: Square) -> Bitboard {
    match direction_between(a, b) {
        Some(dir) => walk(a, dir.delta(), Bitboard::from_square(b)).without(b),
        None => Bitboard::EMPTY,
    }
}

/// The whole line through `a` and `b` from edge to edge, or empty if they
/// are not aligned.
pub(crate) fn line(a: Square, b: Square) -> Bitboard {
    match direction_between(a, b) {
        Some(dir) => {
            let (df, dr) = dir.delta();
            walk(a, (df, dr), Bitboard::EMPTY)
                | walk(a, (-df, -dr), Bitboard::EMPTY)
                | Bitboard::from_square(a)
        }
        None => Bitboard::EMPTY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rook_mask_excludes_edges() {
        let mask = Slider::Rook.relevant_mask(Square::A1);
        assert_eq!(mask.count(), 12);
        assert!(mask.contains(Square::A7));
        assert!(!mask.contains(Square::A8));
        assert!(!mask.contains(Square::H1));

        let mask = Slider::Rook.relevant_mask(Square::E4);
        assert_eq!(mask.count(), 10);
    }

    #[test]
    fn bishop_mask_sizes() {
        assert_eq!(Slider::Bishop.relevant_mask(Square::A1).count(), 6);
        assert_eq!(Slider::Bishop.relevant_mask(Square::D4).count(), 9);
        assert_eq!(Slider::Bishop.relevant_mask(Square::B1).count(), 5);
    }

    #[test]
    fn ray_attacks_stop_at_blockers() {
        let blockers = Bitboard::from_iter([Square::D6, Square::F4]);
        let attacks = Slider::Rook.ray_attacks(Square::D4, blockers);
        assert!(attacks.contains(Square::D6));
        assert!(!attacks.contains(Square::D7));
        assert!(attacks.contains(Square::F4));
        assert!(!attacks.contains(Square::G4));
        assert!(attacks.contains(Square::A4));
        assert!(attacks.contains(Square::D1));

        let attacks = Slider::Bishop.ray_attacks(Square::A1, Bitboard::EMPTY);
        assert_eq!(attacks.count(), 7);
    }

    #[test]
    fn between_aligned_squares() {
        assert_eq!(
            between(Square::A1, Square::D4),
            Bitboard::from_iter([Square::B2, Square::C3])
        );
        assert_eq!(
            between(Square::E8, Square::E1),
            Bitboard::FILE_A.east().east().east().east() - Bitboard::RANK_1 - Bitboard::RANK_8
        );
        assert!(between(Square::E1, Square::F1).is_empty());
        assert!(between(Square::A1, Square::B3).is_empty());
        assert!(between(Square::C3, Square::C3).is_empty());
    }

    #[test]
    fn line_spans_the_board() {
        let diagonal = line(Square::C3, Square::E5);
        assert_eq!(diagonal.count(), 8);
        assert!(diagonal.contains(Square::A1));
        assert!(diagonal.contains(Square::H8));

        assert_eq!(line(Square::B4, Square::G4), Bitboard::RANK_1.north().north().north());
        assert!(line(Square::A1, Square::B3).is_empty());
    }
}

//! Attack table generation and lookup for all piece types.
//!
//! [`AttackTables`] is built once and then only read. Boards hold it behind
//! an [`Arc`], so any number of boards on any number of threads can share
//! one instance.

use super::magics::{MagicTable, TableError};
use super::rays::{self, Slider};
use crate::config::{SliderBackend, TableConfig};
use crate::Bitboard;
use chess_types::{Color, Piece, Square};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use std::sync::{Arc, OnceLock};
use std::time::Instant;

/// Precomputed knight attack tables.
const KNIGHT_ATTACKS: [Bitboard; 64] = compute_knight_attacks();

/// Precomputed king attack tables.
const KING_ATTACKS: [Bitboard; 64] = compute_king_attacks();

/// Precomputed pawn attack tables [color][square].
const PAWN_ATTACKS: [[Bitboard; 64]; 2] = compute_pawn_attacks();

enum SliderTables {
    Magic { bishop: MagicTable, rook: MagicTable },
    RayScan,
}

/// Attack lookups for every piece type, plus the between and line tables
/// used by the legality filter.
pub struct AttackTables {
    sliders: SliderTables,
    between: Vec<Bitboard>,
    line: Vec<Bitboard>,
}

static SHARED: OnceLock<Arc<AttackTables>> = OnceLock::new();

impl AttackTables {
    /// Builds the default tables: magic bitboards with the builtin
    /// multipliers.
    ///
    /// # Panics
    ///
    /// Panics if a magic multiplier cannot be found within the default
    /// attempt budget. Use [`Self::try_new`] to handle that as an error.
    pub fn new() -> Self {
        match Self::try_new(&TableConfig::default()) {
            Ok(tables) => tables,
            Err(e) => panic!("failed to build attack tables: {e}"),
        }
    }

    /// Builds tables as described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::MagicSearchExhausted`] if the magic search runs
    /// out of attempts for some square.
    pub fn try_new(config: &TableConfig) -> Result<Self, TableError> {
        let started = Instant::now();
        let sliders = match config.sliders {
            SliderBackend::Magic => {
                let mut rng = StdRng::seed_from_u64(config.seed);
                let bishop = MagicTable::build(
                    Slider::Bishop,
                    config.magic_source,
                    &mut rng,
                    config.max_attempts,
                )?;
                let rook = MagicTable::build(
                    Slider::Rook,
                    config.magic_source,
                    &mut rng,
                    config.max_attempts,
                )?;
                SliderTables::Magic { bishop, rook }
            }
            SliderBackend::RayScan => SliderTables::RayScan,
        };

        let tables = AttackTables {
            sliders,
            between: square_pairs(rays::between),
            line: square_pairs(rays::line),
        };

        tracing::debug!(
            backend = ?tables.backend(),
            slider_entries = tables.slider_entries(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "built attack tables"
        );
        Ok(tables)
    }

    /// Builds tables with the ray scan slider backend. Never fails.
    pub fn ray_scan() -> Self {
        AttackTables {
            sliders: SliderTables::RayScan,
            between: square_pairs(rays::between),
            line: square_pairs(rays::line),
        }
    }

    /// Returns a process-wide default instance, building it on first use.
    pub fn shared() -> Arc<Self> {
        Arc::clone(SHARED.get_or_init(|| Arc::new(Self::new())))
    }

    /// The slider backend in use.
    pub fn backend(&self) -> SliderBackend {
        match self.sliders {
            SliderTables::Magic { .. } => SliderBackend::Magic,
            SliderTables::RayScan => SliderBackend::RayScan,
        }
    }

    fn slider_entries(&self) -> usize {
        match &self.sliders {
            SliderTables::Magic { bishop, rook } => bishop.len() + rook.len(),
            SliderTables::RayScan => 0,
        }
    }

    /// Returns knight attacks from the given square.
    #[inline]
    pub fn knight(&self, sq: Square) -> Bitboard {
        KNIGHT_ATTACKS[sq.index() as usize]
    }

    /// Returns king attacks from the given square.
    #[inline]
    pub fn king(&self, sq: Square) -> Bitboard {
        KING_ATTACKS[sq.index() as usize]
    }

    /// Returns pawn attacks from the given square for the given color.
    #[inline]
    pub fn pawn(&self, sq: Square, color: Color) -> Bitboard {
        PAWN_ATTACKS[color.index()][sq.index() as usize]
    }

    /// Returns attacks of `slider` from `sq` given occupied squares.
    #[inline]
    pub fn slider(&self, slider: Slider, sq: Square, occupied: Bitboard) -> Bitboard {
        match &self.sliders {
            SliderTables::Magic { bishop, rook } => match slider {
                Slider::Bishop => bishop.attacks(sq, occupied),
                Slider::Rook => rook.attacks(sq, occupied),
            },
            SliderTables::RayScan => slider.ray_attacks(sq, occupied),
        }
    }

    /// Returns bishop attacks for a square given occupied squares.
    #[inline]
    pub fn bishop(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.slider(Slider::Bishop, sq, occupied)
    }

    /// Returns rook attacks for a square given occupied squares.
    #[inline]
    pub fn rook(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.slider(Slider::Rook, sq, occupied)
    }

    /// Returns queen attacks (bishop + rook).
    #[inline]
    pub fn queen(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.bishop(sq, occupied) | self.rook(sq, occupied)
    }

    /// Squares attacked by `piece` of `color` standing on `sq`.
    pub fn attacks(&self, piece: Piece, color: Color, sq: Square, occupied: Bitboard) -> Bitboard {
        match piece {
            Piece::Pawn => self.pawn(sq, color),
            Piece::Knight => self.knight(sq),
            Piece::Bishop => self.bishop(sq, occupied),
            Piece::Rook => self.rook(sq, occupied),
            Piece::Queen => self.queen(sq, occupied),
            Piece::King => self.king(sq),
        }
    }

    /// Squares strictly between `a` and `b` if they share a line, else empty.
    #[inline]
    pub fn between(&self, a: Square, b: Square) -> Bitboard {
        self.between[pair_index(a, b)]
    }

    /// The full line through `a` and `b` if they share one, else empty.
    #[inline]
    pub fn line(&self, a: Square, b: Square) -> Bitboard {
        self.line[pair_index(a, b)]
    }
}

impl Default for AttackTables {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AttackTables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttackTables")
            .field("backend", &self.backend())
            .field("slider_entries", &self.slider_entries())
            .finish_non_exhaustive()
    }
}

#[inline]
fn pair_index(a: Square, b: Square) -> usize {
    a.index() as usize * Square::NUM + b.index() as usize
}

fn square_pairs(f: fn(Square, Square) -> Bitboard) -> Vec<Bitboard> {
    Square::all()
        .flat_map(|a| Square::all().map(move |b| f(a, b)))
        .collect()
}

/// Computes knight attacks for all squares at compile time.
const fn compute_knight_attacks() -> [Bitboard; 64] {
    let mut attacks = [Bitboard::EMPTY; 64];
    let mut sq = 0u8;

    while sq < 64 {
        let rank = sq / 8;
        let file = sq % 8;
        let mut bb = 0u64;

        if rank < 6 && file < 7 {
            bb |= 1u64 << (sq + 17);
        } // +2, +1
        if rank < 6 && file > 0 {
            bb |= 1u64 << (sq + 15);
        } // +2, -1
        if rank > 1 && file < 7 {
            bb |= 1u64 << (sq - 15);
        } // -2, +1
        if rank > 1 && file > 0 {
            bb |= 1u64 << (sq - 17);
        } // -2, -1
        if rank < 7 && file < 6 {
            bb |= 1u64 << (sq + 10);
        } // +1, +2
        if rank < 7 && file > 1 {
            bb |= 1u64 << (sq + 6);
        } // +1, -2
        if rank > 0 && file < 6 {
            bb |= 1u64 << (sq - 6);
        } // -1, +2
        if rank > 0 && file > 1 {
            bb |= 1u64 << (sq - 10);
        } // -1, -2

        attacks[sq as usize] = Bitboard::new(bb);
        sq += 1;
    }

    attacks
}

/// Computes king attacks for all squares at compile time.
const fn compute_king_attacks() -> [Bitboard; 64] {
    let mut attacks = [Bitboard::EMPTY; 64];
    let mut sq = 0u8;

    while sq < 64 {
        let one = Bitboard::new(1u64 << sq);
        // Spread sideways first, then up and down, so corners are covered.
        let row = Bitboard::new(one.bits() | one.east().bits() | one.west().bits());
        let around = row.bits() | row.north().bits() | row.south().bits();
        attacks[sq as usize] = Bitboard::new(around & !one.bits());
        sq += 1;
    }

    attacks
}

/// Computes pawn attacks for all squares at compile time.
const fn compute_pawn_attacks() -> [[Bitboard; 64]; 2] {
    let mut attacks = [[Bitboard::EMPTY; 64]; 2];
    let mut sq = 0u8;

    while sq < 64 {
        let one = Bitboard::new(1u64 << sq);
        attacks[0][sq as usize] =
            Bitboard::new(one.north_east().bits() | one.north_west().bits());
        attacks[1][sq as usize] =
            Bitboard::new(one.south_east().bits() | one.south_west().bits());
        sq += 1;
    }

    attacks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> Arc<AttackTables> {
        AttackTables::shared()
    }

    #[test]
    fn knight_attacks_counts() {
        let t = tables();
        assert_eq!(t.knight(Square::D4).count(), 8);
        assert_eq!(t.knight(Square::A1).count(), 2);
        assert_eq!(t.knight(Square::A4).count(), 4);
    }

    #[test]
    fn knight_specific_squares() {
        let expected = Bitboard::from_iter([
            Square::D6,
            Square::F6,
            Square::G5,
            Square::G3,
            Square::F2,
            Square::D2,
            Square::C3,
            Square::C5,
        ]);
        assert_eq!(tables().knight(Square::E4), expected);
    }

    #[test]
    fn king_attacks_counts() {
        let t = tables();
        assert_eq!(t.king(Square::D4).count(), 8);
        assert_eq!(t.king(Square::A1).count(), 3);
        assert_eq!(t.king(Square::A4).count(), 5);
        assert_eq!(
            t.king(Square::H8),
            Bitboard::from_iter([Square::G8, Square::G7, Square::H7])
        );
    }

    #[test]
    fn pawn_attacks() {
        let t = tables();
        assert_eq!(
            t.pawn(Square::D4, Color::White),
            Bitboard::from_iter([Square::C5, Square::E5])
        );
        assert_eq!(
            t.pawn(Square::D4, Color::Black),
            Bitboard::from_iter([Square::C3, Square::E3])
        );
        assert_eq!(t.pawn(Square::A4, Color::White), Bitboard::from(Square::B5));
        assert!(t.pawn(Square::D8, Color::White).is_empty());
        assert!(t.pawn(Square::D1, Color::Black).is_empty());
    }

    #[test]
    fn slider_attacks_empty_board() {
        let t = tables();
        assert_eq!(t.bishop(Square::D4, Bitboard::EMPTY).count(), 13);
        assert_eq!(t.rook(Square::D4, Bitboard::EMPTY).count(), 14);
        assert_eq!(t.queen(Square::D4, Bitboard::EMPTY).count(), 27);
        assert_eq!(t.bishop(Square::A1, Bitboard::EMPTY).count(), 7);
        assert_eq!(t.rook(Square::A1, Bitboard::EMPTY).count(), 14);
    }

    #[test]
    fn slider_attacks_with_blockers() {
        let t = tables();
        let blockers = Bitboard::from_iter([Square::E5, Square::C3]);
        let attacks = t.bishop(Square::D4, blockers);
        assert!(attacks.contains(Square::E5));
        assert!(attacks.contains(Square::C3));
        assert!(!attacks.contains(Square::F6));
        assert!(!attacks.contains(Square::B2));

        let attacks = t.rook(Square::D4, Bitboard::from(Square::D6));
        assert!(attacks.contains(Square::D6));
        assert!(!attacks.contains(Square::D7));
    }

    #[test]
    fn ray_scan_backend_agrees() {
        let magic = tables();
        let scan = AttackTables::ray_scan();
        assert_eq!(scan.backend(), SliderBackend::RayScan);
        let occupied = Bitboard::from_iter([Square::B2, Square::D5, Square::F4, Square::G7]);
        for sq in Square::all() {
            assert_eq!(scan.queen(sq, occupied), magic.queen(sq, occupied), "{sq}");
        }
    }

    #[test]
    fn between_and_line_lookups() {
        let t = tables();
        assert_eq!(
            t.between(Square::B1, Square::E4),
            Bitboard::from_iter([Square::C2, Square::D3])
        );
        assert!(t.between(Square::B1, Square::C3).is_empty());
        assert_eq!(t.line(Square::B1, Square::E4).count(), 7);
        assert!(t.line(Square::E4, Square::E4).is_empty());
    }

    #[test]
    fn shared_is_a_single_instance() {
        assert!(Arc::ptr_eq(&AttackTables::shared(), &AttackTables::shared()));
    }

    #[test]
    fn debug_output() {
        let text = format!("{:?}", AttackTables::ray_scan());
        assert!(text.contains("RayScan"));
    }
}

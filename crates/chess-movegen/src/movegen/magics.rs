//! Fancy magic bitboards for sliding piece attacks.
//!
//! For every square the relevant blocker squares are hashed with a
//! multiply and shift into a private slice of one shared attack table.
//! Each multiplier is checked while its slice is filled: two occupancies
//! may share an index only if they produce the same attack set.

use super::rays::Slider;
use crate::config::MagicSource;
use crate::Bitboard;
use chess_types::Square;
use rand::rngs::StdRng;
use rand::Rng;
use thiserror::Error;

/// Errors that can occur while building attack tables.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("no {slider} magic found for {square} after {attempts} attempts")]
    MagicSearchExhausted {
        slider: Slider,
        square: Square,
        attempts: u32,
    },
}

/// Magic entry for a single square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Magic {
    /// Mask of relevant blocker squares (excludes the end of each ray).
    pub mask: Bitboard,
    /// The magic number for this square.
    pub magic: u64,
    /// Right shift amount (64 - number of bits in mask).
    pub shift: u32,
    /// Offset into the attack table.
    pub offset: usize,
}

impl Magic {
    /// Computes the table index for a given occupancy.
    #[inline]
    pub fn index(&self, occupied: Bitboard) -> usize {
        let relevant = (occupied & self.mask).bits();
        self.offset + (relevant.wrapping_mul(self.magic) >> self.shift) as usize
    }
}

/// Magic entries and the attack table for one slider.
#[derive(Clone)]
pub struct MagicTable {
    slider: Slider,
    magics: Vec<Magic>,
    attacks: Vec<Bitboard>,
}

impl MagicTable {
    /// Builds the table for `slider`.
    ///
    /// With [`MagicSource::Builtin`] the compiled-in multipliers are tried
    /// first and only rejected ones are searched for. With
    /// [`MagicSource::Search`] every square is searched.
    pub fn build(
        slider: Slider,
        source: MagicSource,
        rng: &mut StdRng,
        max_attempts: u32,
    ) -> Result<Self, TableError> {
        let mut magics = Vec::with_capacity(Square::NUM);
        let mut attacks = Vec::new();
        let mut filler = Filler::default();

        for sq in Square::all() {
            let mask = slider.relevant_mask(sq);
            let shift = 64 - mask.count();
            let occupancies = subsets(mask);
            let expected: Vec<Bitboard> = occupancies
                .iter()
                .map(|&occ| slider.ray_attacks(sq, occ))
                .collect();

            let mut magic = Magic {
                mask,
                magic: 0,
                shift,
                offset: attacks.len(),
            };

            let accepted = match source {
                MagicSource::Builtin => {
                    let candidate = builtin_magic(slider, sq);
                    let valid = filler.fill(&mut magic, candidate, &occupancies, &expected);
                    if !valid {
                        tracing::warn!(
                            %slider,
                            square = %sq,
                            magic = %format!("{candidate:#018x}"),
                            "builtin magic aliases, searching for a replacement"
                        );
                    }
                    valid
                }
                MagicSource::Search => false,
            };

            if !accepted
                && !search(&mut filler, &mut magic, &occupancies, &expected, rng, max_attempts)
            {
                return Err(TableError::MagicSearchExhausted {
                    slider,
                    square: sq,
                    attempts: max_attempts,
                });
            }

            attacks.extend_from_slice(filler.slice());
            magics.push(magic);
        }

        Ok(MagicTable {
            slider,
            magics,
            attacks,
        })
    }

    /// Returns attacks from `sq` given the board occupancy.
    #[inline]
    pub fn attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.attacks[self.magics[sq.index() as usize].index(occupied)]
    }

    /// The magic entry for `sq`.
    #[inline]
    pub fn magic(&self, sq: Square) -> &Magic {
        &self.magics[sq.index() as usize]
    }

    /// Which slider this table serves.
    pub fn slider(&self) -> Slider {
        self.slider
    }

    /// Number of attack entries across all squares.
    pub fn len(&self) -> usize {
        self.attacks.len()
    }

    /// Returns true if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.attacks.is_empty()
    }
}

/// All subsets of `mask`, enumerated with the carry-rippler trick.
fn subsets(mask: Bitboard) -> Vec<Bitboard> {
    let mut out = Vec::with_capacity(1 << mask.count());
    let mut subset = 0u64;
    loop {
        out.push(Bitboard::new(subset));
        subset = subset.wrapping_sub(mask.bits()) & mask.bits();
        if subset == 0 {
            break;
        }
    }
    out
}

/// Tries random sparse candidates until one fills without aliasing.
fn search(
    filler: &mut Filler,
    magic: &mut Magic,
    occupancies: &[Bitboard],
    expected: &[Bitboard],
    rng: &mut StdRng,
    max_attempts: u32,
) -> bool {
    for attempt in 1..=max_attempts {
        let candidate = rng.gen::<u64>() & rng.gen::<u64>() & rng.gen::<u64>();
        // The top byte of mask * magic must be dense enough to spread indices.
        if (magic.mask.bits().wrapping_mul(candidate) >> 56).count_ones() < 6 {
            continue;
        }
        if filler.fill(magic, candidate, occupancies, expected) {
            tracing::trace!(
                magic = %format!("{candidate:#018x}"),
                attempt,
                "found magic"
            );
            return true;
        }
    }
    false
}

/// Scratch space for filling one square's slice of the table.
///
/// Slots are stamped with the attempt that wrote them so the buffer never
/// needs clearing between candidates.
#[derive(Default)]
struct Filler {
    table: Vec<Bitboard>,
    stamps: Vec<u32>,
    epoch: u32,
    len: usize,
}

impl Filler {
    /// Fills the slice for `candidate`. On success stores the multiplier in
    /// `magic` and returns true; returns false if two occupancies with
    /// different attacks collide.
    fn fill(
        &mut self,
        magic: &mut Magic,
        candidate: u64,
        occupancies: &[Bitboard],
        expected: &[Bitboard],
    ) -> bool {
        let len = 1usize << (64 - magic.shift);
        if self.table.len() < len {
            self.table.resize(len, Bitboard::EMPTY);
            self.stamps.resize(len, 0);
        }
        self.len = len;
        self.epoch = self.epoch.wrapping_add(1);
        if self.epoch == 0 {
            self.stamps.fill(0);
            self.epoch = 1;
        }

        let trial = Magic {
            magic: candidate,
            offset: 0,
            ..*magic
        };
        for (&occ, &attacks) in occupancies.iter().zip(expected) {
            let index = trial.index(occ);
            if self.stamps[index] != self.epoch {
                self.stamps[index] = self.epoch;
                self.table[index] = attacks;
            } else if self.table[index] != attacks {
                return false;
            }
        }

        // Slots no occupancy maps to are never read; clear stale data.
        for index in 0..len {
            if self.stamps[index] != self.epoch {
                self.table[index] = Bitboard::EMPTY;
            }
        }

        magic.magic = candidate;
        true
    }

    fn slice(&self) -> &[Bitboard] {
        &self.table[..self.len]
    }
}

fn builtin_magic(slider: Slider, sq: Square) -> u64 {
    match slider {
        Slider::Bishop => BISHOP_MAGICS[sq.index() as usize],
        Slider::Rook => ROOK_MAGICS[sq.index() as usize],
    }
}

// Precomputed multipliers. Each one is validated when the table is built.
const BISHOP_MAGICS: [u64; 64] = [
    0x89a1121896040240,
    0x2004844802002010,
    0x2068080051921000,
    0x62880a0220200808,
    0x0004042004000000,
    0x0100822020200011,
    0xc00444222012000a,
    0x0028808801216001,
    0x0400492088408100,
    0x0201c401040c0084,
    0x00840800910a0010,
    0x0000082080240060,
    0x2000840504006000,
    0x30010c4108405004,
    0x1008005410080802,
    0x8144042209100900,
    0x0208081020014400,
    0x004800201208ca00,
    0x0f18140408012008,
    0x1004002802102001,
    0x0841000820080811,
    0x0040200200a42008,
    0x0000800054042000,
    0x88010400410c9000,
    0x0520040470104290,
    0x1004040051500081,
    0x2002081833080021,
    0x000400c00c010142,
    0x941408200c002000,
    0x0658810000806011,
    0x0188071040440a00,
    0x4800404002011c00,
    0x0104442040404200,
    0x0c02180490200100,
    0x0004022401120400,
    0x80c0040400080120,
    0x8040010040820802,
    0x0480810700020090,
    0x0102008e00040242,
    0x0809005202050100,
    0x8002024220104080,
    0x0431008804142000,
    0x0019001802081400,
    0x0200014208040080,
    0x3308082008200100,
    0x041010500040c020,
    0x4012020c04210308,
    0x208220a202004080,
    0x0111040120082000,
    0x6803040141280a00,
    0x2101004202410000,
    0x8200000041108022,
    0x0000021082088000,
    0x0002410204010040,
    0x0040100400809000,
    0x0822088220820214,
    0x0040808090012004,
    0x00910224040218c9,
    0x0402814422015008,
    0x0090014004842410,
    0x0001000042304105,
    0x0010008830412a00,
    0x2520081090008908,
    0x40102000a0a60140,
];

const ROOK_MAGICS: [u64; 64] = [
    0x0a8002c000108020,
    0x06c00049b0002001,
    0x0100200010090040,
    0x2480041000800801,
    0x0280028004000800,
    0x0900410008040022,
    0x0280020001001080,
    0x2880002041000080,
    0xa000800080400034,
    0x0004808020004000,
    0x2290802004801000,
    0x0411000d00100020,
    0x0402800800040080,
    0x000b000401004208,
    0x2409000100040200,
    0x0001002100004082,
    0x0022878001e24000,
    0x1090810021004010,
    0x0801030040200012,
    0x0500808008001000,
    0x0a08018014000880,
    0x8000808004000200,
    0x0201008080010200,
    0x0801020000441091,
    0x0000800080204005,
    0x1040200040100048,
    0x0000120200402082,
    0x0d14880480100080,
    0x0012040280080080,
    0x0100040080020080,
    0x9020010080800200,
    0x0813241200148449,
    0x0491604001800080,
    0x0100401000402001,
    0x4820010021001040,
    0x0400402202000812,
    0x0209009005000802,
    0x0810800601800400,
    0x4301083214000150,
    0x204026458e001401,
    0x0040204000808000,
    0x8001008040010020,
    0x8410820820420010,
    0x1003001000090020,
    0x0804040008008080,
    0x0012000810020004,
    0x1000100200040208,
    0x430000a044020001,
    0x0280009023410300,
    0x00e0100040002240,
    0x0000200100401700,
    0x2244100408008080,
    0x0008000400801980,
    0x0002000810040200,
    0x8010100228810400,
    0x2000009044210200,
    0x4080008040102101,
    0x0040002080411d01,
    0x2005524060000901,
    0x0502001008400422,
    0x489a000810200402,
    0x0001004400080a13,
    0x4000011008020084,
    0x0026002114058042,
];

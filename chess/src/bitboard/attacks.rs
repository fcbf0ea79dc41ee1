//! Provides data and functions used to compute attacks
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use super::*;

/// Knight move offsets as `(files toward h, ranks toward 8)`
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2),
];

/// King move offsets as `(files toward h, ranks toward 8)`
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1), (1, 1), (1, 0), (1, -1), (0, -1), (-1, -1), (-1, 0), (-1, 1),
];

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A family of sliding pieces that share the same ray directions. Queens move as both.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Slider {
    Rook,
    Bishop,
}

impl Slider {
    /// Both sliding families
    pub const ALL: [Slider; 2] = [Slider::Rook, Slider::Bishop];

    /// Returns the four ray directions of the family as `(files toward h, ranks toward 8)`
    pub fn directions(self) -> &'static [(i8, i8); 4] {
        match self {
            Slider::Rook => &[(0, 1), (0, -1), (1, 0), (-1, 0)],
            Slider::Bishop => &[(1, 1), (-1, 1), (1, -1), (-1, -1)],
        }
    }
}

impl fmt::Display for Slider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slider::Rook => "rook",
            Slider::Bishop => "bishop",
        }.fmt(f)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Magic multiplier and placement of one square's attack table
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub(super) struct MagicEntry {
    pub(super) mask: Bitboard,
    pub(super) magic: u64,
    pub(super) shift: u32,
    pub(super) offset: usize,
}

impl MagicEntry {
    #[inline]
    fn index(&self, occ: Bitboard) -> usize {
        self.offset + ((occ & self.mask).0.wrapping_mul(self.magic) >> self.shift) as usize
    }
}

/// All 64 magic entries for one family, packed into a single attack array
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct SliderTable {
    pub(super) entries: Vec<MagicEntry>,
    pub(super) attacks: Vec<Bitboard>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Precomputed sliding attacks for rooks, bishops and queens
///
/// Tables are built once, by [`AttackTableBuilder`](struct.AttackTableBuilder.html) or
/// `AttackTables::new()`, and are read-only afterwards. They can be shared between threads by
/// reference.
///
/// ```rust
/// use chess::Square;
/// use chess::bitboard::{AttackTables, Bitboard};
///
/// let tables = AttackTables::new();
/// let occ = Bitboard::from(Square::C3) | Square::F6.into();
/// let attacks = tables.bishop_attacks(Square::E5, occ);
/// assert!(attacks.contains(Square::F6));
/// assert!(!attacks.contains(Square::G7));
/// assert!(attacks.contains(Square::D4));
/// assert!(attacks.contains(Square::C3));
/// assert!(!attacks.contains(Square::B2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackTables {
    rook: SliderTable,
    bishop: SliderTable,
}

impl AttackTables {
    /// Builds the tables with the default settings of `AttackTableBuilder`
    pub fn new() -> AttackTables {
        AttackTableBuilder::new().build()
    }

    pub(super) fn from_tables(rook: SliderTable, bishop: SliderTable) -> AttackTables {
        AttackTables { rook, bishop }
    }

    fn table(&self, slider: Slider) -> &SliderTable {
        match slider {
            Slider::Rook => &self.rook,
            Slider::Bishop => &self.bishop,
        }
    }

    /// Returns the squares attacked by a `slider` on `sq` given the occupied squares `occ`
    ///
    /// On each ray, the first occupied square is included and everything beyond it is excluded.
    /// Whether `occ` contains `sq` itself makes no difference, and `sq` is never in the result.
    #[inline]
    pub fn attacks(&self, sq: Square, occ: Bitboard, slider: Slider) -> Bitboard {
        let table = self.table(slider);
        table.attacks[table.entries[sq as usize].index(occ)]
    }

    /// Computes rook-like attacks to or from `sq` based on the occupied squares given by `occ`
    #[inline]
    pub fn rook_attacks(&self, sq: Square, occ: Bitboard) -> Bitboard {
        self.attacks(sq, occ, Slider::Rook)
    }

    /// Computes bishop-like attacks to or from `sq` based on the occupied squares given by `occ`
    #[inline]
    pub fn bishop_attacks(&self, sq: Square, occ: Bitboard) -> Bitboard {
        self.attacks(sq, occ, Slider::Bishop)
    }

    /// Computes queen-like attacks to or from `sq` based on the occupied squares given by `occ`
    #[inline]
    pub fn queen_attacks(&self, sq: Square, occ: Bitboard) -> Bitboard {
        self.rook_attacks(sq, occ) | self.bishop_attacks(sq, occ)
    }

    /// Returns the squares whose occupancy can change the attacks of a `slider` on `sq`
    pub fn blocker_mask(&self, sq: Square, slider: Slider) -> Bitboard {
        self.table(slider).entries[sq as usize].mask
    }

    /// Returns the magic multiplier used to index the table of a `slider` on `sq`
    pub fn magic(&self, sq: Square, slider: Slider) -> u64 {
        self.table(slider).entries[sq as usize].magic
    }

    /// Returns the number of table slots reserved for a `slider` on `sq`
    ///
    /// This is always `2^k`, where `k` is the number of squares in the blocker mask.
    pub fn table_len(&self, sq: Square, slider: Slider) -> usize {
        1 << (64 - self.table(slider).entries[sq as usize].shift)
    }

    /// Returns the total number of table slots for all 64 squares of a `slider`
    pub fn total_len(&self, slider: Slider) -> usize {
        self.table(slider).attacks.len()
    }
}

impl Default for AttackTables {
    fn default() -> Self {
        Self::new()
    }
}

//! Provides a representation of sets of squares and the sliding attack tables built on it
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
//! # Moves and Attacks
//! Bitboards are useful for quickly computing the moves or attacks available to a piece based on
//! its location on the board. In addition to the [`Bitboard`](struct.Bitboard.html) type, the
//! `bitboard` module provides precomputed [`AttackTables`](struct.AttackTables.html) for the
//! sliding pieces.
//!
//! ## Sliding Attacks (Bishops, Rooks and Queens)
//! Moves by sliding pieces can be blocked by pieces in the path. For this reason, sliding attack
//! queries require an additional argument: a `Bitboard` of occupied squares. Here's an example of
//! rook attacks:
//!
//! ```rust
//! use chess::Square;
//! use chess::bitboard::{AttackTables, Bitboard};
//!
//! let tables = AttackTables::new();
//! let occ = Bitboard::from(Square::A2) | Square::C1.into();
//! let mut attacks = tables.rook_attacks(Square::A1, occ);
//! assert_eq!(attacks.pop(), Some(Square::A2));
//! assert_eq!(attacks.pop(), Some(Square::B1));
//! assert_eq!(attacks.pop(), Some(Square::C1));
//! assert_eq!(attacks.pop(), None);
//! ```
//!
//! ## Pawn Advancements and Attacks
//! The advancements and attacks of multiple pawns can be computed simultaneously using the
//! [`Bitboard::shift_y`](struct.Bitboard.html#method.shift_y) and
//! [`Bitboard::shift_xy`](struct.Bitboard.html#method.shift_xy) methods. These methods shift all
//! squares in a `Bitboard` by a specified number of files and ranks. Squares shifted off the
//! board are dropped; nothing wraps from one edge to the other.
//!
//! ```rust
//! use chess::Square;
//! use chess::bitboard::Bitboard;
//!
//! let forward = -1; // black's turn, for white this would be 1
//! let pawns = Bitboard::from(Square::A7) | Square::B2.into();
//!
//! // attacks toward king-side
//! let mut ks_attacks = pawns.shift_xy(1, forward);
//! assert_eq!(ks_attacks.pop(), Some(Square::B6));
//! assert_eq!(ks_attacks.pop(), Some(Square::C1));
//! assert_eq!(ks_attacks.pop(), None);
//!
//! // attacks toward queen side
//! // the pawn on a7 is on the edge of the board, so it has no attacks on that side
//! let mut qs_attacks = pawns.shift_xy(-1, forward);
//! assert_eq!(qs_attacks.pop(), Some(Square::A1));
//! assert_eq!(qs_attacks.pop(), None);
//! ```
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::convert::TryInto;
use std::iter::FusedIterator;
use std::iter::{FromIterator, Extend};
use std::ops;
use std::fmt;
use super::*;

mod attacks;
mod builder;
pub use attacks::*;
pub use builder::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A set of squares with each bit representing one square
///
/// A `Bitboard` is, essentially, a set of [`Square`](../enum.Square.html)s stored in a 64-bit
/// integer. Each bit corresponds to one `Square`. If the bit is set, that `Square` is present. If
/// it is clear, the `Square` is not present. The diagram below shows the layout of the bits.
///
/// ```text
///     a    b    c    d    e    f    g    h
///    ---------------------------------------
/// 8 | 00 | 01 | 02 | 03 | 04 | 05 | 06 | 07 | 8
///    ---------------------------------------
/// 7 | 08 | 09 | 10 | 11 | 12 | 13 | 14 | 15 | 7
///    ---------------------------------------
/// 6 | 16 | 17 | 18 | 19 | 20 | 21 | 22 | 23 | 6
///    ---------------------------------------
/// 5 | 24 | 25 | 26 | 27 | 28 | 29 | 30 | 31 | 5
///    ---------------------------------------
/// 4 | 32 | 33 | 34 | 35 | 36 | 37 | 38 | 39 | 4
///    ---------------------------------------
/// 3 | 40 | 41 | 42 | 43 | 44 | 45 | 46 | 47 | 3
///    ---------------------------------------
/// 2 | 48 | 49 | 50 | 51 | 52 | 53 | 54 | 55 | 2
///    ---------------------------------------
/// 1 | 56 | 57 | 58 | 59 | 60 | 61 | 62 | 63 | 1
///    ---------------------------------------
///     a    b    c    d    e    f    g    h
/// ```
///
/// `Bitboard` implements all the bit-wise logic operators: `|`, `&`, `^`, `!`, `|=`, `&=`, and
/// `^=`. It also has methods that are typical for sets and collections, such as `insert`, `remove`,
/// `len`, and `contains`. It implements IntoIterator. However, since it's only a 64-bit value, it
/// implement's `Copy`, and there's no need for the borrowing iterator methods `iter` and
/// `iter_mut`.
///
/// The bit-shift operators are not implemented as they wouldn't be well-defined for a
/// 2-dimensional `Bitboard`. Instead, the methods `shift_y` and `shift_xy` are provided.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(u64);

impl Bitboard {
    /// The a-file
    pub const FILE_A: Bitboard = Bitboard(0x0101_0101_0101_0101);
    /// The h-file
    pub const FILE_H: Bitboard = Bitboard(0x8080_8080_8080_8080);
    /// The first rank
    pub const RANK_1: Bitboard = Bitboard(0xff00_0000_0000_0000);
    /// The second rank
    pub const RANK_2: Bitboard = Bitboard(0x00ff_0000_0000_0000);
    /// The seventh rank
    pub const RANK_7: Bitboard = Bitboard(0x0000_0000_0000_ff00);
    /// The eighth rank
    pub const RANK_8: Bitboard = Bitboard(0x0000_0000_0000_00ff);
    /// The outermost squares: ranks 1 and 8 together with files a and h
    pub const EDGES: Bitboard = Bitboard(0xff81_8181_8181_81ff);
    /// Every square on the board
    pub const ALL: Bitboard = Bitboard(!0);

    /// Creates a new, empty bitboard
    pub fn new() -> Bitboard {
        Default::default()
    }

    /// Returns the raw 64-bit value, with bit 0 representing a8
    pub fn bits(self) -> u64 {
        self.0
    }

    /// Returns the number of squares in the bitboard
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns `true` if the bitboard is empty
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the bitboard contains `sq`
    pub fn contains(self, sq: Square) -> bool {
        !(self & sq.into()).is_empty()
    }

    /// Returns `true` if `self` intersects `other`
    pub fn intersects(self, other: Bitboard) -> bool {
        !(self & other).is_empty()
    }

    /// Returns `true` if `self` does not intersect `other`
    pub fn is_disjoint(self, other: Bitboard) -> bool {
        (self & other).is_empty()
    }

    /// Adds a square to the bitboard if it is not already present
    pub fn insert(&mut self, sq: Square) {
        *self |= sq.into();
    }

    /// Removes a square from the bitboard if it is present
    pub fn remove(&mut self, sq: Square) {
        *self &= !Bitboard::from(sq);
    }

    /// Removes the lowest-numbered square from the bitboard and returns it
    pub fn pop(&mut self) -> Option<Square> {
        if self.0 > 0 {
            // get the least significant bit
            let sq: Square = (self.0.trailing_zeros() as usize).try_into().expect("INFALLIBLE");
            // clear the least significant bit
            self.0 &= self.0 - 1;

            Some(sq)
        } else {
            None
        }
    }

    /// Returns the square that would be removed by a pop command
    pub fn peek(self) -> Option<Square> {
        if self.0 > 0 {
            // get the least significant bit
            Some((self.0.trailing_zeros() as usize).try_into().expect("INFALLIBLE"))
        } else {
            None
        }
    }

    /// Returns a bitboard with all squares shifted by `y` ranks toward rank 8
    ///
    /// Squares shifted past rank 1 or rank 8 are dropped.
    ///
    /// ```rust
    /// # use chess::Square;
    /// # use chess::bitboard::Bitboard;
    /// #
    /// assert_eq!(Bitboard::from(Square::E2).shift_y(2), Bitboard::from(Square::E4));
    /// assert_eq!(Bitboard::from(Square::A8).shift_y(1), Bitboard::new());
    /// ```
    pub fn shift_y(self, y: i8) -> Bitboard {
        self.shift_bits(-8 * y as i32)
    }

    /// Returns a bitboard with all squares shifted by `x` files toward the h-file and `y` ranks
    /// toward rank 8.
    ///
    /// Squares shifted off any edge of the board are dropped. In particular, nothing wraps from
    /// the h-file to the a-file or the other way around. Both `x` and `y` must be in the range
    /// `-7..=7`.
    ///
    /// See the module-level documentation for
    /// [an example](index.html#pawn-advancements-and-attacks) of this method.
    pub fn shift_xy(self, x: i8, y: i8) -> Bitboard {
        let shifted = self.shift_bits(x as i32 - 8 * y as i32);

        if x > 0 {
            shifted & !Bitboard::west_files(x)
        } else if x < 0 {
            shifted & Bitboard::west_files(8 + x)
        } else {
            shifted
        }
    }

    /// Files a through the `n`th file, for `0 <= n <= 8`
    fn west_files(n: i8) -> Bitboard {
        let rank = (1u64 << n) - 1;
        Bitboard(Bitboard::FILE_A.0 * rank)
    }

    /// Shifts toward higher square numbers by `bits`, or lower numbers for negative `bits`
    fn shift_bits(self, bits: i32) -> Bitboard {
        if bits > 0 {
            Bitboard(self.0.checked_shl(bits as u32).unwrap_or(0))
        } else {
            Bitboard(self.0.checked_shr(-bits as u32).unwrap_or(0))
        }
    }

    /// Renders the bitboard as an 8x8 grid of `0`s and `1`s, rank 8 at the top
    ///
    /// ```rust
    /// # use chess::Square;
    /// # use chess::bitboard::Bitboard;
    /// #
    /// let diagram = Bitboard::from(Square::H1).diagram();
    /// assert_eq!(diagram.lines().nth(7), Some("1 0 0 0 0 0 0 0 1"));
    /// ```
    pub fn diagram(self) -> String {
        let mut s = String::new();

        for row in 0..8 {
            s += &(8 - row).to_string();
            for col in 0..8 {
                s += if self.0 >> (row * 8 + col) & 1 == 1 { " 1" } else { " 0" };
            }
            s.push('\n');
        }
        s += "  a b c d e f g h\n";

        s
    }
}

impl ops::Not for Bitboard {
    type Output = Self;

    fn not(self) -> Self::Output {
        Bitboard(!self.0)
    }
}

impl ops::BitAnd for Bitboard {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 & rhs.0)
    }
}

impl ops::BitAndAssign for Bitboard {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0
    }
}

impl ops::BitOr for Bitboard {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 | rhs.0)
    }
}

impl ops::BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0
    }
}

impl ops::BitXor for Bitboard {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl ops::BitXorAssign for Bitboard {
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0
    }
}

impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::UpperHex for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

impl fmt::LowerHex for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::Binary for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Binary::fmt(&self.0, f)
    }
}

impl From<u64> for Bitboard {
    fn from(val: u64) -> Bitboard {
        Bitboard(val)
    }
}

impl From<Bitboard> for u64 {
    fn from(val: Bitboard) -> u64 {
        val.0
    }
}

impl From<Square> for Bitboard {
    fn from(sq: Square) -> Bitboard {
        Bitboard(1 << sq as u64)
    }
}

impl From<File> for Bitboard {
    fn from(f: File) -> Bitboard {
        Bitboard(Bitboard::FILE_A.0 << f as u64)
    }
}

impl From<Rank> for Bitboard {
    fn from(r: Rank) -> Bitboard {
        Bitboard(Bitboard::RANK_8.0 << (8 * r.row() as u64))
    }
}

impl From<IntoIter> for Bitboard {
    fn from(iter: IntoIter) -> Bitboard {
        iter.0
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

impl FromIterator<Square> for Bitboard {
    /// If converting from `bitboard::IntoIter`, use `Bitboard::from()` instead as that is faster
    fn from_iter<I: IntoIterator<Item=Square>>(iter: I) -> Self {
        let mut bd = Bitboard::new();

        for sq in iter {
            bd.insert(sq);
        }

        bd
    }
}

impl Extend<Square> for Bitboard {
    fn extend<I: IntoIterator<Item=Square>>(&mut self, iter: I) {
        for sq in iter {
            self.insert(sq);
        }
    }
}

/// Iterator over the squares of a `Bitboard`, in ascending index order
#[derive(Debug, Copy, Clone)]
pub struct IntoIter(Bitboard);

impl Iterator for IntoIter {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }
}

impl ExactSizeIterator for IntoIter {
    fn len(&self) -> usize {
        self.0.len()
    }
}

impl FusedIterator for IntoIter { }

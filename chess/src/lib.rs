//! Bitboard move generation for chess.
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
//! The crate is organized bottom up:
//!
//!  -  [`BoardState`](struct.BoardState.html) holds one [`Bitboard`](bitboard/struct.Bitboard.html)
//!     per piece type and color, plus the side to move, castling rights, en-passant target and
//!     move counters. It is usually loaded from [Forsyth-Edwards
//!     Notation (FEN)](https://en.wikipedia.org/wiki/Forsyth%E2%80%93Edwards_Notation).
//!  -  [`AttackTables`](bitboard/struct.AttackTables.html) are built once by an
//!     [`AttackTableBuilder`](bitboard/struct.AttackTableBuilder.html) and answer sliding attack
//!     queries for rooks, bishops and queens with a single multiply and table lookup.
//!  -  [`MoveGenerator`](movegen/struct.MoveGenerator.html) combines the two to produce every
//!     pseudo-legal [`Move`](moves/struct.Move.html) for one side, each packed into 16 bits.
//!
//! ```rust
//! use chess::{AttackTables, BoardState, Color, MoveGenerator};
//!
//! let tables = AttackTables::new();
//! let board = BoardState::new();
//! let moves = MoveGenerator::new(&tables).generate(Color::White, &board);
//! assert_eq!(moves.len(), 20);
//! ```
//!
//! # Square numbering
//! Squares are numbered from the top-left corner of a board printed from white's point of view:
//! a8 is 0, h8 is 7, a1 is 56 and h1 is 63. Moving toward rank 8 subtracts 8 from the index and
//! moving toward the h-file adds 1.
////////////////////////////////////////////////////////////////////////////////////////////////////
#![warn(missing_docs, missing_debug_implementations, unused_extern_crates)]
#![warn(clippy::unimplemented, clippy::todo)]

use std::ops;
use std::fmt;
use std::mem;
use std::str::FromStr;
use std::convert::TryFrom;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Which side a piece or player is on, based on the color of the pieces for that side.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// The number of colors
    pub const COUNT: usize = 2;
}

impl ops::Not for Color {
    type Output = Color;

    /// Returns the opposite color
    ///
    /// # Example
    /// ```
    /// use chess::Color;
    /// assert_eq!(!Color::White, Color::Black);
    /// assert_eq!(!Color::Black, Color::White);
    /// ```
    fn not(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => 'w'.fmt(f),
            Color::Black => 'b'.fmt(f),
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "w" => Ok(Color::White),
            "b" => Ok(Color::Black),
            _   => Err(Error::ParseError),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::White
    }
}

impl TryFrom<usize> for Color {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        if value < Self::COUNT {
            unsafe { Ok(mem::transmute::<u8, Color>(value as u8)) }
        } else {
            Err(Error::TryFromIntError)
        }
    }
}

impl From<Color> for usize {
    fn from(value: Color) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The type of a chess piece
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Piece {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl Piece {
    /// The number of piece types
    pub const COUNT: usize = Piece::King as usize + 1;

    /// Every piece type, in discriminant order
    pub const ALL: [Piece; Piece::COUNT] = [
        Piece::Pawn, Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen, Piece::King,
    ];

    /// Returns the FEN letter for this piece type in the given color (uppercase for white)
    pub fn to_char(self, color: Color) -> char {
        let c = match self {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        };

        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parses a FEN piece letter, returning its color and type
    pub fn from_char(c: char) -> Option<(Color, Piece)> {
        let piece = match c.to_ascii_lowercase() {
            'p' => Piece::Pawn,
            'n' => Piece::Knight,
            'b' => Piece::Bishop,
            'r' => Piece::Rook,
            'q' => Piece::Queen,
            'k' => Piece::King,
            _ => return None,
        };
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };

        Some((color, piece))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_char(Color::White).fmt(f)
    }
}

impl FromStr for Piece {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next().and_then(Piece::from_char), chars.next()) {
            (Some((_, piece)), None) => Ok(piece),
            _ => Err(Error::ParseError),
        }
    }
}

impl Default for Piece {
    fn default() -> Self {
        Piece::Pawn
    }
}

impl TryFrom<usize> for Piece {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        if value < Self::COUNT {
            unsafe { Ok(mem::transmute::<u8, Piece>(value as u8)) }
        } else {
            Err(Error::TryFromIntError)
        }
    }
}

impl From<Piece> for usize {
    fn from(value: Piece) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Vertical column of the board, labeled from left to right from `White`'s perspective as
/// `A` through `H`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum File {
    // discriminants are spelled out so nothing can go wrong when we use transmute later
    A = 0, B = 1, C = 2, D = 3, E = 4, F = 5, G = 6, H = 7,
}

impl File {
    /// The number of files
    pub const COUNT: usize = File::H as usize + 1;
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ((b'a' + *self as u8) as char).fmt(f)
    }
}

impl FromStr for File {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "a"|"A" => Ok(File::A),
            "b"|"B" => Ok(File::B),
            "c"|"C" => Ok(File::C),
            "d"|"D" => Ok(File::D),
            "e"|"E" => Ok(File::E),
            "f"|"F" => Ok(File::F),
            "g"|"G" => Ok(File::G),
            "h"|"H" => Ok(File::H),
            _       => Err(Error::ParseError),
        }
    }
}

impl Default for File {
    fn default() -> Self {
        File::A
    }
}

impl TryFrom<usize> for File {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        if value < Self::COUNT {
            unsafe { Ok(mem::transmute::<u8, File>(value as u8)) }
        } else {
            Err(Error::TryFromIntError)
        }
    }
}

impl From<File> for usize {
    fn from(value: File) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Horizontal row of the board, labeled from nearest to farthest from `White`'s perspective
/// as `R1` through `R8`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Rank {
    // discriminants are spelled out so nothing can go wrong when we use transmute later
    R1 = 0, R2 = 1, R3 = 2, R4 = 3, R5 = 4, R6 = 5, R7 = 6, R8 = 7,
}

impl Rank {
    /// The number of ranks
    pub const COUNT: usize = Rank::R8 as usize + 1;

    /// Returns the row this rank occupies on a board printed from white's side, where rank 8 is
    /// row 0 and rank 1 is row 7.
    pub fn row(self) -> usize {
        Rank::R8 as usize - self as usize
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (*self as usize + 1).fmt(f)
    }
}

impl FromStr for Rank {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "1" => Ok(Rank::R1),
            "2" => Ok(Rank::R2),
            "3" => Ok(Rank::R3),
            "4" => Ok(Rank::R4),
            "5" => Ok(Rank::R5),
            "6" => Ok(Rank::R6),
            "7" => Ok(Rank::R7),
            "8" => Ok(Rank::R8),
            _   => Err(Error::ParseError),
        }
    }
}

impl Default for Rank {
    fn default() -> Self {
        Rank::R1
    }
}

impl TryFrom<usize> for Rank {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        if value < Self::COUNT {
            unsafe { Ok(mem::transmute::<u8, Rank>(value as u8)) }
        } else {
            Err(Error::TryFromIntError)
        }
    }
}

impl From<Rank> for usize {
    fn from(value: Rank) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A specific square on the board, labeled using the `File` and `Rank` as coordinates.
///
/// The discriminant of each square is its index: the row from the top of the board (rank 8)
/// times eight, plus the file.
///
/// ```text
///     a    b    c    d    e    f    g    h
///    ---------------------------------------
/// 8 | 00 | 01 | 02 | 03 | 04 | 05 | 06 | 07 | 8
///    ---------------------------------------
/// 7 | 08 | 09 | 10 | 11 | 12 | 13 | 14 | 15 | 7
///    ---------------------------------------
///                      . . .
///    ---------------------------------------
/// 1 | 56 | 57 | 58 | 59 | 60 | 61 | 62 | 63 | 1
///    ---------------------------------------
///     a    b    c    d    e    f    g    h
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Square {
    // discriminants are spelled out so nothing can go wrong when we use transmute later
    A8 = 0o00, B8 = 0o01, C8 = 0o02, D8 = 0o03, E8 = 0o04, F8 = 0o05, G8 = 0o06, H8 = 0o07,
    A7 = 0o10, B7 = 0o11, C7 = 0o12, D7 = 0o13, E7 = 0o14, F7 = 0o15, G7 = 0o16, H7 = 0o17,
    A6 = 0o20, B6 = 0o21, C6 = 0o22, D6 = 0o23, E6 = 0o24, F6 = 0o25, G6 = 0o26, H6 = 0o27,
    A5 = 0o30, B5 = 0o31, C5 = 0o32, D5 = 0o33, E5 = 0o34, F5 = 0o35, G5 = 0o36, H5 = 0o37,
    A4 = 0o40, B4 = 0o41, C4 = 0o42, D4 = 0o43, E4 = 0o44, F4 = 0o45, G4 = 0o46, H4 = 0o47,
    A3 = 0o50, B3 = 0o51, C3 = 0o52, D3 = 0o53, E3 = 0o54, F3 = 0o55, G3 = 0o56, H3 = 0o57,
    A2 = 0o60, B2 = 0o61, C2 = 0o62, D2 = 0o63, E2 = 0o64, F2 = 0o65, G2 = 0o66, H2 = 0o67,
    A1 = 0o70, B1 = 0o71, C1 = 0o72, D1 = 0o73, E1 = 0o74, F1 = 0o75, G1 = 0o76, H1 = 0o77,
}

impl Square {
    /// The number of squares
    pub const COUNT: usize = Square::H1 as usize + 1;

    /// Returns a square from its file and rank
    pub fn from_coord(file: File, rank: Rank) -> Square {
        Square::try_from((rank.row() << 3) + file as usize).expect("INFALLIBLE")
    }

    /// Returns the square's file
    pub fn file(self) -> File {
        File::try_from((self as usize) & 7).expect("INFALLIBLE")
    }

    /// Returns the square's rank
    pub fn rank(self) -> Rank {
        Rank::try_from(Rank::R8 as usize - ((self as usize) >> 3)).expect("INFALLIBLE")
    }

    /// Returns an iterator over all squares in index order, a8 first and h1 last
    pub fn all() -> impl Iterator<Item = Square> {
        (0..Square::COUNT).map(|i| Square::try_from(i).expect("INFALLIBLE"))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self.file().to_string() + &self.rank().to_string()).fmt(f)
    }
}

impl FromStr for Square {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let c: Vec<_> = s.chars().collect();
        if c.len() == 2 {
            Ok(Square::from_coord(c[0].to_string().parse()?, c[1].to_string().parse()?))
        } else {
            Err(Error::ParseError)
        }
    }
}

impl Default for Square {
    fn default() -> Self {
        Square::A8
    }
}

impl TryFrom<usize> for Square {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        if value < Self::COUNT {
            unsafe { Ok(mem::transmute::<u8, Square>(value as u8)) }
        } else {
            Err(Error::TryFromIntError)
        }
    }
}

impl From<Square> for usize {
    fn from(value: Square) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
pub mod bitboard;
pub mod board;
pub mod moves;
pub mod movegen;
pub mod error;

pub use error::{Error, Result};
pub use bitboard::{Bitboard, AttackTables, AttackTableBuilder, Slider};
pub use board::{BoardState, BoardStateBuilder, CastlingRights};
pub use moves::{Move, MoveList, Promotion, Special};
pub use movegen::MoveGenerator;


#[cfg(test)]
mod piece_tests {
    use super::{Color, Piece};

    #[test]
    fn fromstr_accepts_both_cases() {
        for piece in Piece::ALL.iter() {
            let upper = piece.to_char(Color::White).to_string();
            let lower = piece.to_char(Color::Black).to_string();
            assert_eq!(upper.parse::<Piece>().unwrap(), *piece);
            assert_eq!(lower.parse::<Piece>().unwrap(), *piece);
        }
        assert!("X".parse::<Piece>().is_err());
        assert!("pp".parse::<Piece>().is_err());
        assert!("".parse::<Piece>().is_err());
    }

    #[test]
    fn from_char_reports_color() {
        assert_eq!(Piece::from_char('Q'), Some((Color::White, Piece::Queen)));
        assert_eq!(Piece::from_char('n'), Some((Color::Black, Piece::Knight)));
        assert_eq!(Piece::from_char('x'), None);
        assert_eq!(Piece::from_char('3'), None);
    }
}

#[cfg(test)]
mod file_and_rank_tests {
    use std::convert::TryFrom;
    use super::{File, Rank};

    #[test]
    fn display_and_fromstr_agree() {
        for i in 0..File::COUNT {
            let file = File::try_from(i).unwrap();
            assert_eq!(file.to_string().parse::<File>().unwrap(), file);
        }
        for i in 0..Rank::COUNT {
            let rank = Rank::try_from(i).unwrap();
            assert_eq!(rank.to_string(), (i + 1).to_string());
            assert_eq!(rank.to_string().parse::<Rank>().unwrap(), rank);
        }
        assert_eq!(File::H.to_string(), "h");
        assert!("x".parse::<File>().is_err());
        assert!("9".parse::<Rank>().is_err());
    }

    #[test]
    fn rows_count_down_from_rank_8() {
        assert_eq!(Rank::R8.row(), 0);
        assert_eq!(Rank::R1.row(), 7);
    }
}

#[cfg(test)]
mod square_tests {
    use std::convert::TryFrom;
    use super::{File, Rank, Square};

    #[test]
    fn indices_start_at_a8() {
        assert_eq!(Square::A8 as usize, 0);
        assert_eq!(Square::H8 as usize, 7);
        assert_eq!(Square::A1 as usize, 56);
        assert_eq!(Square::H1 as usize, 63);
        assert_eq!(Square::E2 as usize, 52);
        assert_eq!(Square::E4 as usize, 36);
    }

    #[test]
    fn from_coord_matches_variant_names() {
        assert_eq!(Square::from_coord(File::A, Rank::R8), Square::A8);
        assert_eq!(Square::from_coord(File::H, Rank::R1), Square::H1);
        assert_eq!(Square::from_coord(File::G, Rank::R5), Square::G5);
        assert_eq!(Square::from_coord(File::C, Rank::R6), Square::C6);
    }

    #[test]
    fn file_and_rank_methods_match_from_coord() {
        for f in 0..File::COUNT {
            for r in 0..Rank::COUNT {
                let (f, r) = (File::try_from(f).unwrap(), Rank::try_from(r).unwrap());
                let s = Square::from_coord(f, r);
                assert_eq!(f, s.file());
                assert_eq!(r, s.rank());
            }
        }
    }

    #[test]
    fn display_uses_file_and_rank_from_bottom() {
        for sq in Square::all() {
            let index = sq as usize;
            let expected = format!("{}{}", (b'a' + (index % 8) as u8) as char, 8 - index / 8);
            assert_eq!(sq.to_string(), expected);
            assert_eq!(expected.parse::<Square>().unwrap(), sq);
        }
    }

    #[test]
    fn fromstr_trait_produces_errors_when_it_should() {
        assert!("a".parse::<Square>().is_err());
        assert!("1".parse::<Square>().is_err());
        assert!("ax".parse::<Square>().is_err());
        assert!("x1".parse::<Square>().is_err());
        assert!("a1x".parse::<Square>().is_err());
    }

    #[test]
    fn usize_conversions_are_consistent() {
        for i in 0..Square::COUNT {
            let s = Square::try_from(i).unwrap();
            assert_eq!(usize::from(s), i);
        }
        assert!(Square::try_from(Square::COUNT).is_err());
    }
}

//! Contains the 16-bit move encoding and the list type returned by the move generator
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
//! A [`Move`](struct.Move.html) is packed into 16 bits:
//!
//! ```text
//!  15 14 13 12 11 10  9  8  7  6  5  4  3  2  1  0
//! +-----+-----+-----------------+-----------------+
//! | spc | pro |     origin      |   destination   |
//! +-----+-----+-----------------+-----------------+
//! ```
//!
//! Squares are numbered from 0 (a8) to 63 (h1). The promotion selector is only meaningful when
//! the special tag is [`Special::Promotion`](enum.Special.html).
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::convert::TryFrom;
use std::ops::Deref;
use std::iter::FromIterator;
use std::fmt;
use lazy_static::lazy_static;
use regex::Regex;
use super::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Which piece to promote to for a promotion move
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Promotion {
    ToQueen = 0,
    ToKnight = 1,
    ToBishop = 2,
    ToRook = 3,
}

use Promotion::*;

impl Promotion {
    /// Every promotion, in the order the move generator emits them
    pub const ALL: [Promotion; 4] = [ToQueen, ToKnight, ToBishop, ToRook];

    fn from_bits(bits: u16) -> Promotion {
        match bits & 3 {
            0 => ToQueen,
            1 => ToKnight,
            2 => ToBishop,
            _ => ToRook,
        }
    }

    /// Returns the suffix used for this promotion in coordinate notation
    pub fn to_char(self) -> char {
        match self {
            ToQueen => 'q',
            ToKnight => 'n',
            ToBishop => 'b',
            ToRook => 'r',
        }
    }
}

impl Default for Promotion {
    fn default() -> Self {
        ToQueen
    }
}

impl From<Promotion> for Piece {
    fn from(prom: Promotion) -> Self {
        match prom {
            ToQueen => Piece::Queen,
            ToKnight => Piece::Knight,
            ToBishop => Piece::Bishop,
            ToRook => Piece::Rook,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The kind of move, as stored in the top two bits of a `Move`
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Special {
    /// Any move which is not a promotion, en-passant capture or castling move
    Normal = 0,
    /// A pawn promotion
    Promotion = 1,
    /// An en passant capture
    EnPassant = 2,
    /// A castling move, stored as the king's move
    Castling = 3,
}

impl Special {
    fn from_bits(bits: u16) -> Special {
        match bits & 3 {
            0 => Special::Normal,
            1 => Special::Promotion,
            2 => Special::EnPassant,
            _ => Special::Castling,
        }
    }
}

impl Default for Special {
    fn default() -> Self {
        Special::Normal
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A pseudo-legal move packed into 16 bits
///
/// Two moves with the same bits are the same move.
///
/// ```rust
/// use chess::{Move, Promotion, Special, Square};
///
/// let mv = Move::new(Square::E7, Square::E8, Promotion::ToKnight, Special::Promotion);
/// assert_eq!(mv.origin(), Square::E7);
/// assert_eq!(mv.destination(), Square::E8);
/// assert_eq!(mv.to_string(), "e7e8n");
/// assert_eq!(Move::from_bits(mv.bits()), mv);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Move(u16);

impl Move {
    const DEST_MASK: u16 = 0x003f;
    const ORIG_MASK: u16 = 0x0fc0;
    const PROMOTION_MASK: u16 = 0x3000;
    const SPECIAL_MASK: u16 = 0xc000;

    /// Packs a move
    pub fn new(orig: Square, dest: Square, promotion: Promotion, special: Special) -> Move {
        Move(dest as u16
            | (orig as u16) << 6
            | (promotion as u16) << 12
            | (special as u16) << 14)
    }

    /// Packs a move that is not a promotion, en-passant capture or castling move
    pub fn normal(orig: Square, dest: Square) -> Move {
        Move::new(orig, dest, ToQueen, Special::Normal)
    }

    /// Unpacks a move from its 16-bit representation. Every value is a well-formed move.
    pub fn from_bits(bits: u16) -> Move {
        Move(bits)
    }

    /// Returns the 16-bit representation of the move
    pub fn bits(self) -> u16 {
        self.0
    }

    /// Returns the origin of the moved piece
    pub fn origin(self) -> Square {
        Square::try_from(((self.0 & Self::ORIG_MASK) >> 6) as usize).expect("INFALLIBLE")
    }

    /// Returns the destination of the moved piece
    pub fn destination(self) -> Square {
        Square::try_from((self.0 & Self::DEST_MASK) as usize).expect("INFALLIBLE")
    }

    /// Returns the raw promotion selector, regardless of the kind of move
    pub fn promotion_selector(self) -> Promotion {
        Promotion::from_bits((self.0 & Self::PROMOTION_MASK) >> 12)
    }

    /// Returns the kind of move
    pub fn special(self) -> Special {
        Special::from_bits((self.0 & Self::SPECIAL_MASK) >> 14)
    }

    /// Returns the type of promotion, if the move is a promotion
    pub fn promotion(self) -> Option<Promotion> {
        if self.special() == Special::Promotion {
            Some(self.promotion_selector())
        } else {
            None
        }
    }

    /// Returns `true` if the move is a promotion
    pub fn is_promotion(self) -> bool {
        self.special() == Special::Promotion
    }
}

impl fmt::Display for Move {
    /// Formats the move in coordinate notation, such as `e2e4` or `e7e8q`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = self.origin().to_string() + &self.destination().to_string();
        if let Some(promotion) = self.promotion() {
            s.push(promotion.to_char());
        }
        s.fmt(f)
    }
}

impl From<Move> for u16 {
    fn from(mv: Move) -> u16 {
        mv.0
    }
}

impl From<u16> for Move {
    fn from(bits: u16) -> Move {
        Move(bits)
    }
}

lazy_static! {
    static ref COORDINATE_MOVE: Regex =
        Regex::new(r"^([a-h][1-8])([a-h][1-8])([qnbr]?)$").expect("INFALLIBLE");
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// An ordered list of moves, as produced by the move generator
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MoveList(Vec<Move>);

impl MoveList {
    /// Creates an empty list
    pub fn new() -> MoveList {
        Default::default()
    }

    pub(crate) fn push(&mut self, mv: Move) {
        self.0.push(mv);
    }

    /// Looks up a move by its coordinate notation, such as `e2e4`, `e1g1` or `e7e8q`
    ///
    /// Returns `Error::ParseError` if `s` is not coordinate notation and `Error::UnknownMove` if
    /// no move in the list matches it.
    ///
    /// ```rust
    /// use chess::{AttackTables, BoardState, Color, MoveGenerator, Square};
    ///
    /// let tables = AttackTables::new();
    /// let moves = MoveGenerator::new(&tables).generate(Color::White, &BoardState::new());
    /// let mv = moves.find("g1f3")?;
    /// assert_eq!(mv.origin(), Square::G1);
    /// assert!(moves.find("e2e5").is_err());
    /// # Ok::<(), chess::Error>(())
    /// ```
    pub fn find(&self, s: &str) -> Result<Move> {
        let caps = COORDINATE_MOVE.captures(s.trim()).ok_or(Error::ParseError)?;
        let orig: Square = caps[1].parse()?;
        let dest: Square = caps[2].parse()?;
        let promotion = caps[3].chars().next();

        self.0.iter()
            .find(|mv| {
                mv.origin() == orig
                    && mv.destination() == dest
                    && mv.promotion().map(Promotion::to_char) == promotion
            })
            .cloned()
            .ok_or(Error::UnknownMove)
    }
}

impl Deref for MoveList {
    type Target = [Move];

    fn deref(&self) -> &[Move] {
        &self.0
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Move> for MoveList {
    fn from_iter<I: IntoIterator<Item=Move>>(iter: I) -> Self {
        MoveList(iter.into_iter().collect())
    }
}

impl From<MoveList> for Vec<Move> {
    fn from(list: MoveList) -> Vec<Move> {
        list.0
    }
}

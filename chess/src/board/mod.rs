//! Contains structures related to the `BoardState`
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::ops;
use std::str::FromStr;
use log::debug;
use super::*;

use Color::*;
use Piece::*;

mod builder;
mod fen;
pub use builder::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The set of castling moves that are still available to either player
///
/// Each right is one bit: white king side is `1`, white queen side is `2`, black king side is `4`
/// and black queen side is `8`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    /// No castling rights
    pub const NONE: CastlingRights = CastlingRights(0);
    /// White may castle king side
    pub const WHITE_KING_SIDE: CastlingRights = CastlingRights(1);
    /// White may castle queen side
    pub const WHITE_QUEEN_SIDE: CastlingRights = CastlingRights(2);
    /// Black may castle king side
    pub const BLACK_KING_SIDE: CastlingRights = CastlingRights(4);
    /// Black may castle queen side
    pub const BLACK_QUEEN_SIDE: CastlingRights = CastlingRights(8);
    /// Every castling right
    pub const ALL: CastlingRights = CastlingRights(0xf);

    /// Creates castling rights from the low four bits of `bits`
    pub fn from_bits(bits: u8) -> CastlingRights {
        CastlingRights(bits & Self::ALL.0)
    }

    /// Returns the rights as a 4-bit value
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Returns the king side right for `color`
    pub fn king_side(color: Color) -> CastlingRights {
        match color {
            White => Self::WHITE_KING_SIDE,
            Black => Self::BLACK_KING_SIDE,
        }
    }

    /// Returns the queen side right for `color`
    pub fn queen_side(color: Color) -> CastlingRights {
        match color {
            White => Self::WHITE_QUEEN_SIDE,
            Black => Self::BLACK_QUEEN_SIDE,
        }
    }

    /// Returns `true` if every right in `other` is also in `self`
    pub fn contains(self, other: CastlingRights) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if there are no rights
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Adds the rights in `other`
    pub fn insert(&mut self, other: CastlingRights) {
        self.0 |= other.0;
    }

    /// Removes the rights in `other`
    pub fn remove(&mut self, other: CastlingRights) {
        self.0 &= !other.0;
    }
}

impl ops::BitOr for CastlingRights {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        CastlingRights(self.0 | rhs.0)
    }
}

impl fmt::Display for CastlingRights {
    /// Formats the rights the way they appear in a FEN string, such as `KQq` or `-`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return "-".fmt(f);
        }

        let mut s = String::new();
        for (right, c) in &[
            (Self::WHITE_KING_SIDE, 'K'),
            (Self::WHITE_QUEEN_SIDE, 'Q'),
            (Self::BLACK_KING_SIDE, 'k'),
            (Self::BLACK_QUEEN_SIDE, 'q'),
        ] {
            if self.contains(*right) {
                s.push(*c);
            }
        }
        s.fmt(f)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The pieces on the board, together with the side to move, castling rights, en-passant target
/// and move counters.
///
/// A `BoardState` is a plain value. It is replaced as a whole when a new position is loaded and is
/// never modified while moves are being generated from it.
///
/// ```rust
/// use chess::{BoardState, Color, Piece, Square};
///
/// let board: BoardState = "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1".parse()?;
/// assert_eq!(board.piece_at(Square::E2), Some((Color::White, Piece::Pawn)));
/// assert_eq!(board.occupied().len(), 3);
/// # Ok::<(), chess::Error>(())
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BoardState {
    pieces: [[Bitboard; Piece::COUNT]; Color::COUNT],
    en_passant: Bitboard,
    castling: CastlingRights,
    turn: Color,
    half_moves: usize,
    move_num: usize,
}

impl BoardState {
    /// Returns the standard starting position
    pub fn new() -> BoardState {
        BoardState {
            pieces: [
                // white
                [
                    // pawns
                    Bitboard::RANK_2,
                    // knights
                    Bitboard::from(Square::B1) | Square::G1.into(),
                    // bishops
                    Bitboard::from(Square::C1) | Square::F1.into(),
                    // rooks
                    Bitboard::from(Square::A1) | Square::H1.into(),
                    // queen
                    Bitboard::from(Square::D1),
                    // king
                    Bitboard::from(Square::E1),
                ],
                // black
                [
                    // pawns
                    Bitboard::RANK_7,
                    // knights
                    Bitboard::from(Square::B8) | Square::G8.into(),
                    // bishops
                    Bitboard::from(Square::C8) | Square::F8.into(),
                    // rooks
                    Bitboard::from(Square::A8) | Square::H8.into(),
                    // queen
                    Bitboard::from(Square::D8),
                    // king
                    Bitboard::from(Square::E8),
                ],
            ],
            en_passant: Bitboard::new(),
            castling: CastlingRights::ALL,
            turn: White,
            half_moves: 0,
            move_num: 1,
        }
    }

    /// Returns a board with no pieces, white to move, no castling rights and no en-passant target
    pub fn empty() -> BoardState {
        BoardState {
            pieces: [[Bitboard::new(); Piece::COUNT]; Color::COUNT],
            en_passant: Bitboard::new(),
            castling: CastlingRights::NONE,
            turn: White,
            half_moves: 0,
            move_num: 1,
        }
    }

    /// Replaces the whole state with the position described by the FEN string `s`
    ///
    /// If `s` is invalid, an error is returned and `self` is left unchanged.
    pub fn load_fen(&mut self, s: &str) -> Result<()> {
        *self = BoardState::from_fen_str(s)?;
        debug!("loaded position {}", self);
        Ok(())
    }

    /// Resets the board to the standard starting position, as at the start of a new game
    pub fn reset(&mut self) {
        *self = BoardState::new();
    }

    /// Returns the squares occupied by `piece`s of the given `color`
    pub fn pieces(&self, color: Color, piece: Piece) -> Bitboard {
        self.pieces[color as usize][piece as usize]
    }

    /// Returns the squares occupied by pieces of the given `color`
    pub fn occupied_by(&self, color: Color) -> Bitboard {
        self.pieces[color as usize].iter().fold(Bitboard::new(), |occ, &bb| occ | bb)
    }

    /// Returns the squares occupied by any piece
    pub fn occupied(&self) -> Bitboard {
        self.occupied_by(White) | self.occupied_by(Black)
    }

    /// Returns the squares not occupied by any piece
    pub fn empty_squares(&self) -> Bitboard {
        !self.occupied()
    }

    /// Returns the color and type of the piece on `sq`, if any
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        for &color in &[White, Black] {
            for &piece in Piece::ALL.iter() {
                if self.pieces(color, piece).contains(sq) {
                    return Some((color, piece));
                }
            }
        }

        None
    }

    /// Returns the color whose turn it is
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Returns the castling rights
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    /// Returns `true` if king-side castling rights are available for `color`
    pub fn can_castle_king_side(&self, color: Color) -> bool {
        self.castling.contains(CastlingRights::king_side(color))
    }

    /// Returns `true` if queen-side castling rights are available for `color`
    pub fn can_castle_queen_side(&self, color: Color) -> bool {
        self.castling.contains(CastlingRights::queen_side(color))
    }

    /// Returns the en-passant target as a bitboard with at most one square
    pub fn en_passant(&self) -> Bitboard {
        self.en_passant
    }

    /// Returns the en-passant square, if any
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant.peek()
    }

    /// Returns the number of plies since the last capture or pawn move
    pub fn half_move_clock(&self) -> usize {
        self.half_moves
    }

    /// Returns the full-move number, starting at 1 and incremented after black moves
    pub fn full_move_number(&self) -> usize {
        self.move_num
    }

    /// Renders a human-readable description of the board for debugging
    ///
    /// The output lists the side to move, each available castling right, the en-passant square
    /// and both counters, followed by the board itself with rank 8 at the top. White pieces are
    /// uppercase, black pieces lowercase and empty squares are shown as `.`.
    pub fn diagram(&self) -> String {
        let mut s = String::new();

        s += match self.turn {
            White => "White to play\n",
            Black => "Black to play\n",
        };
        for &color in &[White, Black] {
            let name = if color == White { "White" } else { "Black" };
            if self.can_castle_king_side(color) {
                s += &format!("{} can castle kingside\n", name);
            }
            if self.can_castle_queen_side(color) {
                s += &format!("{} can castle queenside\n", name);
            }
        }
        s += &match self.en_passant_square() {
            Some(sq) => format!("En passant: {}\n", sq),
            None => "En passant: -\n".to_string(),
        };
        s += &format!("Move number: {}\n", self.move_num);
        s += &format!("Half-move clock: {}\n", self.half_moves);

        for (i, sq) in Square::all().enumerate() {
            if i % File::COUNT == 0 {
                s += &sq.rank().to_string();
            }
            s.push(' ');
            s.push(match self.piece_at(sq) {
                Some((color, piece)) => piece.to_char(color),
                None => '.',
            });
            if i % File::COUNT == File::COUNT - 1 {
                s.push('\n');
            }
        }
        s += "  a b c d e f g h\n";

        s
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BoardState {
    /// Formats the board as a FEN string
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_fen_str().fmt(f)
    }
}

impl FromStr for BoardState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_fen_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_has_32_disjoint_pieces() {
        let board = BoardState::new();
        assert_eq!(board.occupied().len(), 32);
        assert_eq!(board.occupied_by(White).len(), 16);
        assert_eq!(board.occupied_by(Black).len(), 16);

        let mut seen = Bitboard::new();
        for &color in &[White, Black] {
            for &piece in Piece::ALL.iter() {
                assert!(seen.is_disjoint(board.pieces(color, piece)));
                seen |= board.pieces(color, piece);
            }
        }
    }

    #[test]
    fn start_position_matches_its_fen() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert_eq!(BoardState::new(), fen.parse().unwrap());
        assert_eq!(BoardState::new().to_string(), fen);
    }

    #[test]
    fn piece_at_uses_a8_first_indexing() {
        let board = BoardState::new();
        assert_eq!(board.piece_at(Square::A8), Some((Black, Rook)));
        assert_eq!(board.piece_at(Square::E1), Some((White, King)));
        assert_eq!(board.piece_at(Square::D8), Some((Black, Queen)));
        assert_eq!(board.piece_at(Square::E4), None);
        assert_eq!(board.pieces(White, King).bits(), 1 << 60);
    }

    #[test]
    fn load_fen_replaces_everything_or_nothing() {
        let mut board = BoardState::new();
        board.load_fen("4k3/8/8/8/8/8/8/4K2R w K - 3 40").unwrap();
        assert_eq!(board.occupied().len(), 3);
        assert_eq!(board.castling_rights(), CastlingRights::WHITE_KING_SIDE);
        assert_eq!(board.half_move_clock(), 3);
        assert_eq!(board.full_move_number(), 40);

        let before = board;
        assert!(board.load_fen("4k3/8/8/8/8/8/8/4K2R x K - 3 40").is_err());
        assert_eq!(board, before);

        board.reset();
        assert_eq!(board, BoardState::new());
    }

    #[test]
    fn castling_rights_bits() {
        assert_eq!(CastlingRights::WHITE_KING_SIDE.bits(), 1);
        assert_eq!(CastlingRights::WHITE_QUEEN_SIDE.bits(), 2);
        assert_eq!(CastlingRights::BLACK_KING_SIDE.bits(), 4);
        assert_eq!(CastlingRights::BLACK_QUEEN_SIDE.bits(), 8);
        assert_eq!(CastlingRights::from_bits(0xff), CastlingRights::ALL);

        let mut rights = CastlingRights::king_side(Black) | CastlingRights::queen_side(White);
        assert_eq!(rights.to_string(), "Qk");
        rights.remove(CastlingRights::BLACK_KING_SIDE);
        assert_eq!(rights.to_string(), "Q");
        rights.remove(CastlingRights::ALL);
        assert_eq!(rights.to_string(), "-");
    }

    #[test]
    fn diagram_lists_state_and_board() {
        let board: BoardState = "3k3r/pp2rp1p/3p4/2p1P1B1/1b6/3K3Q/PP3P2/n7 w - c6 0 23"
            .parse()
            .unwrap();
        let diagram = board.diagram();
        let lines: Vec<_> = diagram.lines().collect();
        assert_eq!(lines[0], "White to play");
        assert_eq!(lines[1], "En passant: c6");
        assert_eq!(lines[2], "Move number: 23");
        assert_eq!(lines[3], "Half-move clock: 0");
        assert_eq!(lines[4], "8 . . . k . . . r");
        assert_eq!(lines[7], "5 . . p . P . B .");
        assert_eq!(lines[11], "1 n . . . . . . .");
        assert_eq!(lines[12], "  a b c d e f g h");

        assert!(BoardState::new().diagram().contains("Black can castle queenside\n"));
    }
}

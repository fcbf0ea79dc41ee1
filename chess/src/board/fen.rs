//! Reads and writes `BoardState`s in Forsyth-Edwards Notation
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::convert::TryInto;
use super::*;

impl BoardState {
    /// Parse a board from a string containing [Forsyth-Edwards
    /// Notation (FEN)](https://en.wikipedia.org/wiki/Forsyth%E2%80%93Edwards_Notation).
    ///
    /// The half-move clock and full-move number may be left off, in which case they default to
    /// `0` and `1`.
    pub fn from_fen_str(s: &str) -> Result<BoardState> {
        use Error::*;

        let mut board = BoardStateBuilder::new();
        let fields: Vec<_> = s.split_whitespace().collect();

        if fields.len() < 4 || fields.len() > 6 {
            return Err(FieldCount);
        }

        // parse the board
        let ranks: Vec<_> = fields[0].split('/').collect();
        if ranks.len() != Rank::COUNT {
            return Err(RankCount);
        }
        for (row, rank) in ranks.iter().enumerate() {
            let mut f = 0;
            for c in rank.chars() {
                match c {
                    '1' ..= '8' => {
                        f += c.to_digit(10).expect("INFALLIBLE") as usize;
                    }
                    _ => {
                        let (color, piece) = Piece::from_char(c).ok_or(InvalidPiece)?;
                        if f >= File::COUNT {
                            return Err(RankLength);
                        }
                        let sq: Square = (row * File::COUNT + f).try_into().expect("INFALLIBLE");

                        board.piece(color, piece, sq);

                        f += 1;
                    }
                }
                if f > File::COUNT {
                    return Err(RankLength);
                }
            }
            if f != File::COUNT {
                return Err(RankLength);
            }
        }

        // parse the turn
        board.turn(fields[1].parse().map_err(|_| InvalidTurn)?);

        // parse the castling flags
        if fields[2] != "-" {
            for c in fields[2].chars() {
                let (color, king_side) = match c {
                    'K' => (Color::White, true),
                    'Q' => (Color::White, false),
                    'k' => (Color::Black, true),
                    'q' => (Color::Black, false),
                    _ => return Err(InvalidCastlingFlags),
                };
                if king_side {
                    board.can_castle_king_side(color, true);
                } else {
                    board.can_castle_queen_side(color, true);
                }
            }
        }

        // parse en passant square
        if fields[3] != "-" {
            let ep_square = fields[3].parse().map_err(|_| InvalidEnPassantSquare)?;
            board.en_passant_square(Some(ep_square));
        }

        // parse half move clock, if present
        if let Some(plies) = fields.get(4) {
            board.half_move_clock(plies.parse().map_err(|_| InvalidHalfMoveClock)?);
        }

        // parse move number, if present
        if let Some(move_num) = fields.get(5) {
            board.move_number(move_num.parse().map_err(|_| InvalidFullMoveNumber)?);
        }

        board.build()
    }

    /// Converts the board to a FEN string.
    pub fn to_fen_str(&self) -> String {
        // the board
        let mut placement = String::new();
        let mut count = 0;

        for (i, sq) in Square::all().enumerate() {
            match self.piece_at(sq) {
                Some((c, p)) => {
                    if count > 0 {
                        placement += &count.to_string();
                        count = 0;
                    }
                    placement.push(p.to_char(c));
                }
                None => count += 1,
            }

            if i % File::COUNT == File::COUNT - 1 {
                if count > 0 {
                    placement += &count.to_string();
                    count = 0;
                }
                if i < Square::COUNT - 1 {
                    placement.push('/');
                }
            }
        }

        // en passant square
        let ep_square = match self.en_passant_square() {
            Some(sq) => sq.to_string(),
            None => "-".to_string(),
        };

        format!("{} {} {} {} {} {}", placement, self.turn, self.castling, ep_square,
                                     self.half_moves, self.move_num)
    }
}

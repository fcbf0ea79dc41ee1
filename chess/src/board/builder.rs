//! Contains a builder for `BoardState`
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

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A builder for `BoardState`
///
/// ```rust
/// use chess::{BoardStateBuilder, Color, Piece, Square};
///
/// let board = BoardStateBuilder::new()
///     .piece(Color::White, Piece::King, Square::E1)
///     .piece(Color::White, Piece::Rook, Square::H1)
///     .piece(Color::Black, Piece::King, Square::E8)
///     .can_castle_king_side(Color::White, true)
///     .build()?;
/// assert!(board.can_castle_king_side(Color::White));
/// # Ok::<(), chess::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct BoardStateBuilder {
    board: [ Option<(Color, Piece)>; Square::COUNT ],
    turn: Color,
    castling: CastlingRights,
    ep_square: Option<Square>,
    half_moves: usize,
    move_num: usize,
}

impl BoardStateBuilder {
    /// Creates a new, empty `BoardStateBuilder`
    pub fn new() -> Self {
        BoardStateBuilder {
            board: [ None; Square::COUNT ],
            turn: White,
            castling: CastlingRights::NONE,
            ep_square: None,
            half_moves: 0,
            move_num: 1,
        }
    }

    /// Sets the piece at `square`
    pub fn piece(&mut self, color: Color, piece: Piece, square: Square) -> &mut Self {
        self.board[square as usize] = Some((color, piece));
        self
    }

    /// Clears the piece at `square`
    pub fn clear(&mut self, square: Square) -> &mut Self {
        self.board[square as usize] = None;
        self
    }

    /// Sets the turn to `color`
    pub fn turn(&mut self, color: Color) -> &mut Self {
        self.turn = color;
        self
    }

    /// Sets king side castling rights for `color`
    pub fn can_castle_king_side(&mut self, color: Color, available: bool) -> &mut Self {
        self.set_castling(CastlingRights::king_side(color), available)
    }

    /// Sets queen side castling rights for `color`
    pub fn can_castle_queen_side(&mut self, color: Color, available: bool) -> &mut Self {
        self.set_castling(CastlingRights::queen_side(color), available)
    }

    fn set_castling(&mut self, right: CastlingRights, available: bool) -> &mut Self {
        if available {
            self.castling.insert(right);
        } else {
            self.castling.remove(right);
        }
        self
    }

    /// Sets or clears the en-passant square
    pub fn en_passant_square(&mut self, square: Option<Square>) -> &mut Self {
        self.ep_square = square;
        self
    }

    /// Sets the number of plies since the last capture or pawn move
    pub fn half_move_clock(&mut self, plies: usize) -> &mut Self {
        self.half_moves = plies;
        self
    }

    /// Sets the move number
    pub fn move_number(&mut self, move_num: usize) -> &mut Self {
        self.move_num = move_num;
        self
    }

    /// Validates the settings and returns a `BoardState`
    pub fn build(&self) -> Result<BoardState> {
        use Error::*;

        let mut board = BoardState::empty();

        for (i, piece) in self.board.iter().enumerate() {
            let sq: Square = i.try_into().expect("INFALLIBLE");

            if let Some((color, piece)) = piece {
                board.pieces[*color as usize][*piece as usize].insert(sq);
            }
        }

        board.turn = self.turn;
        board.castling = self.castling;
        board.en_passant = self.ep_square.map(Bitboard::from).unwrap_or_default();
        board.half_moves = self.half_moves;
        board.move_num = self.move_num;

        // Step 1: no pawns on ranks 1 and 8
        for &c in &[White, Black] {
            if board.pieces(c, Pawn).intersects(Bitboard::RANK_1 | Bitboard::RANK_8) {
                return Err(InvalidPawnRank);
            }
        }
        // Step 2: if castling rights exist, king and rook must be in the correct squares
        for &c in &[White, Black] {
            let r = if c == White { Rank::R1 } else { Rank::R8 };
            let king_home = board.pieces(c, King).contains(Square::from_coord(File::E, r));

            if board.can_castle_king_side(c)
                && !(king_home && board.pieces(c, Rook).contains(Square::from_coord(File::H, r))) {
                return Err(CastlingRightsMismatch);
            }
            if board.can_castle_queen_side(c)
                && !(king_home && board.pieces(c, Rook).contains(Square::from_coord(File::A, r))) {
                return Err(CastlingRightsMismatch);
            }
        }
        // Step 3: an en-passant square must be empty, on the right rank, and just behind a pawn
        // that has moved two squares
        if let Some(ep_square) = self.ep_square {
            let (rank, forward) = if board.turn == White { (Rank::R6, 1) } else { (Rank::R3, -1) };

            if ep_square.rank() != rank
                || board.occupied().contains(ep_square)
                || !board.pieces(!board.turn, Pawn).shift_y(forward).contains(ep_square) {
                return Err(InvalidEnPassantSquare);
            }
        }
        // Step 4: moves are numbered from 1
        if board.move_num == 0 {
            return Err(InvalidFullMoveNumber);
        }

        Ok(board)
    }
}

impl Default for BoardStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

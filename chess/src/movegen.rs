//! Generates pseudo-legal moves
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
//! Moves are generated a whole piece type at a time: every pawn of a side is pushed at once by
//! shifting the pawn bitboard, and likewise for each knight and king offset. Only the sliding
//! pieces are handled square by square, using the [`AttackTables`](../bitboard/struct.AttackTables.html).
//!
//! The generated moves are pseudo-legal. They may leave the mover's king in check, and castling
//! moves are produced without checking whether the king passes through an attacked square.
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::convert::TryFrom;
use log::trace;
use super::*;
use crate::bitboard::{KING_OFFSETS, KNIGHT_OFFSETS};

use Color::*;
use Piece::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Produces every pseudo-legal move for one side of a `BoardState`
///
/// The tables are only borrowed, so any number of generators, on any number of threads, can share
/// one set of `AttackTables`.
///
/// Moves come out in a fixed order:
///
///  1. pawn pushes, double pushes, captures toward the a-file, captures toward the h-file, push
///     promotions, capture promotions and en-passant captures
///  2. knight moves
///  3. king moves
///  4. bishop, rook and queen moves
///  5. castling moves, king side first
///
/// Promotions are generated to a queen and a knight. Promotions to a bishop or rook are only
/// generated if enabled with [`underpromotions`](#method.underpromotions).
///
/// ```rust
/// use chess::{AttackTables, BoardState, Color, MoveGenerator};
///
/// let tables = AttackTables::new();
/// let board: BoardState = "4k3/1P6/8/8/8/8/8/4K3 w - - 0 1".parse()?;
///
/// let moves = MoveGenerator::new(&tables).generate(Color::White, &board);
/// assert_eq!(moves.iter().filter(|mv| mv.is_promotion()).count(), 2);
///
/// let moves = MoveGenerator::new(&tables).underpromotions(true).generate(Color::White, &board);
/// assert_eq!(moves.iter().filter(|mv| mv.is_promotion()).count(), 4);
/// # Ok::<(), chess::Error>(())
/// ```
#[derive(Debug, Copy, Clone)]
pub struct MoveGenerator<'a> {
    tables: &'a AttackTables,
    underpromotions: bool,
}

impl<'a> MoveGenerator<'a> {
    /// Creates a generator that queries `tables` for sliding attacks
    pub fn new(tables: &'a AttackTables) -> Self {
        MoveGenerator {
            tables,
            underpromotions: false,
        }
    }

    /// Enables or disables promotions to a bishop or rook
    pub fn underpromotions(&mut self, enabled: bool) -> &mut Self {
        self.underpromotions = enabled;
        self
    }

    /// Returns every pseudo-legal move for `side`
    ///
    /// En-passant captures are only generated when `side` is the side to move, since the
    /// en-passant target belongs to that side.
    pub fn generate(&self, side: Color, board: &BoardState) -> MoveList {
        let mut moves = MoveList::new();
        let own = board.occupied_by(side);
        let targets = !own;

        self.pawn_moves(side, board, &mut moves);
        for &(x, y) in KNIGHT_OFFSETS.iter() {
            let dests = board.pieces(side, Knight).shift_xy(x, y) & targets;
            push_shifted(dests, x, y, Special::Normal, &mut moves);
        }
        for &(x, y) in KING_OFFSETS.iter() {
            let dests = board.pieces(side, King).shift_xy(x, y) & targets;
            push_shifted(dests, x, y, Special::Normal, &mut moves);
        }
        self.slider_moves(side, board, targets, &mut moves);
        castling_moves(side, board, &mut moves);

        trace!("generated {} moves for {} in {}", moves.len(), side, board);

        moves
    }

    /// Returns every pseudo-legal move for the side to move
    pub fn generate_for_turn(&self, board: &BoardState) -> MoveList {
        self.generate(board.turn(), board)
    }

    fn pawn_moves(&self, side: Color, board: &BoardState, moves: &mut MoveList) {
        let (forward, start_rank, promotion_rank) = match side {
            White => (1, Bitboard::RANK_2, Bitboard::RANK_8),
            Black => (-1, Bitboard::RANK_7, Bitboard::RANK_1),
        };
        let pawns = board.pieces(side, Pawn);
        let empty = board.empty_squares();
        let enemies = board.occupied_by(!side);

        // pushes
        let single = pawns.shift_y(forward) & empty;
        push_shifted(single & !promotion_rank, 0, forward, Special::Normal, moves);
        let double = ((pawns & start_rank).shift_y(forward) & empty).shift_y(forward) & empty;
        push_shifted(double, 0, 2 * forward, Special::Normal, moves);

        // captures toward the a-file, then toward the h-file
        for &x in &[-1, 1] {
            let captures = pawns.shift_xy(x, forward) & enemies & !promotion_rank;
            push_shifted(captures, x, forward, Special::Normal, moves);
        }

        // promotions
        self.push_promotions(single & promotion_rank, 0, forward, moves);
        for &x in &[-1, 1] {
            let captures = pawns.shift_xy(x, forward) & enemies & promotion_rank;
            self.push_promotions(captures, x, forward, moves);
        }

        // en passant
        if side == board.turn() {
            for &x in &[-1, 1] {
                let captures = pawns.shift_xy(x, forward) & board.en_passant();
                push_shifted(captures, x, forward, Special::EnPassant, moves);
            }
        }
    }

    fn push_promotions(&self, dests: Bitboard, x: i8, y: i8, moves: &mut MoveList) {
        // queen and knight come first in `Promotion::ALL`
        let count = if self.underpromotions { Promotion::ALL.len() } else { 2 };

        for dest in dests {
            let orig = shifted_origin(dest, x, y);
            for &promotion in &Promotion::ALL[..count] {
                moves.push(Move::new(orig, dest, promotion, Special::Promotion));
            }
        }
    }

    fn slider_moves(&self, side: Color, board: &BoardState, targets: Bitboard,
                    moves: &mut MoveList) {
        let occ = board.occupied();

        for &piece in &[Bishop, Rook, Queen] {
            for orig in board.pieces(side, piece) {
                let attacks = match piece {
                    Bishop => self.tables.bishop_attacks(orig, occ),
                    Rook => self.tables.rook_attacks(orig, occ),
                    _ => self.tables.queen_attacks(orig, occ),
                };
                for dest in attacks & targets {
                    moves.push(Move::normal(orig, dest));
                }
            }
        }
    }
}

/// Pushes a move to each of `dests` from the square `x` files and `y` ranks behind it
fn push_shifted(dests: Bitboard, x: i8, y: i8, special: Special, moves: &mut MoveList) {
    for dest in dests {
        moves.push(Move::new(shifted_origin(dest, x, y), dest, Promotion::ToQueen, special));
    }
}

fn shifted_origin(dest: Square, x: i8, y: i8) -> Square {
    let index = dest as i32 - (x as i32 - 8 * y as i32);
    Square::try_from(index as usize).expect("INFALLIBLE")
}

fn castling_moves(side: Color, board: &BoardState, moves: &mut MoveList) {
    use Square::*;

    // the king's origin, then its destination and the squares that must be empty for each side
    let (orig, king_side, queen_side) = match side {
        White => (E1, (G1, &[F1, G1] as &[Square]), (C1, &[B1, C1, D1] as &[Square])),
        Black => (E8, (G8, &[F8, G8] as &[Square]), (C8, &[B8, C8, D8] as &[Square])),
    };
    let empty = board.empty_squares();

    for &(available, (dest, between)) in &[
        (board.can_castle_king_side(side), king_side),
        (board.can_castle_queen_side(side), queen_side),
    ] {
        if available && between.iter().all(|&sq| empty.contains(sq)) {
            moves.push(Move::new(orig, dest, Promotion::ToQueen, Special::Castling));
        }
    }
}

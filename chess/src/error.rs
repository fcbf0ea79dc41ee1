//! Defines the error types needed by the chess crate
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Error type used by methods in the `chess` crate
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// Cannot parse string
    ParseError,
    /// Failed to convert an integer to an another type
    TryFromIntError,
    /// FEN string has too few or too many fields
    FieldCount,
    /// Unrecognized piece letter in the piece placement field
    InvalidPiece,
    /// A rank in the piece placement field doesn't describe exactly eight squares
    RankLength,
    /// The piece placement field doesn't describe exactly eight ranks
    RankCount,
    /// Side to move is neither `w` nor `b`
    InvalidTurn,
    /// Castling field contains something other than `KQkq` or `-`
    InvalidCastlingFlags,
    /// Castling rights are set but the king or rook is not on its starting square
    CastlingRightsMismatch,
    /// En-passant square is malformed or on the wrong rank for the side to move
    InvalidEnPassantSquare,
    /// Half-move clock is not a non-negative integer
    InvalidHalfMoveClock,
    /// Full-move number is not a positive integer
    InvalidFullMoveNumber,
    /// Pawn on first or last rank
    InvalidPawnRank,
    /// No generated move matches the given coordinate notation
    UnknownMove,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Error::*;

        match self {
            ParseError => "cannot parse string",
            TryFromIntError => "integer out of range",
            FieldCount => "FEN string must have between 4 and 6 fields",
            InvalidPiece => "invalid piece letter in FEN string",
            RankLength => "rank in FEN string does not have exactly 8 squares",
            RankCount => "FEN string does not have exactly 8 ranks",
            InvalidTurn => "side to move must be 'w' or 'b'",
            InvalidCastlingFlags => "invalid castling flags",
            CastlingRightsMismatch => "castling flags aren't valid for this position",
            InvalidEnPassantSquare => "invalid en-passant square",
            InvalidHalfMoveClock => "invalid half-move clock",
            InvalidFullMoveNumber => "invalid full-move number",
            InvalidPawnRank => "pawn on first or last rank",
            UnknownMove => "no such move in this position",
        }.fmt(f)
    }
}

impl std::error::Error for Error { }

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Result type used by methods in the `chess` crate
pub type Result<T> = std::result::Result<T, Error>;

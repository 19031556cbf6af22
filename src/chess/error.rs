//! Defines the error types needed by the chess module
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Error type used by methods in the `chess` module
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// FEN board layout has an unrecognized character or a rank of the wrong width
    ParseFen,
    /// Cannot parse an algebraic square coordinate
    ParseSquare,
    /// Cannot parse a piece letter
    ParsePiece,
    /// Cannot parse a coordinate move string
    ParseMove,
    /// Promotion to a piece type a pawn cannot become
    InvalidPromotion,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Error::*;

        match self {
            ParseFen => "cannot parse FEN board layout",
            ParseSquare => "cannot parse square coordinate",
            ParsePiece => "cannot parse piece letter",
            ParseMove => "cannot parse move string",
            InvalidPromotion => "invalid promotion piece type",
        }.fmt(f)
    }
}

impl std::error::Error for Error { }

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Result type used by methods in the `chess` module
pub type Result<T> = std::result::Result<T, Error>;

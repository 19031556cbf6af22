//! The game session: whose turn it is, and which moves actually get made
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::collections::HashSet;
use std::str::FromStr;
use lazy_static::lazy_static;
use regex::Regex;
use log::{debug, info};
use super::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// One game in progress: a board plus the side to move.
///
/// This is the layer the input handler talks to. It enforces exactly one rule beyond the
/// pieces' own movement: a piece may only be moved on its color's turn.
///
/// # Example
/// ```
/// use woodpusher::chess::{Color, Game};
///
/// let mut game = Game::new();
/// assert!(game.make_move("e2".parse().unwrap(), "e4".parse().unwrap()));
/// assert_eq!(game.turn(), Color::Black);
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    turn: Color,
}

impl Game {
    /// Returns a game at the standard starting position, white to move
    pub fn new() -> Game {
        Game { board: Board::new(), turn: Color::White }
    }

    /// Returns a game starting from the given FEN position, white to move.
    ///
    /// # Errors
    ///
    /// Fails with `Error::ParseFen` if the placement field is malformed.
    pub fn from_fen(fen: &str) -> Result<Game> {
        Ok(Game { board: Board::from_fen(fen)?, turn: Color::White })
    }

    /// Returns the board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Returns the destinations available from `square`, or the empty set if the square does
    /// not hold a piece of the side to move
    pub fn moves_from(&self, square: Square) -> HashSet<Square> {
        match self.board.occupant(square) {
            Some(piece) if piece.color == self.turn => piece.moves(&self.board),
            _ => HashSet::new(),
        }
    }

    /// Executes the move from `origin` to `dest` if it is available, and switches the turn.
    ///
    /// Returns `false` — leaving the board untouched — if `origin` does not hold a piece of
    /// the side to move, or if `dest` is not in that piece's move set.
    pub fn make_move(&mut self, origin: Square, dest: Square) -> bool {
        let piece = match self.board.occupant(origin) {
            Some(piece) if piece.color == self.turn => piece,
            _ => {
                debug!("{}: no {} piece to move", origin, self.turn);
                return false;
            }
        };
        if !piece.moves(&self.board).contains(&dest) {
            debug!("{}: {} to {} is not available", piece.code(), origin, dest);
            return false;
        }

        self.board.move_piece(piece, dest);
        info!("{}: {} to {}", piece.code(), origin, dest);
        self.turn = !self.turn;
        true
    }

    /// Replaces `pawn` with a new piece of `kind`, delegating to [`Board::promote`].
    ///
    /// # Errors
    ///
    /// Fails with `Error::InvalidPromotion` if `kind` is `King` or `Pawn`.
    pub fn promote(&mut self, pawn: Piece, kind: PieceKind) -> Result<Piece> {
        let promoted = self.board.promote(pawn, kind)?;
        info!("{}: promoted to {} on {}", pawn.code(), promoted.code(), promoted.pos);
        Ok(promoted)
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
lazy_static! {
    static ref MOVE_RE: Regex =
        Regex::new("^([a-hA-H][1-8])([a-hA-H][1-8])([nbrqNBRQ])?$").expect("INFALLIBLE");
}

/// A move request in coordinate form: origin square, destination square, and an optional
/// promotion piece, as parsed from text like `e2e4` or `e7e8q`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PlayerMove {
    /// The square the piece moves from
    pub origin: Square,
    /// The square the piece moves to
    pub dest: Square,
    /// The piece a pawn reaching the last rank becomes, if requested
    pub promotion: Option<PieceKind>,
}

impl FromStr for PlayerMove {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let caps = MOVE_RE.captures(s).ok_or(Error::ParseMove)?;
        let origin = caps.get(1).expect("INFALLIBLE").as_str().parse()?;
        let dest = caps.get(2).expect("INFALLIBLE").as_str().parse()?;
        let promotion = match caps.get(3) {
            Some(m) => Some(m.as_str().parse()?),
            None => None,
        };
        Ok(PlayerMove { origin, dest, promotion })
    }
}

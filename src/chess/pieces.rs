//! Pieces and their pseudo-legal move generation
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::collections::HashSet;
use std::fmt;
use super::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Read access to the board, as needed by move generation.
///
/// Implementations must answer `None` for any square not present in the underlying store.
/// Generators probe off-board squares freely and treat "not found" identically to "empty".
pub trait BoardState {
    /// Returns the piece at `square`, if any
    fn occupant(&self, square: Square) -> Option<Piece>;
}

const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (0, 1), (0, -1), (-1, 0)];
const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1), (-2, 1), (2, -1), (2, 1), (-1, -2), (-1, 2), (1, -2), (1, 2),
];

// The zero offset is deliberately absent.
const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1),
];

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A piece on the board: its kind, its color, and the square it stands on.
///
/// Pieces are plain values. The board stores them by value and moving one rewrites the map
/// entry, so there is no shared mutable aliasing between a piece and the board that holds it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Piece {
    /// The kind of the piece
    pub kind: PieceKind,
    /// The side the piece belongs to
    pub color: Color,
    /// The square the piece currently stands on
    pub pos: Square,
}

impl Piece {
    /// Returns a new piece of the given kind and color standing on `pos`
    pub fn new(kind: PieceKind, color: Color, pos: Square) -> Piece {
        Piece { kind, color, pos }
    }

    /// Returns the squares this piece may move to on `board`.
    ///
    /// Moves are pseudo-legal: capture, blocking and ownership rules are respected, but no
    /// check is made that the mover's own king stays safe.
    ///
    /// # Example
    /// ```
    /// use woodpusher::chess::{Board, Color, Piece, PieceKind, Square};
    ///
    /// let mut board = Board::empty();
    /// let rook = Piece::new(PieceKind::Rook, Color::White, Square::new(3, 3));
    /// board.place(rook);
    /// assert_eq!(rook.moves(&board).len(), 14);
    /// ```
    pub fn moves(&self, board: &dyn BoardState) -> HashSet<Square> {
        self.raw_moves(board)
            .into_iter()
            .filter(|&sq| {
                sq.valid() && board.occupant(sq).map_or(true, |dest| dest.color != self.color)
            })
            .collect()
    }

    /// Raw candidate squares for this piece. May contain off-board squares and squares held
    /// by pieces of either color; `moves` applies the validity and ownership filter.
    fn raw_moves(&self, board: &dyn BoardState) -> HashSet<Square> {
        match self.kind {
            PieceKind::Pawn => self.pawn_raw_moves(board),
            PieceKind::Knight => KNIGHT_OFFSETS.iter().map(|&d| self.pos + d).collect(),
            PieceKind::Bishop => sliding_moves(board, self.pos, &DIAGONALS),
            PieceKind::Rook => sliding_moves(board, self.pos, &ORTHOGONALS),
            PieceKind::Queen => {
                // Explicit union of the rook and bishop slides, all 8 directions.
                let mut moves = sliding_moves(board, self.pos, &ORTHOGONALS);
                moves.extend(sliding_moves(board, self.pos, &DIAGONALS));
                moves
            }
            PieceKind::King => KING_OFFSETS.iter().map(|&d| self.pos + d).collect(),
        }
    }

    fn pawn_raw_moves(&self, board: &dyn BoardState) -> HashSet<Square> {
        let forward = match self.color {
            Color::White => 1,
            Color::Black => -1,
        };
        let home_rank = match self.color {
            Color::White => 1,
            Color::Black => 6,
        };

        let mut moves = HashSet::new();
        let ahead = self.pos + (0, forward);
        if board.occupant(ahead).is_none() {
            moves.insert(ahead);
            if self.pos.rank == home_rank {
                let two_ahead = ahead + (0, forward);
                if board.occupant(two_ahead).is_none() {
                    moves.insert(two_ahead);
                }
            }
        }
        // Diagonal candidates whenever occupied; own-color captures fall to the filter in
        // `moves`.
        for dx in &[-1, 1] {
            let diagonal = ahead + (*dx, 0);
            if board.occupant(diagonal).is_some() {
                moves.insert(diagonal);
            }
        }
        moves
    }

    /// Returns the Unicode glyph for this piece
    pub fn symbol(&self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::King) => '♔',
            (Color::Black, PieceKind::Pawn) => '♟',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::King) => '♚',
        }
    }

    /// Returns the sprite lookup key: color prefix plus kind letter, `"wp"` through `"bk"`
    pub fn code(&self) -> String {
        format!("{}{}", self.color, self.kind.letter())
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.symbol().fmt(f)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Walks outward from `origin` along each direction, collecting every empty square visited.
/// An occupied square is collected as well (capture or block) and halts that direction, as
/// does the edge of the board.
fn sliding_moves(
    board: &dyn BoardState,
    origin: Square,
    directions: &[(i8, i8)],
) -> HashSet<Square> {
    let mut moves = HashSet::new();
    for &direction in directions {
        let mut square = origin + direction;
        while square.valid() {
            moves.insert(square);
            if board.occupant(square).is_some() {
                break;
            }
            square = square + direction;
        }
    }
    moves
}

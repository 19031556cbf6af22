//! The board: storage, FEN parsing, and the mutation protocol
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use super::*;

/// The standard starting position. Only the placement field is consumed here; the remaining
/// fields are accepted and ignored.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The authoritative mapping from squares to occupants.
///
/// Every square the layout defines has an entry, occupied or empty; a square with no entry
/// reads as empty, so probing anywhere — including off the board — is safe and never an
/// error. A stored piece's `pos` always equals the key it is found under.
///
/// # Example
/// ```
/// use woodpusher::chess::Board;
///
/// let board = Board::new();
/// assert_eq!(board.pieces().count(), 32);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    state: BTreeMap<Square, Option<Piece>>,
}

impl Board {
    /// Returns a board holding the standard starting position
    pub fn new() -> Board {
        STARTING_FEN.parse().expect("INFALLIBLE")
    }

    /// Returns the fixture layout used when no FEN is supplied: files `C` through `F`, all
    /// eight ranks, every square empty
    pub fn empty() -> Board {
        let mut state = BTreeMap::new();
        for file in 2..6 {
            for rank in 0..8 {
                state.insert(Square::new(file, rank), None);
            }
        }
        Board { state }
    }

    /// Parses the placement field of a FEN string into a board.
    ///
    /// # Errors
    ///
    /// Fails with `Error::ParseFen` if the placement field holds an unrecognized character,
    /// does not have exactly eight ranks, or has a rank that does not sum to exactly eight
    /// files. Nothing is ever silently substituted.
    pub fn from_fen(fen: &str) -> Result<Board> {
        let placement = fen.split_whitespace().next().ok_or(Error::ParseFen)?;
        let descriptors: Vec<&str> = placement.split('/').collect();
        if descriptors.len() != 8 {
            return Err(Error::ParseFen);
        }

        let mut state = BTreeMap::new();
        // Descriptors run top to bottom: the first describes rank 8.
        for (i, descriptor) in descriptors.iter().enumerate() {
            let rank = 7 - i as i8;
            let mut file = 0;
            for c in descriptor.chars() {
                match c {
                    '1'..='8' => {
                        let skip = c.to_digit(10).expect("INFALLIBLE") as i8;
                        for _ in 0..skip {
                            if file >= 8 {
                                return Err(Error::ParseFen);
                            }
                            state.insert(Square::new(file, rank), None);
                            file += 1;
                        }
                    }
                    _ => {
                        if file >= 8 {
                            return Err(Error::ParseFen);
                        }
                        let kind: PieceKind =
                            c.to_string().parse().map_err(|_| Error::ParseFen)?;
                        let color = if c.is_uppercase() { Color::White } else { Color::Black };
                        let square = Square::new(file, rank);
                        state.insert(square, Some(Piece::new(kind, color, square)));
                        file += 1;
                    }
                }
            }
            if file != 8 {
                return Err(Error::ParseFen);
            }
        }
        Ok(Board { state })
    }

    /// Returns the piece at `square`, if any. Squares with no entry read as empty.
    pub fn occupant(&self, square: Square) -> Option<Piece> {
        self.state.get(&square).copied().flatten()
    }

    /// Returns the piece at the algebraic coordinate `coord`, if any.
    ///
    /// # Errors
    ///
    /// Fails with `Error::ParseSquare` if `coord` is not a coordinate like `"e4"`.
    pub fn occupant_at(&self, coord: &str) -> Result<Option<Piece>> {
        Ok(self.occupant(coord.parse()?))
    }

    /// Iterates over the pieces on the board, in rank-major storage order
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.state.values().filter_map(|&occupant| occupant)
    }

    /// Inserts `piece` at its own square, overwriting any prior occupant. The caller is
    /// responsible for not clobbering a piece it meant to keep.
    pub fn place(&mut self, piece: Piece) {
        self.state.insert(piece.pos, Some(piece));
    }

    /// Moves `piece` to `dest`: writes it (with `pos` updated) at `dest` and clears its
    /// origin square.
    ///
    /// Legality is NOT re-checked here. The caller must have validated `dest` against
    /// [`Piece::moves`] first; in particular `dest` is never the origin square. Misuse
    /// produces an inconsistent board, by contract.
    pub fn move_piece(&mut self, piece: Piece, dest: Square) {
        self.state.insert(dest, Some(Piece { pos: dest, ..piece }));
        self.state.insert(piece.pos, None);
    }

    /// Replaces `pawn` with a new piece of `kind`, same color and square, and returns it.
    ///
    /// # Errors
    ///
    /// Fails with `Error::InvalidPromotion` if `kind` is `King` or `Pawn`.
    pub fn promote(&mut self, pawn: Piece, kind: PieceKind) -> Result<Piece> {
        match kind {
            PieceKind::King | PieceKind::Pawn => Err(Error::InvalidPromotion),
            _ => {
                let promoted = Piece::new(kind, pawn.color, pawn.pos);
                self.state.insert(pawn.pos, Some(promoted));
                Ok(promoted)
            }
        }
    }
}

impl BoardState for Board {
    fn occupant(&self, square: Square) -> Option<Piece> {
        Board::occupant(self, square)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl FromStr for Board {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Board::from_fen(s)
    }
}

impl fmt::Display for Board {
    /// Renders the board textually, rank 8 at the top, `·` for empty squares
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                if file > 0 {
                    write!(f, " ")?;
                }
                match self.occupant(Square::new(file, rank)) {
                    Some(piece) => write!(f, "{}", piece)?,
                    None => write!(f, "·")?,
                }
            }
            if rank > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(text: &str) -> Square {
        text.parse().unwrap()
    }

    #[test]
    fn starting_position_has_thirty_two_pieces() {
        let board = Board::new();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.pieces().filter(|p| p.color == Color::White).count(), 16);
        assert_eq!(board.pieces().filter(|p| p.color == Color::Black).count(), 16);
    }

    #[test]
    fn back_ranks_match_the_starting_fen() {
        use PieceKind::*;

        let board = Board::new();
        let back_rank = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        for (file, &kind) in back_rank.iter().enumerate() {
            let white = board.occupant(Square::new(file as i8, 0)).unwrap();
            assert_eq!((white.kind, white.color), (kind, Color::White));
            let black = board.occupant(Square::new(file as i8, 7)).unwrap();
            assert_eq!((black.kind, black.color), (kind, Color::Black));
        }
        for file in 0..8 {
            assert_eq!(board.occupant(Square::new(file, 1)).unwrap().kind, Pawn);
            assert_eq!(board.occupant(Square::new(file, 6)).unwrap().kind, Pawn);
        }
    }

    #[test]
    fn stored_positions_match_their_keys() {
        let board = Board::new();
        for piece in board.pieces() {
            assert_eq!(board.occupant(piece.pos), Some(piece));
        }
    }

    #[test]
    fn fen_placement_field_alone_is_accepted() {
        let board = Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR").unwrap();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn malformed_fen_is_rejected() {
        // unrecognized placement character
        assert!(Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX").is_err());
        // rank too narrow
        assert!(Board::from_fen("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR").is_err());
        // rank too wide
        assert!(Board::from_fen("rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR").is_err());
        // digit overruns the rank
        assert!(Board::from_fen("rnbqkbnr/pppppppp/44p/8/8/8/PPPPPPPP/RNBQKBNR").is_err());
        // wrong number of ranks
        assert!(Board::from_fen("rnbqkbnr/pppppppp/8/8/8/PPPPPPPP/RNBQKBNR").is_err());
        assert!(Board::from_fen("").is_err());
    }

    #[test]
    fn occupant_lookup_is_total() {
        let board = Board::new();
        assert!(board.occupant(Square::new(4, 4)).is_none());
        assert!(board.occupant(Square::new(-1, 0)).is_none());
        assert!(board.occupant(Square::new(3, 9)).is_none());
    }

    #[test]
    fn occupant_at_parses_algebraic_coordinates() {
        let board = Board::new();
        let pawn = board.occupant_at("e2").unwrap().unwrap();
        assert_eq!(pawn.kind, PieceKind::Pawn);
        assert_eq!(pawn.color, Color::White);
        assert!(board.occupant_at("e4").unwrap().is_none());
        assert!(board.occupant_at("z9").is_err());
    }

    #[test]
    fn empty_layout_has_no_pieces() {
        let board = Board::empty();
        assert_eq!(board.pieces().count(), 0);
        assert!(board.occupant(sq("d4")).is_none());
        assert!(board.occupant(sq("a1")).is_none());
    }

    #[test]
    fn place_overwrites_the_prior_occupant() {
        let mut board = Board::empty();
        board.place(Piece::new(PieceKind::Rook, Color::White, sq("d4")));
        board.place(Piece::new(PieceKind::Queen, Color::Black, sq("d4")));
        let piece = board.occupant(sq("d4")).unwrap();
        assert_eq!((piece.kind, piece.color), (PieceKind::Queen, Color::Black));
    }

    #[test]
    fn move_clears_the_origin_and_updates_pos() {
        let mut board = Board::new();
        let pawn = board.occupant_at("e2").unwrap().unwrap();
        board.move_piece(pawn, sq("e4"));
        assert!(board.occupant(sq("e2")).is_none());
        let moved = board.occupant(sq("e4")).unwrap();
        assert_eq!(moved.pos, sq("e4"));
        assert_eq!(moved.kind, PieceKind::Pawn);
        assert_eq!(board.pieces().count(), 32);
    }

    #[test]
    fn promote_replaces_the_pawn_in_place() {
        let mut board = Board::empty();
        let pawn = Piece::new(PieceKind::Pawn, Color::White, sq("d8"));
        board.place(pawn);
        let queen = board.promote(pawn, PieceKind::Queen).unwrap();
        assert_eq!(queen.code(), "wq");
        assert_eq!(queen.pos, sq("d8"));
        assert_eq!(board.occupant(sq("d8")), Some(queen));
        assert_eq!(board.pieces().count(), 1);
    }

    #[test]
    fn promote_rejects_king_and_pawn() {
        let mut board = Board::empty();
        let pawn = Piece::new(PieceKind::Pawn, Color::Black, sq("c1"));
        board.place(pawn);
        assert_eq!(board.promote(pawn, PieceKind::King), Err(Error::InvalidPromotion));
        assert_eq!(board.promote(pawn, PieceKind::Pawn), Err(Error::InvalidPromotion));
        // the failed promotion left the pawn alone
        assert_eq!(board.occupant(sq("c1")), Some(pawn));
    }

    #[test]
    fn pieces_iterate_in_rank_major_order() {
        let board = Board::new();
        let first = board.pieces().next().unwrap();
        assert_eq!((first.kind, first.pos), (PieceKind::Rook, sq("a1")));
        let last = board.pieces().last().unwrap();
        assert_eq!((last.kind, last.pos), (PieceKind::Rook, sq("h8")));
    }

    #[test]
    fn display_renders_rank_eight_first() {
        let board = Board::new();
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜");
        assert_eq!(lines[4], "· · · · · · · ·");
        assert_eq!(lines[6], "♙ ♙ ♙ ♙ ♙ ♙ ♙ ♙");
        assert_eq!(lines[7], "♖ ♘ ♗ ♕ ♔ ♗ ♘ ♖");
    }
}

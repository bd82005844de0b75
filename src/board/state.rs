//! Board state.
//!
//! Pieces live in an arena addressed by [`PieceId`]. The 15x15 grid and the
//! two per-player rosters store ids only, so the same piece is reachable
//! from both without shared ownership. Every mutation goes through
//! [`Board::place`], [`Board::relocate`] or [`Board::remove`], which update
//! the grid, the roster and the piece's recorded position together.

use super::piece::{Owner, Piece, PieceKind, ALL_PLAYERS};
use super::position::{Position, BOARD_SIZE};
use super::terrain::{formation, mountain_positions};

const GRID: usize = BOARD_SIZE as usize;

/// Stable handle to a piece in the board's arena. Ids are never reused
/// within a board, so a removed piece's id stays dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PieceId(u16);

impl PieceId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Complete board state: terrain, both sides' units and their flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Arena slots; `None` once a piece has been destroyed.
    pieces: Vec<Option<Piece>>,
    /// Occupant of each cell, indexed `[row - 1][col - 1]`.
    grid: [[Option<PieceId>; GRID]; GRID],
    /// Live owned pieces per player, in placement order. Includes the flag.
    rosters: [Vec<PieceId>; 2],
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

impl Board {
    /// Creates a board with no terrain and no pieces.
    pub fn empty() -> Self {
        Board {
            pieces: Vec::new(),
            grid: [[None; GRID]; GRID],
            rosters: [Vec::new(), Vec::new()],
        }
    }

    /// Creates the standard starting position: the fixed mountain map,
    /// both formations and the two corner flags.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for pos in mountain_positions() {
            board.place(PieceKind::Mountain, Owner::Neutral, pos);
        }
        let units = formation();
        for &(pos, kind) in &units {
            board.place(kind, Owner::PlayerZero, pos);
        }
        for &(pos, kind) in &units {
            board.place(kind, Owner::PlayerOne, pos.mirrored());
        }
        for owner in ALL_PLAYERS {
            if let Some(flag) = owner.flag_position() {
                board.place(PieceKind::Flag, owner, flag);
            }
        }
        debug_assert!(board.is_consistent());
        board
    }

    /// Places a new piece. Returns `None` if the cell is out of bounds or
    /// occupied, or if the owner does not fit the kind (mountains are
    /// neutral, everything else belongs to a player). A flag may only go
    /// on its owner's corner, once.
    pub fn place(&mut self, kind: PieceKind, owner: Owner, pos: Position) -> Option<PieceId> {
        let (r, c) = pos.index()?;
        if self.grid[r][c].is_some() {
            return None;
        }
        if (kind == PieceKind::Mountain) == owner.is_player() {
            return None;
        }
        if kind == PieceKind::Flag
            && (owner.flag_position() != Some(pos) || self.flag(owner).is_some())
        {
            return None;
        }
        let id = PieceId(u16::try_from(self.pieces.len()).ok()?);
        self.pieces.push(Some(Piece::new(kind, owner, pos)));
        self.grid[r][c] = Some(id);
        if let Some(i) = owner.roster_index() {
            self.rosters[i].push(id);
        }
        Some(id)
    }

    /// Returns the live piece with the given id.
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.index()).and_then(|slot| slot.as_ref())
    }

    pub fn is_alive(&self, id: PieceId) -> bool {
        self.piece(id).is_some()
    }

    /// Returns the id of the piece occupying `pos`, if any.
    pub fn id_at(&self, pos: Position) -> Option<PieceId> {
        let (r, c) = pos.index()?;
        self.grid[r][c]
    }

    /// Returns the piece occupying `pos`, if any.
    pub fn piece_at(&self, pos: Position) -> Option<&Piece> {
        self.id_at(pos).and_then(|id| self.piece(id))
    }

    pub fn kind_at(&self, pos: Position) -> Option<PieceKind> {
        self.piece_at(pos).map(Piece::kind)
    }

    pub fn owner_at(&self, pos: Position) -> Option<Owner> {
        self.piece_at(pos).map(Piece::owner)
    }

    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.id_at(pos).is_none()
    }

    /// Ids of the player's live pieces in roster order. Empty for neutral.
    pub fn roster_ids(&self, owner: Owner) -> &[PieceId] {
        match owner.roster_index() {
            Some(i) => &self.rosters[i],
            None => &[],
        }
    }

    /// The player's live pieces, flag included, in roster order.
    pub fn roster(&self, owner: Owner) -> impl Iterator<Item = &Piece> + '_ {
        self.roster_ids(owner).iter().filter_map(move |&id| self.piece(id))
    }

    /// The player's movable units (the roster without the flag).
    pub fn units(&self, owner: Owner) -> impl Iterator<Item = &Piece> + '_ {
        self.roster(owner).filter(|p| p.kind().is_unit())
    }

    /// Ids of the player's movable units, in roster order.
    pub fn unit_ids(&self, owner: Owner) -> impl Iterator<Item = PieceId> + '_ {
        self.roster_ids(owner)
            .iter()
            .copied()
            .filter(move |&id| self.piece(id).is_some_and(|p| p.kind().is_unit()))
    }

    pub fn flag(&self, owner: Owner) -> Option<&Piece> {
        self.roster(owner).find(|p| p.kind() == PieceKind::Flag)
    }

    pub fn mountains(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces().filter(|p| p.kind() == PieceKind::Mountain)
    }

    /// Every live piece, in arena order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.iter().filter_map(|slot| slot.as_ref())
    }

    /// Moves a live piece to an empty in-bounds cell. Returns false and
    /// leaves the board untouched otherwise.
    pub(crate) fn relocate(&mut self, id: PieceId, to: Position) -> bool {
        let Some(from) = self.piece(id).map(Piece::position) else {
            return false;
        };
        let (Some((fr, fc)), Some((tr, tc))) = (from.index(), to.index()) else {
            return false;
        };
        if self.grid[tr][tc].is_some() {
            return false;
        }
        self.grid[fr][fc] = None;
        self.grid[tr][tc] = Some(id);
        if let Some(Some(piece)) = self.pieces.get_mut(id.index()) {
            piece.set_position(to);
        }
        true
    }

    /// Destroys a piece: clears its cell, drops it from its owner's roster
    /// and frees its arena slot. Returns the removed piece.
    pub(crate) fn remove(&mut self, id: PieceId) -> Option<Piece> {
        let piece = self.pieces.get_mut(id.index())?.take()?;
        if let Some((r, c)) = piece.position().index() {
            if self.grid[r][c] == Some(id) {
                self.grid[r][c] = None;
            }
        }
        if let Some(i) = piece.owner().roster_index() {
            self.rosters[i].retain(|&other| other != id);
        }
        Some(piece)
    }

    /// Checks the dual-bookkeeping invariant: every grid entry names a live
    /// piece recorded at that cell, every live piece is on the grid at its
    /// recorded position, and the rosters hold exactly the live pieces of
    /// each player.
    pub fn is_consistent(&self) -> bool {
        for (r, row) in self.grid.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if let Some(id) = cell {
                    let pos = Position::new(r as i32 + 1, c as i32 + 1);
                    match self.piece(*id) {
                        Some(p) if p.position() == pos => {}
                        _ => return false,
                    }
                }
            }
        }
        for (i, slot) in self.pieces.iter().enumerate() {
            let Some(piece) = slot else { continue };
            let id = PieceId(i as u16);
            if self.id_at(piece.position()) != Some(id) {
                return false;
            }
            let listed = self.roster_ids(piece.owner()).contains(&id);
            if listed != piece.owner().is_player() {
                return false;
            }
        }
        ALL_PLAYERS.iter().all(|&owner| {
            self.roster_ids(owner)
                .iter()
                .all(|&id| self.piece(id).is_some_and(|p| p.owner() == owner))
        })
    }
}

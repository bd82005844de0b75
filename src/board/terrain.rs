//! Fixed terrain and starting formation.
//!
//! The mountain map, the unit formation and the flag corners are load-time
//! constants; every game starts from the same position.

use super::piece::PieceKind;
use super::position::Position;

/// Mountain layout, indexed `[row - 1][col - 1]`. 1 marks a mountain.
#[rustfmt::skip]
pub const MOUNTAIN_MAP: [[u8; 15]; 15] = [
    [0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
    [0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
    [0,0,0,0,0,0,0,0,0,0,1,0,1,0,0],
    [0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
    [0,0,0,0,0,0,0,0,0,1,0,0,0,1,0],
    [0,0,0,0,0,0,0,0,0,0,1,1,1,0,0],
    [0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
    [0,0,0,0,0,0,1,1,1,0,0,0,0,0,0],
    [0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
    [0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
    [0,0,1,0,1,0,1,0,0,0,0,0,0,0,0],
    [0,0,1,0,1,0,1,0,0,0,0,0,0,0,0],
    [0,0,1,0,1,1,1,0,0,0,0,0,0,0,0],
    [0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
    [0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
];

/// Side length of the square corner region holding a player's formation.
pub const FORMATION_SIZE: i32 = 6;

/// Returns every mountain position in row-major order.
pub fn mountain_positions() -> Vec<Position> {
    let mut out = Vec::new();
    for (r, row) in MOUNTAIN_MAP.iter().enumerate() {
        for (c, &cell) in row.iter().enumerate() {
            if cell != 0 {
                out.push(Position::new(r as i32 + 1, c as i32 + 1));
            }
        }
    }
    out
}

/// Unit kind placed on a formation row: Scissors, Rock, Paper for
/// `row mod 3` of 0, 1, 2.
pub const fn formation_kind(row: i32) -> PieceKind {
    match row % 3 {
        0 => PieceKind::Scissors,
        1 => PieceKind::Rock,
        _ => PieceKind::Paper,
    }
}

/// Player zero's starting units in placement order.
///
/// Rows 1..=6, columns 2..=6 (column 1 is left to the flag's file).
/// Player one's formation is this one mirrored through the board centre,
/// keeping the kind of the unmirrored row.
pub fn formation() -> Vec<(Position, PieceKind)> {
    let mut out = Vec::new();
    for row in 1..=FORMATION_SIZE {
        for col in 2..=FORMATION_SIZE {
            out.push((Position::new(row, col), formation_kind(row)));
        }
    }
    out
}

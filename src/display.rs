//! Text rendering of the board and the advantage bar.

use std::fmt;

use crate::board::{all_positions, Board, Owner, BOARD_SIZE};

/// Threat distance reported when a flag has no opposing piece on the board.
pub const NO_THREAT: i32 = 30;

/// Default width of the advantage bar, in characters.
pub const BAR_WIDTH: usize = 20;

impl fmt::Display for Board {
    /// One line per row, symbols separated by spaces, `.` for empty cells.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pos in all_positions() {
            let symbol = self.piece_at(pos).map_or('.', |p| p.symbol());
            if pos.col > 1 {
                f.write_str(" ")?;
            }
            write!(f, "{symbol}")?;
            if pos.col == BOARD_SIZE {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// How close each side's home corner is to being reached.
///
/// `zero_threat` is the Manhattan distance from player zero's flag corner
/// to the nearest player-one piece, and `one_threat` the reverse. Larger is
/// safer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advantage {
    pub zero_threat: i32,
    pub one_threat: i32,
}

impl Advantage {
    /// Number of `>` cells in a bar of `width`: player zero's share of the
    /// combined distance, rounded down.
    pub fn zero_share(&self, width: usize) -> usize {
        let sum = self.zero_threat + self.one_threat;
        if sum <= 0 {
            return width / 2;
        }
        (self.zero_threat as usize * width) / sum as usize
    }

    /// Renders the bar, e.g. `>>>>>>>>>><<<<<<<<<<`.
    pub fn render_bar(&self, width: usize) -> String {
        let share = self.zero_share(width).min(width);
        let mut bar = ">".repeat(share);
        bar.push_str(&"<".repeat(width - share));
        bar
    }
}

impl fmt::Display for Advantage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player zero {} Player one", self.render_bar(BAR_WIDTH))
    }
}

/// Measures both sides' exposure on `board`.
pub fn advantage(board: &Board) -> Advantage {
    Advantage {
        zero_threat: threat(board, Owner::PlayerZero),
        one_threat: threat(board, Owner::PlayerOne),
    }
}

fn threat(board: &Board, defender: Owner) -> i32 {
    let Some(corner) = defender.flag_position() else {
        return NO_THREAT;
    };
    board
        .roster(defender.opponent())
        .map(|p| p.position().manhattan(corner))
        .fold(NO_THREAT, i32::min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{PieceKind, Position};

    #[test]
    fn renders_fifteen_rows() {
        let text = Board::standard().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 15);
        assert!(lines.iter().all(|l| l.split(' ').count() == 15));
        assert!(lines[0].starts_with("f "));
        assert!(lines[14].ends_with(" F"));
    }

    #[test]
    fn empty_cells_are_dots() {
        let mut board = Board::empty();
        board.place(PieceKind::Rock, Owner::PlayerZero, Position::new(1, 2));
        let text = board.to_string();
        assert!(text.lines().next().unwrap().starts_with(". r ."));
        assert_eq!(text.matches('.').count(), 224);
    }

    #[test]
    fn standard_board_is_balanced() {
        let adv = advantage(&Board::standard());
        assert_eq!(adv.zero_threat, adv.one_threat);
        assert_eq!(adv.render_bar(BAR_WIDTH), ">>>>>>>>>><<<<<<<<<<");
    }

    #[test]
    fn no_opponents_reports_max_distance() {
        let mut board = Board::empty();
        board.place(PieceKind::Rock, Owner::PlayerZero, Position::new(8, 8));
        let adv = advantage(&board);
        assert_eq!(adv.zero_threat, NO_THREAT);
        assert_eq!(adv.one_threat, 14);
    }

    #[test]
    fn bar_share_rounds_down() {
        let adv = Advantage { zero_threat: 1, one_threat: 2 };
        assert_eq!(adv.zero_share(20), 6);
        assert_eq!(adv.render_bar(20), ">>>>>><<<<<<<<<<<<<<");
        let adv = Advantage { zero_threat: 0, one_threat: 0 };
        assert_eq!(adv.render_bar(4), ">><<");
    }
}

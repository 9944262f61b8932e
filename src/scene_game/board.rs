//! Board types and win detection over a 3×3 grid.

/// A player taking turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    /// Moves first.
    One,
    Two,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Checked in this order whenever a line could belong to either.
    pub const ALL: [Player; 2] = [Player::One, Player::Two];
}

/// Who holds a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellOwner {
    #[default]
    Unclaimed,
    Claimed(Player),
}

/// State of the game after the latest claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameOutcome {
    #[default]
    InProgress,
    Win(Player),
    Draw,
}

impl GameOutcome {
    pub fn is_over(self) -> bool {
        self != GameOutcome::InProgress
    }
}

pub const SIZE: usize = 3;
pub const CELL_COUNT: u32 = (SIZE * SIZE) as u32;

pub type Row = [CellOwner; SIZE];
pub type Grid = [Row; SIZE];

/// True iff all three cells of `row` belong to `player`.
pub fn row_has_winner(row: &Row, player: Player) -> bool {
    row.iter().all(|&cell| cell == CellOwner::Claimed(player))
}

/// First full row, scanning rows top to bottom and, within a row,
/// player one before player two.
pub fn check_rows(rows: &[Row]) -> Option<Player> {
    rows.iter().find_map(|row| {
        Player::ALL
            .into_iter()
            .find(|&player| row_has_winner(row, player))
    })
}

/// Both diagonals, main diagonal first, checked as rows.
pub fn check_diagonals(grid: &Grid) -> Option<Player> {
    let mut diagonals = [[CellOwner::Unclaimed; SIZE]; 2];
    for i in 0..SIZE {
        diagonals[0][i] = grid[i][i];
        diagonals[1][i] = grid[i][SIZE - 1 - i];
    }
    check_rows(&diagonals)
}

/// Rows become columns, so columns can be checked as rows.
pub fn transpose(grid: &Grid) -> Grid {
    let mut out = [[CellOwner::Unclaimed; SIZE]; SIZE];
    for (i, row) in grid.iter().enumerate() {
        for (j, &cell) in row.iter().enumerate() {
            out[j][i] = cell;
        }
    }
    out
}

/// Rows, then columns, then diagonals.
pub fn check_winner(grid: &Grid) -> Option<Player> {
    check_rows(grid)
        .or_else(|| check_rows(&transpose(grid)))
        .or_else(|| check_diagonals(grid))
}

/// Outcome of `grid` once `turns_played` claims (including the latest)
/// have been made.
pub fn outcome(grid: &Grid, turns_played: u32) -> GameOutcome {
    match check_winner(grid) {
        Some(player) => GameOutcome::Win(player),
        None if turns_played >= CELL_COUNT => GameOutcome::Draw,
        None => GameOutcome::InProgress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE: CellOwner = CellOwner::Claimed(Player::One);
    const TWO: CellOwner = CellOwner::Claimed(Player::Two);
    const NONE: CellOwner = CellOwner::Unclaimed;

    fn grid_with(cells: &[(usize, usize)], owner: CellOwner) -> Grid {
        let mut grid = [[NONE; SIZE]; SIZE];
        for &(r, c) in cells {
            grid[r][c] = owner;
        }
        grid
    }

    #[test]
    fn test_empty_grid_has_no_winner() {
        assert_eq!(check_winner(&[[NONE; SIZE]; SIZE]), None);
    }

    #[test]
    fn test_every_line_wins() {
        let lines: [[(usize, usize); 3]; 8] = [
            [(0, 0), (0, 1), (0, 2)],
            [(1, 0), (1, 1), (1, 2)],
            [(2, 0), (2, 1), (2, 2)],
            [(0, 0), (1, 0), (2, 0)],
            [(0, 1), (1, 1), (2, 1)],
            [(0, 2), (1, 2), (2, 2)],
            [(0, 0), (1, 1), (2, 2)],
            [(0, 2), (1, 1), (2, 0)],
        ];

        for line in lines {
            assert_eq!(check_winner(&grid_with(&line, ONE)), Some(Player::One), "{:?}", line);
            assert_eq!(check_winner(&grid_with(&line, TWO)), Some(Player::Two), "{:?}", line);
        }
    }

    #[test]
    fn test_transpose() {
        let grid = [[ONE, TWO, NONE], [NONE, ONE, NONE], [TWO, NONE, NONE]];
        let t = transpose(&grid);
        assert_eq!(t, [[ONE, NONE, TWO], [TWO, ONE, NONE], [NONE, NONE, NONE]]);
        assert_eq!(transpose(&t), grid);
    }

    #[test]
    fn test_mixed_row_is_not_a_win() {
        assert!(!row_has_winner(&[ONE, ONE, TWO], Player::One));
        assert!(!row_has_winner(&[ONE, ONE, NONE], Player::One));
        assert!(row_has_winner(&[TWO, TWO, TWO], Player::Two));
    }

    #[test]
    fn test_rows_are_checked_before_columns() {
        // row 0 belongs to Two, column 2 to One: impossible in play,
        // but the row must win
        let grid = [[TWO, TWO, TWO], [NONE, NONE, ONE], [NONE, NONE, ONE]];
        assert_eq!(check_winner(&grid), Some(Player::Two));
    }

    #[test]
    fn test_earlier_row_wins_over_player_order() {
        let grid = [[TWO, TWO, TWO], [ONE, ONE, ONE], [NONE; SIZE]];
        assert_eq!(check_rows(&grid), Some(Player::Two));
    }

    #[test]
    fn test_outcome_draw_only_when_full() {
        // X O X / X O O / O X X: no line
        let grid = [[ONE, TWO, ONE], [ONE, TWO, TWO], [TWO, ONE, ONE]];
        assert_eq!(outcome(&grid, 8), GameOutcome::InProgress);
        assert_eq!(outcome(&grid, 9), GameOutcome::Draw);
    }

    #[test]
    fn test_win_on_last_cell_is_not_a_draw() {
        let grid = [[ONE, TWO, ONE], [TWO, ONE, TWO], [TWO, ONE, ONE]];
        assert_eq!(outcome(&grid, 9), GameOutcome::Win(Player::One));
    }

    #[test]
    fn test_opponent() {
        assert_eq!(Player::One.opponent(), Player::Two);
        assert_eq!(Player::Two.opponent(), Player::One);
    }
}

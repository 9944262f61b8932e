//! The 3×3 grid of cell buttons, turn order and game end detection.

use std::rc::Rc;

use tictactoe_ui::{
    Bitmap, Bounds, Button, ButtonStyle, DrawList, InputEvent, Rectangle, Resources, Texture,
    Widget,
};

use super::board::{self, CellOwner, GameOutcome, Grid, Player, SIZE};
use super::{Layout, PlayerIcons};
use crate::theme::BoardTheme;

/// Receives the board after every successful claim.
pub trait GameListener {
    fn on_game_event(&mut self, board: &GameBoard);
}

impl<F> GameListener for F
where
    F: FnMut(&GameBoard),
{
    fn on_game_event(&mut self, board: &GameBoard) {
        self(board)
    }
}

/// One cell: who owns it and the button that shows it.
pub struct BoardItem {
    owner: CellOwner,
    control: Button,
}

impl BoardItem {
    pub fn owner(&self) -> CellOwner {
        self.owner
    }

    pub fn control(&self) -> &Button {
        &self.control
    }
}

pub struct GameBoard {
    resources: Rc<Resources>,
    background: Rectangle,
    items: [[BoardItem; SIZE]; SIZE],
    current_player: Player,
    outcome: GameOutcome,
    turns_played: u32,
    icons: PlayerIcons,
    spin_speed: f64,
    player1_angle: f64,
}

impl GameBoard {
    pub fn new(
        resources: &Rc<Resources>,
        layout: &Layout,
        theme: &BoardTheme,
        icons: PlayerIcons,
    ) -> Self {
        let board_x = layout.center_x(theme.size);
        let board_y = (layout.window_h - theme.size) / 2.0;

        let background = Rectangle::new(theme.size, theme.size)
            .with_bounds(Bounds::new(board_x, board_y, theme.size, theme.size))
            .with_color(theme.background);

        let style = ButtonStyle {
            background: theme.cell,
            background_hover: theme.cell_hover,
            background_pressed: theme.cell_pressed,
            ..ButtonStyle::default()
        };
        let step = theme.item_size + theme.space;
        let items = std::array::from_fn(|row| {
            std::array::from_fn(|col| BoardItem {
                owner: CellOwner::Unclaimed,
                control: Button::new().with_style(style).with_rect(Bounds::new(
                    board_x + col as f32 * step,
                    board_y + row as f32 * step,
                    theme.item_size,
                    theme.item_size,
                )),
            })
        });

        Self {
            resources: Rc::clone(resources),
            background,
            items,
            current_player: Player::One,
            outcome: GameOutcome::InProgress,
            turns_played: 0,
            icons,
            spin_speed: theme.spin_speed,
            player1_angle: 0.0,
        }
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    pub fn turns_played(&self) -> u32 {
        self.turns_played
    }

    pub fn item(&self, row: usize, col: usize) -> &BoardItem {
        &self.items[row][col]
    }

    /// Snapshot of cell ownership.
    pub fn grid(&self) -> Grid {
        self.items.each_ref().map(|row| row.each_ref().map(|item| item.owner))
    }

    pub fn player1_angle(&self) -> f64 {
        self.player1_angle
    }

    /// Feed an event to every cell; a pressed cell is claimed.
    pub fn process_event(&mut self, event: &InputEvent, listener: &mut dyn GameListener) {
        let mut pressed = None;
        for (row, items) in self.items.iter_mut().enumerate() {
            for (col, item) in items.iter_mut().enumerate() {
                if item.control.process_event(event) {
                    pressed = Some((row, col));
                }
            }
        }

        if let Some((row, col)) = pressed {
            self.claim(row, col, listener);
        }
    }

    /// Claim a cell for the current player.
    ///
    /// Does nothing (and returns `false`) if the cell is taken or the game
    /// is over. Otherwise the outcome is recomputed and the turn passes
    /// before `listener` runs; the cell's icon is set afterwards.
    pub fn claim(&mut self, row: usize, col: usize, listener: &mut dyn GameListener) -> bool {
        if self.items[row][col].owner != CellOwner::Unclaimed || self.outcome.is_over() {
            return false;
        }

        let player = self.current_player;
        self.items[row][col].owner = CellOwner::Claimed(player);
        self.outcome = board::outcome(&self.grid(), self.turns_played + 1);
        self.current_player = player.opponent();
        log::debug!("{:?} claimed ({}, {}): {:?}", player, row, col, self.outcome);

        listener.on_game_event(self);

        if let Some(bitmap) = self.icons.for_player(player) {
            self.set_icon(row, col, bitmap);
        }
        self.turns_played += 1;
        true
    }

    /// Advance the spin of player one's marks.
    pub fn update(&mut self, delta_time: f64) {
        self.player1_angle = (self.player1_angle + self.spin_speed * delta_time).rem_euclid(360.0);

        let angle = self.player1_angle as f32;
        for item in self.items.iter_mut().flatten() {
            let spin = item.owner == CellOwner::Claimed(Player::One);
            if let Some(icon) = item.control.icon_mut() {
                icon.set_angle(if spin { angle } else { 0.0 });
            }
        }
    }

    pub fn draw(&self, list: &mut DrawList) {
        self.background.draw(list);
        for item in self.items.iter().flatten() {
            item.control.draw(list);
        }
    }

    fn set_icon(&mut self, row: usize, col: usize, bitmap: Rc<Bitmap>) {
        let icon = Texture::from_bitmap(&self.resources, bitmap);
        self.items[row][col].control.set_icon(icon);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene_game::testing::{icons, stub_resources};
    use tictactoe_ui::PointerButton;

    fn new_board() -> GameBoard {
        let layout = Layout::new(640.0, 480.0, 200.0);
        GameBoard::new(&stub_resources(), &layout, &BoardTheme::default(), icons())
    }

    fn ignore(_: &GameBoard) {}

    fn play(board: &mut GameBoard, moves: &[(usize, usize)]) {
        for &(r, c) in moves {
            assert!(board.claim(r, c, &mut ignore), "({}, {}) rejected", r, c);
        }
    }

    #[test]
    fn test_layout_matches_board_geometry() {
        let board = new_board();
        // sidebar 200, content 440: board at 200 + (440 - 304) / 2 = 268, y = 88
        assert_eq!(*board.item(0, 0).control().bounds(), Bounds::new(268.0, 88.0, 98.0, 98.0));
        assert_eq!(*board.item(2, 1).control().bounds(), Bounds::new(371.0, 294.0, 98.0, 98.0));
    }

    #[test]
    fn test_turns_alternate() {
        let mut board = new_board();
        assert_eq!(board.current_player(), Player::One);
        play(&mut board, &[(0, 0)]);
        assert_eq!(board.current_player(), Player::Two);
        play(&mut board, &[(1, 1)]);
        assert_eq!(board.current_player(), Player::One);
        assert_eq!(board.turns_played(), 2);
        assert_eq!(board.item(1, 1).owner(), CellOwner::Claimed(Player::Two));
    }

    #[test]
    fn test_diagonal_win() {
        let mut board = new_board();
        play(&mut board, &[(0, 0), (0, 1), (1, 1), (1, 0)]);
        assert_eq!(board.outcome(), GameOutcome::InProgress);
        play(&mut board, &[(2, 2)]);
        assert_eq!(board.outcome(), GameOutcome::Win(Player::One));
        // the turn still flips on the winning move
        assert_eq!(board.current_player(), Player::Two);
    }

    #[test]
    fn test_claimed_cell_is_guarded() {
        let mut board = new_board();
        play(&mut board, &[(0, 0)]);

        let mut calls = 0;
        let mut count = |_: &GameBoard| calls += 1;
        assert!(!board.claim(0, 0, &mut count));
        assert_eq!(calls, 0);
        assert_eq!(board.item(0, 0).owner(), CellOwner::Claimed(Player::One));
        assert_eq!(board.current_player(), Player::Two);
        assert_eq!(board.turns_played(), 1);
    }

    #[test]
    fn test_no_claims_after_game_over() {
        let mut board = new_board();
        play(&mut board, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
        assert_eq!(board.outcome(), GameOutcome::Win(Player::One));

        let mut calls = 0;
        let mut count = |_: &GameBoard| calls += 1;
        assert!(!board.claim(2, 2, &mut count));
        assert_eq!(calls, 0);
        assert_eq!(board.item(2, 2).owner(), CellOwner::Unclaimed);
        assert_eq!(board.turns_played(), 5);
        assert_eq!(board.outcome(), GameOutcome::Win(Player::One));
    }

    #[test]
    fn test_draw_after_ninth_move_only() {
        let mut board = new_board();
        // X O X / X O O / O X X
        let moves = [(0, 0), (0, 1), (0, 2), (1, 1), (1, 0), (1, 2), (2, 1), (2, 0)];
        play(&mut board, &moves);
        assert_eq!(board.outcome(), GameOutcome::InProgress);
        play(&mut board, &[(2, 2)]);
        assert_eq!(board.outcome(), GameOutcome::Draw);
        assert_eq!(board.turns_played(), 9);
    }

    #[test]
    fn test_listener_sees_logical_state_before_icon() {
        let mut board = new_board();
        let mut seen = Vec::new();
        let mut record = |b: &GameBoard| {
            seen.push((
                b.item(1, 2).owner(),
                b.current_player(),
                b.item(1, 2).control().icon().is_some(),
                b.turns_played(),
            ));
        };
        board.claim(1, 2, &mut record);

        assert_eq!(seen, vec![(CellOwner::Claimed(Player::One), Player::Two, false, 0)]);
        assert!(board.item(1, 2).control().icon().is_some());
        assert_eq!(board.turns_played(), 1);
    }

    #[test]
    fn test_press_on_cell_claims_it() {
        let mut board = new_board();
        let mut events = 0;
        let mut count = |_: &GameBoard| events += 1;
        let (cx, cy) = board.item(0, 2).control().bounds().center();
        let down = InputEvent::PointerDown {
            x: cx,
            y: cy,
            button: PointerButton::Primary,
        };
        board.process_event(&down, &mut count);

        assert_eq!(events, 1);
        assert_eq!(board.item(0, 2).owner(), CellOwner::Claimed(Player::One));
    }

    #[test]
    fn test_only_player_one_icons_spin() {
        let mut board = new_board();
        play(&mut board, &[(0, 0), (0, 1)]);
        board.update(2.0);

        assert_eq!(board.player1_angle(), 60.0);
        assert_eq!(board.item(0, 0).control().icon().unwrap().angle(), 60.0);
        assert_eq!(board.item(0, 1).control().icon().unwrap().angle(), 0.0);

        board.update(11.0);
        assert_eq!(board.player1_angle(), 30.0);
    }

    #[test]
    fn test_missing_icons_leave_cells_blank() {
        let layout = Layout::new(640.0, 480.0, 200.0);
        let mut board = GameBoard::new(
            &stub_resources(),
            &layout,
            &BoardTheme::default(),
            PlayerIcons::default(),
        );
        play(&mut board, &[(0, 0)]);
        assert!(board.item(0, 0).control().icon().is_none());
    }
}

//! The game screen: board, header, score column and footer.

pub mod board;
pub mod footer;
pub mod game_board;
pub mod header;
pub mod sidebar;

use std::rc::Rc;

use tictactoe_ui::{Bitmap, DrawList, InputEvent, Resources, Scene, SceneError};

use crate::app::GameEnv;
use crate::theme::{AssetTheme, WindowTheme};
use board::{GameOutcome, Player};
use footer::Footer;
use game_board::{GameBoard, GameListener};
use header::Header;
use sidebar::Sidebar;

/// Window split into a score column on the left and the play area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub window_w: f32,
    pub window_h: f32,
    pub sidebar_w: f32,
    pub sidebar_h: f32,
    pub content_w: f32,
    pub content_h: f32,
}

impl Layout {
    pub fn new(window_w: f32, window_h: f32, sidebar_w: f32) -> Self {
        Self {
            window_w,
            window_h,
            sidebar_w,
            sidebar_h: window_h,
            content_w: window_w - sidebar_w,
            content_h: window_h,
        }
    }

    pub fn from_theme(theme: &WindowTheme) -> Self {
        Self::new(
            theme.width as f32,
            theme.height as f32,
            theme.sidebar_width as f32,
        )
    }

    /// Left edge that centers something `w` wide in the play area.
    pub fn center_x(&self, w: f32) -> f32 {
        self.sidebar_w + (self.content_w - w) / 2.0
    }
}

/// Marks drawn for each player. A missing image leaves cells blank.
#[derive(Clone, Default)]
pub struct PlayerIcons {
    pub one: Option<Rc<Bitmap>>,
    pub two: Option<Rc<Bitmap>>,
}

impl PlayerIcons {
    pub fn load(resources: &Resources, assets: &AssetTheme) -> Self {
        let load = |path: &str| match resources.image(path) {
            Ok(bitmap) => Some(bitmap),
            Err(e) => {
                log::error!("{}", e);
                None
            }
        };
        Self {
            one: load(&assets.player1_icon),
            two: load(&assets.player2_icon),
        }
    }

    pub fn for_player(&self, player: Player) -> Option<Rc<Bitmap>> {
        match player {
            Player::One => self.one.clone(),
            Player::Two => self.two.clone(),
        }
    }
}

/// Games won by each player and games drawn since launch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub player1_wins: u32,
    pub player2_wins: u32,
    pub draws: u32,
}

/// Keeps header and score column in step with the board.
struct Scoreboard<'a> {
    header: &'a mut Header,
    sidebar: &'a mut Sidebar,
    tally: &'a mut Tally,
}

impl GameListener for Scoreboard<'_> {
    fn on_game_event(&mut self, board: &GameBoard) {
        self.header
            .set_current_player(board.current_player(), board.outcome());

        let outcome = board.outcome();
        if outcome.is_over() {
            log::info!("Game over: {:?}", outcome);
        }
        match outcome {
            GameOutcome::InProgress => {}
            GameOutcome::Win(Player::One) => {
                self.tally.player1_wins += 1;
                self.sidebar.set_player1_wins(self.tally.player1_wins);
            }
            GameOutcome::Win(Player::Two) => {
                self.tally.player2_wins += 1;
                self.sidebar.set_player2_wins(self.tally.player2_wins);
            }
            GameOutcome::Draw => {
                self.tally.draws += 1;
                self.sidebar.set_draws(self.tally.draws);
            }
        }
    }
}

pub struct SceneGame {
    env: GameEnv,
    layout: Layout,
    icons: PlayerIcons,
    board: GameBoard,
    header: Header,
    sidebar: Sidebar,
    footer: Footer,
    tally: Tally,
}

impl SceneGame {
    pub fn board(&self) -> &GameBoard {
        &self.board
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    /// Fresh board with player one to move. Counters are kept.
    pub fn new_game(&mut self) {
        self.board = GameBoard::new(
            &self.env.resources,
            &self.layout,
            &self.env.theme.board,
            self.icons.clone(),
        );
        self.header
            .set_current_player(Player::One, GameOutcome::InProgress);
        log::info!("New game, tally {:?}", self.tally);
    }
}

impl Scene<GameEnv> for SceneGame {
    fn on_new(env: &GameEnv) -> Result<Self, SceneError> {
        let theme = &env.theme;
        let resources = &env.resources;
        let layout = Layout::from_theme(&theme.window);
        let icons = PlayerIcons::load(resources, &theme.assets);

        let sidebar = Sidebar::new(resources, &layout, &theme.sidebar)?;
        let header = Header::new(resources, &layout, &theme.header, &icons)?;
        let footer = Footer::new(resources, &layout, &theme.footer)?;
        let board = GameBoard::new(resources, &layout, &theme.board, icons.clone());

        Ok(Self {
            env: env.clone(),
            layout,
            icons,
            board,
            header,
            sidebar,
            footer,
            tally: Tally::default(),
        })
    }

    fn on_delete(&mut self) {
        log::info!("Leaving game, final tally {:?}", self.tally);
    }

    fn on_process_event(&mut self, event: &InputEvent) {
        if self.footer.process_event(event) {
            self.new_game();
            return;
        }

        let mut scoreboard = Scoreboard {
            header: &mut self.header,
            sidebar: &mut self.sidebar,
            tally: &mut self.tally,
        };
        self.board.process_event(event, &mut scoreboard);
    }

    fn on_update(&mut self, delta_time: f64) {
        self.header.update(delta_time);
        self.board.update(delta_time);
    }

    fn on_draw(&self, list: &mut DrawList) {
        self.board.draw(list);
        self.header.draw(list);
        self.footer.draw(list);
        self.sidebar.draw(list);
    }
}


#[cfg(test)]
mod tests {
    use super::testing::stub_resources;
    use super::*;
    use crate::theme::Theme;
    use tictactoe_ui::{PointerButton, Widget};

    fn scene() -> SceneGame {
        let env = GameEnv {
            resources: stub_resources(),
            theme: Rc::new(Theme::default()),
        };
        SceneGame::on_new(&env).unwrap()
    }

    fn click(scene: &mut SceneGame, x: f32, y: f32) {
        let button = PointerButton::Primary;
        scene.on_process_event(&InputEvent::PointerDown { x, y, button });
        scene.on_process_event(&InputEvent::PointerUp { x, y, button });
    }

    fn click_cell(scene: &mut SceneGame, row: usize, col: usize) {
        let (x, y) = scene.board().item(row, col).control().bounds().center();
        click(scene, x, y);
    }

    #[test]
    fn test_layout_from_theme() {
        let layout = Layout::from_theme(&WindowTheme::default());
        assert_eq!(layout, Layout::new(640.0, 480.0, 200.0));
        assert_eq!(layout.content_w, 440.0);
        assert_eq!(layout.center_x(40.0), 400.0);
    }

    #[test]
    fn test_win_updates_tally_and_header() {
        let mut scene = scene();
        for (r, c) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            click_cell(&mut scene, r, c);
        }

        assert_eq!(scene.board().outcome(), GameOutcome::Win(Player::One));
        assert_eq!(scene.header().outcome(), GameOutcome::Win(Player::One));
        assert_eq!(scene.tally().player1_wins, 1);
        assert_eq!(scene.sidebar().counts(), ["1", "0", "0"]);
    }

    #[test]
    fn test_header_follows_turns() {
        let mut scene = scene();
        click_cell(&mut scene, 1, 1);
        assert_eq!(scene.header().current_player(), Player::Two);
        click_cell(&mut scene, 0, 0);
        assert_eq!(scene.header().current_player(), Player::One);
    }

    #[test]
    fn test_restart_keeps_tally() {
        let mut scene = scene();
        for (r, c) in [(0, 0), (0, 1), (1, 0), (1, 1), (2, 0)] {
            click_cell(&mut scene, r, c);
        }
        assert_eq!(scene.tally().player1_wins, 1);

        scene.new_game();
        assert_eq!(scene.board().turns_played(), 0);
        assert_eq!(scene.board().outcome(), GameOutcome::InProgress);
        assert_eq!(scene.header().current_player(), Player::One);
        assert!(!scene.header().outcome().is_over());
        assert_eq!(scene.tally().player1_wins, 1);
        assert_eq!(scene.sidebar().counts(), ["1", "0", "0"]);
    }

    #[test]
    fn test_draw_order() {
        let scene = scene();
        let mut list = DrawList::new();
        scene.on_draw(&mut list);

        let mut board_only = DrawList::new();
        scene.board().draw(&mut board_only);
        let mut sidebar_only = DrawList::new();
        scene.sidebar().draw(&mut sidebar_only);

        // board comes first, the score column last
        assert_eq!(&list.commands()[..board_only.len()], board_only.commands());
        let tail = list.len() - sidebar_only.len();
        assert_eq!(&list.commands()[tail..], sidebar_only.commands());
    }
}

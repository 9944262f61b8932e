//! Turn indicator and result banner above the board.

use std::rc::Rc;

use tictactoe_ui::{Bounds, DrawList, Rectangle, Resources, Texture, TextureError, Widget};

use super::board::{GameOutcome, Player};
use super::{Layout, PlayerIcons};
use crate::theme::HeaderTheme;

const LABEL_Y: f32 = 30.0;
const MARGIN: f32 = 20.0;
const SPACE: f32 = 6.0;
const PLAYER1_ICON: (f32, f32) = (28.0, 32.0); // side, y
const PLAYER2_ICON: (f32, f32) = (26.0, 33.0);

const INDICATOR_W: f32 = 134.0;
const INDICATOR_H: f32 = 4.0;
const INDICATOR_Y: f32 = 64.0;
const INDICATOR_TRAVEL: f32 = 85.0;

const BANNER: (f32, f32, f32) = (302.0, 58.0, 18.0); // w, h, y
const BANNER_BORDER: f32 = 2.0;
const RESULT_Y: f32 = 26.0;

pub struct Header {
    layout: Layout,
    theme: HeaderTheme,
    current_player: Player,
    outcome: GameOutcome,
    indicator: Rectangle,
    indicator_left: f32,
    indicator_right: f32,
    player1: Texture,
    player1_icon: Option<Texture>,
    player2: Texture,
    player2_icon: Option<Texture>,
    banner_border: Rectangle,
    banner_fill: Rectangle,
    result: Texture,
}

impl Header {
    pub fn new(
        resources: &Rc<Resources>,
        layout: &Layout,
        theme: &HeaderTheme,
        icons: &PlayerIcons,
    ) -> Result<Self, TextureError> {
        let x = layout.center_x(INDICATOR_W);
        let indicator_left = x - INDICATOR_TRAVEL;
        let indicator_right = x + INDICATOR_TRAVEL;
        let indicator = Rectangle::new(INDICATOR_W, INDICATOR_H)
            .with_bounds(Bounds::new(indicator_left, INDICATOR_Y, INDICATOR_W, INDICATOR_H))
            .with_color(theme.indicator_color);

        let mut player1 = Texture::new(resources);
        player1.setup_text(&theme.player1_label, theme.label_size, theme.label_color);
        player1.make_text()?;
        let mut player2 = Texture::new(resources);
        player2.setup_text(&theme.player2_label, theme.label_size, theme.label_color);
        player2.make_text()?;

        // labels sit either side of the center, icons between label and center
        let (w1, h1) = (player1.width(), player1.height());
        let (side1, icon1_y) = PLAYER1_ICON;
        player1.set_rect(Bounds::new(
            layout.center_x(w1) - w1 / 2.0 - MARGIN - side1 - SPACE,
            LABEL_Y,
            w1,
            h1,
        ));
        let player1_icon = icons.one.clone().map(|bitmap| {
            let mut icon = Texture::from_bitmap(resources, bitmap);
            icon.set_rect(Bounds::new(
                layout.center_x(side1) - side1 / 2.0 - MARGIN,
                icon1_y,
                side1,
                side1,
            ));
            icon
        });

        let (w2, h2) = (player2.width(), player2.height());
        let (side2, icon2_y) = PLAYER2_ICON;
        player2.set_rect(Bounds::new(
            layout.center_x(w2) + w2 / 2.0 + MARGIN + side2 + SPACE,
            LABEL_Y,
            w2,
            h2,
        ));
        let player2_icon = icons.two.clone().map(|bitmap| {
            let mut icon = Texture::from_bitmap(resources, bitmap);
            icon.set_rect(Bounds::new(
                layout.center_x(side2) + side2 / 2.0 + MARGIN,
                icon2_y,
                side2,
                side2,
            ));
            icon
        });

        let (banner_w, banner_h, banner_y) = BANNER;
        let banner = Bounds::new(layout.center_x(banner_w), banner_y, banner_w, banner_h);
        let banner_border = Rectangle::new(banner_w, banner_h)
            .with_bounds(banner)
            .with_color(theme.banner_border);
        let banner_fill = Rectangle::new(banner_w, banner_h)
            .with_bounds(banner.inset(BANNER_BORDER))
            .with_color(theme.banner_fill);

        let mut result = Texture::new(resources);
        result.setup_text("...", theme.result_size, theme.label_color);
        result.make_text()?;

        let mut header = Self {
            layout: *layout,
            theme: theme.clone(),
            current_player: Player::One,
            outcome: GameOutcome::InProgress,
            indicator,
            indicator_left,
            indicator_right,
            player1,
            player1_icon,
            player2,
            player2_icon,
            banner_border,
            banner_fill,
            result,
        };
        header.center_result();
        Ok(header)
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    pub fn indicator_x(&self) -> f32 {
        self.indicator.bounds().x()
    }

    /// Show whose turn it is, or the result once the game is over.
    pub fn set_current_player(&mut self, player: Player, outcome: GameOutcome) {
        self.current_player = player;
        self.outcome = outcome;

        let text = match outcome {
            GameOutcome::InProgress => return,
            GameOutcome::Win(Player::One) => &self.theme.player1_win,
            GameOutcome::Win(Player::Two) => &self.theme.player2_win,
            GameOutcome::Draw => &self.theme.draw,
        };
        self.result.set_text(text);
        if let Err(e) = self.result.make_text() {
            log::error!("{}", e);
        }
        self.center_result();
    }

    /// Slide the indicator toward the current player's side.
    pub fn update(&mut self, delta_time: f64) {
        let x = self.indicator_x();
        let step = (self.theme.indicator_speed * delta_time) as f32;
        let next = match self.current_player {
            Player::One => (x - step).max(self.indicator_left),
            Player::Two => (x + step).min(self.indicator_right),
        };
        self.indicator.bounds_mut().set_x(next);
    }

    pub fn draw(&self, list: &mut DrawList) {
        if self.outcome.is_over() {
            self.banner_border.draw(list);
            self.banner_fill.draw(list);
            self.result.draw(list);
            return;
        }

        self.indicator.draw(list);
        self.player1.draw(list);
        if let Some(icon) = &self.player1_icon {
            icon.draw(list);
        }
        self.player2.draw(list);
        if let Some(icon) = &self.player2_icon {
            icon.draw(list);
        }
    }

    fn center_result(&mut self) {
        let (w, h) = (self.result.width(), self.result.height());
        self.result
            .set_rect(Bounds::new(self.layout.center_x(w), RESULT_Y, w, h));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene_game::testing::{icons, stub_resources};
    use tictactoe_ui::DrawCommand;

    fn header() -> Header {
        let layout = Layout::new(640.0, 480.0, 200.0);
        Header::new(&stub_resources(), &layout, &HeaderTheme::default(), &icons()).unwrap()
    }

    #[test]
    fn test_indicator_slides_and_stops() {
        let mut header = header();
        let left = header.indicator_x();
        assert_eq!(left, 200.0 + (440.0 - 134.0) / 2.0 - 85.0);

        header.set_current_player(Player::Two, GameOutcome::InProgress);
        header.update(0.1);
        assert_eq!(header.indicator_x(), left + 60.0);

        header.update(10.0);
        assert_eq!(header.indicator_x(), left + 170.0);

        header.set_current_player(Player::One, GameOutcome::InProgress);
        header.update(10.0);
        assert_eq!(header.indicator_x(), left);
    }

    #[test]
    fn test_result_replaces_turn_display() {
        let mut header = header();
        let mut list = DrawList::new();
        header.draw(&mut list);
        // indicator, two labels, two icons
        assert_eq!(list.len(), 5);

        header.set_current_player(Player::Two, GameOutcome::Win(Player::One));
        assert_eq!(header.result.text(), "Player 1 wins");

        list.clear(tictactoe_ui::Color::BLACK);
        header.draw(&mut list);
        assert_eq!(list.len(), 3);
        assert!(matches!(list.commands()[2], DrawCommand::Image { .. }));
    }

    #[test]
    fn test_draw_result_text() {
        let mut header = header();
        header.set_current_player(Player::One, GameOutcome::Draw);
        assert_eq!(header.result.text(), "It's a draw!");
        assert!(header.outcome().is_over());
    }
}

//! Running win and draw counters in the left column.

use std::rc::Rc;

use tictactoe_ui::{Bounds, DrawList, Rectangle, Resources, Texture, TextureError, Widget};

use super::Layout;
use crate::theme::SidebarTheme;

const BORDER_W: f32 = 2.0;
const TITLE_MARGIN: f32 = 30.0;
const NUMBER_MARGIN: f32 = 75.0;

/// Caption plus a big number.
struct ScoreBlock {
    title: Texture,
    count: Texture,
    count_y: f32,
}

pub struct Sidebar {
    width: f32,
    background: Rectangle,
    lines: [Rectangle; 3],
    player1: ScoreBlock,
    player2: ScoreBlock,
    draws: ScoreBlock,
}

impl Sidebar {
    pub fn new(
        resources: &Rc<Resources>,
        layout: &Layout,
        theme: &SidebarTheme,
    ) -> Result<Self, TextureError> {
        let width = layout.sidebar_w - BORDER_W;
        let height = layout.sidebar_h;
        let second_block = (height / 3.0).floor();
        let third_block = second_block * 2.0;

        let background = Rectangle::new(width, height).with_color(theme.background);
        let line = |bounds: Bounds| Rectangle::new(0.0, 0.0).with_bounds(bounds).with_color(theme.lines);
        let lines = [
            line(Bounds::new(width, 0.0, BORDER_W, height)),
            line(Bounds::new(0.0, second_block - BORDER_W, width, BORDER_W)),
            line(Bounds::new(0.0, third_block - BORDER_W, width, BORDER_W)),
        ];

        let block = |caption: &str, top: f32| -> Result<ScoreBlock, TextureError> {
            let mut title = Texture::new(resources);
            title.setup_text(caption, theme.title_size, theme.text_color);
            title.make_text()?;
            center_in_column(&mut title, width, top + TITLE_MARGIN);

            let mut count = Texture::new(resources);
            count.setup_text("0", theme.count_size, theme.text_color);
            count.make_text()?;
            center_in_column(&mut count, width, top + NUMBER_MARGIN);

            Ok(ScoreBlock {
                title,
                count,
                count_y: top + NUMBER_MARGIN,
            })
        };

        Ok(Self {
            width,
            background,
            lines,
            player1: block(&theme.player1_title, 0.0)?,
            player2: block(&theme.player2_title, second_block)?,
            draws: block(&theme.draws_title, third_block)?,
        })
    }

    pub fn set_player1_wins(&mut self, count: u32) {
        Self::show_count(&mut self.player1, self.width, count);
    }

    pub fn set_player2_wins(&mut self, count: u32) {
        Self::show_count(&mut self.player2, self.width, count);
    }

    pub fn set_draws(&mut self, count: u32) {
        Self::show_count(&mut self.draws, self.width, count);
    }

    /// Text currently shown by the three counters.
    pub fn counts(&self) -> [&str; 3] {
        [
            self.player1.count.text(),
            self.player2.count.text(),
            self.draws.count.text(),
        ]
    }

    pub fn draw(&self, list: &mut DrawList) {
        self.background.draw(list);
        for line in &self.lines {
            line.draw(list);
        }
        for block in [&self.player1, &self.player2, &self.draws] {
            block.title.draw(list);
            block.count.draw(list);
        }
    }

    fn show_count(block: &mut ScoreBlock, width: f32, count: u32) {
        block.count.set_text(&count.to_string());
        if let Err(e) = block.count.make_text() {
            log::error!("{}", e);
        }
        center_in_column(&mut block.count, width, block.count_y);
    }
}

fn center_in_column(texture: &mut Texture, width: f32, y: f32) {
    let (w, h) = (texture.width(), texture.height());
    texture.set_rect(Bounds::new(((width - w) / 2.0).floor(), y, w, h));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene_game::testing::stub_resources;

    fn sidebar() -> Sidebar {
        let layout = Layout::new(640.0, 480.0, 200.0);
        Sidebar::new(&stub_resources(), &layout, &SidebarTheme::default()).unwrap()
    }

    #[test]
    fn test_counters_start_at_zero() {
        assert_eq!(sidebar().counts(), ["0", "0", "0"]);
    }

    #[test]
    fn test_count_is_recentered() {
        let mut sidebar = sidebar();
        sidebar.set_draws(12);
        assert_eq!(sidebar.counts(), ["0", "0", "12"]);

        // stub glyphs are 10 px wide
        let count = &sidebar.draws.count;
        assert_eq!(count.bounds().x(), ((198.0_f32 - 20.0) / 2.0).floor());
        assert_eq!(count.bounds().y(), 160.0 * 2.0 + NUMBER_MARGIN);
    }

    #[test]
    fn test_draw_order_background_first() {
        let mut list = DrawList::new();
        sidebar().draw(&mut list);
        // background, three lines, three titles, three counts
        assert_eq!(list.len(), 10);
        assert!(matches!(
            list.commands()[0],
            tictactoe_ui::DrawCommand::Fill { .. }
        ));
    }
}

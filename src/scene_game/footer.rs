//! Restart button and credit line along the bottom.

use std::rc::Rc;

use tictactoe_ui::{Bounds, Button, DrawList, InputEvent, Resources, Texture, TextureError, Widget};

use super::Layout;
use crate::theme::FooterTheme;

const RESTART_W: f32 = 110.0;
const RESTART_H: f32 = 32.0;
const RESTART_BOTTOM_MARGIN: f32 = 40.0;
const CREDIT_BOTTOM_MARGIN: f32 = 10.0;

pub struct Footer {
    restart: Button,
    credit: Texture,
}

impl Footer {
    pub fn new(
        resources: &Rc<Resources>,
        layout: &Layout,
        theme: &FooterTheme,
    ) -> Result<Self, TextureError> {
        let mut restart = Button::new().with_rect(Bounds::new(
            layout.center_x(RESTART_W),
            layout.window_h - RESTART_H - RESTART_BOTTOM_MARGIN,
            RESTART_W,
            RESTART_H,
        ));
        restart.set_text(resources, &theme.restart_label, theme.restart_size)?;

        let mut credit = Texture::new(resources);
        credit.setup_text(&theme.credit, theme.credit_size, theme.credit_color);
        credit.make_text()?;
        let (w, h) = (credit.width(), credit.height());
        credit.set_rect(Bounds::new(
            layout.center_x(w),
            layout.window_h - h - CREDIT_BOTTOM_MARGIN,
            w,
            h,
        ));

        Ok(Self { restart, credit })
    }

    pub fn restart(&self) -> &Button {
        &self.restart
    }

    /// True when the restart button was pressed by `event`.
    pub fn process_event(&mut self, event: &InputEvent) -> bool {
        self.restart.process_event(event)
    }

    pub fn draw(&self, list: &mut DrawList) {
        self.restart.draw(list);
        self.credit.draw(list);
    }
}

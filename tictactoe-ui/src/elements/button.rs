//! Push button with an optional icon or text label

use std::rc::Rc;

use super::{Rectangle, Texture, TextureError, Widget};
use crate::{Bounds, Color, DrawList, InputEvent, PointerButton, Resources};

/// Visual state of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Normal,
    Hover,
    Pressed,
}

/// Colors used for each state, plus the label color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonStyle {
    pub background: Color,
    pub background_hover: Color,
    pub background_pressed: Color,
    pub text_color: Color,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            background: Color::rgb(50, 140, 140),
            background_hover: Color::rgb(30, 120, 120),
            background_pressed: Color::rgb(60, 60, 60),
            text_color: Color::WHITE,
        }
    }
}

impl ButtonStyle {
    pub fn color_for(&self, state: ButtonState) -> Color {
        match state {
            ButtonState::Normal => self.background,
            ButtonState::Hover => self.background_hover,
            ButtonState::Pressed => self.background_pressed,
        }
    }
}

type PressHandler = Box<dyn FnMut(&Button)>;

pub struct Button {
    background: Rectangle,
    icon: Option<Texture>,
    label: Option<Texture>,
    style: ButtonStyle,
    state: ButtonState,
    on_press: Option<PressHandler>,
}

impl Button {
    pub fn new() -> Self {
        let style = ButtonStyle::default();
        Self {
            background: Rectangle::new(60.0, 40.0).with_color(style.background),
            icon: None,
            label: None,
            style,
            state: ButtonState::Normal,
            on_press: None,
        }
    }

    pub fn with_style(mut self, style: ButtonStyle) -> Self {
        self.set_style(style);
        self
    }

    pub fn with_rect(mut self, rect: Bounds) -> Self {
        self.set_rect(rect);
        self
    }

    pub fn set_style(&mut self, style: ButtonStyle) {
        self.style = style;
        self.set_state(self.state);
    }

    pub fn style(&self) -> &ButtonStyle {
        &self.style
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.style.background = color;
        self.set_state(self.state);
    }

    pub fn set_background_hover_color(&mut self, color: Color) {
        self.style.background_hover = color;
        self.set_state(self.state);
    }

    pub fn set_background_pressed_color(&mut self, color: Color) {
        self.style.background_pressed = color;
        self.set_state(self.state);
    }

    /// Affects labels rendered from now on.
    pub fn set_text_color(&mut self, color: Color) {
        self.style.text_color = color;
    }

    /// Render `text` as the button label.
    ///
    /// The previous label, if any, is kept when rendering fails.
    pub fn set_text(
        &mut self,
        resources: &Rc<Resources>,
        text: &str,
        size: f32,
    ) -> Result<(), TextureError> {
        let label = self.label.get_or_insert_with(|| Texture::new(resources));
        label.setup_text(text, size, self.style.text_color);
        label.make_text()?;
        self.update_content_rect();
        Ok(())
    }

    pub fn label(&self) -> Option<&Texture> {
        self.label.as_ref()
    }

    pub fn set_icon(&mut self, icon: Texture) {
        self.icon = Some(icon);
        self.update_content_rect();
    }

    pub fn icon(&self) -> Option<&Texture> {
        self.icon.as_ref()
    }

    pub fn icon_mut(&mut self) -> Option<&mut Texture> {
        self.icon.as_mut()
    }

    /// Move and resize the button, recentering its icon and label.
    pub fn set_rect(&mut self, rect: Bounds) {
        *self.background.bounds_mut() = rect;
        self.update_content_rect();
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Register the callback fired on the transition into `Pressed`.
    pub fn set_on_press<F>(&mut self, handler: F)
    where
        F: FnMut(&Button) + 'static,
    {
        self.on_press = Some(Box::new(handler));
    }

    /// Run the state machine for one event.
    ///
    /// Returns `true` when this event pressed the button, which is also
    /// the only time the press callback runs. While pressed, everything
    /// except a pointer release is ignored.
    pub fn process_event(&mut self, event: &InputEvent) -> bool {
        let Some((x, y)) = event.position() else {
            return false;
        };

        if self.state == ButtonState::Pressed && !event.is_pointer_up() {
            return false;
        }

        let hovering = self.bounds().contains(x, y);
        if hovering {
            if let InputEvent::PointerDown {
                button: PointerButton::Primary,
                ..
            } = event
            {
                self.set_state(ButtonState::Pressed);
                self.fire_press();
                return true;
            }
        }

        self.set_state(if hovering {
            ButtonState::Hover
        } else {
            ButtonState::Normal
        });
        false
    }

    /// Draw with an explicit icon source rect, destination and angle.
    pub fn draw_ex(
        &self,
        list: &mut DrawList,
        source: Option<Bounds>,
        dest: Option<Bounds>,
        angle: f32,
    ) {
        self.draw_background(list);
        if let Some(icon) = &self.icon {
            icon.draw_ex(list, source, dest, angle);
        }
    }

    fn draw_background(&self, list: &mut DrawList) {
        self.background.draw(list);
        if let Some(label) = &self.label {
            label.draw(list);
        }
    }

    fn set_state(&mut self, state: ButtonState) {
        self.state = state;
        self.background.set_color(self.style.color_for(state));
    }

    fn fire_press(&mut self) {
        if let Some(mut handler) = self.on_press.take() {
            handler(self);
            // the handler may have installed a replacement
            if self.on_press.is_none() {
                self.on_press = Some(handler);
            }
        }
    }

    fn update_content_rect(&mut self) {
        let outer = *self.background.bounds();
        for texture in [self.label.as_mut(), self.icon.as_mut()].into_iter().flatten() {
            let (w, h) = (texture.width(), texture.height());
            texture.set_rect(Bounds::centered_in(&outer, w, h));
        }
    }
}

impl Default for Button {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Button {
    fn bounds(&self) -> &Bounds {
        self.background.bounds()
    }

    fn draw(&self, list: &mut DrawList) {
        self.draw_background(list);
        if let Some(icon) = &self.icon {
            icon.draw(list);
        }
    }
}

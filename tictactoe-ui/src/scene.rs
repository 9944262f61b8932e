//! Single-active-scene dispatcher

use thiserror::Error;

use crate::{AssetError, Color, DrawList, InputEvent, TextureError};

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Scene setup failed: {0}")]
    Texture(#[from] TextureError),
    #[error("Scene setup failed: {0}")]
    Asset(#[from] AssetError),
}

/// One screen of the application.
///
/// `E` is whatever shared environment the application hands to new scenes.
pub trait Scene<E> {
    fn on_new(env: &E) -> Result<Self, SceneError>
    where
        Self: Sized;

    /// Called once when the scene is replaced or the loop ends.
    fn on_delete(&mut self) {}

    fn on_process_event(&mut self, event: &InputEvent);

    fn on_update(&mut self, delta_time: f64);

    fn on_draw(&self, list: &mut DrawList);
}

/// Whether the frame loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

/// Owns at most one active scene and drives it through frames.
pub struct SceneManager<E> {
    env: E,
    active: Option<Box<dyn Scene<E>>>,
}

impl<E> SceneManager<E> {
    pub fn new(env: E) -> Self {
        Self { env, active: None }
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn has_scene(&self) -> bool {
        self.active.is_some()
    }

    /// Build a scene of type `S` and make it active, tearing down the
    /// previous one. If construction fails the previous scene stays.
    pub fn go_to<S>(&mut self) -> Result<(), SceneError>
    where
        S: Scene<E> + 'static,
    {
        let scene = S::on_new(&self.env)?;
        self.install(Box::new(scene));
        Ok(())
    }

    /// Make an already built scene active, tearing down the previous one.
    pub fn install(&mut self, scene: Box<dyn Scene<E>>) {
        self.shutdown();
        self.active = Some(scene);
        log::info!("Scene installed");
    }

    /// Tear down the active scene, if any.
    pub fn shutdown(&mut self) {
        if let Some(mut scene) = self.active.take() {
            scene.on_delete();
        }
    }

    pub fn process_event(&mut self, event: &InputEvent) -> LoopControl {
        if let InputEvent::Quit = event {
            log::info!("Quit requested");
            self.shutdown();
            return LoopControl::Quit;
        }

        if let Some(scene) = self.active.as_mut() {
            scene.on_process_event(event);
        }
        LoopControl::Continue
    }

    pub fn update(&mut self, delta_time: f64) {
        if let Some(scene) = self.active.as_mut() {
            scene.on_update(delta_time);
        }
    }

    /// Start a new black frame and let the active scene fill it.
    pub fn draw(&self, list: &mut DrawList) {
        list.clear(Color::BLACK);
        if let Some(scene) = self.active.as_ref() {
            scene.on_draw(list);
        }
    }

    /// One frame: dispatch every polled event, then update, then draw.
    ///
    /// A quit event ends the frame immediately; later events, the update
    /// and the draw are skipped and the active scene is torn down.
    pub fn run_frame<I>(&mut self, events: I, delta_time: f64, list: &mut DrawList) -> LoopControl
    where
        I: IntoIterator<Item = InputEvent>,
    {
        for event in events {
            if self.process_event(&event) == LoopControl::Quit {
                return LoopControl::Quit;
            }
        }

        self.update(delta_time);
        self.draw(list);
        LoopControl::Continue
    }
}

impl<E> Drop for SceneManager<E> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

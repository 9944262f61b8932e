//! Whole games played through the public scene API, no window or GPU.

use std::rc::Rc;

use image::RgbaImage;
use tictactoe::app::GameEnv;
use tictactoe::scene_game::board::{CellOwner, GameOutcome, Player};
use tictactoe::scene_game::{SceneGame, Tally};
use tictactoe::theme::Theme;
use tictactoe_ui::{
    Color, DrawCommand, DrawList, GlyphRasterizer, InputEvent, LoopControl, PointerButton,
    Resources, Scene, SceneManager, Widget,
};

struct FixedWidth;

impl GlyphRasterizer for FixedWidth {
    fn rasterize(&self, text: &str, px: f32, _color: Color) -> RgbaImage {
        RgbaImage::new(text.len().max(1) as u32 * 8, px as u32)
    }
}

fn env() -> GameEnv {
    GameEnv {
        resources: Rc::new(Resources::with_rasterizer(FixedWidth)),
        theme: Rc::new(Theme::load().unwrap()),
    }
}

fn click(scene: &mut SceneGame, (x, y): (f32, f32)) {
    let button = PointerButton::Primary;
    scene.on_process_event(&InputEvent::PointerMoved { x, y });
    scene.on_process_event(&InputEvent::PointerDown { x, y, button });
    scene.on_process_event(&InputEvent::PointerUp { x, y, button });
}

fn play(scene: &mut SceneGame, moves: &[(usize, usize)]) {
    for &(row, col) in moves {
        let center = scene.board().item(row, col).control().bounds().center();
        click(scene, center);
    }
}

fn restart(scene: &mut SceneGame) {
    // restart sits centered in the play area, 40 px above the bottom
    click(scene, (420.0, 424.0));
}

#[test]
fn test_three_games_tallied() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut scene = SceneGame::on_new(&env()).unwrap();

    // column win for player two
    play(&mut scene, &[(0, 0), (0, 1), (2, 2), (1, 1), (1, 0), (2, 1)]);
    assert_eq!(scene.board().outcome(), GameOutcome::Win(Player::Two));

    restart(&mut scene);
    assert_eq!(scene.board().turns_played(), 0);

    // X O X / X O O / O X X
    play(
        &mut scene,
        &[(0, 0), (0, 1), (0, 2), (1, 1), (1, 0), (1, 2), (2, 1), (2, 0), (2, 2)],
    );
    assert_eq!(scene.board().outcome(), GameOutcome::Draw);

    restart(&mut scene);
    play(&mut scene, &[(0, 0), (1, 0), (1, 1), (2, 0), (2, 2)]);

    assert_eq!(
        scene.tally(),
        Tally {
            player1_wins: 1,
            player2_wins: 1,
            draws: 1,
        }
    );
    assert_eq!(scene.sidebar().counts(), ["1", "1", "1"]);
}

#[test]
fn test_clicks_after_game_over_change_nothing() {
    let mut scene = SceneGame::on_new(&env()).unwrap();
    play(&mut scene, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
    play(&mut scene, &[(2, 2), (2, 1)]);

    assert_eq!(scene.board().turns_played(), 5);
    assert_eq!(scene.board().item(2, 2).owner(), CellOwner::Unclaimed);
    assert_eq!(scene.tally().player1_wins, 1);
}

#[test]
fn test_claimed_cells_show_player_marks() {
    // player icons are read from images/ next to Cargo.toml
    let mut scene = SceneGame::on_new(&env()).unwrap();
    play(&mut scene, &[(1, 1), (0, 0)]);

    let one = scene.board().item(1, 1).control().icon().unwrap();
    let two = scene.board().item(0, 0).control().icon().unwrap();
    assert_ne!(one.bitmap().unwrap().id(), two.bitmap().unwrap().id());
}

#[test]
fn test_manager_frames_until_quit() {
    let mut scenes = SceneManager::new(env());
    scenes.go_to::<SceneGame>().unwrap();

    let mut list = DrawList::new();
    let frame = scenes.run_frame(Vec::new(), 1.0 / 60.0, &mut list);
    assert_eq!(frame, LoopControl::Continue);
    assert_eq!(list.clear_color(), Color::BLACK);
    // the board background is the first thing drawn
    assert!(matches!(
        list.commands()[0],
        DrawCommand::Fill { color, .. } if color == Color::rgb(80, 160, 160)
    ));

    let frame = scenes.run_frame(vec![InputEvent::Quit], 1.0 / 60.0, &mut list);
    assert_eq!(frame, LoopControl::Quit);
    assert!(!scenes.has_scene());
}

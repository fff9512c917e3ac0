use macroquad::prelude::*;

use snake_canvas::controller::{GameController, GameOver, Tick};
use snake_canvas::game::{Direction, Grid, WallMode};
use snake_canvas::logging;
use snake_canvas::render::{ScreenSurface, Surface};
use snake_canvas::score_store::ScoreStore;
use snake_canvas::settings::{
    CELL_SIZE, GameSettings, SURFACE_HEIGHT, SURFACE_WIDTH, SnakeColor, SpeedPreset,
};

// Layout in logical pixels: the 400x400 board, a HUD row, then touch controls.
const BOARD_W: f32 = SURFACE_WIDTH as f32;
const BOARD_H: f32 = SURFACE_HEIGHT as f32;
const HUD_H: f32 = 30.0;
const PAD_H: f32 = 120.0;
const LAYOUT_W: f32 = BOARD_W;
const LAYOUT_H: f32 = BOARD_H + HUD_H + PAD_H;
const BUTTON: f32 = 36.0;

const TEXT_MAIN: Color = Color::new(0.9, 0.95, 0.9, 1.0);
const TEXT_DIM: Color = Color::new(0.55, 0.6, 0.55, 1.0);
const HIGHLIGHT: Color = Color::new(0.64, 1.0, 0.64, 1.0);
const BUTTON_FILL: Color = Color::new(0.15, 0.2, 0.15, 1.0);

#[cfg(not(target_arch = "wasm32"))]
type Store = snake_canvas::score_store::JsonFileStore;
#[cfg(target_arch = "wasm32")]
type Store = snake_canvas::score_store::MemoryStore;

/// Fitting of the logical layout into the current window.
#[derive(Copy, Clone)]
struct Viewport {
    scale: f32,
    origin: Vec2,
}

impl Viewport {
    fn current() -> Self {
        let (sw, sh) = (screen_width(), screen_height());
        let scale = (sw / LAYOUT_W).min(sh / LAYOUT_H);
        let origin = vec2((sw - LAYOUT_W * scale) * 0.5, (sh - LAYOUT_H * scale) * 0.5);
        Self { scale, origin }
    }

    fn board(&self) -> ScreenSurface {
        ScreenSurface::new(BOARD_W, BOARD_H, self.scale, (self.origin.x, self.origin.y))
    }

    fn to_screen(&self, rect: Rect) -> Rect {
        Rect::new(
            self.origin.x + rect.x * self.scale,
            self.origin.y + rect.y * self.scale,
            rect.w * self.scale,
            rect.h * self.scale,
        )
    }

    fn to_logical(&self, p: Vec2) -> Vec2 {
        (p - self.origin) / self.scale
    }

    fn text_centered(&self, text: &str, y: f32, size: f32, color: Color) {
        let font_size = (size * self.scale).max(8.0);
        let m = measure_text(text, None, font_size as u16, 1.0);
        let x = self.origin.x + (LAYOUT_W * self.scale - m.width) * 0.5;
        draw_text(text, x, self.origin.y + y * self.scale, font_size, color);
    }

    fn text_at(&self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        draw_text(
            text,
            self.origin.x + x * self.scale,
            self.origin.y + y * self.scale,
            (size * self.scale).max(8.0),
            color,
        );
    }
}

/// On-screen direction pad, in logical pixels below the HUD.
fn pad_buttons() -> [(Direction, Rect); 4] {
    let cx = LAYOUT_W * 0.5;
    let top = BOARD_H + HUD_H + 4.0;
    [
        (Direction::Up, Rect::new(cx - BUTTON * 0.5, top, BUTTON, BUTTON)),
        (Direction::Left, Rect::new(cx - BUTTON * 1.6, top + BUTTON + 2.0, BUTTON, BUTTON)),
        (Direction::Right, Rect::new(cx + BUTTON * 0.6, top + BUTTON + 2.0, BUTTON, BUTTON)),
        (Direction::Down, Rect::new(cx - BUTTON * 0.5, top + 2.0 * (BUTTON + 2.0), BUTTON, BUTTON)),
    ]
}

fn draw_pad(view: &Viewport) {
    for (direction, rect) in pad_buttons() {
        let r = view.to_screen(rect);
        draw_rectangle(r.x, r.y, r.w, r.h, BUTTON_FILL);
        draw_rectangle_lines(r.x, r.y, r.w, r.h, 2.0, TEXT_DIM);
        let glyph = match direction {
            Direction::Up => "^",
            Direction::Down => "v",
            Direction::Left => "<",
            Direction::Right => ">",
            Direction::Idle => "",
        };
        view.text_at(glyph, rect.x + BUTTON * 0.38, rect.y + BUTTON * 0.65, 22.0, TEXT_MAIN);
    }
}

/// Keyboard or touch/click on the pad, whichever happened this frame.
fn read_direction(view: &Viewport) -> Option<Direction> {
    if is_key_pressed(KeyCode::Up) || is_key_pressed(KeyCode::W) {
        return Some(Direction::Up);
    }
    if is_key_pressed(KeyCode::Down) || is_key_pressed(KeyCode::S) {
        return Some(Direction::Down);
    }
    if is_key_pressed(KeyCode::Left) || is_key_pressed(KeyCode::A) {
        return Some(Direction::Left);
    }
    if is_key_pressed(KeyCode::Right) || is_key_pressed(KeyCode::D) {
        return Some(Direction::Right);
    }
    if is_mouse_button_pressed(MouseButton::Left) {
        let p = view.to_logical(Vec2::from(mouse_position()));
        return pad_buttons().into_iter().find(|(_, r)| r.contains(p)).map(|(d, _)| d);
    }
    None
}

fn draw_hud<S: ScoreStore>(view: &Viewport, game: &GameController<S>) {
    let y = BOARD_H + HUD_H * 0.7;
    view.text_at(&format!("Score: {}", game.score()), 8.0, y, 20.0, TEXT_MAIN);
    view.text_at(&format!("High score: {}", game.high_score()), LAYOUT_W * 0.5, y, 20.0, TEXT_MAIN);
}

struct ConfigState {
    selected: usize,
    color: usize,
    wall_mode: WallMode,
    speed: usize,
    auto_speed: bool,
}

const CONFIG_ITEMS: usize = 5;

impl ConfigState {
    fn new(last: &GameSettings) -> Self {
        let color = SnakeColor::ALL.iter().position(|c| *c == last.snake_color).unwrap_or(0);
        let speed = SpeedPreset::ALL
            .iter()
            .position(|p| p.interval_ms() == last.tick_interval_ms)
            .unwrap_or(2);
        Self { selected: 0, color, wall_mode: last.wall_mode, speed, auto_speed: last.auto_speed }
    }

    /// Settings as the form would submit them: labels, parsed back.
    fn settings(&self) -> GameSettings {
        GameSettings::from_labels(
            SnakeColor::ALL[self.color].label(),
            self.wall_mode.label(),
            SpeedPreset::ALL[self.speed].label(),
            self.auto_speed,
        )
    }

    fn cycle(&mut self, forward: bool) {
        let step = |i: usize, n: usize| if forward { (i + 1) % n } else { (i + n - 1) % n };
        match self.selected {
            0 => self.color = step(self.color, SnakeColor::ALL.len()),
            1 => {
                self.wall_mode = match self.wall_mode {
                    WallMode::Deadly => WallMode::Wrap,
                    WallMode::Wrap => WallMode::Deadly,
                }
            }
            2 => self.speed = step(self.speed, SpeedPreset::ALL.len()),
            3 => self.auto_speed = !self.auto_speed,
            _ => {}
        }
    }

    fn lines(&self) -> [String; CONFIG_ITEMS] {
        [
            format!("Color: {}", SnakeColor::ALL[self.color].label()),
            format!("Walls: {}", self.wall_mode.label()),
            format!("Speed: {}", SpeedPreset::ALL[self.speed]),
            format!("Auto-speed: {}", if self.auto_speed { "on" } else { "off" }),
            "Play".to_string(),
        ]
    }
}

enum Screen {
    Start,
    Config(ConfigState),
    Playing,
    GameOver(GameOver),
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Snake".to_owned(),
        window_width: LAYOUT_W as i32,
        window_height: LAYOUT_H as i32,
        high_dpi: true,
        ..Default::default()
    }
}

fn now_ms() -> f64 {
    get_time() * 1000.0
}

#[macroquad::main(window_conf)]
async fn main() {
    logging::init();
    macroquad::rand::srand((macroquad::miniquad::date::now() * 1_000_000.0) as u64);

    let grid = Grid::from_surface(SURFACE_WIDTH, SURFACE_HEIGHT, CELL_SIZE);
    let mut game = GameController::new(grid, Store::default());
    let mut last_settings = GameSettings::default();
    let mut screen = Screen::Start;

    loop {
        clear_background(BLACK);
        let view = Viewport::current();
        let mut next_screen: Option<Screen> = None;

        match &mut screen {
            Screen::Start => {
                view.text_centered("SNAKE", 140.0, 48.0, HIGHLIGHT);
                view.text_centered("Enter / click: Start", 220.0, 22.0, TEXT_MAIN);
                view.text_centered("Q: Quit", 250.0, 20.0, TEXT_DIM);
                view.text_centered(&format!("High score: {}", game.high_score()), 330.0, 22.0, TEXT_MAIN);

                if is_key_pressed(KeyCode::Q) {
                    break;
                }
                if is_key_pressed(KeyCode::Enter) || is_mouse_button_pressed(MouseButton::Left) {
                    next_screen = Some(Screen::Config(ConfigState::new(&last_settings)));
                }
            }

            Screen::Config(config) => {
                view.text_centered("SETTINGS", 90.0, 36.0, HIGHLIGHT);
                for (i, line) in config.lines().iter().enumerate() {
                    let color = if config.selected == i { HIGHLIGHT } else { TEXT_DIM };
                    view.text_centered(line, 160.0 + i as f32 * 34.0, 22.0, color);
                }
                view.text_centered("Up/Down: select  Left/Right: change", 380.0, 16.0, TEXT_DIM);
                view.text_centered("Enter: play  Esc: back", 402.0, 16.0, TEXT_DIM);

                if is_key_pressed(KeyCode::Up) {
                    config.selected = (config.selected + CONFIG_ITEMS - 1) % CONFIG_ITEMS;
                }
                if is_key_pressed(KeyCode::Down) {
                    config.selected = (config.selected + 1) % CONFIG_ITEMS;
                }
                if is_key_pressed(KeyCode::Left) {
                    config.cycle(false);
                }
                if is_key_pressed(KeyCode::Right) {
                    config.cycle(true);
                }
                if is_key_pressed(KeyCode::Escape) {
                    next_screen = Some(Screen::Start);
                }
                if is_key_pressed(KeyCode::Enter) {
                    let settings = config.settings();
                    match game.start(settings, now_ms()) {
                        Ok(()) => {
                            last_settings = settings;
                            next_screen = Some(Screen::Playing);
                        }
                        Err(err) => {
                            tracing::warn!(%err, "could not start game");
                            next_screen = Some(Screen::Start);
                        }
                    }
                }
            }

            Screen::Playing => {
                if let Some(direction) = read_direction(&view) {
                    let (dx, dy) = direction.delta();
                    game.request_direction(dx, dy);
                }

                let mut board = view.board();
                match game.update(now_ms(), &mut board) {
                    Tick::Waiting => game.redraw(&mut board),
                    Tick::Stepped => {}
                    Tick::Ended(over) => next_screen = Some(Screen::GameOver(over)),
                }
                draw_board_frame(&board);
                draw_hud(&view, &game);
                draw_pad(&view);

                if is_key_pressed(KeyCode::Escape) {
                    game.stop();
                    next_screen = Some(Screen::Start);
                }
            }

            Screen::GameOver(over) => {
                let mut board = view.board();
                game.redraw(&mut board);
                draw_board_frame(&board);
                draw_hud(&view, &game);

                let r = board.bounds();
                draw_rectangle(r.x, r.y, r.w, r.h, Color::new(0.0, 0.0, 0.0, 0.55));
                view.text_centered(&over.message(), 170.0, 28.0, HIGHLIGHT);
                view.text_centered(&format!("High score: {}", over.high_score), 210.0, 22.0, TEXT_MAIN);
                view.text_centered("Enter / click: back to menu", 260.0, 18.0, TEXT_DIM);

                if is_key_pressed(KeyCode::Enter) || is_mouse_button_pressed(MouseButton::Left) {
                    game.stop();
                    next_screen = Some(Screen::Start);
                }
            }
        }

        if let Some(ns) = next_screen {
            screen = ns;
        }

        next_frame().await;
    }

    game.stop();
}

fn draw_board_frame(board: &ScreenSurface) {
    let r = board.bounds();
    let (w, _) = board.size();
    let line = (r.w / w).max(1.0);
    draw_rectangle_lines(r.x, r.y, r.w, r.h, line, TEXT_DIM);
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for the Nightmare Maze.
//!
//! The game is silent, so macroquad is pulled in without its default `audio`
//! feature and the crate builds on hosts lacking ALSA headers.
//!
//! The backend draws only what the fog-of-war lets the player see: hidden
//! tiles stay black, remembered tiles are dimmed, and monsters appear only on
//! lit tiles.

use anyhow::Result;
use glam::Vec2;
use macroquad::input::{is_key_down, is_key_pressed, KeyCode};
use nightmare_maze_core::{CellCoord, Direction};
use nightmare_maze_rendering::{
    Color, FrameInput, Presentation, RenderingBackend, Scene, TileVisual,
};
use std::time::{Duration, Instant};

const WALL_COLOR: Color = Color::from_rgb_u8(0x2b, 0x2d, 0x42);
const FLOOR_COLOR: Color = Color::from_rgb_u8(0xed, 0xf2, 0xf4);
const PLAYER_COLOR: Color = Color::from_rgb_u8(0xff, 0x00, 0x00);
const BULLET_COLOR: Color = Color::from_rgb_u8(0xff, 0x00, 0x00);
const ENEMY_COLOR: Color = Color::from_rgb_u8(0x7b, 0x2c, 0xbf);
const EXIT_COLOR: Color = Color::from_rgb_u8(0x2f, 0x95, 0x32);
const BANNER_BACKDROP: Color = Color::new(0.0, 0.0, 0.0, 0.7);
const REMEMBERED_DIMMING: f32 = 0.55;
const BANNER_FONT_SIZE: f32 = 26.0;

/// Keys sampled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the game loop.
    quit_requested: bool,
    /// `R` starts a new round once the current one is decided.
    restart: bool,
    /// `W`, `A`, `S` or `D` fires in the matching direction.
    shoot: Option<Direction>,
    /// Arrow key currently held down.
    movement: Option<Direction>,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        let quit_requested = is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q);
        let restart = is_key_pressed(KeyCode::R);
        let shoot = first_direction([
            (is_key_pressed(KeyCode::W), Direction::North),
            (is_key_pressed(KeyCode::S), Direction::South),
            (is_key_pressed(KeyCode::A), Direction::West),
            (is_key_pressed(KeyCode::D), Direction::East),
        ]);
        let movement = first_direction([
            (is_key_down(KeyCode::Up), Direction::North),
            (is_key_down(KeyCode::Down), Direction::South),
            (is_key_down(KeyCode::Left), Direction::West),
            (is_key_down(KeyCode::Right), Direction::East),
        ]);

        Self {
            quit_requested,
            restart,
            shoot,
            movement,
        }
    }

    fn frame_input(self) -> FrameInput {
        FrameInput {
            movement: self.movement,
            shoot: self.shoot,
            restart: self.restart,
        }
    }
}

fn first_direction(candidates: [(bool, Direction); 4]) -> Option<Direction> {
    candidates
        .into_iter()
        .find_map(|(active, direction)| active.then_some(direction))
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    simulation_accum: Duration,
    render_accum: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct FpsMetrics {
    per_second: f32,
    avg_simulation: Duration,
    avg_render: Duration,
}

impl FpsCounter {
    /// Records a rendered frame and returns averages once one second has elapsed.
    fn record_frame(
        &mut self,
        frame: Duration,
        simulation: Duration,
        render: Duration,
    ) -> Option<FpsMetrics> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);
        self.simulation_accum += simulation;
        self.render_accum += render;

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let frames = self.frames.max(1);
        let metrics = FpsMetrics {
            per_second: self.frames as f32 / seconds,
            avg_simulation: self.simulation_accum / frames,
            avg_render: self.render_accum / frames,
        };
        *self = Self::default();
        Some(metrics)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: scene.tile_grid.width().round() as i32,
            window_height: scene.tile_grid.viewport_height().round() as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }

                macroquad::window::clear_background(background);

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));

                let simulation_start = Instant::now();
                update_scene(frame_dt, keyboard.frame_input(), &mut scene);
                let simulation = simulation_start.elapsed();

                let metrics = SceneMetrics::from_scene(
                    &scene,
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );

                let render_start = Instant::now();
                draw_tiles(&scene, &metrics);
                draw_exit(&scene, &metrics);
                draw_enemies(&scene, &metrics);
                draw_player(&scene, &metrics);
                draw_bullets(&scene, &metrics);
                draw_banner(&scene, &metrics);
                let render = render_start.elapsed();

                if let Some(FpsMetrics {
                    per_second,
                    avg_simulation,
                    avg_render,
                }) = fps_counter.record_frame(frame_dt, simulation, render)
                {
                    if show_fps {
                        log::info!(
                            "FPS: {:.2} | sim: {:>6.2}ms render: {:>6.2}ms",
                            per_second,
                            avg_simulation.as_secs_f64() * 1_000.0,
                            avg_render.as_secs_f64() * 1_000.0,
                        );
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct SceneMetrics {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
    tile_step: f32,
    screen_width: f32,
    screen_height: f32,
}

impl SceneMetrics {
    fn from_scene(scene: &Scene, screen_width: f32, screen_height: f32) -> Self {
        let tile_grid = scene.tile_grid;
        let world_width = tile_grid.width();
        let world_height = tile_grid.viewport_height();
        let scale = if world_width <= f32::EPSILON || world_height <= f32::EPSILON {
            1.0
        } else {
            (screen_width / world_width).min(screen_height / world_height)
        };

        let offset_x = ((screen_width - world_width * scale) * 0.5).max(0.0);
        let offset_y = ((screen_height - world_height * scale) * 0.5).max(0.0);

        Self {
            scale,
            offset_x,
            offset_y,
            tile_step: tile_grid.tile_length * scale,
            screen_width,
            screen_height,
        }
    }

    /// Top-left screen corner of a cell, or `None` when the cell is off screen.
    fn cell_origin(&self, scene: &Scene, cell: CellCoord) -> Option<Vec2> {
        if !scene.viewport.shows_row(cell.row()) {
            return None;
        }

        let screen_row = cell.row() - scene.viewport.first_row();
        Some(Vec2::new(
            self.offset_x + cell.column() as f32 * self.tile_step,
            self.offset_y + screen_row as f32 * self.tile_step,
        ))
    }

    /// Converts a world-space point into screen space.
    fn world_to_screen(&self, scene: &Scene, point: Vec2) -> Vec2 {
        let local = scene.viewport.to_screen(point, scene.tile_grid.tile_length);
        Vec2::new(
            self.offset_x + local.x * self.scale,
            self.offset_y + local.y * self.scale,
        )
    }
}

fn tile_color(visual: TileVisual) -> Option<Color> {
    match visual {
        TileVisual::Hidden => None,
        TileVisual::Wall { lit: true } => Some(WALL_COLOR),
        TileVisual::Wall { lit: false } => Some(WALL_COLOR.darken(REMEMBERED_DIMMING)),
        TileVisual::Floor { lit: true } => Some(FLOOR_COLOR),
        TileVisual::Floor { lit: false } => Some(FLOOR_COLOR.darken(REMEMBERED_DIMMING)),
    }
}

fn draw_tiles(scene: &Scene, metrics: &SceneMetrics) {
    let line_color = to_macroquad_color(scene.tile_grid.line_color);
    let first_row = scene.viewport.first_row();
    let last_row = (first_row + scene.viewport.rows()).min(scene.tile_grid.rows);

    for row in first_row..last_row {
        for column in 0..scene.tile_grid.columns {
            let cell = CellCoord::new(column, row);
            let Some(color) = tile_color(scene.tile(cell)) else {
                continue;
            };
            let Some(origin) = metrics.cell_origin(scene, cell) else {
                continue;
            };

            macroquad::shapes::draw_rectangle(
                origin.x,
                origin.y,
                metrics.tile_step,
                metrics.tile_step,
                to_macroquad_color(color),
            );
            macroquad::shapes::draw_rectangle_lines(
                origin.x,
                origin.y,
                metrics.tile_step,
                metrics.tile_step,
                1.0,
                line_color,
            );
        }
    }
}

fn draw_exit(scene: &Scene, metrics: &SceneMetrics) {
    let Some(exit) = scene.exit else {
        return;
    };
    if let Some(origin) = metrics.cell_origin(scene, exit) {
        macroquad::shapes::draw_rectangle(
            origin.x,
            origin.y,
            metrics.tile_step,
            metrics.tile_step,
            to_macroquad_color(EXIT_COLOR),
        );
    }
}

fn draw_enemies(scene: &Scene, metrics: &SceneMetrics) {
    let color = to_macroquad_color(ENEMY_COLOR);
    let radius = metrics.tile_step * 0.4;
    for enemy in &scene.enemies {
        if let Some(origin) = metrics.cell_origin(scene, *enemy) {
            let half = metrics.tile_step * 0.5;
            macroquad::shapes::draw_circle(origin.x + half, origin.y + half, radius, color);
        }
    }
}

fn draw_player(scene: &Scene, metrics: &SceneMetrics) {
    if let Some(origin) = metrics.cell_origin(scene, scene.player) {
        macroquad::shapes::draw_rectangle(
            origin.x,
            origin.y,
            metrics.tile_step,
            metrics.tile_step,
            to_macroquad_color(PLAYER_COLOR),
        );
    }
}

fn draw_bullets(scene: &Scene, metrics: &SceneMetrics) {
    let color = to_macroquad_color(BULLET_COLOR);
    let radius = (metrics.tile_step * 0.125).max(2.0);
    for bullet in &scene.bullets {
        let position = metrics.world_to_screen(scene, *bullet);
        macroquad::shapes::draw_circle(position.x, position.y, radius, color);
    }
}

fn draw_banner(scene: &Scene, metrics: &SceneMetrics) {
    let text = scene.outcome.banner().or(scene.banner.as_deref());
    let Some(text) = text else {
        return;
    };

    let strip_height = BANNER_FONT_SIZE * 2.0;
    let strip_top = (metrics.screen_height - strip_height) * 0.5;
    macroquad::shapes::draw_rectangle(
        0.0,
        strip_top,
        metrics.screen_width,
        strip_height,
        to_macroquad_color(BANNER_BACKDROP),
    );

    let dimensions = macroquad::text::measure_text(text, None, BANNER_FONT_SIZE as u16, 1.0);
    let x = ((metrics.screen_width - dimensions.width) * 0.5).max(0.0);
    let y = strip_top + (strip_height + dimensions.height) * 0.5;
    let _ = macroquad::text::draw_text(
        text,
        x,
        y,
        BANNER_FONT_SIZE,
        macroquad::color::WHITE,
    );
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

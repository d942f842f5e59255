use crate::input::{BoardLayout, RESET_BUTTON_HEIGHT, RESET_BUTTON_WIDTH};
use macroquad::prelude::*;
use shared::{GameState, Mark, BOARD_SIZE, BOARD_WIDTH};

const BACKGROUND: Color = Color::new(0.10, 0.10, 0.10, 1.0);
const GRID: Color = Color::new(0.27, 0.27, 0.27, 1.0);
const X_COLOR: Color = Color::new(1.0, 0.27, 0.27, 1.0);
const O_COLOR: Color = Color::new(0.27, 0.67, 1.0, 1.0);
const HOVER: Color = Color::new(1.0, 1.0, 1.0, 0.06);

#[derive(Debug, Clone)]
pub struct RenderConfig<'a> {
    pub view: &'a GameState,
    pub status: &'a str,
    pub hovered: Option<usize>,
    pub connected: bool,
    pub server_updates: u32,
}

pub struct Renderer {
    width: f32,
}

impl Renderer {
    pub fn new(width: f32) -> Self {
        Renderer { width }
    }

    pub fn render(&mut self, layout: &BoardLayout, config: RenderConfig) {
        self.width = screen_width();
        clear_background(BACKGROUND);

        self.draw_centered("Noughts and Crosses", layout.origin_y - 20.0, 32.0, WHITE);

        if let Some(index) = config.hovered {
            if config.view.is_valid_move(index) {
                let (x, y) = layout.cell_origin(index);
                draw_rectangle(x, y, layout.cell_size(), layout.cell_size(), HOVER);
            }
        }

        self.draw_grid(layout);

        for index in 0..BOARD_SIZE {
            if let Some(mark) = config.view.board[index] {
                self.draw_mark(layout, index, mark);
            }
        }

        let status_color = if config.view.game_over { YELLOW } else { WHITE };
        self.draw_centered(
            config.status,
            layout.origin_y + layout.board_size + 40.0,
            28.0,
            status_color,
        );

        self.draw_reset_button(layout);
        self.draw_connection(config.connected, config.server_updates);
    }

    fn draw_centered(&self, text: &str, y: f32, font_size: f32, color: Color) {
        let dimensions = measure_text(text, None, font_size as u16, 1.0);
        draw_text(text, (self.width - dimensions.width) / 2.0, y, font_size, color);
    }

    fn draw_grid(&self, layout: &BoardLayout) {
        let cell = layout.cell_size();
        let end_x = layout.origin_x + layout.board_size;
        let end_y = layout.origin_y + layout.board_size;

        for i in 1..BOARD_WIDTH {
            let offset = i as f32 * cell;
            draw_line(
                layout.origin_x + offset,
                layout.origin_y,
                layout.origin_x + offset,
                end_y,
                4.0,
                GRID,
            );
            draw_line(
                layout.origin_x,
                layout.origin_y + offset,
                end_x,
                layout.origin_y + offset,
                4.0,
                GRID,
            );
        }
    }

    fn draw_mark(&self, layout: &BoardLayout, index: usize, mark: Mark) {
        let (cx, cy) = layout.cell_center(index);
        let reach = layout.cell_size() * 0.3;
        let thickness = (layout.cell_size() * 0.06).max(2.0);

        match mark {
            Mark::X => {
                draw_line(cx - reach, cy - reach, cx + reach, cy + reach, thickness, X_COLOR);
                draw_line(cx + reach, cy - reach, cx - reach, cy + reach, thickness, X_COLOR);
            }
            Mark::O => draw_circle_lines(cx, cy, reach, thickness, O_COLOR),
        }
    }

    fn draw_reset_button(&self, layout: &BoardLayout) {
        let (x, y) = (layout.reset_x, layout.reset_y);
        let (mx, my) = mouse_position();
        let fill = if layout.is_on_reset_button(mx, my) {
            Color::from_rgba(85, 85, 85, 255)
        } else {
            Color::from_rgba(51, 51, 51, 255)
        };

        draw_rectangle(x, y, RESET_BUTTON_WIDTH, RESET_BUTTON_HEIGHT, fill);
        draw_rectangle_lines(x, y, RESET_BUTTON_WIDTH, RESET_BUTTON_HEIGHT, 1.0, WHITE);

        let label = "Reset Game";
        let dimensions = measure_text(label, None, 20, 1.0);
        draw_text(
            label,
            x + (RESET_BUTTON_WIDTH - dimensions.width) / 2.0,
            y + RESET_BUTTON_HEIGHT / 2.0 + dimensions.height / 2.0,
            20.0,
            WHITE,
        );
    }

    fn draw_connection(&self, connected: bool, server_updates: u32) {
        let color = if connected { GREEN } else { RED };
        draw_rectangle(10.0, 10.0, 8.0, 8.0, color);
        draw_text("CON", 20.0, 18.0, 12.0, WHITE);

        let updates = format!("{} updates", server_updates);
        draw_text(&updates, 50.0, 18.0, 12.0, GRAY);
    }
}

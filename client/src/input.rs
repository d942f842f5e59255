//! Client input handling: board hit-testing and click/key edge detection

use macroquad::prelude::*;
use shared::{Intent, BOARD_SIZE, BOARD_WIDTH};

const MARGIN: f32 = 40.0;
const TITLE_HEIGHT: f32 = 50.0;
const STATUS_HEIGHT: f32 = 120.0;
const MIN_BOARD_SIZE: f32 = 90.0;

pub const RESET_BUTTON_WIDTH: f32 = 160.0;
pub const RESET_BUTTON_HEIGHT: f32 = 40.0;

/// Screen geometry of the board and the reset button for a given window size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardLayout {
    pub origin_x: f32,
    pub origin_y: f32,
    pub board_size: f32,
    pub reset_x: f32,
    pub reset_y: f32,
}

impl BoardLayout {
    pub fn new(width: f32, height: f32) -> Self {
        let board_size = (width - 2.0 * MARGIN)
            .min(height - TITLE_HEIGHT - STATUS_HEIGHT - MARGIN)
            .max(MIN_BOARD_SIZE);

        let origin_x = (width - board_size) / 2.0;
        let origin_y = MARGIN + TITLE_HEIGHT / 2.0;

        Self {
            origin_x,
            origin_y,
            board_size,
            reset_x: (width - RESET_BUTTON_WIDTH) / 2.0,
            reset_y: origin_y + board_size + STATUS_HEIGHT - RESET_BUTTON_HEIGHT - 10.0,
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.board_size / BOARD_WIDTH as f32
    }

    /// Top-left corner of a cell
    pub fn cell_origin(&self, index: usize) -> (f32, f32) {
        let row = index / BOARD_WIDTH;
        let col = index % BOARD_WIDTH;
        (
            self.origin_x + col as f32 * self.cell_size(),
            self.origin_y + row as f32 * self.cell_size(),
        )
    }

    pub fn cell_center(&self, index: usize) -> (f32, f32) {
        let (x, y) = self.cell_origin(index);
        let half = self.cell_size() / 2.0;
        (x + half, y + half)
    }

    /// Row-major index of the cell under a screen point
    pub fn cell_at(&self, x: f32, y: f32) -> Option<usize> {
        if x < self.origin_x || y < self.origin_y {
            return None;
        }

        let col = ((x - self.origin_x) / self.cell_size()) as usize;
        let row = ((y - self.origin_y) / self.cell_size()) as usize;

        if col >= BOARD_WIDTH || row >= BOARD_WIDTH {
            return None;
        }

        let index = row * BOARD_WIDTH + col;
        (index < BOARD_SIZE).then_some(index)
    }

    pub fn is_on_reset_button(&self, x: f32, y: f32) -> bool {
        x >= self.reset_x
            && x <= self.reset_x + RESET_BUTTON_WIDTH
            && y >= self.reset_y
            && y <= self.reset_y + RESET_BUTTON_HEIGHT
    }

    /// Turns a click position into the intent it expresses, if any
    pub fn resolve_click(&self, x: f32, y: f32) -> Option<Intent> {
        if self.is_on_reset_button(x, y) {
            return Some(Intent::Reset);
        }
        self.cell_at(x, y).map(|index| Intent::Move { index })
    }
}

/// Samples mouse and keyboard once per frame and reports new intents
pub struct InputManager {
    // Previous frame states for edge detection
    prev_mouse_down: bool,
    prev_key_r: bool,
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            prev_mouse_down: false,
            prev_key_r: false,
        }
    }

    /// Returns an intent when a click or the R key was pressed this frame
    pub fn update(&mut self, layout: &BoardLayout) -> Option<Intent> {
        let mouse_down = is_mouse_button_down(MouseButton::Left);
        let key_r = is_key_down(KeyCode::R);

        let clicked = mouse_down && !self.prev_mouse_down;
        let reset_pressed = key_r && !self.prev_key_r;

        self.prev_mouse_down = mouse_down;
        self.prev_key_r = key_r;

        if reset_pressed {
            return Some(Intent::Reset);
        }

        if clicked {
            let (x, y) = mouse_position();
            return layout.resolve_click(x, y);
        }

        None
    }

    /// Cell under the cursor, for hover highlighting
    pub fn hovered_cell(&self, layout: &BoardLayout) -> Option<usize> {
        let (x, y) = mouse_position();
        layout.cell_at(x, y)
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn layout() -> BoardLayout {
        BoardLayout::new(600.0, 700.0)
    }

    #[test]
    fn test_layout_is_centered_and_square() {
        let layout = layout();
        assert_approx_eq!(layout.board_size, 490.0, 0.001);
        assert_approx_eq!(layout.origin_x, 55.0, 0.001);
        assert_approx_eq!(layout.origin_y, 65.0, 0.001);
        assert_approx_eq!(layout.cell_size() * 3.0, layout.board_size, 0.001);
        assert_approx_eq!(layout.reset_x + RESET_BUTTON_WIDTH / 2.0, 300.0, 0.001);
    }

    #[test]
    fn test_layout_limited_by_height() {
        let layout = BoardLayout::new(1200.0, 500.0);
        assert_approx_eq!(layout.board_size, 500.0 - 50.0 - 120.0 - 40.0, 0.001);
        assert_approx_eq!(layout.origin_x, (1200.0 - layout.board_size) / 2.0, 0.001);
    }

    #[test]
    fn test_tiny_window_keeps_minimum_board() {
        let layout = BoardLayout::new(50.0, 50.0);
        assert_approx_eq!(layout.board_size, 90.0, 0.001);
        assert_approx_eq!(layout.cell_size(), 30.0, 0.001);
    }

    #[test]
    fn test_cell_centers_map_back_to_their_index() {
        let layout = layout();
        for index in 0..BOARD_SIZE {
            let (x, y) = layout.cell_center(index);
            assert_eq!(layout.cell_at(x, y), Some(index));
        }
    }

    #[test]
    fn test_cell_origin_positions() {
        let layout = layout();
        let (x, y) = layout.cell_origin(5);
        assert_approx_eq!(x, layout.origin_x + 2.0 * layout.cell_size(), 0.001);
        assert_approx_eq!(y, layout.origin_y + layout.cell_size(), 0.001);
    }

    #[test]
    fn test_points_outside_board() {
        let layout = layout();
        let end = layout.origin_x + layout.board_size;
        assert_eq!(
            layout.cell_at(layout.origin_x - 1.0, layout.origin_y + 10.0),
            None
        );
        assert_eq!(
            layout.cell_at(layout.origin_x + 10.0, layout.origin_y - 1.0),
            None
        );
        assert_eq!(layout.cell_at(end + 1.0, layout.origin_y + 10.0), None);
        assert_eq!(
            layout.cell_at(layout.origin_x + 10.0, layout.origin_y + layout.board_size + 1.0),
            None
        );
    }

    #[test]
    fn test_resolve_click() {
        let layout = layout();
        let (x, y) = layout.cell_center(7);
        assert_eq!(layout.resolve_click(x, y), Some(Intent::Move { index: 7 }));

        let reset = layout.resolve_click(
            layout.reset_x + RESET_BUTTON_WIDTH / 2.0,
            layout.reset_y + RESET_BUTTON_HEIGHT / 2.0,
        );
        assert_eq!(reset, Some(Intent::Reset));

        assert_eq!(layout.resolve_click(1.0, 1.0), None);
    }

    #[test]
    fn test_reset_button_below_board() {
        let layout = layout();
        assert!(layout.reset_y > layout.origin_y + layout.board_size);
        assert!(!layout.is_on_reset_button(layout.origin_x, layout.origin_y));
    }

    #[test]
    fn test_input_manager_creation() {
        let input_manager = InputManager::new();
        assert!(!input_manager.prev_mouse_down);
        assert!(!input_manager.prev_key_r);
    }
}

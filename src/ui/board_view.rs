//! Board rendering for the Gomoku GUI

use egui::{Color32, CornerRadius, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use crate::board::{Pos, Stone};

use super::theme::*;

/// Board view handles rendering and input for the game board
pub struct BoardView {
    /// Cached cell size for coordinate calculations
    cell_size: f32,
    /// Board drawing area
    board_rect: Rect,
    /// Lines per side of the board last drawn
    size: usize,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 30.0,
            board_rect: Rect::NOTHING,
            size: 0,
        }
    }
}

impl BoardView {
    /// Render the board and return click position if any.
    ///
    /// `grid` is row-major. Clicks are only reported on empty cells and only
    /// when `interactive` is set.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        grid: &[Vec<Stone>],
        turn: Stone,
        last_move: Option<Pos>,
        winning_line: Option<&[Pos]>,
        interactive: bool,
    ) -> Option<Pos> {
        self.size = grid.len();
        let available_size = ui.available_size();

        // Calculate board size to fit available space
        let board_size = available_size.x.min(available_size.y) - 20.0;
        let spans = self.size.saturating_sub(1).max(1) as f32;
        self.cell_size = (board_size - 2.0 * BOARD_MARGIN) / spans;

        let (response, painter) =
            ui.allocate_painter(Vec2::new(board_size, board_size), Sense::click());

        self.board_rect = response.rect;

        painter.rect_filled(self.board_rect, CornerRadius::same(4), BOARD_BG);
        self.draw_grid(&painter);
        self.draw_star_points(&painter);
        self.draw_coordinates(&painter);
        self.draw_stones(&painter, grid);

        if let Some(pos) = last_move {
            self.draw_last_move_marker(&painter, pos);
        }
        if let Some(line) = winning_line {
            self.draw_winning_line(&painter, line);
        }

        // Handle hover preview and click
        let mut clicked_pos = None;

        if interactive {
            if let Some(board_pos) = response.hover_pos().and_then(|p| self.screen_to_board(p)) {
                let is_valid = grid[board_pos.row][board_pos.col] == Stone::Empty;
                self.draw_hover_preview(&painter, board_pos, turn, is_valid);

                if response.clicked() && is_valid {
                    clicked_pos = Some(board_pos);
                }
            }
        }

        clicked_pos
    }

    fn draw_grid(&self, painter: &Painter) {
        let stroke = Stroke::new(GRID_LINE_WIDTH, GRID_LINE);
        let length = self.size.saturating_sub(1) as f32 * self.cell_size;

        for i in 0..self.size {
            let offset = BOARD_MARGIN + i as f32 * self.cell_size;

            // Vertical line
            let start = self.board_rect.min + Vec2::new(offset, BOARD_MARGIN);
            let end = self.board_rect.min + Vec2::new(offset, BOARD_MARGIN + length);
            painter.line_segment([start, end], stroke);

            // Horizontal line
            let start = self.board_rect.min + Vec2::new(BOARD_MARGIN, offset);
            let end = self.board_rect.min + Vec2::new(BOARD_MARGIN + length, offset);
            painter.line_segment([start, end], stroke);
        }
    }

    fn draw_star_points(&self, painter: &Painter) {
        for pos in star_points(self.size) {
            let center = self.board_to_screen(pos);
            painter.circle_filled(center, STAR_POINT_RADIUS, STAR_POINT);
        }
    }

    /// 1-based labels, matching the coordinates used by the game protocol
    fn draw_coordinates(&self, painter: &Painter) {
        let font = egui::FontId::proportional(12.0);

        for i in 0..self.size {
            let label = format!("{}", i + 1);
            let offset = BOARD_MARGIN + i as f32 * self.cell_size;

            // Columns, top and bottom
            let x = self.board_rect.min.x + offset;
            for y in [self.board_rect.min.y + 12.0, self.board_rect.max.y - 12.0] {
                painter.text(
                    Pos2::new(x, y),
                    egui::Align2::CENTER_CENTER,
                    &label,
                    font.clone(),
                    GRID_LINE,
                );
            }

            // Rows, left and right
            let y = self.board_rect.min.y + offset;
            for x in [self.board_rect.min.x + 12.0, self.board_rect.max.x - 12.0] {
                painter.text(
                    Pos2::new(x, y),
                    egui::Align2::CENTER_CENTER,
                    &label,
                    font.clone(),
                    GRID_LINE,
                );
            }
        }
    }

    fn draw_stones(&self, painter: &Painter, grid: &[Vec<Stone>]) {
        for (row, cells) in grid.iter().enumerate() {
            for (col, &stone) in cells.iter().enumerate() {
                if stone != Stone::Empty {
                    self.draw_stone(painter, Pos::new(row, col), stone);
                }
            }
        }
    }

    /// Draw a single stone with visual polish
    fn draw_stone(&self, painter: &Painter, pos: Pos, stone: Stone) {
        let center = self.board_to_screen(pos);
        let radius = self.cell_size * STONE_RADIUS_RATIO;
        let shadow_offset = Vec2::new(2.0, 2.0);

        match stone {
            Stone::Black => {
                painter.circle_filled(
                    center + shadow_offset,
                    radius,
                    Color32::from_rgba_unmultiplied(0, 0, 0, 60),
                );
                painter.circle_filled(center, radius, BLACK_STONE);

                // Highlight
                let highlight_offset = Vec2::new(-radius * 0.3, -radius * 0.3);
                painter.circle_filled(
                    center + highlight_offset,
                    radius * 0.2,
                    BLACK_STONE_HIGHLIGHT,
                );
            }
            Stone::White => {
                painter.circle_filled(
                    center + shadow_offset,
                    radius,
                    Color32::from_rgba_unmultiplied(0, 0, 0, 40),
                );
                painter.circle_filled(center, radius, WHITE_STONE);

                // Inner shadow for depth
                painter.circle_stroke(
                    center,
                    radius * 0.85,
                    Stroke::new(radius * 0.1, WHITE_STONE_SHADOW),
                );
            }
            Stone::Empty => {}
        }
    }

    fn draw_last_move_marker(&self, painter: &Painter, pos: Pos) {
        let center = self.board_to_screen(pos);
        painter.circle_filled(center, LAST_MOVE_MARKER_RADIUS, LAST_MOVE_MARKER);
    }

    fn draw_winning_line(&self, painter: &Painter, line: &[Pos]) {
        let stroke = Stroke::new(4.0, WIN_HIGHLIGHT);

        for pair in line.windows(2) {
            let start = self.board_to_screen(pair[0]);
            let end = self.board_to_screen(pair[1]);
            painter.line_segment([start, end], stroke);
        }

        let radius = self.cell_size * STONE_RADIUS_RATIO + 3.0;
        for &pos in line {
            painter.circle_stroke(self.board_to_screen(pos), radius, stroke);
        }
    }

    fn draw_hover_preview(&self, painter: &Painter, pos: Pos, turn: Stone, is_valid: bool) {
        let center = self.board_to_screen(pos);
        let radius = self.cell_size * STONE_RADIUS_RATIO;

        let color = if is_valid {
            match turn {
                Stone::Black => Color32::from_rgba_unmultiplied(20, 20, 20, 80),
                Stone::White => Color32::from_rgba_unmultiplied(240, 240, 240, 80),
                Stone::Empty => return,
            }
        } else {
            hover_invalid()
        };

        painter.circle_filled(center, radius, color);
    }

    /// Convert screen coordinates to board position
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Option<Pos> {
        let relative = screen_pos - self.board_rect.min;
        let x = (relative.x - BOARD_MARGIN + self.cell_size * 0.5) / self.cell_size;
        let y = (relative.y - BOARD_MARGIN + self.cell_size * 0.5) / self.cell_size;

        let col = x.floor() as i32;
        let row = y.floor() as i32;

        Pos::is_valid(row, col, self.size).then(|| Pos::new(row as usize, col as usize))
    }

    /// Convert board position to screen coordinates
    pub fn board_to_screen(&self, pos: Pos) -> Pos2 {
        let x = self.board_rect.min.x + BOARD_MARGIN + pos.col as f32 * self.cell_size;
        let y = self.board_rect.min.y + BOARD_MARGIN + pos.row as f32 * self.cell_size;
        Pos2::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(size: usize) -> BoardView {
        BoardView {
            cell_size: 30.0,
            board_rect: Rect::from_min_size(Pos2::ZERO, Vec2::splat(600.0)),
            size,
        }
    }

    #[test]
    fn test_screen_board_roundtrip() {
        let view = view(15);
        for pos in [Pos::new(0, 0), Pos::new(7, 3), Pos::new(14, 14)] {
            let screen = view.board_to_screen(pos);
            assert_eq!(view.screen_to_board(screen), Some(pos));
            // Slightly off the intersection still snaps to it
            assert_eq!(view.screen_to_board(screen + Vec2::new(10.0, -10.0)), Some(pos));
        }
    }

    #[test]
    fn test_screen_outside_board() {
        let view = view(9);
        assert_eq!(view.screen_to_board(Pos2::new(0.0, 0.0)), None);
        let past_edge = view.board_to_screen(Pos::new(8, 8)) + Vec2::new(30.0, 0.0);
        assert_eq!(view.screen_to_board(past_edge), None);
    }
}

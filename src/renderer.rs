use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Block;

use crate::config::{GameConfig, GridSize, PALETTE};
use crate::game::GameState;
use crate::snake::Cell;

/// Terminal columns used to draw one grid cell, keeping cells roughly square.
const COLUMNS_PER_CELL: u16 = 2;

const GLYPH_CELL: &str = "██";

/// Axis-aligned rectangle in surface pixels.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Drawing surface a frame is painted onto.
pub trait Canvas {
    /// Fills the whole surface with `color`.
    fn clear(&mut self, color: Color);

    /// Fills `rect` with `color`.
    fn fill_rect(&mut self, rect: PixelRect, color: Color);
}

/// Maps grid cells to surface pixels.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct CanvasLayout {
    pub grid: GridSize,
    pub scale: u16,
}

impl CanvasLayout {
    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            grid: config.grid(),
            scale: config.scale_factor,
        }
    }

    /// Surface size in pixels as `(width, height)`.
    #[must_use]
    pub fn canvas_size(self) -> (u32, u32) {
        let scale = u32::from(self.scale);
        (
            u32::from(self.grid.width) * scale,
            u32::from(self.grid.height) * scale,
        )
    }

    /// Pixel rectangle covered by `cell`.
    ///
    /// Coordinates saturate at the `i32` range; validated configs never
    /// reach it.
    #[must_use]
    pub fn cell_rect(self, cell: Cell) -> PixelRect {
        let scale = i32::from(self.scale);
        PixelRect {
            x: cell.x.saturating_mul(scale),
            y: cell.y.saturating_mul(scale),
            width: u32::from(self.scale),
            height: u32::from(self.scale),
        }
    }
}

/// Paints one frame: background, then food, then every snake segment.
pub fn draw_frame<C: Canvas + ?Sized>(canvas: &mut C, state: &GameState, layout: CanvasLayout) {
    canvas.clear(PALETTE.background);
    canvas.fill_rect(layout.cell_rect(state.food), PALETTE.food);

    for segment in state.snake.segments() {
        canvas.fill_rect(layout.cell_rect(*segment), PALETTE.snake);
    }
}

/// [`Canvas`] over a ratatui buffer region, one grid cell per
/// `COLUMNS_PER_CELL` columns and one row.
pub struct TerminalCanvas<'a> {
    buffer: &'a mut Buffer,
    area: Rect,
    layout: CanvasLayout,
}

impl<'a> TerminalCanvas<'a> {
    #[must_use]
    pub fn new(buffer: &'a mut Buffer, area: Rect, layout: CanvasLayout) -> Self {
        let area = area.intersection(buffer.area);
        Self {
            buffer,
            area,
            layout,
        }
    }

    fn terminal_position(&self, column: i32, row: i32) -> Option<(u16, u16)> {
        let cell = Cell { x: column, y: row };
        if !cell.is_within(self.layout.grid) {
            return None;
        }

        let x_offset = u16::try_from(column).ok()?.checked_mul(COLUMNS_PER_CELL)?;
        let y_offset = u16::try_from(row).ok()?;

        let x = self.area.x.checked_add(x_offset)?;
        let y = self.area.y.checked_add(y_offset)?;
        if x.saturating_add(COLUMNS_PER_CELL) > self.area.right() || y >= self.area.bottom() {
            return None;
        }

        Some((x, y))
    }
}

impl Canvas for TerminalCanvas<'_> {
    fn clear(&mut self, color: Color) {
        let blank = " ".repeat(usize::from(self.area.width));
        let style = Style::new().bg(color);
        for y in self.area.top()..self.area.bottom() {
            self.buffer.set_string(self.area.x, y, &blank, style);
        }
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        let scale = self.layout.scale.max(1);
        let first_column = rect.x.div_euclid(i32::from(scale));
        let first_row = rect.y.div_euclid(i32::from(scale));
        let columns = span_in_cells(rect.width, scale);
        let rows = span_in_cells(rect.height, scale);

        let style = Style::new().fg(color).bg(PALETTE.background);
        for row in first_row..first_row.saturating_add(rows) {
            for column in first_column..first_column.saturating_add(columns) {
                if let Some((x, y)) = self.terminal_position(column, row) {
                    self.buffer.set_string(x, y, GLYPH_CELL, style);
                }
            }
        }
    }
}

fn span_in_cells(pixels: u32, scale: u16) -> i32 {
    i32::try_from(pixels.div_ceil(u32::from(scale))).unwrap_or(i32::MAX)
}

/// Terminal size needed to show the whole board and its border.
#[must_use]
pub fn board_size(grid: GridSize) -> (u16, u16) {
    (
        grid.width.saturating_mul(COLUMNS_PER_CELL).saturating_add(2),
        grid.height.saturating_add(2),
    )
}

/// Renders the board with the score in its border.
pub fn render(frame: &mut Frame<'_>, state: &GameState, layout: CanvasLayout) {
    let area = frame.area();
    let (width, height) = board_size(layout.grid);
    let board = Rect::new(area.x, area.y, width, height).intersection(area);

    let block = Block::bordered().title(format!(" Score: {} ", state.score));
    let inner = block.inner(board);
    frame.render_widget(block, board);

    let mut canvas = TerminalCanvas::new(frame.buffer_mut(), inner, layout);
    draw_frame(&mut canvas, state, layout);
}

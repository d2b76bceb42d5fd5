// layout.rs - Square cell geometry fitted to the available canvas

use egui::{Pos2, Rect, Vec2, pos2};

/// Gap between a cell's square slot and its outline.
pub const PADDING: f32 = 4.0;
/// Inset of the filled square inside the outline.
pub const INNER_PADDING: f32 = 2.0 * PADDING;
/// Outline width, capped so tiny cells stay readable.
pub const LINE_WIDTH: f32 = 4.0;

/// Cell geometry for one frame. Recomputed whenever the canvas size changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellLayout {
    /// Edge of the square slot reserved for each cell.
    pub square: f32,
    /// Edge of the outlined square inside the slot.
    pub side: f32,
}

impl CellLayout {
    /// The largest square slot that fits every row and column in `available`.
    pub fn fit(available: Vec2, rows: usize, columns: usize) -> Self {
        let square = (available.x / columns.max(1) as f32).min(available.y / rows.max(1) as f32);
        Self {
            square,
            side: square - 2.0 * PADDING,
        }
    }

    /// Total size covered by the grid.
    pub fn extent(&self, rows: usize, columns: usize) -> Vec2 {
        Vec2::new(columns as f32 * self.square, rows as f32 * self.square)
    }

    pub fn line_width(&self) -> f32 {
        LINE_WIDTH.min(self.side / 8.0).max(0.5)
    }

    /// Outlined square of `(row, column)`, or `None` when the slot is too small.
    pub fn outline(&self, origin: Pos2, row: usize, column: usize) -> Option<Rect> {
        if self.side <= 0.0 {
            return None;
        }
        let x = origin.x + column as f32 * self.square + PADDING;
        let y = origin.y + row as f32 * self.square + PADDING;
        Some(Rect::from_min_size(pos2(x, y), Vec2::splat(self.side)))
    }

    /// Filled square drawn for a live `(row, column)`.
    pub fn fill(&self, origin: Pos2, row: usize, column: usize) -> Option<Rect> {
        let inner = self.side - 2.0 * INNER_PADDING;
        if inner <= 0.0 {
            return None;
        }
        let outline = self.outline(origin, row, column)?;
        Some(Rect::from_min_size(
            outline.min + Vec2::splat(INNER_PADDING),
            Vec2::splat(inner),
        ))
    }

    /// Cell under `pos`, if any.
    pub fn cell_at(&self, origin: Pos2, pos: Pos2, rows: usize, columns: usize) -> Option<(usize, usize)> {
        if self.square <= 0.0 || pos.x < origin.x || pos.y < origin.y {
            return None;
        }
        let row = ((pos.y - origin.y) / self.square) as usize;
        let column = ((pos.x - origin.x) / self.square) as usize;
        (row < rows && column < columns).then_some((row, column))
    }
}

//! Grid geometry for the number board.

use ratatui::layout::Rect;

use bingo_types::UniverseSize;

/// The board never gets narrower than this many columns unless the terminal is.
pub const MIN_COLUMNS: u16 = 10;

/// Where each number lands on screen for a given universe size and area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub columns: u16,
    pub rows: u16,
    pub cell_width: u16,
    /// Rows that fit in the area; `rows - visible_rows` can be scrolled.
    pub visible_rows: u16,
}

impl BoardLayout {
    /// Widens past [`MIN_COLUMNS`] only when the rows would not fit vertically.
    #[must_use]
    pub fn compute(size: UniverseSize, area: Rect) -> Self {
        let count = size.get();
        let cell_width = size.label_width() as u16 + 2;
        let max_columns = (area.width / cell_width).max(1);
        let height = area.height.max(1);

        let mut columns = MIN_COLUMNS.min(max_columns);
        if count.div_ceil(columns) > height {
            columns = count.div_ceil(height).clamp(columns, max_columns);
        }
        let rows = count.div_ceil(columns);

        Self {
            columns,
            rows,
            cell_width,
            visible_rows: rows.min(area.height),
        }
    }

    #[must_use]
    pub fn max_scroll(&self) -> u16 {
        self.rows.saturating_sub(self.visible_rows)
    }

    /// Numbers shown on `row` (0-based), clipped to the universe.
    pub fn row_numbers(&self, row: u16, size: UniverseSize) -> impl Iterator<Item = u16> {
        let start = row * self.columns + 1;
        let end = (start + self.columns - 1).min(size.get());
        start..=end
    }

    /// Width actually used by the grid.
    #[must_use]
    pub fn width(&self) -> u16 {
        self.columns * self.cell_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: i64) -> UniverseSize {
        UniverseSize::clamped(n)
    }

    #[test]
    fn default_board_is_ten_columns() {
        let layout = BoardLayout::compute(size(75), Rect::new(0, 0, 80, 20));
        assert_eq!(layout.columns, 10);
        assert_eq!(layout.rows, 8);
        assert_eq!(layout.cell_width, 4);
        assert_eq!(layout.visible_rows, 8);
        assert_eq!(layout.max_scroll(), 0);
    }

    #[test]
    fn widens_when_rows_overflow() {
        // 200 numbers, 10 rows high: 20 columns of width 5 fit in 120.
        let layout = BoardLayout::compute(size(200), Rect::new(0, 0, 120, 10));
        assert_eq!(layout.cell_width, 5);
        assert_eq!(layout.columns, 20);
        assert_eq!(layout.rows, 10);
        assert_eq!(layout.max_scroll(), 0);
    }

    #[test]
    fn scrolls_when_even_widest_grid_overflows() {
        let layout = BoardLayout::compute(size(999), Rect::new(0, 0, 50, 10));
        assert_eq!(layout.columns, 10);
        assert_eq!(layout.rows, 100);
        assert_eq!(layout.visible_rows, 10);
        assert_eq!(layout.max_scroll(), 90);
    }

    #[test]
    fn narrow_terminal_drops_below_min_columns() {
        let layout = BoardLayout::compute(size(20), Rect::new(0, 0, 12, 20));
        assert_eq!(layout.columns, 3);
        assert_eq!(layout.rows, 7);
    }

    #[test]
    fn last_row_is_clipped_to_size() {
        let layout = BoardLayout::compute(size(75), Rect::new(0, 0, 80, 20));
        let last: Vec<u16> = layout.row_numbers(7, size(75)).collect();
        assert_eq!(last, vec![71, 72, 73, 74, 75]);
        let first: Vec<u16> = layout.row_numbers(0, size(75)).collect();
        assert_eq!(first, (1..=10).collect::<Vec<_>>());
    }
}

// Grid cursor - selection and scrolling over a flat feed laid out in columns
// Pure bookkeeping, no drawing; the boundary check is what drives feed extension

/// Widest grid we lay out; more columns than this never fit a terminal anyway
pub const MAX_COLUMNS: usize = 32;

/// Selection inside a `columns`-wide grid of `len` cards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCursor {
    columns: usize,
    selected: usize,
    scroll_row: usize,
}

impl GridCursor {
    pub fn new(columns: usize) -> Self {
        Self {
            columns: columns.clamp(1, MAX_COLUMNS),
            selected: 0,
            scroll_row: 0,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn scroll_row(&self) -> usize {
        self.scroll_row
    }

    pub fn reset(&mut self) {
        self.selected = 0;
        self.scroll_row = 0;
    }

    pub fn row_of(&self, index: usize) -> usize {
        index / self.columns
    }

    pub fn total_rows(&self, len: usize) -> usize {
        len.div_ceil(self.columns)
    }

    pub fn move_left(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_right(&mut self, len: usize) {
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn move_up(&mut self, rows: usize) {
        self.selected = self.selected.saturating_sub(self.columns * rows);
    }

    /// Down by `rows`, stopping on the last card rather than wrapping
    pub fn move_down(&mut self, rows: usize, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = (self.selected + self.columns * rows).min(len - 1);
    }

    /// Keep the selected row inside a window of `visible_rows`
    pub fn follow(&mut self, visible_rows: usize) {
        let visible_rows = visible_rows.max(1);
        let row = self.row_of(self.selected);
        if row < self.scroll_row {
            self.scroll_row = row;
        } else if row >= self.scroll_row + visible_rows {
            self.scroll_row = row + 1 - visible_rows;
        }
    }

    /// True when the selection sits within `boundary_rows` of the last row
    pub fn near_bottom(&self, len: usize, boundary_rows: usize) -> bool {
        if len == 0 {
            return false;
        }
        let last_row = self.total_rows(len) - 1;
        self.row_of(self.selected) + boundary_rows >= last_row
    }

    /// Clamp after the feed shrank (filter change, refetch)
    pub fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.reset();
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

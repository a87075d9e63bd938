//! Focus mask - the rectangular region where matches count

/// Rectangular sub-region of the grid
///
/// Bounds are inclusive on both ends: a focus with `row_span = 2` covers rows
/// `row..=row + 2`, i.e. three rows. With the default span equal to the board
/// size the mask covers the whole board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Focus {
    pub row: i32,
    pub col: i32,
    pub row_span: i32,
    pub col_span: i32,
}

impl Focus {
    pub fn new(row: i32, col: i32, row_span: i32, col_span: i32) -> Self {
        Self {
            row,
            col,
            row_span,
            col_span,
        }
    }

    /// Focus covering a whole `rows x cols` board
    pub fn covering(rows: i32, cols: i32) -> Self {
        Self::new(0, 0, rows, cols)
    }

    pub fn contains(&self, row: i32, col: i32) -> bool {
        row >= self.row
            && row <= self.row + self.row_span
            && col >= self.col
            && col <= self.col + self.col_span
    }

    /// Number of on-board cells inside the mask
    pub fn cells_within(&self, rows: i32, cols: i32) -> usize {
        let row_lo = self.row.max(0);
        let row_hi = (self.row + self.row_span).min(rows - 1);
        let col_lo = self.col.max(0);
        let col_hi = (self.col + self.col_span).min(cols - 1);
        if row_hi < row_lo || col_hi < col_lo {
            return 0;
        }
        ((row_hi - row_lo + 1) * (col_hi - col_lo + 1)) as usize
    }
}

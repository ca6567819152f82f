//! The viewport - what portion of the buffer is visible
//!
//! Scroll offsets live in line-index space (vertical) and display-column
//! space (horizontal). The viewport only ever reads the buffer; keeping the
//! cursor visible is done by adjusting scroll, never by moving the cursor.

use crate::buffer::LineBuffer;
use crate::cursor::Cursor;
use crate::unicode;

/// Rows reserved for chrome: header + footer.
pub const CHROME_ROWS: u16 = 2;

#[derive(Debug, Clone)]
pub struct Viewport {
    /// First visible line index.
    pub scroll_row: usize,
    /// First visible display column.
    pub scroll_col: usize,
    /// Terminal geometry, chrome included.
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            scroll_row: 0,
            scroll_col: 0,
            cols,
            rows,
        }
    }

    /// Rows available for text content.
    pub fn usable_rows(&self) -> usize {
        self.rows.saturating_sub(CHROME_ROWS) as usize
    }

    /// One page worth of lines for page-up/page-down.
    pub fn page_rows(&self) -> usize {
        self.usable_rows().max(1)
    }

    /// Update terminal dimensions. The caller re-runs [`ensure_visible`]
    /// afterward; this only clamps the scroll so it still points into the
    /// buffer.
    ///
    /// [`ensure_visible`]: Viewport::ensure_visible
    pub fn resize(&mut self, cols: u16, rows: u16, buffer: &LineBuffer) {
        self.cols = cols;
        self.rows = rows;
        self.scroll_row = self.scroll_row.min(buffer.count().saturating_sub(1));
    }

    /// Adjust scroll so the cursor's display position falls inside the
    /// visible window. Idempotent: calling again with unchanged state does
    /// nothing.
    pub fn ensure_visible(&mut self, buffer: &LineBuffer, cursor: &Cursor, tab_stop: usize) {
        let bytes = buffer.line(cursor.line).as_bytes();
        let col = unicode::byte_to_column(bytes, cursor.byte, tab_stop);
        let width = self.cols as usize;

        if col < self.scroll_col {
            self.scroll_col = col;
        } else if width > 0 && col >= self.scroll_col + width {
            // Keep the cursor as the rightmost visible column.
            self.scroll_col = col - width + 1;
        }

        let usable = self.usable_rows();
        if cursor.line < self.scroll_row {
            self.scroll_row = cursor.line;
        } else if usable > 0 && cursor.line >= self.scroll_row + usable {
            self.scroll_row = cursor.line - usable + 1;
        }
    }
}

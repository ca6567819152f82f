//! Cursor position and movement
//!
//! The cursor is a line index plus a byte offset into that line. The byte
//! offset always sits on a UTF-8 character boundary (or at the line length,
//! the "after last character" position); every movement re-establishes that
//! invariant itself rather than trusting the previous line's geometry.

use crate::buffer::LineBuffer;
use crate::unicode;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    /// 0-based index into the line buffer.
    pub line: usize,
    /// 0-based byte offset into the current line, `0..=len`.
    pub byte: usize,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move one character left within the current line. No line wrap.
    pub fn move_left(&mut self, buffer: &LineBuffer) {
        if self.byte > 0 {
            self.byte = unicode::prev_boundary(buffer.line(self.line).as_bytes(), self.byte);
        }
    }

    /// Move one character right within the current line. No line wrap.
    pub fn move_right(&mut self, buffer: &LineBuffer) {
        let bytes = buffer.line(self.line).as_bytes();
        if self.byte < bytes.len() {
            self.byte += unicode::char_len_at(bytes, self.byte);
            self.byte = self.byte.min(bytes.len());
        }
    }

    /// Move `delta` lines up (negative) or down (positive), clamped to the
    /// buffer. When the previous display column exceeds the new line's
    /// display length the cursor snaps to the new line's end; otherwise the
    /// byte offset carries over, clamped to the line and re-snapped to a
    /// character boundary.
    pub fn move_vertical(&mut self, buffer: &LineBuffer, delta: isize, tab_stop: usize) {
        let prev_col =
            unicode::byte_to_column(buffer.line(self.line).as_bytes(), self.byte, tab_stop);
        let target = if delta < 0 {
            self.line.saturating_sub(delta.unsigned_abs())
        } else {
            (self.line + delta as usize).min(buffer.count() - 1)
        };
        if target == self.line {
            return;
        }
        self.line = target;

        let bytes = buffer.line(self.line).as_bytes();
        if prev_col > unicode::display_len(bytes, tab_stop) {
            self.byte = bytes.len();
        } else {
            self.byte = unicode::floor_boundary(bytes, self.byte);
        }
    }

    /// Jump to the start of the current line.
    pub fn move_home(&mut self) {
        self.byte = 0;
    }

    /// Jump past the last character of the current line.
    pub fn move_end(&mut self, buffer: &LineBuffer) {
        self.byte = buffer.line(self.line).len();
    }

    /// Word movement within the current line: skip whitespace runs and
    /// non-whitespace runs alternately. The predicate is byte-wise ASCII
    /// whitespace; multi-byte whitespace is treated as word content (known
    /// limitation).
    pub fn move_word(&mut self, buffer: &LineBuffer, forward: bool) {
        let bytes = buffer.line(self.line).as_bytes();
        let mut x = self.byte.min(bytes.len());
        if forward {
            while x < bytes.len() && !bytes[x].is_ascii_whitespace() {
                x += unicode::char_len_at(bytes, x);
            }
            while x < bytes.len() && bytes[x].is_ascii_whitespace() {
                x += unicode::char_len_at(bytes, x);
            }
            self.byte = x.min(bytes.len());
        } else {
            // Backward over continuation bytes is safe: the run ends either
            // at offset 0 or just after an ASCII whitespace byte, both of
            // which are character boundaries.
            while x > 0 && bytes[x - 1].is_ascii_whitespace() {
                x -= 1;
            }
            while x > 0 && !bytes[x - 1].is_ascii_whitespace() {
                x -= 1;
            }
            self.byte = x;
        }
    }

    /// Re-establish validity after a structural change (line removal,
    /// shrink). Part of the mutation that invalidated the cursor, not a
    /// separate recovery pass.
    pub fn clamp(&mut self, buffer: &LineBuffer) {
        self.line = self.line.min(buffer.count() - 1);
        let bytes = buffer.line(self.line).as_bytes();
        self.byte = unicode::floor_boundary(bytes, self.byte);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unicode::DEFAULT_TAB_STOP;

    const TAB: usize = DEFAULT_TAB_STOP;

    #[test]
    fn test_move_left_right_ascii() {
        let buffer = LineBuffer::from_str("abc");
        let mut cursor = Cursor::new();
        cursor.move_right(&buffer);
        assert_eq!(cursor.byte, 1);
        cursor.move_right(&buffer);
        cursor.move_right(&buffer);
        assert_eq!(cursor.byte, 3);
        // At end of line: right is a no-op, no wrap.
        cursor.move_right(&buffer);
        assert_eq!(cursor.byte, 3);
        cursor.move_left(&buffer);
        assert_eq!(cursor.byte, 2);
    }

    #[test]
    fn test_move_left_right_multibyte() {
        let buffer = LineBuffer::from_str("a😀b");
        let mut cursor = Cursor::new();
        cursor.move_right(&buffer);
        assert_eq!(cursor.byte, 1);
        cursor.move_right(&buffer);
        assert_eq!(cursor.byte, 5); // past the 4-byte emoji
        cursor.move_left(&buffer);
        assert_eq!(cursor.byte, 1);
        cursor.move_left(&buffer);
        assert_eq!(cursor.byte, 0);
        cursor.move_left(&buffer);
        assert_eq!(cursor.byte, 0);
    }

    #[test]
    fn test_vertical_snaps_to_shorter_line() {
        let buffer = LineBuffer::from_str("a long line\nab");
        let mut cursor = Cursor::new();
        cursor.move_end(&buffer);
        assert_eq!(cursor.byte, 11);
        cursor.move_vertical(&buffer, 1, TAB);
        assert_eq!(cursor.line, 1);
        assert_eq!(cursor.byte, 2); // snapped to end of "ab"
    }

    #[test]
    fn test_vertical_keeps_offset_on_longer_line() {
        let buffer = LineBuffer::from_str("ab\na long line");
        let mut cursor = Cursor { line: 0, byte: 2 };
        cursor.move_vertical(&buffer, 1, TAB);
        assert_eq!(cursor.line, 1);
        assert_eq!(cursor.byte, 2);
    }

    #[test]
    fn test_vertical_resnaps_mid_character_offset() {
        // Byte 2 on "日本" falls inside the first 3-byte character; the
        // cursor must land on its start, never mid-sequence.
        let buffer = LineBuffer::from_str("ab\n日本");
        let mut cursor = Cursor { line: 0, byte: 2 };
        cursor.move_vertical(&buffer, 1, TAB);
        assert_eq!(cursor.line, 1);
        assert_eq!(cursor.byte, 0);
    }

    #[test]
    fn test_vertical_clamps_at_edges() {
        let buffer = LineBuffer::from_str("a\nb\nc");
        let mut cursor = Cursor::new();
        cursor.move_vertical(&buffer, -1, TAB);
        assert_eq!(cursor.line, 0);
        cursor.move_vertical(&buffer, 10, TAB);
        assert_eq!(cursor.line, 2);
    }

    #[test]
    fn test_word_forward() {
        let buffer = LineBuffer::from_str("hello  world x");
        let mut cursor = Cursor::new();
        cursor.move_word(&buffer, true);
        assert_eq!(cursor.byte, 7); // past "hello" and the space run
        cursor.move_word(&buffer, true);
        assert_eq!(cursor.byte, 13);
        cursor.move_word(&buffer, true);
        assert_eq!(cursor.byte, 14); // end of line
        cursor.move_word(&buffer, true);
        assert_eq!(cursor.byte, 14);
    }

    #[test]
    fn test_word_backward() {
        let buffer = LineBuffer::from_str("hello  world x");
        let mut cursor = Cursor { line: 0, byte: 14 };
        cursor.move_word(&buffer, false);
        assert_eq!(cursor.byte, 13);
        cursor.move_word(&buffer, false);
        assert_eq!(cursor.byte, 7);
        cursor.move_word(&buffer, false);
        assert_eq!(cursor.byte, 0);
        cursor.move_word(&buffer, false);
        assert_eq!(cursor.byte, 0);
    }

    #[test]
    fn test_word_movement_over_multibyte_stays_on_boundary() {
        let buffer = LineBuffer::from_str("日本語 word");
        let mut cursor = Cursor::new();
        cursor.move_word(&buffer, true);
        assert_eq!(cursor.byte, 10); // past the 9-byte run and one space
        cursor.move_word(&buffer, false);
        assert_eq!(cursor.byte, 0);
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut buffer = LineBuffer::from_str("abcdef\nxy");
        let mut cursor = Cursor { line: 1, byte: 2 };
        buffer.join_with_next(0);
        cursor.clamp(&buffer);
        assert_eq!(cursor.line, 0);
        assert_eq!(cursor.byte, 2);
    }
}

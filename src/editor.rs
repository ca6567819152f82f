//! Editor state and event handling
//!
//! One struct owns everything the event loop mutates: buffer, cursor,
//! viewport, configuration and mode flags. There are no globals; the main
//! loop holds the `Editor` and feeds it one [`InputEvent`] at a time, each
//! processed to completion before the next render.
//!
//! Two orthogonal mode axes: edit-vs-view gates all mutation (view is
//! read-only), insert-vs-replace only changes how character entry lands.

use crate::buffer::{EntryMode, LineBuffer};
use crate::config::Config;
use crate::cursor::Cursor;
use crate::event::{Direction, InputEvent};
use crate::unicode;
use crate::viewport::Viewport;
use tracing::{debug, error};

/// Top-level mode: full editing or read-only viewing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Edit,
    View,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExitState {
    Running,
    /// Quit requested with unsaved changes; waiting for save/discard/cancel.
    ConfirmExit,
    Exited,
}

/// One screen row of renderable content.
///
/// `bytes` is the sub-range of the line covering the visible columns.
/// A wide character or tab straddling the left edge is clipped out and
/// surfaces as `pad_cols` of blank space; `start_col` is the absolute
/// display column of `bytes[0]` (tab expansion context for the renderer),
/// and `text_cols` is the display width `bytes` occupies.
#[derive(Debug, Clone, Copy)]
pub struct RowSlice<'a> {
    /// Buffer line shown on this row; `None` past the end of the buffer.
    pub line_index: Option<usize>,
    pub bytes: &'a [u8],
    pub start_col: usize,
    pub pad_cols: usize,
    pub text_cols: usize,
}

pub struct Editor {
    buffer: LineBuffer,
    cursor: Cursor,
    viewport: Viewport,
    config: Config,
    mode: EditorMode,
    entry_mode: EntryMode,
    show_blanks: bool,
    exit: ExitState,
    status: Option<String>,
}

impl Editor {
    pub fn new(buffer: LineBuffer, config: Config, cols: u16, rows: u16, view: bool) -> Self {
        let show_blanks = config.show_blanks;
        Self {
            buffer,
            cursor: Cursor::new(),
            viewport: Viewport::new(cols, rows),
            config,
            mode: if view { EditorMode::View } else { EditorMode::Edit },
            entry_mode: EntryMode::Insert,
            show_blanks,
            exit: ExitState::Running,
            status: None,
        }
    }

    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn entry_mode(&self) -> EntryMode {
        self.entry_mode
    }

    pub fn show_blanks(&self) -> bool {
        self.show_blanks
    }

    pub fn tab_stop(&self) -> usize {
        self.config.tab_stop
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn confirm_exit_pending(&self) -> bool {
        self.exit == ExitState::ConfirmExit
    }

    pub fn should_exit(&self) -> bool {
        self.exit == ExitState::Exited
    }

    pub fn file_name(&self) -> String {
        self.buffer
            .file_path()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "[no file]".to_string())
    }

    /// Process one input event to completion.
    pub fn handle_event(&mut self, event: InputEvent) {
        // Geometry changes apply in every state, including the exit prompt.
        if let InputEvent::Resize(cols, rows) = event {
            self.viewport.resize(cols, rows, &self.buffer);
            self.cursor.clamp(&self.buffer);
            self.ensure_visible();
            return;
        }
        if self.exit == ExitState::ConfirmExit {
            self.handle_confirm(event);
            return;
        }

        self.status = None;
        match event {
            InputEvent::InsertChar('\n') => self.line_break(),
            InputEvent::InsertChar(c) => self.insert_char(c),
            InputEvent::LineBreak => self.line_break(),
            InputEvent::Backspace => self.backspace(),
            InputEvent::DeleteForward => self.delete_forward(),
            InputEvent::Move(direction) => self.handle_move(direction),
            InputEvent::ToggleEntryMode => {
                self.entry_mode = match self.entry_mode {
                    EntryMode::Insert => EntryMode::Replace,
                    EntryMode::Replace => EntryMode::Insert,
                };
            }
            InputEvent::EnterViewMode => self.mode = EditorMode::View,
            InputEvent::EnterEditMode => self.mode = EditorMode::Edit,
            InputEvent::ToggleBlanks => self.show_blanks = !self.show_blanks,
            InputEvent::Save => self.save(),
            InputEvent::Quit => {
                if self.buffer.is_modified() {
                    self.exit = ExitState::ConfirmExit;
                } else {
                    self.exit = ExitState::Exited;
                }
            }
            InputEvent::Cancel => {}
            InputEvent::Resize(..) => unreachable!("handled above"),
        }
    }

    /// Keys while the exit prompt is up: s/y save and exit, n/q discard,
    /// anything else cancels back into the editor.
    fn handle_confirm(&mut self, event: InputEvent) {
        match event {
            InputEvent::InsertChar('s' | 'S' | 'y' | 'Y') => match self.buffer.save() {
                Ok(()) => self.exit = ExitState::Exited,
                Err(err) => {
                    error!(%err, "save on exit failed");
                    self.exit = ExitState::Running;
                    self.status = Some(format!("save failed: {err}"));
                }
            },
            InputEvent::InsertChar('n' | 'N' | 'q') | InputEvent::Quit => {
                self.exit = ExitState::Exited;
            }
            _ => {
                self.exit = ExitState::Running;
                self.status = None;
            }
        }
    }

    fn can_edit(&self) -> bool {
        self.mode == EditorMode::Edit
    }

    fn insert_char(&mut self, c: char) {
        if !self.can_edit() {
            return;
        }
        self.cursor.byte =
            self.buffer
                .insert_char_at(self.cursor.line, self.cursor.byte, c, self.entry_mode);
        self.ensure_visible();
    }

    fn line_break(&mut self) {
        if !self.can_edit() {
            return;
        }
        self.buffer.insert_newline(self.cursor.line, self.cursor.byte);
        self.cursor.line += 1;
        self.cursor.byte = 0;
        self.ensure_visible();
    }

    fn backspace(&mut self) {
        if !self.can_edit() {
            return;
        }
        if self.cursor.byte > 0 {
            let bytes = self.buffer.line(self.cursor.line).as_bytes();
            self.cursor.byte = unicode::prev_boundary(bytes, self.cursor.byte);
            self.buffer.delete_char_at(self.cursor.line, self.cursor.byte);
        } else if self.cursor.line > 0 {
            // Merge into the previous line; the cursor lands on the join
            // point, the previous line's former end.
            let join_point = self.buffer.line(self.cursor.line - 1).len();
            self.buffer.join_with_next(self.cursor.line - 1);
            self.cursor.line -= 1;
            self.cursor.byte = join_point;
        }
        self.ensure_visible();
    }

    fn delete_forward(&mut self) {
        if !self.can_edit() {
            return;
        }
        if self.cursor.byte < self.buffer.line(self.cursor.line).len() {
            self.buffer.delete_char_at(self.cursor.line, self.cursor.byte);
        } else if self.cursor.line + 1 < self.buffer.count() {
            self.buffer.join_with_next(self.cursor.line);
        }
        self.ensure_visible();
    }

    fn handle_move(&mut self, direction: Direction) {
        let tab_stop = self.config.tab_stop;
        match direction {
            Direction::Up => self.cursor.move_vertical(&self.buffer, -1, tab_stop),
            Direction::Down => self.cursor.move_vertical(&self.buffer, 1, tab_stop),
            Direction::Left => self.cursor.move_left(&self.buffer),
            Direction::Right => self.cursor.move_right(&self.buffer),
            Direction::WordLeft => self.cursor.move_word(&self.buffer, false),
            Direction::WordRight => self.cursor.move_word(&self.buffer, true),
            Direction::Home => self.cursor.move_home(),
            Direction::End => self.cursor.move_end(&self.buffer),
            Direction::PageUp => {
                let page = self.viewport.page_rows();
                self.cursor.move_vertical(&self.buffer, -(page as isize), tab_stop);
                self.viewport.scroll_row = self.viewport.scroll_row.saturating_sub(page);
            }
            Direction::PageDown => {
                let page = self.viewport.page_rows();
                self.cursor.move_vertical(&self.buffer, page as isize, tab_stop);
                let max_top = self
                    .buffer
                    .count()
                    .saturating_sub(self.viewport.usable_rows().max(1));
                self.viewport.scroll_row = (self.viewport.scroll_row + page).min(max_top);
            }
        }
        self.ensure_visible();
    }

    fn save(&mut self) {
        if self.mode == EditorMode::View {
            self.status = Some("read-only: press F4 to edit".to_string());
            return;
        }
        match self.buffer.save() {
            Ok(()) => {
                debug!("buffer saved");
                self.status = Some(format!("saved {}", self.file_name()));
            }
            Err(err) => {
                error!(%err, "save failed");
                self.status = Some(format!("save failed: {err}"));
            }
        }
    }

    fn ensure_visible(&mut self) {
        self.viewport
            .ensure_visible(&self.buffer, &self.cursor, self.config.tab_stop);
    }

    /// Renderable content for every usable screen row, top to bottom.
    pub fn visible_rows(&self) -> Vec<RowSlice<'_>> {
        let usable = self.viewport.usable_rows();
        let scroll_col = self.viewport.scroll_col;
        let width = self.viewport.cols as usize;
        let tab_stop = self.config.tab_stop;

        let mut rows = Vec::with_capacity(usable);
        for row in 0..usable {
            let index = self.viewport.scroll_row + row;
            if index >= self.buffer.count() {
                rows.push(RowSlice {
                    line_index: None,
                    bytes: &[],
                    start_col: scroll_col,
                    pad_cols: 0,
                    text_cols: 0,
                });
                continue;
            }
            let bytes = self.buffer.line(index).as_bytes();
            rows.push(clip_row(bytes, index, scroll_col, width, tab_stop));
        }
        rows
    }

    /// The cursor's screen position within the text area (row 0 = first
    /// usable row), or `None` when it falls outside the window or the
    /// editor is in view mode (which shows no cursor).
    pub fn cursor_screen(&self) -> Option<(u16, u16)> {
        if self.mode == EditorMode::View {
            return None;
        }
        let bytes = self.buffer.line(self.cursor.line).as_bytes();
        let col = unicode::byte_to_column(bytes, self.cursor.byte, self.config.tab_stop);
        let row = self.cursor.line.checked_sub(self.viewport.scroll_row)?;
        let col = col.checked_sub(self.viewport.scroll_col)?;
        if row >= self.viewport.usable_rows() || col >= self.viewport.cols as usize {
            return None;
        }
        Some((row as u16, col as u16))
    }

    /// The character at the cursor: a space past end-of-line, the
    /// replacement character over malformed bytes.
    pub fn char_under_cursor(&self) -> char {
        let bytes = self.buffer.line(self.cursor.line).as_bytes();
        if self.cursor.byte >= bytes.len() {
            ' '
        } else {
            unicode::decode_at(bytes, self.cursor.byte)
                .0
                .unwrap_or('\u{FFFD}')
        }
    }
}

/// Clip one line to the visible column window `[scroll_col, scroll_col +
/// width)`, walking widths so the slice stops at or before the budget and
/// never cuts a character in half.
fn clip_row(
    bytes: &[u8],
    line_index: usize,
    scroll_col: usize,
    width: usize,
    tab_stop: usize,
) -> RowSlice<'_> {
    let mut pos = 0;
    let mut col = 0;
    while pos < bytes.len() && col < scroll_col {
        (pos, col) = unicode::advance(bytes, pos, col, tab_stop);
    }
    let start = pos;
    let start_col = col;

    let limit = scroll_col + width;
    while pos < bytes.len() {
        let (next_pos, next_col) = unicode::advance(bytes, pos, col, tab_stop);
        if next_col > limit {
            break;
        }
        pos = next_pos;
        col = next_col;
    }

    RowSlice {
        line_index: Some(line_index),
        bytes: &bytes[start..pos],
        start_col,
        pad_cols: start_col.saturating_sub(scroll_col).min(width),
        text_cols: col - start_col,
    }
}


#[cfg(test)]
impl Editor {
    fn viewport_mut_for_tests(&mut self) -> &mut Viewport {
        &mut self.viewport
    }
}

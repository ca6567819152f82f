//! Abstract input events
//!
//! The editor's handlers consume these, never raw terminal input. Key
//! decoding lives in [`crate::keybindings`]; terminal resize arrives through
//! the same channel, observed at the top of the event loop rather than
//! inside a signal handler.

/// Cursor navigation requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    WordLeft,
    WordRight,
    Home,
    End,
    PageUp,
    PageDown,
}

/// One decoded input event. The editor exposes one handler arm per
/// category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Insert (or overwrite, in replace mode) a single character. Tab
    /// arrives here as a literal `'\t'`; newline does not (see
    /// [`InputEvent::LineBreak`]).
    InsertChar(char),
    /// Split the current line at the cursor.
    LineBreak,
    /// Delete the character before the cursor, joining lines at column 0.
    Backspace,
    /// Delete the character under the cursor, joining lines at end-of-line.
    DeleteForward,
    Move(Direction),
    /// Flip insert/replace character entry.
    ToggleEntryMode,
    /// Switch to read-only viewing.
    EnterViewMode,
    /// Switch back to editing.
    EnterEditMode,
    /// Toggle the trailing-blank-space highlight.
    ToggleBlanks,
    Save,
    /// Request exit; prompts first when there are unsaved changes.
    Quit,
    /// Escape: dismiss the exit prompt or a status message.
    Cancel,
    /// New terminal geometry (cols, rows).
    Resize(u16, u16),
}

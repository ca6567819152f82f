//! Key decoding: crossterm events to abstract editor events
//!
//! The editing core performs no input decoding; this is the whole boundary.
//! The map follows the classic function-key layout: F3 view, F4 edit,
//! F5 blanks, F10 exit, Insert toggles entry mode, Ctrl+arrows move by
//! word, Ctrl+S saves.

use crate::event::{Direction, InputEvent};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Translate one key event, or `None` for keys the editor does not bind.
pub fn translate(event: &KeyEvent) -> Option<InputEvent> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    match event.code {
        KeyCode::Up => Some(InputEvent::Move(Direction::Up)),
        KeyCode::Down => Some(InputEvent::Move(Direction::Down)),
        KeyCode::Left if event.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputEvent::Move(Direction::WordLeft))
        }
        KeyCode::Right if event.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputEvent::Move(Direction::WordRight))
        }
        KeyCode::Left => Some(InputEvent::Move(Direction::Left)),
        KeyCode::Right => Some(InputEvent::Move(Direction::Right)),
        KeyCode::Home => Some(InputEvent::Move(Direction::Home)),
        KeyCode::End => Some(InputEvent::Move(Direction::End)),
        KeyCode::PageUp => Some(InputEvent::Move(Direction::PageUp)),
        KeyCode::PageDown => Some(InputEvent::Move(Direction::PageDown)),
        KeyCode::Enter => Some(InputEvent::LineBreak),
        KeyCode::Backspace => Some(InputEvent::Backspace),
        KeyCode::Delete => Some(InputEvent::DeleteForward),
        KeyCode::Tab => Some(InputEvent::InsertChar('\t')),
        KeyCode::Insert => Some(InputEvent::ToggleEntryMode),
        KeyCode::Esc => Some(InputEvent::Cancel),
        KeyCode::F(3) => Some(InputEvent::EnterViewMode),
        KeyCode::F(4) => Some(InputEvent::EnterEditMode),
        KeyCode::F(5) => Some(InputEvent::ToggleBlanks),
        KeyCode::F(10) => Some(InputEvent::Quit),
        KeyCode::Char('s') if event.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputEvent::Save)
        }
        KeyCode::Char('q') if event.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputEvent::Quit)
        }
        KeyCode::Char(c)
            if event.modifiers.is_empty() || event.modifiers == KeyModifiers::SHIFT =>
        {
            Some(InputEvent::InsertChar(c))
        }
        _ => None,
    }
}

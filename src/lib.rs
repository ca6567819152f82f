// Editor library - exposes all core modules for testing

pub mod buffer;
pub mod config;
pub mod cursor;
pub mod editor;
pub mod event;
pub mod keybindings;
pub mod line;
pub mod logs;
pub mod ui;
pub mod unicode;
pub mod viewport;

// Re-export commonly used types
pub use buffer::{EntryMode, LineBuffer, LoadOptions};
pub use config::Config;
pub use cursor::Cursor;
pub use editor::{Editor, EditorMode, RowSlice};
pub use event::{Direction, InputEvent};
pub use line::Line;
pub use viewport::Viewport;

//! Screen painting
//!
//! Consumes the editor's render contract (row slices, cursor screen
//! position) and draws the ratatui frame: one header row, the text area,
//! one footer row. No buffer inspection happens here beyond the slices the
//! editor hands out, and no escape sequences are emitted directly.

use crate::buffer::EntryMode;
use crate::editor::{Editor, EditorMode, RowSlice};
use crate::unicode;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as UiLine, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

const HEADER_STYLE: Style = Style::new()
    .fg(Color::White)
    .bg(Color::Blue)
    .add_modifier(Modifier::BOLD);
const TEXT_STYLE: Style = Style::new().fg(Color::Cyan).bg(Color::Blue);
const BLANK_STYLE: Style = Style::new().bg(Color::LightBlue);
const FOOTER_KEY_STYLE: Style = Style::new().fg(Color::White).bg(Color::Blue);
const FOOTER_LABEL_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Cyan);
const PROMPT_STYLE: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

pub fn draw(frame: &mut Frame, editor: &Editor) {
    let area = frame.area();
    if area.width == 0 || area.height == 0 {
        return;
    }

    let header = Rect { height: 1, ..area };
    draw_header(frame, editor, header);

    if area.height > 2 {
        let text_area = Rect {
            y: area.y + 1,
            height: area.height - 2,
            ..area
        };
        draw_text(frame, editor, text_area);
        draw_cursor(frame, editor, text_area);
    }

    if area.height > 1 {
        let footer = Rect {
            y: area.y + area.height - 1,
            height: 1,
            ..area
        };
        draw_footer(frame, editor, footer);
    }
}

fn draw_header(frame: &mut Frame, editor: &Editor, area: Rect) {
    let mode = match editor.mode() {
        EditorMode::View => "[VIEW]",
        EditorMode::Edit => "[EDIT]",
    };
    let entry = match (editor.mode(), editor.entry_mode()) {
        (EditorMode::View, _) => "",
        (_, EntryMode::Insert) => "[INSERTING]",
        (_, EntryMode::Replace) => "[REPLACING]",
    };
    let modified = if editor.buffer().is_modified() {
        "[+]"
    } else {
        ""
    };
    let line = UiLine::from(vec![
        Span::raw(" TV  "),
        Span::raw(editor.file_name()),
        Span::raw("  "),
        Span::raw(mode),
        Span::raw(" "),
        Span::raw(entry),
        Span::raw(modified),
    ]);
    frame.render_widget(Paragraph::new(line).style(HEADER_STYLE), area);
}

fn draw_text(frame: &mut Frame, editor: &Editor, area: Rect) {
    let tab_stop = editor.tab_stop();
    let show_blanks = editor.show_blanks();
    let width = area.width as usize;

    let mut lines = Vec::with_capacity(area.height as usize);
    for slice in editor.visible_rows().iter().take(area.height as usize) {
        let mut spans = Vec::new();
        if slice.pad_cols > 0 {
            spans.push(Span::styled(" ".repeat(slice.pad_cols), TEXT_STYLE));
        }
        spans.push(Span::styled(expand_text(slice, tab_stop), TEXT_STYLE));
        if show_blanks && slice.line_index.is_some() {
            let used = slice.pad_cols + slice.text_cols;
            if used < width {
                spans.push(Span::styled(" ".repeat(width - used), BLANK_STYLE));
            }
        }
        lines.push(UiLine::from(spans));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

/// Flatten a row slice into printable text: tabs become spaces up to the
/// next stop (the slice's absolute start column gives the context) and
/// malformed bytes become the replacement character.
fn expand_text(slice: &RowSlice, tab_stop: usize) -> String {
    let bytes = slice.bytes;
    let mut out = String::with_capacity(bytes.len());
    let mut pos = 0;
    let mut col = slice.start_col;
    while pos < bytes.len() {
        if bytes[pos] == b'\t' {
            let width = tab_stop - col % tab_stop;
            out.push_str(&" ".repeat(width));
            pos += 1;
            col += width;
        } else {
            let (decoded, len) = unicode::decode_at(bytes, pos);
            match decoded {
                Some(c) => {
                    out.push(c);
                    col += unicode::char_width(c);
                }
                None => {
                    out.push('\u{FFFD}');
                    col += 1;
                }
            }
            pos += len;
        }
    }
    out
}

/// Inverse-video cell at the cursor (the hardware cursor stays hidden).
fn draw_cursor(frame: &mut Frame, editor: &Editor, area: Rect) {
    let Some((row, col)) = editor.cursor_screen() else {
        return;
    };
    if row >= area.height || col >= area.width {
        return;
    }
    let position = (area.x + col, area.y + row);
    if let Some(cell) = frame.buffer_mut().cell_mut(position) {
        cell.set_style(Style::new().add_modifier(Modifier::REVERSED));
    }
}

fn draw_footer(frame: &mut Frame, editor: &Editor, area: Rect) {
    if editor.confirm_exit_pending() {
        let prompt = " Unsaved changes: [s]ave and exit  [n] discard  [Esc] cancel ";
        frame.render_widget(Paragraph::new(prompt).style(PROMPT_STYLE), area);
        return;
    }
    if let Some(status) = editor.status() {
        frame.render_widget(
            Paragraph::new(format!(" {status}")).style(FOOTER_KEY_STYLE),
            area,
        );
        return;
    }
    let line = UiLine::from(vec![
        Span::styled(" 3", FOOTER_KEY_STYLE),
        Span::styled(" View ", FOOTER_LABEL_STYLE),
        Span::styled(" 4", FOOTER_KEY_STYLE),
        Span::styled(" Edit ", FOOTER_LABEL_STYLE),
        Span::styled(" 5", FOOTER_KEY_STYLE),
        Span::styled(" Blanks ", FOOTER_LABEL_STYLE),
        Span::styled(" 10", FOOTER_KEY_STYLE),
        Span::styled(" Exit ", FOOTER_LABEL_STYLE),
    ]);
    frame.render_widget(Paragraph::new(line).style(FOOTER_KEY_STYLE), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::LineBuffer;
    use crate::config::Config;
    use crate::event::{Direction, InputEvent};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn editor_with(content: &str, cols: u16, rows: u16) -> Editor {
        Editor::new(
            LineBuffer::from_str(content),
            Config::default(),
            cols,
            rows,
            false,
        )
    }

    fn render(editor: &Editor, cols: u16, rows: u16) -> ratatui::buffer::Buffer {
        let mut terminal = Terminal::new(TestBackend::new(cols, rows)).unwrap();
        terminal.draw(|frame| draw(frame, editor)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn row_text(buffer: &ratatui::buffer::Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .filter_map(|x| buffer.cell((x, y)).map(|c| c.symbol()))
            .collect()
    }

    #[test]
    fn test_text_row_rendered() {
        let editor = editor_with("hello", 20, 6);
        let rendered = render(&editor, 20, 6);
        assert!(row_text(&rendered, 1).starts_with("hello"));
    }

    #[test]
    fn test_header_shows_mode_and_modified() {
        let mut editor = editor_with("hello", 40, 6);
        editor.handle_event(InputEvent::InsertChar('x'));
        let rendered = render(&editor, 40, 6);
        let header = row_text(&rendered, 0);
        assert!(header.contains("[EDIT]"));
        assert!(header.contains("[INSERTING]"));
        assert!(header.contains("[+]"));
    }

    #[test]
    fn test_cursor_cell_is_reversed() {
        let editor = editor_with("hello", 20, 6);
        let rendered = render(&editor, 20, 6);
        let cell = rendered.cell((0, 1)).unwrap();
        assert!(cell.modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_view_mode_hides_cursor() {
        let mut editor = editor_with("hello", 20, 6);
        editor.handle_event(InputEvent::EnterViewMode);
        let rendered = render(&editor, 20, 6);
        let cell = rendered.cell((0, 1)).unwrap();
        assert!(!cell.modifier.contains(Modifier::REVERSED));
        assert!(row_text(&rendered, 0).contains("[VIEW]"));
    }

    #[test]
    fn test_tab_expands_to_stop() {
        let editor = editor_with("a\tb", 20, 6);
        let rendered = render(&editor, 20, 6);
        // 'a' at column 0, tab expands to column 4, 'b' at column 4.
        assert!(row_text(&rendered, 1).starts_with("a   b"));
    }

    #[test]
    fn test_scrolled_row_renders_tail() {
        let mut editor = editor_with("abcdefghij", 6, 6);
        editor.handle_event(InputEvent::Move(Direction::End));
        let rendered = render(&editor, 6, 6);
        assert!(row_text(&rendered, 1).starts_with("fghij"));
    }

    #[test]
    fn test_confirm_prompt_in_footer() {
        let mut editor = editor_with("hello", 60, 6);
        editor.handle_event(InputEvent::InsertChar('x'));
        editor.handle_event(InputEvent::Quit);
        let rendered = render(&editor, 60, 6);
        assert!(row_text(&rendered, 5).contains("Unsaved changes"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let editor = editor_with("hello", 20, 6);
        for (cols, rows) in [(1, 1), (2, 2), (5, 1), (1, 5)] {
            let _ = render(&editor, cols, rows);
        }
    }
}

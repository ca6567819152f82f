use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use ratatui::DefaultTerminal;
use std::path::PathBuf;
use tv::{keybindings, logs, ui, Config, Editor, InputEvent, LineBuffer};

/// A terminal text editor with UTF-8 aware cursor and rendering
#[derive(Parser, Debug)]
#[command(name = "tv", version)]
struct Cli {
    /// File to edit (created on first save if missing)
    file: PathBuf,

    /// Open read-only (view mode)
    #[arg(long)]
    view: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to log file for editor diagnostics
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logs::init(cli.log_file.as_deref()).context("opening log file")?;
    let config = Config::load(cli.config.as_deref())?;

    // The one user-facing failure: an unreadable file aborts here, before
    // the terminal is put into raw mode.
    let buffer = LineBuffer::load_or_new(&cli.file, &config.load_options())
        .with_context(|| format!("cannot open {}", cli.file.display()))?;

    let terminal = ratatui::init();
    let result = run(terminal, buffer, config, cli.view);
    ratatui::restore();
    result
}

fn run(mut terminal: DefaultTerminal, buffer: LineBuffer, config: Config, view: bool) -> Result<()> {
    let size = terminal.size()?;
    let mut editor = Editor::new(buffer, config, size.width, size.height, view);

    while !editor.should_exit() {
        terminal.draw(|frame| ui::draw(frame, &editor))?;

        match event::read()? {
            Event::Key(key) => {
                if let Some(input) = keybindings::translate(&key) {
                    editor.handle_event(input);
                }
            }
            Event::Resize(cols, rows) => editor.handle_event(InputEvent::Resize(cols, rows)),
            _ => {}
        }
    }
    Ok(())
}

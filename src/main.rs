mod app;
mod editor;
mod event;
mod manual;
mod ui;

use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use app::App;
use editor::Editor;
use zygote_config::Config;
use zygote_logger::LogLevel;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 2 {
        let program = args.first().map_or("zygote", String::as_str);
        eprintln!("Usage: {} [<file>]", program);
        std::process::exit(1);
    }

    let config = Config::load().unwrap_or_else(|err| {
        eprintln!("Failed to load config, using defaults: {:#}", err);
        Config::default()
    });

    let log_file_path = config
        .logging
        .file_path
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(Config::default_log_path);
    let min_log_level = LogLevel::from_str(&config.logging.min_level).unwrap_or(LogLevel::Info);
    zygote_logger::init(log_file_path, config.logging.max_entries, min_log_level);
    zygote_logger::info("Zygote started");

    let mut editor = Editor::new(config.editor.tab_width)?;
    if let Some(path) = args.get(1) {
        let result = editor.open_initial(path);
        editor.report(result);
    }

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = App::new(editor).run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

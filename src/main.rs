mod app;
mod draw;
mod keys;

use crate::app::App;
use cfl_api::CflApi;
use cflboard::Config;
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use log::LevelFilter;
use std::io::Stdout;
use std::time::Duration;
use std::{io, panic};
use tui::{Terminal, backend::CrosstermBackend};

const API_KEY_ENV: &str = "CFL_API_KEY";
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(250);

fn main() -> anyhow::Result<()> {
    if handle_cli_args() {
        return Ok(());
    }

    better_panic::install();

    let config = Config::load()?;
    let level = config.log_level.unwrap_or(LevelFilter::Info);
    tui_logger::init_logger(level)?;
    tui_logger::set_default_level(level);

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal()?;

    let api = CflApi::new(std::env::var(API_KEY_ENV).ok());
    let mut app = App::new(config, api);
    let result = main_ui_loop(&mut terminal, &mut app);

    cleanup_terminal()?;
    result
}

fn handle_cli_args() -> bool {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return false;
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            true
        }
        "-V" | "--version" => {
            println!("cflboard {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> &'static str {
    "cflboard - rotating CFL scoreboard

Usage:
  cflboard
  cflboard --help
  cflboard --version

Environment:
  CFLBOARD_CONFIG   Path to the JSON config (default ./config.json)
  CFL_API_KEY       CFL stats API key"
}

/// Draw, handle input, then let the board rotate and refresh. Refreshes
/// block the loop while they wait or retry.
fn main_ui_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> anyhow::Result<()> {
    draw::draw(terminal, app)?;
    app.start();

    loop {
        draw::draw(terminal, app)?;

        if crossterm_event::poll(INPUT_POLL_INTERVAL)?
            && let Event::Key(key_event) = crossterm_event::read()?
            && keys::handle_key_bindings(key_event, app).is_break()
        {
            return Ok(());
        }

        app.tick();
    }
}

fn setup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide)?;
    execute!(stdout, terminal::EnterAlternateScreen)?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    terminal::enable_raw_mode()
}

fn cleanup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::MoveTo(0, 0))?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    execute!(stdout, terminal::LeaveAlternateScreen)?;
    execute!(stdout, cursor::Show)?;
    terminal::disable_raw_mode()
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        let _ = cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}

mod app;
mod event;
mod ui;

use std::fs::File;
use std::io;

use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use glyph_invaders::clock::MonotonicClock;
use glyph_invaders::config::Config;
use glyph_invaders::game::Game;
use glyph_invaders::grid::Bounds;

use app::App;
use event::{Event, EventHandler};

const LOG_FILE: &str = "glyph-invaders.log";

fn init_logging() -> io::Result<()> {
    // The terminal is taken over by the game, so logs go to a file.
    let file = File::create(LOG_FILE)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> io::Result<()> {
    init_logging()?;

    // Measure once: one cell per glyph, minus the border drawn around the field
    let (cols, rows) = terminal::size()?;
    let bounds = Bounds::from_cells(cols.saturating_sub(2), rows.saturating_sub(2));
    log::info!("terminal {cols}x{rows}, playfield {bounds:?}");
    let config = Config::default();
    if !config.formation_fits(bounds) {
        log::warn!(
            "playfield {}x{} cannot hold {}x{} invaders; enlarge the terminal",
            bounds.width(),
            bounds.height(),
            config.invader_columns,
            config.invader_rows
        );
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    // Ask for key release events; terminals without support ignore this
    let keyboard_enhanced = execute!(
        stdout,
        PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                | KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
        )
    )
    .is_ok();
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Create game and event handler
    let game = Game::new(
        config,
        bounds,
        Box::new(MonotonicClock::new()),
        StdRng::from_entropy(),
    );
    let mut app = App::new(game);
    let event_handler = EventHandler::new(16); // ~60 FPS

    let result = run(&mut terminal, &mut app, &event_handler);

    // Restore terminal
    if keyboard_enhanced {
        let _ = execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags);
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        log::error!("game loop failed: {e}");
    }
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_handler: &EventHandler,
) -> io::Result<()> {
    loop {
        match event_handler.next()? {
            Event::Tick => app.on_tick(),
            Event::Key(key) => app.on_key(key),
        }

        if app.should_quit {
            return Ok(());
        }

        // Only repaint when the grid actually changed
        if app.screen.take_dirty() {
            terminal.draw(|frame| ui::render(frame, app))?;
        }
    }
}

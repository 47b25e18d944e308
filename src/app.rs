use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use glyph_invaders::config::KeyId;
use glyph_invaders::game::Game;
use glyph_invaders::grid::RenderSink;

/// Without release events a key counts as held while it keeps repeating.
const HOLD_WINDOW: Duration = Duration::from_millis(150);

/// Latest frame text handed over by the grid.
#[derive(Default)]
pub struct Screen {
    text: String,
    dirty: bool,
}

impl Screen {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// True once per presented frame.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl RenderSink for Screen {
    fn present(&mut self, frame: &str) {
        self.text.clear();
        self.text.push_str(frame);
        self.dirty = true;
    }
}

pub struct App {
    pub should_quit: bool,
    pub game: Game,
    pub screen: Screen,
    started: Instant,
    held: HashMap<KeyId, Instant>,
    // Flips on the first release event the terminal reports.
    release_events: bool,
}

impl App {
    pub fn new(game: Game) -> Self {
        Self {
            should_quit: false,
            game,
            screen: Screen::default(),
            started: Instant::now(),
            held: HashMap::new(),
            release_events: false,
        }
    }

    pub fn on_tick(&mut self) {
        if !self.release_events {
            self.expire_held_keys();
        }

        let timestamp = self.started.elapsed().as_secs_f64() * 1000.0;
        if let Err(e) = self.game.frame(timestamp, &mut self.screen) {
            log::error!("skipping frame: {e}");
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        if key.kind == KeyEventKind::Press
            && matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q'))
        {
            self.should_quit = true;
            return;
        }

        let Some(id) = key_id(key.code) else { return };
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if self.held.insert(id, Instant::now()).is_none() {
                    self.game.key_down(id);
                }
            }
            KeyEventKind::Release => {
                self.release_events = true;
                if self.held.remove(&id).is_some() {
                    self.game.key_up(id);
                }
            }
        }
    }

    fn expire_held_keys(&mut self) {
        let now = Instant::now();
        let expired: Vec<KeyId> = self
            .held
            .iter()
            .filter(|(_, seen)| now.duration_since(**seen) > HOLD_WINDOW)
            .map(|(id, _)| *id)
            .collect();
        for id in expired {
            self.held.remove(&id);
            self.game.key_up(id);
        }
    }
}

/// Maps terminal keys onto the numeric identifiers the game binds to.
fn key_id(code: KeyCode) -> Option<KeyId> {
    match code {
        KeyCode::Char(' ') => Some(32),
        KeyCode::Char(c) if c.is_ascii_alphanumeric() => Some(c.to_ascii_uppercase() as KeyId),
        KeyCode::Enter => Some(13),
        KeyCode::Left => Some(37),
        KeyCode::Up => Some(38),
        KeyCode::Right => Some(39),
        KeyCode::Down => Some(40),
        _ => None,
    }
}

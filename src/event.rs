use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, KeyEvent};

pub enum Event {
    /// Any key event, including repeats and releases.
    Key(KeyEvent),
    /// No input arrived within one tick; the app steps a frame.
    Tick,
}

/// Reads terminal input on its own thread and hands it to the game loop.
/// The thread ends once the handler is dropped or reading input fails.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::channel();
        let tick_rate = Duration::from_millis(tick_rate_ms);

        // Press, repeat and release all go through; the app tracks held keys.
        // A failed send means the receiver is gone, so the thread exits.
        thread::spawn(move || loop {
            if event::poll(tick_rate).unwrap_or(false) {
                match event::read() {
                    Ok(crossterm::event::Event::Key(key)) => {
                        if tx.send(Event::Key(key)).is_err() {
                            return;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        log::error!("input thread stopped: {e}");
                        return;
                    }
                }
            } else if tx.send(Event::Tick).is_err() {
                return;
            }
        });

        Self { rx }
    }

    /// Blocks until the next event. Errors once the input thread has stopped.
    pub fn next(&self) -> io::Result<Event> {
        self.rx
            .recv()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }
}

use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// Unified event type consumed by the app loop.
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Source of app events (keyboard, resize, countdown ticks).
pub trait EventSource: Send + 'static {
    /// Block until the next event. Returns None once the source is exhausted.
    fn recv(&self) -> Option<AppEvent>;
}

/// Production event source: one thread reading crossterm events and one
/// ticker thread emitting `Tick` at a fixed interval. The ticker is the one
/// periodic handle in the program; it keeps a steady cadence no matter how
/// fast the user types, and tick delivery after a session ends is gated by
/// the session's status guard rather than by tearing the thread down.
///
/// Bracketed-paste events are consumed and dropped here, so bulk pasted text
/// never reaches the input field.
pub struct CrosstermEventSource {
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new(tick_interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        let tick_tx = tx.clone();
        thread::spawn(move || loop {
            thread::sleep(tick_interval);
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        });

        thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if tx.send(AppEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(AppEvent::Resize).is_err() {
                        break;
                    }
                }
                // paste is rejected at the boundary, not surfaced
                Ok(CtEvent::Paste(_)) => {}
                Ok(_) => {}
                Err(_) => break,
            }
        });

        Self { rx }
    }
}

impl EventSource for CrosstermEventSource {
    fn recv(&self) -> Option<AppEvent> {
        self.rx.recv().ok()
    }
}

/// Test event source fed from a plain channel.
pub struct TestEventSource {
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv(&self) -> Option<AppEvent> {
        self.rx.recv().ok()
    }
}

/// Runner that advances the application one event at a time.
pub struct Runner<E: EventSource> {
    event_source: E,
}

impl<E: EventSource> Runner<E> {
    pub fn new(event_source: E) -> Self {
        Self { event_source }
    }

    /// Blocks for the next event; None means the source is gone and the
    /// loop should exit.
    pub fn step(&self) -> Option<AppEvent> {
        self.event_source.recv()
    }
}

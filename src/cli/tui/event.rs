//! Event handling for the TUI
//!
//! Terminal input runs on its own thread; AI worker threads push their
//! results through the same channel, so the main loop sees one ordered
//! stream of events.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

use crate::ai::{AiError, EstimateSuggestion, PrioritizedTask};
use crate::domain::TaskId;

/// Results arriving from AI worker threads
#[derive(Debug)]
pub enum AiEvent {
    /// Time estimation finished for one task
    Estimate {
        task: TaskId,
        result: Result<EstimateSuggestion, AiError>,
    },
    /// Prioritization of the whole list finished
    Prioritize(Result<Vec<PrioritizedTask>, AiError>),
    /// A chat response arrived
    Chat(Result<String, AiError>),
}

/// Events delivered to the main loop
#[derive(Debug)]
pub enum Event {
    /// Key press event
    Key(KeyEvent),
    /// Terminal resize event (width, height - currently unused but kept for future)
    #[allow(dead_code)]
    Resize(u16, u16),
    /// Tick event for periodic updates
    Tick,
    /// An AI worker thread finished
    Ai(AiEvent),
}

/// Handles terminal events in a separate thread
pub struct EventHandler {
    /// Event receiver
    rx: mpsc::Receiver<Event>,
    /// Event sender, cloned into AI worker threads
    tx: mpsc::Sender<Event>,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate in milliseconds
    pub fn new(tick_rate_ms: u64) -> Self {
        let tick_rate = Duration::from_millis(tick_rate_ms);
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();

        thread::spawn(move || {
            loop {
                // Poll for events with timeout
                if event::poll(tick_rate).unwrap_or(false) {
                    if let Ok(evt) = event::read() {
                        match evt {
                            CrosstermEvent::Key(key) => {
                                // Only send key press events, not release
                                if key.kind == KeyEventKind::Press
                                    && tx_clone.send(Event::Key(key)).is_err()
                                {
                                    break;
                                }
                            }
                            CrosstermEvent::Resize(w, h) => {
                                if tx_clone.send(Event::Resize(w, h)).is_err() {
                                    break;
                                }
                            }
                            _ => {}
                        }
                    }
                } else {
                    // Send tick event
                    if tx_clone.send(Event::Tick).is_err() {
                        break;
                    }
                }
            }
        });

        Self { rx, tx }
    }

    /// A sender for worker threads to report back through
    pub fn sender(&self) -> mpsc::Sender<Event> {
        self.tx.clone()
    }

    /// Receive the next event (blocking)
    pub fn next(&self) -> Result<Event> {
        Ok(self.rx.recv()?)
    }
}

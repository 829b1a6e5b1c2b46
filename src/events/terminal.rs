use crate::state::State;
use anyhow::Result;
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyEvent},
};
use log::*;
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            loop {
                if let Err(e) = poll_once(&tx_clone, tick_rate) {
                    error!("Stopping terminal event poll: {}", e);
                    break;
                }
            }
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State) -> Result<bool> {
        match self.rx.recv()? {
            Event::Input(event) => {
                debug!("Processing key event '{:?}'...", event);
                Ok(state.handle_key(event))
            }
            Event::Tick => Ok(true),
        }
    }
}

impl Default for Handler {
    fn default() -> Self {
        Handler::new()
    }
}

/// Wait up to one tick for a key event and forward it, followed by a tick.
///
fn poll_once(tx: &mpsc::Sender<Event<KeyEvent>>, tick_rate: Duration) -> Result<()> {
    if event::poll(tick_rate)? {
        if let CrosstermEvent::Key(key) = event::read()? {
            tx.send(Event::Input(key))?;
        }
    }
    tx.send(Event::Tick)?;
    Ok(())
}

//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task that
//! forwards them over a channel so the main loop stays non-blocking.  Picker
//! delegates post their settle notifications onto the same channel.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

use ruler_picker::Delegate;

use super::state::PickerId;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Terminal resized; the next draw picks up the new size.
    Resize,
    Tick,
    /// A picker came to rest on `index`.
    Settled { picker: PickerId, index: usize },
}

/// Spawns a background task that polls the terminal for events and sends them
/// through `tx`.
pub fn spawn_event_reader(tick_rate: Duration, tx: mpsc::UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        loop {
            // Use crossterm's poll with the tick rate so we can send Tick
            // events even when nothing is happening.
            let has_event = event::poll(tick_rate).unwrap_or(false);
            if has_event {
                if let Ok(ev) = event::read() {
                    let Some(app_event) = translate(ev) else {
                        continue;
                    };
                    if tx.send(app_event).is_err() {
                        break; // receiver dropped
                    }
                }
            } else {
                // No event within tick_rate: send a tick.
                if tx.send(AppEvent::Tick).is_err() {
                    break;
                }
            }
        }
    });
}

/// Terminal events the app reacts to; focus and paste events are dropped.
fn translate(ev: CtEvent) -> Option<AppEvent> {
    match ev {
        CtEvent::Key(k) => Some(AppEvent::Key(k)),
        CtEvent::Mouse(m) => Some(AppEvent::Mouse(m)),
        CtEvent::Resize(..) => Some(AppEvent::Resize),
        _ => None,
    }
}

/// Picker delegate that forwards settles to the main loop.
pub struct ChannelDelegate {
    picker: PickerId,
    tx: mpsc::UnboundedSender<AppEvent>,
}

impl ChannelDelegate {
    pub fn new(picker: PickerId, tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self { picker, tx }
    }
}

impl Delegate for ChannelDelegate {
    fn on_selection_settled(&mut self, index: usize) {
        // A closed channel means the app is shutting down.
        let _ = self.tx.send(AppEvent::Settled {
            picker: self.picker,
            index,
        });
    }
}

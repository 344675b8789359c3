use std::time::{Duration, Instant};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Produces tick, render and terminal events in a single thread.
///
/// A render is requested once after every tick or terminal event. Ticks take
/// priority over renders, and renders over terminal input, so a slow terminal
/// never delays gravity. Without a tick interval no tick events are produced.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    last_tick: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl EventLoop {
    fn new(now: Instant) -> Self {
        Self {
            tick_interval: None,
            last_tick: now,
            // draw the first frame right away
            dirty: true,
        }
    }

    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
    }

    /// Blocks until the next event is available.
    pub(super) fn next(&mut self) -> anyhow::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(event) = self.due_event(now) {
                return Ok(event);
            }

            if let Some(timeout) = self.timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    /// Returns the tick or render event that is due at `now`, if any.
    fn due_event(&mut self, now: Instant) -> Option<TuiEvent> {
        if let Some(interval) = self.tick_interval
            && now.duration_since(self.last_tick) >= interval
        {
            self.last_tick = now;
            self.dirty = true;
            return Some(TuiEvent::Tick);
        }
        if self.dirty {
            self.dirty = false;
            return Some(TuiEvent::Render);
        }
        None
    }

    /// Returns how long to wait for terminal input before the next tick.
    ///
    /// `None` means wait indefinitely.
    fn timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick = self.last_tick + self.tick_interval?;
        Some(next_tick.saturating_duration_since(now))
    }
}

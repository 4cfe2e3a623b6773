use std::time::{Duration, Instant};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Event loop state management.
///
/// Returns the next event via `next()`. Ticks are produced only while a tick
/// interval is set; a render is produced after every tick or terminal event.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    last_tick: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub fn new() -> Self {
        Self {
            tick_interval: None,
            last_tick: Instant::now(),
            dirty: true, // Initial render is required on startup
        }
    }

    /// Sets the tick interval.
    ///
    /// Pass `None` to disable tick events. Changing the interval restarts the
    /// tick timer so the first tick comes one full interval later.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        if self.tick_interval != interval {
            self.tick_interval = interval;
            self.last_tick = Instant::now();
        }
    }

    /// Returns the next event.
    ///
    /// Blocks until the next tick is due or a crossterm event occurs. Without a
    /// tick interval, only waits for crossterm events.
    pub(super) fn next(&mut self) -> anyhow::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(tick_interval) = self.tick_interval
                && now.duration_since(self.last_tick) >= tick_interval
            {
                self.last_tick = now;
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self.last_tick + self.tick_interval?;
        Some(next_tick_at.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_event_is_render() {
        let mut events = EventLoop::new();
        assert!(events.next().unwrap().is_render());
    }

    #[test]
    fn test_tick_after_interval() {
        let mut events = EventLoop::new();
        events.set_tick_interval(Some(Duration::from_millis(1)));
        std::thread::sleep(Duration::from_millis(5));
        assert!(events.next().unwrap().is_tick());
        // The tick marks the screen dirty.
        assert!(events.next().unwrap().is_render());
    }

    #[test]
    fn test_changing_interval_restarts_timer() {
        let mut events = EventLoop::new();
        events.set_tick_interval(Some(Duration::from_millis(1)));
        std::thread::sleep(Duration::from_millis(5));
        let before = events.last_tick;
        events.set_tick_interval(Some(Duration::from_secs(60)));
        assert!(events.last_tick > before);
        assert!(events.compute_timeout(Instant::now()).unwrap() > Duration::from_secs(59));

        events.set_tick_interval(None);
        assert_eq!(events.compute_timeout(Instant::now()), None);
    }
}

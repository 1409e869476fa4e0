use crossterm::event::{poll, Event, KeyEvent};
use tokio::time::{interval_at, Duration, Instant, Interval, MissedTickBehavior};

/// How long to wait between two polls of the terminal.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Period of the timer tick.
const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Merges terminal input and the one-second timer tick into a single
/// stream of events, delivered one at a time.
pub struct EventHandler {
    tick_interval: Interval,
    ticking: bool,
}

impl EventHandler {
    pub fn new() -> Self {
        let mut tick_interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
        tick_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            tick_interval,
            ticking: false,
        }
    }

    /// Turn the timer tick on or off. Turning it on starts a fresh period.
    pub fn set_ticking(&mut self, ticking: bool) {
        if ticking && !self.ticking {
            self.tick_interval.reset();
        }
        self.ticking = ticking;
    }

    pub async fn next_event(&mut self) -> anyhow::Result<EventType> {
        loop {
            // Check for terminal events without blocking first
            if poll(Duration::ZERO)? {
                match crossterm::event::read()? {
                    Event::Key(key) => return Ok(EventType::Key(key)),
                    Event::Resize(w, h) => return Ok(EventType::Resize(w, h)),
                    _ => continue,
                }
            }

            if self.ticking {
                tokio::select! {
                    _ = self.tick_interval.tick() => return Ok(EventType::Tick),
                    _ = tokio::time::sleep(POLL_INTERVAL) => {}
                }
            } else {
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        }
    }
}

#[derive(Debug, Clone)]
pub enum EventType {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

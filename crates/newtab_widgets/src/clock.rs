//! Clock face, greeting and the timers that refresh them.

use chrono::{DateTime, TimeZone, Timelike, Utc};
use std::fmt::Display;
use std::time::Duration;

/// 24-hour `HH:MM`.
pub fn clock_label<Z>(now: &DateTime<Z>) -> String
where
    Z: TimeZone,
    Z::Offset: Display,
{
    now.format("%H:%M").to_string()
}

pub fn greeting<T: Timelike>(now: &T, name: &str) -> String {
    let salutation = match now.hour() {
        h if h < 12 => "Good Morning",
        h if h < 18 => "Good Afternoon",
        _ => "Good Evening",
    };
    if name.is_empty() {
        salutation.to_string()
    } else {
        format!("{} {}", salutation, name)
    }
}

/// Fires when wall-clock time crosses a multiple of `interval`.
///
/// The first poll always fires.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    last_slot: Option<i64>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_slot: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn poll(&mut self, now: DateTime<Utc>) -> bool {
        let millis = i64::try_from(self.interval.as_millis()).unwrap_or(i64::MAX).max(1);
        let slot = now.timestamp_millis().div_euclid(millis);
        match self.last_slot {
            Some(last) if slot <= last => false,
            _ => {
                self.last_slot = Some(slot);
                true
            }
        }
    }
}

/// Which parts of the page need redrawing after a poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Redraw {
    pub clock: bool,
    pub greeting: bool,
    pub now_marker: bool,
}

impl Redraw {
    pub fn any(self) -> bool {
        self.clock || self.greeting || self.now_marker
    }
}

/// The page's independent timers.
#[derive(Debug, Clone)]
pub struct Schedule {
    pub clock: Ticker,
    pub greeting: Ticker,
    pub now_marker: Ticker,
}

impl Schedule {
    /// Clock every second, greeting and timeline marker every minute.
    pub fn standard() -> Self {
        Self {
            clock: Ticker::new(Duration::from_secs(1)),
            greeting: Ticker::new(Duration::from_secs(60)),
            now_marker: Ticker::new(Duration::from_secs(
                crate::timeline::NOW_MARKER_INTERVAL_SECS,
            )),
        }
    }

    pub fn poll(&mut self, now: DateTime<Utc>) -> Redraw {
        Redraw {
            clock: self.clock.poll(now),
            greeting: self.greeting.poll(now),
            now_marker: self.now_marker.poll(now),
        }
    }
}

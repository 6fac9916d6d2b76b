//! Day-view timeline geometry.
//!
//! [`layout`] is a pure function of the events and the current instant.
//! Horizontal positions are percentages of a 24 hour day.

use chrono::{DateTime, TimeZone, Timelike};
use newtab_common::CalendarEvent;
use std::fmt::Display;

/// Narrowest bar, in percent of the day.
pub const MIN_WIDTH_PERCENT: f64 = 0.5;
/// Narrowest bar on screen, whatever the percentage.
pub const MIN_WIDTH_PX: u32 = 4;
pub const PAST_OPACITY: f64 = 0.4;
/// How often the now marker moves.
pub const NOW_MARKER_INTERVAL_SECS: u64 = 60;

const MINUTES_PER_DAY: f64 = 24.0 * 60.0;

/// Position of a wall-clock time within its day, in `[0, 100)`. Seconds are ignored.
pub fn day_percent<T: Timelike>(t: &T) -> f64 {
    f64::from(t.hour() * 60 + t.minute()) / MINUTES_PER_DAY * 100.0
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub hour: u32,
    pub left: f64,
    pub label: String,
}

/// Hour marks `00:00` through `24:00`.
pub fn ticks() -> Vec<Tick> {
    (0..=24)
        .map(|hour| Tick {
            hour,
            left: f64::from(hour) / 24.0 * 100.0,
            label: format!("{:02}:00", hour),
        })
        .collect()
}

/// How much text fits inside a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelDensity {
    /// Under 30 minutes: title only, small font, tight padding
    Compact,
    /// Under 45 minutes: title only
    TitleOnly,
    /// Title and time range
    Full,
}

impl LabelDensity {
    pub fn for_minutes(minutes: i64) -> Self {
        if minutes < 30 {
            LabelDensity::Compact
        } else if minutes < 45 {
            LabelDensity::TitleOnly
        } else {
            LabelDensity::Full
        }
    }

    pub fn shows_time_range(self) -> bool {
        self == LabelDensity::Full
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventBar {
    pub id: String,
    pub title: String,
    pub left: f64,
    pub width: f64,
    pub min_width_px: u32,
    pub opacity: f64,
    pub density: LabelDensity,
    /// Inline subtitle; `None` unless the density is [`LabelDensity::Full`].
    pub subtitle: Option<String>,
    /// Full title and time range, shown on hover.
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineLayout {
    pub ticks: Vec<Tick>,
    pub now_left: f64,
    pub bars: Vec<EventBar>,
}

/// Lays out the timed events of `events` relative to `now`.
///
/// Event times are shown in `now`'s time zone. All-day events produce no bar.
pub fn layout<Z>(events: &[CalendarEvent], now: &DateTime<Z>) -> TimelineLayout
where
    Z: TimeZone,
    Z::Offset: Display,
{
    let zone = now.timezone();
    let bars = events
        .iter()
        .filter_map(|event| {
            let start = event.start.date_time?.with_timezone(&zone);
            let end = event.end.date_time?.with_timezone(&zone);
            Some(bar(event, &start, &end, now))
        })
        .collect();

    TimelineLayout {
        ticks: ticks(),
        now_left: day_percent(now),
        bars,
    }
}

fn bar<Z>(event: &CalendarEvent, start: &DateTime<Z>, end: &DateTime<Z>, now: &DateTime<Z>) -> EventBar
where
    Z: TimeZone,
    Z::Offset: Display,
{
    let left = day_percent(start);
    let width = (day_percent(end) - left).max(MIN_WIDTH_PERCENT);
    let density = LabelDensity::for_minutes((end.clone() - start.clone()).num_minutes());
    let range = format!("{} - {}", start.format("%H:%M"), end.format("%H:%M"));

    EventBar {
        id: event.id.clone(),
        title: event.summary.clone(),
        left,
        width,
        min_width_px: MIN_WIDTH_PX,
        opacity: if end < now { PAST_OPACITY } else { 1.0 },
        density,
        subtitle: density.shows_time_range().then(|| range.clone()),
        tooltip: format!("{}\n{}", event.summary, range),
    }
}

//! Calendar widget: cached access token, today's events, error overlay.

use async_trait::async_trait;
use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use newtab_common::CalendarEvent;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::WidgetError;
use crate::storage::StateStore;
use crate::timeline::{layout, TimelineLayout};

#[cfg(test)]
use mockall::automock;

/// Direct calendar access with a bearer token.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EventsApi: Send + Sync {
    /// Provider event-list body for `[time_min, time_max]`.
    async fn list_events(
        &self,
        access_token: &str,
        time_min: DateTime<Tz>,
        time_max: DateTime<Tz>,
    ) -> Result<Value, WidgetError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum CalendarState {
    NoToken,
    Loading,
    Ready(Vec<CalendarEvent>),
}

/// Start and end of `now`'s calendar day in `tz`.
///
/// The end is `23:59:59.999`. If local midnight does not exist because of a
/// DST jump, the day starts at the first valid instant after it.
pub fn local_day_bounds(now: DateTime<Utc>, tz: Tz) -> Result<(DateTime<Tz>, DateTime<Tz>), WidgetError> {
    let date = now.with_timezone(&tz).date_naive();
    let resolve = |time: NaiveTime| {
        let naive = date.and_time(time);
        tz.from_local_datetime(&naive)
            .earliest()
            .or_else(|| tz.from_local_datetime(&(naive + chrono::Duration::hours(1))).earliest())
    };

    let start = NaiveTime::from_hms_milli_opt(0, 0, 0, 0).and_then(&resolve);
    let end = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).and_then(&resolve);
    match (start, end) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(WidgetError::Time(format!("no local day window for {} in {}", date, tz))),
    }
}

/// Events under `items`. A missing or non-array `items` means no events;
/// entries that do not parse are skipped.
pub fn parse_items(body: &Value) -> Vec<CalendarEvent> {
    let Some(items) = body.get("items").and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(event) => Some(event),
            Err(e) => {
                debug!("skipping unparsable event: {}", e);
                None
            }
        })
        .collect()
}

pub struct CalendarWidget<S, A> {
    store: S,
    api: A,
    tz: Tz,
    token: Option<String>,
    state: CalendarState,
    error: Option<String>,
}

impl<S, A> CalendarWidget<S, A>
where
    S: StateStore<String>,
    A: EventsApi,
{
    pub fn new(store: S, api: A, tz: Tz) -> Self {
        Self {
            store,
            api,
            tz,
            token: None,
            state: CalendarState::NoToken,
            error: None,
        }
    }

    pub fn state(&self) -> &CalendarState {
        &self.state
    }

    /// Inline error from the last failed fetch.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn time_zone(&self) -> Tz {
        self.tz
    }

    /// Restores a cached token and fetches if there is one.
    pub async fn mount(&mut self) {
        self.mount_at(Utc::now()).await
    }

    pub async fn mount_at(&mut self, now: DateTime<Utc>) {
        match self.store.load() {
            Ok(Some(token)) if !token.is_empty() => {
                self.token = Some(token);
                self.refresh_at(now).await;
            }
            Ok(_) => self.state = CalendarState::NoToken,
            Err(e) => {
                warn!("Cached access token unreadable: {}", e);
                self.state = CalendarState::NoToken;
            }
        }
    }

    /// Caches a token from the interactive sign-in and fetches.
    pub async fn on_auth_success(&mut self, access_token: &str) {
        self.on_auth_success_at(access_token, Utc::now()).await
    }

    pub async fn on_auth_success_at(&mut self, access_token: &str, now: DateTime<Utc>) {
        if let Err(e) = self.store.save(&access_token.to_string()) {
            warn!("Failed to cache access token: {}", e);
        }
        self.token = Some(access_token.to_string());
        self.refresh_at(now).await;
    }

    /// Fetches today's events with the current token. Without one this is a no-op.
    pub async fn refresh_at(&mut self, now: DateTime<Utc>) {
        let Some(token) = self.token.clone() else {
            self.state = CalendarState::NoToken;
            return;
        };
        let previous = match std::mem::replace(&mut self.state, CalendarState::Loading) {
            CalendarState::Ready(events) => events,
            _ => Vec::new(),
        };

        let result = match local_day_bounds(now, self.tz) {
            Ok((start, end)) => self.api.list_events(&token, start, end).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(body) => {
                let events = parse_items(&body);
                info!("Loaded {} calendar events", events.len());
                self.error = None;
                self.state = CalendarState::Ready(events);
            }
            Err(WidgetError::Unauthorized) => {
                info!("Access token rejected; signing out of calendar");
                if let Err(e) = self.store.clear() {
                    warn!("Failed to clear cached access token: {}", e);
                }
                self.token = None;
                self.error = None;
                self.state = CalendarState::NoToken;
            }
            Err(e) => {
                warn!("Failed to fetch events: {}", e);
                self.error = Some("Failed to fetch events".to_string());
                self.state = CalendarState::Ready(previous);
            }
        }
    }

    /// Timeline for the loaded events, in the widget's zone.
    pub fn timeline_at(&self, now: DateTime<Utc>) -> Option<TimelineLayout> {
        match &self.state {
            CalendarState::Ready(events) => Some(layout(events, &now.with_timezone(&self.tz))),
            _ => None,
        }
    }
}

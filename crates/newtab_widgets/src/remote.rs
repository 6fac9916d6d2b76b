//! HTTP implementations of the widget seams.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use chrono_tz::Tz;
use newtab_common::LinkItem;
use reqwest::{header, Client, Response, StatusCode};
use serde_json::Value;

use crate::calendar::EventsApi;
use crate::error::WidgetError;
use crate::quick_links::RemoteLinks;

pub const GOOGLE_CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

async fn check(response: Response) -> Result<Response, WidgetError> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(WidgetError::Unauthorized);
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(WidgetError::Http {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

/// Client of this site's `/api/links` endpoint.
///
/// A browser attaches the session cookie on its own; here it is passed in.
#[derive(Debug, Clone)]
pub struct HttpLinksClient {
    http: Client,
    base_url: String,
    cookie: Option<String>,
}

impl HttpLinksClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cookie: None,
        }
    }

    /// Sends `Cookie: google_refresh_token=<token>` with every request.
    pub fn with_refresh_token(mut self, refresh_token: &str) -> Self {
        self.cookie = Some(format!(
            "{}={}",
            newtab_common::session::SESSION_COOKIE,
            refresh_token
        ));
        self
    }

    fn url(&self) -> String {
        format!("{}/api/links", self.base_url)
    }

    fn with_cookie(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.cookie {
            Some(cookie) => request.header(header::COOKIE, cookie),
            None => request,
        }
    }
}

#[async_trait]
impl RemoteLinks for HttpLinksClient {
    async fn fetch(&self) -> Result<Vec<LinkItem>, WidgetError> {
        let response = self.with_cookie(self.http.get(self.url())).send().await?;
        Ok(check(response).await?.json::<Vec<LinkItem>>().await?)
    }

    async fn push(&self, links: &[LinkItem]) -> Result<(), WidgetError> {
        let response = self
            .with_cookie(self.http.post(self.url()))
            .json(links)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

/// Google Calendar events list, called straight from the page.
#[derive(Debug, Clone)]
pub struct GoogleEventsApi {
    http: Client,
    api_base: String,
    calendar_id: String,
}

impl GoogleEventsApi {
    pub fn new(http: Client) -> Self {
        Self::with_base(http, GOOGLE_CALENDAR_API_BASE, "primary")
    }

    pub fn with_base(http: Client, api_base: impl Into<String>, calendar_id: impl Into<String>) -> Self {
        Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            calendar_id: calendar_id.into(),
        }
    }
}

#[async_trait]
impl EventsApi for GoogleEventsApi {
    async fn list_events(
        &self,
        access_token: &str,
        time_min: DateTime<Tz>,
        time_max: DateTime<Tz>,
    ) -> Result<Value, WidgetError> {
        let url = format!("{}/calendars/{}/events", self.api_base, self.calendar_id);
        let time_min = time_min.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Millis, true);
        let time_max = time_max.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Millis, true);

        let response = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .query(&[
                ("timeMin", time_min.as_str()),
                ("timeMax", time_max.as_str()),
                ("singleEvents", "true"),
                ("orderBy", "startTime"),
            ])
            .send()
            .await?;
        Ok(check(response).await?.json::<Value>().await?)
    }
}

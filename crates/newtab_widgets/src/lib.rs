//! Client-side core of the newtab page.
//!
//! Everything here is plain state plus injected seams, so the page logic can
//! be driven and tested without a browser:
//!
//! - [`calendar::CalendarWidget`] caches an access token and loads today's events
//! - [`timeline::layout`] turns events into bar geometry
//! - [`quick_links::QuickLinksWidget`] keeps the link list in sync
//! - [`keyboard`] maps key presses to link selection
//! - [`clock`] renders the clock and greeting and schedules redraws

pub mod calendar;
pub mod clock;
pub mod error;
pub mod keyboard;
pub mod quick_links;
#[cfg(test)]
mod quick_links_proptest;
pub mod remote;
pub mod storage;
pub mod timeline;
#[cfg(test)]
mod timeline_proptest;

pub use error::WidgetError;

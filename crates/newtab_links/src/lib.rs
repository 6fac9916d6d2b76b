//! Quick links store for newtab
//!
//! Persists the user's quick-link list per session so it follows the user
//! across browsers. The session is identified by the refresh-token cookie;
//! lists are keyed by a hash of that token, never by the token itself.
//!
//! # API Endpoints
//!
//! - `GET /links` - the stored list, `[]` when nothing was saved yet
//! - `POST /links` - replace the stored list
//!
//! The router is nested under `/api` by the backend.

pub mod error;
#[cfg(feature = "openapi")]
pub mod doc;
pub mod handlers;
pub mod repository;
pub mod repository_factory;
#[cfg(test)]
mod repository_test;
pub mod routes;

pub use error::LinksError;
pub use repository::{FileLinkRepository, InMemoryLinkRepository, LinkRepository};
pub use repository_factory::create_repository;
pub use routes::{routes, routes_with_repository};

#[cfg(feature = "openapi")]
pub mod openapi {
    pub use crate::doc::LinksApiDoc;
}

// --- File: crates/newtab_gcal/src/lib.rs ---
pub mod auth;
#[cfg(feature = "openapi")]
pub mod doc;
pub mod handlers;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
pub mod routes;
pub mod service;

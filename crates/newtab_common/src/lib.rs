// --- File: crates/newtab_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Shared data structures
pub mod services; // Service abstractions
pub mod session; // Cookie session helpers

// Re-export error types and utilities for easier access
pub use error::{missing_input, upstream, HttpStatusCode, NewtabError};

// Re-export HTTP utilities for easier access
pub use http::{
    client::{client_for, create_client, HTTP_CLIENT},
    error_response,
};

// Re-export logging utilities for easier access
pub use logging::init_from_config;

pub use models::{CalendarEvent, EventDateTime, LinkItem};
pub use services::BoxFuture;

// --- File: crates/newtab_common/src/services.rs ---
//! Service abstractions shared by the feature crates.
//!
//! Provider and repository traits return [`BoxFuture`] so they stay object
//! safe and can sit behind `Arc<dyn ...>` in router state.

use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

// --- File: crates/newtab_common/src/http/client.rs ---
use once_cell::sync::Lazy;
use reqwest::{Client, Error as ReqwestError};
use std::time::Duration;

/// A shared HTTP client for provider calls.
///
/// No request timeout is set; a hung provider is bounded only by the
/// transport. Use [`create_client`] with `http.timeout_secs` to cap it.
pub static HTTP_CLIENT: Lazy<Client> = Lazy::new(Client::new);

/// Creates a new HTTP client with custom configuration.
///
/// # Arguments
///
/// * `timeout_secs` - Optional overall request timeout
/// * `follow_redirects` - Whether the client should follow redirects
pub fn create_client(
    timeout_secs: Option<u64>,
    follow_redirects: bool,
) -> Result<Client, ReqwestError> {
    let mut builder = Client::builder().redirect(if follow_redirects {
        reqwest::redirect::Policy::default()
    } else {
        reqwest::redirect::Policy::none()
    });
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build()
}

/// Returns the shared client, or a dedicated one when a timeout is configured.
pub fn client_for(timeout_secs: Option<u64>) -> Result<Client, ReqwestError> {
    match timeout_secs {
        None => Ok(HTTP_CLIENT.clone()),
        Some(_) => create_client(timeout_secs, true),
    }
}

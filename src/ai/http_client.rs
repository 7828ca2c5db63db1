//! Shared HTTP Client Module
//!
//! Provides a global, lazy-initialized HTTP client for Gemini API calls.
//! Built on first use and reused afterwards.

use once_cell::sync::Lazy;
use reqwest::Client;
use std::time::Duration;

/// Upper bound for one generateContent round trip. Long documents take a
/// while; this is the only timeout in the pipeline.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Global HTTP client for Gemini API calls
pub static GEMINI_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .tcp_nodelay(true)
        .build()
        .expect("Failed to create Gemini HTTP client")
});

/// Get the global Gemini HTTP client
#[inline]
pub fn gemini_client() -> &'static Client {
    &GEMINI_CLIENT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_is_created() {
        let _ = gemini_client();
    }

    #[test]
    fn test_client_is_same_instance() {
        let client1 = gemini_client();
        let client2 = gemini_client();
        assert!(std::ptr::eq(client1, client2));
    }
}

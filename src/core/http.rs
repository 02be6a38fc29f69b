//! The one reqwest client a run shares between the registry fetch, the size
//! checks and every download.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_ENCODING};
use reqwest::Client;

use crate::core::error::UpdaterResult;

pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Only the connect is bounded; a large pak may legitimately stream for minutes.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// Bodies are written as received, so `Content-Length` has to describe the
/// bytes on disk rather than an encoded transfer.
fn default_headers() -> HeaderMap {
    HeaderMap::from_iter([(ACCEPT_ENCODING, HeaderValue::from_static("identity"))])
}

pub fn build_http_client() -> UpdaterResult<Client> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(default_headers())
        .connect_timeout(CONNECT_TIMEOUT)
        .build()?;
    Ok(client)
}

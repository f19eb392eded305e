/// Network step: one HTTP GET per download

use log::debug;
use reqwest::blocking::Client;

use crate::error::FetchError;

/// Anything that can turn a URL into response bytes
pub trait ImageFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Fetches over HTTP(S) with reqwest's blocking client
///
/// A fresh client is built for every call, so the fetcher is safe to
/// create and drop anywhere (including inside the iced runtime). No
/// headers, timeout or retry are configured; redirects follow reqwest
/// defaults.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpFetcher {
    direct: bool,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ignore proxies configured in the environment
    pub fn direct() -> Self {
        Self { direct: true }
    }
}

impl ImageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let mut builder = Client::builder();
        if self.direct {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;
        let response = client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes()?;
        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body.to_vec())
    }
}

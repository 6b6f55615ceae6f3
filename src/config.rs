//! Client configuration.
//!
//! The base URL is part of the config rather than a crate constant because
//! RosterHub exposes multiple endpoint variants (regional hosts, sandbox)
//! and the mock server in tests needs to stand in for all of them.

use std::time::Duration;

use url::Url;

/// Production API root. Versioned; paths are joined relative to it.
pub const DEFAULT_BASE_URL: &str = "https://api.rosterhub.io/v2/";

/// Items requested per page on "get many" endpoints.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Configuration for [`RosterClient`](crate::RosterClient).
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// API root every request path is joined against.
    pub base_url: Url,
    /// Bearer token attached to every request.
    pub token: String,
    /// Page size for paginated GETs.
    pub page_size: u32,
    /// Per-request timeout applied by the underlying HTTP client.
    pub request_timeout: Duration,
}

impl ApiConfig {
    /// Configuration for the production API with the given bearer token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            token: token.into(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Point the client at a different API root.
    ///
    /// A trailing slash is appended to the path if missing, so joining
    /// relative request paths never drops the last path segment.
    #[must_use]
    pub fn with_base_url(mut self, mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        self.base_url = base_url;
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Resolve a relative request path against the configured base.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path)
    }
}

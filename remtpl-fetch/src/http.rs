//! Blocking HTTP fetcher built on `ureq`.

use std::fmt;
use std::time::Duration;

use base64::prelude::*;
use url::Url;

use remtpl_core::Credentials;

use crate::error::FetchError;
use crate::{FetchedTemplate, TemplateSource};

/// Performs exactly one GET per [`TemplateSource::fetch`] call.
///
/// No retries, no custom headers beyond `Authorization`.
#[derive(Clone)]
pub struct HttpFetcher {
    agent: ureq::Agent,
    timeout: Option<Duration>,
}

impl fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpFetcher")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl HttpFetcher {
    /// `timeout` bounds the whole request; `None` waits indefinitely.
    pub fn new(timeout: Option<Duration>) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        HttpFetcher {
            agent: builder.build(),
            timeout,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        HttpFetcher::new(None)
    }
}

impl TemplateSource for HttpFetcher {
    fn fetch(
        &self,
        url: &Url,
        credentials: Option<&Credentials>,
    ) -> Result<FetchedTemplate, FetchError> {
        let mut request = self.agent.get(url.as_str());
        if let Some(credentials) = credentials {
            request = request.set("Authorization", &basic_auth(credentials));
        }

        tracing::info!("fetching template: {url}");
        let response = match request.call() {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                tracing::warn!("{url} answered HTTP {status}; using the body as template source");
                response
            }
            Err(err) => {
                return Err(FetchError::Transport {
                    url: url.to_string(),
                    message: err.to_string(),
                })
            }
        };

        let status = response.status();
        let body = response.into_string().map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })?;
        tracing::debug!("fetched {} bytes (HTTP {status})", body.len());
        Ok(FetchedTemplate { body, status })
    }
}

/// `Basic base64(username:password)`.
fn basic_auth(credentials: &Credentials) -> String {
    let pair = format!(
        "{}:{}",
        credentials.username,
        credentials.password.expose()
    );
    format!("Basic {}", BASE64_STANDARD.encode(pair))
}

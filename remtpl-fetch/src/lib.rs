//! Template fetching for `remtpl`.
//!
//! The pipeline only sees the [`TemplateSource`] trait; [`HttpFetcher`] is
//! the production implementation.

mod error;
mod http;

use url::Url;

use remtpl_core::Credentials;

pub use error::FetchError;
pub use http::HttpFetcher;

/// Raw template text plus the HTTP status it came with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedTemplate {
    pub body: String,
    pub status: u16,
}

/// Anything that can hand back template source for a URL.
pub trait TemplateSource {
    fn fetch(
        &self,
        url: &Url,
        credentials: Option<&Credentials>,
    ) -> Result<FetchedTemplate, FetchError>;
}

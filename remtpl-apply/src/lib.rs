//! # remtpl-apply
//!
//! Fingerprint-based change detection, the destination writer, and the
//! single-run pipeline that ties fetcher, renderer and writer together.
//!
//! Call [`apply`] with a validated [`remtpl_core::RemoteTemplate`], the fact
//! mapping and a [`remtpl_fetch::TemplateSource`].

pub mod diff;
pub mod error;
pub mod fingerprint;
pub mod pipeline;
pub mod writer;

pub use diff::{content_diff, detect_change, ChangeReport, ContentDiff};
pub use error::ApplyError;
pub use fingerprint::fingerprint;
pub use pipeline::{apply, ApplyOutcome};

//! # remtpl-renderer
//!
//! Tera-based rendering of a fetched template against host facts and user
//! variables.
//!
//! ## Usage
//!
//! ```rust
//! use remtpl_core::VarMap;
//! use remtpl_renderer::{render_str, RenderContext};
//! use serde_json::json;
//!
//! let mut facts = VarMap::new();
//! facts.insert("env".into(), json!("prod"));
//! let mut vars = VarMap::new();
//! vars.insert("env".into(), json!("staging"));
//!
//! let ctx = RenderContext::merge(&facts, &vars);
//! assert_eq!(render_str("env={{ env }}", &ctx).unwrap(), "env=staging");
//! ```

pub mod context;
pub mod engine;
pub mod error;

pub use context::RenderContext;
pub use engine::{render_str, TemplateEngine};
pub use error::RenderError;

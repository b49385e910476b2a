//! remtpl core library: domain types and module parameters.
//!
//! Public API surface:
//! - [`types`]: [`RemoteTemplate`], [`Credentials`], [`RunMode`], [`VarMap`]
//! - [`params`]: raw [`ModuleParams`], args/vars file loading, validation
//! - [`error`]: [`ConfigError`]

pub mod error;
pub mod params;
pub mod types;

pub use error::ConfigError;
pub use params::{load_args_file, load_vars_file, parse_var_assignment, ModuleParams, PASSWORD_ENV};
pub use types::{Credentials, Password, RemoteTemplate, RunMode, VarMap};

//! Module parameters: the raw argument set handed over by the invoking
//! framework, and its validation into a [`RemoteTemplate`].
//!
//! # Sources
//!
//! Parameters arrive either as CLI flags or as an args file. An args file is
//! JSON or YAML (YAML is parsed, JSON being a subset of it) and is one of:
//!
//! ```text
//! { "url": "...", "dest": "...", "vars": { ... } }
//! { "ANSIBLE_MODULE_ARGS": { "url": "...", "_ansible_check_mode": true } }
//! ```
//!
//! CLI flags are layered on top with [`ModuleParams::overlay`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use url::Url;

use crate::error::ConfigError;
use crate::types::{Credentials, Password, RemoteTemplate, RunMode, VarMap};

/// Environment variable the CLI reads the basic-auth password from.
pub const PASSWORD_ENV: &str = "REMTPL_PASSWORD";

// ---------------------------------------------------------------------------
// ModuleParams
// ---------------------------------------------------------------------------

/// Unvalidated parameter set. Every field is optional at this stage.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ModuleParams {
    #[serde(deserialize_with = "scalar_string")]
    pub url: Option<String>,
    pub dest: Option<PathBuf>,
    #[serde(deserialize_with = "scalar_string")]
    pub username: Option<String>,
    #[serde(deserialize_with = "scalar_password")]
    pub password: Option<Password>,
    pub vars: Option<Value>,
    #[serde(alias = "_ansible_check_mode")]
    pub check_mode: bool,
    #[serde(alias = "_ansible_diff")]
    pub diff: bool,
    pub timeout_secs: Option<u64>,
}

/// Key under which the invoking framework wraps module parameters.
const WRAPPER_KEY: &str = "ANSIBLE_MODULE_ARGS";

impl ModuleParams {
    /// Layer `top` over `self`: every value set in `top` wins.
    ///
    /// `vars` mappings are merged key by key rather than replaced, and the
    /// check/diff switches are sticky once either side enables them.
    pub fn overlay(self, top: ModuleParams) -> ModuleParams {
        let vars = match (self.vars, top.vars) {
            (Some(Value::Object(mut base)), Some(Value::Object(over))) => {
                base.extend(over);
                Some(Value::Object(base))
            }
            (base, over) => over.or(base),
        };

        ModuleParams {
            url: top.url.or(self.url),
            dest: top.dest.or(self.dest),
            username: top.username.or(self.username),
            password: top.password.or(self.password),
            vars,
            check_mode: self.check_mode || top.check_mode,
            diff: self.diff || top.diff,
            timeout_secs: top.timeout_secs.or(self.timeout_secs),
        }
    }

    /// Fill in `password` when a username is set but no password was given.
    ///
    /// A fallback password without a username is dropped, so an exported
    /// password variable never turns an anonymous run into a config error.
    pub fn with_fallback_password(mut self, password: Option<Password>) -> ModuleParams {
        let has_username = self.username.as_deref().is_some_and(|u| !u.trim().is_empty());
        if has_username && self.password.is_none() {
            self.password = password;
        }
        self
    }

    /// Validate into the immutable run configuration.
    ///
    /// A `timeout_secs` of `0` is treated as "no timeout".
    pub fn validate(self) -> Result<(RemoteTemplate, RunMode), ConfigError> {
        let raw_url = non_empty(self.url).ok_or(ConfigError::MissingParam { name: "url" })?;
        let url = parse_url(&raw_url)?;

        let dest = self
            .dest
            .filter(|d| !d.as_os_str().is_empty())
            .ok_or(ConfigError::MissingParam { name: "dest" })?;

        let credentials = match (non_empty(self.username), self.password) {
            (Some(username), Some(password)) => Some(Credentials { username, password }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(ConfigError::IncompleteCredentials {
                    present: "username",
                    missing: "password",
                })
            }
            (None, Some(_)) => {
                return Err(ConfigError::IncompleteCredentials {
                    present: "password",
                    missing: "username",
                })
            }
        };

        let vars = vars_mapping(self.vars)?;
        let timeout = self
            .timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        let mode = RunMode {
            check: self.check_mode,
            diff: self.diff,
        };

        Ok((
            RemoteTemplate {
                url,
                dest,
                credentials,
                vars,
                timeout,
            },
            mode,
        ))
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load module parameters from a JSON or YAML args file.
pub fn load_args_file(path: &Path) -> Result<ModuleParams, ConfigError> {
    let contents = read(path)?;
    let parse_err = |source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    };

    let args = match serde_yaml::from_str::<serde_yaml::Value>(&contents).map_err(parse_err)? {
        serde_yaml::Value::Null => return Ok(ModuleParams::default()),
        serde_yaml::Value::Mapping(mut doc) => match doc.remove(WRAPPER_KEY) {
            Some(wrapped) => wrapped,
            None => serde_yaml::Value::Mapping(doc),
        },
        other => other,
    };
    serde_yaml::from_value(args).map_err(parse_err)
}

/// Load a JSON or YAML mapping of variables. An empty file yields no variables.
pub fn load_vars_file(path: &Path) -> Result<VarMap, ConfigError> {
    let contents = read(path)?;
    if contents.trim().is_empty() {
        return Ok(VarMap::new());
    }
    let value: Value = serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    vars_mapping(Some(value))
}

/// Parse a `KEY=VALUE` command-line assignment.
///
/// The value is read as a YAML scalar so `port=8080` yields a number and
/// `debug=true` a boolean; anything YAML rejects is kept as a plain string.
pub fn parse_var_assignment(assignment: &str) -> Result<(String, Value), ConfigError> {
    let invalid = || ConfigError::InvalidVar {
        assignment: assignment.to_string(),
    };
    let (key, raw) = assignment.split_once('=').ok_or_else(invalid)?;
    let key = key.trim();
    if key.is_empty() {
        return Err(invalid());
    }

    let value = if raw.is_empty() {
        Value::String(String::new())
    } else {
        serde_yaml::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
    };
    Ok((key.to_string(), value))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|source| ConfigError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme {
            url: raw.to_string(),
            scheme: other.to_string(),
        }),
    }
}

fn vars_mapping(value: Option<Value>) -> Result<VarMap, ConfigError> {
    match value {
        None | Some(Value::Null) => Ok(VarMap::new()),
        Some(Value::Object(map)) => Ok(map),
        Some(other) => Err(ConfigError::VarsNotMapping {
            found: value_kind(&other),
        }),
    }
}

/// Accept strings, numbers and booleans for string parameters; YAML args
/// files routinely carry `password: 123456`.
fn scalar_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string, found {}",
            value_kind(&other)
        ))),
    }
}

fn scalar_password<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Password>, D::Error> {
    Ok(scalar_string(deserializer)?.map(Password::from))
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Host fact collection for `remtpl`.
//!
//! [`collect_host_facts`] gathers a flat mapping of facts about the machine
//! (hostname, OS family, distribution, architecture, user, environment,
//! current time). [`load_facts_file`] reads facts supplied by the invoking
//! framework; [`merge_facts`] layers them over the collected ones.

mod error;
mod host;
pub mod os_release;

use std::path::Path;

use serde_json::Value;

pub use error::FactError;
pub use host::{collect_host_facts, Facts, HostProbe};

/// Load a JSON or YAML mapping of facts. An empty file yields no facts.
pub fn load_facts_file(path: &Path) -> Result<Facts, FactError> {
    let contents = std::fs::read_to_string(path).map_err(|e| error::io_err(path, e))?;
    if contents.trim().is_empty() {
        return Ok(Facts::new());
    }
    let value: Value = serde_yaml::from_str(&contents).map_err(|source| FactError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(FactError::NotMapping {
            path: path.to_path_buf(),
        }),
    }
}

/// Overlay `supplied` facts on `collected` ones; supplied values win.
pub fn merge_facts(mut collected: Facts, supplied: Facts) -> Facts {
    collected.extend(supplied);
    collected
}

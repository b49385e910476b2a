//! Render context: facts overlaid with user variables.

use serde::Serialize;
use serde_json::Value;

use remtpl_core::VarMap;

use crate::error::RenderError;

/// Merged variable mapping handed to the template engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RenderContext {
    vars: VarMap,
}

impl RenderContext {
    /// Start from `facts`, then overlay `vars`; on a key collision the user
    /// variable wins. Nested mappings are replaced, not deep-merged.
    pub fn merge(facts: &VarMap, vars: &VarMap) -> Self {
        let mut merged = facts.clone();
        merged.extend(vars.iter().map(|(k, v)| (k.clone(), v.clone())));
        RenderContext { vars: merged }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.vars.get(key)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        tera::Context::from_serialize(&self.vars).map_err(RenderError::context)
    }
}

impl From<VarMap> for RenderContext {
    fn from(vars: VarMap) -> Self {
        RenderContext { vars }
    }
}

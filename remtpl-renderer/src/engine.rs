//! Tera rendering engine for a single, fetched-at-runtime template.

use tera::Tera;

use crate::context::RenderContext;
use crate::error::RenderError;

/// Name the fetched template is registered under inside Tera.
pub const TEMPLATE_NAME: &str = "remote";

/// A parsed template, ready to render against any number of contexts.
///
/// Autoescaping is off: output is arbitrary text (config files, scripts),
/// never HTML.
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Parse `source`. Syntax errors surface here, before any context exists.
    pub fn from_source(source: &str) -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_template(TEMPLATE_NAME, source)
            .map_err(RenderError::syntax)?;
        Ok(TemplateEngine { tera })
    }

    /// Render against `ctx`. Undefined variables are errors; no partial
    /// output is ever returned.
    pub fn render(&self, ctx: &RenderContext) -> Result<String, RenderError> {
        let tera_ctx = ctx.to_tera_context()?;
        self.tera
            .render(TEMPLATE_NAME, &tera_ctx)
            .map_err(RenderError::render)
    }
}

/// Parse and render in one step.
pub fn render_str(source: &str, ctx: &RenderContext) -> Result<String, RenderError> {
    TemplateEngine::from_source(source)?.render(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use remtpl_core::VarMap;
    use serde_json::{json, Value};

    fn ctx(value: Value) -> RenderContext {
        match value {
            Value::Object(m) => RenderContext::from(m),
            _ => unreachable!("test fixture must be an object"),
        }
    }

    #[test]
    fn interpolates_variables() {
        let out = render_str("Hello {{ name }}", &ctx(json!({"name": "Ann"}))).unwrap();
        assert_eq!(out, "Hello Ann");
    }

    #[test]
    fn does_not_escape_markup() {
        let out = render_str("{{ body }}", &ctx(json!({"body": "<b>a & b</b>"}))).unwrap();
        assert_eq!(out, "<b>a & b</b>");
    }

    #[test]
    fn engine_renders_repeatedly() {
        let engine = TemplateEngine::from_source("v={{ v }}").unwrap();
        assert_eq!(engine.render(&ctx(json!({"v": 1}))).unwrap(), "v=1");
        assert_eq!(engine.render(&ctx(json!({"v": 2}))).unwrap(), "v=2");
    }

    #[test]
    fn undefined_variable_names_the_variable() {
        let err = render_str("Hello {{ missing }}", &RenderContext::from(VarMap::new()))
            .unwrap_err();
        match err {
            RenderError::Render { message } => assert!(message.contains("missing"), "{message}"),
            other => panic!("expected Render error, got {other:?}"),
        }
    }

    #[test]
    fn unclosed_tag_is_a_syntax_error() {
        let err = TemplateEngine::from_source("{% if x %}never closed").err().expect("error");
        assert!(matches!(err, RenderError::Syntax { .. }));
    }
}

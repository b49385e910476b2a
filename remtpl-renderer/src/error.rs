//! Error types for remtpl-renderer.

use thiserror::Error;

/// All errors that can arise from template rendering.
///
/// Messages carry the whole Tera cause chain (line/column for syntax errors,
/// the missing variable name for undefined references).
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template source failed to parse.
    #[error("template syntax error: {message}")]
    Syntax { message: String },

    /// The template parsed but could not be evaluated against the context.
    #[error("template render error: {message}")]
    Render { message: String },

    /// The render context could not be converted into a Tera context.
    #[error("context serialization error: {message}")]
    Context { message: String },
}

impl RenderError {
    pub(crate) fn syntax(err: tera::Error) -> Self {
        RenderError::Syntax {
            message: describe(&err),
        }
    }

    pub(crate) fn render(err: tera::Error) -> Self {
        RenderError::Render {
            message: describe(&err),
        }
    }

    pub(crate) fn context(err: tera::Error) -> Self {
        RenderError::Context {
            message: describe(&err),
        }
    }
}

/// Flatten a Tera error and its sources into one line.
fn describe(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

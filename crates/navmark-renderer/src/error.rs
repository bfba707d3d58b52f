//! Renderer error types.

/// Error raised while processing navigation directives.
///
/// Both variants abort the render pass; there are no retries and no
/// partial output. Segment lookups that miss
/// ([`NavError::KeyNotFound`](navmark_state::NavError::KeyNotFound)) are
/// converted to empty results at the lookup boundary and never reach this
/// type.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Directive arguments do not parse.
    #[error("line {line}: unexpected format for {directive} directive: {reason}")]
    Syntax {
        /// The directive being parsed.
        directive: &'static str,
        /// Line number in the input (1-indexed).
        line: usize,
        /// What was wrong with the arguments.
        reason: String,
    },

    /// The scope variable was rebound in an intervening frame between
    /// bind and render, so the directive can no longer tell which logical
    /// page section the state belongs to.
    #[error("'{name}' variable has been altered in current context")]
    ScopeIntegrity {
        /// The scope-variable name.
        name: String,
    },
}

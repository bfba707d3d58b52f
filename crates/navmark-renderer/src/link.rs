//! The `:::navlink` container directive.

use navmark_state::Nav;

use crate::args::NavLinkArgs;
use crate::escape::escape_html;
use crate::processor::ResolveUrlFn;
use crate::scope::{ScopeChain, Value};

/// Handler for the `:::navlink` container directive.
///
/// Composes a navigation-state lookup with a resolved URL: when the
/// pattern is satisfied by the active path the block content is wrapped
/// in a link carrying the stored formatting text, otherwise in a plain
/// wrapper element. A missing or empty navigation binding renders the
/// wrapper branch; it is never an error.
///
/// Open links are tracked on a stack so nested directives close in order.
#[derive(Debug)]
pub struct NavLinkDirective {
    default_var: String,
    inactive_element: String,
    open: Vec<bool>,
}

impl NavLinkDirective {
    /// Create a handler with the given default variable name and
    /// inactive wrapper element.
    #[must_use]
    pub fn new(default_var: impl Into<String>, inactive_element: impl Into<String>) -> Self {
        Self {
            default_var: default_var.into(),
            inactive_element: inactive_element.into(),
            open: Vec::new(),
        }
    }

    /// Handle the opening `:::navlink[pattern]{url="…"}`.
    pub fn start(
        &mut self,
        args: &NavLinkArgs,
        scope: &ScopeChain,
        resolve_url: &ResolveUrlFn,
    ) -> String {
        let name = args.var_name.as_deref().unwrap_or(&self.default_var);
        let nav = scope.lookup(name).and_then(Value::as_nav);
        let active = nav.is_some_and(|nav| is_link(nav, &args.pattern));
        self.open.push(active);

        if active {
            let url = resolve_url(&args.url_args);
            let text_attr = nav
                .and_then(Nav::text)
                .map_or_else(String::new, |text| format_text_attr(&text));
            format!(r#"<a href="{}"{text_attr}>"#, escape_html(&url))
        } else {
            format!("<{}>", self.inactive_element)
        }
    }

    /// Handle the closing `:::`. Returns `None` on a stray close.
    pub fn end(&mut self) -> Option<String> {
        self.open.pop().map(|active| {
            if active {
                "</a>".to_owned()
            } else {
                format!("</{}>", self.inactive_element)
            }
        })
    }

    /// Whether any opened link is still waiting for its close.
    #[must_use]
    pub fn has_open(&self) -> bool {
        !self.open.is_empty()
    }

    /// Drop any unclosed state, returning how many opens were pending.
    pub fn reset(&mut self) -> usize {
        let pending = self.open.len();
        self.open.clear();
        pending
    }
}

impl Default for NavLinkDirective {
    fn default() -> Self {
        Self::new("nav", "span")
    }
}

/// The is-link decision for a pattern against a navigation state.
///
/// Patterns containing `!` use the matcher verbatim. Plain patterns also
/// accept a strict ancestor of the active path, so the "Products" entry
/// stays a link while `products.electronics` is active. That asymmetry
/// with the `!` branch is a confirmed contract, not an accident.
fn is_link(nav: &Nav, pattern: &str) -> bool {
    if pattern.contains('!') {
        return nav.matches(pattern);
    }
    let active = nav.active_path();
    active
        .strip_prefix(pattern)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
}

/// Render the stored text as a link attribute fragment.
///
/// Text containing `=` is already an attribute string and is inserted
/// verbatim; anything else is wrapped as a `class` attribute.
fn format_text_attr(text: &str) -> String {
    if text.contains('=') {
        text.to_owned()
    } else {
        format!(r#" class="{text}""#)
    }
}

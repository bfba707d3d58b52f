//! The `::nav` declare directive.

use navmark_state::Nav;

use crate::args::NavArgs;
use crate::error::RenderError;
use crate::scope::{ScopeChain, Value};

/// Handler for the `::nav` leaf directive.
///
/// Binds navigation state into the outermost scope frame, copy-on-write.
/// Only the first declaring directive in a render pass populates the
/// tree; later ones are no-ops. Under template inheritance the most
/// specific fragment is evaluated first, so its declaration wins over an
/// ancestor's.
#[derive(Debug)]
pub struct NavDirective {
    default_var: String,
}

impl NavDirective {
    /// Create a handler with the given default variable name.
    #[must_use]
    pub fn new(default_var: impl Into<String>) -> Self {
        Self {
            default_var: default_var.into(),
        }
    }

    /// Process one declare directive against the scope chain.
    ///
    /// Produces no output; the directive's entire effect is on the chain.
    ///
    /// # Errors
    ///
    /// [`RenderError::ScopeIntegrity`] when the variable resolved from the
    /// outermost frame and the variable resolved through the full chain
    /// are not the same binding: some other construct rebound the name in
    /// an intervening frame, and proceeding could attribute navigation
    /// state to the wrong page section.
    pub fn process(&self, args: &NavArgs, scope: &mut ScopeChain) -> Result<(), RenderError> {
        let name = args.var_name.as_deref().unwrap_or(&self.default_var);

        let existing = {
            let root_value = scope.root_get(name);
            let chain_value = scope.lookup(name);
            let altered = match (root_value, chain_value) {
                (None, None) => false,
                (Some(root), Some(chain)) => !Value::same_identity(root, chain),
                _ => true,
            };
            if altered {
                return Err(RenderError::ScopeIntegrity {
                    name: name.to_owned(),
                });
            }
            chain_value.and_then(Value::as_nav).cloned()
        };

        let nav = match existing {
            Some(nav) => nav,
            // Unbound, or a non-Nav binding at the root frame: bind a
            // fresh state over it.
            None => {
                let nav = Nav::new();
                scope.root_bind(name, Value::Nav(nav.clone()));
                nav
            }
        };

        if let Some(text) = &args.text {
            nav.set_text(text.clone());
            return Ok(());
        }

        let Some(item) = args.item.as_deref() else {
            // Bare `::nav`: the binding now exists, nothing to declare.
            return Ok(());
        };

        if nav.is_non_empty() {
            tracing::debug!(var = name, item, "navigation already declared, keeping first");
            return Ok(());
        }

        nav.declare(item);
        Ok(())
    }
}

impl Default for NavDirective {
    fn default() -> Self {
        Self::new("nav")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav_args(content: &str, attrs: &str) -> NavArgs {
        NavArgs::parse(content, attrs, 1).unwrap()
    }

    fn bound_nav(scope: &ScopeChain, name: &str) -> Nav {
        scope
            .lookup(name)
            .and_then(Value::as_nav)
            .cloned()
            .expect("nav binding")
    }

    #[test]
    fn test_declare_binds_and_populates() {
        let directive = NavDirective::default();
        let mut scope = ScopeChain::new();

        directive
            .process(&nav_args("banana", ""), &mut scope)
            .unwrap();

        let nav = bound_nav(&scope, "nav");
        assert_eq!(nav.active_path(), "banana");
        assert!(nav.get("banana").is_non_empty());
        assert!(!nav.get("apple").is_non_empty());
    }

    #[test]
    fn test_first_declaration_wins() {
        let directive = NavDirective::default();
        let mut scope = ScopeChain::new();

        directive
            .process(&nav_args("banana", ""), &mut scope)
            .unwrap();
        directive
            .process(&nav_args("apple", ""), &mut scope)
            .unwrap();

        assert_eq!(bound_nav(&scope, "nav").active_path(), "banana");
    }

    #[test]
    fn test_for_variable() {
        let directive = NavDirective::default();
        let mut scope = ScopeChain::new();

        directive
            .process(&nav_args("banana", "for=othernav"), &mut scope)
            .unwrap();

        assert!(scope.lookup("nav").is_none());
        assert_eq!(bound_nav(&scope, "othernav").active_path(), "banana");
    }

    #[test]
    fn test_bare_directive_claims_the_variable() {
        let directive = NavDirective::default();
        let mut scope = ScopeChain::new();

        directive.process(&nav_args("", ""), &mut scope).unwrap();

        let nav = bound_nav(&scope, "nav");
        assert!(!nav.is_non_empty());
        assert_eq!(nav.active_path(), "");
    }

    #[test]
    fn test_claim_then_declare_still_populates() {
        let directive = NavDirective::default();
        let mut scope = ScopeChain::new();

        directive.process(&nav_args("", ""), &mut scope).unwrap();
        directive
            .process(&nav_args("banana", ""), &mut scope)
            .unwrap();

        assert_eq!(bound_nav(&scope, "nav").active_path(), "banana");
    }

    #[test]
    fn test_text_applies_regardless_of_binding_state() {
        let directive = NavDirective::default();
        let mut scope = ScopeChain::new();

        directive
            .process(&nav_args("", "text='selected'"), &mut scope)
            .unwrap();
        let nav = bound_nav(&scope, "nav");
        assert_eq!(nav.text(), Some("selected".to_owned()));
        assert!(!nav.is_non_empty());

        // Text after a declaration updates the same binding.
        directive
            .process(&nav_args("banana", ""), &mut scope)
            .unwrap();
        directive
            .process(&nav_args("", "text='active'"), &mut scope)
            .unwrap();
        let nav = bound_nav(&scope, "nav");
        assert_eq!(nav.text(), Some("active".to_owned()));
        assert_eq!(nav.active_path(), "banana");
    }

    #[test]
    fn test_declare_is_visible_from_outer_frames() {
        let directive = NavDirective::default();
        let mut scope = ScopeChain::new();

        scope.push_frame();
        directive
            .process(&nav_args("banana", ""), &mut scope)
            .unwrap();
        scope.pop_frame();

        assert_eq!(bound_nav(&scope, "nav").active_path(), "banana");
    }

    #[test]
    fn test_rebound_variable_in_inner_frame_is_an_error() {
        let directive = NavDirective::default();
        let mut scope = ScopeChain::new();

        scope.root_bind("nav", Value::text("anything"));
        scope.push_frame();
        scope.set_local("nav", Value::text("test"));

        let err = directive
            .process(&nav_args("test", ""), &mut scope)
            .unwrap_err();
        assert!(matches!(err, RenderError::ScopeIntegrity { name } if name == "nav"));
    }

    #[test]
    fn test_variable_only_in_inner_frame_is_an_error() {
        let directive = NavDirective::default();
        let mut scope = ScopeChain::new();

        scope.push_frame();
        scope.set_local("nav", Value::text("shadow"));

        let err = directive
            .process(&nav_args("test", ""), &mut scope)
            .unwrap_err();
        assert!(matches!(err, RenderError::ScopeIntegrity { .. }));
    }

    #[test]
    fn test_non_nav_root_binding_is_replaced() {
        let directive = NavDirective::default();
        let mut scope = ScopeChain::new();

        scope.root_bind("nav", Value::text("anything"));
        directive
            .process(&nav_args("banana", ""), &mut scope)
            .unwrap();

        assert_eq!(bound_nav(&scope, "nav").active_path(), "banana");
    }

    #[test]
    fn test_declared_nav_survives_unrelated_cow_writes() {
        let directive = NavDirective::default();
        let mut scope = ScopeChain::new();

        directive
            .process(&nav_args("banana", ""), &mut scope)
            .unwrap();
        scope.root_bind("other", Value::text("x"));
        directive
            .process(&nav_args("apple", ""), &mut scope)
            .unwrap();

        assert_eq!(bound_nav(&scope, "nav").active_path(), "banana");
    }
}

//! Scope-frame chain for render passes.
//!
//! Models the host engine's context stack as an immutable list of
//! mappings: frames are reference counted, and a write to the outermost
//! frame replaces that frame's slot with an updated copy. A root frame
//! shared with a sibling chain therefore never observes the write.

use std::collections::HashMap;
use std::rc::Rc;

use navmark_state::Nav;

/// A value bound in a scope frame.
///
/// Frame values are reference counted so that identity survives frame
/// clones: a copied frame still points at the same binding, and "same
/// object" checks keep working after a copy-on-write.
#[derive(Clone, Debug)]
pub enum Value {
    /// A navigation state binding.
    Nav(Nav),
    /// An opaque string binding from the host engine.
    Text(Rc<str>),
}

impl Value {
    /// Build a text binding.
    #[must_use]
    pub fn text(value: impl Into<Rc<str>>) -> Self {
        Self::Text(value.into())
    }

    /// The nav binding, if this value is one.
    #[must_use]
    pub fn as_nav(&self) -> Option<&Nav> {
        match self {
            Self::Nav(nav) => Some(nav),
            Self::Text(_) => None,
        }
    }

    /// Whether two values are the same binding (identity, not equality).
    #[must_use]
    pub fn same_identity(a: &Self, b: &Self) -> bool {
        match (a, b) {
            (Self::Nav(x), Self::Nav(y)) => x.same_root(y),
            (Self::Text(x), Self::Text(y)) => Rc::ptr_eq(x, y),
            _ => false,
        }
    }
}

/// One scope frame: a mapping from variable name to bound value.
pub type Frame = HashMap<String, Value>;

/// Stack of scope frames for one render pass, outermost first.
#[derive(Clone, Debug)]
pub struct ScopeChain {
    frames: Vec<Rc<Frame>>,
}

impl ScopeChain {
    /// Create a chain with a single empty root frame.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames: vec![Rc::new(Frame::new())],
        }
    }

    /// Create a chain over an existing root frame.
    ///
    /// The frame may be shared with other chains; writes through
    /// [`root_bind`](Self::root_bind) stay local to this chain.
    #[must_use]
    pub fn with_root(root: Rc<Frame>) -> Self {
        Self { frames: vec![root] }
    }

    /// Handle to the current root frame, for building sibling chains.
    #[must_use]
    pub fn root_frame(&self) -> Rc<Frame> {
        Rc::clone(&self.frames[0])
    }

    /// Enter a nested fragment scope.
    pub fn push_frame(&mut self) {
        self.frames.push(Rc::new(Frame::new()));
    }

    /// Leave the innermost fragment scope. The root frame is never popped.
    pub fn pop_frame(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Bind a value in the innermost frame.
    pub fn set_local(&mut self, name: impl Into<String>, value: Value) {
        if let Some(frame) = self.frames.last_mut() {
            Rc::make_mut(frame).insert(name.into(), value);
        }
    }

    /// Resolve a name through the chain, innermost frame first.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }

    /// The value bound at the outermost frame, ignoring inner frames.
    #[must_use]
    pub fn root_get(&self, name: &str) -> Option<&Value> {
        self.frames[0].get(name)
    }

    /// Bind a value at the outermost frame, copy-on-write.
    ///
    /// The root frame is cloned with the one key updated and the clone
    /// replaces the slot, so a chain sharing the old frame keeps seeing
    /// the old contents.
    pub fn root_bind(&mut self, name: impl Into<String>, value: Value) {
        let mut frame = (*self.frames[0]).clone();
        frame.insert(name.into(), value);
        self.frames[0] = Rc::new(frame);
    }
}

impl Default for ScopeChain {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_innermost_first() {
        let mut scope = ScopeChain::new();
        scope.set_local("name", Value::text("outer"));
        scope.push_frame();
        scope.set_local("name", Value::text("inner"));

        assert!(matches!(
            scope.lookup("name"),
            Some(Value::Text(s)) if &**s == "inner"
        ));

        scope.pop_frame();
        assert!(matches!(
            scope.lookup("name"),
            Some(Value::Text(s)) if &**s == "outer"
        ));
    }

    #[test]
    fn test_lookup_missing() {
        let scope = ScopeChain::new();
        assert!(scope.lookup("nav").is_none());
    }

    #[test]
    fn test_root_get_ignores_inner_frames() {
        let mut scope = ScopeChain::new();
        scope.push_frame();
        scope.set_local("name", Value::text("inner"));

        assert!(scope.root_get("name").is_none());
        assert!(scope.lookup("name").is_some());
    }

    #[test]
    fn test_root_pop_is_a_no_op() {
        let mut scope = ScopeChain::new();
        scope.pop_frame();
        scope.set_local("name", Value::text("still here"));
        assert!(scope.lookup("name").is_some());
    }

    #[test]
    fn test_root_bind_does_not_leak_into_sibling_chain() {
        let scope_a = ScopeChain::new();
        let mut scope_b = ScopeChain::with_root(scope_a.root_frame());

        scope_b.root_bind("nav", Value::Nav(Nav::new()));

        assert!(scope_b.root_get("nav").is_some());
        assert!(scope_a.root_get("nav").is_none());
    }

    #[test]
    fn test_root_bind_preserves_other_bindings() {
        let mut scope = ScopeChain::new();
        scope.root_bind("a", Value::text("one"));
        scope.root_bind("b", Value::text("two"));
        assert!(scope.root_get("a").is_some());
        assert!(scope.root_get("b").is_some());
    }

    #[test]
    fn test_identity_survives_copy_on_write() {
        let mut scope = ScopeChain::new();
        let nav = Nav::new();
        scope.root_bind("nav", Value::Nav(nav.clone()));
        scope.root_bind("other", Value::text("x"));

        let bound = scope.root_get("nav").unwrap();
        assert!(Value::same_identity(bound, &Value::Nav(nav)));
    }

    #[test]
    fn test_identity_distinguishes_bindings() {
        let a = Value::Nav(Nav::new());
        let b = Value::Nav(Nav::new());
        assert!(!Value::same_identity(&a, &b));

        let s = Value::text("same");
        let t = Value::text("same");
        assert!(!Value::same_identity(&s, &t));
        assert!(Value::same_identity(&s, &s.clone()));

        assert!(!Value::same_identity(&a, &s));
    }
}

//! The navigation state value.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::matcher;

/// A node in the navigation tree.
///
/// The tree always holds at most one leaf-bearing path: declaring rebuilds
/// it wholesale as a single chain of single-segment branches ending in a
/// [`Leaf`](Self::Leaf).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NavNode {
    /// Terminal marker: this segment is the active item.
    Leaf,
    /// Nested segments below this one.
    Branch(BTreeMap<String, NavNode>),
}

/// Error returned when a [`Nav`] lookup fails.
///
/// Call sites at the lookup boundary treat this as "no navigation set for
/// that branch" and convert it to an empty result (see [`Nav::get`]); it
/// is never a reason to abort rendering.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// The requested segment is not present in the current view's tree.
    #[error("no navigation entry for segment '{segment}'")]
    KeyNotFound {
        /// The segment that was looked up.
        segment: String,
    },
}

#[derive(Debug)]
struct NavRoot {
    tree: NavNode,
    text: Option<String>,
}

/// Hierarchical navigation state for one render pass.
///
/// A `Nav` is a shared handle: cloning it, or deriving a view with
/// [`view`](Self::view)/[`get`](Self::get), yields another handle onto the
/// same logical root. Writes through any handle ([`declare`](Self::declare),
/// [`set_text`](Self::set_text)) are visible from every other handle of
/// that root, which is what lets a deeply nested fragment declare state
/// that an ancestor fragment later reads.
///
/// Equality between two `Nav` values compares their
/// [`active_path`](Self::active_path) results. Pattern matching against a
/// path expression goes through [`matches`](Self::matches).
///
/// # Example
///
/// ```
/// use navmark_state::Nav;
///
/// let nav = Nav::new();
/// nav.declare("fruit.banana");
///
/// let fruit = nav.get("fruit");
/// assert!(fruit.is_non_empty());
/// assert_eq!(fruit.active_path(), "banana");
///
/// fruit.set_text(" class=\"active\"");
/// assert_eq!(nav.to_string(), " class=\"active\"");
/// ```
#[derive(Clone, Debug)]
pub struct Nav {
    root: Rc<RefCell<NavRoot>>,
    /// Segments from the root down to this view.
    path: Vec<String>,
}

impl Nav {
    /// Create an empty navigation state (falsy, no active path).
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Rc::new(RefCell::new(NavRoot {
                tree: NavNode::Branch(BTreeMap::new()),
                text: None,
            })),
            path: Vec::new(),
        }
    }

    /// Rebuild this view's sub-tree as a single chain of nested
    /// single-segment branches ending in a leaf.
    ///
    /// An empty path produces the empty tree: the state stays falsy but
    /// the binding exists, which is how a fragment claims the scope
    /// variable without asserting a concrete item. Declaring again
    /// overwrites the previous tree entirely; the at-most-once guarantee
    /// lives in the directive layer, not here.
    pub fn declare(&self, path: &str) {
        let mut chain = NavNode::Branch(BTreeMap::new());
        if !path.is_empty() {
            let mut node = NavNode::Leaf;
            for segment in path.rsplit('.') {
                let mut branch = BTreeMap::new();
                branch.insert(segment.to_owned(), node);
                node = NavNode::Branch(branch);
            }
            chain = node;
        }

        let mut root = self.root.borrow_mut();
        let mut node = &mut root.tree;
        for segment in &self.path {
            if !matches!(node, NavNode::Branch(_)) {
                *node = NavNode::Branch(BTreeMap::new());
            }
            let NavNode::Branch(map) = node else {
                unreachable!("node was just made a branch");
            };
            node = map
                .entry(segment.clone())
                .or_insert_with(|| NavNode::Branch(BTreeMap::new()));
        }
        *node = chain;
    }

    /// Store the formatting string on the logical root.
    ///
    /// Visible from every view of this root, regardless of which view
    /// performed the set. Overwrites any previous value.
    pub fn set_text(&self, value: impl Into<String>) {
        self.root.borrow_mut().text = Some(value.into());
    }

    /// The formatting string stored on the logical root, if any.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        self.root.borrow().text.clone()
    }

    /// A view of the sub-tree at `segment`, sharing this view's root.
    ///
    /// # Errors
    ///
    /// [`NavError::KeyNotFound`] when the segment is absent from the
    /// current view's tree.
    pub fn view(&self, segment: &str) -> Result<Self, NavError> {
        let present = self.with_node(|node| {
            matches!(node, Some(NavNode::Branch(map)) if map.contains_key(segment))
        });
        if !present {
            return Err(NavError::KeyNotFound {
                segment: segment.to_owned(),
            });
        }
        let mut path = self.path.clone();
        path.push(segment.to_owned());
        Ok(Self {
            root: Rc::clone(&self.root),
            path,
        })
    }

    /// Like [`view`](Self::view), but a missing segment yields an empty,
    /// falsy `Nav` instead of an error.
    ///
    /// This is the lookup-boundary form used by template conditionals,
    /// where "no navigation set for that branch" must read as false rather
    /// than abort the render.
    #[must_use]
    pub fn get(&self, segment: &str) -> Self {
        self.view(segment).unwrap_or_default()
    }

    /// The resolved active path of this view's sub-tree, as a dot-joined
    /// string, or the empty string when the sub-tree is empty.
    ///
    /// The walk is depth-first and takes the first branch it finds; trees
    /// built through [`declare`](Self::declare) hold a single chain, so
    /// the result is the declared path (relative to this view).
    #[must_use]
    pub fn active_path(&self) -> String {
        self.with_node(|node| {
            let mut segments = Vec::new();
            if let Some(NavNode::Branch(map)) = node {
                walk_active(map, &mut segments);
            }
            segments.join(".")
        })
    }

    /// Test this view's active path against a pattern expression.
    ///
    /// See [`matches`](crate::matches) for the pattern forms.
    #[must_use]
    pub fn matches(&self, pattern: &str) -> bool {
        matcher::matches(&self.active_path(), pattern)
    }

    /// Whether `component` is exactly one of the dot-separated segments of
    /// the active path. Always `false` when no path is active.
    #[must_use]
    pub fn contains(&self, component: &str) -> bool {
        let path = self.active_path();
        !path.is_empty() && path.split('.').any(|segment| segment == component)
    }

    /// Whether this view's tree has any entries.
    ///
    /// A leaf view (the active item itself) counts as non-empty.
    #[must_use]
    pub fn is_non_empty(&self) -> bool {
        self.with_node(|node| match node {
            Some(NavNode::Leaf) => true,
            Some(NavNode::Branch(map)) => !map.is_empty(),
            None => false,
        })
    }

    /// Whether two handles share the same logical root.
    ///
    /// This is an identity check, not a value comparison; the directive
    /// layer uses it to detect a scope variable that was rebound between
    /// bind and render.
    #[must_use]
    pub fn same_root(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.root, &other.root)
    }

    /// Resolve this view's node in the root tree and hand it to `f`.
    fn with_node<R>(&self, f: impl FnOnce(Option<&NavNode>) -> R) -> R {
        let root = self.root.borrow();
        let mut node = Some(&root.tree);
        for segment in &self.path {
            node = match node {
                Some(NavNode::Branch(map)) => map.get(segment),
                _ => None,
            };
        }
        f(node)
    }
}

impl Default for Nav {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Nav {
    /// Two navigation states are equal when their active paths are equal.
    fn eq(&self, other: &Self) -> bool {
        self.active_path() == other.active_path()
    }
}

impl Eq for Nav {}

impl fmt::Display for Nav {
    /// Renders the stored text, falling back to a structural rendering of
    /// the raw tree when no text was ever set.
    ///
    /// The fallback exists for backward compatibility; callers should not
    /// depend on its shape beyond "non-empty for a non-empty tree".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(text) = &self.root.borrow().text {
            return f.write_str(text);
        }
        self.with_node(|node| match node {
            Some(node) => fmt_node(node, f),
            None => Ok(()),
        })
    }
}

fn walk_active(map: &BTreeMap<String, NavNode>, out: &mut Vec<String>) -> bool {
    for (segment, node) in map {
        match node {
            NavNode::Leaf => {
                out.push(segment.clone());
                return true;
            }
            NavNode::Branch(sub) => {
                out.push(segment.clone());
                if walk_active(sub, out) {
                    return true;
                }
                out.pop();
            }
        }
    }
    false
}

fn fmt_node(node: &NavNode, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match node {
        NavNode::Leaf => f.write_str("true"),
        NavNode::Branch(map) => {
            f.write_str("{")?;
            for (i, (segment, sub)) in map.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{segment}: ")?;
                fmt_node(sub, f)?;
            }
            f.write_str("}")
        }
    }
}

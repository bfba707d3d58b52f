//! Navigation state types and path matching.
//!
//! This crate provides the [`Nav`] value used by the navmark directives:
//! a hierarchical "active path" (e.g. `products.electronics.phones`)
//! declared once per render pass and queried by navigation menus, plus the
//! pattern algebra ([`matches`]) used to test a path expression against
//! the active path.
//!
//! # Architecture
//!
//! - [`Nav`] holds the active-path tree and an optional formatting string
//!   shared by every view of the same logical root.
//! - [`matches`] is the pure pattern evaluator: exact (`"a.b.c"`),
//!   children-only (`"a.b!"`) and children-except (`"a.b!x"`) forms.
//!
//! # Example
//!
//! ```
//! use navmark_state::Nav;
//!
//! let nav = Nav::new();
//! nav.declare("products.electronics");
//!
//! assert!(nav.get("products").is_non_empty());
//! assert!(!nav.get("about").is_non_empty());
//! assert_eq!(nav.active_path(), "products.electronics");
//! assert!(nav.matches("products!"));
//! ```

mod matcher;
mod nav;

pub use matcher::matches;
pub use nav::{Nav, NavError, NavNode};

//! Navigation directive processing.
//!
//! This crate implements two directives over a scope-frame chain:
//!
//! - `::nav[path]{for=name text='…'}` — declare the active navigation
//!   path for the current render pass. Only the first declaration in a
//!   pass populates the state, so the most specific fragment (rendered
//!   first under template inheritance) wins over its ancestors.
//! - `:::navlink[pattern]{url="…"}` … `:::` — wrap block content in a
//!   link when the pattern matches the active path, or a plain wrapper
//!   element when it does not.
//!
//! # Architecture
//!
//! The host engine owns a [`ScopeChain`] per render pass and feeds
//! fragments to a [`NavProcessor`] in evaluation order. The processor
//! scans each line for directive syntax, dispatches to the
//! [`NavDirective`] and [`NavLinkDirective`] handlers, and builds the
//! output line by line. Directive state lives in the chain's outermost
//! frame, bound copy-on-write so sibling chains sharing that frame never
//! observe the write.
//!
//! # Example
//!
//! ```
//! use navmark_renderer::{NavProcessor, ScopeChain};
//!
//! let mut processor = NavProcessor::new();
//! let mut scope = ScopeChain::new();
//!
//! // The page fragment declares where it lives...
//! processor.process("::nav[products]", &mut scope)?;
//!
//! // ...and the menu fragment, rendered later, picks it up.
//! let menu = processor.process(
//!     ":::navlink[products]{url=\"/products/\"}\nProducts\n:::",
//!     &mut scope,
//! )?;
//! assert!(menu.contains("<a href=\"/products/\">"));
//! # Ok::<(), navmark_renderer::RenderError>(())
//! ```

mod args;
mod declare;
mod error;
mod escape;
mod link;
mod parser;
mod processor;
mod scope;

pub use args::{NavArgs, NavLinkArgs};
pub use declare::NavDirective;
pub use error::RenderError;
pub use escape::escape_html;
pub use link::NavLinkDirective;
pub use processor::{NavProcessor, NavProcessorConfig, ResolveUrlFn};
pub use scope::{Frame, ScopeChain, Value};

//! Navigation directive processor.
//!
//! Scans template fragments for directive syntax and drives the declare
//! and link handlers against a scope chain owned by the caller.

use crate::args::{NavArgs, NavLinkArgs};
use crate::declare::NavDirective;
use crate::error::RenderError;
use crate::link::NavLinkDirective;
use crate::parser::{ParsedDirective, parse_container_line, parse_leaf};
use crate::scope::ScopeChain;

/// Type alias for the URL-resolution callback.
///
/// Given the routing arguments from a `:::navlink` directive, returns the
/// URL to link to. URL construction is the host application's business;
/// the default implementation uses the first argument verbatim.
pub type ResolveUrlFn = dyn Fn(&[String]) -> String + Send;

/// Configuration for the directive processor.
pub struct NavProcessorConfig {
    /// Scope-variable name used when a directive names none.
    ///
    /// Default: `"nav"`
    pub var_name: String,
    /// Callback resolving routing arguments to a URL.
    ///
    /// Default: the first routing argument, verbatim.
    pub resolve_url: Option<Box<ResolveUrlFn>>,
    /// Element wrapping inactive link content.
    ///
    /// Default: `"span"`
    pub inactive_element: String,
}

impl Default for NavProcessorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl NavProcessorConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            var_name: "nav".to_owned(),
            resolve_url: None,
            inactive_element: "span".to_owned(),
        }
    }

    /// Set the default scope-variable name.
    #[must_use]
    pub fn with_var_name(mut self, var_name: impl Into<String>) -> Self {
        self.var_name = var_name.into();
        self
    }

    /// Set the URL-resolution callback.
    #[must_use]
    pub fn with_resolve_url<F>(mut self, resolve_url: F) -> Self
    where
        F: Fn(&[String]) -> String + Send + 'static,
    {
        self.resolve_url = Some(Box::new(resolve_url));
        self
    }

    /// Set the element wrapping inactive link content.
    #[must_use]
    pub fn with_inactive_element(mut self, element: impl Into<String>) -> Self {
        self.inactive_element = element.into();
        self
    }
}

/// Default URL resolution: the first routing argument, verbatim.
fn default_resolve_url(args: &[String]) -> String {
    args.first().cloned().unwrap_or_default()
}

/// Processor for the `::nav` and `:::navlink` directives.
///
/// The caller owns one [`ScopeChain`] per render pass and feeds fragments
/// in evaluation order; a fresh chain gives a fresh pass. Directive
/// errors abort processing — there is no partial output.
///
/// # Example
///
/// ```
/// use navmark_renderer::{NavProcessor, ScopeChain};
///
/// let mut processor = NavProcessor::new();
/// let mut scope = ScopeChain::new();
///
/// processor.process("::nav[about]", &mut scope)?;
/// let out = processor.process(
///     ":::navlink[about]{url=\"/about/\"}\nAbout\n:::",
///     &mut scope,
/// )?;
/// assert_eq!(out, "<a href=\"/about/\">\nAbout\n</a>");
/// # Ok::<(), navmark_renderer::RenderError>(())
/// ```
pub struct NavProcessor {
    declare: NavDirective,
    link: NavLinkDirective,
    resolve_url: Box<ResolveUrlFn>,
    warnings: Vec<String>,
}

impl Default for NavProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl NavProcessor {
    /// Create a processor with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(NavProcessorConfig::default())
    }

    /// Create a processor with custom configuration.
    #[must_use]
    pub fn with_config(config: NavProcessorConfig) -> Self {
        Self {
            declare: NavDirective::new(config.var_name.clone()),
            link: NavLinkDirective::new(config.var_name, config.inactive_element),
            resolve_url: config
                .resolve_url
                .unwrap_or_else(|| Box::new(default_resolve_url)),
            warnings: Vec::new(),
        }
    }

    /// Process one fragment against the scope chain.
    ///
    /// Declarations mutate the chain and emit nothing; link containers
    /// wrap their content. Lines without directive syntax pass through
    /// unchanged, line endings preserved.
    ///
    /// # Errors
    ///
    /// [`RenderError::Syntax`] for malformed directive arguments and
    /// [`RenderError::ScopeIntegrity`] when the scope variable was
    /// rebound in an intervening frame. Both abort the pass.
    pub fn process(&mut self, input: &str, scope: &mut ScopeChain) -> Result<String, RenderError> {
        let mut output = String::with_capacity(input.len());
        let lines: Vec<&str> = input.lines().collect();
        let line_count = lines.len();

        for (idx, line) in lines.iter().enumerate() {
            let line_num = idx + 1;
            let processed = self.process_line(line, line_num, scope)?;
            output.push_str(&processed);

            // Preserve line endings
            if idx < line_count - 1 || input.ends_with('\n') {
                output.push('\n');
            }
        }

        self.finalize();

        Ok(output)
    }

    /// Warnings generated during processing (stray or unclosed closers).
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    fn process_line(
        &mut self,
        line: &str,
        line_num: usize,
        scope: &mut ScopeChain,
    ) -> Result<String, RenderError> {
        // Container directives take the whole line.
        if let Some(directive) = parse_container_line(line) {
            return self.dispatch_container(directive, line, line_num, scope);
        }

        self.process_leaf_directives(line, line_num, scope)
    }

    fn process_leaf_directives(
        &mut self,
        line: &str,
        line_num: usize,
        scope: &mut ScopeChain,
    ) -> Result<String, RenderError> {
        let mut result = String::with_capacity(line.len());
        let mut remaining = line;

        while !remaining.is_empty() {
            let Some((directive, start, end)) = parse_leaf(remaining) else {
                result.push_str(remaining);
                break;
            };
            result.push_str(&remaining[..start]);

            match directive {
                ParsedDirective::Leaf {
                    name,
                    content,
                    attrs,
                } if name == "nav" => {
                    let args = NavArgs::parse(&content, &attrs, line_num)?;
                    self.declare.process(&args, scope)?;
                    // Declarations render as nothing.
                }
                _ => {
                    // Not ours; pass through unchanged.
                    result.push_str(&remaining[start..end]);
                }
            }

            remaining = &remaining[end..];
        }

        Ok(result)
    }

    fn dispatch_container(
        &mut self,
        directive: ParsedDirective,
        line: &str,
        line_num: usize,
        scope: &mut ScopeChain,
    ) -> Result<String, RenderError> {
        match directive {
            ParsedDirective::ContainerStart {
                name,
                content,
                attrs,
            } => {
                if name == "navlink" {
                    let args = NavLinkArgs::parse(&content, &attrs, line_num)?;
                    Ok(self.link.start(&args, scope, &self.resolve_url))
                } else {
                    // Unknown container; pass through unchanged.
                    Ok(line.to_owned())
                }
            }
            ParsedDirective::ContainerEnd => match self.link.end() {
                Some(close) => Ok(close),
                None => {
                    tracing::warn!(line = line_num, "stray ::: with no opening navlink");
                    self.warnings
                        .push(format!("line {line_num}: stray ::: with no opening navlink"));
                    Ok(line.to_owned())
                }
            },
            ParsedDirective::Leaf { .. } => {
                unreachable!("dispatch_container only handles container directives")
            }
        }
    }

    fn finalize(&mut self) {
        let pending = self.link.reset();
        if pending > 0 {
            tracing::warn!(pending, "unclosed :::navlink (missing closing :::)");
            self.warnings
                .push(format!("{pending} unclosed :::navlink (missing closing :::)"));
        }
    }
}

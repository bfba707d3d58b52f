//! Typed directive arguments.
//!
//! Parses the raw `[content]{attrs}` payload of the navigation directives
//! into typed argument structs. Attribute values support double-quoted,
//! single-quoted, and bare (whitespace-delimited) forms. Anything the
//! directive does not understand is a syntax error, fatal to processing
//! the input.

use crate::error::RenderError;

/// Arguments to the `::nav` declare directive.
///
/// `::nav[a.b.c]` declares a path, `::nav[a.b.c]{for=sidenav}` declares it
/// under an alternate variable name, `::nav{text=' class="active"'}` sets
/// the formatting string, and bare `::nav` claims the variable without
/// declaring anything.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct NavArgs {
    /// The dot-separated path to declare, if one was given.
    pub item: Option<String>,
    /// Alternate scope-variable name (`for=`).
    pub var_name: Option<String>,
    /// Formatting string (`text=`); mutually exclusive with `item`.
    pub text: Option<String>,
}

impl NavArgs {
    /// Parse declare-directive arguments.
    ///
    /// # Errors
    ///
    /// [`RenderError::Syntax`] on unknown attribute keys, malformed
    /// attributes, or a `text` combined with a path item.
    pub fn parse(content: &str, attrs: &str, line: usize) -> Result<Self, RenderError> {
        let mut args = Self {
            item: (!content.is_empty()).then(|| content.to_owned()),
            ..Self::default()
        };

        for (key, value) in parse_pairs(attrs, "nav", line)? {
            match key {
                "for" => args.var_name = Some(value.to_owned()),
                "text" => args.text = Some(value.to_owned()),
                _ => {
                    return Err(RenderError::Syntax {
                        directive: "nav",
                        line,
                        reason: format!("unexpected argument '{key}'"),
                    });
                }
            }
        }

        if args.text.is_some() && args.item.is_some() {
            return Err(RenderError::Syntax {
                directive: "nav",
                line,
                reason: "the text argument does not take an item".to_owned(),
            });
        }

        Ok(args)
    }
}

/// Arguments to the `:::navlink` container directive.
///
/// The bracket content is the pattern, optionally prefixed with an
/// alternate variable name (`sidenav:products`). The `url` attribute holds
/// the routing arguments handed to the URL resolver, whitespace-separated.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct NavLinkArgs {
    /// Pattern to test against the active path.
    pub pattern: String,
    /// Alternate scope-variable name from the `name:` prefix.
    pub var_name: Option<String>,
    /// Routing arguments for the URL resolver.
    pub url_args: Vec<String>,
}

impl NavLinkArgs {
    /// Parse link-directive arguments.
    ///
    /// # Errors
    ///
    /// [`RenderError::Syntax`] on a missing pattern, a missing `url`
    /// attribute, or unknown attribute keys.
    pub fn parse(content: &str, attrs: &str, line: usize) -> Result<Self, RenderError> {
        if content.is_empty() {
            return Err(RenderError::Syntax {
                directive: "navlink",
                line,
                reason: "missing pattern".to_owned(),
            });
        }

        let (var_name, pattern) = match content.split_once(':') {
            Some((name, pattern)) => (Some(name.to_owned()), pattern),
            None => (None, content),
        };

        let mut url_args = None;
        for (key, value) in parse_pairs(attrs, "navlink", line)? {
            if key == "url" {
                url_args = Some(value.split_whitespace().map(str::to_owned).collect());
            } else {
                return Err(RenderError::Syntax {
                    directive: "navlink",
                    line,
                    reason: format!("unexpected argument '{key}'"),
                });
            }
        }

        let Some(url_args) = url_args else {
            return Err(RenderError::Syntax {
                directive: "navlink",
                line,
                reason: "missing url argument".to_owned(),
            });
        };

        Ok(Self {
            pattern: pattern.to_owned(),
            var_name,
            url_args,
        })
    }
}

/// Split an attribute string into key/value pairs.
///
/// Supports `key="value"`, `key='value'`, and `key=value`; anything else
/// is a syntax error for the named directive.
fn parse_pairs<'a>(
    attrs: &'a str,
    directive: &'static str,
    line: usize,
) -> Result<Vec<(&'a str, &'a str)>, RenderError> {
    let mut pairs = Vec::new();
    let mut remaining = attrs.trim();

    while !remaining.is_empty() {
        let Some((key, value, rest)) = parse_key_value(remaining) else {
            return Err(RenderError::Syntax {
                directive,
                line,
                reason: format!("unrecognized argument near '{remaining}'"),
            });
        };
        pairs.push((key, value));
        remaining = rest.trim_start();
    }

    Ok(pairs)
}

/// Parse one key-value pair. Returns the key, the value, and the rest of
/// the input, or `None` when the front of the input is not a pair.
fn parse_key_value(s: &str) -> Option<(&str, &str, &str)> {
    let eq_pos = s.find('=')?;
    let key = s[..eq_pos].trim();
    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }

    let after_eq = &s[eq_pos + 1..];
    if let Some(stripped) = after_eq.strip_prefix('"') {
        let end_quote = stripped.find('"')?;
        Some((key, &stripped[..end_quote], &stripped[end_quote + 1..]))
    } else if let Some(stripped) = after_eq.strip_prefix('\'') {
        let end_quote = stripped.find('\'')?;
        Some((key, &stripped[..end_quote], &stripped[end_quote + 1..]))
    } else {
        let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
        Some((key, &after_eq[..end], &after_eq[end..]))
    }
}

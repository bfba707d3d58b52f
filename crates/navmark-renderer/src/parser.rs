//! Directive syntax scanning.
//!
//! Recognizes the two navigation directive forms: leaf `::name[content]{attrs}`
//! and container `:::name[content]{attrs}` … `:::`. Content and attributes
//! are carried as raw strings; typed argument parsing lives in `args`.

/// Parsed directive occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParsedDirective {
    /// Leaf directive: `::name[content]{attrs}`
    Leaf {
        name: String,
        content: String,
        attrs: String,
    },
    /// Container opening: `:::name[content]{attrs}`
    ContainerStart {
        name: String,
        content: String,
        attrs: String,
    },
    /// Container closing: `:::`
    ContainerEnd,
}

/// Parse a whole line as a container directive (open or close).
///
/// Container syntax must start the line (leading whitespace allowed).
pub(crate) fn parse_container_line(line: &str) -> Option<ParsedDirective> {
    let trimmed = line.trim_start();
    if !trimmed.starts_with(":::") {
        return None;
    }

    let colon_count = trimmed.chars().take_while(|&c| c == ':').count();
    let after_colons = &trimmed[colon_count..];

    if after_colons.trim().is_empty() {
        return Some(ParsedDirective::ContainerEnd);
    }

    let name_end = after_colons
        .find(|c: char| c == '[' || c == '{' || c.is_whitespace())
        .unwrap_or(after_colons.len());
    let name = &after_colons[..name_end];
    if !is_valid_directive_name(name) {
        return None;
    }

    let mut pos = name_end;
    let (content, consumed) = parse_brackets(&after_colons[pos..]);
    pos += consumed;
    let (attrs, _) = parse_braces(&after_colons[pos..]);

    Some(ParsedDirective::ContainerStart {
        name: name.to_owned(),
        content,
        attrs,
    })
}

/// Find the next leaf directive in a line.
///
/// Returns the directive and its byte span. Triple-colon runs are left
/// alone; they belong to container syntax.
pub(crate) fn parse_leaf(line: &str) -> Option<(ParsedDirective, usize, usize)> {
    let mut search_from = 0;
    while let Some(found) = line[search_from..].find("::") {
        let start = search_from + found;
        let colon_count = line[start..].chars().take_while(|&c| c == ':').count();
        let mut pos = start + colon_count;

        if colon_count == 2 {
            let after_colons = &line[pos..];
            let name_end = after_colons
                .find(|c: char| c == '[' || c == '{' || c.is_whitespace())
                .unwrap_or(after_colons.len());
            let name = &after_colons[..name_end];

            if is_valid_directive_name(name) {
                pos += name_end;
                let (content, consumed) = parse_brackets(&line[pos..]);
                pos += consumed;
                let (attrs, consumed) = parse_braces(&line[pos..]);
                pos += consumed;

                return Some((
                    ParsedDirective::Leaf {
                        name: name.to_owned(),
                        content,
                        attrs,
                    },
                    start,
                    pos,
                ));
            }
        }

        search_from = start + colon_count;
    }
    None
}

/// Valid names contain only alphanumerics, hyphens, and underscores.
fn is_valid_directive_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

/// Parse content from brackets: `[content]`. Returns (content, bytes consumed).
fn parse_brackets(s: &str) -> (String, usize) {
    if !s.starts_with('[') {
        return (String::new(), 0);
    }

    let mut depth = 0;
    for (i, c) in s.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return (s[1..i].to_owned(), i + 1);
                }
            }
            _ => {}
        }
    }

    (String::new(), 0)
}

/// Parse attributes from braces: `{key="value"}`. Returns the attribute
/// string without braces and the bytes consumed.
fn parse_braces(s: &str) -> (String, usize) {
    if !s.starts_with('{') {
        return (String::new(), 0);
    }

    match s.find('}') {
        Some(end) => (s[1..end].to_owned(), end + 1),
        None => (String::new(), 0),
    }
}

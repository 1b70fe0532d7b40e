//! `{{ name }}` scanning and substitution

use super::ResolveError;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find(OPEN) {
        let after_open = &rest[open + OPEN.len()..];
        let Some(close) = after_open.find(CLOSE) else {
            // Unterminated: the remainder is plain text
            break;
        };
        if open > 0 {
            out.push(Segment::Literal(&rest[..open]));
        }
        out.push(Segment::Placeholder(after_open[..close].trim()));
        rest = &after_open[close + CLOSE.len()..];
    }

    if !rest.is_empty() {
        out.push(Segment::Literal(rest));
    }
    out
}

/// Names referenced by `{{ ... }}` in `text`, in order of appearance
pub fn placeholders(text: &str) -> impl Iterator<Item = &str> {
    segments(text).into_iter().filter_map(|segment| match segment {
        Segment::Placeholder(name) => Some(name),
        Segment::Literal(_) => None,
    })
}

/// Replace every placeholder in `text` with `lookup(name)`.
///
/// Replacement text is never rescanned.
pub fn substitute<'a, F>(text: &str, lookup: F) -> Result<String, ResolveError>
where
    F: Fn(&str) -> Option<&'a str>,
{
    let mut out = String::with_capacity(text.len());
    for segment in segments(text) {
        match segment {
            Segment::Literal(literal) => out.push_str(literal),
            Segment::Placeholder(name) => {
                let value =
                    lookup(name).ok_or_else(|| ResolveError::MissingVariable(name.to_string()))?;
                out.push_str(value);
            }
        }
    }
    Ok(out)
}

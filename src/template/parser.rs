//! Single-pass `{{ key }}` scanner.

use super::node::Node;
use crate::error::TemplateError;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Parse a template into [`Node`]s, never failing.
///
/// Literals are emitted even when empty, so `{{a}}{{b}}` yields an empty
/// literal between the two references. A trailing `{{` with no `}}` is
/// dropped together with everything after it.
pub fn parse(input: &str) -> Vec<Node> {
    scan(input, |offset| {
        tracing::trace!(offset, "dropping unterminated marker");
        Ok(())
    })
    .unwrap_or_default()
}

/// Like [`parse`], but an unterminated `{{` is an error.
pub fn parse_strict(input: &str) -> Result<Vec<Node>, TemplateError> {
    scan(input, |offset| Err(TemplateError::Unterminated { offset }))
}

/// Shared scan loop. `unterminated` gets the byte offset of a `{{` that
/// has no matching `}}`; returning `Ok` stops the scan with what was
/// collected so far.
fn scan(
    input: &str,
    unterminated: impl FnOnce(usize) -> Result<(), TemplateError>,
) -> Result<Vec<Node>, TemplateError> {
    let mut nodes = Vec::new();
    let mut cursor = 0;

    loop {
        let rest = &input[cursor..];
        let Some(open) = rest.find(OPEN) else {
            nodes.push(Node::Literal(rest.to_owned()));
            break;
        };
        nodes.push(Node::Literal(rest[..open].to_owned()));

        let after_open = &rest[open + OPEN.len()..];
        let Some(close) = after_open.find(CLOSE) else {
            unterminated(cursor + open)?;
            break;
        };

        nodes.push(Node::Reference(after_open[..close].trim().to_owned()));
        cursor += open + OPEN.len() + close + CLOSE.len();
    }

    Ok(nodes)
}

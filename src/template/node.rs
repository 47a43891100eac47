//! Parsed template nodes.

use crate::lookup::Lookup;
use std::borrow::Cow;

/// One parsed piece of a template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// Text copied to the output verbatim.
    Literal(String),
    /// Variable key (contents between `{{` and `}}`, trimmed).
    Reference(String),
}

impl Node {
    /// Output of this node for `lookup`. A missing key yields `""`.
    pub fn eval<'a>(&'a self, lookup: &Lookup) -> Cow<'a, str> {
        match self {
            Self::Literal(t) => Cow::Borrowed(t),
            Self::Reference(k) => lookup
                .get(k)
                .map_or(Cow::Borrowed(""), |v| Cow::Owned(v.to_string())),
        }
    }
}

//! `stencil` — a minimal `{{ key }}` template engine.
//!
//! A template is parsed once into literal and reference nodes, then rendered
//! any number of times against a [`Lookup`] of variables:
//!
//! ```
//! use stencil::{Lookup, parse, render};
//!
//! let tpl = parse("Hello, {{ Name }}! You are {{Age}} years old.");
//! let vars = Lookup::new().with("Name", "fengfeng").with("Age", 21);
//! assert_eq!(render(&tpl, &vars), "Hello, fengfeng! You are 21 years old.");
//! ```
//!
//! Parsing never fails: an unterminated `{{` drops the rest of the input and
//! a missing variable expands to nothing. The `*_strict` variants report
//! both as [`TemplateError`] instead.

pub mod ctx;
pub mod error;
pub mod lookup;
pub mod render;
pub mod template;
pub mod transaction;
pub mod value;

pub use error::TemplateError;
pub use lookup::Lookup;
pub use template::{Template, node::Node};
pub use value::Value;

/// Parse `source` leniently.
pub fn parse(source: &str) -> Template {
    Template::parse(source)
}

/// Render `template` against `lookup`.
pub fn render(template: &Template, lookup: &Lookup) -> String {
    template.render(lookup)
}

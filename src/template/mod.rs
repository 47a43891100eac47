//! Parsed templates and rendering.

pub mod node;
pub mod parser;

use crate::{error::TemplateError, lookup::Lookup};
use node::Node;
use std::fmt;

/// An immutable, parsed template. Render it as often as needed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    /// Parse leniently; see [`parser::parse`].
    pub fn parse(source: &str) -> Self {
        Self {
            nodes: parser::parse(source),
        }
    }

    pub fn parse_strict(source: &str) -> Result<Self, TemplateError> {
        Ok(Self {
            nodes: parser::parse_strict(source)?,
        })
    }

    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Distinct referenced keys, in order of first appearance.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for node in &self.nodes {
            if let Node::Reference(k) = node {
                if !keys.contains(&k.as_str()) {
                    keys.push(k.as_str());
                }
            }
        }
        keys
    }

    /// Referenced keys with no entry in `lookup`.
    pub fn missing_keys(&self, lookup: &Lookup) -> Vec<&str> {
        self.keys()
            .into_iter()
            .filter(|k| !lookup.contains(k))
            .collect()
    }

    /// Render against `lookup`. Missing keys expand to nothing.
    pub fn render(&self, lookup: &Lookup) -> String {
        let parts: Vec<_> = self.nodes.iter().map(|n| n.eval(lookup)).collect();

        let mut out = String::with_capacity(parts.iter().map(|p| p.len()).sum());
        for p in &parts {
            out.push_str(p);
        }
        out
    }

    /// Stream the rendered output into `w`.
    pub fn render_to<W: fmt::Write>(&self, w: &mut W, lookup: &Lookup) -> fmt::Result {
        for node in &self.nodes {
            w.write_str(&node.eval(lookup))?;
        }
        Ok(())
    }

    /// Render, failing on the first referenced key `lookup` lacks.
    pub fn render_strict(&self, lookup: &Lookup) -> Result<String, TemplateError> {
        if let Some(key) = self.missing_keys(lookup).first() {
            return Err(TemplateError::MissingKey {
                key: (*key).to_owned(),
            });
        }
        Ok(self.render(lookup))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn greeting_vars() -> Lookup {
        Lookup::new().with("Name", "fengfeng").with("Age", 21)
    }

    #[test]
    fn greeting_end_to_end() {
        let t = Template::parse("Hello, {{ Name }}! You are {{Age}} years old.");
        assert_eq!(
            t.render(&greeting_vars()),
            "Hello, fengfeng! You are 21 years old."
        );
    }

    #[test]
    fn plain_text_is_unchanged() {
        let src = "nothing to see } { here";
        let t = Template::parse(src);
        assert_eq!(t.render(&Lookup::new()), src);
        assert_eq!(t.render(&greeting_vars()), src);
        assert_eq!(Template::parse("").render(&greeting_vars()), "");
    }

    #[test]
    fn missing_key_is_empty() {
        assert_eq!(Template::parse("{{x}}").render(&Lookup::new()), "");
        assert_eq!(Template::parse("[{{}}]").render(&greeting_vars()), "[]");
    }

    #[test]
    fn whitespace_in_marker_is_trimmed() {
        let l = Lookup::new().with("name", "a");
        assert_eq!(Template::parse("{{ name }}").render(&l), "a");
        assert_eq!(Template::parse("{{name}}").render(&l), "a");
    }

    #[test]
    fn adjacent_markers() {
        let l = Lookup::new().with("a", "1").with("b", "2");
        assert_eq!(Template::parse("{{a}}{{b}}").render(&l), "12");
    }

    #[test]
    fn output_length_is_literals_plus_values() {
        let t = Template::parse("x{{ a }}yy{{b}}{{c}}zzz");
        let l = Lookup::new()
            .with("a", "four")
            .with("b", -12)
            .with("c", 2.5);
        let literal_len: usize = t
            .nodes()
            .iter()
            .map(|n| match n {
                Node::Literal(s) => s.len(),
                Node::Reference(_) => 0,
            })
            .sum();
        let out = t.render(&l);
        assert_eq!(out, "xfouryy-122.5zzz");
        assert_eq!(out.len(), literal_len + 4 + 3 + 3);
    }

    #[test]
    fn render_is_repeatable() {
        let t = Template::parse("{{ Name }}/{{Age}}");
        let l = greeting_vars();
        let first = t.render(&l);
        assert_eq!(first, t.render(&l));
        assert_eq!(t, Template::parse("{{ Name }}/{{Age}}"));
    }

    #[test]
    fn same_template_many_contexts() {
        let t = Template::parse("v={{v}}");
        let rendered: Vec<String> = [Value::from(1), Value::from(true), Value::from("s")]
            .into_iter()
            .map(|v| t.render(&Lookup::new().with("v", v)))
            .collect();
        assert_eq!(rendered, ["v=1", "v=true", "v=s"]);
    }

    #[test]
    fn shared_across_threads() {
        let t = std::sync::Arc::new(Template::parse("#{{n}}"));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let t = std::sync::Arc::clone(&t);
                std::thread::spawn(move || t.render(&Lookup::new().with("n", i)))
            })
            .collect();
        let out: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(out, ["#0", "#1", "#2", "#3"]);
    }

    #[test]
    fn render_to_matches_render() {
        let t = Template::parse("Hello, {{ Name }}! You are {{Age}} years old.");
        let mut buf = String::from(">> ");
        t.render_to(&mut buf, &greeting_vars()).unwrap();
        assert_eq!(buf, format!(">> {}", t.render(&greeting_vars())));
    }

    #[test]
    fn keys_are_distinct_and_ordered() {
        let t = Template::parse("{{b}} {{ a }} {{b}} {{c}}");
        assert_eq!(t.keys(), ["b", "a", "c"]);
        assert_eq!(t.missing_keys(&Lookup::new().with("a", 1)), ["b", "c"]);
    }

    #[test]
    fn strict_paths() {
        let t = Template::parse_strict("{{ Name }} {{ Age }} {{ City }}").unwrap();
        assert_eq!(
            t.render_strict(&greeting_vars()),
            Err(TemplateError::MissingKey { key: "City".into() })
        );
        assert_eq!(
            t.render_strict(&greeting_vars().with("City", "Paris")).unwrap(),
            "fengfeng 21 Paris"
        );
        assert!(Template::parse_strict("{{ open").is_err());
    }
}

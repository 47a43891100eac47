//! Lookup context: the per-render mapping from variable key to value.

use crate::value::Value;
use anyhow::{Context, Result, ensure};
use std::{collections::HashMap, fs, path::Path};

/// Variables available to one render call. Owned by the caller and only
/// borrowed while rendering.
#[derive(Clone, Debug, Default)]
pub struct Lookup {
    vars: HashMap<String, Value>,
}

impl Lookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.vars.insert(key.into(), value.into())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.vars.get(key)
    }

    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Parse a TOML document and flatten it into `a.b.c` keys.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(src).context("parse TOML variables")?;
        let mut out = Self::new();
        for (k, v) in &table {
            flatten(k, v, &mut out.vars);
        }
        Ok(out)
    }

    /// Read and flatten a TOML variables file.
    pub fn load(path: &Path) -> Result<Self> {
        let src = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        Self::from_toml_str(&src).with_context(|| format!("load variables from {}", path.display()))
    }

    /// Apply one `key=value` assignment. The value goes through
    /// [`Value::infer`].
    pub fn set_pair(&mut self, pair: &str) -> Result<()> {
        let (key, raw) = pair
            .split_once('=')
            .with_context(|| format!("expected KEY=VALUE, got '{pair}'"))?;
        let key = key.trim();
        ensure!(!key.is_empty(), "empty key in '{pair}'");
        self.insert(key, Value::infer(raw));
        Ok(())
    }
}

impl Extend<(String, Value)> for Lookup {
    fn extend<I: IntoIterator<Item = (String, Value)>>(&mut self, iter: I) {
        self.vars.extend(iter);
    }
}

impl IntoIterator for Lookup {
    type Item = (String, Value);
    type IntoIter = std::collections::hash_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.vars.into_iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Lookup {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Flatten a TOML value into `prefix.key` entries.
fn flatten(prefix: &str, value: &toml::Value, out: &mut HashMap<String, Value>) {
    match value {
        toml::Value::Table(map) => {
            for (k, v) in map {
                flatten(&format!("{prefix}.{k}"), v, out);
            }
        }
        toml::Value::String(s) => {
            out.insert(prefix.to_owned(), Value::Str(s.clone()));
        }
        toml::Value::Integer(i) => {
            out.insert(prefix.to_owned(), Value::Int(*i));
        }
        toml::Value::Float(f) => {
            out.insert(prefix.to_owned(), Value::Float(*f));
        }
        toml::Value::Boolean(b) => {
            out.insert(prefix.to_owned(), Value::Bool(*b));
        }
        toml::Value::Datetime(d) => {
            out.insert(prefix.to_owned(), Value::Str(d.to_string()));
        }
        // No list syntax in templates.
        toml::Value::Array(_) => {}
    }
}

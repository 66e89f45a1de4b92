//! # Content Packs
//!
//! A content pack is the full localized-text tree for one language, parsed
//! once from its JSON blob and immutable afterwards.
//!
//! The pack is kept as an untyped JSON tree rather than a derived struct:
//! validation has to report on packs that are missing fields or have the
//! wrong shapes, which a strict `Deserialize` would refuse to produce at all.
//! Typed access goes through [`ContentPack::lookup`] and friends instead.
//!
//! ## Schema constants
//!
//! The key lists below are declared in schema order. Validators iterate them
//! in this order, which is what makes report ordering deterministic.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::language::LanguageCode;

/// Top-level keys every pack must carry, in schema order.
pub const REQUIRED_TOP_LEVEL_KEYS: [&str; 8] = [
    "meta",
    "title",
    "subtitle",
    "brand",
    "date",
    "sections",
    "footer",
    "languageSelector",
];

/// Sub-keys of `meta`, in schema order.
pub const META_KEYS: [&str; 4] = ["language", "code", "direction", "version"];

/// Section names every pack must define under `sections`, in schema order.
pub const REQUIRED_SECTIONS: [&str; 7] = [
    "fundamentals",
    "daily",
    "weekly",
    "organization",
    "mental",
    "goldenMinutes",
    "motivation",
];

/// JavaScript-style truthiness of a JSON value.
///
/// Packs are authored against a runtime where `""`, `0`, `false` and `null`
/// all count as "not provided". Empty mappings and sequences are truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// The parsed localized-text tree for one language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentPack(Value);

impl ContentPack {
    /// Wrap an already-parsed JSON value.
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Parse a pack from its raw blob. No schema validation is performed.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes).map(Self)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Resolve a dotted path such as `footer.credits.design`.
    ///
    /// Segments descend through mappings by key and through sequences by
    /// numeric index. Any absent intermediate node yields `None`. The empty
    /// path resolves to the root.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return Some(&self.0);
        }
        path.split('.').try_fold(&self.0, |node, segment| match node {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }

    /// The string at `path`, only if it is present and non-empty.
    pub fn text(&self, path: &str) -> Option<&str> {
        self.lookup(path)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// The string at `key`, or `key` itself when no usable string exists.
    pub fn translate<'a>(&'a self, key: &'a str) -> &'a str {
        self.text(key).unwrap_or(key)
    }

    /// `meta.code`, when it is a string.
    pub fn meta_code(&self) -> Option<&str> {
        self.lookup("meta.code").and_then(Value::as_str)
    }

    pub fn meta_direction(&self) -> Option<&str> {
        self.lookup("meta.direction").and_then(Value::as_str)
    }

    pub fn meta_version(&self) -> Option<&str> {
        self.lookup("meta.version").and_then(Value::as_str)
    }

    /// The display name this pack declares for `code` in its language selector.
    pub fn display_name(&self, code: LanguageCode) -> Option<&str> {
        self.lookup("languageSelector.languages")
            .and_then(|langs| langs.get(code.as_str()))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// The content of section `name`, if the pack defines it.
    pub fn section(&self, name: &str) -> Option<&Value> {
        self.lookup("sections").and_then(|s| s.get(name))
    }

    /// Mutable access to the raw tree, for tooling that rewrites pack files.
    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.0
    }
}

impl From<Value> for ContentPack {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

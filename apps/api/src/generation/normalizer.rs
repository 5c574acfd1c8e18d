//! Response normalizer — coerces free-form model text into a fixed field set.
//!
//! The model is asked for JSON but nothing guarantees it. `normalize` always returns a value
//! for every declared field:
//!
//! 1. strip one pair of markdown code fences
//! 2. parse as a JSON object
//! 3. on success, coerce each declared field by its kind, defaulting anything missing or mistyped
//! 4. on failure, put the whole stripped text into the primary field and default the rest
//!
//! Keys the model adds outside the declared set are ignored.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// Duration used when the model gives nothing usable.
pub const DEFAULT_DURATION_SECS: i64 = 30;

/// Declared shape of a field, carrying its default.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text { default: String },
    /// Always defaults to an empty list.
    TextList,
    Duration { default: i64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn text(name: &'static str, default: impl Into<String>) -> Self {
        Self {
            name,
            kind: FieldKind::Text {
                default: default.into(),
            },
        }
    }

    pub fn list(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::TextList,
        }
    }

    pub fn duration(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Duration {
                default: DEFAULT_DURATION_SECS,
            },
        }
    }

    fn default_value(&self) -> FieldValue {
        match &self.kind {
            FieldKind::Text { default } => FieldValue::Text(default.clone()),
            FieldKind::TextList => FieldValue::TextList(Vec::new()),
            FieldKind::Duration { default } => FieldValue::Duration(*default),
        }
    }
}

/// The full set of fields for one entity shape.
#[derive(Debug, Clone)]
pub struct FieldSet {
    /// Text field that receives the raw response when it is not valid JSON.
    pub primary: &'static str,
    pub fields: Vec<FieldSpec>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    TextList(Vec<String>),
    Duration(i64),
}

/// Output of `normalize`: one value per declared field.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    values: BTreeMap<&'static str, FieldValue>,
    /// True when the response was not a JSON object and the fallback record was built.
    pub degraded: bool,
}

impl Normalized {
    /// Removes and returns a text field. Undeclared or differently-typed names give "".
    pub fn take_text(&mut self, name: &str) -> String {
        match self.values.remove(name) {
            Some(FieldValue::Text(s)) => s,
            _ => String::new(),
        }
    }

    pub fn take_list(&mut self, name: &str) -> Vec<String> {
        match self.values.remove(name) {
            Some(FieldValue::TextList(items)) => items,
            _ => Vec::new(),
        }
    }

    pub fn take_duration(&mut self, name: &str) -> i64 {
        match self.values.remove(name) {
            Some(FieldValue::Duration(secs)) => secs,
            _ => DEFAULT_DURATION_SECS,
        }
    }
}

/// Normalizes raw model text against `fields`. Never fails.
pub fn normalize(raw: &str, fields: &FieldSet) -> Normalized {
    let text = strip_code_fences(raw);

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(object)) => Normalized {
            values: fields
                .fields
                .iter()
                .map(|spec| (spec.name, coerce(&object, spec)))
                .collect(),
            degraded: false,
        },
        _ => fallback(text, fields),
    }
}

fn fallback(text: &str, fields: &FieldSet) -> Normalized {
    let values = fields
        .fields
        .iter()
        .map(|spec| {
            let value = if spec.name == fields.primary {
                FieldValue::Text(text.to_string())
            } else {
                spec.default_value()
            };
            (spec.name, value)
        })
        .collect();

    Normalized {
        values,
        degraded: true,
    }
}

fn coerce(object: &Map<String, Value>, spec: &FieldSpec) -> FieldValue {
    let value = object.get(spec.name);

    match (&spec.kind, value) {
        (FieldKind::Text { .. }, Some(Value::String(s))) => FieldValue::Text(s.clone()),
        (FieldKind::Text { .. }, Some(Value::Array(items))) => {
            FieldValue::Text(join_fragments(items))
        }
        // Non-string elements are dropped, not stringified.
        (FieldKind::TextList, Some(Value::Array(items))) => FieldValue::TextList(
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
        ),
        (FieldKind::Duration { default }, Some(Value::Number(n))) => {
            FieldValue::Duration(number_to_secs(n).unwrap_or(*default))
        }
        (FieldKind::Duration { default }, Some(Value::String(s))) => {
            FieldValue::Duration(digits_to_secs(s).unwrap_or(*default))
        }
        _ => spec.default_value(),
    }
}

/// Joins a list of script fragments with single spaces.
/// Objects contribute their `text` member; anything else is rendered as JSON.
fn join_fragments(items: &[Value]) -> String {
    items
        .iter()
        .map(|item| match item {
            Value::String(s) => s.clone(),
            Value::Object(fragment) => match fragment.get("text") {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => item.to_string(),
            },
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn number_to_secs(n: &serde_json::Number) -> Option<i64> {
    n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64))
}

/// "about 45 seconds" → 45. Keeps every ASCII digit, so "1-2 min" reads as 12.
fn digits_to_secs(s: &str) -> Option<i64> {
    let digits: String = s.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Strips one leading ```` ``` ```` fence (with an optional language tag) and one trailing fence.
/// Purely textual; the interior is not checked.
pub fn strip_code_fences(text: &str) -> &str {
    let mut text = text.trim();
    if let Some(rest) = text.strip_prefix("```") {
        text = skip_language_tag(rest);
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

fn skip_language_tag(rest: &str) -> &str {
    let tag_len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+')))
        .unwrap_or(rest.len());
    let after = &rest[tag_len..];
    // An info string runs to the end of the first line; prose on that line is content.
    let first_line = after.split('\n').next().unwrap_or_default();

    if first_line.trim().is_empty() {
        after
    } else if let Some(body) = rest
        .strip_prefix("json")
        .filter(|b| b.starts_with(['{', '[']))
    {
        // ```json{...} with no newline after the tag
        body
    } else {
        rest
    }
}

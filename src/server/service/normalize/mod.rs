//! Attribute normalization of raw Discord objects.
//!
//! Discord objects are normalized from their wire representation: a Serenity model is
//! serialized to a `serde_json::Value` and every field is run through the rule
//! registered for `(object kind, source field)` in the kind's field table. Rules are
//! pure functions, so they can be tested without a live Discord object.
//!
//! # Working field sets
//!
//! A [`FieldSet`] fixes the fields that are exported for a series of objects. Message
//! histories compute it from the first message of a channel and reuse it for the rest
//! of the channel; a field missing on a later message is passed to its rule as `null`,
//! and a field that only appears on later messages is dropped.

pub mod context;
pub mod rules;
pub mod tables;

#[cfg(test)]
mod test;

use serde_json::Value;

use crate::server::model::snapshot::Record;

pub use context::NormalizeContext;

/// Transformation of one raw field.
///
/// # Arguments
/// - raw field value, `null` when the field is absent from the object
/// - the raw object holding the field
/// - normalization context resolving references
///
/// # Returns
/// - `Some(value)` - JSON-safe value to export
/// - `None` - The field is omitted
pub type RuleFn = fn(&Value, &Record, &NormalizeContext) -> Option<Value>;

/// A registry entry mapping a source key to an output field.
#[derive(Clone, Copy)]
pub struct FieldRule {
    pub source: &'static str,
    pub output: &'static str,
    pub rule: RuleFn,
}

impl std::fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldRule")
            .field("source", &self.source)
            .field("output", &self.output)
            .finish()
    }
}

/// Kinds of objects with a field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Guild,
    Role,
    Emoji,
    Sticker,
    Member,
    Message,
}

impl ObjectKind {
    /// The field table of this kind.
    pub fn fields(self) -> &'static [FieldRule] {
        match self {
            Self::Guild => tables::GUILD_FIELDS,
            Self::Role => tables::ROLE_FIELDS,
            Self::Emoji => tables::EMOJI_FIELDS,
            Self::Sticker => tables::STICKER_FIELDS,
            Self::Member => tables::MEMBER_FIELDS,
            Self::Message => tables::MESSAGE_FIELDS,
        }
    }

    /// Source keys that are never part of a working field set.
    fn ignored(self) -> &'static [&'static str] {
        match self {
            Self::Message => tables::IGNORED_MESSAGE_FIELDS,
            _ => &[],
        }
    }

    /// Rules registered for a source key.
    pub fn rules_for(self, source: &str) -> impl Iterator<Item = &'static FieldRule> + '_ {
        self.fields().iter().filter(move |rule| rule.source == source)
    }
}

/// Normalizes a single raw field.
///
/// # Arguments
/// - `kind` - Kind of the object holding the field
/// - `source` - Source key of the field in the raw payload
/// - `raw` - Raw field value
/// - `object` - Raw object holding the field
/// - `ctx` - Normalization context
///
/// # Returns
/// Output field names with their values; empty when the field is unmatched and omitted.
pub fn normalize_field(
    kind: ObjectKind,
    source: &str,
    raw: &Value,
    object: &Record,
    ctx: &NormalizeContext,
) -> Vec<(&'static str, Value)> {
    kind.rules_for(source)
        .filter_map(|rule| (rule.rule)(raw, object, ctx).map(|value| (rule.output, value)))
        .collect()
}

/// Normalizes every field present on a raw object.
pub fn normalize_object(kind: ObjectKind, object: &Record, ctx: &NormalizeContext) -> Record {
    FieldSet::from_object(kind, object).apply(object, ctx)
}

/// Fixed set of source fields exported for a series of objects of one kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
    kind: ObjectKind,
    sources: Vec<String>,
}

impl FieldSet {
    /// Computes the field set from the keys present on `object`, minus ignored keys.
    pub fn from_object(kind: ObjectKind, object: &Record) -> Self {
        let ignored = kind.ignored();
        let sources = object
            .keys()
            .filter(|key| !ignored.contains(&key.as_str()))
            .cloned()
            .collect();

        Self { kind, sources }
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn contains(&self, source: &str) -> bool {
        self.sources.iter().any(|s| s == source)
    }

    /// Normalizes `object` restricted to this field set.
    pub fn apply(&self, object: &Record, ctx: &NormalizeContext) -> Record {
        let mut record = Record::new();
        let null = Value::Null;

        for source in &self.sources {
            let raw = object.get(source).unwrap_or(&null);
            for (output, value) in normalize_field(self.kind, source, raw, object, ctx) {
                record.insert(output.to_string(), value);
            }
        }

        record
    }
}

/// Serializes a Serenity model to its raw object form.
///
/// # Returns
/// - `Ok(Record)` - The model's wire representation
/// - `Err(serde_json::Error)` - The model did not serialize to a JSON object
pub fn to_raw<T: serde::Serialize>(model: &T) -> Result<Record, serde_json::Error> {
    match serde_json::to_value(model)? {
        Value::Object(object) => Ok(object),
        other => Err(serde::ser::Error::custom(format!(
            "expected a JSON object, found {other}"
        ))),
    }
}

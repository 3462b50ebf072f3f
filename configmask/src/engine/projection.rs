//! The redacted projection of one configuration object.

use std::{borrow::Cow, fmt};

use serde::{Serialize, Serializer, ser::SerializeMap};
use serde_json::{Map, Value as JsonValue};

/// Ordered attribute name to value mapping with sensitive values masked.
///
/// Built fresh by every masking call. Values are owned JSON projections, so
/// a projection never aliases the object it was taken from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RedactedProjection {
    entries: Vec<(Cow<'static, str>, JsonValue)>,
}

impl RedactedProjection {
    /// An empty projection.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, name: Cow<'static, str>, value: JsonValue) {
        self.entries.push((name, value));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the projected value of the named attribute.
    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Attribute names, in resolver order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_ref())
    }

    /// Entries, in resolver order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &JsonValue)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_ref(), value))
    }

    /// Converts the projection into a JSON object, keys in resolver order.
    pub fn into_json(self) -> JsonValue {
        JsonValue::Object(
            self.entries
                .into_iter()
                .map(|(key, value)| (key.into_owned(), value))
                .collect::<Map<String, JsonValue>>(),
        )
    }
}

impl<'a> IntoIterator for &'a RedactedProjection {
    type Item = (&'a str, &'a JsonValue);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a JsonValue)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl Serialize for RedactedProjection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key.as_ref(), value)?;
        }
        map.end()
    }
}

/// Renders `{name=value, other=value}`.
impl fmt::Display for RedactedProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_flat(f, self.iter())
    }
}

/// Writes entries as a flat `{key=value, ...}` listing.
///
/// Strings are written bare, everything else as JSON text.
pub(crate) fn write_flat<'a>(
    f: &mut fmt::Formatter<'_>,
    entries: impl Iterator<Item = (&'a str, &'a JsonValue)>,
) -> fmt::Result {
    f.write_str("{")?;
    for (index, (key, value)) in entries.enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        match value {
            JsonValue::String(text) => write!(f, "{key}={text}")?,
            other => write!(f, "{key}={other}")?,
        }
    }
    f.write_str("}")
}

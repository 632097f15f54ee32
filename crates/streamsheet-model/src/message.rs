use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Stable identifier of a [`Message`] within a box.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MessageId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for MessageId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for MessageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A message envelope: a `data` payload plus provenance `metadata`.
///
/// Messages are immutable once built. There is no `Clone` impl: duplicating a message must go
/// through [`Message::copy`] so the new allocation never compares identical to the source.
#[derive(Debug, PartialEq, Serialize)]
pub struct Message {
    id: MessageId,
    data: JsonValue,
    metadata: JsonValue,
}

impl Message {
    /// Create a message with a random id and empty metadata.
    pub fn new(data: JsonValue) -> Self {
        Self::with_id(MessageId::random(), data)
    }

    pub fn with_id(id: impl Into<MessageId>, data: JsonValue) -> Self {
        Self {
            id: id.into(),
            data,
            metadata: JsonValue::Object(Map::new()),
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: JsonValue) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn data(&self) -> &JsonValue {
        &self.data
    }

    pub fn metadata(&self) -> &JsonValue {
        &self.metadata
    }

    /// Value in the data section at `path`; an empty path yields the whole section.
    pub fn data_at<S: AsRef<str>>(&self, path: &[S]) -> Option<&JsonValue> {
        lookup_path(&self.data, path)
    }

    /// Value in the metadata section at `path`; an empty path yields the whole section.
    pub fn metadata_at<S: AsRef<str>>(&self, path: &[S]) -> Option<&JsonValue> {
        lookup_path(&self.metadata, path)
    }

    /// Deep copy keeping the id. The copy is a new allocation once boxed, so it is never
    /// mistaken for the source by identity checks.
    pub fn copy(&self) -> Message {
        Message {
            id: self.id.clone(),
            data: self.data.clone(),
            metadata: self.metadata.clone(),
        }
    }
}

/// Walk `root` following `path`.
///
/// Object members are addressed by key. Array elements are addressed by their decimal index.
/// Any other step (missing key, bad index, indexing into a scalar) yields `None`.
pub fn lookup_path<'a, S: AsRef<str>>(root: &'a JsonValue, path: &[S]) -> Option<&'a JsonValue> {
    path.iter().try_fold(root, |current, segment| {
        let segment = segment.as_ref();
        match current {
            JsonValue::Object(map) => map.get(segment),
            JsonValue::Array(items) => segment.parse::<usize>().ok().and_then(|idx| items.get(idx)),
            _ => None,
        }
    })
}

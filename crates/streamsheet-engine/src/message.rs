//! Building new messages from formula values and box references.
//!
//! Every function here returns an owned [`Message`] that no box holds yet. Box messages are
//! copied, never shared, because sheets decide whether they already processed a message by
//! identity.

use std::sync::Arc;

use serde_json::{Map, Value as JsonValue};
use streamsheet_model::Message;

use crate::context::EvalContext;
use crate::locator::locate_ambiguous;
use crate::path::Path;
use crate::term::Term;
use crate::value::{ErrorKind, Value};

/// Build a message whose data is `value`.
///
/// Records and arrays become the data as they are; scalars are wrapped as `{ "value": ... }`.
/// Blank yields no message, and an error value is handed back instead of being wrapped.
pub fn message_from_value(value: &Value) -> Option<Result<Message, ErrorKind>> {
    let data = match value {
        Value::Blank => return None,
        Value::Error(kind) => return Some(Err(*kind)),
        Value::Record(map) => JsonValue::Object(map.clone()),
        Value::Array(items) => JsonValue::Array(items.clone()),
        scalar => {
            let mut map = Map::new();
            map.insert("value".to_string(), scalar.to_json());
            JsonValue::Object(map)
        }
    };
    Some(Ok(Message::new(data)))
}

/// Build a message from a term that is either a box reference or a plain value.
///
/// Reference text (`[outboxId]` or `[sheet][messageId]`) yields a copy of the addressed message,
/// or `None` when it does not exist. Text that is not a well-formed path is taken as a plain
/// value.
pub fn message_from_term(ctx: &EvalContext<'_>, term: &Term) -> Option<Result<Message, ErrorKind>> {
    let text = match term {
        Term::Box { path, .. } => Some(path.as_str()),
        Term::Value(Value::Text(text)) => Some(text.as_str()),
        Term::Value(_) => None,
    };
    if let Some(path) = text.and_then(|text| Path::parse(text).ok()) {
        if !path.is_empty() {
            return locate_ambiguous(ctx, &path).map(|message| Ok(message.copy()));
        }
    }
    match term {
        Term::Value(value) => message_from_value(value),
        Term::Box { path, .. } => message_from_value(&Value::Text(path.clone())),
    }
}

/// Data sections of `messages`, in order.
///
/// With `include_metadata`, metadata members are merged into object payloads (metadata wins on
/// key clashes). The boxed messages themselves are never modified.
pub fn messages_from_box(messages: &[Arc<Message>], include_metadata: bool) -> Vec<JsonValue> {
    messages
        .iter()
        .map(|message| {
            let mut data = message.data().clone();
            if include_metadata {
                if let (JsonValue::Object(target), JsonValue::Object(meta)) =
                    (&mut data, message.metadata())
                {
                    target.extend(meta.iter().map(|(k, v)| (k.clone(), v.clone())));
                }
            }
            data
        })
        .collect()
}

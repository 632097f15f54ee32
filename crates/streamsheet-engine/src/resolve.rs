use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use streamsheet_model::Message;

use crate::context::EvalContext;
use crate::extract::{extract_data, extract_inbox, Section};
use crate::locator::{locate_inbox_entry, locate_inbox_message, locate_outbox_message};
use crate::path::Path;
use crate::term::{BoxKind, Term};
use crate::value::{ErrorKind, Value};

/// Knobs for box-reference resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveOptions {
    /// Report `#NO_MSG_DATA` when an existing message has no value at the requested path.
    ///
    /// When `false` the missing value resolves to [`Value::Blank`].
    #[serde(default = "crate::serde_defaults::default_true")]
    pub require_message_data: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            require_message_data: true,
        }
    }
}

impl ResolveOptions {
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            require_message_data: false,
        }
    }
}

/// Both sections of an inbox message, copied out of the box.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageView {
    pub data: JsonValue,
    pub metadata: JsonValue,
}

impl MessageView {
    pub fn of(message: &Message) -> Self {
        Self {
            data: message.data().clone(),
            metadata: message.metadata().clone(),
        }
    }

    /// `{ "data": ..., "metadata": ... }` as a record value.
    pub fn into_value(self) -> Value {
        let mut map = Map::new();
        map.insert("data".to_string(), self.data);
        map.insert("metadata".to_string(), self.metadata);
        Value::Record(map)
    }
}

/// Outcome of resolving a term.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    Value(Value),
    View(MessageView),
}

impl Resolved {
    pub fn error(kind: ErrorKind) -> Self {
        Resolved::Value(Value::Error(kind))
    }

    pub fn as_error(&self) -> Option<ErrorKind> {
        match self {
            Resolved::Value(Value::Error(kind)) => Some(*kind),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.as_error().is_some()
    }

    pub fn into_value(self) -> Value {
        match self {
            Resolved::Value(value) => value,
            Resolved::View(view) => view.into_value(),
        }
    }
}

/// Resolve `term`: box references are looked up, anything else is returned unchanged.
pub fn resolve(ctx: &EvalContext<'_>, term: &Term, opts: ResolveOptions) -> Resolved {
    match term {
        Term::Value(value) => Resolved::Value(value.clone()),
        Term::Box { kind, path } => message_from_box(ctx, *kind, path, opts),
    }
}

/// Resolve a box reference of `kind` whose path text is `raw_path`.
///
/// Errors are returned as values: `#NO_MSG` when the message does not exist, `#NO_MSG_DATA`
/// when it exists but holds nothing at the requested path (unless relaxed through `opts`), and
/// `#VALUE!` when the path text is malformed.
pub fn message_from_box(
    ctx: &EvalContext<'_>,
    kind: BoxKind,
    raw_path: &str,
    opts: ResolveOptions,
) -> Resolved {
    let path = match Path::parse(raw_path) {
        Ok(path) => path,
        Err(err) => {
            log::warn!("invalid {} reference {raw_path:?}: {err}", kind.function_name());
            return Resolved::error(ErrorKind::Value);
        }
    };

    let found = match kind {
        BoxKind::InboxCurrent => {
            locate_inbox_message(ctx, path.non_empty(0), path.non_empty(1))
                .map(|message| Some(Resolved::View(MessageView::of(&message))))
        }
        BoxKind::OutboxCurrent => path
            .get(0)
            .and_then(|id| locate_outbox_message(ctx, id))
            .map(|message| data_value(message.data())),
        BoxKind::OutboxData => {
            let (address, sub_path) = path.split_at(1);
            address
                .first()
                .and_then(|id| locate_outbox_message(ctx, id))
                .map(|message| extract_data(&message, sub_path).map(Resolved::Value))
        }
        BoxKind::InboxData | BoxKind::InboxMetadata => {
            let section = if kind == BoxKind::InboxData {
                Section::Data
            } else {
                Section::Metadata
            };
            let (_, sub_path) = path.split_at(2);
            locate_inbox_entry(ctx, path.non_empty(0), path.non_empty(1)).map(
                |(sheet, message)| {
                    extract_inbox(sheet, &message, section, sub_path).map(Resolved::Value)
                },
            )
        }
    };

    match found {
        None => {
            log::debug!("{} {path}: no message", kind.function_name());
            Resolved::error(ErrorKind::NoMsg)
        }
        Some(Some(resolved)) if !matches!(resolved, Resolved::Value(Value::Blank)) => resolved,
        Some(_) if opts.require_message_data => Resolved::error(ErrorKind::NoMsgData),
        Some(_) => Resolved::Value(Value::Blank),
    }
}

fn data_value(data: &JsonValue) -> Option<Resolved> {
    Some(Resolved::Value(Value::from_json(data.clone())))
}

//! Reading values out of located messages.

use std::sync::Arc;

use streamsheet_model::{Message, StreamSheet};

use crate::context::EvalContext;
use crate::locator::{locate_inbox_entry, locate_outbox_message};
use crate::path::Path;
use crate::term::{BoxKind, Term};
use crate::value::{ErrorKind, Value};

/// Label reported for a data reference without a sub-path.
pub const DATA_KEY: &str = "Data";
/// Label reported for a metadata reference without a sub-path.
pub const METADATA_KEY: &str = "Metadata";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Data,
    Metadata,
}

impl Section {
    pub fn default_key(self) -> &'static str {
        match self {
            Section::Data => DATA_KEY,
            Section::Metadata => METADATA_KEY,
        }
    }
}

/// Value at `sub_path` in the message's data; `None` if the path does not exist.
pub fn extract_data(message: &Message, sub_path: &[String]) -> Option<Value> {
    message.data_at(sub_path).cloned().map(Value::from_json)
}

/// Value at `sub_path` in the message's metadata; `None` if the path does not exist.
pub fn extract_metadata(message: &Message, sub_path: &[String]) -> Option<Value> {
    message.metadata_at(sub_path).cloned().map(Value::from_json)
}

pub fn extract(message: &Message, section: Section, sub_path: &[String]) -> Option<Value> {
    match section {
        Section::Data => extract_data(message, sub_path),
        Section::Metadata => extract_metadata(message, sub_path),
    }
}

/// Extract from an inbox message owned by `sheet`.
///
/// A message the sheet has already finished processing is consumed: nothing is extracted, even
/// though its payload is still there.
pub fn extract_inbox(
    sheet: &StreamSheet,
    message: &Arc<Message>,
    section: Section,
    sub_path: &[String],
) -> Option<Value> {
    if sheet.is_message_processed(message) {
        log::trace!(
            "sheet {}: message {} already processed",
            sheet.name(),
            message.id()
        );
        return None;
    }
    extract(message, section, sub_path)
}

/// Result of reading a single value through a data or metadata reference.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageValue {
    /// Last sub-path segment, or the section label when the reference has no sub-path.
    pub key: String,
    /// Extracted value; `None` when the message or the path is missing, or the message was
    /// already processed.
    pub value: Option<Value>,
    /// Whether the addressed inbox message was already processed by its sheet.
    pub is_processed: bool,
}

/// Read the value addressed by an inbox-data, inbox-metadata or outbox-data term.
///
/// Any other term yields `#VALUE!`.
pub fn read_message_value(ctx: &EvalContext<'_>, term: &Term) -> MessageValue {
    let (kind, raw) = match term {
        Term::Box {
            kind: kind @ (BoxKind::InboxData | BoxKind::InboxMetadata | BoxKind::OutboxData),
            path,
        } => (*kind, path.as_str()),
        Term::Box { .. } | Term::Value(_) => return value_error(DATA_KEY),
    };
    let section = match kind {
        BoxKind::InboxMetadata => Section::Metadata,
        _ => Section::Data,
    };
    let path = match Path::parse(raw) {
        Ok(path) => path,
        Err(err) => {
            log::warn!("invalid box reference {raw:?}: {err}");
            return value_error(section.default_key());
        }
    };

    let (address, sub_path) = path.split_at(kind.addressing_len());
    let key = sub_path
        .last()
        .filter(|segment| !segment.is_empty())
        .map_or_else(|| section.default_key().to_string(), Clone::clone);

    if kind.is_inbox() {
        let name = address.first().map(String::as_str);
        let id = address.get(1).map(String::as_str);
        let Some((sheet, message)) = locate_inbox_entry(ctx, name, id) else {
            return MessageValue { key, value: None, is_processed: false };
        };
        let is_processed = sheet.is_message_processed(&message);
        let value = extract_inbox(sheet, &message, section, sub_path);
        MessageValue { key, value, is_processed }
    } else {
        let value = address
            .first()
            .and_then(|id| locate_outbox_message(ctx, id))
            .and_then(|message| extract_data(&message, sub_path));
        MessageValue { key, value, is_processed: false }
    }
}

fn value_error(key: &str) -> MessageValue {
    MessageValue {
        key: key.to_string(),
        value: Some(Value::Error(ErrorKind::Value)),
        is_processed: false,
    }
}

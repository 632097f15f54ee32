//! Finding the box and message a reference addresses.
//!
//! Lookups return shared `Arc<Message>` handles for reading inside a single resolution. They
//! never leave the engine as-is: anything handed to a new context goes through
//! [`streamsheet_model::Message::copy`].

use std::sync::Arc;

use streamsheet_model::{Inbox, Message, MessageId, Outbox, StreamSheet};

use crate::context::EvalContext;
use crate::path::Path;

/// Inbox of the sheet named `sheet_name` (the evaluating sheet when absent or empty).
pub fn inbox<'a>(ctx: &EvalContext<'a>, sheet_name: Option<&str>) -> Option<&'a Inbox> {
    ctx.stream_sheet_by_name(sheet_name).map(|sheet| sheet.inbox())
}

pub fn outbox<'a>(ctx: &EvalContext<'a>) -> Option<&'a Outbox> {
    ctx.machine.map(|machine| machine.outbox())
}

/// Inbox message `message_id` of sheet `sheet_name`.
///
/// An absent or empty sheet name selects the evaluating sheet; an absent or empty id selects
/// that sheet's current message. The sheet is asked rather than its inbox because the message
/// it is working on may no longer be the inbox head.
pub fn locate_inbox_message(
    ctx: &EvalContext<'_>,
    sheet_name: Option<&str>,
    message_id: Option<&str>,
) -> Option<Arc<Message>> {
    locate_inbox_entry(ctx, sheet_name, message_id).map(|(_, message)| message)
}

/// Like [`locate_inbox_message`], also returning the sheet that owns the message.
pub(crate) fn locate_inbox_entry<'a>(
    ctx: &EvalContext<'a>,
    sheet_name: Option<&str>,
    message_id: Option<&str>,
) -> Option<(&'a StreamSheet, Arc<Message>)> {
    let sheet = ctx.stream_sheet_by_name(sheet_name)?;
    let id = message_id.filter(|id| !id.is_empty()).map(MessageId::from);
    let message = sheet.get_message(id.as_ref())?;
    Some((sheet, message))
}

pub fn locate_outbox_message(ctx: &EvalContext<'_>, message_id: &str) -> Option<Arc<Message>> {
    outbox(ctx)?.peek(&MessageId::from(message_id))
}

/// Message addressed by a path that may point into either box.
///
/// A single segment is tried as an outbox id first; only if the outbox has no such message is
/// the path read as `[sheet][messageId]`. Inbox and outbox ids are not guaranteed to be
/// disjoint, so a colliding id always resolves to the outbox message.
pub fn locate_ambiguous(ctx: &EvalContext<'_>, path: &Path) -> Option<Arc<Message>> {
    if path.is_empty() {
        return None;
    }
    if path.len() == 1 {
        if let Some(message) = path.get(0).and_then(|id| locate_outbox_message(ctx, id)) {
            return Some(message);
        }
        log::trace!("no outbox message for {path}, trying inbox");
    }
    locate_inbox_message(ctx, path.non_empty(0), path.non_empty(1))
}

use std::sync::Arc;

use parking_lot::RwLock;

use crate::{Inbox, Message, MessageId, ModelError};

#[derive(Debug, Default)]
struct MessageHandler {
    message: Option<Arc<Message>>,
    processed: bool,
}

/// A sheet of a stream machine.
///
/// Each sheet owns an [`Inbox`] and explicitly tracks the message it is currently working on.
/// The current message is usually the head of the inbox, but it may already have been detached
/// from it, so lookups go through [`StreamSheet::get_message`] rather than the inbox alone.
#[derive(Debug)]
pub struct StreamSheet {
    name: String,
    inbox: Inbox,
    handler: RwLock<MessageHandler>,
}

impl StreamSheet {
    pub fn new(name: impl Into<String>) -> Result<Self, ModelError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::EmptySheetName);
        }
        Ok(Self {
            name,
            inbox: Inbox::new(),
            handler: RwLock::new(MessageHandler::default()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inbox(&self) -> &Inbox {
        &self.inbox
    }

    pub fn current_message(&self) -> Option<Arc<Message>> {
        self.handler.read().message.clone()
    }

    /// The authoritative message for `id`.
    ///
    /// `None` selects the current message. An id matching the current message returns it even
    /// when it is no longer the inbox head (or no longer in the inbox at all).
    ///
    /// The handler lock is held across the inbox lookup so that a concurrent
    /// [`StreamSheet::process_next`] is observed either before or after it moves a message.
    pub fn get_message(&self, id: Option<&MessageId>) -> Option<Arc<Message>> {
        let handler = self.handler.read();
        match id {
            None => handler.message.clone(),
            Some(id) => match &handler.message {
                Some(msg) if msg.id() == id => Some(Arc::clone(msg)),
                _ => self.inbox.peek(id),
            },
        }
    }

    /// Make `message` the current, not yet processed, message.
    pub fn attach_message(&self, message: Arc<Message>) {
        log::trace!("sheet {}: attach message {}", self.name, message.id());
        let mut handler = self.handler.write();
        handler.message = Some(message);
        handler.processed = false;
    }

    /// Pop the oldest inbox message and make it current.
    ///
    /// Returns the new current message, or `None` (leaving the sheet without a current
    /// message) when the inbox is empty.
    pub fn process_next(&self) -> Option<Arc<Message>> {
        // Lock order: handler, then inbox.
        let mut handler = self.handler.write();
        let next = self.inbox.take_oldest();
        handler.message = next.clone();
        handler.processed = false;
        next
    }

    pub fn mark_processed(&self) {
        self.handler.write().processed = true;
    }

    pub fn detach_message(&self) -> Option<Arc<Message>> {
        let mut handler = self.handler.write();
        handler.processed = false;
        handler.message.take()
    }

    /// Whether `message` is this sheet's current message and has finished processing.
    ///
    /// Identity is allocation identity: a [`Message::copy`] of the current message is never
    /// considered processed.
    pub fn is_message_processed(&self, message: &Arc<Message>) -> bool {
        let handler = self.handler.read();
        handler.processed
            && handler
                .message
                .as_ref()
                .is_some_and(|current| Arc::ptr_eq(current, message))
    }
}

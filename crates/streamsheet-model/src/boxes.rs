use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::{Message, MessageId, ModelError};

/// Ordered, id-addressable message storage shared by inboxes and the outbox.
///
/// Readers clone an `Arc<Message>` out of the map while holding the read lock, so a message
/// observed by a lookup is always complete: writers swap whole entries under the write lock.
#[derive(Debug, Default)]
struct MessageStore {
    messages: RwLock<IndexMap<MessageId, Arc<Message>>>,
}

impl MessageStore {
    fn get(&self, id: &MessageId) -> Option<Arc<Message>> {
        self.messages.read().get(id).cloned()
    }

    fn first(&self) -> Option<Arc<Message>> {
        self.messages.read().first().map(|(_, msg)| Arc::clone(msg))
    }

    fn put(&self, message: Message) -> Result<Arc<Message>, ModelError> {
        let mut messages = self.messages.write();
        if messages.contains_key(message.id()) {
            return Err(ModelError::DuplicateMessage(message.id().clone()));
        }
        let message = Arc::new(message);
        messages.insert(message.id().clone(), Arc::clone(&message));
        Ok(message)
    }

    fn take_first(&self) -> Option<Arc<Message>> {
        self.messages.write().shift_remove_index(0).map(|(_, msg)| msg)
    }

    fn remove(&self, id: &MessageId) -> Option<Arc<Message>> {
        self.messages.write().shift_remove(id)
    }

    fn clear(&self) {
        self.messages.write().clear();
    }

    fn len(&self) -> usize {
        self.messages.read().len()
    }

    fn snapshot(&self) -> Vec<Arc<Message>> {
        self.messages.read().values().cloned().collect()
    }
}

/// Per-sheet message queue.
///
/// Messages keep their arrival order. The inbox does not know which message its sheet is
/// working on: the current message usually has already been taken out of it, so ask
/// [`crate::StreamSheet::get_message`] for that.
#[derive(Debug, Default)]
pub struct Inbox {
    store: MessageStore,
}

impl Inbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn peek(&self, id: &MessageId) -> Option<Arc<Message>> {
        self.store.get(id)
    }

    /// The oldest queued message. This is the next message to be processed, not the current one.
    pub fn peek_oldest(&self) -> Option<Arc<Message>> {
        self.store.first()
    }

    pub fn put(&self, message: Message) -> Result<Arc<Message>, ModelError> {
        self.store.put(message)
    }

    /// Remove and return the oldest message.
    pub fn take_oldest(&self) -> Option<Arc<Message>> {
        self.store.take_first()
    }

    pub fn remove(&self, id: &MessageId) -> Option<Arc<Message>> {
        self.store.remove(id)
    }

    pub fn clear(&self) {
        self.store.clear();
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Messages in arrival order.
    pub fn messages(&self) -> Vec<Arc<Message>> {
        self.store.snapshot()
    }
}

/// Machine-wide message store, addressed only by id.
#[derive(Debug, Default)]
pub struct Outbox {
    store: MessageStore,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn peek(&self, id: &MessageId) -> Option<Arc<Message>> {
        self.store.get(id)
    }

    pub fn put(&self, message: Message) -> Result<Arc<Message>, ModelError> {
        self.store.put(message)
    }

    pub fn remove(&self, id: &MessageId) -> Option<Arc<Message>> {
        self.store.remove(id)
    }

    pub fn clear(&self) {
        self.store.clear();
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Messages in insertion order.
    pub fn messages(&self) -> Vec<Arc<Message>> {
        self.store.snapshot()
    }
}

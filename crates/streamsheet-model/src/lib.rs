//! `streamsheet-model` defines the in-memory object graph of a stream machine.
//!
//! A [`Machine`] owns a machine-wide [`Outbox`] and a named collection of
//! [`StreamSheet`]s. Every sheet owns one [`Inbox`] and tracks the message it is
//! currently processing.
//!
//! Boxes hand out [`Message`]s as `Arc<Message>` snapshots. Whether two handles refer to
//! the *same* message is decided by allocation identity (`Arc::ptr_eq`), which is how a
//! sheet answers [`StreamSheet::is_message_processed`]. Code that needs a message in a new
//! context must call [`Message::copy`]; `Message` deliberately does not implement `Clone`.

mod boxes;
mod error;
mod machine;
mod message;
mod serde_defaults;
pub mod settings;
mod sheet;

pub use boxes::{Inbox, Outbox};
pub use error::ModelError;
pub use machine::Machine;
pub use message::{lookup_path, Message, MessageId};
pub use settings::{MachineSettings, DEFAULT_LOCALE};
pub use sheet::StreamSheet;

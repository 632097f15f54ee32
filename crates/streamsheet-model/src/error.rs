use crate::MessageId;

/// Errors raised by mutating operations on the machine model.
///
/// Lookups never fail with an error: a missing sheet or message is reported as `None`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("sheet name cannot be empty")]
    EmptySheetName,

    #[error("sheet name already exists: {0}")]
    DuplicateSheet(String),

    #[error("message {0} is already in this box")]
    DuplicateMessage(MessageId),

    #[error("invalid machine settings json: {0}")]
    InvalidSettings(String),
}

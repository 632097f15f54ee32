use crate::value::Value;

/// The box a reference term addresses, and how its path is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoxKind {
    /// `[sheet][messageId]`: a whole inbox message.
    InboxCurrent,
    /// `[sheet][messageId][...]`: a value in an inbox message's data.
    InboxData,
    /// `[sheet][messageId][...]`: a value in an inbox message's metadata.
    InboxMetadata,
    /// `[messageId]`: an outbox message's data.
    OutboxCurrent,
    /// `[messageId][...]`: a value in an outbox message's data.
    OutboxData,
}

impl BoxKind {
    /// Number of leading path segments that address the box and message.
    pub fn addressing_len(self) -> usize {
        match self {
            BoxKind::InboxCurrent | BoxKind::InboxData | BoxKind::InboxMetadata => 2,
            BoxKind::OutboxCurrent | BoxKind::OutboxData => 1,
        }
    }

    pub fn is_inbox(self) -> bool {
        self.addressing_len() == 2
    }

    /// Name of the formula function producing references of this kind.
    pub fn function_name(self) -> &'static str {
        match self {
            BoxKind::InboxCurrent => "INBOX",
            BoxKind::InboxData => "INBOXDATA",
            BoxKind::InboxMetadata => "INBOXMETADATA",
            BoxKind::OutboxCurrent => "OUTBOX",
            BoxKind::OutboxData => "OUTBOXDATA",
        }
    }
}

/// Decides which box reference (if any) a formula function call denotes.
///
/// Parsers plug in their own classifier; [`FunctionNameClassifier`] covers the built-in box
/// functions.
pub trait TermClassifier {
    fn classify(&self, function: &str) -> Option<BoxKind>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FunctionNameClassifier;

impl TermClassifier for FunctionNameClassifier {
    fn classify(&self, function: &str) -> Option<BoxKind> {
        const KINDS: [BoxKind; 5] = [
            BoxKind::InboxCurrent,
            BoxKind::InboxData,
            BoxKind::InboxMetadata,
            BoxKind::OutboxCurrent,
            BoxKind::OutboxData,
        ];
        KINDS
            .into_iter()
            .find(|kind| kind.function_name().eq_ignore_ascii_case(function))
    }
}

/// A formula term, classified once.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// Not a box reference; resolves to itself.
    Value(Value),
    /// A box reference whose `path` is the bracket text produced by the box function.
    Box { kind: BoxKind, path: String },
}

impl Term {
    pub fn inbox(path: impl Into<String>) -> Self {
        Self::boxed(BoxKind::InboxCurrent, path)
    }

    pub fn inbox_data(path: impl Into<String>) -> Self {
        Self::boxed(BoxKind::InboxData, path)
    }

    pub fn inbox_metadata(path: impl Into<String>) -> Self {
        Self::boxed(BoxKind::InboxMetadata, path)
    }

    pub fn outbox(path: impl Into<String>) -> Self {
        Self::boxed(BoxKind::OutboxCurrent, path)
    }

    pub fn outbox_data(path: impl Into<String>) -> Self {
        Self::boxed(BoxKind::OutboxData, path)
    }

    fn boxed(kind: BoxKind, path: impl Into<String>) -> Self {
        Term::Box {
            kind,
            path: path.into(),
        }
    }

    /// Classify the result of evaluating `function` to `value`.
    ///
    /// A recognized box function yields [`Term::Box`] carrying the value's text as its path.
    /// Everything else, including a box function that evaluated to an error or a non-text
    /// value, stays a plain [`Term::Value`].
    pub fn classify(classifier: &dyn TermClassifier, function: Option<&str>, value: Value) -> Self {
        match (function.and_then(|name| classifier.classify(name)), value) {
            (Some(kind), Value::Text(path)) => Term::Box { kind, path },
            (_, value) => Term::Value(value),
        }
    }

    pub fn box_kind(&self) -> Option<BoxKind> {
        match self {
            Term::Box { kind, .. } => Some(*kind),
            Term::Value(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ErrorKind;

    #[test]
    fn classifies_box_functions_case_insensitively() {
        let c = FunctionNameClassifier;
        assert_eq!(c.classify("inboxdata"), Some(BoxKind::InboxData));
        assert_eq!(c.classify("OUTBOX"), Some(BoxKind::OutboxCurrent));
        assert_eq!(c.classify("SUM"), None);
    }

    #[test]
    fn classify_builds_box_terms_from_text() {
        let term = Term::classify(&FunctionNameClassifier, Some("INBOXMETADATA"), "[S1][m1][ts]".into());
        assert_eq!(term, Term::inbox_metadata("[S1][m1][ts]"));
        assert_eq!(term.box_kind(), Some(BoxKind::InboxMetadata));
    }

    #[test]
    fn non_box_terms_stay_values() {
        let plain = Term::classify(&FunctionNameClassifier, None, Value::Number(1.0));
        assert_eq!(plain, Term::Value(Value::Number(1.0)));

        let errored = Term::classify(
            &FunctionNameClassifier,
            Some("OUTBOX"),
            Value::Error(ErrorKind::Value),
        );
        assert_eq!(errored, Term::Value(Value::Error(ErrorKind::Value)));
    }

    #[test]
    fn addressing_lengths() {
        assert_eq!(BoxKind::InboxMetadata.addressing_len(), 2);
        assert_eq!(BoxKind::OutboxData.addressing_len(), 1);
        assert!(BoxKind::InboxCurrent.is_inbox());
        assert!(!BoxKind::OutboxCurrent.is_inbox());
    }
}

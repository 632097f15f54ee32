#![forbid(unsafe_code)]
#![deny(unreachable_patterns)]

//! Box-reference resolution for stream sheets.
//!
//! Formulas can reference messages flowing through a sheet's inbox and the machine's outbox via
//! the box functions (`INBOX`, `INBOXDATA`, `INBOXMETADATA`, `OUTBOX`, `OUTBOXDATA`). Each of
//! them evaluates to bracket path text such as `[Sheet1][msg-7][customer][name]`; this crate turns
//! that text, tagged with its [`BoxKind`], into a value against the live machine state.
//!
//! Resolution is a pure read: it never changes box membership or message contents, and no state
//! survives between calls. Failures are spreadsheet errors carried as values
//! ([`ErrorKind::NoMsg`], [`ErrorKind::NoMsgData`], [`ErrorKind::Value`]), never panics or
//! `Err`s.
//!
//! ```
//! use serde_json::json;
//! use streamsheet_engine::{resolve, EvalContext, ResolveOptions, Term, Value};
//! use streamsheet_model::{Machine, Message};
//!
//! let mut machine = Machine::new();
//! machine.add_sheet("Sheet1").unwrap();
//! let sheet = machine.get_stream_sheet_by_name("Sheet1").unwrap();
//! sheet.inbox().put(Message::with_id("m1", json!({ "x": 5 }))).unwrap();
//! sheet.process_next();
//!
//! let ctx = EvalContext::new(&machine, sheet);
//! let x = resolve(&ctx, &Term::inbox_data("[Sheet1][][x]"), ResolveOptions::default());
//! assert_eq!(x.into_value(), Value::Number(5.0));
//! ```

pub mod context;
pub mod extract;
pub mod locator;
pub mod message;
pub mod path;
pub mod resolve;
mod serde_defaults;
pub mod term;
pub mod value;

pub use context::EvalContext;
pub use extract::{read_message_value, MessageValue, Section};
pub use locator::{locate_ambiguous, locate_inbox_message, locate_outbox_message};
pub use message::{message_from_term, message_from_value, messages_from_box};
pub use path::{Path, PathParseError};
pub use resolve::{message_from_box, resolve, MessageView, ResolveOptions, Resolved};
pub use term::{BoxKind, FunctionNameClassifier, Term, TermClassifier};
pub use value::{ErrorKind, Value};

use std::fmt;

use serde_json::{Map, Number, Value as JsonValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Null,
    Div0,
    Value,
    Ref,
    Name,
    Num,
    NA,
    Calc,
    /// The addressed inbox or outbox message does not exist.
    NoMsg,
    /// The message exists but the requested path holds no value.
    NoMsgData,
}

impl ErrorKind {
    pub fn as_code(self) -> &'static str {
        match self {
            ErrorKind::Null => "#NULL!",
            ErrorKind::Div0 => "#DIV/0!",
            ErrorKind::Value => "#VALUE!",
            ErrorKind::Ref => "#REF!",
            ErrorKind::Name => "#NAME?",
            ErrorKind::Num => "#NUM!",
            ErrorKind::NA => "#N/A",
            ErrorKind::Calc => "#CALC!",
            ErrorKind::NoMsg => "#NO_MSG",
            ErrorKind::NoMsgData => "#NO_MSG_DATA",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "#NULL!" => ErrorKind::Null,
            "#DIV/0!" => ErrorKind::Div0,
            "#VALUE!" => ErrorKind::Value,
            "#REF!" => ErrorKind::Ref,
            "#NAME?" => ErrorKind::Name,
            "#NUM!" => ErrorKind::Num,
            "#N/A" => ErrorKind::NA,
            "#CALC!" => ErrorKind::Calc,
            "#NO_MSG" => ErrorKind::NoMsg,
            "#NO_MSG_DATA" => ErrorKind::NoMsgData,
            _ => return None,
        })
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

/// A cell value as seen by formula evaluation.
///
/// Structured message payloads surface as [`Value::Record`] (JSON objects) and
/// [`Value::Array`] (JSON arrays). `Blank` doubles as "no value".
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Bool(bool),
    Blank,
    Error(ErrorKind),
    Array(Vec<JsonValue>),
    Record(Map<String, JsonValue>),
}

impl Value {
    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Value::Blank)
    }

    pub fn from_json(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Value::Blank,
            JsonValue::Bool(b) => Value::Bool(b),
            // Integers beyond 2^53 lose precision here, same as any spreadsheet number.
            JsonValue::Number(n) => n.as_f64().map_or(Value::Error(ErrorKind::Num), Value::Number),
            JsonValue::String(s) => Value::Text(s),
            JsonValue::Array(items) => Value::Array(items),
            JsonValue::Object(map) => Value::Record(map),
        }
    }

    /// JSON form of the value. Errors serialize as their code text; non-finite numbers as `null`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Number(n) => json_number(*n),
            Value::Text(s) => JsonValue::String(s.clone()),
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Blank => JsonValue::Null,
            Value::Error(e) => JsonValue::String(e.as_code().to_string()),
            Value::Array(items) => JsonValue::Array(items.clone()),
            Value::Record(map) => JsonValue::Object(map.clone()),
        }
    }
}

/// Integral numbers are emitted as JSON integers so payloads like `{ "value": 42 }` keep their
/// natural shape.
fn json_number(n: f64) -> JsonValue {
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        JsonValue::Number(Number::from(n as i64))
    } else {
        Number::from_f64(n).map_or(JsonValue::Null, JsonValue::Number)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<ErrorKind> for Value {
    fn from(value: ErrorKind) -> Self {
        Value::Error(value)
    }
}

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        Value::from_json(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Blank => f.write_str(""),
            Value::Error(e) => write!(f, "{e}"),
            Value::Array(items) => write!(f, "{}", JsonValue::Array(items.clone())),
            Value::Record(map) => write!(f, "{}", JsonValue::Object(map.clone())),
        }
    }
}

use std::sync::Arc;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;
use streamsheet_engine::{
    locate_ambiguous, message_from_term, message_from_value, ErrorKind, EvalContext, Path, Term,
    Value,
};
use streamsheet_model::{Machine, Message};

fn machine() -> Machine {
    let mut machine = Machine::new();
    machine.add_sheet("Sheet1").unwrap();
    machine.add_sheet("Sheet2").unwrap();
    machine
}

#[test]
fn single_segment_ids_prefer_the_outbox() {
    let machine = machine();
    machine.outbox().put(Message::with_id("m1", json!("outbox"))).unwrap();
    let sheet1 = machine.get_stream_sheet_by_name("Sheet1").unwrap();
    sheet1.inbox().put(Message::with_id("m1", json!("inbox"))).unwrap();
    sheet1.process_next();
    let ctx = EvalContext::new(&machine, sheet1);

    let found = locate_ambiguous(&ctx, &Path::parse("[m1]").unwrap()).unwrap();
    assert_eq!(found.data(), &json!("outbox"));

    let built = message_from_term(&ctx, &Term::Value("[m1]".into())).unwrap().unwrap();
    assert_eq!(built.data(), &json!("outbox"));
}

#[test]
fn single_segment_falls_back_to_the_named_sheets_current_message() {
    let machine = machine();
    let sheet2 = machine.get_stream_sheet_by_name("Sheet2").unwrap();
    sheet2.inbox().put(Message::with_id("in-1", json!({ "k": 1 }))).unwrap();
    sheet2.process_next();
    let ctx = EvalContext::new(&machine, machine.get_stream_sheet_by_name("Sheet1").unwrap());

    let found = locate_ambiguous(&ctx, &Path::parse("[Sheet2]").unwrap()).unwrap();
    assert_eq!(found.id().as_str(), "in-1");
}

#[test]
fn forwarding_an_inbox_message_copies_it() {
    let machine = machine();
    let sheet1 = machine.get_stream_sheet_by_name("Sheet1").unwrap();
    sheet1
        .inbox()
        .put(Message::with_id("in-1", json!({ "x": 5 })).with_metadata(json!({ "ts": 1 })))
        .unwrap();
    let source = sheet1.process_next().unwrap();
    let ctx = EvalContext::new(&machine, sheet1);

    let copy = message_from_term(&ctx, &Term::inbox("[Sheet1][in-1]"))
        .unwrap()
        .unwrap();
    assert_eq!(copy.data(), source.data());
    assert_eq!(copy.metadata(), source.metadata());

    // Placing the copy in the outbox gives it its own identity.
    let forwarded = machine.outbox().put(copy).unwrap();
    assert!(!Arc::ptr_eq(&forwarded, &source));

    sheet1.mark_processed();
    assert!(sheet1.is_message_processed(&source));
    assert!(!sheet1.is_message_processed(&forwarded));

    // Rebuilding from the forwarded message and changing it leaves the source alone.
    let mut data = forwarded.data().clone();
    data["x"] = json!(6);
    let changed = Message::with_id("in-1", data);
    assert_eq!(changed.data()["x"], json!(6));
    assert_eq!(source.data(), &json!({ "x": 5 }));
}

#[test]
fn missing_referenced_message_builds_nothing() {
    let machine = machine();
    let ctx = EvalContext::new(&machine, machine.get_stream_sheet_by_name("Sheet1").unwrap());
    assert!(message_from_term(&ctx, &Term::Value("[nope]".into())).is_none());
    assert!(message_from_term(&ctx, &Term::outbox("[nope]")).is_none());
}

#[test]
fn plain_values_build_fresh_messages() {
    let machine = machine();
    let ctx = EvalContext::new(&machine, machine.get_stream_sheet_by_name("Sheet1").unwrap());

    let msg = message_from_term(&ctx, &Term::Value(Value::Number(42.0)))
        .unwrap()
        .unwrap();
    assert_eq!(msg.data(), &json!({ "value": 42 }));

    // Not a well-formed path: a plain text value.
    let msg = message_from_term(&ctx, &Term::Value("[unterminated".into()))
        .unwrap()
        .unwrap();
    assert_eq!(msg.data(), &json!({ "value": "[unterminated" }));

    assert_eq!(
        message_from_term(&ctx, &Term::Value(Value::Error(ErrorKind::NoMsgData)))
            .unwrap()
            .unwrap_err(),
        ErrorKind::NoMsgData
    );
}

#[test]
fn scalar_42_is_wrapped_and_objects_are_copied() {
    let msg = message_from_value(&Value::Number(42.0)).unwrap().unwrap();
    assert_eq!(msg.data(), &json!({ "value": 42 }));

    let record = Value::from_json(json!({ "a": 1 }));
    let msg = message_from_value(&record).unwrap().unwrap();
    assert_eq!(msg.data(), &json!({ "a": 1 }));
    // The record value is still intact and independent of the message.
    assert_eq!(record.to_json(), json!({ "a": 1 }));
}

proptest! {
    #[test]
    fn scalars_are_always_wrapped_under_value(n in -1.0e9f64..1.0e9, s in "[a-z]{0,12}", b in any::<bool>()) {
        for value in [Value::Number(n), Value::Text(s.clone()), Value::Bool(b)] {
            let msg = message_from_value(&value).unwrap().unwrap();
            let data = msg.data().as_object().unwrap();
            prop_assert_eq!(data.len(), 1);
            prop_assert_eq!(data.get("value"), Some(&value.to_json()));
        }
    }

    #[test]
    fn each_constructed_message_gets_a_fresh_id(n in any::<i32>()) {
        let a = message_from_value(&Value::from(n as i64)).unwrap().unwrap();
        let b = message_from_value(&Value::from(n as i64)).unwrap().unwrap();
        prop_assert_ne!(a.id(), b.id());
        prop_assert_eq!(a.data(), b.data());
    }
}

use std::sync::Arc;
use std::thread;

use serde_json::json;
use streamsheet_engine::{resolve, ErrorKind, EvalContext, ResolveOptions, Term, Value};
use streamsheet_model::{Machine, Message, MessageId};

#[test]
fn sheets_read_the_outbox_while_it_changes() {
    let mut machine = Machine::new();
    for name in ["Sheet1", "Sheet2", "Sheet3"] {
        machine.add_sheet(name).unwrap();
    }
    let machine = Arc::new(machine);
    let id = MessageId::from("shared");

    let writer = {
        let machine = Arc::clone(&machine);
        let id = id.clone();
        thread::spawn(move || {
            for n in 0..300 {
                machine.outbox().remove(&id);
                machine
                    .outbox()
                    .put(Message::with_id(id.clone(), json!({ "n": n, "check": n })))
                    .unwrap();
            }
        })
    };

    let readers: Vec<_> = ["Sheet1", "Sheet2", "Sheet3"]
        .into_iter()
        .map(|name| {
            let machine = Arc::clone(&machine);
            thread::spawn(move || {
                let sheet = machine.get_stream_sheet_by_name(name).unwrap();
                let ctx = EvalContext::new(&machine, sheet);
                for _ in 0..300 {
                    match resolve(&ctx, &Term::outbox("[shared]"), ResolveOptions::default())
                        .into_value()
                    {
                        Value::Record(map) => assert_eq!(map["n"], map["check"]),
                        Value::Error(kind) => assert_eq!(kind, ErrorKind::NoMsg),
                        other => panic!("unexpected resolution {other:?}"),
                    }
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
}

#[test]
fn inbox_lookups_by_id_survive_a_sheet_switching_messages() {
    let mut machine = Machine::new();
    machine.add_sheet("S").unwrap();
    machine.add_sheet("Reader").unwrap();
    let machine = Arc::new(machine);
    {
        let sheet = machine.get_stream_sheet_by_name("S").unwrap();
        sheet.inbox().put(Message::with_id("a", json!({ "id": "a" }))).unwrap();
        sheet.inbox().put(Message::with_id("b", json!({ "id": "b" }))).unwrap();
        sheet.process_next().unwrap();
    }

    let writer = {
        let machine = Arc::clone(&machine);
        thread::spawn(move || {
            let sheet = machine.get_stream_sheet_by_name("S").unwrap();
            for _ in 0..1_000 {
                let current = sheet.current_message().unwrap();
                sheet.inbox().put(current.copy()).unwrap();
                sheet.process_next().unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..3)
        .map(|_| {
            let machine = Arc::clone(&machine);
            thread::spawn(move || {
                let reader = machine.get_stream_sheet_by_name("Reader").unwrap();
                let ctx = EvalContext::new(&machine, reader);
                let mut no_msg = 0;
                for _ in 0..1_000 {
                    for path in ["[S][a]", "[S][b]"] {
                        let resolved = resolve(&ctx, &Term::inbox(path), ResolveOptions::default());
                        if resolved.as_error() == Some(ErrorKind::NoMsg) {
                            no_msg += 1;
                        }
                    }
                }
                no_msg
            })
        })
        .collect();

    writer.join().unwrap();
    let no_msg: usize = readers.into_iter().map(|r| r.join().unwrap()).sum();
    assert_eq!(no_msg, 0);
}

//! End-to-end dispatch through resolvers, descriptors and method bindings.

mod common;

use std::sync::Arc;

use common::builders::{call_log, failing_handler, handler_with_prepare, recording_handler};
use pathway_core::handler::{HandlerBuilder, Method};
use pathway_core::registry::{
    ContainerCommandHandlerResolver, InMemoryCommandHandlerResolver, InMemoryEventHandlerResolver,
};
use pathway_core::value::{Object, Value};
use pathway_core::{DispatchError, Dispatcher, DispatcherHandle, DispatcherInterface, ErrorCode, MessageType};
use serde_json::json;

#[derive(Debug)]
struct RegisterUser {
    email: String,
}

#[derive(Debug)]
struct SendWelcomeEmail {
    email: String,
}

struct UserRegistered;

fn dispatcher(commands: InMemoryCommandHandlerResolver, events: InMemoryEventHandlerResolver) -> Dispatcher {
    Dispatcher::new(Arc::new(commands), Arc::new(events))
}

#[test]
fn test_command_threads_stage_outputs() {
    let handler = HandlerBuilder::new("RegisterUserHandler")
        .method(
            Method::new("prepare")
                .param("message")
                .param("dispatcher")
                .body(|_| Ok(Value::from(json!({"a": "b", "c": "d"})))),
        )
        .method(
            Method::new("process")
                .param("c")
                .param("a")
                .body(|args| {
                    assert_eq!(args, vec![Value::from("d"), Value::from("b")]);
                    Ok(Value::from(json!({"e": "f"})))
                }),
        )
        .method(
            Method::new("finalize")
                .param("e")
                .body(|args| {
                    assert_eq!(args, vec![Value::from("f")]);
                    Ok(Value::from(json!({"i": "j"})))
                }),
        )
        .into_value()
        .unwrap();

    let dispatcher = dispatcher(
        InMemoryCommandHandlerResolver::new().with::<RegisterUser>(handler),
        InMemoryEventHandlerResolver::new(),
    );

    let result = dispatcher
        .dispatch_command(RegisterUser {
            email: "ada@example.com".to_string(),
        })
        .unwrap();

    assert_eq!(result, Value::from(json!({"i": "j"})));
}

#[test]
fn test_prepare_sees_the_dispatched_message() {
    let handler = handler_with_prepare("RegisterUserHandler", |args| {
        let message = args[0]
            .as_object()
            .and_then(|object| object.downcast_ref::<RegisterUser>())
            .ok_or_else(|| anyhow::anyhow!("unexpected message"))?;
        Ok(Value::list([message.email.as_str()]))
    });
    let dispatcher = dispatcher(
        InMemoryCommandHandlerResolver::new().with::<RegisterUser>(handler),
        InMemoryEventHandlerResolver::new(),
    );

    let result = dispatcher
        .dispatch_command(RegisterUser {
            email: "grace@example.com".to_string(),
        })
        .unwrap();

    assert_eq!(result, Value::list(["grace@example.com"]));
}

#[test]
fn test_handlers_dispatch_recursively() {
    let register = handler_with_prepare("RegisterUserHandler", |args| {
        let email = args[0]
            .as_object()
            .and_then(|object| object.downcast_ref::<RegisterUser>())
            .map(|message| message.email.clone())
            .ok_or_else(|| anyhow::anyhow!("unexpected message"))?;
        let dispatcher = DispatcherHandle::from_value(&args[1])
            .ok_or_else(|| anyhow::anyhow!("missing dispatcher"))?;

        let sent = dispatcher.command(Object::new(SendWelcomeEmail { email }))?;
        dispatcher.event(Object::new(UserRegistered))?;
        Ok(Value::list([sent]))
    });
    let send = handler_with_prepare("SendWelcomeEmailHandler", |args| {
        let message = args[0]
            .as_object()
            .and_then(|object| object.downcast_ref::<SendWelcomeEmail>())
            .ok_or_else(|| anyhow::anyhow!("unexpected message"))?;
        Ok(Value::list([format!("sent to {}", message.email)]))
    });

    let log = call_log();
    let commands = InMemoryCommandHandlerResolver::new()
        .with::<RegisterUser>(register)
        .with::<SendWelcomeEmail>(send);
    let events = InMemoryEventHandlerResolver::new()
        .with::<UserRegistered>(vec![recording_handler("Audit", &log)]);
    let dispatcher = dispatcher(commands, events);

    let result = dispatcher
        .dispatch_command(RegisterUser {
            email: "ada@example.com".to_string(),
        })
        .unwrap();

    assert_eq!(
        result,
        Value::list([Value::list(["sent to ada@example.com"])])
    );
    assert_eq!(*log.lock(), ["Audit.prepare", "Audit.process", "Audit.finalize"]);

    let stats = dispatcher.resolver().stats();
    assert_eq!(stats.cached_commands, 2);
    assert_eq!(stats.cached_events, 1);
}

#[test]
fn test_nested_dispatch_error_surfaces_unchanged() {
    let outer = handler_with_prepare("RegisterUserHandler", |args| {
        let dispatcher = DispatcherHandle::from_value(&args[1])
            .ok_or_else(|| anyhow::anyhow!("missing dispatcher"))?;
        dispatcher.command(Object::new(SendWelcomeEmail {
            email: "nobody@example.com".to_string(),
        }))?;
        Ok(Value::list(Vec::<Value>::new()))
    });
    let dispatcher = dispatcher(
        InMemoryCommandHandlerResolver::new().with::<RegisterUser>(outer),
        InMemoryEventHandlerResolver::new(),
    );

    let err = dispatcher
        .dispatch_command(RegisterUser {
            email: "ada@example.com".to_string(),
        })
        .unwrap_err();

    assert!(matches!(
        err,
        DispatchError::NoHandlerForType { ref message_type } if message_type.ends_with("SendWelcomeEmail")
    ));
}

#[test]
fn test_event_handlers_run_in_order() {
    let log = call_log();
    let events = InMemoryEventHandlerResolver::new().with::<UserRegistered>(vec![
        recording_handler("H1", &log),
        recording_handler("H2", &log),
    ]);
    let dispatcher = dispatcher(InMemoryCommandHandlerResolver::new(), events);

    dispatcher.dispatch_event(UserRegistered).unwrap();

    assert_eq!(
        *log.lock(),
        [
            "H1.prepare", "H1.process", "H1.finalize",
            "H2.prepare", "H2.process", "H2.finalize",
        ]
    );
}

#[test]
fn test_event_stops_at_first_failure() {
    let log = call_log();
    let events = InMemoryEventHandlerResolver::new().with::<UserRegistered>(vec![
        recording_handler("H1", &log),
        failing_handler("H2", "mailbox full", &log),
        recording_handler("H3", &log),
    ]);
    let dispatcher = dispatcher(InMemoryCommandHandlerResolver::new(), events);

    let err = dispatcher.dispatch_event(UserRegistered).unwrap_err();

    assert_eq!(err.code(), ErrorCode::Handler);
    assert_eq!(err.to_string(), "mailbox full");
    assert_eq!(
        *log.lock(),
        ["H1.prepare", "H1.process", "H1.finalize", "H2.prepare"]
    );
}

#[test]
fn test_descriptor_is_built_once_across_dispatches() {
    let log = call_log();
    let dispatcher = dispatcher(
        InMemoryCommandHandlerResolver::new().with::<UserRegistered>(recording_handler("H", &log)),
        InMemoryEventHandlerResolver::new(),
    );
    let message_type = MessageType::of::<UserRegistered>();

    dispatcher.dispatch_command(UserRegistered).unwrap();
    let first = dispatcher.resolver().command(&message_type).unwrap();
    dispatcher.dispatch_command(UserRegistered).unwrap();
    let second = dispatcher.resolver().command(&message_type).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(log.lock().len(), 6);
}

#[test]
fn test_missing_lifecycle_method() {
    let handler = HandlerBuilder::new("HalfHandler")
        .method(Method::new("prepare").param("message").param("dispatcher").body(|_| Ok(Value::Null)))
        .method(Method::new("process").body(|_| Ok(Value::Null)))
        .into_value()
        .unwrap();
    let dispatcher = dispatcher(
        InMemoryCommandHandlerResolver::new().with::<UserRegistered>(handler),
        InMemoryEventHandlerResolver::new(),
    );

    let err = dispatcher.dispatch_command(UserRegistered).unwrap_err();

    assert_eq!(err.to_string(), "Method HalfHandler::finalize() does not exist");
}

#[test]
fn test_container_resolver_end_to_end() {
    let log = call_log();
    let message_type = MessageType::of::<UserRegistered>();
    let container = std::collections::HashMap::from([(
        format!("{message_type}Handler"),
        recording_handler("Container", &log),
    )]);
    let dispatcher = Dispatcher::new(
        Arc::new(ContainerCommandHandlerResolver::new(container)),
        Arc::new(InMemoryEventHandlerResolver::new()),
    );

    assert_eq!(
        dispatcher.dispatch_command(UserRegistered).unwrap(),
        Value::from("Container")
    );
}

/// `prepare` takes whatever it is given and the later stages take nothing
fn parameterless_handler(result: &'static str) -> Value {
    HandlerBuilder::new("ParameterlessHandler")
        .method(
            Method::new("prepare")
                .variadic("unused")
                .body(|_| Ok(Value::list(Vec::<Value>::new()))),
        )
        .method(Method::new("process").body(|_| Ok(Value::list(Vec::<Value>::new()))))
        .method(Method::new("finalize").body(move |_| Ok(Value::from(result))))
        .into_value()
        .unwrap()
}

#[test]
fn test_parameterless_lifecycle_returns_finalize_result() {
    let dispatcher = dispatcher(
        InMemoryCommandHandlerResolver::new().with::<UserRegistered>(parameterless_handler("done")),
        InMemoryEventHandlerResolver::new()
            .with::<UserRegistered>(vec![parameterless_handler("ignored")]),
    );

    assert_eq!(dispatcher.dispatch_command(UserRegistered).unwrap(), Value::from("done"));
    assert!(dispatcher.dispatch_event(UserRegistered).is_ok());
}

#[test]
fn test_prepare_without_room_for_message_and_dispatcher() {
    let handler = HandlerBuilder::new("StrictHandler")
        .method(Method::new("prepare").body(|_| Ok(Value::list(Vec::<Value>::new()))))
        .method(Method::new("process").body(|_| Ok(Value::list(Vec::<Value>::new()))))
        .method(Method::new("finalize").body(|_| Ok(Value::Null)))
        .into_value()
        .unwrap();
    let dispatcher = dispatcher(
        InMemoryCommandHandlerResolver::new().with::<UserRegistered>(handler),
        InMemoryEventHandlerResolver::new(),
    );

    let err = dispatcher.dispatch_command(UserRegistered).unwrap_err();

    assert_eq!(err.to_string(), "Too many arguments for StrictHandler::prepare()");
}

#[test]
fn test_non_object_event_handler_runs_no_pipeline() {
    let log = call_log();
    let events = InMemoryEventHandlerResolver::new().with::<UserRegistered>(vec![
        recording_handler("H1", &log),
        Value::from("not-an-object"),
    ]);
    let dispatcher = dispatcher(InMemoryCommandHandlerResolver::new(), events);

    let err = dispatcher.dispatch_event(UserRegistered).unwrap_err();

    assert!(matches!(err, DispatchError::EventHandlerNotAnObject { index: 1, .. }));
    assert!(log.lock().is_empty());
    assert_eq!(err.snapshot()["index"], json!(1));
}

//! Handler fixtures shared across integration tests.

use std::sync::Arc;

use parking_lot::Mutex;
use pathway_core::handler::{HandlerBuilder, Method};
use pathway_core::value::Value;

/// Shared record of lifecycle calls, in call order
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// `prepare(message, dispatcher)` with the given body, plus pass-through
/// `process(...items)` and `finalize(...items)` that return their arguments
pub fn handler_with_prepare<F>(name: &str, prepare: F) -> Value
where
    F: Fn(Vec<Value>) -> anyhow::Result<Value> + Send + Sync + 'static,
{
    HandlerBuilder::new(name)
        .method(
            Method::new("prepare")
                .param("message")
                .param("dispatcher")
                .body(prepare),
        )
        .method(
            Method::new("process")
                .variadic("items")
                .body(|args| Ok(Value::list(args))),
        )
        .method(
            Method::new("finalize")
                .variadic("items")
                .body(|args| Ok(Value::list(args))),
        )
        .into_value()
        .expect("fixture handler is well formed")
}

/// A handler that appends `<name>.<stage>` to `log` in every stage and
/// finalizes with its own name
pub fn recording_handler(name: &'static str, log: &CallLog) -> Value {
    let (prepare_log, process_log, finalize_log) = (log.clone(), log.clone(), log.clone());

    HandlerBuilder::new(name)
        .method(
            Method::new("prepare")
                .param("message")
                .param("dispatcher")
                .body(move |_| {
                    prepare_log.lock().push(format!("{name}.prepare"));
                    Ok(Value::map([("stage", "prepared")]))
                }),
        )
        .method(Method::new("process").param("stage").body(move |_| {
            process_log.lock().push(format!("{name}.process"));
            Ok(Value::map([("stage", "processed")]))
        }))
        .method(Method::new("finalize").param("stage").body(move |_| {
            finalize_log.lock().push(format!("{name}.finalize"));
            Ok(Value::from(name))
        }))
        .into_value()
        .expect("fixture handler is well formed")
}

/// A handler whose `process` fails with `reason`
pub fn failing_handler(name: &'static str, reason: &'static str, log: &CallLog) -> Value {
    let (prepare_log, finalize_log) = (log.clone(), log.clone());

    HandlerBuilder::new(name)
        .method(
            Method::new("prepare")
                .param("message")
                .param("dispatcher")
                .body(move |_| {
                    prepare_log.lock().push(format!("{name}.prepare"));
                    Ok(Value::list(Vec::<Value>::new()))
                }),
        )
        .method(Method::new("process").body(move |_| Err(anyhow::anyhow!(reason))))
        .method(Method::new("finalize").body(move |_| {
            finalize_log.lock().push(format!("{name}.finalize"));
            Ok(Value::Null)
        }))
        .into_value()
        .expect("fixture handler is well formed")
}

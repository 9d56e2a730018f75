mod common;

use common::strategies::*;
use pathway_core::handler::{HandlerBuilder, Method, MethodBinding};
use pathway_core::value::{Array, Value};
use pathway_core::ErrorCode;
use proptest::prelude::*;

/// Handler whose `process` declares `names` as required parameters and
/// echoes the resolved arguments. The variadic name is upper case so it can
/// never collide with a generated parameter name.
fn echo_binding(names: &[String], variadic: bool) -> MethodBinding {
    let mut method = Method::new("process");
    for name in names {
        method = method.param(name.clone());
    }
    if variadic {
        method = method.variadic("REST");
    }

    let handler = HandlerBuilder::new("EchoHandler")
        .method(method.body(|args| Ok(Value::list(args))))
        .into_value()
        .unwrap();

    MethodBinding::bind(handler.as_object().unwrap(), "process").unwrap()
}

proptest! {
    /// Property: positional arguments matching the arity pass through unchanged
    #[test]
    fn positional_arguments_pass_through(
        names in distinct_parameter_names(0..6),
        seed in prop::collection::vec(scalar_strategy(), 6),
    ) {
        let binding = echo_binding(&names, false);
        let supplied: Vec<Value> = seed.into_iter().take(names.len()).map(Value::from).collect();

        let result = binding.invoke(Value::list(supplied.clone())).unwrap();
        prop_assert_eq!(result, Value::list(supplied));
    }

    /// Property: fewer positional arguments than required parameters always fails
    #[test]
    fn short_positional_arguments_fail(names in distinct_parameter_names(1..6), short_by in 1usize..6) {
        let binding = echo_binding(&names, false);
        let supplied = names.len().saturating_sub(short_by);

        let err = binding.invoke(Value::list(vec![Value::Null; supplied])).unwrap_err();
        prop_assert_eq!(err.code(), ErrorCode::MissingArgument);
    }

    /// Property: extra positional arguments fail unless a variadic collects them
    #[test]
    fn extra_positional_arguments(names in distinct_parameter_names(0..4), extra in 1usize..4) {
        let supplied = vec![Value::from(1); names.len() + extra];

        let strict = echo_binding(&names, false);
        let err = strict.invoke(Value::list(supplied.clone())).unwrap_err();
        prop_assert_eq!(err.code(), ErrorCode::TooManyArguments);

        let variadic = echo_binding(&names, true);
        prop_assert_eq!(variadic.invoke(Value::list(supplied.clone())).unwrap(), Value::list(supplied));
    }

    /// Property: named arguments resolve to declaration order whatever order they arrive in
    #[test]
    fn named_arguments_ignore_supplied_order(
        names in distinct_parameter_names(1..6),
        rotation in 0usize..6,
    ) {
        let binding = echo_binding(&names, false);

        let mut entries: Vec<(String, Value)> = names
            .iter()
            .map(|name| (name.clone(), Value::from(format!("value of {name}"))))
            .collect();
        let rotation = rotation % entries.len();
        entries.rotate_left(rotation);

        let supplied: Array = entries.into_iter().collect();
        let expected = Value::list(names.iter().map(|name| format!("value of {name}")));

        prop_assert_eq!(binding.invoke(Value::Array(supplied)).unwrap(), expected);
    }

    /// Property: an unknown named argument is always rejected
    #[test]
    fn unknown_named_argument_fails(names in distinct_parameter_names(0..4)) {
        let binding = echo_binding(&names, false);

        let mut entries: Vec<(String, Value)> =
            names.iter().map(|name| (name.clone(), Value::Null)).collect();
        entries.push(("UNKNOWN".to_string(), Value::Null));
        let supplied: Array = entries.into_iter().collect();

        let err = binding.invoke(Value::Array(supplied)).unwrap_err();
        prop_assert_eq!(err.code(), ErrorCode::TooManyArguments);
    }

    /// Property: scalars are never valid argument collections
    #[test]
    fn scalar_arguments_are_rejected(scalar in scalar_strategy()) {
        let binding = echo_binding(&[], false);

        let err = binding.invoke(Value::from(scalar)).unwrap_err();
        prop_assert_eq!(err.code(), ErrorCode::InvalidArgumentShape);
    }
}

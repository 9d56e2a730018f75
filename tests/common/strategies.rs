use proptest::prelude::*;
use proptest::sample::SizeRange;

/// Strategy for generating valid parameter names
pub fn parameter_name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,15}"
}

/// Strategy for generating a list of distinct parameter names
pub fn distinct_parameter_names(size: impl Into<SizeRange>) -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set(parameter_name_strategy(), size)
        .prop_map(|names| names.into_iter().collect())
}

/// Strategy for generating scalar argument values
pub fn scalar_strategy() -> impl Strategy<Value = serde_json::Value> {
    prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::from),
        any::<i64>().prop_map(serde_json::Value::from),
        "[a-zA-Z0-9 ]{0,12}".prop_map(serde_json::Value::from),
    ]
}

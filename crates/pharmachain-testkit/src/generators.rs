//! Proptest generators for property-based testing.

use proptest::prelude::*;
use serde_json::{Map, Number, Value};

use pharmachain_core::Block;

use crate::fixtures::build_chain;

/// Generate a finite float.
pub fn finite_f64() -> impl Strategy<Value = f64> {
    any::<f64>().prop_filter("finite", |f| f.is_finite())
}

/// Generate a scalar JSON value.
pub fn json_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        any::<u64>().prop_map(Value::from),
        finite_f64().prop_filter_map("finite", |f| Number::from_f64(f).map(Value::Number)),
        any::<String>().prop_map(Value::String),
    ]
}

/// Generate an arbitrary JSON value, nested up to a few levels.
pub fn json_value() -> impl Strategy<Value = Value> {
    json_leaf().prop_recursive(3, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map(any::<String>(), inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

/// Generate an event payload: a JSON object.
pub fn payload() -> impl Strategy<Value = Value> {
    prop::collection::btree_map("[a-zA-Z][a-zA-Z0-9]{0,11}", json_value(), 0..6)
        .prop_map(|m| Value::Object(m.into_iter().collect()))
}

/// Generate an event type name.
pub fn event_type() -> impl Strategy<Value = String> {
    "[A-Z][A-Z_]{0,15}".prop_map(String::from)
}

/// Generate a plausible timestamp (epoch seconds, before 2100).
pub fn timestamp() -> impl Strategy<Value = f64> {
    0.0f64..4_102_444_800.0
}

/// Generate a valid chain of up to `max_events` events after genesis.
pub fn chain(max_events: usize) -> impl Strategy<Value = Vec<Block>> {
    (
        prop::collection::vec((event_type(), payload()), 0..=max_events),
        timestamp(),
    )
        .prop_map(|(events, start)| build_chain(&events, start))
}

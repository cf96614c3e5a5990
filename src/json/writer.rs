use serde_json::{Map, Number, Value};

use crate::writer::Writer;

/// Builds `serde_json::Value` trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonWriter;

impl Writer for JsonWriter {
    type Var = Value;
    type Array = Vec<Value>;
    type Object = Map<String, Value>;

    fn null(&self) -> Value {
        Value::Null
    }

    fn string(&self, value: &str) -> Value {
        Value::String(value.to_string())
    }

    fn boolean(&self, value: bool) -> Value {
        Value::Bool(value)
    }

    fn signed(&self, value: i64) -> Value {
        Value::Number(value.into())
    }

    fn unsigned(&self, value: u64) -> Value {
        Value::Number(value.into())
    }

    // JSON has no NaN or infinity.
    fn float(&self, value: f64) -> Value {
        Number::from_f64(value).map_or(Value::Null, Value::Number)
    }

    fn new_array(&self, capacity: usize) -> Vec<Value> {
        Vec::with_capacity(capacity)
    }

    fn push(&self, array: &mut Vec<Value>, value: Value) {
        array.push(value);
    }

    fn finish_array(&self, array: Vec<Value>) -> Value {
        Value::Array(array)
    }

    fn new_object(&self, capacity: usize) -> Map<String, Value> {
        Map::with_capacity(capacity)
    }

    fn insert(&self, object: &mut Map<String, Value>, name: &str, value: Value) {
        object.insert(name.to_string(), value);
    }

    fn finish_object(&self, object: Map<String, Value>) -> Value {
        Value::Object(object)
    }
}

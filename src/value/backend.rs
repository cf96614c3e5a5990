use std::marker::PhantomData;

use super::{Number, Object, Value};
use crate::error::{ErrorKind, ParseErrors};
use crate::options::ReadOptions;
use crate::parse::{self, Parse};
use crate::reader::Reader;
use crate::write::{self, Write};
use crate::writer::Writer;

/// Reads typed values out of a borrowed [`Value`] tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueReader<'a> {
    options: ReadOptions,
    _document: PhantomData<&'a Value>,
}

impl ValueReader<'_> {
    pub fn new(options: ReadOptions) -> Self {
        Self {
            options,
            _document: PhantomData,
        }
    }
}

impl<'a> Reader for ValueReader<'a> {
    type Var = &'a Value;
    type Array = &'a [Value];
    type Object = &'a Object;

    fn get_field(&self, name: &str, object: &'a Object) -> Result<&'a Value, ErrorKind> {
        object.get(name).ok_or(ErrorKind::MissingField)
    }

    fn is_empty(&self, var: &'a Value) -> bool {
        var.is_null()
    }

    fn read_string(&self, var: &'a Value) -> Result<String, ErrorKind> {
        var.as_str()
            .map(str::to_string)
            .ok_or_else(|| ErrorKind::cast("string"))
    }

    fn read_bool(&self, var: &'a Value) -> Result<bool, ErrorKind> {
        var.as_bool().ok_or_else(|| ErrorKind::cast("boolean"))
    }

    fn read_i64(&self, var: &'a Value) -> Result<i64, ErrorKind> {
        var.as_number()
            .and_then(Number::as_i64)
            .ok_or_else(|| ErrorKind::cast("int"))
    }

    fn read_u64(&self, var: &'a Value) -> Result<u64, ErrorKind> {
        var.as_number()
            .and_then(Number::as_u64)
            .ok_or_else(|| ErrorKind::cast("unsigned int"))
    }

    fn read_f64(&self, var: &'a Value) -> Result<f64, ErrorKind> {
        var.as_number()
            .map(Number::as_f64)
            .ok_or_else(|| ErrorKind::cast("double"))
    }

    fn to_array(&self, var: &'a Value) -> Result<&'a [Value], ErrorKind> {
        var.as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| ErrorKind::cast("array"))
    }

    fn to_object(&self, var: &'a Value) -> Result<&'a Object, ErrorKind> {
        var.as_object().ok_or_else(|| ErrorKind::cast("object"))
    }

    fn to_vec(&self, array: &'a [Value]) -> Vec<&'a Value> {
        array.iter().collect()
    }

    fn to_map(&self, object: &'a Object) -> Vec<(String, &'a Value)> {
        object.iter().map(|(k, v)| (k.clone(), v)).collect()
    }

    fn fill_fields<F>(&self, object: &'a Object, mut index_of: F, slots: &mut [Option<&'a Value>])
    where
        F: FnMut(&str) -> Option<usize>,
    {
        for (name, value) in object {
            if let Some(slot) = index_of(name).and_then(|ix| slots.get_mut(ix)) {
                *slot = Some(value);
            }
        }
    }

    fn options(&self) -> ReadOptions {
        self.options
    }
}

/// Builds [`Value`] trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueWriter;

impl Writer for ValueWriter {
    type Var = Value;
    type Array = Vec<Value>;
    type Object = Object;

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
        Value::Number(Number::from(value))
    }

    fn unsigned(&self, value: u64) -> Value {
        Value::Number(Number::PosInt(value))
    }

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

    fn new_object(&self, capacity: usize) -> Object {
        Object::with_capacity(capacity)
    }

    fn insert(&self, object: &mut Object, name: &str, value: Value) {
        object.insert(name, value);
    }

    fn finish_object(&self, object: Object) -> Value {
        Value::Object(object)
    }
}

pub fn from_value<T: Parse>(value: &Value) -> Result<T, ParseErrors> {
    from_value_with_options(value, &ReadOptions::default())
}

pub fn from_value_with_options<T: Parse>(
    value: &Value,
    options: &ReadOptions,
) -> Result<T, ParseErrors> {
    parse::read(&ValueReader::new(*options), value)
}

pub fn to_value<T: Write + ?Sized>(value: &T) -> Value {
    write::write(&ValueWriter, value)
}

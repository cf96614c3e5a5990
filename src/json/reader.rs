use std::marker::PhantomData;

use serde_json::{Map, Value};

use crate::error::ErrorKind;
use crate::options::ReadOptions;
use crate::reader::Reader;

/// Reads typed values out of a borrowed `serde_json::Value`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReader<'a> {
    options: ReadOptions,
    _document: PhantomData<&'a Value>,
}

impl JsonReader<'_> {
    pub fn new(options: ReadOptions) -> Self {
        Self {
            options,
            _document: PhantomData,
        }
    }
}

impl<'a> Reader for JsonReader<'a> {
    type Var = &'a Value;
    type Array = &'a Vec<Value>;
    type Object = &'a Map<String, Value>;

    fn get_field(&self, name: &str, object: Self::Object) -> Result<&'a Value, ErrorKind> {
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
        var.as_i64().ok_or_else(|| ErrorKind::cast("int"))
    }

    fn read_u64(&self, var: &'a Value) -> Result<u64, ErrorKind> {
        var.as_u64().ok_or_else(|| ErrorKind::cast("unsigned int"))
    }

    fn read_f64(&self, var: &'a Value) -> Result<f64, ErrorKind> {
        var.as_f64().ok_or_else(|| ErrorKind::cast("double"))
    }

    fn to_array(&self, var: &'a Value) -> Result<Self::Array, ErrorKind> {
        var.as_array().ok_or_else(|| ErrorKind::cast("array"))
    }

    fn to_object(&self, var: &'a Value) -> Result<Self::Object, ErrorKind> {
        var.as_object().ok_or_else(|| ErrorKind::cast("object"))
    }

    fn to_vec(&self, array: Self::Array) -> Vec<&'a Value> {
        array.iter().collect()
    }

    fn to_map(&self, object: Self::Object) -> Vec<(String, &'a Value)> {
        object.iter().map(|(k, v)| (k.clone(), v)).collect()
    }

    fn fill_fields<F>(&self, object: Self::Object, mut index_of: F, slots: &mut [Option<&'a Value>])
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

//! JSON text in and out, backed by `serde_json::Value`.
//!
//! Text is first parsed into a `serde_json::Value`, which the typed parse
//! then walks through [`JsonReader`]. Writing builds a `serde_json::Value`
//! with [`JsonWriter`] and renders it. Object keys keep insertion order.

mod reader;
mod writer;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub use reader::JsonReader;
pub use writer::JsonWriter;

use crate::error::ParseErrors;
use crate::options::{ReadOptions, WriteOptions};
use crate::parse::{self, Parse};
use crate::write::{self as write_mod, Write};
use crate::Result;

pub fn read<T: Parse>(input: &str) -> Result<T> {
    read_with_options(input, &ReadOptions::default())
}

pub fn read_with_options<T: Parse>(input: &str, options: &ReadOptions) -> Result<T> {
    let document: serde_json::Value = serde_json::from_str(input)?;
    Ok(from_value_with_options(&document, options)?)
}

pub fn from_value<T: Parse>(value: &serde_json::Value) -> std::result::Result<T, ParseErrors> {
    from_value_with_options(value, &ReadOptions::default())
}

pub fn from_value_with_options<T: Parse>(
    value: &serde_json::Value,
    options: &ReadOptions,
) -> std::result::Result<T, ParseErrors> {
    parse::read(&JsonReader::new(*options), value)
}

pub fn to_value<T: Write + ?Sized>(value: &T) -> serde_json::Value {
    write_mod::write(&JsonWriter, value)
}

pub fn write<T: Write + ?Sized>(value: &T) -> String {
    write_with_options(value, &WriteOptions::default())
}

pub fn write_with_options<T: Write + ?Sized>(value: &T, options: &WriteOptions) -> String {
    let document = to_value(value);
    if options.pretty {
        format!("{document:#}")
    } else {
        document.to_string()
    }
}

/// Parses independent documents, on the rayon pool when the `parallel`
/// feature is enabled. Results keep the order of `inputs`.
pub fn read_many<T: Parse + Send>(inputs: &[&str]) -> Vec<Result<T>> {
    log::debug!("read_many: {} document(s)", inputs.len());

    #[cfg(feature = "parallel")]
    let results: Vec<Result<T>> = inputs.par_iter().map(|input| read::<T>(input)).collect();
    #[cfg(not(feature = "parallel"))]
    let results: Vec<Result<T>> = inputs.iter().map(|input| read::<T>(input)).collect();
    results
}

//! Format-agnostic typed records.
//!
//! A schema is declared once with [`record!`], [`tagged_union!`] and
//! [`literal_set!`]; any backend implementing [`Reader`] and [`Writer`] can
//! then parse and produce it. Parsing reports every problem in the input at
//! once, each qualified by the path to the offending node.
//!
//! ```
//! use fieldwise::{record, Timestamp};
//!
//! fieldwise::timestamp_format!(pub Day = "%Y-%m-%d");
//!
//! record! {
//!     #[derive(Debug)]
//!     pub struct Person {
//!         #[rename = "firstName"]
//!         pub first_name: String,
//!         #[rename = "lastName"]
//!         pub last_name: String,
//!         pub birthday: Timestamp<Day>,
//!     }
//! }
//!
//! let err = fieldwise::json::read::<Person>(
//!     r#"{"firstName":"Homer","lastName":12345,"birthday":"04/19/1987"}"#,
//! )
//! .unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "Found 2 errors:\n\
//!      1) Failed to parse field 'lastName': Could not cast to string.\n\
//!      2) Failed to parse field 'birthday': String '04/19/1987' did not match format '%Y-%m-%d'."
//! );
//! ```

pub mod error;
pub mod json;
pub mod literal;
mod macros;
pub mod options;
pub mod parse;
pub mod reader;
pub mod types;
pub mod value;
pub mod write;
pub mod writer;

pub use crate::error::{Error, ErrorKind, FieldPath, LiteralError, ParseError, ParseErrors, PathSegment};
pub use crate::literal::{Literal, LiteralSet, SingleLiteral};
pub use crate::options::{ReadOptions, WriteOptions};
pub use crate::parse::{read, CustomConstructor, Fields, Parse, Record};
pub use crate::reader::{has_custom_constructor, Reader};
pub use crate::types::{
    AllOf, AlphaNumeric, AlphaNumericPattern, AnyOf, BasicType, Email, EmailPattern,
    ExclusiveMaximum, ExclusiveMinimum, MapKey, Maximum, Minimum, MultiMap, Numeric, Timestamp,
    TimestampFormat, Validate, Validator,
};
pub use crate::value::Value;
pub use crate::write::{write, Write};
pub use crate::writer::Writer;

pub type Result<T> = std::result::Result<T, Error>;

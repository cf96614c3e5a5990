//! `Parse` and `Write` for std types and the field wrappers.

mod basic;
mod containers;
mod literal;
mod multimap;
mod timestamp;
mod validator;

pub use basic::BasicType;
pub use containers::MapKey;
pub use multimap::MultiMap;
pub use timestamp::{Timestamp, TimestampFormat};
#[doc(hidden)]
pub use validator::{compile_pattern, match_pattern, CompiledPattern};
pub use validator::{
    AllOf, AlphaNumeric, AlphaNumericPattern, AnyOf, Email, EmailPattern, ExclusiveMaximum,
    ExclusiveMinimum, Maximum, Minimum, Numeric, Validate, Validator,
};

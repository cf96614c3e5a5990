//! The read-side seam between typed parsing and concrete formats.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::error::{ErrorKind, ParseErrors};
use crate::options::ReadOptions;
use crate::parse::{CustomConstructor, Parse};
use crate::types::BasicType;

/// Capabilities a format backend provides so that any [`Parse`] type can be
/// read from it.
///
/// `Var` is any node, `Array` and `Object` are nodes already known to be of
/// that kind. All three are cheap handles into a document the reader borrows
/// for the duration of one parse; none of the methods mutate shared state.
pub trait Reader: Sized {
    type Var: Copy;
    type Array: Copy;
    type Object: Copy;

    /// Fails with [`ErrorKind::MissingField`] and nothing else.
    fn get_field(&self, name: &str, object: Self::Object) -> Result<Self::Var, ErrorKind>;

    /// True for null or absent nodes.
    fn is_empty(&self, var: Self::Var) -> bool;

    fn read_string(&self, var: Self::Var) -> Result<String, ErrorKind>;

    fn read_bool(&self, var: Self::Var) -> Result<bool, ErrorKind>;

    /// Must fail on floats and booleans instead of converting them.
    fn read_i64(&self, var: Self::Var) -> Result<i64, ErrorKind>;

    /// Must fail on floats, booleans and negative numbers.
    fn read_u64(&self, var: Self::Var) -> Result<u64, ErrorKind>;

    fn read_f64(&self, var: Self::Var) -> Result<f64, ErrorKind>;

    fn to_array(&self, var: Self::Var) -> Result<Self::Array, ErrorKind>;

    fn to_object(&self, var: Self::Var) -> Result<Self::Object, ErrorKind>;

    /// One entry per element, in source order.
    fn to_vec(&self, array: Self::Array) -> Vec<Self::Var>;

    /// One entry per key present, duplicates included.
    fn to_map(&self, object: Self::Object) -> Vec<(String, Self::Var)>;

    /// Visits every key of `object` once. `index_of` maps a key to a slot or
    /// to `None` for keys outside the schema, which are skipped. When a key
    /// occurs twice the later value wins.
    fn fill_fields<F>(&self, object: Self::Object, index_of: F, slots: &mut [Option<Self::Var>])
    where
        F: FnMut(&str) -> Option<usize>;

    fn options(&self) -> ReadOptions {
        ReadOptions::default()
    }

    fn to_basic_type<T: BasicType>(&self, var: Self::Var) -> Result<T, ErrorKind> {
        T::read_basic(self, var)
    }

    fn to_fields_array<const N: usize, F>(
        &self,
        index_of: F,
        object: Self::Object,
    ) -> [Option<Self::Var>; N]
    where
        F: FnMut(&str) -> Option<usize>,
    {
        let mut slots = [None; N];
        self.fill_fields(object, index_of, &mut slots);
        slots
    }

    /// Builds `T` through its own constructor. Errors and panics raised by
    /// the constructor become a single [`ErrorKind::CustomConstructor`].
    fn use_custom_constructor<T: CustomConstructor>(
        &self,
        var: Self::Var,
    ) -> Result<T, ParseErrors> {
        log::trace!("use_custom_constructor: {}", std::any::type_name::<T>());
        let raw = <T::Raw as Parse>::parse(self, var)?;
        match panic::catch_unwind(AssertUnwindSafe(move || T::from_raw(raw))) {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(ErrorKind::CustomConstructor(err.to_string()).into()),
            Err(payload) => Err(ErrorKind::CustomConstructor(panic_message(payload.as_ref())).into()),
        }
    }
}

/// Whether `T` is handed whole to its own constructor instead of being
/// assembled field by field.
pub const fn has_custom_constructor<T: Parse>() -> bool {
    T::HAS_CUSTOM_CONSTRUCTOR
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "custom constructor panicked".to_string()
    }
}

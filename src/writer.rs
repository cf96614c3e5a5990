//! The write-side mirror of [`Reader`](crate::Reader).

/// Builds format-native nodes. Every method is total: values reaching the
/// writer were validated when they were constructed or parsed.
pub trait Writer: Sized {
    type Var;
    type Array;
    type Object;

    fn null(&self) -> Self::Var;

    fn string(&self, value: &str) -> Self::Var;

    fn boolean(&self, value: bool) -> Self::Var;

    fn signed(&self, value: i64) -> Self::Var;

    fn unsigned(&self, value: u64) -> Self::Var;

    fn float(&self, value: f64) -> Self::Var;

    fn new_array(&self, capacity: usize) -> Self::Array;

    fn push(&self, array: &mut Self::Array, value: Self::Var);

    fn finish_array(&self, array: Self::Array) -> Self::Var;

    fn new_object(&self, capacity: usize) -> Self::Object;

    /// Keys are emitted in insertion order.
    fn insert(&self, object: &mut Self::Object, name: &str, value: Self::Var);

    fn finish_object(&self, object: Self::Object) -> Self::Var;
}

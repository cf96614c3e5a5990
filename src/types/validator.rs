//! Values that must pass a check after parsing.

use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;

use regex::Regex;

use crate::error::{ErrorKind, ParseErrors};
use crate::parse::Parse;
use crate::reader::Reader;
use crate::write::Write;
use crate::writer::Writer;

/// A check applied to a parsed `T`. The error string is the user-facing
/// message.
pub trait Validate<T> {
    fn validate(value: &T) -> Result<(), String>;
}

/// A `T` known to satisfy `V`.
pub struct Validator<T, V: Validate<T>> {
    value: T,
    _validator: PhantomData<fn() -> V>,
}

impl<T, V: Validate<T>> Validator<T, V> {
    pub fn new(value: T) -> Result<Self, ErrorKind> {
        V::validate(&value).map_err(ErrorKind::Validation)?;
        Ok(Self {
            value,
            _validator: PhantomData,
        })
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T, V: Validate<T>> Deref for Validator<T, V> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: Clone, V: Validate<T>> Clone for Validator<T, V> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            _validator: PhantomData,
        }
    }
}

impl<T: PartialEq, V: Validate<T>> PartialEq for Validator<T, V> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: fmt::Debug, V: Validate<T>> fmt::Debug for Validator<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Validator").field(&self.value).finish()
    }
}

impl<T: Parse, V: Validate<T>> Parse for Validator<T, V> {
    fn parse<R: Reader>(reader: &R, var: R::Var) -> Result<Self, ParseErrors> {
        let value = T::parse(reader, var)?;
        Self::new(value).map_err(ParseErrors::from)
    }
}

impl<T: Write, V: Validate<T>> Write for Validator<T, V> {
    fn write<W: Writer>(&self, writer: &W) -> W::Var {
        self.value.write(writer)
    }

    fn is_absent(&self) -> bool {
        self.value.is_absent()
    }
}

/// Numbers the bound validators compare against their `i64` bound.
pub trait Numeric: Copy + fmt::Display {
    fn to_f64(self) -> f64;
}

macro_rules! numeric {
    ($($ty:ty),*) => {
        $(
            impl Numeric for $ty {
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

numeric!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

macro_rules! bound_validator {
    ($(#[$meta:meta])* $name:ident, $holds:expr, $relation:literal) => {
        $(#[$meta])*
        pub struct $name<const N: i64>;

        impl<T: Numeric, const N: i64> Validate<T> for $name<N> {
            fn validate(value: &T) -> Result<(), String> {
                let holds: fn(f64, f64) -> bool = $holds;
                if holds(value.to_f64(), N as f64) {
                    Ok(())
                } else {
                    Err(format!(
                        concat!("Value expected to be ", $relation, " {}, but got {}."),
                        N, value
                    ))
                }
            }
        }
    };
}

bound_validator!(
    /// `value >= N`
    Minimum,
    |value, bound| value >= bound,
    "greater than or equal to"
);
bound_validator!(
    /// `value <= N`
    Maximum,
    |value, bound| value <= bound,
    "less than or equal to"
);
bound_validator!(
    /// `value > N`
    ExclusiveMinimum,
    |value, bound| value > bound,
    "greater than"
);
bound_validator!(
    /// `value < N`
    ExclusiveMaximum,
    |value, bound| value < bound,
    "less than"
);

/// Passes when both `A` and `B` pass; reports the first failure.
pub struct AllOf<A, B>(PhantomData<fn() -> (A, B)>);

impl<T, A: Validate<T>, B: Validate<T>> Validate<T> for AllOf<A, B> {
    fn validate(value: &T) -> Result<(), String> {
        A::validate(value)?;
        B::validate(value)
    }
}

/// Passes when either `A` or `B` passes.
pub struct AnyOf<A, B>(PhantomData<fn() -> (A, B)>);

impl<T, A: Validate<T>, B: Validate<T>> Validate<T> for AnyOf<A, B> {
    fn validate(value: &T) -> Result<(), String> {
        match A::validate(value) {
            Ok(()) => Ok(()),
            Err(first) => B::validate(value)
                .map_err(|second| format!("None of the validators passed: {first} {second}")),
        }
    }
}

/// Compiled form of a [`pattern_validator!`](crate::pattern_validator)
/// pattern, or the reason it does not compile.
#[doc(hidden)]
pub type CompiledPattern = Result<Regex, String>;

#[doc(hidden)]
pub fn compile_pattern(pattern: &str) -> CompiledPattern {
    Regex::new(pattern).map_err(|err| err.to_string())
}

#[doc(hidden)]
pub fn match_pattern(
    value: &str,
    label: &str,
    pattern: &str,
    compiled: &CompiledPattern,
) -> Result<(), String> {
    let regex = compiled
        .as_ref()
        .map_err(|err| format!("Pattern '{label}' is not a valid regular expression: {err}"))?;
    if regex.is_match(value) {
        Ok(())
    } else {
        Err(format!(
            "String '{value}' did not match format '{label}': '{pattern}'."
        ))
    }
}

/// Declares a validator for strings that must match a regular expression.
/// The label names the pattern in error messages. The expression is
/// compiled once, on first use.
///
/// ```
/// fieldwise::pattern_validator!(pub Digits("Digits") = r"^[0-9]+$");
///
/// type Pin = fieldwise::Validator<String, Digits>;
/// assert!(Pin::new("0451".to_string()).is_ok());
/// let err = Pin::new("04a1".to_string()).unwrap_err();
/// assert_eq!(err.to_string(), "String '04a1' did not match format 'Digits': '^[0-9]+$'.");
/// ```
#[macro_export]
macro_rules! pattern_validator {
    ($(#[$meta:meta])* $vis:vis $name:ident($label:literal) = $pattern:literal) => {
        $(#[$meta])*
        $vis struct $name;

        impl $crate::Validate<::std::string::String> for $name {
            fn validate(
                value: &::std::string::String,
            ) -> ::core::result::Result<(), ::std::string::String> {
                static COMPILED: ::std::sync::OnceLock<$crate::types::CompiledPattern> =
                    ::std::sync::OnceLock::new();
                let compiled = COMPILED.get_or_init(|| $crate::types::compile_pattern($pattern));
                $crate::types::match_pattern(value, $label, $pattern, compiled)
            }
        }
    };
}

crate::pattern_validator!(
    /// Something shaped like an e-mail address.
    pub EmailPattern("Email") = r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$"
);
crate::pattern_validator!(
    pub AlphaNumericPattern("AlphaNumeric") = r"^[a-zA-Z0-9]+$"
);

pub type Email = Validator<String, EmailPattern>;
pub type AlphaNumeric = Validator<String, AlphaNumericPattern>;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, true)]
    #[case(7, true)]
    #[case(-1, false)]
    fn test_minimum(#[case] value: i32, #[case] ok: bool) {
        assert_eq!(Validator::<i32, Minimum<0>>::new(value).is_ok(), ok);
    }

    #[rstest]
    fn test_messages() {
        let err = Validator::<i64, Minimum<0>>::new(-1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Value expected to be greater than or equal to 0, but got -1."
        );
        let err = Validator::<f64, ExclusiveMaximum<10>>::new(10.0).unwrap_err();
        assert_eq!(err.to_string(), "Value expected to be less than 10, but got 10.");
    }

    #[rstest]
    #[case(5, true)]
    #[case(0, false)]
    #[case(10, false)]
    fn test_all_of_is_an_open_interval(#[case] value: u8, #[case] ok: bool) {
        type Open = AllOf<ExclusiveMinimum<0>, ExclusiveMaximum<10>>;
        assert_eq!(Validator::<u8, Open>::new(value).is_ok(), ok);
    }

    #[rstest]
    #[case(-5, true)]
    #[case(50, true)]
    #[case(5, false)]
    fn test_any_of_is_outside_a_range(#[case] value: i64, #[case] ok: bool) {
        type Outside = AnyOf<Maximum<0>, Minimum<10>>;
        assert_eq!(Validator::<i64, Outside>::new(value).is_ok(), ok);
    }

    #[rstest]
    fn test_deref_reaches_inner_value() {
        let checked = Validator::<u32, Maximum<100>>::new(42).unwrap();
        assert_eq!(*checked + 1, 43);
        assert_eq!(checked.into_inner(), 42);
    }

    #[rstest]
    #[case("homer@simpson.com", true)]
    #[case("bart.simpson+skate@springfield.edu", true)]
    #[case("homer@", false)]
    #[case("not an email", false)]
    fn test_email(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(Email::new(input.to_string()).is_ok(), ok);
    }

    #[rstest]
    fn test_pattern_message_names_the_pattern() {
        let err = AlphaNumeric::new("a-b".to_string()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "String 'a-b' did not match format 'AlphaNumeric': '^[a-zA-Z0-9]+$'."
        );
    }

    crate::pattern_validator!(SimpsonDomain("SimpsonDomain") = r"@simpson\.com$");
    crate::pattern_validator!(Broken("Broken") = r"([a-z]");

    #[rstest]
    #[case("lisa@simpson.com", true)]
    #[case("lisa@springfield.edu", false)]
    #[case("lisa simpson.com", false)]
    fn test_patterns_combine_with_all_of(#[case] input: &str, #[case] ok: bool) {
        type FamilyEmail = Validator<String, AllOf<EmailPattern, SimpsonDomain>>;
        assert_eq!(FamilyEmail::new(input.to_string()).is_ok(), ok);
    }

    #[rstest]
    #[case("maggie@simpson.com", true)]
    #[case("maggie", true)]
    #[case("maggie!", false)]
    fn test_patterns_combine_with_any_of(#[case] input: &str, #[case] ok: bool) {
        type Handle = Validator<String, AnyOf<EmailPattern, AlphaNumericPattern>>;
        assert_eq!(Handle::new(input.to_string()).is_ok(), ok);
    }

    #[rstest]
    fn test_invalid_pattern_fails_validation() {
        let err = Validator::<String, Broken>::new("abc".to_string()).unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Pattern 'Broken' is not a valid regular expression:"));
    }
}

//! Date/time fields carried as formatted strings.

use std::fmt::{self, Write as _};
use std::marker::PhantomData;
use std::str::FromStr;

use chrono::format::{self, Parsed, StrftimeItems};
use chrono::{NaiveDateTime, NaiveTime};

use crate::error::{ErrorKind, ParseErrors};
use crate::parse::Parse;
use crate::reader::Reader;
use crate::write::Write;
use crate::writer::Writer;

/// A strftime-style pattern, usually declared with
/// [`timestamp_format!`](crate::timestamp_format).
pub trait TimestampFormat: 'static {
    const FORMAT: &'static str;
}

/// Declares a [`TimestampFormat`].
///
/// ```
/// fieldwise::timestamp_format!(pub IsoDate = "%Y-%m-%d");
/// let day: fieldwise::Timestamp<IsoDate> = "1987-04-19".parse().unwrap();
/// assert_eq!(day.str(), "1987-04-19");
/// ```
#[macro_export]
macro_rules! timestamp_format {
    ($(#[$meta:meta])* $vis:vis $name:ident = $format:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $vis enum $name {}

        impl $crate::TimestampFormat for $name {
            const FORMAT: &'static str = $format;
        }
    };
}

/// A point in time read from and written as a string in `F::FORMAT`.
/// Formats without a time of day resolve to midnight.
///
/// The value is naive, so formats that render an offset or a time zone
/// (`%z`, `%Z`, `%:z`, ...) are rejected when a timestamp is built.
pub struct Timestamp<F: TimestampFormat> {
    value: NaiveDateTime,
    _format: PhantomData<fn() -> F>,
}

impl<F: TimestampFormat> Timestamp<F> {
    pub fn new(value: NaiveDateTime) -> Result<Self, ErrorKind> {
        if render::<F>(&value).is_none() {
            return Err(ErrorKind::Unrenderable { format: F::FORMAT });
        }
        Ok(Self {
            value,
            _format: PhantomData,
        })
    }

    pub fn from_string(input: &str) -> Result<Self, ErrorKind> {
        let mismatch = || ErrorKind::Format {
            value: input.to_string(),
            format: F::FORMAT,
        };
        let mut parsed = Parsed::new();
        format::parse(&mut parsed, input, StrftimeItems::new(F::FORMAT)).map_err(|_| mismatch())?;
        let date = parsed.to_naive_date().map_err(|_| mismatch())?;
        let time = parsed.to_naive_time().unwrap_or(NaiveTime::MIN);
        Self::new(date.and_time(time))
    }

    pub fn value(&self) -> NaiveDateTime {
        self.value
    }

    /// The value rendered in `F::FORMAT`.
    pub fn str(&self) -> String {
        // Construction already rendered this value once.
        render::<F>(&self.value).unwrap_or_default()
    }
}

fn render<F: TimestampFormat>(value: &NaiveDateTime) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", value.format(F::FORMAT)).ok()?;
    Some(out)
}

impl<F: TimestampFormat> Clone for Timestamp<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: TimestampFormat> Copy for Timestamp<F> {}

impl<F: TimestampFormat> PartialEq for Timestamp<F> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<F: TimestampFormat> Eq for Timestamp<F> {}

impl<F: TimestampFormat> fmt::Debug for Timestamp<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Timestamp").field(&self.str()).finish()
    }
}

impl<F: TimestampFormat> fmt::Display for Timestamp<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.str())
    }
}

impl<F: TimestampFormat> FromStr for Timestamp<F> {
    type Err = ErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl<F: TimestampFormat> Parse for Timestamp<F> {
    fn parse<R: Reader>(reader: &R, var: R::Var) -> Result<Self, ParseErrors> {
        let input = reader.read_string(var)?;
        Self::from_string(&input).map_err(ParseErrors::from)
    }
}

impl<F: TimestampFormat> Write for Timestamp<F> {
    fn write<W: Writer>(&self, writer: &W) -> W::Var {
        writer.string(&self.str())
    }
}

use crate::error::{ErrorKind, ParseErrors};
use crate::parse::Parse;
use crate::reader::Reader;
use crate::write::Write;
use crate::writer::Writer;

/// Scalars every backend can read and write directly.
pub trait BasicType: Sized {
    fn read_basic<R: Reader>(reader: &R, var: R::Var) -> Result<Self, ErrorKind>;

    fn write_basic<W: Writer>(&self, writer: &W) -> W::Var;
}

impl BasicType for String {
    fn read_basic<R: Reader>(reader: &R, var: R::Var) -> Result<Self, ErrorKind> {
        reader.read_string(var)
    }

    fn write_basic<W: Writer>(&self, writer: &W) -> W::Var {
        writer.string(self)
    }
}

impl BasicType for bool {
    fn read_basic<R: Reader>(reader: &R, var: R::Var) -> Result<Self, ErrorKind> {
        reader.read_bool(var)
    }

    fn write_basic<W: Writer>(&self, writer: &W) -> W::Var {
        writer.boolean(*self)
    }
}

impl BasicType for i64 {
    fn read_basic<R: Reader>(reader: &R, var: R::Var) -> Result<Self, ErrorKind> {
        reader.read_i64(var)
    }

    fn write_basic<W: Writer>(&self, writer: &W) -> W::Var {
        writer.signed(*self)
    }
}

impl BasicType for u64 {
    fn read_basic<R: Reader>(reader: &R, var: R::Var) -> Result<Self, ErrorKind> {
        reader.read_u64(var)
    }

    fn write_basic<W: Writer>(&self, writer: &W) -> W::Var {
        writer.unsigned(*self)
    }
}

impl BasicType for f64 {
    fn read_basic<R: Reader>(reader: &R, var: R::Var) -> Result<Self, ErrorKind> {
        reader.read_f64(var)
    }

    fn write_basic<W: Writer>(&self, writer: &W) -> W::Var {
        writer.float(*self)
    }
}

impl BasicType for f32 {
    fn read_basic<R: Reader>(reader: &R, var: R::Var) -> Result<Self, ErrorKind> {
        let value = reader.read_f64(var)?;
        let narrowed = value as f32;
        if value.is_finite() && !narrowed.is_finite() {
            return Err(ErrorKind::OutOfRange {
                value: ryu::Buffer::new().format_finite(value).to_string(),
                target: "f32",
            });
        }
        Ok(narrowed)
    }

    fn write_basic<W: Writer>(&self, writer: &W) -> W::Var {
        writer.float(f64::from(*self))
    }
}

macro_rules! narrow_integer {
    ($($ty:ty => $wide:ty, $read:ident, $write:ident;)*) => {
        $(
            impl BasicType for $ty {
                fn read_basic<R: Reader>(reader: &R, var: R::Var) -> Result<Self, ErrorKind> {
                    let value = reader.$read(var)?;
                    <$ty>::try_from(value).map_err(|_| ErrorKind::OutOfRange {
                        value: value.to_string(),
                        target: stringify!($ty),
                    })
                }

                fn write_basic<W: Writer>(&self, writer: &W) -> W::Var {
                    writer.$write(*self as $wide)
                }
            }
        )*
    };
}

narrow_integer! {
    i8 => i64, read_i64, signed;
    i16 => i64, read_i64, signed;
    i32 => i64, read_i64, signed;
    isize => i64, read_i64, signed;
    u8 => u64, read_u64, unsigned;
    u16 => u64, read_u64, unsigned;
    u32 => u64, read_u64, unsigned;
    usize => u64, read_u64, unsigned;
}

macro_rules! basic_parse_write {
    ($($ty:ty),*) => {
        $(
            impl Parse for $ty {
                fn parse<R: Reader>(reader: &R, var: R::Var) -> Result<Self, ParseErrors> {
                    reader.to_basic_type::<Self>(var).map_err(ParseErrors::from)
                }
            }

            impl Write for $ty {
                fn write<W: Writer>(&self, writer: &W) -> W::Var {
                    self.write_basic(writer)
                }
            }
        )*
    };
}

basic_parse_write!(String, bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl Write for str {
    fn write<W: Writer>(&self, writer: &W) -> W::Var {
        writer.string(self)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::value::{self, Number, Value};

    #[rstest]
    fn test_f32_rejects_values_beyond_its_range() {
        let huge = Value::Number(Number::Float(1e300));
        let err = value::from_value::<f32>(&huge).unwrap_err();
        assert_eq!(err.to_string(), "Value 1e300 does not fit into f32.");
    }

    #[rstest]
    #[case(0.5, 0.5)]
    #[case(-3.0, -3.0)]
    #[case(f64::from(f32::MAX), f32::MAX)]
    fn test_f32_keeps_representable_values(#[case] input: f64, #[case] expected: f32) {
        let var = Value::Number(Number::Float(input));
        assert_eq!(value::from_value::<f32>(&var).unwrap(), expected);
    }

    #[rstest]
    fn test_narrow_integers_report_target() {
        let var = Value::Number(Number::NegInt(-1));
        let err = value::from_value::<u32>(&var).unwrap_err();
        assert_eq!(err.to_string(), "Could not cast to unsigned int.");
    }
}

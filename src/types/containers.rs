use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::{BuildHasher, Hash};

use smol_str::SmolStr;

use crate::error::{ErrorKind, ParseErrors, PathSegment};
use crate::parse::Parse;
use crate::reader::Reader;
use crate::write::Write;
use crate::writer::Writer;

impl<T: Parse> Parse for Option<T> {
    fn parse<R: Reader>(reader: &R, var: R::Var) -> Result<Self, ParseErrors> {
        if reader.is_empty(var) {
            return Ok(None);
        }
        T::parse(reader, var).map(Some)
    }

    fn from_missing() -> Option<Self> {
        Some(None)
    }
}

impl<T: Write> Write for Option<T> {
    fn write<W: Writer>(&self, writer: &W) -> W::Var {
        match self {
            Some(value) => value.write(writer),
            None => writer.null(),
        }
    }

    fn is_absent(&self) -> bool {
        self.is_none()
    }
}

// The owning indirection that breaks recursive record definitions.
impl<T: Parse> Parse for Box<T> {
    const HAS_CUSTOM_CONSTRUCTOR: bool = T::HAS_CUSTOM_CONSTRUCTOR;

    fn parse<R: Reader>(reader: &R, var: R::Var) -> Result<Self, ParseErrors> {
        T::parse(reader, var).map(Box::new)
    }

    fn from_missing() -> Option<Self> {
        T::from_missing().map(Box::new)
    }
}

impl<T: Write + ?Sized> Write for Box<T> {
    fn write<W: Writer>(&self, writer: &W) -> W::Var {
        (**self).write(writer)
    }

    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

fn parse_elements<T: Parse, R: Reader>(reader: &R, var: R::Var) -> Result<Vec<T>, ParseErrors> {
    let array = reader.to_array(var)?;
    let vars = reader.to_vec(array);
    let mut items = Vec::with_capacity(vars.len());
    let mut errors = ParseErrors::new();
    for (index, item) in vars.into_iter().enumerate() {
        match T::parse(reader, item) {
            Ok(value) => items.push(value),
            Err(err) => errors.append(err.prefixed(PathSegment::Index(index))),
        }
    }
    if errors.is_empty() {
        Ok(items)
    } else {
        Err(errors)
    }
}

fn write_elements<'a, T, W, I>(writer: &W, len: usize, items: I) -> W::Var
where
    T: Write + 'a,
    W: Writer,
    I: IntoIterator<Item = &'a T>,
{
    let mut array = writer.new_array(len);
    for item in items {
        let var = item.write(writer);
        writer.push(&mut array, var);
    }
    writer.finish_array(array)
}

impl<T: Parse> Parse for Vec<T> {
    fn parse<R: Reader>(reader: &R, var: R::Var) -> Result<Self, ParseErrors> {
        parse_elements(reader, var)
    }
}

impl<T: Write> Write for Vec<T> {
    fn write<W: Writer>(&self, writer: &W) -> W::Var {
        write_elements(writer, self.len(), self)
    }
}

impl<T: Parse> Parse for VecDeque<T> {
    fn parse<R: Reader>(reader: &R, var: R::Var) -> Result<Self, ParseErrors> {
        parse_elements(reader, var).map(VecDeque::from)
    }
}

impl<T: Write> Write for VecDeque<T> {
    fn write<W: Writer>(&self, writer: &W) -> W::Var {
        write_elements(writer, self.len(), self)
    }
}

/// Types that can key an object. Keys always travel as strings, so a map
/// keyed by integers reads `{"1": ..}` and writes it back the same way.
pub trait MapKey: Sized {
    fn to_key(&self) -> String;

    fn from_key(key: &str) -> Result<Self, ErrorKind>;
}

impl MapKey for String {
    fn to_key(&self) -> String {
        self.clone()
    }

    fn from_key(key: &str) -> Result<Self, ErrorKind> {
        Ok(key.to_string())
    }
}

macro_rules! integer_key {
    ($($ty:ty => $expected:literal),*) => {
        $(
            impl MapKey for $ty {
                fn to_key(&self) -> String {
                    itoa::Buffer::new().format(*self).to_string()
                }

                fn from_key(key: &str) -> Result<Self, ErrorKind> {
                    key.parse().map_err(|_| ErrorKind::cast($expected))
                }
            }
        )*
    };
}

integer_key!(
    i8 => "int", i16 => "int", i32 => "int", i64 => "int", isize => "int",
    u8 => "unsigned int", u16 => "unsigned int", u32 => "unsigned int",
    u64 => "unsigned int", usize => "unsigned int"
);

/// Entries in input order. Collecting into a map keeps the last duplicate.
pub(super) fn parse_entries<K: MapKey, T: Parse, R: Reader>(
    reader: &R,
    var: R::Var,
) -> Result<Vec<(K, T)>, ParseErrors> {
    let object = reader.to_object(var)?;
    let entries = reader.to_map(object);
    let mut parsed = Vec::with_capacity(entries.len());
    let mut errors = ParseErrors::new();
    for (key, item) in entries {
        match (K::from_key(&key), T::parse(reader, item)) {
            (Ok(k), Ok(value)) => parsed.push((k, value)),
            (k, value) => {
                let segment = PathSegment::Key(SmolStr::new(&key));
                if let Err(kind) = k {
                    errors.append(ParseErrors::from(kind).prefixed(segment.clone()));
                }
                if let Err(err) = value {
                    errors.append(err.prefixed(segment));
                }
            }
        }
    }
    if errors.is_empty() {
        Ok(parsed)
    } else {
        Err(errors)
    }
}

pub(super) fn write_entries<'a, K, T, W, I>(writer: &W, len: usize, entries: I) -> W::Var
where
    K: MapKey + 'a,
    T: Write + 'a,
    W: Writer,
    I: IntoIterator<Item = (&'a K, &'a T)>,
{
    let mut object = writer.new_object(len);
    for (key, value) in entries {
        let var = value.write(writer);
        writer.insert(&mut object, &key.to_key(), var);
    }
    writer.finish_object(object)
}

impl<K: MapKey + Ord, T: Parse> Parse for BTreeMap<K, T> {
    fn parse<R: Reader>(reader: &R, var: R::Var) -> Result<Self, ParseErrors> {
        parse_entries(reader, var).map(|entries| entries.into_iter().collect())
    }
}

impl<K: MapKey, T: Write> Write for BTreeMap<K, T> {
    fn write<W: Writer>(&self, writer: &W) -> W::Var {
        write_entries(writer, self.len(), self)
    }
}

impl<K, T, S> Parse for HashMap<K, T, S>
where
    K: MapKey + Eq + Hash,
    T: Parse,
    S: BuildHasher + Default,
{
    fn parse<R: Reader>(reader: &R, var: R::Var) -> Result<Self, ParseErrors> {
        parse_entries(reader, var).map(|entries| entries.into_iter().collect())
    }
}

impl<K: MapKey, T: Write, S: BuildHasher> Write for HashMap<K, T, S> {
    fn write<W: Writer>(&self, writer: &W) -> W::Var {
        write_entries(writer, self.len(), self)
    }
}

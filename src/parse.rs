//! Typed parsing driven through the [`Reader`] contract.
//!
//! Records are parsed in one pass over the keys of the input object: each
//! key is resolved once to a slot by [`Record::field_index`], then every slot
//! is parsed as its declared type. Failures are collected rather than
//! short-circuited, so one attempt reports every problem in the input.

use smallvec::{smallvec, SmallVec};
use smol_str::SmolStr;

use crate::error::{ErrorKind, ParseError, ParseErrors, PathSegment};
use crate::literal::{Literal, LiteralSet};
use crate::reader::Reader;
use crate::write::Write;
use crate::writer::Writer;

/// Slots kept inline for records up to this many fields.
const INLINE_FIELDS: usize = 16;

/// A type that can be read from any [`Reader`].
pub trait Parse: Sized {
    /// Set by [`custom_constructor!`](crate::custom_constructor).
    const HAS_CUSTOM_CONSTRUCTOR: bool = false;

    fn parse<R: Reader>(reader: &R, var: R::Var) -> Result<Self, ParseErrors>;

    /// Value used when the field holding this type is absent from the input.
    /// `None` means the field is required.
    fn from_missing() -> Option<Self> {
        None
    }
}

/// A fixed list of named fields, parsed from and written to one object.
///
/// Usually implemented by [`record!`](crate::record). A flattened record
/// occupies `FIELD_COUNT` consecutive slots of its parent, and the parent's
/// `field_index` consults the flattened record's for those slots.
pub trait Record: Sized {
    const FIELD_COUNT: usize;

    fn field_index(name: &str) -> Option<usize>;

    /// Consumes the slots in declaration order. Returns `None` when any field
    /// failed; the failures are recorded in `fields`.
    fn from_fields<R: Reader>(fields: &mut Fields<'_, R>) -> Option<Self>;

    fn write_fields<W: Writer>(&self, writer: &W, object: &mut W::Object);
}

/// A type built from an intermediate representation by user code, which
/// may reject it.
pub trait CustomConstructor: Sized {
    type Raw: Parse + Write;

    fn from_raw(raw: Self::Raw) -> Result<Self, Box<dyn std::error::Error + Send + Sync>>;

    fn to_raw(&self) -> Self::Raw;
}

/// Positional cursor over the resolved slots of one record.
pub struct Fields<'a, R: Reader> {
    reader: &'a R,
    slots: &'a [Option<R::Var>],
    next: usize,
    errors: ParseErrors,
}

impl<'a, R: Reader> Fields<'a, R> {
    pub fn new(reader: &'a R, slots: &'a [Option<R::Var>]) -> Self {
        Self {
            reader,
            slots,
            next: 0,
            errors: ParseErrors::new(),
        }
    }

    /// A field without a declared default.
    pub fn field<T: Parse>(&mut self, name: &str) -> Option<T> {
        match self.take_slot() {
            Some(var) => self.parse_present(name, var),
            None => match T::from_missing() {
                Some(value) => Some(value),
                None => {
                    self.errors.push(ParseError::missing_field(name));
                    None
                }
            },
        }
    }

    /// A field that falls back to `default` when absent.
    pub fn field_or_else<T: Parse, F: FnOnce() -> T>(
        &mut self,
        name: &str,
        default: F,
    ) -> Option<T> {
        match self.take_slot() {
            Some(var) => self.parse_present(name, var),
            None => Some(default()),
        }
    }

    /// A record whose fields are spliced into this one.
    pub fn flatten<T: Record>(&mut self) -> Option<T> {
        let start = self.next.min(self.slots.len());
        let end = (start + T::FIELD_COUNT).min(self.slots.len());
        self.next += T::FIELD_COUNT;
        let mut inner = Fields::new(self.reader, &self.slots[start..end]);
        let value = T::from_fields(&mut inner);
        self.errors.append(inner.into_errors());
        value
    }

    pub fn reader(&self) -> &'a R {
        self.reader
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn into_errors(self) -> ParseErrors {
        self.errors
    }

    fn take_slot(&mut self) -> Option<R::Var> {
        let slot = self.slots.get(self.next).copied().flatten();
        self.next += 1;
        slot
    }

    fn parse_present<T: Parse>(&mut self, name: &str, var: R::Var) -> Option<T> {
        match T::parse(self.reader, var) {
            Ok(value) => Some(value),
            Err(errors) => {
                self.errors
                    .append(errors.prefixed(PathSegment::Field(SmolStr::new(name))));
                None
            }
        }
    }
}

/// Parses `T` from `var`. The entry point for every backend.
pub fn read<T: Parse, R: Reader>(reader: &R, var: R::Var) -> Result<T, ParseErrors> {
    T::parse(reader, var).inspect_err(|errors| {
        log::debug!(
            "failed to parse {}: {} error(s)",
            std::any::type_name::<T>(),
            errors.len()
        );
    })
}

/// The field-by-field algorithm behind every [`Record`]'s [`Parse`] impl.
pub fn parse_record<T: Record, R: Reader>(reader: &R, var: R::Var) -> Result<T, ParseErrors> {
    parse_record_inner(reader, var, None)
}

/// Parses one arm of a tagged union. The discriminator key belongs to the
/// union, so it never counts as an unknown field of the arm.
pub fn parse_variant<T: Record, R: Reader>(
    reader: &R,
    var: R::Var,
    tag_field: &str,
) -> Result<T, ParseErrors> {
    parse_record_inner(reader, var, Some(tag_field))
}

fn parse_record_inner<T: Record, R: Reader>(
    reader: &R,
    var: R::Var,
    tag_field: Option<&str>,
) -> Result<T, ParseErrors> {
    log::trace!("parse_record: {}", std::any::type_name::<T>());
    let object = reader.to_object(var)?;

    let deny_unknown = reader.options().deny_unknown_fields;
    let mut unknown: Vec<String> = Vec::new();
    let mut slots: SmallVec<[Option<R::Var>; INLINE_FIELDS]> = smallvec![None; T::FIELD_COUNT];
    reader.fill_fields(
        object,
        |name| {
            let index = T::field_index(name);
            if index.is_none() && deny_unknown && tag_field != Some(name) {
                unknown.push(name.to_string());
            }
            index
        },
        &mut slots,
    );

    let mut fields = Fields::new(reader, &slots);
    let value = T::from_fields(&mut fields);
    let mut errors = fields.into_errors();
    for name in &unknown {
        errors.push(ParseError::unknown_field(name));
    }

    if !errors.is_empty() {
        return Err(errors);
    }
    value.ok_or_else(|| {
        ErrorKind::custom(format!(
            "Could not assemble {}.",
            std::any::type_name::<T>()
        ))
        .into()
    })
}

/// Resolves the discriminator of a tagged union through its literal set.
pub fn read_discriminator<S: LiteralSet, R: Reader>(
    reader: &R,
    var: R::Var,
    tag_field: &str,
) -> Result<Literal<S>, ParseErrors> {
    let object = reader.to_object(var)?;
    let tag = reader
        .get_field(tag_field, object)
        .map_err(|_| ParseErrors::from(ParseError::missing_field(tag_field)))?;
    let name = reader
        .read_string(tag)
        .map_err(|kind| ParseErrors::from(kind).prefixed(tag_segment(tag_field)))?;
    log::trace!("read_discriminator: {tag_field}={name}");
    Literal::<S>::from_string(&name).map_err(|_| unmatched_tag::<S>(&name, tag_field))
}

pub fn unmatched_tag<S: LiteralSet>(value: &str, tag_field: &str) -> ParseErrors {
    ParseErrors::from(ErrorKind::UnknownTag {
        value: value.to_string(),
        allowed: Literal::<S>::allowed_strings(),
    })
    .prefixed(tag_segment(tag_field))
}

fn tag_segment(tag_field: &str) -> PathSegment {
    PathSegment::Field(SmolStr::new(tag_field))
}

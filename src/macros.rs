//! Schema declarations.
//!
//! `record!` declares a struct together with its [`Record`](crate::Record),
//! [`Parse`](crate::Parse) and [`Write`](crate::Write) impls. Fields accept
//! doc comments, one of `#[rename = "wireName"]` or `#[flatten]`, and an
//! optional `= default` expression used when the key is absent.
//!
//! ```
//! use fieldwise::record;
//!
//! record! {
//!     #[derive(Debug, PartialEq)]
//!     pub struct Employee {
//!         /// Given and family name.
//!         #[rename = "fullName"]
//!         pub name: String,
//!         pub salary: f64 = 0.0,
//!         pub manager: Option<String>,
//!     }
//! }
//!
//! let homer: Employee = fieldwise::json::read(r#"{"fullName":"Homer"}"#).unwrap();
//! assert_eq!(homer.salary, 0.0);
//! assert_eq!(homer.manager, None);
//! assert_eq!(fieldwise::json::write(&homer), r#"{"fullName":"Homer","salary":0.0}"#);
//! ```

#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$kind:ident $(= $value:literal)?])*
                $field_vis:vis $field:ident : $ty:ty $(= $default:expr)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[doc = $crate::__record_field!(@doc $kind $(= $value)?)])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::Record for $name {
            const FIELD_COUNT: usize =
                0 $( + $crate::__record_field!(@width [$($kind $(= $value)?);*] $ty) )*;

            fn field_index(name: &str) -> ::core::option::Option<usize> {
                #[allow(unused_mut)]
                let mut offset = 0usize;
                $(
                    if let ::core::option::Option::Some(index) = $crate::__record_field!(
                        @index [$($kind $(= $value)?);*] $field $ty, name
                    ) {
                        return ::core::option::Option::Some(offset + index);
                    }
                    offset += $crate::__record_field!(@width [$($kind $(= $value)?);*] $ty);
                )*
                let _ = offset;
                ::core::option::Option::None
            }

            #[allow(unused_variables)]
            fn from_fields<R: $crate::Reader>(
                fields: &mut $crate::Fields<'_, R>,
            ) -> ::core::option::Option<Self> {
                $(
                    let $field = $crate::__record_field!(
                        @parse [$($kind $(= $value)?);*] [$($default)?] $field $ty, fields
                    );
                )*
                ::core::option::Option::Some(Self {
                    $( $field: $field?, )*
                })
            }

            #[allow(unused_variables)]
            fn write_fields<W: $crate::Writer>(&self, writer: &W, object: &mut W::Object) {
                $(
                    $crate::__record_field!(
                        @write [$($kind $(= $value)?);*] $field, &self.$field, writer, object
                    );
                )*
            }
        }

        impl $crate::Parse for $name {
            fn parse<R: $crate::Reader>(
                reader: &R,
                var: R::Var,
            ) -> ::core::result::Result<Self, $crate::ParseErrors> {
                $crate::parse::parse_record::<Self, R>(reader, var)
            }
        }

        impl $crate::Write for $name {
            fn write<W: $crate::Writer>(&self, writer: &W) -> W::Var {
                $crate::write::write_record(writer, self)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_field {
    (@doc doc = $doc:literal) => {
        $doc
    };
    (@doc $($attr:tt)*) => {
        ""
    };

    // Doc comments carry no wire meaning.
    (@$op:ident [doc = $doc:literal $(; $($rest:tt)*)?] $($tail:tt)*) => {
        $crate::__record_field!(@$op [$($($rest)*)?] $($tail)*)
    };
    (@$op:ident [$kind:ident $(= $value:literal)?; doc = $doc:literal $(; $($rest:tt)*)?] $($tail:tt)*) => {
        $crate::__record_field!(@$op [$kind $(= $value)? $(; $($rest)*)?] $($tail)*)
    };

    (@width [flatten] $ty:ty) => {
        <$ty as $crate::Record>::FIELD_COUNT
    };
    (@width [$($attr:tt)*] $ty:ty) => {
        1
    };

    (@name [rename = $rename:literal] $field:ident) => {
        $rename
    };
    (@name [] $field:ident) => {
        ::core::stringify!($field)
    };

    (@index [flatten] $field:ident $ty:ty, $name:ident) => {
        <$ty as $crate::Record>::field_index($name)
    };
    (@index [$($attr:tt)*] $field:ident $ty:ty, $name:ident) => {
        if $name == $crate::__record_field!(@name [$($attr)*] $field) {
            ::core::option::Option::Some(0usize)
        } else {
            ::core::option::Option::None
        }
    };

    (@parse [flatten] [] $field:ident $ty:ty, $fields:ident) => {
        $fields.flatten::<$ty>()
    };
    (@parse [$($attr:tt)*] [] $field:ident $ty:ty, $fields:ident) => {
        $fields.field::<$ty>($crate::__record_field!(@name [$($attr)*] $field))
    };
    (@parse [$($attr:tt)*] [$default:expr] $field:ident $ty:ty, $fields:ident) => {
        $fields.field_or_else::<$ty, _>(
            $crate::__record_field!(@name [$($attr)*] $field),
            || $default,
        )
    };

    (@write [flatten] $field:ident, $value:expr, $writer:ident, $object:ident) => {
        $crate::Record::write_fields($value, $writer, &mut *$object)
    };
    (@write [$($attr:tt)*] $field:ident, $value:expr, $writer:ident, $object:ident) => {
        $crate::write::write_field(
            $writer,
            &mut *$object,
            $crate::__record_field!(@name [$($attr)*] $field),
            $value,
        )
    };
}

/// Declares an enum whose variants are records told apart by a string
/// discriminator stored in the same object.
///
/// The discriminator values form a [`LiteralSet`](crate::LiteralSet) named by
/// the second header argument. Each value defaults to the variant name.
///
/// ```
/// use fieldwise::{record, tagged_union};
///
/// record! { pub struct Circle { pub radius: f64 } }
/// record! { pub struct Square { pub side: f64 } }
///
/// tagged_union! {
///     pub enum Shape("kind", ShapeKind) {
///         Circle(Circle) = "circle",
///         Square(Square) = "square",
///     }
/// }
///
/// let shape: Shape = fieldwise::json::read(r#"{"kind":"square","side":2.0}"#).unwrap();
/// assert_eq!(shape.tag().name(), "square");
/// assert_eq!(fieldwise::json::write(&shape), r#"{"kind":"square","side":2.0}"#);
/// ```
#[macro_export]
macro_rules! tagged_union {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($tag_field:literal, $tags:ident) {
            $( $variant:ident ( $inner:ty ) $(= $tag:literal)? ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $( $variant($inner), )+
        }

        $crate::literal_set!($vis $tags = [ $( $crate::__tag_name!($variant $($tag)?) ),+ ]);

        impl $name {
            pub const TAG_FIELD: &'static str = $tag_field;

            pub fn tag(&self) -> $crate::Literal<$tags> {
                match self {
                    $(
                        Self::$variant(_) => {
                            $crate::literal!($tags, $crate::__tag_name!($variant $($tag)?))
                        }
                    )+
                }
            }
        }

        impl $crate::Parse for $name {
            fn parse<R: $crate::Reader>(
                reader: &R,
                var: R::Var,
            ) -> ::core::result::Result<Self, $crate::ParseErrors> {
                let tag = $crate::parse::read_discriminator::<$tags, R>(reader, var, $tag_field)?;
                $(
                    if tag == $crate::__tag_name!($variant $($tag)?) {
                        return $crate::parse::parse_variant::<$inner, R>(reader, var, $tag_field)
                            .map(Self::$variant);
                    }
                )+
                ::core::result::Result::Err($crate::parse::unmatched_tag::<$tags>(
                    tag.name(),
                    $tag_field,
                ))
            }
        }

        impl $crate::Write for $name {
            fn write<W: $crate::Writer>(&self, writer: &W) -> W::Var {
                match self {
                    $(
                        Self::$variant(inner) => {
                            let mut object = writer
                                .new_object(1 + <$inner as $crate::Record>::FIELD_COUNT);
                            let tag = writer.string($crate::__tag_name!($variant $($tag)?));
                            writer.insert(&mut object, $tag_field, tag);
                            $crate::Record::write_fields(inner, writer, &mut object);
                            writer.finish_object(object)
                        }
                    )+
                }
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __tag_name {
    ($variant:ident) => {
        ::core::stringify!($variant)
    };
    ($variant:ident $tag:literal) => {
        $tag
    };
}

/// Routes a type's [`Parse`](crate::Parse) and [`Write`](crate::Write) impls
/// through its [`CustomConstructor`](crate::CustomConstructor).
#[macro_export]
macro_rules! custom_constructor {
    ($ty:ty) => {
        impl $crate::Parse for $ty {
            const HAS_CUSTOM_CONSTRUCTOR: bool = true;

            fn parse<R: $crate::Reader>(
                reader: &R,
                var: R::Var,
            ) -> ::core::result::Result<Self, $crate::ParseErrors> {
                reader.use_custom_constructor::<Self>(var)
            }
        }

        impl $crate::Write for $ty {
            fn write<W: $crate::Writer>(&self, writer: &W) -> W::Var {
                $crate::Write::write(&$crate::CustomConstructor::to_raw(self), writer)
            }
        }
    };
}

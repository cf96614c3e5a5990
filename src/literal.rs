//! Closed string enumerations.
//!
//! A [`Literal`] holds one name out of a fixed set declared with
//! [`literal_set!`](crate::literal_set). At runtime it is just the index of
//! that name, stored in the narrowest unsigned integer able to address the set.
//!
//! ```
//! use fieldwise::{literal, literal_set, Literal};
//!
//! literal_set!(pub Color = ["Red", "Green", "Blue"]);
//!
//! let red: Literal<Color> = literal!(Color, "Red");
//! assert_eq!(red.name(), "Red");
//! assert_eq!(red.value(), 0u8);
//! assert!(Literal::<Color>::from_string("Purple").is_err());
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::{Serialize, Serializer};

use crate::error::LiteralError;

/// Integer representation of a literal's position in its set.
pub trait LiteralCode: Copy + Eq + Ord + Hash + fmt::Debug + Send + Sync + 'static {
    /// Largest number of names this width can index.
    const CAPACITY: usize;

    /// `None` when `index` does not fit this width.
    fn from_index(index: usize) -> Option<Self>;

    fn index(self) -> usize;
}

impl LiteralCode for u8 {
    const CAPACITY: usize = u8::MAX as usize;

    fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index).ok()
    }

    fn index(self) -> usize {
        usize::from(self)
    }
}

impl LiteralCode for u16 {
    const CAPACITY: usize = u16::MAX as usize;

    fn from_index(index: usize) -> Option<Self> {
        u16::try_from(index).ok()
    }

    fn index(self) -> usize {
        usize::from(self)
    }
}

/// Picks the code width for a set at compile time.
#[doc(hidden)]
pub struct Width<const WIDE: bool>;

#[doc(hidden)]
pub trait CodeWidth {
    type Code: LiteralCode;
}

impl CodeWidth for Width<false> {
    type Code = u8;
}

impl CodeWidth for Width<true> {
    type Code = u16;
}

/// A declared, ordered set of distinct names. Implemented by
/// [`literal_set!`](crate::literal_set).
pub trait LiteralSet: 'static {
    type Code: LiteralCode;
    const NAMES: &'static [&'static str];
}

/// Marker for sets with exactly one name; their literal has a default value.
pub trait SingleLiteral: LiteralSet {}

pub const fn str_eq(a: &str, b: &str) -> bool {
    let a = a.as_bytes();
    let b = b.as_bytes();
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

pub const fn position(names: &[&str], name: &str) -> Option<usize> {
    let mut i = 0;
    while i < names.len() {
        if str_eq(names[i], name) {
            return Some(i);
        }
        i += 1;
    }
    None
}

pub const fn has_duplicates(names: &[&str]) -> bool {
    let mut i = 1;
    while i < names.len() {
        let mut j = 0;
        while j < i {
            if str_eq(names[i], names[j]) {
                return true;
            }
            j += 1;
        }
        i += 1;
    }
    false
}

/// True if at least one name of `other` is in `names`.
pub const fn contains_any(names: &[&str], other: &[&str]) -> bool {
    let mut i = 0;
    while i < other.len() {
        if position(names, other[i]).is_some() {
            return true;
        }
        i += 1;
    }
    false
}

/// True if every name of `other` is in `names`.
pub const fn contains_all(names: &[&str], other: &[&str]) -> bool {
    let mut i = 0;
    while i < other.len() {
        if position(names, other[i]).is_none() {
            return false;
        }
        i += 1;
    }
    true
}

/// One name out of the set `S`.
pub struct Literal<S: LiteralSet> {
    code: S::Code,
    _set: PhantomData<fn() -> S>,
}

impl<S: LiteralSet> Literal<S> {
    /// Number of names in the set.
    pub const NUM_FIELDS: usize = S::NAMES.len();

    pub const fn contains(name: &str) -> bool {
        position(S::NAMES, name).is_some()
    }

    pub const fn contains_any<O: LiteralSet>() -> bool {
        contains_any(S::NAMES, O::NAMES)
    }

    pub const fn contains_all<O: LiteralSet>() -> bool {
        contains_all(S::NAMES, O::NAMES)
    }

    pub const fn has_duplicates() -> bool {
        has_duplicates(S::NAMES)
    }

    /// Index of `name`. Fails to compile when evaluated in a const context
    /// with a name outside the set.
    pub const fn value_of(name: &str) -> usize {
        match position(S::NAMES, name) {
            Some(index) => index,
            None => panic!("String not supported."),
        }
    }

    pub const fn name_of(index: usize) -> &'static str {
        S::NAMES[index]
    }

    /// The only way to build a literal from untrusted text.
    pub fn from_string(name: &str) -> Result<Self, LiteralError> {
        match position(S::NAMES, name) {
            Some(index) => Ok(Self::from_checked_index(index)),
            None => Err(LiteralError::UnsupportedString {
                value: name.to_string(),
                allowed: Self::allowed_strings(),
            }),
        }
    }

    pub fn from_index(index: usize) -> Result<Self, LiteralError> {
        match S::Code::from_index(index) {
            Some(code) if index < S::NAMES.len() => Ok(Self {
                code,
                _set: PhantomData,
            }),
            _ => Err(LiteralError::IndexOutOfRange {
                index,
                len: S::NAMES.len(),
            }),
        }
    }

    /// Used by [`literal!`](crate::literal) after the index was resolved at
    /// compile time. Panics on an index outside the set in every build.
    #[doc(hidden)]
    pub fn from_checked_index(index: usize) -> Self {
        match Self::from_index(index) {
            Ok(literal) => literal,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn name(&self) -> &'static str {
        S::NAMES[self.index()]
    }

    pub fn value(&self) -> S::Code {
        self.code
    }

    pub fn index(&self) -> usize {
        self.code.index()
    }

    /// `'a', 'b', 'c'`
    pub fn allowed_strings() -> String {
        S::NAMES
            .iter()
            .map(|name| format!("'{name}'"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0..S::NAMES.len()).map(Self::from_checked_index)
    }
}

impl<S: SingleLiteral> Default for Literal<S> {
    fn default() -> Self {
        Self::from_checked_index(0)
    }
}

impl<S: LiteralSet> Clone for Literal<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: LiteralSet> Copy for Literal<S> {}

impl<S: LiteralSet> fmt::Debug for Literal<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Literal").field(&self.name()).finish()
    }
}

impl<S: LiteralSet> fmt::Display for Literal<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Equality is by name so that sets declared in a different order still agree.
impl<S: LiteralSet, O: LiteralSet> PartialEq<Literal<O>> for Literal<S> {
    fn eq(&self, other: &Literal<O>) -> bool {
        self.name() == other.name()
    }
}

impl<S: LiteralSet> Eq for Literal<S> {}

impl<S: LiteralSet> PartialEq<str> for Literal<S> {
    fn eq(&self, other: &str) -> bool {
        self.name() == other
    }
}

impl<S: LiteralSet> PartialEq<&str> for Literal<S> {
    fn eq(&self, other: &&str) -> bool {
        self.name() == *other
    }
}

impl<S: LiteralSet> Hash for Literal<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
    }
}

impl<S: LiteralSet> FromStr for Literal<S> {
    type Err = LiteralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl<S: LiteralSet> Serialize for Literal<S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de, S: LiteralSet> Deserialize<'de> for Literal<S> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LiteralVisitor<S>(PhantomData<fn() -> S>);

        impl<S: LiteralSet> Visitor<'_> for LiteralVisitor<S> {
            type Value = Literal<S>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "one of {}", Literal::<S>::allowed_strings())
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Literal::from_string(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(LiteralVisitor(PhantomData))
    }
}

/// Declares a [`LiteralSet`].
///
/// Empty sets, duplicate names and sets too large for `u16` are rejected at
/// compile time. Sets of up to 255 names use a `u8` code, larger ones `u16`.
#[macro_export]
macro_rules! literal_set {
    (@define $(#[$meta:meta])* $vis:vis $name:ident [$($names:expr),+]) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {}

        impl $crate::literal::LiteralSet for $name {
            type Code = <$crate::literal::Width<
                { [$($names),+].len() > u8::MAX as usize },
            > as $crate::literal::CodeWidth>::Code;
            const NAMES: &'static [&'static str] = &[$($names),+];
        }

        const _: () = {
            let names = <$name as $crate::literal::LiteralSet>::NAMES;
            assert!(!names.is_empty(), "There must be at least one field in a Literal.");
            assert!(
                names.len() <= <u16 as $crate::literal::LiteralCode>::CAPACITY,
                "Too many fields."
            );
            assert!(
                !$crate::literal::has_duplicates(names),
                "Duplicate strings are not allowed in a Literal."
            );
        };
    };
    ($(#[$meta:meta])* $vis:vis $name:ident = [$single:expr $(,)?]) => {
        $crate::literal_set!(@define $(#[$meta])* $vis $name [$single]);
        impl $crate::literal::SingleLiteral for $name {}
    };
    ($(#[$meta:meta])* $vis:vis $name:ident = [$($names:expr),+ $(,)?]) => {
        $crate::literal_set!(@define $(#[$meta])* $vis $name [$($names),+]);
    };
}

/// Builds a [`Literal`] by name. Names outside the set fail to compile.
#[macro_export]
macro_rules! literal {
    ($set:ty, $name:expr) => {{
        const INDEX: usize = $crate::Literal::<$set>::value_of($name);
        $crate::Literal::<$set>::from_checked_index(INDEX)
    }};
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    crate::literal_set!(Color = ["Red", "Green", "Blue"]);
    crate::literal_set!(Shade = ["Blue", "Red"]);
    crate::literal_set!(Warm = ["Red", "Orange"]);
    crate::literal_set!(Only = ["Leaf"]);
    crate::literal_set!(
        Wide = [
            "n0", "n1", "n2", "n3", "n4", "n5", "n6", "n7", "n8", "n9", "n10", "n11", "n12", "n13", "n14", "n15",
            "n16", "n17", "n18", "n19", "n20", "n21", "n22", "n23", "n24", "n25", "n26", "n27", "n28", "n29", "n30", "n31",
            "n32", "n33", "n34", "n35", "n36", "n37", "n38", "n39", "n40", "n41", "n42", "n43", "n44", "n45", "n46", "n47",
            "n48", "n49", "n50", "n51", "n52", "n53", "n54", "n55", "n56", "n57", "n58", "n59", "n60", "n61", "n62", "n63",
            "n64", "n65", "n66", "n67", "n68", "n69", "n70", "n71", "n72", "n73", "n74", "n75", "n76", "n77", "n78", "n79",
            "n80", "n81", "n82", "n83", "n84", "n85", "n86", "n87", "n88", "n89", "n90", "n91", "n92", "n93", "n94", "n95",
            "n96", "n97", "n98", "n99", "n100", "n101", "n102", "n103", "n104", "n105", "n106", "n107", "n108", "n109", "n110", "n111",
            "n112", "n113", "n114", "n115", "n116", "n117", "n118", "n119", "n120", "n121", "n122", "n123", "n124", "n125", "n126", "n127",
            "n128", "n129", "n130", "n131", "n132", "n133", "n134", "n135", "n136", "n137", "n138", "n139", "n140", "n141", "n142", "n143",
            "n144", "n145", "n146", "n147", "n148", "n149", "n150", "n151", "n152", "n153", "n154", "n155", "n156", "n157", "n158", "n159",
            "n160", "n161", "n162", "n163", "n164", "n165", "n166", "n167", "n168", "n169", "n170", "n171", "n172", "n173", "n174", "n175",
            "n176", "n177", "n178", "n179", "n180", "n181", "n182", "n183", "n184", "n185", "n186", "n187", "n188", "n189", "n190", "n191",
            "n192", "n193", "n194", "n195", "n196", "n197", "n198", "n199", "n200", "n201", "n202", "n203", "n204", "n205", "n206", "n207",
            "n208", "n209", "n210", "n211", "n212", "n213", "n214", "n215", "n216", "n217", "n218", "n219", "n220", "n221", "n222", "n223",
            "n224", "n225", "n226", "n227", "n228", "n229", "n230", "n231", "n232", "n233", "n234", "n235", "n236", "n237", "n238", "n239",
            "n240", "n241", "n242", "n243", "n244", "n245", "n246", "n247", "n248", "n249", "n250", "n251", "n252", "n253", "n254", "n255",
        ]
    );

    #[rstest]
    #[case("Red", true)]
    #[case("Green", true)]
    #[case("Blue", true)]
    #[case("red", false)]
    #[case("", false)]
    fn test_from_string_succeeds_iff_member(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(Literal::<Color>::from_string(input).is_ok(), ok);
        assert_eq!(Literal::<Color>::contains(input), ok);
    }

    #[rstest]
    fn test_error_lists_alternatives() {
        let err = Literal::<Color>::from_string("Purple").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Literal does not support string 'Purple'. The following strings are supported: 'Red', 'Green', 'Blue'."
        );
    }

    #[rstest]
    fn test_name_and_value_agree() {
        for i in 0..Literal::<Color>::NUM_FIELDS {
            let name = Literal::<Color>::name_of(i);
            assert_eq!(Literal::<Color>::value_of(name), i);
            let lit = Literal::<Color>::from_string(name).unwrap();
            assert_eq!(lit.index(), i);
            assert_eq!(lit.name(), name);
        }
    }

    #[rstest]
    fn test_compile_time_construction() {
        let green = crate::literal!(Color, "Green");
        assert_eq!(green.value(), 1u8);
        assert_eq!(green, "Green");
        const HAS_BLUE: bool = Literal::<Color>::contains("Blue");
        assert!(HAS_BLUE);
    }

    #[rstest]
    fn test_equality_across_sets_is_by_name() {
        let red = crate::literal!(Color, "Red");
        let other_red = crate::literal!(Shade, "Red");
        assert_ne!(red.value(), other_red.value());
        assert_eq!(red, other_red);
        assert_ne!(crate::literal!(Color, "Blue"), other_red);
    }

    #[rstest]
    fn test_set_predicates() {
        const ALL: bool = Literal::<Color>::contains_all::<Shade>();
        assert!(ALL);
        assert!(!Literal::<Shade>::contains_all::<Color>());
        assert!(Literal::<Color>::contains_any::<Warm>());
        assert!(!Literal::<Shade>::contains_any::<Only>());
    }

    #[rstest]
    fn test_duplicate_detection() {
        assert!(!Literal::<Color>::has_duplicates());
        assert!(has_duplicates(&["a", "b", "a"]));
        assert!(!has_duplicates(&["a", "ab", "b"]));
    }

    #[rstest]
    fn test_code_width_is_minimal() {
        assert_eq!(std::mem::size_of::<Literal<Color>>(), 1);
    }

    #[rstest]
    fn test_more_than_255_names_use_two_bytes() {
        assert_eq!(Literal::<Wide>::NUM_FIELDS, 256);
        assert_eq!(std::mem::size_of::<Literal<Wide>>(), 2);
        let last = Literal::<Wide>::from_string("n255").unwrap();
        assert_eq!(last.value(), 255u16);
        assert_eq!(last.name(), "n255");
        assert_eq!(crate::literal!(Wide, "n254").value(), 254u16);
    }

    #[rstest]
    #[should_panic(expected = "Literal does not support value 3. It has only 3 options.")]
    fn test_checked_index_panics_outside_the_set() {
        Literal::<Color>::from_checked_index(3);
    }

    #[rstest]
    fn test_index_past_the_code_width_is_rejected() {
        assert!(Literal::<Color>::from_index(256).is_err());
        assert!(Literal::<Color>::from_index(usize::MAX).is_err());
    }

    #[rstest]
    fn test_single_literal_default() {
        let leaf = Literal::<Only>::default();
        assert_eq!(leaf.name(), "Leaf");
    }

    #[rstest]
    fn test_from_index_bounds() {
        assert_eq!(Literal::<Color>::from_index(2).unwrap().name(), "Blue");
        assert!(matches!(
            Literal::<Color>::from_index(3),
            Err(LiteralError::IndexOutOfRange { index: 3, len: 3 })
        ));
    }

    #[rstest]
    fn test_serde_uses_names() {
        let blue = crate::literal!(Color, "Blue");
        assert_eq!(serde_json::to_string(&blue).unwrap(), "\"Blue\"");
        let back: Literal<Color> = serde_json::from_str("\"Blue\"").unwrap();
        assert_eq!(back, blue);
        assert!(serde_json::from_str::<Literal<Color>>("\"Pink\"").is_err());
    }

    #[rstest]
    fn test_iter_visits_declared_order() {
        let names: Vec<_> = Literal::<Color>::iter().map(|l| l.name()).collect();
        assert_eq!(names, vec!["Red", "Green", "Blue"]);
    }
}

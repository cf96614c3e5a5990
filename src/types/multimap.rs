use std::vec;

use super::containers::{parse_entries, write_entries, MapKey};
use crate::error::ParseErrors;
use crate::parse::Parse;
use crate::reader::Reader;
use crate::write::Write;
use crate::writer::Writer;

/// Key/value pairs in input order where a repeated key adds an entry
/// instead of replacing one.
///
/// Whether repeats survive a round trip is up to the backend: [`Value`]
/// objects keep them, JSON objects hold one entry per key.
///
/// [`Value`]: crate::Value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiMap<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> MultiMap<K, V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.entries.push((key, value));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every value stored under `key`, in insertion order.
    pub fn get_all<'a>(&'a self, key: &'a K) -> impl Iterator<Item = &'a V> + 'a
    where
        K: PartialEq,
    {
        self.entries
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }
}

impl<K, V> Default for MultiMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> FromIterator<(K, V)> for MultiMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<K, V> IntoIterator for MultiMap<K, V> {
    type Item = (K, V);
    type IntoIter = vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: MapKey, V: Parse> Parse for MultiMap<K, V> {
    fn parse<R: Reader>(reader: &R, var: R::Var) -> Result<Self, ParseErrors> {
        parse_entries(reader, var).map(|entries| Self { entries })
    }
}

impl<K: MapKey, V: Write> Write for MultiMap<K, V> {
    fn write<W: Writer>(&self, writer: &W) -> W::Var {
        write_entries(writer, self.len(), self.iter())
    }
}

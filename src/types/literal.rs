use crate::error::{ErrorKind, ParseErrors};
use crate::literal::{Literal, LiteralSet};
use crate::parse::Parse;
use crate::reader::Reader;
use crate::write::Write;
use crate::writer::Writer;

use super::containers::MapKey;

impl<S: LiteralSet> Parse for Literal<S> {
    fn parse<R: Reader>(reader: &R, var: R::Var) -> Result<Self, ParseErrors> {
        let name = reader.read_string(var)?;
        Literal::from_string(&name).map_err(ParseErrors::from)
    }
}

impl<S: LiteralSet> Write for Literal<S> {
    fn write<W: Writer>(&self, writer: &W) -> W::Var {
        writer.string(self.name())
    }
}

impl<S: LiteralSet> MapKey for Literal<S> {
    fn to_key(&self) -> String {
        self.name().to_string()
    }

    fn from_key(key: &str) -> Result<Self, ErrorKind> {
        Literal::from_string(key).map_err(ErrorKind::from)
    }
}

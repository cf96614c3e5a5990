use crate::parse::Record;
use crate::writer::Writer;

/// A type that can be written through any [`Writer`]. Writing never fails.
pub trait Write {
    fn write<W: Writer>(&self, writer: &W) -> W::Var;

    /// Absent values are left out of the enclosing object.
    fn is_absent(&self) -> bool {
        false
    }
}

pub fn write<T: Write + ?Sized, W: Writer>(writer: &W, value: &T) -> W::Var {
    value.write(writer)
}

pub fn write_record<T: Record, W: Writer>(writer: &W, value: &T) -> W::Var {
    let mut object = writer.new_object(T::FIELD_COUNT);
    value.write_fields(writer, &mut object);
    writer.finish_object(object)
}

pub fn write_field<T: Write + ?Sized, W: Writer>(
    writer: &W,
    object: &mut W::Object,
    name: &str,
    value: &T,
) {
    if value.is_absent() {
        return;
    }
    let var = value.write(writer);
    writer.insert(object, name, var);
}

mod field;
mod field_map;
mod record;

pub use field::Field;
pub use field_map::FieldMap;
pub use record::Record;
pub(crate) use record::scalar_text;

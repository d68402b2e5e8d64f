mod entry;
mod export;
mod fields;

pub use entry::{Category, ExtractedUnit, MemoryEntry};
pub use export::JsonExport;
pub use fields::FieldBag;

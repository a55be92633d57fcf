//! Persistence module split across logical submodules: the flat-file format
//! and the in-memory store that sits on top of it.

mod file;
mod records;

pub use file::{format_line, parse_line, read_records, write_records};
pub use records::RecordStore;

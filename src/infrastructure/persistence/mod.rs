//! Persistence infrastructure module

mod json_file;

pub use json_file::JsonFileWriter;

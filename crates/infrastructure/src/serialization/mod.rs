//! JSON encoding of the files the client keeps on disk.

mod json;

pub use json::{SerializationError, from_file_bytes, to_file_bytes};

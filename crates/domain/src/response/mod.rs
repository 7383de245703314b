//! Response types for the transport port

mod status;

pub use status::StatusCode;

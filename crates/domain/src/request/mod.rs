//! Request types for the transport port

mod method;
mod spec;

pub use method::HttpMethod;
pub use spec::{MIME_JSON, TransportRequest};

//! Adapters for external systems.

mod reqwest_transport;
mod system_clock;

pub use reqwest_transport::{DEFAULT_TIMEOUT, ReqwestTransport, default_user_agent};
pub use system_clock::SystemClock;

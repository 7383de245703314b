//! Remote auth client.

mod remote_auth_service;

pub use remote_auth_service::RemoteAuthService;

//! Authentication domain types

mod token;

pub use token::AuthToken;

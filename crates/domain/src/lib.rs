//! Nimble Domain - Core business types
//!
//! This crate defines the domain model for the Nimble Survey client.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod request;
pub mod response;
pub mod survey;

pub use auth::AuthToken;
pub use request::{HttpMethod, MIME_JSON, TransportRequest};
pub use response::StatusCode;
pub use survey::{
    PageMeta, RelationList, ResourceIdentifier, Survey, SurveyAttributes, SurveyDetail,
    SurveyDetailAttributes, SurveyDetailRelationships, SurveyRelationships,
};

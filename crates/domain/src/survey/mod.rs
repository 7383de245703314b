//! Survey resources as returned by the JSON:API endpoints.
//!
//! These are read-only projections of server state. Field names follow
//! the snake_case wire format directly.

mod attributes;
mod page;
mod relationship;
mod resource;

pub use attributes::{SurveyAttributes, SurveyDetailAttributes};
pub use page::PageMeta;
pub use relationship::{
    RelationList, ResourceIdentifier, SurveyDetailRelationships, SurveyRelationships,
};
pub use resource::{Survey, SurveyDetail};

//! JSON:API relationship payloads

use serde::{Deserialize, Serialize};

/// Reference to another resource by `(id, type)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    /// Resource id.
    pub id: String,
    /// JSON:API type discriminator, e.g. `question` or `answer`.
    #[serde(rename = "type")]
    pub kind: String,
}

impl ResourceIdentifier {
    /// Creates a new identifier.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
        }
    }
}

/// A to-many relationship: `{ "data": [ {id, type}, ... ] }`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RelationList {
    /// Referenced resources.
    pub data: Vec<ResourceIdentifier>,
}

impl RelationList {
    /// Creates a relationship referencing the given resources.
    #[must_use]
    pub const fn new(data: Vec<ResourceIdentifier>) -> Self {
        Self { data }
    }

    /// Ids of the referenced resources, in order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.data.iter().map(|r| r.id.as_str())
    }
}

/// Relationships of a survey.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SurveyRelationships {
    /// Questions belonging to the survey.
    pub questions: RelationList,
}

/// Relationships of a survey detail (question).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SurveyDetailRelationships {
    /// Answers belonging to the question.
    pub answers: RelationList,
}

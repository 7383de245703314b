//! Survey and survey detail resources

use serde::{Deserialize, Serialize};

use super::attributes::{SurveyAttributes, SurveyDetailAttributes};
use super::relationship::{SurveyDetailRelationships, SurveyRelationships};

/// A survey as listed by `GET /api/v1/surveys`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Survey {
    /// Survey id.
    pub id: String,
    /// JSON:API type discriminator, `survey`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Survey attributes.
    pub attributes: SurveyAttributes,
    /// Related questions.
    pub relationships: SurveyRelationships,
}

/// A question or answer included with `GET /api/v1/surveys/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyDetail {
    /// Resource id.
    pub id: String,
    /// JSON:API type discriminator, `question` or `answer`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Detail attributes.
    pub attributes: SurveyDetailAttributes,
    /// Related answers.
    pub relationships: SurveyDetailRelationships,
}

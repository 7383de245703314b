//! Survey loader port

use async_trait::async_trait;
use nimble_domain::{Survey, SurveyDetail};

use crate::error::LoadError;

/// Fetches survey resources with explicitly supplied credentials.
#[async_trait]
pub trait SurveyLoader: Send + Sync {
    /// Loads one page of surveys. Pages are 1-based.
    async fn load(
        &self,
        page: u32,
        size: u32,
        token_type: &str,
        access_token: &str,
    ) -> Result<Vec<Survey>, LoadError>;

    /// Loads the included resources (questions, answers) of one survey.
    async fn get_details(
        &self,
        survey_id: &str,
        token_type: &str,
        access_token: &str,
    ) -> Result<Vec<SurveyDetail>, LoadError>;
}

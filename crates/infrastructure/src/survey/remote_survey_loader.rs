//! Loader for the survey list and survey detail endpoints.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use nimble_application::ports::{SurveyLoader, Transport, TransportError};
use nimble_application::LoadError;
use nimble_domain::{PageMeta, Survey, SurveyDetail, TransportRequest};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

const SURVEYS_PATH: &str = "/api/v1/surveys";

#[derive(Debug, Deserialize)]
struct SurveyPage {
    data: Vec<Survey>,
    meta: PageMeta,
}

#[derive(Debug, Deserialize)]
struct SurveyWithIncluded {
    data: Survey,
    included: Vec<SurveyDetail>,
}

/// [`SurveyLoader`] that fetches JSON:API resources over a [`Transport`].
pub struct RemoteSurveyLoader<T> {
    transport: Arc<T>,
    base_url: String,
}

impl<T: Transport> RemoteSurveyLoader<T> {
    /// Create a new loader rooted at `base_url`.
    #[must_use]
    pub fn new(transport: Arc<T>, base_url: &str) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn surveys_url(&self) -> Result<Url, LoadError> {
        let raw = format!("{}{SURVEYS_PATH}", self.base_url);
        Url::parse(&raw)
            .map_err(|e| LoadError::Transport(TransportError::InvalidUrl(format!("{e}: {raw}"))))
    }

    fn list_url(&self, page: u32, size: u32) -> Result<Url, LoadError> {
        let mut url = self.surveys_url()?;
        url.query_pairs_mut()
            .append_pair("page[number]", &page.to_string())
            .append_pair("page[size]", &size.to_string());
        Ok(url)
    }

    fn detail_url(&self, survey_id: &str) -> Result<Url, LoadError> {
        let mut url = self.surveys_url()?;
        url.path_segments_mut()
            .map_err(|()| {
                LoadError::Transport(TransportError::InvalidUrl(self.base_url.clone()))
            })?
            .push(survey_id);
        Ok(url)
    }

    async fn fetch<R: DeserializeOwned>(
        &self,
        url: Url,
        token_type: &str,
        access_token: &str,
    ) -> Result<R, LoadError> {
        debug!(%url, "Fetching survey resource");
        let request = TransportRequest::get(url).with_authorization(token_type, access_token);
        let body = self.transport.send(request).await?;
        serde_json::from_slice(&body).map_err(|e| LoadError::InvalidData(e.to_string()))
    }
}

impl<T> fmt::Debug for RemoteSurveyLoader<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteSurveyLoader")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<T: Transport> SurveyLoader for RemoteSurveyLoader<T> {
    async fn load(
        &self,
        page: u32,
        size: u32,
        token_type: &str,
        access_token: &str,
    ) -> Result<Vec<Survey>, LoadError> {
        let url = self.list_url(page, size)?;
        let response: SurveyPage = self.fetch(url, token_type, access_token).await?;
        debug!(
            page = response.meta.page,
            pages = response.meta.pages,
            records = response.meta.records,
            count = response.data.len(),
            "Loaded surveys"
        );
        Ok(response.data)
    }

    async fn get_details(
        &self,
        survey_id: &str,
        token_type: &str,
        access_token: &str,
    ) -> Result<Vec<SurveyDetail>, LoadError> {
        let url = self.detail_url(survey_id)?;
        let response: SurveyWithIncluded = self.fetch(url, token_type, access_token).await?;
        debug!(
            survey = %response.data.id,
            included = response.included.len(),
            "Loaded survey details"
        );
        Ok(response.included)
    }
}

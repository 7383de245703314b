//! Survey loading with automatic token refresh.

use std::sync::Arc;

use nimble_domain::{AuthToken, Survey, SurveyDetail};
use tracing::{debug, warn};

use crate::error::{AuthError, LoadError};
use crate::ports::{Clock, SurveyLoader, TokenProvider};

/// Where a call is in the token check.
enum Step {
    /// Read the stored token and judge freshness.
    CheckToken,
    /// The stored token is stale; exchange its refresh token.
    Refresh(AuthToken),
    /// Read the store again after the refresh attempt.
    Recheck(Option<AuthError>),
}

/// Supplies credentials to a [`SurveyLoader`] from a [`TokenProvider`].
///
/// Every call reads the stored token first. A stale token is refreshed
/// at most once per call; the loader only ever sees a token that was
/// fresh at the moment it was checked.
#[derive(Debug)]
pub struct SurveyLoaderWithAuth<L, P, C> {
    loader: Arc<L>,
    auth: Arc<P>,
    clock: C,
}

impl<L, P, C> SurveyLoaderWithAuth<L, P, C>
where
    L: SurveyLoader,
    P: TokenProvider,
    C: Clock,
{
    /// Create a new authenticated loader.
    #[must_use]
    pub const fn new(loader: Arc<L>, auth: Arc<P>, clock: C) -> Self {
        Self {
            loader,
            auth,
            clock,
        }
    }

    /// Loads one page of surveys.
    ///
    /// # Errors
    ///
    /// Returns `NoToken` or `RefreshToken` when no fresh token can be
    /// obtained, otherwise whatever the loader reports.
    pub async fn load(&self, page: u32, size: u32) -> Result<Vec<Survey>, LoadError> {
        let token = self.fresh_token().await?;
        self.loader
            .load(page, size, &token.token_type, &token.access_token)
            .await
    }

    /// Loads the questions and answers of one survey.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub async fn get_details(&self, survey_id: &str) -> Result<Vec<SurveyDetail>, LoadError> {
        let token = self.fresh_token().await?;
        self.loader
            .get_details(survey_id, &token.token_type, &token.access_token)
            .await
    }

    fn is_fresh(&self, token: &AuthToken) -> bool {
        token.is_valid_at(self.clock.now())
    }

    async fn fresh_token(&self) -> Result<AuthToken, LoadError> {
        let mut step = Step::CheckToken;
        loop {
            step = match step {
                Step::CheckToken => {
                    let Some(token) = self.auth.token().await else {
                        debug!("No stored token");
                        return Err(LoadError::NoToken);
                    };
                    if self.is_fresh(&token) {
                        return Ok(token);
                    }
                    Step::Refresh(token)
                }
                Step::Refresh(stale) => {
                    debug!(
                        expired_at = ?stale.expires_at(),
                        refresh_token = %AuthToken::preview(&stale.refresh_token),
                        "Stored token expired, refreshing"
                    );
                    let cause = self.auth.refresh_token(&stale.refresh_token).await.err();
                    if let Some(e) = &cause {
                        warn!(error = %e, "Token refresh failed");
                    }
                    Step::Recheck(cause)
                }
                // The store is authoritative here: a concurrent caller may
                // have saved a fresh token even though this refresh failed.
                Step::Recheck(cause) => {
                    return match self.auth.token().await {
                        Some(token) if self.is_fresh(&token) => Ok(token),
                        _ => Err(LoadError::RefreshToken { cause }),
                    };
                }
            };
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::ports::TransportError;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use nimble_domain::StatusCode;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;
    use tokio::sync::Notify;

    const NOW: i64 = 1_700_000_000;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum LoaderCall {
        Load(u32, u32, String, String),
        Details(String, String, String),
    }

    struct SurveyLoaderSpy {
        calls: Mutex<Vec<LoaderCall>>,
        result: Mutex<Result<(), LoadError>>,
    }

    impl SurveyLoaderSpy {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                result: Mutex::new(Ok(())),
            }
        }

        fn failing_with(error: LoadError) -> Self {
            let spy = Self::new();
            *spy.result.lock().expect("Lock poisoned") = Err(error);
            spy
        }

        fn calls(&self) -> Vec<LoaderCall> {
            self.calls.lock().expect("Lock poisoned").clone()
        }

        fn outcome(&self) -> Result<(), LoadError> {
            self.result.lock().expect("Lock poisoned").clone()
        }
    }

    #[async_trait]
    impl SurveyLoader for SurveyLoaderSpy {
        async fn load(
            &self,
            page: u32,
            size: u32,
            token_type: &str,
            access_token: &str,
        ) -> Result<Vec<Survey>, LoadError> {
            self.calls.lock().expect("Lock poisoned").push(LoaderCall::Load(
                page,
                size,
                token_type.into(),
                access_token.into(),
            ));
            self.outcome().map(|()| Vec::new())
        }

        async fn get_details(
            &self,
            survey_id: &str,
            token_type: &str,
            access_token: &str,
        ) -> Result<Vec<SurveyDetail>, LoadError> {
            self.calls
                .lock()
                .expect("Lock poisoned")
                .push(LoaderCall::Details(
                    survey_id.into(),
                    token_type.into(),
                    access_token.into(),
                ));
            self.outcome().map(|()| Vec::new())
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum ProviderCall {
        Token,
        Refresh(String),
    }

    /// Token source whose stored slot is replaced by whatever a refresh leaves behind.
    struct TokenProviderSpy {
        calls: Mutex<Vec<ProviderCall>>,
        stored: Mutex<Option<AuthToken>>,
        refresh_result: Result<AuthToken, AuthError>,
        stored_after_refresh: Option<AuthToken>,
        gate: Option<Arc<Notify>>,
    }

    impl TokenProviderSpy {
        fn new(stored: Option<AuthToken>, refresh_result: Result<AuthToken, AuthError>) -> Self {
            let stored_after_refresh = refresh_result.clone().ok();
            Self {
                calls: Mutex::new(Vec::new()),
                stored: Mutex::new(stored),
                refresh_result,
                stored_after_refresh,
                gate: None,
            }
        }

        fn calls(&self) -> Vec<ProviderCall> {
            self.calls.lock().expect("Lock poisoned").clone()
        }
    }

    #[async_trait]
    impl TokenProvider for TokenProviderSpy {
        async fn token(&self) -> Option<AuthToken> {
            self.calls
                .lock()
                .expect("Lock poisoned")
                .push(ProviderCall::Token);
            self.stored.lock().expect("Lock poisoned").clone()
        }

        async fn refresh_token(&self, refresh_token: &str) -> Result<AuthToken, AuthError> {
            self.calls
                .lock()
                .expect("Lock poisoned")
                .push(ProviderCall::Refresh(refresh_token.into()));
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.stored
                .lock()
                .expect("Lock poisoned")
                .clone_from(&self.stored_after_refresh);
            self.refresh_result.clone()
        }
    }

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    type Sut = SurveyLoaderWithAuth<SurveyLoaderSpy, TokenProviderSpy, FixedClock>;

    fn make_sut(
        loader: SurveyLoaderSpy,
        provider: TokenProviderSpy,
    ) -> (Sut, Arc<SurveyLoaderSpy>, Arc<TokenProviderSpy>) {
        let loader = Arc::new(loader);
        let provider = Arc::new(provider);
        let clock = FixedClock(DateTime::from_timestamp(NOW, 0).expect("valid timestamp"));
        let sut = SurveyLoaderWithAuth::new(Arc::clone(&loader), Arc::clone(&provider), clock);
        (sut, loader, provider)
    }

    fn fresh_token(access: &str) -> AuthToken {
        AuthToken::new(access, "refresh", "bearer", 7200, NOW - 60)
    }

    fn expired_token() -> AuthToken {
        AuthToken::new("access", "refresh", "bearer", 1, 0)
    }

    fn refresh_error() -> AuthError {
        AuthError::Transport(TransportError::UnexpectedStatus {
            status: StatusCode::new(400),
        })
    }

    #[tokio::test]
    async fn test_load_without_token_fails_without_calling_loader() {
        let (sut, loader, provider) = make_sut(
            SurveyLoaderSpy::new(),
            TokenProviderSpy::new(None, Err(refresh_error())),
        );

        assert_eq!(sut.load(1, 10).await, Err(LoadError::NoToken));
        assert_eq!(loader.calls(), vec![]);
        assert_eq!(provider.calls(), vec![ProviderCall::Token]);
    }

    #[tokio::test]
    async fn test_load_with_fresh_token_calls_loader_once() {
        let (sut, loader, provider) = make_sut(
            SurveyLoaderSpy::new(),
            TokenProviderSpy::new(Some(fresh_token("access")), Err(refresh_error())),
        );

        assert_eq!(sut.load(2, 5).await, Ok(vec![]));
        assert_eq!(
            loader.calls(),
            vec![LoaderCall::Load(2, 5, "bearer".into(), "access".into())]
        );
        assert_eq!(provider.calls(), vec![ProviderCall::Token]);
    }

    #[tokio::test]
    async fn test_token_expiring_exactly_now_is_refreshed() {
        let at_boundary = AuthToken::new("access", "refresh", "bearer", 60, NOW - 60);
        let (sut, loader, provider) = make_sut(
            SurveyLoaderSpy::new(),
            TokenProviderSpy::new(Some(at_boundary), Ok(fresh_token("access2"))),
        );

        assert_eq!(sut.load(1, 1).await, Ok(vec![]));
        assert_eq!(provider.calls()[1], ProviderCall::Refresh("refresh".into()));
        assert_eq!(
            loader.calls(),
            vec![LoaderCall::Load(1, 1, "bearer".into(), "access2".into())]
        );
    }

    #[tokio::test]
    async fn test_get_details_with_expired_token_refreshes_then_retries() {
        let (sut, loader, provider) = make_sut(
            SurveyLoaderSpy::new(),
            TokenProviderSpy::new(Some(expired_token()), Ok(fresh_token("access2"))),
        );

        assert_eq!(sut.get_details("survey-1").await, Ok(vec![]));
        assert_eq!(
            provider.calls(),
            vec![
                ProviderCall::Token,
                ProviderCall::Refresh("refresh".into()),
                ProviderCall::Token,
            ]
        );
        assert_eq!(
            loader.calls(),
            vec![LoaderCall::Details(
                "survey-1".into(),
                "bearer".into(),
                "access2".into()
            )]
        );
    }

    #[tokio::test]
    async fn test_refresh_failure_reports_refresh_error() {
        let (sut, loader, provider) = make_sut(
            SurveyLoaderSpy::new(),
            TokenProviderSpy::new(Some(expired_token()), Err(refresh_error())),
        );

        assert_eq!(
            sut.load(1, 10).await,
            Err(LoadError::RefreshToken {
                cause: Some(refresh_error())
            })
        );
        assert_eq!(loader.calls(), vec![]);
        assert_eq!(
            provider.calls(),
            vec![
                ProviderCall::Token,
                ProviderCall::Refresh("refresh".into()),
                ProviderCall::Token,
            ]
        );
    }

    #[tokio::test]
    async fn test_refresh_yielding_stale_token_refreshes_only_once() {
        let (sut, loader, provider) = make_sut(
            SurveyLoaderSpy::new(),
            TokenProviderSpy::new(Some(expired_token()), Ok(expired_token())),
        );

        assert_eq!(
            sut.load(1, 10).await,
            Err(LoadError::RefreshToken { cause: None })
        );
        assert_eq!(loader.calls(), vec![]);
        let refreshes = provider
            .calls()
            .into_iter()
            .filter(|c| matches!(c, ProviderCall::Refresh(_)))
            .count();
        assert_eq!(refreshes, 1);
    }

    #[tokio::test]
    async fn test_refresh_that_leaves_store_empty_reports_refresh_error() {
        let mut provider = TokenProviderSpy::new(Some(expired_token()), Ok(fresh_token("a2")));
        provider.stored_after_refresh = None;
        let (sut, loader, _) = make_sut(SurveyLoaderSpy::new(), provider);

        assert_eq!(
            sut.get_details("survey-1").await,
            Err(LoadError::RefreshToken { cause: None })
        );
        assert_eq!(loader.calls(), vec![]);
    }

    #[tokio::test]
    async fn test_failed_refresh_uses_token_stored_meanwhile() {
        let mut provider = TokenProviderSpy::new(Some(expired_token()), Err(refresh_error()));
        provider.stored_after_refresh = Some(fresh_token("concurrent"));
        let (sut, loader, _) = make_sut(SurveyLoaderSpy::new(), provider);

        assert_eq!(sut.load(1, 10).await, Ok(vec![]));
        assert_eq!(
            loader.calls(),
            vec![LoaderCall::Load(1, 10, "bearer".into(), "concurrent".into())]
        );
    }

    #[tokio::test]
    async fn test_loader_error_is_forwarded_verbatim() {
        let error = LoadError::Transport(TransportError::UnexpectedStatus {
            status: StatusCode::new(500),
        });
        let (sut, _, provider) = make_sut(
            SurveyLoaderSpy::failing_with(error.clone()),
            TokenProviderSpy::new(Some(fresh_token("access")), Err(refresh_error())),
        );

        assert_eq!(sut.load(1, 10).await, Err(error));
        assert_eq!(provider.calls(), vec![ProviderCall::Token]);
    }

    #[tokio::test]
    async fn test_loader_error_after_refresh_is_not_retried() {
        let error = LoadError::InvalidData("missing data".into());
        let (sut, loader, _) = make_sut(
            SurveyLoaderSpy::failing_with(error.clone()),
            TokenProviderSpy::new(Some(expired_token()), Ok(fresh_token("access2"))),
        );

        assert_eq!(sut.get_details("survey-1").await, Err(error));
        assert_eq!(loader.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_cancelled_during_refresh_never_reaches_loader() {
        let gate = Arc::new(Notify::new());
        let mut provider = TokenProviderSpy::new(Some(expired_token()), Ok(fresh_token("a2")));
        provider.gate = Some(Arc::clone(&gate));
        let (sut, loader, provider) = make_sut(SurveyLoaderSpy::new(), provider);
        let sut = Arc::new(sut);

        let task = {
            let sut = Arc::clone(&sut);
            tokio::spawn(async move { sut.load(1, 10).await })
        };
        while !provider.calls().contains(&ProviderCall::Refresh("refresh".into())) {
            tokio::task::yield_now().await;
        }
        task.abort();
        assert!(task.await.unwrap_err().is_cancelled());
        gate.notify_one();
        tokio::task::yield_now().await;

        assert_eq!(loader.calls(), vec![]);
        assert_eq!(
            provider.calls(),
            vec![ProviderCall::Token, ProviderCall::Refresh("refresh".into())]
        );
    }
}

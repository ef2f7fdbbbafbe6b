//! Test helpers for HTTP handlers.

use std::sync::Arc;

use actix_web::http::header::AUTHORIZATION;
use actix_web::test::TestRequest;

use crate::domain::UserId;
use crate::domain::ports::{
    MockCatalogCommand, MockCatalogQuery, MockCommentCommand, MockCommentQuery, MockLoginService,
    MockNotificationCommand, MockNotificationQuery, MockProjectCommand, MockProjectQuery,
    MockResumeCommand, MockResumeQuery, MockTokenService, MockTryoutCommand, MockTryoutQuery,
    MockUserCommand, MockUserQuery,
};
use crate::inbound::http::state::{AccountPorts, HttpState, MatchingPorts};

/// Token value accepted by [`MockPorts::signed_in`].
pub(crate) const TEST_TOKEN: &str = "test-access-token";

/// One mock per port. Tests set expectations on the ports they exercise and
/// leave the rest untouched, so any unexpected call panics.
#[derive(Default)]
pub(crate) struct MockPorts {
    pub login: MockLoginService,
    pub tokens: MockTokenService,
    pub users: MockUserCommand,
    pub users_query: MockUserQuery,
    pub catalog: MockCatalogCommand,
    pub catalog_query: MockCatalogQuery,
    pub resumes: MockResumeCommand,
    pub resumes_query: MockResumeQuery,
    pub projects: MockProjectCommand,
    pub projects_query: MockProjectQuery,
    pub comments: MockCommentCommand,
    pub comments_query: MockCommentQuery,
    pub tryouts: MockTryoutCommand,
    pub tryouts_query: MockTryoutQuery,
    pub notifications: MockNotificationCommand,
    pub notifications_query: MockNotificationQuery,
}

impl MockPorts {
    /// Mocks whose token service resolves [`TEST_TOKEN`] to `user_id`.
    pub(crate) fn signed_in(user_id: UserId) -> Self {
        let mut ports = Self::default();
        ports
            .tokens
            .expect_validate()
            .withf(|token| token == TEST_TOKEN)
            .returning(move |_| Ok(user_id));
        ports
    }

    pub(crate) fn into_state(self) -> HttpState {
        HttpState::new(
            AccountPorts {
                login: Arc::new(self.login),
                tokens: Arc::new(self.tokens),
                users: Arc::new(self.users),
                users_query: Arc::new(self.users_query),
            },
            MatchingPorts {
                catalog: Arc::new(self.catalog),
                catalog_query: Arc::new(self.catalog_query),
                resumes: Arc::new(self.resumes),
                resumes_query: Arc::new(self.resumes_query),
                projects: Arc::new(self.projects),
                projects_query: Arc::new(self.projects_query),
                comments: Arc::new(self.comments),
                comments_query: Arc::new(self.comments_query),
                tryouts: Arc::new(self.tryouts),
                tryouts_query: Arc::new(self.tryouts_query),
                notifications: Arc::new(self.notifications),
                notifications_query: Arc::new(self.notifications_query),
            },
        )
    }
}

/// Attach the bearer header accepted by [`MockPorts::signed_in`].
pub(crate) fn with_token(request: TestRequest) -> TestRequest {
    request.insert_header((AUTHORIZATION, format!("Bearer {TEST_TOKEN}")))
}

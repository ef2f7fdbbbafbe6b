//! Bearer-token authentication extractor.
//!
//! Handlers that need a signed-in user take [`AuthenticatedUser`] as an
//! argument. The extractor reads `Authorization: Bearer <token>`, validates
//! it through the configured [`TokenService`](crate::domain::ports::TokenService)
//! and rejects the request with `401 Unauthorized` otherwise.

use std::future::{Ready, ready};

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use tracing::debug;

use crate::domain::ports::TokenError;
use crate::domain::{Error, UserId};
use crate::inbound::http::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// Identity of the caller, resolved from a valid access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(UserId);

impl AuthenticatedUser {
    /// Caller's user id.
    pub fn user_id(&self) -> &UserId {
        &self.0
    }

    /// Consume the extractor, yielding the user id.
    pub fn into_inner(self) -> UserId {
        self.0
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("login required"))?;
    let value = header
        .to_str()
        .map_err(|_| Error::unauthorized("authorization header is not valid ASCII"))?;
    value
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::unauthorized("authorization header must carry a bearer token"))
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let token = bearer_token(req)?;
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("http state is not configured"))?;
    state
        .tokens
        .validate(token)
        .map(AuthenticatedUser)
        .map_err(|error| {
            debug!(%error, "bearer token rejected");
            match error {
                TokenError::Expired => Error::unauthorized("access token expired"),
                TokenError::Invalid { .. } | TokenError::Signing { .. } => {
                    Error::unauthorized("access token invalid")
                }
            }
        })
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test};
    use rstest::rstest;

    use super::*;
    use crate::inbound::http::test_utils::MockPorts;

    const TOKEN: &str = "good-token";

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.user_id().to_string())
    }

    fn state(user_id: UserId) -> web::Data<HttpState> {
        let mut ports = MockPorts::default();
        ports.tokens.expect_validate().returning(move |token| {
            if token == TOKEN {
                Ok(user_id)
            } else if token == "stale" {
                Err(TokenError::expired())
            } else {
                Err(TokenError::invalid("signature"))
            }
        });
        web::Data::new(ports.into_state())
    }

    #[actix_web::test]
    async fn valid_token_resolves_user() {
        let user_id = UserId::random();
        let app = test::init_service(
            App::new()
                .app_data(state(user_id))
                .route("/me", web::get().to(whoami)),
        )
        .await;
        let request = test::TestRequest::get()
            .uri("/me")
            .insert_header((AUTHORIZATION, format!("Bearer {TOKEN}")))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(test::read_body(response).await, user_id.to_string());
    }

    #[rstest]
    #[case(None)]
    #[case(Some("Basic abc"))]
    #[case(Some("Bearer "))]
    #[case(Some("Bearer stale"))]
    #[case(Some("Bearer forged"))]
    #[actix_web::test]
    async fn missing_or_bad_tokens_are_unauthorised(#[case] header: Option<&str>) {
        let app = test::init_service(
            App::new()
                .app_data(state(UserId::random()))
                .route("/me", web::get().to(whoami)),
        )
        .await;
        let mut request = test::TestRequest::get().uri("/me");
        if let Some(value) = header {
            request = request.insert_header((AUTHORIZATION, value));
        }
        let response = test::call_service(&app, request.to_request()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

//! HTTP inbound adapter exposing REST endpoints.
//!
//! Every versioned endpoint is mounted by [`configure_api`] inside the
//! `/api/v1` scope. Health probes sit outside the scope so orchestrators can
//! reach them without knowing the API version.

pub mod auth;
pub mod bearer;
pub mod catalog;
pub mod comments;
pub mod error;
pub mod health;
pub mod notifications;
pub mod projects;
pub mod resumes;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod tryouts;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Prefix shared by every versioned endpoint.
pub const API_PREFIX: &str = "/api/v1";

/// Register all versioned endpoints on a scope.
///
/// Literal segments (`me`, `mine`, `search`, `bookmarks`) are registered
/// before the `{id}` routes that would otherwise capture them.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use pmeet::inbound::http::{API_PREFIX, configure_api};
///
/// let _app = App::new().service(web::scope(API_PREFIX).configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::oauth_login)
        .service(users::get_me)
        .service(users::update_me)
        .service(users::delete_me)
        .service(users::nickname_availability)
        .service(users::get_user)
        .service(catalog::create_job)
        .service(catalog::search_jobs)
        .service(catalog::create_tech_stack)
        .service(catalog::search_tech_stacks);
    resumes::configure(cfg);
    projects::configure(cfg);
    comments::configure(cfg);
    tryouts::configure(cfg);
    notifications::configure(cfg);
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;

    use super::*;
    use crate::domain::UserId;
    use crate::inbound::http::test_utils::{MockPorts, with_token};
    use crate::test_support::sample_user;

    #[rstest]
    #[actix_web::test]
    async fn users_me_is_not_captured_by_the_id_route() {
        let me = UserId::random();
        let mut ports = MockPorts::signed_in(me);
        ports
            .users_query
            .expect_get_user()
            .withf(move |id| *id == me)
            .times(1)
            .returning(|id| Ok(sample_user(*id, "owner")));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ports.into_state()))
                .service(web::scope(API_PREFIX).configure(configure_api)),
        )
        .await;
        let request = with_token(test::TestRequest::get().uri("/api/v1/users/me")).to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_token_is_unauthorised_across_the_api() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(MockPorts::default().into_state()))
                .service(web::scope(API_PREFIX).configure(configure_api)),
        )
        .await;
        for uri in ["/api/v1/projects", "/api/v1/resumes", "/api/v1/notifications"] {
            let response =
                test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        }
    }
}

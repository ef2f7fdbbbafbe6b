//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer. Request and
//! response schemas referenced from handler annotations are collected
//! automatically; the error payload is registered explicitly because every
//! handler shares it.
//!
//! The generated specification is served by Swagger UI in debug builds and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http;

/// Name of the bearer security scheme in the generated document.
pub const BEARER_SCHEME: &str = "BearerAuth";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Access token issued by POST /api/v1/auth/oauth/{provider}.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "pmeet backend API",
        description = "Project and teammate matching: projects, resumes, comments, applications and live notifications."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        http::auth::oauth_login,
        http::users::get_me,
        http::users::update_me,
        http::users::delete_me,
        http::users::nickname_availability,
        http::users::get_user,
        http::catalog::create_job,
        http::catalog::search_jobs,
        http::catalog::create_tech_stack,
        http::catalog::search_tech_stacks,
        http::resumes::create_resume,
        http::resumes::list_own_resumes,
        http::resumes::search_resumes,
        http::resumes::list_bookmarked_resumes,
        http::resumes::get_resume,
        http::resumes::update_resume,
        http::resumes::delete_resume,
        http::resumes::activate_resume,
        http::resumes::deactivate_resume,
        http::resumes::copy_resume,
        http::resumes::bookmark_resume,
        http::resumes::unbookmark_resume,
        http::projects::create_project,
        http::projects::search_projects,
        http::projects::list_own_projects,
        http::projects::list_bookmarked_projects,
        http::projects::get_project,
        http::projects::update_project,
        http::projects::delete_project,
        http::projects::complete_project,
        http::projects::bookmark_project,
        http::projects::unbookmark_project,
        http::projects::list_members,
        http::comments::list_comments,
        http::comments::create_comment,
        http::comments::edit_comment,
        http::comments::delete_comment,
        http::comments::like_comment,
        http::comments::unlike_comment,
        http::tryouts::apply,
        http::tryouts::list_project_tryouts,
        http::tryouts::list_my_tryouts,
        http::tryouts::accept,
        http::tryouts::reject,
        http::notifications::list_notifications,
        http::notifications::unread_count,
        http::notifications::mark_read,
        http::notifications::subscribe,
        http::health::ready,
        http::health::live,
    ),
    components(schemas(Error, ErrorCode)),
    tags(
        (name = "auth", description = "OAuth sign-in and token issue"),
        (name = "users", description = "Accounts and public profiles"),
        (name = "catalog", description = "Job and tech stack dictionaries"),
        (name = "resumes", description = "Resumes and resume bookmarks"),
        (name = "projects", description = "Projects, bookmarks and members"),
        (name = "comments", description = "Threaded project comments"),
        (name = "tryouts", description = "Project applications"),
        (name = "notifications", description = "Inbox and live event stream"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

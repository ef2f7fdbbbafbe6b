//! Project application (tryout) handlers.
//!
//! ```text
//! POST /api/v1/projects/{id}/tryouts {"resumeId":"...","positionName":"Backend"}
//! GET  /api/v1/projects/{id}/tryouts
//! GET  /api/v1/tryouts/mine
//! POST /api/v1/tryouts/{id}/accept
//! POST /api/v1/tryouts/{id}/reject
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, ProjectTryout, ResumeId, TryoutId, TryoutStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthenticatedUser;
use crate::inbound::http::projects::{MemberResponse, project_id};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub resume_id: String,
    /// Recruited job name the applicant is applying for.
    pub position_name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TryoutResponse {
    pub id: String,
    pub project_id: String,
    pub resume_id: String,
    pub user_id: String,
    pub nickname: String,
    pub self_description: Option<String>,
    pub profile_image_url: Option<String>,
    pub position_name: String,
    pub tryout_status: TryoutStatus,
    pub created_at: DateTime<Utc>,
}

impl From<&ProjectTryout> for TryoutResponse {
    fn from(tryout: &ProjectTryout) -> Self {
        let applicant = tryout.applicant();
        Self {
            id: tryout.id().to_string(),
            project_id: tryout.project_id().to_string(),
            resume_id: tryout.resume_id().to_string(),
            user_id: applicant.user_id.to_string(),
            nickname: applicant.nickname.clone(),
            self_description: applicant.self_description.clone(),
            profile_image_url: applicant.profile_image_url.clone(),
            position_name: tryout.position_name().to_owned(),
            tryout_status: tryout.status(),
            created_at: tryout.created_at(),
        }
    }
}

fn tryout_id(raw: &str) -> Result<TryoutId, Error> {
    parse_id(raw, FieldName::new("id"))
}

/// Apply to a project with one of the caller's resumes.
#[utoipa::path(
    post,
    path = "/api/v1/projects/{id}/tryouts",
    params(("id" = String, Path, description = "Project id")),
    request_body = ApplyRequest,
    responses(
        (status = 201, description = "Application submitted", body = TryoutResponse),
        (status = 400, description = "Position not recruited or own project", body = Error),
        (status = 403, description = "Resume belongs to someone else", body = Error),
        (status = 409, description = "Already applied", body = Error)
    ),
    tags = ["tryouts"],
    operation_id = "applyToProject"
)]
#[post("/projects/{id}/tryouts")]
pub async fn apply(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<ApplyRequest>,
) -> ApiResult<HttpResponse> {
    let project = project_id(&path)?;
    let ApplyRequest {
        resume_id,
        position_name,
    } = payload.into_inner();
    let resume: ResumeId = parse_id(&resume_id, FieldName::new("resumeId"))?;
    let tryout = state
        .tryouts
        .apply(user.user_id(), &project, &resume, position_name)
        .await?;
    Ok(HttpResponse::Created().json(TryoutResponse::from(&tryout)))
}

/// List applications to a project the caller owns.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{id}/tryouts",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 200, description = "Applications", body = [TryoutResponse]),
        (status = 403, description = "Not the owner", body = Error)
    ),
    tags = ["tryouts"],
    operation_id = "listProjectTryouts"
)]
#[get("/projects/{id}/tryouts")]
pub async fn list_project_tryouts(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<TryoutResponse>>> {
    let project = project_id(&path)?;
    let tryouts = state
        .tryouts_query
        .list_project_tryouts(user.user_id(), &project)
        .await?;
    Ok(web::Json(tryouts.iter().map(TryoutResponse::from).collect()))
}

/// List the caller's own applications.
#[utoipa::path(
    get,
    path = "/api/v1/tryouts/mine",
    responses((status = 200, description = "Own applications", body = [TryoutResponse])),
    tags = ["tryouts"],
    operation_id = "listMyTryouts"
)]
#[get("/tryouts/mine")]
pub async fn list_my_tryouts(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<TryoutResponse>>> {
    let tryouts = state.tryouts_query.list_my_tryouts(user.user_id()).await?;
    Ok(web::Json(tryouts.iter().map(TryoutResponse::from).collect()))
}

/// Accept an application; the applicant becomes a member.
#[utoipa::path(
    post,
    path = "/api/v1/tryouts/{id}/accept",
    params(("id" = String, Path, description = "Tryout id")),
    responses(
        (status = 200, description = "Member created", body = MemberResponse),
        (status = 403, description = "Not the project owner", body = Error),
        (status = 409, description = "Already decided", body = Error)
    ),
    tags = ["tryouts"],
    operation_id = "acceptTryout"
)]
#[post("/tryouts/{id}/accept")]
pub async fn accept(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<MemberResponse>> {
    let id = tryout_id(&path)?;
    let member = state.tryouts.accept(user.user_id(), &id).await?;
    Ok(web::Json(MemberResponse::from(&member)))
}

/// Reject an application.
#[utoipa::path(
    post,
    path = "/api/v1/tryouts/{id}/reject",
    params(("id" = String, Path, description = "Tryout id")),
    responses(
        (status = 200, description = "Rejected", body = TryoutResponse),
        (status = 403, description = "Not the project owner", body = Error),
        (status = 409, description = "Already decided", body = Error)
    ),
    tags = ["tryouts"],
    operation_id = "rejectTryout"
)]
#[post("/tryouts/{id}/reject")]
pub async fn reject(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<TryoutResponse>> {
    let id = tryout_id(&path)?;
    let tryout = state.tryouts.reject(user.user_id(), &id).await?;
    Ok(web::Json(TryoutResponse::from(&tryout)))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(apply)
        .service(list_project_tryouts)
        .service(list_my_tryouts)
        .service(accept)
        .service(reject);
}

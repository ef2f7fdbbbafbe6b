//! Resume handlers.
//!
//! ```text
//! POST   /api/v1/resumes
//! GET    /api/v1/resumes
//! GET    /api/v1/resumes/search?filterType=NICKNAME&filterValue=min&sortBy=title&direction=asc
//! GET    /api/v1/resumes/bookmarks
//! GET    /api/v1/resumes/{id}
//! PUT    /api/v1/resumes/{id}
//! DELETE /api/v1/resumes/{id}
//! POST   /api/v1/resumes/{id}/activate | deactivate | copy
//! PUT    /api/v1/resumes/{id}/bookmark
//! DELETE /api/v1/resumes/{id}/bookmark
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use pagination::Slice;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::ResumeView;
use crate::domain::{
    Error, JobExperience, ProjectExperience, Resume, ResumeDraft, ResumeFilterType, ResumeId,
    ResumeSortKey,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthenticatedUser;
use crate::inbound::http::schemas::SliceSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, PageQuery, parse_filter, parse_id, parse_sort,
};

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobExperienceDto {
    pub company_name: String,
    pub job_name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectExperienceDto {
    pub project_name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Resume body used for both creation and full replacement.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRequest {
    pub title: String,
    #[serde(default)]
    pub desired_jobs: Vec<String>,
    #[serde(default)]
    pub tech_stacks: Vec<String>,
    #[serde(default)]
    pub job_experiences: Vec<JobExperienceDto>,
    #[serde(default)]
    pub project_experiences: Vec<ProjectExperienceDto>,
    #[serde(default)]
    pub portfolio_urls: Vec<String>,
    #[serde(default)]
    pub self_description: String,
}

impl From<ResumeRequest> for ResumeDraft {
    fn from(request: ResumeRequest) -> Self {
        Self {
            title: request.title,
            desired_jobs: request.desired_jobs,
            tech_stacks: request.tech_stacks,
            job_experiences: request
                .job_experiences
                .into_iter()
                .map(|entry| JobExperience {
                    company_name: entry.company_name,
                    job_name: entry.job_name,
                    start_date: entry.start_date,
                    end_date: entry.end_date,
                })
                .collect(),
            project_experiences: request
                .project_experiences
                .into_iter()
                .map(|entry| ProjectExperience {
                    project_name: entry.project_name,
                    start_date: entry.start_date,
                    end_date: entry.end_date,
                })
                .collect(),
            portfolio_urls: request.portfolio_urls,
            self_description: request.self_description,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumeOwnerDto {
    pub user_id: String,
    pub nickname: String,
    pub email: String,
    pub profile_image_url: Option<String>,
    pub gender: Option<String>,
    pub birth_date: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumeResponse {
    pub id: String,
    pub owner: ResumeOwnerDto,
    pub title: String,
    pub is_active: bool,
    pub desired_jobs: Vec<String>,
    pub tech_stacks: Vec<String>,
    pub job_experiences: Vec<JobExperienceDto>,
    pub project_experiences: Vec<ProjectExperienceDto>,
    pub portfolio_urls: Vec<String>,
    pub self_description: String,
    /// Present on reads made on behalf of another user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_bookmarked: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Resume> for ResumeResponse {
    fn from(resume: &Resume) -> Self {
        let owner = resume.owner();
        let content = resume.content();
        Self {
            id: resume.id().to_string(),
            owner: ResumeOwnerDto {
                user_id: owner.user_id.to_string(),
                nickname: owner.nickname.clone(),
                email: owner.email.clone(),
                profile_image_url: owner.profile_image_url.clone(),
                gender: owner.gender.clone(),
                birth_date: owner.birth_date.clone(),
                phone_number: owner.phone_number.clone(),
            },
            title: content.title.clone(),
            is_active: resume.is_active(),
            desired_jobs: content.desired_jobs.clone(),
            tech_stacks: content.tech_stacks.clone(),
            job_experiences: content
                .job_experiences
                .iter()
                .map(|entry| JobExperienceDto {
                    company_name: entry.company_name.clone(),
                    job_name: entry.job_name.clone(),
                    start_date: entry.start_date,
                    end_date: entry.end_date,
                })
                .collect(),
            project_experiences: content
                .project_experiences
                .iter()
                .map(|entry| ProjectExperienceDto {
                    project_name: entry.project_name.clone(),
                    start_date: entry.start_date,
                    end_date: entry.end_date,
                })
                .collect(),
            portfolio_urls: content.portfolio_urls.clone(),
            self_description: content.self_description.clone(),
            is_bookmarked: None,
            created_at: resume.created_at(),
            updated_at: resume.updated_at(),
        }
    }
}

impl From<ResumeView> for ResumeResponse {
    fn from(view: ResumeView) -> Self {
        Self {
            is_bookmarked: Some(view.is_bookmarked),
            ..Self::from(&view.resume)
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ResumeSearchQuery {
    /// `ALL`, `TITLE`, `JOB_NAME` or `NICKNAME`.
    pub filter_type: Option<String>,
    pub filter_value: Option<String>,
    /// `updatedAt` (default), `createdAt` or `title`.
    pub sort_by: Option<String>,
    /// `asc` or `desc` (default).
    pub direction: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

fn resume_id(raw: &str) -> Result<ResumeId, Error> {
    parse_id(raw, FieldName::new("id"))
}

/// Create a resume owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/resumes",
    request_body = ResumeRequest,
    responses(
        (status = 201, description = "Created", body = ResumeResponse),
        (status = 400, description = "Invalid resume", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["resumes"],
    operation_id = "createResume"
)]
#[post("/resumes")]
pub async fn create_resume(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<ResumeRequest>,
) -> ApiResult<HttpResponse> {
    let draft = ResumeDraft::from(payload.into_inner());
    let resume = state.resumes.create_resume(user.user_id(), draft).await?;
    Ok(HttpResponse::Created().json(ResumeResponse::from(&resume)))
}

/// List the caller's resumes, most recently updated first.
#[utoipa::path(
    get,
    path = "/api/v1/resumes",
    responses((status = 200, description = "Own resumes", body = [ResumeResponse])),
    tags = ["resumes"],
    operation_id = "listOwnResumes"
)]
#[get("/resumes")]
pub async fn list_own_resumes(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<ResumeResponse>>> {
    let resumes = state.resumes_query.list_own_resumes(user.user_id()).await?;
    Ok(web::Json(resumes.iter().map(ResumeResponse::from).collect()))
}

/// Search other users' active resumes.
#[utoipa::path(
    get,
    path = "/api/v1/resumes/search",
    params(ResumeSearchQuery),
    responses(
        (status = 200, description = "Matching resumes", body = SliceSchema<ResumeResponse>),
        (status = 400, description = "Unknown filter, sort or page", body = Error)
    ),
    tags = ["resumes"],
    operation_id = "searchResumes"
)]
#[get("/resumes/search")]
pub async fn search_resumes(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    query: web::Query<ResumeSearchQuery>,
) -> ApiResult<web::Json<Slice<ResumeResponse>>> {
    let ResumeSearchQuery {
        filter_type,
        filter_value,
        sort_by,
        direction,
        page,
        size,
    } = query.into_inner();
    let filter = parse_filter::<ResumeFilterType>(filter_type.as_deref(), filter_value)?;
    let sort = parse_sort::<ResumeSortKey>(sort_by.as_deref(), direction.as_deref())?;
    let page = PageQuery { page, size }.to_page_request()?;
    let slice = state
        .resumes_query
        .search_resumes(user.user_id(), filter, sort, page)
        .await?;
    Ok(web::Json(slice.map(ResumeResponse::from)))
}

/// List resumes the caller bookmarked.
#[utoipa::path(
    get,
    path = "/api/v1/resumes/bookmarks",
    responses((status = 200, description = "Bookmarked resumes", body = [ResumeResponse])),
    tags = ["resumes"],
    operation_id = "listBookmarkedResumes"
)]
#[get("/resumes/bookmarks")]
pub async fn list_bookmarked_resumes(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<ResumeResponse>>> {
    let views = state
        .resumes_query
        .list_bookmarked_resumes(user.user_id())
        .await?;
    Ok(web::Json(views.into_iter().map(ResumeResponse::from).collect()))
}

/// Fetch one resume.
#[utoipa::path(
    get,
    path = "/api/v1/resumes/{id}",
    params(("id" = String, Path, description = "Resume id")),
    responses(
        (status = 200, description = "Resume", body = ResumeResponse),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["resumes"],
    operation_id = "getResume"
)]
#[get("/resumes/{id}")]
pub async fn get_resume(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<ResumeResponse>> {
    let id = resume_id(&path)?;
    let view = state.resumes_query.get_resume(user.user_id(), &id).await?;
    Ok(web::Json(ResumeResponse::from(view)))
}

/// Replace a resume's content.
#[utoipa::path(
    put,
    path = "/api/v1/resumes/{id}",
    params(("id" = String, Path, description = "Resume id")),
    request_body = ResumeRequest,
    responses(
        (status = 200, description = "Updated", body = ResumeResponse),
        (status = 400, description = "Invalid resume", body = Error),
        (status = 403, description = "Not the owner", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["resumes"],
    operation_id = "updateResume"
)]
#[put("/resumes/{id}")]
pub async fn update_resume(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<ResumeRequest>,
) -> ApiResult<web::Json<ResumeResponse>> {
    let id = resume_id(&path)?;
    let draft = ResumeDraft::from(payload.into_inner());
    let resume = state
        .resumes
        .update_resume(user.user_id(), &id, draft)
        .await?;
    Ok(web::Json(ResumeResponse::from(&resume)))
}

/// Delete a resume.
#[utoipa::path(
    delete,
    path = "/api/v1/resumes/{id}",
    params(("id" = String, Path, description = "Resume id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 403, description = "Not the owner", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["resumes"],
    operation_id = "deleteResume"
)]
#[delete("/resumes/{id}")]
pub async fn delete_resume(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = resume_id(&path)?;
    state.resumes.delete_resume(user.user_id(), &id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Make a resume the caller's active one.
#[utoipa::path(
    post,
    path = "/api/v1/resumes/{id}/activate",
    params(("id" = String, Path, description = "Resume id")),
    responses(
        (status = 200, description = "Activated", body = ResumeResponse),
        (status = 403, description = "Not the owner", body = Error)
    ),
    tags = ["resumes"],
    operation_id = "activateResume"
)]
#[post("/resumes/{id}/activate")]
pub async fn activate_resume(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<ResumeResponse>> {
    let id = resume_id(&path)?;
    let resume = state.resumes.activate_resume(user.user_id(), &id).await?;
    Ok(web::Json(ResumeResponse::from(&resume)))
}

/// Withdraw a resume from search.
#[utoipa::path(
    post,
    path = "/api/v1/resumes/{id}/deactivate",
    params(("id" = String, Path, description = "Resume id")),
    responses(
        (status = 200, description = "Deactivated", body = ResumeResponse),
        (status = 403, description = "Not the owner", body = Error)
    ),
    tags = ["resumes"],
    operation_id = "deactivateResume"
)]
#[post("/resumes/{id}/deactivate")]
pub async fn deactivate_resume(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<ResumeResponse>> {
    let id = resume_id(&path)?;
    let resume = state.resumes.deactivate_resume(user.user_id(), &id).await?;
    Ok(web::Json(ResumeResponse::from(&resume)))
}

/// Duplicate one of the caller's resumes.
#[utoipa::path(
    post,
    path = "/api/v1/resumes/{id}/copy",
    params(("id" = String, Path, description = "Resume id")),
    responses(
        (status = 201, description = "Copy created", body = ResumeResponse),
        (status = 403, description = "Not the owner", body = Error)
    ),
    tags = ["resumes"],
    operation_id = "copyResume"
)]
#[post("/resumes/{id}/copy")]
pub async fn copy_resume(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = resume_id(&path)?;
    let copy = state.resumes.copy_resume(user.user_id(), &id).await?;
    Ok(HttpResponse::Created().json(ResumeResponse::from(&copy)))
}

/// Bookmark a resume. Repeating the call is harmless.
#[utoipa::path(
    put,
    path = "/api/v1/resumes/{id}/bookmark",
    params(("id" = String, Path, description = "Resume id")),
    responses(
        (status = 204, description = "Bookmarked"),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["resumes"],
    operation_id = "bookmarkResume"
)]
#[put("/resumes/{id}/bookmark")]
pub async fn bookmark_resume(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = resume_id(&path)?;
    state.resumes.add_bookmark(user.user_id(), &id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Remove a resume bookmark. Missing bookmarks are ignored.
#[utoipa::path(
    delete,
    path = "/api/v1/resumes/{id}/bookmark",
    params(("id" = String, Path, description = "Resume id")),
    responses((status = 204, description = "Bookmark removed")),
    tags = ["resumes"],
    operation_id = "unbookmarkResume"
)]
#[delete("/resumes/{id}/bookmark")]
pub async fn unbookmark_resume(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = resume_id(&path)?;
    state.resumes.remove_bookmark(user.user_id(), &id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register resume routes; fixed segments precede `{id}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_resume)
        .service(list_own_resumes)
        .service(search_resumes)
        .service(list_bookmarked_resumes)
        .service(get_resume)
        .service(update_resume)
        .service(delete_resume)
        .service(activate_resume)
        .service(deactivate_resume)
        .service(copy_resume)
        .service(bookmark_resume)
        .service(unbookmark_resume);
}

#[cfg(test)]
#[path = "resumes_tests.rs"]
mod tests;

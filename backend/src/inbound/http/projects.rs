//! Project handlers.
//!
//! ```text
//! POST   /api/v1/projects
//! GET    /api/v1/projects?filterType=TITLE&filterValue=rust&isCompleted=false&sortBy=bookmarkCount
//! GET    /api/v1/projects/mine
//! GET    /api/v1/projects/bookmarks
//! GET    /api/v1/projects/{id}
//! PUT    /api/v1/projects/{id}
//! DELETE /api/v1/projects/{id}
//! POST   /api/v1/projects/{id}/complete
//! PUT    /api/v1/projects/{id}/bookmark
//! DELETE /api/v1/projects/{id}/bookmark
//! GET    /api/v1/projects/{id}/members
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use pagination::Slice;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{ProjectSearch, ProjectView};
use crate::domain::{
    Error, Project, ProjectDraft, ProjectFilterType, ProjectId, ProjectMember, ProjectSortKey,
    Recruitment,
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
pub struct RecruitmentDto {
    pub job_name: String,
    pub number_of_recruitment: u32,
}

/// Project body used for both creation and full replacement.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    pub title: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub tech_stacks: Vec<String>,
    pub recruitments: Vec<RecruitmentDto>,
    #[serde(default)]
    pub description: String,
}

impl From<ProjectRequest> for ProjectDraft {
    fn from(request: ProjectRequest) -> Self {
        Self {
            title: request.title,
            start_date: request.start_date,
            end_date: request.end_date,
            thumbnail_url: request.thumbnail_url,
            tech_stacks: request.tech_stacks,
            recruitments: request
                .recruitments
                .into_iter()
                .map(|entry| Recruitment {
                    job_name: entry.job_name,
                    number_of_recruitment: entry.number_of_recruitment,
                })
                .collect(),
            description: request.description,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub thumbnail_url: Option<String>,
    pub tech_stacks: Vec<String>,
    pub recruitments: Vec<RecruitmentDto>,
    pub description: String,
    pub is_completed: bool,
    pub bookmark_count: usize,
    /// Present on reads made on behalf of a signed-in user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_bookmarked: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Project> for ProjectResponse {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id().to_string(),
            user_id: project.user_id().to_string(),
            title: project.title().to_owned(),
            start_date: project.start_date(),
            end_date: project.end_date(),
            thumbnail_url: project.thumbnail_url().map(str::to_owned),
            tech_stacks: project.tech_stacks().to_vec(),
            recruitments: project
                .recruitments()
                .iter()
                .map(|entry| RecruitmentDto {
                    job_name: entry.job_name.clone(),
                    number_of_recruitment: entry.number_of_recruitment,
                })
                .collect(),
            description: project.description().to_owned(),
            is_completed: project.is_completed(),
            bookmark_count: project.bookmarks().len(),
            is_bookmarked: None,
            created_at: project.created_at(),
            updated_at: project.updated_at(),
        }
    }
}

impl From<ProjectView> for ProjectResponse {
    fn from(view: ProjectView) -> Self {
        Self {
            is_bookmarked: Some(view.is_bookmarked),
            ..Self::from(&view.project)
        }
    }
}

/// Accepted applicant of a project.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: String,
    pub project_id: String,
    pub resume_id: String,
    pub tryout_id: Option<String>,
    pub user_id: String,
    pub nickname: String,
    pub self_description: Option<String>,
    pub profile_image_url: Option<String>,
    pub position_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&ProjectMember> for MemberResponse {
    fn from(member: &ProjectMember) -> Self {
        let profile = member.member();
        Self {
            id: member.id().to_string(),
            project_id: member.project_id().to_string(),
            resume_id: member.resume_id().to_string(),
            tryout_id: member.tryout_id().map(|id| id.to_string()),
            user_id: profile.user_id.to_string(),
            nickname: profile.nickname.clone(),
            self_description: profile.self_description.clone(),
            profile_image_url: profile.profile_image_url.clone(),
            position_name: member.position_name().to_owned(),
            created_at: member.created_at(),
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProjectSearchQuery {
    /// `ALL`, `TITLE`, `JOB_NAME` or `TECH_STACK`.
    pub filter_type: Option<String>,
    pub filter_value: Option<String>,
    /// Defaults to `false`: only open projects.
    pub is_completed: Option<bool>,
    /// `createdAt` (default), `title`, `startDate` or `bookmarkCount`.
    pub sort_by: Option<String>,
    /// `asc` or `desc` (default).
    pub direction: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

pub(crate) fn project_id(raw: &str) -> Result<ProjectId, Error> {
    parse_id(raw, FieldName::new("id"))
}

/// Publish a project owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/projects",
    request_body = ProjectRequest,
    responses(
        (status = 201, description = "Created", body = ProjectResponse),
        (status = 400, description = "Invalid project", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["projects"],
    operation_id = "createProject"
)]
#[post("/projects")]
pub async fn create_project(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<ProjectRequest>,
) -> ApiResult<HttpResponse> {
    let draft = ProjectDraft::from(payload.into_inner());
    let project = state.projects.create_project(user.user_id(), draft).await?;
    Ok(HttpResponse::Created().json(ProjectResponse::from(&project)))
}

/// Search projects by keyword and completion state.
#[utoipa::path(
    get,
    path = "/api/v1/projects",
    params(ProjectSearchQuery),
    responses(
        (status = 200, description = "Matching projects", body = SliceSchema<ProjectResponse>),
        (status = 400, description = "Unknown filter, sort or page", body = Error)
    ),
    tags = ["projects"],
    operation_id = "searchProjects"
)]
#[get("/projects")]
pub async fn search_projects(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    query: web::Query<ProjectSearchQuery>,
) -> ApiResult<web::Json<Slice<ProjectResponse>>> {
    let ProjectSearchQuery {
        filter_type,
        filter_value,
        is_completed,
        sort_by,
        direction,
        page,
        size,
    } = query.into_inner();
    let search = ProjectSearch {
        filter: parse_filter::<ProjectFilterType>(filter_type.as_deref(), filter_value)?,
        is_completed: is_completed.unwrap_or(false),
        sort: parse_sort::<ProjectSortKey>(sort_by.as_deref(), direction.as_deref())?,
    };
    let page = PageQuery { page, size }.to_page_request()?;
    let slice = state
        .projects_query
        .search_projects(user.user_id(), search, page)
        .await?;
    Ok(web::Json(slice.map(ProjectResponse::from)))
}

/// List projects the caller owns, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/projects/mine",
    responses((status = 200, description = "Own projects", body = [ProjectResponse])),
    tags = ["projects"],
    operation_id = "listOwnProjects"
)]
#[get("/projects/mine")]
pub async fn list_own_projects(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<ProjectResponse>>> {
    let views = state.projects_query.list_own_projects(user.user_id()).await?;
    Ok(web::Json(views.into_iter().map(ProjectResponse::from).collect()))
}

/// List projects the caller bookmarked.
#[utoipa::path(
    get,
    path = "/api/v1/projects/bookmarks",
    responses((status = 200, description = "Bookmarked projects", body = [ProjectResponse])),
    tags = ["projects"],
    operation_id = "listBookmarkedProjects"
)]
#[get("/projects/bookmarks")]
pub async fn list_bookmarked_projects(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<ProjectResponse>>> {
    let views = state
        .projects_query
        .list_bookmarked_projects(user.user_id())
        .await?;
    Ok(web::Json(views.into_iter().map(ProjectResponse::from).collect()))
}

/// Fetch one project.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{id}",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project", body = ProjectResponse),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["projects"],
    operation_id = "getProject"
)]
#[get("/projects/{id}")]
pub async fn get_project(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProjectResponse>> {
    let id = project_id(&path)?;
    let view = state.projects_query.get_project(user.user_id(), &id).await?;
    Ok(web::Json(ProjectResponse::from(view)))
}

/// Replace a project's content.
#[utoipa::path(
    put,
    path = "/api/v1/projects/{id}",
    params(("id" = String, Path, description = "Project id")),
    request_body = ProjectRequest,
    responses(
        (status = 200, description = "Updated", body = ProjectResponse),
        (status = 400, description = "Invalid project", body = Error),
        (status = 403, description = "Not the owner", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["projects"],
    operation_id = "updateProject"
)]
#[put("/projects/{id}")]
pub async fn update_project(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<ProjectRequest>,
) -> ApiResult<web::Json<ProjectResponse>> {
    let id = project_id(&path)?;
    let draft = ProjectDraft::from(payload.into_inner());
    let project = state
        .projects
        .update_project(user.user_id(), &id, draft)
        .await?;
    Ok(web::Json(ProjectResponse::from(&project)))
}

/// Delete a project with its comments, tryouts and members.
#[utoipa::path(
    delete,
    path = "/api/v1/projects/{id}",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 403, description = "Not the owner", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["projects"],
    operation_id = "deleteProject"
)]
#[delete("/projects/{id}")]
pub async fn delete_project(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = project_id(&path)?;
    state.projects.delete_project(user.user_id(), &id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Mark a project as completed.
#[utoipa::path(
    post,
    path = "/api/v1/projects/{id}/complete",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 200, description = "Completed", body = ProjectResponse),
        (status = 403, description = "Not the owner", body = Error)
    ),
    tags = ["projects"],
    operation_id = "completeProject"
)]
#[post("/projects/{id}/complete")]
pub async fn complete_project(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProjectResponse>> {
    let id = project_id(&path)?;
    let project = state.projects.complete_project(user.user_id(), &id).await?;
    Ok(web::Json(ProjectResponse::from(&project)))
}

/// Bookmark a project. Repeating the call refreshes the bookmark time.
#[utoipa::path(
    put,
    path = "/api/v1/projects/{id}/bookmark",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 204, description = "Bookmarked"),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["projects"],
    operation_id = "bookmarkProject"
)]
#[put("/projects/{id}/bookmark")]
pub async fn bookmark_project(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = project_id(&path)?;
    state.projects.add_bookmark(user.user_id(), &id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Remove a project bookmark. Missing bookmarks are ignored.
#[utoipa::path(
    delete,
    path = "/api/v1/projects/{id}/bookmark",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 204, description = "Bookmark removed"),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["projects"],
    operation_id = "unbookmarkProject"
)]
#[delete("/projects/{id}/bookmark")]
pub async fn unbookmark_project(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = project_id(&path)?;
    state.projects.remove_bookmark(user.user_id(), &id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// List accepted members of a project.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{id}/members",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 200, description = "Members, earliest first", body = [MemberResponse]),
        (status = 404, description = "Project not found", body = Error)
    ),
    tags = ["projects"],
    operation_id = "listProjectMembers"
)]
#[get("/projects/{id}/members")]
pub async fn list_members(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<MemberResponse>>> {
    let id = project_id(&path)?;
    let members = state.projects_query.list_members(&id).await?;
    Ok(web::Json(members.iter().map(MemberResponse::from).collect()))
}

/// Register project routes; fixed segments precede `{id}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_project)
        .service(search_projects)
        .service(list_own_projects)
        .service(list_bookmarked_projects)
        .service(get_project)
        .service(update_project)
        .service(delete_project)
        .service(complete_project)
        .service(bookmark_project)
        .service(unbookmark_project)
        .service(list_members);
}

#[cfg(test)]
#[path = "projects_tests.rs"]
mod tests;

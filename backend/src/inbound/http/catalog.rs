//! Job and tech-stack dictionary handlers.
//!
//! ```text
//! POST /api/v1/jobs {"name":"Backend"}
//! GET  /api/v1/jobs?keyword=end&page=0&size=10
//! POST /api/v1/tech-stacks {"name":"Rust"}
//! GET  /api/v1/tech-stacks?keyword=ru
//! ```

use actix_web::{HttpResponse, get, post, web};
use pagination::Slice;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, Job, TechStack};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthenticatedUser;
use crate::inbound::http::schemas::SliceSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::PageQuery;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CatalogNameRequest {
    pub name: String,
}

/// Dictionary entry, shared by jobs and tech stacks.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct CatalogEntryResponse {
    pub id: String,
    pub name: String,
}

impl From<Job> for CatalogEntryResponse {
    fn from(job: Job) -> Self {
        Self {
            id: job.id().to_string(),
            name: job.name().to_owned(),
        }
    }
}

impl From<TechStack> for CatalogEntryResponse {
    fn from(stack: TechStack) -> Self {
        Self {
            id: stack.id().to_string(),
            name: stack.name().to_owned(),
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CatalogSearchQuery {
    /// Case-insensitive substring of the name.
    pub keyword: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl CatalogSearchQuery {
    fn page(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            size: self.size,
        }
    }
}

/// Register a job name.
#[utoipa::path(
    post,
    path = "/api/v1/jobs",
    request_body = CatalogNameRequest,
    responses(
        (status = 201, description = "Created", body = CatalogEntryResponse),
        (status = 400, description = "Blank name", body = Error),
        (status = 409, description = "Name already registered", body = Error)
    ),
    tags = ["catalog"],
    operation_id = "createJob"
)]
#[post("/jobs")]
pub async fn create_job(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    payload: web::Json<CatalogNameRequest>,
) -> ApiResult<HttpResponse> {
    let job = state.catalog.create_job(payload.into_inner().name).await?;
    Ok(HttpResponse::Created().json(CatalogEntryResponse::from(job)))
}

/// Search job names, shortest match first.
#[utoipa::path(
    get,
    path = "/api/v1/jobs",
    params(CatalogSearchQuery),
    responses((status = 200, description = "Matching jobs", body = SliceSchema<CatalogEntryResponse>)),
    tags = ["catalog"],
    operation_id = "searchJobs"
)]
#[get("/jobs")]
pub async fn search_jobs(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    query: web::Query<CatalogSearchQuery>,
) -> ApiResult<web::Json<Slice<CatalogEntryResponse>>> {
    let page = query.page().to_page_request()?;
    let query = query.into_inner();
    let slice = state.catalog_query.search_jobs(query.keyword, page).await?;
    Ok(web::Json(slice.map(CatalogEntryResponse::from)))
}

/// Register a tech-stack name.
#[utoipa::path(
    post,
    path = "/api/v1/tech-stacks",
    request_body = CatalogNameRequest,
    responses(
        (status = 201, description = "Created", body = CatalogEntryResponse),
        (status = 400, description = "Blank name", body = Error),
        (status = 409, description = "Name already registered", body = Error)
    ),
    tags = ["catalog"],
    operation_id = "createTechStack"
)]
#[post("/tech-stacks")]
pub async fn create_tech_stack(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    payload: web::Json<CatalogNameRequest>,
) -> ApiResult<HttpResponse> {
    let stack = state
        .catalog
        .create_tech_stack(payload.into_inner().name)
        .await?;
    Ok(HttpResponse::Created().json(CatalogEntryResponse::from(stack)))
}

/// Search tech-stack names, shortest match first.
#[utoipa::path(
    get,
    path = "/api/v1/tech-stacks",
    params(CatalogSearchQuery),
    responses((status = 200, description = "Matching tech stacks", body = SliceSchema<CatalogEntryResponse>)),
    tags = ["catalog"],
    operation_id = "searchTechStacks"
)]
#[get("/tech-stacks")]
pub async fn search_tech_stacks(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    query: web::Query<CatalogSearchQuery>,
) -> ApiResult<web::Json<Slice<CatalogEntryResponse>>> {
    let page = query.page().to_page_request()?;
    let query = query.into_inner();
    let slice = state
        .catalog_query
        .search_tech_stacks(query.keyword, page)
        .await?;
    Ok(web::Json(slice.map(CatalogEntryResponse::from)))
}

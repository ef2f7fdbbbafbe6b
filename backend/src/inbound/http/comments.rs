//! Project comment handlers.
//!
//! ```text
//! GET    /api/v1/projects/{id}/comments
//! POST   /api/v1/projects/{id}/comments {"content":"Still recruiting?","parentId":null}
//! PUT    /api/v1/comments/{id} {"content":"edited"}
//! DELETE /api/v1/comments/{id}
//! PUT    /api/v1/comments/{id}/like
//! DELETE /api/v1/comments/{id}/like
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CommentId, CommentThread, Error, ProjectComment};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthenticatedUser;
use crate::inbound::http::projects::project_id;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub content: String,
    /// Top-level comment this one replies to.
    pub parent_id: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct EditCommentRequest {
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub project_id: String,
    pub parent_id: Option<String>,
    pub user_id: String,
    pub content: String,
    pub liker_ids: Vec<String>,
    pub like_count: usize,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&ProjectComment> for CommentResponse {
    fn from(comment: &ProjectComment) -> Self {
        Self {
            id: comment.id().to_string(),
            project_id: comment.project_id().to_string(),
            parent_id: comment.parent_id().map(|id| id.to_string()),
            user_id: comment.user_id().to_string(),
            content: comment.content().to_owned(),
            liker_ids: comment.likers().iter().map(ToString::to_string).collect(),
            like_count: comment.likers().len(),
            is_deleted: comment.is_deleted(),
            created_at: comment.created_at(),
        }
    }
}

/// A top-level comment with its replies, oldest reply first.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadResponse {
    #[serde(flatten)]
    pub comment: CommentResponse,
    pub replies: Vec<CommentResponse>,
}

impl From<&CommentThread> for CommentThreadResponse {
    fn from(thread: &CommentThread) -> Self {
        Self {
            comment: CommentResponse::from(&thread.comment),
            replies: thread.replies.iter().map(CommentResponse::from).collect(),
        }
    }
}

fn comment_id(raw: &str, field: &'static str) -> Result<CommentId, Error> {
    parse_id(raw, FieldName::new(field))
}

/// List a project's comment threads, newest thread first.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{id}/comments",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 200, description = "Comment threads", body = [CommentThreadResponse]),
        (status = 400, description = "Malformed id", body = Error)
    ),
    tags = ["comments"],
    operation_id = "listComments"
)]
#[get("/projects/{id}/comments")]
pub async fn list_comments(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<CommentThreadResponse>>> {
    let id = project_id(&path)?;
    let threads = state.comments_query.list_threads(&id).await?;
    Ok(web::Json(
        threads.iter().map(CommentThreadResponse::from).collect(),
    ))
}

/// Comment on a project or reply to a top-level comment.
#[utoipa::path(
    post,
    path = "/api/v1/projects/{id}/comments",
    params(("id" = String, Path, description = "Project id")),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Created", body = CommentResponse),
        (status = 400, description = "Invalid content or parent", body = Error),
        (status = 404, description = "Project or parent not found", body = Error)
    ),
    tags = ["comments"],
    operation_id = "createComment"
)]
#[post("/projects/{id}/comments")]
pub async fn create_comment(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<CreateCommentRequest>,
) -> ApiResult<HttpResponse> {
    let id = project_id(&path)?;
    let CreateCommentRequest { content, parent_id } = payload.into_inner();
    let parent_id = parent_id
        .as_deref()
        .map(|raw| comment_id(raw, "parentId"))
        .transpose()?;
    let comment = state
        .comments
        .create_comment(user.user_id(), &id, parent_id, content)
        .await?;
    Ok(HttpResponse::Created().json(CommentResponse::from(&comment)))
}

/// Edit the caller's own comment.
#[utoipa::path(
    put,
    path = "/api/v1/comments/{id}",
    params(("id" = String, Path, description = "Comment id")),
    request_body = EditCommentRequest,
    responses(
        (status = 200, description = "Edited", body = CommentResponse),
        (status = 403, description = "Not the author", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["comments"],
    operation_id = "editComment"
)]
#[put("/comments/{id}")]
pub async fn edit_comment(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<EditCommentRequest>,
) -> ApiResult<web::Json<CommentResponse>> {
    let id = comment_id(&path, "id")?;
    let comment = state
        .comments
        .edit_comment(user.user_id(), &id, payload.into_inner().content)
        .await?;
    Ok(web::Json(CommentResponse::from(&comment)))
}

/// Soft-delete the caller's own comment.
#[utoipa::path(
    delete,
    path = "/api/v1/comments/{id}",
    params(("id" = String, Path, description = "Comment id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 403, description = "Not the author", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["comments"],
    operation_id = "deleteComment"
)]
#[delete("/comments/{id}")]
pub async fn delete_comment(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = comment_id(&path, "id")?;
    state.comments.delete_comment(user.user_id(), &id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Like a comment.
#[utoipa::path(
    put,
    path = "/api/v1/comments/{id}/like",
    params(("id" = String, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Liked", body = CommentResponse),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["comments"],
    operation_id = "likeComment"
)]
#[put("/comments/{id}/like")]
pub async fn like_comment(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<CommentResponse>> {
    let id = comment_id(&path, "id")?;
    let comment = state.comments.like_comment(user.user_id(), &id).await?;
    Ok(web::Json(CommentResponse::from(&comment)))
}

/// Withdraw a like.
#[utoipa::path(
    delete,
    path = "/api/v1/comments/{id}/like",
    params(("id" = String, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Unliked", body = CommentResponse),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["comments"],
    operation_id = "unlikeComment"
)]
#[delete("/comments/{id}/like")]
pub async fn unlike_comment(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<CommentResponse>> {
    let id = comment_id(&path, "id")?;
    let comment = state.comments.unlike_comment(user.user_id(), &id).await?;
    Ok(web::Json(CommentResponse::from(&comment)))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_comments)
        .service(create_comment)
        .service(edit_comment)
        .service(delete_comment)
        .service(like_comment)
        .service(unlike_comment);
}

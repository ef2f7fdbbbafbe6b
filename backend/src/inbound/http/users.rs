//! User profile handlers.
//!
//! ```text
//! GET    /api/v1/users/me
//! PUT    /api/v1/users/me {"nickname":"minji","introduction":"backend dev"}
//! DELETE /api/v1/users/me
//! GET    /api/v1/users/{id}
//! GET    /api/v1/users/nickname-availability?nickname=minji
//! ```

use actix_web::{HttpResponse, delete, get, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, User, UserId, UserProfile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

/// Full profile, returned only to its owner.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub nickname: String,
    pub phone_number: Option<String>,
    pub profile_image_url: Option<String>,
    pub birth_date: Option<String>,
    pub gender: Option<String>,
    pub introduction: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        let profile = user.profile();
        Self {
            id: user.id().to_string(),
            email: user.email().to_owned(),
            name: user.name().to_owned(),
            nickname: user.nickname().to_string(),
            phone_number: profile.phone_number.clone(),
            profile_image_url: profile.profile_image_url.clone(),
            birth_date: profile.birth_date.clone(),
            gender: profile.gender.clone(),
            introduction: profile.introduction.clone(),
            created_at: user.created_at(),
        }
    }
}

/// Profile fields visible to other users.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicUserResponse {
    pub id: String,
    pub nickname: String,
    pub profile_image_url: Option<String>,
    pub introduction: Option<String>,
}

impl From<&User> for PublicUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            nickname: user.nickname().to_string(),
            profile_image_url: user.profile().profile_image_url.clone(),
            introduction: user.profile().introduction.clone(),
        }
    }
}

/// Replacement profile. Omitted optional fields are cleared.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub nickname: String,
    pub phone_number: Option<String>,
    pub profile_image_url: Option<String>,
    pub birth_date: Option<String>,
    pub gender: Option<String>,
    pub introduction: Option<String>,
}

impl UpdateUserRequest {
    fn into_parts(self) -> (String, UserProfile) {
        let profile = UserProfile {
            phone_number: self.phone_number,
            profile_image_url: self.profile_image_url,
            birth_date: self.birth_date,
            gender: self.gender,
            introduction: self.introduction,
        };
        (self.nickname, profile)
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NicknameQuery {
    pub nickname: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NicknameAvailability {
    pub nickname: String,
    pub available: bool,
}

/// Fetch the caller's own profile.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Own profile", body = UserResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Account not found", body = Error)
    ),
    tags = ["users"],
    operation_id = "getMe"
)]
#[get("/users/me")]
pub async fn get_me(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<UserResponse>> {
    let found = state.users_query.get_user(user.user_id()).await?;
    Ok(web::Json(UserResponse::from(&found)))
}

/// Replace the caller's nickname and profile fields.
#[utoipa::path(
    put,
    path = "/api/v1/users/me",
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserResponse),
        (status = 400, description = "Invalid nickname", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 409, description = "Nickname already taken", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateMe"
)]
#[put("/users/me")]
pub async fn update_me(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let (nickname, profile) = payload.into_inner().into_parts();
    let updated = state
        .users
        .update_profile(user.user_id(), nickname, profile)
        .await?;
    Ok(web::Json(UserResponse::from(&updated)))
}

/// Soft-delete the caller's account.
#[utoipa::path(
    delete,
    path = "/api/v1/users/me",
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteMe"
)]
#[delete("/users/me")]
pub async fn delete_me(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    state.users.delete_account(user.user_id()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Check whether a nickname is free to claim.
#[utoipa::path(
    get,
    path = "/api/v1/users/nickname-availability",
    params(NicknameQuery),
    responses(
        (status = 200, description = "Availability", body = NicknameAvailability),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["users"],
    operation_id = "nicknameAvailability"
)]
#[get("/users/nickname-availability")]
pub async fn nickname_availability(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    query: web::Query<NicknameQuery>,
) -> ApiResult<web::Json<NicknameAvailability>> {
    let NicknameQuery { nickname } = query.into_inner();
    let available = state.users_query.is_nickname_available(&nickname).await?;
    Ok(web::Json(NicknameAvailability {
        nickname,
        available,
    }))
}

/// Fetch another user's public profile.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Public profile", body = PublicUserResponse),
        (status = 400, description = "Malformed id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "User not found", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<PublicUserResponse>> {
    let user_id: UserId = parse_id(&path, FieldName::new("id"))?;
    let found = state.users_query.get_user(&user_id).await?;
    Ok(web::Json(PublicUserResponse::from(&found)))
}

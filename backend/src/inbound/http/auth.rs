//! OAuth sign-in handler.
//!
//! ```text
//! POST /api/v1/auth/oauth/google {"code":"4/0Ad...","redirectUri":"https://pmeet.app/callback"}
//! ```

use actix_web::{HttpResponse, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::LoginOutcome;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_field};

/// Authorisation code returned to the client by the provider redirect.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OAuthLoginRequest {
    pub code: String,
    pub redirect_uri: String,
}

/// Issued bearer token and whether the account was created by this call.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_id: String,
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
    pub is_new_user: bool,
}

impl From<LoginOutcome> for LoginResponse {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            user_id: outcome.user_id.to_string(),
            access_token: outcome.access_token.token,
            expires_at: outcome.access_token.expires_at,
            is_new_user: outcome.is_new_user,
        }
    }
}

/// Exchange an OAuth authorisation code for a pmeet access token.
#[utoipa::path(
    post,
    path = "/api/v1/auth/oauth/{provider}",
    params(("provider" = String, Path, description = "Configured provider key, e.g. google")),
    request_body = OAuthLoginRequest,
    responses(
        (status = 200, description = "Signed in", body = LoginResponse),
        (status = 400, description = "Invalid request or unknown provider", body = Error),
        (status = 401, description = "Provider rejected the code", body = Error),
        (status = 503, description = "Provider unreachable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "oauthLogin",
    security([])
)]
#[post("/auth/oauth/{provider}")]
pub async fn oauth_login(
    state: web::Data<HttpState>,
    provider: web::Path<String>,
    payload: web::Json<OAuthLoginRequest>,
) -> ApiResult<HttpResponse> {
    let OAuthLoginRequest { code, redirect_uri } = payload.into_inner();
    if code.trim().is_empty() {
        return Err(invalid_field(FieldName::new("code"), "code must not be empty"));
    }
    let outcome = state
        .login
        .login_with_oauth(&provider, &code, &redirect_uri)
        .await?;
    Ok(HttpResponse::Ok().json(LoginResponse::from(outcome)))
}

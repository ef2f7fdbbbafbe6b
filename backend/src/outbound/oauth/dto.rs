//! DTOs for provider token and profile responses.
//!
//! Providers disagree on where the profile fields live, so the profile DTO
//! accepts the flat shape and the nested `kakao_account` / `response`
//! shapes and resolves them in one pass.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct TokenResponseDto {
    pub(super) access_token: String,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct ProfileFieldsDto {
    pub(super) email: Option<String>,
    pub(super) name: Option<String>,
    pub(super) nickname: Option<String>,
    #[serde(default)]
    pub(super) profile: Option<NestedProfileDto>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct NestedProfileDto {
    pub(super) nickname: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ProfileResponseDto {
    #[serde(flatten)]
    pub(super) top: ProfileFieldsDto,
    #[serde(default)]
    pub(super) kakao_account: Option<ProfileFieldsDto>,
    #[serde(default)]
    pub(super) response: Option<ProfileFieldsDto>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

impl ProfileFieldsDto {
    fn display_name(self) -> Option<String> {
        non_blank(self.name)
            .or_else(|| non_blank(self.nickname))
            .or_else(|| self.profile.and_then(|profile| non_blank(profile.nickname)))
    }
}

impl ProfileResponseDto {
    /// Resolve `(email, name)`; the name falls back to the email local part.
    pub(super) fn into_identity(self) -> Result<(String, String), String> {
        let nested = self.kakao_account.or(self.response).unwrap_or_default();
        let email = non_blank(self.top.email.clone())
            .or_else(|| non_blank(nested.email.clone()))
            .ok_or_else(|| "profile is missing an email address".to_owned())?;
        let name = self
            .top
            .display_name()
            .or_else(|| nested.display_name())
            .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_owned());
        Ok((email, name))
    }
}

//! Stored document shapes and their conversions to domain aggregates.
//!
//! Identifiers are stored as their string form in `_id` and in every
//! reference field, so lookups can join on plain string equality. Field names
//! are camelCase; the criteria and pipeline modules refer to them by name.

use std::fmt::Display;
use std::str::FromStr;

use bson::DateTime as BsonDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::ports::RepositoryError;
use crate::domain::{
    ApplicantProfile, Job, JobExperience, Nickname, Notification, NotificationType, Project,
    ProjectBookmark, ProjectComment, ProjectExperience, ProjectMember, ProjectTryout,
    Recruitment, Resume, ResumeBookmark, ResumeDraft, ResumeOwner, TechStack, TryoutStatus, User,
    UserProfile,
};

use super::error_mapping::map_decode_error;

fn parse<T>(raw: &str) -> Result<T, RepositoryError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse::<T>().map_err(map_decode_error)
}

fn parse_opt<T>(raw: Option<&str>) -> Result<Option<T>, RepositoryError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.map(parse).transpose()
}

fn parse_all<T>(raw: &[String]) -> Result<Vec<T>, RepositoryError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.iter().map(|id| parse(id)).collect()
}

// ---- projects ----

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RecruitmentDocument {
    pub job_name: String,
    pub number_of_recruitment: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProjectBookmarkDocument {
    pub user_id: String,
    pub added_at: BsonDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProjectDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub start_date: BsonDateTime,
    pub end_date: BsonDateTime,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub tech_stacks: Vec<String>,
    #[serde(default)]
    pub recruitments: Vec<RecruitmentDocument>,
    #[serde(default)]
    pub description: String,
    pub is_completed: bool,
    #[serde(default)]
    pub bookmarks: Vec<ProjectBookmarkDocument>,
    pub created_at: BsonDateTime,
    pub updated_at: BsonDateTime,
}

impl From<&Project> for ProjectDocument {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.to_string(),
            user_id: project.user_id.to_string(),
            title: project.title.clone(),
            start_date: BsonDateTime::from_chrono(project.start_date),
            end_date: BsonDateTime::from_chrono(project.end_date),
            thumbnail_url: project.thumbnail_url.clone(),
            tech_stacks: project.tech_stacks.clone(),
            recruitments: project
                .recruitments
                .iter()
                .map(|r| RecruitmentDocument {
                    job_name: r.job_name.clone(),
                    number_of_recruitment: r.number_of_recruitment,
                })
                .collect(),
            description: project.description.clone(),
            is_completed: project.is_completed,
            bookmarks: project
                .bookmarks
                .iter()
                .map(|b| ProjectBookmarkDocument {
                    user_id: b.user_id.to_string(),
                    added_at: BsonDateTime::from_chrono(b.added_at),
                })
                .collect(),
            created_at: BsonDateTime::from_chrono(project.created_at),
            updated_at: BsonDateTime::from_chrono(project.updated_at),
        }
    }
}

impl TryFrom<ProjectDocument> for Project {
    type Error = RepositoryError;

    fn try_from(doc: ProjectDocument) -> Result<Self, Self::Error> {
        let bookmarks = doc
            .bookmarks
            .iter()
            .map(|b| {
                Ok(ProjectBookmark {
                    user_id: parse(&b.user_id)?,
                    added_at: b.added_at.to_chrono(),
                })
            })
            .collect::<Result<Vec<_>, RepositoryError>>()?;
        Ok(Self {
            id: parse(&doc.id)?,
            user_id: parse(&doc.user_id)?,
            title: doc.title,
            start_date: doc.start_date.to_chrono(),
            end_date: doc.end_date.to_chrono(),
            thumbnail_url: doc.thumbnail_url,
            tech_stacks: doc.tech_stacks,
            recruitments: doc
                .recruitments
                .into_iter()
                .map(|r| Recruitment {
                    job_name: r.job_name,
                    number_of_recruitment: r.number_of_recruitment,
                })
                .collect(),
            description: doc.description,
            is_completed: doc.is_completed,
            bookmarks,
            created_at: doc.created_at.to_chrono(),
            updated_at: doc.updated_at.to_chrono(),
        })
    }
}

// ---- comments ----

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub parent_id: Option<String>,
    pub project_id: String,
    pub user_id: String,
    pub content: String,
    #[serde(default)]
    pub likers: Vec<String>,
    pub created_at: BsonDateTime,
    pub is_deleted: bool,
}

impl From<&ProjectComment> for CommentDocument {
    fn from(comment: &ProjectComment) -> Self {
        Self {
            id: comment.id.to_string(),
            parent_id: comment.parent_id.map(|id| id.to_string()),
            project_id: comment.project_id.to_string(),
            user_id: comment.user_id.to_string(),
            content: comment.content.clone(),
            likers: comment.likers.iter().map(ToString::to_string).collect(),
            created_at: BsonDateTime::from_chrono(comment.created_at),
            is_deleted: comment.is_deleted,
        }
    }
}

impl TryFrom<CommentDocument> for ProjectComment {
    type Error = RepositoryError;

    fn try_from(doc: CommentDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse(&doc.id)?,
            parent_id: parse_opt(doc.parent_id.as_deref())?,
            project_id: parse(&doc.project_id)?,
            user_id: parse(&doc.user_id)?,
            content: doc.content,
            likers: parse_all(&doc.likers)?,
            created_at: doc.created_at.to_chrono(),
            is_deleted: doc.is_deleted,
        })
    }
}

// ---- tryouts and members ----

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TryoutDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub resume_id: String,
    pub user_id: String,
    pub user_nickname: String,
    #[serde(default)]
    pub user_self_description: Option<String>,
    #[serde(default)]
    pub user_profile_image_url: Option<String>,
    pub project_id: String,
    pub position_name: String,
    pub tryout_status: String,
    pub created_at: BsonDateTime,
}

fn applicant(
    user_id: &str,
    nickname: String,
    self_description: Option<String>,
    profile_image_url: Option<String>,
) -> Result<ApplicantProfile, RepositoryError> {
    Ok(ApplicantProfile {
        user_id: parse(user_id)?,
        nickname,
        self_description,
        profile_image_url,
    })
}

impl From<&ProjectTryout> for TryoutDocument {
    fn from(tryout: &ProjectTryout) -> Self {
        Self {
            id: tryout.id.to_string(),
            resume_id: tryout.resume_id.to_string(),
            user_id: tryout.applicant.user_id.to_string(),
            user_nickname: tryout.applicant.nickname.clone(),
            user_self_description: tryout.applicant.self_description.clone(),
            user_profile_image_url: tryout.applicant.profile_image_url.clone(),
            project_id: tryout.project_id.to_string(),
            position_name: tryout.position_name.clone(),
            tryout_status: tryout.status.as_str().to_owned(),
            created_at: BsonDateTime::from_chrono(tryout.created_at),
        }
    }
}

impl TryFrom<TryoutDocument> for ProjectTryout {
    type Error = RepositoryError;

    fn try_from(doc: TryoutDocument) -> Result<Self, Self::Error> {
        let status = TryoutStatus::parse(&doc.tryout_status).ok_or_else(|| {
            RepositoryError::corrupt(format!("unknown tryout status `{}`", doc.tryout_status))
        })?;
        Ok(Self {
            id: parse(&doc.id)?,
            resume_id: parse(&doc.resume_id)?,
            applicant: applicant(
                &doc.user_id,
                doc.user_nickname,
                doc.user_self_description,
                doc.user_profile_image_url,
            )?,
            project_id: parse(&doc.project_id)?,
            position_name: doc.position_name,
            status,
            created_at: doc.created_at.to_chrono(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MemberDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub resume_id: String,
    #[serde(default)]
    pub tryout_id: Option<String>,
    pub user_id: String,
    pub user_nickname: String,
    #[serde(default)]
    pub user_self_description: Option<String>,
    #[serde(default)]
    pub user_profile_image_url: Option<String>,
    pub position_name: String,
    pub project_id: String,
    pub created_at: BsonDateTime,
}

impl From<&ProjectMember> for MemberDocument {
    fn from(member: &ProjectMember) -> Self {
        Self {
            id: member.id.to_string(),
            resume_id: member.resume_id.to_string(),
            tryout_id: member.tryout_id.map(|id| id.to_string()),
            user_id: member.member.user_id.to_string(),
            user_nickname: member.member.nickname.clone(),
            user_self_description: member.member.self_description.clone(),
            user_profile_image_url: member.member.profile_image_url.clone(),
            position_name: member.position_name.clone(),
            project_id: member.project_id.to_string(),
            created_at: BsonDateTime::from_chrono(member.created_at),
        }
    }
}

impl TryFrom<MemberDocument> for ProjectMember {
    type Error = RepositoryError;

    fn try_from(doc: MemberDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse(&doc.id)?,
            resume_id: parse(&doc.resume_id)?,
            tryout_id: parse_opt(doc.tryout_id.as_deref())?,
            member: applicant(
                &doc.user_id,
                doc.user_nickname,
                doc.user_self_description,
                doc.user_profile_image_url,
            )?,
            position_name: doc.position_name,
            project_id: parse(&doc.project_id)?,
            created_at: doc.created_at.to_chrono(),
        })
    }
}

// ---- resumes ----

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JobExperienceDocument {
    pub company_name: String,
    pub job_name: String,
    pub start_date: BsonDateTime,
    #[serde(default)]
    pub end_date: Option<BsonDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProjectExperienceDocument {
    pub project_name: String,
    pub start_date: BsonDateTime,
    #[serde(default)]
    pub end_date: Option<BsonDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResumeDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub is_active: bool,
    pub user_id: String,
    pub user_nickname: String,
    pub user_email: String,
    #[serde(default)]
    pub user_profile_image_url: Option<String>,
    #[serde(default)]
    pub user_gender: Option<String>,
    #[serde(default)]
    pub user_birth_date: Option<String>,
    #[serde(default)]
    pub user_phone_number: Option<String>,
    #[serde(default)]
    pub desired_jobs: Vec<String>,
    #[serde(default)]
    pub tech_stacks: Vec<String>,
    #[serde(default)]
    pub job_experiences: Vec<JobExperienceDocument>,
    #[serde(default)]
    pub project_experiences: Vec<ProjectExperienceDocument>,
    #[serde(default)]
    pub portfolio_urls: Vec<String>,
    #[serde(default)]
    pub self_description: String,
    pub created_at: BsonDateTime,
    pub updated_at: BsonDateTime,
}

impl From<&Resume> for ResumeDocument {
    fn from(resume: &Resume) -> Self {
        let owner = &resume.owner;
        let content = &resume.content;
        Self {
            id: resume.id.to_string(),
            title: content.title.clone(),
            is_active: resume.is_active,
            user_id: owner.user_id.to_string(),
            user_nickname: owner.nickname.clone(),
            user_email: owner.email.clone(),
            user_profile_image_url: owner.profile_image_url.clone(),
            user_gender: owner.gender.clone(),
            user_birth_date: owner.birth_date.clone(),
            user_phone_number: owner.phone_number.clone(),
            desired_jobs: content.desired_jobs.clone(),
            tech_stacks: content.tech_stacks.clone(),
            job_experiences: content
                .job_experiences
                .iter()
                .map(|e| JobExperienceDocument {
                    company_name: e.company_name.clone(),
                    job_name: e.job_name.clone(),
                    start_date: BsonDateTime::from_chrono(e.start_date),
                    end_date: e.end_date.map(BsonDateTime::from_chrono),
                })
                .collect(),
            project_experiences: content
                .project_experiences
                .iter()
                .map(|e| ProjectExperienceDocument {
                    project_name: e.project_name.clone(),
                    start_date: BsonDateTime::from_chrono(e.start_date),
                    end_date: e.end_date.map(BsonDateTime::from_chrono),
                })
                .collect(),
            portfolio_urls: content.portfolio_urls.clone(),
            self_description: content.self_description.clone(),
            created_at: BsonDateTime::from_chrono(resume.created_at),
            updated_at: BsonDateTime::from_chrono(resume.updated_at),
        }
    }
}

impl TryFrom<ResumeDocument> for Resume {
    type Error = RepositoryError;

    fn try_from(doc: ResumeDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse(&doc.id)?,
            owner: ResumeOwner {
                user_id: parse(&doc.user_id)?,
                nickname: doc.user_nickname,
                email: doc.user_email,
                profile_image_url: doc.user_profile_image_url,
                gender: doc.user_gender,
                birth_date: doc.user_birth_date,
                phone_number: doc.user_phone_number,
            },
            is_active: doc.is_active,
            content: ResumeDraft {
                title: doc.title,
                desired_jobs: doc.desired_jobs,
                tech_stacks: doc.tech_stacks,
                job_experiences: doc
                    .job_experiences
                    .into_iter()
                    .map(|e| JobExperience {
                        company_name: e.company_name,
                        job_name: e.job_name,
                        start_date: e.start_date.to_chrono(),
                        end_date: e.end_date.map(BsonDateTime::to_chrono),
                    })
                    .collect(),
                project_experiences: doc
                    .project_experiences
                    .into_iter()
                    .map(|e| ProjectExperience {
                        project_name: e.project_name,
                        start_date: e.start_date.to_chrono(),
                        end_date: e.end_date.map(BsonDateTime::to_chrono),
                    })
                    .collect(),
                portfolio_urls: doc.portfolio_urls,
                self_description: doc.self_description,
            },
            created_at: doc.created_at.to_chrono(),
            updated_at: doc.updated_at.to_chrono(),
        })
    }
}

// ---- users ----

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResumeBookmarkDocument {
    pub resume_id: String,
    pub added_at: BsonDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub provider: Option<String>,
    pub email: String,
    pub name: String,
    pub nickname: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub introduction: Option<String>,
    #[serde(default)]
    pub bookmarks: Vec<ResumeBookmarkDocument>,
    pub is_deleted: bool,
    pub created_at: BsonDateTime,
}

impl From<&User> for UserDocument {
    fn from(user: &User) -> Self {
        let profile = &user.profile;
        Self {
            id: user.id.to_string(),
            provider: user.provider.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            nickname: user.nickname.to_string(),
            phone_number: profile.phone_number.clone(),
            profile_image_url: profile.profile_image_url.clone(),
            birth_date: profile.birth_date.clone(),
            gender: profile.gender.clone(),
            introduction: profile.introduction.clone(),
            bookmarks: user
                .resume_bookmarks
                .iter()
                .map(|b| ResumeBookmarkDocument {
                    resume_id: b.resume_id.to_string(),
                    added_at: BsonDateTime::from_chrono(b.added_at),
                })
                .collect(),
            is_deleted: user.is_deleted,
            created_at: BsonDateTime::from_chrono(user.created_at),
        }
    }
}

impl TryFrom<UserDocument> for User {
    type Error = RepositoryError;

    fn try_from(doc: UserDocument) -> Result<Self, Self::Error> {
        let resume_bookmarks = doc
            .bookmarks
            .iter()
            .map(|b| {
                Ok(ResumeBookmark {
                    resume_id: parse(&b.resume_id)?,
                    added_at: b.added_at.to_chrono(),
                })
            })
            .collect::<Result<Vec<_>, RepositoryError>>()?;
        Ok(Self {
            id: parse(&doc.id)?,
            provider: doc.provider,
            email: doc.email,
            name: doc.name,
            nickname: Nickname::new(doc.nickname).map_err(map_decode_error)?,
            profile: UserProfile {
                phone_number: doc.phone_number,
                profile_image_url: doc.profile_image_url,
                birth_date: doc.birth_date,
                gender: doc.gender,
                introduction: doc.introduction,
            },
            resume_bookmarks,
            is_deleted: doc.is_deleted,
            created_at: doc.created_at.to_chrono(),
        })
    }
}

/// Per-base counter backing generated nickname suffixes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CounterDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub seq: i64,
}

// ---- notifications ----

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NotificationDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub target_user_id: String,
    #[serde(default)]
    pub project_id: Option<String>,
    pub is_read: bool,
    pub created_at: BsonDateTime,
}

impl From<&Notification> for NotificationDocument {
    fn from(notification: &Notification) -> Self {
        Self {
            id: notification.id.to_string(),
            kind: notification.kind.as_str().to_owned(),
            target_user_id: notification.target_user_id.to_string(),
            project_id: notification.project_id.map(|id| id.to_string()),
            is_read: notification.is_read,
            created_at: BsonDateTime::from_chrono(notification.created_at),
        }
    }
}

impl TryFrom<NotificationDocument> for Notification {
    type Error = RepositoryError;

    fn try_from(doc: NotificationDocument) -> Result<Self, Self::Error> {
        let kind = NotificationType::parse(&doc.kind).ok_or_else(|| {
            RepositoryError::corrupt(format!("unknown notification type `{}`", doc.kind))
        })?;
        Ok(Self {
            id: parse(&doc.id)?,
            kind,
            target_user_id: parse(&doc.target_user_id)?,
            project_id: parse_opt(doc.project_id.as_deref())?,
            is_read: doc.is_read,
            created_at: doc.created_at.to_chrono(),
        })
    }
}

// ---- catalog ----

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct NamedDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

impl From<&Job> for NamedDocument {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id.to_string(),
            name: job.name.clone(),
        }
    }
}

impl From<&TechStack> for NamedDocument {
    fn from(tech_stack: &TechStack) -> Self {
        Self {
            id: tech_stack.id.to_string(),
            name: tech_stack.name.clone(),
        }
    }
}

impl TryFrom<NamedDocument> for Job {
    type Error = RepositoryError;

    fn try_from(doc: NamedDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse(&doc.id)?,
            name: doc.name,
        })
    }
}

impl TryFrom<NamedDocument> for TechStack {
    type Error = RepositoryError;

    fn try_from(doc: NamedDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse(&doc.id)?,
            name: doc.name,
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::{CommentId, ProjectId, UserId};
    use crate::test_support::{fixture_timestamp, sample_project, sample_resume, sample_user};

    #[rstest]
    fn project_document_uses_searchable_field_names() {
        let mut project = sample_project(UserId::random());
        project.add_bookmark(UserId::random(), fixture_timestamp());
        let doc = bson::to_document(&ProjectDocument::from(&project)).expect("encodes");

        assert!(doc.contains_key("_id"));
        assert!(doc.contains_key("techStacks"));
        assert!(doc.contains_key("isCompleted"));
        let recruitment = doc
            .get_array("recruitments")
            .expect("recruitments")
            .first()
            .and_then(bson::Bson::as_document)
            .expect("first recruitment");
        assert!(recruitment.contains_key("jobName"));
    }

    #[rstest]
    fn stored_project_decodes_back() {
        let project = sample_project(UserId::random());
        let decoded = Project::try_from(ProjectDocument::from(&project)).expect("decodes");
        assert_eq!(decoded, project);
    }

    #[rstest]
    fn resume_document_flattens_owner_nickname() {
        let resume = sample_resume(UserId::random());
        let doc = bson::to_document(&ResumeDocument::from(&resume)).expect("encodes");
        assert_eq!(doc.get_str("userNickname"), Ok("writer"));
        assert!(doc.contains_key("desiredJobs"));
    }

    #[rstest]
    fn corrupt_reference_is_reported() {
        let comment = ProjectComment::new(
            CommentId::random(),
            ProjectId::random(),
            None,
            UserId::random(),
            "hi".to_owned(),
            fixture_timestamp(),
        );
        let mut doc = CommentDocument::from(&comment);
        doc.project_id = "not-a-uuid".to_owned();
        let err = ProjectComment::try_from(doc).expect_err("corrupt id");
        assert!(matches!(err, RepositoryError::Corrupt { .. }));
    }

    #[rstest]
    fn unknown_tryout_status_is_corrupt() {
        let user = sample_user(UserId::random(), "minji");
        let doc = UserDocument::from(&user);
        assert_eq!(doc.nickname, "minji");

        let tryout = TryoutDocument {
            id: uuid::Uuid::new_v4().to_string(),
            resume_id: uuid::Uuid::new_v4().to_string(),
            user_id: uuid::Uuid::new_v4().to_string(),
            user_nickname: "minji".to_owned(),
            user_self_description: None,
            user_profile_image_url: None,
            project_id: uuid::Uuid::new_v4().to_string(),
            position_name: "Backend".to_owned(),
            tryout_status: "PENDING".to_owned(),
            created_at: BsonDateTime::from_chrono(fixture_timestamp()),
        };
        let err = ProjectTryout::try_from(tryout).expect_err("unknown status");
        assert!(matches!(err, RepositoryError::Corrupt { .. }));
    }
}

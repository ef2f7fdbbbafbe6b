//! Resumes users apply to projects with.

use chrono::{DateTime, Utc};

use super::search::{DateRange, ensure_ordered};
use super::{ResumeId, UserId};

/// Suffix appended to the title of a copied resume.
pub const COPY_TITLE_SUFFIX: &str = " (복사본)";

/// Validation failures for resume content.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResumeValidationError {
    /// Title was blank.
    #[error("resume title must not be empty")]
    EmptyTitle,
    /// An experience entry ends before it starts.
    #[error("experience `{name}` must end after it starts")]
    InvalidExperienceRange {
        /// Company or project name of the entry.
        name: String,
    },
}

/// Employment history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobExperience {
    pub company_name: String,
    pub job_name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
}

impl DateRange for JobExperience {
    fn start(&self) -> DateTime<Utc> {
        self.start_date
    }

    fn end(&self) -> Option<DateTime<Utc>> {
        self.end_date
    }
}

/// Side project or past project entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectExperience {
    pub project_name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
}

impl DateRange for ProjectExperience {
    fn start(&self) -> DateTime<Utc> {
        self.start_date
    }

    fn end(&self) -> Option<DateTime<Utc>> {
        self.end_date
    }
}

/// Owner fields copied onto the resume so listings need no user lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeOwner {
    pub user_id: UserId,
    pub nickname: String,
    pub email: String,
    pub profile_image_url: Option<String>,
    pub gender: Option<String>,
    pub birth_date: Option<String>,
    pub phone_number: Option<String>,
}

/// Editable resume content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResumeDraft {
    pub title: String,
    pub desired_jobs: Vec<String>,
    pub tech_stacks: Vec<String>,
    pub job_experiences: Vec<JobExperience>,
    pub project_experiences: Vec<ProjectExperience>,
    pub portfolio_urls: Vec<String>,
    pub self_description: String,
}

impl ResumeDraft {
    fn validate(&self) -> Result<(), ResumeValidationError> {
        if self.title.trim().is_empty() {
            return Err(ResumeValidationError::EmptyTitle);
        }
        for job in &self.job_experiences {
            ensure_ordered(job).map_err(|_| ResumeValidationError::InvalidExperienceRange {
                name: job.company_name.clone(),
            })?;
        }
        for project in &self.project_experiences {
            ensure_ordered(project).map_err(|_| ResumeValidationError::InvalidExperienceRange {
                name: project.project_name.clone(),
            })?;
        }
        Ok(())
    }
}

/// A user's resume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resume {
    pub(crate) id: ResumeId,
    pub(crate) owner: ResumeOwner,
    pub(crate) is_active: bool,
    pub(crate) content: ResumeDraft,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl Resume {
    /// Write a new, inactive resume.
    pub fn create(
        id: ResumeId,
        owner: ResumeOwner,
        draft: ResumeDraft,
        now: DateTime<Utc>,
    ) -> Result<Self, ResumeValidationError> {
        draft.validate()?;
        Ok(Self {
            id,
            owner,
            is_active: false,
            content: draft,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace the content.
    pub fn update(
        &mut self,
        draft: ResumeDraft,
        now: DateTime<Utc>,
    ) -> Result<(), ResumeValidationError> {
        draft.validate()?;
        self.content = draft;
        self.updated_at = now;
        Ok(())
    }

    /// Refresh the denormalised owner fields.
    pub fn refresh_owner(&mut self, owner: ResumeOwner) {
        self.owner = owner;
    }

    /// Publish the resume to searches.
    pub fn activate(&mut self, now: DateTime<Utc>) {
        self.is_active = true;
        self.updated_at = now;
    }

    /// Hide the resume from searches.
    pub fn deactivate(&mut self, now: DateTime<Utc>) {
        self.is_active = false;
        self.updated_at = now;
    }

    /// Duplicate into a new inactive resume with a marked title.
    pub fn copy_as(&self, id: ResumeId, now: DateTime<Utc>) -> Self {
        let mut content = self.content.clone();
        content.title.push_str(COPY_TITLE_SUFFIX);
        Self {
            id,
            owner: self.owner.clone(),
            is_active: false,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `user_id` wrote the resume.
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.owner.user_id == *user_id
    }

    /// Resume identifier.
    pub fn id(&self) -> ResumeId {
        self.id
    }

    /// Snapshot of the owner's public fields.
    pub fn owner(&self) -> &ResumeOwner {
        &self.owner
    }

    /// Whether the resume appears in searches.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Validated resume content.
    pub fn content(&self) -> &ResumeDraft {
        &self.content
    }

    /// Resume title.
    pub fn title(&self) -> &str {
        &self.content.title
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification timestamp.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

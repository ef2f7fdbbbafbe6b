//! Project postings, their recruitment slots and bookmarks.

use chrono::{DateTime, Utc};

use super::search::{DateRange, ensure_ordered};
use super::{ProjectId, UserId};

/// Validation failures raised while building or updating a project.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProjectValidationError {
    /// Title was blank.
    #[error("project title must not be empty")]
    EmptyTitle,
    /// End date does not follow start date.
    #[error("project end date must be after its start date")]
    InvalidDateRange,
    /// No recruitment slot was supplied.
    #[error("a project must recruit for at least one position")]
    NoRecruitments,
    /// A recruitment slot had a blank job name.
    #[error("recruitment job name must not be empty")]
    EmptyJobName,
    /// A recruitment slot asked for zero people.
    #[error("recruitment for `{job_name}` must ask for at least one member")]
    ZeroRecruitment {
        /// Offending job name.
        job_name: String,
    },
}

/// One recruited position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recruitment {
    /// Job name as listed in the job catalog.
    pub job_name: String,
    /// Number of people sought.
    pub number_of_recruitment: u32,
}

/// A user's bookmark on a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectBookmark {
    /// Bookmarking user.
    pub user_id: UserId,
    /// When the bookmark was last added.
    pub added_at: DateTime<Utc>,
}

/// Caller-supplied project content, validated by [`Project::create`] and
/// [`Project::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    pub title: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub thumbnail_url: Option<String>,
    pub tech_stacks: Vec<String>,
    pub recruitments: Vec<Recruitment>,
    pub description: String,
}

impl DateRange for ProjectDraft {
    fn start(&self) -> DateTime<Utc> {
        self.start_date
    }

    fn end(&self) -> Option<DateTime<Utc>> {
        Some(self.end_date)
    }
}

impl ProjectDraft {
    fn validate(&self) -> Result<(), ProjectValidationError> {
        if self.title.trim().is_empty() {
            return Err(ProjectValidationError::EmptyTitle);
        }
        ensure_ordered(self).map_err(|_| ProjectValidationError::InvalidDateRange)?;
        if self.recruitments.is_empty() {
            return Err(ProjectValidationError::NoRecruitments);
        }
        for recruitment in &self.recruitments {
            if recruitment.job_name.trim().is_empty() {
                return Err(ProjectValidationError::EmptyJobName);
            }
            if recruitment.number_of_recruitment == 0 {
                return Err(ProjectValidationError::ZeroRecruitment {
                    job_name: recruitment.job_name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// A project posting.
///
/// ## Invariants
/// - At most one bookmark per user; re-bookmarking refreshes `added_at` in
///   place and keeps the entry's position.
/// - `updated_at` moves forward on every mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub(crate) id: ProjectId,
    pub(crate) user_id: UserId,
    pub(crate) title: String,
    pub(crate) start_date: DateTime<Utc>,
    pub(crate) end_date: DateTime<Utc>,
    pub(crate) thumbnail_url: Option<String>,
    pub(crate) tech_stacks: Vec<String>,
    pub(crate) recruitments: Vec<Recruitment>,
    pub(crate) description: String,
    pub(crate) is_completed: bool,
    pub(crate) bookmarks: Vec<ProjectBookmark>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl Project {
    /// Create a new, open project owned by `owner`.
    ///
    /// # Examples
    /// ```
    /// use chrono::{Duration, Utc};
    /// use pmeet::domain::{Project, ProjectDraft, ProjectId, Recruitment, UserId};
    ///
    /// let now = Utc::now();
    /// let draft = ProjectDraft {
    ///     title: "pmeet".to_owned(),
    ///     start_date: now,
    ///     end_date: now + Duration::days(30),
    ///     thumbnail_url: None,
    ///     tech_stacks: vec!["Rust".to_owned()],
    ///     recruitments: vec![Recruitment { job_name: "Backend".to_owned(), number_of_recruitment: 2 }],
    ///     description: String::new(),
    /// };
    /// let project = Project::create(ProjectId::random(), UserId::random(), draft, now)
    ///     .expect("valid draft");
    /// assert!(!project.is_completed());
    /// ```
    pub fn create(
        id: ProjectId,
        owner: UserId,
        draft: ProjectDraft,
        now: DateTime<Utc>,
    ) -> Result<Self, ProjectValidationError> {
        draft.validate()?;
        Ok(Self {
            id,
            user_id: owner,
            title: draft.title,
            start_date: draft.start_date,
            end_date: draft.end_date,
            thumbnail_url: draft.thumbnail_url,
            tech_stacks: draft.tech_stacks,
            recruitments: draft.recruitments,
            description: draft.description,
            is_completed: false,
            bookmarks: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace the editable content.
    pub fn update(
        &mut self,
        draft: ProjectDraft,
        now: DateTime<Utc>,
    ) -> Result<(), ProjectValidationError> {
        draft.validate()?;
        self.title = draft.title;
        self.start_date = draft.start_date;
        self.end_date = draft.end_date;
        self.thumbnail_url = draft.thumbnail_url;
        self.tech_stacks = draft.tech_stacks;
        self.recruitments = draft.recruitments;
        self.description = draft.description;
        self.updated_at = now;
        Ok(())
    }

    /// Mark the project as finished.
    pub fn complete(&mut self, now: DateTime<Utc>) {
        self.is_completed = true;
        self.updated_at = now;
    }

    /// Bookmark for `user_id`, refreshing the timestamp of an existing entry.
    pub fn add_bookmark(&mut self, user_id: UserId, now: DateTime<Utc>) {
        let fresh = ProjectBookmark {
            user_id,
            added_at: now,
        };
        match self.bookmarks.iter_mut().find(|b| b.user_id == user_id) {
            Some(existing) => *existing = fresh,
            None => self.bookmarks.push(fresh),
        }
        self.updated_at = now;
    }

    /// Remove every bookmark held by `user_id`. Missing bookmarks are ignored.
    pub fn delete_bookmark(&mut self, user_id: &UserId, now: DateTime<Utc>) {
        self.bookmarks.retain(|b| b.user_id != *user_id);
        self.updated_at = now;
    }

    /// Whether `user_id` bookmarked the project.
    pub fn is_bookmarked_by(&self, user_id: &UserId) -> bool {
        self.bookmarks.iter().any(|b| b.user_id == *user_id)
    }

    /// Whether `user_id` owns the project.
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.user_id == *user_id
    }

    /// Whether the project recruits for `job_name`.
    pub fn recruits(&self, job_name: &str) -> bool {
        self.recruitments.iter().any(|r| r.job_name == job_name)
    }

    /// Project identifier.
    pub fn id(&self) -> ProjectId {
        self.id
    }

    /// Owner who posted the project.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Project title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Planned start.
    pub fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    /// Planned end, after the start.
    pub fn end_date(&self) -> DateTime<Utc> {
        self.end_date
    }

    /// Optional thumbnail image URL.
    pub fn thumbnail_url(&self) -> Option<&str> {
        self.thumbnail_url.as_deref()
    }

    /// Technologies the project uses.
    pub fn tech_stacks(&self) -> &[String] {
        &self.tech_stacks
    }

    /// Open positions, at least one.
    pub fn recruitments(&self) -> &[Recruitment] {
        &self.recruitments
    }

    /// Free-form description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the owner marked the project complete.
    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    /// Bookmarks in insertion order.
    pub fn bookmarks(&self) -> &[ProjectBookmark] {
        &self.bookmarks
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

#[cfg(test)]
#[path = "project_tests.rs"]
mod tests;

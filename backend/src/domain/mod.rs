//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed entities of the matching platform
//! (projects, comments, tryouts, resumes, users, notifications and the job
//! and tech-stack dictionaries) together with the services implementing the
//! driving ports in [`ports`]. Nothing here knows about HTTP or MongoDB.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Aggregates: Project, ProjectComment, ProjectTryout, Resume, User, ...
//! - Services: ProjectService, CommentService, TryoutService, ...
//! - NotificationHub: per-user fan-out of live notifications.

pub mod catalog;
pub mod catalog_service;
pub mod comment;
pub mod comment_service;
pub mod error;
pub mod ids;
pub mod login_service;
pub mod notification;
pub mod notification_hub;
pub mod notification_service;
pub mod notifier;
pub mod ports;
pub mod project;
pub mod project_service;
pub mod resume;
pub mod resume_service;
pub mod search;
pub mod trace_id;
pub mod tryout;
pub mod tryout_service;
pub mod user;
pub mod user_service;

pub use self::catalog::{EmptyCatalogName, Job, TechStack};
pub use self::catalog_service::CatalogService;
#[cfg(test)]
pub(crate) use self::comment::assemble_threads;
pub use self::comment::{CommentThread, DELETED_COMMENT_CONTENT, ProjectComment};
pub use self::comment_service::{COMMENT_MAX_CHARS, CommentService};
pub use self::error::{Error, ErrorCode};
pub use self::ids::{
    CommentId, IdError, JobId, MemberId, NotificationId, ProjectId, ResumeId, TechStackId,
    TryoutId, UserId,
};
pub use self::login_service::OAuthLoginService;
pub use self::notification::{Notification, NotificationType};
pub use self::notification_hub::{DEFAULT_NOTIFICATION_BUFFER, NotificationHub, Subscription};
pub use self::notification_service::NotificationService;
pub use self::notifier::Notifier;
pub use self::project::{
    Project, ProjectBookmark, ProjectDraft, ProjectValidationError, Recruitment,
};
pub use self::project_service::ProjectService;
pub use self::resume::{
    COPY_TITLE_SUFFIX, JobExperience, ProjectExperience, Resume, ResumeDraft, ResumeOwner,
    ResumeValidationError,
};
pub use self::resume_service::ResumeService;
pub use self::search::{
    DateRange, DateRangeError, KeywordFilter, ProjectFilterType, ProjectSortKey,
    ResumeFilterType, ResumeSortKey, SortOrder, UnknownVariant, ensure_ordered,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::tryout::{
    ApplicantProfile, ProjectMember, ProjectTryout, TryoutStatus, TryoutTransitionError,
};
pub use self::tryout_service::TryoutService;
pub use self::user::{
    NICKNAME_MAX, NICKNAME_MIN, Nickname, ResumeBookmark, User, UserProfile, UserValidationError,
};
pub use self::user_service::UserService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use pmeet::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("only the project owner may do this"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;

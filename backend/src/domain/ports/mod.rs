//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, token and OAuth adapters, the live
//! notification publisher) describe what the domain needs from
//! infrastructure. Driving ports (`*Command`, `*Query`, [`LoginService`])
//! describe what inbound adapters may ask of the domain.

mod macros;
pub(crate) use macros::define_port_error;

mod catalog_command;
mod catalog_repository;
mod comment_command;
mod comment_repository;
mod notification_command;
mod notification_repository;
mod oauth_client;
mod project_command;
mod project_query;
mod project_repository;
mod repository_error;
mod resume_command;
mod resume_repository;
mod token_service;
mod tryout_command;
mod tryout_repository;
mod user_command;
mod user_repository;

#[cfg(test)]
pub use catalog_command::{MockCatalogCommand, MockCatalogQuery};
pub use catalog_command::{CatalogCommand, CatalogQuery};
#[cfg(test)]
pub use catalog_repository::{MockJobRepository, MockTechStackRepository};
pub use catalog_repository::{JobRepository, TechStackRepository};
#[cfg(test)]
pub use comment_command::{MockCommentCommand, MockCommentQuery};
pub use comment_command::{CommentCommand, CommentQuery};
#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comment_repository::CommentRepository;
#[cfg(test)]
pub use notification_command::{MockNotificationCommand, MockNotificationQuery};
pub use notification_command::{NotificationCommand, NotificationQuery};
#[cfg(test)]
pub use notification_repository::{MockNotificationPublisher, MockNotificationRepository};
pub use notification_repository::{
    NoOpNotificationPublisher, NotificationPublisher, NotificationRepository,
};
#[cfg(test)]
pub use oauth_client::MockOAuthClient;
pub use oauth_client::{OAuthClient, OAuthClientError, OAuthProfile};
#[cfg(test)]
pub use project_command::MockProjectCommand;
pub use project_command::ProjectCommand;
#[cfg(test)]
pub use project_query::MockProjectQuery;
pub use project_query::{ProjectQuery, ProjectView};
#[cfg(test)]
pub use project_repository::MockProjectRepository;
pub use project_repository::{ProjectRepository, ProjectSearch};
pub use repository_error::{RepositoryError, map_repository_error};
#[cfg(test)]
pub use resume_command::{MockResumeCommand, MockResumeQuery};
pub use resume_command::{ResumeCommand, ResumeQuery, ResumeView};
#[cfg(test)]
pub use resume_repository::MockResumeRepository;
pub use resume_repository::{ResumeRepository, ResumeSearch};
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{AccessToken, TokenError, TokenService};
#[cfg(test)]
pub use tryout_command::{MockTryoutCommand, MockTryoutQuery};
pub use tryout_command::{TryoutCommand, TryoutQuery};
#[cfg(test)]
pub use tryout_repository::{MockMemberRepository, MockTryoutRepository};
pub use tryout_repository::{MemberRepository, TryoutRepository};
#[cfg(test)]
pub use user_command::{MockLoginService, MockUserCommand, MockUserQuery};
pub use user_command::{LoginOutcome, LoginService, UserCommand, UserQuery};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::UserRepository;
